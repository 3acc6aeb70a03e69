// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Data structures and related facilities for representing resources in the
//! API
//!
//! The contents here are all HTTP-agnostic.

mod error;
pub use error::*;

use chrono::DateTime;
use chrono::Utc;
use schemars::JsonSchema;
use serde::Deserialize;
use serde::Serialize;
use std::fmt::Display;
use std::fmt::Formatter;
use std::fmt::Result as FormatResult;

// The type aliases below exist primarily to ensure consistency among return
// types for functions in `TunnelGuard` and `DataStore`.

/// Result of a create operation for the specified type
pub type CreateResult<T> = Result<T, Error>;
/// Result of a delete operation for the specified type
pub type DeleteResult = Result<(), Error>;
/// Result of a list operation that returns a vector
pub type ListResultVec<T> = Result<Vec<T>, Error>;
/// Result of a lookup operation for the specified type
pub type LookupResult<T> = Result<T, Error>;
/// Result of an update operation for the specified type
pub type UpdateResult<T> = Result<T, Error>;

/// Identifies a type of API resource
#[derive(Clone, Copy, Debug, Deserialize, Eq, PartialEq, Serialize)]
pub enum ResourceType {
    User,
    Tunnel,
    Sensor,
    ClosureRequest,
    OperationsLog,
}

impl Display for ResourceType {
    fn fmt(&self, f: &mut Formatter) -> FormatResult {
        write!(
            f,
            "{}",
            match self {
                ResourceType::User => "user",
                ResourceType::Tunnel => "tunnel",
                ResourceType::Sensor => "sensor",
                ResourceType::ClosureRequest => "closure request",
                ResourceType::OperationsLog => "operations log",
            }
        )
    }
}

/// A user's role, which determines what operations they may perform
///
/// Roles form a total order: `public < ministry < traffic < admin`.  A role
/// authorizes everything that any lower-ranked role authorizes, so permission
/// checks compare ranks rather than testing for exact membership.  The rank
/// table lives in [`Role::rank`]; it is the single source of truth for the
/// ordering.
#[derive(
    Clone, Copy, Debug, Deserialize, Eq, JsonSchema, PartialEq, Serialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// an ordinary member of the public reporting hazards
    Public,
    /// Ministry of Works operations staff
    Ministry,
    /// traffic directorate staff
    Traffic,
    /// system administrator
    Admin,
}

impl Role {
    /// Position of this role in the total order (higher outranks lower)
    pub fn rank(&self) -> u8 {
        match self {
            Role::Public => 1,
            Role::Ministry => 2,
            Role::Traffic => 3,
            Role::Admin => 4,
        }
    }

    /// Returns whether a caller holding this role satisfies a check that
    /// requires `required`
    ///
    /// A caller is authorized iff their rank is at or above the required
    /// rank, so higher-ranked roles inherit access to everything available
    /// to lower-ranked ones.
    pub fn authorizes(&self, required: Role) -> bool {
        self.rank() >= required.rank()
    }

    /// Returns whether a caller holding this role satisfies a check against
    /// any element of `required`
    ///
    /// The slice acts as a minimum-required-role set, not an exact-match
    /// set: a caller ranked above every element is still authorized.  An
    /// empty slice authorizes nobody.
    pub fn authorizes_any(&self, required: &[Role]) -> bool {
        required.iter().any(|role| self.authorizes(*role))
    }
}

impl Display for Role {
    fn fmt(&self, f: &mut Formatter) -> FormatResult {
        write!(
            f,
            "{}",
            match self {
                Role::Public => "public",
                Role::Ministry => "ministry",
                Role::Traffic => "traffic",
                Role::Admin => "admin",
            }
        )
    }
}

/// Lifecycle state of a user account
#[derive(
    Clone, Copy, Debug, Deserialize, Eq, JsonSchema, PartialEq, Serialize,
)]
#[serde(rename_all = "lowercase")]
pub enum UserStatus {
    Active,
    Inactive,
    Suspended,
}

/// Assessed flooding risk for a tunnel
//
// Wire values are capitalized ("Low", "Moderate", "High"), matching the
// values the dashboards were built against.
#[derive(
    Clone, Copy, Debug, Deserialize, Eq, JsonSchema, PartialEq, Serialize,
)]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
}

/// Physical state of a tunnel's flood barrier
///
/// This is the one field the closure-request workflow is entitled to
/// force-change as a side effect of approval.
#[derive(
    Clone, Copy, Debug, Deserialize, Eq, JsonSchema, PartialEq, Serialize,
)]
pub enum BarrierStatus {
    Open,
    Closed,
}

/// State of a closure request
///
/// Requests start `pending` and move to exactly one of `approved` or
/// `rejected`; the transition is not reversible.
#[derive(
    Clone, Copy, Debug, Deserialize, Eq, JsonSchema, PartialEq, Serialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ClosureRequestStatus {
    Pending,
    Approved,
    Rejected,
}

/// Severity band for a piece of hardware's estimated wear
#[derive(
    Clone, Copy, Debug, Deserialize, Eq, JsonSchema, PartialEq, Serialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ImpactLevel {
    Low,
    Medium,
    High,
    Critical,
}

/// Estimated wear and maintenance implications of a logged operation
///
/// Derived synchronously at log-write time from the action performed; not
/// independently persisted or queried.
#[derive(Clone, Debug, Deserialize, JsonSchema, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HardwareImpact {
    pub device_id: String,
    pub component_name: String,
    pub impact_level: ImpactLevel,
    /// estimated wear of the component, 0-100
    pub wear_percentage: u8,
    pub estimated_lifespan: String,
    pub maintenance_recommendation: String,
    pub last_maintenance: Option<DateTime<Utc>>,
    pub next_scheduled_maintenance: DateTime<Utc>,
    pub operation_count: u32,
}
