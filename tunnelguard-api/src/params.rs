// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Params define the request bodies of API endpoints for creating or
//! updating resources.

use chrono::DateTime;
use chrono::Utc;
use schemars::JsonSchema;
use serde::Deserialize;
use serde::Serialize;
use tunnelguard_common::api::external::{
    BarrierStatus, HardwareImpact, RiskLevel, Role, UserStatus,
};

// USERS

/// Create-time parameters for a user
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserCreate {
    pub username: String,
    pub full_name: String,
    /// must be unique across all users
    pub email: String,
    pub phone: String,
    pub password: String,
    /// defaults to `public` when omitted
    #[serde(default)]
    pub role: Option<Role>,
}

/// Updateable properties of a user
///
/// `admin_id` identifies the actor making the change and is not itself a
/// user property.
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    #[serde(default)]
    pub admin_id: Option<i64>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub role: Option<Role>,
    #[serde(default)]
    pub status: Option<UserStatus>,
}

/// Credentials presented to the login endpoint
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
}

// TUNNELS

/// Create-time parameters for a tunnel
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TunnelCreate {
    /// human-assigned code, e.g. "TUN001"
    pub id: String,
    pub name: String,
    pub risk_level: RiskLevel,
    /// water level as a percentage
    pub water_level: i32,
    pub barrier_status: BarrierStatus,
    #[serde(default)]
    pub guidance_display_enabled: Option<bool>,
    #[serde(default)]
    pub active_guidance_symbol: Option<String>,
}

/// Updateable properties of a tunnel
///
/// `user_id` identifies the actor making the change and is not itself a
/// tunnel property.
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct TunnelUpdate {
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub risk_level: Option<RiskLevel>,
    #[serde(default)]
    pub water_level: Option<i32>,
    #[serde(default)]
    pub barrier_status: Option<BarrierStatus>,
    #[serde(default)]
    pub guidance_display_enabled: Option<bool>,
    #[serde(default)]
    pub active_guidance_symbol: Option<String>,
}

/// Parameters for setting a tunnel's driver-guidance display
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GuidanceDisplaySet {
    pub enabled: bool,
    /// symbol to show; defaults to "none"
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub user_id: Option<i64>,
}

// SENSORS

/// Create-time parameters for a sensor
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SensorCreate {
    pub tunnel_id: String,
    /// e.g. "waterLevel", "temperature", "humidity"
    #[serde(rename = "type")]
    pub kind: String,
    pub value: i32,
    /// defaults to "mm"
    #[serde(default)]
    pub unit: Option<String>,
    pub status: String,
    /// defaults to the creation time
    #[serde(default)]
    pub last_calibrated: Option<DateTime<Utc>>,
    pub next_maintenance: DateTime<Utc>,
}

/// Updateable properties of a sensor
#[derive(Clone, Debug, Default, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SensorUpdate {
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub value: Option<i32>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub last_calibrated: Option<DateTime<Utc>>,
    #[serde(default)]
    pub next_maintenance: Option<DateTime<Utc>>,
}

// CLOSURE REQUESTS

/// Create-time parameters for a closure request
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClosureRequestCreate {
    pub tunnel_id: String,
    pub requested_by_id: i64,
    /// free-text justification for the closure
    pub message: String,
}

/// The decision applied to a pending closure request
#[derive(
    Clone, Copy, Debug, Deserialize, Eq, JsonSchema, PartialEq, Serialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ReviewDecision {
    Approved,
    Rejected,
}

/// Parameters for reviewing a closure request
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClosureRequestReview {
    pub status: ReviewDecision,
    /// id of the reviewing staff member; required to decide
    #[serde(default)]
    pub reviewed_by_id: Option<i64>,
    /// required, non-empty justification for the decision
    #[serde(default)]
    pub review_notes: Option<String>,
}

// OPERATIONS LOGS

/// Create-time parameters for a directly-submitted operations-log entry
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct OperationsLogCreate {
    /// id of the acting user
    pub user_id: i64,
    pub action: String,
    pub category: String,
    #[serde(default)]
    pub details: Option<serde_json::Value>,
    #[serde(default)]
    pub entity_id: Option<String>,
    #[serde(default)]
    pub environment_data: Option<serde_json::Value>,
    #[serde(default)]
    pub hardware_impact: Option<HardwareImpact>,
    #[serde(default)]
    pub ip_address: Option<String>,
    #[serde(default)]
    pub user_agent: Option<String>,
}
