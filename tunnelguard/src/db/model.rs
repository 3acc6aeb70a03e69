// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Stored records, and the explicit create/patch value objects used to
//! insert and modify them
//!
//! Patch structs carry named optional fields rather than free-form maps so
//! that unknown keys are rejected at the schema boundary instead of being
//! silently merged.

use chrono::DateTime;
use chrono::Utc;
use tunnelguard_api::params;
use tunnelguard_api::views;
use tunnelguard_common::api::external::{
    BarrierStatus, ClosureRequestStatus, HardwareImpact, RiskLevel, Role,
    UserStatus,
};

// USERS

/// A registered user
///
/// The password is an opaque credential: it is stored as received, never
/// rendered into a view, and never written into an operations-log payload.
#[derive(Clone, Debug)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub role: Role,
    pub status: UserStatus,
}

impl From<User> for views::User {
    fn from(user: User) -> views::User {
        views::User {
            id: user.id,
            username: user.username,
            full_name: user.full_name,
            email: user.email,
            phone: user.phone,
            role: user.role,
            status: user.status,
        }
    }
}

/// Fields of a new user record (id and status are assigned by the store)
#[derive(Clone, Debug)]
pub struct UserCreate {
    pub username: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub password: String,
    pub role: Role,
}

impl From<params::UserCreate> for UserCreate {
    fn from(params: params::UserCreate) -> UserCreate {
        UserCreate {
            username: params.username,
            full_name: params.full_name,
            email: params.email,
            phone: params.phone,
            password: params.password,
            role: params.role.unwrap_or(Role::Public),
        }
    }
}

/// Patch applied to a user record
#[derive(Clone, Debug, Default)]
pub struct UserUpdate {
    pub username: Option<String>,
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub password: Option<String>,
    pub role: Option<Role>,
    pub status: Option<UserStatus>,
}

impl From<params::UserUpdate> for UserUpdate {
    // `admin_id` identifies the actor, not a user property; it is dropped
    // here so it can never be merged into the record.
    fn from(params: params::UserUpdate) -> UserUpdate {
        UserUpdate {
            username: params.username,
            full_name: params.full_name,
            email: params.email,
            phone: params.phone,
            password: params.password,
            role: params.role,
            status: params.status,
        }
    }
}

// TUNNELS

/// A monitored tunnel
#[derive(Clone, Debug)]
pub struct Tunnel {
    /// human-assigned code, e.g. "TUN001"
    pub id: String,
    pub name: String,
    pub risk_level: RiskLevel,
    pub water_level: i32,
    pub barrier_status: BarrierStatus,
    /// refreshed on every mutation
    pub last_update: DateTime<Utc>,
    pub guidance_display_enabled: bool,
    pub active_guidance_symbol: String,
}

impl From<Tunnel> for views::Tunnel {
    fn from(tunnel: Tunnel) -> views::Tunnel {
        views::Tunnel {
            id: tunnel.id,
            name: tunnel.name,
            risk_level: tunnel.risk_level,
            water_level: tunnel.water_level,
            barrier_status: tunnel.barrier_status,
            last_update: tunnel.last_update,
            guidance_display_enabled: tunnel.guidance_display_enabled,
            active_guidance_symbol: tunnel.active_guidance_symbol,
        }
    }
}

/// Fields of a new tunnel record
#[derive(Clone, Debug)]
pub struct TunnelCreate {
    pub id: String,
    pub name: String,
    pub risk_level: RiskLevel,
    pub water_level: i32,
    pub barrier_status: BarrierStatus,
    pub guidance_display_enabled: bool,
    pub active_guidance_symbol: String,
}

impl From<params::TunnelCreate> for TunnelCreate {
    fn from(params: params::TunnelCreate) -> TunnelCreate {
        TunnelCreate {
            id: params.id,
            name: params.name,
            risk_level: params.risk_level,
            water_level: params.water_level,
            barrier_status: params.barrier_status,
            guidance_display_enabled: params
                .guidance_display_enabled
                .unwrap_or(false),
            active_guidance_symbol: params
                .active_guidance_symbol
                .unwrap_or_else(|| String::from("none")),
        }
    }
}

/// Patch applied to a tunnel record
#[derive(Clone, Debug, Default)]
pub struct TunnelUpdate {
    pub name: Option<String>,
    pub risk_level: Option<RiskLevel>,
    pub water_level: Option<i32>,
    pub barrier_status: Option<BarrierStatus>,
    pub guidance_display_enabled: Option<bool>,
    pub active_guidance_symbol: Option<String>,
}

impl From<params::TunnelUpdate> for TunnelUpdate {
    // `user_id` identifies the actor and is dropped before the merge.
    fn from(params: params::TunnelUpdate) -> TunnelUpdate {
        TunnelUpdate {
            name: params.name,
            risk_level: params.risk_level,
            water_level: params.water_level,
            barrier_status: params.barrier_status,
            guidance_display_enabled: params.guidance_display_enabled,
            active_guidance_symbol: params.active_guidance_symbol,
        }
    }
}

// SENSORS

/// A sensor installed in a tunnel
///
/// `tunnel_id` is a loose reference; the store does not enforce referential
/// integrity.
#[derive(Clone, Debug)]
pub struct Sensor {
    pub id: i64,
    pub tunnel_id: String,
    pub kind: String,
    pub value: i32,
    pub unit: String,
    pub status: String,
    pub last_calibrated: DateTime<Utc>,
    pub next_maintenance: DateTime<Utc>,
}

impl From<Sensor> for views::Sensor {
    fn from(sensor: Sensor) -> views::Sensor {
        views::Sensor {
            id: sensor.id,
            tunnel_id: sensor.tunnel_id,
            kind: sensor.kind,
            value: sensor.value,
            unit: sensor.unit,
            status: sensor.status,
            last_calibrated: sensor.last_calibrated,
            next_maintenance: sensor.next_maintenance,
        }
    }
}

/// Fields of a new sensor record
#[derive(Clone, Debug)]
pub struct SensorCreate {
    pub tunnel_id: String,
    pub kind: String,
    pub value: i32,
    pub unit: String,
    pub status: String,
    /// defaults to the creation time when absent
    pub last_calibrated: Option<DateTime<Utc>>,
    pub next_maintenance: DateTime<Utc>,
}

impl From<params::SensorCreate> for SensorCreate {
    fn from(params: params::SensorCreate) -> SensorCreate {
        SensorCreate {
            tunnel_id: params.tunnel_id,
            kind: params.kind,
            value: params.value,
            unit: params.unit.unwrap_or_else(|| String::from("mm")),
            status: params.status,
            last_calibrated: params.last_calibrated,
            next_maintenance: params.next_maintenance,
        }
    }
}

/// Patch applied to a sensor record
#[derive(Clone, Debug, Default)]
pub struct SensorUpdate {
    pub kind: Option<String>,
    pub value: Option<i32>,
    pub unit: Option<String>,
    pub status: Option<String>,
    pub last_calibrated: Option<DateTime<Utc>>,
    pub next_maintenance: Option<DateTime<Utc>>,
}

impl From<params::SensorUpdate> for SensorUpdate {
    fn from(params: params::SensorUpdate) -> SensorUpdate {
        SensorUpdate {
            kind: params.kind,
            value: params.value,
            unit: params.unit,
            status: params.status,
            last_calibrated: params.last_calibrated,
            next_maintenance: params.next_maintenance,
        }
    }
}

// CLOSURE REQUESTS

/// A request to close a tunnel's flood barrier
///
/// `reviewed_by_id` and `review_notes` are set exactly when the status has
/// left `pending`.
#[derive(Clone, Debug)]
pub struct ClosureRequest {
    pub id: i64,
    pub tunnel_id: String,
    pub requested_by_id: i64,
    pub message: String,
    pub status: ClosureRequestStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub reviewed_by_id: Option<i64>,
    pub review_notes: Option<String>,
}

impl From<ClosureRequest> for views::ClosureRequest {
    fn from(request: ClosureRequest) -> views::ClosureRequest {
        views::ClosureRequest {
            id: request.id,
            tunnel_id: request.tunnel_id,
            requested_by_id: request.requested_by_id,
            message: request.message,
            status: request.status,
            created_at: request.created_at,
            updated_at: request.updated_at,
            reviewed_by_id: request.reviewed_by_id,
            review_notes: request.review_notes,
        }
    }
}

/// Fields of a new closure request (everything else is assigned by the
/// store)
#[derive(Clone, Debug)]
pub struct ClosureRequestCreate {
    pub tunnel_id: String,
    pub requested_by_id: i64,
    pub message: String,
}

impl From<params::ClosureRequestCreate> for ClosureRequestCreate {
    fn from(params: params::ClosureRequestCreate) -> ClosureRequestCreate {
        ClosureRequestCreate {
            tunnel_id: params.tunnel_id,
            requested_by_id: params.requested_by_id,
            message: params.message,
        }
    }
}

// OPERATIONS LOGS

/// An append-only audit record of a permission-gated operation
#[derive(Clone, Debug)]
pub struct OperationsLog {
    pub id: i64,
    /// the actor
    pub user_id: i64,
    pub action: String,
    pub category: String,
    pub details: serde_json::Value,
    pub entity_id: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub environment_data: serde_json::Value,
    pub hardware_impact: Option<HardwareImpact>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

impl From<OperationsLog> for views::OperationsLog {
    fn from(log: OperationsLog) -> views::OperationsLog {
        views::OperationsLog {
            id: log.id,
            user_id: log.user_id,
            action: log.action,
            category: log.category,
            details: log.details,
            entity_id: log.entity_id,
            timestamp: log.timestamp,
            environment_data: log.environment_data,
            hardware_impact: log.hardware_impact,
            ip_address: log.ip_address,
            user_agent: log.user_agent,
        }
    }
}

/// Fields of a new operations-log entry
#[derive(Clone, Debug)]
pub struct OperationsLogCreate {
    pub user_id: i64,
    pub action: String,
    pub category: String,
    pub details: serde_json::Value,
    pub entity_id: Option<String>,
    /// stamped with the current time when absent; the seed-data generator
    /// backdates its synthetic maintenance history
    pub timestamp: Option<DateTime<Utc>>,
    pub environment_data: serde_json::Value,
    pub hardware_impact: Option<HardwareImpact>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

/// Filters applied when listing operations-log entries
#[derive(Clone, Debug, Default)]
pub struct OperationsLogFilter {
    pub user_id: Option<i64>,
    pub category: Option<String>,
    pub start_date: Option<DateTime<Utc>>,
    pub end_date: Option<DateTime<Utc>>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
}

impl From<tunnelguard_api::OperationsLogFilter> for OperationsLogFilter {
    fn from(
        params: tunnelguard_api::OperationsLogFilter,
    ) -> OperationsLogFilter {
        OperationsLogFilter {
            user_id: params.user_id,
            category: params.category,
            start_date: params.start_date,
            end_date: params.end_date,
            limit: params.limit,
            offset: params.offset,
        }
    }
}
