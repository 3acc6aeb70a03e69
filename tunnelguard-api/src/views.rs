// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Views are response bodies: public lenses onto the stored records.
//!
//! The one place a view deliberately diverges from the stored record is
//! [`User`], which never carries the password.

use chrono::DateTime;
use chrono::Utc;
use schemars::JsonSchema;
use serde::Deserialize;
use serde::Serialize;
use tunnelguard_common::api::external::{
    BarrierStatus, ClosureRequestStatus, HardwareImpact, RiskLevel, Role,
    UserStatus,
};

/// Client view of a user
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub username: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub role: Role,
    pub status: UserStatus,
}

/// Client view of a tunnel
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Tunnel {
    pub id: String,
    pub name: String,
    pub risk_level: RiskLevel,
    pub water_level: i32,
    pub barrier_status: BarrierStatus,
    pub last_update: DateTime<Utc>,
    pub guidance_display_enabled: bool,
    pub active_guidance_symbol: String,
}

/// Client view of a sensor
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Sensor {
    pub id: i64,
    pub tunnel_id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub value: i32,
    pub unit: String,
    pub status: String,
    pub last_calibrated: DateTime<Utc>,
    pub next_maintenance: DateTime<Utc>,
}

/// Client view of a closure request
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
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

/// Client view of an operations-log entry
#[derive(Clone, Debug, Deserialize, Serialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct OperationsLog {
    pub id: i64,
    /// id of the acting user
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
