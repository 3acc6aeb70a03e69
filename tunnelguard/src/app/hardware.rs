// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Derivation of hardware-impact estimates for audit entries
//!
//! The derivation is a pure function of the component and its wear
//! percentage.  The live workflow paths always use the fixed wear values
//! below so that their log payloads are reproducible; only the seed-data
//! generator samples wear at random.

use chrono::DateTime;
use chrono::Duration;
use chrono::Utc;
use tunnelguard_common::api::external::{HardwareImpact, ImpactLevel};

/// Fixed wear attributed to one guidance-display toggle
pub const GUIDANCE_DISPLAY_WEAR: u8 = 10;
/// Fixed wear attributed to one barrier actuation
pub const BARRIER_MOTOR_WEAR: u8 = 55;

/// Classify a wear percentage into a severity band
pub fn impact_level(wear_percentage: u8) -> ImpactLevel {
    if wear_percentage > 85 {
        ImpactLevel::Critical
    } else if wear_percentage > 70 {
        ImpactLevel::High
    } else if wear_percentage > 45 {
        ImpactLevel::Medium
    } else {
        ImpactLevel::Low
    }
}

/// How soon maintenance should be scheduled, in days
///
/// Higher wear means sooner maintenance.
pub fn maintenance_window_days(level: ImpactLevel) -> i64 {
    match level {
        ImpactLevel::Critical => 7,
        ImpactLevel::High => 30,
        ImpactLevel::Medium => 60,
        ImpactLevel::Low => 90,
    }
}

/// Derive the full hardware-impact payload for one operation on a component
pub fn derive_impact(
    tunnel_id: &str,
    component_name: &str,
    wear_percentage: u8,
    operation_count: u32,
    timestamp: DateTime<Utc>,
) -> HardwareImpact {
    let level = impact_level(wear_percentage);
    let window_days = maintenance_window_days(level);
    HardwareImpact {
        device_id: format!(
            "{}-{}",
            tunnel_id,
            component_name.replace(' ', "")
        ),
        component_name: component_name.to_string(),
        impact_level: level,
        wear_percentage,
        estimated_lifespan: format!(
            "{} months",
            (100 - i64::from(wear_percentage)) / 10 * 3
        ),
        maintenance_recommendation: match level {
            ImpactLevel::Critical | ImpactLevel::High => {
                String::from("Immediate replacement recommended")
            }
            ImpactLevel::Medium | ImpactLevel::Low => format!(
                "Schedule routine maintenance within {} days",
                window_days
            ),
        },
        last_maintenance: None,
        next_scheduled_maintenance: timestamp + Duration::days(window_days),
        operation_count,
    }
}

/// Deterministic payload for a guidance-display toggle
pub fn guidance_display_impact(
    tunnel_id: &str,
    timestamp: DateTime<Utc>,
) -> HardwareImpact {
    derive_impact(
        tunnel_id,
        "Traffic Guidance Display",
        GUIDANCE_DISPLAY_WEAR,
        1,
        timestamp,
    )
}

/// Deterministic payload for a barrier actuation
pub fn barrier_toggle_impact(
    tunnel_id: &str,
    timestamp: DateTime<Utc>,
) -> HardwareImpact {
    derive_impact(tunnel_id, "Barrier Motor", BARRIER_MOTOR_WEAR, 1, timestamp)
}
