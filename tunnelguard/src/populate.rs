// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Startup task to load the demonstration dataset into an empty store
//!
//! Seeds the four predefined accounts, the seven monitored tunnels with a
//! sensor array each, and thirty days of synthetic maintenance history.  The
//! maintenance history samples wear percentages at random; the live workflow
//! paths never do.

use crate::app::hardware;
use crate::db::model;
use crate::db::DataStore;
use chrono::Duration;
use chrono::Utc;
use rand::Rng;
use serde_json::json;
use slog::info;
use slog::Logger;
use tunnelguard_common::api::external::{
    BarrierStatus, Error, RiskLevel, Role,
};

struct SeedUser {
    username: &'static str,
    full_name: &'static str,
    email: &'static str,
    phone: &'static str,
    password: &'static str,
    role: Role,
}

const SEED_USERS: [SeedUser; 4] = [
    SeedUser {
        username: "admin",
        full_name: "System Administrator",
        email: "admin@tunnelguard.com",
        phone: "+973 3312 4567",
        password: "Admin123",
        role: Role::Admin,
    },
    SeedUser {
        username: "ministry",
        full_name: "Sara Ali",
        email: "sara@tunnelguard.com",
        phone: "+973 3398 7654",
        password: "ministry123",
        role: Role::Ministry,
    },
    SeedUser {
        username: "traffic",
        full_name: "Ahmed Hassan",
        email: "ahmed@tunnelguard.com",
        phone: "+973 3345 8901",
        password: "traffic123",
        role: Role::Traffic,
    },
    SeedUser {
        username: "public",
        full_name: "John Public",
        email: "public@example.com",
        phone: "+973 1234 5678",
        password: "public123",
        role: Role::Public,
    },
];

struct SeedTunnel {
    id: &'static str,
    name: &'static str,
    risk_level: RiskLevel,
    water_level: i32,
    barrier_status: BarrierStatus,
}

const SEED_TUNNELS: [SeedTunnel; 7] = [
    SeedTunnel {
        id: "TUN001",
        name: "Al Fateh Tunnel",
        risk_level: RiskLevel::High,
        water_level: 78,
        barrier_status: BarrierStatus::Closed,
    },
    SeedTunnel {
        id: "TUN002",
        name: "Diplomatic Area Tunnel",
        risk_level: RiskLevel::Moderate,
        water_level: 45,
        barrier_status: BarrierStatus::Open,
    },
    SeedTunnel {
        id: "TUN003",
        name: "Tubli Bay Tunnel",
        risk_level: RiskLevel::Moderate,
        water_level: 52,
        barrier_status: BarrierStatus::Open,
    },
    SeedTunnel {
        id: "TUN004",
        name: "King Faisal Highway Tunnel",
        risk_level: RiskLevel::High,
        water_level: 85,
        barrier_status: BarrierStatus::Closed,
    },
    SeedTunnel {
        id: "TUN005",
        name: "Muharraq Island Tunnel",
        risk_level: RiskLevel::Moderate,
        water_level: 48,
        barrier_status: BarrierStatus::Open,
    },
    SeedTunnel {
        id: "TUN006",
        name: "Sitra Island Tunnel",
        risk_level: RiskLevel::Low,
        water_level: 15,
        barrier_status: BarrierStatus::Open,
    },
    SeedTunnel {
        id: "TUN007",
        name: "Buri Village Tunnel",
        risk_level: RiskLevel::Low,
        water_level: 12,
        barrier_status: BarrierStatus::Open,
    },
];

const HARDWARE_COMPONENTS: [&str; 10] = [
    "Barrier Motor",
    "Water Pump",
    "Ventilation System",
    "Lighting Controller",
    "CCTV Camera",
    "Sensor Array",
    "Power Backup System",
    "Emergency Phone System",
    "Water Level Detector",
    "Traffic Light Controller",
];

const MAINTENANCE_ACTIONS: [&str; 9] = [
    "Updated tunnel barrier settings",
    "Calibrated water level sensors",
    "Replaced emergency lighting",
    "Adjusted ventilation system",
    "Performed routine inspection",
    "Upgraded control software",
    "Restarted monitoring systems",
    "Modified sensor thresholds",
    "Reset emergency systems",
];

/// Seed the demonstration dataset
///
/// Expects an empty store; seeding twice fails on the email uniqueness
/// check.
pub async fn seed_demo_data(
    log: &Logger,
    datastore: &DataStore,
) -> Result<(), Error> {
    let mut staff_ids = Vec::new();
    for seed in &SEED_USERS {
        let user = datastore
            .user_create(model::UserCreate {
                username: seed.username.to_string(),
                full_name: seed.full_name.to_string(),
                email: seed.email.to_string(),
                phone: seed.phone.to_string(),
                password: seed.password.to_string(),
                role: seed.role,
            })
            .await?;
        if seed.role != Role::Public {
            staff_ids.push(user.id);
        }
    }

    let now = Utc::now();
    let mut rng = rand::rng();
    for seed in &SEED_TUNNELS {
        datastore
            .tunnel_create(model::TunnelCreate {
                id: seed.id.to_string(),
                name: seed.name.to_string(),
                risk_level: seed.risk_level,
                water_level: seed.water_level,
                barrier_status: seed.barrier_status,
                guidance_display_enabled: false,
                active_guidance_symbol: String::from("none"),
            })
            .await?;

        let kinds = [
            "temperature",
            "humidity",
            "entrance",
            "center",
            "exit",
            "waterLevel",
            "airQuality",
        ];
        let values = [28, 72, 65, 85, 55, seed.water_level, 65];
        let statuses = [
            "Warning",
            "Warning",
            "Warning",
            "Critical",
            "Warning",
            match seed.risk_level {
                RiskLevel::High => "Critical",
                RiskLevel::Moderate => "Warning",
                RiskLevel::Low => "Normal",
            },
            "Normal",
        ];
        for ((kind, value), status) in
            kinds.iter().zip(values).zip(statuses)
        {
            datastore
                .sensor_create(model::SensorCreate {
                    tunnel_id: seed.id.to_string(),
                    kind: kind.to_string(),
                    value,
                    unit: String::from("mm"),
                    status: status.to_string(),
                    last_calibrated: Some(
                        now - Duration::days(rng.random_range(0..30)),
                    ),
                    next_maintenance: now
                        + Duration::days(rng.random_range(30..90)),
                })
                .await?;
        }
    }

    // Synthetic maintenance history over the last thirty days.  Wear is
    // sampled at random here, unlike the live audit paths.
    for _ in 0..20 {
        let tunnel =
            &SEED_TUNNELS[rng.random_range(0..SEED_TUNNELS.len())];
        let actor_id = staff_ids[rng.random_range(0..staff_ids.len())];
        let component = HARDWARE_COMPONENTS
            [rng.random_range(0..HARDWARE_COMPONENTS.len())];
        let action = MAINTENANCE_ACTIONS
            [rng.random_range(0..MAINTENANCE_ACTIONS.len())];
        let wear = rng.random_range(0..100u8);
        let timestamp = now - Duration::days(rng.random_range(0..30));

        let mut impact = hardware::derive_impact(
            tunnel.id,
            component,
            wear,
            rng.random_range(500..1500),
            timestamp,
        );
        impact.last_maintenance =
            Some(timestamp - Duration::days(rng.random_range(0..90)));

        datastore
            .operations_log_create(model::OperationsLogCreate {
                user_id: actor_id,
                action: action.to_string(),
                category: String::from("tunnel"),
                details: json!({
                    "tunnelName": tunnel.name,
                    "actionType": "maintenance",
                }),
                entity_id: Some(tunnel.id.to_string()),
                timestamp: Some(timestamp),
                environment_data: json!({
                    "temperature": rng.random_range(20..35),
                    "humidity": rng.random_range(60..90),
                    "weatherCondition": (["Clear", "Rainy", "Windy", "Foggy"]
                        [rng.random_range(0..4)]),
                }),
                hardware_impact: Some(impact),
                ip_address: Some(format!(
                    "192.168.1.{}",
                    rng.random_range(0..255)
                )),
                user_agent: Some(String::from(
                    "TunnelGuard Maintenance App",
                )),
            })
            .await?;
    }

    info!(log, "seeded demo data";
        "users" => SEED_USERS.len(),
        "tunnels" => SEED_TUNNELS.len(),
    );
    Ok(())
}
