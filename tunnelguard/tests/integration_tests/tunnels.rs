// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! CRUD tests for tunnels and their sensors

use crate::common::{
    create_tunnel, object_delete, object_get, object_put, objects_post,
    test_setup,
};
use http::method::Method;
use http::StatusCode;
use tunnelguard_api::{params, views};
use tunnelguard_common::api::external::{BarrierStatus, RiskLevel};

#[tokio::test]
async fn test_tunnel_crud() {
    let testctx = test_setup("test_tunnel_crud").await;
    let client = &testctx.client;

    let tunnel = create_tunnel(client, "TUN001", BarrierStatus::Open).await;
    assert_eq!(tunnel.id, "TUN001");
    assert!(!tunnel.guidance_display_enabled);
    assert_eq!(tunnel.active_guidance_symbol, "none");

    // duplicate codes are rejected
    let error = client
        .make_request_error_body(
            Method::POST,
            "/tunnels",
            params::TunnelCreate {
                id: String::from("TUN001"),
                name: String::from("Duplicate"),
                risk_level: RiskLevel::Low,
                water_level: 5,
                barrier_status: BarrierStatus::Open,
                guidance_display_enabled: None,
                active_guidance_symbol: None,
            },
            StatusCode::BAD_REQUEST,
        )
        .await;
    assert!(error.message.contains("already exists"));

    // partial update touches only the provided fields and refreshes
    // lastUpdate
    let updated: views::Tunnel = object_put(
        client,
        "/tunnels/TUN001",
        params::TunnelUpdate {
            risk_level: Some(RiskLevel::High),
            water_level: Some(82),
            ..Default::default()
        },
    )
    .await;
    assert_eq!(updated.risk_level, RiskLevel::High);
    assert_eq!(updated.water_level, 82);
    assert_eq!(updated.name, tunnel.name);
    assert!(updated.last_update >= tunnel.last_update);

    let listed: Vec<views::Tunnel> = object_get(client, "/tunnels").await;
    assert_eq!(listed.len(), 1);

    object_delete(client, "/tunnels/TUN001").await;
    let error = client
        .make_request_error(
            Method::GET,
            "/tunnels/TUN001",
            StatusCode::NOT_FOUND,
        )
        .await;
    assert!(error.message.contains("not found: tunnel"));

    testctx.cleanup().await;
}

#[tokio::test]
async fn test_sensors_scoped_to_tunnel() {
    let testctx = test_setup("test_sensors_scoped_to_tunnel").await;
    let client = &testctx.client;

    create_tunnel(client, "TUN001", BarrierStatus::Open).await;
    create_tunnel(client, "TUN002", BarrierStatus::Open).await;

    let sensor: views::Sensor = objects_post(
        client,
        "/sensors",
        params::SensorCreate {
            tunnel_id: String::from("TUN001"),
            kind: String::from("waterLevel"),
            value: 40,
            unit: None,
            status: String::from("Normal"),
            last_calibrated: None,
            next_maintenance: chrono::Utc::now() + chrono::Duration::days(45),
        },
    )
    .await;
    assert_eq!(sensor.unit, "mm");
    assert_eq!(sensor.kind, "waterLevel");

    let _: views::Sensor = objects_post(
        client,
        "/sensors",
        params::SensorCreate {
            tunnel_id: String::from("TUN002"),
            kind: String::from("temperature"),
            value: 28,
            unit: Some(String::from("C")),
            status: String::from("Normal"),
            last_calibrated: None,
            next_maintenance: chrono::Utc::now() + chrono::Duration::days(45),
        },
    )
    .await;

    let for_one: Vec<views::Sensor> =
        object_get(client, "/tunnels/TUN001/sensors").await;
    assert_eq!(for_one.len(), 1);
    assert_eq!(for_one[0].id, sensor.id);

    // sensor readings change over time
    let updated: views::Sensor = object_put(
        client,
        &format!("/sensors/{}", sensor.id),
        params::SensorUpdate {
            value: Some(65),
            status: Some(String::from("Warning")),
            ..Default::default()
        },
    )
    .await;
    assert_eq!(updated.value, 65);
    assert_eq!(updated.status, "Warning");

    // updating a sensor that doesn't exist
    client
        .make_request_error_body(
            Method::PUT,
            "/sensors/12345",
            params::SensorUpdate { value: Some(1), ..Default::default() },
            StatusCode::NOT_FOUND,
        )
        .await;

    testctx.cleanup().await;
}
