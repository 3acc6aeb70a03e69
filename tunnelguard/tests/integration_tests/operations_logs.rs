// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Tests for the operations log: the role gate on writes, the derived
//! audit entries, and the hardware-impact payloads

use crate::common::{
    create_tunnel, create_user, object_get, object_put, objects_post,
    test_password, test_setup,
};
use http::method::Method;
use http::StatusCode;
use tunnelguard_api::{params, views};
use tunnelguard_common::api::external::{
    BarrierStatus, ImpactLevel, Role,
};

fn direct_log(user_id: i64) -> params::OperationsLogCreate {
    params::OperationsLogCreate {
        user_id,
        action: String::from("update_tunnel"),
        category: String::from("tunnel"),
        details: Some(serde_json::json!({"note": "manual entry"})),
        entity_id: Some(String::from("TUN001")),
        environment_data: None,
        hardware_impact: None,
        ip_address: None,
        user_agent: None,
    }
}

#[tokio::test]
async fn test_direct_log_writes_are_role_gated() {
    let testctx = test_setup("test_direct_log_writes_are_role_gated").await;
    let client = &testctx.client;

    let staff = create_user(client, "staff", Role::Traffic).await;
    let visitor = create_user(client, "visitor", Role::Public).await;

    // a staff actor may write
    let log: views::OperationsLog =
        objects_post(client, "/operations-logs", direct_log(staff.id)).await;
    assert_eq!(log.user_id, staff.id);
    assert_eq!(log.action, "update_tunnel");
    // the server fills in the client address when the caller doesn't
    assert!(log.ip_address.is_some());

    // a public actor may not
    let error = client
        .make_request_error_body(
            Method::POST,
            "/operations-logs",
            direct_log(visitor.id),
            StatusCode::FORBIDDEN,
        )
        .await;
    assert_eq!(error.message, "Forbidden");

    // an unknown actor is a 404, not a 403
    client
        .make_request_error_body(
            Method::POST,
            "/operations-logs",
            direct_log(12345),
            StatusCode::NOT_FOUND,
        )
        .await;

    let logs: Vec<views::OperationsLog> =
        object_get(client, "/operations-logs").await;
    assert_eq!(logs.len(), 1);

    testctx.cleanup().await;
}

#[tokio::test]
async fn test_log_listing_filters_and_pagination() {
    let testctx =
        test_setup("test_log_listing_filters_and_pagination").await;
    let client = &testctx.client;

    let admin = create_user(client, "admin", Role::Admin).await;
    let ministry = create_user(client, "ministry", Role::Ministry).await;

    for i in 0..3 {
        let mut log = direct_log(admin.id);
        log.entity_id = Some(format!("TUN00{}", i));
        let _: views::OperationsLog =
            objects_post(client, "/operations-logs", log).await;
    }
    let mut user_log = direct_log(ministry.id);
    user_log.category = String::from("user");
    let _: views::OperationsLog =
        objects_post(client, "/operations-logs", user_log).await;

    let all: Vec<views::OperationsLog> =
        object_get(client, "/operations-logs").await;
    assert_eq!(all.len(), 4);
    // newest first
    assert!(all
        .windows(2)
        .all(|pair| pair[0].timestamp >= pair[1].timestamp));

    let by_actor: Vec<views::OperationsLog> = object_get(
        client,
        &format!("/operations-logs?userId={}", admin.id),
    )
    .await;
    assert_eq!(by_actor.len(), 3);

    let by_category: Vec<views::OperationsLog> =
        object_get(client, "/operations-logs?category=user").await;
    assert_eq!(by_category.len(), 1);
    assert_eq!(by_category[0].user_id, ministry.id);

    let page: Vec<views::OperationsLog> =
        object_get(client, "/operations-logs?limit=2&offset=1").await;
    assert_eq!(page.len(), 2);
    assert_eq!(page[0].id, all[1].id);

    let by_entity: Vec<views::OperationsLog> =
        object_get(client, "/operations-logs/entity/TUN002").await;
    assert_eq!(by_entity.len(), 1);

    testctx.cleanup().await;
}

#[tokio::test]
async fn test_user_update_audit_lists_only_changed_fields() {
    let testctx =
        test_setup("test_user_update_audit_lists_only_changed_fields").await;
    let client = &testctx.client;

    let admin = create_user(client, "admin", Role::Admin).await;
    let target = create_user(client, "target", Role::Public).await;

    // change fullName and role, leave email/phone/status untouched
    let updated: views::User = object_put(
        client,
        &format!("/users/{}", target.id),
        params::UserUpdate {
            admin_id: Some(admin.id),
            username: None,
            full_name: Some(String::from("Target Renamed")),
            email: None,
            phone: None,
            password: None,
            role: Some(Role::Traffic),
            status: None,
        },
    )
    .await;
    assert_eq!(updated.role, Role::Traffic);

    let logs: Vec<views::OperationsLog> =
        object_get(client, "/operations-logs?category=user").await;
    assert_eq!(logs.len(), 1);
    let log = &logs[0];
    assert_eq!(log.action, "update_user");
    assert_eq!(log.user_id, admin.id);
    assert_eq!(log.entity_id.as_deref(), Some(target.id.to_string().as_str()));
    assert_eq!(
        log.details["updatedFields"],
        serde_json::json!(["fullName", "role"])
    );
    assert_eq!(
        log.details["roleChange"],
        serde_json::json!({"from": "public", "to": "traffic"})
    );
    assert!(log.details.get("statusChange").is_none());

    // the password value must not appear anywhere in the payload
    let rendered = serde_json::to_string(log).unwrap();
    assert!(!rendered.contains(&test_password("target")));
    assert!(!rendered.contains("password"));

    testctx.cleanup().await;
}

#[tokio::test]
async fn test_password_only_update_is_not_audited() {
    let testctx =
        test_setup("test_password_only_update_is_not_audited").await;
    let client = &testctx.client;

    let admin = create_user(client, "admin", Role::Admin).await;
    let target = create_user(client, "target", Role::Public).await;

    let _: views::User = object_put(
        client,
        &format!("/users/{}", target.id),
        params::UserUpdate {
            admin_id: Some(admin.id),
            username: None,
            full_name: None,
            email: None,
            phone: None,
            password: Some(String::from("swordfish")),
            role: None,
            status: None,
        },
    )
    .await;

    let logs: Vec<views::OperationsLog> =
        object_get(client, "/operations-logs").await;
    assert!(logs.is_empty());

    testctx.cleanup().await;
}

#[tokio::test]
async fn test_barrier_change_is_audited_with_environment() {
    let testctx =
        test_setup("test_barrier_change_is_audited_with_environment").await;
    let client = &testctx.client;

    let tunnel = create_tunnel(client, "TUN001", BarrierStatus::Open).await;
    let operator = create_user(client, "operator", Role::Admin).await;

    let updated: views::Tunnel = object_put(
        client,
        &format!("/tunnels/{}", tunnel.id),
        params::TunnelUpdate {
            user_id: Some(operator.id),
            barrier_status: Some(BarrierStatus::Closed),
            water_level: Some(70),
            ..Default::default()
        },
    )
    .await;
    assert_eq!(updated.barrier_status, BarrierStatus::Closed);
    assert_eq!(updated.water_level, 70);

    let logs: Vec<views::OperationsLog> =
        object_get(client, &format!("/operations-logs/entity/{}", tunnel.id))
            .await;
    assert_eq!(logs.len(), 2);

    let barrier_log = logs
        .iter()
        .find(|log| log.action == "update_barrier")
        .expect("expected an update_barrier entry");
    assert_eq!(
        barrier_log.details["previousStatus"],
        serde_json::json!("Open")
    );
    assert_eq!(barrier_log.details["newStatus"], serde_json::json!("Closed"));
    // the environment is snapshotted from before the update
    assert_eq!(
        barrier_log.environment_data["waterLevel"],
        serde_json::json!(40)
    );
    let impact = barrier_log
        .hardware_impact
        .as_ref()
        .expect("barrier changes carry a hardware impact");
    assert_eq!(impact.component_name, "Barrier Motor");
    assert_eq!(impact.impact_level, ImpactLevel::Medium);
    assert_eq!(impact.wear_percentage, 55);

    let update_log = logs
        .iter()
        .find(|log| log.action == "update_tunnel")
        .expect("expected an update_tunnel entry");
    assert_eq!(
        update_log.details["updatedFields"],
        serde_json::json!(["waterLevel", "barrierStatus"])
    );

    testctx.cleanup().await;
}

#[tokio::test]
async fn test_unprivileged_tunnel_update_is_not_audited() {
    let testctx =
        test_setup("test_unprivileged_tunnel_update_is_not_audited").await;
    let client = &testctx.client;

    let tunnel = create_tunnel(client, "TUN001", BarrierStatus::Open).await;
    let visitor = create_user(client, "visitor", Role::Public).await;

    // the mutation itself goes through; only the audit entry is withheld
    let updated: views::Tunnel = object_put(
        client,
        &format!("/tunnels/{}", tunnel.id),
        params::TunnelUpdate {
            user_id: Some(visitor.id),
            barrier_status: Some(BarrierStatus::Closed),
            ..Default::default()
        },
    )
    .await;
    assert_eq!(updated.barrier_status, BarrierStatus::Closed);

    let logs: Vec<views::OperationsLog> =
        object_get(client, "/operations-logs").await;
    assert!(logs.is_empty());

    testctx.cleanup().await;
}

#[tokio::test]
async fn test_guidance_display_audit_gate_and_payload() {
    let testctx =
        test_setup("test_guidance_display_audit_gate_and_payload").await;
    let client = &testctx.client;

    let tunnel = create_tunnel(client, "TUN001", BarrierStatus::Open).await;
    let traffic = create_user(client, "traffic", Role::Traffic).await;
    let ministry = create_user(client, "ministry", Role::Ministry).await;
    let guidance_url = format!("/tunnels/{}/guidance-display", tunnel.id);

    // traffic staff: applied and audited with the fixed low-wear payload
    let updated: views::Tunnel = object_put(
        client,
        &guidance_url,
        params::GuidanceDisplaySet {
            enabled: true,
            symbol: Some(String::from("detour-left")),
            user_id: Some(traffic.id),
        },
    )
    .await;
    assert!(updated.guidance_display_enabled);
    assert_eq!(updated.active_guidance_symbol, "detour-left");

    let logs: Vec<views::OperationsLog> =
        object_get(client, &format!("/operations-logs/entity/{}", tunnel.id))
            .await;
    assert_eq!(logs.len(), 1);
    let log = &logs[0];
    assert_eq!(log.action, "activate_guidance_display");
    assert_eq!(log.details["symbol"], serde_json::json!("detour-left"));
    let impact =
        log.hardware_impact.as_ref().expect("guidance toggles carry impact");
    assert_eq!(impact.impact_level, ImpactLevel::Low);
    assert_eq!(impact.wear_percentage, 10);
    assert_eq!(
        impact.device_id,
        format!("{}-TrafficGuidanceDisplay", tunnel.id)
    );

    // ministry is below the guidance-operator gate: the display still
    // changes, but no entry is recorded
    let updated: views::Tunnel = object_put(
        client,
        &guidance_url,
        params::GuidanceDisplaySet {
            enabled: false,
            symbol: None,
            user_id: Some(ministry.id),
        },
    )
    .await;
    assert!(!updated.guidance_display_enabled);
    assert_eq!(updated.active_guidance_symbol, "none");

    let logs: Vec<views::OperationsLog> =
        object_get(client, &format!("/operations-logs/entity/{}", tunnel.id))
            .await;
    assert_eq!(logs.len(), 1);
    assert_eq!(logs[0].action, "activate_guidance_display");

    testctx.cleanup().await;
}
