// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Smoke tests against the API server
//!
//! This file defines a very basic set of tests against the API: routing and
//! schema-validation failures, and the seeded demo dataset.

use crate::common::{object_get, test_setup, test_setup_with_seed};
use http::method::Method;
use http::StatusCode;
use tunnelguard_api::views;
use tunnelguard_common::api::external::{BarrierStatus, Role};

#[tokio::test]
async fn test_basic_failures() {
    let testctx = test_setup("test_basic_failures").await;
    let client = &testctx.client;

    struct TestCase<'a> {
        method: Method,
        uri: &'a str,
        expected_code: StatusCode,
        expected_error: &'a str,
        body: Option<serde_json::Value>,
    }

    let test_cases = vec![
        // a path with no route at all
        TestCase {
            method: Method::GET,
            uri: "/nonexistent",
            expected_code: StatusCode::NOT_FOUND,
            expected_error: "Not Found",
            body: None,
        },
        // a collection exists but the method isn't registered on it
        TestCase {
            method: Method::PUT,
            uri: "/users",
            expected_code: StatusCode::METHOD_NOT_ALLOWED,
            expected_error: "Method Not Allowed",
            body: Some(serde_json::json!({})),
        },
        // a path parameter that fails to parse as an integer
        TestCase {
            method: Method::GET,
            uri: "/users/not-a-number",
            expected_code: StatusCode::BAD_REQUEST,
            expected_error: "bad parameter in URL path",
            body: None,
        },
        // a schema-valid route with a body missing required fields
        TestCase {
            method: Method::POST,
            uri: "/users",
            expected_code: StatusCode::BAD_REQUEST,
            expected_error: "unable to parse JSON body",
            body: Some(serde_json::json!({"bogus": true})),
        },
        // an enum field with a value outside the schema
        TestCase {
            method: Method::POST,
            uri: "/closure-requests",
            expected_code: StatusCode::BAD_REQUEST,
            expected_error: "unable to parse JSON body",
            body: Some(serde_json::json!({
                "tunnelId": "TUN001",
                "requestedById": "not-a-number",
                "message": "hello",
            })),
        },
    ];

    for test_case in test_cases {
        let error = match test_case.body {
            Some(body) => {
                client
                    .make_request_error_body(
                        test_case.method.clone(),
                        test_case.uri,
                        body,
                        test_case.expected_code,
                    )
                    .await
            }
            None => {
                client
                    .make_request_error(
                        test_case.method.clone(),
                        test_case.uri,
                        test_case.expected_code,
                    )
                    .await
            }
        };
        assert!(
            error.message.starts_with(test_case.expected_error),
            "{} {}: unexpected error message {:?}",
            test_case.method,
            test_case.uri,
            error.message,
        );
    }

    testctx.cleanup().await;
}

#[tokio::test]
async fn test_seeded_demo_dataset() {
    let testctx =
        test_setup_with_seed("test_seeded_demo_dataset", true).await;
    let client = &testctx.client;

    let tunnels: Vec<views::Tunnel> = object_get(client, "/tunnels").await;
    assert_eq!(tunnels.len(), 7);
    let al_fateh = tunnels
        .iter()
        .find(|tunnel| tunnel.id == "TUN001")
        .expect("expected the Al Fateh tunnel");
    assert_eq!(al_fateh.name, "Al Fateh Tunnel");
    assert_eq!(al_fateh.barrier_status, BarrierStatus::Closed);

    let users: Vec<views::User> = object_get(client, "/users").await;
    assert_eq!(users.len(), 4);
    assert!(users.iter().any(|user| user.role == Role::Admin));

    for tunnel in &tunnels {
        let sensors: Vec<views::Sensor> =
            object_get(client, &format!("/tunnels/{}/sensors", tunnel.id))
                .await;
        assert_eq!(sensors.len(), 7);
    }

    // the synthetic maintenance history is all staff-attributed
    let logs: Vec<views::OperationsLog> =
        object_get(client, "/operations-logs").await;
    assert_eq!(logs.len(), 20);
    assert!(logs.iter().all(|log| log.hardware_impact.is_some()));

    // predefined accounts can log in
    client
        .make_request(
            Method::POST,
            "/login",
            Some(serde_json::json!({
                "email": "admin@tunnelguard.com",
                "password": "Admin123",
            })),
            StatusCode::OK,
        )
        .await
        .expect("expected admin login to succeed");

    testctx.cleanup().await;
}
