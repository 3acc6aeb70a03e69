// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Shared facilities for starting and driving a test server

use dropshot::test_util::{read_json, ClientTestContext, LogContext};
use dropshot::{ConfigLogging, ConfigLoggingLevel};
use http::method::Method;
use http::StatusCode;
use serde::de::DeserializeOwned;
use serde::Serialize;
use slog::o;
use tunnelguard::TransientServer;
use tunnelguard_api::{params, views};
use tunnelguard_common::api::external::{BarrierStatus, RiskLevel, Role};

pub struct TestContext {
    pub logctx: LogContext,
    pub server: TransientServer,
    pub client: ClientTestContext,
}

impl TestContext {
    pub async fn cleanup(self) {
        self.server.server.close().await.expect("stopped server");
        self.logctx.cleanup_successful();
    }
}

/// Start a server with an empty store for one test
pub async fn test_setup(test_name: &str) -> TestContext {
    test_setup_with_seed(test_name, false).await
}

pub async fn test_setup_with_seed(
    test_name: &str,
    seed_demo_data: bool,
) -> TestContext {
    let logctx = LogContext::new(
        test_name,
        &ConfigLogging::StderrTerminal { level: ConfigLoggingLevel::Debug },
    );
    let server = TransientServer::new(&logctx.log, seed_demo_data)
        .await
        .expect("started transient server");
    let client = ClientTestContext::new(
        server.local_addr(),
        logctx.log.new(o!("component" => "client")),
    );
    TestContext { logctx, server, client }
}

pub async fn object_get<T: DeserializeOwned>(
    client: &ClientTestContext,
    path: &str,
) -> T {
    let mut response = client
        .make_request(Method::GET, path, None::<()>, StatusCode::OK)
        .await
        .expect("expected success");
    read_json(&mut response).await
}

pub async fn objects_post<B, T>(
    client: &ClientTestContext,
    path: &str,
    body: B,
) -> T
where
    B: Serialize + std::fmt::Debug,
    T: DeserializeOwned,
{
    let mut response = client
        .make_request(Method::POST, path, Some(body), StatusCode::CREATED)
        .await
        .expect("expected creation");
    read_json(&mut response).await
}

pub async fn object_put<B, T>(
    client: &ClientTestContext,
    path: &str,
    body: B,
) -> T
where
    B: Serialize + std::fmt::Debug,
    T: DeserializeOwned,
{
    let mut response = client
        .make_request(Method::PUT, path, Some(body), StatusCode::OK)
        .await
        .expect("expected success");
    read_json(&mut response).await
}

pub async fn object_delete(client: &ClientTestContext, path: &str) {
    client
        .make_request(Method::DELETE, path, None::<()>, StatusCode::NO_CONTENT)
        .await
        .expect("expected deletion");
}

/// Register a user with a predictable email and password
///
/// The password is `"<username>-password"`; tests that assert passwords
/// never leak into log payloads rely on that shape.
pub async fn create_user(
    client: &ClientTestContext,
    username: &str,
    role: Role,
) -> views::User {
    objects_post(
        client,
        "/users",
        params::UserCreate {
            username: username.to_string(),
            full_name: format!("{} Person", username),
            email: format!("{}@example.com", username),
            phone: String::from("+973 0000 0000"),
            password: test_password(username),
            role: Some(role),
        },
    )
    .await
}

pub fn test_password(username: &str) -> String {
    format!("{}-password", username)
}

pub async fn create_tunnel(
    client: &ClientTestContext,
    tunnel_id: &str,
    barrier_status: BarrierStatus,
) -> views::Tunnel {
    objects_post(
        client,
        "/tunnels",
        params::TunnelCreate {
            id: tunnel_id.to_string(),
            name: format!("{} Test Tunnel", tunnel_id),
            risk_level: RiskLevel::Moderate,
            water_level: 40,
            barrier_status,
            guidance_display_enabled: None,
            active_guidance_symbol: None,
        },
    )
    .await
}

/// File a closure request and sanity-check its initial state
pub async fn create_closure_request(
    client: &ClientTestContext,
    tunnel_id: &str,
    requested_by_id: i64,
) -> views::ClosureRequest {
    let request: views::ClosureRequest = objects_post(
        client,
        "/closure-requests",
        params::ClosureRequestCreate {
            tunnel_id: tunnel_id.to_string(),
            requested_by_id,
            message: String::from("water pooling at the entrance"),
        },
    )
    .await;
    assert_eq!(
        request.status,
        tunnelguard_common::api::external::ClosureRequestStatus::Pending
    );
    assert_eq!(request.reviewed_by_id, None);
    request
}
