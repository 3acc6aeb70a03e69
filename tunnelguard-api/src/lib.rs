// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! External HTTP API for the TunnelGuard service

pub mod params;
pub mod views;

use dropshot::HttpError;
use dropshot::HttpResponseCreated;
use dropshot::HttpResponseDeleted;
use dropshot::HttpResponseOk;
use dropshot::Path;
use dropshot::Query;
use dropshot::RequestContext;
use dropshot::TypedBody;
use schemars::JsonSchema;
use serde::Deserialize;

#[dropshot::api_description]
pub trait TunnelguardApi {
    type Context;

    // Users

    /// List all registered users
    #[endpoint {
        method = GET,
        path = "/users",
    }]
    async fn user_list(
        rqctx: RequestContext<Self::Context>,
    ) -> Result<HttpResponseOk<Vec<views::User>>, HttpError>;

    /// Register a new user
    #[endpoint {
        method = POST,
        path = "/users",
    }]
    async fn user_create(
        rqctx: RequestContext<Self::Context>,
        new_user: TypedBody<params::UserCreate>,
    ) -> Result<HttpResponseCreated<views::User>, HttpError>;

    /// Fetch a user by id
    #[endpoint {
        method = GET,
        path = "/users/{user_id}",
    }]
    async fn user_view(
        rqctx: RequestContext<Self::Context>,
        path_params: Path<UserPathParam>,
    ) -> Result<HttpResponseOk<views::User>, HttpError>;

    /// Update a user
    ///
    /// The body may carry `adminId`, the id of the staff member making the
    /// change; it is stripped before persisting and used only to attribute
    /// the audit entry.
    #[endpoint {
        method = PUT,
        path = "/users/{user_id}",
    }]
    async fn user_update(
        rqctx: RequestContext<Self::Context>,
        path_params: Path<UserPathParam>,
        updated_user: TypedBody<params::UserUpdate>,
    ) -> Result<HttpResponseOk<views::User>, HttpError>;

    /// Delete a user
    #[endpoint {
        method = DELETE,
        path = "/users/{user_id}",
    }]
    async fn user_delete(
        rqctx: RequestContext<Self::Context>,
        path_params: Path<UserPathParam>,
    ) -> Result<HttpResponseDeleted, HttpError>;

    /// List the closure requests submitted by a user
    #[endpoint {
        method = GET,
        path = "/users/{user_id}/closure-requests",
    }]
    async fn user_closure_request_list(
        rqctx: RequestContext<Self::Context>,
        path_params: Path<UserPathParam>,
    ) -> Result<HttpResponseOk<Vec<views::ClosureRequest>>, HttpError>;

    /// Register a new account (role defaults to `public`)
    #[endpoint {
        method = POST,
        path = "/register",
    }]
    async fn register(
        rqctx: RequestContext<Self::Context>,
        new_user: TypedBody<params::UserCreate>,
    ) -> Result<HttpResponseCreated<views::User>, HttpError>;

    /// Authenticate by email and password
    #[endpoint {
        method = POST,
        path = "/login",
    }]
    async fn login(
        rqctx: RequestContext<Self::Context>,
        credentials: TypedBody<params::LoginCredentials>,
    ) -> Result<HttpResponseOk<views::User>, HttpError>;

    // Tunnels

    /// List all tunnels
    #[endpoint {
        method = GET,
        path = "/tunnels",
    }]
    async fn tunnel_list(
        rqctx: RequestContext<Self::Context>,
    ) -> Result<HttpResponseOk<Vec<views::Tunnel>>, HttpError>;

    /// Register a new tunnel
    #[endpoint {
        method = POST,
        path = "/tunnels",
    }]
    async fn tunnel_create(
        rqctx: RequestContext<Self::Context>,
        new_tunnel: TypedBody<params::TunnelCreate>,
    ) -> Result<HttpResponseCreated<views::Tunnel>, HttpError>;

    /// Fetch a tunnel by its code
    #[endpoint {
        method = GET,
        path = "/tunnels/{tunnel_id}",
    }]
    async fn tunnel_view(
        rqctx: RequestContext<Self::Context>,
        path_params: Path<TunnelPathParam>,
    ) -> Result<HttpResponseOk<views::Tunnel>, HttpError>;

    /// Update a tunnel
    ///
    /// The body may carry `userId`, the id of the staff member making the
    /// change; it is stripped before persisting.  A change to
    /// `barrierStatus` is additionally recorded as its own `update_barrier`
    /// operation.
    #[endpoint {
        method = PUT,
        path = "/tunnels/{tunnel_id}",
    }]
    async fn tunnel_update(
        rqctx: RequestContext<Self::Context>,
        path_params: Path<TunnelPathParam>,
        updated_tunnel: TypedBody<params::TunnelUpdate>,
    ) -> Result<HttpResponseOk<views::Tunnel>, HttpError>;

    /// Delete a tunnel
    #[endpoint {
        method = DELETE,
        path = "/tunnels/{tunnel_id}",
    }]
    async fn tunnel_delete(
        rqctx: RequestContext<Self::Context>,
        path_params: Path<TunnelPathParam>,
    ) -> Result<HttpResponseDeleted, HttpError>;

    /// Set a tunnel's driver-guidance display
    #[endpoint {
        method = PUT,
        path = "/tunnels/{tunnel_id}/guidance-display",
    }]
    async fn tunnel_guidance_display_set(
        rqctx: RequestContext<Self::Context>,
        path_params: Path<TunnelPathParam>,
        body: TypedBody<params::GuidanceDisplaySet>,
    ) -> Result<HttpResponseOk<views::Tunnel>, HttpError>;

    /// List the sensors installed in a tunnel
    #[endpoint {
        method = GET,
        path = "/tunnels/{tunnel_id}/sensors",
    }]
    async fn tunnel_sensor_list(
        rqctx: RequestContext<Self::Context>,
        path_params: Path<TunnelPathParam>,
    ) -> Result<HttpResponseOk<Vec<views::Sensor>>, HttpError>;

    /// List the closure requests filed against a tunnel
    #[endpoint {
        method = GET,
        path = "/tunnels/{tunnel_id}/closure-requests",
    }]
    async fn tunnel_closure_request_list(
        rqctx: RequestContext<Self::Context>,
        path_params: Path<TunnelPathParam>,
    ) -> Result<HttpResponseOk<Vec<views::ClosureRequest>>, HttpError>;

    // Sensors

    /// Install a new sensor
    #[endpoint {
        method = POST,
        path = "/sensors",
    }]
    async fn sensor_create(
        rqctx: RequestContext<Self::Context>,
        new_sensor: TypedBody<params::SensorCreate>,
    ) -> Result<HttpResponseCreated<views::Sensor>, HttpError>;

    /// Update a sensor
    #[endpoint {
        method = PUT,
        path = "/sensors/{sensor_id}",
    }]
    async fn sensor_update(
        rqctx: RequestContext<Self::Context>,
        path_params: Path<SensorPathParam>,
        updated_sensor: TypedBody<params::SensorUpdate>,
    ) -> Result<HttpResponseOk<views::Sensor>, HttpError>;

    // Closure requests

    /// List closure requests
    ///
    /// `?status=pending` restricts the listing to requests awaiting review.
    #[endpoint {
        method = GET,
        path = "/closure-requests",
    }]
    async fn closure_request_list(
        rqctx: RequestContext<Self::Context>,
        query_params: Query<ClosureRequestFilter>,
    ) -> Result<HttpResponseOk<Vec<views::ClosureRequest>>, HttpError>;

    /// File a closure request against a tunnel
    ///
    /// Any registered user may report a hazard; no role is required.
    #[endpoint {
        method = POST,
        path = "/closure-requests",
    }]
    async fn closure_request_create(
        rqctx: RequestContext<Self::Context>,
        new_request: TypedBody<params::ClosureRequestCreate>,
    ) -> Result<HttpResponseCreated<views::ClosureRequest>, HttpError>;

    /// Fetch a closure request by id
    #[endpoint {
        method = GET,
        path = "/closure-requests/{request_id}",
    }]
    async fn closure_request_view(
        rqctx: RequestContext<Self::Context>,
        path_params: Path<ClosureRequestPathParam>,
    ) -> Result<HttpResponseOk<views::ClosureRequest>, HttpError>;

    /// Review a closure request
    ///
    /// Approval forces the tunnel's barrier closed and both decisions append
    /// an operations-log entry.
    #[endpoint {
        method = PUT,
        path = "/closure-requests/{request_id}",
    }]
    async fn closure_request_review(
        rqctx: RequestContext<Self::Context>,
        path_params: Path<ClosureRequestPathParam>,
        review: TypedBody<params::ClosureRequestReview>,
    ) -> Result<HttpResponseOk<views::ClosureRequest>, HttpError>;

    /// Delete a closure request
    #[endpoint {
        method = DELETE,
        path = "/closure-requests/{request_id}",
    }]
    async fn closure_request_delete(
        rqctx: RequestContext<Self::Context>,
        path_params: Path<ClosureRequestPathParam>,
    ) -> Result<HttpResponseDeleted, HttpError>;

    // Operations logs

    /// Record an operation directly
    ///
    /// Only actors with the admin, ministry, or traffic role may write log
    /// entries.
    #[endpoint {
        method = POST,
        path = "/operations-logs",
    }]
    async fn operations_log_create(
        rqctx: RequestContext<Self::Context>,
        new_log: TypedBody<params::OperationsLogCreate>,
    ) -> Result<HttpResponseCreated<views::OperationsLog>, HttpError>;

    /// List operations-log entries, newest first
    #[endpoint {
        method = GET,
        path = "/operations-logs",
    }]
    async fn operations_log_list(
        rqctx: RequestContext<Self::Context>,
        query_params: Query<OperationsLogFilter>,
    ) -> Result<HttpResponseOk<Vec<views::OperationsLog>>, HttpError>;

    /// List the operations recorded against a particular entity, newest
    /// first
    #[endpoint {
        method = GET,
        path = "/operations-logs/entity/{entity_id}",
    }]
    async fn operations_log_entity_list(
        rqctx: RequestContext<Self::Context>,
        path_params: Path<EntityPathParam>,
    ) -> Result<HttpResponseOk<Vec<views::OperationsLog>>, HttpError>;
}

/// Path parameters for user requests
#[derive(Clone, Debug, Deserialize, JsonSchema)]
pub struct UserPathParam {
    pub user_id: i64,
}

/// Path parameters for tunnel requests
#[derive(Clone, Debug, Deserialize, JsonSchema)]
pub struct TunnelPathParam {
    /// The tunnel's human-assigned code, e.g. "TUN001".
    pub tunnel_id: String,
}

/// Path parameters for sensor requests
#[derive(Clone, Debug, Deserialize, JsonSchema)]
pub struct SensorPathParam {
    pub sensor_id: i64,
}

/// Path parameters for closure-request requests
#[derive(Clone, Debug, Deserialize, JsonSchema)]
pub struct ClosureRequestPathParam {
    pub request_id: i64,
}

/// Path parameters for entity-scoped operations-log requests
#[derive(Clone, Debug, Deserialize, JsonSchema)]
pub struct EntityPathParam {
    /// Loosely-typed id of the entity acted upon (a tunnel code, user id, or
    /// request id, depending on the log category).
    pub entity_id: String,
}

/// Query filter for listing closure requests
#[derive(Clone, Debug, Deserialize, JsonSchema)]
pub struct ClosureRequestFilter {
    #[serde(default)]
    pub status: Option<tunnelguard_common::api::external::ClosureRequestStatus>,
}

/// Query filters for listing operations-log entries
#[derive(Clone, Debug, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct OperationsLogFilter {
    /// restrict to entries recorded by this actor
    #[serde(default)]
    pub user_id: Option<i64>,
    /// restrict to entries in this category
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub start_date: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default)]
    pub end_date: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(default)]
    pub limit: Option<u32>,
    #[serde(default)]
    pub offset: Option<u32>,
}
