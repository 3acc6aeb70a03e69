// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Handler functions (entrypoints) for the external HTTP API
//!
//! Each handler parses its inputs, calls into the application layer, and
//! converts the result.  Status-code mapping lives in the
//! `From<Error> for HttpError` impl in tunnelguard-common, not here.

use crate::context::{OpContext, ServerContext};
use dropshot::ApiDescription;
use dropshot::HttpError;
use dropshot::HttpResponseCreated;
use dropshot::HttpResponseDeleted;
use dropshot::HttpResponseOk;
use dropshot::Path;
use dropshot::Query;
use dropshot::RequestContext;
use dropshot::TypedBody;
use std::sync::Arc;
use tunnelguard_api::params;
use tunnelguard_api::views;
use tunnelguard_api::ClosureRequestFilter;
use tunnelguard_api::ClosureRequestPathParam;
use tunnelguard_api::EntityPathParam;
use tunnelguard_api::OperationsLogFilter;
use tunnelguard_api::SensorPathParam;
use tunnelguard_api::TunnelPathParam;
use tunnelguard_api::TunnelguardApi;
use tunnelguard_api::UserPathParam;

/// Returns a description of the tunnelguard API
pub fn api() -> ApiDescription<Arc<ServerContext>> {
    tunnelguard_api::tunnelguard_api_mod::api_description::<TunnelguardApiImpl>(
    )
    .expect("registered tunnelguard entrypoints")
}

enum TunnelguardApiImpl {}

impl TunnelguardApi for TunnelguardApiImpl {
    type Context = Arc<ServerContext>;

    // Users

    async fn user_list(
        rqctx: RequestContext<Self::Context>,
    ) -> Result<HttpResponseOk<Vec<views::User>>, HttpError> {
        let apictx = rqctx.context();
        let opctx = OpContext::for_external_api(&rqctx);
        let users = apictx.tunnelguard.users_list(&opctx).await?;
        Ok(HttpResponseOk(users.into_iter().map(Into::into).collect()))
    }

    async fn user_create(
        rqctx: RequestContext<Self::Context>,
        new_user: TypedBody<params::UserCreate>,
    ) -> Result<HttpResponseCreated<views::User>, HttpError> {
        let apictx = rqctx.context();
        let opctx = OpContext::for_external_api(&rqctx);
        let user = apictx
            .tunnelguard
            .user_create(&opctx, &new_user.into_inner())
            .await?;
        Ok(HttpResponseCreated(user.into()))
    }

    async fn user_view(
        rqctx: RequestContext<Self::Context>,
        path_params: Path<UserPathParam>,
    ) -> Result<HttpResponseOk<views::User>, HttpError> {
        let apictx = rqctx.context();
        let opctx = OpContext::for_external_api(&rqctx);
        let path = path_params.into_inner();
        let user = apictx.tunnelguard.user_fetch(&opctx, path.user_id).await?;
        Ok(HttpResponseOk(user.into()))
    }

    async fn user_update(
        rqctx: RequestContext<Self::Context>,
        path_params: Path<UserPathParam>,
        updated_user: TypedBody<params::UserUpdate>,
    ) -> Result<HttpResponseOk<views::User>, HttpError> {
        let apictx = rqctx.context();
        let opctx = OpContext::for_external_api(&rqctx);
        let path = path_params.into_inner();
        let user = apictx
            .tunnelguard
            .user_update(&opctx, path.user_id, &updated_user.into_inner())
            .await?;
        Ok(HttpResponseOk(user.into()))
    }

    async fn user_delete(
        rqctx: RequestContext<Self::Context>,
        path_params: Path<UserPathParam>,
    ) -> Result<HttpResponseDeleted, HttpError> {
        let apictx = rqctx.context();
        let opctx = OpContext::for_external_api(&rqctx);
        let path = path_params.into_inner();
        apictx.tunnelguard.user_delete(&opctx, path.user_id).await?;
        Ok(HttpResponseDeleted())
    }

    async fn user_closure_request_list(
        rqctx: RequestContext<Self::Context>,
        path_params: Path<UserPathParam>,
    ) -> Result<HttpResponseOk<Vec<views::ClosureRequest>>, HttpError> {
        let apictx = rqctx.context();
        let opctx = OpContext::for_external_api(&rqctx);
        let path = path_params.into_inner();
        let requests = apictx
            .tunnelguard
            .closure_requests_list_for_requester(&opctx, path.user_id)
            .await?;
        Ok(HttpResponseOk(requests.into_iter().map(Into::into).collect()))
    }

    async fn register(
        rqctx: RequestContext<Self::Context>,
        new_user: TypedBody<params::UserCreate>,
    ) -> Result<HttpResponseCreated<views::User>, HttpError> {
        let apictx = rqctx.context();
        let opctx = OpContext::for_external_api(&rqctx);
        let user = apictx
            .tunnelguard
            .user_create(&opctx, &new_user.into_inner())
            .await?;
        Ok(HttpResponseCreated(user.into()))
    }

    async fn login(
        rqctx: RequestContext<Self::Context>,
        credentials: TypedBody<params::LoginCredentials>,
    ) -> Result<HttpResponseOk<views::User>, HttpError> {
        let apictx = rqctx.context();
        let opctx = OpContext::for_external_api(&rqctx);
        let user = apictx
            .tunnelguard
            .user_login(&opctx, &credentials.into_inner())
            .await?;
        Ok(HttpResponseOk(user.into()))
    }

    // Tunnels

    async fn tunnel_list(
        rqctx: RequestContext<Self::Context>,
    ) -> Result<HttpResponseOk<Vec<views::Tunnel>>, HttpError> {
        let apictx = rqctx.context();
        let opctx = OpContext::for_external_api(&rqctx);
        let tunnels = apictx.tunnelguard.tunnels_list(&opctx).await?;
        Ok(HttpResponseOk(tunnels.into_iter().map(Into::into).collect()))
    }

    async fn tunnel_create(
        rqctx: RequestContext<Self::Context>,
        new_tunnel: TypedBody<params::TunnelCreate>,
    ) -> Result<HttpResponseCreated<views::Tunnel>, HttpError> {
        let apictx = rqctx.context();
        let opctx = OpContext::for_external_api(&rqctx);
        let tunnel = apictx
            .tunnelguard
            .tunnel_create(&opctx, &new_tunnel.into_inner())
            .await?;
        Ok(HttpResponseCreated(tunnel.into()))
    }

    async fn tunnel_view(
        rqctx: RequestContext<Self::Context>,
        path_params: Path<TunnelPathParam>,
    ) -> Result<HttpResponseOk<views::Tunnel>, HttpError> {
        let apictx = rqctx.context();
        let opctx = OpContext::for_external_api(&rqctx);
        let path = path_params.into_inner();
        let tunnel =
            apictx.tunnelguard.tunnel_fetch(&opctx, &path.tunnel_id).await?;
        Ok(HttpResponseOk(tunnel.into()))
    }

    async fn tunnel_update(
        rqctx: RequestContext<Self::Context>,
        path_params: Path<TunnelPathParam>,
        updated_tunnel: TypedBody<params::TunnelUpdate>,
    ) -> Result<HttpResponseOk<views::Tunnel>, HttpError> {
        let apictx = rqctx.context();
        let opctx = OpContext::for_external_api(&rqctx);
        let path = path_params.into_inner();
        let tunnel = apictx
            .tunnelguard
            .tunnel_update(
                &opctx,
                &path.tunnel_id,
                &updated_tunnel.into_inner(),
            )
            .await?;
        Ok(HttpResponseOk(tunnel.into()))
    }

    async fn tunnel_delete(
        rqctx: RequestContext<Self::Context>,
        path_params: Path<TunnelPathParam>,
    ) -> Result<HttpResponseDeleted, HttpError> {
        let apictx = rqctx.context();
        let opctx = OpContext::for_external_api(&rqctx);
        let path = path_params.into_inner();
        apictx.tunnelguard.tunnel_delete(&opctx, &path.tunnel_id).await?;
        Ok(HttpResponseDeleted())
    }

    async fn tunnel_guidance_display_set(
        rqctx: RequestContext<Self::Context>,
        path_params: Path<TunnelPathParam>,
        body: TypedBody<params::GuidanceDisplaySet>,
    ) -> Result<HttpResponseOk<views::Tunnel>, HttpError> {
        let apictx = rqctx.context();
        let opctx = OpContext::for_external_api(&rqctx);
        let path = path_params.into_inner();
        let tunnel = apictx
            .tunnelguard
            .tunnel_guidance_display_set(
                &opctx,
                &path.tunnel_id,
                &body.into_inner(),
            )
            .await?;
        Ok(HttpResponseOk(tunnel.into()))
    }

    async fn tunnel_sensor_list(
        rqctx: RequestContext<Self::Context>,
        path_params: Path<TunnelPathParam>,
    ) -> Result<HttpResponseOk<Vec<views::Sensor>>, HttpError> {
        let apictx = rqctx.context();
        let opctx = OpContext::for_external_api(&rqctx);
        let path = path_params.into_inner();
        let sensors = apictx
            .tunnelguard
            .sensors_list_for_tunnel(&opctx, &path.tunnel_id)
            .await?;
        Ok(HttpResponseOk(sensors.into_iter().map(Into::into).collect()))
    }

    async fn tunnel_closure_request_list(
        rqctx: RequestContext<Self::Context>,
        path_params: Path<TunnelPathParam>,
    ) -> Result<HttpResponseOk<Vec<views::ClosureRequest>>, HttpError> {
        let apictx = rqctx.context();
        let opctx = OpContext::for_external_api(&rqctx);
        let path = path_params.into_inner();
        let requests = apictx
            .tunnelguard
            .closure_requests_list_for_tunnel(&opctx, &path.tunnel_id)
            .await?;
        Ok(HttpResponseOk(requests.into_iter().map(Into::into).collect()))
    }

    // Sensors

    async fn sensor_create(
        rqctx: RequestContext<Self::Context>,
        new_sensor: TypedBody<params::SensorCreate>,
    ) -> Result<HttpResponseCreated<views::Sensor>, HttpError> {
        let apictx = rqctx.context();
        let opctx = OpContext::for_external_api(&rqctx);
        let sensor = apictx
            .tunnelguard
            .sensor_create(&opctx, &new_sensor.into_inner())
            .await?;
        Ok(HttpResponseCreated(sensor.into()))
    }

    async fn sensor_update(
        rqctx: RequestContext<Self::Context>,
        path_params: Path<SensorPathParam>,
        updated_sensor: TypedBody<params::SensorUpdate>,
    ) -> Result<HttpResponseOk<views::Sensor>, HttpError> {
        let apictx = rqctx.context();
        let opctx = OpContext::for_external_api(&rqctx);
        let path = path_params.into_inner();
        let sensor = apictx
            .tunnelguard
            .sensor_update(&opctx, path.sensor_id, &updated_sensor.into_inner())
            .await?;
        Ok(HttpResponseOk(sensor.into()))
    }

    // Closure requests

    async fn closure_request_list(
        rqctx: RequestContext<Self::Context>,
        query_params: Query<ClosureRequestFilter>,
    ) -> Result<HttpResponseOk<Vec<views::ClosureRequest>>, HttpError> {
        let apictx = rqctx.context();
        let opctx = OpContext::for_external_api(&rqctx);
        let query = query_params.into_inner();
        let requests = apictx
            .tunnelguard
            .closure_requests_list(&opctx, query.status)
            .await?;
        Ok(HttpResponseOk(requests.into_iter().map(Into::into).collect()))
    }

    async fn closure_request_create(
        rqctx: RequestContext<Self::Context>,
        new_request: TypedBody<params::ClosureRequestCreate>,
    ) -> Result<HttpResponseCreated<views::ClosureRequest>, HttpError> {
        let apictx = rqctx.context();
        let opctx = OpContext::for_external_api(&rqctx);
        let request = apictx
            .tunnelguard
            .closure_request_create(&opctx, &new_request.into_inner())
            .await?;
        Ok(HttpResponseCreated(request.into()))
    }

    async fn closure_request_view(
        rqctx: RequestContext<Self::Context>,
        path_params: Path<ClosureRequestPathParam>,
    ) -> Result<HttpResponseOk<views::ClosureRequest>, HttpError> {
        let apictx = rqctx.context();
        let opctx = OpContext::for_external_api(&rqctx);
        let path = path_params.into_inner();
        let request = apictx
            .tunnelguard
            .closure_request_fetch(&opctx, path.request_id)
            .await?;
        Ok(HttpResponseOk(request.into()))
    }

    async fn closure_request_review(
        rqctx: RequestContext<Self::Context>,
        path_params: Path<ClosureRequestPathParam>,
        review: TypedBody<params::ClosureRequestReview>,
    ) -> Result<HttpResponseOk<views::ClosureRequest>, HttpError> {
        let apictx = rqctx.context();
        let opctx = OpContext::for_external_api(&rqctx);
        let path = path_params.into_inner();
        let request = apictx
            .tunnelguard
            .closure_request_review(
                &opctx,
                path.request_id,
                &review.into_inner(),
            )
            .await?;
        Ok(HttpResponseOk(request.into()))
    }

    async fn closure_request_delete(
        rqctx: RequestContext<Self::Context>,
        path_params: Path<ClosureRequestPathParam>,
    ) -> Result<HttpResponseDeleted, HttpError> {
        let apictx = rqctx.context();
        let opctx = OpContext::for_external_api(&rqctx);
        let path = path_params.into_inner();
        apictx
            .tunnelguard
            .closure_request_delete(&opctx, path.request_id)
            .await?;
        Ok(HttpResponseDeleted())
    }

    // Operations logs

    async fn operations_log_create(
        rqctx: RequestContext<Self::Context>,
        new_log: TypedBody<params::OperationsLogCreate>,
    ) -> Result<HttpResponseCreated<views::OperationsLog>, HttpError> {
        let apictx = rqctx.context();
        let opctx = OpContext::for_external_api(&rqctx);
        let log = apictx
            .tunnelguard
            .operations_log_submit(&opctx, &new_log.into_inner())
            .await?;
        Ok(HttpResponseCreated(log.into()))
    }

    async fn operations_log_list(
        rqctx: RequestContext<Self::Context>,
        query_params: Query<OperationsLogFilter>,
    ) -> Result<HttpResponseOk<Vec<views::OperationsLog>>, HttpError> {
        let apictx = rqctx.context();
        let opctx = OpContext::for_external_api(&rqctx);
        let filter = query_params.into_inner().into();
        let logs = apictx
            .tunnelguard
            .operations_logs_list(&opctx, &filter)
            .await?;
        Ok(HttpResponseOk(logs.into_iter().map(Into::into).collect()))
    }

    async fn operations_log_entity_list(
        rqctx: RequestContext<Self::Context>,
        path_params: Path<EntityPathParam>,
    ) -> Result<HttpResponseOk<Vec<views::OperationsLog>>, HttpError> {
        let apictx = rqctx.context();
        let opctx = OpContext::for_external_api(&rqctx);
        let path = path_params.into_inner();
        let logs = apictx
            .tunnelguard
            .operations_logs_list_for_entity(&opctx, &path.entity_id)
            .await?;
        Ok(HttpResponseOk(logs.into_iter().map(Into::into).collect()))
    }
}
