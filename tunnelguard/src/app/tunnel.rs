// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Tunnels: the monitored assets whose barriers and guidance displays the
//! staff operate

use crate::app::hardware;
use crate::authz;
use crate::context::OpContext;
use crate::db::model;
use crate::db::model::Tunnel;
use serde_json::json;
use slog::info;
use tunnelguard_api::params;
use tunnelguard_common::api::external::{
    CreateResult, DeleteResult, ListResultVec, LookupResult, UpdateResult,
};

impl super::TunnelGuard {
    pub async fn tunnels_list(
        &self,
        _opctx: &OpContext,
    ) -> ListResultVec<Tunnel> {
        self.datastore.tunnels_list().await
    }

    pub async fn tunnel_fetch(
        &self,
        _opctx: &OpContext,
        tunnel_id: &str,
    ) -> LookupResult<Tunnel> {
        self.datastore.tunnel_fetch(tunnel_id).await
    }

    pub async fn tunnel_create(
        &self,
        opctx: &OpContext,
        params: &params::TunnelCreate,
    ) -> CreateResult<Tunnel> {
        let tunnel = self
            .datastore
            .tunnel_create(model::TunnelCreate::from(params.clone()))
            .await?;
        info!(opctx.log, "registered tunnel";
            "tunnel_id" => tunnel.id.clone(),
            "name" => tunnel.name.clone(),
        );
        Ok(tunnel)
    }

    /// Apply a partial update to a tunnel
    ///
    /// When the update is attributed to a staff actor, an `update_tunnel`
    /// audit entry is recorded, and a change to the barrier additionally
    /// gets its own `update_barrier` entry with the pre-change environment
    /// snapshot.
    pub async fn tunnel_update(
        &self,
        opctx: &OpContext,
        tunnel_id: &str,
        params: &params::TunnelUpdate,
    ) -> UpdateResult<Tunnel> {
        let before = self.datastore.tunnel_fetch(tunnel_id).await?;
        let updated = self
            .datastore
            .tunnel_update(tunnel_id, model::TunnelUpdate::from(params.clone()))
            .await?;

        if let Some(actor_id) = params.user_id {
            if let Ok(actor) = self.datastore.user_fetch(actor_id).await {
                if updated.barrier_status != before.barrier_status {
                    self.record_operation(
                        opctx,
                        &actor,
                        super::ACTION_UPDATE_BARRIER,
                        super::CATEGORY_TUNNEL,
                        json!({
                            "previousStatus": before.barrier_status,
                            "newStatus": updated.barrier_status,
                            "tunnelName": before.name,
                        }),
                        Some(tunnel_id.to_string()),
                        Some(json!({
                            "waterLevel": before.water_level,
                            "riskLevel": before.risk_level,
                        })),
                        Some(hardware::barrier_toggle_impact(
                            tunnel_id,
                            updated.last_update,
                        )),
                    )
                    .await?;
                }
                self.record_operation(
                    opctx,
                    &actor,
                    super::ACTION_UPDATE_TUNNEL,
                    super::CATEGORY_TUNNEL,
                    json!({
                        "updatedFields": provided_tunnel_fields(params),
                        "tunnelName": before.name,
                    }),
                    Some(tunnel_id.to_string()),
                    None,
                    None,
                )
                .await?;
            }
        }

        Ok(updated)
    }

    pub async fn tunnel_delete(
        &self,
        _opctx: &OpContext,
        tunnel_id: &str,
    ) -> DeleteResult {
        self.datastore.tunnel_delete(tunnel_id).await
    }

    /// Set the driver-guidance display for a tunnel
    ///
    /// The change itself is open to any attributed caller; only changes made
    /// by admin or traffic actors are recorded, with the fixed low-wear
    /// display payload.
    pub async fn tunnel_guidance_display_set(
        &self,
        opctx: &OpContext,
        tunnel_id: &str,
        params: &params::GuidanceDisplaySet,
    ) -> UpdateResult<Tunnel> {
        let tunnel = self.datastore.tunnel_fetch(tunnel_id).await?;
        let symbol = params
            .symbol
            .clone()
            .unwrap_or_else(|| String::from("none"));
        let updated = self
            .datastore
            .tunnel_update(
                tunnel_id,
                model::TunnelUpdate {
                    guidance_display_enabled: Some(params.enabled),
                    active_guidance_symbol: Some(symbol.clone()),
                    ..Default::default()
                },
            )
            .await?;

        if let Some(actor_id) = params.user_id {
            if let Ok(actor) = self.datastore.user_fetch(actor_id).await {
                if actor
                    .role
                    .authorizes_any(authz::GUIDANCE_OPERATOR_ROLES)
                {
                    let action = if params.enabled {
                        super::ACTION_ACTIVATE_GUIDANCE
                    } else {
                        super::ACTION_DEACTIVATE_GUIDANCE
                    };
                    self.record_operation(
                        opctx,
                        &actor,
                        action,
                        super::CATEGORY_TUNNEL,
                        json!({
                            "tunnelName": tunnel.name,
                            "symbol": symbol,
                        }),
                        Some(tunnel_id.to_string()),
                        None,
                        Some(hardware::guidance_display_impact(
                            tunnel_id,
                            updated.last_update,
                        )),
                    )
                    .await?;
                }
            }
        }

        Ok(updated)
    }

    pub async fn closure_requests_list_for_tunnel(
        &self,
        _opctx: &OpContext,
        tunnel_id: &str,
    ) -> ListResultVec<model::ClosureRequest> {
        self.datastore.closure_requests_list_for_tunnel(tunnel_id).await
    }
}

/// Names (as they appear on the wire) of the fields a tunnel update provides
fn provided_tunnel_fields(params: &params::TunnelUpdate) -> Vec<&'static str> {
    let mut fields = Vec::new();
    if params.name.is_some() {
        fields.push("name");
    }
    if params.risk_level.is_some() {
        fields.push("riskLevel");
    }
    if params.water_level.is_some() {
        fields.push("waterLevel");
    }
    if params.barrier_status.is_some() {
        fields.push("barrierStatus");
    }
    if params.guidance_display_enabled.is_some() {
        fields.push("guidanceDisplayEnabled");
    }
    if params.active_guidance_symbol.is_some() {
        fields.push("activeGuidanceSymbol");
    }
    fields
}
