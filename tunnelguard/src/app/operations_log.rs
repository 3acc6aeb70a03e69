// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The operations log: the append-only audit trail of permission-gated
//! mutations

use crate::authz;
use crate::context::OpContext;
use crate::db::model::{OperationsLog, OperationsLogCreate, OperationsLogFilter, User};
use slog::debug;
use tunnelguard_api::params;
use tunnelguard_common::api::external::{
    CreateResult, Error, HardwareImpact, ListResultVec,
};

pub(crate) const ACTION_UPDATE_USER: &str = "update_user";
pub(crate) const ACTION_UPDATE_TUNNEL: &str = "update_tunnel";
pub(crate) const ACTION_UPDATE_BARRIER: &str = "update_barrier";
pub(crate) const ACTION_APPROVE_CLOSURE: &str = "approve_closure";
pub(crate) const ACTION_REJECT_CLOSURE: &str = "reject_closure";
pub(crate) const ACTION_ACTIVATE_GUIDANCE: &str = "activate_guidance_display";
pub(crate) const ACTION_DEACTIVATE_GUIDANCE: &str =
    "deactivate_guidance_display";

pub(crate) const CATEGORY_USER: &str = "user";
pub(crate) const CATEGORY_TUNNEL: &str = "tunnel";
pub(crate) const CATEGORY_CLOSURE_REQUEST: &str = "closure_request";

impl super::TunnelGuard {
    /// Append an audit entry attributed to `actor`
    ///
    /// The actor's role is re-checked here, independently of whatever gate
    /// the calling path applied: only admin, ministry, and traffic actors
    /// leave audit entries.  Anyone else is skipped without error, so a
    /// mutation that is itself allowed for a public caller simply goes
    /// unrecorded.
    #[allow(clippy::too_many_arguments)]
    pub(crate) async fn record_operation(
        &self,
        opctx: &OpContext,
        actor: &User,
        action: &str,
        category: &str,
        details: serde_json::Value,
        entity_id: Option<String>,
        environment_data: Option<serde_json::Value>,
        hardware_impact: Option<HardwareImpact>,
    ) -> Result<Option<OperationsLog>, Error> {
        if !actor.role.authorizes_any(authz::REVIEWER_ROLES) {
            debug!(self.log, "skipping audit entry for unprivileged actor";
                "actor_id" => actor.id,
                "actor_role" => %actor.role,
                "action" => action,
            );
            return Ok(None);
        }
        let log = self
            .datastore
            .operations_log_create(OperationsLogCreate {
                user_id: actor.id,
                action: action.to_string(),
                category: category.to_string(),
                details,
                entity_id,
                timestamp: None,
                environment_data: environment_data
                    .unwrap_or_else(|| serde_json::json!({})),
                hardware_impact,
                ip_address: Some(opctx.remote_addr.to_string()),
                user_agent: opctx.user_agent.clone(),
            })
            .await?;
        Ok(Some(log))
    }

    /// Record an entry submitted directly through the API
    pub async fn operations_log_submit(
        &self,
        opctx: &OpContext,
        params: &params::OperationsLogCreate,
    ) -> CreateResult<OperationsLog> {
        let actor = self.datastore.user_fetch(params.user_id).await?;
        authz::require_any(&actor, authz::REVIEWER_ROLES)?;
        self.datastore
            .operations_log_create(OperationsLogCreate {
                user_id: actor.id,
                action: params.action.clone(),
                category: params.category.clone(),
                details: params
                    .details
                    .clone()
                    .unwrap_or_else(|| serde_json::json!({})),
                entity_id: params.entity_id.clone(),
                timestamp: None,
                environment_data: params
                    .environment_data
                    .clone()
                    .unwrap_or_else(|| serde_json::json!({})),
                hardware_impact: params.hardware_impact.clone(),
                ip_address: params
                    .ip_address
                    .clone()
                    .or_else(|| Some(opctx.remote_addr.to_string())),
                user_agent: params
                    .user_agent
                    .clone()
                    .or_else(|| opctx.user_agent.clone()),
            })
            .await
    }

    pub async fn operations_logs_list(
        &self,
        _opctx: &OpContext,
        filter: &OperationsLogFilter,
    ) -> ListResultVec<OperationsLog> {
        self.datastore.operations_logs_list(filter).await
    }

    pub async fn operations_logs_list_for_entity(
        &self,
        _opctx: &OpContext,
        entity_id: &str,
    ) -> ListResultVec<OperationsLog> {
        self.datastore.operations_logs_list_for_entity(entity_id).await
    }
}
