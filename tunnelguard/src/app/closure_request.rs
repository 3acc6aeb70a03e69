// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The closure-request workflow
//!
//! Requests move `pending` -> `approved` | `rejected`, and only a staff
//! reviewer (admin, ministry, or traffic) may decide.  Approval forces the
//! tunnel's barrier closed; both decisions append an audit entry.
//!
//! The decision path performs three separate datastore writes, in a fixed
//! order: the request's status, then (on approval) the tunnel's barrier,
//! then the operations-log entry.  They are not wrapped in a transaction,
//! so a crash mid-sequence can leave later writes unapplied.  The ordering
//! guarantee is only that nothing after a failed step runs: every
//! validation failure happens before the first write.

use crate::authz;
use crate::context::OpContext;
use crate::db::model;
use crate::db::model::ClosureRequest;
use serde_json::json;
use slog::info;
use tunnelguard_api::params;
use tunnelguard_common::api::external::{
    BarrierStatus, ClosureRequestStatus, CreateResult, DeleteResult, Error,
    ListResultVec, LookupResult, UpdateResult,
};

impl super::TunnelGuard {
    /// File a closure request against a tunnel
    ///
    /// Open to any registered user; no role required.
    pub async fn closure_request_create(
        &self,
        opctx: &OpContext,
        params: &params::ClosureRequestCreate,
    ) -> CreateResult<ClosureRequest> {
        // Both referenced entities must exist before anything is written.
        self.datastore.tunnel_fetch(&params.tunnel_id).await?;
        self.datastore.user_fetch(params.requested_by_id).await?;
        let request = self
            .datastore
            .closure_request_create(model::ClosureRequestCreate::from(
                params.clone(),
            ))
            .await?;
        info!(opctx.log, "closure requested";
            "request_id" => request.id,
            "tunnel_id" => request.tunnel_id.clone(),
            "requested_by" => request.requested_by_id,
        );
        Ok(request)
    }

    /// Decide a pending closure request
    pub async fn closure_request_review(
        &self,
        opctx: &OpContext,
        request_id: i64,
        params: &params::ClosureRequestReview,
    ) -> UpdateResult<ClosureRequest> {
        let request = self.datastore.closure_request_fetch(request_id).await?;
        if request.status != ClosureRequestStatus::Pending {
            return Err(Error::invalid_request(
                "closure request has already been reviewed",
            ));
        }
        let reviewer_id = params.reviewed_by_id.ok_or_else(|| {
            Error::invalid_request(
                "reviewer id is required to approve or reject a closure \
                 request",
            )
        })?;
        let notes = params
            .review_notes
            .as_deref()
            .map(str::trim)
            .filter(|notes| !notes.is_empty())
            .ok_or_else(|| {
                Error::invalid_request(
                    "review notes are required to approve or reject a \
                     closure request",
                )
            })?;
        let reviewer = self.datastore.user_fetch(reviewer_id).await?;
        authz::require_any(&reviewer, authz::REVIEWER_ROLES)?;

        // Snapshot the tunnel before any write: the audit entry records the
        // environment as the reviewer saw it, and a dangling tunnel
        // reference should fail the review before the request is decided.
        let tunnel = self.datastore.tunnel_fetch(&request.tunnel_id).await?;

        let decision = match params.status {
            params::ReviewDecision::Approved => ClosureRequestStatus::Approved,
            params::ReviewDecision::Rejected => ClosureRequestStatus::Rejected,
        };
        let updated = self
            .datastore
            .closure_request_set_decision(
                request_id,
                decision,
                reviewer_id,
                notes.to_string(),
            )
            .await?;

        if decision == ClosureRequestStatus::Approved {
            // Force the barrier closed regardless of its current state; a
            // barrier that is already closed stays closed.
            self.datastore
                .tunnel_update(
                    &request.tunnel_id,
                    model::TunnelUpdate {
                        barrier_status: Some(BarrierStatus::Closed),
                        ..Default::default()
                    },
                )
                .await?;
            info!(opctx.log, "closure request approved; barrier closed";
                "request_id" => request_id,
                "tunnel_id" => request.tunnel_id.clone(),
                "reviewed_by" => reviewer_id,
            );
        } else {
            info!(opctx.log, "closure request rejected";
                "request_id" => request_id,
                "tunnel_id" => request.tunnel_id.clone(),
                "reviewed_by" => reviewer_id,
            );
        }

        let action = match decision {
            ClosureRequestStatus::Approved => super::ACTION_APPROVE_CLOSURE,
            _ => super::ACTION_REJECT_CLOSURE,
        };
        self.record_operation(
            opctx,
            &reviewer,
            action,
            super::CATEGORY_CLOSURE_REQUEST,
            json!({
                "requestId": request_id,
                "tunnelId": request.tunnel_id,
                "tunnelName": tunnel.name,
                "requestedBy": request.requested_by_id,
                "reviewNotes": notes,
            }),
            Some(request.tunnel_id.clone()),
            Some(json!({
                "waterLevel": tunnel.water_level,
                "riskLevel": tunnel.risk_level,
            })),
            None,
        )
        .await?;

        Ok(updated)
    }

    pub async fn closure_request_fetch(
        &self,
        _opctx: &OpContext,
        request_id: i64,
    ) -> LookupResult<ClosureRequest> {
        self.datastore.closure_request_fetch(request_id).await
    }

    pub async fn closure_requests_list(
        &self,
        _opctx: &OpContext,
        status: Option<ClosureRequestStatus>,
    ) -> ListResultVec<ClosureRequest> {
        match status {
            Some(ClosureRequestStatus::Pending) => {
                self.datastore.closure_requests_list_pending().await
            }
            Some(status) => Ok(self
                .datastore
                .closure_requests_list()
                .await?
                .into_iter()
                .filter(|request| request.status == status)
                .collect()),
            None => self.datastore.closure_requests_list().await,
        }
    }

    pub async fn closure_request_delete(
        &self,
        _opctx: &OpContext,
        request_id: i64,
    ) -> DeleteResult {
        self.datastore.closure_request_delete(request_id).await
    }
}
