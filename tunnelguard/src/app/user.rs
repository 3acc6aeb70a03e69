// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! User accounts: registration, login, and audited administration

use crate::context::OpContext;
use crate::db::model;
use crate::db::model::User;
use serde_json::json;
use slog::info;
use tunnelguard_api::params;
use tunnelguard_common::api::external::{
    CreateResult, DeleteResult, Error, ListResultVec, LookupResult,
    UpdateResult,
};

impl super::TunnelGuard {
    pub async fn users_list(&self, _opctx: &OpContext) -> ListResultVec<User> {
        self.datastore.users_list().await
    }

    pub async fn user_fetch(
        &self,
        _opctx: &OpContext,
        user_id: i64,
    ) -> LookupResult<User> {
        self.datastore.user_fetch(user_id).await
    }

    pub async fn user_create(
        &self,
        opctx: &OpContext,
        params: &params::UserCreate,
    ) -> CreateResult<User> {
        let user = self
            .datastore
            .user_create(model::UserCreate::from(params.clone()))
            .await?;
        info!(opctx.log, "registered user";
            "user_id" => user.id,
            "username" => user.username.clone(),
            "role" => %user.role,
        );
        Ok(user)
    }

    /// Authenticate by email and password
    ///
    /// "No such account" and "wrong password" are deliberately
    /// indistinguishable to the caller.
    pub async fn user_login(
        &self,
        opctx: &OpContext,
        credentials: &params::LoginCredentials,
    ) -> LookupResult<User> {
        match self.datastore.user_fetch_by_email(&credentials.email).await {
            Some(user) if user.password == credentials.password => {
                info!(opctx.log, "login";
                    "user_id" => user.id,
                    "role" => %user.role,
                );
                Ok(user)
            }
            _ => Err(Error::Unauthenticated {
                internal_message: format!(
                    "failed login for email {:?}",
                    credentials.email
                ),
            }),
        }
    }

    pub async fn user_update(
        &self,
        opctx: &OpContext,
        user_id: i64,
        params: &params::UserUpdate,
    ) -> UpdateResult<User> {
        let before = self.datastore.user_fetch(user_id).await?;
        let updated = self
            .datastore
            .user_update(user_id, model::UserUpdate::from(params.clone()))
            .await?;
        if let Some(admin_id) = params.admin_id {
            // An unknown actor id just means the change goes unattributed.
            if let Ok(actor) = self.datastore.user_fetch(admin_id).await {
                self.record_user_update(opctx, &actor, &before, &updated)
                    .await?;
            }
        }
        Ok(updated)
    }

    pub async fn user_delete(
        &self,
        _opctx: &OpContext,
        user_id: i64,
    ) -> DeleteResult {
        self.datastore.user_delete(user_id).await
    }

    pub async fn closure_requests_list_for_requester(
        &self,
        _opctx: &OpContext,
        user_id: i64,
    ) -> ListResultVec<model::ClosureRequest> {
        self.datastore.closure_requests_list_for_requester(user_id).await
    }

    /// Record a field-diff audit entry for an administrative user update
    ///
    /// Only fields whose values actually changed are listed.  The password
    /// is never mentioned: neither its name in `updatedFields` nor its value
    /// anywhere in the payload.
    async fn record_user_update(
        &self,
        opctx: &OpContext,
        actor: &User,
        before: &User,
        after: &User,
    ) -> Result<(), Error> {
        let mut updated_fields = Vec::new();
        if before.username != after.username {
            updated_fields.push("username");
        }
        if before.full_name != after.full_name {
            updated_fields.push("fullName");
        }
        if before.email != after.email {
            updated_fields.push("email");
        }
        if before.phone != after.phone {
            updated_fields.push("phone");
        }
        if before.role != after.role {
            updated_fields.push("role");
        }
        if before.status != after.status {
            updated_fields.push("status");
        }
        if updated_fields.is_empty() {
            return Ok(());
        }

        let mut details = json!({
            "targetUser": after.id,
            "targetUsername": before.username,
            "targetUserRole": before.role,
            "updatedFields": updated_fields,
        });
        if before.role != after.role {
            details["roleChange"] =
                json!({ "from": before.role, "to": after.role });
        }
        if before.status != after.status {
            details["statusChange"] =
                json!({ "from": before.status, "to": after.status });
        }

        self.record_operation(
            opctx,
            actor,
            super::ACTION_UPDATE_USER,
            super::CATEGORY_USER,
            details,
            Some(after.id.to_string()),
            None,
            None,
        )
        .await?;
        Ok(())
    }
}
