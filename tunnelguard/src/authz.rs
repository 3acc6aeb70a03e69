// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Authorization checks over the role total order
//!
//! The rank comparison itself lives on [`Role`]; this module maps failed
//! checks onto [`Error::Forbidden`] and names the role sets the workflows
//! gate on.

use crate::db::model::User;
use tunnelguard_common::api::external::{Error, Role};

/// Roles that may review closure requests and write operations-log entries
pub const REVIEWER_ROLES: &[Role] =
    &[Role::Admin, Role::Ministry, Role::Traffic];

/// Roles whose guidance-display changes are recorded in the operations log
pub const GUIDANCE_OPERATOR_ROLES: &[Role] = &[Role::Admin, Role::Traffic];

/// Require that `user` holds a role satisfying any element of `required`
pub fn require_any(user: &User, required: &[Role]) -> Result<(), Error> {
    if user.role.authorizes_any(required) {
        Ok(())
    } else {
        Err(Error::Forbidden)
    }
}
