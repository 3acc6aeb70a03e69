// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Shared state used by API request handlers

use crate::app::TunnelGuard;
use dropshot::RequestContext;
use slog::Logger;
use std::net::IpAddr;
use std::sync::Arc;

/// Shared state available to all API request handlers
pub struct ServerContext {
    /// the application layer
    pub tunnelguard: Arc<TunnelGuard>,
    /// debug log
    pub log: Logger,
}

impl ServerContext {
    pub fn new(
        tunnelguard: Arc<TunnelGuard>,
        log: Logger,
    ) -> Arc<ServerContext> {
        Arc::new(ServerContext { tunnelguard, log })
    }
}

/// Per-request context handed down into the application layer
///
/// Carries the request-scoped log plus the client metadata that audit
/// entries record.
pub struct OpContext {
    pub log: Logger,
    pub remote_addr: IpAddr,
    pub user_agent: Option<String>,
}

impl OpContext {
    pub fn for_external_api(
        rqctx: &RequestContext<Arc<ServerContext>>,
    ) -> OpContext {
        OpContext {
            log: rqctx.log.clone(),
            remote_addr: rqctx.request.remote_addr().ip(),
            user_agent: rqctx
                .request
                .headers()
                .get("User-Agent")
                .and_then(|value| value.to_str().ok())
                .map(|s| safe_truncate(s, 255).to_string()),
        }
    }
}

/// Truncate a str to at most `max` bytes, but make sure not to cut any chars
/// in half.
fn safe_truncate(s: &str, max: usize) -> &str {
    let mut end = s.len().min(max);
    while !s.is_char_boundary(end) {
        end -= 1; // back up until we hit a boundary
    }
    &s[..end]
}
