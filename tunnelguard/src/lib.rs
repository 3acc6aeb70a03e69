// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! TunnelGuard: a flood-monitoring control service for road tunnels
//!
//! The service exposes a Dropshot HTTP API over an in-memory entity store.
//! Its one stateful workflow is the closure request: any registered user may
//! report a flooding hazard, a staff reviewer decides it, and an approval
//! forces the tunnel's flood barrier closed.  Permission-gated mutations
//! leave entries in an append-only operations log that carries derived
//! hardware-impact estimates.
//!
//! This crate provides:
//!
//! 1. The in-memory [`db::DataStore`] of users, tunnels, sensors, closure
//!    requests, and operations logs
//! 2. The [`app::TunnelGuard`] application layer implementing the workflow
//!    and audit rules over the store
//! 3. A Dropshot server wiring the `tunnelguard-api` trait to the
//!    application layer

pub mod app;
pub mod authz;
pub mod config;
pub mod context;
pub mod db;
mod http_entrypoints;
pub mod populate;

pub use app::TunnelGuard;
pub use config::Config;
pub use context::ServerContext;

use anyhow::anyhow;
use anyhow::Context as _;
use slog::o;
use std::sync::Arc;

/// Build the datastore and application layer and start the HTTP server
pub async fn start_server(
    config: &Config,
    log: &slog::Logger,
) -> Result<dropshot::HttpServer<Arc<ServerContext>>, anyhow::Error> {
    let datastore = Arc::new(db::DataStore::new());
    if config.populate.seed_demo_data {
        populate::seed_demo_data(
            &log.new(o!("component" => "populate")),
            &datastore,
        )
        .await
        .context("seeding demo data")?;
    }

    let tunnelguard = Arc::new(TunnelGuard::new(
        log.new(o!("component" => "tunnelguard")),
        Arc::clone(&datastore),
    ));
    let apictx = ServerContext::new(
        tunnelguard,
        log.new(o!("component" => "ServerContext")),
    );

    dropshot::ServerBuilder::new(
        http_entrypoints::api(),
        apictx,
        log.new(o!("component" => "dropshot")),
    )
    .config(config.dropshot.clone())
    .start()
    .map_err(|error| anyhow!("setting up HTTP server: {:#}", error))
}

/// A server running on localhost with a fresh store, on an ephemeral port.
///
/// Intended to be used for testing only.
pub struct TransientServer {
    /// Dropshot server
    pub server: dropshot::HttpServer<Arc<ServerContext>>,
}

impl TransientServer {
    pub async fn new(
        log: &slog::Logger,
        seed_demo_data: bool,
    ) -> Result<Self, anyhow::Error> {
        let config = Config {
            dropshot: dropshot::ConfigDropshot {
                bind_address: "127.0.0.1:0".parse().unwrap(),
                ..Default::default()
            },
            log: dropshot::ConfigLogging::StderrTerminal {
                level: dropshot::ConfigLoggingLevel::Info,
            },
            populate: config::PopulateConfig { seed_demo_data },
        };
        let server = start_server(&config, log).await?;
        Ok(Self { server })
    }

    pub fn local_addr(&self) -> std::net::SocketAddr {
        self.server.local_addr()
    }
}
