// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Executable that runs the TunnelGuard flood-monitoring service

use anyhow::anyhow;
use anyhow::Context;
use clap::Parser;
use slog::info;
use std::path::PathBuf;
use tunnelguard::Config;

#[derive(Parser, Debug)]
struct Args {
    #[clap(long, action)]
    config_file: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), anyhow::Error> {
    let args = Args::parse();
    let config = Config::from_file(&args.config_file).with_context(|| {
        format!("read config file {:?}", &args.config_file)
    })?;

    let log = config
        .log
        .to_logger("tunnelguard")
        .context("failed to create logger")?;
    info!(&log, "config"; "config" => ?config.dropshot);

    let server = tunnelguard::start_server(&config, &log).await?;
    info!(&log, "listening"; "local_addr" => %server.local_addr());

    server
        .await
        .map_err(|error_message| anyhow!("server exiting: {}", error_message))
}
