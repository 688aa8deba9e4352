pub mod api;
pub mod cli;
pub mod config;
pub mod domain;
pub mod errors;
pub mod export;
pub mod ingest;
pub mod pipeline;
pub mod services;

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use cli::Cli;

use crate::cli::Command;
use crate::config::LeagueConfig;
use crate::services::processing::BuildService;
use crate::services::server::ServerService;

pub fn interpret() -> Command {
    let cli = Cli::parse();
    cli.command
}

pub fn handle_build(data_dir: PathBuf, out: PathBuf) -> Result<()> {
    let config = LeagueConfig::new();
    let service = BuildService::new(config);
    service.run(&data_dir, &out)
}

pub fn handle_serve(port: u16, document: PathBuf) -> Result<()> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let service = ServerService::new(port, document);
        service.run().await
    })
}
