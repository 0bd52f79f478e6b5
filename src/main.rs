use crate::core::app_config::AppConfig;
use crate::core::system::System;
use crate::ui::cli::Cli;
use crate::utils::logging::Logging;
use clap::Parser;
use std::sync::Arc;

mod core;
mod interface;
mod model;
mod platform;
mod ui;
mod utils;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let app_config = Arc::new(AppConfig::new(&cli.config)?);
    let _log_guard = Logging::initialize(&app_config)?;

    let mut system = System::initialize(app_config).await?;
    let result = ui::console::execute(cli.command, &mut system).await;
    system.terminate().await?;
    result
}
