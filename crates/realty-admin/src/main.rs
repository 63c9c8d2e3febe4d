//! Main entry point for the realty-admin console.

mod cli;
mod commands;
mod config;
mod logging;
mod output;

use std::sync::Arc;

use clap::Parser;
use realty_client::{ApiClient, LoggingInterceptor, MemorySession};
use tracing::{debug, warn};

use crate::{cli::Cli, config::Configuration, output::ConsoleNotifier};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize configuration and logging
    let configuration = Configuration::load(&cli)?;
    let _logging_guard = logging::init_logging(&configuration.logging_config())?;

    let session = match configuration.api_token() {
        Some(token) => MemorySession::with_token(&token),
        None => MemorySession::new(),
    };

    let mut builder = ApiClient::builder(configuration.client_config())
        .session(Arc::new(session))
        .notifier(Arc::new(ConsoleNotifier))
        .request_interceptor(Arc::new(LoggingInterceptor))
        .on_unauthorized(|| {
            warn!("Session rejected by the server; set REALTY_API_TOKEN and retry")
        });
    if let Some(lang) = configuration.api_lang() {
        builder = builder.lang(move || Some(lang.clone()));
    }
    let client = builder.build()?;

    debug!("Using API at {}", client.config().base_url);

    commands::run(cli.command, client).await
}
