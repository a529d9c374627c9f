//! `mdx serve` command implementation.

use std::path::PathBuf;

use clap::Args;
use mdx_config::{CliSettings, Config};
use mdx_server::{run_server, server_config_from_config};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the serve command.
#[derive(Args)]
pub(crate) struct ServeArgs {
    /// Path to configuration file (default: auto-discover docs.config.json).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Documentation source directory (overrides config).
    #[arg(short, long)]
    docs_dir: Option<PathBuf>,

    /// Host to bind to (overrides config).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind to (overrides config).
    #[arg(short, long)]
    port: Option<u16>,

    /// Serve documents marked as drafts.
    #[arg(long)]
    include_drafts: bool,

    /// Enable verbose output (show request and reload logs).
    #[arg(short, long)]
    pub verbose: bool,
}

impl ServeArgs {
    /// Execute the serve command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or the server fails to start.
    pub(crate) async fn execute(self, version: &str) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            host: self.host,
            port: self.port,
            docs_dir: self.docs_dir,
            include_drafts: self.include_drafts.then_some(true),
        };

        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;

        output.info(&format!(
            "Starting server on {}:{}",
            config.server.host, config.server.port
        ));
        output.info(&format!("Docs directory: {}", config.docs_dir.display()));
        output.info(&format!("Route prefix: /{}", config.route_prefix()));
        if config.include_drafts {
            output.info("Drafts: included");
        }

        let server_config = server_config_from_config(&config, version.to_string(), self.verbose);
        run_server(server_config)
            .await
            .map_err(|e| CliError::Server(e.to_string()))?;

        Ok(())
    }
}
