//! CLI for fetching webinar recordings.

mod commands;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use cosmico_core::config;
use cosmico_core::http::HttpOptions;
use cosmico_core::streamyard::Registrant;
use std::path::PathBuf;

use commands::{
    run_completions, run_download, run_get_events, run_get_streamyard_links, DownloadRequest,
};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "cosmico")]
#[command(about = "Fetch webinar recordings published through Eventbrite and StreamYard", long_about = None)]
pub struct Cli {
    /// Enable verbose (debug) logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Send every request through this proxy (e.g. http://127.0.0.1:8080).
    #[arg(short, long, global = true, value_name = "URL")]
    pub proxy: Option<String>,

    /// Disable TLS certificate verification.
    #[arg(long, global = true)]
    pub no_verify: bool,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Resolve and download every webinar recording of an organizer.
    Download {
        /// Eventbrite organizer id (defaults to `org_id` in config.toml).
        #[arg(long, value_name = "ID")]
        org_id: Option<String>,

        /// Number of events to fetch per listing page.
        #[arg(long, value_name = "N")]
        pagesize: Option<u32>,

        /// Output directory for recordings (default ./output).
        #[arg(long, value_name = "DIR")]
        output: Option<PathBuf>,

        /// Print the resolved links without downloading.
        #[arg(long)]
        links_only: bool,

        /// Email to use for registration.
        #[arg(long, requires_all = ["first_name", "last_name"])]
        email: Option<String>,

        /// First name to use for registration.
        #[arg(long, requires_all = ["email", "last_name"])]
        first_name: Option<String>,

        /// Last name to use for registration.
        #[arg(long, requires_all = ["email", "first_name"])]
        last_name: Option<String>,
    },

    /// Helper commands.
    #[command(subcommand)]
    Helpers(HelpersCommand),
}

#[derive(Debug, Subcommand)]
pub enum HelpersCommand {
    /// Print all events of an organizer as JSON.
    GetEvents {
        /// Eventbrite organizer id.
        org_id: String,

        /// Number of events to fetch per listing page.
        #[arg(long, default_value = "20", value_name = "N")]
        pagesize: u32,
    },

    /// Print the StreamYard links of the events in a JSON file (as written by get-events).
    GetStreamyardLinks {
        /// Path to the events JSON file.
        events_file: PathBuf,
    },

    /// Generate shell completions on stdout.
    Completions {
        #[arg(value_enum)]
        shell: Shell,
    },
}

impl Cli {
    pub fn run(self) -> Result<()> {
        if let CliCommand::Helpers(HelpersCommand::Completions { shell }) = self.command {
            run_completions(shell);
            return Ok(());
        }

        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        let mut http = HttpOptions::from_config(&cfg).with_proxy(self.proxy);
        if self.no_verify {
            http = http.danger_disable_tls_verification();
        }

        match self.command {
            CliCommand::Download {
                org_id,
                pagesize,
                output,
                links_only,
                email,
                first_name,
                last_name,
            } => {
                let org_id = org_id
                    .or_else(|| cfg.org_id.clone())
                    .context("no organizer id: pass --org-id or set org_id in config.toml")?;
                let registrant = match (email, first_name, last_name) {
                    (Some(email), Some(first_name), Some(last_name)) => Some(Registrant {
                        email,
                        first_name,
                        last_name,
                    }),
                    _ => None,
                };
                let request = DownloadRequest {
                    org_id,
                    page_size: pagesize.unwrap_or(cfg.page_size),
                    output_dir: output
                        .or_else(|| cfg.output_dir.clone())
                        .unwrap_or_else(|| PathBuf::from("output")),
                    links_only,
                    registrant,
                };
                run_download(&cfg, &http, request)?;
            }
            CliCommand::Helpers(HelpersCommand::GetEvents { org_id, pagesize }) => {
                run_get_events(&cfg, &http, &org_id, pagesize)?;
            }
            CliCommand::Helpers(HelpersCommand::GetStreamyardLinks { events_file }) => {
                run_get_streamyard_links(&cfg, &http, &events_file)?;
            }
            CliCommand::Helpers(HelpersCommand::Completions { .. }) => {}
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
