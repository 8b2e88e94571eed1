//! CLI command handlers, one file per command.

mod completions;
mod download;
mod get_events;
mod get_streamyard_links;

pub use completions::run_completions;
pub use download::{run_download, DownloadRequest};
pub use get_events::run_get_events;
pub use get_streamyard_links::run_get_streamyard_links;

use cosmico_core::config::CosmicoConfig;
use cosmico_core::eventbrite::EventbriteClient;
use cosmico_core::http::HttpOptions;
use cosmico_core::streamyard::StreamYardClient;

fn eventbrite_client(cfg: &CosmicoConfig, http: &HttpOptions) -> EventbriteClient {
    EventbriteClient::new(&cfg.eventbrite_base_url, http.clone())
}

/// StreamYard and its recording CDN only serve browser-looking clients.
fn browser_options(cfg: &CosmicoConfig, http: &HttpOptions) -> HttpOptions {
    http.clone().with_user_agent(cfg.browser_user_agent.clone())
}

fn streamyard_client(cfg: &CosmicoConfig, http: &HttpOptions) -> StreamYardClient {
    StreamYardClient::new(
        &cfg.streamyard_base_url,
        &cfg.streamyard_api_base_url,
        &cfg.time_zone,
        browser_options(cfg, http),
    )
}
