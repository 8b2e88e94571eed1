//! `cosmico helpers get-streamyard-links` – webinar links for a saved event list.

use anyhow::{Context, Result};
use cosmico_core::config::CosmicoConfig;
use cosmico_core::eventbrite::Event;
use cosmico_core::http::HttpOptions;
use std::path::Path;

pub fn run_get_streamyard_links(
    cfg: &CosmicoConfig,
    http: &HttpOptions,
    events_file: &Path,
) -> Result<()> {
    let raw = std::fs::read_to_string(events_file)
        .with_context(|| format!("reading {}", events_file.display()))?;
    let events: Vec<Event> = serde_json::from_str(&raw)
        .with_context(|| format!("parsing events from {}", events_file.display()))?;

    let mut eventbrite = super::eventbrite_client(cfg, http);
    let mut links = Vec::new();
    for event in &events {
        match eventbrite.extract_link(&event.id) {
            Ok(link) => {
                tracing::debug!(event = %event.id, "{}", link);
                links.push(link);
            }
            Err(e) => tracing::error!(event = %event.id, title = event.title(), "{}", e),
        }
    }
    tracing::info!("extracted {} link(s) from {} event(s)", links.len(), events.len());
    println!("{}", serde_json::to_string_pretty(&links)?);
    Ok(())
}
