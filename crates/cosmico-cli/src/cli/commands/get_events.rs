//! `cosmico helpers get-events` – dump an organizer's events as JSON.

use anyhow::{Context, Result};
use cosmico_core::config::CosmicoConfig;
use cosmico_core::http::HttpOptions;

pub fn run_get_events(
    cfg: &CosmicoConfig,
    http: &HttpOptions,
    org_id: &str,
    page_size: u32,
) -> Result<()> {
    let mut eventbrite = super::eventbrite_client(cfg, http);
    let events = eventbrite
        .all_events(org_id, page_size)
        .with_context(|| format!("listing events of organizer {}", org_id))?;
    tracing::info!("found {} event(s)", events.len());
    println!("{}", serde_json::to_string_pretty(&events)?);
    Ok(())
}
