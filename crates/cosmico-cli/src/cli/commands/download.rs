//! `cosmico download` – resolve every webinar of an organizer and fetch the recordings.

use anyhow::Result;
use cosmico_core::config::CosmicoConfig;
use cosmico_core::downloader::{DownloadOutcome, DownloadProgress, VodDownloader};
use cosmico_core::http::HttpOptions;
use cosmico_core::naming;
use cosmico_core::pipeline::{Outcome, Pipeline, WebinarResult};
use cosmico_core::streamyard::Registrant;
use std::path::PathBuf;
use std::time::Instant;

const PROGRESS_INTERVAL_MS: u128 = 500;
const TITLE_WIDTH: usize = 48;

#[derive(Debug)]
pub struct DownloadRequest {
    pub org_id: String,
    pub page_size: u32,
    pub output_dir: PathBuf,
    pub links_only: bool,
    pub registrant: Option<Registrant>,
}

pub fn run_download(cfg: &CosmicoConfig, http: &HttpOptions, request: DownloadRequest) -> Result<()> {
    if request.registrant.is_none() {
        tracing::info!("no registrant given; webinars that require registration will be skipped");
    }
    let mut pipeline = Pipeline::new(
        super::eventbrite_client(cfg, http),
        super::streamyard_client(cfg, http),
        request.registrant,
    );

    println!("[1/3] Listing events of organizer {}", request.org_id);
    let events = match pipeline.list_events(&request.org_id, request.page_size) {
        Ok(events) => events,
        Err(e) => {
            if e.is_network() {
                tracing::error!("Eventbrite is unreachable; check the connection or --proxy");
            }
            return Err(anyhow::Error::new(e)
                .context(format!("listing events of organizer {}", request.org_id)));
        }
    };
    println!("      {} event(s) found", events.len());

    println!("[2/3] Resolving recordings");
    let results = pipeline.resolve_all(&events);
    print_summary(&results);

    if request.links_only {
        return Ok(());
    }

    let downloader = VodDownloader::new(super::browser_options(cfg, http), request.output_dir);
    println!("[3/3] Downloading into {}", downloader.output_dir().display());
    let mut downloaded = 0usize;
    let mut failed = 0usize;
    for result in &results {
        let Outcome::Resolved { title, vod_url, .. } = &result.outcome else {
            continue;
        };
        let target = downloader.target_path(title);
        println!("  {}", naming::crop(&target.display().to_string(), 72));
        match downloader.download(title, vod_url, progress_printer()) {
            Ok(DownloadOutcome::Downloaded { bytes, .. }) => {
                eprintln!();
                tracing::info!(event = %result.event.id, bytes, "downloaded {}", title);
                downloaded += 1;
            }
            Ok(DownloadOutcome::AlreadyPresent { .. }) => {
                println!("    already downloaded");
            }
            Err(e) => {
                eprintln!();
                tracing::error!(event = %result.event.id, "download of {} failed: {}", title, e);
                failed += 1;
            }
        }
    }

    println!("Downloaded {} recording(s), {} failed.", downloaded, failed);
    Ok(())
}

fn print_summary(results: &[WebinarResult]) {
    if results.is_empty() {
        println!("No events.");
        return;
    }
    println!("{:<14} {:<w$} {}", "EVENT", "TITLE", "RESULT", w = TITLE_WIDTH);
    for r in results {
        let status = match &r.outcome {
            Outcome::Resolved { vod_url, .. } => vod_url.clone(),
            Outcome::Skipped(reason) => format!("skipped: {}", reason),
        };
        println!(
            "{:<14} {:<w$} {}",
            r.event.id,
            naming::crop_end(r.event.title(), TITLE_WIDTH),
            status,
            w = TITLE_WIDTH
        );
    }
    let resolved = results.iter().filter(|r| r.playback_url().is_some()).count();
    println!("{} of {} event(s) have a recording.", resolved, results.len());
}

/// Progress line on stderr, redrawn at most every [`PROGRESS_INTERVAL_MS`].
fn progress_printer() -> impl FnMut(&DownloadProgress) {
    let mut last_print: Option<Instant> = None;
    move |stats: &DownloadProgress| {
        let now = Instant::now();
        let finished = stats.total_bytes.is_some_and(|t| stats.bytes_done >= t);
        if !finished
            && last_print.is_some_and(|t| now.duration_since(t).as_millis() < PROGRESS_INTERVAL_MS)
        {
            return;
        }
        let done_mib = stats.bytes_done as f64 / 1_048_576.0;
        let rate_mib = stats.bytes_per_sec() / 1_048_576.0;
        match (stats.total_bytes, stats.fraction()) {
            (Some(total), Some(fraction)) => eprint!(
                "\r    {:.1} / {:.1} MiB ({:.1}%)  {:.2} MiB/s  ",
                done_mib,
                total as f64 / 1_048_576.0,
                fraction * 100.0,
                rate_mib
            ),
            _ => eprint!("\r    {:.1} MiB  {:.2} MiB/s  ", done_mib, rate_mib),
        }
        last_print = Some(now);
    }
}
