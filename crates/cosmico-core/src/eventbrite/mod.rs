//! Eventbrite client: organizer listings and per-event structured content.
//!
//! Two endpoints are used, both returning JSON:
//! - `/org/{org_id}/showmore/` pages through an organizer's future or past events;
//! - `/api/v3/events/{id}/structured_content/` describes the modules of an event
//!   page, one of which embeds the StreamYard webinar link.

mod pages;
mod types;

pub use pages::EventPages;
pub use types::{ContentModule, Event, EventStart, ListingKind, ListingPage, StructuredContent, TextField};

use crate::error::{Error, Result};
use crate::http::{HttpClient, HttpOptions};
use types::ShowMoreResponse;

pub struct EventbriteClient {
    http: HttpClient,
    base_url: String,
}

impl EventbriteClient {
    /// `base_url` is the site root, e.g. `https://www.eventbrite.it`.
    pub fn new(base_url: &str, options: HttpOptions) -> Self {
        Self {
            http: HttpClient::new(options),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Fetch one listing page (1-based).
    pub fn showmore(
        &mut self,
        org_id: &str,
        page: u32,
        page_size: u32,
        kind: ListingKind,
    ) -> Result<ListingPage> {
        let url = format!("{}/org/{}/showmore/", self.base_url, org_id);
        let page_size = page_size.to_string();
        let page = page.to_string();
        let resp: ShowMoreResponse = self.http.get_json(
            &url,
            &[
                ("page_size", page_size.as_str()),
                ("type", kind.as_str()),
                ("page", page.as_str()),
            ],
        )?;
        Ok(resp.into())
    }

    /// Lazily walk all pages of one listing kind.
    pub fn events(&mut self, org_id: &str, page_size: u32, kind: ListingKind) -> EventPages<'_> {
        EventPages::new(self, org_id, page_size, kind)
    }

    /// Future events followed by past events. Fails on the first page error.
    pub fn all_events(&mut self, org_id: &str, page_size: u32) -> Result<Vec<Event>> {
        let mut events: Vec<Event> = self
            .events(org_id, page_size, ListingKind::Future)
            .collect::<Result<_>>()?;
        for event in self.events(org_id, page_size, ListingKind::Past) {
            events.push(event?);
        }
        tracing::info!(org_id, count = events.len(), "retrieved event listing");
        Ok(events)
    }

    pub fn structured_content(&mut self, event_id: &str) -> Result<StructuredContent> {
        let url = format!(
            "{}/api/v3/events/{}/structured_content/",
            self.base_url, event_id
        );
        self.http.get_json(&url, &[("purpose", "digital_content")])
    }

    /// Webinar link embedded in the event page; [`Error::Parse`] when there is none.
    pub fn extract_link(&mut self, event_id: &str) -> Result<String> {
        let content = self.structured_content(event_id)?;
        content
            .webinar_link()
            .map(str::to_string)
            .ok_or_else(|| Error::parse(format!("event {event_id} has no webinar URL")))
    }
}
