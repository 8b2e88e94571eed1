//! Resolve an organizer's events to webinar recordings.
//!
//! Listing failures abort the run. Anything that goes wrong for a single
//! event is logged and recorded as a skipped [`WebinarResult`].

use std::collections::HashSet;
use std::fmt;

use crate::error::Result;
use crate::eventbrite::{Event, EventbriteClient};
use crate::streamyard::{Registrant, StreamYardClient};

/// Why an event produced no recording.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// The event page embeds no webinar.
    NoWebinarLink,
    /// The webinar asks for registration and no registrant was supplied.
    RegistrationRequired,
    /// The webinar has no recording (yet).
    NoRecording,
    /// The recording was deleted by the organizer.
    RecordingDeleted,
    /// A request failed or returned something unexpected.
    Failed(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::NoWebinarLink => write!(f, "no webinar URL"),
            SkipReason::RegistrationRequired => write!(f, "registration required"),
            SkipReason::NoRecording => write!(f, "recording not found"),
            SkipReason::RecordingDeleted => write!(f, "recording has been deleted"),
            SkipReason::Failed(e) => write!(f, "{}", e),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Resolved {
        /// Title reported by the webinar host (falls back to the event title).
        title: String,
        webinar_url: String,
        vod_url: String,
        poster_url: Option<String>,
    },
    Skipped(SkipReason),
}

/// One event and what it resolved to.
#[derive(Debug, Clone)]
pub struct WebinarResult {
    pub event: Event,
    pub outcome: Outcome,
}

impl WebinarResult {
    /// Recording URL, if the event resolved to one.
    pub fn playback_url(&self) -> Option<&str> {
        match &self.outcome {
            Outcome::Resolved { vod_url, .. } => Some(vod_url),
            Outcome::Skipped(_) => None,
        }
    }
}

pub struct Pipeline {
    eventbrite: EventbriteClient,
    streamyard: StreamYardClient,
    registrant: Option<Registrant>,
}

impl Pipeline {
    /// Without a registrant, webinars that ask for registration are skipped.
    pub fn new(
        eventbrite: EventbriteClient,
        streamyard: StreamYardClient,
        registrant: Option<Registrant>,
    ) -> Self {
        Self {
            eventbrite,
            streamyard,
            registrant,
        }
    }

    /// Every event of the organizer, future ones first.
    pub fn list_events(&mut self, org_id: &str, page_size: u32) -> Result<Vec<Event>> {
        self.eventbrite.all_events(org_id, page_size)
    }

    /// List, then resolve every event.
    pub fn run(&mut self, org_id: &str, page_size: u32) -> Result<Vec<WebinarResult>> {
        let events = self.list_events(org_id, page_size)?;
        Ok(self.resolve_all(&events))
    }

    /// Resolve each distinct event once, in listing order.
    pub fn resolve_all(&mut self, events: &[Event]) -> Vec<WebinarResult> {
        let mut seen = HashSet::new();
        events
            .iter()
            .filter(|e| seen.insert(e.id.clone()))
            .map(|e| WebinarResult {
                event: e.clone(),
                outcome: self.resolve_event(e),
            })
            .collect()
    }

    pub fn resolve_event(&mut self, event: &Event) -> Outcome {
        match self.try_resolve(event) {
            Ok(outcome) => {
                if let Outcome::Skipped(reason) = &outcome {
                    tracing::warn!(event = %event.id, title = event.title(), "skipped: {}", reason);
                }
                outcome
            }
            Err(e) => {
                tracing::error!(event = %event.id, title = event.title(), "error while resolving: {}", e);
                Outcome::Skipped(SkipReason::Failed(e.to_string()))
            }
        }
    }

    fn try_resolve(&mut self, event: &Event) -> Result<Outcome> {
        tracing::info!(event = %event.id, "fetching event {}", event.title());

        let content = self.eventbrite.structured_content(&event.id)?;
        let Some(webinar_url) = content.webinar_link().map(str::to_string) else {
            return Ok(Outcome::Skipped(SkipReason::NoWebinarLink));
        };

        let mut info = self.streamyard.webinar_info(&webinar_url)?;
        if info.registration_required() {
            let Some(registrant) = &self.registrant else {
                return Ok(Outcome::Skipped(SkipReason::RegistrationRequired));
            };
            info = self.streamyard.ensure_access(&webinar_url, info, registrant)?;
        }

        let Some(vod_url) = info.vod_url().map(str::to_string) else {
            return Ok(Outcome::Skipped(SkipReason::NoRecording));
        };
        if info.vod_deleted() {
            return Ok(Outcome::Skipped(SkipReason::RecordingDeleted));
        }

        Ok(Outcome::Resolved {
            title: info
                .title
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| event.title().to_string()),
            webinar_url,
            vod_url,
            poster_url: info.vod_poster_url,
        })
    }
}
