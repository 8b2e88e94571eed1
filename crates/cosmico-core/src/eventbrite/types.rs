//! Eventbrite JSON shapes: listing pages, events, structured content.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Which half of an organizer's listing to walk.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListingKind {
    Future,
    Past,
}

impl ListingKind {
    pub fn as_str(self) -> &'static str {
        match self {
            ListingKind::Future => "future",
            ListingKind::Past => "past",
        }
    }
}

/// `{"text": ..., "html": ...}` wrapper Eventbrite uses for names and descriptions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TextField {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EventStart {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utc: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One event from an organizer listing.
///
/// Fields not modelled here are kept in `extra` so the event can be written
/// back out unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default)]
    pub name: TextField,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<EventStart>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Event {
    pub fn title(&self) -> &str {
        self.name.text.as_deref().unwrap_or("(untitled)")
    }

    /// Local start timestamp, when the listing provides one.
    pub fn start_date(&self) -> Option<&str> {
        self.start.as_ref().and_then(|s| s.local.as_deref())
    }
}

/// Accepts `"123"` or `123`; Eventbrite uses both depending on endpoint.
fn string_or_number<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    match Value::deserialize(d)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "event id must be a string or number, got {other}"
        ))),
    }
}

/// One page of `/org/{id}/showmore/`.
#[derive(Debug, Clone)]
pub struct ListingPage {
    pub events: Vec<Event>,
    pub has_next_page: bool,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ShowMoreResponse {
    pub data: ShowMoreData,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ShowMoreData {
    pub events: Vec<Event>,
    #[serde(default)]
    pub has_next_page: bool,
}

impl From<ShowMoreResponse> for ListingPage {
    fn from(r: ShowMoreResponse) -> Self {
        ListingPage {
            events: r.data.events,
            has_next_page: r.data.has_next_page,
        }
    }
}

/// `/api/v3/events/{id}/structured_content/` body: the modules of an event page.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StructuredContent {
    #[serde(default)]
    pub modules: Vec<ContentModule>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContentModule {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub data: Value,
}

impl StructuredContent {
    /// URL of the first embedded webinar module, if the page has one.
    pub fn webinar_link(&self) -> Option<&str> {
        self.modules
            .iter()
            .filter(|m| m.kind == "webinar")
            .find_map(|m| m.data.pointer("/webinar_url/url")?.as_str())
            .filter(|url| !url.trim().is_empty())
    }
}
