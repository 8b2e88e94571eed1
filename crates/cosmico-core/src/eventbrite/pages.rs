//! Lazy walk over the pages of an organizer listing.

use std::iter::FusedIterator;

use super::types::{Event, ListingKind};
use super::EventbriteClient;
use crate::error::Result;

/// Iterator over every event of one listing kind.
///
/// Fetches a page only when the previous one is exhausted. Ends after the
/// page that reports `has_next_page = false`, or right after yielding the
/// first error. Not restartable: call [`EventbriteClient::events`] again.
pub struct EventPages<'a> {
    client: &'a mut EventbriteClient,
    org_id: String,
    page_size: u32,
    kind: ListingKind,
    next_page: Option<u32>,
    buffered: std::vec::IntoIter<Event>,
}

impl<'a> EventPages<'a> {
    pub(super) fn new(
        client: &'a mut EventbriteClient,
        org_id: &str,
        page_size: u32,
        kind: ListingKind,
    ) -> Self {
        Self {
            client,
            org_id: org_id.to_string(),
            page_size,
            kind,
            next_page: Some(1),
            buffered: Vec::new().into_iter(),
        }
    }
}

impl Iterator for EventPages<'_> {
    type Item = Result<Event>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(event) = self.buffered.next() {
                return Some(Ok(event));
            }
            let page = self.next_page?;
            match self
                .client
                .showmore(&self.org_id, page, self.page_size, self.kind)
            {
                Ok(listing) => {
                    tracing::debug!(
                        org_id = %self.org_id,
                        kind = self.kind.as_str(),
                        page,
                        events = listing.events.len(),
                        has_next_page = listing.has_next_page,
                        "listing page"
                    );
                    // An empty page that claims more would otherwise loop forever.
                    self.next_page = (listing.has_next_page && !listing.events.is_empty())
                        .then(|| page + 1);
                    self.buffered = listing.events.into_iter();
                }
                Err(e) => {
                    self.next_page = None;
                    return Some(Err(e));
                }
            }
        }
    }
}

impl FusedIterator for EventPages<'_> {}
