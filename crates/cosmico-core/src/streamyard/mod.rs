//! StreamYard client: webinar metadata and registration.
//!
//! The public API only answers once the session holds the `jwtOnAir`
//! cookie, which StreamYard sets when the webinar page itself is opened.

mod types;

pub use types::{
    build_registration, FieldDefinition, FieldList, RegistrationField, RegistrationFields,
    RegistrationRequest, Registrant, WebinarInfo,
};

use crate::error::{Error, Result};
use crate::http::{HttpClient, HttpOptions};

/// Session cookie issued by the webinar page.
const SESSION_COOKIE: &str = "jwtOnAir";

/// Registration body is cut to this many chars in error messages.
const ERROR_BODY_MAX: usize = 200;

pub struct StreamYardClient {
    http: HttpClient,
    api_base_url: String,
    time_zone: String,
}

impl StreamYardClient {
    /// `site_url` is sent as Referer; `api_base_url` hosts `/api/public/webinars`.
    pub fn new(site_url: &str, api_base_url: &str, time_zone: &str, options: HttpOptions) -> Self {
        let referer = format!("{}/", site_url.trim_end_matches('/'));
        Self {
            http: HttpClient::with_headers(options, vec![("Referer".to_string(), referer)]),
            api_base_url: api_base_url.trim_end_matches('/').to_string(),
            time_zone: time_zone.to_string(),
        }
    }

    /// Webinar metadata for a webinar page URL such as `https://streamyard.com/watch/abc`.
    pub fn webinar_info(&mut self, url: &str) -> Result<WebinarInfo> {
        let id = webinar_id_from_url(url)?;
        if !self.http.has_cookie(SESSION_COOKIE)? {
            tracing::debug!(url, "opening webinar page for session cookie");
            self.http.get(url, &[])?.error_for_status()?;
        }
        let api = format!("{}/api/public/webinars/{}", self.api_base_url, id);
        self.http.get_json(&api, &[])
    }

    /// Submit `registrant` for the webinar at `url`.
    ///
    /// HTTP 409 means the address is already registered and is accepted.
    /// Other 4xx answers are [`Error::Auth`].
    pub fn register(&mut self, url: &str, info: &WebinarInfo, registrant: &Registrant) -> Result<()> {
        let id = webinar_id_from_url(url)?;
        let request = build_registration(info, registrant, &self.time_zone)?;
        let api = format!(
            "{}/api/public/webinars/{}/registrations",
            self.api_base_url, id
        );
        let resp = self
            .http
            .post_json(&api, &request, &[("X-Csrf-Protection", "true")])?;

        match resp.status {
            200..=299 => {
                tracing::info!(webinar = %id, email = %registrant.email, "registered");
                Ok(())
            }
            409 => {
                tracing::debug!(webinar = %id, "already registered");
                Ok(())
            }
            400..=499 => Err(Error::Auth(format!(
                "webinar {} answered HTTP {}: {}",
                id,
                resp.status,
                resp.body_snippet(ERROR_BODY_MAX)
            ))),
            status => Err(Error::Http { url: api, status }),
        }
    }

    /// Make sure the webinar is accessible and return its current metadata.
    ///
    /// No request is sent when the webinar does not ask for registration.
    /// Otherwise registers and fetches the metadata again.
    pub fn ensure_access(
        &mut self,
        url: &str,
        info: WebinarInfo,
        registrant: &Registrant,
    ) -> Result<WebinarInfo> {
        if !info.registration_required() {
            return Ok(info);
        }
        self.register(url, &info, registrant)?;
        self.webinar_info(url)
    }
}

/// Webinar id: the last non-empty path segment of the webinar URL.
pub fn webinar_id_from_url(url: &str) -> Result<String> {
    let parsed = url::Url::parse(url).map_err(|source| Error::InvalidUrl {
        url: url.to_string(),
        source,
    })?;
    parsed
        .path_segments()
        .and_then(|mut segments| segments.rfind(|s| !s.is_empty()))
        .map(str::to_string)
        .ok_or_else(|| Error::parse(format!("no webinar id in {url}")))
}
