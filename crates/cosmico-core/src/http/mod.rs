//! HTTP session shared by the platform clients.
//!
//! Wraps one libcurl easy handle per client so cookies and connections
//! survive between requests. Proxy and TLS verification come from
//! [`HttpOptions`], fixed once at startup and applied to every request.

mod parse;

pub(crate) use parse::parse_headers;
pub use parse::ResponseHead;

use crate::config::CosmicoConfig;
use crate::error::{Error, Result};
use curl::easy::{Easy, List};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::str;
use std::time::Duration;

/// Name of the cookie field in libcurl's Netscape-format cookie dump.
const COOKIE_NAME_FIELD: usize = 5;

/// Process-wide transport settings.
#[derive(Debug, Clone)]
pub struct HttpOptions {
    /// Proxy URL used for every request (`http://`, `socks5://`, ...).
    pub proxy: Option<String>,
    /// Verify server certificates. Only [`HttpOptions::danger_disable_tls_verification`] turns it off.
    pub verify_tls: bool,
    pub user_agent: String,
    pub connect_timeout: Duration,
    /// Overall per-request limit; `None` means unbounded.
    pub timeout: Option<Duration>,
}

impl Default for HttpOptions {
    fn default() -> Self {
        Self {
            proxy: None,
            verify_tls: true,
            user_agent: format!("cosmico-webinar/{}", env!("CARGO_PKG_VERSION")),
            connect_timeout: Duration::from_secs(15),
            timeout: Some(Duration::from_secs(60)),
        }
    }
}

impl HttpOptions {
    pub fn from_config(cfg: &CosmicoConfig) -> Self {
        Self {
            proxy: None,
            verify_tls: true,
            user_agent: cfg.user_agent.clone(),
            connect_timeout: Duration::from_secs(cfg.connect_timeout_secs),
            timeout: Some(Duration::from_secs(cfg.timeout_secs)),
        }
    }

    pub fn with_proxy(mut self, proxy: Option<String>) -> Self {
        self.proxy = proxy.filter(|p| !p.trim().is_empty());
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Accept any certificate and host name. Logged, since it exposes every request to interception.
    pub fn danger_disable_tls_verification(mut self) -> Self {
        tracing::warn!("TLS certificate verification is disabled");
        self.verify_tls = false;
        self
    }

    /// Apply these options to a freshly created or reset easy handle.
    pub fn configure(&self, easy: &mut Easy) -> Result<(), curl::Error> {
        easy.useragent(&self.user_agent)?;
        easy.follow_location(true)?;
        easy.max_redirections(10)?;
        easy.connect_timeout(self.connect_timeout)?;
        if let Some(timeout) = self.timeout {
            easy.timeout(timeout)?;
        }
        if let Some(proxy) = &self.proxy {
            easy.proxy(proxy)?;
        }
        if !self.verify_tls {
            easy.ssl_verify_peer(false)?;
            easy.ssl_verify_host(false)?;
        }
        Ok(())
    }
}

/// A fully buffered response.
#[derive(Debug, Clone)]
pub struct Response {
    /// URL that was requested (before redirects).
    pub url: String,
    pub status: u32,
    pub head: ResponseHead,
    pub body: Vec<u8>,
}

impl Response {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Turn a non-2xx status into [`Error::Http`].
    pub fn error_for_status(self) -> Result<Self> {
        if self.is_success() {
            Ok(self)
        } else {
            Err(Error::Http {
                url: self.url,
                status: self.status,
            })
        }
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_slice(&self.body).map_err(|e| Error::parse(format!("{}: {}", self.url, e)))
    }

    /// Body as text, lossily decoded and cut to `max` chars for log messages.
    pub fn body_snippet(&self, max: usize) -> String {
        String::from_utf8_lossy(&self.body).chars().take(max).collect()
    }
}

/// Cookie-keeping HTTP session over one curl easy handle.
pub struct HttpClient {
    easy: Easy,
    options: HttpOptions,
    default_headers: Vec<(String, String)>,
}

impl HttpClient {
    pub fn new(options: HttpOptions) -> Self {
        Self::with_headers(options, Vec::new())
    }

    /// Session that sends `default_headers` with every request.
    pub fn with_headers(options: HttpOptions, default_headers: Vec<(String, String)>) -> Self {
        Self {
            easy: Easy::new(),
            options,
            default_headers,
        }
    }

    /// GET `url` with `query` appended as URL-encoded parameters.
    pub fn get(&mut self, url: &str, query: &[(&str, &str)]) -> Result<Response> {
        let full = with_query(url, query)?;
        self.prepare(&full, &[])?;
        self.perform(full)
    }

    /// GET, require 2xx, decode the JSON body.
    pub fn get_json<T: DeserializeOwned>(&mut self, url: &str, query: &[(&str, &str)]) -> Result<T> {
        self.get(url, query)?.error_for_status()?.json()
    }

    /// POST `body` as JSON. The status is left to the caller.
    pub fn post_json<B: Serialize>(
        &mut self,
        url: &str,
        body: &B,
        extra_headers: &[(&str, &str)],
    ) -> Result<Response> {
        let payload = serde_json::to_vec(body).map_err(|e| Error::parse(e.to_string()))?;
        let mut headers = vec![("Content-Type", "application/json")];
        headers.extend_from_slice(extra_headers);
        self.prepare(url, &headers)?;
        self.easy.post(true)?;
        self.easy.post_fields_copy(&payload)?;
        self.perform(url.to_string())
    }

    /// HEAD request; useful to learn `Content-Length` without a body.
    pub fn head(&mut self, url: &str) -> Result<Response> {
        self.prepare(url, &[])?;
        self.easy.nobody(true)?;
        self.perform(url.to_string())
    }

    /// True if the session's cookie jar holds a cookie called `name`.
    pub fn has_cookie(&mut self, name: &str) -> Result<bool> {
        let cookies = self.easy.cookies()?;
        Ok(cookies.iter().any(|line| {
            str::from_utf8(line)
                .ok()
                .and_then(|l| l.split('\t').nth(COOKIE_NAME_FIELD))
                .is_some_and(|n| n == name)
        }))
    }

    fn prepare(&mut self, url: &str, extra_headers: &[(&str, &str)]) -> Result<()> {
        // reset() keeps cookies and live connections; only options are cleared.
        self.easy.reset();
        self.options.configure(&mut self.easy)?;
        self.easy.cookie_file("")?;
        self.easy.url(url)?;

        let mut list = List::new();
        let defaults = self
            .default_headers
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()));
        for (k, v) in defaults.chain(extra_headers.iter().copied()) {
            list.append(&format!("{}: {}", k.trim(), v.trim()))?;
        }
        self.easy.http_headers(list)?;
        Ok(())
    }

    fn perform(&mut self, url: String) -> Result<Response> {
        let mut body = Vec::new();
        let mut headers: Vec<String> = Vec::new();
        {
            let mut transfer = self.easy.transfer();
            transfer.header_function(|data| {
                if let Ok(s) = str::from_utf8(data) {
                    headers.push(s.trim_end().to_string());
                }
                true
            })?;
            transfer.write_function(|data| {
                body.extend_from_slice(data);
                Ok(data.len())
            })?;
            transfer.perform()?;
        }

        let status = self.easy.response_code()?;
        tracing::debug!(url = %url, status, bytes = body.len(), "http response");
        Ok(Response {
            url,
            status,
            head: parse::parse_headers(&headers),
            body,
        })
    }
}

/// Append URL-encoded query parameters to `url`.
pub fn with_query(url: &str, query: &[(&str, &str)]) -> Result<String> {
    let parsed = if query.is_empty() {
        url::Url::parse(url)
    } else {
        url::Url::parse_with_params(url, query)
    };
    parsed.map(String::from).map_err(|source| Error::InvalidUrl {
        url: url.to_string(),
        source,
    })
}
