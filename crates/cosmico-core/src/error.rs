//! Error type shared by the Eventbrite/StreamYard clients and the downloader.

/// Failure of a single operation against one of the remote platforms.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// libcurl reported a transport failure (connect, DNS, timeout, TLS).
    #[error("network error: {0}")]
    Network(#[from] curl::Error),

    /// The server answered with a non-2xx status.
    #[error("{url} returned HTTP {status}")]
    Http { url: String, status: u32 },

    /// The webinar host refused the registration.
    #[error("registration rejected: {0}")]
    Auth(String),

    /// The response did not have the expected structure.
    #[error("unexpected response: {0}")]
    Parse(String),

    #[error("invalid URL {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// Local file-system failure while saving a recording.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl Error {
    pub(crate) fn parse(msg: impl Into<String>) -> Self {
        Error::Parse(msg.into())
    }

    /// True for transport-level failures and 5xx answers.
    pub fn is_network(&self) -> bool {
        match self {
            Error::Network(_) => true,
            Error::Http { status, .. } => (500..=599).contains(status),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn http_error_names_url_and_status() {
        let e = Error::Http {
            url: "https://example.com/x".to_string(),
            status: 404,
        };
        assert_eq!(e.to_string(), "https://example.com/x returned HTTP 404");
        assert!(!e.is_network());
    }

    #[test]
    fn server_errors_count_as_network() {
        let e = Error::Http {
            url: "https://example.com/x".to_string(),
            status: 503,
        };
        assert!(e.is_network());
        assert!(!Error::parse("no modules").is_network());
        assert!(!Error::Auth("403".to_string()).is_network());
    }

    #[test]
    fn parse_error_display() {
        assert_eq!(
            Error::parse("missing data.events").to_string(),
            "unexpected response: missing data.events"
        );
    }
}
