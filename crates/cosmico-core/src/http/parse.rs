//! Parse raw response header lines collected by the curl header callback.

/// Headers of the final response in a redirect chain.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseHead {
    /// Status code of the final response.
    pub status: Option<u32>,
    /// `Content-Length`, if present and numeric.
    pub content_length: Option<u64>,
}

/// Parse collected header lines into a [`ResponseHead`].
///
/// With redirects followed, libcurl reports the headers of every hop; only
/// the lines after the last status line belong to the final response.
pub(crate) fn parse_headers(lines: &[String]) -> ResponseHead {
    let status_line = lines.iter().rposition(|l| l.starts_with("HTTP/"));
    let start = status_line.map(|i| i + 1).unwrap_or(0);

    let mut head = ResponseHead {
        status: status_line.and_then(|i| parse_status(&lines[i])),
        ..ResponseHead::default()
    };
    for line in &lines[start..] {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if let Some((name, value)) = line.split_once(':') {
            let name = name.trim();
            let value = value.trim();
            if name.eq_ignore_ascii_case("content-length") {
                head.content_length = value.parse::<u64>().ok();
            }
        }
    }
    head
}

/// `HTTP/1.1 200 OK` -> 200.
fn parse_status(line: &str) -> Option<u32> {
    line.split_whitespace().nth(1)?.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parse_headers_status_and_length() {
        let h = parse_headers(&lines(&[
            "HTTP/1.1 200 OK",
            "Content-Length: 12345",
            "Content-Type: application/json",
        ]));
        assert_eq!(h.status, Some(200));
        assert_eq!(h.content_length, Some(12345));
    }

    #[test]
    fn parse_headers_keeps_only_final_hop() {
        let h = parse_headers(&lines(&[
            "HTTP/1.1 302 Found",
            "Location: https://cdn.example.com/vod.mp4",
            "Content-Length: 0",
            "",
            "HTTP/2 200",
            "content-length: 999",
        ]));
        assert_eq!(h.status, Some(200));
        assert_eq!(h.content_length, Some(999));
    }

    #[test]
    fn parse_headers_ignores_bad_length() {
        let h = parse_headers(&lines(&["HTTP/1.1 200 OK", "Content-Length: lots"]));
        assert_eq!(h.content_length, None);
    }

    #[test]
    fn parse_headers_without_status_line() {
        let h = parse_headers(&lines(&["Content-Length: 5"]));
        assert_eq!(h.status, None);
        assert_eq!(h.content_length, Some(5));
    }
}
