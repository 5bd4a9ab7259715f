//! Incoming HTTP request type and the raw request parser.
//!
//! Parsing is deliberately forgiving. Whatever bytes arrive, the result is a
//! `Request`: a broken request line leaves `method` and `path` empty, header
//! lines without `": "` are skipped, and a missing blank line means no headers
//! and no body. Nothing here ever returns an error.

use std::collections::HashMap;

use crate::headers::Headers;
use crate::query;

const CRLF: &str = "\r\n";

/// An incoming HTTP request, parsed from a single read of the TCP stream.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Request {
    pub(crate) method: String,
    pub(crate) path: String,
    pub(crate) headers: Headers,
    pub(crate) body: String,
    pub(crate) query: HashMap<String, String>,
}

impl Request {
    /// Parses a raw request buffer.
    ///
    /// The buffer is decoded as UTF-8 (invalid sequences become U+FFFD) and
    /// split on CRLF. Bare `\n` is not a line separator.
    ///
    /// ```
    /// use barehttp::Request;
    ///
    /// let req = Request::parse(b"GET /echo?message=Hi HTTP/1.1\r\nHost: x\r\n\r\n");
    /// assert_eq!(req.method(), "GET");
    /// assert_eq!(req.path(), "/echo");
    /// assert_eq!(req.query_param("message"), Some("Hi"));
    /// assert_eq!(req.header("Host"), Some("x"));
    /// assert_eq!(req.body(), "");
    /// ```
    pub fn parse(raw: &[u8]) -> Self {
        let text = String::from_utf8_lossy(raw);
        let lines: Vec<&str> = text.split(CRLF).collect();

        let mut req = Request::default();

        // Request line: METHOD SP TARGET [SP VERSION]. Single spaces only.
        let parts: Vec<&str> = lines[0].split(' ').collect();
        if parts.len() >= 2 {
            req.method = parts[0].to_owned();
            (req.path, req.query) = query::decode(parts[1]);
        }

        let Some(boundary) = lines.iter().position(|line| line.is_empty()) else {
            return req;
        };

        for line in lines.iter().take(boundary).skip(1) {
            if line.is_empty() {
                continue;
            }
            if let Some((name, value)) = line.split_once(": ") {
                req.headers.insert(name, value);
            }
        }

        // A blank first line has no header block and is not treated as a
        // separator for the body.
        if boundary > 0 && boundary < lines.len() - 1 {
            req.body = lines[boundary + 1..].join(CRLF);
        }

        req
    }

    pub fn method(&self) -> &str { &self.method }
    pub fn path(&self) -> &str { &self.path }
    pub fn headers(&self) -> &Headers { &self.headers }
    pub fn body(&self) -> &str { &self.body }
    pub fn query(&self) -> &HashMap<String, String> { &self.query }

    /// Header lookup by exact name, as received.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }

    /// Returns a query-string parameter.
    ///
    /// For `/echo?message=Hi`, `req.query_param("message")` returns `Some("Hi")`.
    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.query.get(key).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn simple_get_with_host() {
        let req = Request::parse(b"GET /hello HTTP/1.1\r\nHost: x\r\n\r\n");
        assert_eq!(req.method(), "GET");
        assert_eq!(req.path(), "/hello");
        assert_eq!(req.headers().len(), 1);
        assert_eq!(req.header("Host"), Some("x"));
        assert_eq!(req.body(), "");
        assert!(req.query().is_empty());
    }

    #[test]
    fn query_string_is_stripped_from_path() {
        let req = Request::parse(b"GET /echo?message=Hi HTTP/1.1\r\n\r\n");
        assert_eq!(req.path(), "/echo");
        assert_eq!(req.query_param("message"), Some("Hi"));
        assert_eq!(req.query().len(), 1);
        assert!(!req.path().contains('?'));
    }

    #[test]
    fn request_line_variants() {
        let cases: [(&[u8], &str, &str); 4] = [
            (&b"POST /a/b?x=1 HTTP/1.1\r\n\r\n"[..], "POST", "/a/b"),
            (&b"DELETE / HTTP/1.0\r\n\r\n"[..], "DELETE", "/"),
            (&b"BREW /pot\r\n\r\n"[..], "BREW", "/pot"),
            (&b"get /lower HTTP/1.1\r\n\r\n"[..], "get", "/lower"),
        ];
        for (raw, method, path) in cases {
            let req = Request::parse(raw);
            assert_eq!(req.method(), method);
            assert_eq!(req.path(), path);
        }
    }

    #[test]
    fn malformed_request_line_leaves_fields_empty() {
        for raw in [&b""[..], &b"GARBAGE"[..], &b"GET\r\nHost: x\r\n\r\n"[..]] {
            let req = Request::parse(raw);
            assert_eq!(req.method(), "");
            assert_eq!(req.path(), "");
            assert!(req.query().is_empty());
        }
    }

    #[test]
    fn double_space_yields_empty_target() {
        let req = Request::parse(b"GET  /x HTTP/1.1\r\n\r\n");
        assert_eq!(req.method(), "GET");
        assert_eq!(req.path(), "");
    }

    #[test]
    fn headers_split_on_first_colon_space() {
        let raw = b"GET / HTTP/1.1\r\n\
                    Host: example.com\r\n\
                    X-Time: 12: 30\r\n\
                    NoSpace:value\r\n\
                    junk line\r\n\
                    Empty: \r\n\
                    \r\n";
        let req = Request::parse(raw);
        assert_eq!(req.header("Host"), Some("example.com"));
        assert_eq!(req.header("X-Time"), Some("12: 30"));
        assert_eq!(req.header("Empty"), Some(""));
        assert_eq!(req.header("NoSpace"), None);
        assert_eq!(req.headers().len(), 3);
    }

    #[test]
    fn duplicate_header_last_value_wins_and_case_is_kept() {
        let raw = b"GET / HTTP/1.1\r\nX-A: 1\r\nx-a: lower\r\nX-A: 2\r\n\r\n";
        let req = Request::parse(raw);
        assert_eq!(req.header("X-A"), Some("2"));
        assert_eq!(req.header("x-a"), Some("lower"));
        assert_eq!(req.headers().len(), 2);
    }

    #[test]
    fn body_is_everything_after_blank_line() {
        let raw = b"POST /submit HTTP/1.1\r\nContent-Length: 999\r\n\r\nline one\r\n\r\nline three";
        let req = Request::parse(raw);
        assert_eq!(req.body(), "line one\r\n\r\nline three");
        assert_eq!(req.header("Content-Length"), Some("999"));
    }

    #[test]
    fn body_keeps_trailing_crlf() {
        let req = Request::parse(b"POST / HTTP/1.1\r\n\r\nabc\r\n");
        assert_eq!(req.body(), "abc\r\n");
    }

    #[test]
    fn no_blank_line_means_no_headers_and_no_body() {
        let req = Request::parse(b"GET /x HTTP/1.1\r\nHost: x\r\nAccept: */*");
        assert_eq!(req.method(), "GET");
        assert_eq!(req.path(), "/x");
        assert!(req.headers().is_empty());
        assert_eq!(req.body(), "");
    }

    #[test]
    fn leading_blank_line_has_no_body() {
        let req = Request::parse(b"\r\nGET / HTTP/1.1\r\n\r\nbody");
        assert_eq!(req.method(), "");
        assert!(req.headers().is_empty());
        assert_eq!(req.body(), "");
    }

    #[test]
    fn bare_lf_is_not_a_separator() {
        let req = Request::parse(b"GET /x HTTP/1.1\nHost: x\n\n");
        assert_eq!(req.method(), "GET");
        assert_eq!(req.path(), "/x");
        assert!(req.headers().is_empty());
    }

    #[test]
    fn invalid_utf8_is_replaced() {
        let req = Request::parse(b"GET /caf\xff HTTP/1.1\r\n\r\n\xfe");
        assert_eq!(req.path(), "/caf\u{FFFD}");
        assert_eq!(req.body(), "\u{FFFD}");
    }
}
