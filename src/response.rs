//! Outgoing HTTP response type and the wire formatter.
//!
//! A [`Response`] starts out as the connection default (200, plain text, the
//! server identifier header, empty body), is mutated by the matched handler,
//! and is then formatted into bytes:
//!
//! ```text
//! HTTP/1.1 <code> <reason>\r\n
//! <name>: <value>\r\n        ← handler headers, insertion order
//! Date: <IMF-fixdate>\r\n     ← only if the handler did not set it
//! Content-Length: <n>\r\n     ← only if the handler did not set it
//! \r\n
//! <body>
//! ```

use bytes::{BufMut, Bytes, BytesMut};
use chrono::{DateTime, Utc};
use tokio::io::{AsyncWrite, AsyncWriteExt};

use crate::headers::Headers;

/// Value of the `Server` header on every default response.
pub const SERVER_NAME: &str = concat!("barehttp/", env!("CARGO_PKG_VERSION"));

const DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

// ── ContentType ───────────────────────────────────────────────────────────────

/// Common content-type values for use with [`Response::set_content_type`].
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ContentType {
    Css,          // text/css
    Csv,          // text/csv
    Html,         // text/html
    Json,         // application/json
    OctetStream,  // application/octet-stream
    Text,         // text/plain
    Xml,          // application/xml
}

impl ContentType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Css         => "text/css",
            Self::Csv         => "text/csv",
            Self::Html        => "text/html",
            Self::Json        => "application/json",
            Self::OctetStream => "application/octet-stream",
            Self::Text        => "text/plain",
            Self::Xml         => "application/xml",
        }
    }
}

// ── Response ─────────────────────────────────────────────────────────────────

/// An outgoing HTTP response.
///
/// ```rust
/// use barehttp::{ContentType, Response, Status};
///
/// let mut res = Response::new();
/// res.set_status(Status::Created);
/// res.set_content_type(ContentType::Json);
/// res.set_header("Location", "/users/42");
/// res.set_body(r#"{"id":42}"#);
///
/// let wire = res.to_bytes();
/// assert!(wire.starts_with(b"HTTP/1.1 201 Not Found\r\n"));
/// assert!(wire.ends_with(b"\r\n\r\n{\"id\":42}"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub(crate) status: u16,
    pub(crate) headers: Headers,
    pub(crate) body: String,
}

impl Response {
    /// The response every connection starts from: `200`, `Content-Type:
    /// text/plain`, `Server: barehttp/<version>`, empty body.
    pub fn new() -> Self {
        let mut headers = Headers::new();
        headers.insert("Content-Type", ContentType::Text.as_str());
        headers.insert("Server", SERVER_NAME);
        Self { status: 200, headers, body: String::new() }
    }

    /// A response with no headers at all. Only the formatter's defaults will
    /// be added.
    pub fn empty(status: impl Into<u16>) -> Self {
        Self { status: status.into(), headers: Headers::new(), body: String::new() }
    }

    pub fn status(&self) -> u16 { self.status }
    pub fn headers(&self) -> &Headers { &self.headers }
    pub fn headers_mut(&mut self) -> &mut Headers { &mut self.headers }
    pub fn body(&self) -> &str { &self.body }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name)
    }

    pub fn set_status(&mut self, code: impl Into<u16>) {
        self.status = code.into();
    }

    /// Sets a header, replacing any previous value under the same exact name.
    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.headers.insert(name, value);
    }

    pub fn set_content_type(&mut self, content_type: ContentType) {
        self.headers.insert("Content-Type", content_type.as_str());
    }

    pub fn set_body(&mut self, body: impl Into<String>) {
        self.body = body.into();
    }

    /// Formats the response using the current UTC time for a default `Date`.
    pub fn to_bytes(&self) -> Bytes {
        self.format_at(Utc::now())
    }

    /// Formats the response, using `now` if a `Date` header has to be added.
    ///
    /// The response itself is left untouched: defaults go to the output only,
    /// and headers already present are never overwritten.
    pub fn format_at(&self, now: DateTime<Utc>) -> Bytes {
        let mut out = BytesMut::with_capacity(128 + self.body.len());

        out.put_slice(
            format!("HTTP/1.1 {} {}\r\n", self.status, reason_phrase(self.status)).as_bytes(),
        );
        for (name, value) in self.headers.iter() {
            put_header(&mut out, name, value);
        }
        if !self.headers.contains("Date") {
            put_header(&mut out, "Date", &now.format(DATE_FORMAT).to_string());
        }
        if !self.headers.contains("Content-Length") {
            put_header(&mut out, "Content-Length", &self.body.len().to_string());
        }
        out.put_slice(b"\r\n");
        out.put_slice(self.body.as_bytes());

        out.freeze()
    }

    pub(crate) async fn write_to<W: AsyncWrite + Unpin>(
        &self,
        writer: &mut W,
    ) -> std::io::Result<()> {
        writer.write_all(&self.to_bytes()).await?;
        writer.flush().await
    }
}

impl Default for Response {
    fn default() -> Self { Self::new() }
}

fn put_header(out: &mut BytesMut, name: &str, value: &str) {
    out.put_slice(name.as_bytes());
    out.put_slice(b": ");
    out.put_slice(value.as_bytes());
    out.put_slice(b"\r\n");
}

// ── Status reason phrases ─────────────────────────────────────────────────────

/// Reason phrase written after the status code.
///
/// Only two codes have their own phrase. Every other code, including 201,
/// 204 or 400, is written as `Not Found`.
pub fn reason_phrase(code: u16) -> &'static str {
    match code {
        200 => "OK",
        500 => "Internal Server Error",
        _   => "Not Found",
    }
}
