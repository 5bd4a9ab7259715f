//! Per-connection request handling.
//!
//! One connection carries exactly one request: a single read of at most
//! `buffer_size` bytes is taken as the whole request, one response is written,
//! and the stream is closed. There is no keep-alive and no reassembly of
//! requests that span several reads.

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tracing::debug;

use crate::error::Error;
use crate::request::Request;
use crate::response::Response;
use crate::router::Router;

/// Routes one raw request and produces its response.
///
/// This is the whole protocol core without any I/O: parse, look up, then
/// either run the handler on a default [`Response`] or turn that response into
/// a `404` naming the requested path.
///
/// ```rust
/// use barehttp::{Request, Response, Router, connection};
///
/// let app = Router::new().get("/hello", |_: &Request, res: &mut Response| res.set_body("hi"));
///
/// let res = connection::dispatch(&app, b"GET /missing HTTP/1.1\r\n\r\n");
/// assert_eq!(res.status(), 404);
/// assert_eq!(res.body(), "404 Not Found: /missing");
/// ```
pub fn dispatch(router: &Router, raw: &[u8]) -> Response {
    let req = Request::parse(raw);
    let mut res = Response::new();

    match router.find(&req) {
        Some(handler) => handler.handle(&req, &mut res),
        None => {
            res.set_status(404u16);
            res.set_body(format!("404 Not Found: {}", req.path()));
        }
    }

    debug!(method = %req.method(), path = %req.path(), status = res.status(), "request handled");
    res
}

/// Serves a single accepted connection.
///
/// Reads once, dispatches, writes the formatted response and shuts the stream
/// down. A failed or empty read returns early without writing anything. The
/// stream is owned, so it is closed on every return path.
pub async fn serve_connection<S>(mut stream: S, router: &Router, buffer_size: usize) -> Result<(), Error>
where
    S: AsyncRead + AsyncWrite + Unpin,
{
    let mut buf = vec![0u8; buffer_size];
    let n = stream.read(&mut buf).await.map_err(Error::Read)?;
    if n == 0 {
        return Err(Error::EmptyRequest);
    }

    let res = dispatch(router, &buf[..n]);

    res.write_to(&mut stream).await.map_err(Error::Write)?;
    // Shutdown errors are ignored once the response is written.
    let _ = stream.shutdown().await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use tokio::io::{duplex, AsyncReadExt, AsyncWriteExt};

    use super::*;
    use crate::response::SERVER_NAME;

    fn app() -> Router {
        Router::new()
            .get("/hello", |_req: &Request, res: &mut Response| {
                res.set_body("Hello, World!");
            })
            .get("/echo", |req: &Request, res: &mut Response| {
                let message = req.query_param("message").unwrap_or("No message provided");
                res.set_body(format!("Echo: {message}"));
            })
            .post("/fail", |_req: &Request, res: &mut Response| {
                res.set_status(500u16);
                res.set_header("Content-Type", "application/json");
                res.set_body(r#"{"error":"boom"}"#);
            })
    }

    #[test]
    fn dispatch_runs_matched_handler() {
        let res = dispatch(&app(), b"GET /echo?message=Hi HTTP/1.1\r\nHost: x\r\n\r\n");
        assert_eq!(res.status(), 200);
        assert_eq!(res.body(), "Echo: Hi");
        assert_eq!(res.header("Content-Type"), Some("text/plain"));
        assert_eq!(res.header("Server"), Some(SERVER_NAME));
    }

    #[test]
    fn dispatch_not_found_names_path() {
        let res = dispatch(&app(), b"GET /missing?x=1 HTTP/1.1\r\n\r\n");
        assert_eq!(res.status(), 404);
        assert!(res.body().contains("/missing"));
        assert_eq!(res.body(), "404 Not Found: /missing");
        assert_eq!(res.header("Content-Type"), Some("text/plain"));
    }

    #[test]
    fn dispatch_malformed_input_still_responds() {
        let res = dispatch(&app(), b"\x00\x01garbage");
        assert_eq!(res.status(), 404);
        assert_eq!(res.body(), "404 Not Found: ");
    }

    #[test]
    fn dispatch_handler_controls_everything() {
        let res = dispatch(&app(), b"POST /fail HTTP/1.1\r\n\r\n");
        assert_eq!(res.status(), 500);
        assert_eq!(res.header("Content-Type"), Some("application/json"));
        assert_eq!(res.body(), r#"{"error":"boom"}"#);
    }

    #[tokio::test]
    async fn serves_one_request_and_closes() {
        let (mut client, server) = duplex(8192);
        let router = app();

        client.write_all(b"GET /hello HTTP/1.1\r\nHost: x\r\n\r\n").await.unwrap();
        serve_connection(server, &router, 4096).await.unwrap();

        let mut out = String::new();
        client.read_to_string(&mut out).await.unwrap();
        assert!(out.starts_with("HTTP/1.1 200 OK\r\n"));
        assert!(out.contains("Content-Length: 13\r\n"));
        assert!(out.contains("Date: "));
        assert!(out.ends_with("\r\n\r\nHello, World!"));
    }

    #[tokio::test]
    async fn empty_read_writes_nothing() {
        let (mut client, server) = duplex(1024);
        client.shutdown().await.unwrap();

        let err = serve_connection(server, &app(), 4096).await.unwrap_err();
        assert!(matches!(err, Error::EmptyRequest));

        let mut out = Vec::new();
        client.read_to_end(&mut out).await.unwrap();
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn request_is_truncated_to_buffer_size() {
        let (mut client, server) = duplex(8192);
        let router = Router::new().post("/upload", |req: &Request, res: &mut Response| {
            res.set_body(req.body().len().to_string());
        });

        let mut raw = b"POST /upload HTTP/1.1\r\n\r\n".to_vec();
        let head_len = raw.len();
        raw.extend(std::iter::repeat_n(b'a', 200));
        client.write_all(&raw).await.unwrap();

        serve_connection(server, &router, 64).await.unwrap();

        let mut out = String::new();
        client.read_to_string(&mut out).await.unwrap();
        assert!(out.ends_with(&format!("\r\n\r\n{}", 64 - head_len)));
    }
}
