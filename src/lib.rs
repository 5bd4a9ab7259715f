//! # barehttp
//!
//! A minimal HTTP/1.1 server written straight on top of TCP sockets.
//! No hyper, no http crate: bytes in, bytes out.
//!
//! ## The contract
//!
//! Each connection carries exactly one request. The server reads a single
//! buffer (4096 bytes by default), treats it as the whole request, writes one
//! response and closes the connection.
//!
//! What barehttp does not do:
//!
//! - **Keep-alive**: one request per connection
//! - **Chunked encoding, streaming bodies, multipart**: the body is whatever
//!   followed the blank line in that one buffer
//! - **TLS, HTTP/2**: put a proxy in front
//! - **Strict parsing**: malformed input degrades to empty fields, never to
//!   an error
//!
//! What it does:
//!
//! - Forgiving request parsing: [`Request::parse`]
//! - Exact `(method, path)` routing, first registration wins: [`Router`]
//! - Response formatting with default `Date` and `Content-Length`: [`Response`]
//! - One tokio task per connection, graceful shutdown: [`Server`]
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use barehttp::{Request, Response, Router, Server};
//!
//! #[tokio::main]
//! async fn main() {
//!     let app = Router::new()
//!         .get("/hello", hello)
//!         .get("/echo", echo);
//!
//!     Server::bind("localhost:8080").serve(app).await.unwrap();
//! }
//!
//! fn hello(_req: &Request, res: &mut Response) {
//!     res.set_body("Hello, World!");
//! }
//!
//! fn echo(req: &Request, res: &mut Response) {
//!     let message = req.query_param("message").unwrap_or("No message provided");
//!     res.set_body(format!("Echo: {message}"));
//! }
//! ```

mod error;
mod handler;
mod headers;
mod method;
mod request;
mod response;
mod router;
mod server;
mod status;

pub mod connection;
pub mod query;

pub use error::Error;
pub use handler::{BoxedHandler, Handler};
pub use headers::Headers;
pub use method::Method;
pub use request::Request;
pub use response::{reason_phrase, ContentType, Response, SERVER_NAME};
pub use router::{Route, Router};
pub use server::{Server, DEFAULT_BUFFER_SIZE};
pub use status::Status;
