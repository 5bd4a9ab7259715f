//! Unified error type.

use std::fmt;
use std::io;

/// The error type returned by barehttp's fallible operations.
///
/// Application-level outcomes (an unknown route, a malformed request) are
/// expressed as HTTP responses, never as `Error`s. This type surfaces
/// infrastructure failures only. [`Error::Bind`] is the one variant that
/// reaches the caller of [`Server::serve`](crate::Server::serve); the others
/// are logged by the server and confined to a single accept attempt or
/// connection.
#[derive(Debug)]
pub enum Error {
    /// The listening address could not be resolved or bound.
    Bind { addr: String, source: io::Error },
    /// A single `accept` call failed.
    Accept(io::Error),
    /// Reading the request from a connection failed.
    Read(io::Error),
    /// The peer closed the connection without sending anything.
    EmptyRequest,
    /// Writing the response to a connection failed.
    Write(io::Error),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Bind { addr, source } => write!(f, "cannot bind {addr}: {source}"),
            Error::Accept(e) => write!(f, "accept: {e}"),
            Error::Read(e) => write!(f, "read: {e}"),
            Error::EmptyRequest => f.write_str("read: connection closed before any data"),
            Error::Write(e) => write!(f, "write: {e}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Bind { source, .. } => Some(source),
            Error::Accept(e) | Error::Read(e) | Error::Write(e) => Some(e),
            Error::EmptyRequest => None,
        }
    }
}
