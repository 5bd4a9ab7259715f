//! Common HTTP status codes as a typed enum.
//!
//! Anything that takes a status takes `impl Into<u16>`, so a bare number works
//! just as well:
//!
//! ```rust
//! use barehttp::{Response, Status};
//!
//! let mut res = Response::new();
//! res.set_status(Status::Created);
//! assert_eq!(res.status(), 201);
//!
//! res.set_status(418u16);
//! assert_eq!(res.status(), 418);
//! ```
//!
//! The code only selects the number on the status line. The reason phrase is
//! chosen by [`reason_phrase`](crate::reason_phrase).

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Status {
    // ── 2xx Success ───────────────────────────────────────────────────────────
    Ok,                  // 200
    Created,             // 201
    Accepted,            // 202
    NoContent,           // 204

    // ── 3xx Redirection ───────────────────────────────────────────────────────
    MovedPermanently,    // 301
    Found,               // 302
    NotModified,         // 304

    // ── 4xx Client errors ─────────────────────────────────────────────────────
    BadRequest,          // 400
    Unauthorized,        // 401
    Forbidden,           // 403
    NotFound,            // 404
    MethodNotAllowed,    // 405

    // ── 5xx Server errors ─────────────────────────────────────────────────────
    InternalServerError, // 500
    NotImplemented,      // 501
    ServiceUnavailable,  // 503
}

impl From<Status> for u16 {
    fn from(s: Status) -> u16 {
        match s {
            Status::Ok                  => 200,
            Status::Created             => 201,
            Status::Accepted            => 202,
            Status::NoContent           => 204,
            Status::MovedPermanently    => 301,
            Status::Found               => 302,
            Status::NotModified         => 304,
            Status::BadRequest          => 400,
            Status::Unauthorized        => 401,
            Status::Forbidden           => 403,
            Status::NotFound            => 404,
            Status::MethodNotAllowed    => 405,
            Status::InternalServerError => 500,
            Status::NotImplemented      => 501,
            Status::ServiceUnavailable  => 503,
        }
    }
}
