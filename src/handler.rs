//! Handler trait and type erasure.
//!
//! # How handlers are stored
//!
//! The router keeps handlers of *different* types in a single `Vec<Route>`.
//! A collection holds one concrete type, so every handler is stored behind
//! a trait object (`dyn Handler`) and shared as a [`BoxedHandler`]:
//!
//! ```text
//! |req, res| res.set_body("hi")        ← user writes this
//!        ↓ router.get("/", f)
//! Arc::new(f)                          ← blanket impl makes it a Handler
//!        ↓ stored as BoxedHandler = Arc<dyn Handler>
//! handler.handle(&req, &mut res)       ← one virtual call per request
//! ```
//!
//! # Mutation contract
//!
//! A handler borrows the request immutably and the response mutably for the
//! duration of the call. It may change the status, any header, and the body.
//! Once it returns, only the connection task reads the response again.

use std::sync::Arc;

use crate::request::Request;
use crate::response::Response;

/// Implemented for every route handler.
///
/// Closures and `fn` items with the signature
/// `Fn(&Request, &mut Response)` get this automatically. Implement it by hand
/// for handlers that carry state:
///
/// ```rust
/// use std::sync::atomic::{AtomicU64, Ordering};
/// use barehttp::{Handler, Method, Request, Response, Router};
///
/// struct Counter(AtomicU64);
///
/// impl Handler for Counter {
///     fn handle(&self, _req: &Request, res: &mut Response) {
///         let n = self.0.fetch_add(1, Ordering::Relaxed) + 1;
///         res.set_body(format!("visit #{n}"));
///     }
/// }
///
/// let app = Router::new().handler(Method::Get, "/visits", Counter(AtomicU64::new(0)));
/// ```
pub trait Handler: Send + Sync + 'static {
    fn handle(&self, req: &Request, res: &mut Response);
}

impl<F> Handler for F
where
    F: Fn(&Request, &mut Response) + Send + Sync + 'static,
{
    fn handle(&self, req: &Request, res: &mut Response) {
        self(req, res)
    }
}

/// A type-erased handler shared across concurrent connections.
pub type BoxedHandler = Arc<dyn Handler>;
