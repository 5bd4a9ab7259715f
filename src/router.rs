//! Exact-match request router.
//!
//! Routes live in a plain `Vec`, checked in registration order. A route
//! matches when both method and path are byte-for-byte equal to the request's.
//! No wildcards, no prefixes, no path parameters, and the query string is
//! never looked at. If the same pair is registered twice, the first one wins.

use std::fmt;
use std::sync::Arc;

use crate::handler::{BoxedHandler, Handler};
use crate::method::Method;
use crate::request::Request;
use crate::response::Response;

/// One `(method, path) → handler` binding.
pub struct Route {
    method: String,
    path: String,
    handler: BoxedHandler,
}

impl Route {
    pub fn method(&self) -> &str { &self.method }
    pub fn path(&self) -> &str { &self.path }
}

impl fmt::Debug for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Route")
            .field("method", &self.method)
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

/// The application router.
///
/// Build it once at startup and pass it to [`Server::serve`](crate::Server::serve),
/// which shares it read-only between every connection task. Each registration
/// returns `self` so calls chain naturally.
///
/// ```rust
/// use barehttp::{Method, Request, Response, Router};
///
/// let app = Router::new()
///     .get("/hello", |_req: &Request, res: &mut Response| res.set_body("Hello, World!"))
///     .on(Method::Post, "/submit", |req: &Request, res: &mut Response| {
///         res.set_body(req.body().to_uppercase());
///     })
///     .on("PURGE", "/cache", |_req: &Request, res: &mut Response| res.set_status(204u16));
///
/// assert_eq!(app.len(), 3);
/// assert!(app.lookup("GET", "/hello").is_some());
/// assert!(app.lookup("get", "/hello").is_none());
/// ```
#[derive(Default)]
pub struct Router {
    routes: Vec<Route>,
}

impl Router {
    pub fn new() -> Self {
        Self { routes: Vec::new() }
    }

    /// Register a closure for a method + path pair. Returns `self` for chaining.
    ///
    /// Neither the method nor the path is validated.
    pub fn on<F>(self, method: impl AsRef<str>, path: &str, handler: F) -> Self
    where
        F: Fn(&Request, &mut Response) + Send + Sync + 'static,
    {
        self.add(method.as_ref(), path, Arc::new(handler))
    }

    /// Register any [`Handler`] implementation, e.g. a struct carrying state.
    pub fn handler(self, method: impl AsRef<str>, path: &str, handler: impl Handler) -> Self {
        self.add(method.as_ref(), path, Arc::new(handler))
    }

    pub fn get<F>(self, path: &str, handler: F) -> Self
    where
        F: Fn(&Request, &mut Response) + Send + Sync + 'static,
    {
        self.on(Method::Get, path, handler)
    }

    pub fn post<F>(self, path: &str, handler: F) -> Self
    where
        F: Fn(&Request, &mut Response) + Send + Sync + 'static,
    {
        self.on(Method::Post, path, handler)
    }

    pub fn put<F>(self, path: &str, handler: F) -> Self
    where
        F: Fn(&Request, &mut Response) + Send + Sync + 'static,
    {
        self.on(Method::Put, path, handler)
    }

    pub fn delete<F>(self, path: &str, handler: F) -> Self
    where
        F: Fn(&Request, &mut Response) + Send + Sync + 'static,
    {
        self.on(Method::Delete, path, handler)
    }

    fn add(mut self, method: &str, path: &str, handler: BoxedHandler) -> Self {
        self.routes.push(Route {
            method: method.to_owned(),
            path: path.to_owned(),
            handler,
        });
        self
    }

    /// First route whose method and path equal the given ones.
    pub fn lookup(&self, method: &str, path: &str) -> Option<&dyn Handler> {
        self.routes
            .iter()
            .find(|route| route.method == method && route.path == path)
            .map(|route| &*route.handler)
    }

    /// Looks up the handler for a parsed request. Only its method and path
    /// take part; headers, query parameters and body are ignored.
    pub fn find(&self, req: &Request) -> Option<&dyn Handler> {
        self.lookup(req.method(), req.path())
    }

    /// Registered routes in registration order.
    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

impl fmt::Debug for Router {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(&self.routes).finish()
    }
}
