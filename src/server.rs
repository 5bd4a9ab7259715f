//! TCP accept loop and graceful shutdown.
//!
//! # Concurrency
//!
//! The accept loop runs on one task and only ever waits on `accept`. Every
//! accepted connection gets its own tokio task, which owns its read buffer,
//! request and response. The [`Router`] is moved into an `Arc` before the
//! first connection is accepted and is only read from then on, so connection
//! tasks share it without any locking.
//!
//! # Shutdown
//!
//! On SIGTERM or Ctrl-C (or whatever future is passed to
//! [`Server::serve_with_shutdown`]) the server:
//! 1. Stops calling `accept` immediately.
//! 2. Lets every in-flight connection task run to completion.
//! 3. Returns from `serve`.

use std::future::Future;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{debug, error, info, warn};

use crate::connection;
use crate::error::Error;
use crate::router::Router;

/// Bytes read from each connection. The first read is the whole request.
pub const DEFAULT_BUFFER_SIZE: usize = 4096;

/// The HTTP server.
#[derive(Debug, Clone)]
pub struct Server {
    addr: String,
    buffer_size: usize,
}

impl Server {
    /// Configures the server to listen on `addr` when [`serve`](Server::serve)
    /// is called.
    ///
    /// `addr` is any `host:port` string tokio can resolve, such as
    /// `"0.0.0.0:3000"` or `"localhost:8080"`. Nothing is resolved or bound
    /// until `serve`; a bad address surfaces there as [`Error::Bind`].
    ///
    /// # Example
    ///
    /// ```rust,no_run
    /// use barehttp::{Router, Server};
    ///
    /// # async fn run() -> Result<(), barehttp::Error> {
    /// Server::bind("localhost:8080").serve(Router::new()).await
    /// # }
    /// ```
    pub fn bind(addr: impl Into<String>) -> Self {
        Self { addr: addr.into(), buffer_size: DEFAULT_BUFFER_SIZE }
    }

    /// Sets the size of the single per-connection read buffer.
    ///
    /// Anything the client sends beyond this many bytes is never read.
    ///
    /// # Panics
    ///
    /// Panics if `size` is zero.
    pub fn buffer_size(mut self, size: usize) -> Self {
        assert!(size > 0, "buffer size must be non-zero");
        self.buffer_size = size;
        self
    }

    pub fn addr(&self) -> &str {
        &self.addr
    }

    /// Starts accepting connections and dispatching them through `router`.
    ///
    /// Fails only if the address cannot be bound. Otherwise returns after a
    /// full graceful shutdown (SIGTERM or Ctrl-C, followed by all in-flight
    /// connections completing).
    pub async fn serve(self, router: Router) -> Result<(), Error> {
        self.serve_with_shutdown(router, shutdown_signal()).await
    }

    /// Like [`serve`](Server::serve), but stops accepting when `signal`
    /// resolves instead of on process signals.
    pub async fn serve_with_shutdown<F>(self, router: Router, signal: F) -> Result<(), Error>
    where
        F: Future<Output = ()>,
    {
        let listener = TcpListener::bind(self.addr.as_str())
            .await
            .map_err(|source| Error::Bind { addr: self.addr.clone(), source })?;

        let local = listener
            .local_addr()
            .map_or_else(|_| self.addr.clone(), |a| a.to_string());
        info!(addr = %local, routes = router.len(), "barehttp listening");

        let router = Arc::new(router);
        let buffer_size = self.buffer_size;

        // JoinSet tracks every spawned connection task so we can wait for
        // them all to finish during graceful shutdown.
        let mut tasks = tokio::task::JoinSet::new();

        tokio::pin!(signal);

        loop {
            tokio::select! {
                // Check shutdown first so a signal stops accepting at once,
                // even if more connections are queued.
                biased;

                () = &mut signal => {
                    info!(in_flight = tasks.len(), "shutdown signal received, draining connections");
                    break;
                }

                res = listener.accept() => {
                    let (stream, peer) = match res {
                        Ok(v) => v,
                        Err(e) => {
                            error!("{}", Error::Accept(e));
                            continue;
                        }
                    };
                    debug!(%peer, "connection accepted");

                    let router = Arc::clone(&router);
                    tasks.spawn(async move {
                        if let Err(e) = connection::serve_connection(stream, &router, buffer_size).await {
                            warn!(%peer, "connection dropped: {e}");
                        }
                    });
                }

                // Reap finished connection tasks so the JoinSet does not grow
                // without bound on long-running servers.
                Some(_) = tasks.join_next(), if !tasks.is_empty() => {}
            }
        }

        while tasks.join_next().await.is_some() {}

        info!("barehttp stopped");
        Ok(())
    }
}

/// Resolves on the first shutdown signal the process receives.
///
/// On Unix this listens for both **SIGTERM** and **SIGINT** (Ctrl-C). On
/// other platforms only Ctrl-C is available. A handler that cannot be
/// installed is logged and never fires.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("cannot listen for Ctrl-C: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let sigterm = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("cannot listen for SIGTERM: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let sigterm = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c  => {}
        () = sigterm => {}
    }
}
