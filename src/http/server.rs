//! HTTP server startup logic.
//!
//! Binds the configured address and serves the router until a shutdown
//! signal arrives. A failed bind is reported as [`ServerError::Bind`] so the
//! process exits non-zero.
//!
//! The default host `::` gives a dual-stack listener on hosts where the
//! kernel allows it. When IPv6 is unavailable, [`listen`] falls back to
//! `0.0.0.0` on the same port.

use std::io::ErrorKind;
use std::net::{Ipv4Addr, SocketAddr};

use axum::Router;
use tokio::net::TcpListener;

use crate::config::AppConfig;

use super::shutdown;

/// Server startup error
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    #[error("Failed to bind server to {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid listen address: {0}")]
    Address(#[from] crate::config::ConfigError),

    #[error("Server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// Bind a listener on `addr`.
pub async fn bind(addr: SocketAddr) -> Result<TcpListener, ServerError> {
    TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })
}

/// Bind a listener on `addr`, retrying on `0.0.0.0` when `addr` is the IPv6
/// wildcard and the host cannot open IPv6 sockets.
pub async fn listen(addr: SocketAddr) -> Result<TcpListener, ServerError> {
    match bind(addr).await {
        Err(ServerError::Bind { source, .. }) if needs_ipv4_fallback(addr, &source) => {
            let fallback = SocketAddr::new(Ipv4Addr::UNSPECIFIED.into(), addr.port());
            tracing::warn!(
                %addr,
                %fallback,
                error = %source,
                "IPv6 wildcard unavailable, listening on IPv4 only"
            );
            bind(fallback).await
        }
        result => result,
    }
}

fn needs_ipv4_fallback(addr: SocketAddr, err: &std::io::Error) -> bool {
    addr.is_ipv6()
        && addr.ip().is_unspecified()
        && !matches!(err.kind(), ErrorKind::AddrInUse | ErrorKind::PermissionDenied)
}

/// Start the HTTP server based on configuration.
///
/// This function blocks until the server shuts down.
pub async fn start_server(app: Router, config: &AppConfig) -> Result<(), ServerError> {
    let addr = config.http.socket_addr()?;
    let listener = listen(addr).await?;
    serve(listener, app, shutdown::shutdown_signal()).await
}

/// Serve `app` on an already-bound listener until `shutdown` resolves.
///
/// In-flight requests, including ones sitting in the slow branch, are
/// drained before this returns.
pub async fn serve<F>(listener: TcpListener, app: Router, shutdown: F) -> Result<(), ServerError>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr().map_err(ServerError::Serve)?;
    tracing::info!(%addr, "Starting HTTP server");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(ServerError::Serve)?;

    tracing::info!("HTTP server stopped");
    Ok(())
}
