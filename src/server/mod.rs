//! HTTP front end: `POST /verify-domain`.
//!
//! [`router`] builds the axum application around any [`DnsLookup`]
//! implementation, [`serve`] binds it on the configured address and runs it
//! until Ctrl-C or SIGTERM.

mod handler;
mod response;

use std::{io, net::SocketAddr, sync::Arc};

use axum::{Router, routing::any};
use thiserror::Error;
use tokio::net::TcpListener;
use tracing::info;

use crate::{config::ServerConfig, verify::DnsLookup};

pub const VERIFY_PATH: &str = "/verify-domain";

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },
    #[error("server error: {source}")]
    Serve {
        #[source]
        source: io::Error,
    },
}

pub(crate) struct AppState<R> {
    resolver: Arc<R>,
}

impl<R> AppState<R> {
    fn new(resolver: R) -> Self {
        Self {
            resolver: Arc::new(resolver),
        }
    }

    pub(crate) fn resolver(&self) -> &R {
        &self.resolver
    }
}

impl<R> Clone for AppState<R> {
    fn clone(&self) -> Self {
        Self {
            resolver: Arc::clone(&self.resolver),
        }
    }
}

/// The application. Every method is routed to the handler so that non-POST
/// requests get a 405 carrying the CORS headers.
pub fn router<R>(resolver: R) -> Router
where
    R: DnsLookup + 'static,
{
    Router::new()
        .route(VERIFY_PATH, any(handler::verify_domain::<R>))
        .with_state(AppState::new(resolver))
}

pub async fn serve<R>(config: &ServerConfig, resolver: R) -> Result<(), ServerError>
where
    R: DnsLookup + 'static,
{
    let addr = config.socket_addr();
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;
    let local = listener.local_addr().unwrap_or(addr);
    info!("listening on http://{local}{VERIFY_PATH}");

    axum::serve(listener, router(resolver))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|source| ServerError::Serve { source })?;

    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %err, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    info!("shutdown signal received");
}
