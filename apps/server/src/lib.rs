//! # Keel Server
//!
//! HTTP entry point: validates the settings, bootstraps the enabled feature slices and
//! serves the API with graceful shutdown.
//!
//! ## Example
//! ```no_run
//! use keel::kernel::config::load_settings;
//! use keel_server::Server;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = load_settings(None::<&str>)?;
//!     Server::builder().settings(settings).build().await?.run().await
//! }
//! ```

mod router;

use anyhow::{Context, Result};
use axum::Router;
use axum_server::Handle;
use keel::domain::config::Settings;
use keel::kernel::config::validate;
use keel::kernel::server::ApiState;
use std::net::SocketAddr;
use std::time::Duration;
use tokio::signal;
use tracing::{error, info};

/// How long in-flight requests may take to finish after a shutdown signal.
const GRACEFUL_SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(30);

/// A fluent builder for configuring and initializing the [`Server`].
#[must_use = "builders do nothing unless you call .build()"]
#[derive(Debug, Default)]
pub struct ServerBuilder {
    settings: Settings,
}

impl ServerBuilder {
    /// Set up the server's configuration.
    pub fn settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    /// Consumes the builder and initializes the server.
    ///
    /// # Process
    /// 1. Refuses unsafe settings (debug mode in production)
    /// 2. Initializes the slices and services whose flags are on
    /// 3. Constructs application state
    ///
    /// # Errors
    /// Returns an error if the settings are unsafe or an enabled service cannot start
    /// (unknown storage type or OCR provider, missing bucket, unusable storage path).
    pub async fn build(self) -> Result<Server> {
        validate(&self.settings).context("Refusing to start")?;

        info!(
            app = %self.settings.app_name,
            version = %self.settings.app_version,
            environment = %self.settings.environment,
            "Initializing server"
        );

        let slices = keel::bootstrap(&self.settings).await.context("Platform bootstrap failed")?;

        let state = ApiState::builder()
            .settings(self.settings)
            .register_slices(slices)
            .build()
            .context("Failed to finalize API state registry")?;

        info!(slices = ?state.slice_names(), "Feature slices registered");
        Ok(Server { state })
    }
}

/// A fully initialized server instance ready to run.
#[must_use = "call .run().await to start the server"]
#[derive(Debug)]
pub struct Server {
    state: ApiState,
}

impl Server {
    /// Returns a new [`ServerBuilder`] to configure the server.
    pub fn builder() -> ServerBuilder {
        ServerBuilder::default()
    }

    /// The assembled application: prefixed API routes, docs outside production, CORS,
    /// request tracing and the JSON not-found fallback.
    #[must_use]
    pub fn router(&self) -> Router {
        router::init(self.state.clone())
    }

    /// Starts the server and runs until the shutdown signal is received.
    ///
    /// # Errors
    /// Returns an error if the host does not resolve or the server fails to bind.
    pub async fn run(self) -> Result<()> {
        let settings = self.state.settings.clone();
        let address = resolve_address(&settings.host, settings.port).await?;

        let app = self.router();

        let handle = Handle::<SocketAddr>::new();
        let shutdown_handle = handle.clone();

        tokio::spawn(async move {
            if let Err(e) = shutdown_signal().await {
                error!("Error while waiting for shutdown signal: {e}");
                return;
            }
            info!("Shutdown signal received, starting graceful shutdown...");
            shutdown_handle.graceful_shutdown(Some(GRACEFUL_SHUTDOWN_TIMEOUT));
        });

        info!("Starting HTTP server on http://{address}{}", settings.api_v1_prefix);

        let served = axum_server::bind(address)
            .handle(handle)
            .serve(app.into_make_service())
            .await
            .context("HTTP server failed");

        keel::shutdown(&self.state);
        served?;

        info!("Server shutdown complete");
        Ok(())
    }

    /// Returns a reference to the application state.
    #[must_use]
    pub const fn state(&self) -> &ApiState {
        &self.state
    }
}

/// Resolves `HOST` (an IP literal or a hostname) to the first socket address it maps to.
///
/// # Errors
/// Returns an error if the lookup fails or yields no address.
pub async fn resolve_address(host: &str, port: u16) -> Result<SocketAddr> {
    tokio::net::lookup_host((host, port))
        .await
        .with_context(|| format!("Failed to resolve host '{host}'"))?
        .next()
        .with_context(|| format!("Host '{host}' resolved to no address"))
}

/// Listens for shutdown signals (Ctrl+C, SIGTERM).
async fn shutdown_signal() -> Result<()> {
    let ctrl_c = async { signal::ctrl_c().await.context("Failed to install Ctrl+C handler") };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .context("Failed to install SIGTERM handler")?
            .recv()
            .await;
        Ok::<_, anyhow::Error>(())
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<Result<()>>();

    tokio::select! {
        res = ctrl_c => {
            res.context("Ctrl+C signal received")?;
        },
        res = terminate => {
            res.context("SIGTERM signal received")?;
        },
    }

    Ok(())
}
