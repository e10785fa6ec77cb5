//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the diagnostic handlers
//! - Register the begin-request module before any handler runs
//! - Wire up middleware (tracing, timeout)
//! - Bind server to listener with peer address info

use std::net::SocketAddr;
use std::time::Duration;

use axum::{extract::State, routing::get, Json, Router};
use tokio::net::TcpListener;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::{HeaderKeys, NlbConfig};
use crate::context::{RequestContext, ServerVariables};
use crate::module::NlbCompatModule;

/// Path of the server variable dump.
pub const VARIABLES_PATH: &str = "/_nlb/vars";

/// HTTP server hosting the NLB compatibility module.
pub struct HttpServer {
    router: Router,
    config: NlbConfig,
    module: NlbCompatModule,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: NlbConfig) -> Self {
        let module = NlbCompatModule::new(config.headers.clone());
        let router = Self::build_router(&config, &module);
        Self {
            router,
            config,
            module,
        }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &NlbConfig, module: &NlbCompatModule) -> Router {
        let app = Router::new()
            .route(VARIABLES_PATH, get(variables_handler))
            .fallback(client_handler)
            .with_state(config.headers.clone());

        module
            .init(app, config.listener.default_port)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(TraceLayer::new_for_http())
    }

    /// The fully layered router, e.g. for driving with `tower::ServiceExt`.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &NlbConfig {
        &self.config
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(self, listener: TcpListener) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            "HTTP server starting"
        );

        let app = self.router.into_make_service_with_connect_info::<SocketAddr>();

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        self.module.dispose();
        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Dump the normalized server variables as JSON.
async fn variables_handler(vars: ServerVariables) -> Json<ServerVariables> {
    Json(vars)
}

/// Describe the client as the application sees it.
async fn client_handler(State(keys): State<HeaderKeys>, ctx: RequestContext) -> String {
    let vars = ctx.server_variables();
    let field = |name: &str| vars.get(name).unwrap_or_else(|| "-".to_string());

    format!(
        "remote_addr={} https={} port={}\n",
        field(&keys.remote_addr),
        field(&keys.https),
        field(&keys.server_port),
    )
}

/// Wait for shutdown signal (Ctrl+C).
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
