//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the catch-all edge handler
//! - Wire up middleware (tracing, timeout, request ID)
//! - Dispatch requests to the hostname router
//! - Forward rewritten requests to the asset store
//! - Swap the asset store on configuration reload
//! - Serve plain HTTP or TLS with graceful shutdown

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};

use arc_swap::ArcSwap;
use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use axum_server::tls_rustls::RustlsConfig;
use tokio::net::TcpListener;
use tokio::sync::{broadcast, mpsc};
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::assets::{AssetError, AssetStore};
use crate::config::{EdgeConfig, SecurityConfig};
use crate::http::request::{
    ensure_host_header, propagate_request_id_layer, request_id, rewrite_uri, route_request,
    set_request_id_layer,
};
use crate::http::response::{apply_asset_headers, is_internal_redirect};
use crate::observability::metrics;
use crate::routing::{HostnameRouter, Site};

/// How long in-flight TLS connections may drain after shutdown.
const TLS_DRAIN_SECS: u64 = 10;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub router: Arc<HostnameRouter>,
    pub assets: Arc<ArcSwap<AssetStore>>,
    pub security: SecurityConfig,
}

/// HTTP server fronting the static asset store.
pub struct HttpServer {
    router: Router,
    config: EdgeConfig,
    assets: Arc<ArcSwap<AssetStore>>,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: EdgeConfig) -> Result<Self, AssetError> {
        let store = AssetStore::from_config(&config.assets)?;
        tracing::info!(store = %store.describe(), "Asset store ready");
        let assets = Arc::new(ArcSwap::from_pointee(store));

        let state = AppState {
            router: Arc::new(HostnameRouter::new()),
            assets: assets.clone(),
            security: config.security.clone(),
        };

        let router = Self::build_router(&config, state);
        Ok(Self {
            router,
            config,
            assets,
        })
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &EdgeConfig, state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(edge_handler))
            .route("/", any(edge_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(propagate_request_id_layer())
            .layer(TraceLayer::new_for_http())
            .layer(set_request_id_layer())
    }

    /// The Axum application, for in-process use.
    pub fn app(&self) -> Router {
        self.router.clone()
    }

    /// Shared handle to the active asset store.
    pub fn assets(&self) -> Arc<ArcSwap<AssetStore>> {
        self.assets.clone()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &EdgeConfig {
        &self.config
    }

    /// Serve plain HTTP on the given listener until shutdown is signalled.
    pub async fn run(
        self,
        listener: TcpListener,
        config_updates: mpsc::UnboundedReceiver<EdgeConfig>,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        let reload = tokio::spawn(apply_config_updates(self.assets.clone(), config_updates));

        let result = axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await;

        reload.abort();
        tracing::info!("HTTP server stopped");
        result
    }

    /// Serve HTTPS on the configured bind address until shutdown is signalled.
    pub async fn run_tls(
        self,
        tls: RustlsConfig,
        config_updates: mpsc::UnboundedReceiver<EdgeConfig>,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr: SocketAddr = self
            .config
            .listener
            .bind_address
            .parse()
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidInput, e))?;
        tracing::info!(address = %addr, "HTTPS server starting");

        let reload = tokio::spawn(apply_config_updates(self.assets.clone(), config_updates));

        let handle = axum_server::Handle::new();
        let drain = handle.clone();
        tokio::spawn(async move {
            let _ = shutdown.recv().await;
            tracing::info!("Shutdown signal received");
            drain.graceful_shutdown(Some(Duration::from_secs(TLS_DRAIN_SECS)));
        });

        let result = axum_server::bind_rustls(addr, tls)
            .handle(handle)
            .serve(self.router.into_make_service())
            .await;

        reload.abort();
        tracing::info!("HTTPS server stopped");
        result
    }
}

/// Swap the asset store whenever a new configuration arrives.
///
/// Listener, timeout and header settings only change on restart.
async fn apply_config_updates(
    assets: Arc<ArcSwap<AssetStore>>,
    mut updates: mpsc::UnboundedReceiver<EdgeConfig>,
) {
    while let Some(config) = updates.recv().await {
        match AssetStore::from_config(&config.assets) {
            Ok(store) => {
                tracing::info!(store = %store.describe(), "Asset store reloaded");
                assets.store(Arc::new(store));
            }
            Err(e) => {
                tracing::error!(error = %e, "Rejected asset store update, keeping current store");
            }
        }
    }
}

/// Main edge handler.
/// Routes by hostname, rewrites the URI and fetches from the asset store.
async fn edge_handler(State(state): State<AppState>, mut request: Request<Body>) -> Response {
    let start_time = Instant::now();
    let request_id = request_id(&request).to_string();

    let decision = state.router.route_request(&route_request(&request));

    let uri = match rewrite_uri(request.uri(), &decision.target_path) {
        Ok(uri) => uri,
        Err(e) => {
            tracing::warn!(
                request_id = %request_id,
                target = %decision.target_path,
                error = %e,
                "Rewritten path is not a valid URI"
            );
            metrics::record_request(decision.site, 400, start_time);
            return (StatusCode::BAD_REQUEST, "Invalid request path").into_response();
        }
    };

    tracing::debug!(
        request_id = %request_id,
        method = %request.method(),
        site = %decision.site,
        from = %request.uri(),
        to = %uri,
        "Serving rewritten request"
    );

    ensure_host_header(&mut request);
    let (mut parts, body) = request.into_parts();
    parts.uri = uri;

    let store = state.assets.load_full();
    let mut response = match store.fetch(Request::from_parts(parts, body)).await {
        Ok(response) => response,
        Err(e) => {
            tracing::error!(request_id = %request_id, error = %e, "Asset fetch failed");
            let status = e.status();
            metrics::record_request(decision.site, status.as_u16(), start_time);
            return (status, "Asset store unavailable").into_response();
        }
    };

    // Subdomain targets are internal paths; never send the client there.
    if decision.site != Site::Main && is_internal_redirect(&response) {
        tracing::debug!(
            request_id = %request_id,
            target = %decision.target_path,
            "Asset store redirected within a site subtree, answering 404"
        );
        response = StatusCode::NOT_FOUND.into_response();
    }

    if state.security.enable_headers {
        apply_asset_headers(&decision.target_path, &mut response);
    }

    metrics::record_request(decision.site, response.status().as_u16(), start_time);
    response
}
