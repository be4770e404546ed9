//! HTTP transport shell
//!
//! Routes requests to the gateway pipeline. The shell owns no logic beyond
//! method+path routing and moving blocking loader work off the async
//! worker; everything else lives in the api modules.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::api::{
    self, ErrorBody, GatewayError, HealthResponse, LoadRequest, LoadResponse, LoadersResponse,
};
use crate::config::GatewayConfig;
use crate::registry::Registry;

/// HTTP server for the loader gateway.
pub struct GatewayServer {
    config: GatewayConfig,
    registry: Arc<Registry>,
}

impl GatewayServer {
    pub fn new(config: GatewayConfig, registry: Arc<Registry>) -> Self {
        Self { config, registry }
    }

    /// Build the router (also the seam used by HTTP-level tests).
    pub fn router(&self) -> Router {
        router(self.registry.clone(), self.config.quiet)
    }

    /// Bind and serve until the process is stopped.
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr: SocketAddr = self.config.socket_addr().parse().map_err(|e| {
            std::io::Error::new(std::io::ErrorKind::InvalidInput, format!("bind address: {e}"))
        })?;

        let router = self.router();

        tracing::info!(%addr, loaders = self.registry.len(), "starting nflgate");
        tracing::info!("endpoints: GET /health, GET /loaders, POST /load");

        let listener = TcpListener::bind(addr).await?;
        axum::serve(listener, router).await
    }
}

/// Build the gateway router over a shared registry.
///
/// `quiet` drops the per-request access log layer. Unknown paths and
/// known paths with the wrong method both produce the 404 error body.
pub fn router(registry: Arc<Registry>, quiet: bool) -> Router {
    let router = Router::new()
        .route("/health", get(health_handler).fallback(not_found_handler))
        .route("/loaders", get(loaders_handler).fallback(not_found_handler))
        .route("/load", post(load_handler).fallback(not_found_handler))
        .fallback(not_found_handler)
        .with_state(registry)
        .layer(CorsLayer::permissive());

    if quiet {
        router
    } else {
        router.layer(TraceLayer::new_for_http())
    }
}

async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}

async fn loaders_handler(State(registry): State<Arc<Registry>>) -> Json<LoadersResponse> {
    Json(LoadersResponse {
        loaders: registry.descriptors().to_vec(),
    })
}

/// The full pipeline for one invocation: validate, dispatch, normalize.
///
/// Loader invocation is synchronous and blocking, so it runs on the
/// blocking pool; the connection's task waits for it. A panic inside the
/// loader surfaces as a join error and is reported as a loader failure.
async fn load_handler(
    State(registry): State<Arc<Registry>>,
    body: Bytes,
) -> Result<Json<LoadResponse>, GatewayError> {
    let request = LoadRequest::parse(&body)?;
    let loader = request.loader.clone();

    let result = tokio::task::spawn_blocking(move || {
        let dispatched = api::execute(&registry, &request)?;
        api::normalize(dispatched.output, dispatched.limit)
    })
    .await
    .map_err(|join_err| GatewayError::LoaderFailed {
        detail: format!("loader task aborted: {join_err}"),
    })??;

    Ok(Json(LoadResponse {
        loader,
        row_count: result.row_count,
        data: result.rows,
    }))
}

async fn not_found_handler() -> Response {
    (StatusCode::NOT_FOUND, Json(ErrorBody::message("Not found"))).into_response()
}
