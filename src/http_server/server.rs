//! # HTTP Server
//!
//! Main HTTP server combining all endpoint routers.
//!
//! Every `/api` router shares one [`Store`]. Unmatched GET requests fall
//! through to the browser client's static files and finally its entry page.

use std::future::Future;
use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use super::config::HttpServerConfig;
use super::donation_routes::donation_routes;
use super::observability_routes::health_routes;
use super::operations_routes::{operations_routes, query_routes};
use super::park_routes::park_routes;
use super::person_routes::person_routes;
use super::project_routes::project_routes;
use super::ranger_routes::ranger_routes;
use super::researcher_routes::researcher_routes;
use super::stats_routes::stats_routes;
use super::visitor_routes::visitor_routes;
use crate::observability::Event;
use crate::store::Store;

/// HTTP server for the NPS API
pub struct HttpServer {
    config: HttpServerConfig,
    router: Router,
}

impl HttpServer {
    /// Create a server over an opened store
    pub fn new(config: HttpServerConfig, store: Arc<Store>) -> Self {
        let router = build_router(&config, store);
        Self { config, router }
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Serve until `shutdown` resolves
    pub async fn start<F>(self, shutdown: F) -> io::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr: SocketAddr = self.config.socket_addr().parse().map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Invalid socket address '{}': {}", self.config.socket_addr(), e),
            )
        })?;

        let listener = TcpListener::bind(addr).await?;
        tracing::info!(
            event = %Event::Serving,
            addr = %addr,
            raw_query = self.config.raw_query_enabled,
            "National Park Service DB listening on http://{}",
            addr
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await
    }
}

/// Build the combined router with all endpoints
pub fn build_router(config: &HttpServerConfig, store: Arc<Store>) -> Router {
    let mut api = Router::new()
        .merge(stats_routes(store.clone()))
        .merge(person_routes(store.clone()))
        .merge(park_routes(store.clone()))
        .merge(visitor_routes(store.clone()))
        .merge(ranger_routes(store.clone()))
        .merge(researcher_routes(store.clone()))
        .merge(donation_routes(store.clone()))
        .merge(project_routes(store.clone()))
        .merge(operations_routes(store.clone()));
    if config.raw_query_enabled {
        api = api.merge(query_routes(store.clone()));
    }

    let client = ServeDir::new(&config.frontend_dir).fallback(ServeFile::new(config.index_file()));

    Router::new()
        .merge(health_routes(store))
        .nest("/api", api)
        .fallback_service(client)
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config.cors_origins))
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let origins: Vec<_> = origins.iter().filter_map(|s| s.parse().ok()).collect();
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}

/// Resolves on Ctrl-C
pub async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        return;
    }
    tracing::info!(event = %Event::ShutdownStart, "shutdown signal received");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::StoreOptions;

    fn store() -> Arc<Store> {
        Arc::new(Store::open_in_memory(&StoreOptions::unseeded()).unwrap())
    }

    #[test]
    fn test_server_with_custom_port() {
        let config = HttpServerConfig::with_port(8080);
        let server = HttpServer::new(config, store());
        assert_eq!(server.socket_addr(), "0.0.0.0:8080");
    }

    #[tokio::test]
    async fn test_server_router_answers_health() {
        use axum::body::Body;
        use axum::http::{Request, StatusCode};
        use tower::ServiceExt;

        let router = HttpServer::new(HttpServerConfig::default(), store()).router();
        let response = router
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn test_router_builds_without_raw_query() {
        let config = HttpServerConfig {
            raw_query_enabled: false,
            ..Default::default()
        };
        let _router = build_router(&config, store());
    }

    #[test]
    fn test_cors_origin_list() {
        let _layer = cors_layer(&["http://localhost:5173".to_string()]);
    }
}
