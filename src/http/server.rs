//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Build the API router from an `ApiBuilder`
//! - Serve the generated Swagger document when enabled
//! - Wire up middleware (tracing, limits, timeouts, request ID)
//! - Serve on a listener until shutdown

use std::sync::Arc;
use std::time::Duration;

use axum::{extract::DefaultBodyLimit, routing::get, Json, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    catch_panic::CatchPanicLayer, limit::RequestBodyLimitLayer, timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::WaypointConfig;
use crate::dispatch::BuildError;
use crate::docs::SwaggerDocument;
use crate::http::request::{propagate_request_id_layer, set_request_id_layer};
use crate::lifecycle::shutdown_signal;
use crate::routing::ApiBuilder;

/// HTTP server hosting one declared API.
pub struct HttpServer {
    router: Router,
    config: WaypointConfig,
    document: Option<Arc<SwaggerDocument>>,
}

impl HttpServer {
    /// Bind `api` and wrap it with the configured middleware.
    pub fn new(config: WaypointConfig, api: ApiBuilder) -> Result<Self, BuildError> {
        let (api, document) = if config.docs.enabled {
            let document = Arc::new(SwaggerDocument::new(
                config.docs.title.clone(),
                config.docs.version.clone(),
            ));
            (api.with_descriptor_sink(document.clone()), Some(document))
        } else {
            (api, None)
        };

        let mut router = api.build()?;
        if let Some(document) = &document {
            let document = Arc::clone(document);
            router = router.route(
                &config.docs.path,
                get(move || {
                    let document = Arc::clone(&document);
                    async move { Json(document.render()) }
                }),
            );
            tracing::info!(path = %config.docs.path, "API document enabled");
        }

        let router = Self::apply_layers(router, &config);
        Ok(Self {
            router,
            config,
            document,
        })
    }

    /// Wrap the router with all middleware layers.
    #[allow(deprecated)]
    fn apply_layers(router: Router, config: &WaypointConfig) -> Router {
        router
            .layer(DefaultBodyLimit::max(config.api.max_body_bytes))
            .layer(RequestBodyLimitLayer::new(config.api.max_body_bytes))
            .layer(CatchPanicLayer::new())
            .layer(TimeoutLayer::new(Duration::from_secs(config.timeouts.request_secs)))
            .layer(propagate_request_id_layer())
            .layer(TraceLayer::new_for_http())
            .layer(set_request_id_layer())
    }

    /// Run the server until Ctrl+C, SIGTERM or a shutdown broadcast.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                tokio::select! {
                    _ = shutdown_signal() => {}
                    _ = shutdown.recv() => tracing::info!("Shutdown requested"),
                }
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// The fully layered router.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// The Swagger document, when docs are enabled.
    pub fn document(&self) -> Option<&Arc<SwaggerDocument>> {
        self.document.as_ref()
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &WaypointConfig {
        &self.config
    }
}
