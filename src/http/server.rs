//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (timeout, upload limit, request ID, tracing, CORS)
//! - Resolve configured upstreams into ready-to-call entries
//! - Bind server to listener and drain gracefully on shutdown

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use axum::http::{header, HeaderValue, Method};
use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::schema::CorsConfig;
use crate::config::GatewayConfig;
use crate::http::handlers;
use crate::http::request::{propagate_request_id_layer, set_request_id_layer};
use crate::observability::metrics;
use crate::relay::{CallObserver, TracingObserver};
use crate::resilience::RetryPolicy;

/// One configured model endpoint, resolved at boot. Keyed by model name
/// in [`AppState::upstreams`].
pub struct Upstream {
    pub url: String,
    pub policy: RetryPolicy,
    pub observer: Arc<dyn CallObserver>,
}

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub upstreams: Arc<HashMap<String, Upstream>>,
    pub client: reqwest::Client,
}

/// HTTP server for the inference gateway.
pub struct HttpServer {
    router: Router,
    config: GatewayConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: GatewayConfig) -> Self {
        let mut upstreams = HashMap::new();
        for upstream in &config.upstreams {
            let policy = upstream
                .retry
                .clone()
                .unwrap_or_else(|| config.retries.clone());

            tracing::debug!(
                model = %upstream.name,
                url = %upstream.url,
                max_attempts = policy.max_attempts,
                "Registering upstream"
            );

            upstreams.insert(
                upstream.name.clone(),
                Upstream {
                    url: upstream.url.clone(),
                    policy,
                    observer: Arc::new(ObservedCall::new(upstream.name.clone())),
                },
            );
        }

        let state = AppState {
            upstreams: Arc::new(upstreams),
            client: reqwest::Client::new(),
        };

        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &GatewayConfig, state: AppState) -> Router {
        Router::new()
            .route("/", get(handlers::root))
            .route("/health", get(handlers::health))
            .route("/api/{model}/predict", post(handlers::predict))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(RequestBodyLimitLayer::new(config.limits.max_upload_bytes))
            .layer(set_request_id_layer())
            .layer(propagate_request_id_layer())
            .layer(TraceLayer::new_for_http())
            .layer(cors_layer(&config.cors))
    }

    /// Run the server, accepting connections on the given listener until
    /// the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }
}

/// Production relay observer: tracing events plus attempt metrics,
/// labeled with the model name.
struct ObservedCall {
    model: String,
    log: TracingObserver,
}

impl ObservedCall {
    fn new(model: String) -> Self {
        Self {
            model,
            log: TracingObserver,
        }
    }
}

impl CallObserver for ObservedCall {
    fn attempt_started(&self, url: &str, attempt: u32, max_attempts: u32) {
        self.log.attempt_started(url, attempt, max_attempts);
        metrics::record_attempt(&self.model, "started");
    }

    fn attempt_failed(&self, url: &str, attempt: u32, reason: &str) {
        self.log.attempt_failed(url, attempt, reason);
        metrics::record_attempt(&self.model, "failed");
    }

    fn backoff_scheduled(&self, url: &str, attempt: u32, delay: Duration) {
        self.log.backoff_scheduled(url, attempt, delay);
    }

    fn call_succeeded(&self, url: &str, attempts: u32) {
        self.log.call_succeeded(url, attempts);
        metrics::record_attempt(&self.model, "succeeded");
    }

    fn call_failed(&self, url: &str, attempts: u32, reason: &str) {
        self.log.call_failed(url, attempts, reason);
        metrics::record_attempt(&self.model, "exhausted");
    }
}

/// One explicit allow-list; requests from other origins get no CORS
/// headers and fail in the browser.
fn cors_layer(cors: &CorsConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = cors
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Skipping unparseable CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true)
}
