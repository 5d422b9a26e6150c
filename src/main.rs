mod clients;
mod config;
mod docs;
mod handlers;
mod hub;
mod models;
mod presence;
mod routes;
mod tokens;

use axum::http::HeaderValue;
use axum::Router;
use config::Config;
use docs::ApiDoc;
use hub::{BroadcastHub, HubHandle};
use presence::PresenceTracker;
use routes::create_api_routes;
use std::panic;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Shared state handed to every request handler
#[derive(Clone)]
pub struct AppState {
    pub hub: HubHandle,
    pub presence: Arc<PresenceTracker>,
    pub config: Arc<Config>,
}

fn cors_layer(config: &Config) -> CorsLayer {
    match &config.cors_origins {
        Some(origins) => {
            let parsed: Vec<HeaderValue> = origins
                .split(',')
                .filter_map(|origin| origin.trim().parse().ok())
                .collect();
            CorsLayer::new()
                .allow_origin(parsed)
                .allow_methods(Any)
                .allow_headers(Any)
        }
        None => CorsLayer::permissive(),
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Set panic hook for better error messages
    panic::set_hook(Box::new(|info| {
        eprintln!("PANIC: {info}");
    }));

    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            // Default to info level, but allow debug for our app
            "livecast_signal=debug,tower_http=debug,axum::rejection=trace,info".into()
        }))
        .init();

    info!("Starting server...");

    // Load configuration
    let config = Config::load().unwrap_or_else(|e| {
        error!("Failed to load configuration: {}", e);
        warn!("Using default configuration");
        Config::default()
    });
    let config = Arc::new(config);

    // Initialize the platform relay client if credentials are configured
    if config.has_platform_credentials() {
        let project_id = config.project_id.clone().unwrap_or_default();
        let token = config.platform_token.clone().unwrap_or_default();
        match clients::platform_client::init_platform_client(
            project_id,
            token,
            config.backend_endpoint.clone(),
        ) {
            Ok(_) => info!("Platform client initialized"),
            Err(e) => error!("Failed to initialize platform client: {}", e),
        }
    } else {
        warn!("Platform credentials not configured - relay endpoints will be unavailable");
    }

    // Start the broadcast hub loop
    let (broadcast_hub, hub) = BroadcastHub::new(config.hub_queue_capacity);
    tokio::spawn(broadcast_hub.run());

    let state = AppState {
        hub,
        presence: Arc::new(PresenceTracker::new()),
        config: config.clone(),
    };

    // Create API routes
    let api_routes = create_api_routes(state);

    // Combine all routes
    let app_routes = Router::new()
        // Mount API routes
        .nest("/api", api_routes)
        // Mount Swagger UI
        .merge(SwaggerUi::new("/swagger").url("/api-docs/openapi.json", ApiDoc::openapi()))
        // Add tracing and CORS layers
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(&config));

    // Start the server
    let listener = tokio::net::TcpListener::bind(config.server_address())
        .await
        .unwrap_or_else(|_| panic!("Failed to bind to {}", config.server_address()));

    info!("🚀 Server running on http://{}", config.server_address());
    info!("📡 WebSocket available at ws://{}/api/ws", config.server_address());
    info!("📚 Swagger UI available at http://{}/swagger", config.server_address());

    axum::serve(listener, app_routes)
        .await
        .expect("Server failed to start");
}
