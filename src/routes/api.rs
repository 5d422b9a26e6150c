use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{
    end_broadcast, get_auth_token, get_live_streams, get_private_key, get_viewers_watching,
    handle_webhook, health_check, join_call, leave_call, ws_handler,
};
use crate::AppState;

/// Create API routes
pub fn create_api_routes(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/ws", get(ws_handler))
        .route("/webhook", post(handle_webhook))
        .route("/calls/join", post(join_call))
        .route("/calls/leave", post(leave_call))
        .route("/calls/end", post(end_broadcast))
        .route("/viewers-watching", get(get_viewers_watching))
        // Relay endpoints used by the client application
        .route("/private-key", get(get_private_key))
        .route("/live-streams", get(get_live_streams))
        .route("/auth-token", post(get_auth_token))
        .with_state(state)
}
