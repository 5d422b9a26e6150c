use axum::{extract::State, http::StatusCode, Json};
use std::collections::HashMap;
use tracing::{debug, info};

use crate::models::{
    Notice, ProgramResponse, StreamResponse, ViewTokenResponse, WebhookRequest, WebhookResponse,
};
use crate::presence::tracker::UNKNOWN_VIEWER;
use crate::presence::PresenceTracker;
use crate::tokens;
use crate::AppState;

/// Streaming platform webhook.
///
/// Echoes tokens back per stream, attaches user data where the action asks
/// for it, and on a "polling" action reconciles the stream's tracked viewer
/// set from the current batch of view tokens.
pub async fn handle_webhook(
    State(state): State<AppState>,
    Json(request): Json<WebhookRequest>,
) -> (StatusCode, Json<WebhookResponse>) {
    info!(
        "Received webhook payload with {} program(s)",
        request.programs.len()
    );

    let (response, updates) = process_webhook(&state.presence, &request);

    for (call_id, viewers) in updates {
        state
            .hub
            .broadcast_notice(&Notice::presence_updated(&call_id, viewers))
            .await;
    }

    (StatusCode::OK, Json(response))
}

/// Walk the webhook payload, building the mirrored response and applying
/// polling reconciliation. Returns the response together with the calls
/// whose observable viewer set changed (for fan-out by the caller).
pub fn process_webhook(
    presence: &PresenceTracker,
    request: &WebhookRequest,
) -> (WebhookResponse, Vec<(String, Vec<String>)>) {
    let mut updates: Vec<(String, Vec<String>)> = Vec::new();
    let mut programs = HashMap::new();

    for (program_id, program) in &request.programs {
        let mut streams = HashMap::new();

        for (stream_id, stream) in &program.streams {
            let mut stream_response = StreamResponse {
                stop: false,
                need_auth: true,
                token: tokens::validate_token(&stream.token),
                app_data: HashMap::new(),
                view_tokens: HashMap::new(),
            };

            match stream.token.action.as_str() {
                // Value is the username
                "creating" => {
                    stream_response.app_data = tokens::resolve_user_data(&stream.token);
                }
                "polling" => {
                    let mut viewers: Vec<String> = Vec::new();
                    for view_token in &stream.view_tokens {
                        let app_data = tokens::resolve_user_data(view_token);
                        let viewer_id = app_data
                            .get("user.id")
                            .cloned()
                            .unwrap_or_else(|| UNKNOWN_VIEWER.to_string());
                        stream_response.view_tokens.insert(
                            view_token.value.clone(),
                            ViewTokenResponse {
                                stop: false,
                                app_data,
                            },
                        );
                        if viewer_id != UNKNOWN_VIEWER && !viewers.contains(&viewer_id) {
                            viewers.push(viewer_id);
                        }
                    }

                    debug!(
                        "Polling reconciliation for stream '{}': {} viewer(s)",
                        stream_id,
                        viewers.len()
                    );
                    if presence.reconcile(stream_id, &viewers) {
                        updates.push((stream_id.clone(), viewers));
                    }
                }
                // "joining" and anything else: echo only
                _ => {}
            }

            streams.insert(stream_id.clone(), stream_response);
        }

        programs.insert(
            program_id.clone(),
            ProgramResponse {
                stop: false,
                need_auth: true,
                streams,
            },
        );
    }

    (WebhookResponse { programs }, updates)
}
