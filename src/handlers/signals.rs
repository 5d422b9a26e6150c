use axum::{extract::State, http::StatusCode, Json};
use tracing::{error, info};

use crate::models::{EndSignal, ErrorResponse, JoinSignal, LeaveSignal, Notice, SignalAck};
use crate::AppState;

/// Record a viewer joining a call and notify connected clients
pub async fn join_call(
    State(state): State<AppState>,
    Json(signal): Json<JoinSignal>,
) -> Result<(StatusCode, Json<SignalAck>), (StatusCode, Json<ErrorResponse>)> {
    if signal.call_id.is_empty() || signal.peer_id.is_empty() {
        let status = StatusCode::BAD_REQUEST;
        return Err((
            status,
            Json(ErrorResponse {
                code: status.as_u16(),
                status: status.to_string(),
                error: "callId and peerId are required".to_string(),
            }),
        ));
    }

    if state.presence.join(&signal.call_id, &signal.peer_id) {
        info!("Viewer '{}' joined call '{}'", signal.peer_id, signal.call_id);
        state
            .hub
            .broadcast_notice(&Notice::viewer_joined(&signal.call_id, &signal.peer_id))
            .await;
    }

    Ok((StatusCode::OK, Json(SignalAck { success: true })))
}

/// Record a viewer leaving a call and notify connected clients
pub async fn leave_call(
    State(state): State<AppState>,
    Json(signal): Json<LeaveSignal>,
) -> Result<(StatusCode, Json<SignalAck>), (StatusCode, Json<ErrorResponse>)> {
    match state.presence.leave(&signal.call_id, &signal.peer_id) {
        Ok(removed) => {
            if removed {
                info!("Viewer '{}' left call '{}'", signal.peer_id, signal.call_id);
                state
                    .hub
                    .broadcast_notice(&Notice::viewer_left(&signal.call_id, &signal.peer_id))
                    .await;
            }
            Ok((StatusCode::OK, Json(SignalAck { success: true })))
        }
        Err(e) => {
            error!("Leave signal for unknown call '{}'", signal.call_id);
            let status = StatusCode::NOT_FOUND;
            Err((
                status,
                Json(ErrorResponse {
                    code: status.as_u16(),
                    status: status.to_string(),
                    error: e.to_string(),
                }),
            ))
        }
    }
}

/// Drop a call's viewer set entirely and notify connected clients
pub async fn end_broadcast(
    State(state): State<AppState>,
    Json(signal): Json<EndSignal>,
) -> Result<(StatusCode, Json<SignalAck>), (StatusCode, Json<ErrorResponse>)> {
    match state.presence.end(&signal.call_id) {
        Ok(()) => {
            info!("Broadcast ended for call '{}'", signal.call_id);
            state
                .hub
                .broadcast_notice(&Notice::broadcast_ended(&signal.call_id))
                .await;
            Ok((StatusCode::OK, Json(SignalAck { success: true })))
        }
        Err(e) => {
            error!("End signal for unknown call '{}'", signal.call_id);
            let status = StatusCode::NOT_FOUND;
            Err((
                status,
                Json(ErrorResponse {
                    code: status.as_u16(),
                    status: status.to_string(),
                    error: e.to_string(),
                }),
            ))
        }
    }
}
