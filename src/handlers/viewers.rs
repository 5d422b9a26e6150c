use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use tracing::debug;

use crate::models::{ErrorResponse, ViewersQuery, ViewersResponse};
use crate::AppState;

/// List the viewers currently watching a call
pub async fn get_viewers_watching(
    State(state): State<AppState>,
    Query(params): Query<ViewersQuery>,
) -> Result<(StatusCode, Json<ViewersResponse>), (StatusCode, Json<ErrorResponse>)> {
    let call_id = match params.call_id {
        Some(id) if !id.is_empty() => id,
        _ => {
            let status = StatusCode::BAD_REQUEST;
            return Err((
                status,
                Json(ErrorResponse {
                    code: status.as_u16(),
                    status: status.to_string(),
                    error: "A valid callId is required as a query parameter.".to_string(),
                }),
            ));
        }
    };

    let viewers = state.presence.query(&call_id);
    debug!("Call '{}' has {} viewer(s)", call_id, viewers.len());
    Ok((StatusCode::OK, Json(ViewersResponse { call_id, viewers })))
}
