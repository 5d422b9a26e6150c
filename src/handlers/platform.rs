use axum::{http::StatusCode, Json};
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::error;
use uuid::Uuid;

use crate::clients::platform_client::{self, PlatformClient};
use crate::models::ErrorResponse;

fn client_or_unavailable() -> Result<Arc<PlatformClient>, (StatusCode, Json<ErrorResponse>)> {
    platform_client::get_platform_client().ok_or_else(|| {
        let status = StatusCode::SERVICE_UNAVAILABLE;
        (
            status,
            Json(ErrorResponse {
                code: status.as_u16(),
                status: status.to_string(),
                error: "Platform credentials not configured".to_string(),
            }),
        )
    })
}

fn relay_error(context: &str, e: reqwest::Error) -> (StatusCode, Json<ErrorResponse>) {
    error!("{}: {}", context, e);
    let status = StatusCode::BAD_GATEWAY;
    (
        status,
        Json(ErrorResponse {
            code: status.as_u16(),
            status: status.to_string(),
            error: format!("{}: {}", context, e),
        }),
    )
}

/// Create a stream key on the platform and return it with the generated
/// authKey and streamName merged into the response
pub async fn get_private_key(
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<ErrorResponse>)> {
    let client = client_or_unavailable()?;

    let auth_key = Uuid::new_v4().to_string();
    let stream_name = format!("stream_{}", &Uuid::new_v4().to_string()[..8]);

    let payload = json!({
        "authKey": auth_key,
        "streamName": stream_name,
        "authType": "private+program-states",
        "transcode": true,
        "deleteExisting": false,
        "allowAppDataOverride": true,
    });

    match client.create_stream(&payload).await {
        Ok(mut data) => {
            if let Some(obj) = data.as_object_mut() {
                obj.insert("authKey".to_string(), json!(auth_key));
                obj.insert("streamName".to_string(), json!(stream_name));
            }
            Ok((StatusCode::OK, Json(data)))
        }
        Err(e) => Err(relay_error("Error creating stream key", e)),
    }
}

/// Relay the platform's live stream list
pub async fn get_live_streams(
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<ErrorResponse>)> {
    let client = client_or_unavailable()?;

    match client.list_streams().await {
        Ok(data) => Ok((StatusCode::OK, Json(data))),
        Err(e) => Err(relay_error("Error fetching live streams", e)),
    }
}

/// Relay an access-token request to the auth backend.
/// The request body is only validated as JSON, matching the upstream API.
pub async fn get_auth_token(
    Json(_body): Json<Value>,
) -> Result<(StatusCode, Json<Value>), (StatusCode, Json<ErrorResponse>)> {
    let client = client_or_unavailable()?;

    match client.request_auth_token().await {
        Some(Ok(data)) => Ok((StatusCode::OK, Json(data))),
        Some(Err(e)) => Err(relay_error("Error requesting auth token", e)),
        None => {
            let status = StatusCode::SERVICE_UNAVAILABLE;
            Err((
                status,
                Json(ErrorResponse {
                    code: status.as_u16(),
                    status: status.to_string(),
                    error: "Backend endpoint not configured".to_string(),
                }),
            ))
        }
    }
}
