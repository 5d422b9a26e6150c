use crate::models::*;
use utoipa::OpenApi;

/// Health check endpoint
#[utoipa::path(
    get,
    path = "/api/health",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse)
    )
)]
#[allow(dead_code)]
pub async fn health_check_doc() {}

/// Record a viewer joining a call
#[utoipa::path(
    post,
    path = "/api/calls/join",
    request_body = JoinSignal,
    responses(
        (status = 200, description = "Join recorded", body = SignalAck),
        (status = 400, description = "Missing callId or peerId", body = ErrorResponse)
    )
)]
#[allow(dead_code)]
pub async fn join_call_doc() {}

/// Record a viewer leaving a call
#[utoipa::path(
    post,
    path = "/api/calls/leave",
    request_body = LeaveSignal,
    responses(
        (status = 200, description = "Leave recorded", body = SignalAck),
        (status = 404, description = "Call not found", body = ErrorResponse)
    )
)]
#[allow(dead_code)]
pub async fn leave_call_doc() {}

/// End a broadcast and drop its viewer set
#[utoipa::path(
    post,
    path = "/api/calls/end",
    request_body = EndSignal,
    responses(
        (status = 200, description = "Broadcast ended", body = SignalAck),
        (status = 404, description = "Call not found", body = ErrorResponse)
    )
)]
#[allow(dead_code)]
pub async fn end_broadcast_doc() {}

/// List the viewers currently watching a call
#[utoipa::path(
    get,
    path = "/api/viewers-watching",
    params(ViewersQuery),
    responses(
        (status = 200, description = "Current viewers", body = ViewersResponse),
        (status = 400, description = "Missing callId", body = ErrorResponse)
    )
)]
#[allow(dead_code)]
pub async fn viewers_watching_doc() {}

/// Streaming platform webhook
#[utoipa::path(
    post,
    path = "/api/webhook",
    request_body = WebhookRequest,
    responses(
        (status = 200, description = "Webhook processed", body = WebhookResponse)
    )
)]
#[allow(dead_code)]
pub async fn webhook_doc() {}

#[derive(OpenApi)]
#[openapi(
    paths(
        health_check_doc,
        join_call_doc,
        leave_call_doc,
        end_broadcast_doc,
        viewers_watching_doc,
        webhook_doc,
    ),
    components(
        schemas(
            HealthResponse,
            SignalAck,
            JoinSignal,
            LeaveSignal,
            EndSignal,
            ViewersResponse,
            ErrorResponse,
            WebhookRequest,
            Program,
            StreamEntry,
            Token,
            WebhookResponse,
            ProgramResponse,
            StreamResponse,
            ViewTokenResponse,
        )
    ),
    tags(
        (name = "api", description = "Signaling and presence endpoints")
    )
)]
pub struct ApiDoc;
