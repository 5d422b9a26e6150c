use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use utoipa::ToSchema;

/// Webhook payload pushed by the streaming platform
#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct WebhookRequest {
    #[serde(default)]
    pub programs: HashMap<String, Program>,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct Program {
    #[serde(default)]
    pub streams: HashMap<String, StreamEntry>,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StreamEntry {
    pub token: Token,
    #[serde(default)]
    pub view_tokens: Vec<Token>,
}

#[derive(Serialize, Deserialize, Debug, Clone, ToSchema)]
pub struct Token {
    #[serde(default)]
    pub value: String,
    #[serde(rename = "type", default)]
    pub token_type: String,
    #[serde(default)]
    pub action: String,
}

/// Webhook response mirroring the request shape
#[derive(Serialize, Deserialize, Debug, ToSchema)]
pub struct WebhookResponse {
    pub programs: HashMap<String, ProgramResponse>,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProgramResponse {
    pub stop: bool,
    pub need_auth: bool,
    pub streams: HashMap<String, StreamResponse>,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StreamResponse {
    pub stop: bool,
    pub need_auth: bool,
    pub token: String,
    pub app_data: HashMap<String, String>,
    pub view_tokens: HashMap<String, ViewTokenResponse>,
}

#[derive(Serialize, Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ViewTokenResponse {
    pub stop: bool,
    pub app_data: HashMap<String, String>,
}
