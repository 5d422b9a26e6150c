use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// A viewer starts watching a call
#[derive(Serialize, Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JoinSignal {
    pub call_id: String,
    pub peer_id: String,
}

/// A viewer stops watching a call
#[derive(Serialize, Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LeaveSignal {
    pub call_id: String,
    pub peer_id: String,
}

/// A broadcast has ended
#[derive(Serialize, Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EndSignal {
    pub call_id: String,
}

/// Acknowledgment for a processed signal
#[derive(Serialize, Deserialize, ToSchema)]
pub struct SignalAck {
    pub success: bool,
}

/// Query parameters for the viewers-watching endpoint
#[derive(Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ViewersQuery {
    pub call_id: Option<String>,
}

/// The viewers currently watching a call
#[derive(Serialize, Deserialize, Debug, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ViewersResponse {
    pub call_id: String,
    pub viewers: Vec<String>,
}
