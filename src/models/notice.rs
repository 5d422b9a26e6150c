use chrono::Utc;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ViewerJoinedNotice {
    pub call_id: String,
    pub peer_id: String,
    pub date: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ViewerLeftNotice {
    pub call_id: String,
    pub peer_id: String,
    pub date: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct BroadcastEndedNotice {
    pub call_id: String,
    pub date: String,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct PresenceUpdatedNotice {
    pub call_id: String,
    pub viewers: Vec<String>,
    pub date: String,
}

/// A presence change fanned out to every connected client
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(tag = "type")]
pub enum Notice {
    #[serde(rename = "viewerJoined")]
    ViewerJoined(ViewerJoinedNotice),
    #[serde(rename = "viewerLeft")]
    ViewerLeft(ViewerLeftNotice),
    #[serde(rename = "broadcastEnded")]
    BroadcastEnded(BroadcastEndedNotice),
    #[serde(rename = "presenceUpdated")]
    PresenceUpdated(PresenceUpdatedNotice),
}

impl Notice {
    pub fn viewer_joined(call_id: &str, peer_id: &str) -> Self {
        Notice::ViewerJoined(ViewerJoinedNotice {
            call_id: call_id.to_string(),
            peer_id: peer_id.to_string(),
            date: Utc::now().to_rfc3339(),
        })
    }

    pub fn viewer_left(call_id: &str, peer_id: &str) -> Self {
        Notice::ViewerLeft(ViewerLeftNotice {
            call_id: call_id.to_string(),
            peer_id: peer_id.to_string(),
            date: Utc::now().to_rfc3339(),
        })
    }

    pub fn broadcast_ended(call_id: &str) -> Self {
        Notice::BroadcastEnded(BroadcastEndedNotice {
            call_id: call_id.to_string(),
            date: Utc::now().to_rfc3339(),
        })
    }

    pub fn presence_updated(call_id: &str, viewers: Vec<String>) -> Self {
        Notice::PresenceUpdated(PresenceUpdatedNotice {
            call_id: call_id.to_string(),
            viewers,
            date: Utc::now().to_rfc3339(),
        })
    }
}
