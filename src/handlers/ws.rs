use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use futures_util::{SinkExt, StreamExt};
use tracing::info;

use crate::hub::Connection;
use crate::AppState;

/// WebSocket upgrade endpoint; every open client observes presence notices
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    info!("New WebSocket connection attempt");
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Handle one upgraded WebSocket session
async fn handle_socket(socket: WebSocket, state: AppState) {
    let (conn, mut outbound) = Connection::channel(state.config.send_queue_capacity);
    let conn_id = conn.id();
    info!("WebSocket connection established with connection_id: {}", conn_id);

    state.hub.register(conn).await;

    let (mut sender, mut receiver) = socket.split();

    // Outbound pump: drains the connection's queue in enqueue order and is
    // the sole writer of the transport. Exits when the hub evicts the
    // connection (sender dropped) or the peer is gone.
    let mut send_task = tokio::spawn(async move {
        while let Some(payload) = outbound.recv().await {
            if sender.send(Message::Text(payload)).await.is_err() {
                break;
            }
        }
    });

    // Inbound pump: reads frames only to detect closure. Errors and stream
    // end both fall out of the loop.
    let mut recv_task = tokio::spawn(async move {
        while let Some(Ok(msg)) = receiver.next().await {
            if let Message::Close(_) = msg {
                break;
            }
        }
    });

    // Wait for either pump to finish (and finish the other)
    tokio::select! {
        _ = (&mut send_task) => recv_task.abort(),
        _ = (&mut recv_task) => send_task.abort(),
    };

    // Single unregistration point; a no-op if the hub already evicted us
    state.hub.unregister(conn_id).await;
    info!("WebSocket connection {} terminated", conn_id);
}
