use std::collections::HashMap;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use super::connection::{ConnId, Connection, SendError};
use crate::models::Notice;

/// Events accepted by the hub's single ordered intake
#[derive(Debug)]
pub enum HubEvent {
    Register(Connection),
    Unregister(ConnId),
    Broadcast(String),
}

/// Cloneable submitter for the hub intake.
///
/// Every membership change and broadcast goes through this handle, so all
/// mutation and fan-out ordering is decided by the hub loop alone.
#[derive(Clone)]
pub struct HubHandle {
    tx: mpsc::Sender<HubEvent>,
}

impl HubHandle {
    pub async fn register(&self, conn: Connection) {
        if self.tx.send(HubEvent::Register(conn)).await.is_err() {
            warn!("Hub intake closed; dropping register event");
        }
    }

    pub async fn unregister(&self, id: ConnId) {
        if self.tx.send(HubEvent::Unregister(id)).await.is_err() {
            warn!("Hub intake closed; dropping unregister event");
        }
    }

    pub async fn broadcast(&self, payload: String) {
        if self.tx.send(HubEvent::Broadcast(payload)).await.is_err() {
            warn!("Hub intake closed; dropping broadcast");
        }
    }

    /// Fan a presence notice out to every connected client
    pub async fn broadcast_notice(&self, notice: &Notice) {
        match serde_json::to_string(notice) {
            Ok(payload) => self.broadcast(payload).await,
            Err(e) => error!("Failed to encode notice: {}", e),
        }
    }
}

/// Single authority over the set of live connections.
///
/// One spawned task runs [`BroadcastHub::run`] for the lifetime of the
/// process and is the sole mutator of the membership map; producers submit
/// events through a [`HubHandle`]. Events are processed strictly in intake
/// order. A member whose queue is full or closed at fan-out time is evicted
/// without affecting delivery to the rest.
pub struct BroadcastHub {
    intake: mpsc::Receiver<HubEvent>,
    connections: HashMap<ConnId, Connection>,
}

impl BroadcastHub {
    pub fn new(intake_capacity: usize) -> (Self, HubHandle) {
        let (tx, rx) = mpsc::channel(intake_capacity);
        (
            Self {
                intake: rx,
                connections: HashMap::new(),
            },
            HubHandle { tx },
        )
    }

    /// Run the hub loop until every handle is dropped
    pub async fn run(mut self) {
        info!("Broadcast hub started");
        while let Some(event) = self.intake.recv().await {
            match event {
                HubEvent::Register(conn) => {
                    if conn.is_closed() {
                        debug!("Connection {} closed before registration; dropping", conn.id());
                        continue;
                    }
                    debug!("Registering connection {}", conn.id());
                    self.connections.insert(conn.id(), conn);
                }
                HubEvent::Unregister(id) => {
                    // No-op when absent: both pumps may race on close
                    if self.connections.remove(&id).is_some() {
                        debug!("Unregistered connection {}", id);
                    }
                }
                HubEvent::Broadcast(payload) => self.fan_out(payload),
            }
        }
        info!("Hub intake closed; broadcast hub stopped");
    }

    fn fan_out(&mut self, payload: String) {
        let mut evicted: Vec<ConnId> = Vec::new();
        for (id, conn) in self.connections.iter() {
            match conn.send(payload.clone()) {
                Ok(()) => {}
                Err(SendError::SlowConsumer) => {
                    warn!("Connection {} cannot keep up; evicting", id);
                    evicted.push(*id);
                }
                Err(SendError::Closed) => {
                    debug!("Connection {} already closed; evicting", id);
                    evicted.push(*id);
                }
            }
        }
        for id in evicted {
            self.connections.remove(&id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::presence::PresenceTracker;
    use tokio::sync::mpsc::Receiver;
    use tokio::time::{timeout, Duration};

    fn spawn_hub() -> HubHandle {
        let (hub, handle) = BroadcastHub::new(64);
        tokio::spawn(hub.run());
        handle
    }

    async fn recv(rx: &mut Receiver<String>) -> String {
        timeout(Duration::from_secs(1), rx.recv())
            .await
            .expect("timed out waiting for payload")
            .expect("queue closed")
    }

    #[tokio::test]
    async fn broadcast_reaches_all_registered_connections() {
        let hub = spawn_hub();
        let (a, mut rx_a) = Connection::channel(8);
        let (b, mut rx_b) = Connection::channel(8);
        hub.register(a).await;
        hub.register(b).await;

        hub.broadcast("hello".to_string()).await;

        assert_eq!(recv(&mut rx_a).await, "hello");
        assert_eq!(recv(&mut rx_b).await, "hello");
    }

    #[tokio::test]
    async fn unregistered_connection_no_longer_receives() {
        let hub = spawn_hub();
        let (a, mut rx_a) = Connection::channel(8);
        let (b, mut rx_b) = Connection::channel(8);
        let a_id = a.id();
        hub.register(a).await;
        hub.register(b).await;

        hub.unregister(a_id).await;
        hub.broadcast("after".to_string()).await;

        assert_eq!(recv(&mut rx_b).await, "after");
        // The hub dropped a's sender, so its queue ends without a payload
        assert_eq!(
            timeout(Duration::from_secs(1), rx_a.recv()).await.unwrap(),
            None
        );
    }

    #[tokio::test]
    async fn double_unregister_is_a_noop() {
        let hub = spawn_hub();
        let (a, _rx_a) = Connection::channel(8);
        let a_id = a.id();
        hub.register(a).await;
        hub.unregister(a_id).await;
        hub.unregister(a_id).await;

        // The hub loop is still serving events afterwards
        let (b, mut rx_b) = Connection::channel(8);
        hub.register(b).await;
        hub.broadcast("still alive".to_string()).await;
        assert_eq!(recv(&mut rx_b).await, "still alive");
    }

    #[tokio::test]
    async fn closed_member_is_evicted_and_others_still_receive() {
        let hub = spawn_hub();
        let (dead, dead_rx) = Connection::channel(8);
        let (live, mut live_rx) = Connection::channel(8);
        hub.register(dead).await;
        hub.register(live).await;

        drop(dead_rx);
        hub.broadcast("one".to_string()).await;
        hub.broadcast("two".to_string()).await;

        assert_eq!(recv(&mut live_rx).await, "one");
        assert_eq!(recv(&mut live_rx).await, "two");
    }

    #[tokio::test]
    async fn slow_consumer_is_evicted_without_blocking_fan_out() {
        let hub = spawn_hub();
        let (slow, mut slow_rx) = Connection::channel(1);
        let (fast, mut fast_rx) = Connection::channel(8);
        hub.register(slow).await;
        hub.register(fast).await;

        // First payload fills the slow queue; the second overflows it
        hub.broadcast("one".to_string()).await;
        hub.broadcast("two".to_string()).await;

        assert_eq!(recv(&mut fast_rx).await, "one");
        assert_eq!(recv(&mut fast_rx).await, "two");

        // The slow consumer got the buffered payload, then was evicted
        assert_eq!(recv(&mut slow_rx).await, "one");
        assert_eq!(
            timeout(Duration::from_secs(1), slow_rx.recv()).await.unwrap(),
            None
        );
    }

    #[tokio::test]
    async fn join_leave_end_scenario_with_connected_clients() {
        let hub = spawn_hub();
        let tracker = PresenceTracker::new();
        let (x, mut rx_x) = Connection::channel(8);
        let (y, mut rx_y) = Connection::channel(8);
        hub.register(x).await;
        hub.register(y).await;

        assert!(tracker.join("call1", "viewerA"));
        hub.broadcast_notice(&Notice::viewer_joined("call1", "viewerA"))
            .await;
        assert_eq!(tracker.query("call1"), vec!["viewerA"]);

        let seen_x = recv(&mut rx_x).await;
        let seen_y = recv(&mut rx_y).await;
        for payload in [&seen_x, &seen_y] {
            let notice: Notice = serde_json::from_str(payload).unwrap();
            match notice {
                Notice::ViewerJoined(n) => {
                    assert_eq!(n.call_id, "call1");
                    assert_eq!(n.peer_id, "viewerA");
                }
                other => panic!("unexpected notice: {:?}", other),
            }
        }

        // Repeated join changes nothing, so no second notice is emitted
        assert!(!tracker.join("call1", "viewerA"));
        assert_eq!(tracker.query("call1"), vec!["viewerA"]);

        assert!(tracker.leave("call1", "viewerA").unwrap());
        assert!(tracker.query("call1").is_empty());

        tracker.end("call1").unwrap();
        assert!(tracker.query("call1").is_empty());
        assert!(tracker.end("call1").is_err());
    }
}
