use tokio::sync::mpsc;
use uuid::Uuid;

/// Process-local handle identifying one live connection.
/// Not a user identity.
pub type ConnId = Uuid;

/// Why an enqueue for a connection failed
#[derive(Debug, PartialEq, Eq)]
pub enum SendError {
    /// The outbound queue is full; the peer is not draining fast enough
    SlowConsumer,
    /// The outbound pump has exited and the transport is gone
    Closed,
}

impl std::fmt::Display for SendError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SendError::SlowConsumer => write!(f, "outbound queue full"),
            SendError::Closed => write!(f, "connection closed"),
        }
    }
}

impl std::error::Error for SendError {}

/// The hub-side handle to one upgraded WebSocket session.
///
/// Holds the sender half of a bounded outbound queue; the receiver half is
/// drained by the connection's outbound pump, which is the sole writer of
/// the underlying transport. Enqueueing never blocks: a full queue is
/// reported as a slow consumer so the caller can evict instead of stalling.
#[derive(Debug)]
pub struct Connection {
    id: ConnId,
    tx: mpsc::Sender<String>,
}

impl Connection {
    /// Create a connection handle and the receiving end of its outbound queue
    pub fn channel(capacity: usize) -> (Self, mpsc::Receiver<String>) {
        let (tx, rx) = mpsc::channel(capacity);
        (
            Self {
                id: Uuid::new_v4(),
                tx,
            },
            rx,
        )
    }

    pub fn id(&self) -> ConnId {
        self.id
    }

    /// Enqueue a payload for delivery, without blocking
    pub fn send(&self, payload: String) -> Result<(), SendError> {
        self.tx.try_send(payload).map_err(|e| match e {
            mpsc::error::TrySendError::Full(_) => SendError::SlowConsumer,
            mpsc::error::TrySendError::Closed(_) => SendError::Closed,
        })
    }

    /// Whether the outbound pump has dropped its end of the queue
    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn send_enqueues_in_order() {
        let (conn, mut rx) = Connection::channel(4);
        conn.send("first".to_string()).unwrap();
        conn.send("second".to_string()).unwrap();
        assert_eq!(rx.recv().await.unwrap(), "first");
        assert_eq!(rx.recv().await.unwrap(), "second");
    }

    #[tokio::test]
    async fn full_queue_reports_slow_consumer() {
        let (conn, _rx) = Connection::channel(1);
        conn.send("a".to_string()).unwrap();
        assert_eq!(
            conn.send("b".to_string()),
            Err(SendError::SlowConsumer)
        );
    }

    #[tokio::test]
    async fn dropped_receiver_reports_closed() {
        let (conn, rx) = Connection::channel(1);
        drop(rx);
        assert!(conn.is_closed());
        assert_eq!(conn.send("a".to_string()), Err(SendError::Closed));
    }
}
