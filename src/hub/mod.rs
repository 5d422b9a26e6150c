pub mod connection;
pub mod hub;

pub use connection::{ConnId, Connection, SendError};
pub use hub::{BroadcastHub, HubHandle};
