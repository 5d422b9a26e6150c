pub mod error;
pub mod health;
pub mod notice;
pub mod signals;
pub mod webhook;

pub use error::*;
pub use health::*;
pub use notice::*;
pub use signals::*;
pub use webhook::*;
