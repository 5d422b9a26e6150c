pub mod health;
pub mod platform;
pub mod signals;
pub mod viewers;
pub mod webhook;
pub mod ws;

pub use health::*;
pub use platform::*;
pub use signals::*;
pub use viewers::*;
pub use webhook::*;
pub use ws::*;
