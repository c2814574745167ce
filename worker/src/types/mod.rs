//! Type definitions

pub mod duty_log;
pub mod hos;
pub mod messages;
pub mod trip;

pub use duty_log::*;
pub use hos::*;
pub use messages::*;
pub use trip::*;
