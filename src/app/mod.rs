//! Session runtime and the line-command driver used by the binary.

/// Line-command driver reading intents from stdin.
pub mod driver;
/// Session loop and background workers.
pub mod runtime;

pub use driver::run;
pub use runtime::{SessionHandle, spawn_session};
