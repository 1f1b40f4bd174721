//! Quill event bus.
//!
//! - [`EventBus`]: in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`BlogEvent`]: comment and vote notifications, scoped by article id.

pub mod bus;

pub use bus::{BlogEvent, EventBus};
