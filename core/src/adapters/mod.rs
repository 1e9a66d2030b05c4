//! Adapters layer - External system implementations.
//!
//! This module contains implementations of the port traits defined in `ports`.
//! Each adapter handles communication with external systems.

pub mod diagnostics;
pub mod ssh;

// Re-export main types for convenience
pub use diagnostics::{MemorySink, NoopSink, TracingSink};
pub use ssh::{SshChannel, SshTarget, DEFAULT_COMMAND_TIMEOUT};
