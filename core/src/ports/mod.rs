//! Ports layer - Trait definitions (interfaces).
//!
//! This module defines the interfaces that the application layer uses
//! to interact with external systems. Implementations live in `adapters`.

mod channel;
mod diagnostics;

pub use channel::RemoteChannel;
pub use diagnostics::{DiagnosticLevel, DiagnosticSink};
