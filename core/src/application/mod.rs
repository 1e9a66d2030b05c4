//! Application layer - Use case services.
//!
//! This module contains application services that orchestrate
//! domain logic and adapter interactions.
//!
//! Services are designed to be thin orchestrators that:
//! - Accept domain types as inputs
//! - Use ports (traits) for external dependencies
//! - Return domain types as outputs

mod discovery;
mod terminator;

pub use discovery::{PortDiscovery, ScanOutcome};
pub use terminator::ProcessTerminator;
