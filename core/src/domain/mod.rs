//! Domain layer - Pure business logic and data models.
//!
//! This module contains domain entities that represent core business concepts.
//! These types have no I/O dependencies and can be tested in isolation.

mod platform;
mod port;

// Re-export all domain types
pub use platform::{PlatformFamily, RemotePlatform};
pub use port::{rank_records, Port, PortRecord, SortPriority, COMMON_DEV_PORTS, DEV_TOOL_KEYWORDS};
