//! PortScout Core Library
//!
//! Finds TCP listeners on a remote host through a command channel (such as
//! an ssh session) and kills the process behind a port.
//! Provides functionality to:
//! - Detect the remote platform and pick its introspection tool
//! - Parse `lsof`, `ss`, `netstat` and `/proc/net/tcp` output
//! - Rank listeners so development servers come first
//! - Kill the process owning a port
//! - Store named host profiles
//!
//! # Architecture
//! This library follows hexagonal architecture (ports & adapters):
//! - `domain`: Pure business logic and data models
//! - `ports`: Trait definitions (interfaces)
//! - `adapters`: External system implementations
//! - `application`: Use case services
//!
//! # Platform Support
//! - macOS hosts: `lsof`
//! - Linux and other hosts: `ss`, falling back to `netstat`

// Hexagonal architecture layers
pub mod adapters;
pub mod application;
pub mod domain;
pub mod ports;

pub mod config;
pub mod error;
pub mod killer;
pub mod scanner;

// Re-export domain types (primary API)
pub use domain::{rank_records, PlatformFamily, Port, PortRecord, RemotePlatform, SortPriority};

// Re-export other commonly used types
pub use adapters::{MemorySink, NoopSink, SshChannel, SshTarget, TracingSink};
pub use application::{PortDiscovery, ProcessTerminator, ScanOutcome};
pub use config::{ConfigStore, HostProfile};
pub use error::{ChannelError, Error, Result};
pub use ports::{DiagnosticLevel, DiagnosticSink, RemoteChannel};
pub use scanner::{ScanOptions, ScanStrategy, Tool};
