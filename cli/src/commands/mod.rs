pub mod config;
pub mod hosts;
pub mod kill;
pub mod list;
