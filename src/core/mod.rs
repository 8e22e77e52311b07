// src/core/mod.rs
//! Backend access, configuration and file plumbing

pub mod backend;
pub mod config_manager;
pub mod fs_ops;
pub mod service_client;

pub use backend::MatchingBackend;
pub use config_manager::ConfigManager;
pub use fs_ops::FsOps;
pub use service_client::ServiceClient;
