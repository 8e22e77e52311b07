// src/lib.rs
//! Console client for the Hire3x candidate-matching service

pub mod cli;
pub mod core;
pub mod desktop;
pub mod error;
pub mod logging;
pub mod render;
pub mod types;
pub mod utils;
pub mod view;

pub use crate::core::{ConfigManager, MatchingBackend, ServiceClient};
pub use crate::desktop::{CommandDesktop, Desktop};
pub use crate::error::ClientError;
pub use crate::view::JobSearchView;
