// src/core/mod.rs
//! Backend plumbing and configuration shared by the checkers and the CLI

pub mod backend_client;
pub mod config_manager;

pub use backend_client::BackendClient;
pub use config_manager::ConfigManager;
