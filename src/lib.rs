//! HTTP gateway serving DeepSeek code generation and image description.

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod server;
pub mod service;

pub use config::AppConfig;
pub use server::{build_app, serve, AppState};
pub use service::MultiTaskService;
