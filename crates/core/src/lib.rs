//! 核心类型和工具模块
//!
//! 包含 models, config, errors, naming 等基础功能，供 store 与 workflow 两个 crate 共享。

pub mod config;
pub mod errors;
pub mod models;
pub mod naming;

pub use config::{AppConfig, LoggingConfig, StoreConfig, WorkflowConfig};
pub use errors::{ConfigError, StoreError, WorkflowError};

pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
