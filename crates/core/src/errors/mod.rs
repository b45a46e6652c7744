//! 错误类型模块
//!
//! 定义 affbox 中的各种错误类型。
//!
//! ## 模块结构
//! - `store_error`: 模拟数据层错误（StoreError）
//! - `workflow_error`: 工作流阶段错误（WorkflowError）与配置错误（ConfigError）

pub mod store_error;
pub mod workflow_error;

// 重新导出常用错误类型
pub use store_error::StoreError;
pub use workflow_error::{ConfigError, WorkflowError};
