//! affbox - 联盟营销一站式工具
//!
//! 工作区 crate 的汇总入口：
//! - `affbox_core`: 模型、配置、错误类型、命名规则
//! - `affbox_store`: 仪表盘使用的模拟数据层
//! - `affbox_workflow`: 调研到分析的完整工作流模拟器
//!
//! 本 crate 只负责命令行、日志初始化和配置装配。

pub mod commands;
pub mod logger;

pub use affbox_core;
pub use affbox_store;
pub use affbox_workflow;

pub use affbox_core::AppConfig;
