//! 数据模型
//!
//! - `entities`: 仪表盘的四类实体（产品、内容、排期、引流资料）及其新增/补丁类型
//! - `ai_service`: AI 服务连接开关

pub mod ai_service;
pub mod entities;

pub use ai_service::{AiService, AiServiceFlags};
pub use entities::*;
