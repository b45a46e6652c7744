//! 联盟营销工作流模拟器
//!
//! 给定产品名，依次执行：调研 → 内容生成 → 排期 → 执行发布 → 引流页 → 数据分析，
//! 每个阶段把产物写入磁盘并返回结构化结果供下一阶段使用。
//! 所有外部服务（AI 生成、WordPress、社媒平台）都是模拟的。

pub mod analytics;
pub mod content;
pub mod layout;
pub mod leadgen;
pub mod pipeline;
pub mod publisher;
pub mod research;
pub mod scheduler;
pub mod types;

pub use analytics::AnalyticsTracker;
pub use content::{ContentGenerator, ImageType};
pub use layout::DataLayout;
pub use leadgen::{generate_utm_link, LeadGenerator};
pub use pipeline::{Workflow, WorkflowOptions};
pub use publisher::PlatformPublisher;
pub use research::ProductResearcher;
pub use scheduler::{plan_schedule, PostingScheduler};
pub use types::*;

pub type Result<T> = std::result::Result<T, affbox_core::WorkflowError>;
