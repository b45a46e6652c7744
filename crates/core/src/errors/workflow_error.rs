//! 工作流与配置错误类型
//!
//! 工作流阶段的文件读写错误统一携带路径，执行阶段会把它降级为单条失败记录，
//! 其余阶段直接向上传播。

use std::path::{Path, PathBuf};
use thiserror::Error;

/// 工作流阶段错误
#[derive(Error, Debug)]
pub enum WorkflowError {
    /// 文件读写失败
    #[error("IO 错误 {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON 序列化/反序列化失败
    #[error("JSON 错误: {0}")]
    Json(#[from] serde_json::Error),

    /// 分析报告的时间区间无效
    #[error("无效的时间区间: {start} > {end}")]
    InvalidDateRange { start: String, end: String },

    /// 天数偏移超出可表示的日期范围
    #[error("日期偏移超出范围: {days} 天")]
    DateOverflow { days: u32 },

    /// 不支持的发布平台
    #[error("不支持的平台: {0}")]
    UnknownPlatform(String),

    /// 查询参数编码失败
    #[error("参数编码失败: {0}")]
    Encode(String),
}

impl WorkflowError {
    /// 用于 `map_err` 的便捷构造
    pub fn io(path: impl AsRef<Path>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.as_ref().to_path_buf();
        move |source| Self::Io { path, source }
    }
}

impl From<WorkflowError> for String {
    fn from(err: WorkflowError) -> Self {
        err.to_string()
    }
}

impl serde::Serialize for WorkflowError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

/// 配置加载错误
#[derive(Error, Debug)]
pub enum ConfigError {
    /// 配置文件读取失败
    #[error("读取配置文件失败 {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// YAML 解析失败
    #[error("解析配置文件失败: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

impl From<ConfigError> for String {
    fn from(err: ConfigError) -> Self {
        err.to_string()
    }
}

impl serde::Serialize for ConfigError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}
