//! 配置管理
//!
//! YAML 配置文件，所有字段都有默认值，缺省的段落直接使用默认配置。
//!
//! 查找顺序：
//! 1. 命令行显式指定的路径（读取失败即报错）
//! 2. `<config_dir>/affbox/config.yaml`（存在时才读取）
//! 3. 内置默认值

use crate::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 应用配置
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub workflow: WorkflowConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// 模拟数据层配置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoreConfig {
    /// 模拟网络延迟（毫秒）
    #[serde(default = "default_latency_ms")]
    pub latency_ms: u64,
    /// 每次变更调用的失败概率
    #[serde(default = "default_failure_rate")]
    pub failure_rate: f64,
    /// 启动时是否载入示例数据
    #[serde(default = "default_true")]
    pub seed_sample_data: bool,
}

/// 工作流模拟器配置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WorkflowConfig {
    /// 产物输出根目录
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// 未指定产品时使用的产品名
    #[serde(default = "default_product")]
    pub default_product: String,
    /// 排期覆盖的天数
    #[serde(default = "default_duration_days")]
    pub duration_days: u32,
    /// 生成社媒帖子的平台
    #[serde(default = "default_social_platforms")]
    pub social_platforms: Vec<String>,
    /// 每个平台生成的帖子数
    #[serde(default = "default_posts_per_platform")]
    pub posts_per_platform: usize,
    /// 调研阶段的模拟耗时（毫秒）
    #[serde(default = "default_research_delay_ms")]
    pub research_delay_ms: u64,
    /// 分析报告向前回溯的天数
    #[serde(default = "default_report_window_days")]
    pub report_window_days: u32,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    /// 默认日志级别，`RUST_LOG` 优先
    #[serde(default = "default_log_level")]
    pub level: String,
}

fn default_latency_ms() -> u64 {
    500
}
fn default_failure_rate() -> f64 {
    0.1
}
fn default_true() -> bool {
    true
}
fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}
fn default_product() -> String {
    "Kartra".to_string()
}
fn default_duration_days() -> u32 {
    7
}
fn default_social_platforms() -> Vec<String> {
    vec![
        "twitter".to_string(),
        "facebook".to_string(),
        "linkedin".to_string(),
    ]
}
fn default_posts_per_platform() -> usize {
    3
}
fn default_research_delay_ms() -> u64 {
    1000
}
fn default_report_window_days() -> u32 {
    30
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            latency_ms: default_latency_ms(),
            failure_rate: default_failure_rate(),
            seed_sample_data: default_true(),
        }
    }
}

impl Default for WorkflowConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            default_product: default_product(),
            duration_days: default_duration_days(),
            social_platforms: default_social_platforms(),
            posts_per_platform: default_posts_per_platform(),
            research_delay_ms: default_research_delay_ms(),
            report_window_days: default_report_window_days(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl AppConfig {
    /// 默认配置文件路径
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("affbox").join("config.yaml"))
    }

    /// 从指定文件加载
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&raw)
    }

    pub fn from_yaml(raw: &str) -> Result<Self, ConfigError> {
        if raw.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(raw)?)
    }

    /// 按查找顺序加载配置
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            tracing::debug!("[Config] 使用指定配置文件: {}", path.display());
            return Self::from_file(path);
        }

        match Self::default_path() {
            Some(path) if path.is_file() => {
                tracing::debug!("[Config] 使用默认配置文件: {}", path.display());
                Self::from_file(&path)
            }
            _ => Ok(Self::default()),
        }
    }

    /// 失败率夹到 [0, 1]
    pub fn normalized(mut self) -> Self {
        if !self.store.failure_rate.is_finite() {
            self.store.failure_rate = default_failure_rate();
        }
        self.store.failure_rate = self.store.failure_rate.clamp(0.0, 1.0);
        self
    }
}
