//! 产物目录布局
//!
//! 构造时一次性创建所有目录，之后各阶段不再检查目录是否存在。

use crate::Result;
use affbox_core::WorkflowError;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

/// `data/` 下的目录树
#[derive(Debug, Clone)]
pub struct DataLayout {
    root: PathBuf,
}

impl DataLayout {
    /// 创建布局并确保目录存在
    pub fn create(root: impl Into<PathBuf>) -> Result<Self> {
        let layout = Self { root: root.into() };
        for dir in layout.directories() {
            if !dir.exists() {
                fs::create_dir_all(&dir).map_err(WorkflowError::io(&dir))?;
                debug!("[DataLayout] 创建目录: {}", dir.display());
            }
        }
        Ok(layout)
    }

    fn directories(&self) -> Vec<PathBuf> {
        vec![
            self.root.clone(),
            self.research_dir(),
            self.text_dir(),
            self.social_dir(),
            self.images_dir(),
            self.posting_logs_dir(),
            self.scheduler_dir(),
            self.analytics_dir(),
            self.reports_dir(),
            self.leads_dir(),
        ]
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn research_dir(&self) -> PathBuf {
        self.root.join("product_research")
    }

    pub fn text_dir(&self) -> PathBuf {
        self.root.join("generated_content").join("text")
    }

    pub fn social_dir(&self) -> PathBuf {
        self.text_dir().join("social")
    }

    pub fn images_dir(&self) -> PathBuf {
        self.root.join("generated_content").join("images")
    }

    pub fn posting_logs_dir(&self) -> PathBuf {
        self.root.join("posting_logs")
    }

    pub fn scheduler_dir(&self) -> PathBuf {
        self.posting_logs_dir().join("scheduler")
    }

    pub fn analytics_dir(&self) -> PathBuf {
        self.root.join("analytics")
    }

    pub fn reports_dir(&self) -> PathBuf {
        self.analytics_dir().join("reports")
    }

    pub fn leads_dir(&self) -> PathBuf {
        self.root.join("leads")
    }
}

/// 写文本文件
pub(crate) fn write_text(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).map_err(WorkflowError::io(path))
}

/// 写格式化 JSON
pub(crate) fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    write_text(path, &json)
}

pub(crate) fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(WorkflowError::io(path))
}
