//! 集合级调用状态
//!
//! 每个集合只有一个状态值（不是每条记录一个）：
//! `idle → loading → success` 或 `idle → loading → error`。

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ApiStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

impl ApiStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, ApiStatus::Loading)
    }
}
