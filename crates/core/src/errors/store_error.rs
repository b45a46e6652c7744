//! 模拟数据层错误类型
//!
//! ## 设计原则
//! - 使用 thiserror 派生 Error trait
//! - 实现 Serialize 以便 UI 层直接展示错误信息
//! - 失败的变更从未被应用，所以这里没有回滚相关的错误

use thiserror::Error;

/// 模拟数据层操作错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// 变更或删除的目标记录不存在
    #[error("{entity} with ID {id} not found")]
    NotFound { entity: &'static str, id: u32 },

    /// 模拟调用按概率触发的失败
    #[error("{0}")]
    SimulatedFailure(String),
}

impl StoreError {
    pub fn not_found(entity: &'static str, id: u32) -> Self {
        Self::NotFound { entity, id }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

impl From<StoreError> for String {
    fn from(err: StoreError) -> Self {
        err.to_string()
    }
}

impl serde::Serialize for StoreError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}
