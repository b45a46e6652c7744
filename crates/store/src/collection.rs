//! 通用内存集合
//!
//! 四个集合共享同一套生命周期：
//! - `add`：合并调用方字段与服务端字段 → 模拟调用 → 成功才追加
//! - `update`：按 id 查找 → 浅合并 → 模拟调用 → 成功才原位替换
//! - `delete`：按 id 查找 → 模拟调用 → 成功才移除
//!
//! 模拟调用期间不持有锁。id 由单调计数器分配，删除后不会复用。

use crate::notifier::NotificationHub;
use crate::policy::LatencyFaultPolicy;
use crate::status::ApiStatus;
use affbox_core::StoreError;
use chrono::NaiveDate;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use tokio::sync::{watch, RwLock};
use tracing::{debug, error, info};

/// 集合中的记录
pub trait Record: Clone + Send + Sync + 'static {
    /// NotFound 错误里的实体名
    const ENTITY: &'static str;
    /// 通知标题里的实体名
    const TITLE: &'static str;
    /// 日志与失败通知里的名词
    const NOUN: &'static str;

    /// 新增时调用方提供的字段
    type New: Send;
    /// 更新时的部分字段
    type Patch: Send;

    fn id(&self) -> u32;

    /// 通知中展示的名称（产品名或标题）
    fn label(&self) -> &str;

    /// 补齐服务端生成的字段
    fn build(input: Self::New, id: u32, today: NaiveDate) -> Self;

    /// 浅合并
    fn merge(&mut self, patch: Self::Patch);

    fn added_message(label: &str) -> String {
        format!("{label} has been added successfully.")
    }

    fn updated_message(label: &str) -> String {
        format!("{label} has been updated successfully.")
    }

    fn deleted_message(label: &str) -> String {
        format!("{label} has been deleted successfully.")
    }
}

/// 单个内存集合
pub struct Collection<T: Record> {
    items: RwLock<Vec<T>>,
    next_id: AtomicU32,
    status: watch::Sender<ApiStatus>,
    policy: Arc<dyn LatencyFaultPolicy>,
    notifier: NotificationHub,
}

impl<T: Record> Collection<T> {
    /// 用初始数据创建集合，计数器从现有最大 id + 1 开始
    pub fn new(
        initial: Vec<T>,
        policy: Arc<dyn LatencyFaultPolicy>,
        notifier: NotificationHub,
    ) -> Self {
        let next_id = initial.iter().map(T::id).max().unwrap_or(0) + 1;
        let (status, _) = watch::channel(ApiStatus::Idle);
        Self {
            items: RwLock::new(initial),
            next_id: AtomicU32::new(next_id),
            status,
            policy,
            notifier,
        }
    }

    /// 当前全部记录的快照
    pub async fn list(&self) -> Vec<T> {
        self.items.read().await.clone()
    }

    pub async fn get(&self, id: u32) -> Option<T> {
        self.items.read().await.iter().find(|r| r.id() == id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }

    /// 当前调用状态
    pub fn status(&self) -> ApiStatus {
        *self.status.borrow()
    }

    /// 订阅状态变化
    pub fn subscribe_status(&self) -> watch::Receiver<ApiStatus> {
        self.status.subscribe()
    }

    pub async fn add(&self, input: T::New) -> Result<T, StoreError> {
        self.set_status(ApiStatus::Loading);

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let record = T::build(input, id, today());

        if let Err(err) = self.policy.outcome().await {
            return self.fail("adding", err);
        }

        self.items.write().await.push(record.clone());
        self.set_status(ApiStatus::Success);

        info!("[MockStore] 新增{}: #{} {}", T::NOUN, id, record.label());
        self.notifier.success(
            format!("{} Added", T::TITLE),
            T::added_message(record.label()),
        );
        Ok(record)
    }

    pub async fn update(&self, id: u32, patch: T::Patch) -> Result<T, StoreError> {
        self.set_status(ApiStatus::Loading);

        let Some(mut updated) = self.get(id).await else {
            return self.fail("updating", StoreError::not_found(T::ENTITY, id));
        };
        updated.merge(patch);

        if let Err(err) = self.policy.outcome().await {
            return self.fail("updating", err);
        }

        let replaced = {
            let mut items = self.items.write().await;
            match items.iter_mut().find(|r| r.id() == id) {
                Some(slot) => {
                    *slot = updated.clone();
                    true
                }
                None => false,
            }
        };
        // 模拟调用期间记录可能已被删除
        if !replaced {
            return self.fail("updating", StoreError::not_found(T::ENTITY, id));
        }
        self.set_status(ApiStatus::Success);

        debug!("[MockStore] 更新{}: #{}", T::NOUN, id);
        self.notifier.success(
            format!("{} Updated", T::TITLE),
            T::updated_message(updated.label()),
        );
        Ok(updated)
    }

    pub async fn delete(&self, id: u32) -> Result<bool, StoreError> {
        self.set_status(ApiStatus::Loading);

        let Some(existing) = self.get(id).await else {
            return self.fail("deleting", StoreError::not_found(T::ENTITY, id));
        };

        if let Err(err) = self.policy.outcome().await {
            return self.fail("deleting", err);
        }

        self.items.write().await.retain(|r| r.id() != id);
        self.set_status(ApiStatus::Success);

        info!("[MockStore] 删除{}: #{}", T::NOUN, id);
        self.notifier.success(
            format!("{} Deleted", T::TITLE),
            T::deleted_message(existing.label()),
        );
        Ok(true)
    }

    fn set_status(&self, status: ApiStatus) {
        self.status.send_replace(status);
    }

    fn fail<R>(&self, verb: &str, err: StoreError) -> Result<R, StoreError> {
        self.set_status(ApiStatus::Error);
        let operation = format!("{verb} {}", T::NOUN);
        error!("[MockStore] Error during {operation}: {err}");
        self.notifier.failure(&operation, &err);
        Err(err)
    }
}

fn today() -> NaiveDate {
    chrono::Utc::now().date_naive()
}
