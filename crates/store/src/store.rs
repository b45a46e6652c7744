//! 模拟数据层入口
//!
//! 显式构造、通过依赖注入传递，不使用全局单例。

use crate::collection::Collection;
use crate::notifier::{Notification, NotificationHub};
use crate::policy::{LatencyFaultPolicy, RandomFaultPolicy};
use crate::seed::StoreState;
use crate::status::ApiStatus;
use affbox_core::models::{
    AiService, AiServiceFlags, ContentItem, ContentItemPatch, LeadMagnet, LeadMagnetPatch,
    NewContentItem, NewLeadMagnet, NewProduct, NewScheduleItem, Product, ProductPatch,
    ScheduleItem, ScheduleItemPatch,
};
use affbox_core::{StoreConfig, StoreError};
use parking_lot::RwLock;
use std::sync::Arc;
use tokio::sync::broadcast;
use tracing::info;

/// 模拟数据层
pub struct MockStore {
    products: Collection<Product>,
    content_items: Collection<ContentItem>,
    schedule_items: Collection<ScheduleItem>,
    lead_magnets: Collection<LeadMagnet>,
    ai_services: RwLock<AiServiceFlags>,
    notifier: NotificationHub,
}

impl MockStore {
    /// 使用指定初始状态和调用策略创建
    pub fn new(state: StoreState, policy: Arc<dyn LatencyFaultPolicy>) -> Self {
        let notifier = NotificationHub::new();
        Self {
            products: Collection::new(state.products, policy.clone(), notifier.clone()),
            content_items: Collection::new(state.content_items, policy.clone(), notifier.clone()),
            schedule_items: Collection::new(state.schedule_items, policy.clone(), notifier.clone()),
            lead_magnets: Collection::new(state.lead_magnets, policy, notifier.clone()),
            ai_services: RwLock::new(state.ai_services),
            notifier,
        }
    }

    /// 按配置创建：随机故障策略，可选示例数据
    pub fn from_config(config: &StoreConfig) -> Self {
        Self::with_policy(config, Arc::new(RandomFaultPolicy::from_config(config)))
    }

    /// 按配置选择初始状态，调用策略由调用方指定
    pub fn with_policy(config: &StoreConfig, policy: Arc<dyn LatencyFaultPolicy>) -> Self {
        info!(
            "[MockStore] 初始化: latency={}ms failure_rate={} sample_data={}",
            config.latency_ms, config.failure_rate, config.seed_sample_data
        );
        Self::new(StoreState::from_config(config), policy)
    }

    /// 订阅通知
    pub fn subscribe_notifications(&self) -> broadcast::Receiver<Notification> {
        self.notifier.subscribe()
    }

    pub fn products(&self) -> &Collection<Product> {
        &self.products
    }

    pub fn content_items(&self) -> &Collection<ContentItem> {
        &self.content_items
    }

    pub fn schedule_items(&self) -> &Collection<ScheduleItem> {
        &self.schedule_items
    }

    pub fn lead_magnets(&self) -> &Collection<LeadMagnet> {
        &self.lead_magnets
    }

    // ------------------------------------------------------------------------
    // 产品
    // ------------------------------------------------------------------------

    pub async fn add_product(&self, input: NewProduct) -> Result<Product, StoreError> {
        self.products.add(input).await
    }

    pub async fn update_product(
        &self,
        id: u32,
        patch: ProductPatch,
    ) -> Result<Product, StoreError> {
        self.products.update(id, patch).await
    }

    pub async fn delete_product(&self, id: u32) -> Result<bool, StoreError> {
        self.products.delete(id).await
    }

    pub fn products_status(&self) -> ApiStatus {
        self.products.status()
    }

    // ------------------------------------------------------------------------
    // 内容
    // ------------------------------------------------------------------------

    pub async fn add_content_item(&self, input: NewContentItem) -> Result<ContentItem, StoreError> {
        self.content_items.add(input).await
    }

    pub async fn update_content_item(
        &self,
        id: u32,
        patch: ContentItemPatch,
    ) -> Result<ContentItem, StoreError> {
        self.content_items.update(id, patch).await
    }

    pub async fn delete_content_item(&self, id: u32) -> Result<bool, StoreError> {
        self.content_items.delete(id).await
    }

    pub fn content_status(&self) -> ApiStatus {
        self.content_items.status()
    }

    // ------------------------------------------------------------------------
    // 排期
    // ------------------------------------------------------------------------

    pub async fn add_schedule_item(
        &self,
        input: NewScheduleItem,
    ) -> Result<ScheduleItem, StoreError> {
        self.schedule_items.add(input).await
    }

    pub async fn update_schedule_item(
        &self,
        id: u32,
        patch: ScheduleItemPatch,
    ) -> Result<ScheduleItem, StoreError> {
        self.schedule_items.update(id, patch).await
    }

    pub async fn delete_schedule_item(&self, id: u32) -> Result<bool, StoreError> {
        self.schedule_items.delete(id).await
    }

    pub fn schedule_status(&self) -> ApiStatus {
        self.schedule_items.status()
    }

    // ------------------------------------------------------------------------
    // 引流资料
    // ------------------------------------------------------------------------

    pub async fn add_lead_magnet(&self, input: NewLeadMagnet) -> Result<LeadMagnet, StoreError> {
        self.lead_magnets.add(input).await
    }

    pub async fn update_lead_magnet(
        &self,
        id: u32,
        patch: LeadMagnetPatch,
    ) -> Result<LeadMagnet, StoreError> {
        self.lead_magnets.update(id, patch).await
    }

    pub async fn delete_lead_magnet(&self, id: u32) -> Result<bool, StoreError> {
        self.lead_magnets.delete(id).await
    }

    pub fn lead_magnets_status(&self) -> ApiStatus {
        self.lead_magnets.status()
    }

    // ------------------------------------------------------------------------
    // AI 服务
    // ------------------------------------------------------------------------

    pub fn ai_services(&self) -> AiServiceFlags {
        *self.ai_services.read()
    }

    /// 覆盖单个服务的连接状态
    pub fn connect_ai_service(&self, service: AiService, connected: bool) {
        self.ai_services.write().set(service, connected);

        let (title, verb) = if connected {
            ("Service Connected", "connected")
        } else {
            ("Service Disconnected", "disconnected")
        };
        info!("[MockStore] AI 服务 {} {}", service.key(), verb);
        self.notifier
            .success(title, format!("{service} has been {verb} successfully."));
    }
}
