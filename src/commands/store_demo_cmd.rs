//! 数据层演示命令
//!
//! 依次新增、修改、删除一个产品并切换一个 AI 服务开关，返回期间产生的全部通知。

use affbox_core::models::{AiService, NewProduct, ProductPatch, ProductStatus};
use affbox_core::StoreConfig;
use affbox_store::{FixedOutcome, MockStore, Notification};
use anyhow::Result;
use std::sync::Arc;
use tokio::sync::broadcast::error::TryRecvError;

/// 运行演示；`fail` 为真时所有模拟调用都失败
pub async fn store_demo(config: &StoreConfig, fail: bool) -> Result<Vec<Notification>> {
    let store = if fail {
        MockStore::with_policy(config, Arc::new(FixedOutcome::Fail))
    } else {
        MockStore::from_config(config)
    };
    let mut notifications = store.subscribe_notifications();

    let added = store
        .add_product(NewProduct {
            name: "Demo Product".to_string(),
            category: "Marketing Automation".to_string(),
            commission: "25%".to_string(),
            status: ProductStatus::Active,
        })
        .await;

    match added {
        Ok(product) => {
            tracing::info!("[StoreDemo] 新增产品 #{}", product.id);
            let patch = ProductPatch {
                commission: Some("30%".to_string()),
                ..Default::default()
            };
            if let Err(e) = store.update_product(product.id, patch).await {
                tracing::warn!("[StoreDemo] 修改失败: {}", e);
            }
            if let Err(e) = store.delete_product(product.id).await {
                tracing::warn!("[StoreDemo] 删除失败: {}", e);
            }
        }
        Err(e) => tracing::warn!("[StoreDemo] 新增失败: {}", e),
    }

    store.connect_ai_service(AiService::OpenAi, true);
    tracing::info!(
        "[StoreDemo] 产品状态: {:?}，AI 开关: {:?}",
        store.products_status(),
        store.ai_services()
    );

    let mut collected = Vec::new();
    loop {
        match notifications.try_recv() {
            Ok(notification) => collected.push(notification),
            Err(TryRecvError::Lagged(skipped)) => {
                tracing::warn!("[StoreDemo] 丢失 {} 条通知", skipped);
            }
            Err(TryRecvError::Empty) | Err(TryRecvError::Closed) => break,
        }
    }
    Ok(collected)
}
