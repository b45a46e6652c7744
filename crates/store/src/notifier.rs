//! 通知通道
//!
//! 数据层的成功与失败都会广播一条通知，供 UI 弹出提示。
//! 没有订阅者时通知直接丢弃。

use affbox_core::StoreError;
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;

const CHANNEL_CAPACITY: usize = 256;

/// 通知样式
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NotificationVariant {
    #[default]
    Default,
    Destructive,
}

/// 一条用户可见的通知
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Notification {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub variant: NotificationVariant,
}

/// 通知广播
#[derive(Debug, Clone)]
pub struct NotificationHub {
    sender: broadcast::Sender<Notification>,
}

impl NotificationHub {
    pub fn new() -> Self {
        let (sender, _) = broadcast::channel(CHANNEL_CAPACITY);
        Self { sender }
    }

    /// 订阅后续通知
    pub fn subscribe(&self) -> broadcast::Receiver<Notification> {
        self.sender.subscribe()
    }

    pub fn publish(&self, notification: Notification) {
        // 没有订阅者时 send 返回错误，忽略即可
        let _ = self.sender.send(notification);
    }

    pub fn success(&self, title: impl Into<String>, description: impl Into<String>) {
        self.publish(Notification {
            title: title.into(),
            description: description.into(),
            variant: NotificationVariant::Default,
        });
    }

    /// 操作失败通知，错误信息为空时使用通用描述
    pub fn failure(&self, operation: &str, err: &StoreError) {
        let message = err.to_string();
        let description = if message.is_empty() {
            format!("There was an error during {operation}. Please try again.")
        } else {
            message
        };
        self.publish(Notification {
            title: "Operation Failed".to_string(),
            description,
            variant: NotificationVariant::Destructive,
        });
    }
}

impl Default for NotificationHub {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_subscriber_receives_failure() {
        let hub = NotificationHub::new();
        let mut rx = hub.subscribe();

        hub.failure("adding product", &StoreError::not_found("Product", 9));

        let notification = rx.recv().await.unwrap();
        assert_eq!(notification.title, "Operation Failed");
        assert_eq!(notification.description, "Product with ID 9 not found");
        assert_eq!(notification.variant, NotificationVariant::Destructive);
    }

    #[test]
    fn test_publish_without_subscribers_is_noop() {
        let hub = NotificationHub::new();
        hub.success("Product Added", "Kartra has been added successfully.");
    }
}
