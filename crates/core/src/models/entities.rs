//! 仪表盘实体定义
//!
//! 每类实体都有三种形态：
//! - 完整记录（`Product` 等），由数据层持有
//! - 新增输入（`NewProduct` 等），不含服务端生成的字段
//! - 补丁（`ProductPatch` 等），`None` 表示保留原值，用于浅合并

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ============================================================================
// 状态与类型枚举
// ============================================================================

/// 产品状态
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    Active,
    Inactive,
}

/// 内容发布状态（内容与排期共用）
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PublishStatus {
    Draft,
    Scheduled,
    Published,
}

/// 内容类型
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum ContentType {
    BlogPost,
    SocialPost,
    Comparison,
}

impl ContentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::BlogPost => "blog_post",
            ContentType::SocialPost => "social_post",
            ContentType::Comparison => "comparison",
        }
    }
}

/// 引流资料类型
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LeadMagnetType {
    Checklist,
    Ebook,
    Guide,
    Comparison,
    Templates,
}

/// 引流资料状态
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LeadMagnetStatus {
    Active,
    Draft,
}

// ============================================================================
// 产品
// ============================================================================

/// 联盟推广产品
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: u32,
    pub name: String,
    pub category: String,
    pub commission: String,
    pub status: ProductStatus,
    pub date_added: NaiveDate,
    pub revenue: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub category: String,
    pub commission: String,
    pub status: ProductStatus,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProductPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub commission: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ProductStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_added: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revenue: Option<String>,
}

impl Product {
    /// 新产品的收入从零开始，加入日期为创建当天
    pub fn create(input: NewProduct, id: u32, today: NaiveDate) -> Self {
        Self {
            id,
            name: input.name,
            category: input.category,
            commission: input.commission,
            status: input.status,
            date_added: today,
            revenue: "$0.00".to_string(),
        }
    }

    pub fn apply(&mut self, patch: ProductPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(commission) = patch.commission {
            self.commission = commission;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(date_added) = patch.date_added {
            self.date_added = date_added;
        }
        if let Some(revenue) = patch.revenue {
            self.revenue = revenue;
        }
    }
}

// ============================================================================
// 内容
// ============================================================================

/// 生成的内容条目
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ContentItem {
    pub id: u32,
    pub title: String,
    #[serde(rename = "type")]
    pub content_type: ContentType,
    pub product: String,
    pub status: PublishStatus,
    pub date_created: NaiveDate,
    pub platform: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewContentItem {
    pub title: String,
    #[serde(rename = "type")]
    pub content_type: ContentType,
    pub product: String,
    pub status: PublishStatus,
    pub platform: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ContentItemPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub content_type: Option<ContentType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PublishStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_created: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
}

impl ContentItem {
    pub fn create(input: NewContentItem, id: u32, today: NaiveDate) -> Self {
        Self {
            id,
            title: input.title,
            content_type: input.content_type,
            product: input.product,
            status: input.status,
            date_created: today,
            platform: input.platform,
        }
    }

    pub fn apply(&mut self, patch: ContentItemPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(content_type) = patch.content_type {
            self.content_type = content_type;
        }
        if let Some(product) = patch.product {
            self.product = product;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(date_created) = patch.date_created {
            self.date_created = date_created;
        }
        if let Some(platform) = patch.platform {
            self.platform = platform;
        }
    }
}

// ============================================================================
// 排期
// ============================================================================

/// 日历上的一条发布计划
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleItem {
    pub id: u32,
    pub title: String,
    pub date: NaiveDate,
    pub platform: String,
    pub content_type: ContentType,
    pub status: PublishStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewScheduleItem {
    pub title: String,
    pub date: NaiveDate,
    pub platform: String,
    pub content_type: ContentType,
    pub status: PublishStatus,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleItemPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<ContentType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<PublishStatus>,
}

impl ScheduleItem {
    /// 排期只有 id 由服务端生成
    pub fn create(input: NewScheduleItem, id: u32) -> Self {
        Self {
            id,
            title: input.title,
            date: input.date,
            platform: input.platform,
            content_type: input.content_type,
            status: input.status,
        }
    }

    pub fn apply(&mut self, patch: ScheduleItemPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(platform) = patch.platform {
            self.platform = platform;
        }
        if let Some(content_type) = patch.content_type {
            self.content_type = content_type;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
    }
}

// ============================================================================
// 引流资料
// ============================================================================

/// 引流资料（清单、电子书等）
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LeadMagnet {
    pub id: u32,
    pub title: String,
    #[serde(rename = "type")]
    pub magnet_type: LeadMagnetType,
    pub product: String,
    pub status: LeadMagnetStatus,
    pub date_created: NaiveDate,
    pub downloads: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewLeadMagnet {
    pub title: String,
    #[serde(rename = "type")]
    pub magnet_type: LeadMagnetType,
    pub product: String,
    pub status: LeadMagnetStatus,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LeadMagnetPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub magnet_type: Option<LeadMagnetType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<LeadMagnetStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_created: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub downloads: Option<u32>,
}

impl LeadMagnet {
    /// 下载数从 0 开始
    pub fn create(input: NewLeadMagnet, id: u32, today: NaiveDate) -> Self {
        Self {
            id,
            title: input.title,
            magnet_type: input.magnet_type,
            product: input.product,
            status: input.status,
            date_created: today,
            downloads: 0,
        }
    }

    pub fn apply(&mut self, patch: LeadMagnetPatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(magnet_type) = patch.magnet_type {
            self.magnet_type = magnet_type;
        }
        if let Some(product) = patch.product {
            self.product = product;
        }
        if let Some(status) = patch.status {
            self.status = status;
        }
        if let Some(date_created) = patch.date_created {
            self.date_created = date_created;
        }
        if let Some(downloads) = patch.downloads {
            self.downloads = downloads;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_product_create_fills_server_fields() {
        let product = Product::create(
            NewProduct {
                name: "Systeme".to_string(),
                category: "Funnels".to_string(),
                commission: "60%".to_string(),
                status: ProductStatus::Active,
            },
            6,
            date(2025, 1, 2),
        );
        assert_eq!(product.id, 6);
        assert_eq!(product.revenue, "$0.00");
        assert_eq!(product.date_added, date(2025, 1, 2));
    }

    #[test]
    fn test_patch_is_shallow_merge() {
        let mut magnet = LeadMagnet::create(
            NewLeadMagnet {
                title: "Checklist".to_string(),
                magnet_type: LeadMagnetType::Checklist,
                product: "Kartra".to_string(),
                status: LeadMagnetStatus::Draft,
            },
            1,
            date(2024, 3, 10),
        );
        magnet.apply(LeadMagnetPatch {
            status: Some(LeadMagnetStatus::Active),
            downloads: Some(12),
            ..Default::default()
        });
        assert_eq!(magnet.status, LeadMagnetStatus::Active);
        assert_eq!(magnet.downloads, 12);
        assert_eq!(magnet.title, "Checklist");
        assert_eq!(magnet.magnet_type, LeadMagnetType::Checklist);
    }

    #[test]
    fn test_wire_shape_matches_dashboard() {
        let item = ContentItem::create(
            NewContentItem {
                title: "Hello".to_string(),
                content_type: ContentType::SocialPost,
                product: "Kartra".to_string(),
                status: PublishStatus::Scheduled,
                platform: "Twitter".to_string(),
            },
            3,
            date(2024, 3, 20),
        );
        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["type"], "social_post");
        assert_eq!(json["dateCreated"], "2024-03-20");
        assert_eq!(json["status"], "scheduled");
    }

    #[test]
    fn test_empty_patch_serializes_to_empty_object() {
        let json = serde_json::to_string(&ScheduleItemPatch::default()).unwrap();
        assert_eq!(json, "{}");
    }
}
