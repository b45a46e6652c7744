//! 初始状态
//!
//! `StoreState::default()` 为空；`StoreState::sample()` 是仪表盘演示用的示例数据。

use affbox_core::models::{
    AiServiceFlags, ContentItem, ContentType, LeadMagnet, LeadMagnetStatus, LeadMagnetType,
    Product, ProductStatus, PublishStatus, ScheduleItem,
};
use affbox_core::StoreConfig;
use chrono::NaiveDate;

/// 数据层的初始状态
#[derive(Debug, Clone, Default)]
pub struct StoreState {
    pub products: Vec<Product>,
    pub content_items: Vec<ContentItem>,
    pub schedule_items: Vec<ScheduleItem>,
    pub lead_magnets: Vec<LeadMagnet>,
    pub ai_services: AiServiceFlags,
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or(NaiveDate::MIN)
}

fn product(
    id: u32,
    name: &str,
    category: &str,
    commission: &str,
    status: ProductStatus,
    date_added: NaiveDate,
    revenue: &str,
) -> Product {
    Product {
        id,
        name: name.to_string(),
        category: category.to_string(),
        commission: commission.to_string(),
        status,
        date_added,
        revenue: revenue.to_string(),
    }
}

fn content(
    id: u32,
    title: &str,
    content_type: ContentType,
    status: PublishStatus,
    date_created: NaiveDate,
    platform: &str,
) -> ContentItem {
    ContentItem {
        id,
        title: title.to_string(),
        content_type,
        product: "Kartra".to_string(),
        status,
        date_created,
        platform: platform.to_string(),
    }
}

fn schedule(
    id: u32,
    title: &str,
    date: NaiveDate,
    platform: &str,
    content_type: ContentType,
    status: PublishStatus,
) -> ScheduleItem {
    ScheduleItem {
        id,
        title: title.to_string(),
        date,
        platform: platform.to_string(),
        content_type,
        status,
    }
}

fn magnet(
    id: u32,
    title: &str,
    magnet_type: LeadMagnetType,
    status: LeadMagnetStatus,
    date_created: NaiveDate,
    downloads: u32,
) -> LeadMagnet {
    LeadMagnet {
        id,
        title: title.to_string(),
        magnet_type,
        product: "Kartra".to_string(),
        status,
        date_created,
        downloads,
    }
}

impl StoreState {
    /// 按 `seed_sample_data` 选择示例数据或空状态
    pub fn from_config(config: &StoreConfig) -> Self {
        if config.seed_sample_data {
            Self::sample()
        } else {
            Self::default()
        }
    }

    #[rustfmt::skip]
    pub fn sample() -> Self {
        use ContentType::*;
        use PublishStatus::*;

        let products = vec![
            product(1, "Kartra", "Marketing Automation", "40%", ProductStatus::Active, date(2023, 10, 15), "$2,450.00"),
            product(2, "ClickFunnels", "Sales Funnels", "35%", ProductStatus::Active, date(2023, 11, 2), "$1,875.50"),
            product(3, "ConvertKit", "Email Marketing", "30%", ProductStatus::Active, date(2023, 12, 10), "$950.25"),
            product(4, "Teachable", "Online Courses", "45%", ProductStatus::Inactive, date(2024, 1, 5), "$0.00"),
            product(5, "Kajabi", "All-in-One Platform", "30%", ProductStatus::Active, date(2024, 2, 18), "$725.80"),
        ];

        let content_items = vec![
            content(1, "Why Kartra is the Best Marketing Tool in 2025", BlogPost, Published, date(2024, 3, 15), "WordPress"),
            content(2, "10 Ways Kartra Can Automate Your Business", BlogPost, Draft, date(2024, 3, 18), "WordPress"),
            content(3, "Just discovered how Kartra can 10x your marketing results!", SocialPost, Scheduled, date(2024, 3, 20), "Twitter"),
            content(4, "Kartra vs ClickFunnels: Which is Better?", Comparison, Published, date(2024, 3, 22), "WordPress"),
            content(5, "Transform your business with Kartra's automation features", SocialPost, Scheduled, date(2024, 3, 25), "LinkedIn"),
        ];

        let schedule_items = vec![
            schedule(1, "Why Kartra is the Best Marketing Tool in 2025", date(2024, 4, 15), "WordPress", BlogPost, Published),
            schedule(2, "10 Ways Kartra Can Automate Your Business", date(2024, 4, 18), "WordPress", BlogPost, Scheduled),
            schedule(3, "Just discovered how Kartra can 10x your marketing results!", date(2024, 4, 20), "Twitter", SocialPost, Scheduled),
            schedule(4, "Transform your business with Kartra's automation features", date(2024, 4, 22), "LinkedIn", SocialPost, Scheduled),
            schedule(5, "Kartra vs ClickFunnels: Which is Better?", date(2024, 4, 25), "WordPress", Comparison, Scheduled),
        ];

        let lead_magnets = vec![
            magnet(1, "The Kartra Setup Checklist", LeadMagnetType::Checklist, LeadMagnetStatus::Active, date(2024, 3, 10), 127),
            magnet(2, "The Ultimate Guide to Marketing Automation with Kartra", LeadMagnetType::Ebook, LeadMagnetStatus::Active, date(2024, 3, 15), 89),
            magnet(3, "How to Create a High-Converting Sales Funnel with Kartra", LeadMagnetType::Guide, LeadMagnetStatus::Active, date(2024, 3, 20), 64),
            magnet(4, "ClickFunnels vs Kartra: Which is Right for You?", LeadMagnetType::Comparison, LeadMagnetStatus::Draft, date(2024, 3, 25), 0),
            magnet(5, "10 Email Templates for Kartra", LeadMagnetType::Templates, LeadMagnetStatus::Active, date(2024, 3, 28), 42),
        ];

        Self {
            products,
            content_items,
            schedule_items,
            lead_magnets,
            ai_services: AiServiceFlags::default(),
        }
    }
}
