//! 产品调研
//!
//! 首次调研生成固定的功能/卖点列表和一条竞品记录并落盘；
//! 之后对同一产品（大小写不敏感）直接读取已有记录。

use crate::layout::{read_text, write_json, DataLayout};
use crate::types::{CompetitorData, ProductData, ResearchRecord, ResearchResult};
use crate::Result;
use affbox_core::naming::file_stem;
use indexmap::IndexMap;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

const DEFAULT_CATEGORY: &str = "Marketing Automation";
const DEFAULT_COMPETITOR: &str = "ClickFunnels";
const DEFAULT_COMMISSION: &str = "40%";

const PRODUCT_FEATURES: [&str; 5] = [
    "All-in-one marketing platform",
    "Email marketing automation",
    "Landing page builder",
    "Membership site creation",
    "Affiliate management",
];

const PRODUCT_BENEFITS: [&str; 4] = [
    "Save time with automation",
    "Increase conversion rates",
    "Streamline your marketing",
    "All tools in one platform",
];

const COMPETITOR_FEATURES: [&str; 5] = [
    "Sales funnel builder",
    "Landing page creation",
    "Email marketing",
    "Membership areas",
    "Affiliate program",
];

fn owned(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

/// 产品调研器
pub struct ProductResearcher {
    research_dir: PathBuf,
    delay: Duration,
}

impl ProductResearcher {
    pub fn new(layout: &DataLayout, delay: Duration) -> Self {
        Self {
            research_dir: layout.research_dir(),
            delay,
        }
    }

    /// 调研记录的落盘路径
    pub fn record_path(&self, product_name: &str) -> PathBuf {
        self.research_dir
            .join(format!("{}_research.json", file_stem(product_name)))
    }

    /// 读取已有调研记录，不存在时返回 `None`
    pub fn load_data(&self, product_name: &str) -> Result<Option<ResearchRecord>> {
        let path = self.record_path(product_name);
        if !path.exists() {
            return Ok(None);
        }
        let raw = read_text(&path)?;
        let record: ResearchRecord = serde_json::from_str(&raw)?;
        info!("[ProductResearcher] 已加载 {} 的调研数据", product_name);
        Ok(Some(record))
    }

    /// 执行调研并落盘（会覆盖已有记录）
    pub async fn research_product(
        &self,
        product_name: &str,
        niche: Option<&str>,
        competitor: Option<&str>,
    ) -> Result<ResearchResult> {
        info!("[ProductResearcher] 正在调研 {}...", product_name);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let record = build_record(product_name, niche, competitor);
        let file_path = self.record_path(product_name);
        write_json(&file_path, &record)?;

        info!(
            "[ProductResearcher] 调研完成，竞品 {} 个，已保存到 {}",
            record.competitors.len(),
            file_path.display()
        );
        Ok(ResearchResult {
            record,
            file_path,
            loaded: false,
        })
    }

    /// 有记录则复用，否则调研
    pub async fn research_or_load(
        &self,
        product_name: &str,
        niche: Option<&str>,
        competitor: Option<&str>,
    ) -> Result<ResearchResult> {
        if let Some(record) = self.load_data(product_name)? {
            return Ok(ResearchResult {
                record,
                file_path: self.record_path(product_name),
                loaded: true,
            });
        }
        self.research_product(product_name, niche, competitor).await
    }
}

/// 生成调研记录
pub fn build_record(
    product_name: &str,
    niche: Option<&str>,
    competitor: Option<&str>,
) -> ResearchRecord {
    let category = niche.unwrap_or(DEFAULT_CATEGORY).to_string();
    let competitor = competitor.unwrap_or(DEFAULT_COMPETITOR).to_string();

    let product = ProductData {
        name: product_name.to_string(),
        category: category.clone(),
        features: owned(&PRODUCT_FEATURES),
        benefits: owned(&PRODUCT_BENEFITS),
        commission_rate: DEFAULT_COMMISSION.to_string(),
    };

    let mut competitors = IndexMap::new();
    competitors.insert(
        competitor.clone(),
        CompetitorData {
            name: competitor,
            category,
            features: owned(&COMPETITOR_FEATURES),
        },
    );

    ResearchRecord {
        product,
        competitors,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn researcher(tmp: &TempDir) -> ProductResearcher {
        let layout = DataLayout::create(tmp.path()).unwrap();
        ProductResearcher::new(&layout, Duration::ZERO)
    }

    #[test]
    fn test_build_record_defaults() {
        let record = build_record("Kartra", None, None);
        assert_eq!(record.product.category, "Marketing Automation");
        assert_eq!(record.product.commission_rate, "40%");
        assert_eq!(record.product.features.len(), 5);
        assert_eq!(record.product.benefits.len(), 4);
        let competitor = record.competitors.get("ClickFunnels").unwrap();
        assert_eq!(competitor.category, "Marketing Automation");
    }

    #[test]
    fn test_build_record_overrides() {
        let record = build_record("Kajabi", Some("Online Courses"), Some("Teachable"));
        assert_eq!(record.product.category, "Online Courses");
        assert_eq!(record.competitors.len(), 1);
        assert_eq!(record.competitors["Teachable"].category, "Online Courses");
    }

    #[tokio::test]
    async fn test_research_is_idempotent() {
        let tmp = TempDir::new().expect("create temp dir");
        let researcher = researcher(&tmp);

        let first = researcher
            .research_or_load("Kartra", Some("Funnels"), None)
            .await
            .unwrap();
        assert!(!first.loaded);
        assert!(first.file_path.ends_with("kartra_research.json"));

        // 第二次参数不同也应当复用第一次的记录
        let second = researcher
            .research_or_load("KARTRA", None, Some("Other"))
            .await
            .unwrap();
        assert!(second.loaded);
        assert_eq!(second.record, first.record);
    }

    #[test]
    fn test_load_data_missing() {
        let tmp = TempDir::new().expect("create temp dir");
        assert!(researcher(&tmp).load_data("Nobody").unwrap().is_none());
    }

    #[test]
    fn test_load_data_corrupt_file() {
        let tmp = TempDir::new().expect("create temp dir");
        let researcher = researcher(&tmp);
        std::fs::write(researcher.record_path("Kartra"), "not json").unwrap();
        assert!(matches!(
            researcher.load_data("Kartra"),
            Err(affbox_core::WorkflowError::Json(_))
        ));
    }
}
