//! 工作流类型定义
//!
//! 定义各阶段的输入输出结构，全部可序列化为 JSON 落盘

use affbox_core::models::ContentType;
use affbox_core::WorkflowError;
use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

// ============================================================================
// 平台
// ============================================================================

/// 发布平台
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    WordPress,
    Twitter,
    Facebook,
    LinkedIn,
    Instagram,
}

/// 社媒帖子没有自带平台时的轮转顺序
pub const SOCIAL_ROTATION: [Platform; 3] = [Platform::Twitter, Platform::Facebook, Platform::LinkedIn];

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::WordPress => "wordpress",
            Platform::Twitter => "twitter",
            Platform::Facebook => "facebook",
            Platform::LinkedIn => "linkedin",
            Platform::Instagram => "instagram",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = WorkflowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "wordpress" => Ok(Platform::WordPress),
            "twitter" => Ok(Platform::Twitter),
            "facebook" => Ok(Platform::Facebook),
            "linkedin" => Ok(Platform::LinkedIn),
            "instagram" => Ok(Platform::Instagram),
            other => Err(WorkflowError::UnknownPlatform(other.to_string())),
        }
    }
}

// ============================================================================
// 调研
// ============================================================================

/// 产品调研数据
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProductData {
    pub name: String,
    pub category: String,
    pub features: Vec<String>,
    pub benefits: Vec<String>,
    pub commission_rate: String,
}

/// 竞品数据
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CompetitorData {
    pub name: String,
    pub category: String,
    pub features: Vec<String>,
}

/// 调研记录（落盘格式）
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ResearchRecord {
    pub product: ProductData,
    pub competitors: IndexMap<String, CompetitorData>,
}

/// 调研阶段结果
#[derive(Debug, Clone)]
pub struct ResearchResult {
    pub record: ResearchRecord,
    pub file_path: PathBuf,
    /// 是否复用了已有记录
    pub loaded: bool,
}

// ============================================================================
// 内容
// ============================================================================

/// 生成的博客文章
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BlogPost {
    pub title: String,
    pub content: String,
    pub file_path: PathBuf,
}

/// 生成的社媒帖子
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocialPost {
    pub platform: Platform,
    pub content: String,
    pub file_path: PathBuf,
}

/// 图片占位产物
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImageArtifact {
    pub image_type: String,
    pub prompt: String,
    pub file_path: PathBuf,
}

/// 内容引用
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContentRef {
    pub file_path: PathBuf,
    pub content_type: ContentType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform: Option<Platform>,
    pub product: String,
}

/// 图片引用
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImageRef {
    pub file_path: PathBuf,
    pub image_type: String,
    pub platform: String,
    pub product: String,
}

/// 一批内容：排期阶段的输入
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ContentBatch {
    pub blog_posts: Vec<ContentRef>,
    pub social_posts: Vec<ContentRef>,
    pub product_images: Vec<ImageRef>,
    pub social_media_images: Vec<ImageRef>,
}

impl ContentBatch {
    pub fn total_text_items(&self) -> usize {
        self.blog_posts.len() + self.social_posts.len()
    }

    pub fn total_images(&self) -> usize {
        self.product_images.len() + self.social_media_images.len()
    }
}

// ============================================================================
// 排期与执行
// ============================================================================

/// 一次计划发布
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScheduleEntry {
    pub date: DateTime<Utc>,
    pub platform: Platform,
    pub content_type: ContentType,
    pub content_path: PathBuf,
    pub image_path: Option<PathBuf>,
}

/// 排期文件内容
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleDocument {
    pub created_at: DateTime<Utc>,
    pub start_date: DateTime<Utc>,
    pub duration_days: u32,
    pub total_posts: usize,
    pub schedule: Vec<ScheduleEntry>,
}

/// 排期阶段结果
#[derive(Debug, Clone)]
pub struct PostingSchedule {
    pub schedule: Vec<ScheduleEntry>,
    pub total_posts: usize,
    pub schedule_path: PathBuf,
}

/// 模拟发布回执
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PublishReceipt {
    pub success: bool,
    pub simulation: bool,
    pub log_file: PathBuf,
    pub url: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    Success,
    Failed,
}

/// 单条排期的执行结果
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PostOutcome {
    pub date: DateTime<Utc>,
    pub platform: Platform,
    pub content_type: ContentType,
    pub status: PostStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<PublishReceipt>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// 执行结果文件内容
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExecutionDocument {
    pub executed_at: DateTime<Utc>,
    pub total_posts: usize,
    pub successful: usize,
    pub failed: usize,
    pub posts: Vec<PostOutcome>,
}

/// 执行阶段结果
#[derive(Debug, Clone)]
pub struct ExecutionResult {
    pub successful: usize,
    pub failed: usize,
    pub posts: Vec<PostOutcome>,
    pub results_path: PathBuf,
}

// ============================================================================
// 引流
// ============================================================================

/// 落地页的功能卡片
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LandingPageFeature {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LandingPageResult {
    pub headline: String,
    pub description: String,
    pub features: usize,
    pub output_path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeadMagnetResult {
    pub title: String,
    pub description: String,
    pub items: usize,
    pub output_path: PathBuf,
}

// ============================================================================
// 分析
// ============================================================================

/// 事件追踪结果，`event_id` 为事件日志的新长度（从 1 开始）
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TrackedEvent {
    pub success: bool,
    pub event_type: String,
    pub event_id: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReportPeriod {
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReportSummary {
    pub impressions: u64,
    pub clicks: u64,
    pub conversions: u64,
    pub revenue: u64,
    pub ctr: String,
    pub conversion_rate: String,
    pub revenue_per_click: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TrafficSources {
    pub organic: u64,
    pub social: u64,
    pub email: u64,
    pub direct: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlatformConversions {
    pub wordpress: u64,
    pub twitter: u64,
    pub facebook: u64,
    pub linkedin: u64,
}

/// 分析报告
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct AnalyticsReport {
    pub period: ReportPeriod,
    pub summary: ReportSummary,
    pub traffic_sources: TrafficSources,
    pub platforms: PlatformConversions,
    pub generated_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct ReportResult {
    pub report_data: AnalyticsReport,
    pub report_path: PathBuf,
}

// ============================================================================
// 汇总
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResearchStepSummary {
    pub product_data: ProductData,
    pub competitor_count: usize,
    pub loaded_existing: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentStepSummary {
    pub blog_posts: usize,
    pub social_posts: usize,
    pub images: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostingStepSummary {
    pub schedule_path: PathBuf,
    pub execution_path: PathBuf,
    pub posts_scheduled: usize,
    pub posts_executed: usize,
    pub posts_failed: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeadGenStepSummary {
    pub landing_page_path: PathBuf,
    pub lead_magnet_path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsStepSummary {
    pub utm_links: IndexMap<String, String>,
    pub events_tracked: usize,
    pub report_path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowSteps {
    pub product_research: ResearchStepSummary,
    pub content_generation: ContentStepSummary,
    pub platform_posting: PostingStepSummary,
    pub lead_generation: LeadGenStepSummary,
    pub analytics: AnalyticsStepSummary,
}

/// 整个工作流的汇总（落盘格式）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowSummary {
    pub run_id: String,
    pub product: String,
    pub workflow_completed_at: DateTime<Utc>,
    pub steps: WorkflowSteps,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_round_trip_names() {
        assert_eq!("LinkedIn".parse::<Platform>().unwrap(), Platform::LinkedIn);
        assert_eq!(Platform::WordPress.to_string(), "wordpress");
        assert_eq!(
            serde_json::to_string(&Platform::LinkedIn).unwrap(),
            "\"linkedin\""
        );
        assert!(matches!(
            "myspace".parse::<Platform>(),
            Err(WorkflowError::UnknownPlatform(_))
        ));
    }

    #[test]
    fn test_post_outcome_omits_empty_fields() {
        let outcome = PostOutcome {
            date: Utc::now(),
            platform: Platform::Twitter,
            content_type: ContentType::SocialPost,
            status: PostStatus::Failed,
            result: None,
            error: Some("missing".to_string()),
        };
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["status"], "failed");
        assert_eq!(json["content_type"], "social_post");
        assert!(json.get("result").is_none());
    }
}
