//! 完整工作流
//!
//! 调研 → 内容生成 → 排期与发布 → 引流资料 → 分析，各阶段严格顺序执行，
//! 除发布阶段外任何阶段出错都会中止后续阶段。

use crate::analytics::AnalyticsTracker;
use crate::content::ContentGenerator;
use crate::layout::{write_json, DataLayout};
use crate::leadgen::{generate_utm_link, LeadGenerator};
use crate::research::ProductResearcher;
use crate::scheduler::PostingScheduler;
use crate::types::{
    AnalyticsStepSummary, ContentBatch, ContentRef, ContentStepSummary, ImageRef,
    LandingPageFeature, LeadGenStepSummary, Platform, PostingStepSummary, ResearchStepSummary,
    WorkflowSteps, WorkflowSummary,
};
use crate::Result;
use affbox_core::models::ContentType;
use affbox_core::naming::{affiliate_link, file_stem};
use affbox_core::{WorkflowConfig, WorkflowError};
use chrono::{DateTime, Duration, Utc};
use indexmap::IndexMap;
use rand::Rng;
use serde_json::{json, Map, Value};
use std::path::PathBuf;
use std::time::Duration as StdDuration;
use tracing::info;
use uuid::Uuid;

const CLICKS_PER_SOURCE: usize = 3;

/// 单次运行的可选参数
#[derive(Debug, Clone, Default)]
pub struct WorkflowOptions {
    /// 覆盖调研的品类
    pub niche: Option<String>,
    /// 覆盖竞品名
    pub competitor: Option<String>,
}

/// 工作流
pub struct Workflow {
    layout: DataLayout,
    platforms: Vec<Platform>,
    posts_per_platform: usize,
    duration_days: u32,
    report_window_days: u32,
    researcher: ProductResearcher,
    generator: ContentGenerator,
    scheduler: PostingScheduler,
    leads: LeadGenerator,
    analytics: AnalyticsTracker,
}

impl Workflow {
    /// 根据配置创建工作流并准备目录
    ///
    /// 平台名和天数在创建目录之前校验，配置有误时不会留下任何产物。
    pub fn new(config: &WorkflowConfig) -> Result<Self> {
        let platforms = config
            .social_platforms
            .iter()
            .map(|name| name.parse::<Platform>())
            .collect::<Result<Vec<_>>>()?;
        let now = Utc::now();
        shift_days(now, config.duration_days, true)?;
        shift_days(now, config.report_window_days, false)?;
        let layout = DataLayout::create(&config.data_dir)?;

        Ok(Self {
            researcher: ProductResearcher::new(
                &layout,
                StdDuration::from_millis(config.research_delay_ms),
            ),
            generator: ContentGenerator::new(&layout),
            scheduler: PostingScheduler::new(&layout),
            leads: LeadGenerator::new(&layout),
            analytics: AnalyticsTracker::new(&layout),
            platforms,
            posts_per_platform: config.posts_per_platform,
            duration_days: config.duration_days,
            report_window_days: config.report_window_days,
            layout,
        })
    }

    pub fn layout(&self) -> &DataLayout {
        &self.layout
    }

    /// 汇总文件路径
    pub fn summary_path(&self, product_name: &str) -> PathBuf {
        self.layout.root().join(format!(
            "{}_complete_workflow_summary.json",
            file_stem(product_name)
        ))
    }

    /// 运行完整工作流并保存汇总
    pub async fn run(&self, product_name: &str, options: &WorkflowOptions) -> Result<WorkflowSummary> {
        let run_id = Uuid::new_v4().to_string();
        info!("[Workflow] 开始运行 {} (run_id={})", product_name, run_id);
        let link = affiliate_link(product_name);

        // Step 1: 产品调研
        info!("[Workflow] [STEP 1] 产品调研");
        let research = self
            .researcher
            .research_or_load(
                product_name,
                options.niche.as_deref(),
                options.competitor.as_deref(),
            )
            .await?;
        let product = &research.record.product;

        // Step 2: 内容生成
        info!("[Workflow] [STEP 2] 内容生成");
        let blog_post = self.generator.generate_blog_post(
            product_name,
            &format!("Why {product_name} is the Best Marketing Tool in 2025"),
            &product.features,
            &product.benefits,
            &link,
        )?;
        let social_posts = self.generator.generate_social_posts(
            product_name,
            &product.features,
            &product.benefits,
            &self.platforms,
            self.posts_per_platform,
        )?;
        let product_image =
            self.generator
                .simulate_image_generation(product_name, "product showcase", &product.features)?;
        let social_image =
            self.generator
                .simulate_image_generation(product_name, "social media", &product.features)?;

        let batch = ContentBatch {
            blog_posts: vec![ContentRef {
                file_path: blog_post.file_path.clone(),
                content_type: ContentType::BlogPost,
                platform: None,
                product: product_name.to_string(),
            }],
            social_posts: social_posts
                .iter()
                .map(|post| ContentRef {
                    file_path: post.file_path.clone(),
                    content_type: ContentType::SocialPost,
                    platform: Some(post.platform),
                    product: product_name.to_string(),
                })
                .collect(),
            product_images: vec![image_ref(&product_image.file_path, "product", product_name)],
            social_media_images: vec![image_ref(&social_image.file_path, "social", product_name)],
        };

        // Step 3: 排期与发布
        info!("[Workflow] [STEP 3] 排期与发布");
        let schedule = self
            .scheduler
            .create_posting_schedule(&batch, Utc::now(), self.duration_days)?;
        let execution = self.scheduler.execute_schedule(&schedule.schedule)?;

        // Step 4: 引流资料
        info!("[Workflow] [STEP 4] 引流资料");
        let landing_page = self.leads.generate_landing_page(
            product_name,
            &format!("Grow Your Business with {product_name}"),
            "The all-in-one marketing platform that helps you automate your business and increase sales.",
            "Start Your Free Trial",
            &link,
            &landing_features(product_name),
        )?;
        let lead_magnet = self.leads.generate_lead_magnet(
            product_name,
            &format!("The {product_name} Setup Checklist"),
            &format!(
                "This checklist will guide you through setting up {product_name} for maximum success."
            ),
            &checklist_items(product_name),
        )?;

        // Step 5: 分析
        info!("[Workflow] [STEP 5] 分析");
        let mut utm_links = IndexMap::new();
        utm_links.insert(
            "email".to_string(),
            generate_utm_link(&link, "email_campaign", "newsletter", "email")?,
        );
        utm_links.insert(
            "social".to_string(),
            generate_utm_link(&link, "social_promotion", "facebook", "social")?,
        );
        utm_links.insert(
            "blog".to_string(),
            generate_utm_link(&link, "content_marketing", "blog", "referral")?,
        );
        for (source, url) in &utm_links {
            info!("[Workflow] {} 追踪链接: {}", source, url);
        }

        let events_tracked = self.simulate_events(product_name)?;

        let end = Utc::now();
        let start = shift_days(end, self.report_window_days, false)?;
        let report = self.analytics.generate_report(start, end)?;

        let summary = WorkflowSummary {
            run_id,
            product: product_name.to_string(),
            workflow_completed_at: Utc::now(),
            steps: WorkflowSteps {
                product_research: ResearchStepSummary {
                    product_data: product.clone(),
                    competitor_count: research.record.competitors.len(),
                    loaded_existing: research.loaded,
                },
                content_generation: ContentStepSummary {
                    blog_posts: batch.blog_posts.len(),
                    social_posts: batch.social_posts.len(),
                    images: batch.total_images(),
                },
                platform_posting: PostingStepSummary {
                    schedule_path: schedule.schedule_path,
                    execution_path: execution.results_path,
                    posts_scheduled: schedule.total_posts,
                    posts_executed: execution.successful,
                    posts_failed: execution.failed,
                },
                lead_generation: LeadGenStepSummary {
                    landing_page_path: landing_page.output_path,
                    lead_magnet_path: lead_magnet.output_path,
                },
                analytics: AnalyticsStepSummary {
                    utm_links,
                    events_tracked,
                    report_path: report.report_path,
                },
            },
        };

        let summary_path = self.summary_path(product_name);
        write_json(&summary_path, &summary)?;
        info!("[Workflow] 运行完成，汇总已保存到 {}", summary_path.display());

        Ok(summary)
    }

    /// 每个来源 3 次点击，email/social 各 1 次转化
    fn simulate_events(&self, product_name: &str) -> Result<usize> {
        let link_id = format!("{}_link", file_stem(product_name));
        let mut tracked = 0;

        for source in ["email", "social", "blog"] {
            for _ in 0..CLICKS_PER_SOURCE {
                self.analytics.track_event(
                    "click",
                    event_payload(json!({
                        "link_id": link_id,
                        "source": source,
                        "campaign": format!("{source}_campaign"),
                    })),
                )?;
                tracked += 1;
            }
        }

        let mut rng = rand::thread_rng();
        for source in ["email", "social"] {
            self.analytics.track_event(
                "conversion",
                event_payload(json!({
                    "link_id": link_id,
                    "amount": rng.gen_range(50..250u32),
                    "source": source,
                    "campaign": format!("{source}_campaign"),
                })),
            )?;
            tracked += 1;
        }

        Ok(tracked)
    }
}

/// 按天数前后平移，超出日期范围时返回 `DateOverflow`
fn shift_days(at: DateTime<Utc>, days: u32, forward: bool) -> Result<DateTime<Utc>> {
    let delta = Duration::days(i64::from(days));
    let shifted = if forward {
        at.checked_add_signed(delta)
    } else {
        at.checked_sub_signed(delta)
    };
    shifted.ok_or(WorkflowError::DateOverflow { days })
}

fn image_ref(path: &std::path::Path, image_type: &str, product_name: &str) -> ImageRef {
    ImageRef {
        file_path: path.to_path_buf(),
        image_type: image_type.to_string(),
        platform: "all".to_string(),
        product: product_name.to_string(),
    }
}

fn event_payload(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

fn landing_features(product_name: &str) -> Vec<LandingPageFeature> {
    [
        (
            "All-in-One Platform".to_string(),
            format!("{product_name} combines all the tools you need in one place."),
        ),
        (
            "Easy Automation".to_string(),
            "Set up automated marketing sequences in minutes.".to_string(),
        ),
        (
            "Beautiful Templates".to_string(),
            "Start with professionally designed templates for quick setup.".to_string(),
        ),
    ]
    .into_iter()
    .map(|(title, description)| LandingPageFeature { title, description })
    .collect()
}

fn checklist_items(product_name: &str) -> Vec<String> {
    let mut items = vec![format!(
        "Set up your {product_name} account and complete your profile"
    )];
    items.extend(
        [
            "Define your target audience and customer avatar",
            "Create your first landing page for lead capture",
            "Set up your welcome email sequence",
            "Create a lead magnet to offer visitors",
            "Set up tracking for your campaigns",
            "Create a sales funnel for your main product",
            "Set up abandoned cart recovery emails",
            "Create a customer onboarding sequence",
            "Set up analytics and reporting dashboards",
        ]
        .map(String::from),
    );
    items
}
