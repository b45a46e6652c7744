//! 发布排期
//!
//! 排期算法：
//! - 博客每 3 天一篇，第 i 篇在 `start + 3i` 天
//! - 社媒帖子按 `ceil(n / duration)` 条/天分桶，第 i 条在 `start + floor(i / 每天条数)` 天
//! - 只保留落在 `[start, start + duration]` 内的条目，超出的直接丢弃
//! - 最终按日期稳定排序
//! - 窗口终点超出可表示的日期范围时返回 `DateOverflow`

use crate::layout::{write_json, DataLayout};
use crate::publisher::PlatformPublisher;
use crate::types::{
    ContentBatch, ExecutionDocument, ExecutionResult, Platform, PostOutcome, PostStatus,
    PostingSchedule, ScheduleDocument, ScheduleEntry, SOCIAL_ROTATION,
};
use crate::Result;
use affbox_core::models::ContentType;
use affbox_core::naming::file_timestamp;
use affbox_core::WorkflowError;
use chrono::{DateTime, Duration, Utc};
use std::path::PathBuf;
use tracing::{info, warn};

const BLOG_INTERVAL_DAYS: i64 = 3;

/// 计算排期（纯函数）
pub fn plan_schedule(
    batch: &ContentBatch,
    start: DateTime<Utc>,
    duration_days: u32,
) -> Result<Vec<ScheduleEntry>> {
    let window_end = start
        .checked_add_signed(Duration::days(i64::from(duration_days)))
        .ok_or(WorkflowError::DateOverflow {
            days: duration_days,
        })?;
    let in_window = |offset: i64| {
        start
            .checked_add_signed(Duration::days(offset))
            .filter(|date| *date <= window_end)
    };
    let image_path = batch.product_images.first().map(|img| img.file_path.clone());
    let mut schedule = Vec::with_capacity(batch.total_text_items());

    for (index, post) in batch.blog_posts.iter().enumerate() {
        if let Some(date) = in_window(BLOG_INTERVAL_DAYS * index as i64) {
            schedule.push(ScheduleEntry {
                date,
                platform: Platform::WordPress,
                content_type: ContentType::BlogPost,
                content_path: post.file_path.clone(),
                image_path: image_path.clone(),
            });
        }
    }

    let total_social = batch.social_posts.len();
    let posts_per_day = if duration_days == 0 {
        total_social.max(1)
    } else {
        total_social.div_ceil(duration_days as usize).max(1)
    };

    for (index, post) in batch.social_posts.iter().enumerate() {
        if let Some(date) = in_window((index / posts_per_day) as i64) {
            schedule.push(ScheduleEntry {
                date,
                platform: post
                    .platform
                    .unwrap_or(SOCIAL_ROTATION[index % SOCIAL_ROTATION.len()]),
                content_type: ContentType::SocialPost,
                content_path: post.file_path.clone(),
                image_path: image_path.clone(),
            });
        }
    }

    schedule.sort_by_key(|entry| entry.date);
    Ok(schedule)
}

/// 排期器：生成排期文件并逐条执行
pub struct PostingScheduler {
    scheduler_dir: PathBuf,
    publisher: PlatformPublisher,
}

impl PostingScheduler {
    pub fn new(layout: &DataLayout) -> Self {
        Self {
            scheduler_dir: layout.scheduler_dir(),
            publisher: PlatformPublisher::new(layout),
        }
    }

    /// 生成排期并保存为 `posting_schedule_<ts>.json`
    pub fn create_posting_schedule(
        &self,
        batch: &ContentBatch,
        start: DateTime<Utc>,
        duration_days: u32,
    ) -> Result<PostingSchedule> {
        info!(
            "[PostingScheduler] 创建 {} 天的排期，开始于 {}",
            duration_days,
            start.date_naive()
        );
        let schedule = plan_schedule(batch, start, duration_days)?;
        let now = Utc::now();
        let schedule_path = self
            .scheduler_dir
            .join(format!("posting_schedule_{}.json", file_timestamp(now)));

        let document = ScheduleDocument {
            created_at: now,
            start_date: start,
            duration_days,
            total_posts: schedule.len(),
            schedule,
        };
        write_json(&schedule_path, &document)?;

        info!("[PostingScheduler] 排期包含 {} 条发布", document.total_posts);
        Ok(PostingSchedule {
            total_posts: document.total_posts,
            schedule: document.schedule,
            schedule_path,
        })
    }

    /// 按顺序执行排期，单条失败只记录不中断
    pub fn execute_schedule(&self, schedule: &[ScheduleEntry]) -> Result<ExecutionResult> {
        info!("[PostingScheduler] 执行排期，共 {} 条", schedule.len());
        let mut posts = Vec::with_capacity(schedule.len());
        let mut successful = 0;
        let mut failed = 0;

        for entry in schedule {
            let outcome = match self.publisher.publish(entry) {
                Ok(receipt) => {
                    successful += 1;
                    PostOutcome {
                        date: entry.date,
                        platform: entry.platform,
                        content_type: entry.content_type,
                        status: PostStatus::Success,
                        result: Some(receipt),
                        error: None,
                    }
                }
                Err(err) => {
                    warn!(
                        "[PostingScheduler] 发布失败 {} {}: {}",
                        entry.platform,
                        entry.content_path.display(),
                        err
                    );
                    failed += 1;
                    PostOutcome {
                        date: entry.date,
                        platform: entry.platform,
                        content_type: entry.content_type,
                        status: PostStatus::Failed,
                        result: None,
                        error: Some(err.to_string()),
                    }
                }
            };
            posts.push(outcome);
        }

        let now = Utc::now();
        let results_path = self
            .scheduler_dir
            .join(format!("execution_results_{}.json", file_timestamp(now)));
        let document = ExecutionDocument {
            executed_at: now,
            total_posts: schedule.len(),
            successful,
            failed,
            posts,
        };
        write_json(&results_path, &document)?;

        info!(
            "[PostingScheduler] 执行完成: 成功 {}，失败 {}",
            successful, failed
        );
        Ok(ExecutionResult {
            successful,
            failed,
            posts: document.posts,
            results_path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ContentRef, ImageRef};
    use chrono::TimeZone;
    use proptest::prelude::*;
    use tempfile::TempDir;

    fn start() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, 9, 0, 0).unwrap()
    }

    fn content_ref(name: &str, content_type: ContentType, platform: Option<Platform>) -> ContentRef {
        ContentRef {
            file_path: PathBuf::from(name),
            content_type,
            platform,
            product: "Kartra".to_string(),
        }
    }

    fn blogs(n: usize) -> Vec<ContentRef> {
        (0..n)
            .map(|i| content_ref(&format!("blog_{i}.md"), ContentType::BlogPost, None))
            .collect()
    }

    fn socials(n: usize) -> Vec<ContentRef> {
        (0..n)
            .map(|i| content_ref(&format!("social_{i}.txt"), ContentType::SocialPost, None))
            .collect()
    }

    #[test]
    fn test_blog_posts_every_third_day_within_window() {
        let batch = ContentBatch {
            blog_posts: blogs(4),
            ..Default::default()
        };
        let schedule = plan_schedule(&batch, start(), 7).unwrap();

        let offsets: Vec<i64> = schedule
            .iter()
            .map(|e| (e.date - start()).num_days())
            .collect();
        assert_eq!(offsets, vec![0, 3, 6]);
        assert!(schedule.iter().all(|e| e.platform == Platform::WordPress));
    }

    #[test]
    fn test_social_posts_bucketed_per_day() {
        let batch = ContentBatch {
            social_posts: socials(7),
            ..Default::default()
        };
        let schedule = plan_schedule(&batch, start(), 3).unwrap();

        assert_eq!(schedule.len(), 7);
        let offsets: Vec<i64> = schedule
            .iter()
            .map(|e| (e.date - start()).num_days())
            .collect();
        assert_eq!(offsets, vec![0, 0, 0, 1, 1, 1, 2]);
        // 未带平台的帖子按轮转分配
        assert_eq!(schedule[0].platform, Platform::Twitter);
        assert_eq!(schedule[1].platform, Platform::Facebook);
        assert_eq!(schedule[2].platform, Platform::LinkedIn);
        assert_eq!(schedule[3].platform, Platform::Twitter);
    }

    #[test]
    fn test_own_platform_tag_wins_and_image_attached() {
        let batch = ContentBatch {
            social_posts: vec![content_ref(
                "a.txt",
                ContentType::SocialPost,
                Some(Platform::Instagram),
            )],
            product_images: vec![ImageRef {
                file_path: PathBuf::from("img.txt"),
                image_type: "product".to_string(),
                platform: "all".to_string(),
                product: "Kartra".to_string(),
            }],
            ..Default::default()
        };
        let schedule = plan_schedule(&batch, start(), 7).unwrap();
        assert_eq!(schedule[0].platform, Platform::Instagram);
        assert_eq!(schedule[0].image_path, Some(PathBuf::from("img.txt")));
    }

    #[test]
    fn test_zero_duration_keeps_day_zero_only() {
        let batch = ContentBatch {
            blog_posts: blogs(2),
            social_posts: socials(4),
            ..Default::default()
        };
        let schedule = plan_schedule(&batch, start(), 0).unwrap();
        assert_eq!(schedule.len(), 5);
        assert!(schedule.iter().all(|e| e.date == start()));
    }

    #[test]
    fn test_oversized_window_is_an_error() {
        let batch = ContentBatch {
            blog_posts: blogs(2),
            social_posts: socials(3),
            ..Default::default()
        };
        let err = plan_schedule(&batch, start(), u32::MAX).unwrap_err();
        assert!(matches!(err, WorkflowError::DateOverflow { days } if days == u32::MAX));
    }

    #[test]
    fn test_oversized_window_writes_no_schedule() {
        let tmp = TempDir::new().expect("create temp dir");
        let layout = DataLayout::create(tmp.path()).unwrap();
        let scheduler = PostingScheduler::new(&layout);
        let batch = ContentBatch {
            social_posts: socials(1),
            ..Default::default()
        };

        assert!(scheduler
            .create_posting_schedule(&batch, start(), u32::MAX)
            .is_err());
        assert_eq!(std::fs::read_dir(layout.scheduler_dir()).unwrap().count(), 0);
    }

    #[test]
    fn test_merged_schedule_is_sorted() {
        let batch = ContentBatch {
            blog_posts: blogs(3),
            social_posts: socials(9),
            ..Default::default()
        };
        let schedule = plan_schedule(&batch, start(), 7).unwrap();
        assert!(schedule.windows(2).all(|w| w[0].date <= w[1].date));
        // 同一天内博客排在社媒之前
        assert_eq!(schedule[0].content_type, ContentType::BlogPost);
    }

    #[test]
    fn test_execute_isolates_failures() {
        let tmp = TempDir::new().expect("create temp dir");
        let layout = DataLayout::create(tmp.path()).unwrap();
        let scheduler = PostingScheduler::new(&layout);

        let ok_a = layout.social_dir().join("a.txt");
        let ok_c = layout.social_dir().join("c.txt");
        std::fs::write(&ok_a, "post a").unwrap();
        std::fs::write(&ok_c, "post c").unwrap();

        let entry = |path: PathBuf| ScheduleEntry {
            date: start(),
            platform: Platform::Twitter,
            content_type: ContentType::SocialPost,
            content_path: path,
            image_path: None,
        };
        let schedule = vec![
            entry(ok_a),
            entry(layout.social_dir().join("missing.txt")),
            entry(ok_c),
        ];

        let result = scheduler.execute_schedule(&schedule).unwrap();
        assert_eq!(result.successful, 2);
        assert_eq!(result.failed, 1);
        assert_eq!(result.posts.len(), 3);
        assert_eq!(result.posts[1].status, PostStatus::Failed);
        assert!(result.posts[1].error.as_deref().unwrap().contains("missing.txt"));
        assert_eq!(result.posts[2].status, PostStatus::Success);

        let saved: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&result.results_path).unwrap()).unwrap();
        assert_eq!(saved["total_posts"], 3);
        assert_eq!(saved["failed"], 1);
    }

    #[test]
    fn test_create_posting_schedule_persists() {
        let tmp = TempDir::new().expect("create temp dir");
        let layout = DataLayout::create(tmp.path()).unwrap();
        let scheduler = PostingScheduler::new(&layout);
        let batch = ContentBatch {
            blog_posts: blogs(1),
            social_posts: socials(3),
            ..Default::default()
        };

        let planned = scheduler.create_posting_schedule(&batch, start(), 7).unwrap();
        assert_eq!(planned.total_posts, 4);
        let file_name = planned.schedule_path.file_name().unwrap().to_string_lossy();
        assert!(file_name.starts_with("posting_schedule_"));
        assert!(!file_name.contains(':'));

        let saved: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&planned.schedule_path).unwrap()).unwrap();
        assert_eq!(saved["duration_days"], 7);
        assert_eq!(saved["schedule"][0]["platform"], "wordpress");
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_entries_stay_in_window(
            n_blogs in 0usize..8,
            n_socials in 0usize..30,
            duration in 0u32..14,
        ) {
            let batch = ContentBatch {
                blog_posts: blogs(n_blogs),
                social_posts: socials(n_socials),
                ..Default::default()
            };
            let schedule = plan_schedule(&batch, start(), duration).unwrap();
            let end = start() + Duration::days(i64::from(duration));

            prop_assert!(schedule.iter().all(|e| e.date >= start() && e.date <= end));
            prop_assert!(schedule.windows(2).all(|w| w[0].date <= w[1].date));
            // 社媒帖子总能放进窗口
            let social_count = schedule
                .iter()
                .filter(|e| e.content_type == ContentType::SocialPost)
                .count();
            prop_assert_eq!(social_count, n_socials);
        }
    }
}
