//! 模拟发布
//!
//! 不调用任何平台 API，只为每次发布写一份日志并返回伪造的链接。

use crate::layout::{read_text, write_text, DataLayout};
use crate::types::{Platform, PublishReceipt, ScheduleEntry};
use crate::Result;
use affbox_core::naming::{file_timestamp, iso_timestamp, slugify};
use chrono::Utc;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::info;

/// 平台发布器
pub struct PlatformPublisher {
    logs_dir: PathBuf,
    // 同一毫秒内多次发布时区分日志文件名
    seq: AtomicU64,
}

impl PlatformPublisher {
    pub fn new(layout: &DataLayout) -> Self {
        Self {
            logs_dir: layout.posting_logs_dir(),
            seq: AtomicU64::new(0),
        }
    }

    fn log_path(&self, platform: Platform) -> (String, PathBuf) {
        let now = Utc::now();
        let seq = self.seq.fetch_add(1, Ordering::SeqCst) + 1;
        let path = self.logs_dir.join(format!(
            "{}_{}_{seq}.log",
            platform.as_str(),
            file_timestamp(now)
        ));
        (iso_timestamp(now), path)
    }

    /// 发布博客文章
    pub fn publish_to_wordpress(
        &self,
        title: &str,
        content: &str,
        image: Option<&Path>,
    ) -> Result<PublishReceipt> {
        info!("[PlatformPublisher] 发布到 WordPress: {}", title);
        let (timestamp, log_file) = self.log_path(Platform::WordPress);
        let url = format!("https://example.com/blog/{}", slugify(title));

        let log = format!(
            "WORDPRESS PUBLISHING SIMULATION\n\
==============================\n\
Timestamp: {timestamp}\n\
Title: {title}\n\
Image: {}\n\
Content Length: {} characters\n\n\
Status: Success (Simulation)\n\
URL: {url}\n\n\
[This is a simulation. In a real implementation, this would publish to an actual WordPress site.]",
            image_label(image),
            content.chars().count(),
        );
        write_text(&log_file, &log)?;

        Ok(PublishReceipt {
            success: true,
            simulation: true,
            log_file,
            url,
        })
    }

    /// 发布社媒帖子
    pub fn publish_to_social(
        &self,
        platform: Platform,
        content: &str,
        image: Option<&Path>,
    ) -> Result<PublishReceipt> {
        let preview: String = content.chars().take(30).collect();
        info!("[PlatformPublisher] 发布到 {}: {}...", platform, preview);
        let (timestamp, log_file) = self.log_path(platform);
        let url = format!("https://example.com/{}/post/123456", platform.as_str());

        let log = format!(
            "{} POSTING SIMULATION\n\
==============================\n\
Timestamp: {timestamp}\n\
Content: {content}\n\
Image: {}\n\n\
Status: Success (Simulation)\n\
URL: {url}\n\n\
[This is a simulation. In a real implementation, this would post to an actual {platform} account.]",
            platform.as_str().to_uppercase(),
            image_label(image),
        );
        write_text(&log_file, &log)?;

        Ok(PublishReceipt {
            success: true,
            simulation: true,
            log_file,
            url,
        })
    }

    /// 读取排期引用的内容并发布
    pub fn publish(&self, entry: &ScheduleEntry) -> Result<PublishReceipt> {
        let content = read_text(&entry.content_path)?;
        let image = entry.image_path.as_deref();

        match entry.platform {
            Platform::WordPress => {
                let title = markdown_title(content.lines().next().unwrap_or_default());
                self.publish_to_wordpress(title, &content, image)
            }
            platform => self.publish_to_social(platform, &content, image),
        }
    }
}

/// 去掉一级标题标记；`#` 后必须跟空白，否则原样保留
fn markdown_title(line: &str) -> &str {
    match line.strip_prefix('#') {
        Some(rest) if rest.starts_with(char::is_whitespace) => rest.trim_start(),
        _ => line,
    }
}

fn image_label(image: Option<&Path>) -> String {
    image
        .map(|p| p.display().to_string())
        .unwrap_or_else(|| "None".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use affbox_core::models::ContentType;
    use tempfile::TempDir;

    fn setup() -> (TempDir, DataLayout, PlatformPublisher) {
        let tmp = TempDir::new().expect("create temp dir");
        let layout = DataLayout::create(tmp.path()).unwrap();
        let publisher = PlatformPublisher::new(&layout);
        (tmp, layout, publisher)
    }

    #[test]
    fn test_wordpress_publish_uses_markdown_title() {
        let (_tmp, layout, publisher) = setup();
        let post = layout.text_dir().join("post.md");
        std::fs::write(&post, "# Why Kartra Rocks\n\nbody").unwrap();

        let entry = ScheduleEntry {
            date: Utc::now(),
            platform: Platform::WordPress,
            content_type: ContentType::BlogPost,
            content_path: post,
            image_path: None,
        };
        let receipt = publisher.publish(&entry).unwrap();
        assert_eq!(receipt.url, "https://example.com/blog/why-kartra-rocks");
        assert!(receipt.success && receipt.simulation);

        let log = std::fs::read_to_string(&receipt.log_file).unwrap();
        assert!(log.starts_with("WORDPRESS PUBLISHING SIMULATION"));
        assert!(log.contains("Title: Why Kartra Rocks\n"));
        assert!(log.contains("Image: None\n"));
        assert!(log.contains("Content Length: 24 characters"));
    }

    #[test]
    fn test_title_marker_needs_whitespace() {
        assert_eq!(markdown_title("# Why Kartra Rocks"), "Why Kartra Rocks");
        assert_eq!(markdown_title("#   Spaced"), "Spaced");
        assert_eq!(markdown_title("#Title"), "#Title");
        assert_eq!(markdown_title("## Subheading"), "## Subheading");
        assert_eq!(markdown_title("Plain title"), "Plain title");
    }

    #[test]
    fn test_social_publish_logs_full_body() {
        let (_tmp, _layout, publisher) = setup();
        let receipt = publisher
            .publish_to_social(Platform::LinkedIn, "hello world", Some(Path::new("img.txt")))
            .unwrap();
        assert_eq!(receipt.url, "https://example.com/linkedin/post/123456");
        let log = std::fs::read_to_string(&receipt.log_file).unwrap();
        assert!(log.starts_with("LINKEDIN POSTING SIMULATION"));
        assert!(log.contains("Content: hello world\n"));
        assert!(log.contains("Image: img.txt\n"));
    }

    #[test]
    fn test_log_files_never_collide() {
        let (_tmp, _layout, publisher) = setup();
        let a = publisher.publish_to_social(Platform::Twitter, "a", None).unwrap();
        let b = publisher.publish_to_social(Platform::Twitter, "b", None).unwrap();
        assert_ne!(a.log_file, b.log_file);
        assert!(a.log_file.exists() && b.log_file.exists());
    }

    #[test]
    fn test_publish_missing_file_fails() {
        let (_tmp, layout, publisher) = setup();
        let entry = ScheduleEntry {
            date: Utc::now(),
            platform: Platform::Twitter,
            content_type: ContentType::SocialPost,
            content_path: layout.root().join("missing.txt"),
            image_path: None,
        };
        assert!(publisher.publish(&entry).is_err());
    }
}
