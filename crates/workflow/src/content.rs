//! 内容生成
//!
//! 纯模板展开：博客文章、各平台社媒帖子和图片提示词。
//! 渲染函数不碰文件系统，`ContentGenerator` 负责落盘。

use crate::layout::{write_text, DataLayout};
use crate::types::{BlogPost, ImageArtifact, Platform, SocialPost};
use crate::Result;
use affbox_core::naming::{affiliate_link, file_stem};
use std::path::PathBuf;
use tracing::info;

const IMAGE_PLACEHOLDER: &str = "[This is a placeholder for a generated image. In a real implementation, this would be an actual image generated from the prompt above.]";

// 功能/卖点列表为空时的兜底文案
const FALLBACK_FEATURE: &str = "automation";
const FALLBACK_BENEFIT: &str = "grow your business";

// ============================================================================
// 图片类型
// ============================================================================

/// 图片提示词模板
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageType {
    ProductShowcase,
    Comparison,
    SocialMedia,
}

impl ImageType {
    /// 解析标签，未知标签回退为产品展示
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "comparison" => ImageType::Comparison,
            "social media" | "social_media" => ImageType::SocialMedia,
            _ => ImageType::ProductShowcase,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ImageType::ProductShowcase => "product showcase",
            ImageType::Comparison => "comparison",
            ImageType::SocialMedia => "social media",
        }
    }
}

// ============================================================================
// 模板
// ============================================================================

fn bullet_list(items: &[String]) -> String {
    items
        .iter()
        .map(|item| format!("- {item}"))
        .collect::<Vec<_>>()
        .join("\n")
}

/// 渲染博客文章（Markdown）
pub fn render_blog_post(
    product_name: &str,
    title: &str,
    features: &[String],
    benefits: &[String],
    affiliate_link: &str,
) -> String {
    format!(
        "# {title}\n\n\
## Introduction\n\
In today's digital landscape, finding the right marketing tool can make all the difference for your business. {product_name} stands out as a comprehensive solution that addresses multiple needs.\n\n\
## Powerful Features\n\
{product_name} offers the following key features:\n\
{features}\n\n\
## Benefits\n\
When you use {product_name}, you'll experience:\n\
{benefits}\n\n\
## Conclusion\n\
If you're serious about growing your business, {product_name} is the tool you need. Try it today and see the difference it can make.\n\n\
[Try {product_name} today]({affiliate_link})\n",
        features = bullet_list(features),
        benefits = bullet_list(benefits),
    )
}

/// 渲染第 `index` 条社媒帖子，功能/卖点按下标轮转
pub fn render_social_post(
    platform: Platform,
    product_name: &str,
    features: &[String],
    benefits: &[String],
    index: usize,
) -> String {
    let feature = pick(features, index).unwrap_or(FALLBACK_FEATURE);
    let benefit = pick(benefits, index).unwrap_or(FALLBACK_BENEFIT);
    let link = affiliate_link(product_name);
    let hashtag: String = product_name.split_whitespace().collect();

    match platform {
        Platform::Twitter => format!(
            "Just discovered how {product_name} can help you {}! The {} feature is game-changing. #MarketingTools #{hashtag} #Productivity\n\n{link}",
            benefit.to_lowercase(),
            feature.to_lowercase(),
        ),
        Platform::Facebook | Platform::LinkedIn => format!(
            "🚀 Transform your marketing with {product_name}!\n\nI've been using {product_name} and the {feature} feature has completely changed how I approach marketing. It helps me {} without the usual headaches.\n\nHave you tried it yet? Check it out: {link}",
            benefit.to_lowercase(),
        ),
        Platform::WordPress | Platform::Instagram => format!(
            "Check out {product_name} - the all-in-one marketing solution that will transform your business! #MarketingTools #{hashtag}\n\n{link}"
        ),
    }
}

fn pick(items: &[String], index: usize) -> Option<&str> {
    if items.is_empty() {
        None
    } else {
        Some(items[index % items.len()].as_str())
    }
}

/// 生成图片提示词，取前三个功能
pub fn image_prompt(product_name: &str, image_type: ImageType, features: &[String]) -> String {
    let key_features = features
        .iter()
        .take(3)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");

    match image_type {
        ImageType::ProductShowcase => format!(
            "A professional, clean image showcasing the {product_name} marketing platform. The image should feature a sleek dashboard with analytics graphs, email templates, and landing page designs visible on a modern computer screen. The {product_name} logo should be prominently displayed. The color scheme should be professional with blue and white tones. The image should convey the key features: {key_features}."
        ),
        ImageType::Comparison => format!(
            "A side-by-side comparison image of {product_name} vs competitors. Split screen design with {product_name} on the left highlighted in blue with a checkmark, competitors on right in gray. Show feature comparison with {product_name} having more checkmarks. Professional, clean design with charts showing {product_name}'s superior performance."
        ),
        ImageType::SocialMedia => format!(
            "A eye-catching social media graphic for {product_name}. Bold text stating \"Automate Your Marketing\" with the {product_name} logo. Modern gradient background in blue tones. Include a laptop showing the platform interface and icons representing key features: {key_features}. Clean, professional design optimized for social feeds."
        ),
    }
}

// ============================================================================
// 生成器
// ============================================================================

/// 内容生成器
pub struct ContentGenerator {
    text_dir: PathBuf,
    social_dir: PathBuf,
    images_dir: PathBuf,
}

impl ContentGenerator {
    pub fn new(layout: &DataLayout) -> Self {
        Self {
            text_dir: layout.text_dir(),
            social_dir: layout.social_dir(),
            images_dir: layout.images_dir(),
        }
    }

    /// 生成博客文章并写入 `<stem>_blog_post.md`
    pub fn generate_blog_post(
        &self,
        product_name: &str,
        title: &str,
        features: &[String],
        benefits: &[String],
        affiliate_link: &str,
    ) -> Result<BlogPost> {
        info!("[ContentGenerator] 生成博客文章: {}", title);
        let content = render_blog_post(product_name, title, features, benefits, affiliate_link);
        let file_path = self
            .text_dir
            .join(format!("{}_blog_post.md", file_stem(product_name)));
        write_text(&file_path, &content)?;

        Ok(BlogPost {
            title: title.to_string(),
            content,
            file_path,
        })
    }

    /// 按平台 × 数量生成社媒帖子
    pub fn generate_social_posts(
        &self,
        product_name: &str,
        features: &[String],
        benefits: &[String],
        platforms: &[Platform],
        count: usize,
    ) -> Result<Vec<SocialPost>> {
        info!(
            "[ContentGenerator] 为 {} 个平台各生成 {} 条社媒帖子",
            platforms.len(),
            count
        );
        let stem = file_stem(product_name);
        let mut posts = Vec::with_capacity(platforms.len() * count);

        for &platform in platforms {
            for i in 0..count {
                let content = render_social_post(platform, product_name, features, benefits, i);
                let file_path = self
                    .social_dir
                    .join(format!("{stem}_{}_{}.txt", platform.as_str(), i + 1));
                write_text(&file_path, &content)?;
                posts.push(SocialPost {
                    platform,
                    content,
                    file_path,
                });
            }
        }

        Ok(posts)
    }

    /// 写入图片占位文件，内容为提示词
    pub fn simulate_image_generation(
        &self,
        product_name: &str,
        image_label: &str,
        features: &[String],
    ) -> Result<ImageArtifact> {
        let image_type = ImageType::from_label(image_label);
        let prompt = image_prompt(product_name, image_type, features);
        let label_part = image_label.split_whitespace().collect::<Vec<_>>().join("_");
        let file_path = self
            .images_dir
            .join(format!("{}_{label_part}.txt", file_stem(product_name)));

        write_text(
            &file_path,
            &format!("IMAGE PROMPT: {prompt}\n\n{IMAGE_PLACEHOLDER}"),
        )?;
        info!("[ContentGenerator] 图片占位已生成: {}", file_path.display());

        Ok(ImageArtifact {
            image_type: image_label.to_string(),
            prompt,
            file_path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_blog_post_structure() {
        let body = render_blog_post(
            "Kartra",
            "Why Kartra Wins",
            &strings(&["Landing page builder"]),
            &strings(&["Save time"]),
            "https://example.com/affiliate/kartra",
        );
        assert!(body.starts_with("# Why Kartra Wins\n"));
        let intro = body.find("## Introduction").unwrap();
        let features = body.find("## Powerful Features").unwrap();
        let benefits = body.find("## Benefits").unwrap();
        let conclusion = body.find("## Conclusion").unwrap();
        assert!(intro < features && features < benefits && benefits < conclusion);
        assert!(body.contains("- Landing page builder\n"));
        assert!(body.ends_with("[Try Kartra today](https://example.com/affiliate/kartra)\n"));
    }

    #[test]
    fn test_social_post_per_platform() {
        let features = strings(&["Email Automation", "Funnels"]);
        let benefits = strings(&["Save Time"]);

        let tweet = render_social_post(Platform::Twitter, "Click Funnels", &features, &benefits, 1);
        assert!(tweet.contains("help you save time!"));
        assert!(tweet.contains("The funnels feature"));
        assert!(tweet.contains("#ClickFunnels"));
        assert!(tweet.ends_with("https://example.com/affiliate/clickfunnels"));

        let linkedin = render_social_post(Platform::LinkedIn, "Kartra", &features, &benefits, 0);
        assert!(linkedin.starts_with("🚀 Transform your marketing with Kartra!"));
        assert!(linkedin.contains("the Email Automation feature"));

        let generic = render_social_post(Platform::Instagram, "Kartra", &features, &benefits, 0);
        assert!(generic.starts_with("Check out Kartra"));
    }

    #[test]
    fn test_social_post_with_empty_lists() {
        let post = render_social_post(Platform::Twitter, "Kartra", &[], &[], 4);
        assert!(post.contains("grow your business"));
    }

    #[test]
    fn test_unknown_image_type_falls_back_to_showcase() {
        let features = strings(&["A", "B", "C", "D"]);
        assert_eq!(ImageType::from_label("banner"), ImageType::ProductShowcase);
        assert_eq!(
            image_prompt("Kartra", ImageType::from_label("banner"), &features),
            image_prompt("Kartra", ImageType::ProductShowcase, &features)
        );
        let prompt = image_prompt("Kartra", ImageType::ProductShowcase, &features);
        assert!(prompt.ends_with("key features: A, B, C."));
    }

    #[test]
    fn test_image_labels() {
        assert_eq!(ImageType::from_label("Social Media"), ImageType::SocialMedia);
        assert_eq!(ImageType::from_label("comparison").label(), "comparison");
    }

    #[test]
    fn test_generator_writes_files() {
        let tmp = TempDir::new().expect("create temp dir");
        let layout = DataLayout::create(tmp.path()).unwrap();
        let generator = ContentGenerator::new(&layout);
        let features = strings(&["One", "Two"]);
        let benefits = strings(&["Faster"]);

        let posts = generator
            .generate_social_posts(
                "Kartra",
                &features,
                &benefits,
                &[Platform::Twitter, Platform::Facebook],
                3,
            )
            .unwrap();
        assert_eq!(posts.len(), 6);
        assert!(posts[0].file_path.ends_with("social/kartra_twitter_1.txt"));
        assert!(posts[5].file_path.ends_with("social/kartra_facebook_3.txt"));
        assert!(posts.iter().all(|p| p.file_path.exists()));

        let image = generator
            .simulate_image_generation("Kartra", "social media", &features)
            .unwrap();
        assert!(image.file_path.ends_with("images/kartra_social_media.txt"));
        let written = std::fs::read_to_string(&image.file_path).unwrap();
        assert!(written.starts_with("IMAGE PROMPT: A eye-catching"));
        assert!(written.ends_with(IMAGE_PLACEHOLDER));
    }
}
