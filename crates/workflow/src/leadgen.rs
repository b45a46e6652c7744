//! 引流资料
//!
//! 落地页、清单页两份静态 HTML，以及带 UTM 参数的追踪链接。
//! 文案原样拼入 HTML，不做转义。

use crate::layout::{write_text, DataLayout};
use crate::types::{LandingPageFeature, LandingPageResult, LeadMagnetResult};
use crate::Result;
use affbox_core::naming::{affiliate_link, file_stem};
use affbox_core::WorkflowError;
use chrono::{Datelike, Utc};
use std::path::PathBuf;
use tracing::info;

const LANDING_PAGE_STYLE: &str = r#"        body { font-family: 'Arial', sans-serif; line-height: 1.6; color: #333; max-width: 1200px; margin: 0 auto; padding: 20px; }
        .hero { text-align: center; padding: 60px 20px; background-color: #f5f9ff; border-radius: 10px; margin-bottom: 40px; }
        .hero h1 { font-size: 2.5rem; margin-bottom: 20px; color: #2a4365; }
        .hero p { font-size: 1.2rem; max-width: 800px; margin: 0 auto 30px; color: #4a5568; }
        .cta-button { display: inline-block; background-color: #4299e1; color: white; font-weight: bold; padding: 15px 30px; border-radius: 5px; text-decoration: none; font-size: 1.1rem; transition: background-color 0.3s; }
        .cta-button:hover { background-color: #3182ce; }
        .features { display: grid; grid-template-columns: repeat(auto-fit, minmax(300px, 1fr)); gap: 30px; margin-bottom: 60px; }
        .feature { padding: 30px; border-radius: 8px; box-shadow: 0 4px 6px rgba(0,0,0,0.1); }
        .feature h3 { margin-top: 0; color: #2a4365; }"#;

const CHECKLIST_STYLE: &str = r#"        body { font-family: 'Arial', sans-serif; line-height: 1.6; color: #333; max-width: 800px; margin: 0 auto; padding: 20px; }
        h1 { text-align: center; color: #2a4365; margin-bottom: 30px; }
        .description { text-align: center; margin-bottom: 40px; color: #4a5568; }
        .checklist { background-color: #f5f9ff; padding: 30px; border-radius: 10px; }
        .checklist-item { margin-bottom: 15px; padding-left: 40px; position: relative; }
        .checklist-item:before { content: ""; position: absolute; left: 0; top: 0; width: 25px; height: 25px; border: 2px solid #4299e1; border-radius: 5px; }
        .footer { margin-top: 40px; text-align: center; font-size: 0.9rem; color: #718096; }
        .footer a { color: #4299e1; text-decoration: none; }"#;

fn html_head(title: &str, style: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>
{style}
    </style>
</head>"#
    )
}

/// 渲染落地页
pub fn render_landing_page(
    product_name: &str,
    headline: &str,
    description: &str,
    cta_text: &str,
    cta_link: &str,
    features: &[LandingPageFeature],
    year: i32,
) -> String {
    let cards: String = features
        .iter()
        .map(|f| {
            format!(
                r#"
        <div class="feature">
            <h3>{}</h3>
            <p>{}</p>
        </div>
        "#,
                f.title, f.description
            )
        })
        .collect();

    format!(
        r#"{head}
<body>
    <div class="hero">
        <h1>{headline}</h1>
        <p>{description}</p>
        <a href="{cta_link}" class="cta-button">{cta_text}</a>
    </div>

    <div class="features">
        {cards}
    </div>

    <footer>
        <p>© {year} {product_name}. All rights reserved.</p>
    </footer>
</body>
</html>"#,
        head = html_head(&format!("{headline} | {product_name}"), LANDING_PAGE_STYLE),
    )
}

/// 渲染清单页
pub fn render_checklist(product_name: &str, title: &str, description: &str, items: &[String]) -> String {
    let rows: String = items
        .iter()
        .map(|item| format!(r#"<div class="checklist-item">{item}</div>"#))
        .collect();

    format!(
        r#"{head}
<body>
    <h1>{title}</h1>
    <p class="description">{description}</p>

    <div class="checklist">
        {rows}
    </div>

    <div class="footer">
        <p>Created by {product_name}</p>
        <p>Learn more at <a href="{link}">{product_name}.com</a></p>
    </div>
</body>
</html>"#,
        head = html_head(&format!("{title} | {product_name}"), CHECKLIST_STYLE),
        link = affiliate_link(product_name),
    )
}

/// 生成 UTM 追踪链接：`base?utm_source=..&utm_medium=..&utm_campaign=..`
pub fn generate_utm_link(base_url: &str, campaign: &str, medium: &str, source: &str) -> Result<String> {
    let query = serde_urlencoded::to_string(&[
        ("utm_source", source),
        ("utm_medium", medium),
        ("utm_campaign", campaign),
    ])
    .map_err(|e| WorkflowError::Encode(e.to_string()))?;
    Ok(format!("{base_url}?{query}"))
}

/// 引流资料生成器
pub struct LeadGenerator {
    leads_dir: PathBuf,
}

impl LeadGenerator {
    pub fn new(layout: &DataLayout) -> Self {
        Self {
            leads_dir: layout.leads_dir(),
        }
    }

    /// 生成落地页 `<stem>_landing_page.html`
    pub fn generate_landing_page(
        &self,
        product_name: &str,
        headline: &str,
        description: &str,
        cta_text: &str,
        cta_link: &str,
        features: &[LandingPageFeature],
    ) -> Result<LandingPageResult> {
        info!("[LeadGenerator] 生成落地页 {}: {}", product_name, headline);
        let html = render_landing_page(
            product_name,
            headline,
            description,
            cta_text,
            cta_link,
            features,
            Utc::now().year(),
        );
        let output_path = self
            .leads_dir
            .join(format!("{}_landing_page.html", file_stem(product_name)));
        write_text(&output_path, &html)?;

        Ok(LandingPageResult {
            headline: headline.to_string(),
            description: description.to_string(),
            features: features.len(),
            output_path,
        })
    }

    /// 生成清单页 `<stem>_checklist.html`
    pub fn generate_lead_magnet(
        &self,
        product_name: &str,
        title: &str,
        description: &str,
        items: &[String],
    ) -> Result<LeadMagnetResult> {
        info!("[LeadGenerator] 生成引流清单 {}: {}", product_name, title);
        let html = render_checklist(product_name, title, description, items);
        let output_path = self
            .leads_dir
            .join(format!("{}_checklist.html", file_stem(product_name)));
        write_text(&output_path, &html)?;

        Ok(LeadMagnetResult {
            title: title.to_string(),
            description: description.to_string(),
            items: items.len(),
            output_path,
        })
    }
}
