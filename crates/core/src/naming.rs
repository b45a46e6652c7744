//! 产物命名规则
//!
//! 所有落盘文件都以产品名派生的前缀命名，带时间戳的文件把 `:` 换成 `-`。

use chrono::{DateTime, SecondsFormat, Utc};

/// 推广链接的固定前缀
pub const AFFILIATE_BASE_URL: &str = "https://example.com/affiliate";

/// 产品名转文件前缀：小写并去掉空白
pub fn file_stem(product_name: &str) -> String {
    product_name
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

/// 产品的推广链接
pub fn affiliate_link(product_name: &str) -> String {
    format!("{AFFILIATE_BASE_URL}/{}", file_stem(product_name))
}

/// ISO-8601 时间戳（毫秒精度）
pub fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// 可用于文件名的时间戳
pub fn file_timestamp(at: DateTime<Utc>) -> String {
    iso_timestamp(at).replace(':', "-")
}

/// 标题转 URL slug：小写，连续空白换成 `-`
pub fn slugify(title: &str) -> String {
    title
        .to_lowercase()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("-")
}
