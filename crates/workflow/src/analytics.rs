//! 分析追踪
//!
//! - 事件日志：`analytics/events.json` 单个只追加的 JSON 数组
//! - 报告：按固定区间随机生成的汇总数据，不模拟真实流量

use crate::layout::{read_text, write_json, DataLayout};
use crate::types::{
    AnalyticsReport, PlatformConversions, ReportPeriod, ReportResult, ReportSummary,
    TrackedEvent, TrafficSources,
};
use crate::Result;
use affbox_core::naming::iso_timestamp;
use affbox_core::WorkflowError;
use chrono::{DateTime, Utc};
use rand::Rng;
use serde_json::{Map, Value};
use std::path::PathBuf;
use tracing::{debug, info};

/// 分析追踪器
pub struct AnalyticsTracker {
    events_file: PathBuf,
    reports_dir: PathBuf,
}

impl AnalyticsTracker {
    pub fn new(layout: &DataLayout) -> Self {
        Self {
            events_file: layout.analytics_dir().join("events.json"),
            reports_dir: layout.reports_dir(),
        }
    }

    pub fn events_file(&self) -> &PathBuf {
        &self.events_file
    }

    /// 追加一条事件，返回的 `event_id` 是追加后的日志长度
    pub fn track_event(&self, event_type: &str, data: Map<String, Value>) -> Result<TrackedEvent> {
        let mut events: Vec<Value> = if self.events_file.exists() {
            serde_json::from_str(&read_text(&self.events_file)?)?
        } else {
            Vec::new()
        };

        let mut event = Map::new();
        event.insert("type".to_string(), Value::from(event_type));
        event.insert("timestamp".to_string(), Value::from(iso_timestamp(Utc::now())));
        event.extend(data);
        events.push(Value::Object(event));

        write_json(&self.events_file, &events)?;
        debug!("[AnalyticsTracker] 记录事件 {} #{}", event_type, events.len());

        Ok(TrackedEvent {
            success: true,
            event_type: event_type.to_string(),
            event_id: events.len(),
        })
    }

    /// 生成区间报告
    pub fn generate_report(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<ReportResult> {
        self.generate_report_with(start, end, &mut rand::thread_rng())
    }

    /// 用指定随机源生成区间报告
    pub fn generate_report_with<R: Rng + ?Sized>(
        &self,
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        rng: &mut R,
    ) -> Result<ReportResult> {
        info!(
            "[AnalyticsTracker] 生成分析报告 {} 至 {}",
            start.date_naive(),
            end.date_naive()
        );
        let report_data = build_report(start, end, rng, Utc::now())?;
        let report_path = self.reports_dir.join(format!(
            "analytics_report_{}_to_{}.json",
            start.date_naive(),
            end.date_naive()
        ));
        write_json(&report_path, &report_data)?;

        Ok(ReportResult {
            report_data,
            report_path,
        })
    }
}

/// 生成报告数据（不落盘）
pub fn build_report<R: Rng + ?Sized>(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    rng: &mut R,
    generated_at: DateTime<Utc>,
) -> Result<AnalyticsReport> {
    if end < start {
        return Err(WorkflowError::InvalidDateRange {
            start: iso_timestamp(start),
            end: iso_timestamp(end),
        });
    }

    let clicks = rng.gen_range(500..1500u64);
    let impressions = clicks * rng.gen_range(5..10u64);
    let conversions = (clicks as f64 * rng.gen_range(0.05..0.15f64)).floor() as u64;
    let revenue = conversions * rng.gen_range(50..100u64);

    let share = |total: u64, ratio: f64| (total as f64 * ratio).floor() as u64;

    Ok(AnalyticsReport {
        period: ReportPeriod {
            start_date: start,
            end_date: end,
        },
        summary: ReportSummary {
            impressions,
            clicks,
            conversions,
            revenue,
            ctr: format!("{:.2}%", clicks as f64 / impressions as f64 * 100.0),
            conversion_rate: format!("{:.2}%", conversions as f64 / clicks as f64 * 100.0),
            revenue_per_click: format!("{:.2}", revenue as f64 / clicks as f64),
        },
        traffic_sources: TrafficSources {
            organic: share(clicks, 0.3),
            social: share(clicks, 0.4),
            email: share(clicks, 0.2),
            direct: share(clicks, 0.1),
        },
        platforms: PlatformConversions {
            wordpress: share(conversions, 0.5),
            twitter: share(conversions, 0.2),
            facebook: share(conversions, 0.2),
            linkedin: share(conversions, 0.1),
        },
        generated_at,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use proptest::prelude::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use serde_json::json;
    use tempfile::TempDir;

    fn payload(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("payload must be an object"),
        }
    }

    #[test]
    fn test_track_event_appends() {
        let tmp = TempDir::new().expect("create temp dir");
        let layout = DataLayout::create(tmp.path()).unwrap();
        let tracker = AnalyticsTracker::new(&layout);

        let first = tracker
            .track_event("click", payload(json!({"source": "email"})))
            .unwrap();
        let second = tracker
            .track_event("conversion", payload(json!({"amount": 120})))
            .unwrap();
        assert_eq!(first.event_id, 1);
        assert_eq!(second.event_id, 2);

        let saved: Vec<Value> =
            serde_json::from_str(&std::fs::read_to_string(tracker.events_file()).unwrap()).unwrap();
        assert_eq!(saved.len(), 2);
        assert_eq!(saved[0]["type"], "click");
        assert_eq!(saved[0]["source"], "email");
        assert_eq!(saved[1]["amount"], 120);
        assert!(saved[1]["timestamp"].as_str().unwrap().ends_with('Z'));
    }

    #[test]
    fn test_rejects_inverted_range() {
        let now = Utc::now();
        let err = build_report(now, now - Duration::days(1), &mut StdRng::seed_from_u64(1), now)
            .unwrap_err();
        assert!(matches!(err, WorkflowError::InvalidDateRange { .. }));
    }

    #[test]
    fn test_report_file_name_uses_dates() {
        let tmp = TempDir::new().expect("create temp dir");
        let layout = DataLayout::create(tmp.path()).unwrap();
        let tracker = AnalyticsTracker::new(&layout);
        let end = Utc::now();
        let start = end - Duration::days(30);

        let result = tracker
            .generate_report_with(start, end, &mut StdRng::seed_from_u64(7))
            .unwrap();
        let expected = format!(
            "analytics_report_{}_to_{}.json",
            start.date_naive(),
            end.date_naive()
        );
        assert!(result.report_path.ends_with(expected));
        assert!(result.report_path.exists());
    }

    #[test]
    fn test_same_seed_same_report() {
        let now = Utc::now();
        let a = build_report(now, now, &mut StdRng::seed_from_u64(42), now).unwrap();
        let b = build_report(now, now, &mut StdRng::seed_from_u64(42), now).unwrap();
        assert_eq!(a, b);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_report_metrics_in_range(seed in any::<u64>()) {
            let now = Utc::now();
            let report = build_report(now - Duration::days(30), now, &mut StdRng::seed_from_u64(seed), now).unwrap();
            let s = &report.summary;

            prop_assert!((500..1500).contains(&s.clicks));
            prop_assert!(s.impressions >= s.clicks * 5 && s.impressions < s.clicks * 10);
            prop_assert!(s.conversions + 1 >= s.clicks * 5 / 100 && s.conversions <= s.clicks * 15 / 100 + 1);
            prop_assert!(s.revenue >= s.conversions * 50 && s.revenue <= s.conversions * 99);
            prop_assert!(s.ctr.ends_with('%') && s.conversion_rate.ends_with('%'));
            let t = &report.traffic_sources;
            prop_assert!(t.organic + t.social + t.email + t.direct <= s.clicks);
            prop_assert!(report.platforms.wordpress <= s.conversions / 2);
        }
    }
}
