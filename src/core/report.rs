use crate::core::aggregator::{summarize, DashboardStats, HistogramBucket};
use crate::domain::locale::{Heading, Locale};
use crate::domain::model::{DashboardSnapshot, StoreProfile};
use crate::utils::error::{DashboardError, Result};
use crate::utils::validation;
use chrono::{DateTime, FixedOffset, Utc};
use serde::Serialize;
use std::fmt::Write as _;
use std::io::Write;
use zip::write::{FileOptions, ZipWriter};

pub const SUMMARY_JSON: &str = "dashboard_summary.json";
pub const DAILY_CSV: &str = "daily_histogram.csv";
pub const MONTHLY_CSV: &str = "monthly_histogram.csv";
pub const BUNDLE_ZIP: &str = "dashboard_report.zip";

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardReport {
    pub store_id: u64,
    /// 實際產生報表的時間
    pub generated_at: DateTime<Utc>,
    /// 直方圖視窗的基準時間
    pub reference_time: DateTime<FixedOffset>,
    pub locale: Locale,
    pub store_profile: Option<StoreProfile>,
    pub stats: DashboardStats,
    pub notification_count: usize,
    pub unread_notifications: usize,
}

impl DashboardReport {
    pub fn from_snapshot(
        snapshot: &DashboardSnapshot,
        reference: DateTime<FixedOffset>,
        locale: Locale,
    ) -> Self {
        Self {
            store_id: snapshot.store_id,
            generated_at: Utc::now(),
            reference_time: reference,
            locale,
            store_profile: snapshot.summary.store_profile.clone(),
            stats: summarize(&snapshot.summary.warranties, &reference, locale),
            notification_count: snapshot.notifications.len(),
            unread_notifications: snapshot
                .notifications
                .iter()
                .filter(|notification| notification.is_unread())
                .count(),
        }
    }

    /// 終端機用的純文字摘要
    pub fn render_text(&self) -> String {
        let locale = self.locale;
        let totals = &self.stats.totals;
        let mut out = String::new();

        let store_name = self
            .store_profile
            .as_ref()
            .and_then(|profile| profile.name.as_deref())
            .map(|name| format!(" - {}", name))
            .unwrap_or_default();
        let _ = writeln!(
            out,
            "{} #{}{}",
            locale.heading(Heading::Title),
            self.store_id,
            store_name
        );
        let _ = writeln!(
            out,
            "{}: {}  {}: {}",
            locale.heading(Heading::Warranties),
            totals.total_headers,
            locale.heading(Heading::Items),
            totals.total_items
        );

        for (heading, count, percent) in [
            (Heading::Active, totals.active, self.stats.active_percent),
            (Heading::Nearing, totals.nearing, self.stats.nearing_percent),
            (Heading::Expired, totals.expired, self.stats.expired_percent),
        ] {
            let _ = writeln!(out, "  {}: {} ({}%)", locale.heading(heading), count, percent);
        }

        let _ = writeln!(out, "{}:", locale.heading(Heading::Daily));
        write_histogram(&mut out, &self.stats.daily);
        let _ = writeln!(out, "{}:", locale.heading(Heading::Monthly));
        write_histogram(&mut out, &self.stats.monthly);

        let _ = writeln!(
            out,
            "{}: {} ({} unread)",
            locale.heading(Heading::Notifications),
            self.notification_count,
            self.unread_notifications
        );
        out
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// 依格式產生要輸出的檔案（檔名、內容）
    pub fn output_files(&self, formats: &[String]) -> Result<Vec<(String, Vec<u8>)>> {
        let mut files = Vec::new();

        for format in validation::dedup_formats(formats) {
            match format.as_str() {
                "json" => files.push((SUMMARY_JSON.to_string(), self.to_json()?.into_bytes())),
                "csv" => {
                    files.push((DAILY_CSV.to_string(), histogram_csv(&self.stats.daily)?));
                    files.push((MONTHLY_CSV.to_string(), histogram_csv(&self.stats.monthly)?));
                }
                other => {
                    return Err(DashboardError::InvalidConfigValueError {
                        field: "formats".to_string(),
                        value: other.to_string(),
                        reason: "Unsupported output format".to_string(),
                    })
                }
            }
        }

        Ok(files)
    }
}

fn write_histogram(out: &mut String, buckets: &[HistogramBucket]) {
    for bucket in buckets {
        let _ = writeln!(out, "  {:<6} {:>4}", bucket.label, bucket.value);
    }
}

/// `label,start,value`
pub fn histogram_csv(buckets: &[HistogramBucket]) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for bucket in buckets {
        writer.serialize(bucket)?;
    }
    writer.flush()?;
    writer
        .into_inner()
        .map_err(|e| DashboardError::IoError(e.into_error()))
}

pub fn bundle_zip(files: &[(String, Vec<u8>)]) -> Result<Vec<u8>> {
    let mut zip = ZipWriter::new(std::io::Cursor::new(Vec::new()));

    for (name, data) in files {
        zip.start_file::<_, ()>(name.as_str(), FileOptions::default())?;
        zip.write_all(data)?;
    }

    let cursor = zip.finish()?;
    Ok(cursor.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{DashboardSummary, Notification, WarrantyHeader, WarrantyItem};
    use std::io::Read;

    fn sample_report(locale: Locale) -> DashboardReport {
        let snapshot = DashboardSnapshot {
            store_id: 42,
            summary: DashboardSummary {
                store_profile: Some(StoreProfile {
                    name: Some("ร้านสมชาย".to_string()),
                    ..StoreProfile::default()
                }),
                warranties: vec![
                    WarrantyHeader::new(
                        vec![WarrantyItem::with_code("active"), WarrantyItem::with_code("expired")],
                        Some("2025-10-16T09:00:00+07:00"),
                    ),
                    WarrantyHeader::new(
                        vec![WarrantyItem::with_tag("ใกล้หมดอายุ")],
                        Some("2025-09-02"),
                    ),
                ],
            },
            notifications: vec![
                Notification {
                    read: Some(true),
                    ..Notification::default()
                },
                Notification::default(),
            ],
        };
        let reference = DateTime::parse_from_rfc3339("2025-10-16T12:00:00+07:00").unwrap();
        DashboardReport::from_snapshot(&snapshot, reference, locale)
    }

    #[test]
    fn test_report_from_snapshot() {
        let report = sample_report(Locale::Thai);
        assert_eq!(report.store_id, 42);
        assert_eq!(report.stats.totals.total_headers, 2);
        assert_eq!(report.stats.totals.total_items, 3);
        assert_eq!(report.stats.active_percent, 33);
        assert_eq!(report.notification_count, 2);
        assert_eq!(report.unread_notifications, 1);
    }

    #[test]
    fn test_render_text_uses_locale() {
        let thai = sample_report(Locale::Thai).render_text();
        assert!(thai.contains("ร้านสมชาย"));
        assert!(thai.contains("กำลังใช้งาน: 1 (33%)"));
        assert!(thai.contains("พฤ."));

        let english = sample_report(Locale::English).render_text();
        assert!(english.contains("Nearing expiration: 1 (33%)"));
        assert!(english.contains("Notifications: 2 (1 unread)"));
    }

    #[test]
    fn test_json_output_is_camel_case() {
        let json = sample_report(Locale::English).to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["stats"]["totals"]["totalItems"], 3);
        assert_eq!(value["stats"]["daily"].as_array().unwrap().len(), 7);
        assert_eq!(value["locale"], "en");
    }

    #[test]
    fn test_generation_time_is_separate_from_reference_time() {
        let before = Utc::now();
        let report = sample_report(Locale::English);

        assert!(report.generated_at >= before);
        assert_eq!(report.reference_time.to_rfc3339(), "2025-10-16T12:00:00+07:00");

        let value: serde_json::Value = serde_json::from_str(&report.to_json().unwrap()).unwrap();
        assert_eq!(value["referenceTime"], "2025-10-16T12:00:00+07:00");
        assert_ne!(value["generatedAt"], value["referenceTime"]);
    }

    #[test]
    fn test_histogram_csv_layout() {
        let report = sample_report(Locale::English);
        let csv = String::from_utf8(histogram_csv(&report.stats.daily).unwrap()).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines[0], "label,start,value");
        assert_eq!(lines.len(), 8);
        assert_eq!(lines[7], "Thu,2025-10-16,1");
    }

    #[test]
    fn test_output_files_by_format() {
        let report = sample_report(Locale::Thai);
        let files = report
            .output_files(&["csv".to_string(), "json".to_string()])
            .unwrap();
        let names: Vec<&str> = files.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(names, vec![DAILY_CSV, MONTHLY_CSV, SUMMARY_JSON]);

        assert!(report.output_files(&["xml".to_string()]).is_err());
    }

    #[test]
    fn test_repeated_formats_bundle_cleanly() {
        let report = sample_report(Locale::Thai);
        let files = report
            .output_files(&["json".to_string(), "json".to_string(), "csv".to_string()])
            .unwrap();
        assert_eq!(files.len(), 3);

        let data = bundle_zip(&files).unwrap();
        let archive = zip::ZipArchive::new(std::io::Cursor::new(data)).unwrap();
        assert_eq!(archive.len(), 3);
    }

    #[test]
    fn test_bundle_zip_contains_all_files() {
        let files = vec![
            ("a.json".to_string(), b"{}".to_vec()),
            ("b.csv".to_string(), b"label,start,value\n".to_vec()),
        ];
        let data = bundle_zip(&files).unwrap();

        let mut archive = zip::ZipArchive::new(std::io::Cursor::new(data)).unwrap();
        assert_eq!(archive.len(), 2);
        let mut content = String::new();
        archive
            .by_name("b.csv")
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        assert_eq!(content, "label,start,value\n");
    }
}
