use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::config::Settings;
use crate::models::{AnalyticsReport, AnalyticsSummary};
use crate::utils::{now_rfc3339, today_iso};

pub const GENERATED_BY: &str = "Innovo IDP Dashboard";

impl AnalyticsReport {
    pub fn new(metrics: AnalyticsSummary) -> Self {
        AnalyticsReport {
            timestamp: now_rfc3339(),
            metrics,
            generated_by: GENERATED_BY.to_string(),
        }
    }
}

pub fn report_filename(date: &str) -> String {
    format!("innovo_analytics_report_{}.json", date)
}

/// Write the pretty-printed JSON report next to wherever the user is
/// working and return the path.
pub fn save_report(report: &AnalyticsReport, dir: &Path) -> Result<PathBuf> {
    let path = dir.join(report_filename(&today_iso()));
    let json = serde_json::to_string_pretty(report)?;
    std::fs::write(&path, json)?;
    Ok(path)
}

/// The CSV export is a full-page navigation upstream; the CLI equivalent
/// hands the URL to the default browser, which performs the download.
pub fn open_csv_export(settings: &Settings) -> Result<()> {
    open::that(settings.endpoint("export_csv"))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_filename_embeds_the_iso_date() {
        assert_eq!(
            report_filename("2024-12-15"),
            "innovo_analytics_report_2024-12-15.json"
        );
    }

    #[test]
    fn report_serializes_with_the_expected_keys() {
        let report = AnalyticsReport::new(AnalyticsSummary::default());
        let value = serde_json::to_value(&report).expect("serialize");
        assert_eq!(value["generatedBy"], GENERATED_BY);
        assert!(value.get("timestamp").is_some());
        assert!(value.get("metrics").is_some());
    }

    #[test]
    fn save_report_writes_into_the_given_directory() {
        let dir = std::env::temp_dir().join(format!("idp-report-{}", std::process::id()));
        std::fs::create_dir_all(&dir).expect("create dir");
        let report = AnalyticsReport::new(AnalyticsSummary::default());
        let path = save_report(&report, &dir).expect("save");
        assert!(path.ends_with(report_filename(&today_iso())));
        let raw = std::fs::read_to_string(&path).expect("read back");
        let parsed: AnalyticsReport = serde_json::from_str(&raw).expect("parse");
        assert_eq!(parsed.generated_by, GENERATED_BY);
        std::fs::remove_dir_all(&dir).ok();
    }
}
