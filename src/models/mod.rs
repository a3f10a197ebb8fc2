use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// A file picked for processing. Built once from the path, validated once,
/// never mutated afterwards.
#[derive(Debug, Clone)]
pub struct UploadCandidate {
    pub file_name: String,
    pub mime_type: String,
    pub size_bytes: u64,
}

impl UploadCandidate {
    pub fn from_path(path: &Path) -> std::io::Result<Self> {
        let metadata = std::fs::metadata(path)?;
        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default();
        let mime_type = mime_guess::from_path(path)
            .first_or_octet_stream()
            .essence_str()
            .to_string();
        Ok(UploadCandidate {
            file_name,
            mime_type,
            size_bytes: metadata.len(),
        })
    }
}

/// Structured fields returned by `/extract`. The backend emits empty
/// strings for fields it could not detect, so consumers must treat empty
/// and missing alike.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtractionResult {
    #[serde(default)]
    pub document_type: Option<String>,
    #[serde(default)]
    pub company_name: Option<String>,
    #[serde(default)]
    pub invoice_number: Option<String>,
    #[serde(default)]
    pub date: Option<String>,
    #[serde(default)]
    pub amount: Option<String>,
    #[serde(default)]
    pub tax: Option<String>,
    #[serde(default)]
    pub raw_text: Option<String>,
    #[serde(default)]
    pub processing_time: Option<f64>,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub file_name: Option<String>,
}

pub const NOT_DETECTED: &str = "Not detected";

/// One row of the extraction display table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldRow {
    pub label: &'static str,
    pub value: Option<String>,
    pub confidence_percent: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfidenceClass {
    High,
    Medium,
    Low,
}

impl FieldRow {
    pub fn new(label: &'static str, value: Option<String>, confidence_percent: u8) -> Self {
        let value = value.filter(|v| !v.trim().is_empty());
        FieldRow {
            label,
            value,
            confidence_percent,
        }
    }

    pub fn display_value(&self) -> &str {
        self.value.as_deref().unwrap_or(NOT_DETECTED)
    }

    pub fn confidence_class(&self) -> ConfidenceClass {
        match self.confidence_percent {
            90.. => ConfidenceClass::High,
            70..=89 => ConfidenceClass::Medium,
            _ => ConfidenceClass::Low,
        }
    }
}

/// Aggregate statistics from `GET /analytics`. Replaced wholesale on every
/// refresh; an empty backend returns zeros and an empty `chart_data`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AnalyticsSummary {
    #[serde(default)]
    pub total_documents: u64,
    #[serde(default)]
    pub average_processing_time: f64,
    #[serde(default)]
    pub time_saved: f64,
    #[serde(default)]
    pub efficiency_gain: f64,
    #[serde(default)]
    pub monthly_impact: u64,
    #[serde(default)]
    pub error_reduction: f64,
    #[serde(default)]
    pub chart_data: ChartData,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ChartData {
    #[serde(default)]
    pub document_types: BTreeMap<String, u64>,
    #[serde(default)]
    pub processing_times: Vec<f64>,
    #[serde(default)]
    pub dates: Vec<String>,
}

/// User-adjustable inputs of the ROI calculator. Not persisted anywhere.
#[derive(Debug, Clone, Copy)]
pub struct RoiInputs {
    pub monthly_documents: u64,
    pub hourly_cost_usd: f64,
    pub manual_minutes_per_doc: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct RoiEstimate {
    pub monthly_savings_usd: f64,
    pub annual_savings_usd: f64,
    pub roi_percent: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub filename: String,
    pub filepath: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AutomationResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub automation_id: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

/// Locally generated analytics report artifact.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsReport {
    pub timestamp: String,
    pub metrics: AnalyticsSummary,
    #[serde(rename = "generatedBy")]
    pub generated_by: String,
}
