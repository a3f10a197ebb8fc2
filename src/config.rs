pub const DEFAULT_BASE_URL: &str = "http://localhost:5001";

/// Minutes a human needs per document, the baseline every saving is
/// measured against.
pub const DEFAULT_MANUAL_BASELINE_MINUTES: f64 = 5.0;

/// Minutes the automated pipeline needs per document (20 seconds).
pub const DEFAULT_AUTOMATED_MINUTES_PER_DOC: f64 = 0.33;

/// Fixed labor rate used for the dashboard cost-savings card. Deliberately
/// separate from the user-entered hourly cost of the ROI calculator; the
/// two have always disagreed upstream and unifying them would change the
/// displayed numbers.
pub const DEFAULT_DASHBOARD_HOURLY_RATE_USD: f64 = 25.0;

pub const DEFAULT_IMPLEMENTATION_COST_USD: f64 = 1000.0;

#[derive(Debug, Clone)]
pub struct Settings {
    pub base_url: String,
    pub manual_baseline_minutes: f64,
    pub automated_minutes_per_doc: f64,
    pub dashboard_hourly_rate_usd: f64,
    pub implementation_cost_usd: f64,
    pub field_confidence: FieldConfidence,
}

/// Placeholder per-field extraction confidence scores. The backend does not
/// report real ones yet, so these are display constants, not model output.
#[derive(Debug, Clone)]
pub struct FieldConfidence {
    pub document_type: u8,
    pub company_name: u8,
    pub invoice_number: u8,
    pub date: u8,
    pub amount: u8,
    pub tax: u8,
}

impl Default for FieldConfidence {
    fn default() -> Self {
        FieldConfidence {
            document_type: 95,
            company_name: 88,
            invoice_number: 92,
            date: 90,
            amount: 94,
            tax: 87,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            base_url: DEFAULT_BASE_URL.to_string(),
            manual_baseline_minutes: DEFAULT_MANUAL_BASELINE_MINUTES,
            automated_minutes_per_doc: DEFAULT_AUTOMATED_MINUTES_PER_DOC,
            dashboard_hourly_rate_usd: DEFAULT_DASHBOARD_HOURLY_RATE_USD,
            implementation_cost_usd: DEFAULT_IMPLEMENTATION_COST_USD,
            field_confidence: FieldConfidence::default(),
        }
    }
}

impl Settings {
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        Settings {
            base_url: trim_trailing_slash(base_url.into()),
            ..Settings::default()
        }
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

fn trim_trailing_slash(mut url: String) -> String {
    while url.ends_with('/') {
        url.pop();
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_without_double_slash() {
        let settings = Settings::with_base_url("http://localhost:5001/");
        assert_eq!(settings.endpoint("/upload"), "http://localhost:5001/upload");
        assert_eq!(settings.endpoint("extract"), "http://localhost:5001/extract");
    }
}
