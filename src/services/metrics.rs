//! Pure derivations over the analytics feed and the ROI calculator inputs.
//! No I/O and no presentation; callers format and route the numbers.

use crate::config::Settings;
use crate::models::{AnalyticsSummary, RoiEstimate, RoiInputs};

/// Figures derived from one analytics fetch for the dashboard cards.
#[derive(Debug, Clone, Copy)]
pub struct ImpactMetrics {
    pub time_saved_per_doc_minutes: f64,
    pub monthly_hours_saved: f64,
    pub cost_savings_usd: f64,
}

impl ImpactMetrics {
    /// `time_saved_per_doc` measures against the fixed manual baseline and
    /// is deliberately not floored: automated processing slower than the
    /// baseline shows up as a negative saving.
    pub fn derive(summary: &AnalyticsSummary, settings: &Settings) -> Self {
        let time_saved_per_doc_minutes =
            settings.manual_baseline_minutes - summary.average_processing_time / 60.0;
        let monthly_hours_saved =
            summary.monthly_impact as f64 * time_saved_per_doc_minutes / 60.0;
        let cost_savings_usd = monthly_hours_saved * settings.dashboard_hourly_rate_usd;
        ImpactMetrics {
            time_saved_per_doc_minutes,
            monthly_hours_saved,
            cost_savings_usd,
        }
    }
}

impl RoiEstimate {
    /// The implementation-cost guard looks redundant for the default of
    /// $1000, but the cost is configurable and zero must not divide.
    pub fn calculate(inputs: &RoiInputs, settings: &Settings) -> Self {
        let time_saved_per_doc =
            inputs.manual_minutes_per_doc - settings.automated_minutes_per_doc;
        let monthly_time_saved = inputs.monthly_documents as f64 * time_saved_per_doc;
        let monthly_savings_usd = monthly_time_saved * inputs.hourly_cost_usd;
        let annual_savings_usd = monthly_savings_usd * 12.0;

        let implementation_cost = settings.implementation_cost_usd;
        let roi_percent = if implementation_cost > 0.0 {
            (annual_savings_usd - implementation_cost) / implementation_cost * 100.0
        } else {
            0.0
        };

        RoiEstimate {
            monthly_savings_usd,
            annual_savings_usd,
            roi_percent,
        }
    }

    pub fn band(&self) -> RoiBand {
        RoiBand::from_percent(self.roi_percent)
    }
}

/// Qualitative color band for an ROI percentage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoiBand {
    Good,
    Caution,
    Bad,
}

impl RoiBand {
    pub fn from_percent(roi_percent: f64) -> Self {
        if roi_percent > 100.0 {
            RoiBand::Good
        } else if roi_percent > 0.0 {
            RoiBand::Caution
        } else {
            RoiBand::Bad
        }
    }
}
