use std::path::Path;

use anyhow::Result;
use console::style;

use crate::models::AnalyticsReport;
use crate::services::backend::DocumentBackend;
use crate::services::charts::{self, ChartRenderer};
use crate::services::metrics::ImpactMetrics;
use crate::services::report::{open_csv_export, save_report};
use crate::services::state::AppState;
use crate::utils::{format_hours, format_minutes_per_doc, format_seconds, format_usd};

/// `idp dashboard`: fetch the analytics feed, print the metric cards and
/// both charts, optionally write the JSON report or open the CSV export.
pub async fn run(
    state: &AppState,
    backend: &dyn DocumentBackend,
    export_json: bool,
    export_csv: bool,
) -> Result<()> {
    let summary = backend.analytics().await?;
    state.store_summary(summary.clone())?;

    println!();
    println!("{}", style("Processing Overview").bold().underlined());
    card("Total Documents", &summary.total_documents.to_string());
    card("Avg Processing Time", &format_seconds(summary.average_processing_time));
    card("Efficiency Gain", &format!("{}%", summary.efficiency_gain));
    card("Time Saved", &format_hours(summary.time_saved));
    card("Monthly Impact", &summary.monthly_impact.to_string());
    card("Error Reduction", &format!("{}%", summary.error_reduction));

    let impact = ImpactMetrics::derive(&summary, &state.settings);
    println!();
    println!("{}", style("Business Impact").bold().underlined());
    card("Time Saved / Doc", &format_minutes_per_doc(impact.time_saved_per_doc_minutes));
    card("Monthly Hours Saved", &format_hours(impact.monthly_hours_saved));
    card("Cost Savings", &format_usd(impact.cost_savings_usd));

    let mut renderer = TermChartRenderer;
    println!();
    println!("{}", style("Document Types Distribution").bold().underlined());
    charts::render(&charts::distribution_series(&summary.chart_data), &mut renderer);
    println!();
    println!("{}", style("Processing Time Trends").bold().underlined());
    charts::render(&charts::time_series(&summary.chart_data), &mut renderer);

    if export_json {
        let report = AnalyticsReport::new(summary);
        let path = save_report(&report, Path::new("."))?;
        println!();
        super::notify_success(&format!("Report saved to {}", path.display()));
    }
    if export_csv {
        open_csv_export(&state.settings)?;
        println!();
        super::notify_success("CSV export opened in your browser");
    }
    Ok(())
}

fn card(label: &str, value: &str) {
    println!("  {:<22} {}", label, style(value).cyan().bold());
}

/// Terminal stand-in for the plotting collaborator: horizontal bars scaled
/// to the widest value.
struct TermChartRenderer;

const BAR_WIDTH: usize = 32;

impl ChartRenderer for TermChartRenderer {
    fn render_distribution(&mut self, labels: &[String], values: &[u64]) {
        let max = values.iter().copied().max().unwrap_or(1).max(1);
        for (label, value) in labels.iter().zip(values) {
            let width = (*value as usize * BAR_WIDTH) / max as usize;
            println!(
                "  {:<16} {} {}",
                label,
                style("█".repeat(width.max(1))).blue(),
                value
            );
        }
    }

    fn render_time_series(&mut self, x_values: &[String], y_values: &[f64], x_axis_label: &str) {
        let max = y_values.iter().copied().fold(f64::MIN, f64::max).max(f64::EPSILON);
        println!("  {:<16} {}", style(x_axis_label).dim(), style("seconds").dim());
        for (x, y) in x_values.iter().zip(y_values) {
            let width = ((y / max) * BAR_WIDTH as f64).round() as usize;
            println!("  {:<16} {} {:.2}", x, style("█".repeat(width.max(1))).blue(), y);
        }
    }

    fn render_no_data(&mut self, title: &str) {
        println!("  {}", style(title).dim());
    }
}
