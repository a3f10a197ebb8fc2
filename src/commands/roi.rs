use console::style;

use crate::config::Settings;
use crate::models::{RoiEstimate, RoiInputs};
use crate::services::metrics::RoiBand;
use crate::utils::{format_percent, format_usd};

/// `idp roi`: pure calculation, no network.
pub fn run(settings: &Settings, inputs: &RoiInputs) {
    let estimate = RoiEstimate::calculate(inputs, settings);

    println!();
    println!("{}", style("ROI Estimate").bold().underlined());
    println!("  {:<18} {}", "Monthly Savings", style(format_usd(estimate.monthly_savings_usd)).cyan().bold());
    println!("  {:<18} {}", "Annual Savings", style(format_usd(estimate.annual_savings_usd)).cyan().bold());

    let roi = format_percent(estimate.roi_percent);
    let banded = match estimate.band() {
        RoiBand::Good => style(roi).green().bold(),
        RoiBand::Caution => style(roi).yellow().bold(),
        RoiBand::Bad => style(roi).red().bold(),
    };
    println!("  {:<18} {}", "ROI", banded);
    println!();
    println!(
        "  {}",
        style(format!(
            "assumes {} automated minutes per document and a {} implementation cost",
            settings.automated_minutes_per_doc,
            format_usd(settings.implementation_cost_usd)
        ))
        .dim()
    );
}
