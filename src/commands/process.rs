use std::path::Path;
use std::time::Duration;

use anyhow::{anyhow, Result};
use console::style;
use indicatif::{ProgressBar, ProgressStyle};

use crate::error::ProcessingError;
use crate::models::{ConfidenceClass, FieldRow};
use crate::services::backend::DocumentBackend;
use crate::services::state::AppState;
use crate::services::workflow::process_document;

use super::notify_success;

/// `idp process <FILE>`: validate, upload, extract, print the field table.
pub async fn run(
    state: &AppState,
    backend: &dyn DocumentBackend,
    path: &Path,
    send: bool,
) -> Result<()> {
    let spinner = phase_spinner("Uploading and extracting…");
    let outcome = match process_document(backend, state, path).await {
        Ok(outcome) => {
            spinner.finish_and_clear();
            outcome
        }
        Err(err) => {
            spinner.finish_and_clear();
            return Err(err.into());
        }
    };

    let Some(outcome) = outcome else {
        // Superseded runs print nothing; only the newest selection owns
        // the display.
        return Ok(());
    };

    print_field_table(&outcome.rows);
    notify_success("Document processed successfully!");

    if send {
        send_to_automation(backend).await?;
    }
    Ok(())
}

/// `idp automation`, and the `--send` tail of `idp process`.
pub async fn send_to_automation(backend: &dyn DocumentBackend) -> Result<()> {
    let spinner = phase_spinner("Sending to automation…");
    let response = backend.simulate_automation().await;
    spinner.finish_and_clear();

    let response = response?;
    if !response.success {
        let message = response
            .message
            .unwrap_or_else(|| "Failed to send data".to_string());
        return Err(ProcessingError::Application(message).into());
    }

    let id = response
        .automation_id
        .ok_or_else(|| anyhow!("Automation response is missing an id"))?;
    notify_success(&format!("Data sent to automation system! ID: {}", id));
    if let Some(status) = response.status {
        println!("  status: {}", status);
    }
    Ok(())
}

pub fn print_field_table(rows: &[FieldRow]) {
    println!();
    println!(
        "{:<16} {:<28} {}",
        style("Field").bold(),
        style("Value").bold(),
        style("Confidence").bold()
    );
    for row in rows {
        let confidence = format!("{}%", row.confidence_percent);
        let badge = match row.confidence_class() {
            ConfidenceClass::High => style(confidence).green(),
            ConfidenceClass::Medium => style(confidence).yellow(),
            ConfidenceClass::Low => style(confidence).red(),
        };
        println!("{:<16} {:<28} {}", row.label, row.display_value(), badge);
    }
    println!();
}

fn phase_spinner(message: &'static str) -> ProgressBar {
    let spinner = ProgressBar::new_spinner().with_message(message);
    if let Ok(spinner_style) = ProgressStyle::with_template("{spinner} {msg}") {
        spinner.set_style(spinner_style);
    }
    spinner.enable_steady_tick(Duration::from_millis(120));
    spinner
}
