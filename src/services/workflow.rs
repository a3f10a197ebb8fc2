use std::path::Path;

use tracing::{debug, info};
use uuid::Uuid;

use crate::config::FieldConfidence;
use crate::error::ProcessingError;
use crate::models::{ExtractionResult, FieldRow, UploadCandidate};
use crate::services::backend::DocumentBackend;
use crate::services::state::AppState;
use crate::services::validator;
use crate::utils::sha256_file;

/// Where a workflow run currently stands. A new file selection restarts at
/// `Uploading`; nothing ever re-enters `Uploading` on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowPhase {
    Idle,
    Uploading,
    Uploaded,
    Extracting,
    Succeeded,
    Failed,
}

#[derive(Debug, Clone)]
pub struct ProcessOutcome {
    pub request_id: Uuid,
    pub filepath: String,
    pub result: ExtractionResult,
    pub rows: Vec<FieldRow>,
}

/// Run the two-phase upload/extract workflow for one file.
///
/// Validation happens before any network call. A failed upload stops the
/// run; `/extract` is never attempted after it. `Ok(None)` means the run
/// finished but had been superseded by a newer selection, so its result
/// must not be shown. Earlier side effects are not rolled back on failure.
pub async fn process_document(
    backend: &dyn DocumentBackend,
    state: &AppState,
    path: &Path,
) -> Result<Option<ProcessOutcome>, ProcessingError> {
    let candidate = UploadCandidate::from_path(path)?;
    validator::validate(&candidate)?;

    let request_id = state.begin_request(path)?;
    if let Ok(hash) = sha256_file(path) {
        debug!(file = %candidate.file_name, %hash, "starting upload");
    }

    let uploaded = match backend.upload(path).await {
        Ok(response) => response,
        Err(err) => {
            state.complete_if_current(request_id, WorkflowPhase::Failed)?;
            return Err(err);
        }
    };
    state.set_phase_if_current(request_id, WorkflowPhase::Uploaded)?;
    info!(filepath = %uploaded.filepath, "upload complete");

    state.set_phase_if_current(request_id, WorkflowPhase::Extracting)?;
    let result = match backend.extract(&uploaded.filepath).await {
        Ok(result) => result,
        Err(err) => {
            state.complete_if_current(request_id, WorkflowPhase::Failed)?;
            return Err(err);
        }
    };

    if !state.complete_if_current(request_id, WorkflowPhase::Succeeded)? {
        debug!(%request_id, "dropping result of superseded request");
        return Ok(None);
    }

    let rows = field_rows(&result, &state.settings.field_confidence);
    Ok(Some(ProcessOutcome {
        request_id,
        filepath: uploaded.filepath,
        result,
        rows,
    }))
}

/// Map the six known fields into display rows. Every row is always present;
/// absent or empty fields fall back to the "Not detected" sentinel inside
/// `FieldRow`. Confidences are display placeholders from the settings.
pub fn field_rows(result: &ExtractionResult, confidence: &FieldConfidence) -> Vec<FieldRow> {
    vec![
        FieldRow::new("Document Type", result.document_type.clone(), confidence.document_type),
        FieldRow::new("Company Name", result.company_name.clone(), confidence.company_name),
        FieldRow::new("Invoice Number", result.invoice_number.clone(), confidence.invoice_number),
        FieldRow::new("Date", result.date.clone(), confidence.date),
        FieldRow::new("Amount", result.amount.clone(), confidence.amount),
        FieldRow::new("Tax", result.tax.clone(), confidence.tax),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NOT_DETECTED;

    #[test]
    fn all_absent_fields_still_produce_six_rows() {
        let rows = field_rows(&ExtractionResult::default(), &FieldConfidence::default());
        assert_eq!(rows.len(), 6);
        assert!(rows.iter().all(|row| row.display_value() == NOT_DETECTED));
        let labels: Vec<_> = rows.iter().map(|row| row.label).collect();
        assert_eq!(
            labels,
            ["Document Type", "Company Name", "Invoice Number", "Date", "Amount", "Tax"]
        );
    }

    #[test]
    fn detected_fields_keep_their_values_and_placeholder_confidence() {
        let result = ExtractionResult {
            document_type: Some("Invoice".to_string()),
            amount: Some("2,750.00".to_string()),
            tax: Some(String::new()),
            ..ExtractionResult::default()
        };
        let rows = field_rows(&result, &FieldConfidence::default());
        assert_eq!(rows[0].display_value(), "Invoice");
        assert_eq!(rows[0].confidence_percent, 95);
        assert_eq!(rows[4].display_value(), "2,750.00");
        assert_eq!(rows[5].display_value(), NOT_DETECTED);
    }
}
