use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use innovo_idp::config::Settings;
use innovo_idp::error::ProcessingError;
use innovo_idp::models::{
    AnalyticsSummary, AutomationResponse, ExtractionResult, UploadResponse, NOT_DETECTED,
};
use innovo_idp::services::backend::DocumentBackend;
use innovo_idp::services::state::AppState;
use innovo_idp::services::workflow::{process_document, WorkflowPhase};

struct FakeBackend {
    calls: Mutex<Vec<String>>,
    fail_upload: bool,
    result: ExtractionResult,
}

impl FakeBackend {
    fn new() -> Self {
        FakeBackend {
            calls: Mutex::new(Vec::new()),
            fail_upload: false,
            result: ExtractionResult::default(),
        }
    }

    fn record(&self, call: &str) {
        self.calls.lock().expect("calls lock").push(call.to_string());
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().expect("calls lock").clone()
    }
}

#[async_trait]
impl DocumentBackend for FakeBackend {
    async fn upload(&self, path: &Path) -> Result<UploadResponse, ProcessingError> {
        self.record("upload");
        if self.fail_upload {
            return Err(ProcessingError::Application("No file uploaded".to_string()));
        }
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default();
        Ok(UploadResponse {
            filepath: format!("uploads/{}", filename),
            filename,
        })
    }

    async fn extract(&self, filepath: &str) -> Result<ExtractionResult, ProcessingError> {
        self.record("extract");
        // Simulated slow extraction lets a newer selection overtake this one.
        if filepath.contains("slow") {
            tokio::time::sleep(Duration::from_millis(300)).await;
        }
        Ok(self.result.clone())
    }

    async fn analytics(&self) -> Result<AnalyticsSummary, ProcessingError> {
        self.record("analytics");
        Ok(AnalyticsSummary::default())
    }

    async fn simulate_automation(&self) -> Result<AutomationResponse, ProcessingError> {
        self.record("automation");
        Ok(AutomationResponse {
            success: true,
            automation_id: Some("AUTO_TEST1234".to_string()),
            message: None,
            status: Some("Queued for processing".to_string()),
        })
    }
}

fn temp_file(name: &str) -> PathBuf {
    let dir = std::env::temp_dir().join(format!("idp-workflow-{}", std::process::id()));
    std::fs::create_dir_all(&dir).expect("create temp dir");
    let path = dir.join(name);
    std::fs::write(&path, b"%PDF-1.4 test payload").expect("write temp file");
    path
}

#[tokio::test]
async fn failed_upload_never_triggers_extraction() {
    let backend = FakeBackend {
        fail_upload: true,
        ..FakeBackend::new()
    };
    let state = AppState::new(Settings::default());
    let path = temp_file("invoice.pdf");

    let err = process_document(&backend, &state, &path)
        .await
        .expect_err("upload failure must surface");
    assert!(matches!(err, ProcessingError::Application(_)));
    assert_eq!(backend.calls(), ["upload"]);
    assert_eq!(state.phase().expect("phase"), WorkflowPhase::Failed);
    // The selection itself is not rolled back.
    assert_eq!(state.current_file().expect("file"), Some(path));
}

#[tokio::test]
async fn empty_extraction_yields_six_not_detected_rows() {
    let backend = FakeBackend::new();
    let state = AppState::new(Settings::default());
    let path = temp_file("scan.png");

    let outcome = process_document(&backend, &state, &path)
        .await
        .expect("workflow")
        .expect("current run publishes its result");

    assert_eq!(backend.calls(), ["upload", "extract"]);
    assert_eq!(outcome.rows.len(), 6);
    assert!(outcome
        .rows
        .iter()
        .all(|row| row.display_value() == NOT_DETECTED));
    assert_eq!(state.phase().expect("phase"), WorkflowPhase::Succeeded);
}

#[tokio::test]
async fn rejected_file_makes_no_network_calls() {
    let backend = FakeBackend::new();
    let state = AppState::new(Settings::default());
    let path = temp_file("notes.txt");

    let err = process_document(&backend, &state, &path)
        .await
        .expect_err("unsupported type must be rejected");
    assert!(matches!(err, ProcessingError::Validation(_)));
    assert_eq!(
        err.to_string(),
        "Please select a valid file type (JPG, PNG, or PDF)"
    );
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn superseded_run_drops_its_result() {
    let backend = FakeBackend::new();
    let state = AppState::new(Settings::default());
    let slow = temp_file("slow.pdf");
    let fast = temp_file("fast.pdf");

    let (first, second) = tokio::join!(process_document(&backend, &state, &slow), async {
        // Let the first run pass validation and claim the request slot
        // before the second selection replaces it.
        tokio::time::sleep(Duration::from_millis(50)).await;
        process_document(&backend, &state, &fast).await
    });

    assert!(first.expect("first run").is_none());
    let outcome = second.expect("second run").expect("newest run wins");
    assert_eq!(outcome.filepath, "uploads/fast.pdf");
    assert_eq!(state.phase().expect("phase"), WorkflowPhase::Succeeded);
    assert_eq!(state.current_file().expect("file"), Some(fast));
}
