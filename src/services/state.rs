use std::path::{Path, PathBuf};
use std::sync::Mutex;

use uuid::Uuid;

use crate::config::Settings;
use crate::error::ProcessingError;
use crate::models::AnalyticsSummary;
use crate::services::workflow::WorkflowPhase;

/// Context object owning everything the workflow shares between handlers:
/// settings, the last analytics fetch, the current file, the workflow
/// phase, and the id of the request allowed to publish results. Each slot
/// is replaced wholesale; a run whose id is no longer active is stale and
/// its result is dropped.
pub struct AppState {
    pub settings: Settings,
    last_summary: Mutex<Option<AnalyticsSummary>>,
    current_file: Mutex<Option<PathBuf>>,
    phase: Mutex<WorkflowPhase>,
    active_request: Mutex<Option<Uuid>>,
}

impl AppState {
    pub fn new(settings: Settings) -> Self {
        AppState {
            settings,
            last_summary: Mutex::new(None),
            current_file: Mutex::new(None),
            phase: Mutex::new(WorkflowPhase::Idle),
            active_request: Mutex::new(None),
        }
    }

    /// Start a new workflow run: the previous in-flight request (if any) is
    /// abandoned by replacing the active id, never cancelled.
    pub fn begin_request(&self, path: &Path) -> Result<Uuid, ProcessingError> {
        let id = Uuid::new_v4();
        *self.lock_active()? = Some(id);
        *self.lock_file()? = Some(path.to_path_buf());
        *self.lock_phase()? = WorkflowPhase::Uploading;
        Ok(id)
    }

    pub fn is_current(&self, id: Uuid) -> Result<bool, ProcessingError> {
        Ok(*self.lock_active()? == Some(id))
    }

    /// Advance the phase, but only for the run that still owns the slot.
    pub fn set_phase_if_current(
        &self,
        id: Uuid,
        phase: WorkflowPhase,
    ) -> Result<bool, ProcessingError> {
        if !self.is_current(id)? {
            return Ok(false);
        }
        *self.lock_phase()? = phase;
        Ok(true)
    }

    /// Terminal transition. Returns false when the run was superseded, in
    /// which case nothing is recorded and the caller must discard its
    /// result.
    pub fn complete_if_current(
        &self,
        id: Uuid,
        phase: WorkflowPhase,
    ) -> Result<bool, ProcessingError> {
        self.set_phase_if_current(id, phase)
    }

    pub fn phase(&self) -> Result<WorkflowPhase, ProcessingError> {
        Ok(*self.lock_phase()?)
    }

    pub fn store_summary(&self, summary: AnalyticsSummary) -> Result<(), ProcessingError> {
        *self
            .last_summary
            .lock()
            .map_err(|_| ProcessingError::LockPoisoned)? = Some(summary);
        Ok(())
    }

    pub fn last_summary(&self) -> Result<Option<AnalyticsSummary>, ProcessingError> {
        Ok(self
            .last_summary
            .lock()
            .map_err(|_| ProcessingError::LockPoisoned)?
            .clone())
    }

    pub fn current_file(&self) -> Result<Option<PathBuf>, ProcessingError> {
        Ok(self.lock_file()?.clone())
    }

    /// Used by watch mode when a file disappears from the inbox.
    pub fn clear_file_if_matches(&self, path: &Path) -> Result<(), ProcessingError> {
        let mut guard = self.lock_file()?;
        if guard.as_deref() == Some(path) {
            *guard = None;
        }
        Ok(())
    }

    fn lock_active(&self) -> Result<std::sync::MutexGuard<'_, Option<Uuid>>, ProcessingError> {
        self.active_request
            .lock()
            .map_err(|_| ProcessingError::LockPoisoned)
    }

    fn lock_file(&self) -> Result<std::sync::MutexGuard<'_, Option<PathBuf>>, ProcessingError> {
        self.current_file
            .lock()
            .map_err(|_| ProcessingError::LockPoisoned)
    }

    fn lock_phase(&self) -> Result<std::sync::MutexGuard<'_, WorkflowPhase>, ProcessingError> {
        self.phase.lock().map_err(|_| ProcessingError::LockPoisoned)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a_newer_request_supersedes_the_older_one() {
        let state = AppState::new(Settings::default());
        let first = state.begin_request(Path::new("a.pdf")).expect("begin");
        let second = state.begin_request(Path::new("b.pdf")).expect("begin");

        assert!(!state
            .complete_if_current(first, WorkflowPhase::Succeeded)
            .expect("complete"));
        assert!(state
            .complete_if_current(second, WorkflowPhase::Succeeded)
            .expect("complete"));
        assert_eq!(state.phase().expect("phase"), WorkflowPhase::Succeeded);
        assert_eq!(
            state.current_file().expect("file"),
            Some(PathBuf::from("b.pdf"))
        );
    }

    #[test]
    fn new_selection_restarts_from_uploading() {
        let state = AppState::new(Settings::default());
        let id = state.begin_request(Path::new("a.pdf")).expect("begin");
        state
            .complete_if_current(id, WorkflowPhase::Failed)
            .expect("complete");
        state.begin_request(Path::new("a.pdf")).expect("begin");
        assert_eq!(state.phase().expect("phase"), WorkflowPhase::Uploading);
    }

    #[test]
    fn deleted_file_clears_only_a_matching_slot() {
        let state = AppState::new(Settings::default());
        state.begin_request(Path::new("a.pdf")).expect("begin");
        state
            .clear_file_if_matches(Path::new("other.pdf"))
            .expect("clear");
        assert!(state.current_file().expect("file").is_some());
        state.clear_file_if_matches(Path::new("a.pdf")).expect("clear");
        assert!(state.current_file().expect("file").is_none());
    }
}
