use std::path::Path;

use anyhow::{bail, Result};
use console::style;
use tracing::warn;

use crate::services::backend::DocumentBackend;
use crate::services::state::AppState;
use crate::services::watcher::{
    debounce_file_event, scan_existing, FileEvent, FileEventKind, WatcherService,
};
use crate::services::workflow::process_document;

use super::{notify_error, process::print_field_table};

const DEBOUNCE_MS: u64 = 700;

/// `idp watch <FOLDER>`: process files already present, then keep
/// processing new ones until interrupted. One failed file never stops the
/// loop.
pub async fn run(state: &AppState, backend: &dyn DocumentBackend, folder: &Path) -> Result<()> {
    if !folder.is_dir() {
        bail!("{} is not a directory", folder.display());
    }

    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    let _watcher = WatcherService::start(folder, tx)?;

    for path in scan_existing(folder) {
        handle_file(state, backend, &path).await;
    }

    println!(
        "{} watching {} (Ctrl-C to stop)",
        style("✓").green().bold(),
        folder.display()
    );

    while let Some(FileEvent { path, kind }) = rx.recv().await {
        match kind {
            FileEventKind::Deleted => {
                state.clear_file_if_matches(&path)?;
            }
            FileEventKind::Created | FileEventKind::Modified => {
                if !debounce_file_event(&path, DEBOUNCE_MS).await {
                    continue;
                }
                handle_file(state, backend, &path).await;
            }
        }
    }
    Ok(())
}

async fn handle_file(state: &AppState, backend: &dyn DocumentBackend, path: &Path) {
    println!("{} {}", style("processing").bold(), path.display());
    match process_document(backend, state, path).await {
        Ok(Some(outcome)) => print_field_table(&outcome.rows),
        Ok(None) => {}
        Err(err) => {
            warn!(file = %path.display(), error = %err, "processing failed");
            notify_error(&err.to_string());
        }
    }
}
