use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::Result;
use notify::{recommended_watcher, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc::UnboundedSender;

#[derive(Debug, Clone)]
pub enum FileEventKind {
    Created,
    Modified,
    Deleted,
}

#[derive(Debug, Clone)]
pub struct FileEvent {
    pub path: PathBuf,
    pub kind: FileEventKind,
}

/// Watches the inbox folder and forwards events for processable files.
/// Dropping the service stops the watcher.
pub struct WatcherService {
    _watcher: RecommendedWatcher,
}

impl WatcherService {
    pub fn start(folder: &Path, tx: UnboundedSender<FileEvent>) -> Result<Self> {
        let mut watcher = recommended_watcher(move |res: notify::Result<Event>| {
            if let Ok(event) = res {
                let kind = match event.kind {
                    EventKind::Create(_) => FileEventKind::Created,
                    EventKind::Modify(_) => FileEventKind::Modified,
                    EventKind::Remove(_) => FileEventKind::Deleted,
                    _ => return,
                };
                for path in event.paths {
                    if is_processable(&path) {
                        let _ = tx.send(FileEvent {
                            path: path.to_path_buf(),
                            kind: kind.clone(),
                        });
                    }
                }
            }
        })?;

        watcher.watch(folder, RecursiveMode::NonRecursive)?;
        Ok(WatcherService { _watcher: watcher })
    }
}

/// Files already in the folder when watching starts.
pub fn scan_existing(folder: &Path) -> Vec<PathBuf> {
    walkdir::WalkDir::new(folder)
        .max_depth(1)
        .into_iter()
        .filter_map(|entry| entry.ok())
        .filter(|entry| entry.path().is_file())
        .filter(|entry| is_processable(entry.path()))
        .map(|entry| entry.path().to_path_buf())
        .collect()
}

/// Cheap extension gate; the real validation happens on the candidate.
pub fn is_processable(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| {
            ext.eq_ignore_ascii_case("pdf")
                || ext.eq_ignore_ascii_case("png")
                || ext.eq_ignore_ascii_case("jpg")
                || ext.eq_ignore_ascii_case("jpeg")
        })
        .unwrap_or(false)
}

/// Wait until the file size is stable so half-written files are not
/// uploaded. Returns false for vanished or still-empty files.
pub async fn debounce_file_event(path: &Path, debounce_ms: u64) -> bool {
    let mut last_size = None;
    for _ in 0..3 {
        tokio::time::sleep(Duration::from_millis(debounce_ms)).await;
        if let Ok(metadata) = std::fs::metadata(path) {
            let size = metadata.len();
            if Some(size) == last_size {
                return size > 0;
            }
            last_size = Some(size);
        } else {
            return false;
        }
    }
    last_size.unwrap_or(0) > 0
}
