//! Template directory watching.

use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::Duration;

use notify::{RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc as async_mpsc;

/// Events emitted by the template watcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateEvent {
    /// A template was created or modified
    Changed(PathBuf),

    /// A template was removed
    Removed(PathBuf),
}

impl TemplateEvent {
    /// Path the event refers to.
    pub fn path(&self) -> &Path {
        match self {
            TemplateEvent::Changed(path) | TemplateEvent::Removed(path) => path,
        }
    }
}

/// Watches the templates directory for changes.
pub struct TemplateWatcher {
    _watcher: RecommendedWatcher,
}

impl TemplateWatcher {
    /// Watch `dir` recursively.
    ///
    /// Returns the watcher and a channel to receive events. Events stop
    /// when the watcher is dropped.
    pub fn new(
        dir: &Path,
    ) -> Result<(Self, async_mpsc::Receiver<TemplateEvent>), std::io::Error> {
        let (sync_tx, sync_rx) = mpsc::channel();
        let (async_tx, async_rx) = async_mpsc::channel(100);

        let mut watcher = notify::recommended_watcher(move |res: Result<notify::Event, _>| {
            if let Ok(event) = res {
                let _ = sync_tx.send(event);
            }
        })
        .map_err(std::io::Error::other)?;

        watcher
            .watch(dir, RecursiveMode::Recursive)
            .map_err(std::io::Error::other)?;

        std::thread::spawn(move || {
            let debounce_duration = Duration::from_millis(100);

            // Editors emit bursts of events per save
            while let Some(burst) = next_burst(&sync_rx, debounce_duration) {
                for e in burst {
                    if async_tx.blocking_send(e).is_err() {
                        return;
                    }
                }
            }
        });

        Ok((Self { _watcher: watcher }, async_rx))
    }
}

/// Wait for the next burst of events and return it once `quiet` passes
/// without another event. Only the last event per path is kept.
///
/// Returns `None` when the sender is gone.
fn next_burst(
    rx: &mpsc::Receiver<notify::Event>,
    quiet: Duration,
) -> Option<Vec<TemplateEvent>> {
    let mut pending = Vec::new();
    push_events(&mut pending, rx.recv().ok()?);

    while let Ok(event) = rx.recv_timeout(quiet) {
        push_events(&mut pending, event);
    }

    Some(pending)
}

fn push_events(pending: &mut Vec<TemplateEvent>, event: notify::Event) {
    for path in &event.paths {
        if let Some(e) = classify_event(path, &event.kind) {
            pending.retain(|p| p.path() != e.path());
            pending.push(e);
        }
    }
}

/// Classify a notify event into a template event.
fn classify_event(path: &Path, kind: &notify::EventKind) -> Option<TemplateEvent> {
    use notify::EventKind;

    match kind {
        EventKind::Create(_) | EventKind::Modify(_) => {
            Some(TemplateEvent::Changed(path.to_path_buf()))
        }
        EventKind::Remove(_) => Some(TemplateEvent::Removed(path.to_path_buf())),
        _ => None,
    }
}
