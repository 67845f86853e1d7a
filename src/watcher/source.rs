use std::path::{Path, PathBuf};
use std::sync::Arc;

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use super::error::{WatchError, WatchResult};
use crate::overrides::OverrideStore;

/// Whether override edits are pushed to the store, decided once at startup.
pub enum NotificationSource {
    Active(WatcherHandle),
    Disabled,
}

impl NotificationSource {
    /// Starts a watcher for `store`'s file, or falls back to [`NotificationSource::Disabled`].
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(store: Arc<OverrideStore>) -> Self {
        match WatcherHandle::spawn(store) {
            Ok(handle) => Self::Active(handle),
            Err(e) => {
                info!(reason = %e, "Change notifications unavailable, overrides refresh on read");
                Self::Disabled
            }
        }
    }

    pub fn is_active(&self) -> bool {
        matches!(self, Self::Active(_))
    }

    /// Stops the watcher (if any) and waits for its task to finish.
    pub async fn shutdown(self) {
        if let Self::Active(handle) = self {
            handle.shutdown().await;
        }
    }
}

/// Canonical location of the watched file and its directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatchTarget {
    pub dir: PathBuf,
    pub file: PathBuf,
}

impl WatchTarget {
    /// Resolves `path` against its (existing) parent directory.
    ///
    /// The file itself does not need to exist; the directory does.
    pub fn resolve(path: &Path) -> WatchResult<Self> {
        let file_name = path.file_name().ok_or_else(|| WatchError::NoFileName {
            path: path.to_path_buf(),
        })?;

        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let dir = parent.canonicalize().map_err(|source| WatchError::Resolve {
            path: parent.to_path_buf(),
            source,
        })?;

        Ok(Self {
            file: dir.join(file_name),
            dir,
        })
    }

    /// Returns `true` if `path` names the watched file.
    pub fn matches(&self, path: &Path) -> bool {
        path == self.file || path.canonicalize().is_ok_and(|p| p == self.file)
    }
}

/// Running watcher: the platform notifier plus the task draining its events.
pub struct WatcherHandle {
    watcher: RecommendedWatcher,
    target: WatchTarget,
    stop_tx: oneshot::Sender<()>,
    task: JoinHandle<()>,
}

impl std::fmt::Debug for WatcherHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WatcherHandle")
            .field("target", &self.target)
            .finish()
    }
}

impl WatcherHandle {
    /// Subscribes to the override file's directory (non-recursive) and spawns the event task.
    pub fn spawn(store: Arc<OverrideStore>) -> WatchResult<Self> {
        let target = WatchTarget::resolve(store.path())?;

        let (event_tx, mut event_rx) = mpsc::unbounded_channel();
        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
            // Receiver gone means we are shutting down.
            let _ = event_tx.send(res);
        })
        .map_err(WatchError::Backend)?;

        watcher
            .watch(&target.dir, RecursiveMode::NonRecursive)
            .map_err(|source| WatchError::Watch {
                path: target.dir.clone(),
                source,
            })?;

        let (stop_tx, mut stop_rx) = oneshot::channel();
        let task_target = target.clone();
        let task = tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = &mut stop_rx => break,
                    received = event_rx.recv() => match received {
                        Some(Ok(event)) => {
                            refresh_off_runtime(event, task_target.clone(), Arc::clone(&store)).await;
                        }
                        Some(Err(e)) => warn!(error = %e, "Watch error"),
                        None => break,
                    },
                }
            }
            debug!(path = %task_target.file.display(), "Override watcher stopped");
        });

        info!(path = %target.file.display(), "Watching override file");
        Ok(Self {
            watcher,
            target,
            stop_tx,
            task,
        })
    }

    pub fn target(&self) -> &WatchTarget {
        &self.target
    }

    /// Stops the notifier and joins the event task.
    pub async fn shutdown(self) {
        let Self {
            mut watcher,
            target,
            stop_tx,
            task,
        } = self;

        if let Err(e) = watcher.unwatch(&target.dir) {
            debug!(error = %e, "Unwatch failed");
        }
        drop(watcher);
        let _ = stop_tx.send(());

        if let Err(e) = task.await {
            warn!(error = %e, "Override watcher task failed");
        }
    }
}

/// Event kinds that mean the file's contents may have changed.
pub fn is_reload_trigger(kind: &EventKind) -> bool {
    matches!(
        kind,
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
    )
}

/// Refreshes `store` if `event` touches the watched file. Returns `true` if it did.
pub fn apply_event(event: &Event, target: &WatchTarget, store: &OverrideStore) -> bool {
    if !is_reload_trigger(&event.kind) {
        return false;
    }
    if !event.paths.iter().any(|path| target.matches(path)) {
        return false;
    }

    let mapping = store.refresh_now();
    info!(
        path = %target.file.display(),
        entries = mapping.len(),
        kind = ?event.kind,
        "Override file changed, reloaded"
    );
    true
}

/// Runs [`apply_event`] on the blocking pool; the reload does synchronous file I/O.
pub async fn refresh_off_runtime(
    event: Event,
    target: WatchTarget,
    store: Arc<OverrideStore>,
) -> bool {
    match tokio::task::spawn_blocking(move || apply_event(&event, &target, &store)).await {
        Ok(reloaded) => reloaded,
        Err(e) => {
            warn!(error = %e, "Override reload task failed");
            false
        }
    }
}
