use super::source::{
    NotificationSource, WatchTarget, apply_event, is_reload_trigger, refresh_off_runtime,
};
use super::error::WatchError;
use crate::constants::DEFAULT_LOG_DIRECTIVE;
use crate::overrides::OverrideStore;

use std::fs::{self, File};
use std::io;
use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, SystemTime};

use notify::event::{AccessKind, CreateKind, DataChange, ModifyKind, RemoveKind};
use notify::{Event, EventKind};
use parking_lot::Mutex;
use tempfile::TempDir;
use tracing_subscriber::EnvFilter;

fn write_with_mtime(path: &Path, contents: &str, mtime: SystemTime) {
    fs::write(path, contents).unwrap();
    File::options()
        .write(true)
        .open(path)
        .unwrap()
        .set_modified(mtime)
        .unwrap();
}

fn fixed_time() -> SystemTime {
    SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000)
}

/// Collects formatted log output for assertions.
#[derive(Clone, Default)]
struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

impl CapturedLogs {
    fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.lock()).into_owned()
    }
}

impl io::Write for CapturedLogs {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

fn modify_event(path: &Path) -> Event {
    Event::new(EventKind::Modify(ModifyKind::Data(DataChange::Content))).add_path(path.to_path_buf())
}

#[test]
fn test_reload_trigger_kinds() {
    assert!(is_reload_trigger(&EventKind::Create(CreateKind::File)));
    assert!(is_reload_trigger(&EventKind::Modify(ModifyKind::Any)));
    assert!(is_reload_trigger(&EventKind::Remove(RemoveKind::File)));
    assert!(!is_reload_trigger(&EventKind::Access(AccessKind::Any)));
    assert!(!is_reload_trigger(&EventKind::Other));
}

#[test]
fn test_resolve_target_in_existing_dir() {
    let temp = TempDir::new().unwrap();
    let target = WatchTarget::resolve(&temp.path().join("faq.json")).unwrap();

    let dir = temp.path().canonicalize().unwrap();
    assert_eq!(target.dir, dir);
    assert_eq!(target.file, dir.join("faq.json"));
}

#[test]
fn test_resolve_bare_file_name_uses_current_dir() {
    let target = WatchTarget::resolve(Path::new("faq.json")).unwrap();
    let cwd = std::env::current_dir().unwrap().canonicalize().unwrap();
    assert_eq!(target.dir, cwd);
    assert_eq!(target.file, cwd.join("faq.json"));
}

#[test]
fn test_resolve_missing_dir_fails() {
    let temp = TempDir::new().unwrap();
    let err = WatchTarget::resolve(&temp.path().join("nope").join("faq.json")).unwrap_err();
    assert!(matches!(err, WatchError::Resolve { .. }));
}

#[test]
fn test_target_matches_non_canonical_path() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("faq.json");
    fs::write(&path, "{}").unwrap();
    let target = WatchTarget::resolve(&path).unwrap();

    assert!(target.matches(&temp.path().join(".").join("faq.json")));
    assert!(!target.matches(&temp.path().join("other.json")));
}

#[test]
fn test_apply_event_refreshes_despite_unchanged_mtime() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("faq.json");
    write_with_mtime(&path, r#"{"q": "old"}"#, fixed_time());

    let store = OverrideStore::new(&path);
    assert_eq!(store.get("q").as_deref(), Some("old"));

    // Same mtime: the pull check alone would not notice.
    write_with_mtime(&path, r#"{"q": "new"}"#, fixed_time());
    assert_eq!(store.get("q").as_deref(), Some("old"));

    let target = WatchTarget::resolve(&path).unwrap();
    assert!(apply_event(&modify_event(&target.file), &target, &store));
    assert_eq!(
        store.snapshot().mapping().get("q").map(String::as_str),
        Some("new")
    );
}

#[test]
fn test_apply_event_ignores_other_files_and_kinds() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("faq.json");
    write_with_mtime(&path, r#"{"q": "old"}"#, fixed_time());

    let store = OverrideStore::new(&path);
    store.load_if_updated();
    write_with_mtime(&path, r#"{"q": "new"}"#, fixed_time());

    let target = WatchTarget::resolve(&path).unwrap();
    let other = modify_event(&target.dir.join("notes.txt"));
    assert!(!apply_event(&other, &target, &store));

    let access = Event::new(EventKind::Access(AccessKind::Any)).add_path(target.file.clone());
    assert!(!apply_event(&access, &target, &store));

    assert_eq!(
        store.snapshot().mapping().get("q").map(String::as_str),
        Some("old")
    );
}

#[test]
fn test_apply_remove_event_clears_store() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("faq.json");
    fs::write(&path, r#"{"q": "a"}"#).unwrap();

    let store = OverrideStore::new(&path);
    store.load_if_updated();
    let target = WatchTarget::resolve(&path).unwrap();

    fs::remove_file(&path).unwrap();
    let event = Event::new(EventKind::Remove(RemoveKind::File)).add_path(target.file.clone());
    assert!(apply_event(&event, &target, &store));

    assert!(store.snapshot().mapping().is_empty());
    assert!(!store.snapshot().is_loaded());
}

#[tokio::test]
async fn test_start_disabled_when_dir_missing() {
    let temp = TempDir::new().unwrap();
    let store = Arc::new(OverrideStore::new(temp.path().join("gone").join("faq.json")));

    let source = NotificationSource::start(store.clone());
    assert!(!source.is_active());
    source.shutdown().await;

    // Pull model still works.
    assert!(store.load_if_updated().is_empty());
}

#[tokio::test]
async fn test_active_watcher_pushes_edits() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("faq.json");
    write_with_mtime(&path, r#"{"q": "old"}"#, fixed_time());

    let store = Arc::new(OverrideStore::new(&path));
    store.load_if_updated();

    let source = NotificationSource::start(store.clone());
    if !source.is_active() {
        // Platform without file notifications; nothing to observe.
        return;
    }

    write_with_mtime(&path, r#"{"q": "new"}"#, fixed_time());

    let mut pushed = false;
    for _ in 0..100 {
        if store.snapshot().mapping().get("q").map(String::as_str) == Some("new") {
            pushed = true;
            break;
        }
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    source.shutdown().await;

    assert!(pushed, "watcher did not reload the edited file");
}

#[test]
fn test_disabled_notice_visible_under_default_filter() {
    let temp = TempDir::new().unwrap();
    let store = Arc::new(OverrideStore::new(temp.path().join("gone").join("faq.json")));

    let logs = CapturedLogs::default();
    let writer = logs.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(DEFAULT_LOG_DIRECTIVE))
        .with_ansi(false)
        .with_writer(move || writer.clone())
        .finish();

    // Fails while resolving the directory, before any task is spawned.
    let source = tracing::subscriber::with_default(subscriber, || {
        NotificationSource::start(store)
    });

    assert!(!source.is_active());
    let output = logs.contents();
    assert!(output.contains("INFO"), "unexpected log output: {output}");
    assert!(output.contains("Change notifications unavailable"));
}

#[tokio::test]
async fn test_refresh_off_runtime_reloads_store() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("faq.json");
    write_with_mtime(&path, r#"{"q": "old"}"#, fixed_time());

    let store = Arc::new(OverrideStore::new(&path));
    store.load_if_updated();
    write_with_mtime(&path, r#"{"q": "new"}"#, fixed_time());

    let target = WatchTarget::resolve(&path).unwrap();
    let event = modify_event(&target.file);
    assert!(refresh_off_runtime(event, target.clone(), store.clone()).await);
    assert_eq!(
        store.snapshot().mapping().get("q").map(String::as_str),
        Some("new")
    );

    let unrelated = modify_event(&temp.path().join("other.json"));
    assert!(!refresh_off_runtime(unrelated, target, store).await);
}
