use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use async_trait::async_trait;
use parking_lot::{RwLock, RwLockUpgradableReadGuard};
use serde_json::Value;
use tracing::{debug, info, warn};

use super::error::{OverrideError, OverrideResult};
use crate::lookup::KnowledgeSource;

/// Question text → authoritative reference answer.
pub type ReferenceMapping = HashMap<String, String>;

/// Immutable snapshot of the override file as last loaded.
///
/// Replaced whole on every reload, so the timestamp and mapping always belong together.
#[derive(Debug, Clone, Default)]
pub struct CacheRecord {
    modified: Option<SystemTime>,
    mapping: Arc<ReferenceMapping>,
}

impl CacheRecord {
    /// The "never loaded" record: no timestamp, empty mapping.
    pub fn never_loaded() -> Self {
        Self::default()
    }

    fn loaded(modified: Option<SystemTime>, mapping: ReferenceMapping) -> Self {
        Self {
            modified,
            mapping: Arc::new(mapping),
        }
    }

    /// Modification time of the file this record was read from.
    pub fn modified(&self) -> Option<SystemTime> {
        self.modified
    }

    pub fn mapping(&self) -> &Arc<ReferenceMapping> {
        &self.mapping
    }

    /// Returns `true` unless this is the "never loaded" record.
    pub fn is_loaded(&self) -> bool {
        self.modified.is_some()
    }
}

/// Operator-maintained override table backed by a JSON file.
///
/// Reads pull the file only when its modification time changed. A missing file means an
/// empty table; a malformed file leaves the last good table in place.
pub struct OverrideStore {
    path: PathBuf,
    record: RwLock<Arc<CacheRecord>>,
}

impl std::fmt::Debug for OverrideStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OverrideStore")
            .field("path", &self.path)
            .field("entries", &self.record.read().mapping.len())
            .finish()
    }
}

impl OverrideStore {
    /// Creates an empty store for `path`. Nothing is read until the first lookup.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            record: RwLock::new(Arc::new(CacheRecord::never_loaded())),
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current record without touching the disk.
    pub fn snapshot(&self) -> Arc<CacheRecord> {
        Arc::clone(&self.record.read())
    }

    /// Returns the mapping, reloading it first if the file's modification time changed.
    pub fn load_if_updated(&self) -> Arc<ReferenceMapping> {
        let guard = self.record.upgradable_read();

        let metadata = match fs::metadata(&self.path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Self::reset(guard);
            }
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Cannot stat overrides, keeping cached copy"
                );
                return Arc::clone(&guard.mapping);
            }
        };

        let modified = metadata.modified().ok();
        if modified.is_some() && modified == guard.modified {
            return Arc::clone(&guard.mapping);
        }

        self.reload(guard, modified)
    }

    /// Re-reads the file unconditionally, ignoring the cached modification time.
    pub fn refresh_now(&self) -> Arc<ReferenceMapping> {
        let guard = self.record.upgradable_read();

        match fs::metadata(&self.path) {
            Ok(metadata) => self.reload(guard, metadata.modified().ok()),
            Err(e) if e.kind() == ErrorKind::NotFound => Self::reset(guard),
            Err(e) => {
                warn!(
                    path = %self.path.display(),
                    error = %e,
                    "Cannot stat overrides, keeping cached copy"
                );
                Arc::clone(&guard.mapping)
            }
        }
    }

    /// Exact, case-sensitive match on the question text.
    pub fn get(&self, question: &str) -> Option<String> {
        self.load_if_updated().get(question).cloned()
    }

    fn reload(
        &self,
        guard: RwLockUpgradableReadGuard<'_, Arc<CacheRecord>>,
        modified: Option<SystemTime>,
    ) -> Arc<ReferenceMapping> {
        match read_mapping(&self.path) {
            Ok(mapping) => {
                info!(
                    path = %self.path.display(),
                    entries = mapping.len(),
                    "Loaded overrides"
                );
                let record = Arc::new(CacheRecord::loaded(modified, mapping));
                let mapping = Arc::clone(&record.mapping);
                *RwLockUpgradableReadGuard::upgrade(guard) = record;
                mapping
            }
            Err(e) => {
                warn!(error = %e, "Ignoring invalid overrides, keeping previous copy");
                Arc::clone(&guard.mapping)
            }
        }
    }

    fn reset(guard: RwLockUpgradableReadGuard<'_, Arc<CacheRecord>>) -> Arc<ReferenceMapping> {
        if guard.is_loaded() || !guard.mapping.is_empty() {
            debug!("Override file is gone, clearing cached overrides");
            *RwLockUpgradableReadGuard::upgrade(guard) = Arc::new(CacheRecord::never_loaded());
            return Arc::new(ReferenceMapping::new());
        }
        Arc::clone(&guard.mapping)
    }
}

/// Reads and validates the override file.
pub fn read_mapping(path: &Path) -> OverrideResult<ReferenceMapping> {
    let raw = fs::read_to_string(path).map_err(|source| OverrideError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let value: Value = serde_json::from_str(&raw).map_err(|source| OverrideError::Parse {
        path: path.to_path_buf(),
        source,
    })?;

    if !value.is_object() {
        return Err(OverrideError::NotAnObject {
            path: path.to_path_buf(),
            found: json_type(&value),
        });
    }

    serde_json::from_value(value).map_err(|source| OverrideError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[async_trait]
impl KnowledgeSource for OverrideStore {
    fn name(&self) -> &str {
        "overrides"
    }

    async fn lookup(&self, question: &str) -> String {
        self.get(question).unwrap_or_default()
    }
}
