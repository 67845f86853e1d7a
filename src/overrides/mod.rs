//! Operator-maintained override table.
//!
//! The table lives in a JSON object file (`{"question": "reference answer", ...}`) that an
//! operator may edit while the process runs. [`OverrideStore`] keeps the last good copy in
//! an immutable [`CacheRecord`] and swaps in a fresh record whenever the file's
//! modification time changes (pull) or the [watcher](crate::watcher) reports an edit (push).
//!
//! Failures never escape the store:
//! - missing file → empty table, timestamp reset
//! - malformed file → previous table kept, retried on the next read

pub mod error;
pub mod store;


pub use error::{OverrideError, OverrideResult};
pub use store::{CacheRecord, OverrideStore, ReferenceMapping, read_mapping};
