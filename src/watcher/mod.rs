//! Push-based refresh of the override table.
//!
//! [`NotificationSource::start`] tries to subscribe to file-system events for the directory
//! holding the override file. When that works, a background task calls
//! [`OverrideStore::refresh_now`](crate::overrides::OverrideStore::refresh_now) on every
//! create/modify/remove of the file. When it does not, the store keeps working on the pull
//! model alone.

pub mod error;
pub mod source;

#[cfg(test)]
mod tests;

pub use error::{WatchError, WatchResult};
pub use source::{
    NotificationSource, WatchTarget, WatcherHandle, apply_event, is_reload_trigger,
    refresh_off_runtime,
};
