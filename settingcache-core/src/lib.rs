//! # Settingcache Core
//!
//! Core types for caching a shared default setting and deriving per-profile
//! settings from it.
//!
//! The crate exists to contrast two ways of deriving from a cached object:
//!
//! - **Mutate in place**: overwrite the cached object and return it. The
//!   cached default silently changes for everyone.
//! - **Copy then mutate**: build a new value from the cached one. The cached
//!   default stays intact.
//!
//! ## Module Organization
//!
//! - [`setting`] - The immutable `Setting` value and the aliasing `SharedSetting` handle
//! - [`cache_entry`] - Entry wrapper with insertion time and read counter
//! - [`memory_cache`] - Named, lock-protected key/value cache
//! - [`store`] - The shared-setting store and both derivers
//! - [`config`] - Store configuration
//! - [`error`] - Error type
//!
mod cache_entry;
mod config;
mod error;
mod memory_cache;
mod setting;
mod store;

#[cfg(feature = "stats")]
mod stats;

pub use cache_entry::CacheEntry;
pub use config::{StoreConfig, DEFAULT_CACHE_KEY};
pub use error::{Result, SettingError};
pub use memory_cache::MemoryCache;
pub use setting::{Setting, SharedSetting, DEFAULT_CURRENCY_ID};
pub use store::SettingStore;

#[cfg(feature = "stats")]
pub use stats::CacheStats;

/// Which derivation strategy to apply to the shared entry.
///
/// # Examples
///
/// ```
/// use settingcache_core::DerivePolicy;
///
/// assert!(DerivePolicy::MutateInPlace.alters_shared_entry());
/// assert!(!DerivePolicy::CopyThenMutate.alters_shared_entry());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DerivePolicy {
    MutateInPlace,
    CopyThenMutate,
}

impl DerivePolicy {
    pub fn alters_shared_entry(self) -> bool {
        matches!(self, DerivePolicy::MutateInPlace)
    }
}
