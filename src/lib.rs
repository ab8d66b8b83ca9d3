//! # Settingcache
//!
//! A small library and demonstration of a classic caching pitfall: deriving a
//! new object from a cached default by mutating the cached object in place.
//!
//! ## The Pitfall
//!
//! ```rust
//! use rust_decimal::Decimal;
//! use settingcache::SettingStore;
//!
//! let store = SettingStore::with_defaults();
//! store.initialize();
//! assert_eq!(store.common_rate(), Decimal::new(5, 3));
//!
//! // Member B "creates" its own setting by editing the cached one...
//! store.derive_mutating("MemberB", Decimal::new(3, 3)).unwrap();
//!
//! // ...and every other reader now sees Member B's rate.
//! assert_eq!(store.common_rate(), Decimal::new(3, 3));
//! ```
//!
//! ## The Fix
//!
//! ```rust
//! use rust_decimal::Decimal;
//! use settingcache::SettingStore;
//!
//! let store = SettingStore::with_defaults();
//! store.initialize();
//!
//! let member = store.derive_copying("MemberB", Decimal::new(3, 3)).unwrap();
//! assert_eq!(member.currency_id(), "TWD");
//!
//! // The shared default is untouched.
//! assert_eq!(store.common_rate(), Decimal::new(5, 3));
//! ```
//!
//! ## Process-wide Store
//!
//! The free functions in this crate operate on [`SettingStore::global`], the
//! store the demonstration binary runs against. Library code should prefer
//! an owned [`SettingStore`].

pub mod demo;
pub mod logging;

pub use settingcache_core::*;

use rust_decimal::Decimal;

/// Installs the shared entry in the process-wide store.
///
/// Returns `false` if it was already present.
pub fn initialize() -> bool {
    SettingStore::global().initialize()
}

/// Removes the shared entry from the process-wide store.
pub fn reset() -> bool {
    SettingStore::global().reset()
}

/// Rate of the process-wide shared entry, or the default rate when absent.
pub fn common_rate() -> Decimal {
    SettingStore::global().common_rate()
}

/// Mutate-in-place derive against the process-wide store.
///
/// # Examples
///
/// ```rust
/// use rust_decimal::Decimal;
///
/// settingcache::reset();
/// settingcache::initialize();
/// let shared = settingcache::derive_mutating("MemberB", Decimal::new(3, 3)).unwrap();
/// assert_eq!(settingcache::common_rate(), shared.rate());
/// ```
pub fn derive_mutating(profile_name: impl Into<String>, rate: Decimal) -> Result<SharedSetting> {
    SettingStore::global().derive_mutating(profile_name, rate)
}

/// Copy-then-mutate derive against the process-wide store.
pub fn derive_copying(profile_name: impl Into<String>, rate: Decimal) -> Result<Setting> {
    SettingStore::global().derive_copying(profile_name, rate)
}
