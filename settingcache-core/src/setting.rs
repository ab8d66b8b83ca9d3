use parking_lot::RwLock;
use rust_decimal::Decimal;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Currency assigned to a setting when none is given.
pub const DEFAULT_CURRENCY_ID: &str = "TWD";

/// A profile's pricing setting.
///
/// `Setting` is an immutable value: there are no setters, and
/// [`derive`](Setting::derive) always returns a new value. Code holding a
/// `Setting` can therefore never change what another holder sees.
///
/// # Examples
///
/// ```
/// use rust_decimal::Decimal;
/// use settingcache_core::Setting;
///
/// let common = Setting::with_defaults(Decimal::new(5, 3));
/// let member = common.derive("MemberB", Decimal::new(3, 3));
///
/// assert_eq!(member.profile_name(), "MemberB");
/// assert_eq!(member.currency_id(), "TWD");
/// assert_eq!(common.rate(), Decimal::new(5, 3));
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Setting {
    profile_name: String,
    currency_id: String,
    rate: Decimal,
}

impl Setting {
    /// Creates a setting from all three fields.
    pub fn new(
        profile_name: impl Into<String>,
        currency_id: impl Into<String>,
        rate: Decimal,
    ) -> Self {
        Self {
            profile_name: profile_name.into(),
            currency_id: currency_id.into(),
            rate,
        }
    }

    /// An unnamed setting in the default currency.
    pub fn with_defaults(rate: Decimal) -> Self {
        Self::new(String::new(), DEFAULT_CURRENCY_ID, rate)
    }

    pub fn profile_name(&self) -> &str {
        &self.profile_name
    }

    pub fn currency_id(&self) -> &str {
        &self.currency_id
    }

    pub fn rate(&self) -> Decimal {
        self.rate
    }

    /// Builds a new setting for `profile_name` with `rate`, carrying over this
    /// setting's currency.
    pub fn derive(&self, profile_name: impl Into<String>, rate: Decimal) -> Self {
        Self {
            profile_name: profile_name.into(),
            currency_id: self.currency_id.clone(),
            rate,
        }
    }
}

impl fmt::Display for Setting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "ProfileName: {}, CurrencyId: {}, Rate: {}",
            self.profile_name, self.currency_id, self.rate
        )
    }
}

/// A shared, mutable handle to one [`Setting`].
///
/// Cloning the handle clones the reference, not the setting: every clone
/// points at the same allocation and carries the same
/// [`identity`](SharedSetting::identity), and [`overwrite`](SharedSetting::overwrite)
/// through any of them is visible through all of them. The memory cache
/// stores these handles, which is what lets an in-place derive leak into the
/// cached default.
///
/// # Examples
///
/// ```
/// use rust_decimal::Decimal;
/// use settingcache_core::{Setting, SharedSetting};
///
/// let cached = SharedSetting::new(Setting::with_defaults(Decimal::new(5, 3)));
/// let alias = cached.clone();
///
/// alias.overwrite("MemberB", Decimal::new(3, 3));
///
/// assert!(alias.ptr_eq(&cached));
/// assert_eq!(cached.rate(), Decimal::new(3, 3));
/// ```
#[derive(Clone, Debug)]
pub struct SharedSetting {
    id: u64,
    inner: Arc<RwLock<Setting>>,
}

impl SharedSetting {
    /// Wraps `setting` in a new shared allocation with a fresh identity.
    pub fn new(setting: Setting) -> Self {
        Self {
            id: NEXT_ID.fetch_add(1, Ordering::Relaxed),
            inner: Arc::new(RwLock::new(setting)),
        }
    }

    /// Copy of the current value.
    pub fn snapshot(&self) -> Setting {
        self.inner.read().clone()
    }

    /// Current rate of the shared setting.
    pub fn rate(&self) -> Decimal {
        self.inner.read().rate
    }

    /// Current currency of the shared setting.
    pub fn currency_id(&self) -> String {
        self.inner.read().currency_id.clone()
    }

    /// Replaces profile name and rate in place. The currency is kept.
    pub fn overwrite(&self, profile_name: impl Into<String>, rate: Decimal) {
        let mut setting = self.inner.write();
        setting.profile_name = profile_name.into();
        setting.rate = rate;
    }

    /// Reference-identity marker, unique per [`SharedSetting::new`] call for
    /// the life of the process.
    ///
    /// Equal for two handles iff they alias the same setting. Unlike an
    /// address, an identity is never reused after its allocation is freed.
    pub fn identity(&self) -> u64 {
        self.id
    }

    /// Returns `true` if both handles point at the same allocation.
    pub fn ptr_eq(&self, other: &SharedSetting) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl From<Setting> for SharedSetting {
    fn from(setting: Setting) -> Self {
        Self::new(setting)
    }
}

impl fmt::Display for SharedSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&*self.inner.read(), f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rate(thousandths: i64) -> Decimal {
        Decimal::new(thousandths, 3)
    }

    #[test]
    fn test_with_defaults() {
        let setting = Setting::with_defaults(rate(5));
        assert_eq!(setting.profile_name(), "");
        assert_eq!(setting.currency_id(), DEFAULT_CURRENCY_ID);
        assert_eq!(setting.rate(), rate(5));
    }

    #[test]
    fn test_derive_leaves_source_untouched() {
        let source = Setting::new("", "USD", rate(5));
        let derived = source.derive("MemberB", rate(3));

        assert_eq!(derived, Setting::new("MemberB", "USD", rate(3)));
        assert_eq!(source, Setting::new("", "USD", rate(5)));
    }

    #[test]
    fn test_display() {
        let setting = Setting::new("MemberB", "TWD", rate(3));
        assert_eq!(
            setting.to_string(),
            "ProfileName: MemberB, CurrencyId: TWD, Rate: 0.003"
        );
    }

    #[test]
    fn test_clones_alias() {
        let shared = SharedSetting::new(Setting::with_defaults(rate(5)));
        let alias = shared.clone();

        assert!(shared.ptr_eq(&alias));
        assert_eq!(shared.identity(), alias.identity());

        alias.overwrite("MemberB", rate(3));
        assert_eq!(shared.snapshot(), Setting::new("MemberB", "TWD", rate(3)));
    }

    #[test]
    fn test_distinct_handles_do_not_alias() {
        let a = SharedSetting::new(Setting::with_defaults(rate(5)));
        let b = SharedSetting::new(a.snapshot());

        assert!(!a.ptr_eq(&b));
        assert_ne!(a.identity(), b.identity());

        b.overwrite("MemberB", rate(3));
        assert_eq!(a.rate(), rate(5));
    }

    #[test]
    fn test_identity_not_reused_after_drop() {
        let first = SharedSetting::new(Setting::with_defaults(rate(5)));
        let first_id = first.identity();
        drop(first);

        let second = SharedSetting::new(Setting::with_defaults(rate(5)));
        assert_ne!(second.identity(), first_id);
    }

    #[test]
    fn test_snapshot_is_detached() {
        let shared = SharedSetting::new(Setting::with_defaults(rate(5)));
        let before = shared.snapshot();

        shared.overwrite("MemberC", rate(7));

        assert_eq!(before.rate(), rate(5));
        assert_eq!(shared.rate(), rate(7));
        assert_eq!(shared.currency_id(), "TWD");
    }
}
