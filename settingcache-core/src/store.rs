use crate::{
    DerivePolicy, MemoryCache, Result, Setting, SettingError, SharedSetting, StoreConfig,
};
use once_cell::sync::Lazy;
use rust_decimal::Decimal;
use tracing::{debug, warn};

static GLOBAL_STORE: Lazy<SettingStore> = Lazy::new(SettingStore::with_defaults);

/// Holds the shared default [`Setting`] and derives per-profile settings from it.
///
/// The shared entry lives in a [`MemoryCache`] as a [`SharedSetting`] handle.
/// Two derivers are offered so the difference can be observed:
///
/// - [`derive_mutating`](SettingStore::derive_mutating) overwrites the cached
///   entry in place and hands back the same handle. Every later reader of the
///   shared entry sees the derived values.
/// - [`derive_copying`](SettingStore::derive_copying) builds a fresh
///   [`Setting`] from the shared entry and leaves the cache untouched.
///
/// # Lifecycle
///
/// A store starts empty. [`initialize`](SettingStore::initialize) installs the
/// default entry, [`reset`](SettingStore::reset) removes it again.
///
/// # Examples
///
/// ```
/// use rust_decimal::Decimal;
/// use settingcache_core::SettingStore;
///
/// let store = SettingStore::with_defaults();
/// store.initialize();
///
/// let member = store.derive_copying("MemberB", Decimal::new(3, 3)).unwrap();
/// assert_eq!(member.rate(), Decimal::new(3, 3));
/// assert_eq!(store.common_rate(), Decimal::new(5, 3));
/// ```
#[derive(Debug)]
pub struct SettingStore {
    config: StoreConfig,
    cache: MemoryCache<SharedSetting>,
}

impl SettingStore {
    /// Creates an empty store after validating `config`.
    pub fn new(config: StoreConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    /// Creates an empty store with [`StoreConfig::default`].
    pub fn with_defaults() -> Self {
        Self::from_valid_config(StoreConfig::default())
    }

    fn from_valid_config(config: StoreConfig) -> Self {
        Self {
            config,
            cache: MemoryCache::new("default"),
        }
    }

    /// The process-wide store used by the demonstration binary.
    ///
    /// Prefer an owned store wherever one can be passed around; tests that use
    /// this instance must run serially.
    pub fn global() -> &'static SettingStore {
        &GLOBAL_STORE
    }

    /// The validated configuration this store was built with.
    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// The underlying cache, for inspecting entries and statistics.
    pub fn cache(&self) -> &MemoryCache<SharedSetting> {
        &self.cache
    }

    /// Installs the shared default entry.
    ///
    /// Returns `false` and leaves the entry as it is when one already exists,
    /// even if it has been mutated since.
    pub fn initialize(&self) -> bool {
        let setting = Setting::new(
            String::new(),
            self.config.currency_id.clone(),
            self.config.default_rate,
        );
        let added = self.cache.add(&self.config.cache_key, setting.into());
        debug!(key = %self.config.cache_key, added, "initialize shared setting");
        added
    }

    /// Removes the shared entry. Returns whether one was present.
    pub fn reset(&self) -> bool {
        self.cache.remove(&self.config.cache_key).is_some()
    }

    /// Returns `true` if the shared entry is installed.
    pub fn is_initialized(&self) -> bool {
        self.cache.contains_key(&self.config.cache_key)
    }

    /// Looks up an arbitrary key. Absence is not an error.
    pub fn get(&self, key: &str) -> Option<SharedSetting> {
        self.cache.get(key)
    }

    /// Looks up the shared entry. The returned handle aliases the cached one.
    pub fn get_cache_object(&self) -> Option<SharedSetting> {
        self.get(&self.config.cache_key)
    }

    /// Snapshot of the shared entry's current value.
    pub fn common_setting(&self) -> Option<Setting> {
        self.get_cache_object().map(|shared| shared.snapshot())
    }

    /// Rate of the shared entry, or the configured default rate when the
    /// entry is absent.
    pub fn common_rate(&self) -> Decimal {
        match self.get_cache_object() {
            Some(shared) => shared.rate(),
            None => {
                warn!(
                    key = %self.config.cache_key,
                    "shared setting missing, falling back to default rate"
                );
                self.config.default_rate
            }
        }
    }

    fn require_shared(&self) -> Result<SharedSetting> {
        self.get_cache_object().ok_or_else(|| SettingError::NotInitialized {
            key: self.config.cache_key.clone(),
        })
    }

    /// Derives a setting by overwriting the shared entry in place.
    ///
    /// The returned handle is the cached entry itself: profile name and rate
    /// of the shared default now equal `profile_name` and `rate` for every
    /// reader. Nothing new is allocated.
    ///
    /// # Errors
    ///
    /// [`SettingError::NotInitialized`] when the shared entry is absent.
    pub fn derive_mutating(
        &self,
        profile_name: impl Into<String>,
        rate: Decimal,
    ) -> Result<SharedSetting> {
        let shared = self.require_shared()?;
        let profile_name = profile_name.into();
        debug!(
            identity = shared.identity(),
            profile = %profile_name,
            %rate,
            "overwriting shared setting in place"
        );
        shared.overwrite(profile_name, rate);
        Ok(shared)
    }

    /// Derives a new, independent setting from the shared entry.
    ///
    /// The result copies the shared entry's currency and carries
    /// `profile_name` and `rate`. The cache is not modified and the result is
    /// not installed in it.
    ///
    /// # Errors
    ///
    /// [`SettingError::NotInitialized`] when the shared entry is absent.
    pub fn derive_copying(
        &self,
        profile_name: impl Into<String>,
        rate: Decimal,
    ) -> Result<Setting> {
        let shared = self.require_shared()?;
        let derived = shared.snapshot().derive(profile_name, rate);
        debug!(
            identity = shared.identity(),
            profile = %derived.profile_name(),
            %rate,
            "derived independent setting"
        );
        Ok(derived)
    }

    /// Derives with the given policy and returns the resulting value.
    pub fn derive(
        &self,
        policy: DerivePolicy,
        profile_name: impl Into<String>,
        rate: Decimal,
    ) -> Result<Setting> {
        match policy {
            DerivePolicy::MutateInPlace => self
                .derive_mutating(profile_name, rate)
                .map(|shared| shared.snapshot()),
            DerivePolicy::CopyThenMutate => self.derive_copying(profile_name, rate),
        }
    }
}
