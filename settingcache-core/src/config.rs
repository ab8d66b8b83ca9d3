use crate::setting::DEFAULT_CURRENCY_ID;
use crate::{Result, SettingError};
use rust_decimal::Decimal;

/// Key under which the shared default setting is cached.
pub const DEFAULT_CACHE_KEY: &str = "commonSetting";

/// Configuration of a [`SettingStore`](crate::SettingStore).
///
/// # Examples
///
/// ```
/// use rust_decimal::Decimal;
/// use settingcache_core::StoreConfig;
///
/// let config = StoreConfig::default()
///     .with_default_rate(Decimal::new(1, 2))
///     .with_currency_id("USD");
///
/// assert_eq!(config.cache_key, "commonSetting");
/// assert!(config.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StoreConfig {
    pub cache_key: String,
    pub default_rate: Decimal,
    pub currency_id: String,
}

impl StoreConfig {
    /// Rate installed in the shared entry when the store is initialized: 0.005.
    pub fn standard_rate() -> Decimal {
        Decimal::new(5, 3)
    }

    /// Sets the key the shared entry is cached under.
    ///
    /// # Arguments
    ///
    /// * `key` - Cache key, `"commonSetting"` by default. Must not be blank.
    ///
    /// # Examples
    ///
    /// ```
    /// use settingcache_core::StoreConfig;
    ///
    /// let config = StoreConfig::default().with_cache_key("vipSetting");
    /// assert_eq!(config.cache_key, "vipSetting");
    /// ```
    pub fn with_cache_key(mut self, key: impl Into<String>) -> Self {
        self.cache_key = key.into();
        self
    }

    /// Sets the rate installed by `initialize` and returned by `common_rate`
    /// when the shared entry is absent.
    ///
    /// # Arguments
    ///
    /// * `rate` - Default rate, `0.005` unless set. Must not be negative.
    pub fn with_default_rate(mut self, rate: Decimal) -> Self {
        self.default_rate = rate;
        self
    }

    /// Sets the currency of the shared entry, which copied settings inherit.
    ///
    /// # Arguments
    ///
    /// * `currency_id` - Currency code, `"TWD"` unless set. Must not be blank.
    pub fn with_currency_id(mut self, currency_id: impl Into<String>) -> Self {
        self.currency_id = currency_id.into();
        self
    }

    /// Checks the configuration before a store is built from it.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - The configuration is usable
    /// * `Err(SettingError::InvalidConfig)` - The cache key or currency id is
    ///   blank, or the default rate is negative
    ///
    /// # Examples
    ///
    /// ```
    /// use rust_decimal::Decimal;
    /// use settingcache_core::StoreConfig;
    ///
    /// let config = StoreConfig::default().with_default_rate(Decimal::new(-1, 3));
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<()> {
        if self.cache_key.trim().is_empty() {
            return Err(SettingError::InvalidConfig(
                "cache key must not be empty".to_string(),
            ));
        }
        if self.currency_id.trim().is_empty() {
            return Err(SettingError::InvalidConfig(
                "currency id must not be empty".to_string(),
            ));
        }
        if self.default_rate < Decimal::ZERO {
            return Err(SettingError::InvalidConfig(format!(
                "default rate must not be negative, got {}",
                self.default_rate
            )));
        }
        Ok(())
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            cache_key: DEFAULT_CACHE_KEY.to_string(),
            default_rate: Self::standard_rate(),
            currency_id: DEFAULT_CURRENCY_ID.to_string(),
        }
    }
}
