//! Process-wide configuration accessor.
//!
//! Components receive an `Arc<AppConfig>` explicitly; this module only holds
//! the default instance handed out by the `*_from_current` constructors.
//! Always read through [`current`] instead of keeping a copy around, so a
//! [`replace`] is observed by everything built afterwards.

use std::sync::Arc;

use arc_swap::ArcSwap;
use once_cell::sync::Lazy;

use crate::models::config::AppConfig;

static CURRENT: Lazy<ArcSwap<AppConfig>> =
    Lazy::new(|| ArcSwap::from_pointee(AppConfig::default()));

/// Returns the configuration in effect right now.
pub fn current() -> Arc<AppConfig> {
    CURRENT.load_full()
}

/// Swaps in a new configuration, returning the previous one.
pub fn replace(config: AppConfig) -> Arc<AppConfig> {
    CURRENT.swap(Arc::new(config))
}

/// Guard returned by [`scoped`]; restores the previous configuration on drop.
#[must_use = "the previous configuration is restored as soon as the guard is dropped"]
pub struct ScopedConfig {
    previous: Option<Arc<AppConfig>>,
}

impl Drop for ScopedConfig {
    fn drop(&mut self) {
        if let Some(previous) = self.previous.take() {
            CURRENT.store(previous);
        }
    }
}

/// Installs `config` until the returned guard goes out of scope.
pub fn scoped(config: AppConfig) -> ScopedConfig {
    ScopedConfig {
        previous: Some(replace(config)),
    }
}

/// Runs `f` with `config` installed, then restores the previous value.
pub fn with_config<R>(config: AppConfig, f: impl FnOnce() -> R) -> R {
    let _guard = scoped(config);
    f()
}
