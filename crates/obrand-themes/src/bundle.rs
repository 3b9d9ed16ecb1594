//! Locale-aware message bundles
//!
//! A theme's messages live in `<base>.properties` plus optional
//! `<base>_<locale>.properties` files. Loading a bundle for `fr_FR` merges
//! `messages_fr_FR`, `messages_fr` and `messages` with the most specific file
//! winning for each key.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{Arc, PoisonError, RwLock};

use obrand_core::prelude::*;
use obrand_core::{read_properties, Locale, Properties};

use crate::theme::Theme;

/// Messages of one theme for one locale, keyed by full bundle key
pub type MessageBundle = Properties;

/// Source of per-theme message bundles
pub trait BundleLoader: Send + Sync {
    /// Load the bundle of `theme` for `locale`, including parent locales.
    fn load(&self, theme: &Theme, locale: &Locale) -> Result<Arc<MessageBundle>>;
}

/// Loads bundles from `.properties` files in the theme directory and keeps
/// them for the life of the loader.
///
/// Entries are keyed by the most specific bundle file that exists, so
/// `fr_CA`, `fr_BE` and `fr` all share the `messages_fr` entry and the cache
/// is bounded by the files on disk, not by the locales callers ask for.
#[derive(Debug, Default)]
pub struct PropertiesBundleLoader {
    cache: RwLock<HashMap<(PathBuf, String), Arc<MessageBundle>>>,
}

impl PropertiesBundleLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached bundles
    pub fn cached(&self) -> usize {
        self.cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Merge the bundle files for `chain`, most specific first.
    fn read_bundle(theme: &Theme, chain: &[String]) -> Result<MessageBundle> {
        let mut merged = MessageBundle::new();

        for suffix in chain {
            let path = theme.bundle_path(suffix);
            if !path.is_file() {
                trace!("No bundle file at {:?}", path);
                continue;
            }
            let level = read_properties(&path)?;
            trace!("Read {} messages from {:?}", level.len(), path);
            merged.inherit(&level);
        }

        Ok(merged)
    }
}

impl BundleLoader for PropertiesBundleLoader {
    fn load(&self, theme: &Theme, locale: &Locale) -> Result<Arc<MessageBundle>> {
        let candidates = locale.candidate_suffixes();
        let Some(start) = candidates
            .iter()
            .position(|suffix| theme.bundle_path(suffix).is_file())
        else {
            return Err(Error::bundle_not_found(
                theme.path(),
                theme.messages_base_name(),
                locale.to_string(),
            ));
        };
        let chain = &candidates[start..];
        let cache_key = (theme.path().to_path_buf(), chain[0].clone());

        if let Some(bundle) = self
            .cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&cache_key)
        {
            return Ok(Arc::clone(bundle));
        }

        let bundle = Arc::new(Self::read_bundle(theme, chain)?);
        debug!(
            "Loaded bundle '{}' of {} for locale '{}' from suffix '{}' ({} messages)",
            theme.messages_base_name(),
            theme.name(),
            locale,
            cache_key.1,
            bundle.len()
        );

        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        Ok(Arc::clone(cache.entry(cache_key).or_insert(bundle)))
    }
}
