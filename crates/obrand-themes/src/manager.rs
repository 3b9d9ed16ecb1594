//! Branding message resolution
//!
//! [`BrandingManager`] is built once at startup and shared (usually behind an
//! `Arc`) with every request handler. Lookups never fail: a malformed key, a
//! missing theme root or a broken bundle all resolve to "no message".
//!
//! For a lookup in scope `login`, each theme in precedence order contributes
//! its `obrand.common.*` messages and then its `obrand.login.*` messages, so
//! within one theme a scoped message beats a common one with the same name,
//! and any message of a later theme beats every message of earlier themes.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use obrand_core::prelude::*;
use obrand_core::{match_bundle_key, scope_prefix, Locale, MessageKey, ScopedName};

use crate::bundle::{BundleLoader, PropertiesBundleLoader};
use crate::config::{resolve_etc_dir, Settings};
use crate::registry::ThemeRegistry;
use crate::theme::{ApplicationType, Theme, CURRENT_BRANDING_VERSION};

/// Name of the theme root below the base installation directory
pub const BRANDING_DIR: &str = "branding";

/// Merged messages for one `(scope, locale)`, keyed by bare name
pub type MessageMap = BTreeMap<String, String>;

/// Theme registry plus message lookup over it
pub struct BrandingManager {
    registry: ThemeRegistry,
    loader: Box<dyn BundleLoader>,
    default_locale: Locale,
}

impl std::fmt::Debug for BrandingManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BrandingManager")
            .field("registry", &self.registry)
            .field("default_locale", &self.default_locale)
            .finish_non_exhaustive()
    }
}

impl BrandingManager {
    /// Manager for the themes in `<etc_dir>/branding`.
    ///
    /// An empty `etc_dir` is the "unconfigured" placeholder and yields no
    /// themes.
    pub fn new(etc_dir: impl AsRef<Path>) -> Self {
        Self::with_loader(etc_dir, PropertiesBundleLoader::new())
    }

    pub fn with_loader(etc_dir: impl AsRef<Path>, loader: impl BundleLoader + 'static) -> Self {
        let etc_dir = etc_dir.as_ref();
        let root = if etc_dir.as_os_str().is_empty() {
            PathBuf::new()
        } else {
            etc_dir.join(BRANDING_DIR)
        };
        Self {
            registry: ThemeRegistry::new(root, CURRENT_BRANDING_VERSION),
            loader: Box::new(loader),
            default_locale: Locale::default_locale(),
        }
    }

    /// Build the manager from settings.
    ///
    /// An unresolvable base directory is not fatal: the manager starts with
    /// an empty root and serves no branding.
    pub fn from_settings(settings: &Settings) -> Self {
        let etc_dir = resolve_etc_dir(settings).unwrap_or_else(|e| {
            warn!("{}; branding disabled", e);
            PathBuf::new()
        });
        Self::new(etc_dir).with_default_locale(settings.branding.default_locale.clone())
    }

    pub fn with_default_locale(mut self, locale: Locale) -> Self {
        self.default_locale = locale;
        self
    }

    /// Root directory holding the `*.brand` packages
    pub fn root_path(&self) -> &Path {
        self.registry.root()
    }

    pub fn default_locale(&self) -> &Locale {
        &self.default_locale
    }

    /// Valid themes in precedence order (scans the root on first use)
    pub fn themes(&self) -> &[Theme] {
        self.registry.themes()
    }

    /// Message for `key` in the default locale, or `""`.
    pub fn get_message(&self, key: &str) -> String {
        self.get_message_for(key, &self.default_locale)
    }

    /// Message for `key` in `locale`, or `""`.
    pub fn get_message_for(&self, key: &str, locale: &Locale) -> String {
        self.lookup(key, locale).unwrap_or_default()
    }

    /// Message for `key` in `locale`; `None` for a malformed key or no match.
    pub fn lookup(&self, key: &str, locale: &Locale) -> Option<String> {
        let Some(parsed) = MessageKey::parse(key) else {
            trace!("Not a branding key: {:?}", key);
            return None;
        };
        self.build_message_map(parsed.scope, locale).remove(parsed.name)
    }

    /// Merge the `common` and `scope` messages of every theme.
    pub fn build_message_map(&self, scope: &str, locale: &Locale) -> MessageMap {
        let mut messages = MessageMap::new();
        let Some(prefix) = scope_prefix(scope) else {
            trace!("Not a branding scope: {:?}", scope);
            return messages;
        };

        for theme in self.themes() {
            let bundle = match self.loader.load(theme, locale) {
                Ok(bundle) => bundle,
                Err(e) if e.is_recoverable() => {
                    debug!("Theme {} contributes no messages: {}", theme.name(), e);
                    continue;
                }
                Err(e) => {
                    warn!("Cannot read messages of theme {}: {}", theme.name(), e);
                    continue;
                }
            };

            let mut common = Vec::new();
            let mut scoped = Vec::new();
            for (key, value) in bundle.iter() {
                match match_bundle_key(key, &prefix) {
                    Some(ScopedName::Scope(bare)) => scoped.push((bare, value)),
                    Some(ScopedName::Common(bare)) => common.push((bare, value)),
                    None => {}
                }
            }

            // Later themes override earlier ones
            for (bare, value) in common.into_iter().chain(scoped) {
                messages.insert(bare.to_string(), value.to_string());
            }
        }

        messages
    }

    /// Messages for `scope` as a flat JSON object, `None` if there are none.
    pub fn render_messages_json(&self, scope: &str, locale: &Locale) -> Option<String> {
        render_message_map(&self.build_message_map(scope, locale))
    }

    /// Stylesheets declared for `app`, in precedence order
    pub fn stylesheets(&self, app: ApplicationType) -> Vec<PathBuf> {
        self.themes()
            .iter()
            .filter_map(|theme| theme.stylesheet_path(app))
            .collect()
    }
}

/// Serialize a message map as `{"key":"value",...}`; `None` when empty.
pub fn render_message_map(messages: &MessageMap) -> Option<String> {
    if messages.is_empty() {
        return None;
    }
    serde_json::to_string(messages)
        .map_err(|e| warn!("Failed to serialize branding messages: {}", e))
        .ok()
}
