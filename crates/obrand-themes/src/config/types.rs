//! Configuration types for obrand

use obrand_core::Locale;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application settings (config.toml)
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Settings {
    #[serde(default)]
    pub branding: BrandingSettings,
}

/// Branding settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BrandingSettings {
    /// Base installation directory; themes live in its `branding/` child
    #[serde(default)]
    pub etc_dir: Option<PathBuf>,

    /// Locale used when a lookup does not name one
    #[serde(default = "default_locale")]
    pub default_locale: Locale,
}

impl Default for BrandingSettings {
    fn default() -> Self {
        Self {
            etc_dir: None,
            default_locale: default_locale(),
        }
    }
}

fn default_locale() -> Locale {
    Locale::default_locale()
}
