//! # obrand-themes - Branding Themes and Messages
//!
//! Discovers the brand packages installed under `<etc_dir>/branding`, loads
//! their localized message bundles and resolves `obrand.<scope>.<name>` keys
//! against them.
//!
//! ## Public API
//!
//! ### Resolution (`manager`)
//! - [`BrandingManager`] - Shared lookup service: messages, JSON maps, stylesheets
//! - [`MessageMap`] - Merged bare-key messages for one scope and locale
//!
//! ### Discovery (`registry`, `theme`)
//! - [`ThemeRegistry`] - Scan-once list of valid themes in precedence order
//! - [`scan_themes()`] - One scan of a branding root
//! - [`Theme`] - A loaded `*.brand` package
//! - [`ApplicationType`] - Console application a stylesheet targets
//!
//! ### Bundles (`bundle`)
//! - [`BundleLoader`] - Seam for loading a theme's messages per locale
//! - [`PropertiesBundleLoader`] - Cached `.properties` implementation
//!
//! ### Configuration (`config`)
//! - [`Settings`] - `config.toml` contents
//! - [`load_settings()`], [`resolve_etc_dir()`]
//!
//! ## Example
//!
//! ```no_run
//! use obrand_core::Locale;
//! use obrand_themes::BrandingManager;
//!
//! let manager = BrandingManager::new("/etc/ovirt-engine");
//! let notice = manager.get_message("obrand.common.copy_right_notice");
//! let login_json = manager.render_messages_json("login", &Locale::default_locale());
//! ```

pub mod bundle;
pub mod config;
pub mod manager;
pub mod registry;
pub mod theme;

pub use bundle::{BundleLoader, MessageBundle, PropertiesBundleLoader};
pub use config::{load_default_settings, load_settings, resolve_etc_dir, Settings};
pub use manager::{render_message_map, BrandingManager, MessageMap, BRANDING_DIR};
pub use registry::{scan_themes, ScanResult, SkippedTheme, ThemeRegistry};
pub use theme::{ApplicationType, Theme, CURRENT_BRANDING_VERSION, THEME_METADATA_FILE};
