//! A single installed brand package
//!
//! A theme is a `<name>.brand` directory holding a `branding.properties`
//! metadata file, one or more message bundles and optional stylesheets.
//!
//! ```text
//! 00-ovirt.brand/
//! ├── branding.properties     version=1, messages=messages, web_admin_css=...
//! ├── messages.properties     base bundle
//! ├── messages_fr.properties  French overrides
//! └── web_admin.css
//! ```

use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use obrand_core::prelude::*;
use obrand_core::read_properties;

/// Only themes declaring this version are loaded. Several versions of the
/// same theme may sit side by side on disk; older ones are ignored.
pub const CURRENT_BRANDING_VERSION: u32 = 1;

/// Metadata file expected at the top of every theme directory
pub const THEME_METADATA_FILE: &str = "branding.properties";

const VERSION_KEY: &str = "version";
const MESSAGES_KEY: &str = "messages";
const DEFAULT_MESSAGES_BASE: &str = "messages";
const PROPERTIES_EXTENSION: &str = ".properties";

/// Console applications a theme can ship a stylesheet for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ApplicationType {
    WebAdmin,
    UserPortal,
    Welcome,
}

impl ApplicationType {
    pub const ALL: [ApplicationType; 3] = [
        ApplicationType::WebAdmin,
        ApplicationType::UserPortal,
        ApplicationType::Welcome,
    ];

    /// Metadata key naming this application's stylesheet
    pub fn stylesheet_key(&self) -> &'static str {
        match self {
            ApplicationType::WebAdmin => "web_admin_css",
            ApplicationType::UserPortal => "user_portal_css",
            ApplicationType::Welcome => "welcome_css",
        }
    }
}

impl fmt::Display for ApplicationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApplicationType::WebAdmin => write!(f, "web-admin"),
            ApplicationType::UserPortal => write!(f, "user-portal"),
            ApplicationType::Welcome => write!(f, "welcome"),
        }
    }
}

impl FromStr for ApplicationType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().replace('_', "-").as_str() {
            "web-admin" | "webadmin" => Ok(ApplicationType::WebAdmin),
            "user-portal" | "userportal" => Ok(ApplicationType::UserPortal),
            "welcome" => Ok(ApplicationType::Welcome),
            other => Err(Error::config_invalid(format!(
                "unknown application '{}', expected web-admin, user-portal or welcome",
                other
            ))),
        }
    }
}

/// A loaded brand package
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    path: PathBuf,
    name: String,
    version: u32,
    messages_base: String,
    stylesheets: HashMap<ApplicationType, String>,
}

impl Theme {
    /// Load the theme in `path`, accepting it only if its metadata declares
    /// `expected_version`.
    pub fn load(path: &Path, expected_version: u32) -> Result<Self> {
        let metadata_path = path.join(THEME_METADATA_FILE);
        if !metadata_path.is_file() {
            return Err(Error::theme_metadata_not_found(metadata_path));
        }

        let metadata = read_properties(&metadata_path).map_err(|e| {
            Error::theme(path, format!("cannot read {}: {}", THEME_METADATA_FILE, e))
        })?;

        let raw_version = metadata
            .get(VERSION_KEY)
            .ok_or_else(|| Error::theme(path, "no version declared"))?;
        let version: u32 = raw_version
            .trim()
            .parse()
            .map_err(|_| Error::theme(path, format!("invalid version '{}'", raw_version)))?;
        if version != expected_version {
            return Err(Error::version_mismatch(path, version, expected_version));
        }

        let messages_base = metadata
            .get(MESSAGES_KEY)
            .map(|name| name.trim())
            .filter(|name| !name.is_empty())
            .map(|name| name.strip_suffix(PROPERTIES_EXTENSION).unwrap_or(name))
            .unwrap_or(DEFAULT_MESSAGES_BASE)
            .to_string();

        let stylesheets = ApplicationType::ALL
            .iter()
            .filter_map(|app| {
                metadata
                    .get(app.stylesheet_key())
                    .map(str::trim)
                    .filter(|css| !css.is_empty())
                    .map(|css| (*app, css.to_string()))
            })
            .collect();

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Ok(Self {
            path: path.to_path_buf(),
            name,
            version,
            messages_base,
            stylesheets,
        })
    }

    /// Absolute path of the theme directory
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory name, also the precedence ordering key
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    /// Base file name of the message bundle, without locale suffix or extension
    pub fn messages_base_name(&self) -> &str {
        &self.messages_base
    }

    /// Path of the bundle file for a locale suffix (`""` for the base bundle)
    pub fn bundle_path(&self, locale_suffix: &str) -> PathBuf {
        let file_name = if locale_suffix.is_empty() {
            format!("{}{}", self.messages_base, PROPERTIES_EXTENSION)
        } else {
            format!(
                "{}_{}{}",
                self.messages_base, locale_suffix, PROPERTIES_EXTENSION
            )
        };
        self.path.join(file_name)
    }

    /// Stylesheet file name declared for an application
    pub fn stylesheet(&self, app: ApplicationType) -> Option<&str> {
        self.stylesheets.get(&app).map(String::as_str)
    }

    /// Absolute path of the stylesheet declared for an application
    pub fn stylesheet_path(&self, app: ApplicationType) -> Option<PathBuf> {
        self.stylesheet(app).map(|css| self.path.join(css))
    }
}
