//! Locale model used to pick message bundles
//!
//! Locales follow the `language_COUNTRY_variant` tags used in bundle file
//! names (`messages_fr_FR.properties`). Both `_` and `-` are accepted as
//! separators when parsing, `_` is always used when rendering.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// A language/country/variant triple.
///
/// The root locale (all parts empty) selects the base bundle.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(try_from = "String", into = "String")]
pub struct Locale {
    language: String,
    country: String,
    variant: String,
}

impl Locale {
    /// The locale used when a caller does not ask for one.
    pub fn default_locale() -> Self {
        Self::new("en", "US")
    }

    /// The root locale, matching only base bundles.
    pub fn root() -> Self {
        Self::default()
    }

    pub fn new(language: &str, country: &str) -> Self {
        Self {
            language: language.to_ascii_lowercase(),
            country: country.to_ascii_uppercase(),
            variant: String::new(),
        }
    }

    /// Parse `en`, `en_US`, `en-US` or `en_US_POSIX`. An empty tag is the
    /// root locale.
    pub fn parse(tag: &str) -> Result<Self> {
        let tag = tag.trim();
        if tag.is_empty() {
            return Ok(Self::root());
        }

        let mut parts = tag.splitn(3, ['_', '-']);
        let language = parts.next().unwrap_or_default();
        let country = parts.next().unwrap_or_default();
        let variant = parts.next().unwrap_or_default();

        if language.is_empty() || !language.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(Error::InvalidLocale(tag.to_string()));
        }
        if !country.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(Error::InvalidLocale(tag.to_string()));
        }
        if country.is_empty() && !variant.is_empty() {
            return Err(Error::InvalidLocale(tag.to_string()));
        }
        // Variant segments end up in bundle file names
        if !variant.is_empty()
            && !variant
                .split(['_', '-'])
                .all(|seg| !seg.is_empty() && seg.chars().all(|c| c.is_ascii_alphanumeric()))
        {
            return Err(Error::InvalidLocale(tag.to_string()));
        }

        Ok(Self {
            language: language.to_ascii_lowercase(),
            country: country.to_ascii_uppercase(),
            variant: variant.replace('-', "_"),
        })
    }

    pub fn language(&self) -> &str {
        &self.language
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    pub fn variant(&self) -> &str {
        &self.variant
    }

    /// Bundle name suffixes to try, most specific first, ending with the
    /// empty suffix of the base bundle.
    ///
    /// `en_US_POSIX` yields `["en_US_POSIX", "en_US", "en", ""]`.
    pub fn candidate_suffixes(&self) -> Vec<String> {
        let mut suffixes = Vec::with_capacity(4);
        if !self.variant.is_empty() {
            suffixes.push(format!(
                "{}_{}_{}",
                self.language, self.country, self.variant
            ));
        }
        if !self.country.is_empty() {
            suffixes.push(format!("{}_{}", self.language, self.country));
        }
        if !self.language.is_empty() {
            suffixes.push(self.language.clone());
        }
        suffixes.push(String::new());
        suffixes
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tag = self.language.clone();
        if !self.country.is_empty() {
            tag.push('_');
            tag.push_str(&self.country);
        }
        if !self.variant.is_empty() {
            tag.push('_');
            tag.push_str(&self.variant);
        }
        f.write_str(&tag)
    }
}

impl FromStr for Locale {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Locale {
    type Error = Error;

    fn try_from(value: String) -> Result<Self> {
        Self::parse(&value)
    }
}

impl From<Locale> for String {
    fn from(locale: Locale) -> Self {
        locale.to_string()
    }
}
