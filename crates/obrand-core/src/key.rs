//! Branding message keys
//!
//! Keys consumed by the console pages have the shape
//! `obrand.<scope>.<name>`, where `<scope>` names the UI area the message
//! customizes and the reserved scope `common` applies to every area.

/// The first segment of every branding key.
pub const BRAND_PREFIX: &str = "obrand";

/// The scope whose messages apply to every other scope.
pub const COMMON_SCOPE: &str = "common";

/// `obrand.common.` as a bundle key prefix.
pub const COMMON_PREFIX: &str = "obrand.common.";

/// A branding key split into its scope and local name.
///
/// `name` is everything after the scope segment and may itself contain dots
/// (`obrand.login.title.short` has the name `title.short`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MessageKey<'a> {
    pub scope: &'a str,
    pub name: &'a str,
}

impl<'a> MessageKey<'a> {
    /// Parse a key, returning `None` when it is not a branding key.
    ///
    /// Rejected shapes:
    /// - anything not starting with `obrand.`
    /// - an empty scope segment (`obrand..x`, `obrand.`)
    /// - a scope without a local name (`obrand.login`, `obrand.login.`)
    pub fn parse(key: &'a str) -> Option<Self> {
        let rest = key.strip_prefix(BRAND_PREFIX)?.strip_prefix('.')?;
        let (scope, name) = rest.split_once('.')?;
        if scope.is_empty() || name.is_empty() {
            return None;
        }
        Some(Self { scope, name })
    }
}

/// The bundle key prefix (`obrand.<scope>.`) selecting messages for `scope`.
///
/// `None` for a scope [`MessageKey::parse`] could never produce: empty or
/// containing a dot.
pub fn scope_prefix(scope: &str) -> Option<String> {
    if scope.is_empty() || scope.contains('.') {
        return None;
    }
    Some(format!("{}.{}.", BRAND_PREFIX, scope))
}

/// Which prefix a bundle key matched, with that prefix removed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopedName<'k> {
    /// Matched `obrand.<scope>.`
    Scope(&'k str),
    /// Matched `obrand.common.`
    Common(&'k str),
}

/// Match a bundle key against the scope prefix, then the common prefix.
/// Returns `None` when the key belongs to neither or has no local name.
pub fn match_bundle_key<'k>(
    bundle_key: &'k str,
    scope_prefix: &str,
) -> Option<ScopedName<'k>> {
    if let Some(bare) = bundle_key.strip_prefix(scope_prefix) {
        return (!bare.is_empty()).then_some(ScopedName::Scope(bare));
    }
    bundle_key
        .strip_prefix(COMMON_PREFIX)
        .filter(|bare| !bare.is_empty())
        .map(ScopedName::Common)
}
