//! Theme discovery under the branding root
//!
//! Every directory directly below the root whose name matches `.+\.brand` is
//! a theme candidate. Candidates are sorted by name and loaded in that order;
//! the order is also the override precedence (later themes win), so
//! `99-custom.brand` overrides `00-ovirt.brand`.

use regex::bytes::Regex;
use std::ffi::{OsStr, OsString};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{LazyLock, Mutex, OnceLock, PoisonError};

use obrand_core::prelude::*;

use crate::theme::Theme;

/// Directory names accepted as brand packages, matched on raw name bytes
/// so names that are not valid UTF-8 still qualify
static BRAND_DIRECTORY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?-u)^.+\.brand$").expect("Invalid brand directory regex"));

/// Check if a directory name marks a brand package
pub fn is_brand_directory_name(name: impl AsRef<OsStr>) -> bool {
    BRAND_DIRECTORY_PATTERN.is_match(name.as_ref().as_encoded_bytes())
}

/// Information about a candidate directory that did not load
#[derive(Debug)]
pub struct SkippedTheme {
    pub path: PathBuf,
    pub reason: String,
}

/// Result of scanning the branding root
#[derive(Debug)]
pub struct ScanResult {
    /// Loaded themes in precedence order
    pub themes: Vec<Theme>,
    /// Root that was scanned
    pub root: PathBuf,
    /// Candidates that failed to load (for logging/debugging)
    pub skipped: Vec<SkippedTheme>,
}

/// Scan `root` for brand packages declaring `version`.
///
/// Returns `None` when the root does not exist, is not a directory or cannot
/// be listed. That means "no branding installed", not a failure.
pub fn scan_themes(root: &Path, version: u32) -> Option<ScanResult> {
    if !root.is_dir() {
        debug!("Branding root {:?} is not a directory, no themes", root);
        return None;
    }

    let entries = match fs::read_dir(root) {
        Ok(e) => e,
        Err(err) => {
            debug!("Cannot read branding root {:?}: {}", root, err);
            return None;
        }
    };

    let mut candidates: Vec<(OsString, PathBuf)> = entries
        .flatten()
        .filter_map(|entry| {
            let path = entry.path();
            let name = entry.file_name();
            if !path.is_dir() || !is_brand_directory_name(&name) {
                trace!("Skipping non-theme entry: {:?}", path);
                return None;
            }
            if name.to_str().is_none() {
                debug!("Theme directory name is not UTF-8: {:?}", path);
            }
            Some((name, path))
        })
        .collect();
    candidates.sort_by(|a, b| a.0.cmp(&b.0));

    let mut result = ScanResult {
        themes: Vec::with_capacity(candidates.len()),
        root: root.to_path_buf(),
        skipped: Vec::new(),
    };

    for (_, path) in candidates {
        let path = std::path::absolute(&path).unwrap_or(path);
        match Theme::load(&path, version) {
            Ok(theme) => {
                debug!("Loaded theme {} from {:?}", theme.name(), theme.path());
                result.themes.push(theme);
            }
            Err(err) => {
                warn!("Skipping theme {:?}: {}", path, err);
                result.skipped.push(SkippedTheme {
                    path,
                    reason: err.to_string(),
                });
            }
        }
    }

    Some(result)
}

/// The ordered list of valid themes under one root.
///
/// The root is scanned on first access. A scan that finds the root missing
/// is not remembered, so a later call scans again; the first scan that finds
/// the root is kept for the life of the registry.
#[derive(Debug)]
pub struct ThemeRegistry {
    root: PathBuf,
    version: u32,
    themes: OnceLock<Vec<Theme>>,
    scan_lock: Mutex<()>,
}

impl ThemeRegistry {
    pub fn new(root: impl Into<PathBuf>, version: u32) -> Self {
        Self {
            root: root.into(),
            version,
            themes: OnceLock::new(),
            scan_lock: Mutex::new(()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    /// Whether a successful scan has been cached
    pub fn is_loaded(&self) -> bool {
        self.themes.get().is_some()
    }

    /// Valid themes in precedence order, scanning the root if needed.
    pub fn themes(&self) -> &[Theme] {
        if let Some(themes) = self.themes.get() {
            return themes;
        }

        // Concurrent first callers wait here instead of scanning again
        let _guard = self.scan_lock.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(themes) = self.themes.get() {
            return themes;
        }

        match scan_themes(&self.root, self.version) {
            Some(result) => {
                info!(
                    "Loaded {} branding theme(s) from {:?} ({} skipped)",
                    result.themes.len(),
                    result.root,
                    result.skipped.len()
                );
                self.themes.get_or_init(|| result.themes)
            }
            None => &[],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::{CURRENT_BRANDING_VERSION, THEME_METADATA_FILE};
    use std::fs;
    use tempfile::TempDir;

    /// Helper to create a theme directory with the given metadata version
    fn create_theme(root: &Path, name: &str, version: u32) {
        let dir = root.join(name);
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join(THEME_METADATA_FILE),
            format!("version={}\n", version),
        )
        .unwrap();
    }

    fn names(themes: &[Theme]) -> Vec<&str> {
        themes.iter().map(Theme::name).collect()
    }

    #[test]
    fn test_brand_directory_pattern() {
        assert!(is_brand_directory_name("00-ovirt.brand"));
        assert!(is_brand_directory_name("a.b.brand"));
        assert!(!is_brand_directory_name(".brand"));
        assert!(!is_brand_directory_name("ovirt.brand.bak"));
        assert!(!is_brand_directory_name("ovirt-brand"));
        assert!(!is_brand_directory_name("ovirt.brands"));
    }

    #[cfg(target_os = "linux")]
    #[test]
    fn test_scan_accepts_non_utf8_theme_name() {
        use std::os::unix::ffi::OsStrExt;

        let temp = TempDir::new().unwrap();
        let name = OsStr::from_bytes(b"caf\xE9.brand");
        assert!(is_brand_directory_name(name));

        let dir = temp.path().join(name);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(THEME_METADATA_FILE), "version=1\n").unwrap();
        create_theme(temp.path(), "00-first.brand", 1);

        let result = scan_themes(temp.path(), 1).unwrap();
        assert_eq!(result.themes.len(), 2);
        assert_eq!(result.themes[0].name(), "00-first.brand");
        assert_eq!(result.themes[1].path().file_name(), Some(name));
        assert!(result.skipped.is_empty());
    }

    #[test]
    fn test_scan_missing_root() {
        let temp = TempDir::new().unwrap();
        assert!(scan_themes(&temp.path().join("nope"), 1).is_none());
    }

    #[test]
    fn test_scan_root_is_file() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("branding");
        fs::write(&file, "not a dir").unwrap();
        assert!(scan_themes(&file, 1).is_none());
    }

    #[test]
    fn test_scan_empty_root() {
        let temp = TempDir::new().unwrap();
        let result = scan_themes(temp.path(), 1).unwrap();
        assert!(result.themes.is_empty());
        assert!(result.skipped.is_empty());
    }

    #[test]
    fn test_scan_sorts_by_name() {
        let temp = TempDir::new().unwrap();
        create_theme(temp.path(), "50-middle.brand", 1);
        create_theme(temp.path(), "99-last.brand", 1);
        create_theme(temp.path(), "00-first.brand", 1);

        let result = scan_themes(temp.path(), 1).unwrap();
        assert_eq!(
            names(&result.themes),
            vec!["00-first.brand", "50-middle.brand", "99-last.brand"]
        );
        assert!(result.themes.iter().all(|t| t.path().is_absolute()));
    }

    #[test]
    fn test_scan_ignores_non_matching_entries() {
        let temp = TempDir::new().unwrap();
        create_theme(temp.path(), "ovirt.brand", 1);
        create_theme(temp.path(), "not-a-theme", 1);
        fs::write(temp.path().join("file.brand"), "version=1\n").unwrap();

        let result = scan_themes(temp.path(), 1).unwrap();
        assert_eq!(names(&result.themes), vec!["ovirt.brand"]);
        assert!(result.skipped.is_empty());
    }

    #[test]
    fn test_scan_skips_wrong_version_and_broken_themes() {
        let temp = TempDir::new().unwrap();
        create_theme(temp.path(), "a.brand", 1);
        create_theme(temp.path(), "b.brand", 2);
        fs::create_dir(temp.path().join("c.brand")).unwrap();

        let result = scan_themes(temp.path(), CURRENT_BRANDING_VERSION).unwrap();
        assert_eq!(names(&result.themes), vec!["a.brand"]);
        assert_eq!(result.skipped.len(), 2);
        assert!(result.skipped[0].path.ends_with("b.brand"));
        assert!(result.skipped[0].reason.contains("version 2"));
        assert!(result.skipped[1].path.ends_with("c.brand"));
    }

    #[test]
    fn test_registry_caches_first_successful_scan() {
        let temp = TempDir::new().unwrap();
        create_theme(temp.path(), "a.brand", 1);
        let registry = ThemeRegistry::new(temp.path(), 1);

        assert!(!registry.is_loaded());
        assert_eq!(names(registry.themes()), vec!["a.brand"]);
        assert!(registry.is_loaded());

        // No invalidation
        create_theme(temp.path(), "b.brand", 1);
        assert_eq!(names(registry.themes()), vec!["a.brand"]);
    }

    #[test]
    fn test_registry_rescans_while_root_missing() {
        let temp = TempDir::new().unwrap();
        let root = temp.path().join("branding");
        let registry = ThemeRegistry::new(&root, 1);

        assert!(registry.themes().is_empty());
        assert!(!registry.is_loaded());

        create_theme(&root, "late.brand", 1);
        assert_eq!(names(registry.themes()), vec!["late.brand"]);
        assert!(registry.is_loaded());
    }

    #[test]
    fn test_registry_empty_root_is_cached() {
        let temp = TempDir::new().unwrap();
        let registry = ThemeRegistry::new(temp.path(), 1);

        assert!(registry.themes().is_empty());
        assert!(registry.is_loaded());
    }

    #[test]
    fn test_registry_concurrent_first_access() {
        let temp = TempDir::new().unwrap();
        for i in 0..5 {
            create_theme(temp.path(), &format!("{:02}.brand", i), 1);
        }
        let registry = ThemeRegistry::new(temp.path(), 1);

        let seen: Vec<usize> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|_| s.spawn(|| registry.themes().as_ptr() as usize))
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert!(seen.windows(2).all(|w| w[0] == w[1]));
        assert_eq!(registry.themes().len(), 5);
    }

    #[test]
    fn test_registry_empty_placeholder_root() {
        let registry = ThemeRegistry::new(PathBuf::new(), 1);
        assert!(registry.themes().is_empty());
        assert!(!registry.is_loaded());
    }
}
