//! Integration tests for theme discovery and message resolution

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Arc;
use tempfile::TempDir;

use obrand_core::Locale;
use obrand_themes::{ApplicationType, BrandingManager, BRANDING_DIR, THEME_METADATA_FILE};

/// Helper to create a theme under `<etc>/branding/<name>`
///
/// `bundles` maps a locale suffix ("" for the base bundle) to file content.
fn create_theme(etc: &Path, name: &str, metadata: &str, bundles: &[(&str, &str)]) -> PathBuf {
    let dir = etc.join(BRANDING_DIR).join(name);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join(THEME_METADATA_FILE), metadata).unwrap();
    for (suffix, content) in bundles {
        let file = if suffix.is_empty() {
            "messages.properties".to_string()
        } else {
            format!("messages_{}.properties", suffix)
        };
        fs::write(dir.join(file), content).unwrap();
    }
    dir
}

/// A realistic installation: the stock theme plus a site override
fn create_installation(etc: &Path) {
    create_theme(
        etc,
        "00-ovirt.brand",
        "version=1\nmessages=messages.properties\nweb_admin_css=web_admin.css\n",
        &[
            (
                "",
                "obrand.common.copy_right_notice=\\u00a9 oVirt project\n\
                 obrand.common.vendor=oVirt\n\
                 obrand.welcome.title=Welcome to oVirt\n\
                 obrand.webadmin.main_header_label=Administration Portal\n",
            ),
            (
                "fr",
                "obrand.welcome.title=Bienvenue sur oVirt\n\
                 obrand.webadmin.main_header_label=Portail d'administration\n",
            ),
        ],
    );
    create_theme(
        etc,
        "50-acme.brand",
        "version=1\nweb_admin_css=acme.css\n",
        &[("", "obrand.common.vendor=ACME\nobrand.welcome.title=ACME Cloud\n")],
    );
    create_theme(
        etc,
        "60-legacy.brand",
        "version=0\n",
        &[("", "obrand.common.vendor=Legacy\n")],
    );
}

fn en() -> Locale {
    Locale::parse("en").unwrap()
}

#[test]
fn test_installation_theme_order_and_filtering() {
    let temp = TempDir::new().unwrap();
    create_installation(temp.path());
    fs::create_dir_all(temp.path().join(BRANDING_DIR).join("notes")).unwrap();

    let manager = BrandingManager::new(temp.path());
    let names: Vec<&str> = manager.themes().iter().map(|t| t.name()).collect();

    assert_eq!(names, vec!["00-ovirt.brand", "50-acme.brand"]);
}

#[test]
fn test_override_and_locale_fallback() {
    let temp = TempDir::new().unwrap();
    create_installation(temp.path());
    let manager = BrandingManager::new(temp.path());
    let fr = Locale::new("fr", "FR");

    // Later theme overrides the stock one
    assert_eq!(manager.get_message("obrand.common.vendor"), "ACME");
    assert_eq!(manager.get_message("obrand.welcome.title"), "ACME Cloud");

    // ACME has no French bundle, its base messages still override
    assert_eq!(manager.get_message_for("obrand.welcome.title", &fr), "ACME Cloud");
    assert_eq!(
        manager.get_message_for("obrand.webadmin.main_header_label", &fr),
        "Portail d'administration"
    );

    // Common messages resolve from any scope
    assert_eq!(
        manager.get_message_for("obrand.webadmin.copy_right_notice", &fr),
        "\u{a9} oVirt project"
    );
}

#[test]
fn test_no_branding_root() {
    let temp = TempDir::new().unwrap();
    let manager = BrandingManager::new(temp.path());

    assert!(manager.themes().is_empty());
    for key in ["obrand.common.vendor", "obrand.welcome.title", "vendor"] {
        assert_eq!(manager.get_message(key), "");
    }
    assert_eq!(manager.render_messages_json("welcome", &en()), None);
}

#[test]
fn test_non_brand_keys_are_empty_regardless_of_content() {
    let temp = TempDir::new().unwrap();
    create_theme(
        temp.path(),
        "foo.brand",
        "version=1\n",
        &[("", "vendor=plain\ncommon.vendor=nested\nobrand.common.vendor=ok\n")],
    );
    let manager = BrandingManager::new(temp.path());

    assert_eq!(manager.get_message("vendor"), "");
    assert_eq!(manager.get_message("common.vendor"), "");
    assert_eq!(manager.get_message("xobrand.common.vendor"), "");
    assert_eq!(manager.get_message("obrand.common.vendor"), "ok");
}

#[test]
fn test_messages_json_round_trip() {
    let temp = TempDir::new().unwrap();
    create_installation(temp.path());
    let manager = BrandingManager::new(temp.path());

    let json = manager.render_messages_json("welcome", &en()).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    let object = value.as_object().unwrap();
    assert!(object.values().all(|v| v.is_string()));

    let parsed: HashMap<String, String> = serde_json::from_str(&json).unwrap();
    let expected: HashMap<String, String> = manager
        .build_message_map("welcome", &en())
        .into_iter()
        .collect();
    assert_eq!(parsed, expected);
    assert_eq!(parsed.get("title").map(String::as_str), Some("ACME Cloud"));
    assert_eq!(parsed.get("vendor").map(String::as_str), Some("ACME"));
    assert!(!parsed.contains_key("main_header_label"));
}

#[test]
fn test_stylesheets_cascade() {
    let temp = TempDir::new().unwrap();
    create_installation(temp.path());
    let manager = BrandingManager::new(temp.path());

    let sheets = manager.stylesheets(ApplicationType::WebAdmin);
    let files: Vec<&str> = sheets
        .iter()
        .map(|p| p.file_name().unwrap().to_str().unwrap())
        .collect();
    assert_eq!(files, vec!["web_admin.css", "acme.css"]);
}

#[test]
fn test_shared_manager_concurrent_lookups() {
    let temp = TempDir::new().unwrap();
    create_installation(temp.path());
    let manager = Arc::new(BrandingManager::new(temp.path()));

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let manager = Arc::clone(&manager);
            std::thread::spawn(move || manager.get_message("obrand.common.vendor"))
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), "ACME");
    }
    assert_eq!(manager.themes().len(), 2);
}

// ─────────────────────────────────────────────────────────────────
// Command line
// ─────────────────────────────────────────────────────────────────

fn obrand(etc: &Path, args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_obrand"))
        .arg("--etc-dir")
        .arg(etc)
        .args(args)
        .env("OBRAND_LOG_DIR", etc.join("logs"))
        .env_remove("OBRAND_ETC_DIR")
        .output()
        .unwrap()
}

fn stdout(output: &std::process::Output) -> String {
    assert!(output.status.success(), "{:?}", output);
    String::from_utf8(output.stdout.clone()).unwrap()
}

#[test]
fn test_cli_themes() {
    let temp = TempDir::new().unwrap();
    create_installation(temp.path());

    let out = stdout(&obrand(temp.path(), &["themes"]));
    let etc = regex::escape(&temp.path().display().to_string());
    insta::with_settings!({filters => vec![(etc.as_str(), "[ETC]")]}, {
        insta::assert_snapshot!(out.trim_end(), @r"
        00-ovirt.brand (v1) [ETC]/branding/00-ovirt.brand
        50-acme.brand (v1) [ETC]/branding/50-acme.brand
        ");
    });
}

#[test]
fn test_cli_message_and_messages() {
    let temp = TempDir::new().unwrap();
    create_installation(temp.path());

    let out = stdout(&obrand(
        temp.path(),
        &["message", "obrand.webadmin.main_header_label", "--locale", "fr_FR"],
    ));
    assert_eq!(out.trim_end(), "Portail d'administration");

    let out = stdout(&obrand(temp.path(), &["message", "not.a.brand.key"]));
    assert_eq!(out.trim_end(), "");

    let out = stdout(&obrand(temp.path(), &["messages", "welcome"]));
    let parsed: HashMap<String, String> = serde_json::from_str(out.trim_end()).unwrap();
    assert_eq!(parsed.get("title").map(String::as_str), Some("ACME Cloud"));

    let out = stdout(&obrand(temp.path(), &["messages", "welcome", "--locale", "xx"]));
    assert!(!out.trim().is_empty());
}

#[test]
fn test_cli_root_and_stylesheets() {
    let temp = TempDir::new().unwrap();
    create_installation(temp.path());

    let out = stdout(&obrand(temp.path(), &["root"]));
    assert_eq!(
        PathBuf::from(out.trim_end()),
        temp.path().join(BRANDING_DIR)
    );

    let out = stdout(&obrand(temp.path(), &["stylesheets", "web-admin"]));
    assert_eq!(out.lines().count(), 2);
    assert!(out.lines().last().unwrap().ends_with("acme.css"));

    let out = stdout(&obrand(temp.path(), &["stylesheets", "welcome"]));
    assert!(out.is_empty());
}

#[test]
fn test_cli_rejects_bad_arguments() {
    let temp = TempDir::new().unwrap();

    assert!(!obrand(temp.path(), &["stylesheets", "engine"]).status.success());
    assert!(!obrand(temp.path(), &["message", "obrand.common.x", "--locale", "1x"])
        .status
        .success());

    assert!(!obrand(
        temp.path(),
        &["messages", "welcome", "--locale", "en_US_../../etc/x"]
    )
    .status
    .success());

    let missing = temp.path().join("missing.toml");
    let output = obrand(temp.path(), &["--config", missing.to_str().unwrap(), "root"]);
    assert!(!output.status.success());
}

#[test]
fn test_cli_no_branding_installed() {
    let temp = TempDir::new().unwrap();

    assert_eq!(stdout(&obrand(temp.path(), &["themes"])), "");
    assert_eq!(stdout(&obrand(temp.path(), &["messages", "login"])), "");
}

#[test]
fn test_cli_empty_scope_prints_nothing() {
    let temp = TempDir::new().unwrap();
    create_installation(temp.path());

    assert_eq!(stdout(&obrand(temp.path(), &["messages", ""])), "");
}
