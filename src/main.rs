//! obrand - inspect installed branding themes and resolve branding messages
//!
//! This is the binary entry point. All logic lives in the library crates.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use obrand_core::prelude::*;
use obrand_core::{logging, Locale};
use obrand_themes::{
    load_default_settings, load_settings, ApplicationType, BrandingManager, Settings,
};

/// obrand - branding theme registry and message resolver
#[derive(Parser, Debug)]
#[command(name = "obrand")]
#[command(about = "Inspect branding themes and resolve branding messages", long_about = None)]
struct Args {
    /// Settings file [default: ~/.config/obrand/config.toml]
    #[arg(long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Base installation directory (themes are read from its branding/ child)
    #[arg(long, global = true, value_name = "DIR")]
    etc_dir: Option<PathBuf>,

    /// Log directory [default: $OBRAND_LOG_DIR or ~/.local/share/obrand/logs]
    #[arg(long, global = true, value_name = "DIR")]
    log_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List loaded themes in precedence order
    Themes,

    /// Print the message for a branding key (e.g. obrand.common.copy_right_notice)
    Message {
        key: String,

        /// Locale such as en_US or fr [default: from settings]
        #[arg(long)]
        locale: Option<Locale>,
    },

    /// Print the merged messages of a scope as a JSON object
    Messages {
        scope: String,

        /// Locale such as en_US or fr [default: from settings]
        #[arg(long)]
        locale: Option<Locale>,
    },

    /// Print the theme root directory
    Root,

    /// Print stylesheet paths for web-admin, user-portal or welcome
    Stylesheets { app: ApplicationType },
}

/// Settings from an explicitly named file, or the default location.
///
/// Naming a file that does not exist is an error; a missing default file is
/// not.
fn cli_settings(config: Option<&Path>) -> Result<Settings> {
    match config {
        Some(path) if !path.exists() => Err(Error::ConfigNotFound {
            path: path.to_path_buf(),
        }),
        Some(path) => Ok(load_settings(path)),
        None => Ok(load_default_settings()),
    }
}

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    // Branding must keep working when the log directory is not writable
    if let Err(e) = logging::init(args.log_dir.as_deref()) {
        eprintln!("warning: file logging disabled: {}", e);
    }

    let settings = match cli_settings(args.config.as_deref()) {
        Ok(settings) => settings,
        Err(e) if e.is_fatal() => return Err(e.into()),
        Err(e) => {
            warn!("{}; using default settings", e);
            Settings::default()
        }
    };

    let manager = match &args.etc_dir {
        Some(dir) => BrandingManager::new(dir)
            .with_default_locale(settings.branding.default_locale.clone()),
        None => BrandingManager::from_settings(&settings),
    };
    debug!("Branding root: {}", manager.root_path().display());

    match args.command {
        Command::Themes => {
            for theme in manager.themes() {
                println!(
                    "{} (v{}) {}",
                    theme.name(),
                    theme.version(),
                    theme.path().display()
                );
            }
        }
        Command::Message { key, locale } => {
            let locale = locale.unwrap_or_else(|| manager.default_locale().clone());
            println!("{}", manager.get_message_for(&key, &locale));
        }
        Command::Messages { scope, locale } => {
            let locale = locale.unwrap_or_else(|| manager.default_locale().clone());
            if let Some(json) = manager.render_messages_json(&scope, &locale) {
                println!("{}", json);
            }
        }
        Command::Root => {
            println!("{}", manager.root_path().display());
        }
        Command::Stylesheets { app } => {
            for path in manager.stylesheets(app) {
                println!("{}", path.display());
            }
        }
    }

    Ok(())
}
