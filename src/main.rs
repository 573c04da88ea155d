//! Mathline - a terminal editor for math markup.
//!
//! # Usage
//!
//! ```bash
//! mathline
//! mathline --marker '@' --debug-view
//! mathline --bind 66=binom/2 --save
//! mathline --debug-log mathline.log
//! ```

use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use mathline::app::App;
use mathline::config::{
    ConfigFlags, clear_config_flags, global_config_path, load_config_flags, local_override_path,
    parse_flag_tokens, save_config_flags,
};

/// A terminal editor for math markup
#[derive(Parser, Debug)]
#[command(name = "mathline", version, about, long_about = None)]
struct Cli {
    /// String spliced in at the cursor before typesetting
    #[arg(long, value_name = "TEXT")]
    marker: Option<String>,

    /// Start with the `|` debug view visible
    #[arg(long)]
    debug_view: bool,

    /// Write debug logs to a file
    #[arg(long, value_name = "PATH")]
    debug_log: Option<PathBuf>,

    /// Key code for moving left
    #[arg(long, value_name = "CODE")]
    key_left: Option<u32>,

    /// Key code for moving right
    #[arg(long, value_name = "CODE")]
    key_right: Option<u32>,

    /// Key code for backspace
    #[arg(long, value_name = "CODE")]
    key_backspace: Option<u32>,

    /// Bind a key code to a command, e.g. `66=binom/2`
    #[arg(long, value_name = "CODE=NAME/BLOCKS")]
    bind: Vec<String>,

    /// Save current command-line flags as defaults
    #[arg(long)]
    save: bool,

    /// Clear saved defaults
    #[arg(long)]
    clear: bool,
}

fn init_logging(debug_log: Option<&Path>) -> Result<()> {
    match debug_log {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create debug log {}", path.display()))?;
            let filter =
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        // Anything on stderr would land on top of the TUI.
        None => {
            let filter =
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error"));
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr)
                .init();
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let raw_args = std::env::args().collect::<Vec<_>>();
    let cli = Cli::parse();
    let global_path = global_config_path();
    let local_path = local_override_path();
    let cli_flags = parse_flag_tokens(&raw_args);

    if cli.clear {
        clear_config_flags(&global_path)?;
    }
    if cli.save {
        save_config_flags(&global_path, &cli_flags)?;
    }

    let file_flags = if cli.clear {
        ConfigFlags::default()
    } else {
        let global_flags = load_config_flags(&global_path)?;
        let local_flags = load_config_flags(&local_path)?;
        global_flags.union(&local_flags)
    };
    let effective = file_flags.union(&cli_flags);

    init_logging(effective.debug_log.as_deref())?;
    tracing::debug!(?effective, "effective flags");

    let mut app = App::new()
        .with_keymap(effective.key_map())
        .with_debug_view(effective.debug_view);
    if let Some(marker) = effective.marker {
        app = app.with_marker(marker);
    }

    app.run().context("Application error")
}
