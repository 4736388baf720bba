//! Configuration and CLI argument handling

use std::{env, ffi::OsString, path::PathBuf, time::Duration};
use clap::Parser;
use tracing::warn;

use crate::state::TimerMode;

/// Directory and file name used under the config directory
pub const APP_NAME: &str = "tickwatch";

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "tickwatch")]
#[command(about = "A clock, stopwatch and dual countdown timer with alarms")]
#[command(version = "1.0.0")]
pub struct Config {
    /// Port to bind the control API to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Initially displayed mode (current-time, stopwatch, countdown-a, countdown-b or 0-3)
    #[arg(short, long, default_value = "current-time")]
    pub mode: TimerMode,

    /// Tick period in milliseconds
    #[arg(long, default_value = "200", value_parser = clap::value_parser!(u64).range(10..=1000))]
    pub tick_ms: u64,

    /// Directory holding the preferences file (defaults to $XDG_CONFIG_HOME/tickwatch)
    #[arg(long)]
    pub config_dir: Option<PathBuf>,

    /// Do not draw the display on stdout
    #[arg(long)]
    pub headless: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }

    /// Path of the preferences file
    pub fn preferences_path(&self) -> PathBuf {
        let dir = self.config_dir.clone().unwrap_or_else(|| config_dir(APP_NAME));
        dir.join(format!("{}.conf", APP_NAME))
    }
}

/// `$XDG_CONFIG_HOME/<name>`, falling back to `~/.config/<name>` with a diagnostic
pub fn config_dir(name: &str) -> PathBuf {
    resolve_config_dir(name, env::var_os("XDG_CONFIG_HOME"), dirs::home_dir())
}

/// Resolve the config directory from an `XDG_CONFIG_HOME` value and a home directory
fn resolve_config_dir(name: &str, xdg_config_home: Option<OsString>, home: Option<PathBuf>) -> PathBuf {
    let base = match xdg_config_home.filter(|v| !v.is_empty()) {
        Some(dir) => PathBuf::from(dir),
        None => {
            let fallback = home.unwrap_or_else(|| PathBuf::from(".")).join(".config");
            warn!(
                "The environment variable XDG_CONFIG_HOME is not set, defaulting to {}",
                fallback.display()
            );
            fallback
        }
    };
    base.join(name)
}
