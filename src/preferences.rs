//! User preferences stored as a flat `<tag>value</tag>` text file

use std::{fs, path::Path};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

pub const DEFAULT_DISPLAY_FONT: &str = "DejaVu Sans Ultra-Light 36";
pub const DEFAULT_ALARM_TEXT: &str = "%t";

const TAG_DISPLAY_FONT: &str = "display_font";
const TAG_ALARM_TXT: &str = "alarm_txt";
const TAG_ALARM_CMD: &str = "alarm_cmd";
const TAG_START_IN_TRAY: &str = "start_in_tray";
const TAG_CLOSE_TO_TRAY: &str = "close_to_tray";

/// Persisted user preferences
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Preferences {
    /// Font descriptor for the digits
    pub display_font: String,
    /// Alarm message template: `%t` is the current time, a `#!` prefix runs a shell command
    pub alarm_txt: String,
    /// Shell command run when an alarm fires
    pub alarm_cmd: String,
    pub start_in_tray: bool,
    pub close_to_tray: bool,
}

/// Partial update applied from the control API; absent fields are left alone
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PreferencesUpdate {
    pub display_font: Option<String>,
    pub alarm_txt: Option<String>,
    pub alarm_cmd: Option<String>,
    pub start_in_tray: Option<bool>,
    pub close_to_tray: Option<bool>,
}

impl Preferences {
    pub fn new() -> Self {
        Self {
            display_font: DEFAULT_DISPLAY_FONT.to_string(),
            alarm_txt: DEFAULT_ALARM_TEXT.to_string(),
            alarm_cmd: String::new(),
            start_in_tray: false,
            close_to_tray: false,
        }
    }

    /// Load preferences from `path`, keeping defaults for anything missing
    pub fn load(path: &Path) -> Self {
        let mut preferences = Self::new();
        if !path.exists() {
            debug!("No preferences file at {}, using defaults", path.display());
            return preferences;
        }
        match fs::read_to_string(path) {
            Ok(text) => {
                preferences.apply_tag_text(&text);
                info!("Loaded preferences from {}", path.display());
            }
            Err(e) => warn!("Failed to read preferences from {}: {}", path.display(), e),
        }
        preferences
    }

    /// Write every preference to `path`, creating its directory if needed
    pub fn save(&self, path: &Path) -> Result<(), String> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)
                .map_err(|e| format!("Failed to create {}: {}", dir.display(), e))?;
        }
        fs::write(path, self.to_tag_text())
            .map_err(|e| format!("Failed to write {}: {}", path.display(), e))?;
        info!("Saved preferences to {}", path.display());
        Ok(())
    }

    pub fn to_tag_text(&self) -> String {
        [
            create_tag(TAG_DISPLAY_FONT, &self.display_font),
            create_tag(TAG_ALARM_TXT, &self.alarm_txt),
            create_tag(TAG_ALARM_CMD, &self.alarm_cmd),
            create_tag(TAG_START_IN_TRAY, flag(self.start_in_tray)),
            create_tag(TAG_CLOSE_TO_TRAY, flag(self.close_to_tray)),
        ]
        .concat()
    }

    /// Overwrite each preference whose tag is present in `text`
    pub fn apply_tag_text(&mut self, text: &str) {
        if let Some(value) = parse_tag(text, TAG_DISPLAY_FONT) {
            self.display_font = value.to_string();
        }
        if let Some(value) = parse_tag(text, TAG_ALARM_CMD) {
            self.alarm_cmd = value.to_string();
        }
        if let Some(value) = parse_tag(text, TAG_ALARM_TXT) {
            self.alarm_txt = value.to_string();
        }
        if let Some(value) = parse_tag(text, TAG_START_IN_TRAY) {
            self.start_in_tray = value == "1";
        }
        if let Some(value) = parse_tag(text, TAG_CLOSE_TO_TRAY) {
            self.close_to_tray = value == "1";
        }
    }

    pub fn apply(&mut self, update: PreferencesUpdate) {
        if let Some(value) = update.display_font {
            self.display_font = value;
        }
        if let Some(value) = update.alarm_txt {
            self.alarm_txt = value;
        }
        if let Some(value) = update.alarm_cmd {
            self.alarm_cmd = value;
        }
        if let Some(value) = update.start_in_tray {
            self.start_in_tray = value;
        }
        if let Some(value) = update.close_to_tray {
            self.close_to_tray = value;
        }
    }
}

impl Default for Preferences {
    fn default() -> Self {
        Self::new()
    }
}

fn flag(value: bool) -> &'static str {
    if value { "1" } else { "0" }
}

/// Format one `<tag>value</tag>` line
pub fn create_tag(tag: &str, value: &str) -> String {
    format!("<{tag}>{value}</{tag}>\n")
}

/// Value between the first `<tag>` and the first `</tag>` after it
pub fn parse_tag<'a>(text: &'a str, tag: &str) -> Option<&'a str> {
    let open = format!("<{}>", tag);
    let close = format!("</{}>", tag);
    let start = text.find(&open)? + open.len();
    let end = text[start..].find(&close)? + start;
    Some(&text[start..end])
}
