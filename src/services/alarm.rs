//! Alarm sink: message rendering and the external alarm command

use std::{process::Stdio, sync::Arc};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::process::Command;
use tracing::{debug, error, warn};

use crate::state::{AppState, TimerMode};

/// Prefix marking the alarm text as a shell command whose output is the message
const SHELL_PREFIX: &str = "#!";

/// A fired alarm, as reported to API clients
#[derive(Debug, Clone, Serialize)]
pub struct AlarmNotice {
    pub mode: TimerMode,
    pub label: &'static str,
    pub message: Option<String>,
    pub time: String,
    pub timestamp: DateTime<Utc>,
}

/// Substitute `%t` with `time`, leaving literal `%%` sequences untouched
pub fn expand_alarm_template(template: &str, time: &str) -> String {
    template
        .split("%%")
        .map(|piece| piece.replace("%t", time))
        .collect::<Vec<_>>()
        .join("%%")
}

/// Render the alarm message. An empty template means no message.
pub async fn render_alarm_text(template: &str, time: &str) -> Option<String> {
    if template.is_empty() {
        return None;
    }
    match template.strip_prefix(SHELL_PREFIX) {
        Some(command) => Some(shell_output(command).await),
        None => Some(expand_alarm_template(template, time)),
    }
}

/// Run `command` through `sh -c` and return its stdout followed by its stderr,
/// with trailing line endings removed
async fn shell_output(command: &str) -> String {
    debug!("Running alarm text command: {}", command);

    match Command::new("sh").args(["-c", command]).output().await {
        Ok(output) => {
            let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
            text.push_str(&String::from_utf8_lossy(&output.stderr));
            text.trim_end_matches(|c: char| c == '\n' || c == '\r').to_string()
        }
        Err(e) => {
            warn!("Failed to run alarm text command: {}", e);
            String::new()
        }
    }
}

/// Spawn the alarm command without waiting for it or checking its status
pub fn spawn_alarm_command(command: &str) {
    debug!("Spawning alarm command: {}", command);

    let spawned = Command::new("sh")
        .args(["-c", command])
        .stdin(Stdio::null())
        .kill_on_drop(false)
        .spawn();

    match spawned {
        Ok(mut child) => {
            // Reap in the background
            tokio::spawn(async move {
                let _ = child.wait().await;
            });
        }
        Err(e) => error!("Failed to spawn alarm command: {}", e),
    }
}

/// Deliver the alarm for `mode`: show the message and run the configured command
pub async fn fire_alarm(state: Arc<AppState>, mode: TimerMode, time: String) {
    let preferences = match state.get_preferences() {
        Ok(p) => p,
        Err(e) => {
            error!("Failed to read preferences for alarm: {}", e);
            return;
        }
    };

    let message = render_alarm_text(&preferences.alarm_txt, &time).await;
    match &message {
        Some(text) => warn!("ALARM [{}]: {}", mode.label(), text),
        None => warn!("ALARM [{}]", mode.label()),
    }

    if let Err(e) = state.record_alarm(AlarmNotice {
        mode,
        label: mode.label(),
        message,
        time,
        timestamp: Utc::now(),
    }) {
        error!("Failed to record alarm: {}", e);
    }

    if !preferences.alarm_cmd.is_empty() {
        spawn_alarm_command(&preferences.alarm_cmd);
    }
}
