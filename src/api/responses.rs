//! API request and response structures

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{preferences::Preferences, services::AlarmNotice, state::EngineSnapshot};

/// API response structure for engine control endpoints
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub snapshot: EngineSnapshot,
}

impl ApiResponse {
    /// Create a new API response
    pub fn new(status: String, message: String, snapshot: EngineSnapshot) -> Self {
        Self {
            status,
            message,
            timestamp: Utc::now(),
            snapshot,
        }
    }

    /// The operation was applied
    pub fn ok(message: String, snapshot: EngineSnapshot) -> Self {
        Self::new("ok".to_string(), message, snapshot)
    }

    /// The operation was a no-op, e.g. an edit while the mode is running
    pub fn ignored(message: String, snapshot: EngineSnapshot) -> Self {
        Self::new("ignored".to_string(), message, snapshot)
    }
}

/// Status response with the full engine view and server metadata
#[derive(Debug, Clone, Serialize)]
pub struct StatusResponse {
    pub snapshot: EngineSnapshot,
    pub uptime: String,
    pub port: u16,
    pub host: String,
    pub last_action: Option<String>,
    pub last_action_time: Option<DateTime<Utc>>,
    pub last_alarm: Option<AlarmNotice>,
}

/// Preferences read/update response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PreferencesResponse {
    pub status: String,
    pub message: String,
    pub timestamp: DateTime<Utc>,
    pub preferences: Preferences,
}

impl PreferencesResponse {
    pub fn ok(message: String, preferences: Preferences) -> Self {
        Self {
            status: "ok".to_string(),
            message,
            timestamp: Utc::now(),
            preferences,
        }
    }
}

/// Body of `PUT /mode`: a mode slug or index
#[derive(Debug, Clone, Deserialize)]
pub struct ModeSelect {
    pub mode: String,
}

/// Body of `PUT /fields/:field`
#[derive(Debug, Clone, Deserialize)]
pub struct FieldValue {
    pub value: i64,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub version: String,
}

impl HealthResponse {
    /// Create a new health response
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            timestamp: Utc::now(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}
