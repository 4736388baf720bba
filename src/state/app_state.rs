//! Main application state management

use std::{
    path::PathBuf,
    sync::{Arc, Mutex},
    time::Instant,
};
use chrono::{DateTime, Utc};
use tokio::sync::{broadcast, watch};
use tracing::{info, warn};

use crate::{
    clock::Clock,
    preferences::{Preferences, PreferencesUpdate},
    services::AlarmNotice,
};
use super::{Direction, EngineSnapshot, Field, Hold, TimeEngine, TimerMode};

/// Operations bound to one timer mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerAction {
    Start,
    Stop,
    Toggle,
    Reset,
}

impl TimerAction {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "start" => Some(Self::Start),
            "stop" => Some(Self::Stop),
            "toggle" => Some(Self::Toggle),
            "reset" => Some(Self::Reset),
            _ => None,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Stop => "stop",
            Self::Toggle => "toggle",
            Self::Reset => "reset",
        }
    }

    fn apply(self, engine: &mut TimeEngine, mode: TimerMode) {
        match self {
            Self::Start => engine.start(mode),
            Self::Stop => engine.stop(mode),
            Self::Toggle => engine.toggle(mode),
            Self::Reset => engine.reset(mode),
        }
    }
}

/// Main application state shared by the tick loop, the repeat tasks and the API
pub struct AppState {
    /// Timer engine for all four modes
    pub engine: Arc<Mutex<TimeEngine>>,
    /// User preferences and where they are saved
    pub preferences: Arc<Mutex<Preferences>>,
    pub preferences_path: PathBuf,
    /// Server metadata
    pub start_time: Instant,
    pub port: u16,
    pub host: String,
    /// Last action tracking
    pub last_action: Arc<Mutex<Option<String>>>,
    pub last_action_time: Arc<Mutex<Option<DateTime<Utc>>>>,
    pub last_alarm: Arc<Mutex<Option<AlarmNotice>>>,
    /// Channel for display updates
    pub snapshot_tx: watch::Sender<EngineSnapshot>,
    /// Keep the receiver alive to prevent channel closure
    pub _snapshot_rx: watch::Receiver<EngineSnapshot>,
    /// Channel for alarm notifications
    pub alarm_tx: broadcast::Sender<AlarmNotice>,
}

impl AppState {
    /// Create a new AppState whose engine samples `clock`
    pub fn new(
        clock: Arc<dyn Clock>,
        mode: TimerMode,
        preferences: Preferences,
        preferences_path: PathBuf,
        port: u16,
        host: String,
    ) -> Self {
        let engine = TimeEngine::new(clock, mode);
        let (snapshot_tx, snapshot_rx) = watch::channel(engine.snapshot());
        let (alarm_tx, _) = broadcast::channel(16);

        Self {
            engine: Arc::new(Mutex::new(engine)),
            preferences: Arc::new(Mutex::new(preferences)),
            preferences_path,
            start_time: Instant::now(),
            port,
            host,
            last_action: Arc::new(Mutex::new(None)),
            last_action_time: Arc::new(Mutex::new(None)),
            last_alarm: Arc::new(Mutex::new(None)),
            snapshot_tx,
            _snapshot_rx: snapshot_rx,
            alarm_tx,
        }
    }

    /// Run `f` against the engine and publish the resulting snapshot
    fn with_engine<F, R>(&self, f: F) -> Result<(R, EngineSnapshot), String>
    where
        F: FnOnce(&mut TimeEngine) -> R,
    {
        let mut engine = self.engine.lock()
            .map_err(|e| format!("Failed to lock timer engine: {}", e))?;

        let result = f(&mut *engine);
        let snapshot = engine.snapshot();
        drop(engine);

        self.snapshot_tx.send_if_modified(|current| {
            if *current == snapshot {
                false
            } else {
                *current = snapshot.clone();
                true
            }
        });

        Ok((result, snapshot))
    }

    /// Apply a user action to the engine and record it as the last action
    pub fn update_engine<F, R>(&self, action: &str, updater: F) -> Result<(R, EngineSnapshot), String>
    where
        F: FnOnce(&mut TimeEngine) -> R,
    {
        let outcome = self.with_engine(updater)?;

        if let Ok(mut last_action) = self.last_action.lock() {
            *last_action = Some(action.to_string());
        }
        if let Ok(mut last_time) = self.last_action_time.lock() {
            *last_time = Some(Utc::now());
        }

        Ok(outcome)
    }

    /// Start, stop, toggle or reset `mode`
    pub fn timer_action(&self, mode: TimerMode, action: TimerAction) -> Result<EngineSnapshot, String> {
        info!("{} {}", action.name(), mode);
        self.update_engine(&format!("{}:{}", action.name(), mode), |engine| action.apply(engine, mode))
            .map(|(_, snapshot)| snapshot)
    }

    /// Apply `action` to the displayed mode
    pub fn active_action(&self, action: TimerAction) -> Result<EngineSnapshot, String> {
        let mode = self.get_snapshot()?.mode;
        self.timer_action(mode, action)
    }

    pub fn set_mode(&self, mode: TimerMode) -> Result<EngineSnapshot, String> {
        self.update_engine(&format!("mode:{}", mode), |engine| engine.set_mode(mode))
            .map(|(_, snapshot)| snapshot)
    }

    pub fn next_mode(&self) -> Result<EngineSnapshot, String> {
        self.update_engine("mode:next", |engine| engine.next_mode())
            .map(|(_, snapshot)| snapshot)
    }

    /// Set one field of the displayed mode. The flag is false when the edit was ignored.
    pub fn set_field(&self, field: Field, value: i64) -> Result<(bool, EngineSnapshot), String> {
        self.update_engine(&format!("set:{}", field), |engine| engine.set_field(field, value))
    }

    pub fn adjust_field(&self, field: Field, direction: Direction) -> Result<(Option<u32>, EngineSnapshot), String> {
        self.update_engine(&format!("step:{}", field), |engine| engine.adjust_field(field, direction))
    }

    pub fn press_field(&self, field: Field, direction: Direction) -> Result<(Option<Hold>, EngineSnapshot), String> {
        self.update_engine(&format!("press:{}", field), |engine| engine.press_field(field, direction))
    }

    /// One repeat step of a held button; false once the hold has ended
    pub fn repeat_field(&self, field: Field, generation: u64) -> Result<bool, String> {
        self.with_engine(|engine| engine.repeat_field(field, generation))
            .map(|(held, _)| held)
    }

    pub fn release_field(&self, field: Field) -> Result<EngineSnapshot, String> {
        self.update_engine(&format!("release:{}", field), |engine| engine.release_field(field))
            .map(|(_, snapshot)| snapshot)
    }

    /// Evaluate all timers; returns the alarmed modes and the clock text for alarm messages
    pub fn tick(&self) -> Result<(Vec<TimerMode>, String), String> {
        self.with_engine(|engine| {
            let alarmed = engine.tick();
            (alarmed, engine.current_time_text())
        })
        .map(|(outcome, _)| outcome)
    }

    /// Get current engine snapshot
    pub fn get_snapshot(&self) -> Result<EngineSnapshot, String> {
        self.engine.lock()
            .map(|engine| engine.snapshot())
            .map_err(|e| format!("Failed to lock timer engine: {}", e))
    }

    /// Get current preferences
    pub fn get_preferences(&self) -> Result<Preferences, String> {
        self.preferences.lock()
            .map(|preferences| preferences.clone())
            .map_err(|e| format!("Failed to lock preferences: {}", e))
    }

    /// Apply changed preferences in memory
    pub fn apply_preferences(&self, update: PreferencesUpdate) -> Result<Preferences, String> {
        let mut preferences = self.preferences.lock()
            .map_err(|e| format!("Failed to lock preferences: {}", e))?;

        preferences.apply(update);
        info!("Preferences updated");
        Ok(preferences.clone())
    }

    /// Apply changed preferences and write them to the preferences file
    pub fn save_preferences(&self, update: PreferencesUpdate) -> Result<Preferences, String> {
        let preferences = self.apply_preferences(update)?;
        preferences.save(&self.preferences_path)?;
        Ok(preferences)
    }

    /// Remember the alarm and notify subscribers
    pub fn record_alarm(&self, notice: AlarmNotice) -> Result<(), String> {
        let mut last_alarm = self.last_alarm.lock()
            .map_err(|e| format!("Failed to lock last alarm: {}", e))?;
        *last_alarm = Some(notice.clone());
        drop(last_alarm);

        if self.alarm_tx.receiver_count() > 0 {
            if let Err(e) = self.alarm_tx.send(notice) {
                warn!("Failed to send alarm notification: {}", e);
            }
        }
        Ok(())
    }

    pub fn get_last_alarm(&self) -> Option<AlarmNotice> {
        self.last_alarm.lock().ok().and_then(|a| a.clone())
    }

    /// Calculate server uptime as a formatted string
    pub fn get_uptime(&self) -> String {
        let duration = self.start_time.elapsed();
        let hours = duration.as_secs() / 3600;
        let minutes = (duration.as_secs() % 3600) / 60;
        let seconds = duration.as_secs() % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}s", seconds)
        }
    }

    /// Get last action information
    pub fn get_last_action(&self) -> (Option<String>, Option<DateTime<Utc>>) {
        let last_action = self.last_action.lock().ok().and_then(|a| a.clone());
        let last_action_time = self.last_action_time.lock().ok().and_then(|t| *t);
        (last_action, last_action_time)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{clock::ManualClock, state::Hms};

    fn state_at(hms: Hms, mode: TimerMode) -> (AppState, ManualClock) {
        let clock = ManualClock::at_time_of_day(hms);
        let path = std::env::temp_dir().join("tickwatch-app-state-unused.conf");
        let state = AppState::new(
            Arc::new(clock.clone()),
            mode,
            Preferences::new(),
            path,
            0,
            "127.0.0.1".to_string(),
        );
        (state, clock)
    }

    #[test]
    fn test_actions_publish_snapshots() {
        let (state, clock) = state_at(Hms::new(9, 0, 0), TimerMode::Stopwatch);
        let mut rx = state.snapshot_tx.subscribe();

        let snapshot = state.active_action(TimerAction::Start).expect("start");
        assert!(snapshot.running);
        assert!(rx.has_changed().expect("channel open"));
        assert!(rx.borrow_and_update().running);

        clock.advance_millis(3_000);
        let (alarmed, time) = state.tick().expect("tick");
        assert!(alarmed.is_empty());
        assert_eq!(time, "09:00:03");
        assert_eq!(rx.borrow_and_update().display, "00:00:03");

        let (action, at) = state.get_last_action();
        assert_eq!(action.as_deref(), Some("start:stopwatch"));
        assert!(at.is_some());
    }

    #[test]
    fn test_set_field_reports_ignored_edit() {
        let (state, _) = state_at(Hms::new(9, 0, 0), TimerMode::CurrentTime);
        let (applied, _) = state.set_field(Field::Minutes, 5).expect("set field");
        assert!(!applied);

        state.timer_action(TimerMode::CurrentTime, TimerAction::Stop).expect("stop");
        let (applied, snapshot) = state.set_field(Field::Minutes, 5).expect("set field");
        assert!(applied);
        assert_eq!(snapshot.display, "09:05:00");
    }

    #[test]
    fn test_record_alarm_keeps_last() {
        let (state, _) = state_at(Hms::new(9, 0, 0), TimerMode::CountdownA);
        let mut rx = state.alarm_tx.subscribe();
        state
            .record_alarm(AlarmNotice {
                mode: TimerMode::CountdownA,
                label: TimerMode::CountdownA.label(),
                message: Some("09:00:00".to_string()),
                time: "09:00:00".to_string(),
                timestamp: Utc::now(),
            })
            .expect("record alarm");

        assert_eq!(state.get_last_alarm().map(|a| a.mode), Some(TimerMode::CountdownA));
        assert_eq!(rx.try_recv().map(|a| a.mode).ok(), Some(TimerMode::CountdownA));
    }

    #[test]
    fn test_timer_action_names_round_trip() {
        for action in [TimerAction::Start, TimerAction::Stop, TimerAction::Toggle, TimerAction::Reset] {
            assert_eq!(TimerAction::from_name(action.name()), Some(action));
        }
        assert_eq!(TimerAction::from_name("lap"), None);
    }
}
