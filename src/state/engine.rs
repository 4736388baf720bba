//! Mode/time engine: four independent timers sampled from the wall clock

use std::sync::Arc;
use serde::Serialize;
use tracing::{debug, info};

use crate::clock::{Clock, SECONDS_PER_DAY};
use super::{Direction, Field, FieldEditor, Hms, Hold, ModeTable, TimerMode, TimerState};

/// Lead time of the default countdown B target, before rounding up to a whole minute
const COUNTDOWN_B_LEAD_MILLIS: i64 = 5 * 60 * 1000;

/// Serializable view of one mode's timer
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModeSnapshot {
    pub mode: TimerMode,
    pub label: &'static str,
    pub running: bool,
    pub fields: Hms,
}

/// Serializable view of the whole engine, published to display sinks
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EngineSnapshot {
    pub mode: TimerMode,
    pub label: &'static str,
    pub display: String,
    pub running: bool,
    pub shift_seconds: i64,
    pub timers: Vec<ModeSnapshot>,
}

/// The hour, minute and second editors bound to the displayed mode
#[derive(Debug, Clone)]
struct Editors([FieldEditor; 3]);

impl Editors {
    fn new() -> Self {
        Self(Field::ALL.map(FieldEditor::for_field))
    }

    fn get(&self, field: Field) -> &FieldEditor {
        &self.0[field as usize]
    }

    fn get_mut(&mut self, field: Field) -> &mut FieldEditor {
        &mut self.0[field as usize]
    }

    fn load(&mut self, fields: Hms) {
        for field in Field::ALL {
            self.get_mut(field).set(fields.get(field) as i64);
        }
    }

    fn release_all(&mut self) {
        for editor in self.0.iter_mut() {
            editor.release();
        }
    }
}

/// Time engine holding every mode's timer, the displayed mode and its editors
pub struct TimeEngine {
    clock: Arc<dyn Clock>,
    mode: TimerMode,
    timers: ModeTable<TimerState>,
    /// Signed offset added to wall-clock samples, set by starting current-time mode
    shift_seconds: i64,
    editors: Editors,
    display: Hms,
}

impl TimeEngine {
    /// Create an engine with current-time running and every other mode at its default
    pub fn new(clock: Arc<dyn Clock>, mode: TimerMode) -> Self {
        let now = clock.now_millis();
        let mut timers = ModeTable::from_fn(|_| TimerState::stopped());
        timers[TimerMode::CurrentTime] = TimerState::new(clock.time_of_day(now));
        timers[TimerMode::CurrentTime].run_from(None);
        timers[TimerMode::CountdownB] = TimerState::new(default_countdown_b(clock.as_ref(), now));

        let mut engine = Self {
            clock,
            mode,
            timers,
            shift_seconds: 0,
            editors: Editors::new(),
            display: Hms::ZERO,
        };
        engine.sync_editors();
        engine.refresh_display();
        engine
    }

    pub fn mode(&self) -> TimerMode {
        self.mode
    }

    pub fn timer(&self, mode: TimerMode) -> &TimerState {
        &self.timers[mode]
    }

    pub fn is_running(&self, mode: TimerMode) -> bool {
        self.timers[mode].is_running()
    }

    pub fn display(&self) -> Hms {
        self.display
    }

    pub fn shift_seconds(&self) -> i64 {
        self.shift_seconds
    }

    pub fn editor(&self, field: Field) -> &FieldEditor {
        self.editors.get(field)
    }

    /// Start `mode`, deriving its anchor, target or shift from the stored fields
    pub fn start(&mut self, mode: TimerMode) {
        if self.timers[mode].is_running() {
            debug!("{} already running", mode);
            return;
        }

        let now = self.clock.now_millis();
        let stored = self.timers[mode].fields.total_seconds();

        match mode {
            TimerMode::Stopwatch => {
                self.timers[mode].run_from(Some(now - stored * 1000));
            }
            TimerMode::CountdownA => {
                self.timers[mode].run_from(Some(now + stored * 1000));
            }
            TimerMode::CountdownB => {
                let delta = (stored - self.time_of_day_seconds(now)).rem_euclid(SECONDS_PER_DAY);
                let second_start = now.div_euclid(1000) * 1000;
                self.timers[mode].run_from(Some(second_start + delta * 1000));
            }
            TimerMode::CurrentTime => {
                self.shift_seconds = stored - self.time_of_day_seconds(now);
                self.timers[mode].run_from(None);
            }
        }

        info!("Started {} from {}", mode, self.timers[mode].fields);
        if mode == self.mode {
            self.refresh_display();
        }
    }

    /// Stop `mode`, capturing its current value back into the stored fields
    pub fn stop(&mut self, mode: TimerMode) {
        if !self.timers[mode].is_running() {
            debug!("{} already stopped", mode);
            return;
        }

        let now = self.clock.now_millis();
        match mode {
            // Countdown B keeps its target time-of-day
            TimerMode::CountdownB => {}
            TimerMode::CurrentTime => {
                self.timers[mode].fields = self.shifted_time_of_day(now);
            }
            TimerMode::Stopwatch | TimerMode::CountdownA => {
                self.timers[mode].fields = self.live_value(mode, now).wrapped();
            }
        }
        self.timers[mode].halt();

        info!("Stopped {} at {}", mode, self.timers[mode].fields);
        if mode == self.mode {
            self.sync_editors();
            self.refresh_display();
        }
    }

    pub fn toggle(&mut self, mode: TimerMode) {
        if self.timers[mode].is_running() {
            self.stop(mode);
        } else {
            self.start(mode);
        }
    }

    /// Return `mode` to its default. Current-time clears the shift and keeps running.
    pub fn reset(&mut self, mode: TimerMode) {
        if self.timers[mode].is_running() {
            self.stop(mode);
        }

        let now = self.clock.now_millis();
        let fields = match mode {
            TimerMode::CurrentTime => {
                self.shift_seconds = 0;
                self.timers[mode].run_from(None);
                self.clock.time_of_day(now)
            }
            TimerMode::CountdownB => default_countdown_b(self.clock.as_ref(), now),
            TimerMode::Stopwatch | TimerMode::CountdownA => Hms::ZERO,
        };
        self.timers[mode].fields = fields;

        info!("Reset {} to {}", mode, fields);
        if mode == self.mode {
            self.sync_editors();
            self.refresh_display();
        }
    }

    /// Evaluate every running timer. Returns the countdowns that alarmed, A before B.
    pub fn tick(&mut self) -> Vec<TimerMode> {
        let now = self.clock.now_millis();
        let mut alarmed = Vec::new();

        for mode in TimerMode::ALL.into_iter().filter(|mode| mode.is_countdown()) {
            let expired = self
                .remaining_millis(mode, now)
                .map_or(false, |remaining| remaining <= 0);
            if expired {
                info!("{} reached zero", mode);
                self.set_mode(mode);
                self.reset(mode);
                alarmed.push(mode);
            }
        }

        self.refresh_display();
        alarmed
    }

    /// Switch the displayed mode and load its fields into the editors
    pub fn set_mode(&mut self, mode: TimerMode) {
        self.editors.release_all();
        if mode != self.mode {
            debug!("Displayed mode changed: {} -> {}", self.mode, mode);
            self.mode = mode;
        }
        self.sync_editors();
        self.refresh_display();
    }

    pub fn next_mode(&mut self) -> TimerMode {
        self.set_mode(self.mode.next());
        self.mode
    }

    /// Store `value` into `field` of the displayed mode. Ignored while that mode runs.
    pub fn set_field(&mut self, field: Field, value: i64) -> bool {
        if self.timers[self.mode].is_running() {
            debug!("Ignoring {} edit while {} is running", field, self.mode);
            return false;
        }
        self.editors.get_mut(field).set(value);
        self.store_field(field, self.editors.get(field).value());
        true
    }

    pub fn set_hour(&mut self, value: i64) -> bool {
        self.set_field(Field::Hours, value)
    }

    pub fn set_min(&mut self, value: i64) -> bool {
        self.set_field(Field::Minutes, value)
    }

    pub fn set_sec(&mut self, value: i64) -> bool {
        self.set_field(Field::Seconds, value)
    }

    /// One editor step on the displayed mode. Returns the new value if it changed.
    pub fn adjust_field(&mut self, field: Field, direction: Direction) -> Option<u32> {
        if self.timers[self.mode].is_running() {
            debug!("Ignoring {} step while {} is running", field, self.mode);
            return None;
        }
        let changed = self.editors.get_mut(field).step(direction);
        if let Some(value) = changed {
            self.store_field(field, value);
        }
        changed
    }

    /// Press an editor button: step once and begin a hold for the repeat task
    pub fn press_field(&mut self, field: Field, direction: Direction) -> Option<Hold> {
        if self.timers[self.mode].is_running() {
            debug!("Ignoring {} press while {} is running", field, self.mode);
            return None;
        }
        let (hold, changed) = self.editors.get_mut(field).press(direction);
        if let Some(value) = changed {
            self.store_field(field, value);
        }
        Some(hold)
    }

    /// One repeat tick for a hold. Returns false once the hold is no longer current.
    pub fn repeat_field(&mut self, field: Field, generation: u64) -> bool {
        if !self.editors.get(field).is_held(generation) {
            return false;
        }
        if self.timers[self.mode].is_running() {
            self.editors.get_mut(field).release();
            return false;
        }
        if let Some(value) = self.editors.get_mut(field).repeat(generation) {
            self.store_field(field, value);
        }
        true
    }

    pub fn release_field(&mut self, field: Field) {
        self.editors.get_mut(field).release();
    }

    /// Wall clock plus the current-time shift, formatted `HH:MM:SS`
    pub fn current_time_text(&self) -> String {
        self.shifted_time_of_day(self.clock.now_millis()).to_string()
    }

    pub fn snapshot(&self) -> EngineSnapshot {
        EngineSnapshot {
            mode: self.mode,
            label: self.mode.label(),
            display: self.display.to_string(),
            running: self.timers[self.mode].is_running(),
            shift_seconds: self.shift_seconds,
            timers: self
                .timers
                .iter()
                .map(|(mode, timer)| ModeSnapshot {
                    mode,
                    label: mode.label(),
                    running: timer.is_running(),
                    fields: timer.fields,
                })
                .collect(),
        }
    }

    fn store_field(&mut self, field: Field, value: u32) {
        self.timers[self.mode].fields.set(field, value);
        self.refresh_display();
    }

    fn sync_editors(&mut self) {
        self.editors.load(self.timers[self.mode].fields);
    }

    fn refresh_display(&mut self) {
        let now = self.clock.now_millis();
        self.display = if self.timers[self.mode].is_running() {
            self.live_value(self.mode, now)
        } else {
            self.timers[self.mode].fields
        };
    }

    fn time_of_day_seconds(&self, now: i64) -> i64 {
        self.clock.time_of_day(now).total_seconds()
    }

    fn shifted_time_of_day(&self, now: i64) -> Hms {
        self.clock.time_of_day(now + self.shift_seconds * 1000)
    }

    /// Milliseconds left on a running countdown; countdown B follows the shifted clock
    fn remaining_millis(&self, mode: TimerMode, now: i64) -> Option<i64> {
        let target = self.timers[mode].reference()?;
        match mode {
            TimerMode::CountdownA => Some(target - now),
            TimerMode::CountdownB => Some(target - now - self.shift_seconds * 1000),
            TimerMode::CurrentTime | TimerMode::Stopwatch => None,
        }
    }

    /// What `mode` would display at `now`, floored to whole seconds
    fn live_value(&self, mode: TimerMode, now: i64) -> Hms {
        let timer = &self.timers[mode];
        if !timer.is_running() {
            return timer.fields;
        }
        match mode {
            TimerMode::CurrentTime => self.shifted_time_of_day(now),
            TimerMode::Stopwatch => match timer.reference() {
                Some(anchor) => Hms::from_millis(now - anchor),
                None => timer.fields,
            },
            TimerMode::CountdownA | TimerMode::CountdownB => match self.remaining_millis(mode, now) {
                Some(remaining) => Hms::from_millis(remaining),
                None => timer.fields,
            },
        }
    }
}

/// Five minutes from `now`, rounded up to the next whole minute
pub fn default_countdown_b(clock: &dyn Clock, now: i64) -> Hms {
    let mut target = clock.time_of_day(now + COUNTDOWN_B_LEAD_MILLIS);
    if target.seconds > 0 {
        target.seconds = 0;
        target.minutes += 1;
        if target.minutes >= 60 {
            target.minutes %= 60;
            target.hours = (target.hours + 1) % 24;
        }
    }
    target
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;

    fn engine_at(hms: Hms, mode: TimerMode) -> (TimeEngine, ManualClock) {
        let clock = ManualClock::at_time_of_day(hms);
        let engine = TimeEngine::new(Arc::new(clock.clone()), mode);
        (engine, clock)
    }

    #[test]
    fn test_initial_state() {
        let (engine, _) = engine_at(Hms::new(9, 15, 0), TimerMode::CurrentTime);
        assert!(engine.is_running(TimerMode::CurrentTime));
        assert!(!engine.is_running(TimerMode::Stopwatch));
        assert_eq!(engine.timer(TimerMode::CountdownA).fields, Hms::ZERO);
        assert_eq!(engine.timer(TimerMode::CountdownB).fields, Hms::new(9, 20, 0));
        assert_eq!(engine.display(), Hms::new(9, 15, 0));
    }

    #[test]
    fn test_default_countdown_b_rounds_up() {
        let clock = ManualClock::at_time_of_day(Hms::new(11, 58, 30));
        assert_eq!(default_countdown_b(&clock, clock.now_millis()), Hms::new(12, 4, 0));

        let clock = ManualClock::at_time_of_day(Hms::new(11, 58, 0));
        assert_eq!(default_countdown_b(&clock, clock.now_millis()), Hms::new(12, 3, 0));

        let clock = ManualClock::at_time_of_day(Hms::new(12, 54, 10));
        assert_eq!(default_countdown_b(&clock, clock.now_millis()), Hms::new(13, 0, 0));

        let clock = ManualClock::at_time_of_day(Hms::new(23, 54, 1));
        assert_eq!(default_countdown_b(&clock, clock.now_millis()), Hms::new(0, 0, 0));
    }

    #[test]
    fn test_reset_countdown_b_while_stopped() {
        let (mut engine, _) = engine_at(Hms::new(11, 58, 30), TimerMode::CountdownB);
        engine.set_hour(3);
        engine.reset(TimerMode::CountdownB);
        assert_eq!(engine.timer(TimerMode::CountdownB).fields, Hms::new(12, 4, 0));
        assert_eq!(engine.editor(Field::Hours).value(), 12);
        assert_eq!(engine.editor(Field::Minutes).value(), 4);
        assert_eq!(engine.editor(Field::Seconds).value(), 0);
    }

    #[test]
    fn test_stopwatch_start_stop_same_instant_keeps_fields() {
        let (mut engine, _) = engine_at(Hms::new(8, 0, 0), TimerMode::Stopwatch);
        engine.set_hour(1);
        engine.set_min(2);
        engine.set_sec(3);

        engine.start(TimerMode::Stopwatch);
        engine.stop(TimerMode::Stopwatch);
        assert_eq!(engine.timer(TimerMode::Stopwatch).fields, Hms::new(1, 2, 3));
        assert!(!engine.is_running(TimerMode::Stopwatch));
    }

    #[test]
    fn test_stopwatch_counts_up_and_resumes() {
        let (mut engine, clock) = engine_at(Hms::new(8, 0, 0), TimerMode::Stopwatch);
        engine.start(TimerMode::Stopwatch);

        clock.advance_millis(61_500);
        engine.tick();
        assert_eq!(engine.display(), Hms::new(0, 1, 1));

        engine.stop(TimerMode::Stopwatch);
        assert_eq!(engine.timer(TimerMode::Stopwatch).fields, Hms::new(0, 1, 1));

        clock.advance_millis(30_000);
        engine.start(TimerMode::Stopwatch);
        clock.advance_millis(2_000);
        engine.tick();
        assert_eq!(engine.display(), Hms::new(0, 1, 3));
    }

    #[test]
    fn test_stopwatch_stop_wraps_past_a_day() {
        let (mut engine, clock) = engine_at(Hms::new(8, 0, 0), TimerMode::Stopwatch);
        engine.start(TimerMode::Stopwatch);
        clock.advance_millis(25 * 3600 * 1000);
        engine.tick();
        assert_eq!(engine.display(), Hms::new(25, 0, 0));

        engine.stop(TimerMode::Stopwatch);
        assert_eq!(engine.timer(TimerMode::Stopwatch).fields, Hms::new(1, 0, 0));
    }

    #[test]
    fn test_countdown_a_reaches_zero_then_alarms_once() {
        let (mut engine, clock) = engine_at(Hms::new(8, 0, 0), TimerMode::CountdownA);
        engine.set_sec(5);
        engine.start(TimerMode::CountdownA);

        let mut alarms = 0;
        let mut shown_zero_before_alarm = false;
        for _ in 0..40 {
            clock.advance_millis(200);
            let alarmed = engine.tick();
            if alarmed.is_empty() {
                if engine.display() == Hms::ZERO && engine.is_running(TimerMode::CountdownA) {
                    shown_zero_before_alarm = true;
                }
            } else {
                assert_eq!(alarmed, vec![TimerMode::CountdownA]);
                assert_eq!(clock.now_millis() - 8 * 3600 * 1000, 5_000);
                alarms += 1;
            }
        }

        assert!(shown_zero_before_alarm);
        assert_eq!(alarms, 1);
        assert!(!engine.is_running(TimerMode::CountdownA));
        assert_eq!(engine.timer(TimerMode::CountdownA).fields, Hms::ZERO);
        assert_eq!(engine.display(), Hms::ZERO);
    }

    #[test]
    fn test_countdown_b_alarms_in_background() {
        let (mut engine, clock) = engine_at(Hms::new(12, 0, 0), TimerMode::CountdownB);
        engine.set_hour(12);
        engine.set_min(0);
        engine.set_sec(3);
        engine.start(TimerMode::CountdownB);
        assert_eq!(engine.display(), Hms::new(0, 0, 3));

        engine.set_mode(TimerMode::Stopwatch);
        clock.advance_millis(2_000);
        assert!(engine.tick().is_empty());
        assert_eq!(engine.mode(), TimerMode::Stopwatch);

        clock.advance_millis(1_000);
        assert_eq!(engine.tick(), vec![TimerMode::CountdownB]);
        assert_eq!(engine.mode(), TimerMode::CountdownB);
        assert!(!engine.is_running(TimerMode::CountdownB));
        assert_eq!(engine.timer(TimerMode::CountdownB).fields, Hms::new(12, 6, 0));
    }

    #[test]
    fn test_countdown_b_target_wraps_past_midnight() {
        let (mut engine, _) = engine_at(Hms::new(23, 59, 50), TimerMode::CountdownB);
        engine.set_hour(0);
        engine.set_min(0);
        engine.set_sec(10);
        engine.start(TimerMode::CountdownB);
        engine.tick();
        assert_eq!(engine.display(), Hms::new(0, 0, 20));
    }

    #[test]
    fn test_countdown_b_earlier_second_borrows_correctly() {
        // Target minute equals the current minute but the target second is earlier
        let (mut engine, _) = engine_at(Hms::new(10, 30, 40), TimerMode::CountdownB);
        engine.set_hour(10);
        engine.set_min(30);
        engine.set_sec(20);
        engine.start(TimerMode::CountdownB);
        assert_eq!(engine.display(), Hms::new(23, 59, 40));
    }

    #[test]
    fn test_countdown_b_follows_shifted_clock() {
        let (mut engine, clock) = engine_at(Hms::new(10, 0, 0), TimerMode::CurrentTime);
        engine.stop(TimerMode::CurrentTime);
        engine.set_min(1);
        engine.start(TimerMode::CurrentTime);
        assert_eq!(engine.shift_seconds(), 60);

        engine.set_mode(TimerMode::CountdownB);
        engine.set_hour(10);
        engine.set_min(2);
        engine.set_sec(0);
        engine.start(TimerMode::CountdownB);
        assert_eq!(engine.display(), Hms::new(0, 1, 0));

        clock.advance_millis(60_000);
        assert_eq!(engine.tick(), vec![TimerMode::CountdownB]);
    }

    #[test]
    fn test_current_time_shift_and_reset() {
        let (mut engine, clock) = engine_at(Hms::new(10, 0, 0), TimerMode::CurrentTime);
        engine.stop(TimerMode::CurrentTime);
        assert_eq!(engine.timer(TimerMode::CurrentTime).fields, Hms::new(10, 0, 0));

        engine.set_hour(12);
        engine.start(TimerMode::CurrentTime);
        assert_eq!(engine.shift_seconds(), 7200);

        clock.advance_millis(1_000);
        engine.tick();
        assert_eq!(engine.display(), Hms::new(12, 0, 1));
        assert_eq!(engine.current_time_text(), "12:00:01");

        engine.reset(TimerMode::CurrentTime);
        assert_eq!(engine.shift_seconds(), 0);
        assert!(engine.is_running(TimerMode::CurrentTime));
        assert_eq!(engine.display(), Hms::new(10, 0, 1));
    }

    #[test]
    fn test_current_time_negative_shift_wraps() {
        let (mut engine, _) = engine_at(Hms::new(23, 50, 0), TimerMode::CurrentTime);
        engine.stop(TimerMode::CurrentTime);
        engine.set_hour(0);
        engine.start(TimerMode::CurrentTime);
        assert_eq!(engine.shift_seconds(), -23 * 3600);
        assert_eq!(engine.display(), Hms::new(0, 50, 0));
    }

    #[test]
    fn test_edits_ignored_while_running() {
        let (mut engine, clock) = engine_at(Hms::new(8, 0, 0), TimerMode::CountdownA);
        engine.set_sec(10);
        engine.start(TimerMode::CountdownA);
        clock.advance_millis(2_000);
        engine.tick();
        let display = engine.display();

        assert!(!engine.set_min(5));
        assert_eq!(engine.adjust_field(Field::Hours, Direction::Increase), None);
        assert_eq!(engine.press_field(Field::Seconds, Direction::Decrease), None);

        assert_eq!(engine.timer(TimerMode::CountdownA).fields, Hms::new(0, 0, 10));
        assert_eq!(engine.display(), display);
    }

    #[test]
    fn test_toggle_switches_running() {
        let (mut engine, _) = engine_at(Hms::new(8, 0, 0), TimerMode::Stopwatch);
        engine.toggle(TimerMode::Stopwatch);
        assert!(engine.is_running(TimerMode::Stopwatch));
        engine.toggle(TimerMode::Stopwatch);
        assert!(!engine.is_running(TimerMode::Stopwatch));
    }

    #[test]
    fn test_reset_running_countdown_a() {
        let (mut engine, clock) = engine_at(Hms::new(8, 0, 0), TimerMode::CountdownA);
        engine.set_min(1);
        engine.start(TimerMode::CountdownA);
        clock.advance_millis(10_000);
        engine.reset(TimerMode::CountdownA);
        assert!(!engine.is_running(TimerMode::CountdownA));
        assert_eq!(engine.timer(TimerMode::CountdownA).fields, Hms::ZERO);
        assert_eq!(engine.display(), Hms::ZERO);
    }

    #[test]
    fn test_adjust_field_wraps_into_stored_value() {
        let (mut engine, _) = engine_at(Hms::new(8, 0, 0), TimerMode::Stopwatch);
        assert_eq!(engine.adjust_field(Field::Minutes, Direction::Decrease), Some(59));
        assert_eq!(engine.timer(TimerMode::Stopwatch).fields, Hms::new(0, 59, 0));
        assert_eq!(engine.display(), Hms::new(0, 59, 0));
    }

    #[test]
    fn test_hold_is_cancelled_by_mode_change() {
        let (mut engine, _) = engine_at(Hms::new(8, 0, 0), TimerMode::Stopwatch);
        let hold = engine
            .press_field(Field::Seconds, Direction::Increase)
            .expect("stopwatch is stopped");
        assert!(engine.repeat_field(Field::Seconds, hold.generation));
        assert_eq!(engine.timer(TimerMode::Stopwatch).fields.seconds, 2);

        engine.next_mode();
        assert!(!engine.repeat_field(Field::Seconds, hold.generation));
        assert_eq!(engine.timer(TimerMode::Stopwatch).fields.seconds, 2);
    }

    #[test]
    fn test_snapshot_reports_every_mode() {
        let (engine, _) = engine_at(Hms::new(7, 5, 9), TimerMode::CurrentTime);
        let snapshot = engine.snapshot();
        assert_eq!(snapshot.display, "07:05:09");
        assert_eq!(snapshot.label, "Current Time");
        assert!(snapshot.running);
        assert_eq!(snapshot.timers.len(), 4);
        assert_eq!(snapshot.timers[3].mode, TimerMode::CountdownB);
    }
}
