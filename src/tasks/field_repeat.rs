//! Press-and-hold repeat task for the field editors

use std::{sync::Arc, time::Duration};
use tokio::time::{interval_at, sleep, Instant};
use tracing::{debug, warn};

use crate::state::{
    field_editor::{HOLD_REPEAT_DELAY, HOLD_START_DELAY},
    AppState, Field, Hold,
};

/// Repeat a held editor button until it is released.
///
/// Waits `start_delay`, then steps every `repeat_delay`. The hold generation is
/// checked inside every step, so a tick racing with a release never mutates state.
pub async fn hold_repeat_task(
    state: Arc<AppState>,
    field: Field,
    hold: Hold,
    start_delay: Duration,
    repeat_delay: Duration,
) {
    debug!("Hold started on {} ({:?}, generation {})", field, hold.direction, hold.generation);

    sleep(start_delay).await;
    let mut interval = interval_at(Instant::now(), repeat_delay);

    loop {
        interval.tick().await;
        match state.repeat_field(field, hold.generation) {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => {
                warn!("Stopping hold on {}: {}", field, e);
                break;
            }
        }
    }

    debug!("Hold ended on {} (generation {})", field, hold.generation);
}

/// Spawn the repeat task with the standard delays
pub fn spawn_hold_repeat(state: Arc<AppState>, field: Field, hold: Hold) {
    tokio::spawn(hold_repeat_task(state, field, hold, HOLD_START_DELAY, HOLD_REPEAT_DELAY));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        clock::ManualClock,
        preferences::Preferences,
        state::{Direction, Hms, TimerMode},
    };

    fn stopwatch_state() -> Arc<AppState> {
        let clock = ManualClock::at_time_of_day(Hms::new(8, 0, 0));
        Arc::new(AppState::new(
            Arc::new(clock),
            TimerMode::Stopwatch,
            Preferences::new(),
            std::env::temp_dir().join("tickwatch-repeat-unused.conf"),
            0,
            "127.0.0.1".to_string(),
        ))
    }

    fn seconds(state: &AppState) -> u32 {
        state.get_snapshot().expect("snapshot").timers[TimerMode::Stopwatch.index()]
            .fields
            .seconds
    }

    #[tokio::test(start_paused = true)]
    async fn test_hold_repeats_until_release() {
        let state = stopwatch_state();
        let (hold, _) = state
            .press_field(Field::Seconds, Direction::Increase)
            .expect("press");
        let hold = hold.expect("stopwatch is stopped");
        assert_eq!(seconds(&state), 1);

        let task = tokio::spawn(hold_repeat_task(
            Arc::clone(&state),
            Field::Seconds,
            hold,
            HOLD_START_DELAY,
            HOLD_REPEAT_DELAY,
        ));

        // Nothing repeats during the initial delay
        sleep(Duration::from_millis(300)).await;
        assert_eq!(seconds(&state), 1);

        // Steps at 350, 450, 550 ms
        sleep(Duration::from_millis(300)).await;
        assert_eq!(seconds(&state), 4);

        state.release_field(Field::Seconds).expect("release");
        sleep(Duration::from_millis(500)).await;
        assert_eq!(seconds(&state), 4);
        assert!(task.is_finished());
    }

    #[tokio::test(start_paused = true)]
    async fn test_repress_supersedes_old_hold() {
        let state = stopwatch_state();
        let (first, _) = state
            .press_field(Field::Seconds, Direction::Increase)
            .expect("press");
        let first = first.expect("stopwatch is stopped");
        let old_task = tokio::spawn(hold_repeat_task(
            Arc::clone(&state),
            Field::Seconds,
            first,
            HOLD_START_DELAY,
            HOLD_REPEAT_DELAY,
        ));

        state.press_field(Field::Seconds, Direction::Decrease).expect("press");
        assert_eq!(seconds(&state), 0);
        state.release_field(Field::Seconds).expect("release");

        sleep(Duration::from_millis(1_000)).await;
        assert!(old_task.is_finished());
        assert_eq!(seconds(&state), 0);
    }
}
