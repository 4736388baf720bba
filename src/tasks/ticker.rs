//! Periodic tick background task

use std::{sync::Arc, time::Duration};
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, error, info};

use crate::{services::fire_alarm, state::AppState};

/// Default tick period; display resolution is whole seconds
pub const DEFAULT_TICK_PERIOD: Duration = Duration::from_millis(200);

/// Background task that evaluates all timers on a fixed cadence and delivers alarms
pub async fn tick_task(state: Arc<AppState>, period: Duration) {
    info!("Starting tick task ({}ms)", period.as_millis());

    let mut interval = interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        interval.tick().await;

        let (alarmed, time) = match state.tick() {
            Ok(outcome) => outcome,
            Err(e) => {
                error!("Failed to tick timers: {}", e);
                continue;
            }
        };

        for mode in alarmed {
            debug!("Delivering alarm for {}", mode);
            tokio::spawn(fire_alarm(Arc::clone(&state), mode, time.clone()));
        }
    }
}
