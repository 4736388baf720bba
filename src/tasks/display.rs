//! Terminal display sink

use std::{
    io::{self, Write},
    sync::Arc,
};
use tracing::{debug, info};

use crate::state::{AppState, EngineSnapshot};

/// Render the status line shown for a snapshot
pub fn render_line(snapshot: &EngineSnapshot) -> String {
    let marker = if snapshot.running { ">" } else { "||" };
    format!("[{}] {} {}", snapshot.label, snapshot.display, marker)
}

fn draw(out: &mut impl Write, line: &str, width: usize) -> io::Result<()> {
    write!(out, "\r{:<width$}", line, width = width)?;
    out.flush()
}

/// Background task that redraws the digits on stdout whenever the display changes
pub async fn display_task(state: Arc<AppState>) {
    info!("Starting display task");

    let mut rx = state.snapshot_tx.subscribe();
    let mut last_line = String::new();

    loop {
        let line = render_line(&rx.borrow_and_update());
        if line != last_line {
            // Pad so a shorter line fully overwrites a longer one
            let width = last_line.len().max(line.len());
            if let Err(e) = draw(&mut std::io::stdout().lock(), &line, width) {
                debug!("Failed to draw display: {}", e);
            }
            last_line = line;
        }

        if rx.changed().await.is_err() {
            debug!("Snapshot channel closed, stopping display task");
            break;
        }
    }
}
