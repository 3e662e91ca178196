#![allow(clippy::nursery)] // Test infra prioritizes clarity over pedantry
#![allow(clippy::pedantic)] // Test infra prioritizes clarity over pedantry
#![allow(dead_code)]

use std::time::Duration;

use impro_scoreboard::event::{LogLevel, set_log_callback};
use impro_scoreboard::scoreboard::{Action, Scoreboard};
use impro_scoreboard::sound::SoundTrigger;
use impro_scoreboard::timer::{ManualScheduler, TICK_INTERVAL};
use tracing::Level;

/// Route engine logs into `tracing` and print them with the test writer.
///
/// `RUST_LOG`-style filtering is not needed; run with `--nocapture` to see output.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_target(true)
        .with_test_writer()
        .try_init();
    set_log_callback(|level, message| match level {
        LogLevel::Debug => tracing::debug!(target: "impro_scoreboard", "{message}"),
        LogLevel::Info => tracing::info!(target: "impro_scoreboard", "{message}"),
        LogLevel::Warn => tracing::warn!(target: "impro_scoreboard", "{message}"),
        LogLevel::Error => tracing::error!(target: "impro_scoreboard", "{message}"),
    });
}

/// A fresh board on a simulated clock, with the initial render request consumed.
pub fn board() -> Scoreboard<ManualScheduler> {
    let mut board = Scoreboard::new(ManualScheduler::new(), SoundTrigger::inert());
    board.take_render_request();
    board
}

/// Three teams A/B/C scoring 2/5/1 with 0/3/1 fouls and a running 3:00 countdown.
pub fn scenario_board() -> Scoreboard<ManualScheduler> {
    let mut board = board();
    for (team, (name, score, fouls)) in [("A", 2, 0), ("B", 5, 3), ("C", 1, 1)].into_iter().enumerate() {
        board.dispatch(Action::RenameTeam {
            team,
            name: name.to_string(),
        });
        board.dispatch(Action::AdjustScore { team, delta: score });
        board.dispatch(Action::AdjustFouls { team, delta: fouls });
    }
    board.dispatch(Action::SetTimer(180));
    board.dispatch(Action::StartTimer);
    board
}

/// Advance the simulated clock one interval at a time, delivering due ticks.
pub fn run_for(board: &mut Scoreboard<ManualScheduler>, seconds: u32) {
    for _ in 0..seconds {
        board.scheduler_mut().advance(TICK_INTERVAL);
        board.poll_timer();
    }
}

pub fn millis(ms: u64) -> Duration {
    Duration::from_millis(ms)
}
