//! Countdown behaviour driven through the coordinator on a simulated clock.

mod common;

use common::{board, init_logging, millis, run_for};
use impro_scoreboard::scoreboard::Action;
use impro_scoreboard::timer::{TICK_INTERVAL, TimerEngine, TimerState};

#[test]
fn one_second_after_start_shows_239() {
    init_logging();
    let mut board = board();
    board.dispatch(Action::SetTimerFromInput {
        minutes: "4".into(),
        seconds: "0".into(),
    });
    assert!(board.dispatch(Action::StartTimer));

    board.scheduler_mut().advance(millis(999));
    assert!(!board.poll_timer());
    assert_eq!(board.state().timer_remaining_seconds, 240);

    board.scheduler_mut().advance(millis(1));
    assert!(board.poll_timer());
    assert_eq!(board.state().timer_remaining_seconds, 239);
    assert_eq!(board.state().timer_text(), "03:59");
}

#[test]
fn full_countdown_ends_idle_at_zero() {
    let mut board = board();
    board.dispatch(Action::StartTimer);
    run_for(&mut board, 240);
    assert_eq!(board.state().timer_remaining_seconds, 0);
    assert_eq!(TimerEngine::state(board.state()), TimerState::Idle);
    assert_eq!(board.scheduler().pending(), 0);

    // Nothing else happens afterwards.
    run_for(&mut board, 5);
    assert_eq!(board.state().timer_remaining_seconds, 0);
}

#[test]
fn start_at_zero_stops_immediately() {
    let mut board = board();
    board.dispatch(Action::SetTimer(0));
    board.take_render_request();

    assert!(!board.dispatch(Action::StartTimer));
    assert!(!board.state().timer_running);
    assert_eq!(board.state().timer_remaining_seconds, 0);
    assert_eq!(board.scheduler().pending(), 0);
    run_for(&mut board, 3);
    assert_eq!(board.state().timer_remaining_seconds, 0);
}

#[test]
fn pause_stops_already_scheduled_tick() {
    let mut board = board();
    board.dispatch(Action::StartTimer);
    run_for(&mut board, 10);
    assert_eq!(board.state().timer_remaining_seconds, 230);

    // A tick is queued for t+1s; pause half-way through the interval.
    board.scheduler_mut().advance(millis(500));
    assert!(board.dispatch(Action::PauseTimer));
    board.scheduler_mut().advance(millis(5_000));
    assert!(!board.poll_timer());
    assert_eq!(board.state().timer_remaining_seconds, 230);
    assert!(!board.dispatch(Action::PauseTimer));
}

#[test]
fn resume_continues_from_paused_value() {
    let mut board = board();
    board.dispatch(Action::StartTimer);
    run_for(&mut board, 3);
    board.dispatch(Action::PauseTimer);
    board.dispatch(Action::StartTimer);
    board.scheduler_mut().advance(TICK_INTERVAL);
    board.poll_timer();
    assert_eq!(board.state().timer_remaining_seconds, 236);
}

#[test]
fn start_is_idempotent() {
    let mut board = board();
    board.dispatch(Action::StartTimer);
    assert!(!board.dispatch(Action::StartTimer));
    assert_eq!(board.scheduler().pending(), 1);
    run_for(&mut board, 1);
    assert_eq!(board.state().timer_remaining_seconds, 239);
}

#[test]
fn setting_timer_while_running_keeps_ticking() {
    let mut board = board();
    board.dispatch(Action::StartTimer);
    run_for(&mut board, 2);
    assert!(board.dispatch(Action::SetTimer(2)));
    assert!(board.state().timer_running);
    run_for(&mut board, 1);
    assert_eq!(board.state().timer_remaining_seconds, 1);
    run_for(&mut board, 1);
    assert_eq!(board.state().timer_remaining_seconds, 0);
    assert!(!board.state().timer_running);
}
