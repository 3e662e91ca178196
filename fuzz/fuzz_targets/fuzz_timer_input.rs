//! Fuzz target for the minutes/seconds timer entry.
//!
//! Arbitrary operator text must never panic or overflow, and accepted input
//! must format back to a clock string.

#![no_main]

use impro_scoreboard::state::{MatchState, format_clock, parse_timer_input};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|fields: (&str, &str)| {
    let (minutes, seconds) = fields;
    let parsed = parse_timer_input(minutes, seconds);

    let mut state = MatchState::new();
    let before = state.timer_remaining_seconds;
    let applied = state.set_timer_from_input(minutes, seconds);
    match parsed {
        Some(total) => {
            assert_eq!(state.timer_remaining_seconds, total);
            assert_eq!(applied, total != before);
            assert!(format_clock(total).contains(':'));
        }
        None => {
            assert!(!applied);
            assert_eq!(state.timer_remaining_seconds, before);
        }
    }
});
