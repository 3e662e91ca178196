//! Match State: teams, countdown and sound-slot bindings.
//!
//! Every mutation reports whether it applied. Requests that would break an
//! invariant (negative score, fouls outside `0..=3`, team count outside
//! `2..=4`, unknown team index) are silently refused.

use std::path::PathBuf;

/// Fewest teams on the board.
pub const MIN_TEAMS: usize = 2;
/// Most teams on the board.
pub const MAX_TEAMS: usize = 4;
/// Team count at startup.
pub const DEFAULT_TEAM_COUNT: usize = 3;
/// Fouls that fill the indicator row.
pub const MAX_FOULS: u8 = 3;
/// Number of sound-cue slots.
pub const SOUND_SLOTS: usize = 6;
/// Countdown at startup (4 minutes).
pub const DEFAULT_TIMER_SECONDS: u32 = 240;

const DEFAULT_TEAM_NAMES: [&str; MAX_TEAMS] = ["RED", "YELLOW", "BLUE", "GREEN"];

/// Label for a newly created team at `index`.
#[must_use]
pub fn default_team_name(index: usize) -> String {
    DEFAULT_TEAM_NAMES
        .get(index)
        .map_or_else(|| format!("TEAM {}", index + 1), |name| (*name).to_string())
}

/// One competing team.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Team {
    pub name: String,
    pub score: u32,
    pub fouls: u8,
}

impl Team {
    /// A team with zeroed score and fouls.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            score: 0,
            fouls: 0,
        }
    }
}

/// Opaque reference to a clip held by the audio backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct SoundHandle(pub(crate) usize);

impl SoundHandle {
    /// Wrap a backend-side clip index.
    #[must_use]
    pub const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Backend-side index of the clip.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

/// A sound-cue binding.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SoundSlot {
    pub label: String,
    pub source_path: Option<PathBuf>,
    pub handle: Option<SoundHandle>,
}

impl SoundSlot {
    fn unbound(index: usize) -> Self {
        Self {
            label: format!("FX {}", index + 1),
            source_path: None,
            handle: None,
        }
    }
}

/// Live record of teams, countdown and sound bindings.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MatchState {
    teams: Vec<Team>,
    pub timer_remaining_seconds: u32,
    pub timer_running: bool,
    sound_slots: [SoundSlot; SOUND_SLOTS],
}

impl Default for MatchState {
    fn default() -> Self {
        Self::new()
    }
}

impl MatchState {
    /// Three default teams, a stopped four-minute countdown and six empty slots.
    #[must_use]
    pub fn new() -> Self {
        let mut state = Self {
            teams: Vec::with_capacity(MAX_TEAMS),
            timer_remaining_seconds: DEFAULT_TIMER_SECONDS,
            timer_running: false,
            sound_slots: std::array::from_fn(SoundSlot::unbound),
        };
        state.set_team_count(DEFAULT_TEAM_COUNT);
        state
    }

    /// Teams in display order.
    #[must_use]
    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    /// Number of teams on the board.
    #[must_use]
    pub fn team_count(&self) -> usize {
        self.teams.len()
    }

    /// Sound slots in button order.
    #[must_use]
    pub fn sound_slots(&self) -> &[SoundSlot; SOUND_SLOTS] {
        &self.sound_slots
    }

    pub(crate) fn sound_slot_mut(&mut self, index: usize) -> Option<&mut SoundSlot> {
        self.sound_slots.get_mut(index)
    }

    /// Grow or shrink the team list.
    ///
    /// New teams get their positional color name and zeroed counters;
    /// shrinking drops trailing teams only.
    pub fn set_team_count(&mut self, count: usize) -> bool {
        if !(MIN_TEAMS..=MAX_TEAMS).contains(&count) || count == self.teams.len() {
            return false;
        }
        if count < self.teams.len() {
            self.teams.truncate(count);
        } else {
            let start = self.teams.len();
            self.teams
                .extend((start..count).map(|i| Team::new(default_team_name(i))));
        }
        true
    }

    /// Change a score by `delta`, refusing results below zero.
    pub fn adjust_score(&mut self, team: usize, delta: i32) -> bool {
        let Some(entry) = self.teams.get_mut(team) else {
            return false;
        };
        match entry.score.checked_add_signed(delta) {
            Some(score) if delta != 0 => {
                entry.score = score;
                true
            }
            _ => false,
        }
    }

    /// Change a foul count by `delta`, refusing results outside `0..=3`.
    pub fn adjust_fouls(&mut self, team: usize, delta: i32) -> bool {
        let Some(entry) = self.teams.get_mut(team) else {
            return false;
        };
        let Some(next) = i32::from(entry.fouls).checked_add(delta) else {
            return false;
        };
        if delta == 0 || !(0..=i32::from(MAX_FOULS)).contains(&next) {
            return false;
        }
        entry.fouls = next as u8;
        true
    }

    /// Rename a team.
    pub fn rename_team(&mut self, team: usize, name: impl Into<String>) -> bool {
        let Some(entry) = self.teams.get_mut(team) else {
            return false;
        };
        let name = name.into();
        if entry.name == name {
            return false;
        }
        entry.name = name;
        true
    }

    /// Set the remaining countdown directly.
    pub fn set_timer(&mut self, total_seconds: u32) -> bool {
        if self.timer_remaining_seconds == total_seconds {
            return false;
        }
        self.timer_remaining_seconds = total_seconds;
        true
    }

    /// Set the countdown from operator text; unparsable input is ignored.
    pub fn set_timer_from_input(&mut self, minutes: &str, seconds: &str) -> bool {
        parse_timer_input(minutes, seconds).is_some_and(|total| self.set_timer(total))
    }

    /// Relabel a sound slot.
    pub fn rename_sound_slot(&mut self, slot: usize, label: impl Into<String>) -> bool {
        let Some(entry) = self.sound_slots.get_mut(slot) else {
            return false;
        };
        let label = label.into();
        if entry.label == label {
            return false;
        }
        entry.label = label;
        true
    }

    /// Countdown as `MM:SS`.
    #[must_use]
    pub fn timer_text(&self) -> String {
        format_clock(self.timer_remaining_seconds)
    }
}

/// Format seconds as zero-padded `MM:SS`; minutes are not capped at 99.
#[must_use]
pub fn format_clock(total_seconds: u32) -> String {
    format!("{:02}:{:02}", total_seconds / 60, total_seconds % 60)
}

/// Parse the minutes/seconds entry fields into total seconds.
///
/// Both fields must be non-negative integers (surrounding whitespace is
/// allowed). Seconds above 59 are accepted and simply add up.
#[must_use]
pub fn parse_timer_input(minutes: &str, seconds: &str) -> Option<u32> {
    let minutes: u32 = minutes.trim().parse().ok()?;
    let seconds: u32 = seconds.trim().parse().ok()?;
    minutes.checked_mul(60)?.checked_add(seconds)
}
