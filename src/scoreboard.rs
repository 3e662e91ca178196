//! Top-level coordinator.
//!
//! [`Scoreboard`] owns the match state, the style model, the timer engine
//! and the media and sound resources. Every edit comes in as an [`Action`]
//! through [`Scoreboard::dispatch`]; anything that changes the picture
//! raises a render request that the host collects with
//! [`Scoreboard::take_render_request`] before calling
//! [`Scoreboard::render`].
//!
//! # Examples
//!
//! ```
//! use impro_scoreboard::scoreboard::{Action, Scoreboard};
//! use impro_scoreboard::sound::SoundTrigger;
//! use impro_scoreboard::surface::RecordingSurface;
//! use impro_scoreboard::timer::ManualScheduler;
//!
//! let mut board = Scoreboard::new(ManualScheduler::new(), SoundTrigger::inert());
//! assert!(board.dispatch(Action::AdjustScore { team: 0, delta: 1 }));
//! assert!(!board.dispatch(Action::AdjustScore { team: 1, delta: -1 }));
//!
//! let mut surface = RecordingSurface::new(1280, 720);
//! if board.take_render_request() {
//!     board.render(&mut surface);
//! }
//! assert_eq!(surface.texts("1").count(), 1);
//! ```

use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::assets::ImageSlot;
use crate::config::ScoreboardOptions;
use crate::event::{LogLevel, emit_event, emit_log};
use crate::layout::{GeometrySet, compute_layout};
use crate::render::{MediaRefs, RenderStats, Renderer};
use crate::sound::{FireOutcome, FlashTracker, SoundTrigger};
use crate::state::MatchState;
use crate::style::{StyleChange, StyleModel};
use crate::surface::Surface;
use crate::timer::{StartOutcome, TickScheduler, TickToken, TimerEngine};

/// One operator request.
#[derive(Clone, Debug, PartialEq)]
pub enum Action {
    SetTeamCount(usize),
    AdjustScore { team: usize, delta: i32 },
    AdjustFouls { team: usize, delta: i32 },
    RenameTeam { team: usize, name: String },
    /// Replace the remaining countdown.
    SetTimer(u32),
    /// Replace the countdown from the minutes/seconds entry fields.
    SetTimerFromInput { minutes: String, seconds: String },
    StartTimer,
    PauseTimer,
    Style(StyleChange),
    /// Select (or with `None`, remove) the background image.
    SetBackground(Option<PathBuf>),
    /// Select (or with `None`, remove) the logo image.
    SetLogo(Option<PathBuf>),
    LoadSound { slot: usize, path: PathBuf },
    RenameSound { slot: usize, label: String },
    FireSound(usize),
    ToggleFullscreen,
    SurfaceResized { width: u32, height: u32 },
}

/// Owns all scoreboard state and wires mutation to rendering.
#[derive(Debug)]
pub struct Scoreboard<S: TickScheduler> {
    state: MatchState,
    style: StyleModel,
    timer: TimerEngine,
    scheduler: S,
    background: ImageSlot,
    logo: ImageSlot,
    sound: SoundTrigger,
    flashes: FlashTracker,
    surface_size: (u32, u32),
    fullscreen: bool,
    render_requested: bool,
    renderer: Renderer,
}

impl<S: TickScheduler> Scoreboard<S> {
    /// A board with default state and style. The first frame is requested.
    #[must_use]
    pub fn new(scheduler: S, sound: SoundTrigger) -> Self {
        Self {
            state: MatchState::new(),
            style: StyleModel::new(),
            timer: TimerEngine::new(),
            scheduler,
            background: ImageSlot::new(),
            logo: ImageSlot::new(),
            sound,
            flashes: FlashTracker::new(),
            surface_size: (0, 0),
            fullscreen: false,
            render_requested: true,
            renderer: Renderer::new(),
        }
    }

    /// A board prepared from startup options (team count, countdown, media
    /// and sound bindings). Unloadable resources degrade with a warning.
    #[must_use]
    pub fn with_options(options: &ScoreboardOptions, scheduler: S, sound: SoundTrigger) -> Self {
        let mut board = Self::new(scheduler, sound);
        board.surface_size = options.size;
        board.fullscreen = options.fullscreen;
        board.state.set_team_count(options.team_count);
        board.state.set_timer(options.timer_seconds);
        board.background.set_path(options.background.clone());
        board.logo.set_path(options.logo.clone());
        for (slot, path) in options.sounds.iter().enumerate() {
            if let Some(path) = path {
                board.load_sound(slot, path);
            }
        }
        board
    }

    #[must_use]
    pub fn state(&self) -> &MatchState {
        &self.state
    }

    #[must_use]
    pub fn style(&self) -> &StyleModel {
        &self.style
    }

    #[must_use]
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Mutable scheduler access, e.g. to advance a simulated clock.
    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    #[must_use]
    pub fn background(&self) -> &ImageSlot {
        &self.background
    }

    #[must_use]
    pub fn logo(&self) -> &ImageSlot {
        &self.logo
    }

    #[must_use]
    pub fn sound(&self) -> &SoundTrigger {
        &self.sound
    }

    #[must_use]
    pub const fn surface_size(&self) -> (u32, u32) {
        self.surface_size
    }

    #[must_use]
    pub const fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    #[must_use]
    pub fn render_stats(&self) -> &RenderStats {
        self.renderer.stats()
    }

    /// Sound slots whose button flash is still showing at `now`.
    pub fn active_flashes(&mut self, now: Instant) -> Vec<usize> {
        self.flashes.active(now)
    }

    /// Apply one request. Returns `true` when the display must be redrawn.
    ///
    /// Requests that would violate a state invariant are ignored and return
    /// `false`. Sound loading, relabeling and firing never touch the display.
    pub fn dispatch(&mut self, action: Action) -> bool {
        let changed = match action {
            Action::SetTeamCount(count) => self.state.set_team_count(count),
            Action::AdjustScore { team, delta } => self.state.adjust_score(team, delta),
            Action::AdjustFouls { team, delta } => self.state.adjust_fouls(team, delta),
            Action::RenameTeam { team, name } => self.state.rename_team(team, name),
            Action::SetTimer(seconds) => self.state.set_timer(seconds),
            Action::SetTimerFromInput { minutes, seconds } => {
                self.state.set_timer_from_input(&minutes, &seconds)
            }
            Action::StartTimer => self.start_timer(),
            Action::PauseTimer => self.timer.pause(&mut self.state, &mut self.scheduler),
            Action::Style(change) => self.style.apply(change),
            Action::SetBackground(path) => self.background.set_path(path),
            Action::SetLogo(path) => self.logo.set_path(path),
            Action::LoadSound { slot, path } => {
                self.load_sound(slot, &path);
                false
            }
            Action::RenameSound { slot, label } => {
                self.state.rename_sound_slot(slot, label);
                false
            }
            Action::FireSound(slot) => {
                self.fire_sound(slot);
                false
            }
            Action::ToggleFullscreen => {
                self.toggle_fullscreen();
                true
            }
            Action::SurfaceResized { width, height } => self.on_surface_resized(width, height),
        };
        self.render_requested |= changed;
        changed
    }

    fn start_timer(&mut self) -> bool {
        match self.timer.start(&mut self.state, &mut self.scheduler) {
            StartOutcome::Started => true,
            // Running → Idle with the countdown untouched; nothing to redraw.
            StartOutcome::AlreadyRunning | StartOutcome::ExpiredImmediately => false,
        }
    }

    /// Bind an audio file to `slot`. Returns `false` for an unknown slot.
    ///
    /// The path is recorded even when decoding fails or audio is inert.
    pub fn load_sound(&mut self, slot: usize, path: &Path) -> bool {
        self.sound.load(&mut self.state, slot, path)
    }

    /// Restart the clip bound to `slot` and flash its control.
    pub fn fire_sound(&mut self, slot: usize) -> FireOutcome {
        let outcome = self.sound.fire(&self.state, slot);
        if outcome != FireOutcome::NoSuchSlot {
            self.flashes.flash(slot, Instant::now());
        }
        outcome
    }

    /// Deliver a specific tick token.
    pub fn on_timer_tick(&mut self, token: TickToken) -> bool {
        let changed = self
            .timer
            .on_tick(token, &mut self.state, &mut self.scheduler)
            .changed();
        self.render_requested |= changed;
        changed
    }

    /// Deliver every tick that is due now.
    pub fn poll_timer(&mut self) -> bool {
        let changed = self.timer.poll(&mut self.state, &mut self.scheduler);
        self.render_requested |= changed;
        changed
    }

    /// The surface changed size; always requests a full redraw.
    pub fn on_surface_resized(&mut self, width: u32, height: u32) -> bool {
        self.surface_size = (width, height);
        emit_event("surface.resize", &format!("{width}x{height}"));
        self.render_requested = true;
        true
    }

    /// Flip the fullscreen flag and return the new value.
    ///
    /// The host performs the actual window change and reports the new size
    /// through [`on_surface_resized`](Self::on_surface_resized).
    pub fn toggle_fullscreen(&mut self) -> bool {
        self.fullscreen = !self.fullscreen;
        emit_event("fullscreen.toggle", if self.fullscreen { "on" } else { "off" });
        self.render_requested = true;
        self.fullscreen
    }

    /// Return and clear the pending render request.
    pub fn take_render_request(&mut self) -> bool {
        std::mem::take(&mut self.render_requested)
    }

    fn media(&self) -> MediaRefs<'_> {
        MediaRefs {
            background: self.background.image(),
            logo: self.logo.image(),
        }
    }

    /// Geometry for a surface of `width` × `height`.
    #[must_use]
    pub fn geometry(&self, width: u32, height: u32) -> GeometrySet {
        compute_layout(width, height, &self.state, &self.style, self.media().info())
    }

    /// Lay out and draw a full frame at the surface's current size.
    pub fn render(&mut self, surface: &mut dyn Surface) {
        let (width, height) = surface.size();
        if (width, height) != self.surface_size {
            emit_log(
                LogLevel::Debug,
                &format!("surface is {width}x{height}, last reported {:?}", self.surface_size),
            );
            self.surface_size = (width, height);
        }
        let geometry = self.geometry(width, height);
        let media = MediaRefs {
            background: self.background.image(),
            logo: self.logo.image(),
        };
        self.renderer.render(surface, &geometry, &self.style, media);
        self.render_requested = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::RecordingSurface;
    use crate::timer::{ManualScheduler, TICK_INTERVAL};

    fn board() -> Scoreboard<ManualScheduler> {
        let mut board = Scoreboard::new(ManualScheduler::new(), SoundTrigger::inert());
        board.take_render_request();
        board
    }

    #[test]
    fn test_first_frame_is_requested() {
        let mut board = Scoreboard::new(ManualScheduler::new(), SoundTrigger::inert());
        assert!(board.take_render_request());
        assert!(!board.take_render_request());
    }

    #[test]
    fn test_rejected_mutation_requests_nothing() {
        let mut board = board();
        assert!(!board.dispatch(Action::AdjustFouls { team: 0, delta: -1 }));
        assert!(!board.dispatch(Action::SetTeamCount(9)));
        assert!(!board.take_render_request());
    }

    #[test]
    fn test_bad_timer_text_keeps_value() {
        let mut board = board();
        assert!(!board.dispatch(Action::SetTimerFromInput {
            minutes: "four".into(),
            seconds: "0".into(),
        }));
        assert_eq!(board.state().timer_remaining_seconds, 240);
    }

    #[test]
    fn test_tick_requests_render() {
        let mut board = board();
        assert!(board.dispatch(Action::StartTimer));
        board.take_render_request();
        board.scheduler_mut().advance(TICK_INTERVAL);
        assert!(board.poll_timer());
        assert!(board.take_render_request());
        assert_eq!(board.state().timer_remaining_seconds, 239);
    }

    #[test]
    fn test_resize_and_fullscreen_request_render() {
        let mut board = board();
        assert!(board.on_surface_resized(1920, 1080));
        assert_eq!(board.surface_size(), (1920, 1080));
        assert!(board.take_render_request());
        assert!(board.toggle_fullscreen());
        assert!(board.is_fullscreen());
        assert!(board.take_render_request());
        assert!(!board.toggle_fullscreen());
    }

    #[test]
    fn test_render_clears_request_and_counts_frames() {
        let mut board = Scoreboard::new(ManualScheduler::new(), SoundTrigger::inert());
        let mut surface = RecordingSurface::new(640, 360);
        board.render(&mut surface);
        assert!(!board.take_render_request());
        assert_eq!(board.render_stats().frames, 1);
        assert_eq!(board.surface_size(), (640, 360));
    }

    #[test]
    fn test_fire_sound_flashes_even_when_inert() {
        let mut board = board();
        assert_eq!(board.fire_sound(0), FireOutcome::Inert);
        assert_eq!(board.active_flashes(Instant::now()), [0]);
        assert_eq!(board.fire_sound(6), FireOutcome::NoSuchSlot);
        assert!(!board.take_render_request());
    }

    #[test]
    fn test_load_sound_records_path_without_redraw() {
        let mut board = board();
        assert!(board.load_sound(2, Path::new("horn.wav")));
        assert!(!board.load_sound(6, Path::new("horn.wav")));
        let slot = &board.state().sound_slots()[2];
        assert_eq!(slot.source_path.as_deref(), Some(Path::new("horn.wav")));
        assert!(slot.handle.is_none());
        assert!(!board.dispatch(Action::LoadSound {
            slot: 0,
            path: PathBuf::from("bell.wav"),
        }));
        assert!(!board.take_render_request());
    }
}
