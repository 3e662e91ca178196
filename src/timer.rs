//! Timer Engine: the countdown state machine and its tick scheduling.
//!
//! The engine never sleeps or spawns threads. It asks a [`TickScheduler`]
//! for a one-shot tick 1000 ms out and gets called back with the token when
//! that tick is due. Only the token the engine is currently waiting for is
//! honored, so a tick that was already queued when the operator paused (or
//! paused and restarted) cannot touch the countdown.
//!
//! ```text
//!            start (remaining > 0)
//!   Idle ─────────────────────────▶ Running ──┐ tick: remaining -= 1,
//!    ▲  ◀──────── pause ─────────────   │     │       schedule next
//!    │                                  │ ◀───┘
//!    └────── tick reaches 0 (expire) ───┘
//! ```

use std::time::{Duration, Instant};

use crate::event::{LogLevel, emit_event, emit_log};
use crate::state::MatchState;

/// Wall time between ticks.
pub const TICK_INTERVAL: Duration = Duration::from_millis(1000);

/// Identifies one scheduled tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TickToken(u64);

impl TickToken {
    #[must_use]
    pub const fn id(self) -> u64 {
        self.0
    }
}

/// Deferred one-shot callbacks on the render thread.
pub trait TickScheduler {
    /// Arrange for a tick after `delay`.
    fn schedule(&mut self, delay: Duration) -> TickToken;

    /// Forget a scheduled tick. Unknown tokens are ignored.
    fn cancel(&mut self, token: TickToken);

    /// Remove and return the earliest tick that is due, if any.
    fn pop_due(&mut self) -> Option<TickToken>;
}

/// Ticks ordered by deadline, then by scheduling order.
#[derive(Clone, Debug)]
struct TickQueue<T> {
    entries: Vec<(T, TickToken)>,
    next_id: u64,
}

impl<T> Default for TickQueue<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            next_id: 1,
        }
    }
}

impl<T: Copy + Ord> TickQueue<T> {
    fn push(&mut self, deadline: T) -> TickToken {
        let token = TickToken(self.next_id);
        self.next_id += 1;
        let at = self
            .entries
            .partition_point(|(d, t)| (*d, *t) <= (deadline, token));
        self.entries.insert(at, (deadline, token));
        token
    }

    fn cancel(&mut self, token: TickToken) {
        self.entries.retain(|(_, t)| *t != token);
    }

    fn pop_until(&mut self, now: T) -> Option<TickToken> {
        match self.entries.first() {
            Some((deadline, _)) if *deadline <= now => Some(self.entries.remove(0).1),
            _ => None,
        }
    }

    fn next_deadline(&self) -> Option<T> {
        self.entries.first().map(|(d, _)| *d)
    }
}

/// Scheduler driven by an explicit simulated clock.
///
/// Time only moves when [`advance`](Self::advance) is called.
#[derive(Clone, Debug, Default)]
pub struct ManualScheduler {
    now: Duration,
    queue: TickQueue<Duration>,
}

impl ManualScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Simulated time since creation.
    #[must_use]
    pub const fn now(&self) -> Duration {
        self.now
    }

    /// Move the simulated clock forward.
    pub fn advance(&mut self, by: Duration) {
        self.now = self.now.saturating_add(by);
    }

    /// Number of ticks still queued.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.queue.entries.len()
    }

    /// Simulated deadline of the next tick.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.queue.next_deadline()
    }
}

impl TickScheduler for ManualScheduler {
    fn schedule(&mut self, delay: Duration) -> TickToken {
        self.queue.push(self.now.saturating_add(delay))
    }

    fn cancel(&mut self, token: TickToken) {
        self.queue.cancel(token);
    }

    fn pop_due(&mut self) -> Option<TickToken> {
        self.queue.pop_until(self.now)
    }
}

/// Scheduler backed by the monotonic wall clock.
#[derive(Clone, Debug, Default)]
pub struct ClockScheduler {
    queue: TickQueue<Instant>,
}

impl ClockScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// When the event loop should wake up next.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.queue.next_deadline()
    }
}

impl TickScheduler for ClockScheduler {
    fn schedule(&mut self, delay: Duration) -> TickToken {
        let now = Instant::now();
        self.queue.push(now.checked_add(delay).unwrap_or(now))
    }

    fn cancel(&mut self, token: TickToken) {
        self.queue.cancel(token);
    }

    fn pop_due(&mut self) -> Option<TickToken> {
        self.queue.pop_until(Instant::now())
    }
}

/// Whether the countdown is ticking.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimerState {
    Idle,
    Running,
}

/// Result of [`TimerEngine::start`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StartOutcome {
    /// Now running; the first tick is one interval away.
    Started,
    /// Was already running; nothing changed.
    AlreadyRunning,
    /// Remaining time was zero, so the timer stopped again at once.
    ExpiredImmediately,
}

/// Result of delivering a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not the tick the engine is waiting for (cancelled or superseded).
    Stale,
    /// Countdown decremented; value is the new remaining time.
    Ticked(u32),
    /// Countdown reached zero and the timer stopped.
    Expired,
}

impl TickOutcome {
    /// True when the countdown changed and the board must be redrawn.
    #[must_use]
    pub const fn changed(self) -> bool {
        !matches!(self, Self::Stale)
    }
}

/// Countdown state machine. The remaining time and running flag live in
/// [`MatchState`]; the engine only tracks which tick it is waiting for.
#[derive(Clone, Debug, Default)]
pub struct TimerEngine {
    pending: Option<TickToken>,
}

impl TimerEngine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn state(state: &MatchState) -> TimerState {
        if state.timer_running {
            TimerState::Running
        } else {
            TimerState::Idle
        }
    }

    /// Token of the outstanding tick, if any.
    #[must_use]
    pub const fn pending(&self) -> Option<TickToken> {
        self.pending
    }

    /// Idle → Running. Idempotent while running.
    pub fn start(&mut self, state: &mut MatchState, scheduler: &mut dyn TickScheduler) -> StartOutcome {
        if state.timer_running {
            return StartOutcome::AlreadyRunning;
        }
        state.timer_running = true;
        emit_event("timer.start", &state.timer_remaining_seconds.to_string());

        if state.timer_remaining_seconds == 0 {
            self.stop(state, scheduler);
            emit_event("timer.expire", "0");
            return StartOutcome::ExpiredImmediately;
        }

        self.pending = Some(scheduler.schedule(TICK_INTERVAL));
        StartOutcome::Started
    }

    /// Running → Idle, keeping the remaining time. Returns `false` when idle.
    pub fn pause(&mut self, state: &mut MatchState, scheduler: &mut dyn TickScheduler) -> bool {
        if !state.timer_running {
            return false;
        }
        self.stop(state, scheduler);
        emit_event("timer.pause", &state.timer_remaining_seconds.to_string());
        true
    }

    /// Stop without emitting a pause (used when the countdown is replaced).
    pub fn stop(&mut self, state: &mut MatchState, scheduler: &mut dyn TickScheduler) {
        state.timer_running = false;
        if let Some(token) = self.pending.take() {
            scheduler.cancel(token);
        }
    }

    /// Deliver a due tick.
    pub fn on_tick(
        &mut self,
        token: TickToken,
        state: &mut MatchState,
        scheduler: &mut dyn TickScheduler,
    ) -> TickOutcome {
        if self.pending != Some(token) || !state.timer_running {
            emit_log(LogLevel::Debug, &format!("ignoring stale tick {}", token.id()));
            return TickOutcome::Stale;
        }
        self.pending = None;

        state.timer_remaining_seconds = state.timer_remaining_seconds.saturating_sub(1);
        let remaining = state.timer_remaining_seconds;
        emit_event("timer.tick", &remaining.to_string());

        if remaining == 0 {
            state.timer_running = false;
            emit_event("timer.expire", "0");
            return TickOutcome::Expired;
        }

        self.pending = Some(scheduler.schedule(TICK_INTERVAL));
        TickOutcome::Ticked(remaining)
    }

    /// Deliver every tick that is due right now.
    ///
    /// Returns `true` if any of them changed the countdown.
    pub fn poll(&mut self, state: &mut MatchState, scheduler: &mut dyn TickScheduler) -> bool {
        let mut changed = false;
        while let Some(token) = scheduler.pop_due() {
            changed |= self.on_tick(token, state, scheduler).changed();
        }
        changed
    }
}
