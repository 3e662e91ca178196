//! `impro_scoreboard` - live scoreboard engine for improv matches
//!
//! Turns a match state (teams, scores, fouls, countdown) and a style model
//! into resolution-independent geometry, paints it onto a drawing surface,
//! runs the one-second countdown on a cooperative tick scheduler and fires
//! restartable sound cues.
//!
//! ```text
//! Action ─▶ Scoreboard::dispatch ─▶ MatchState / StyleModel
//!                                        │
//!                     compute_layout ◀───┘
//!                           │ GeometrySet
//!                        Renderer ─▶ dyn Surface (PixelCanvas, RecordingSurface)
//! ```

// Crate-level lint configuration
#![warn(unsafe_code)]
#![allow(clippy::cast_possible_truncation)] // Intentional pixel coordinate casts
#![allow(clippy::cast_sign_loss)] // Intentional pixel coordinate conversions
#![allow(clippy::cast_precision_loss)] // Intentional for layout math
#![allow(clippy::cast_possible_wrap)] // Intentional coordinate conversions
#![allow(clippy::module_name_repetitions)] // Allow state::MatchState etc
#![allow(clippy::missing_errors_doc)] // Docs WIP
#![allow(clippy::missing_panics_doc)] // Docs WIP
#![allow(clippy::missing_const_for_fn)] // Many functions could be const, not critical
#![allow(clippy::doc_markdown)] // Allow technical names without backticks
#![allow(clippy::suboptimal_flops)] // Standard math notation is clearer than mul_add
#![allow(clippy::neg_cmp_op_on_partial_ord)] // `!(x > 0.0)` also rejects NaN
#![allow(clippy::cast_lossless)] // as casts are fine for primitive widening
#![allow(clippy::items_after_statements)] // Common pattern in tests

pub mod assets;
#[cfg(feature = "audio")]
pub mod audio;
pub mod canvas;
pub mod color;
pub mod config;
pub mod error;
pub mod event;
pub mod layout;
pub mod render;
pub mod scoreboard;
pub mod sound;
pub mod state;
pub mod style;
pub mod surface;
pub mod timer;

// Re-export core types at crate root
pub use color::Rgba;
pub use error::{Error, Result};
pub use event::{LogLevel, emit_event, emit_log, set_event_callback, set_log_callback};
pub use state::{MatchState, SoundHandle, SoundSlot, Team};
pub use style::{ColorRole, StyleChange, StyleModel, StyleParam, TimerAnchor, Visibility};

// Re-export the pipeline
pub use assets::{ImageSlot, RasterImage};
pub use canvas::{FontBook, PixelCanvas};
pub use layout::{GeometrySet, MediaInfo, RectF, compute_layout};
pub use render::{MediaRefs, RenderStats, Renderer};
pub use scoreboard::{Action, Scoreboard};
pub use surface::{DrawCommand, RecordingSurface, Surface};

// Re-export timer and sound types
pub use config::{ParseResult, ScoreboardOptions};
pub use sound::{AudioBackend, FireOutcome, FlashTracker, SoundTrigger};
pub use timer::{ClockScheduler, ManualScheduler, TickScheduler, TickToken, TimerEngine, TimerState};

#[cfg(feature = "audio")]
pub use audio::RodioBackend;
