//! Startup configuration for the scoreboard window.

use std::ffi::OsString;
use std::path::PathBuf;

use crate::state::{DEFAULT_TEAM_COUNT, DEFAULT_TIMER_SECONDS, MAX_TEAMS, MIN_TEAMS, SOUND_SLOTS, parse_timer_input};

/// Help text printed for `--help` and after argument errors.
pub const USAGE: &str = "\
Usage: scoreboard [OPTIONS]

Options:
  --size WxH           Initial window size (default 800x450)
  --fullscreen         Start in borderless fullscreen
  --teams N            Number of teams, 2-4 (default 3)
  --timer MM:SS        Initial countdown (default 04:00)
  --background PATH    Background image
  --logo PATH          Logo image
  --font-names PATH    Font file for team names
  --font-scores PATH   Font file for scores and timer
  --sound N=PATH       Bind an audio file to sound slot N (1-6)
  --no-audio           Do not open an audio device
  -h, --help           Show this help
";

/// Everything the binary needs to build a scoreboard.
#[derive(Clone, Debug, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct ScoreboardOptions {
    pub size: (u32, u32),
    pub fullscreen: bool,
    pub team_count: usize,
    pub timer_seconds: u32,
    pub background: Option<PathBuf>,
    pub logo: Option<PathBuf>,
    pub names_font: Option<PathBuf>,
    pub scores_font: Option<PathBuf>,
    pub sounds: [Option<PathBuf>; SOUND_SLOTS],
    pub audio: bool,
}

impl Default for ScoreboardOptions {
    fn default() -> Self {
        Self {
            size: (800, 450),
            fullscreen: false,
            team_count: DEFAULT_TEAM_COUNT,
            timer_seconds: DEFAULT_TIMER_SECONDS,
            background: None,
            logo: None,
            names_font: None,
            scores_font: None,
            sounds: Default::default(),
            audio: true,
        }
    }
}

/// Result of CLI parsing.
#[derive(Debug, PartialEq, Eq)]
pub enum ParseResult {
    Options(ScoreboardOptions),
    /// User requested help.
    Help,
    /// Parse error with message.
    Error(String),
}

impl ScoreboardOptions {
    /// Parse options from command-line arguments (program name first).
    pub fn from_args<I>(args: I) -> ParseResult
    where
        I: IntoIterator<Item = OsString>,
    {
        let mut options = Self::default();
        let mut args = args.into_iter();
        args.next();

        while let Some(arg) = args.next() {
            let flag = arg.to_string_lossy();
            let outcome = match flag.as_ref() {
                "-h" | "--help" => return ParseResult::Help,
                "--fullscreen" => {
                    options.fullscreen = true;
                    Ok(())
                }
                "--no-audio" => {
                    options.audio = false;
                    Ok(())
                }
                "--size" => value(&mut args, &flag).and_then(|v| {
                    parse_size(&v)
                        .map(|size| options.size = size)
                        .ok_or_else(|| format!("invalid --size: {v} (use WxH, e.g. 1920x1080)"))
                }),
                "--teams" => value(&mut args, &flag).and_then(|v| {
                    v.parse::<usize>()
                        .ok()
                        .filter(|n| (MIN_TEAMS..=MAX_TEAMS).contains(n))
                        .map(|n| options.team_count = n)
                        .ok_or_else(|| format!("invalid --teams: {v} (use {MIN_TEAMS}-{MAX_TEAMS})"))
                }),
                "--timer" => value(&mut args, &flag).and_then(|v| {
                    parse_clock(&v)
                        .map(|secs| options.timer_seconds = secs)
                        .ok_or_else(|| format!("invalid --timer: {v} (use MM:SS)"))
                }),
                "--background" => path(&mut args, &flag).map(|p| options.background = Some(p)),
                "--logo" => path(&mut args, &flag).map(|p| options.logo = Some(p)),
                "--font-names" => path(&mut args, &flag).map(|p| options.names_font = Some(p)),
                "--font-scores" => path(&mut args, &flag).map(|p| options.scores_font = Some(p)),
                "--sound" => value(&mut args, &flag).and_then(|v| {
                    parse_sound(&v)
                        .map(|(slot, p)| options.sounds[slot] = Some(p))
                        .ok_or_else(|| format!("invalid --sound: {v} (use N=PATH, N in 1-{SOUND_SLOTS})"))
                }),
                other => Err(format!("unknown option: {other}")),
            };
            if let Err(message) = outcome {
                return ParseResult::Error(message);
            }
        }

        ParseResult::Options(options)
    }
}

fn value(args: &mut impl Iterator<Item = OsString>, flag: &str) -> Result<String, String> {
    args.next()
        .map(|v| v.to_string_lossy().into_owned())
        .ok_or_else(|| format!("{flag} requires a value"))
}

fn path(args: &mut impl Iterator<Item = OsString>, flag: &str) -> Result<PathBuf, String> {
    args.next()
        .map(PathBuf::from)
        .ok_or_else(|| format!("{flag} requires a path"))
}

/// Parse "WxH" with both sides non-zero.
fn parse_size(s: &str) -> Option<(u32, u32)> {
    let (w, h) = s.split_once('x')?;
    let w = w.parse::<u32>().ok()?;
    let h = h.parse::<u32>().ok()?;
    (w > 0 && h > 0).then_some((w, h))
}

fn parse_clock(s: &str) -> Option<u32> {
    let (minutes, seconds) = s.split_once(':')?;
    parse_timer_input(minutes, seconds)
}

/// Parse "N=PATH" into a zero-based slot and path.
fn parse_sound(s: &str) -> Option<(usize, PathBuf)> {
    let (slot, path) = s.split_once('=')?;
    let slot = slot.trim().parse::<usize>().ok()?;
    ((1..=SOUND_SLOTS).contains(&slot) && !path.is_empty()).then(|| (slot - 1, PathBuf::from(path)))
}
