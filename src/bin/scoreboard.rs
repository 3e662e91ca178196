//! Audience window for the improv scoreboard.
//!
//! Draws the board into a software canvas and uploads it with `pixels`.
//! The operator drives the show from the keyboard:
//!
//! | Key            | Effect                          |
//! |----------------|---------------------------------|
//! | Space          | start / pause the countdown     |
//! | S              | reset the countdown             |
//! | 1-4            | select a team                   |
//! | Up / Down      | selected team score ±1          |
//! | F / R          | selected team fouls +1 / -1     |
//! | + / -          | add / remove a team             |
//! | T              | timer at top / bottom           |
//! | V / G / O      | show timer / fouls / outline    |
//! | F1-F6          | fire sound cue                  |
//! | F11, dbl-click | toggle fullscreen               |
//! | Esc            | quit                            |

use std::ffi::OsString;
use std::time::{Duration, Instant};

use impro_scoreboard::canvas::{FontBook, PixelCanvas};
use impro_scoreboard::config::{ParseResult, ScoreboardOptions, USAGE};
use impro_scoreboard::event::{LogLevel, emit_log, set_event_callback, set_log_callback};
use impro_scoreboard::scoreboard::{Action, Scoreboard};
use impro_scoreboard::sound::SoundTrigger;
use impro_scoreboard::state::{MAX_TEAMS, MatchState};
use impro_scoreboard::style::{StyleChange, StyleModel, Visibility};
use impro_scoreboard::timer::ClockScheduler;
use pixels::{Pixels, SurfaceTexture};
use winit::dpi::PhysicalSize;
use winit::event::{ElementState, Event, KeyboardInput, MouseButton, VirtualKeyCode, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::{Fullscreen, WindowBuilder};

const TITLE: &str = "Impro Scoreboard";
const DOUBLE_CLICK: Duration = Duration::from_millis(400);
const FLASH_POLL: Duration = Duration::from_millis(50);

/// What a key press asks for.
#[derive(Clone, Debug, PartialEq)]
enum Command {
    Dispatch(Action),
    SelectTeam(usize),
    ToggleFullscreen,
    Quit,
}

fn map_key(
    key: VirtualKeyCode,
    selected: usize,
    state: &MatchState,
    style: &StyleModel,
    reset_seconds: u32,
) -> Option<Command> {
    use VirtualKeyCode as K;

    let toggle = |flag: Visibility| Action::Style(StyleChange::Visible(flag, !style.is_visible(flag)));
    let action = match key {
        K::Escape => return Some(Command::Quit),
        K::F11 => return Some(Command::ToggleFullscreen),
        K::Key1 | K::Key2 | K::Key3 | K::Key4 => {
            let index = match key {
                K::Key1 => 0,
                K::Key2 => 1,
                K::Key3 => 2,
                _ => 3,
            };
            return (index < state.team_count()).then_some(Command::SelectTeam(index));
        }
        K::Space if state.timer_running => Action::PauseTimer,
        K::Space => Action::StartTimer,
        K::S => Action::SetTimer(reset_seconds),
        K::Up => Action::AdjustScore {
            team: selected,
            delta: 1,
        },
        K::Down => Action::AdjustScore {
            team: selected,
            delta: -1,
        },
        K::F => Action::AdjustFouls {
            team: selected,
            delta: 1,
        },
        K::R => Action::AdjustFouls {
            team: selected,
            delta: -1,
        },
        K::Plus | K::Equals | K::NumpadAdd => Action::SetTeamCount(state.team_count() + 1),
        K::Minus | K::NumpadSubtract => Action::SetTeamCount(state.team_count().saturating_sub(1)),
        K::T => Action::Style(StyleChange::TimerAnchor(style.timer_anchor.toggled())),
        K::V => toggle(Visibility::TIMER),
        K::G => toggle(Visibility::FOULS),
        K::O => toggle(Visibility::OUTLINE),
        K::F1 => Action::FireSound(0),
        K::F2 => Action::FireSound(1),
        K::F3 => Action::FireSound(2),
        K::F4 => Action::FireSound(3),
        K::F5 => Action::FireSound(4),
        K::F6 => Action::FireSound(5),
        _ => return None,
    };
    Some(Command::Dispatch(action))
}

fn window_title(board: &mut Scoreboard<ClockScheduler>, now: Instant) -> String {
    let flashes = board.active_flashes(now);
    if flashes.is_empty() {
        return TITLE.to_string();
    }
    let labels: Vec<_> = flashes
        .iter()
        .filter_map(|&slot| board.state().sound_slots().get(slot))
        .map(|slot| slot.label.as_str())
        .collect();
    format!("{TITLE} ♪ {}", labels.join(", "))
}

fn load_fonts(options: &ScoreboardOptions, style: &StyleModel) -> FontBook {
    let mut fonts = FontBook::new();
    let configured = [
        (&style.name_font, &options.names_font),
        (&style.score_font, &options.scores_font),
    ];
    for (family, path) in configured {
        if let Some(path) = path {
            if let Err(err) = fonts.load(family.clone(), path) {
                emit_log(LogLevel::Warn, &format!("font {}: {err}", path.display()));
            }
        }
    }
    if fonts.is_empty() {
        fonts.load_system_fallback();
    }
    fonts
}

fn sound_trigger(options: &ScoreboardOptions) -> SoundTrigger {
    if !options.audio {
        return SoundTrigger::inert();
    }
    #[cfg(feature = "audio")]
    {
        SoundTrigger::new(impro_scoreboard::audio::RodioBackend::detect())
    }
    #[cfg(not(feature = "audio"))]
    {
        SoundTrigger::new(None)
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let options = match ScoreboardOptions::from_args(std::env::args_os().collect::<Vec<OsString>>()) {
        ParseResult::Options(options) => options,
        ParseResult::Help => {
            print!("{USAGE}");
            return Ok(());
        }
        ParseResult::Error(message) => {
            eprintln!("error: {message}\n\n{USAGE}");
            std::process::exit(2);
        }
    };

    set_log_callback(|level, message| eprintln!("[{level}] {message}"));
    set_event_callback(|name, data| eprintln!("[EVENT] {name} {data}"));

    let event_loop = EventLoop::new();
    let (width, height) = options.size;
    let window = WindowBuilder::new()
        .with_title(TITLE)
        .with_inner_size(PhysicalSize::new(width, height))
        .build(&event_loop)?;
    if options.fullscreen {
        window.set_fullscreen(Some(Fullscreen::Borderless(None)));
    }

    let size = window.inner_size();
    let surface_texture = SurfaceTexture::new(size.width, size.height, &window);
    let mut pixels = Pixels::new(size.width, size.height, surface_texture)?;

    let mut board = Scoreboard::with_options(&options, ClockScheduler::new(), sound_trigger(&options));
    board.on_surface_resized(size.width, size.height);
    let mut canvas = PixelCanvas::with_fonts(size.width, size.height, load_fonts(&options, board.style()));

    let mut selected = 0usize;
    let mut last_click: Option<Instant> = None;
    let mut title = TITLE.to_string();

    event_loop.run(move |event, _, control_flow| match event {
        Event::WindowEvent { event, .. } => {
            let mut fullscreen_requested = false;
            match event {
                WindowEvent::CloseRequested => *control_flow = ControlFlow::Exit,
                WindowEvent::Resized(size) => {
                    if size.width > 0 && size.height > 0 {
                        let resized = pixels
                            .resize_surface(size.width, size.height)
                            .and_then(|()| pixels.resize_buffer(size.width, size.height));
                        if let Err(err) = resized {
                            emit_log(LogLevel::Error, &format!("resize failed: {err}"));
                        }
                        canvas.resize(size.width, size.height);
                        board.on_surface_resized(size.width, size.height);
                    }
                }
                WindowEvent::MouseInput {
                    state: ElementState::Pressed,
                    button: MouseButton::Left,
                    ..
                } => {
                    let now = Instant::now();
                    if last_click.is_some_and(|prev| now.duration_since(prev) < DOUBLE_CLICK) {
                        fullscreen_requested = true;
                        last_click = None;
                    } else {
                        last_click = Some(now);
                    }
                }
                WindowEvent::KeyboardInput {
                    input:
                        KeyboardInput {
                            state: ElementState::Pressed,
                            virtual_keycode: Some(key),
                            ..
                        },
                    ..
                } => {
                    let reset = options.timer_seconds;
                    match map_key(key, selected, board.state(), board.style(), reset) {
                        Some(Command::Dispatch(action)) => {
                            board.dispatch(action);
                            selected = selected.min(board.state().team_count().saturating_sub(1));
                        }
                        Some(Command::SelectTeam(index)) => selected = index.min(MAX_TEAMS - 1),
                        Some(Command::ToggleFullscreen) => fullscreen_requested = true,
                        Some(Command::Quit) => *control_flow = ControlFlow::Exit,
                        None => {}
                    }
                }
                _ => {}
            }
            if fullscreen_requested {
                let mode = board.toggle_fullscreen().then_some(Fullscreen::Borderless(None));
                window.set_fullscreen(mode);
            }
        }
        Event::MainEventsCleared => {
            board.poll_timer();

            let now = Instant::now();
            let next_title = window_title(&mut board, now);
            if next_title != title {
                window.set_title(&next_title);
                title = next_title;
            }
            if board.take_render_request() {
                window.request_redraw();
            }

            if *control_flow != ControlFlow::Exit {
                let flash_wake = (title != TITLE).then(|| now + FLASH_POLL);
                let wake = match (board.scheduler().next_deadline(), flash_wake) {
                    (Some(a), Some(b)) => Some(a.min(b)),
                    (a, b) => a.or(b),
                };
                *control_flow = wake.map_or(ControlFlow::Wait, ControlFlow::WaitUntil);
            }
        }
        Event::RedrawRequested(_) => {
            board.render(&mut canvas);
            if let Err(err) = canvas.write_rgba8(pixels.frame_mut()) {
                emit_log(LogLevel::Warn, &format!("frame upload skipped: {err}"));
            }
            if let Err(err) = pixels.render() {
                emit_log(LogLevel::Error, &format!("present failed: {err}"));
                *control_flow = ControlFlow::Exit;
            }
        }
        _ => {}
    });
}
