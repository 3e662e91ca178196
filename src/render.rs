//! Renderer: paints a [`GeometrySet`] onto a [`Surface`].
//!
//! Every pass clears the whole surface and draws back to front in a fixed
//! order: background, logo, timer, then each team's name, score box and
//! foul row. There is no partial redraw.

use std::time::{Duration, Instant};

use unicode_segmentation::UnicodeSegmentation;

use crate::assets::RasterImage;
use crate::color::Rgba;
use crate::event::{LogLevel, emit_log};
use crate::layout::{FoulRow, GeometrySet, MediaInfo, RectF, TextKind, TextRun};
use crate::style::{StyleModel, Visibility};
use crate::surface::Surface;

/// Color the surface is cleared to.
pub const CLEAR_COLOR: Rgba = Rgba::BLACK;
/// Outline color behind names.
pub const OUTLINE_COLOR: Rgba = Rgba::BLACK;
/// Outline offset in pixels.
pub const OUTLINE_OFFSET: f32 = 2.0;

/// The eight outline directions (the center is the primary pass).
const OUTLINE_DIRECTIONS: [(f32, f32); 8] = [
    (-1.0, -1.0),
    (0.0, -1.0),
    (1.0, -1.0),
    (-1.0, 0.0),
    (1.0, 0.0),
    (-1.0, 1.0),
    (0.0, 1.0),
    (1.0, 1.0),
];

/// Decoded images for one pass.
#[derive(Clone, Copy, Debug, Default)]
pub struct MediaRefs<'a> {
    pub background: Option<&'a RasterImage>,
    pub logo: Option<&'a RasterImage>,
}

impl MediaRefs<'_> {
    /// Intrinsic sizes for the layout engine.
    #[must_use]
    pub fn info(&self) -> MediaInfo {
        MediaInfo {
            background: self.background.map(RasterImage::size),
            logo: self.logo.map(RasterImage::size),
        }
    }
}

/// Rendering statistics.
#[derive(Clone, Debug, Default)]
pub struct RenderStats {
    pub frames: u64,
    pub last_frame_time: Duration,
    /// Primitive calls issued by the last pass.
    pub last_draw_calls: usize,
}

/// Draws scoreboard geometry.
#[derive(Debug, Default)]
pub struct Renderer {
    stats: RenderStats,
}

impl Renderer {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn stats(&self) -> &RenderStats {
        &self.stats
    }

    /// Run one full draw pass.
    pub fn render(&mut self, surface: &mut dyn Surface, geometry: &GeometrySet, style: &StyleModel, media: MediaRefs<'_>) {
        let start = Instant::now();
        let mut pass = Pass {
            surface,
            style,
            calls: 0,
        };

        pass.surface.clear(CLEAR_COLOR);
        pass.calls += 1;

        if let (Some(rect), Some(image)) = (geometry.background, media.background) {
            pass.surface.draw_image(image, rect);
            pass.calls += 1;
        }
        if let (Some(rect), Some(image)) = (geometry.logo, media.logo) {
            pass.surface.draw_image(image, rect);
            pass.calls += 1;
        }

        if let Some(timer) = &geometry.timer {
            pass.panel(timer.panel);
            pass.text(&timer.text);
        }

        for team in &geometry.teams {
            pass.text(&team.name);
            pass.panel(team.score_panel);
            pass.text(&team.score);
            if let Some(row) = &team.fouls {
                pass.fouls(row);
            }
        }

        let calls = pass.calls;
        self.stats.frames += 1;
        self.stats.last_frame_time = start.elapsed();
        self.stats.last_draw_calls = calls;
        emit_log(
            LogLevel::Debug,
            &format!("render {}x{}: {calls} draw calls", geometry.width, geometry.height),
        );
    }
}

struct Pass<'a> {
    surface: &'a mut dyn Surface,
    style: &'a StyleModel,
    calls: usize,
}

impl Pass<'_> {
    fn panel(&mut self, rect: RectF) {
        self.surface
            .fill_rounded_rect(rect, self.style.corner_radius, self.style.box_color);
        self.calls += 1;
    }

    fn fouls(&mut self, row: &FoulRow) {
        self.panel(row.panel);
        for dot in &row.dots {
            let color = if dot.active {
                self.style.foul_color
            } else {
                Rgba::INACTIVE_DOT
            };
            self.surface.fill_circle(dot.cx, dot.cy, dot.radius, color);
            self.calls += 1;
        }
    }

    fn text(&mut self, run: &TextRun) {
        if !(run.size > 0.0) || run.text.is_empty() {
            return;
        }
        let (font, color, outline) = match run.kind {
            TextKind::Name => (
                self.style.name_font.as_str(),
                self.style.name_color,
                self.style.is_visible(Visibility::OUTLINE),
            ),
            TextKind::Score => (self.style.score_font.as_str(), self.style.score_color, false),
            TextKind::Timer => (self.style.score_font.as_str(), Rgba::WHITE, false),
        };

        let lines = match run.max_width {
            Some(max_width) => {
                let surface = &*self.surface;
                wrap_text(&run.text, max_width, |s| surface.measure_text(font, run.size, s))
            }
            None => vec![run.text.clone()],
        };

        let line_h = self.surface.line_height(font, run.size);
        let first_y = (lines.len() as f32 - 1.0).mul_add(-line_h / 2.0, run.y);

        for (i, line) in lines.iter().enumerate() {
            let cy = (i as f32).mul_add(line_h, first_y);
            if outline {
                for (dx, dy) in OUTLINE_DIRECTIONS {
                    self.surface.draw_text_line(
                        font,
                        run.size,
                        line,
                        dx.mul_add(OUTLINE_OFFSET, run.x),
                        dy.mul_add(OUTLINE_OFFSET, cy),
                        OUTLINE_COLOR,
                    );
                }
                self.calls += OUTLINE_DIRECTIONS.len();
            }
            self.surface
                .draw_text_line(font, run.size, line, run.x, cy, color);
            self.calls += 1;
        }
    }
}

/// Greedy word wrap.
///
/// Words are separated by whitespace and joined with single spaces; explicit
/// newlines always break. A word wider than `max_width` on its own is split
/// between grapheme clusters. Returns at least one line for non-empty input.
pub fn wrap_text(text: &str, max_width: f32, measure: impl Fn(&str) -> f32) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.lines() {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{current} {word}")
            };
            if measure(&candidate) <= max_width {
                current = candidate;
                continue;
            }
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            if measure(word) <= max_width {
                current = word.to_string();
            } else {
                let mut pieces = split_graphemes(word, max_width, &measure);
                current = pieces.pop().unwrap_or_default();
                lines.extend(pieces);
            }
        }
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

fn split_graphemes(word: &str, max_width: f32, measure: &impl Fn(&str) -> f32) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut current = String::new();
    for grapheme in word.graphemes(true) {
        let mut candidate = current.clone();
        candidate.push_str(grapheme);
        if !current.is_empty() && measure(&candidate) > max_width {
            pieces.push(std::mem::replace(&mut current, grapheme.to_string()));
        } else {
            current = candidate;
        }
    }
    pieces.push(current);
    pieces
}
