//! Layout Engine: match state + style model → absolute pixel geometry.
//!
//! [`compute_layout`] is a pure function. Every coordinate is derived from
//! the surface size, so the board looks the same at any resolution, and the
//! whole set is rebuilt on each call because any single style parameter can
//! move every element.
//!
//! # Examples
//!
//! ```
//! use impro_scoreboard::layout::{MediaInfo, compute_layout};
//! use impro_scoreboard::{MatchState, StyleModel};
//!
//! let state = MatchState::new();
//! let style = StyleModel::default();
//! let geometry = compute_layout(1920, 1080, &state, &style, MediaInfo::default());
//! assert_eq!(geometry.teams.len(), 3);
//! assert_eq!(geometry.timer.as_ref().unwrap().text.text, "04:00");
//! ```

use crate::state::{MAX_FOULS, MatchState};
use crate::style::{StyleModel, Visibility};

/// Axis-aligned rectangle in surface pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct RectF {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl RectF {
    /// Create a rectangle from its top-left corner and size.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle of the given size centered on `(cx, cy)`.
    #[must_use]
    pub fn centered(cx: f32, cy: f32, width: f32, height: f32) -> Self {
        Self::new(cx - width / 2.0, cy - height / 2.0, width, height)
    }

    /// Center point.
    #[must_use]
    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// True when the rectangle covers no area.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        !(self.width > 0.0 && self.height > 0.0)
    }

    /// Check if a point is inside this rectangle.
    #[must_use]
    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && py >= self.y && px < self.right() && py < self.bottom()
    }
}

/// What a piece of text is; the renderer maps this to font, color and outline.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextKind {
    /// Team name: names font and color, wrapped and optionally outlined.
    Name,
    /// Score digits: score font and color.
    Score,
    /// Countdown digits: score font, white.
    Timer,
}

/// Text centered on an anchor point.
#[derive(Clone, Debug, PartialEq)]
pub struct TextRun {
    pub kind: TextKind,
    pub text: String,
    pub x: f32,
    pub y: f32,
    /// Pixel size (whole pixels).
    pub size: f32,
    /// Wrap width, if the text may span several lines.
    pub max_width: Option<f32>,
}

/// Countdown box and digits.
#[derive(Clone, Debug, PartialEq)]
pub struct TimerGeometry {
    pub panel: RectF,
    pub text: TextRun,
}

/// One foul indicator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FoulDot {
    pub cx: f32,
    pub cy: f32,
    pub radius: f32,
    pub active: bool,
}

/// Foul box with its three dots.
#[derive(Clone, Debug, PartialEq)]
pub struct FoulRow {
    pub panel: RectF,
    pub dots: [FoulDot; MAX_FOULS as usize],
}

impl FoulRow {
    /// Number of lit dots.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.dots.iter().filter(|dot| dot.active).count()
    }
}

/// Everything drawn for one team.
#[derive(Clone, Debug, PartialEq)]
pub struct TeamGeometry {
    pub index: usize,
    pub column: RectF,
    pub name: TextRun,
    pub score_panel: RectF,
    pub score: TextRun,
    pub fouls: Option<FoulRow>,
}

/// Intrinsic pixel sizes of the loaded images, if any.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MediaInfo {
    pub background: Option<(u32, u32)>,
    pub logo: Option<(u32, u32)>,
}

/// Absolute placement of every element for one frame.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GeometrySet {
    pub width: u32,
    pub height: u32,
    pub background: Option<RectF>,
    pub logo: Option<RectF>,
    pub timer: Option<TimerGeometry>,
    pub teams: Vec<TeamGeometry>,
}

/// Fraction of the column width a name may use before wrapping.
pub const NAME_WRAP_FRACTION: f32 = 0.9;

/// Compute the geometry of every visual element.
#[must_use]
pub fn compute_layout(
    width: u32,
    height: u32,
    state: &MatchState,
    style: &StyleModel,
    media: MediaInfo,
) -> GeometrySet {
    let w = width as f32;
    let h = height as f32;
    let scale = style.global_scale;

    // Point-size fonts only come in whole pixels.
    let base_font = (h * 0.05 * scale).trunc();
    let center_x = w.mul_add(style.offset_x, w * 0.5);
    let teams_y = h.mul_add(style.offset_global_y, h * 0.5);
    let timer_y = h.mul_add(style.offset_timer, h * style.timer_anchor.base_fraction());

    let background = media.background.map(|_| RectF::new(0.0, 0.0, w, h));
    let logo = media.logo.and_then(|dims| logo_rect(w, h, style, dims));

    let timer = style.is_visible(Visibility::TIMER).then(|| TimerGeometry {
        panel: RectF::centered(
            center_x,
            timer_y,
            w * 0.25 * scale * style.box_padding,
            h * 0.15 * scale * style.box_padding,
        ),
        text: TextRun {
            kind: TextKind::Timer,
            text: state.timer_text(),
            x: center_x,
            y: timer_y,
            size: (base_font * 2.5).trunc(),
            max_width: None,
        },
    });

    let teams = team_geometry(w, h, base_font, teams_y, state, style);

    GeometrySet {
        width,
        height,
        background,
        logo,
        timer,
        teams,
    }
}

fn logo_rect(w: f32, h: f32, style: &StyleModel, (src_w, src_h): (u32, u32)) -> Option<RectF> {
    if src_w == 0 || src_h == 0 {
        return None;
    }
    let aspect = src_w as f32 / src_h as f32;
    let target_h = h * 0.2 * style.logo_scale;
    let logo_w = (target_h * aspect).trunc();
    let logo_h = target_h.trunc();
    Some(RectF::centered(
        w * 0.5,
        h.mul_add(style.logo_offset_y, h * 0.5),
        logo_w,
        logo_h,
    ))
}

fn team_geometry(
    w: f32,
    h: f32,
    base_font: f32,
    teams_y: f32,
    state: &MatchState,
    style: &StyleModel,
) -> Vec<TeamGeometry> {
    let teams = state.teams();
    if teams.is_empty() {
        return Vec::new();
    }

    let column_w = w / teams.len() as f32;
    let shift_x = w * style.offset_x;
    let name_y = h.mul_add(style.offset_names, h.mul_add(-0.12, teams_y));
    let score_y = h.mul_add(style.offset_scores, h.mul_add(0.02, teams_y));
    let panel_w = h * 0.2 * style.global_scale * style.box_padding;
    let panel_h = panel_w * 0.8;
    let show_fouls = style.is_visible(Visibility::FOULS);

    teams
        .iter()
        .enumerate()
        .map(|(index, team)| {
            let column_x = (index as f32).mul_add(column_w, shift_x);
            let x = column_x + column_w / 2.0;
            TeamGeometry {
                index,
                column: RectF::new(column_x, 0.0, column_w, h),
                name: TextRun {
                    kind: TextKind::Name,
                    text: team.name.clone(),
                    x,
                    y: name_y,
                    size: (base_font * style.name_scale).trunc(),
                    max_width: Some(column_w * NAME_WRAP_FRACTION),
                },
                score_panel: RectF::centered(x, score_y, panel_w, panel_h),
                score: TextRun {
                    kind: TextKind::Score,
                    text: team.score.to_string(),
                    x,
                    y: score_y,
                    size: (base_font * 3.0).trunc(),
                    max_width: None,
                },
                fouls: show_fouls.then(|| foul_row(x, h.mul_add(0.16, score_y), panel_w, panel_h, team.fouls)),
            }
        })
        .collect()
}

fn foul_row(x: f32, y: f32, panel_w: f32, panel_h: f32, fouls: u8) -> FoulRow {
    let box_h = panel_h * 0.4;
    let radius = box_h * 0.3;
    let gap = radius * 0.5;
    let slots = f32::from(MAX_FOULS);
    let group_w = (radius * 2.0).mul_add(slots, gap * (slots - 1.0));
    let first_x = x - group_w / 2.0 + radius;

    FoulRow {
        panel: RectF::centered(x, y, panel_w, box_h),
        dots: std::array::from_fn(|k| FoulDot {
            cx: (k as f32).mul_add(radius.mul_add(2.0, gap), first_x),
            cy: y,
            radius,
            active: k < usize::from(fouls),
        }),
    }
}
