//! Style Model: the declarative parameters that drive layout and appearance.
//!
//! - [`StyleModel`]: scales, offsets, fonts, colors, corner radius and
//!   visibility flags, with the show's defaults
//! - [`StyleParam`]: the numeric parameters, each with a documented range
//! - [`StyleChange`]: one edit, as produced by a slider, picker or toggle
//! - [`Visibility`]: bitflags for the timer, foul row and text outline
//!
//! Values are stored as given. Ranges document what the editing widgets
//! offer; the layout engine tolerates anything finite outside of them.

use crate::color::Rgba;
use bitflags::bitflags;
use std::ops::RangeInclusive;

bitflags! {
    /// Optional elements of the display.
    #[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
    pub struct Visibility: u8 {
        /// Countdown box and digits.
        const TIMER   = 0x01;
        /// Foul box and dots under each score.
        const FOULS   = 0x02;
        /// Dark outline behind team names.
        const OUTLINE = 0x04;
    }
}

impl Default for Visibility {
    fn default() -> Self {
        Self::all()
    }
}

/// Vertical base position of the countdown.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum TimerAnchor {
    /// Centered at 15% of the surface height.
    Top,
    /// Centered at 85% of the surface height.
    #[default]
    Bottom,
}

impl TimerAnchor {
    /// Base vertical center as a fraction of the surface height.
    #[must_use]
    pub const fn base_fraction(self) -> f32 {
        match self {
            Self::Top => 0.15,
            Self::Bottom => 0.85,
        }
    }

    /// The other anchor.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Bottom => Self::Top,
        }
    }
}

/// Numeric style parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StyleParam {
    GlobalScale,
    NameScale,
    OffsetGlobalY,
    OffsetNames,
    OffsetScores,
    OffsetTimer,
    OffsetX,
    LogoScale,
    LogoOffsetY,
    BoxPadding,
    CornerRadius,
}

impl StyleParam {
    /// Every parameter, in editor order.
    pub const ALL: [Self; 11] = [
        Self::OffsetGlobalY,
        Self::OffsetNames,
        Self::OffsetScores,
        Self::OffsetTimer,
        Self::OffsetX,
        Self::NameScale,
        Self::GlobalScale,
        Self::BoxPadding,
        Self::LogoScale,
        Self::LogoOffsetY,
        Self::CornerRadius,
    ];

    /// Range offered by the editing widget.
    #[must_use]
    pub fn range(self) -> RangeInclusive<f32> {
        match self {
            Self::GlobalScale | Self::BoxPadding => 0.5..=2.0,
            Self::NameScale => 0.5..=3.0,
            Self::OffsetGlobalY | Self::OffsetTimer | Self::OffsetX | Self::LogoOffsetY => {
                -0.5..=0.5
            }
            Self::OffsetNames | Self::OffsetScores => -0.2..=0.2,
            Self::LogoScale => 0.1..=2.0,
            Self::CornerRadius => 0.0..=100.0,
        }
    }

    /// Slider step.
    #[must_use]
    pub const fn step(self) -> f32 {
        match self {
            Self::GlobalScale | Self::NameScale | Self::BoxPadding | Self::LogoScale => 0.1,
            Self::CornerRadius => 1.0,
            _ => 0.01,
        }
    }
}

/// Which text/box color a picker edits.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ColorRole {
    Names,
    Scores,
    Fouls,
    Box,
}

/// A single edit to the style model.
#[derive(Clone, Debug, PartialEq)]
pub enum StyleChange {
    Param(StyleParam, f32),
    NameFont(String),
    ScoreFont(String),
    Color(ColorRole, Rgba),
    TimerAnchor(TimerAnchor),
    Visible(Visibility, bool),
}

/// Typography, color, scale and offset parameters for the display.
#[derive(Clone, Debug, PartialEq)]
pub struct StyleModel {
    pub global_scale: f32,
    pub name_scale: f32,
    pub offset_global_y: f32,
    pub offset_names: f32,
    pub offset_scores: f32,
    pub offset_timer: f32,
    pub offset_x: f32,
    pub logo_scale: f32,
    pub logo_offset_y: f32,
    pub name_font: String,
    pub score_font: String,
    pub name_color: Rgba,
    pub score_color: Rgba,
    pub foul_color: Rgba,
    pub box_color: Rgba,
    pub box_padding: f32,
    /// Corner radius in pixels.
    pub corner_radius: f32,
    pub timer_anchor: TimerAnchor,
    pub visibility: Visibility,
}

impl Default for StyleModel {
    fn default() -> Self {
        Self {
            global_scale: 1.0,
            name_scale: 1.0,
            offset_global_y: 0.0,
            offset_names: 0.0,
            offset_scores: 0.0,
            offset_timer: 0.0,
            offset_x: 0.0,
            logo_scale: 0.5,
            logo_offset_y: -0.4,
            name_font: "Arial".to_string(),
            score_font: "Impact".to_string(),
            name_color: Rgba::WHITE,
            score_color: Rgba::SCORE_YELLOW,
            foul_color: Rgba::RED,
            box_color: Rgba::BLACK,
            box_padding: 1.0,
            corner_radius: 20.0,
            timer_anchor: TimerAnchor::Bottom,
            visibility: Visibility::all(),
        }
    }
}

impl StyleModel {
    /// Create the default style.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a numeric parameter.
    #[must_use]
    pub fn param(&self, param: StyleParam) -> f32 {
        match param {
            StyleParam::GlobalScale => self.global_scale,
            StyleParam::NameScale => self.name_scale,
            StyleParam::OffsetGlobalY => self.offset_global_y,
            StyleParam::OffsetNames => self.offset_names,
            StyleParam::OffsetScores => self.offset_scores,
            StyleParam::OffsetTimer => self.offset_timer,
            StyleParam::OffsetX => self.offset_x,
            StyleParam::LogoScale => self.logo_scale,
            StyleParam::LogoOffsetY => self.logo_offset_y,
            StyleParam::BoxPadding => self.box_padding,
            StyleParam::CornerRadius => self.corner_radius,
        }
    }

    fn param_mut(&mut self, param: StyleParam) -> &mut f32 {
        match param {
            StyleParam::GlobalScale => &mut self.global_scale,
            StyleParam::NameScale => &mut self.name_scale,
            StyleParam::OffsetGlobalY => &mut self.offset_global_y,
            StyleParam::OffsetNames => &mut self.offset_names,
            StyleParam::OffsetScores => &mut self.offset_scores,
            StyleParam::OffsetTimer => &mut self.offset_timer,
            StyleParam::OffsetX => &mut self.offset_x,
            StyleParam::LogoScale => &mut self.logo_scale,
            StyleParam::LogoOffsetY => &mut self.logo_offset_y,
            StyleParam::BoxPadding => &mut self.box_padding,
            StyleParam::CornerRadius => &mut self.corner_radius,
        }
    }

    /// Store a numeric parameter as given.
    ///
    /// Out-of-range values are kept; non-finite values are refused. Returns
    /// `true` when the stored value changed.
    pub fn set_param(&mut self, param: StyleParam, value: f32) -> bool {
        if !value.is_finite() {
            return false;
        }
        let slot = self.param_mut(param);
        if slot.to_bits() == value.to_bits() {
            return false;
        }
        *slot = value;
        true
    }

    /// Current color for a role.
    #[must_use]
    pub const fn color(&self, role: ColorRole) -> Rgba {
        match role {
            ColorRole::Names => self.name_color,
            ColorRole::Scores => self.score_color,
            ColorRole::Fouls => self.foul_color,
            ColorRole::Box => self.box_color,
        }
    }

    /// Whether an optional element is shown.
    #[must_use]
    pub const fn is_visible(&self, flag: Visibility) -> bool {
        self.visibility.contains(flag)
    }

    /// Apply one edit. Returns `true` when anything changed.
    pub fn apply(&mut self, change: StyleChange) -> bool {
        match change {
            StyleChange::Param(param, value) => self.set_param(param, value),
            StyleChange::NameFont(family) => replace_if_changed(&mut self.name_font, family),
            StyleChange::ScoreFont(family) => replace_if_changed(&mut self.score_font, family),
            StyleChange::Color(role, color) => {
                let slot = match role {
                    ColorRole::Names => &mut self.name_color,
                    ColorRole::Scores => &mut self.score_color,
                    ColorRole::Fouls => &mut self.foul_color,
                    ColorRole::Box => &mut self.box_color,
                };
                replace_if_changed(slot, color)
            }
            StyleChange::TimerAnchor(anchor) => replace_if_changed(&mut self.timer_anchor, anchor),
            StyleChange::Visible(flag, on) => {
                let before = self.visibility;
                self.visibility.set(flag, on);
                before != self.visibility
            }
        }
    }
}

fn replace_if_changed<T: PartialEq>(slot: &mut T, value: T) -> bool {
    if *slot == value {
        return false;
    }
    *slot = value;
    true
}
