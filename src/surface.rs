//! Drawing surface abstraction.
//!
//! The [`Renderer`](crate::render::Renderer) only talks to a [`Surface`]. The
//! crate ships two: [`PixelCanvas`](crate::canvas::PixelCanvas), a software
//! RGBA framebuffer, and [`RecordingSurface`], which keeps a display list
//! and needs no fonts or pixels (useful for tests and headless checks).

use crate::assets::RasterImage;
use crate::color::Rgba;
use crate::layout::RectF;

/// Primitive drawing operations used by the renderer.
pub trait Surface {
    /// Current size in pixels.
    fn size(&self) -> (u32, u32);

    /// Fill the whole surface.
    fn clear(&mut self, color: Rgba);

    /// Fill a rectangle with rounded corners of `radius` pixels.
    fn fill_rounded_rect(&mut self, rect: RectF, radius: f32, color: Rgba);

    /// Fill a circle.
    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Rgba);

    /// Draw `image` scaled to exactly cover `dest`.
    fn draw_image(&mut self, image: &RasterImage, dest: RectF);

    /// Advance width of `text` in pixels.
    fn measure_text(&self, font: &str, size: f32, text: &str) -> f32;

    /// Distance between consecutive baselines.
    fn line_height(&self, font: &str, size: f32) -> f32;

    /// Draw one line of text centered on `(cx, cy)`.
    fn draw_text_line(&mut self, font: &str, size: f32, text: &str, cx: f32, cy: f32, color: Rgba);
}

/// A recorded drawing operation.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    Clear(Rgba),
    RoundedRect {
        rect: RectF,
        radius: f32,
        color: Rgba,
    },
    Circle {
        cx: f32,
        cy: f32,
        radius: f32,
        color: Rgba,
    },
    Image {
        size: (u32, u32),
        dest: RectF,
    },
    Text {
        font: String,
        size: f32,
        text: String,
        cx: f32,
        cy: f32,
        color: Rgba,
    },
}

/// Surface that records commands instead of rasterizing.
///
/// Text metrics are synthetic: every character advances `0.6 * size` and
/// lines are `1.2 * size` apart.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    width: u32,
    height: u32,
    commands: Vec<DrawCommand>,
}

impl RecordingSurface {
    /// Character advance as a fraction of the font size.
    pub const ADVANCE: f32 = 0.6;
    /// Line spacing as a fraction of the font size.
    pub const LINE_SPACING: f32 = 1.2;

    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            commands: Vec::new(),
        }
    }

    /// Commands recorded since the last [`clear`](Surface::clear).
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Text commands whose string equals `text`.
    pub fn texts<'a>(&'a self, text: &'a str) -> impl Iterator<Item = &'a DrawCommand> + 'a {
        self.commands
            .iter()
            .filter(move |cmd| matches!(cmd, DrawCommand::Text { text: t, .. } if t == text))
    }

    /// Change the reported size, as a window resize would.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }
}

impl Surface for RecordingSurface {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn clear(&mut self, color: Rgba) {
        self.commands.clear();
        self.commands.push(DrawCommand::Clear(color));
    }

    fn fill_rounded_rect(&mut self, rect: RectF, radius: f32, color: Rgba) {
        self.commands.push(DrawCommand::RoundedRect {
            rect,
            radius,
            color,
        });
    }

    fn fill_circle(&mut self, cx: f32, cy: f32, radius: f32, color: Rgba) {
        self.commands.push(DrawCommand::Circle {
            cx,
            cy,
            radius,
            color,
        });
    }

    fn draw_image(&mut self, image: &RasterImage, dest: RectF) {
        self.commands.push(DrawCommand::Image {
            size: image.size(),
            dest,
        });
    }

    fn measure_text(&self, _font: &str, size: f32, text: &str) -> f32 {
        text.chars().count() as f32 * size * Self::ADVANCE
    }

    fn line_height(&self, _font: &str, size: f32) -> f32 {
        size * Self::LINE_SPACING
    }

    fn draw_text_line(&mut self, font: &str, size: f32, text: &str, cx: f32, cy: f32, color: Rgba) {
        self.commands.push(DrawCommand::Text {
            font: font.to_string(),
            size,
            text: text.to_string(),
            cx,
            cy,
            color,
        });
    }
}
