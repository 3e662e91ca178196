//! Font registry and glyph metrics backed by `rusttype`.

use std::collections::HashMap;
use std::path::Path;

use rusttype::{Font, PositionedGlyph, Scale, point};

use crate::error::{Error, Result};
use crate::event::{LogLevel, emit_log};

/// Fonts used when no file was configured, tried in order.
pub const SYSTEM_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans-Bold.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Bold.ttf",
    "/Library/Fonts/Arial.ttf",
    "/System/Library/Fonts/Supplemental/Arial Bold.ttf",
    "C:\\Windows\\Fonts\\arialbd.ttf",
    "C:\\Windows\\Fonts\\impact.ttf",
];

/// Family name → parsed font, with one fallback for unknown families.
#[derive(Default)]
pub struct FontBook {
    families: HashMap<String, Font<'static>>,
    fallback: Option<Font<'static>>,
}

impl std::fmt::Debug for FontBook {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontBook")
            .field("families", &self.families.keys().collect::<Vec<_>>())
            .field("fallback", &self.fallback.is_some())
            .finish()
    }
}

impl FontBook {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register font bytes under `family`. The first font registered also
    /// becomes the fallback.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Font`] when the bytes are not a TrueType/OpenType font.
    pub fn insert_bytes(&mut self, family: impl Into<String>, bytes: Vec<u8>) -> Result<()> {
        let family = family.into();
        let font = Font::try_from_vec(bytes).ok_or_else(|| Error::Font(format!("{family}: unreadable font data")))?;
        if self.fallback.is_none() {
            self.fallback = Some(font.clone());
        }
        self.families.insert(family, font);
        Ok(())
    }

    /// Read a font file and register it under `family`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the file cannot be read, or [`Error::Font`]
    /// if it does not parse.
    pub fn load(&mut self, family: impl Into<String>, path: &Path) -> Result<()> {
        let bytes = std::fs::read(path)?;
        self.insert_bytes(family, bytes)
    }

    /// Install the first readable system font as the fallback.
    ///
    /// Returns `false` (and logs a warning) when none could be loaded.
    pub fn load_system_fallback(&mut self) -> bool {
        for candidate in SYSTEM_FONT_CANDIDATES {
            let Ok(bytes) = std::fs::read(candidate) else {
                continue;
            };
            if let Some(font) = Font::try_from_vec(bytes) {
                emit_log(LogLevel::Debug, &format!("fallback font: {candidate}"));
                self.fallback = Some(font);
                return true;
            }
        }
        emit_log(LogLevel::Warn, "no usable system font; text will not be drawn");
        false
    }

    /// True when no font at all is available.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fallback.is_none() && self.families.is_empty()
    }

    /// Font for `family`, or the fallback.
    #[must_use]
    pub fn resolve(&self, family: &str) -> Option<&Font<'static>> {
        self.families.get(family).or(self.fallback.as_ref())
    }

    /// Advance width of `text` at pixel `size`; zero without a font.
    #[must_use]
    pub fn measure(&self, family: &str, size: f32, text: &str) -> f32 {
        self.resolve(family)
            .map_or(0.0, |font| advance_width(&layout_line(font, size, text, 0.0, 0.0)))
    }

    /// Baseline-to-baseline distance at pixel `size`.
    #[must_use]
    pub fn line_height(&self, family: &str, size: f32) -> f32 {
        self.resolve(family).map_or(size, |font| {
            let v = font.v_metrics(Scale::uniform(size));
            v.ascent - v.descent + v.line_gap
        })
    }
}

/// Lay out one line with its advance box centered on `(cx, cy)`.
///
/// Vertical centering uses the font's ascent/descent, so digits and capitals
/// line up across runs of different content.
pub(crate) fn layout_centered<'f>(
    font: &'f Font<'static>,
    size: f32,
    text: &str,
    cx: f32,
    cy: f32,
) -> Vec<PositionedGlyph<'f>> {
    let scale = Scale::uniform(size);
    let v = font.v_metrics(scale);
    let baseline = cy + (v.ascent + v.descent) / 2.0;
    let width = advance_width(&layout_line(font, size, text, 0.0, 0.0));
    layout_line(font, size, text, cx - width / 2.0, baseline)
}

fn layout_line<'f>(font: &'f Font<'static>, size: f32, text: &str, x: f32, baseline: f32) -> Vec<PositionedGlyph<'f>> {
    font.layout(text, Scale::uniform(size), point(x, baseline)).collect()
}

fn advance_width(glyphs: &[PositionedGlyph<'_>]) -> f32 {
    match (glyphs.first(), glyphs.last()) {
        (Some(first), Some(last)) => {
            last.position().x - first.position().x + last.unpositioned().h_metrics().advance_width
        }
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_book_measures_zero() {
        let book = FontBook::new();
        assert!(book.is_empty());
        assert!(book.resolve("Arial").is_none());
        assert!(book.measure("Arial", 40.0, "RED").abs() < f32::EPSILON);
        assert!((book.line_height("Arial", 40.0) - 40.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_garbage_bytes_are_rejected() {
        let mut book = FontBook::new();
        let err = book.insert_bytes("Impact", vec![0, 1, 2, 3]).unwrap_err();
        assert!(matches!(err, Error::Font(_)));
        assert!(book.is_empty());
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let mut book = FontBook::new();
        let err = book.load("Impact", Path::new("/definitely/not/here.ttf")).unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
