// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Font faces — glyph measurement and text drawing onto RGBA canvases.
//
// Layout only needs `TextMeasure`; rendering needs the full `TextFace`. Two
// faces exist: an outline font loaded from disk and the built-in bitmap face
// used whenever the outline font is missing or unreadable.

pub mod builtin;
pub mod outline;

use std::path::Path;

use image::{Rgba, RgbaImage};
use tracing::{debug, info, warn};

pub use builtin::BuiltinFace;
pub use outline::OutlineFace;

/// Width oracle used by the line wrapper.
pub trait TextMeasure {
    /// Advance width of `text` in pixels, without any extra letter spacing.
    fn measure(&self, text: &str) -> f32;

    /// Pen offset of every character of `text` from its start, without
    /// letter spacing. The last offset plus the last character's advance is
    /// `measure(text)`, so drawing at these offsets covers exactly the
    /// measured width.
    ///
    /// The default assumes widths add up character by character; faces with
    /// kerning override it.
    fn carets(&self, text: &str) -> Vec<f32> {
        let mut buf = [0u8; 4];
        let mut x = 0.0;
        text.chars()
            .map(|ch| {
                let at = x;
                x += self.measure(ch.encode_utf8(&mut buf));
                at
            })
            .collect()
    }
}

/// Ink bounds of a run of text drawn at the origin, in pixels.
///
/// The origin is the top-left drawing anchor (left edge, ascender line).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextBounds {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl TextBounds {
    pub fn width(&self) -> u32 {
        (self.x1 - self.x0).max(0) as u32
    }

    pub fn height(&self) -> u32 {
        (self.y1 - self.y0).max(0) as u32
    }
}

/// A face that can measure, bound and draw text.
pub trait TextFace: TextMeasure {
    fn bbox(&self, text: &str) -> TextBounds;

    /// Draw `text` with its top-left anchor at `(x, y)`, blending `color`
    /// over the existing pixels.
    fn draw(&self, canvas: &mut RgbaImage, x: i32, y: i32, text: &str, color: Rgba<u8>);
}

/// The face actually used for a run: an outline font, or the built-in
/// fallback.
pub enum FontFace {
    Outline(OutlineFace),
    Builtin(BuiltinFace),
}

impl FontFace {
    /// Load the font at `path` sized to `size_px`.
    ///
    /// A missing or unreadable font is not fatal: the built-in face is
    /// substituted and a warning logged. `None` selects the built-in face
    /// directly.
    pub fn load(path: Option<&Path>, size_px: u32) -> Self {
        let Some(path) = path else {
            debug!(size_px, "No font configured; using built-in face");
            return Self::Builtin(BuiltinFace::for_size(size_px));
        };
        match OutlineFace::open(path, size_px) {
            Ok(face) => {
                info!(path = %path.display(), size_px, "Font loaded");
                Self::Outline(face)
            }
            Err(err) => {
                warn!(error = %err, size_px, "Font unavailable; falling back to built-in face");
                Self::Builtin(BuiltinFace::for_size(size_px))
            }
        }
    }

    pub fn is_builtin(&self) -> bool {
        matches!(self, Self::Builtin(_))
    }
}

impl TextMeasure for FontFace {
    fn measure(&self, text: &str) -> f32 {
        match self {
            Self::Outline(face) => face.measure(text),
            Self::Builtin(face) => face.measure(text),
        }
    }

    fn carets(&self, text: &str) -> Vec<f32> {
        match self {
            Self::Outline(face) => face.carets(text),
            Self::Builtin(face) => face.carets(text),
        }
    }
}

impl TextFace for FontFace {
    fn bbox(&self, text: &str) -> TextBounds {
        match self {
            Self::Outline(face) => face.bbox(text),
            Self::Builtin(face) => face.bbox(text),
        }
    }

    fn draw(&self, canvas: &mut RgbaImage, x: i32, y: i32, text: &str, color: Rgba<u8>) {
        match self {
            Self::Outline(face) => face.draw(canvas, x, y, text, color),
            Self::Builtin(face) => face.draw(canvas, x, y, text, color),
        }
    }
}
