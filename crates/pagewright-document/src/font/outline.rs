// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Outline (TrueType/OpenType) font face backed by `ab_glyph`, drawn through
// `imageproc`.

use std::path::Path;

use ab_glyph::{Font, FontVec, GlyphId, PxScale, ScaleFont, point};
use image::{Rgba, RgbaImage};
use imageproc::drawing::draw_text_mut;
use pagewright_core::error::FontError;
use tracing::instrument;

use super::{TextBounds, TextFace, TextMeasure};

/// A scalable font at a fixed pixel size.
pub struct OutlineFace {
    font: FontVec,
    scale: PxScale,
}

impl OutlineFace {
    /// Load a font file. Collections (`.ttc`) use their first face.
    #[instrument(skip(path), fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>, size_px: u32) -> Result<Self, FontError> {
        let path = path.as_ref();
        let data = std::fs::read(path).map_err(|source| FontError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_vec(data, size_px).ok_or_else(|| FontError::Parse {
            path: path.to_path_buf(),
        })
    }

    /// Parse an in-memory font. Returns `None` for data that is not a font.
    pub fn from_vec(data: Vec<u8>, size_px: u32) -> Option<Self> {
        let font = FontVec::try_from_vec_and_index(data, 0).ok()?;
        Some(Self {
            font,
            scale: PxScale::from(size_px as f32),
        })
    }

    /// Glyph ids of `text` together with the pen position of each glyph.
    fn layout(&self, text: &str) -> (Vec<(GlyphId, f32)>, f32) {
        let scaled = self.font.as_scaled(self.scale);
        let mut caret = 0.0f32;
        let mut prev: Option<GlyphId> = None;
        let mut glyphs = Vec::with_capacity(text.len());
        for ch in text.chars() {
            let id = scaled.glyph_id(ch);
            if let Some(prev) = prev {
                caret += scaled.kern(prev, id);
            }
            glyphs.push((id, caret));
            caret += scaled.h_advance(id);
            prev = Some(id);
        }
        (glyphs, caret)
    }
}

impl TextMeasure for OutlineFace {
    fn measure(&self, text: &str) -> f32 {
        self.layout(text).1
    }

    /// Kerned pen positions from the same layout `measure` uses.
    fn carets(&self, text: &str) -> Vec<f32> {
        self.layout(text).0.into_iter().map(|(_, x)| x).collect()
    }
}

impl TextFace for OutlineFace {
    fn bbox(&self, text: &str) -> TextBounds {
        let ascent = self.font.as_scaled(self.scale).ascent();
        let (glyphs, advance) = self.layout(text);

        let mut ink: Option<(f32, f32, f32, f32)> = None;
        for (id, x) in glyphs {
            let glyph = id.with_scale_and_position(self.scale, point(x, ascent));
            if let Some(outlined) = self.font.outline_glyph(glyph) {
                let b = outlined.px_bounds();
                ink = Some(match ink {
                    None => (b.min.x, b.min.y, b.max.x, b.max.y),
                    Some((x0, y0, x1, y1)) => {
                        (x0.min(b.min.x), y0.min(b.min.y), x1.max(b.max.x), y1.max(b.max.y))
                    }
                });
            }
        }

        match ink {
            Some((x0, y0, x1, y1)) => TextBounds {
                x0: x0.min(0.0).floor() as i32,
                y0: y0.floor() as i32,
                x1: x1.max(advance).ceil() as i32,
                y1: y1.ceil() as i32,
            },
            None => TextBounds {
                x0: 0,
                y0: 0,
                x1: advance.ceil() as i32,
                y1: 0,
            },
        }
    }

    fn draw(&self, canvas: &mut RgbaImage, x: i32, y: i32, text: &str, color: Rgba<u8>) {
        draw_text_mut(canvas, color, x, y, self.scale, &self.font, text);
    }
}
