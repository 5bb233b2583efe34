// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Built-in fallback face: an `embedded-graphics` ASCII mono font drawn onto
// an RGBA canvas. Needs no font file, so it is always available.

use embedded_graphics::Pixel;
use embedded_graphics::mono_font::ascii::{FONT_6X10, FONT_7X13, FONT_9X18, FONT_10X20};
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::pixelcolor::BinaryColor;
use embedded_graphics::prelude::{DrawTarget, OriginDimensions, Point, Size};
use embedded_graphics::text::{Baseline, Text};
use embedded_graphics::Drawable;
use image::{Pixel as _, Rgba, RgbaImage};

use super::{TextBounds, TextFace, TextMeasure};

/// Fixed-advance bitmap face. Characters outside ASCII draw as the font's
/// replacement glyph and keep the same advance.
#[derive(Clone, Copy)]
pub struct BuiltinFace {
    font: &'static MonoFont<'static>,
}

impl BuiltinFace {
    /// Pick the bitmap font closest to the requested pixel size.
    pub fn for_size(size_px: u32) -> Self {
        let font = match size_px {
            0..14 => &FONT_6X10,
            14..20 => &FONT_7X13,
            20..28 => &FONT_9X18,
            _ => &FONT_10X20,
        };
        Self { font }
    }

    /// Horizontal advance of one character.
    pub fn char_width(&self) -> u32 {
        self.font.character_size.width
    }

    pub fn char_height(&self) -> u32 {
        self.font.character_size.height
    }
}

impl std::fmt::Debug for BuiltinFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BuiltinFace")
            .field("char_width", &self.char_width())
            .field("char_height", &self.char_height())
            .finish()
    }
}

impl TextMeasure for BuiltinFace {
    fn measure(&self, text: &str) -> f32 {
        let n = text.chars().count() as u32;
        let gaps = n.saturating_sub(1) * self.font.character_spacing;
        (n * self.char_width() + gaps) as f32
    }

    fn carets(&self, text: &str) -> Vec<f32> {
        let pitch = self.char_width() + self.font.character_spacing;
        (0..text.chars().count() as u32).map(|i| (i * pitch) as f32).collect()
    }
}

impl TextFace for BuiltinFace {
    fn bbox(&self, text: &str) -> TextBounds {
        TextBounds {
            x0: 0,
            y0: 0,
            x1: self.measure(text) as i32,
            y1: if text.is_empty() { 0 } else { self.char_height() as i32 },
        }
    }

    fn draw(&self, canvas: &mut RgbaImage, x: i32, y: i32, text: &str, color: Rgba<u8>) {
        let style = MonoTextStyle::new(self.font, BinaryColor::On);
        let mut target = Stencil { canvas, color };
        let _ = Text::with_baseline(text, Point::new(x, y), style, Baseline::Top).draw(&mut target);
    }
}

/// Adapts an RGBA canvas to a binary `DrawTarget`: lit pixels are blended
/// with a fixed colour, unlit pixels are left alone.
struct Stencil<'a> {
    canvas: &'a mut RgbaImage,
    color: Rgba<u8>,
}

impl OriginDimensions for Stencil<'_> {
    fn size(&self) -> Size {
        Size::new(self.canvas.width(), self.canvas.height())
    }
}

impl DrawTarget for Stencil<'_> {
    type Color = BinaryColor;
    type Error = core::convert::Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        let (width, height) = self.canvas.dimensions();
        for Pixel(point, color) in pixels {
            if color.is_off() || point.x < 0 || point.y < 0 {
                continue;
            }
            if point.x as u32 >= width || point.y as u32 >= height {
                continue;
            }
            self.canvas
                .get_pixel_mut(point.x as u32, point.y as u32)
                .blend(&self.color);
        }
        Ok(())
    }
}
