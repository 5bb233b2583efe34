// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Page composition — solid-background text pages, photo-background sentence
// cards, and the tiled watermark shared by text pages.

pub mod card;
pub mod page;
pub mod watermark;

use image::{Rgba, RgbaImage};
use pagewright_core::{Color, PageSize};

pub use card::{load_background, render_card_page};
pub use page::render_page;
pub use watermark::{Watermark, apply_watermark};

/// Convert a configured colour into an `image` pixel.
pub fn rgba(color: Color) -> Rgba<u8> {
    Rgba(color.to_array())
}

/// A page-sized canvas filled with one colour.
pub fn solid_canvas(size: PageSize, color: Color) -> RgbaImage {
    RgbaImage::from_pixel(size.width, size.height, rgba(color))
}
