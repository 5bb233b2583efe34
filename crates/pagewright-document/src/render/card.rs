// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Photo-background card renderer — up to four sentences, each on a rounded
// translucent card, over a background photo cropped to the page.

use std::path::Path;

use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_circle_mut, draw_filled_rect_mut};
use imageproc::rect::Rect;
use pagewright_core::{SentenceChunk, StyleConfig};
use tracing::{debug, instrument, warn};

use super::solid_canvas;
use crate::font::{TextBounds, TextFace};
use crate::image::ImageProcessor;

/// Space between text and card edge (doubled horizontally).
pub const CARD_PADDING: u32 = 20;
/// Corner radius of a card.
pub const CARD_RADIUS: u32 = 50;
/// Vertical distance between consecutive card slots.
pub const CARD_PITCH: u32 = 300;
/// Offset of the first slot below the top margin.
pub const CARD_TOP_OFFSET: u32 = 100;

const CARD_FILL: Rgba<u8> = Rgba([0, 0, 0, 180]);
const CARD_TEXT: Rgba<u8> = Rgba([255, 255, 255, 255]);

/// Placement of one card on the page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CardRect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

impl CardRect {
    /// Card for `slot` (0..4) sized around text with the given bounds.
    pub fn for_slot(slot: usize, text: TextBounds, config: &StyleConfig) -> Self {
        Self {
            x: (config.margins.left / 2) as i32,
            y: (config.margins.top + slot as u32 * CARD_PITCH + CARD_TOP_OFFSET) as i32,
            width: text.width() + 4 * CARD_PADDING,
            height: text.height() + 2 * CARD_PADDING,
        }
    }

    /// Where the sentence text is drawn inside the card.
    pub fn text_origin(&self) -> (i32, i32) {
        (
            self.x + 2 * CARD_PADDING as i32,
            self.y + CARD_PADDING as i32 / 2,
        )
    }
}

/// Open a background and fit it to the page, or fall back to a solid
/// canvas in the background colour.
#[instrument(skip(config), fields(path = %path.display()))]
pub fn load_background(path: &Path, config: &StyleConfig) -> RgbaImage {
    match ImageProcessor::open(path) {
        Ok(processor) => processor
            .cover(config.page_size.width, config.page_size.height)
            .into_rgba8(),
        Err(err) => {
            warn!(error = %err, "Background unusable; using solid canvas");
            solid_canvas(config.page_size, config.bg_color)
        }
    }
}

/// A `width` x `height` layer holding a filled rounded rectangle on a
/// transparent ground.
pub fn rounded_card(width: u32, height: u32, radius: u32, fill: Rgba<u8>) -> RgbaImage {
    let mut layer = RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 0]));
    if width == 0 || height == 0 {
        return layer;
    }
    let r = radius.min(width / 2).min(height / 2);
    if r == 0 {
        draw_filled_rect_mut(&mut layer, Rect::at(0, 0).of_size(width, height), fill);
        return layer;
    }

    if height > 2 * r {
        let band = Rect::at(0, r as i32).of_size(width, height - 2 * r);
        draw_filled_rect_mut(&mut layer, band, fill);
    }
    if width > 2 * r {
        let band = Rect::at(r as i32, 0).of_size(width - 2 * r, height);
        draw_filled_rect_mut(&mut layer, band, fill);
    }
    let (ri, right, bottom) = (r as i32, (width - 1 - r) as i32, (height - 1 - r) as i32);
    for centre in [(ri, ri), (right, ri), (ri, bottom), (right, bottom)] {
        draw_filled_circle_mut(&mut layer, centre, ri, fill);
    }
    layer
}

/// Render one photo-card page for a chunk of sentences.
///
/// Empty sentences are skipped; the remaining ones keep their slot, so card
/// `k` is always at `top + k * 300 + 100`.
#[instrument(skip_all, fields(background = %background.display(), sentences = chunk.filled()))]
pub fn render_card_page<F>(
    chunk: &SentenceChunk,
    config: &StyleConfig,
    face: &F,
    background: &Path,
) -> RgbaImage
where
    F: TextFace + ?Sized,
{
    let mut canvas = load_background(background, config);

    for (slot, sentence) in chunk.slots() {
        if sentence.is_empty() {
            continue;
        }
        let rect = CardRect::for_slot(slot, face.bbox(sentence), config);
        let card = rounded_card(rect.width, rect.height, CARD_RADIUS, CARD_FILL);
        image::imageops::overlay(&mut canvas, &card, rect.x as i64, rect.y as i64);

        let (tx, ty) = rect.text_origin();
        face.draw(&mut canvas, tx, ty, sentence, CARD_TEXT);
        debug!(
            slot,
            x = rect.x,
            y = rect.y,
            width = rect.width,
            height = rect.height,
            "Card drawn"
        );
    }
    canvas
}
