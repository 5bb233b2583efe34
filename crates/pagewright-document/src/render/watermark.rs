// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Watermark compositor — renders the watermark text once, rotates it, and
// tiles it across a page on a 3x3 grid.

use image::{Rgba, RgbaImage};
use pagewright_core::{PageSize, WatermarkConfig};
use tracing::{debug, instrument};

use super::rgba;
use crate::font::TextFace;
use crate::image::ImageProcessor;

/// Top-left corner of the first grid cell. The configured position label
/// does not move it.
pub const GRID_ANCHOR: (i64, i64) = (100, 100);

/// Cells per grid side.
const GRID: i64 = 3;

const CLEAR: Rgba<u8> = Rgba([0, 0, 0, 0]);

/// A rendered, rotated watermark tile ready to be stamped onto pages.
pub struct Watermark {
    tile: RgbaImage,
}

impl Watermark {
    /// Render the watermark text onto a tight transparent canvas and rotate
    /// it with expansion. Returns `None` when there is nothing to draw.
    #[instrument(skip_all, fields(text = %config.text, angle = config.angle))]
    pub fn prepare<F>(config: &WatermarkConfig, face: &F) -> Option<Self>
    where
        F: TextFace + ?Sized,
    {
        if config.text.is_empty() {
            return None;
        }
        let bounds = face.bbox(&config.text);
        if bounds.width() == 0 || bounds.height() == 0 {
            return None;
        }

        let mut canvas = RgbaImage::from_pixel(bounds.width(), bounds.height(), CLEAR);
        face.draw(&mut canvas, -bounds.x0, -bounds.y0, &config.text, rgba(config.color));

        let tile = if config.angle != 0.0 {
            ImageProcessor::from_rgba8(canvas)
                .rotate_expand(config.angle, CLEAR)
                .into_rgba8()
        } else {
            canvas
        };
        debug!(
            width = tile.width(),
            height = tile.height(),
            position = config.position.label(),
            "Watermark tile prepared"
        );
        Some(Self { tile })
    }

    pub fn tile(&self) -> &RgbaImage {
        &self.tile
    }

    /// Top-left corners of the nine grid cells, row by row.
    pub fn grid_origins(&self, page_size: PageSize) -> Vec<(i64, i64)> {
        let (wm_w, wm_h) = (self.tile.width() as i64, self.tile.height() as i64);
        let (page_w, page_h) = (page_size.width as i64, page_size.height as i64);
        let (ax, ay) = GRID_ANCHOR;
        (0..GRID)
            .flat_map(|j| {
                (0..GRID).map(move |i| {
                    (
                        ax + i * wm_w + i * page_w / GRID,
                        ay + j * wm_h + j * page_h / GRID,
                    )
                })
            })
            .collect()
    }

    /// Alpha-composite the tile onto every grid cell of `page`.
    pub fn apply(&self, page: &mut RgbaImage, page_size: PageSize) {
        for (x, y) in self.grid_origins(page_size) {
            image::imageops::overlay(page, &self.tile, x, y);
        }
    }
}

/// Render and tile a watermark in one step.
pub fn apply_watermark<F>(
    page: &mut RgbaImage,
    config: &WatermarkConfig,
    face: &F,
    page_size: PageSize,
) where
    F: TextFace + ?Sized,
{
    if let Some(watermark) = Watermark::prepare(config, face) {
        watermark.apply(page, page_size);
    }
}
