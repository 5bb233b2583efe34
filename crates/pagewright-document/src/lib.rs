// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// pagewright-document — Text flow and page composition for Pagewright.
//
// Provides font faces (outline fonts with a built-in fallback), the layout
// engine (greedy line wrapping, fixed-capacity pagination, sentence
// chunking), image processing (cover fit, expanding rotation, encoding), and
// the two page renderers (solid-background text pages and photo sentence
// cards) plus the tiled watermark.

pub mod font;
pub mod image;
pub mod layout;
pub mod render;

// Re-export the primary entry points so callers can use
// `pagewright_document::paginate` etc.
pub use font::{FontFace, TextFace, TextMeasure};
pub use image::processor::ImageProcessor;
pub use layout::{CardPlan, chunk, paginate, plan_cards, wrap};
pub use render::{Watermark, apply_watermark, render_card_page, render_page};
