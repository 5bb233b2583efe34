// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Solid-background page renderer.

use image::RgbaImage;
use pagewright_core::{Page, StyleConfig};
use tracing::{debug, instrument};

use super::watermark::Watermark;
use super::{rgba, solid_canvas};
use crate::font::{TextFace, TextMeasure};

/// Footer distance below the text-height-adjusted bottom margin.
pub const FOOTER_OFFSET: i32 = 50;

/// Footer label for a 1-based page number.
pub fn footer_text(page_number: usize) -> String {
    format!("- {page_number} -")
}

/// Top-left anchor of the footer: horizontally centred, just below the
/// bottom margin.
pub fn footer_origin<F>(face: &F, config: &StyleConfig, page_number: usize) -> (i32, i32)
where
    F: TextFace + ?Sized,
{
    let bounds = face.bbox(&footer_text(page_number));
    let page_w = config.page_size.width as i32;
    let page_h = config.page_size.height as i32;
    let x = (page_w - bounds.width() as i32).div_euclid(2);
    let y = page_h - config.margins.bottom as i32 - bounds.height() as i32 + FOOTER_OFFSET;
    (x, y)
}

/// Pen position of every character of a line, starting at `left`.
///
/// Character `i` sits at its caret within the whole line plus `i * spacing`.
/// The last glyph therefore ends at `left + measure(line) + spacing * (n - 1)`,
/// the width the wrapper checked against the margins.
pub fn glyph_positions<M>(line: &str, metric: &M, left: f32, spacing: f32) -> Vec<(char, f32)>
where
    M: TextMeasure + ?Sized,
{
    line.chars()
        .zip(metric.carets(line))
        .enumerate()
        .map(|(i, (ch, caret))| (ch, left + caret + spacing * i as f32))
        .collect()
}

/// Render one page of wrapped lines.
///
/// Lines start at the top margin and advance by `font_size + line_spacing`.
/// The watermark, if any, goes over the text; the footer goes last.
#[instrument(skip_all, fields(page_number = page_number, lines = page.len()))]
pub fn render_page<F>(
    page: &Page,
    config: &StyleConfig,
    face: &F,
    watermark: Option<&Watermark>,
    page_number: usize,
) -> RgbaImage
where
    F: TextFace + ?Sized,
{
    let mut canvas = solid_canvas(config.page_size, config.bg_color);
    let color = rgba(config.text_color);
    let left = config.margins.left as f32;
    let spacing = config.char_spacing as f32;
    let line_height = config.line_height() as i32;

    let mut y = config.margins.top as i32;
    let mut buf = [0u8; 4];
    for line in &page.lines {
        for (ch, x) in glyph_positions(line.as_str(), face, left, spacing) {
            face.draw(&mut canvas, x.round() as i32, y, ch.encode_utf8(&mut buf), color);
        }
        y += line_height;
    }

    if let Some(watermark) = watermark {
        watermark.apply(&mut canvas, config.page_size);
    }

    let (fx, fy) = footer_origin(face, config, page_number);
    face.draw(&mut canvas, fx, fy, &footer_text(page_number), color);
    debug!(footer_x = fx, footer_y = fy, "Page rendered");
    canvas
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::BuiltinFace;
    use crate::layout::testing::Kerned;
    use crate::layout::{paginate, wrap};
    use image::Rgba;
    use pagewright_core::{Line, RenderOptions};

    fn config() -> StyleConfig {
        StyleConfig::from_options(&RenderOptions {
            font: None,
            text_color: "white".into(),
            bg_color: "black".into(),
            ..RenderOptions::default()
        })
        .unwrap()
    }

    const BLACK: Rgba<u8> = Rgba([0, 0, 0, 255]);

    fn lit_in(canvas: &RgbaImage, xs: std::ops::Range<u32>, ys: std::ops::Range<u32>) -> usize {
        xs.flat_map(|x| ys.clone().map(move |y| (x, y)))
            .filter(|&(x, y)| *canvas.get_pixel(x, y) != BLACK)
            .count()
    }

    #[test]
    fn footer_label() {
        assert_eq!(footer_text(7), "- 7 -");
        assert_eq!(footer_text(12), "- 12 -");
    }

    #[test]
    fn footer_is_centred() {
        let face = BuiltinFace::for_size(42);
        let cfg = config();
        // "- 3 -" is 5 cells of 10x20.
        assert_eq!(footer_origin(&face, &cfg, 3), ((1200 - 50) / 2, 1600 - 100 - 20 + 50));
        // "- 10 -" is 6 cells.
        assert_eq!(footer_origin(&face, &cfg, 10).0, (1200 - 60) / 2);
    }

    #[test]
    fn glyph_positions_add_spacing() {
        let face = BuiltinFace::for_size(42);
        let xs: Vec<f32> = glyph_positions("abc", &face, 100.0, 2.0)
            .into_iter()
            .map(|(_, x)| x)
            .collect();
        assert_eq!(xs, vec![100.0, 112.0, 124.0]);
    }

    #[test]
    fn wrapped_lines_stay_inside_margins() {
        let face = BuiltinFace::for_size(42);
        let cfg = config();
        let text = "x".repeat(500);
        let pages = paginate(&text, &cfg, &face);
        let right_edge = (cfg.page_size.width - cfg.margins.right) as f32;
        for line in pages.iter().flat_map(|p| &p.lines) {
            if let Some((ch, x)) = glyph_positions(line.as_str(), &face, 100.0, 2.0).last() {
                let mut buf = [0u8; 4];
                assert!(x + face.measure(ch.encode_utf8(&mut buf)) <= right_edge);
            }
        }
    }

    #[test]
    fn kerned_lines_end_where_the_wrapper_measured() {
        let metric = Kerned { advance: 30.0, kern: 8.0 };
        let (left, spacing, max_width) = (100.0, 2.0, 1000.0);
        let lines = wrap(&"AV".repeat(200), spacing, max_width, &metric);
        assert!(lines.len() > 1);

        for line in &lines {
            let n = line.char_count();
            let wrapped = metric.measure(line.as_str()) + spacing * (n - 1) as f32;
            let (_, last_x) = *glyph_positions(line.as_str(), &metric, left, spacing)
                .last()
                .unwrap();
            let rendered = last_x + metric.advance - left;
            assert!((rendered - wrapped).abs() < 1e-3, "{rendered} vs {wrapped}");
            assert!(rendered <= max_width, "line reaches {rendered}");
        }
    }

    #[test]
    fn kerning_pulls_glyphs_together() {
        let metric = Kerned { advance: 30.0, kern: 8.0 };
        let xs: Vec<f32> = glyph_positions("AVA", &metric, 0.0, 2.0)
            .into_iter()
            .map(|(_, x)| x)
            .collect();
        assert_eq!(xs, vec![0.0, 24.0, 48.0]);
    }

    #[test]
    fn draws_text_and_footer_on_background() {
        let face = BuiltinFace::for_size(42);
        let cfg = config();
        let page = Page {
            lines: vec![Line::new("Hello"), Line::spacer(), Line::new("World")],
        };
        let canvas = render_page(&page, &cfg, &face, None, 1);

        assert_eq!(canvas.dimensions(), (1200, 1600));
        assert_eq!(*canvas.get_pixel(0, 0), BLACK);
        // First line at y=100, second text line at y=100+2*72.
        assert!(lit_in(&canvas, 100..160, 100..120) > 0);
        assert_eq!(lit_in(&canvas, 100..160, 172..192), 0);
        assert!(lit_in(&canvas, 100..160, 244..264) > 0);
        // Footer band.
        assert!(lit_in(&canvas, 575..625, 1530..1550) > 0);
        // Nothing between the text block and the footer.
        assert_eq!(lit_in(&canvas, 0..1200, 300..1500), 0);
    }

    #[test]
    fn watermark_is_stamped_when_given() {
        let face = BuiltinFace::for_size(42);
        let cfg = config();
        let wm_config = pagewright_core::WatermarkConfig {
            text: "WM".into(),
            font: None,
            font_size: 72,
            color: pagewright_core::Color::rgba(200, 0, 0, 128),
            angle: 0.0,
            position: Default::default(),
        };
        let wm = Watermark::prepare(&wm_config, &face).unwrap();
        let canvas = render_page(&Page::default(), &cfg, &face, Some(&wm), 1);
        // Second row, first column of the grid: y = 100 + 20 + 533.
        assert!(lit_in(&canvas, 100..120, 653..673) > 0);
    }
}
