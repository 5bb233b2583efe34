// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// End-to-end run: read the document, plan photo cards, paginate the rest,
// render and write every page.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use image::RgbaImage;
use pagewright_core::{RenderOptions, StyleConfig};
use pagewright_document::{
    FontFace, ImageProcessor, Watermark, paginate, plan_cards, render_card_page, render_page,
};
use tracing::info;

use crate::services::backgrounds::BackgroundPool;
use crate::services::output_dir::OutputDir;
use crate::services::substitutions::Substitutions;

/// JPEG quality for every written page.
pub const JPEG_QUALITY: u8 = 95;

/// What a run produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub card_pages: usize,
    pub text_pages: usize,
    /// Written files in render order.
    pub files: Vec<PathBuf>,
}

pub fn card_page_name(index: usize) -> String {
    format!("page_bg_{:03}.jpg", index)
}

pub fn text_page_name(index: usize) -> String {
    format!("page_{:03}.jpg", index)
}

/// Read a UTF-8 document, normalising CRLF line endings.
pub fn read_document(path: &Path) -> Result<String> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read input document {}", path.display()))?;
    Ok(raw.replace("\r\n", "\n"))
}

/// Render `input` into `output_dir` with the given options.
///
/// The output directory is wiped only after the options validate and the
/// document has been read.
pub fn run(input: &Path, output_dir: &Path, options: &RenderOptions) -> Result<RunSummary> {
    let config = StyleConfig::from_options(options).context("invalid render options")?;

    let mut text = read_document(input)?;
    if let Some(path) = &options.substitutions {
        let table = Substitutions::load(path)
            .with_context(|| format!("failed to load substitutions from {}", path.display()))?;
        if !table.is_empty() {
            text = table.apply(&text);
        }
    }

    let out = OutputDir::acquire(output_dir).with_context(|| {
        format!("failed to prepare output directory {}", output_dir.display())
    })?;

    let face = FontFace::load(config.font.as_deref(), config.font_size);
    let watermark = config.watermark.as_ref().and_then(|wm| {
        let wm_face = FontFace::load(wm.font.as_deref(), wm.font_size);
        Watermark::prepare(wm, &wm_face)
    });

    let backgrounds =
        BackgroundPool::discover(options.bg_folder.as_deref(), options.bg_limit, options.seed);
    if backgrounds.is_empty() {
        info!("Rendering solid-background pages only");
    }
    let plan = plan_cards(&text, backgrounds.len());

    let mut summary = RunSummary::default();

    for (index, (chunk, background)) in plan.chunks.iter().zip(backgrounds.paths()).enumerate() {
        let image = render_card_page(chunk, &config, &face, background);
        let name = card_page_name(index + 1);
        let path = write_jpeg(&out, &name, image)?;
        info!(file = %name, background = %background.display(), "Card page saved");
        summary.card_pages += 1;
        summary.files.push(path);
    }

    for (index, page) in paginate(&plan.remaining_text, &config, &face).iter().enumerate() {
        let image = render_page(page, &config, &face, watermark.as_ref(), index + 1);
        let name = text_page_name(index + 1);
        let path = write_jpeg(&out, &name, image)?;
        info!(file = %name, lines = page.len(), "Page saved");
        summary.text_pages += 1;
        summary.files.push(path);
    }

    info!(
        card_pages = summary.card_pages,
        text_pages = summary.text_pages,
        output = %out.path().display(),
        "Render complete"
    );
    Ok(summary)
}

fn write_jpeg(out: &OutputDir, name: &str, image: RgbaImage) -> Result<PathBuf> {
    let bytes = ImageProcessor::from_rgba8(image)
        .to_jpeg_bytes(JPEG_QUALITY)
        .with_context(|| format!("failed to encode {name}"))?;
    out.write_atomic(name, &bytes)
        .with_context(|| format!("failed to write {name}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options() -> RenderOptions {
        RenderOptions {
            font: None,
            watermark_font: None,
            seed: Some(3),
            ..RenderOptions::default()
        }
    }

    fn write_input(dir: &Path, text: &str) -> PathBuf {
        let path = dir.join("input.txt");
        std::fs::write(&path, text).unwrap();
        path
    }

    fn backgrounds(dir: &Path, count: usize) -> PathBuf {
        let folder = dir.join("bg");
        std::fs::create_dir(&folder).unwrap();
        for i in 0..count {
            image::RgbaImage::from_pixel(60, 80, image::Rgba([10, 120, 200, 255]))
                .save(folder.join(format!("bg{i}.png")))
                .unwrap();
        }
        folder
    }

    fn names(summary: &RunSummary) -> Vec<String> {
        summary
            .files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn text_only_run_writes_numbered_pages() {
        let tmp = tempfile::tempdir().unwrap();
        let input = write_input(tmp.path(), "Hello\n\nWorld\n");
        let out = tmp.path().join("out");

        let summary = run(&input, &out, &options()).unwrap();
        assert_eq!(summary.card_pages, 0);
        assert_eq!(summary.text_pages, 1);
        assert_eq!(names(&summary), ["page_001.jpg"]);

        let page = image::open(out.join("page_001.jpg")).unwrap();
        assert_eq!((page.width(), page.height()), (1200, 1600));
    }

    #[test]
    fn cards_take_sentences_and_rest_is_paginated() {
        let tmp = tempfile::tempdir().unwrap();
        let input = write_input(
            tmp.path(),
            "One. Two. Three. Four. Five. Six. Seven. Eight. Nine. Ten.",
        );
        let opts = RenderOptions {
            bg_folder: Some(backgrounds(tmp.path(), 2)),
            ..options()
        };

        let summary = run(&input, &tmp.path().join("out"), &opts).unwrap();
        assert_eq!(summary.card_pages, 2);
        assert_eq!(summary.text_pages, 1);
        assert_eq!(
            names(&summary),
            ["page_bg_001.jpg", "page_bg_002.jpg", "page_001.jpg"]
        );
    }

    #[test]
    fn more_backgrounds_than_chunks_consumes_everything() {
        let tmp = tempfile::tempdir().unwrap();
        let input = write_input(tmp.path(), "Short one. Short two.");
        let opts = RenderOptions {
            bg_folder: Some(backgrounds(tmp.path(), 3)),
            ..options()
        };

        let summary = run(&input, &tmp.path().join("out"), &opts).unwrap();
        assert_eq!(summary.card_pages, 1);
        assert_eq!(summary.text_pages, 0);
    }

    #[test]
    fn zero_bg_limit_renders_text_only() {
        let tmp = tempfile::tempdir().unwrap();
        let input = write_input(tmp.path(), "One. Two. Three.");
        let opts = RenderOptions {
            bg_folder: Some(backgrounds(tmp.path(), 2)),
            bg_limit: 0,
            ..options()
        };

        let summary = run(&input, &tmp.path().join("out"), &opts).unwrap();
        assert_eq!(summary.card_pages, 0);
        assert_eq!(summary.text_pages, 1);
    }

    #[test]
    fn stale_output_is_removed() {
        let tmp = tempfile::tempdir().unwrap();
        let out = tmp.path().join("out");
        std::fs::create_dir(&out).unwrap();
        std::fs::write(out.join("page_099.jpg"), b"old").unwrap();
        let input = write_input(tmp.path(), "Fresh.");

        run(&input, &out, &options()).unwrap();
        assert!(!out.join("page_099.jpg").exists());
        assert!(out.join("page_001.jpg").exists());
    }

    #[test]
    fn invalid_options_leave_output_untouched() {
        let tmp = tempfile::tempdir().unwrap();
        let out = tmp.path().join("out");
        std::fs::create_dir(&out).unwrap();
        std::fs::write(out.join("keep.txt"), b"keep").unwrap();
        let input = write_input(tmp.path(), "Text.");
        let opts = RenderOptions {
            margins: [700, 100, 700, 100],
            ..options()
        };

        let err = run(&input, &out, &opts).unwrap_err();
        assert!(format!("{err:#}").contains("invalid render options"));
        assert!(out.join("keep.txt").exists());
    }

    #[test]
    fn missing_input_is_fatal() {
        let tmp = tempfile::tempdir().unwrap();
        let err = run(&tmp.path().join("absent.txt"), &tmp.path().join("out"), &options())
            .unwrap_err();
        assert!(format!("{err:#}").contains("failed to read input document"));
    }

    #[test]
    fn missing_substitutions_file_is_fatal() {
        let tmp = tempfile::tempdir().unwrap();
        let input = write_input(tmp.path(), "Text.");
        let opts = RenderOptions {
            substitutions: Some(tmp.path().join("absent.csv")),
            ..options()
        };
        assert!(run(&input, &tmp.path().join("out"), &opts).is_err());
    }

    #[test]
    fn watermark_and_missing_font_still_render() {
        let tmp = tempfile::tempdir().unwrap();
        let input = write_input(tmp.path(), "Marked page.");
        let opts = RenderOptions {
            font: Some(tmp.path().join("missing.ttf")),
            watermark_text: "DRAFT".into(),
            ..options()
        };

        let summary = run(&input, &tmp.path().join("out"), &opts).unwrap();
        assert_eq!(summary.text_pages, 1);
    }

    #[test]
    fn crlf_is_normalised() {
        let tmp = tempfile::tempdir().unwrap();
        let input = write_input(tmp.path(), "a\r\n\r\nb\r\n");
        assert_eq!(read_document(&input).unwrap(), "a\n\nb\n");
    }

    #[test]
    fn empty_document_writes_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let input = write_input(tmp.path(), "\n\n   \n");
        let out = tmp.path().join("out");
        let summary = run(&input, &out, &options()).unwrap();
        assert!(summary.files.is_empty());
        assert!(out.is_dir());
    }
}
