// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Pagewright — render a plain-text document into styled page images.
//
// Entry point. Initialises logging, merges the optional JSON config with the
// command-line flags, and runs the render pipeline.

mod pipeline;
mod services;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use pagewright_core::{RenderOptions, WatermarkPosition};

#[derive(Debug, Parser)]
#[command(
    name = "pagewright",
    about = "Render a text document into styled page images",
    version
)]
struct Cli {
    /// Input text file (UTF-8)
    input: PathBuf,

    /// Output directory. Existing contents are deleted.
    output_dir: PathBuf,

    /// JSON file of render options; flags given here override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Body font file (TTF/OTF/TTC) [default: ./MSYH.TTC]
    #[arg(long)]
    font: Option<PathBuf>,

    /// Body font size in pixels [default: 42]
    #[arg(long)]
    font_size: Option<u32>,

    /// Body text colour [default: #eef1f3]
    #[arg(long)]
    text_color: Option<String>,

    /// Page background colour [default: #030607]
    #[arg(long)]
    bg_color: Option<String>,

    /// Extra pixels between lines [default: 30]
    #[arg(long)]
    line_spacing: Option<u32>,

    /// Extra pixels between characters [default: 2]
    #[arg(long)]
    char_spacing: Option<u32>,

    /// Page margins in pixels [default: 100 100 100 100]
    #[arg(long, num_args = 4, value_names = ["LEFT", "TOP", "RIGHT", "BOTTOM"])]
    margins: Option<Vec<u32>>,

    /// Page size in pixels [default: 1200 1600]
    #[arg(long, num_args = 2, value_names = ["WIDTH", "HEIGHT"])]
    page_size: Option<Vec<u32>>,

    /// Watermark text; empty disables the watermark
    #[arg(long)]
    watermark_text: Option<String>,

    /// Watermark font file [default: ./MSYH.TTC]
    #[arg(long)]
    watermark_font: Option<PathBuf>,

    /// Watermark font size in pixels [default: 72]
    #[arg(long)]
    watermark_font_size: Option<u32>,

    /// Watermark colour, alpha respected [default: #30303060]
    #[arg(long)]
    watermark_color: Option<String>,

    /// Watermark position label [default: center]
    #[arg(long, value_enum)]
    watermark_position: Option<PositionArg>,

    /// Watermark rotation in degrees, counter-clockwise [default: 45]
    #[arg(long, allow_negative_numbers = true)]
    watermark_angle: Option<f32>,

    /// Folder of background images for photo-card pages
    #[arg(long)]
    bg_folder: Option<PathBuf>,

    /// Maximum number of background images; 0 disables cards [default: 10]
    #[arg(long)]
    bg_limit: Option<usize>,

    /// Seed for the background shuffle
    #[arg(long)]
    seed: Option<u64>,

    /// CSV of find,replace pairs applied to the input first
    #[arg(long)]
    substitutions: Option<PathBuf>,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum PositionArg {
    #[value(name = "top_left")]
    TopLeft,
    #[value(name = "top_right")]
    TopRight,
    #[value(name = "bottom_left")]
    BottomLeft,
    #[value(name = "bottom_right")]
    BottomRight,
    Center,
}

impl From<PositionArg> for WatermarkPosition {
    fn from(arg: PositionArg) -> Self {
        match arg {
            PositionArg::TopLeft => Self::TopLeft,
            PositionArg::TopRight => Self::TopRight,
            PositionArg::BottomLeft => Self::BottomLeft,
            PositionArg::BottomRight => Self::BottomRight,
            PositionArg::Center => Self::Center,
        }
    }
}

impl Cli {
    /// Start from the config file (or defaults) and apply every flag given.
    fn render_options(&self) -> Result<RenderOptions> {
        let mut opts = match &self.config {
            Some(path) => RenderOptions::from_json_file(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => RenderOptions::default(),
        };

        if let Some(v) = &self.font {
            opts.font = Some(v.clone());
        }
        if let Some(v) = self.font_size {
            opts.font_size = v;
        }
        if let Some(v) = &self.text_color {
            opts.text_color = v.clone();
        }
        if let Some(v) = &self.bg_color {
            opts.bg_color = v.clone();
        }
        if let Some(v) = self.line_spacing {
            opts.line_spacing = v;
        }
        if let Some(v) = self.char_spacing {
            opts.char_spacing = v;
        }
        if let Some(v) = &self.margins {
            opts.margins = v
                .as_slice()
                .try_into()
                .context("--margins takes exactly four values")?;
        }
        if let Some(v) = &self.page_size {
            opts.page_size = v
                .as_slice()
                .try_into()
                .context("--page-size takes exactly two values")?;
        }
        if let Some(v) = &self.watermark_text {
            opts.watermark_text = v.clone();
        }
        if let Some(v) = &self.watermark_font {
            opts.watermark_font = Some(v.clone());
        }
        if let Some(v) = self.watermark_font_size {
            opts.watermark_font_size = v;
        }
        if let Some(v) = &self.watermark_color {
            opts.watermark_color = v.clone();
        }
        if let Some(v) = self.watermark_position {
            opts.watermark_position = v.into();
        }
        if let Some(v) = self.watermark_angle {
            opts.watermark_angle = v;
        }
        if let Some(v) = &self.bg_folder {
            opts.bg_folder = Some(v.clone());
        }
        if let Some(v) = self.bg_limit {
            opts.bg_limit = v;
        }
        if self.seed.is_some() {
            opts.seed = self.seed;
        }
        if let Some(v) = &self.substitutions {
            opts.substitutions = Some(v.clone());
        }
        Ok(opts)
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    tracing::info!(input = %cli.input.display(), "Pagewright starting");

    let options = cli.render_options()?;
    pipeline::run(&cli.input, &cli.output_dir, &options)?;
    Ok(())
}
