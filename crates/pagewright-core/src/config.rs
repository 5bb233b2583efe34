// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Run configuration: the raw, serialisable `RenderOptions` and the validated,
// immutable `StyleConfig` handed to every layout and render component.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::color::Color;
use crate::error::{PagewrightError, Result};
use crate::types::{Margins, PageSize};

/// Default font file, relative to the working directory.
pub const DEFAULT_FONT: &str = "./MSYH.TTC";

/// Raw options as given on the command line or in a JSON config file.
///
/// Colours are kept as strings here; they are parsed (permissively) when the
/// options are turned into a [`StyleConfig`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Body font file. `None` selects the built-in face.
    pub font: Option<PathBuf>,
    pub font_size: u32,
    pub text_color: String,
    pub bg_color: String,
    /// Pixels added below the font size for each line.
    pub line_spacing: u32,
    /// Pixels inserted between consecutive glyphs.
    pub char_spacing: u32,
    /// `[left, top, right, bottom]`.
    pub margins: [u32; 4],
    /// `[width, height]`.
    pub page_size: [u32; 2],

    /// Empty text disables the watermark.
    pub watermark_text: String,
    pub watermark_font: Option<PathBuf>,
    pub watermark_font_size: u32,
    pub watermark_color: String,
    pub watermark_position: WatermarkPosition,
    /// Counter-clockwise rotation in degrees.
    pub watermark_angle: f32,

    /// Folder scanned for `.png`/`.jpg`/`.jpeg` backgrounds.
    pub bg_folder: Option<PathBuf>,
    /// Maximum number of backgrounds used; 0 disables photo cards.
    pub bg_limit: usize,
    /// Seed for background shuffling. `None` shuffles from OS entropy.
    pub seed: Option<u64>,
    /// CSV of `find,replace` pairs applied to the raw input.
    pub substitutions: Option<PathBuf>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            font: Some(PathBuf::from(DEFAULT_FONT)),
            font_size: 42,
            text_color: "#eef1f3".into(),
            bg_color: "#030607".into(),
            line_spacing: 30,
            char_spacing: 2,
            margins: [100, 100, 100, 100],
            page_size: [1200, 1600],
            watermark_text: String::new(),
            watermark_font: Some(PathBuf::from(DEFAULT_FONT)),
            watermark_font_size: 72,
            watermark_color: "#30303060".into(),
            watermark_position: WatermarkPosition::Center,
            watermark_angle: 45.0,
            bg_folder: None,
            bg_limit: 10,
            seed: None,
            substitutions: None,
        }
    }
}

impl RenderOptions {
    /// Load options from a JSON file. Missing keys take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())?;
        Ok(serde_json::from_str(&raw)?)
    }
}

/// Named watermark placement.
///
/// The tiling grid always starts from a fixed anchor; the label is carried
/// through the configuration but does not move the grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WatermarkPosition {
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
    #[default]
    Center,
}

impl WatermarkPosition {
    pub fn label(&self) -> &'static str {
        match self {
            Self::TopLeft => "top_left",
            Self::TopRight => "top_right",
            Self::BottomLeft => "bottom_left",
            Self::BottomRight => "bottom_right",
            Self::Center => "center",
        }
    }
}

/// Watermark text and styling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatermarkConfig {
    pub text: String,
    pub font: Option<PathBuf>,
    pub font_size: u32,
    /// Alpha is respected when compositing.
    pub color: Color,
    pub angle: f32,
    pub position: WatermarkPosition,
}

/// Validated page styling, constructed once per run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StyleConfig {
    pub font: Option<PathBuf>,
    pub font_size: u32,
    pub text_color: Color,
    pub bg_color: Color,
    pub line_spacing: u32,
    pub char_spacing: u32,
    pub margins: Margins,
    pub page_size: PageSize,
    pub watermark: Option<WatermarkConfig>,
}

impl StyleConfig {
    /// Parse colours and validate page geometry.
    pub fn from_options(options: &RenderOptions) -> Result<Self> {
        let watermark = (!options.watermark_text.is_empty()).then(|| WatermarkConfig {
            text: options.watermark_text.clone(),
            font: options.watermark_font.clone(),
            font_size: options.watermark_font_size,
            color: Color::parse(&options.watermark_color),
            angle: options.watermark_angle,
            position: options.watermark_position,
        });

        let config = Self {
            font: options.font.clone(),
            font_size: options.font_size,
            text_color: Color::parse(&options.text_color),
            bg_color: Color::parse(&options.bg_color),
            line_spacing: options.line_spacing,
            char_spacing: options.char_spacing,
            margins: options.margins.into(),
            page_size: PageSize::new(options.page_size[0], options.page_size[1]),
            watermark,
        };
        config.validate()?;
        Ok(config)
    }

    /// Reject geometry that would leave no room for text.
    pub fn validate(&self) -> Result<()> {
        if self.font_size == 0 {
            return Err(PagewrightError::InvalidConfig("font size must be positive".into()));
        }
        if self.page_size.width == 0 || self.page_size.height == 0 {
            return Err(PagewrightError::InvalidConfig(format!(
                "page size {}x{} has a zero dimension",
                self.page_size.width, self.page_size.height
            )));
        }
        if self.available_width() <= 0 {
            return Err(PagewrightError::InvalidConfig(format!(
                "left + right margins ({} + {}) leave no width on a {}px page",
                self.margins.left, self.margins.right, self.page_size.width
            )));
        }
        if self.available_height() <= 0 {
            return Err(PagewrightError::InvalidConfig(format!(
                "top + bottom margins ({} + {}) leave no height on a {}px page",
                self.margins.top, self.margins.bottom, self.page_size.height
            )));
        }
        if self.max_lines_per_page() == 0 {
            return Err(PagewrightError::InvalidConfig(format!(
                "line height {}px exceeds the available height {}px",
                self.line_height(),
                self.available_height()
            )));
        }
        if let Some(wm) = &self.watermark {
            if wm.font_size == 0 {
                return Err(PagewrightError::InvalidConfig(
                    "watermark font size must be positive".into(),
                ));
            }
        }
        Ok(())
    }

    /// `page_width - left - right`; may be non-positive before validation.
    pub fn available_width(&self) -> i64 {
        self.page_size.width as i64 - self.margins.left as i64 - self.margins.right as i64
    }

    /// `page_height - top - bottom`; may be non-positive before validation.
    pub fn available_height(&self) -> i64 {
        self.page_size.height as i64 - self.margins.top as i64 - self.margins.bottom as i64
    }

    /// Vertical pitch between consecutive lines.
    pub fn line_height(&self) -> u32 {
        self.font_size + self.line_spacing
    }

    /// Fixed line capacity of every page.
    pub fn max_lines_per_page(&self) -> usize {
        let available = self.available_height();
        if available <= 0 {
            return 0;
        }
        (available / self.line_height() as i64) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn options(
        page: [u32; 2],
        margins: [u32; 4],
        font_size: u32,
        line_spacing: u32,
    ) -> RenderOptions {
        RenderOptions {
            page_size: page,
            margins,
            font_size,
            line_spacing,
            ..RenderOptions::default()
        }
    }

    #[test]
    fn default_geometry_gives_nineteen_lines() {
        let cfg = StyleConfig::from_options(&options([1200, 1600], [100; 4], 42, 30)).unwrap();
        assert_eq!(cfg.available_width(), 1000);
        assert_eq!(cfg.available_height(), 1400);
        assert_eq!(cfg.line_height(), 72);
        assert_eq!(cfg.max_lines_per_page(), 19);
    }

    #[test]
    fn rejects_margins_wider_than_page() {
        let err = StyleConfig::from_options(&options([200, 1600], [100, 100, 100, 100], 42, 30))
            .unwrap_err();
        assert!(matches!(err, PagewrightError::InvalidConfig(_)));
        assert!(err.to_string().contains("width"));
    }

    #[test]
    fn rejects_margins_taller_than_page() {
        let err = StyleConfig::from_options(&options([1200, 150], [10, 100, 10, 100], 42, 30))
            .unwrap_err();
        assert!(err.to_string().contains("height"));
    }

    #[test]
    fn rejects_zero_line_capacity() {
        let err = StyleConfig::from_options(&options([1200, 300], [100; 4], 80, 30)).unwrap_err();
        assert!(err.to_string().contains("line height"));
    }

    #[test]
    fn rejects_zero_font_size() {
        assert!(StyleConfig::from_options(&options([1200, 1600], [100; 4], 0, 30)).is_err());
    }

    #[test]
    fn watermark_only_when_text_given() {
        let cfg = StyleConfig::from_options(&RenderOptions::default()).unwrap();
        assert!(cfg.watermark.is_none());

        let opts = RenderOptions {
            watermark_text: "draft".into(),
            ..RenderOptions::default()
        };
        let wm = StyleConfig::from_options(&opts).unwrap().watermark.unwrap();
        assert_eq!(wm.color, Color::rgba(0x30, 0x30, 0x30, 0x60));
        assert_eq!(wm.position, WatermarkPosition::Center);
        assert_eq!(wm.angle, 45.0);
    }

    #[test]
    fn unparseable_colour_is_black() {
        let opts = RenderOptions {
            text_color: "sparkly".into(),
            ..RenderOptions::default()
        };
        let cfg = StyleConfig::from_options(&opts).unwrap();
        assert_eq!(cfg.text_color, Color::BLACK);
    }

    #[test]
    fn partial_json_uses_defaults() {
        let opts: RenderOptions =
            serde_json::from_str(r#"{"font_size": 30, "watermark_position": "top_left"}"#).unwrap();
        assert_eq!(opts.font_size, 30);
        assert_eq!(opts.watermark_position, WatermarkPosition::TopLeft);
        assert_eq!(opts.page_size, [1200, 1600]);
        assert_eq!(opts.bg_limit, 10);
    }
}
