// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Pagewright.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type for all Pagewright operations.
#[derive(Debug, Error)]
pub enum PagewrightError {
    // -- Configuration --
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    // -- Rendering --
    #[error("image processing failed: {0}")]
    ImageError(String),

    // -- Input glue --
    #[error("substitution list {path} is malformed: {detail}")]
    Substitutions { path: PathBuf, detail: String },

    // -- Storage / persistence --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Failure to load an outline font. Always recoverable: callers substitute
/// the built-in face.
#[derive(Debug, Error)]
pub enum FontError {
    #[error("failed to read font {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("font {path} is not a usable TrueType/OpenType font")]
    Parse { path: PathBuf },
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, PagewrightError>;
