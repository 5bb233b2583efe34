// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Output directory acquisition and atomic page writes.

use std::path::{Path, PathBuf};

use pagewright_core::error::{PagewrightError, Result};
use tracing::{debug, info, warn};

/// The directory that receives generated pages.
///
/// Acquiring it is destructive: whatever the directory held before is
/// removed, then the directory is recreated empty.
#[derive(Debug)]
pub struct OutputDir {
    root: PathBuf,
}

impl OutputDir {
    /// Wipe and recreate `path`.
    ///
    /// Refuses to touch a path that exists but is not a directory, and
    /// filesystem roots.
    pub fn acquire(path: impl Into<PathBuf>) -> Result<Self> {
        let root = path.into();
        if root.parent().is_none() {
            return Err(PagewrightError::InvalidConfig(format!(
                "refusing to use {} as the output directory",
                root.display()
            )));
        }
        if root.exists() {
            if !root.is_dir() {
                return Err(PagewrightError::InvalidConfig(format!(
                    "output path {} exists and is not a directory",
                    root.display()
                )));
            }
            warn!(path = %root.display(), "Clearing existing output directory");
            std::fs::remove_dir_all(&root)?;
        }
        std::fs::create_dir_all(&root)?;
        info!(path = %root.display(), "Output directory ready");
        Ok(Self { root })
    }

    pub fn path(&self) -> &Path {
        &self.root
    }

    /// Write `bytes` to `name` inside the directory.
    ///
    /// The data goes to a hidden temporary file first and is renamed into
    /// place, so a page file is either complete or absent.
    pub fn write_atomic(&self, name: &str, bytes: &[u8]) -> Result<PathBuf> {
        let target = self.root.join(name);
        let staging = self.root.join(format!(".{name}.partial"));
        std::fs::write(&staging, bytes)?;
        std::fs::rename(&staging, &target)?;
        debug!(path = %target.display(), bytes = bytes.len(), "Page written");
        Ok(target)
    }
}
