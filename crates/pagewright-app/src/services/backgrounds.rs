// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Background image discovery for photo-card pages.

use std::path::{Path, PathBuf};

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use tracing::{info, warn};

/// File extensions recognised as background images (case-insensitive).
pub const IMAGE_EXTENSIONS: [&str; 3] = ["png", "jpg", "jpeg"];

/// Shuffled, size-limited list of background image paths.
#[derive(Debug, Clone, Default)]
pub struct BackgroundPool {
    images: Vec<PathBuf>,
}

impl BackgroundPool {
    /// Scan `folder`, shuffle and keep at most `limit` images.
    ///
    /// A missing folder, an unreadable folder and a folder without images
    /// all yield an empty pool with a warning; the run continues with
    /// solid-colour pages only.
    pub fn discover(folder: Option<&Path>, limit: usize, seed: Option<u64>) -> Self {
        let Some(folder) = folder else {
            return Self::default();
        };
        if limit == 0 {
            info!("Background limit is 0, photo cards disabled");
            return Self::default();
        }
        if !folder.is_dir() {
            warn!(folder = %folder.display(), "Background folder not found, skipping photo cards");
            return Self::default();
        }

        let mut images = match list_images(folder) {
            Ok(images) => images,
            Err(e) => {
                warn!(folder = %folder.display(), error = %e, "Cannot read background folder");
                return Self::default();
            }
        };
        if images.is_empty() {
            warn!(folder = %folder.display(), "No png/jpg/jpeg files in background folder");
            return Self::default();
        }

        match seed {
            Some(seed) => images.shuffle(&mut StdRng::seed_from_u64(seed)),
            None => images.shuffle(&mut rand::rng()),
        }
        images.truncate(limit);

        info!(count = images.len(), folder = %folder.display(), "Background images selected");
        Self { images }
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.images
    }
}

/// Image files directly inside `folder`, sorted so that seeded shuffles are
/// reproducible regardless of directory iteration order.
fn list_images(folder: &Path) -> std::io::Result<Vec<PathBuf>> {
    let mut images = Vec::new();
    for entry in std::fs::read_dir(folder)? {
        let path = entry?.path();
        if path.is_file() && has_image_extension(&path) {
            images.push(path);
        }
    }
    images.sort();
    Ok(images)
}

fn has_image_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| IMAGE_EXTENSIONS.iter().any(|known| ext.eq_ignore_ascii_case(known)))
        .unwrap_or(false)
}
