// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for Pagewright layout and rendering.

use serde::{Deserialize, Serialize};

/// Number of sentences carried by one photo-card page.
pub const SENTENCES_PER_CHUNK: usize = 4;

/// Page margins in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Margins {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl From<[u32; 4]> for Margins {
    /// `[left, top, right, bottom]`, matching the CLI argument order.
    fn from(v: [u32; 4]) -> Self {
        Self {
            left: v[0],
            top: v[1],
            right: v[2],
            bottom: v[3],
        }
    }
}

/// Output page dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSize {
    pub width: u32,
    pub height: u32,
}

impl PageSize {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Default for PageSize {
    fn default() -> Self {
        Self::new(1200, 1600)
    }
}

/// One visually wrapped row of characters. The empty line is the spacer
/// inserted after every paragraph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Line(String);

impl Line {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    /// The empty inter-paragraph spacer.
    pub fn spacer() -> Self {
        Self(String::new())
    }

    pub fn is_spacer(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }
}

/// A bounded run of lines rendered into one solid-background image.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub lines: Vec<Line>,
}

impl Page {
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// A trimmed, punctuation-delimited span of source text.
pub type Sentence = String;

/// Exactly four sentences for one photo-card page. Missing sentences are
/// empty strings at the end.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentenceChunk(pub [Sentence; SENTENCES_PER_CHUNK]);

impl SentenceChunk {
    /// Build a chunk from up to four sentences, padding the rest.
    pub fn padded(sentences: impl IntoIterator<Item = Sentence>) -> Self {
        let mut slots: [Sentence; SENTENCES_PER_CHUNK] = Default::default();
        for (slot, sentence) in slots.iter_mut().zip(sentences) {
            *slot = sentence;
        }
        Self(slots)
    }

    /// Slots with their index, including empty padding.
    pub fn slots(&self) -> impl Iterator<Item = (usize, &str)> {
        self.0.iter().map(String::as_str).enumerate()
    }

    /// Number of non-empty sentences.
    pub fn filled(&self) -> usize {
        self.0.iter().filter(|s| !s.is_empty()).count()
    }
}
