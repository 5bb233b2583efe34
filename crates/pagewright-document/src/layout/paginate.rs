// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Paragraph-aware pagination with a fixed per-page line budget.

use pagewright_core::{Line, Page, StyleConfig};
use tracing::debug;

use super::wrap::wrap;
use crate::font::TextMeasure;

/// Split `text` into paragraphs, wrap each to the available width and return
/// the flat line sequence.
///
/// Whitespace-only paragraphs are dropped. Every kept paragraph is followed by
/// one spacer line, the last one included.
pub fn flow_lines<M>(text: &str, config: &StyleConfig, metric: &M) -> Vec<Line>
where
    M: TextMeasure + ?Sized,
{
    let max_width = config.available_width() as f32;
    let spacing = config.char_spacing as f32;

    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        if paragraph.trim().is_empty() {
            continue;
        }
        lines.extend(wrap(paragraph, spacing, max_width, metric));
        lines.push(Line::spacer());
    }
    lines
}

/// Fill pages greedily, starting a new page once the current one holds
/// `capacity` lines.
pub fn paginate_lines(lines: Vec<Line>, capacity: usize) -> Vec<Page> {
    let capacity = capacity.max(1);
    let mut pages = Vec::with_capacity(lines.len().div_ceil(capacity));
    let mut current = Page::default();
    for line in lines {
        if current.len() >= capacity {
            pages.push(std::mem::take(&mut current));
        }
        current.lines.push(line);
    }
    if !current.is_empty() {
        pages.push(current);
    }
    pages
}

/// Lay out a whole document into pages.
pub fn paginate<M>(text: &str, config: &StyleConfig, metric: &M) -> Vec<Page>
where
    M: TextMeasure + ?Sized,
{
    let lines = flow_lines(text, config, metric);
    let capacity = config.max_lines_per_page();
    let total = lines.len();
    let pages = paginate_lines(lines, capacity);
    debug!(lines = total, capacity, pages = pages.len(), "Document paginated");
    pages
}
