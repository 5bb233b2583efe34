// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Greedy character-wise line wrapping under a spacing-augmented width model.

use pagewright_core::Line;

use crate::font::TextMeasure;

/// Wrap one paragraph into lines no wider than `max_width`.
///
/// The width of a candidate line of `n` characters is the metric's measure of
/// the whole string plus `spacing * (n - 1)`. Characters are appended one at a
/// time; when the next character would overflow, the current line is emitted
/// and the character starts a new one. A character wider than `max_width` on
/// its own still gets a line to itself.
///
/// An embedded `\n` is a hard break: the pending line is flushed and the
/// newline itself is discarded.
pub fn wrap<M>(paragraph: &str, spacing: f32, max_width: f32, metric: &M) -> Vec<Line>
where
    M: TextMeasure + ?Sized,
{
    let mut lines = Vec::new();
    let mut candidate = String::new();
    let mut count = 0usize;

    for ch in paragraph.chars() {
        if ch == '\n' {
            if !candidate.is_empty() {
                lines.push(Line::new(std::mem::take(&mut candidate)));
                count = 0;
            }
            continue;
        }

        candidate.push(ch);
        let width = metric.measure(&candidate) + spacing * count as f32;
        if count == 0 || width <= max_width {
            count += 1;
            continue;
        }

        candidate.pop();
        lines.push(Line::new(std::mem::replace(&mut candidate, ch.to_string())));
        count = 1;
    }

    if !candidate.is_empty() {
        lines.push(Line::new(candidate));
    }
    lines
}
