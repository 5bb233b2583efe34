// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Sentence chunking for photo-card pages.

use std::collections::VecDeque;

use pagewright_core::{SENTENCES_PER_CHUNK, Sentence, SentenceChunk};
use tracing::debug;

/// Longest sentence placed on a card, in characters.
pub const MAX_SENTENCE_CHARS: usize = 24;

const TERMINATORS: [char; 6] = ['。', '！', '？', '.', '?', '!'];

/// Marks that stay attached to the sentence they close.
const CLOSING_MARKS: [char; 8] = ['”', '’', '"', '\'', '」', '』', '）', ')'];

/// Split text into trimmed, non-empty sentences.
///
/// A sentence ends at a newline or after a run of terminal punctuation. Any
/// closing quotes or brackets directly after the punctuation belong to the
/// sentence, so a split never lands in front of a closing quote. Terminal
/// punctuation is kept; the newline is not.
pub fn split_sentences(text: &str) -> Vec<Sentence> {
    let mut sentences = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\n' {
            flush(&mut current, &mut sentences);
            continue;
        }
        current.push(ch);
        if TERMINATORS.contains(&ch) {
            while let Some(&next) = chars.peek() {
                if TERMINATORS.contains(&next) || CLOSING_MARKS.contains(&next) {
                    current.push(next);
                    chars.next();
                } else {
                    break;
                }
            }
            flush(&mut current, &mut sentences);
        }
    }
    flush(&mut current, &mut sentences);
    sentences
}

fn flush(current: &mut String, out: &mut Vec<Sentence>) {
    let trimmed = current.trim();
    if !trimmed.is_empty() {
        out.push(trimmed.to_string());
    }
    current.clear();
}

/// Cut every sentence longer than `max_chars` into pieces of at most
/// `max_chars` characters, preserving order.
///
/// Pending sentences sit in a work queue; an over-long head is emitted and
/// its remainder goes back to the front of the queue to be examined again.
pub fn limit_sentence_length(sentences: Vec<Sentence>, max_chars: usize) -> Vec<Sentence> {
    let max_chars = max_chars.max(1);
    let mut queue: VecDeque<Sentence> = sentences.into();
    let mut out = Vec::with_capacity(queue.len());

    while let Some(sentence) = queue.pop_front() {
        let Some((cut, _)) = sentence.char_indices().nth(max_chars) else {
            out.push(sentence);
            continue;
        };
        let (head, rest) = sentence.split_at(cut);
        out.push(head.trim_end().to_string());
        let rest = rest.trim();
        if !rest.is_empty() {
            queue.push_front(rest.to_string());
        }
    }
    out
}

/// Group sentences four at a time; the last group is padded with empty
/// strings.
pub fn chunk_sentences(sentences: &[Sentence]) -> Vec<SentenceChunk> {
    sentences
        .chunks(SENTENCES_PER_CHUNK)
        .map(|group| SentenceChunk::padded(group.iter().cloned()))
        .collect()
}

/// Split, length-limit and chunk a whole document.
pub fn chunk(text: &str) -> Vec<SentenceChunk> {
    let sentences = limit_sentence_length(split_sentences(text), MAX_SENTENCE_CHARS);
    chunk_sentences(&sentences)
}

/// How a document is divided between photo-card pages and text pages.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardPlan {
    /// One chunk per card page, in order.
    pub chunks: Vec<SentenceChunk>,
    /// Text left for the solid-background pipeline.
    pub remaining_text: String,
}

/// Decide which sentences go onto the `image_count` available backgrounds.
///
/// Card pages rendered is `min(image_count, chunk_count)`. Sentences beyond
/// those pages are re-joined with newlines. With no card pages the document
/// is passed through untouched.
pub fn plan_cards(text: &str, image_count: usize) -> CardPlan {
    if image_count == 0 {
        return CardPlan {
            chunks: Vec::new(),
            remaining_text: text.to_string(),
        };
    }

    let sentences = limit_sentence_length(split_sentences(text), MAX_SENTENCE_CHARS);
    let chunk_count = sentences.len().div_ceil(SENTENCES_PER_CHUNK);
    let pages = image_count.min(chunk_count);
    let consumed = (pages * SENTENCES_PER_CHUNK).min(sentences.len());

    let (on_cards, rest) = sentences.split_at(consumed);
    debug!(
        sentences = sentences.len(),
        card_pages = pages,
        leftover = rest.len(),
        "Card plan computed"
    );
    CardPlan {
        chunks: chunk_sentences(on_cards),
        remaining_text: rest.join("\n"),
    }
}
