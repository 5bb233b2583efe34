// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Text flow — line wrapping, pagination, and sentence chunking for photo
// cards. Pure functions over strings; nothing here touches pixels.

pub mod chunk;
pub mod paginate;
pub mod wrap;

pub use chunk::{CardPlan, chunk, plan_cards, split_sentences};
pub use paginate::{flow_lines, paginate, paginate_lines};
pub use wrap::wrap;

#[cfg(test)]
pub(crate) mod testing {
    use crate::font::TextMeasure;

    /// Every character advances `narrow` pixels, except non-ASCII characters
    /// which advance `wide`.
    pub struct FixedAdvance {
        pub narrow: f32,
        pub wide: f32,
    }

    impl FixedAdvance {
        pub fn uniform(px: f32) -> Self {
            Self { narrow: px, wide: px }
        }
    }

    impl TextMeasure for FixedAdvance {
        fn measure(&self, text: &str) -> f32 {
            text.chars()
                .map(|c| if c.is_ascii() { self.narrow } else { self.wide })
                .sum()
        }
    }

    /// Fixed advance with a negative kern between `A` and `V` in either
    /// order, so a line measures narrower than its characters one by one.
    pub struct Kerned {
        pub advance: f32,
        pub kern: f32,
    }

    impl Kerned {
        fn pair(&self, prev: char, next: char) -> f32 {
            match (prev, next) {
                ('A', 'V') | ('V', 'A') => -self.kern,
                _ => 0.0,
            }
        }
    }

    impl TextMeasure for Kerned {
        fn measure(&self, text: &str) -> f32 {
            match self.carets(text).last() {
                Some(last) => last + self.advance,
                None => 0.0,
            }
        }

        fn carets(&self, text: &str) -> Vec<f32> {
            let mut x = 0.0;
            let mut prev = None;
            text.chars()
                .map(|ch| {
                    if let Some(prev) = prev {
                        x += self.pair(prev, ch);
                    }
                    let at = x;
                    x += self.advance;
                    prev = Some(ch);
                    at
                })
                .collect()
        }
    }
}
