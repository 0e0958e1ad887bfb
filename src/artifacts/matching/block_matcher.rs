//! Block matching between an old and a new token sequence
//!
//! The matcher looks for the longest contiguous run of identical tokens inside a pair of
//! ranges, then splits both ranges around that run and repeats on each side. This is not a
//! full LCS: each step commits to one locally best run, which keeps the common case close to
//! linear and produces large, readable blocks.
//!
//! ## Finding one run
//!
//! For every old position `i`, the candidate new positions come from the word index. A rolling
//! table keyed by new position holds the length of the common run ending at `(i - 1, j - 1)`;
//! the run ending at `(i, j)` is one longer. Only strictly longer runs replace the best one, so
//! ties resolve to the earliest run in the old sequence, then in the new sequence.
//!
//! ## Splitting
//!
//! Sub-ranges are processed through an explicit work stack rather than recursion, so inputs
//! alternating between matches and edits cannot exhaust the call stack. Blocks come out in the
//! same left-to-right order the recursive formulation would produce.

use crate::artifacts::matching::word_index::WordIndex;
use crate::artifacts::tokens::token::Token;
use derive_new::new;
use std::collections::HashMap;
use std::ops::Range;

/// `size` tokens starting at `start_in_old` equal the `size` tokens starting at `start_in_new`
#[derive(Debug, Clone, Copy, PartialEq, Eq, new)]
pub struct Match {
    pub start_in_old: usize,
    pub start_in_new: usize,
    pub size: usize,
}

impl Match {
    /// Zero-sized match closing both sequences, so the trailing gap is always represented.
    pub fn sentinel(old_len: usize, new_len: usize) -> Self {
        Self::new(old_len, new_len, 0)
    }

    pub fn end_in_old(&self) -> usize {
        self.start_in_old + self.size
    }

    pub fn end_in_new(&self) -> usize {
        self.start_in_new + self.size
    }
}

enum Work {
    Search(Range<usize>, Range<usize>),
    Emit(Match),
}

pub struct BlockMatcher<'t> {
    old_tokens: &'t [Token],
    new_tokens: &'t [Token],
    index: WordIndex<'t>,
}

impl<'t> BlockMatcher<'t> {
    pub fn new(old_tokens: &'t [Token], new_tokens: &'t [Token]) -> Self {
        Self {
            old_tokens,
            new_tokens,
            index: WordIndex::build(new_tokens),
        }
    }

    /// All matching blocks between the two full sequences, in order.
    pub fn matching_blocks(&self) -> Vec<Match> {
        self.find_all_matching_blocks(0..self.old_tokens.len(), 0..self.new_tokens.len())
    }

    pub fn find_all_matching_blocks(&self, old: Range<usize>, new: Range<usize>) -> Vec<Match> {
        let mut blocks = Vec::new();
        let mut stack = vec![Work::Search(old, new)];

        while let Some(work) = stack.pop() {
            match work {
                Work::Emit(block) => blocks.push(block),
                Work::Search(old, new) => {
                    let Some(block) = self.find_match(old.clone(), new.clone()) else {
                        continue;
                    };
                    debug_log!(
                        "block {:?} in old {:?} / new {:?}",
                        block,
                        old,
                        new
                    );

                    // pushed in reverse: before, block, after
                    if block.end_in_old() < old.end && block.end_in_new() < new.end {
                        stack.push(Work::Search(
                            block.end_in_old()..old.end,
                            block.end_in_new()..new.end,
                        ));
                    }
                    stack.push(Work::Emit(block));
                    if old.start < block.start_in_old && new.start < block.start_in_new {
                        stack.push(Work::Search(
                            old.start..block.start_in_old,
                            new.start..block.start_in_new,
                        ));
                    }
                }
            }
        }

        blocks
    }

    /// The longest run of equal tokens within both ranges, earliest first on ties.
    pub fn find_match(&self, old: Range<usize>, new: Range<usize>) -> Option<Match> {
        let mut best: Option<Match> = None;
        let mut length_at: HashMap<usize, usize> = HashMap::new();

        for i in old {
            let mut next_length_at = HashMap::new();

            for &j in self.index.positions(self.old_tokens[i].text()) {
                if j < new.start {
                    continue;
                }
                if j >= new.end {
                    break;
                }

                let length = j
                    .checked_sub(1)
                    .and_then(|previous| length_at.get(&previous))
                    .copied()
                    .unwrap_or(0)
                    + 1;
                next_length_at.insert(j, length);

                if best.is_none_or(|best| length > best.size) {
                    best = Some(Match::new(i + 1 - length, j + 1 - length, length));
                }
            }

            length_at = next_length_at;
        }

        best
    }
}
