use crate::artifacts::matching::block_matcher::Match;
use derive_new::new;
use std::fmt;
use std::ops::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Insert,
    Delete,
    Replace,
    Equal,
}

impl Action {
    /// Classify the gap between the cursors and the next match, `None` when there is no gap.
    fn for_gap(aligned_in_old: bool, aligned_in_new: bool) -> Option<Self> {
        match (aligned_in_old, aligned_in_new) {
            (false, false) => Some(Action::Replace),
            (true, false) => Some(Action::Insert),
            (false, true) => Some(Action::Delete),
            (true, true) => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Insert => "insert",
            Action::Delete => "delete",
            Action::Replace => "replace",
            Action::Equal => "equal",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// One edit over the half-open ranges `[start_in_old, end_in_old)` and `[start_in_new, end_in_new)`
#[derive(Debug, Clone, Copy, PartialEq, Eq, new)]
pub struct Operation {
    pub action: Action,
    pub start_in_old: usize,
    pub end_in_old: usize,
    pub start_in_new: usize,
    pub end_in_new: usize,
}

impl Operation {
    pub fn old_range(&self) -> Range<usize> {
        self.start_in_old..self.end_in_old
    }

    pub fn new_range(&self) -> Range<usize> {
        self.start_in_new..self.end_in_new
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<7} old[{}..{}] new[{}..{}]",
            self.action, self.start_in_old, self.end_in_old, self.start_in_new, self.end_in_new
        )
    }
}

/// Turn ordered matching blocks into a gapless partition of both sequences.
pub fn build_operations(old_len: usize, new_len: usize, matches: &[Match]) -> Vec<Operation> {
    let mut operations = Vec::new();
    let (mut old_position, mut new_position) = (0, 0);
    let sentinel = Match::sentinel(old_len, new_len);

    for block in matches.iter().chain(std::iter::once(&sentinel)) {
        let aligned_in_old = old_position == block.start_in_old;
        let aligned_in_new = new_position == block.start_in_new;

        if let Some(action) = Action::for_gap(aligned_in_old, aligned_in_new) {
            operations.push(Operation::new(
                action,
                old_position,
                block.start_in_old,
                new_position,
                block.start_in_new,
            ));
        }

        if block.size > 0 {
            operations.push(Operation::new(
                Action::Equal,
                block.start_in_old,
                block.end_in_old(),
                block.start_in_new,
                block.end_in_new(),
            ));
        }

        old_position = block.end_in_old();
        new_position = block.end_in_new();
    }

    debug_log!("{} operations from {} blocks", operations.len(), matches.len());
    operations
}
