//! Renderers turning an operation list into output
//!
//! - `markup`: inline annotated markup and the two passes of split mode
//! - `changeset`: structured change records plus the score side table
//! - `terminal`: colored preview for the command line
//!
//! All renderers read the same `DiffView`; they only differ in what each action becomes.

pub mod changeset;
pub mod markup;
pub mod terminal;

use crate::artifacts::markup::MarkupPatterns;
use crate::artifacts::operations::operation::Operation;
use crate::artifacts::tokens::score_table::ScoreTable;
use crate::artifacts::tokens::token::Token;
use bitflags::bitflags;
use derive_new::new;

pub const INSERT_ELEMENT: &str = "ins";
pub const DELETE_ELEMENT: &str = "del";

/// Everything a renderer needs from one diff call
#[derive(Debug, Clone, Copy, new)]
pub struct DiffView<'d> {
    pub old_tokens: &'d [Token],
    pub new_tokens: &'d [Token],
    pub operations: &'d [Operation],
    pub scores: &'d ScoreTable,
    pub patterns: &'d MarkupPatterns,
}

impl<'d> DiffView<'d> {
    pub fn old_span(&self, operation: &Operation) -> &'d [Token] {
        &self.old_tokens[operation.old_range()]
    }

    pub fn new_span(&self, operation: &Operation) -> &'d [Token] {
        &self.new_tokens[operation.new_range()]
    }

    /// Split a span into maximal runs of tag tokens and of non-tag tokens.
    pub fn tag_runs<'t>(&self, tokens: &'t [Token]) -> impl Iterator<Item = &'t [Token]> {
        let patterns = self.patterns;
        tokens.chunk_by(move |a, b| patterns.is_tag(a.text()) == patterns.is_tag(b.text()))
    }
}

/// Class names put on the wrapper elements
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrapperClasses {
    pub insert: String,
    pub delete: String,
    pub replace: String,
}

impl Default for WrapperClasses {
    fn default() -> Self {
        Self {
            insert: "diffins".to_string(),
            delete: "diffdel".to_string(),
            replace: "diffmod".to_string(),
        }
    }
}

bitflags! {
    /// Which side of the edits a markup pass renders
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Sides: u8 {
        const DELETIONS = 0b01;
        const INSERTIONS = 0b10;
        const BOTH = Self::DELETIONS.bits() | Self::INSERTIONS.bits();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn tag_runs_separate_tags_from_text() {
        let patterns = MarkupPatterns::try_new().unwrap();
        let tokens = ["<b>", "<i>", "word", " ", "</i>", "tail"]
            .iter()
            .enumerate()
            .map(|(index, text)| Token::new(text.to_string(), index, None))
            .collect::<Vec<_>>();
        let scores = ScoreTable::default();
        let view = DiffView::new(&tokens, &tokens, &[], &scores, &patterns);

        let runs = view
            .tag_runs(&tokens)
            .map(|run| run.iter().map(Token::text).collect::<Vec<_>>())
            .collect::<Vec<_>>();

        assert_eq!(
            runs,
            vec![
                vec!["<b>", "<i>"],
                vec!["word", " "],
                vec!["</i>"],
                vec!["tail"]
            ]
        );
    }
}
