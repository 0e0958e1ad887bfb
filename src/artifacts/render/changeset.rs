use crate::artifacts::operations::operation::Action;
use crate::artifacts::render::DiffView;
use crate::artifacts::tokens::score_table::ScoreTable;
use crate::artifacts::tokens::token::{Token, join_text};
use serde::{Deserialize, Serialize};
use std::ops::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ChangeAction {
    Insert,
    Delete,
}

/// One non-equal edit: token positions `[start_index, end_index)` of the new sequence for an
/// insertion, of the old sequence for a deletion
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Change {
    pub action: ChangeAction,
    pub start_index: usize,
    pub end_index: usize,
    pub id: Option<String>,
}

impl Change {
    fn over(action: ChangeAction, range: Range<usize>, tokens: &[Token]) -> Self {
        Self {
            action,
            start_index: range.start,
            end_index: range.end,
            id: tokens.first().and_then(Token::id).map(str::to_string),
        }
    }
}

/// Structured rendering of a diff
///
/// `output` holds the unchanged text only; edits are described by `changes`, and `scores`
/// carries the score of every tracked node referenced by an id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Changeset {
    pub output: String,
    pub changes: Vec<Change>,
    pub scores: ScoreTable,
}

pub fn render_changeset(view: &DiffView<'_>) -> Changeset {
    let mut changeset = Changeset {
        scores: view.scores.clone(),
        ..Default::default()
    };

    for operation in view.operations {
        let old_span = view.old_span(operation);
        let new_span = view.new_span(operation);

        match operation.action {
            Action::Equal => changeset.output.push_str(&join_text(new_span)),
            Action::Insert => changeset.changes.push(Change::over(
                ChangeAction::Insert,
                operation.new_range(),
                new_span,
            )),
            Action::Delete => changeset.changes.push(Change::over(
                ChangeAction::Delete,
                operation.old_range(),
                old_span,
            )),
            Action::Replace => {
                changeset.changes.push(Change::over(
                    ChangeAction::Delete,
                    operation.old_range(),
                    old_span,
                ));
                changeset.changes.push(Change::over(
                    ChangeAction::Insert,
                    operation.new_range(),
                    new_span,
                ));
            }
        }
    }

    changeset
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::markup::MarkupPatterns;
    use crate::artifacts::matching::block_matcher::BlockMatcher;
    use crate::artifacts::operations::operation::build_operations;
    use crate::artifacts::tokens::tokenizer::Tokenizer;
    use pretty_assertions::assert_eq;

    fn changeset(old: &str, new: &str, scored: bool) -> Changeset {
        let patterns = MarkupPatterns::try_new().unwrap();
        let tokenizer = Tokenizer::new(&patterns, scored);
        let old = tokenizer.tokenize(old);
        let new = tokenizer.tokenize(new);
        let matches = BlockMatcher::new(&old.tokens, &new.tokens).matching_blocks();
        let operations = build_operations(old.tokens.len(), new.tokens.len(), &matches);
        let mut scores = old.scores;
        scores.merge(new.scores);
        let view = DiffView::new(&old.tokens, &new.tokens, &operations, &scores, &patterns);

        render_changeset(&view)
    }

    #[test]
    fn replacement_yields_delete_then_insert() {
        let result = changeset("a b c", "a d c", false);

        assert_eq!(result.output, "a  c");
        assert_eq!(
            result.changes,
            vec![
                Change {
                    action: ChangeAction::Delete,
                    start_index: 2,
                    end_index: 3,
                    id: None
                },
                Change {
                    action: ChangeAction::Insert,
                    start_index: 2,
                    end_index: 3,
                    id: None
                },
            ]
        );
    }

    #[test]
    fn changes_carry_the_id_of_their_first_token() {
        let old = r#"<p data-antar-score="4" data-antar-id="o1">one</p><!-- end antar-id#o1 -->"#;
        let new = r#"<p data-antar-score="9" data-antar-id="n1">one two</p><!-- end antar-id#n1 -->"#;

        let result = changeset(old, new, true);

        assert_eq!(
            result.changes,
            vec![Change {
                action: ChangeAction::Insert,
                start_index: 2,
                end_index: 4,
                id: Some("n1".to_string())
            }]
        );
        assert_eq!(result.scores.score("o1"), Some(4));
        assert_eq!(result.scores.score("n1"), Some(9));
    }

    #[test]
    fn serializes_records_with_wire_field_names() {
        let result = changeset("a", "b", false);
        let json = serde_json::to_value(&result.changes).unwrap();

        assert_eq!(
            json,
            serde_json::json!([
                { "action": "DELETE", "startIndex": 0, "endIndex": 1, "id": null },
                { "action": "INSERT", "startIndex": 0, "endIndex": 1, "id": null }
            ])
        );
    }
}
