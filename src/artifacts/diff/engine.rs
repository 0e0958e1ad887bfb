use crate::OutputMode;
use crate::artifacts::markup::MarkupPatterns;
use crate::artifacts::matching::block_matcher::BlockMatcher;
use crate::artifacts::operations::operation::{Operation, build_operations};
use crate::artifacts::render::changeset::{Changeset, render_changeset};
use crate::artifacts::render::markup::MarkupRenderer;
use crate::artifacts::render::terminal::render_terminal;
use crate::artifacts::render::{DiffView, Sides, WrapperClasses};
use crate::artifacts::tokens::score_table::ScoreTable;
use crate::artifacts::tokens::token::Token;
use crate::artifacts::tokens::tokenizer::{TokenizedMarkup, Tokenizer};
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiffOptions {
    pub output: OutputMode,
    /// Read ids and scores injected by the document adapter
    pub scored: bool,
    pub classes: WrapperClasses,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SplitMarkup {
    pub left: String,
    pub right: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum DiffOutput {
    Markup(String),
    Changeset(Changeset),
    Split(SplitMarkup),
}

/// Tokens, scores and operations of one comparison, before rendering
#[derive(Debug, Clone, Default)]
pub struct Comparison {
    pub old_tokens: Vec<Token>,
    pub new_tokens: Vec<Token>,
    pub scores: ScoreTable,
    pub operations: Vec<Operation>,
}

#[derive(Debug, Clone)]
pub struct DiffEngine {
    options: DiffOptions,
    patterns: MarkupPatterns,
}

impl DiffEngine {
    pub fn new(options: DiffOptions) -> anyhow::Result<Self> {
        Ok(Self {
            options,
            patterns: MarkupPatterns::try_new()?,
        })
    }

    pub fn options(&self) -> &DiffOptions {
        &self.options
    }

    pub fn patterns(&self) -> &MarkupPatterns {
        &self.patterns
    }

    pub fn tokenize(&self, markup: &str) -> TokenizedMarkup {
        Tokenizer::new(&self.patterns, self.options.scored).tokenize(markup)
    }

    pub fn compare(&self, old_markup: &str, new_markup: &str) -> Comparison {
        let old = self.tokenize(old_markup);
        let new = self.tokenize(new_markup);

        let matches = BlockMatcher::new(&old.tokens, &new.tokens).matching_blocks();
        let operations = build_operations(old.tokens.len(), new.tokens.len(), &matches);
        debug_log!(
            "compared {} old / {} new tokens: {} blocks",
            old.tokens.len(),
            new.tokens.len(),
            matches.len()
        );

        let mut scores = old.scores;
        scores.merge(new.scores);

        Comparison {
            old_tokens: old.tokens,
            new_tokens: new.tokens,
            scores,
            operations,
        }
    }

    pub fn diff(&self, old_markup: &str, new_markup: &str) -> DiffOutput {
        let comparison = self.compare(old_markup, new_markup);
        self.render(&comparison)
    }

    pub fn render(&self, comparison: &Comparison) -> DiffOutput {
        let view = DiffView::new(
            &comparison.old_tokens,
            &comparison.new_tokens,
            &comparison.operations,
            &comparison.scores,
            &self.patterns,
        );
        let classes = &self.options.classes;

        match self.options.output {
            OutputMode::Inline => {
                DiffOutput::Markup(MarkupRenderer::new(view, classes, Sides::BOTH, false).render())
            }
            OutputMode::Changeset => DiffOutput::Changeset(render_changeset(&view)),
            OutputMode::Split => {
                let scored = self.options.scored;
                DiffOutput::Split(SplitMarkup {
                    left: MarkupRenderer::new(view, classes, Sides::DELETIONS, scored).render(),
                    right: MarkupRenderer::new(view, classes, Sides::INSERTIONS, scored).render(),
                })
            }
            OutputMode::Terminal => DiffOutput::Markup(render_terminal(&view)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::operations::operation::Action;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;
    use rstest::rstest;

    fn engine(output: OutputMode) -> DiffEngine {
        DiffEngine::new(DiffOptions {
            output,
            ..Default::default()
        })
        .unwrap()
    }

    /// Inline output with deletions removed and insertion wrappers unwrapped.
    fn accept_changes(markup: &str) -> String {
        let deletions = regex::Regex::new(r#"(?s)<del class="[^"]*">.*?</del>"#).unwrap();
        let insertions = regex::Regex::new(r#"<ins class="[^"]*">|</ins>"#).unwrap();
        insertions
            .replace_all(&deletions.replace_all(markup, ""), "")
            .into_owned()
    }

    fn unwrap_all(markup: &str) -> String {
        let wrappers = regex::Regex::new(r#"<(ins|del) class="[^"]*">|</(ins|del)>"#).unwrap();
        wrappers.replace_all(markup, "").into_owned()
    }

    #[rstest]
    #[case("a b c", "a c", vec![Action::Equal, Action::Delete, Action::Equal])]
    #[case("a c", "a b c", vec![Action::Equal, Action::Insert, Action::Equal])]
    #[case("a b c", "a d c", vec![Action::Equal, Action::Replace, Action::Equal])]
    #[case("", "x", vec![Action::Insert])]
    #[case("x", "", vec![Action::Delete])]
    #[case("", "", vec![])]
    fn classifies_documented_examples(
        #[case] old: &str,
        #[case] new: &str,
        #[case] expected: Vec<Action>,
    ) {
        let comparison = engine(OutputMode::Inline).compare(old, new);
        let actions = comparison
            .operations
            .iter()
            .map(|operation| operation.action)
            .collect::<Vec<_>>();

        assert_eq!(actions, expected);
    }

    #[test]
    fn identical_inputs_render_unchanged() {
        let markup = "<p>Nothing <em>changed</em> here.</p>";
        let engine = engine(OutputMode::Inline);

        let comparison = engine.compare(markup, markup);

        assert_eq!(comparison.operations.len(), 1);
        assert_eq!(comparison.operations[0].action, Action::Equal);
        assert_eq!(
            engine.render(&comparison),
            DiffOutput::Markup(markup.to_string())
        );
    }

    #[test]
    fn split_mode_renders_both_documents() {
        let old = "<p>The quick fox</p>";
        let new = "<p>The slow brown fox</p>";

        let DiffOutput::Split(split) = engine(OutputMode::Split).diff(old, new) else {
            panic!("expected split output");
        };

        assert_eq!(unwrap_all(&split.left), old);
        assert_eq!(unwrap_all(&split.right), new);
        assert!(split.left.contains(r#"<del class="diffmod">quick</del>"#));
        assert!(!split.left.contains("<ins"));
        assert!(!split.right.contains("<del"));
    }

    #[test]
    fn changeset_records_match_inline_wrappers() {
        let old = "one two three four";
        let new = "one 2 three four five";

        let DiffOutput::Changeset(changeset) = engine(OutputMode::Changeset).diff(old, new) else {
            panic!("expected changeset output");
        };
        let DiffOutput::Markup(inline) = engine(OutputMode::Inline).diff(old, new) else {
            panic!("expected markup output");
        };

        let wrappers = inline.matches("<ins ").count() + inline.matches("<del ").count();
        assert_eq!(changeset.changes.len(), wrappers);
    }

    #[test]
    fn scored_split_mode_rematerializes_scores() {
        let engine = DiffEngine::new(DiffOptions {
            output: OutputMode::Split,
            scored: true,
            ..Default::default()
        })
        .unwrap();
        let old = r#"<p data-antar-score="3" data-antar-id="a1">old words</p><!-- end antar-id#a1 -->"#;
        let new = r#"<p data-antar-score="8" data-antar-id="b1">new words</p><!-- end antar-id#b1 -->"#;

        let DiffOutput::Split(split) = engine.diff(old, new) else {
            panic!("expected split output");
        };

        assert_eq!(
            split.left,
            r#"<p data-antar-score="3"><del class="diffmod">old</del> words</p>"#
        );
        assert_eq!(
            split.right,
            r#"<p data-antar-score="8"><ins class="diffmod">new</ins> words</p>"#
        );
    }

    fn markup_strategy() -> impl Strategy<Value = String> {
        prop::collection::vec(
            prop_oneof![
                prop::sample::select(vec!["a", "b", "c", "dog", "cat", "#x", "@y"])
                    .prop_map(str::to_string),
                prop::sample::select(vec![" ", "  ", "\n", ",", "."]).prop_map(str::to_string),
                prop::sample::select(vec!["<p>", "</p>", "<b>", "</b>", "<br/>"])
                    .prop_map(str::to_string),
            ],
            0..40,
        )
        .prop_map(|parts| parts.concat())
    }

    proptest! {
        #[test]
        fn prop_operations_partition_both_sequences(
            old in markup_strategy(),
            new in markup_strategy()
        ) {
            let comparison = engine(OutputMode::Inline).compare(&old, &new);
            let (mut old_end, mut new_end) = (0, 0);

            for operation in &comparison.operations {
                prop_assert_eq!(operation.start_in_old, old_end);
                prop_assert_eq!(operation.start_in_new, new_end);
                old_end = operation.end_in_old;
                new_end = operation.end_in_new;
            }

            prop_assert_eq!(old_end, comparison.old_tokens.len());
            prop_assert_eq!(new_end, comparison.new_tokens.len());
        }

        #[test]
        fn prop_accepting_inline_changes_yields_new(
            old in markup_strategy(),
            new in markup_strategy()
        ) {
            let DiffOutput::Markup(inline) = engine(OutputMode::Inline).diff(&old, &new) else {
                panic!("expected markup output");
            };

            prop_assert_eq!(accept_changes(&inline), new);
        }

        #[test]
        fn prop_split_sides_reproduce_inputs(
            old in markup_strategy(),
            new in markup_strategy()
        ) {
            let DiffOutput::Split(split) = engine(OutputMode::Split).diff(&old, &new) else {
                panic!("expected split output");
            };

            prop_assert_eq!(unwrap_all(&split.left), old);
            prop_assert_eq!(unwrap_all(&split.right), new);
        }

        #[test]
        fn prop_identical_inputs_are_one_equal(markup in markup_strategy()) {
            let engine = engine(OutputMode::Inline);
            let comparison = engine.compare(&markup, &markup);

            if comparison.old_tokens.is_empty() {
                prop_assert!(comparison.operations.is_empty());
            } else {
                prop_assert_eq!(comparison.operations.len(), 1);
                prop_assert_eq!(comparison.operations[0].action, Action::Equal);
            }
            prop_assert_eq!(engine.render(&comparison), DiffOutput::Markup(markup));
        }
    }
}
