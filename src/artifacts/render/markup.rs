use crate::artifacts::markup::score_attribute;
use crate::artifacts::operations::operation::{Action, Operation};
use crate::artifacts::render::{DELETE_ELEMENT, DiffView, INSERT_ELEMENT, Sides, WrapperClasses};
use crate::artifacts::tokens::token::Token;
use derive_new::new;
use std::borrow::Cow;

/// Renders operations as markup with `ins`/`del` wrappers
///
/// With `Sides::BOTH` this is the inline rendering: unchanged text comes from the new
/// sequence and a replacement shows its deleted half right before its inserted half.
/// With a single side it is one pass of the split rendering: unchanged text comes from that
/// side's own sequence and edits of the other side are left out.
///
/// Wrapped spans are cut into tag runs and text runs, each with its own wrapper, so a
/// wrapper never straddles a tag boundary.
#[derive(Debug, Clone, new)]
pub struct MarkupRenderer<'d> {
    view: DiffView<'d>,
    classes: &'d WrapperClasses,
    sides: Sides,
    rematerialize_scores: bool,
}

impl MarkupRenderer<'_> {
    pub fn render(&self) -> String {
        let mut output = String::new();
        for operation in self.view.operations {
            self.render_operation(&mut output, operation);
        }

        output
    }

    fn render_operation(&self, output: &mut String, operation: &Operation) {
        let deletions = self.sides.contains(Sides::DELETIONS);
        let insertions = self.sides.contains(Sides::INSERTIONS);

        match operation.action {
            Action::Equal => {
                let tokens = if insertions {
                    self.view.new_span(operation)
                } else {
                    self.view.old_span(operation)
                };
                self.push_tokens(output, tokens);
            }
            Action::Insert => {
                if insertions {
                    let tokens = self.view.new_span(operation);
                    self.wrap(output, INSERT_ELEMENT, &self.classes.insert, tokens);
                }
            }
            Action::Delete => {
                if deletions {
                    let tokens = self.view.old_span(operation);
                    self.wrap(output, DELETE_ELEMENT, &self.classes.delete, tokens);
                }
            }
            Action::Replace => {
                if deletions {
                    let tokens = self.view.old_span(operation);
                    self.wrap(output, DELETE_ELEMENT, &self.classes.replace, tokens);
                }
                if insertions {
                    let tokens = self.view.new_span(operation);
                    self.wrap(output, INSERT_ELEMENT, &self.classes.replace, tokens);
                }
            }
        }
    }

    fn wrap(&self, output: &mut String, element: &str, class: &str, tokens: &[Token]) {
        for run in self.view.tag_runs(tokens) {
            output.push_str(&format!("<{element} class=\"{class}\">"));
            self.push_tokens(output, run);
            output.push_str(&format!("</{element}>"));
        }
    }

    fn push_tokens(&self, output: &mut String, tokens: &[Token]) {
        for token in tokens {
            output.push_str(&self.emitted_text(token));
        }
    }

    fn emitted_text<'t>(&self, token: &'t Token) -> Cow<'t, str> {
        let text = token.text();
        if !self.rematerialize_scores || !self.view.patterns.is_opening_tag(text) {
            return Cow::Borrowed(text);
        }

        let Some(score) = token.id().and_then(|id| self.view.scores.score(id)) else {
            return Cow::Borrowed(text);
        };

        let insert_at = if text.ends_with("/>") {
            text.len() - 2
        } else {
            text.len() - 1
        };
        let mut emitted = String::with_capacity(text.len() + 32);
        emitted.push_str(&text[..insert_at]);
        emitted.push_str(&score_attribute(score));
        emitted.push_str(&text[insert_at..]);

        Cow::Owned(emitted)
    }
}
