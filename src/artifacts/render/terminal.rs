use crate::artifacts::operations::operation::Action;
use crate::artifacts::render::DiffView;
use crate::artifacts::tokens::token::join_text;
use colored::Colorize;

/// Colored preview: deletions red and struck through, insertions green and underlined.
pub fn render_terminal(view: &DiffView<'_>) -> String {
    let mut output = String::new();

    for operation in view.operations {
        let old_text = join_text(view.old_span(operation));
        let new_text = join_text(view.new_span(operation));

        match operation.action {
            Action::Equal => output.push_str(&new_text),
            Action::Insert => output.push_str(&new_text.green().underline().to_string()),
            Action::Delete => output.push_str(&old_text.red().strikethrough().to_string()),
            Action::Replace => {
                output.push_str(&old_text.red().strikethrough().to_string());
                output.push_str(&new_text.green().underline().to_string());
            }
        }
    }

    output
}
