//! Boundary with the content scorer
//!
//! A scorer assigns an importance score to elements of a document before it is diffed. The
//! engine never calls it directly: the document adapter injects the scores as attributes and
//! the tokenizer reads them back.

use crate::artifacts::markup::EXCLUDED_SCORE;
use derive_new::new;
use sha1::{Digest, Sha1};

const ID_LENGTH: usize = 8;

const BLOCK_ELEMENTS: [&str; 20] = [
    "p",
    "div",
    "section",
    "article",
    "main",
    "aside",
    "header",
    "footer",
    "li",
    "blockquote",
    "pre",
    "figure",
    "td",
    "th",
    "h1",
    "h2",
    "h3",
    "h4",
    "h5",
    "h6",
];
const EXCLUDED_ELEMENTS: [&str; 5] = ["script", "style", "nav", "noscript", "template"];

/// What a scorer gets to see of an element
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct ElementView<'d> {
    /// Lowercase tag name
    pub name: &'d str,
    pub open_tag: &'d str,
    /// Visible text with whitespace collapsed
    pub text: String,
}

pub trait ContentScorer {
    /// Score of the element, `None` to leave it untracked. `EXCLUDED_SCORE` keeps it out of
    /// tracking even when it already carries an id.
    fn score(&self, element: &ElementView<'_>) -> Option<i64>;
}

/// Scores block elements by the length of their visible text
#[derive(Debug, Clone, Copy, Default)]
pub struct TextLengthScorer;

impl ContentScorer for TextLengthScorer {
    fn score(&self, element: &ElementView<'_>) -> Option<i64> {
        if EXCLUDED_ELEMENTS.contains(&element.name) {
            return Some(EXCLUDED_SCORE);
        }

        if !BLOCK_ELEMENTS.contains(&element.name) || element.text.is_empty() {
            return None;
        }

        Some(element.text.chars().count() as i64)
    }
}

/// Hands out short ephemeral node ids
///
/// Ids are the first hex digits of SHA-1 over the seed and a counter: they look random,
/// repeat for the same seed, and may collide in rare cases.
#[derive(Debug, Clone)]
pub struct IdGenerator {
    seed: String,
    counter: u64,
}

impl IdGenerator {
    pub fn new(seed: impl Into<String>) -> Self {
        Self {
            seed: seed.into(),
            counter: 0,
        }
    }

    pub fn next_id(&mut self) -> String {
        let mut hasher = Sha1::new();
        hasher.update(self.seed.as_bytes());
        hasher.update(self.counter.to_be_bytes());
        self.counter += 1;

        let digest = format!("{:x}", hasher.finalize());
        digest[..ID_LENGTH].to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("p", "hello world", Some(11))]
    #[case("h2", "Title", Some(5))]
    #[case("span", "inline", None)]
    #[case("div", "", None)]
    #[case("script", "var x = 1;", Some(EXCLUDED_SCORE))]
    #[case("nav", "Home About", Some(EXCLUDED_SCORE))]
    fn scores_block_elements_by_text_length(
        #[case] name: &str,
        #[case] text: &str,
        #[case] expected: Option<i64>,
    ) {
        let element = ElementView::new(name, "<x>", text.to_string());
        assert_eq!(TextLengthScorer.score(&element), expected);
    }

    #[test]
    fn ids_are_short_hex_and_distinct() {
        let mut ids = IdGenerator::new("seed");
        let first = ids.next_id();
        let second = ids.next_id();

        assert_eq!(first.len(), ID_LENGTH);
        assert!(first.chars().all(|c| c.is_ascii_hexdigit()));
        assert_ne!(first, second);
    }

    #[test]
    fn ids_repeat_for_the_same_seed() {
        let mut left = IdGenerator::new("same");
        let mut right = IdGenerator::new("same");

        assert_eq!(left.next_id(), right.next_id());
    }
}
