//! Markup shapes shared by the tokenizer, the renderers and the document adapter
//!
//! The scoring collaborator communicates with the engine through attributes injected
//! into opening tags and a comment placed right after each scored element:
//!
//! ```text
//! <p data-antar-score="42" data-antar-id="1f3a9c0b">...</p><!-- end antar-id#1f3a9c0b -->
//! ```
//!
//! Both attributes are stripped from tag tokens before comparison, so identical markup
//! carrying different ephemeral metadata still matches.

use anyhow::Context;
use regex::Regex;
use std::ops::Range;

pub const ID_ATTRIBUTE: &str = "data-antar-id";
pub const SCORE_ATTRIBUTE: &str = "data-antar-score";
/// Score assigned by the scorer to nodes that must never be tracked.
pub const EXCLUDED_SCORE: i64 = -9999;

pub const TAG_REGEX: &str = r"^\s*<[^>]+>\s*$";
pub const OPENING_TAG_REGEX: &str = r"^<[A-Za-z][^>]*>$";
pub const ID_ATTRIBUTE_REGEX: &str = r#"\sdata-antar-id="([^"]*)""#;
pub const SCORE_ATTRIBUTE_REGEX: &str = r#"\sdata-antar-score="(-?\d+)""#;
pub const END_MARKER_REGEX: &str = r"^<!--\s*end antar-id#(\S+)\s*-->$";
pub const COMMENT_REGEX: &str = r"(?s)<!--.*?(?:-->|\z)";
pub const ANY_TAG_REGEX: &str = r"<[^<>]+>";
pub const BODY_REGEX: &str = r"(?is)<body(?:\s[^>]*)?>(.*?)(?:</body\s*>|\z)";

pub fn id_attribute(id: &str) -> String {
    format!(" {ID_ATTRIBUTE}=\"{id}\"")
}

pub fn score_attribute(score: i64) -> String {
    format!(" {SCORE_ATTRIBUTE}=\"{score}\"")
}

pub fn end_marker(id: &str) -> String {
    format!("<!-- end antar-id#{id} -->")
}

/// Compiled markup patterns, built once per engine
#[derive(Debug, Clone)]
pub struct MarkupPatterns {
    tag: Regex,
    opening_tag: Regex,
    id_attribute: Regex,
    score_attribute: Regex,
    end_marker: Regex,
    comment: Regex,
    any_tag: Regex,
    body: Regex,
}

impl MarkupPatterns {
    pub fn try_new() -> anyhow::Result<Self> {
        Ok(Self {
            tag: compile(TAG_REGEX)?,
            opening_tag: compile(OPENING_TAG_REGEX)?,
            id_attribute: compile(ID_ATTRIBUTE_REGEX)?,
            score_attribute: compile(SCORE_ATTRIBUTE_REGEX)?,
            end_marker: compile(END_MARKER_REGEX)?,
            comment: compile(COMMENT_REGEX)?,
            any_tag: compile(ANY_TAG_REGEX)?,
            body: compile(BODY_REGEX)?,
        })
    }

    /// Whether the token text has the shape of an opening, closing or comment tag.
    pub fn is_tag(&self, text: &str) -> bool {
        self.tag.is_match(text)
    }

    pub fn is_opening_tag(&self, text: &str) -> bool {
        self.opening_tag.is_match(text)
    }

    pub fn is_comment(&self, text: &str) -> bool {
        text.starts_with("<!--")
    }

    pub fn injected_id<'t>(&self, tag: &'t str) -> Option<&'t str> {
        self.id_attribute
            .captures(tag)
            .and_then(|caps| caps.get(1))
            .map(|id| id.as_str())
    }

    pub fn injected_score(&self, tag: &str) -> Option<i64> {
        self.score_attribute
            .captures(tag)
            .and_then(|caps| caps.get(1))
            .and_then(|score| score.as_str().parse().ok())
    }

    /// The id closed by an end marker comment, if the text is one.
    pub fn end_marker_id<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.end_marker
            .captures(text)
            .and_then(|caps| caps.get(1))
            .map(|id| id.as_str())
    }

    pub fn strip_ids(&self, markup: &str) -> String {
        self.id_attribute.replace_all(markup, "").into_owned()
    }

    pub fn strip_scores(&self, markup: &str) -> String {
        self.score_attribute.replace_all(markup, "").into_owned()
    }

    pub fn strip_injected(&self, tag: &str) -> String {
        self.strip_scores(&self.strip_ids(tag))
    }

    /// Byte range of the first comment starting at or after `from`, unterminated ones
    /// running to the end of input.
    pub fn next_comment(&self, markup: &str, from: usize) -> Option<Range<usize>> {
        self.comment.find_at(markup, from).map(|comment| comment.range())
    }

    /// Byte range of the first tag starting at or after `from`.
    pub fn next_tag(&self, markup: &str, from: usize) -> Option<Range<usize>> {
        self.any_tag.find_at(markup, from).map(|tag| tag.range())
    }

    /// Text of a markup fragment with comments and tags removed and whitespace collapsed.
    pub fn visible_text(&self, markup: &str) -> String {
        let uncommented = self.comment.replace_all(markup, " ");
        self.any_tag
            .replace_all(&uncommented, " ")
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Inner markup of the first `body` element, if there is one.
    pub fn body<'m>(&self, markup: &'m str) -> Option<&'m str> {
        self.body
            .captures(markup)
            .and_then(|caps| caps.get(1))
            .map(|body| body.as_str())
    }
}

fn compile(pattern: &str) -> anyhow::Result<Regex> {
    Regex::new(pattern).with_context(|| format!("invalid markup regex: {pattern}"))
}
