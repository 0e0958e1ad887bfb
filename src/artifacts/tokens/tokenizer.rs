use crate::artifacts::markup::{EXCLUDED_SCORE, MarkupPatterns};
use crate::artifacts::tokens::score_table::ScoreTable;
use crate::artifacts::tokens::token::Token;
use derive_new::new;

const TAG_OPEN: char = '<';
const TAG_CLOSE: char = '>';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Text,
    Tag,
    Whitespace,
}

/// Tokens of one markup string together with the scores injected into its tags
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenizedMarkup {
    pub tokens: Vec<Token>,
    pub scores: ScoreTable,
}

/// Splits markup into words, whitespace runs, punctuation and tags.
///
/// With `scored` set, tags are inspected for the attributes injected by the document
/// adapter: ids are lifted onto the tokens (and carried onto the text inside the node
/// until its end marker), scores are collected into the score table, and both are
/// stripped from the tag text so they never take part in comparison.
#[derive(Debug, Clone, Copy, new)]
pub struct Tokenizer<'p> {
    patterns: &'p MarkupPatterns,
    scored: bool,
}

impl Tokenizer<'_> {
    pub fn tokenize(&self, markup: &str) -> TokenizedMarkup {
        let mut scanner = Scanner::new(self.patterns, self.scored);
        for ch in markup.chars() {
            scanner.push(ch);
        }

        scanner.finish()
    }
}

struct Scanner<'p> {
    patterns: &'p MarkupPatterns,
    scored: bool,
    mode: Mode,
    current: String,
    tokens: Vec<Token>,
    open_ids: Vec<String>,
    scores: ScoreTable,
}

impl<'p> Scanner<'p> {
    fn new(patterns: &'p MarkupPatterns, scored: bool) -> Self {
        Self {
            patterns,
            scored,
            mode: Mode::Text,
            current: String::new(),
            tokens: Vec::new(),
            open_ids: Vec::new(),
            scores: ScoreTable::default(),
        }
    }

    fn push(&mut self, ch: char) {
        match self.mode {
            Mode::Text => {
                if ch == TAG_OPEN {
                    self.flush_text();
                    self.current.push(ch);
                    self.mode = Mode::Tag;
                } else if ch.is_whitespace() {
                    self.flush_text();
                    self.current.push(ch);
                    self.mode = Mode::Whitespace;
                } else if is_word_char(ch) {
                    self.current.push(ch);
                } else {
                    self.flush_text();
                    self.emit(ch.to_string(), self.current_id());
                }
            }
            Mode::Tag => {
                self.current.push(ch);
                if ch == TAG_CLOSE {
                    self.flush_tag();
                    self.mode = Mode::Text;
                }
            }
            Mode::Whitespace => {
                if ch.is_whitespace() {
                    self.current.push(ch);
                } else {
                    self.flush_text();
                    self.mode = Mode::Text;
                    self.push(ch);
                }
            }
        }
    }

    fn finish(mut self) -> TokenizedMarkup {
        // an unterminated tag is kept as plain text
        self.flush_text();

        TokenizedMarkup {
            tokens: self.tokens,
            scores: self.scores,
        }
    }

    fn flush_text(&mut self) {
        if !self.current.is_empty() {
            let text = std::mem::take(&mut self.current);
            self.emit(text, self.current_id());
        }
    }

    fn flush_tag(&mut self) {
        let raw = std::mem::take(&mut self.current);
        if !self.scored {
            self.emit(raw, None);
            return;
        }

        if let Some(id) = self.patterns.end_marker_id(&raw) {
            if let Some(position) = self.open_ids.iter().rposition(|open| open == id) {
                self.open_ids.truncate(position);
            }
            return;
        }

        if self.patterns.is_comment(&raw) {
            let text = self.patterns.strip_injected(&raw);
            self.emit(text, None);
            return;
        }

        let score = self.patterns.injected_score(&raw);
        let id = match score {
            Some(EXCLUDED_SCORE) => None,
            _ => self.patterns.injected_id(&raw).map(str::to_string),
        };

        if let Some(id) = &id {
            if let Some(score) = score {
                self.scores.insert(id, score);
            }
            self.open_ids.push(id.clone());
        }

        let text = self.patterns.strip_injected(&raw);
        self.emit(text, id);
    }

    fn current_id(&self) -> Option<String> {
        self.open_ids.last().cloned()
    }

    fn emit(&mut self, text: String, id: Option<String>) {
        let index = self.tokens.len();
        self.tokens.push(Token::new(text, index, id));
    }
}

fn is_word_char(ch: char) -> bool {
    (ch.is_alphanumeric() && !is_ideographic(ch)) || matches!(ch, '_' | '#' | '@')
}

// Scripts written without spaces between words diff one character at a time.
fn is_ideographic(ch: char) -> bool {
    matches!(ch,
        '\u{3040}'..='\u{30FF}'
        | '\u{3400}'..='\u{4DBF}'
        | '\u{4E00}'..='\u{9FFF}'
        | '\u{AC00}'..='\u{D7AF}'
        | '\u{F900}'..='\u{FAFF}'
        | '\u{20000}'..='\u{2FA1F}'
    )
}
