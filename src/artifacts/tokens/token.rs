use derive_new::new;
use std::fmt;

/// One lexical unit of a markup string: a word, a whitespace run, a punctuation
/// character or a whole tag.
///
/// `id` correlates the token with a scored node of its source document. Tag tokens carry
/// their own node id; text tokens inherit the id of the innermost scored node they sit in.
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Token {
    text: String,
    index: usize,
    id: Option<String>,
}

impl Token {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn index(&self) -> usize {
        self.index
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// Concatenated text of a token span.
pub fn join_text(tokens: &[Token]) -> String {
    tokens.iter().map(Token::text).collect()
}
