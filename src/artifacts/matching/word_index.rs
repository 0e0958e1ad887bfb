use crate::artifacts::tokens::token::Token;
use std::collections::HashMap;

/// Maps each token text of a sequence to the ascending positions where it occurs
#[derive(Debug, Clone, Default)]
pub struct WordIndex<'t> {
    positions: HashMap<&'t str, Vec<usize>>,
}

impl<'t> WordIndex<'t> {
    pub fn build(tokens: &'t [Token]) -> Self {
        let mut positions: HashMap<&'t str, Vec<usize>> = HashMap::new();
        for (position, token) in tokens.iter().enumerate() {
            positions.entry(token.text()).or_default().push(position);
        }

        Self { positions }
    }

    /// Positions of `text`, empty when it never occurs.
    pub fn positions(&self, text: &str) -> &[usize] {
        self.positions.get(text).map(Vec::as_slice).unwrap_or(&[])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tokens(texts: &[&str]) -> Vec<Token> {
        texts
            .iter()
            .enumerate()
            .map(|(index, text)| Token::new(text.to_string(), index, None))
            .collect()
    }

    #[test]
    fn lists_positions_in_ascending_order() {
        let tokens = tokens(&["a", " ", "b", " ", "a"]);
        let index = WordIndex::build(&tokens);

        assert_eq!(index.positions("a"), &[0, 4]);
        assert_eq!(index.positions(" "), &[1, 3]);
        assert_eq!(index.positions("b"), &[2]);
    }

    #[test]
    fn missing_text_has_no_positions() {
        let tokens = tokens(&["a"]);
        let index = WordIndex::build(&tokens);

        assert!(index.positions("z").is_empty());
    }
}
