//! Input tokenization.
//!
//! Converts raw player input into a stream of tokens.

/// A token from player input.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum InputToken {
    /// A lowercase word
    Word(String),
    /// A quoted phrase, lowercased but kept as one argument
    Quoted(String),
}

impl InputToken {
    /// The token text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Word(s) | Self::Quoted(s) => s,
        }
    }

    /// Consumes the token, returning its text.
    #[must_use]
    pub fn into_string(self) -> String {
        match self {
            Self::Word(s) | Self::Quoted(s) => s,
        }
    }
}

/// Tokenizes player input.
pub struct InputTokenizer;

impl InputTokenizer {
    /// Tokenizes a raw input string.
    ///
    /// - Converts everything to lowercase
    /// - Splits on whitespace
    /// - Strips sentence punctuation (`. , ! ? ;`) outside quotes
    /// - Keeps `:` and `'` so ids and names like `mayor's` survive
    /// - Keeps a quoted phrase as a single token; an unterminated quote runs
    ///   to the end of input
    #[must_use]
    pub fn tokenize(input: &str) -> Vec<InputToken> {
        let mut tokens = Vec::new();
        let mut chars = input.chars();
        let mut current_word = String::new();

        while let Some(ch) = chars.next() {
            match ch {
                '"' => {
                    flush(&mut current_word, &mut tokens);
                    let quoted: String = chars.by_ref().take_while(|&c| c != '"').collect();
                    let quoted = quoted.trim().to_lowercase();
                    if !quoted.is_empty() {
                        tokens.push(InputToken::Quoted(quoted));
                    }
                }
                c if c.is_whitespace() => flush(&mut current_word, &mut tokens),
                '.' | ',' | '!' | '?' | ';' => {}
                _ => current_word.extend(ch.to_lowercase()),
            }
        }
        flush(&mut current_word, &mut tokens);
        tokens
    }
}

fn flush(word: &mut String, tokens: &mut Vec<InputToken>) {
    if !word.is_empty() {
        tokens.push(InputToken::Word(std::mem::take(word)));
    }
}
