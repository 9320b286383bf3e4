//! Lexer (tokenizer) for session scripts.

use crate::error::{CanvasError, Result};

/// A token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The kind of token
    pub kind: TokenKind,
    /// The token's text (without quotes for `Text`)
    pub text: String,
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed)
    pub column: usize,
}

/// Token types in a session script.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// A bare word: command, alias, id, terminal reference or number
    Word,
    /// A double-quoted string
    Text,
    /// Equals sign '='
    Equals,
    /// Newline
    Newline,
    /// End of file
    Eof,
}

/// Lexer for tokenizing session script input.
pub struct Lexer<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given input.
    pub fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
            line: 1,
            column: 1,
        }
    }

    /// Get the next token.
    pub fn next_token(&mut self) -> Result<Token> {
        self.skip_whitespace_and_comments();

        let line = self.line;
        let column = self.column;
        let token = |kind, text: String| Token {
            kind,
            text,
            line,
            column,
        };

        let Some(&ch) = self.chars.peek() else {
            return Ok(token(TokenKind::Eof, String::new()));
        };

        match ch {
            '\n' => {
                self.advance();
                Ok(token(TokenKind::Newline, "\n".to_string()))
            }
            '=' => {
                self.advance();
                Ok(token(TokenKind::Equals, "=".to_string()))
            }
            '"' => {
                self.advance();
                let text = self.read_quoted(line, column)?;
                Ok(token(TokenKind::Text, text))
            }
            _ => Ok(token(TokenKind::Word, self.read_word())),
        }
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.chars.next()?;
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn skip_whitespace_and_comments(&mut self) {
        while let Some(&ch) = self.chars.peek() {
            match ch {
                ' ' | '\t' | '\r' => {
                    self.advance();
                }
                '#' | ';' => {
                    // Comment runs to end of line; the newline itself is a token
                    while let Some(&c) = self.chars.peek() {
                        if c == '\n' {
                            break;
                        }
                        self.advance();
                    }
                }
                _ => break,
            }
        }
    }

    fn read_word(&mut self) -> String {
        let mut word = String::new();
        while let Some(&ch) = self.chars.peek() {
            if ch.is_whitespace() || matches!(ch, '=' | '"' | '#' | ';') {
                break;
            }
            word.push(ch);
            self.advance();
        }
        word
    }

    fn read_quoted(&mut self, line: usize, column: usize) -> Result<String> {
        let mut text = String::new();
        loop {
            match self.advance() {
                Some('"') => return Ok(text),
                Some('\n') | None => {
                    return Err(CanvasError::parse(
                        line,
                        format!("unterminated string starting at column {}", column),
                    ))
                }
                Some(ch) => text.push(ch),
            }
        }
    }
}

/// Parse a number string with optional unit suffix.
///
/// `none` (any case) is accepted and yields NaN, meaning "value missing".
pub fn parse_value(text: &str) -> Option<f64> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    if text.eq_ignore_ascii_case("none") {
        return Some(f64::NAN);
    }

    let (num_str, multiplier) = match text.chars().last() {
        Some(last) => {
            let mult = match last {
                'p' => 1e-12,
                'n' => 1e-9,
                'u' | 'µ' => 1e-6,
                'm' => 1e-3,
                'k' | 'K' => 1e3,
                'M' => 1e6,
                'G' => 1e9,
                _ => 1.0,
            };
            if mult != 1.0 {
                (&text[..text.len() - last.len_utf8()], mult)
            } else {
                (text, 1.0)
            }
        }
        None => (text, 1.0),
    };

    num_str
        .parse::<f64>()
        .ok()
        .map(|v| v * multiplier)
        .filter(|v| v.is_finite())
}
