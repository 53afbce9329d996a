//! # Lexer
//!
//! Turns an expression string into a stream of tokens, one token per call of
//! `next_token`. Besides plain tokenization it inserts the multiplication sign that is
//! implied between adjacent tokens, so that `2x`, `3sin(x)` or `(a)(b)` come out as
//! `2*x`, `3*sin(x)` and `(a)*(b)`.
//!
//!# Example
//! ```
//! use rusted_calculus::symbolic::lexer::{Lexer, TokenKind};
//! let mut lexer = Lexer::new("2x", false, false);
//! let kinds: Vec<TokenKind> = lexer.tokenize().unwrap().iter().map(|t| t.kind).collect();
//! assert_eq!(
//!     kinds,
//!     vec![TokenKind::Number, TokenKind::BinOperator, TokenKind::Identifier, TokenKind::End]
//! );
//! ```
use crate::symbolic::error::{ExprError, Result};
use log::trace;
use regex::Regex;
use std::fmt;
use std::sync::LazyLock;
use strum_macros::Display;

static NUMBER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:0|[1-9][0-9]*)(?:\.[0-9]+)?").expect("valid regex"));
// function name must be glued to its opening bracket
static FUNCTION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?i-u:sin|cos|ln|exp)\(").expect("valid regex"));
static IDENTIFIER_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z_]+").expect("valid regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum TokenKind {
    Number,
    ImaginaryUnit,
    Identifier,
    Function,
    BinOperator,
    OpeningParen,
    ClosingParen,
    End,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub text: String,
}

impl Token {
    pub fn new(kind: TokenKind, text: &str) -> Self {
        Token {
            kind,
            text: text.to_string(),
        }
    }

    fn end() -> Self {
        Token::new(TokenKind::End, "EOL")
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "\"{}\" ({})", self.text, self.kind)
    }
}

/// pairs of (previous, current) token kinds with an implied `*` between them
fn implies_multiplication(prev: TokenKind, current: TokenKind) -> bool {
    use TokenKind::*;
    matches!(
        (prev, current),
        (Number, Identifier)
            | (Number, Function)
            | (Number, OpeningParen)
            | (Number, ImaginaryUnit)
            | (Identifier, OpeningParen)
            | (ImaginaryUnit, OpeningParen)
            | (ClosingParen, OpeningParen)
            | (ClosingParen, Number)
            | (ClosingParen, ImaginaryUnit)
            | (ClosingParen, Identifier)
            | (ClosingParen, Function)
    )
}

pub struct Lexer {
    input: String,
    pos: usize,
    imaginary_unit: bool,
    prev_kind: TokenKind,
    // token held back while a synthesized `*` is returned
    pending: Option<Token>,
    finished: bool,
}

impl Lexer {
    /// `case_sensitive == false` lower-cases the ASCII letters of the input up front;
    /// `imaginary_unit == true` makes a standalone `i` the imaginary unit token
    pub fn new(input: &str, case_sensitive: bool, imaginary_unit: bool) -> Self {
        let input = if case_sensitive {
            input.to_string()
        } else {
            input.to_ascii_lowercase()
        };
        Lexer {
            input,
            pos: 0,
            imaginary_unit,
            prev_kind: TokenKind::End,
            pending: None,
            finished: false,
        }
    }

    pub fn next_token(&mut self) -> Result<Token> {
        if let Some(token) = self.pending.take() {
            return Ok(token);
        }

        let token = self.scan_token()?;
        if token.kind == TokenKind::End {
            return Ok(token);
        }

        let prev_kind = self.prev_kind;
        self.prev_kind = token.kind;
        if implies_multiplication(prev_kind, token.kind) {
            trace!("implicit multiplication before {}", token);
            self.pending = Some(token);
            return Ok(Token::new(TokenKind::BinOperator, "*"));
        }
        Ok(token)
    }

    /// collects all tokens up to and including the end token
    pub fn tokenize(&mut self) -> Result<Vec<Token>> {
        self.by_ref().collect()
    }

    fn rest(&self) -> &str {
        &self.input[self.pos..]
    }

    fn match_pattern(&mut self, pattern: &Regex) -> Option<String> {
        let found = pattern.find(self.rest())?;
        let text = found.as_str().to_string();
        self.pos += found.end();
        Some(text)
    }

    fn scan_token(&mut self) -> Result<Token> {
        let rest = self.rest();
        let skipped = rest.len()
            - rest
                .trim_start_matches(|c: char| c.is_ascii_whitespace())
                .len();
        self.pos += skipped;

        let Some(chr) = self.rest().chars().next() else {
            return Ok(Token::end());
        };

        if let Some(text) = self.match_pattern(&NUMBER_PATTERN) {
            return Ok(self.emit(TokenKind::Number, text));
        }
        if let Some(text) = self.match_pattern(&FUNCTION_PATTERN) {
            return Ok(self.emit(TokenKind::Function, text));
        }
        if let Some(text) = self.match_pattern(&IDENTIFIER_PATTERN) {
            if self.imaginary_unit && text == "i" {
                return Ok(self.emit(TokenKind::ImaginaryUnit, text));
            }
            return Ok(self.emit(TokenKind::Identifier, text));
        }

        let position = self.pos;
        self.pos += chr.len_utf8();
        let kind = match chr {
            '+' | '-' | '*' | '/' | '^' => TokenKind::BinOperator,
            '(' => TokenKind::OpeningParen,
            ')' => TokenKind::ClosingParen,
            _ => {
                return Err(ExprError::UnexpectedCharacter {
                    character: chr,
                    position,
                });
            }
        };
        Ok(self.emit(kind, chr.to_string()))
    }

    fn emit(&self, kind: TokenKind, text: String) -> Token {
        let token = Token { kind, text };
        trace!("token {}", token);
        token
    }
}

/// yields tokens until (and including) the end token, or the first error
impl Iterator for Lexer {
    type Item = Result<Token>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        let token = self.next_token();
        match &token {
            Ok(t) if t.kind == TokenKind::End => self.finished = true,
            Err(_) => self.finished = true,
            _ => {}
        }
        Some(token)
    }
}
