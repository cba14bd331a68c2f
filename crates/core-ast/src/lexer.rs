//! A hand-written lexer. `// …` line comments and non-nesting `/* … */`
//! block comments are skipped; everything else either maps to a
//! single-character token, a keyword, a number literal, or is a lexical
//! error.

use crate::token::{Token, TokenKind};
use core_diag::{Diagnostic, DiagnosticSink};

const KEYWORDS: &[(&str, TokenKind)] = &[
    ("init", TokenKind::Init),
    ("or", TokenKind::Or),
    ("translation", TokenKind::Translation),
    ("rotation", TokenKind::Rotation),
    ("iter", TokenKind::Iter),
];

pub struct Lexer<'a> {
    source: &'a [u8],
    start: usize,
    current: usize,
    line: u32,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self {
            source: source.as_bytes(),
            start: 0,
            current: 0,
            line: 1,
        }
    }

    /// Lexes the entire source. On the first lexical error, reports it to
    /// `diagnostics` and returns `None` (an empty token list, per the
    /// error-handling contract: lexical errors are fatal for the run).
    pub fn lex_all(mut self, diagnostics: &mut DiagnosticSink) -> Option<Vec<Token>> {
        let mut tokens = Vec::new();
        while !self.is_at_end() {
            match self.lex(diagnostics) {
                LexStep::Token(tok) => tokens.push(tok),
                LexStep::Skip => {}
                LexStep::Error => return None,
            }
        }
        tokens.push(Token::new(TokenKind::Eof, self.line, None));
        Some(tokens)
    }

    fn lex(&mut self, diagnostics: &mut DiagnosticSink) -> LexStep {
        loop {
            self.start = self.current;
            if self.is_at_end() {
                return LexStep::Skip;
            }
            let c = self.advance();
            return match c {
                b'(' => LexStep::Token(Token::new(TokenKind::LeftParen, self.line, None)),
                b')' => LexStep::Token(Token::new(TokenKind::RightParen, self.line, None)),
                b'{' => LexStep::Token(Token::new(TokenKind::LeftBrace, self.line, None)),
                b'}' => LexStep::Token(Token::new(TokenKind::RightBrace, self.line, None)),
                b',' => LexStep::Token(Token::new(TokenKind::Comma, self.line, None)),
                b';' => LexStep::Token(Token::new(TokenKind::Semicolon, self.line, None)),
                b'\n' => {
                    self.line += 1;
                    continue;
                }
                b' ' | b'\r' | b'\t' => continue,
                b'/' => {
                    if self.match_char(b'/') {
                        while !self.is_at_end() && self.advance() != b'\n' {}
                        continue;
                    }
                    if self.match_char(b'*') {
                        if !self.skip_block_comment() {
                            diagnostics.push(Diagnostic::plain(self.line, "Multiline comment not closed."));
                            return LexStep::Error;
                        }
                        continue;
                    }
                    diagnostics.push(Diagnostic::plain(
                        self.line,
                        format!("Unexpected token: '{}'.", self.lexeme()),
                    ));
                    LexStep::Error
                }
                b'-' => match self.lex_number() {
                    Some(tok) => LexStep::Token(tok),
                    None => {
                        diagnostics.push(Diagnostic::plain(self.line, "Expected number after '-'."));
                        LexStep::Error
                    }
                },
                c if c.is_ascii_digit() => match self.lex_number() {
                    Some(tok) => LexStep::Token(tok),
                    None => {
                        diagnostics.push(Diagnostic::plain(self.line, "Expected number."));
                        LexStep::Error
                    }
                },
                c if c.is_ascii_alphabetic() => match self.lex_keyword() {
                    Some(tok) => LexStep::Token(tok),
                    None => {
                        diagnostics.push(Diagnostic::plain(
                            self.line,
                            format!("Unexpected token: '{}'.", self.lexeme()),
                        ));
                        LexStep::Error
                    }
                },
                _ => {
                    diagnostics.push(Diagnostic::plain(
                        self.line,
                        format!("Unexpected token: '{}'.", self.lexeme()),
                    ));
                    LexStep::Error
                }
            };
        }
    }

    fn skip_block_comment(&mut self) -> bool {
        loop {
            while !self.is_at_end() && self.peek() != b'*' {
                if self.peek() == b'\n' {
                    self.line += 1;
                }
                self.advance();
            }
            if self.is_at_end() {
                return false;
            }
            self.advance(); // consume '*'
            if self.is_at_end() {
                return false;
            }
            if self.advance() == b'/' {
                return true;
            }
        }
    }

    fn lex_number(&mut self) -> Option<Token> {
        while self.peek().is_ascii_digit() {
            self.advance();
        }
        let text = self.lexeme();
        let value: i32 = text.parse().ok()?;
        Some(Token::new(TokenKind::Number, self.line, Some(value)))
    }

    fn lex_keyword(&mut self) -> Option<Token> {
        while self.peek().is_ascii_alphabetic() {
            self.advance();
        }
        let text = self.lexeme();
        KEYWORDS
            .iter()
            .find(|(name, _)| *name == text)
            .map(|(_, kind)| Token::new(*kind, self.line, None))
    }

    fn lexeme(&self) -> String {
        String::from_utf8_lossy(&self.source[self.start..self.current]).into_owned()
    }

    fn is_at_end(&self) -> bool {
        self.current >= self.source.len()
    }

    fn advance(&mut self) -> u8 {
        let c = self.source[self.current];
        self.current += 1;
        c
    }

    fn peek(&self) -> u8 {
        if self.is_at_end() {
            b'\0'
        } else {
            self.source[self.current]
        }
    }

    fn match_char(&mut self, expected: u8) -> bool {
        if self.is_at_end() || self.source[self.current] != expected {
            return false;
        }
        self.current += 1;
        true
    }
}

enum LexStep {
    Token(Token),
    Skip,
    Error,
}
