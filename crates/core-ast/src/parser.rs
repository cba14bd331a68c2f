//! Recursive-descent parser for the turtle-walk grammar:
//!
//! ```text
//! start  := seq EOF
//! seq    := command (';' command)*
//! command:= INIT '(' n ',' n ',' n ',' n ')'
//!         | TRANSLATION '(' n ',' n ')'
//!         | ROTATION '(' n ',' n ',' n ')'
//!         | ITER '{' seq '}'
//!         | '{' seq? '}' OR '{' seq? '}'
//! ```

use crate::ast::{AstContext, Node, SequenceId};
use crate::token::{Token, TokenKind};
use core_diag::{Diagnostic, DiagnosticSink};

pub struct Parser {
    context: AstContext,
    tokens: Vec<Token>,
    current: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            context: AstContext::new(),
            tokens,
            current: 0,
        }
    }

    /// Consumes the parser, handing back the arena it built. Call only
    /// after [`Parser::parse`] has returned a result you intend to keep —
    /// the arena still contains every node allocated, including ones from
    /// a partially-parsed, ultimately-rejected program.
    pub fn into_context(self) -> AstContext {
        self.context
    }

    pub fn context(&self) -> &AstContext {
        &self.context
    }

    /// Parses one complete program. Returns `None` (after reporting to
    /// `diagnostics`) on any syntactic error; there is no error recovery
    /// past the first one.
    pub fn parse(&mut self, diagnostics: &mut DiagnosticSink) -> Option<Node> {
        let root = self.sequence(true, diagnostics)?;
        if !self.is_at_end() {
            let tok = self.peek();
            self.error(tok, "end of file expected.", diagnostics);
            return None;
        }
        Some(Node::Sequence(root))
    }

    fn sequence(&mut self, root: bool, diagnostics: &mut DiagnosticSink) -> Option<SequenceId> {
        if root && !self.check(TokenKind::Init) {
            let tok = self.peek();
            self.error(tok, "'init' expected at the beginning of the program.", diagnostics);
            return None;
        }

        let mut commands = Vec::new();
        loop {
            commands.push(self.command(diagnostics)?);
            if !self.match_kind(TokenKind::Semicolon) {
                break;
            }
        }
        Some(self.context.make_sequence(commands))
    }

    fn command(&mut self, diagnostics: &mut DiagnosticSink) -> Option<Node> {
        if self.match_kind(TokenKind::Init) {
            let kw = self.previous();
            self.consume(TokenKind::LeftParen, "a '(' expected.", diagnostics)?;
            let top_x = self.consume_number(diagnostics)?;
            self.consume(TokenKind::Comma, "a ',' expected.", diagnostics)?;
            let top_y = self.consume_number(diagnostics)?;
            self.consume(TokenKind::Comma, "a ',' expected.", diagnostics)?;
            let width = self.consume_number(diagnostics)?;
            self.consume(TokenKind::Comma, "a ',' expected.", diagnostics)?;
            let height = self.consume_number(diagnostics)?;
            self.consume(TokenKind::RightParen, "a ')' expected.", diagnostics)?;

            if width < 0 {
                self.error(kw, "the width of the initial area cannot be negative.", diagnostics);
                return None;
            }
            if height < 0 {
                self.error(kw, "the height of the initial area cannot be negative.", diagnostics);
                return None;
            }
            return Some(self.context.make_init(kw.line, top_x, top_y, width, height));
        }

        if self.match_kind(TokenKind::Translation) {
            let kw = self.previous();
            self.consume(TokenKind::LeftParen, "a '(' expected.", diagnostics)?;
            let dx = self.consume_number(diagnostics)?;
            self.consume(TokenKind::Comma, "a ',' expected.", diagnostics)?;
            let dy = self.consume_number(diagnostics)?;
            self.consume(TokenKind::RightParen, "a ')' expected.", diagnostics)?;
            return Some(self.context.make_translation(kw.line, dx, dy));
        }

        if self.match_kind(TokenKind::Rotation) {
            let kw = self.previous();
            self.consume(TokenKind::LeftParen, "a '(' expected.", diagnostics)?;
            let ox = self.consume_number(diagnostics)?;
            self.consume(TokenKind::Comma, "a ',' expected.", diagnostics)?;
            let oy = self.consume_number(diagnostics)?;
            self.consume(TokenKind::Comma, "a ',' expected.", diagnostics)?;
            let deg = self.consume_number(diagnostics)?;
            self.consume(TokenKind::RightParen, "a ')' expected.", diagnostics)?;
            return Some(self.context.make_rotation(kw.line, ox, oy, deg));
        }

        if self.match_kind(TokenKind::Iter) {
            return self.loop_(diagnostics);
        }
        if self.match_kind(TokenKind::LeftBrace) {
            return self.branch(diagnostics);
        }

        if self.is_at_end() || self.check(TokenKind::RightBrace) {
            let tok = self.peek();
            self.error(tok, "redundant semicolon?", diagnostics);
        } else {
            let tok = self.peek();
            self.error(tok, "a command expected.", diagnostics);
        }
        None
    }

    fn branch(&mut self, diagnostics: &mut DiagnosticSink) -> Option<Node> {
        let lhs = if self.check(TokenKind::RightBrace) {
            self.context.make_sequence(Vec::new())
        } else {
            self.sequence(false, diagnostics)?
        };
        self.consume(TokenKind::RightBrace, "a '}' expected.", diagnostics)?;
        let kw = self.consume(TokenKind::Or, "'or' expected.", diagnostics)?;
        self.consume(TokenKind::LeftBrace, "a '{' expected.", diagnostics)?;

        let rhs = if self.check(TokenKind::RightBrace) {
            self.context.make_sequence(Vec::new())
        } else {
            self.sequence(false, diagnostics)?
        };
        self.consume(TokenKind::RightBrace, "a '}' expected.", diagnostics)?;

        let lhs_empty = self.context.sequence(lhs).nodes.is_empty();
        let rhs_empty = self.context.sequence(rhs).nodes.is_empty();
        if lhs_empty && rhs_empty {
            self.error(kw, "at most one alternative can be empty.", diagnostics);
            return None;
        }
        Some(self.context.make_branch(kw.line, lhs, rhs))
    }

    fn loop_(&mut self, diagnostics: &mut DiagnosticSink) -> Option<Node> {
        let kw = self.previous();
        self.consume(TokenKind::LeftBrace, "a '{' expected.", diagnostics)?;
        if self.match_kind(TokenKind::RightBrace) {
            self.error(kw, "the body of 'iter' must not be empty.", diagnostics);
            return None;
        }
        let body = self.sequence(false, diagnostics)?;
        self.consume(TokenKind::RightBrace, "a '}' expected.", diagnostics)?;
        Some(self.context.make_loop(kw.line, body))
    }

    fn consume(&mut self, kind: TokenKind, message: &str, diagnostics: &mut DiagnosticSink) -> Option<Token> {
        if self.check(kind) {
            return Some(self.advance());
        }
        let tok = self.peek();
        self.error(tok, message, diagnostics);
        None
    }

    fn consume_number(&mut self, diagnostics: &mut DiagnosticSink) -> Option<i32> {
        let tok = self.consume(TokenKind::Number, "a number expected.", diagnostics)?;
        tok.value
    }

    fn error(&self, token: Token, message: &str, diagnostics: &mut DiagnosticSink) {
        if token.kind == TokenKind::Eof {
            diagnostics.push(Diagnostic::at_eof(token.line, message));
        } else {
            diagnostics.push(Diagnostic::at_token(token.line, token.to_string(), message));
        }
    }

    fn peek(&self) -> Token {
        self.tokens[self.current]
    }

    fn previous(&self) -> Token {
        self.tokens[self.current - 1]
    }

    fn is_at_end(&self) -> bool {
        self.peek().kind == TokenKind::Eof
    }

    fn check(&self, kind: TokenKind) -> bool {
        if self.is_at_end() {
            return false;
        }
        self.peek().kind == kind
    }

    fn match_kind(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();
            true
        } else {
            false
        }
    }

    fn advance(&mut self) -> Token {
        if !self.is_at_end() {
            self.current += 1;
        }
        self.previous()
    }
}
