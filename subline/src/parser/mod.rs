//! # Pattern parser
//! This module parses the pattern language into an [Ast] by recursive descent
//! with one token of lookahead, according to this grammar:
//!
//! ```text
//! regexp  := term ( '|' term )*
//! term    := (factor)*            // empty term permitted
//! factor  := primary ( '*' | '+' )?
//! primary := CHAR | '(' regexp ')'
//! ```
//!
//! There are five reserved bytes: `|`, `(`, `)`, `*` and `+`. Every other
//! byte is a literal; there is no escape mechanism. Note that a term may be
//! empty, which is how empty alternatives are represented: `(a|)` matches
//! either `a` or the empty string, `()` and the empty pattern both match only
//! the empty string.
//!
//! Exactly one postfix operator is consumed per factor, so `a**` is rejected
//! rather than read as `(a*)*`. A `*` or `+` with nothing to repeat (at the
//! start of the pattern, or right after `|` or `(`) is likewise a syntax
//! error; operators are never demoted to literals.
//!
//! ```
//! use subline::parser::{parse, SyntaxError};
//! use subline::ast::Ast;
//!
//! assert_eq!(parse(""), Ok(Ast::Empty));
//! assert_eq!(parse("a**"), Err(SyntaxError::ExpectedPrimary(2)));
//! assert_eq!(parse("(a"), Err(SyntaxError::ExpectedCloseParen(2)));
//! ```

mod lexer;

use crate::ast::Ast;
use lexer::Lexer;
pub use lexer::Token;
use thiserror::Error;

/// An ill-formed pattern. Each variant carries the byte offset of the
/// offending token.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SyntaxError {
    #[error("character or '(' expected at byte {0}")]
    ExpectedPrimary(usize),
    #[error("close paren expected at byte {0}")]
    ExpectedCloseParen(usize),
    #[error("trailing input at byte {0}")]
    TrailingInput(usize),
}

/// Parses a pattern into its syntax tree. All patterns accepted by this
/// function can be compiled; the parser allocates no automaton structures.
pub fn parse(pattern: &str) -> Result<Ast, SyntaxError> {
    let mut parser = Parser::new(pattern);
    let tree = parser.regexp()?;
    if parser.current != Token::End {
        return Err(SyntaxError::TrailingInput(parser.current_pos));
    }
    Ok(tree)
}

struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
    current_pos: usize,
}

impl<'a> Parser<'a> {
    fn new(pattern: &'a str) -> Self {
        let mut lexer = Lexer::new(pattern);
        let current = lexer.next_token();
        Self {
            lexer,
            current,
            current_pos: 0,
        }
    }

    fn advance(&mut self) {
        self.current_pos = self.lexer.pos();
        self.current = self.lexer.next_token();
    }

    fn regexp(&mut self) -> Result<Ast, SyntaxError> {
        let mut tree = self.term()?;
        while self.current == Token::Union {
            self.advance();
            tree = Ast::union(tree, self.term()?);
        }
        Ok(tree)
    }

    fn term(&mut self) -> Result<Ast, SyntaxError> {
        if self.at_term_end() {
            return Ok(Ast::Empty);
        }
        let mut tree = self.factor()?;
        while !self.at_term_end() {
            tree = Ast::concat(tree, self.factor()?);
        }
        Ok(tree)
    }

    fn at_term_end(&self) -> bool {
        matches!(self.current, Token::Union | Token::RPar | Token::End)
    }

    fn factor(&mut self) -> Result<Ast, SyntaxError> {
        let tree = self.primary()?;
        match self.current {
            Token::Star => {
                self.advance();
                Ok(Ast::closure(tree))
            }
            Token::Plus => {
                self.advance();
                Ok(Ast::concat(tree.clone(), Ast::closure(tree)))
            }
            _ => Ok(tree),
        }
    }

    fn primary(&mut self) -> Result<Ast, SyntaxError> {
        match self.current {
            Token::Char(byte) => {
                self.advance();
                Ok(Ast::Char(byte))
            }
            Token::LPar => {
                self.advance();
                let tree = self.regexp()?;
                if self.current != Token::RPar {
                    return Err(SyntaxError::ExpectedCloseParen(self.current_pos));
                }
                self.advance();
                Ok(tree)
            }
            _ => Err(SyntaxError::ExpectedPrimary(self.current_pos)),
        }
    }
}
