//! Definitions related to tokens.

use crate::source::InputSpan;
use crate::tokens::kind::TokenKind;

/// Represents a token: a classified, contiguous slice of the scanned text.
#[derive(PartialEq, Eq, Copy, Clone, Debug)]
pub struct Token<'t> {
    pub kind: TokenKind,
    pub span: InputSpan,
    pub text: &'t str,
}

impl<'t> Token<'t> {
    pub fn new(kind: TokenKind, span: InputSpan, text: &'t str) -> Token<'t> {
        Token { kind, span, text }
    }

    pub fn is_error(&self) -> bool {
        self.kind == TokenKind::Error
    }
}
