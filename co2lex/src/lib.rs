//! Tokenizer for CO2 sources, meant for syntax highlighting.
//!
//! The source text is split into a lazy stream of classified tokens that together cover the
//! whole input. Malformed input never stops a scan: characters no rule accepts are emitted as
//! `Error` tokens.

use lazy_static::lazy_static;

pub mod errors;
pub mod options;
pub mod source;
pub mod tokens;

pub use crate::errors::{lexical_errors, LexicalError};
pub use crate::options::LexerOptions;
pub use crate::source::InputSpan;
pub use crate::tokens::co2::{Co2State, Co2Tokenizer, Co2Tokens};
pub use crate::tokens::kind::{TokenCategory, TokenKind};
pub use crate::tokens::token::Token;

pub const FILENAMES: &[&str] = &["*.co2"];

lazy_static! {
    static ref CO2_TOKENIZER: Co2Tokenizer = Co2Tokenizer::new();
}

/// Scans `text` from the root state.
pub fn tokenize(text: &str) -> Co2Tokens<'static, '_> {
    CO2_TOKENIZER.tokens(text)
}

/// Checks whether the file name of `path` matches one of `FILENAMES`.
pub fn matches_filename(path: &str) -> bool {
    let file_name = path.rsplit(|c: char| c == '/' || c == '\\').next().unwrap_or(path);
    FILENAMES.iter().any(|pattern| {
        let suffix = pattern.trim_start_matches('*');
        file_name.len() > suffix.len() && file_name.ends_with(suffix)
    })
}
