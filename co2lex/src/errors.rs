//! Lexical error definitions.
//!
//! Scanning itself never fails: every character no rule accepts is emitted as an `Error` token
//! and the scan goes on. This module turns those tokens into diagnostics for reporting.

use codespan_reporting::diagnostic::{Diagnostic, Label};

use crate::source::InputSpan;
use crate::tokens::token::Token;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LexicalError {
    /// Unique code identifying a class of errors.
    pub code: &'static str,

    /// Short (single-line) message describing the problem.
    pub message: String,

    /// Location in code where the problem occurred.
    pub location: InputSpan,

    /// Extended description of the problem that is shown directly next to code.
    pub subtitle: Option<String>,
}

impl LexicalError {
    fn new(code: &'static str, message: impl Into<String>, location: InputSpan) -> LexicalError {
        LexicalError {
            code,
            message: message.into(),
            location,
            subtitle: None,
        }
    }

    fn with_subtitle(self, subtitle: impl Into<String>) -> LexicalError {
        LexicalError {
            subtitle: Some(subtitle.into()),
            ..self
        }
    }

    pub fn unrecognized_input(text: &str, location: InputSpan) -> LexicalError {
        let message = if text.chars().count() == 1 {
            "unrecognized character"
        } else {
            "unrecognized characters"
        };
        LexicalError::new("E0001", message, location)
            .with_subtitle(format!("no token starts with {:?}", text))
    }

    /// Builds a `codespan_reporting` diagnostic.
    pub fn to_codespan<I: Copy>(&self, file_id: I) -> Diagnostic<I> {
        let mut label = Label::primary(file_id, self.location.range());
        if let Some(ref subtitle) = self.subtitle {
            label = label.with_message(subtitle);
        }

        Diagnostic::error()
            .with_code(self.code)
            .with_message(&self.message)
            .with_labels(vec![label])
    }
}

/// Collects an error for every run of adjacent `Error` tokens.
pub fn lexical_errors<'t>(
    text: &'t str,
    tokens: impl IntoIterator<Item = Token<'t>>,
) -> Vec<LexicalError> {
    let mut spans: Vec<InputSpan> = Vec::new();
    for token in tokens.into_iter().filter(Token::is_error) {
        match spans.last_mut() {
            Some(last) if last.end == token.span.start => *last = last.merge(token.span),
            _ => spans.push(token.span),
        }
    }

    spans
        .into_iter()
        .map(|span| LexicalError::unrecognized_input(&text[span.range()], span))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::lexical_errors;
    use crate::source::InputSpan;
    use crate::tokenize;

    #[test]
    fn merges_adjacent_error_characters() {
        let text = "a \u{1}\u{2} b \u{3}";
        let errors = lexical_errors(text, tokenize(text));
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].location, InputSpan::new(2, 4));
        assert_eq!(errors[0].message, "unrecognized characters");
        assert_eq!(errors[1].location, InputSpan::new(7, 8));
        assert_eq!(errors[1].message, "unrecognized character");
        assert!(errors.iter().all(|error| error.code == "E0001"));
    }

    #[test]
    fn clean_source_has_no_errors() {
        let text = "contract C { tell x; }\n";
        assert!(lexical_errors(text, tokenize(text)).is_empty());
    }

    #[test]
    fn diagnostics_point_at_the_error() {
        let text = "x \u{7}";
        let errors = lexical_errors(text, tokenize(text));
        let diagnostic = errors[0].to_codespan(());
        assert_eq!(diagnostic.code.as_deref(), Some("E0001"));
        assert_eq!(diagnostic.labels.len(), 1);
        assert_eq!(diagnostic.labels[0].range, 2..3);
    }
}
