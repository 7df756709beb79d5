//! Options for controlling tokenizer input.

use std::borrow::Cow;

/// Input preprocessing applied before a scan. The default leaves the text untouched, so tokens
/// of a scan cover exactly the original input.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LexerOptions {
    /// Strip leading and trailing newlines.
    pub strip_newlines: bool,

    /// Strip leading and trailing whitespace of any kind. Takes precedence over
    /// `strip_newlines`.
    pub strip_all: bool,

    /// Append a newline if the input does not end with one.
    pub ensure_newline: bool,

    /// Expand tabs to this many columns. `None` or `Some(0)` keeps tabs.
    pub tab_size: Option<usize>,
}

impl LexerOptions {
    /// Returns the text a scan should run on.
    pub fn prepare<'t>(&self, text: &'t str) -> Cow<'t, str> {
        let text = if self.strip_all {
            text.trim()
        } else if self.strip_newlines {
            text.trim_matches('\n')
        } else {
            text
        };
        let mut text = Cow::Borrowed(text);

        if let Some(tab_size) = self.tab_size.filter(|size| *size > 0) {
            if text.contains('\t') {
                text = Cow::Owned(expand_tabs(&text, tab_size));
            }
        }

        if self.ensure_newline && !text.ends_with('\n') {
            text.to_mut().push('\n');
        }

        text
    }
}

/// Replaces tabs with spaces up to the next multiple of `tab_size`, counting columns in chars.
fn expand_tabs(text: &str, tab_size: usize) -> String {
    let mut result = String::with_capacity(text.len());
    let mut column = 0;
    for c in text.chars() {
        match c {
            '\t' => {
                let width = tab_size - column % tab_size;
                result.extend(std::iter::repeat(' ').take(width));
                column += width;
            }
            '\n' | '\r' => {
                result.push(c);
                column = 0;
            }
            _ => {
                result.push(c);
                column += 1;
            }
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::LexerOptions;
    use std::borrow::Cow;

    #[test]
    fn default_borrows_input() {
        let prepared = LexerOptions::default().prepare("a\tb");
        assert!(matches!(prepared, Cow::Borrowed("a\tb")));
    }

    #[test]
    fn ensure_newline() {
        let options = LexerOptions {
            ensure_newline: true,
            ..LexerOptions::default()
        };
        assert_eq!(options.prepare("x"), "x\n");
        assert!(matches!(options.prepare("x\n"), Cow::Borrowed(_)));
        assert_eq!(options.prepare(""), "\n");
    }

    #[test]
    fn tabs_expand_to_next_stop() {
        let options = LexerOptions {
            tab_size: Some(4),
            ..LexerOptions::default()
        };
        assert_eq!(options.prepare("\tx"), "    x");
        assert_eq!(options.prepare("ab\tx\n\ty"), "ab  x\n    y");

        let keep = LexerOptions {
            tab_size: Some(0),
            ..LexerOptions::default()
        };
        assert_eq!(keep.prepare("\tx"), "\tx");
    }

    #[test]
    fn carriage_return_resets_tab_column() {
        let options = LexerOptions {
            tab_size: Some(4),
            ..LexerOptions::default()
        };
        assert_eq!(options.prepare("abc\r\tx"), "abc\r    x");
    }

    #[test]
    fn strip_newlines_keeps_other_whitespace() {
        let options = LexerOptions {
            strip_newlines: true,
            ..LexerOptions::default()
        };
        assert!(matches!(options.prepare("\n\n  x \n"), Cow::Borrowed("  x ")));
    }

    #[test]
    fn strip_all_then_ensure_newline() {
        let options = LexerOptions {
            strip_all: true,
            strip_newlines: true,
            ensure_newline: true,
            ..LexerOptions::default()
        };
        assert_eq!(options.prepare(" \n\tcontract C \n\n"), "contract C\n");
    }
}
