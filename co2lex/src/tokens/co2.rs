//! CO2 tokenizer definitions.
//!
//! The table is ordered: within a state, earlier rules take priority over later ones even when a
//! later rule would produce a longer match. Do not reorder rules without checking the keyword
//! and identifier boundaries below.

use crate::tokens::kind::TokenKind;
use crate::tokens::tokenizer::{Rule, Tokenizer, TokenizerRules, Tokens};

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub enum Co2State {
    Root,

    /// Entered after `specification`, `contract`, `process` or `honesty`; left after the name.
    Entity,

    /// Entered after `package`; left after the namespace path.
    System,
}

const KEYWORDS: &[&str] = &[
    "if",
    "then",
    "else",
    "switch",
    "case",
    "default",
    "tell",
    "do",
    "receive",
    "send",
    "tellAndReturn",
    "tellAndWait",
    "tellRetract",
    "t",
    "retract",
    "ask",
    "from",
    "to",
    "after",
];

const TYPES: &[&str] = &["int", "string", "unit", "session", "boolean"];

const CONSTANTS: &[&str] = &["true", "false", "null"];

const ENTITY_DECLARATIONS: &[&str] = &["specification", "contract", "process", "honesty"];

/// `\s` extended with the information separators U+001C..U+001F.
const SPACE: &str = r"[\s\x1c-\x1f]";

const IDENT: &str = r"(?:[^\W\d]|\$)[\w$]*";

const DIGITS: &str = r"[0-9](?:_*[0-9]+)*";

const HEX_DIGITS: &str = r"[0-9a-fA-F](?:_*[0-9a-fA-F]+)*";

/// `if|then|...` for use inside a group.
fn alternation(words: &[&str]) -> String {
    words.join("|")
}

fn float_pattern() -> String {
    let exponent = format!(r"[eE][+\-]?{}", DIGITS);
    let hex_mantissa = format!(r"{hex}\.?|(?:{hex})?\.{hex}", hex = HEX_DIGITS);
    [
        // 1.5, 1., .5 with optional exponent and suffix.
        format!(
            r"(?:{d}\.(?:{d})?|(?:{d})?\.{d})(?:{e})?[fFdD]?",
            d = DIGITS,
            e = exponent
        ),
        // 1e5
        format!(r"[0-9]{}[fFdD]?", exponent),
        // 1f, 1e5d
        format!(r"[0-9](?:{})?[fFdD]", exponent),
        // 0x1.8p3
        format!(r"0[xX](?:{})[pP][+\-]?{}[fFdD]?", hex_mantissa, DIGITS),
    ]
    .join("|")
}

pub struct Co2Rules;

impl TokenizerRules for Co2Rules {
    type State = Co2State;

    fn root() -> Co2State {
        Co2State::Root
    }

    fn rules() -> Vec<(Co2State, Vec<Rule<Co2State>>)> {
        vec![
            (
                Co2State::Root,
                vec![
                    Rule::emit(r"(?:[^\S\n]|[\x1c-\x1f])+", TokenKind::Text),
                    // A comment on the last line may lack its newline.
                    Rule::emit(r"//[^\n]*(?:\n|\z)", TokenKind::CommentSingle),
                    Rule::emit(r"/\*.*?\*/", TokenKind::CommentMultiline),
                    // Keywords go before actions, so that `send!` is a keyword and an action.
                    Rule::emit(&format!(r"(?:{})\b", alternation(KEYWORDS)), TokenKind::Keyword),
                    Rule::emit(r"single\b", TokenKind::KeywordDeclaration),
                    Rule::emit(&format!(r"(?:{})\b", alternation(TYPES)), TokenKind::KeywordType),
                    // Internal and external actions.
                    Rule::emit(&format!(r"\w*{}*[!?]", SPACE), TokenKind::NameConstant),
                    Rule::by_groups(
                        &format!(r"(package)({}+)", SPACE),
                        &[TokenKind::KeywordNamespace, TokenKind::Text],
                    )
                    .push(Co2State::System),
                    Rule::emit(
                        &format!(r"(?:{})\b", alternation(CONSTANTS)),
                        TokenKind::KeywordConstant,
                    ),
                    Rule::by_groups(
                        &format!(r"({})({}+)", alternation(ENTITY_DECLARATIONS), SPACE),
                        &[TokenKind::KeywordDeclaration, TokenKind::Text],
                    )
                    .push(Co2State::Entity),
                    Rule::emit(r#""(?:\\\\|\\"|[^"])*""#, TokenKind::String),
                    Rule::emit(
                        r"'\\.'|'[^\\]'|'\\u[0-9a-fA-F]{4}'",
                        TokenKind::StringChar,
                    ),
                    Rule::emit(&format!(r"{}*{}:", SPACE, IDENT), TokenKind::NameLabel)
                        .at_line_start(),
                    Rule::emit(IDENT, TokenKind::Name),
                    Rule::emit(&format!("@{}", IDENT), TokenKind::Name),
                    Rule::emit(&float_pattern(), TokenKind::NumberFloat),
                    Rule::emit(&format!(r"0[xX]{}[lL]?", HEX_DIGITS), TokenKind::NumberHex),
                    Rule::emit(r"0[bB][01](?:_*[01]+)*[lL]?", TokenKind::NumberBin),
                    Rule::emit(r"0(?:_*[0-7]+)+[lL]?", TokenKind::NumberOct),
                    Rule::emit(r"0|[1-9](?:_*[0-9]+)*[lL]?", TokenKind::NumberInteger),
                    Rule::emit(r"[~^*!%&\[\](){}<>|+=:;,./?\-]", TokenKind::Operator),
                    // Shadowed by the single-character rule above, which always matches `(`.
                    Rule::emit(r"\(\+\)", TokenKind::Operator),
                    Rule::emit(r"\n", TokenKind::Text),
                ],
            ),
            (
                Co2State::Entity,
                vec![Rule::emit(IDENT, TokenKind::NameEntity).pop()],
            ),
            (
                Co2State::System,
                vec![Rule::emit(r"[\w.]+\*?", TokenKind::NameNamespace).pop()],
            ),
        ]
    }
}

pub type Co2Tokenizer = Tokenizer<Co2Rules>;
pub type Co2Tokens<'a, 't> = Tokens<'a, 't, Co2Rules>;
