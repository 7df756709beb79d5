//! Token taxonomy.
//!
//! Kinds form a two-level hierarchy, e.g. `Keyword.Namespace` is a subtype of `Keyword`. Names
//! follow the dotted convention used by regex-based highlighters, so that token streams can be
//! fed to existing styles without translation.

use std::fmt;

/// Top level of the token hierarchy.
#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum TokenCategory {
    Text,
    Error,
    Comment,
    Keyword,
    Name,
    String,
    Number,
    Operator,
}

#[derive(PartialEq, Eq, Hash, Copy, Clone, Debug)]
pub enum TokenKind {
    /// Whitespace and newlines.
    Text,

    /// A character no rule could match.
    Error,

    CommentSingle,
    CommentMultiline,

    Keyword,
    KeywordDeclaration,
    KeywordType,
    KeywordConstant,
    KeywordNamespace,

    Name,
    /// Internal and external actions (`ping!`, `pong?`).
    NameConstant,
    NameLabel,
    /// Name following `specification`, `contract`, `process` or `honesty`.
    NameEntity,
    /// Dotted path following `package`.
    NameNamespace,

    String,
    StringChar,

    NumberFloat,
    NumberHex,
    NumberBin,
    NumberOct,
    NumberInteger,

    /// Operators and punctuation alike.
    Operator,
}

impl TokenKind {
    /// Dotted name of the kind, e.g. `"Keyword.Namespace"`.
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::Text => "Text",
            TokenKind::Error => "Error",
            TokenKind::CommentSingle => "Comment.Single",
            TokenKind::CommentMultiline => "Comment.Multiline",
            TokenKind::Keyword => "Keyword",
            TokenKind::KeywordDeclaration => "Keyword.Declaration",
            TokenKind::KeywordType => "Keyword.Type",
            TokenKind::KeywordConstant => "Keyword.Constant",
            TokenKind::KeywordNamespace => "Keyword.Namespace",
            TokenKind::Name => "Name",
            TokenKind::NameConstant => "Name.Constant",
            TokenKind::NameLabel => "Name.Label",
            TokenKind::NameEntity => "Name.Entity",
            TokenKind::NameNamespace => "Name.Namespace",
            TokenKind::String => "String",
            TokenKind::StringChar => "String.Char",
            TokenKind::NumberFloat => "Number.Float",
            TokenKind::NumberHex => "Number.Hex",
            TokenKind::NumberBin => "Number.Bin",
            TokenKind::NumberOct => "Number.Oct",
            TokenKind::NumberInteger => "Number.Integer",
            TokenKind::Operator => "Operator",
        }
    }

    /// Short class name conventionally used by HTML highlighters. Empty for plain text.
    pub fn short_name(&self) -> &'static str {
        match self {
            TokenKind::Text => "",
            TokenKind::Error => "err",
            TokenKind::CommentSingle => "c1",
            TokenKind::CommentMultiline => "cm",
            TokenKind::Keyword => "k",
            TokenKind::KeywordDeclaration => "kd",
            TokenKind::KeywordType => "kt",
            TokenKind::KeywordConstant => "kc",
            TokenKind::KeywordNamespace => "kn",
            TokenKind::Name => "n",
            TokenKind::NameConstant => "no",
            TokenKind::NameLabel => "nl",
            TokenKind::NameEntity => "ni",
            TokenKind::NameNamespace => "nn",
            TokenKind::String => "s",
            TokenKind::StringChar => "sc",
            TokenKind::NumberFloat => "mf",
            TokenKind::NumberHex => "mh",
            TokenKind::NumberBin => "mb",
            TokenKind::NumberOct => "mo",
            TokenKind::NumberInteger => "mi",
            TokenKind::Operator => "o",
        }
    }

    pub fn category(&self) -> TokenCategory {
        match self {
            TokenKind::Text => TokenCategory::Text,
            TokenKind::Error => TokenCategory::Error,
            TokenKind::CommentSingle | TokenKind::CommentMultiline => TokenCategory::Comment,
            TokenKind::Keyword
            | TokenKind::KeywordDeclaration
            | TokenKind::KeywordType
            | TokenKind::KeywordConstant
            | TokenKind::KeywordNamespace => TokenCategory::Keyword,
            TokenKind::Name
            | TokenKind::NameConstant
            | TokenKind::NameLabel
            | TokenKind::NameEntity
            | TokenKind::NameNamespace => TokenCategory::Name,
            TokenKind::String | TokenKind::StringChar => TokenCategory::String,
            TokenKind::NumberFloat
            | TokenKind::NumberHex
            | TokenKind::NumberBin
            | TokenKind::NumberOct
            | TokenKind::NumberInteger => TokenCategory::Number,
            TokenKind::Operator => TokenCategory::Operator,
        }
    }

    pub fn is_subtype_of(&self, category: TokenCategory) -> bool {
        self.category() == category
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}
