//! A single lexical unit

use crate::kind::TokenKind;

/// One token: a kind tag plus the exact source text it covers
///
/// Tokens are values. Retagging a token inside a stream goes through
/// [`Tokens::set_kind`](crate::Tokens::set_kind) so the stream's cached
/// structure stays coherent.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Token {
    kind: TokenKind,
    text: String,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    /// Token for a kind with fixed text, e.g. `Token::of(TokenKind::Semicolon)`.
    ///
    /// Kinds with variable text produce an empty token of that kind.
    pub fn of(kind: TokenKind) -> Self {
        Self::new(kind, kind.fixed_text().unwrap_or_default())
    }

    pub fn whitespace(text: impl Into<String>) -> Self {
        Self::new(TokenKind::Whitespace, text)
    }

    /// The placeholder left behind by [`Tokens::clear_at`](crate::Tokens::clear_at).
    pub fn empty() -> Self {
        Self::new(TokenKind::Whitespace, String::new())
    }

    pub fn kind(&self) -> TokenKind {
        self.kind
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn into_text(self) -> String {
        self.text
    }

    pub(crate) fn set_kind(&mut self, kind: TokenKind) {
        self.kind = kind;
    }

    pub fn is_kind(&self, kind: TokenKind) -> bool {
        self.kind == kind
    }

    pub fn is_any_kind(&self, kinds: &[TokenKind]) -> bool {
        kinds.contains(&self.kind)
    }

    /// Compare the literal text, optionally ignoring ASCII case.
    pub fn equals_text(&self, text: &str, case_sensitive: bool) -> bool {
        if case_sensitive {
            self.text == text
        } else {
            self.text.eq_ignore_ascii_case(text)
        }
    }

    /// Same kind and same text
    pub fn equals(&self, other: &Token) -> bool {
        self.kind == other.kind && self.text == other.text
    }

    pub fn is_whitespace(&self) -> bool {
        self.kind == TokenKind::Whitespace
    }

    /// Whitespace made only of the given characters.
    ///
    /// `is_whitespace_of(" \t")` is true for blanks that contain no line break.
    pub fn is_whitespace_of(&self, chars: &str) -> bool {
        self.is_whitespace() && self.text.chars().all(|c| chars.contains(c))
    }

    pub fn is_comment(&self) -> bool {
        self.kind.is_comment()
    }

    /// Neither whitespace nor a comment
    pub fn is_meaningful(&self) -> bool {
        !self.is_whitespace() && !self.is_comment()
    }

    /// A cleared slot, serialized as nothing.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    pub fn is_keyword(&self) -> bool {
        self.kind.is_keyword()
    }

    pub fn is_classy(&self) -> bool {
        self.kind.is_classy()
    }

    pub fn is_cast(&self) -> bool {
        self.kind.is_cast()
    }

    pub fn is_magic_constant(&self) -> bool {
        self.kind == TokenKind::MagicConstant
    }

    pub fn contains_newline(&self) -> bool {
        self.text.contains('\n') || self.text.contains('\r')
    }
}
