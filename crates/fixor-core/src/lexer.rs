//! Lossless PHP lexer
//!
//! Produces the raw token sequence with PHP 8 token boundaries. The lexer
//! never fails: every byte of the input ends up in exactly one token, so
//! concatenating token texts reproduces the input. Input PHP would reject
//! comes out as `BadCharacter` tokens or unterminated literals.

use crate::kind::{self, TokenKind};
use crate::token::Token;

/// Tokenize PHP source into raw tokens.
pub fn tokenize(source: &str) -> Vec<Token> {
    Lexer::new(source).run()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Outside PHP tags
    Initial,
    /// Top level scripting after an open tag
    Scripting,
    /// Scripting inside a `{` block
    Brace,
    /// Scripting inside `{$` or `${` within a string
    Interpolation,
    DoubleQuotes,
    Backticks,
    /// Heredoc body; the index points into `Lexer::labels`
    Heredoc(usize),
    /// `[` offset after a variable inside a string
    VarOffset,
}

struct Lexer<'src> {
    src: &'src str,
    bytes: &'src [u8],
    pos: usize,
    modes: Vec<Mode>,
    labels: Vec<String>,
    tokens: Vec<Token>,
    halted: bool,
}

const THREE_CHAR_OPERATORS: [(&str, TokenKind); 9] = [
    ("===", TokenKind::IsIdentical),
    ("!==", TokenKind::IsNotIdentical),
    ("<=>", TokenKind::Spaceship),
    ("<<=", TokenKind::SlEqual),
    (">>=", TokenKind::SrEqual),
    ("**=", TokenKind::PowEqual),
    ("...", TokenKind::Ellipsis),
    ("??=", TokenKind::CoalesceEqual),
    ("?->", TokenKind::NullsafeObjectOperator),
];

const TWO_CHAR_OPERATORS: [(&str, TokenKind); 25] = [
    ("==", TokenKind::IsEqual),
    ("!=", TokenKind::IsNotEqual),
    ("<>", TokenKind::IsNotEqual),
    ("<=", TokenKind::IsSmallerOrEqual),
    (">=", TokenKind::IsGreaterOrEqual),
    ("&&", TokenKind::BooleanAnd),
    ("||", TokenKind::BooleanOr),
    ("++", TokenKind::Inc),
    ("--", TokenKind::Dec),
    ("+=", TokenKind::PlusEqual),
    ("-=", TokenKind::MinusEqual),
    ("*=", TokenKind::MulEqual),
    ("/=", TokenKind::DivEqual),
    (".=", TokenKind::ConcatEqual),
    ("%=", TokenKind::ModEqual),
    ("&=", TokenKind::AndEqual),
    ("|=", TokenKind::OrEqual),
    ("^=", TokenKind::XorEqual),
    ("<<", TokenKind::Sl),
    (">>", TokenKind::Sr),
    ("**", TokenKind::Pow),
    ("??", TokenKind::Coalesce),
    ("->", TokenKind::ObjectOperator),
    ("=>", TokenKind::DoubleArrow),
    ("::", TokenKind::DoubleColon),
];

fn single_char_kind(byte: u8) -> Option<TokenKind> {
    use TokenKind::*;
    let kind = match byte {
        b';' => Semicolon,
        b':' => Colon,
        b',' => Comma,
        b'.' => Dot,
        b'(' => OpenParen,
        b')' => CloseParen,
        b'[' => OpenBracket,
        b']' => CloseBracket,
        b'=' => Equals,
        b'+' => Plus,
        b'-' => Minus,
        b'*' => Asterisk,
        b'/' => Slash,
        b'%' => Percent,
        b'&' => Ampersand,
        b'|' => Pipe,
        b'^' => Caret,
        b'~' => Tilde,
        b'!' => Exclamation,
        b'?' => Question,
        b'<' => LessThan,
        b'>' => GreaterThan,
        b'@' => At,
        b'$' => Dollar,
        b'\\' => NsSeparator,
        _ => return None,
    };
    Some(kind)
}

fn is_label_start(byte: u8) -> bool {
    byte.is_ascii_alphabetic() || byte == b'_' || byte >= 0x80
}

fn is_label_char(byte: u8) -> bool {
    is_label_start(byte) || byte.is_ascii_digit()
}

fn is_blank(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\r')
}

impl<'src> Lexer<'src> {
    fn new(src: &'src str) -> Self {
        Self {
            src,
            bytes: src.as_bytes(),
            pos: 0,
            modes: vec![Mode::Initial],
            labels: Vec::new(),
            tokens: Vec::new(),
            halted: false,
        }
    }

    fn run(mut self) -> Vec<Token> {
        while self.pos < self.bytes.len() {
            if self.halted && self.halt_reached() {
                let start = self.pos;
                self.pos = self.bytes.len();
                self.emit(TokenKind::InlineHtml, start);
                break;
            }
            match self.mode() {
                Mode::Initial => self.lex_initial(),
                Mode::Scripting | Mode::Brace | Mode::Interpolation => self.lex_script(),
                Mode::DoubleQuotes | Mode::Backticks | Mode::Heredoc(_) => self.lex_string(),
                Mode::VarOffset => self.lex_var_offset(),
            }
        }
        self.tokens
    }

    fn mode(&self) -> Mode {
        self.modes.last().copied().unwrap_or(Mode::Initial)
    }

    fn pop_mode(&mut self) {
        if self.modes.len() > 1 {
            self.modes.pop();
        }
    }

    fn emit(&mut self, kind: TokenKind, start: usize) {
        if start < self.pos {
            self.tokens.push(Token::new(kind, &self.src[start..self.pos]));
        }
    }

    fn peek(&self, offset: usize) -> Option<u8> {
        self.bytes.get(self.pos + offset).copied()
    }

    fn starts_with(&self, needle: &str) -> bool {
        self.bytes[self.pos..].starts_with(needle.as_bytes())
    }

    fn halt_reached(&self) -> bool {
        self.tokens
            .last()
            .is_some_and(|t| t.is_any_kind(&[TokenKind::Semicolon, TokenKind::CloseTag]))
    }

    fn prev_meaningful(&self, nth: usize) -> Option<TokenKind> {
        self.tokens
            .iter()
            .rev()
            .filter(|t| t.is_meaningful())
            .nth(nth)
            .map(Token::kind)
    }

    fn next_non_blank_from(&self, mut at: usize) -> Option<usize> {
        while at < self.bytes.len() && is_blank(self.bytes[at]) {
            at += 1;
        }
        (at < self.bytes.len()).then_some(at)
    }

    fn label_end(&self, mut at: usize) -> usize {
        while at < self.bytes.len() && is_label_char(self.bytes[at]) {
            at += 1;
        }
        at
    }

    // ---- outside PHP ----

    fn lex_initial(&mut self) {
        let start = self.pos;
        let mut at = self.pos;
        while let Some(offset) = self.src[at..].find("<?") {
            let tag = at + offset;
            if let Some((kind, end)) = self.open_tag_at(tag) {
                self.pos = tag;
                self.emit(TokenKind::InlineHtml, start);
                let tag_start = self.pos;
                self.pos = end;
                self.emit(kind, tag_start);
                if self.modes.len() > 1 {
                    self.modes.pop();
                } else {
                    self.modes.push(Mode::Scripting);
                }
                return;
            }
            at = tag + 2;
        }
        self.pos = self.bytes.len();
        self.emit(TokenKind::InlineHtml, start);
    }

    fn open_tag_at(&self, at: usize) -> Option<(TokenKind, usize)> {
        let rest = &self.bytes[at..];
        if rest.starts_with(b"<?=") {
            return Some((TokenKind::OpenTagWithEcho, at + 3));
        }
        let after = if rest.len() >= 5 && rest[..5].eq_ignore_ascii_case(b"<?php") {
            at + 5
        } else {
            at + 2
        };
        match self.bytes.get(after) {
            None if after == at + 5 => Some((TokenKind::OpenTag, after)),
            Some(b'\r') if self.bytes.get(after + 1) == Some(&b'\n') => {
                Some((TokenKind::OpenTag, after + 2))
            }
            Some(&b) if is_blank(b) => Some((TokenKind::OpenTag, after + 1)),
            _ => None,
        }
    }

    // ---- scripting ----

    fn lex_script(&mut self) {
        let start = self.pos;
        let byte = self.bytes[self.pos];
        match byte {
            b if is_blank(b) => {
                while self.peek(0).is_some_and(is_blank) {
                    self.pos += 1;
                }
                self.emit(TokenKind::Whitespace, start);
            }
            b'?' if self.starts_with("?>") => self.lex_close_tag(),
            b'#' if self.starts_with("#[") => {
                self.pos += 2;
                self.emit(TokenKind::Attribute, start);
            }
            b'#' => self.lex_line_comment(),
            b'/' if self.starts_with("//") => self.lex_line_comment(),
            b'/' if self.starts_with("/*") => self.lex_block_comment(),
            b'$' if self.peek(1).is_some_and(is_label_start) => {
                self.pos = self.label_end(self.pos + 1);
                self.emit(TokenKind::Variable, start);
            }
            b'\'' => self.lex_single_quoted(),
            b'"' => self.lex_double_quoted(),
            b'`' => {
                self.pos += 1;
                self.emit(TokenKind::Backtick, start);
                self.modes.push(Mode::Backticks);
            }
            b'<' if self.starts_with("<<<") && self.lex_heredoc_start() => {}
            b'(' if self.lex_cast() => {}
            b'0'..=b'9' => self.lex_number(),
            b'.' if self.peek(1).is_some_and(|b| b.is_ascii_digit()) => self.lex_number(),
            b'{' => {
                self.pos += 1;
                self.emit(TokenKind::OpenCurly, start);
                self.modes.push(Mode::Brace);
            }
            b'}' => {
                self.pos += 1;
                self.emit(TokenKind::CloseCurly, start);
                if matches!(self.mode(), Mode::Brace | Mode::Interpolation) {
                    self.modes.pop();
                }
            }
            b if is_label_start(b) => self.lex_word(),
            _ => self.lex_operator(),
        }
    }

    fn lex_close_tag(&mut self) {
        let start = self.pos;
        self.pos += 2;
        if self.starts_with("\r\n") {
            self.pos += 2;
        } else if matches!(self.peek(0), Some(b'\n' | b'\r')) {
            self.pos += 1;
        }
        self.emit(TokenKind::CloseTag, start);
        self.modes.push(Mode::Initial);
    }

    fn lex_line_comment(&mut self) {
        let start = self.pos;
        while let Some(b) = self.peek(0) {
            if b == b'\n' || b == b'\r' || self.starts_with("?>") {
                break;
            }
            self.pos += 1;
        }
        self.emit(TokenKind::Comment, start);
    }

    fn lex_block_comment(&mut self) {
        let start = self.pos;
        self.pos = match self.src[start + 2..].find("*/") {
            Some(offset) => start + 2 + offset + 2,
            None => self.bytes.len(),
        };
        let text = &self.bytes[start..self.pos];
        let kind = if text.len() > 3 && text.starts_with(b"/**") && is_blank(text[3]) {
            TokenKind::DocComment
        } else {
            TokenKind::Comment
        };
        self.emit(kind, start);
    }

    fn lex_single_quoted(&mut self) {
        let start = self.pos;
        self.pos += 1;
        while let Some(b) = self.peek(0) {
            match b {
                b'\\' => self.pos += 2,
                b'\'' => {
                    self.pos += 1;
                    break;
                }
                _ => self.pos += 1,
            }
        }
        self.pos = self.pos.min(self.bytes.len());
        self.emit(TokenKind::ConstantEncapsedString, start);
    }

    fn lex_double_quoted(&mut self) {
        let start = self.pos;
        let mut at = start + 1;
        let mut interpolated = false;
        let mut closed = false;
        while at < self.bytes.len() {
            match self.bytes[at] {
                b'\\' => at += 2,
                b'"' => {
                    at += 1;
                    closed = true;
                    break;
                }
                b'$' if self
                    .bytes
                    .get(at + 1)
                    .is_some_and(|&b| b == b'{' || is_label_start(b)) =>
                {
                    interpolated = true;
                    break;
                }
                b'{' if self.bytes.get(at + 1) == Some(&b'$') => {
                    interpolated = true;
                    break;
                }
                _ => at += 1,
            }
        }

        if interpolated || !closed {
            self.pos += 1;
            self.emit(TokenKind::DoubleQuote, start);
            self.modes.push(Mode::DoubleQuotes);
        } else {
            self.pos = at;
            self.emit(TokenKind::ConstantEncapsedString, start);
        }
    }

    /// `<<<LABEL`, `<<<"LABEL"` or `<<<'LABEL'` followed by a line break.
    fn lex_heredoc_start(&mut self) -> bool {
        let start = self.pos;
        let mut at = start + 3;
        while matches!(self.bytes.get(at), Some(b' ' | b'\t')) {
            at += 1;
        }
        let quote = match self.bytes.get(at) {
            Some(&q @ (b'\'' | b'"')) => {
                at += 1;
                Some(q)
            }
            _ => None,
        };
        if !self.bytes.get(at).copied().is_some_and(is_label_start) {
            return false;
        }
        let label_start = at;
        at = self.label_end(at);
        let label = self.src[label_start..at].to_string();
        if let Some(q) = quote {
            if self.bytes.get(at) != Some(&q) {
                return false;
            }
            at += 1;
        }
        match self.bytes.get(at) {
            Some(b'\r') if self.bytes.get(at + 1) == Some(&b'\n') => at += 2,
            Some(b'\n' | b'\r') => at += 1,
            _ => return false,
        }

        self.pos = at;
        self.emit(TokenKind::StartHeredoc, start);

        if quote == Some(b'\'') {
            self.lex_nowdoc_body(&label);
        } else {
            self.labels.push(label);
            self.modes.push(Mode::Heredoc(self.labels.len() - 1));
        }
        true
    }

    fn lex_nowdoc_body(&mut self, label: &str) {
        let start = self.pos;
        let mut at = self.pos;
        loop {
            if let Some(end) = self.heredoc_end_at(at, label) {
                self.pos = at;
                self.emit(TokenKind::EncapsedAndWhitespace, start);
                let end_start = self.pos;
                self.pos = end;
                self.emit(TokenKind::EndHeredoc, end_start);
                return;
            }
            match self.src[at..].find('\n') {
                Some(offset) => at += offset + 1,
                None => break,
            }
        }
        self.pos = self.bytes.len();
        self.emit(TokenKind::EncapsedAndWhitespace, start);
    }

    /// Position after the closing label if one starts at `at`.
    fn heredoc_end_at(&self, at: usize, label: &str) -> Option<usize> {
        let mut cursor = at;
        while matches!(self.bytes.get(cursor), Some(b' ' | b'\t')) {
            cursor += 1;
        }
        let end = cursor + label.len();
        if end > self.bytes.len() || &self.bytes[cursor..end] != label.as_bytes() {
            return None;
        }
        if self.bytes.get(end).copied().is_some_and(is_label_char) {
            return None;
        }
        Some(end)
    }

    fn lex_cast(&mut self) -> bool {
        let mut at = self.pos + 1;
        while matches!(self.bytes.get(at), Some(b' ' | b'\t')) {
            at += 1;
        }
        let word_start = at;
        at = self.label_end(at);
        let Some(kind) = kind::cast(&self.src[word_start..at]) else {
            return false;
        };
        while matches!(self.bytes.get(at), Some(b' ' | b'\t')) {
            at += 1;
        }
        if self.bytes.get(at) != Some(&b')') {
            return false;
        }
        let start = self.pos;
        self.pos = at + 1;
        self.emit(kind, start);
        true
    }

    fn eat_digits(&mut self, pred: fn(u8) -> bool) {
        while self.peek(0).is_some_and(|b| pred(b) || b == b'_') {
            self.pos += 1;
        }
    }

    fn lex_number(&mut self) {
        let start = self.pos;
        if self.bytes[start] == b'0'
            && matches!(self.peek(1), Some(b'x' | b'X' | b'b' | b'B' | b'o' | b'O'))
        {
            self.pos += 2;
            self.eat_digits(|b| b.is_ascii_hexdigit());
            self.emit(TokenKind::LNumber, start);
            return;
        }

        let mut float = false;
        self.eat_digits(|b| b.is_ascii_digit());
        if self.peek(0) == Some(b'.') && self.peek(1) != Some(b'.') {
            float = true;
            self.pos += 1;
            self.eat_digits(|b| b.is_ascii_digit());
        }
        if matches!(self.peek(0), Some(b'e' | b'E')) {
            let signed = matches!(self.peek(1), Some(b'+' | b'-'));
            let digit_at = if signed { 2 } else { 1 };
            if self.peek(digit_at).is_some_and(|b| b.is_ascii_digit()) {
                float = true;
                self.pos += digit_at;
                self.eat_digits(|b| b.is_ascii_digit());
            }
        }
        let kind = if float { TokenKind::DNumber } else { TokenKind::LNumber };
        self.emit(kind, start);
    }

    fn lex_word(&mut self) {
        let start = self.pos;
        self.pos = self.label_end(start);
        let src = self.src;
        let word = &src[start..self.pos];
        let kind = self.classify_word(word);
        if kind == TokenKind::HaltCompiler {
            self.halted = true;
        }
        self.emit(kind, start);
    }

    fn classify_word(&mut self, word: &str) -> TokenKind {
        let prev = self.prev_meaningful(0);
        match prev {
            Some(TokenKind::ObjectOperator | TokenKind::NullsafeObjectOperator) => {
                return TokenKind::Identifier
            }
            Some(TokenKind::DoubleColon) => {
                return if word.eq_ignore_ascii_case("class") {
                    TokenKind::Class
                } else {
                    TokenKind::Identifier
                };
            }
            Some(TokenKind::Function) => return TokenKind::Identifier,
            Some(TokenKind::Ampersand) if self.prev_meaningful(1) == Some(TokenKind::Function) => {
                return TokenKind::Identifier
            }
            _ => {}
        }

        let next = self.next_non_blank_from(self.pos);
        let next_byte = next.map(|at| self.bytes[at]);

        if prev == Some(TokenKind::Const) && next_byte == Some(b'=') {
            return TokenKind::Identifier;
        }

        if word.eq_ignore_ascii_case("enum") {
            return match next {
                Some(at) if at > self.pos && is_label_start(self.bytes[at]) => {
                    let follower = &self.src[at..self.label_end(at)];
                    if follower.eq_ignore_ascii_case("extends")
                        || follower.eq_ignore_ascii_case("implements")
                    {
                        TokenKind::Identifier
                    } else {
                        TokenKind::Enum
                    }
                }
                _ => TokenKind::Identifier,
            };
        }

        if word.eq_ignore_ascii_case("readonly") && next_byte == Some(b'(') {
            return TokenKind::Identifier;
        }

        if word.eq_ignore_ascii_case("yield") {
            if let Some(at) = next.filter(|&at| at > self.pos) {
                let end = self.label_end(at);
                if self.src[at..end].eq_ignore_ascii_case("from") {
                    self.pos = end;
                    return TokenKind::YieldFrom;
                }
            }
            return TokenKind::Yield;
        }

        kind::keyword(word).unwrap_or(TokenKind::Identifier)
    }

    fn lex_operator(&mut self) {
        let start = self.pos;
        for (text, kind) in THREE_CHAR_OPERATORS.iter().chain(TWO_CHAR_OPERATORS.iter()) {
            if self.starts_with(text) {
                self.pos += text.len();
                self.emit(*kind, start);
                return;
            }
        }
        if let Some(kind) = single_char_kind(self.bytes[start]) {
            self.pos += 1;
            self.emit(kind, start);
            return;
        }
        let width = self.src[start..].chars().next().map_or(1, char::len_utf8);
        self.pos += width;
        self.emit(TokenKind::BadCharacter, start);
    }

    // ---- strings ----

    fn lex_string(&mut self) {
        let mode = self.mode();
        let start = self.pos;
        loop {
            if self.pos >= self.bytes.len() {
                self.pos = self.bytes.len();
                self.emit(TokenKind::EncapsedAndWhitespace, start);
                return;
            }

            if let Mode::Heredoc(label) = mode {
                let at_line_start = self.pos == 0 || matches!(self.bytes[self.pos - 1], b'\n' | b'\r');
                if at_line_start {
                    if let Some(end) = self.heredoc_end_at(self.pos, &self.labels[label]) {
                        self.emit(TokenKind::EncapsedAndWhitespace, start);
                        let end_start = self.pos;
                        self.pos = end;
                        self.emit(TokenKind::EndHeredoc, end_start);
                        self.pop_mode();
                        return;
                    }
                }
            }

            let byte = self.bytes[self.pos];
            let closing = match mode {
                Mode::DoubleQuotes => Some((b'"', TokenKind::DoubleQuote)),
                Mode::Backticks => Some((b'`', TokenKind::Backtick)),
                _ => None,
            };
            if let Some((delimiter, kind)) = closing {
                if byte == delimiter {
                    self.emit(TokenKind::EncapsedAndWhitespace, start);
                    let quote_start = self.pos;
                    self.pos += 1;
                    self.emit(kind, quote_start);
                    self.pop_mode();
                    return;
                }
            }

            match (byte, self.peek(1)) {
                (b'\\', _) => self.pos = (self.pos + 2).min(self.bytes.len()),
                (b'$', Some(next)) if is_label_start(next) => {
                    self.emit(TokenKind::EncapsedAndWhitespace, start);
                    self.lex_interpolated_variable();
                    return;
                }
                (b'$', Some(b'{')) => {
                    self.emit(TokenKind::EncapsedAndWhitespace, start);
                    let open = self.pos;
                    self.pos += 2;
                    self.emit(TokenKind::DollarOpenCurlyBraces, open);
                    let name_end = self.label_end(self.pos);
                    if name_end > self.pos && matches!(self.bytes.get(name_end), Some(b'[' | b'}')) {
                        let name_start = self.pos;
                        self.pos = name_end;
                        self.emit(TokenKind::StringVarname, name_start);
                    }
                    self.modes.push(Mode::Interpolation);
                    return;
                }
                (b'{', Some(b'$')) => {
                    self.emit(TokenKind::EncapsedAndWhitespace, start);
                    let open = self.pos;
                    self.pos += 1;
                    self.emit(TokenKind::CurlyOpen, open);
                    self.modes.push(Mode::Interpolation);
                    return;
                }
                _ => self.pos += 1,
            }
        }
    }

    fn lex_interpolated_variable(&mut self) {
        let start = self.pos;
        self.pos = self.label_end(self.pos + 1);
        self.emit(TokenKind::Variable, start);

        if self.peek(0) == Some(b'[') {
            let open = self.pos;
            self.pos += 1;
            self.emit(TokenKind::OpenBracket, open);
            self.modes.push(Mode::VarOffset);
            return;
        }

        let (operator, kind) = if self.starts_with("?->") {
            (3, TokenKind::NullsafeObjectOperator)
        } else if self.starts_with("->") {
            (2, TokenKind::ObjectOperator)
        } else {
            return;
        };
        if self.peek(operator).is_some_and(is_label_start) {
            let op_start = self.pos;
            self.pos += operator;
            self.emit(kind, op_start);
            let name_start = self.pos;
            self.pos = self.label_end(self.pos);
            self.emit(TokenKind::Identifier, name_start);
        }
    }

    fn lex_var_offset(&mut self) {
        let start = self.pos;
        match self.bytes[self.pos] {
            b']' => {
                self.pos += 1;
                self.emit(TokenKind::CloseBracket, start);
                self.pop_mode();
            }
            b'-' => {
                self.pos += 1;
                self.emit(TokenKind::Minus, start);
            }
            b'$' if self.peek(1).is_some_and(is_label_start) => {
                self.pos = self.label_end(self.pos + 1);
                self.emit(TokenKind::Variable, start);
            }
            b if b.is_ascii_digit() => {
                self.pos = self.label_end(self.pos);
                self.emit(TokenKind::NumString, start);
            }
            b if is_label_start(b) => {
                self.pos = self.label_end(self.pos);
                self.emit(TokenKind::Identifier, start);
            }
            _ => self.pop_mode(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use proptest::prelude::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        tokenize(source).iter().map(Token::kind).collect()
    }

    fn texts(source: &str) -> Vec<String> {
        tokenize(source).into_iter().map(Token::into_text).collect()
    }

    fn round_trip(source: &str) -> String {
        tokenize(source).iter().map(Token::text).collect()
    }

    #[test]
    fn test_open_tag_takes_one_whitespace() {
        assert_eq!(texts("<?php  echo 1;"), vec!["<?php ", " ", "echo", " ", "1", ";"]);
        assert_eq!(texts("<?php\r\n$a;")[0], "<?php\r\n");
    }

    #[test]
    fn test_inline_html_and_close_tag() {
        use TokenKind::*;
        assert_eq!(
            kinds("<p><?= $a ?>\n</p>"),
            vec![InlineHtml, OpenTagWithEcho, Whitespace, Variable, Whitespace, CloseTag, InlineHtml]
        );
        assert_eq!(texts("<?php echo 1 ?>\nx")[5], "?>\n");
    }

    #[test]
    fn test_comments() {
        use TokenKind::*;
        assert_eq!(kinds("<?php // a\n# b"), vec![OpenTag, Comment, Whitespace, Comment]);
        assert_eq!(kinds("<?php /** doc */"), vec![OpenTag, DocComment]);
        assert_eq!(kinds("<?php /**/"), vec![OpenTag, Comment]);
        assert_eq!(kinds("<?php /**X*/"), vec![OpenTag, Comment]);
        assert_eq!(kinds("<?php #[A]"), vec![OpenTag, Attribute, Identifier, CloseBracket]);
    }

    #[test]
    fn test_keywords_and_names() {
        use TokenKind::*;
        assert_eq!(
            kinds("<?php FOREACH($a AS $b){}"),
            vec![OpenTag, Foreach, OpenParen, Variable, Whitespace, As, Whitespace, Variable, CloseParen, OpenCurly, CloseCurly]
        );
        assert_eq!(
            kinds("<?php use \\A\\B;"),
            vec![OpenTag, Use, Whitespace, NsSeparator, Identifier, NsSeparator, Identifier, Semicolon]
        );
        assert_eq!(kinds("<?php $a->list"), vec![OpenTag, Variable, ObjectOperator, Identifier]);
        assert_eq!(kinds("<?php X::ClASs"), vec![OpenTag, Identifier, DoubleColon, Class]);
        assert_eq!(kinds("<?php X::FOO"), vec![OpenTag, Identifier, DoubleColon, Identifier]);
    }

    #[test]
    fn test_contextual_keywords() {
        use TokenKind::*;
        assert_eq!(kinds("<?php ENUM Suit")[1], Enum);
        assert_eq!(kinds("<?php enum(1)")[1], Identifier);
        assert_eq!(kinds("<?php readonly(1)")[1], Identifier);
        assert_eq!(texts("<?php yield  from $a")[1], "yield  from");
        assert_eq!(kinds("<?php yield $a")[1], Yield);
    }

    #[test]
    fn test_casts_and_operators() {
        use TokenKind::*;
        assert_eq!(kinds("<?php ( int )$a"), vec![OpenTag, IntCast, Variable]);
        assert_eq!(kinds("<?php (foo)"), vec![OpenTag, OpenParen, Identifier, CloseParen]);
        assert_eq!(
            kinds("<?php $a?->b ?? $c <=> 1.5"),
            vec![OpenTag, Variable, NullsafeObjectOperator, Identifier, Whitespace, Coalesce, Whitespace, Variable, Whitespace, Spaceship, Whitespace, DNumber]
        );
        assert_eq!(kinds("<?php 0x1F 1_000 1e3 .5"), vec![OpenTag, LNumber, Whitespace, LNumber, Whitespace, DNumber, Whitespace, DNumber]);
    }

    #[test]
    fn test_plain_strings_are_single_tokens() {
        use TokenKind::*;
        assert_eq!(kinds("<?php 'a\\'b'"), vec![OpenTag, ConstantEncapsedString]);
        assert_eq!(kinds("<?php \"a ; b\""), vec![OpenTag, ConstantEncapsedString]);
    }

    #[test]
    fn test_interpolated_string() {
        use TokenKind::*;
        assert_eq!(
            kinds("<?php \"a $b[0] {$c->d} ${e} $f->g\""),
            vec![
                OpenTag,
                DoubleQuote,
                EncapsedAndWhitespace,
                Variable,
                OpenBracket,
                NumString,
                CloseBracket,
                EncapsedAndWhitespace,
                CurlyOpen,
                Variable,
                ObjectOperator,
                Identifier,
                CloseCurly,
                EncapsedAndWhitespace,
                DollarOpenCurlyBraces,
                StringVarname,
                CloseCurly,
                EncapsedAndWhitespace,
                Variable,
                ObjectOperator,
                Identifier,
                DoubleQuote,
            ]
        );
    }

    #[test]
    fn test_heredoc_and_nowdoc() {
        use TokenKind::*;
        assert_eq!(
            kinds("<?php $a = <<<EOT\n  x $b\n  EOT;"),
            vec![OpenTag, Variable, Whitespace, Equals, Whitespace, StartHeredoc, EncapsedAndWhitespace, Variable, EncapsedAndWhitespace, EndHeredoc, Semicolon]
        );
        assert_eq!(
            texts("<?php <<<'X'\n$a\nX;"),
            vec!["<?php ", "<<<'X'\n", "$a\n", "X", ";"]
        );
        assert_eq!(kinds("<?php <<<X\nX;"), vec![OpenTag, StartHeredoc, EndHeredoc, Semicolon]);
    }

    #[test]
    fn test_halt_compiler_stops_lexing() {
        use TokenKind::*;
        assert_eq!(
            kinds("<?php __HALT_COMPILER(); $a {"),
            vec![OpenTag, HaltCompiler, OpenParen, CloseParen, Semicolon, InlineHtml]
        );
    }

    #[test]
    fn test_braces_across_close_tags() {
        let source = "<?php if ($a) { ?>\n<b>{x}</b><?php } echo \"}\";";
        assert_eq!(round_trip(source), source);
        assert!(kinds(source).contains(&TokenKind::CloseCurly));
    }

    #[test]
    fn test_unterminated_input_is_lossless() {
        for source in ["<?php 'abc", "<?php \"abc $x", "<?php /* x", "<?php <<<EOT\nabc", "<?php \"{$a"] {
            assert_eq!(round_trip(source), source);
        }
    }

    proptest! {
        #[test]
        fn prop_lexing_is_lossless(body in "\\PC{0,64}") {
            let source = format!("<?php {body}");
            prop_assert_eq!(round_trip(&source), source);
        }

        #[test]
        fn prop_lexing_php_alphabet_is_lossless(body in "[a-z$\"'{}()\\[\\];:?<>=.\\\\#/* \n`-]{0,48}") {
            let source = format!("<?php {body}");
            prop_assert_eq!(round_trip(&source), source);
        }
    }
}
