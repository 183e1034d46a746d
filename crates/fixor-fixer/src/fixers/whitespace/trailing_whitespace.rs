//! Remove trailing whitespace from lines

use fixor_core::{Result, Token, TokenKind, Tokens};

use crate::fixers::{Fixer, FixerConfig, FixerOption};

const BLANKS: &[char] = &[' ', '\t'];

/// Removes blanks at the end of lines and at the end of the file
///
/// Only whitespace tokens and the opening tag are touched; string and
/// heredoc bodies, comments and inline HTML keep their content.
pub struct TrailingWhitespaceFixer;

/// Byte offset of the first line break in `text`, or its length.
fn first_line_end(text: &str) -> usize {
    text.find(['\r', '\n']).unwrap_or(text.len())
}

impl TrailingWhitespaceFixer {
    /// `<?php ` followed by a line break: the blank moves out of the tag.
    fn fix_open_tag(tokens: &mut Tokens, index: usize) -> Result<bool> {
        let tag = tokens[index].text();
        if !tag.ends_with(BLANKS) {
            return Ok(false);
        }
        let Some(next) = tokens.get(index + 1).filter(|t| t.is_whitespace()) else {
            return Ok(false);
        };
        let text = next.text();
        let break_len = if text.starts_with("\r\n") {
            2
        } else if text.starts_with(['\r', '\n']) {
            1
        } else {
            return Ok(false);
        };

        let fixed_tag = format!("{}{}", tag.trim_end(), &text[..break_len]);
        let rest = text[break_len..].to_string();
        tokens.set_token_at(index, Token::new(TokenKind::OpenTag, fixed_tag))?;
        tokens.ensure_whitespace_at_index(index + 1, 0, &rest)?;
        Ok(true)
    }

    fn fix_whitespace(tokens: &mut Tokens, index: usize) -> Result<()> {
        let text = tokens[index].text();
        let line_end = first_line_end(text);
        let at_eof = index + 1 == tokens.len();
        if line_end == text.len() && !at_eof {
            return Ok(());
        }

        // a tag that already ends the line leaves the next line's blanks alone
        let after_line_opening_tag = index
            .checked_sub(1)
            .map(|prev| &tokens[prev])
            .is_some_and(|prev| prev.is_kind(TokenKind::OpenTag) && prev.text().ends_with(['\r', '\n']));
        if after_line_opening_tag {
            return Ok(());
        }

        let head = text[..line_end].trim_end_matches(BLANKS);
        if head.len() == line_end {
            return Ok(());
        }
        let fixed = format!("{head}{}", &text[line_end..]);
        if fixed.is_empty() {
            tokens.clear_at(index)
        } else {
            tokens.set_token_at(index, Token::whitespace(fixed))
        }
    }
}

impl Fixer for TrailingWhitespaceFixer {
    fn name(&self) -> &'static str {
        "no_trailing_whitespace"
    }

    fn description(&self) -> &'static str {
        "Remove trailing whitespace at the end of non-blank lines"
    }

    fn priority(&self) -> i32 {
        0
    }

    fn is_risky(&self) -> bool {
        false
    }

    fn options(&self) -> Vec<FixerOption> {
        Vec::new()
    }

    fn is_candidate(&self, _tokens: &Tokens) -> bool {
        true
    }

    fn apply(&self, tokens: &mut Tokens, _config: &FixerConfig) -> Result<()> {
        for index in (0..tokens.len()).rev() {
            if tokens[index].is_kind(TokenKind::OpenTag) {
                Self::fix_open_tag(tokens, index)?;
            } else if tokens[index].is_whitespace() && !tokens[index].is_empty() {
                Self::fix_whitespace(tokens, index)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::assert_fix;

    #[test]
    fn test_trailing_spaces_and_tabs() {
        assert_fix(TrailingWhitespaceFixer, "<?php\n$a = 1;", Some("<?php\n$a = 1;   "));
        assert_fix(TrailingWhitespaceFixer, "<?php\n$b = 1;", Some("<?php\n$b = 1;\t\t"));
        assert_fix(
            TrailingWhitespaceFixer,
            "<?php\n$b = 1;\n$c = 1;\n",
            Some("<?php\n$b = 1; \t \n$c = 1;  \n"),
        );
    }

    #[test]
    fn test_blanks_inside_a_line_are_kept() {
        assert_fix(TrailingWhitespaceFixer, "<?php\n$a = 1  ;\n", None);
        assert_fix(TrailingWhitespaceFixer, "<?php\nif (true) {\n    $a = 1;\n}\n", None);
    }

    #[test]
    fn test_opening_tag() {
        assert_fix(TrailingWhitespaceFixer, "<?php\n$a = 1;", Some("<?php \n$a = 1;"));
        assert_fix(
            TrailingWhitespaceFixer,
            "<?php\r\n$a = 1;",
            Some("<?php \r\n$a = 1;"),
        );
        assert_fix(
            TrailingWhitespaceFixer,
            "<?php\n\n    $a = 1;",
            Some("<?php \n\n    $a = 1;"),
        );
    }

    #[test]
    fn test_literals_are_kept() {
        assert_fix(TrailingWhitespaceFixer, "<?php\n$a = 'x   \ny';\n", None);
        assert_fix(TrailingWhitespaceFixer, "<?php\n// note   \n$a = 1;\n", None);
    }

    #[test]
    fn test_first_line_end() {
        assert_eq!(first_line_end("  \n  "), 2);
        assert_eq!(first_line_end(" \r\n"), 1);
        assert_eq!(first_line_end("   "), 3);
    }
}
