//! Spacing inside single-line comments

use std::sync::LazyLock;

use fixor_core::{Result, Token, TokenKind, Tokens};
use regex::Regex;

use crate::fixers::{Fixer, FixerConfig, FixerOption};

/// Comment opener already followed by a blank
static LEADING_BLANK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?://|#|/\*)[ \t]").expect("valid regex"));

const TRAILING_BLANKS: &[char] = &[' ', '\t', '\n', '\r', '\0', '\x0B'];

/// One space after `//` and `#`, and on both sides of a single-line
/// `/* ... */` body
///
/// Doc-comment lookalikes (`/**...*/`), multi-line comments and `#[`
/// attributes are left alone.
pub struct SingleLineCommentSpacingFixer;

fn with_leading_space(content: &str, opener: &str) -> String {
    if LEADING_BLANK.is_match(content) {
        return content.to_string();
    }
    format!("{opener} {}", &content[opener.len()..])
}

fn fixed_comment(content: &str) -> Option<String> {
    let fixed = if let Some(rest) = content.strip_prefix("/*") {
        if content.len() < 5
            || rest.starts_with('*')
            || content.contains('\n')
            || !content.ends_with("*/")
        {
            return None;
        }
        let body = content[..content.len() - 2].trim_end_matches(TRAILING_BLANKS);
        with_leading_space(&format!("{body} */"), "/*")
    } else if content.starts_with("//") {
        if content.len() < 3 {
            return None;
        }
        with_leading_space(content, "//")
    } else if content.starts_with('#') {
        if content.len() < 2 || content[1..].starts_with('[') {
            return None;
        }
        with_leading_space(content, "#")
    } else {
        return None;
    };
    (fixed != content).then_some(fixed)
}

impl Fixer for SingleLineCommentSpacingFixer {
    fn name(&self) -> &'static str {
        "single_line_comment_spacing"
    }

    fn description(&self) -> &'static str {
        "Single-line comments must have proper spacing"
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

    fn is_candidate(&self, tokens: &Tokens) -> bool {
        tokens.is_token_kind_found(TokenKind::Comment)
    }

    fn apply(&self, tokens: &mut Tokens, _config: &FixerConfig) -> Result<()> {
        for index in 0..tokens.len() {
            if !tokens[index].is_kind(TokenKind::Comment) {
                continue;
            }
            if let Some(fixed) = fixed_comment(tokens[index].text()) {
                tokens.set_token_at(index, Token::new(TokenKind::Comment, fixed))?;
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
    fn test_aligned_comment_lists_are_kept() {
        assert_fix(
            SingleLineCommentSpacingFixer,
            "<?php
// following:
//     1 :
//     2 :

# Test:
#   - abc
#   - fgh

// Matrix:
//   [1,2]
//   [3,4]
",
            None,
        );
    }

    #[test]
    fn test_block_comment_trailing_blanks() {
        assert_fix(
            SingleLineCommentSpacingFixer,
            "<?php /*    XYZ */",
            Some("<?php /*    XYZ   */"),
        );
    }

    #[test]
    fn test_repeated_slashes() {
        assert_fix(SingleLineCommentSpacingFixer, "<?php // /", Some("<?php ///"));
        assert_fix(SingleLineCommentSpacingFixer, "<?php // //", Some("<?php ////"));
        assert_fix(SingleLineCommentSpacingFixer, "<?php # A*/", Some("<?php #A*/"));
    }

    #[test]
    fn test_all_styles() {
        assert_fix(
            SingleLineCommentSpacingFixer,
            "<?php\n// a\n# b\n/* ABC */\n\n//     \t d\n#\te\n/* f */\n",
            Some("<?php\n//a\n#b\n/*ABC*/\n\n//     \t d\n#\te\n/* f     */\n"),
        );
    }

    #[test]
    fn test_left_alone() {
        for code in [
            "<?php\n/*\n*/\n\n/*A\nB*/\n",
            "<?php //",
            "<?php #",
            "<?php /**/",
            "<?php /***/",
            "<?php /**\n*/ /**\nX1*/ /**  Y1  */",
            "<?php /**/ /**X1*/ /**  Y1  */",
            "<?php\nnamespace Foo;\nnew\n#[Foo]\nclass extends stdClass {};\n",
        ] {
            assert_fix(SingleLineCommentSpacingFixer, code, None);
        }
    }

    #[test]
    fn test_fixed_comment() {
        assert_eq!(fixed_comment("//x").as_deref(), Some("// x"));
        assert_eq!(fixed_comment("/*x*/").as_deref(), Some("/* x */"));
        assert_eq!(fixed_comment("/*  */").as_deref(), Some("/* */"));
        assert_eq!(fixed_comment("// x"), None);
    }
}
