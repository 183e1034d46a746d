//! Remove braces that wrap statements without belonging to a structure

use fixor_core::{BlockType, Direction, Result, Token, TokenKind, Tokens};

use crate::fixers::{ConfigValue, Fixer, FixerConfig, FixerOption, OptionType};

/// Removes `{ ... }` around plain statement lists
///
/// With `namespaces`, a single bracketed namespace is rewritten to the
/// semicolon form.
pub struct NoUnneededBracesFixer;

impl NoUnneededBracesFixer {
    /// A `{` is superfluous when it starts a statement on its own.
    fn is_over_complete(tokens: &Tokens, open: usize) -> bool {
        tokens.get_prev_meaningful_token(open).is_some_and(|prev| {
            tokens[prev].is_any_kind(&[
                TokenKind::OpenCurly,
                TokenKind::CloseCurly,
                TokenKind::OpenTag,
                TokenKind::Colon,
                TokenKind::Semicolon,
            ])
        })
    }

    fn clear_namespace_braces(tokens: &mut Tokens) -> Result<()> {
        // several namespaces in one file must keep their braces
        if tokens.count_token_kind(TokenKind::Namespace) != 1 {
            return Ok(());
        }
        let Some(namespace) = tokens.iter().position(|t| t.is_kind(TokenKind::Namespace)) else {
            return Ok(());
        };

        let mut index = tokens.get_next_meaningful_token(namespace);
        let mut named = false;
        while let Some(i) = index {
            if !tokens[i].is_any_kind(&[TokenKind::Identifier, TokenKind::NsSeparator]) {
                break;
            }
            named = true;
            index = tokens.get_next_meaningful_token(i);
        }
        if !named {
            return Ok(());
        }
        let Some(open) = index.filter(|&i| tokens[i].is_kind(TokenKind::OpenCurly)) else {
            return Ok(());
        };

        let close = tokens.find_block_end(BlockType::CurlyBrace, open)?;
        if let Some(after) = tokens.get_next_meaningful_token(close) {
            let only_close_tag = tokens[after].is_kind(TokenKind::CloseTag)
                && tokens.get_next_meaningful_token(after).is_none();
            if !only_close_tag {
                return Ok(());
            }
        }

        tokens.clear_token_and_merge_surrounding_whitespace(close)?;
        if tokens.get_non_empty_sibling(close, Direction::Next).is_none() {
            if let Some(prev) = tokens.get_non_empty_sibling(close, Direction::Prev) {
                if tokens[prev].is_whitespace_of(" \t") {
                    tokens.clear_at(prev)?;
                }
            }
        }

        tokens.set_token_at(open, Token::of(TokenKind::Semicolon))?;
        if open >= 2 && tokens[open - 1].is_whitespace_of(" \t") && !tokens[open - 2].is_comment() {
            tokens.clear_token_and_merge_surrounding_whitespace(open - 1)?;
        }
        Ok(())
    }
}

impl Fixer for NoUnneededBracesFixer {
    fn name(&self) -> &'static str {
        "no_unneeded_braces"
    }

    fn description(&self) -> &'static str {
        "Removes unneeded braces that are superfluous and aren't part of a control structure's body"
    }

    fn priority(&self) -> i32 {
        40
    }

    fn is_risky(&self) -> bool {
        false
    }

    fn options(&self) -> Vec<FixerOption> {
        vec![FixerOption {
            name: "namespaces",
            description: "Remove unneeded braces from bracketed namespaces",
            option_type: OptionType::Bool,
            default: ConfigValue::Bool(false),
        }]
    }

    fn is_candidate(&self, tokens: &Tokens) -> bool {
        tokens.is_token_kind_found(TokenKind::CloseCurly)
    }

    fn apply(&self, tokens: &mut Tokens, config: &FixerConfig) -> Result<()> {
        // backwards, so outer braces are judged after inner ones are gone
        for index in (1..tokens.len()).rev() {
            if !tokens[index].is_kind(TokenKind::OpenCurly) || !Self::is_over_complete(tokens, index)
            {
                continue;
            }
            let close = tokens.find_block_end(BlockType::CurlyBrace, index)?;
            tokens.clear_token_and_merge_surrounding_whitespace(close)?;
            tokens.clear_token_and_merge_surrounding_whitespace(index)?;
        }

        if config.bool_option("namespaces") {
            Self::clear_namespace_braces(tokens)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{assert_fix, assert_fix_with};

    fn namespaces() -> [(&'static str, ConfigValue); 1] {
        [("namespaces", ConfigValue::Bool(true))]
    }

    #[test]
    fn test_simple_block() {
        assert_fix(NoUnneededBracesFixer, "<?php  echo 1;", Some("<?php { echo 1;}"));
    }

    #[test]
    fn test_empty_block_before_comment() {
        assert_fix(NoUnneededBracesFixer, "<?php  // {}", Some("<?php {} // {}"));
    }

    #[test]
    fn test_nested_and_case_blocks() {
        assert_fix(
            NoUnneededBracesFixer,
            "<?php
      echo 0;   //
    echo 1;
    switch($a) {
        case 2: echo 3; break;
    }
    echo 4;  echo 5; //",
            Some(
                "<?php
    { { echo 0; } } //
    {echo 1;}
    switch($a) {
        case 2: {echo 3; break;}
    }
    echo 4; { echo 5; }//",
            ),
        );
    }

    #[test]
    fn test_structure_bodies_are_kept() {
        assert_fix(
            NoUnneededBracesFixer,
            r#"<?php
foreach($a as $b){}
while($a){}
do {} while($a);

if ($c){}
if ($c){}else{}
if ($c){}elseif($d){}
if ($c) {}elseif($d)/**  */{ } else/**/{  }

try {} catch(\Exception $e) {} finally {}

function test(){}
$a = function() use ($c){};

class A extends B {}
interface D {}
trait E {}
declare(ticks=1) {
// entire script here
}
#"#,
            None,
        );
    }

    #[test]
    fn test_namespace_blocks_and_group_imports_are_kept() {
        assert_fix(
            NoUnneededBracesFixer,
            "<?php
namespace {
}
namespace A {
}
namespace A\\B {
}",
            None,
        );
        assert_fix(
            NoUnneededBracesFixer,
            "<?php
use some\\a\\{ClassA, ClassB, ClassC as C};
use function some\\a\\{fn_a, fn_b, fn_c};
use some\\x\\{ClassD, function CC as C, function D, const E, function A\\B};
class Foo
{
    public function getBar(): array
    {
    }
}",
            None,
        );
    }

    #[test]
    fn test_dynamic_names_are_kept() {
        assert_fix(NoUnneededBracesFixer, "<?php\necho ${$a};\necho $a->{$b};", None);
    }

    #[test]
    fn test_namespace_option() {
        assert_fix_with(
            NoUnneededBracesFixer,
            &namespaces(),
            "<?php\nnamespace Foo;\n    function Bar(){}\n\n",
            Some("<?php\nnamespace Foo {\n    function Bar(){}\n}\n"),
        );
        assert_fix_with(
            NoUnneededBracesFixer,
            &namespaces(),
            "<?php namespace Foo; function Bar(){}",
            Some("<?php namespace Foo { function Bar(){} }"),
        );
    }

    #[test]
    fn test_namespace_option_with_close_tag() {
        assert_fix_with(
            NoUnneededBracesFixer,
            &namespaces(),
            "<?php\nnamespace Foo8\\A;\n    function Bar(){}\n ?>",
            Some("<?php\nnamespace Foo8\\A\t \t {\n    function Bar(){}\n} ?>"),
        );
    }

    #[test]
    fn test_namespace_option_keeps_last_line_indent() {
        assert_fix_with(
            NoUnneededBracesFixer,
            &namespaces(),
            "<?php\n    namespace A;\n        class X {}\n    ",
            Some("<?php\n    namespace A {\n        class X {}\n    }"),
        );
    }

    #[test]
    fn test_namespace_option_skips_multiple_or_global_namespaces() {
        assert_fix_with(
            NoUnneededBracesFixer,
            &namespaces(),
            "<?php\nnamespace A5 {\n    function AA(){}\n}\nnamespace B6 {\n    function BB(){}\n}",
            None,
        );
        assert_fix_with(
            NoUnneededBracesFixer,
            &namespaces(),
            "<?php\nnamespace {\n    class X {}\n}",
            None,
        );
    }

    #[test]
    fn test_namespace_braces_kept_without_option() {
        assert_fix(
            NoUnneededBracesFixer,
            "<?php\nnamespace Foo {\n    function Bar(){}\n}\n",
            None,
        );
    }
}
