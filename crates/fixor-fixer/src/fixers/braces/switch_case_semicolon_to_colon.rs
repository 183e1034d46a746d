//! Convert case/default semicolons to colons

use fixor_core::analyzers::ControlCaseStructuresAnalyzer;
use fixor_core::{Result, Token, TokenKind, Tokens};

use crate::fixers::{Fixer, FixerConfig, FixerOption};

/// `case 1;` becomes `case 1:`, `default;` becomes `default:`
pub struct SwitchCaseSemicolonToColonFixer;

impl Fixer for SwitchCaseSemicolonToColonFixer {
    fn name(&self) -> &'static str {
        "switch_case_semicolon_to_colon"
    }

    fn description(&self) -> &'static str {
        "A case should be followed by a colon and not a semicolon"
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
        tokens.is_token_kind_found(TokenKind::Switch)
    }

    fn apply(&self, tokens: &mut Tokens, _config: &FixerConfig) -> Result<()> {
        let switches =
            ControlCaseStructuresAnalyzer::find_control_structures(tokens, &[TokenKind::Switch])?;

        for switch in switches {
            let label_ends = switch
                .cases
                .iter()
                .map(|case| case.colon_index)
                .chain(switch.default.iter().map(|default| default.colon_index));
            for end in label_ends {
                if tokens[end].is_kind(TokenKind::Semicolon) {
                    tokens.set_token_at(end, Token::of(TokenKind::Colon))?;
                }
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
    fn test_simple_case() {
        assert_fix(
            SwitchCaseSemicolonToColonFixer,
            "<?php switch ($a) { case 42: break; }",
            Some("<?php switch ($a) { case 42; break; }"),
        );
    }

    #[test]
    fn test_closure_and_array_in_label() {
        assert_fix(
            SwitchCaseSemicolonToColonFixer,
            "<?php
switch (1) {
    case f(function () { return; }):
        break;
    case [\"foo\" => \"bar\"]:
        break;
}",
            Some(
                "<?php
switch (1) {
    case f(function () { return; });
        break;
    case [\"foo\" => \"bar\"];
        break;
}",
            ),
        );
    }

    #[test]
    fn test_nested_switch_and_default() {
        assert_fix(
            SwitchCaseSemicolonToColonFixer,
            "<?php
switch ($a) {
    case 42:
        break;
    case 1:
        switch ($a) {
            case 42:
                break;
            default :
                echo 1;
        }
}",
            Some(
                "<?php
switch ($a) {
    case 42;
        break;
    case 1:
        switch ($a) {
            case 42;
                break;
            default ;
                echo 1;
        }
}",
            ),
        );
    }

    #[test]
    fn test_only_first_semicolon_is_converted() {
        assert_fix(
            SwitchCaseSemicolonToColonFixer,
            "<?php switch ($a) { case 42:;;// cleanup is left to no_empty_statement\n break; }",
            Some("<?php switch ($a) { case 42;;;// cleanup is left to no_empty_statement\n break; }"),
        );
    }

    #[test]
    fn test_ternary_in_label() {
        assert_fix(
            SwitchCaseSemicolonToColonFixer,
            "<?php switch ($a) { case $b ? \"c\" : \"d\" : break; case $b ? \"c\" : \"d\": break; }",
            Some(
                "<?php switch ($a) { case $b ? \"c\" : \"d\" ; break; case $b ? \"c\" : \"d\"; break; }",
            ),
        );
    }

    #[test]
    fn test_parenthesized_labels_and_block_bodies() {
        assert_fix(
            SwitchCaseSemicolonToColonFixer,
            "<?php
switch($a) {
    case (int) $a < 1: {
        echo \"leave ; alone\";
        break;
    }
    case ($a < 2)/* test */ : {
        break;
    }
    case /**/(/**/ // test
        4
        /**/)//
        /**/: {
        break;
    }
    case ($b + 1) * 2 : {;;
        break;
    }
}",
            Some(
                "<?php
switch($a) {
    case (int) $a < 1; {
        echo \"leave ; alone\";
        break;
    }
    case ($a < 2)/* test */ ; {
        break;
    }
    case /**/(/**/ // test
        4
        /**/)//
        /**/; {
        break;
    }
    case ($b + 1) * 2 ; {;;
        break;
    }
}",
            ),
        );
    }

    #[test]
    fn test_switch_inside_anonymous_class_in_label() {
        assert_fix(
            SwitchCaseSemicolonToColonFixer,
            "<?php switch (1) {
    case new class {public function A(){echo 1;switch(time()){case 1: echo 2;}}}:break;}",
            Some(
                "<?php switch (1) {
    case new class {public function A(){echo 1;switch(time()){case 1; echo 2;}}};break;}",
            ),
        );
    }

    #[test]
    fn test_match_is_left_alone() {
        assert_fix(
            SwitchCaseSemicolonToColonFixer,
            "<?php
switch ($foo) {
    case \"bar\":
        echo match ($a) {
            default => \"foo\",
        };
        break;
}",
            None,
        );
        assert_fix(
            SwitchCaseSemicolonToColonFixer,
            "<?php
switch ($foo) {
    case match ($bar) {
        default => \"foo\",
    }: echo \"It works!\";
}",
            Some(
                "<?php
switch ($foo) {
    case match ($bar) {
        default => \"foo\",
    }; echo \"It works!\";
}",
            ),
        );
    }

    #[test]
    fn test_enum_cases_are_left_alone() {
        assert_fix(
            SwitchCaseSemicolonToColonFixer,
            "<?php
enum Suit {
    case Hearts; // do not fix
}

enum UserStatus: string {
  case Pending = \"P\"; // do not fix

  public function label(): string {
    switch (foo()) {
        case 42: // do fix
            break;
    }
    return \"label\";
  }
}
",
            Some(
                "<?php
enum Suit {
    case Hearts; // do not fix
}

enum UserStatus: string {
  case Pending = \"P\"; // do not fix

  public function label(): string {
    switch (foo()) {
        case 42; // do fix
            break;
    }
    return \"label\";
  }
}
",
            ),
        );
    }
}
