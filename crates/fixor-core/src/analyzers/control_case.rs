//! `switch`, `match` and `enum` structures with their case labels

use crate::block::BlockEdge;
use crate::error::{Result, TokenError};
use crate::kind::TokenKind;
use crate::tokens::Tokens;

/// Kinds that introduce a structure with `case`/`default` labels
pub const CASE_STRUCTURE_KINDS: [TokenKind; 3] =
    [TokenKind::Switch, TokenKind::Match, TokenKind::Enum];

/// One `case` label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseAnalysis {
    /// Index of the `case` keyword
    pub index: usize,
    /// Index of the `:`, `;` or `=` ending the label
    pub colon_index: usize,
}

/// The `default` label
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultAnalysis {
    pub index: usize,
    /// Index of the `:`, `;` or `=>` ending the label
    pub colon_index: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ControlCaseStructure {
    pub kind: TokenKind,
    /// Index of the `switch`/`match`/`enum` keyword
    pub index: usize,
    /// Index of the `{` or, for alternative syntax, the `:` opening the body
    pub open: usize,
    /// Index of the closing `}` or of the `;` after `endswitch`
    pub close: usize,
    pub alternative_syntax: bool,
    pub cases: Vec<CaseAnalysis>,
    pub default: Option<DefaultAnalysis>,
}

struct Frame {
    kind: TokenKind,
    index: usize,
    open: usize,
    alternative_syntax: bool,
    brace_count: i64,
    cases: Vec<CaseAnalysis>,
    default: Option<DefaultAnalysis>,
}

impl Frame {
    fn finish(self, close: usize) -> ControlCaseStructure {
        ControlCaseStructure {
            kind: self.kind,
            index: self.index,
            open: self.open,
            close,
            alternative_syntax: self.alternative_syntax,
            cases: self.cases,
            default: self.default,
        }
    }
}

pub struct ControlCaseStructuresAnalyzer;

impl ControlCaseStructuresAnalyzer {
    /// Every structure of the requested `kinds`, ordered by keyword index.
    ///
    /// `kinds` may only contain `Switch`, `Match` and `Enum`.
    pub fn find_control_structures(
        tokens: &Tokens,
        kinds: &[TokenKind],
    ) -> Result<Vec<ControlCaseStructure>> {
        if let Some(kind) = kinds.iter().find(|k| !CASE_STRUCTURE_KINDS.contains(k)) {
            return Err(TokenError::InvalidArgument(format!(
                "{kind} does not introduce case labels"
            )));
        }

        let mut found = Vec::new();
        if kinds.is_empty() {
            return Ok(found);
        }

        let mut stack: Vec<Frame> = Vec::new();
        for index in 0..tokens.len() {
            let token = &tokens[index];

            if token.is_any_kind(&CASE_STRUCTURE_KINDS) {
                stack.push(Self::open_frame(tokens, index)?);
                continue;
            }
            let Some(frame) = stack.last_mut() else {
                continue;
            };
            let of_interest = kinds.contains(&frame.kind);

            match token.kind() {
                TokenKind::OpenCurly => frame.brace_count += 1,
                TokenKind::CloseCurly => {
                    frame.brace_count -= 1;
                    if frame.brace_count == 0 && !frame.alternative_syntax {
                        if let Some(frame) = stack.pop() {
                            if of_interest {
                                found.push(frame.finish(index));
                            }
                        }
                    }
                }
                TokenKind::EndSwitch => {
                    if !frame.alternative_syntax || frame.kind != TokenKind::Switch {
                        return Err(TokenError::MalformedStructure {
                            index,
                            message: "unexpected endswitch".to_string(),
                        });
                    }
                    if frame.brace_count != 0 {
                        return Err(TokenError::MalformedStructure {
                            index,
                            message: "unbalanced braces before endswitch".to_string(),
                        });
                    }
                    let close = tokens.get_next_meaningful_token(index).unwrap_or(index);
                    if let Some(frame) = stack.pop() {
                        if of_interest {
                            found.push(frame.finish(close));
                        }
                    }
                }
                TokenKind::Case if of_interest => {
                    let colon_index = Self::find_case_end(tokens, frame.kind, index)?;
                    frame.cases.push(CaseAnalysis { index, colon_index });
                }
                TokenKind::Default if of_interest => {
                    if frame.default.is_some() {
                        return Err(TokenError::MalformedStructure {
                            index,
                            message: "multiple default labels".to_string(),
                        });
                    }
                    let colon_index = Self::find_default_end(tokens, frame.kind, index)?;
                    frame.default = Some(DefaultAnalysis { index, colon_index });
                }
                _ => {}
            }
        }

        if let Some(frame) = stack.iter().find(|f| kinds.contains(&f.kind)) {
            return Err(TokenError::MalformedStructure {
                index: frame.index,
                message: format!("unterminated {}", frame.kind),
            });
        }

        found.sort_by_key(|s| s.index);
        Ok(found)
    }

    fn open_frame(tokens: &Tokens, index: usize) -> Result<Frame> {
        let kind = tokens[index].kind();
        let malformed = |message: &str| TokenError::MalformedStructure {
            index,
            message: message.to_string(),
        };

        let open = match kind {
            TokenKind::Enum => tokens
                .get_next_token_of_kind(index, &[TokenKind::OpenCurly])
                .ok_or_else(|| malformed("enum without a body"))?,
            _ => {
                let paren = tokens
                    .get_next_meaningful_token(index)
                    .filter(|&i| tokens[i].is_kind(TokenKind::OpenParen))
                    .ok_or_else(|| malformed("missing subject parentheses"))?;
                let paren_end =
                    tokens.find_block_end(crate::block::BlockType::Parenthesis, paren)?;
                tokens
                    .get_next_meaningful_token(paren_end)
                    .ok_or_else(|| malformed("missing body"))?
            }
        };

        Ok(Frame {
            kind,
            index,
            open,
            alternative_syntax: kind == TokenKind::Switch && tokens[open].is_kind(TokenKind::Colon),
            brace_count: 0,
            cases: Vec::new(),
            default: None,
        })
    }

    /// The token ending a `case` label. Ternaries inside the label consume
    /// one colon each; nested blocks are skipped whole.
    fn find_case_end(tokens: &Tokens, kind: TokenKind, case: usize) -> Result<usize> {
        if kind == TokenKind::Enum {
            return tokens
                .get_next_token_of_kind(case, &[TokenKind::Equals, TokenKind::Semicolon])
                .ok_or(TokenError::MalformedStructure {
                    index: case,
                    message: "unterminated enum case".to_string(),
                });
        }

        let mut ternaries = 0usize;
        let mut index = case + 1;
        while index < tokens.len() {
            let token = &tokens[index];
            if let Some((block_type, BlockEdge::Open)) = tokens.detect_block_type(index) {
                index = tokens.find_block_end(block_type, index)? + 1;
                continue;
            }
            if token.is_kind(TokenKind::Question) {
                ternaries += 1;
            } else if token.is_any_kind(&[TokenKind::Colon, TokenKind::Semicolon]) {
                if ternaries == 0 {
                    return Ok(index);
                }
                ternaries -= 1;
            }
            index += 1;
        }
        Err(TokenError::MalformedStructure {
            index: case,
            message: "unterminated case label".to_string(),
        })
    }

    fn find_default_end(tokens: &Tokens, kind: TokenKind, default: usize) -> Result<usize> {
        let ends: &[TokenKind] = match kind {
            TokenKind::Match => &[TokenKind::DoubleArrow],
            _ => &[TokenKind::Colon, TokenKind::Semicolon],
        };
        tokens
            .get_next_token_of_kind(default, ends)
            .ok_or(TokenError::MalformedStructure {
                index: default,
                message: "unterminated default label".to_string(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_switch_with_braces() {
        let code = "<?php switch ($a) { case 1: break; case $b ? 2 : 3; default: }";
        let tokens = Tokens::from_code(code);
        let found =
            ControlCaseStructuresAnalyzer::find_control_structures(&tokens, &[TokenKind::Switch])
                .unwrap();
        assert_eq!(found.len(), 1);
        let switch = &found[0];
        assert_eq!(switch.index, 1);
        assert!(!switch.alternative_syntax);
        assert!(tokens[switch.open].is_kind(TokenKind::OpenCurly));
        assert_eq!(switch.close, tokens.len() - 1);
        assert_eq!(switch.cases.len(), 2);
        assert!(tokens[switch.cases[0].colon_index].is_kind(TokenKind::Colon));
        assert!(tokens[switch.cases[1].colon_index].is_kind(TokenKind::Semicolon));
        let default = switch.default.as_ref().unwrap();
        assert!(tokens[default.colon_index].is_kind(TokenKind::Colon));
    }

    #[test]
    fn test_nested_structures_and_filter() {
        let code = "<?php switch ($a) { case 1: $x = match ($b) { 1 => 2, default => 3 }; }";
        let tokens = Tokens::from_code(code);
        let both = ControlCaseStructuresAnalyzer::find_control_structures(
            &tokens,
            &[TokenKind::Switch, TokenKind::Match],
        )
        .unwrap();
        assert_eq!(
            both.iter().map(|s| s.kind).collect::<Vec<_>>(),
            vec![TokenKind::Switch, TokenKind::Match]
        );
        let default = both[1].default.as_ref().unwrap();
        assert!(tokens[default.colon_index].is_kind(TokenKind::DoubleArrow));

        let only_match =
            ControlCaseStructuresAnalyzer::find_control_structures(&tokens, &[TokenKind::Match])
                .unwrap();
        assert_eq!(only_match.len(), 1);
    }

    #[test]
    fn test_enum_cases() {
        let code = "<?php enum Suit: string { case Hearts = 'H'; case Spades = 'S'; }";
        let tokens = Tokens::from_code(code);
        let found =
            ControlCaseStructuresAnalyzer::find_control_structures(&tokens, &[TokenKind::Enum])
                .unwrap();
        assert_eq!(found[0].cases.len(), 2);
        assert!(tokens[found[0].cases[0].colon_index].is_kind(TokenKind::Equals));
    }

    #[test]
    fn test_alternative_syntax() {
        let code = "<?php switch ($a): case 1: break; endswitch;";
        let tokens = Tokens::from_code(code);
        let found =
            ControlCaseStructuresAnalyzer::find_control_structures(&tokens, &[TokenKind::Switch])
                .unwrap();
        assert!(found[0].alternative_syntax);
        assert!(tokens[found[0].open].is_kind(TokenKind::Colon));
        assert_eq!(found[0].close, tokens.len() - 1);
    }

    #[test]
    fn test_errors() {
        let tokens = Tokens::from_code("<?php switch ($a) { case 1: ");
        assert!(matches!(
            ControlCaseStructuresAnalyzer::find_control_structures(&tokens, &[TokenKind::Switch]),
            Err(TokenError::MalformedStructure { index: 1, .. })
        ));

        let tokens = Tokens::from_code("<?php switch ($a) { default: default: }");
        assert!(matches!(
            ControlCaseStructuresAnalyzer::find_control_structures(&tokens, &[TokenKind::Switch]),
            Err(TokenError::MalformedStructure { .. })
        ));

        let tokens = Tokens::from_code("<?php if ($a) {}");
        assert!(matches!(
            ControlCaseStructuresAnalyzer::find_control_structures(&tokens, &[TokenKind::If]),
            Err(TokenError::InvalidArgument(_))
        ));
    }
}
