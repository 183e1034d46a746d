//! Colons that belong to `switch` statements

use super::control_case::ControlCaseStructuresAnalyzer;
use crate::error::Result;
use crate::kind::TokenKind;
use crate::tokens::Tokens;

pub struct SwitchAnalyzer;

impl SwitchAnalyzer {
    /// Whether the token at `index` is a colon that belongs to a switch:
    /// the alternative-syntax opening colon or a `case`/`default` label colon.
    ///
    /// Ternary colons, goto labels and `if (...):` colons are not. Neither
    /// are the `case`/`default` keywords themselves.
    pub fn belongs_to_switch(tokens: &Tokens, index: usize) -> Result<bool> {
        if !tokens.at(index)?.is_kind(TokenKind::Colon) {
            return Ok(false);
        }
        Ok(Self::colon_indices(tokens)?.contains(&index))
    }

    /// Every colon that belongs to a switch, in ascending order.
    pub fn colon_indices(tokens: &Tokens) -> Result<Vec<usize>> {
        let mut indices = Vec::new();
        for switch in
            ControlCaseStructuresAnalyzer::find_control_structures(tokens, &[TokenKind::Switch])?
        {
            if switch.alternative_syntax {
                indices.push(switch.open);
            }
            indices.extend(switch.cases.iter().map(|case| case.colon_index));
            indices.extend(switch.default.iter().map(|default| default.colon_index));
        }
        indices.retain(|&i| tokens[i].is_kind(TokenKind::Colon));
        indices.sort_unstable();
        Ok(indices)
    }
}
