use super::{next_meaningful_kind, prev_meaningful_kind, Transformer};
use crate::block::BlockType;
use crate::error::Result;
use crate::kind::TokenKind;
use crate::tokens::Tokens;

/// `Foo::class`
pub struct ClassConstantTransformer;

impl Transformer for ClassConstantTransformer {
    fn name(&self) -> &'static str {
        "class_constant"
    }

    fn custom_kinds(&self) -> &'static [TokenKind] {
        &[TokenKind::ClassConstant]
    }

    fn process(&self, tokens: &mut Tokens, index: usize) -> Result<()> {
        if tokens.at(index)?.is_kind(TokenKind::Class)
            && prev_meaningful_kind(tokens, index) == Some(TokenKind::DoubleColon)
        {
            tokens.set_kind(index, TokenKind::ClassConstant)?;
        }
        Ok(())
    }
}

/// `use function` and `use const`, including inside group imports.
pub struct ImportTransformer;

impl Transformer for ImportTransformer {
    fn name(&self) -> &'static str {
        "import"
    }

    fn custom_kinds(&self) -> &'static [TokenKind] {
        &[TokenKind::ConstImport, TokenKind::FunctionImport]
    }

    fn process(&self, tokens: &mut Tokens, index: usize) -> Result<()> {
        let import_kind = match tokens.at(index)?.kind() {
            TokenKind::Function => TokenKind::FunctionImport,
            TokenKind::Const => TokenKind::ConstImport,
            _ => return Ok(()),
        };

        if prev_meaningful_kind(tokens, index) != Some(TokenKind::Use) {
            // use A\{function b, const C};
            let next = tokens.get_next_token_of_kind(
                index,
                &[
                    TokenKind::Equals,
                    TokenKind::OpenParen,
                    TokenKind::ReturnRef,
                    TokenKind::GroupImportBraceClose,
                ],
            );
            if next.map(|i| tokens[i].kind()) != Some(TokenKind::GroupImportBraceClose) {
                return Ok(());
            }
        }
        tokens.set_kind(index, import_kind)
    }
}

/// Closure `use (...)` and trait `use` inside classy bodies.
pub struct UseTransformer;

impl UseTransformer {
    fn is_lambda_use(tokens: &Tokens, index: usize) -> bool {
        next_meaningful_kind(tokens, index) == Some(TokenKind::OpenParen)
    }
}

impl Transformer for UseTransformer {
    fn name(&self) -> &'static str {
        "use_keyword"
    }

    fn custom_kinds(&self) -> &'static [TokenKind] {
        &[TokenKind::UseLambda, TokenKind::UseTrait]
    }

    fn process(&self, tokens: &mut Tokens, index: usize) -> Result<()> {
        let kind = tokens.at(index)?.kind();
        if kind == TokenKind::Use {
            if Self::is_lambda_use(tokens, index) {
                tokens.set_kind(index, TokenKind::UseLambda)?;
            }
            return Ok(());
        }
        if !kind.is_classy() {
            return Ok(());
        }

        let Some(open) = tokens.get_next_token_of_kind(index, &[TokenKind::OpenCurly]) else {
            return Ok(());
        };
        let close = tokens.find_block_end(BlockType::CurlyBrace, open)?;
        for i in open + 1..close {
            if tokens[i].is_kind(TokenKind::Use) {
                let kind = if Self::is_lambda_use(tokens, i) {
                    TokenKind::UseLambda
                } else {
                    TokenKind::UseTrait
                };
                tokens.set_kind(i, kind)?;
            }
        }
        Ok(())
    }
}

/// `namespace\foo()`
pub struct NamespaceOperatorTransformer;

impl Transformer for NamespaceOperatorTransformer {
    fn name(&self) -> &'static str {
        "namespace_operator"
    }

    fn custom_kinds(&self) -> &'static [TokenKind] {
        &[TokenKind::NamespaceOperator]
    }

    fn process(&self, tokens: &mut Tokens, index: usize) -> Result<()> {
        if tokens.at(index)?.is_kind(TokenKind::Namespace)
            && next_meaningful_kind(tokens, index) == Some(TokenKind::NsSeparator)
        {
            tokens.set_kind(index, TokenKind::NamespaceOperator)?;
        }
        Ok(())
    }
}

/// `function &foo()` and `fn &() => ...`
pub struct ReturnRefTransformer;

impl Transformer for ReturnRefTransformer {
    fn name(&self) -> &'static str {
        "return_ref"
    }

    fn custom_kinds(&self) -> &'static [TokenKind] {
        &[TokenKind::ReturnRef]
    }

    fn process(&self, tokens: &mut Tokens, index: usize) -> Result<()> {
        if tokens.at(index)?.is_kind(TokenKind::Ampersand)
            && matches!(
                prev_meaningful_kind(tokens, index),
                Some(TokenKind::Function | TokenKind::Fn)
            )
        {
            tokens.set_kind(index, TokenKind::ReturnRef)?;
        }
        Ok(())
    }
}

/// `array` used as a type rather than as `array(...)`
pub struct ArrayTypehintTransformer;

impl Transformer for ArrayTypehintTransformer {
    fn name(&self) -> &'static str {
        "array_typehint"
    }

    fn custom_kinds(&self) -> &'static [TokenKind] {
        &[TokenKind::ArrayTypehint]
    }

    fn process(&self, tokens: &mut Tokens, index: usize) -> Result<()> {
        if tokens.at(index)?.is_kind(TokenKind::Array)
            && next_meaningful_kind(tokens, index) != Some(TokenKind::OpenParen)
        {
            tokens.set_kind(index, TokenKind::ArrayTypehint)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn kind_at(code: &str, index: usize) -> TokenKind {
        Tokens::from_code(code)[index].kind()
    }

    #[test]
    fn test_class_constant() {
        assert_eq!(kind_at("<?php echo X::class;", 5), TokenKind::ClassConstant);
        assert_eq!(kind_at("<?php echo X::cLaSS;", 5), TokenKind::ClassConstant);
        assert_eq!(kind_at("<?php echo X::bar;", 5), TokenKind::Identifier);
        assert_eq!(kind_at("<?php class X{}", 1), TokenKind::Class);
    }

    #[test]
    fn test_imports() {
        assert_eq!(kind_at("<?php use function Foo\\bar;", 3), TokenKind::FunctionImport);
        assert_eq!(kind_at("<?php use const Foo\\BAR;", 3), TokenKind::ConstImport);
        let tokens = Tokens::from_code("<?php use Foo\\{function bar, const BAZ};");
        assert_eq!(tokens.count_token_kind(TokenKind::FunctionImport), 1);
        assert_eq!(tokens.count_token_kind(TokenKind::ConstImport), 1);
        let tokens = Tokens::from_code("<?php class A { const B = 1; function c() {} }");
        assert_eq!(tokens.count_token_kind(TokenKind::ConstImport), 0);
        assert_eq!(tokens.count_token_kind(TokenKind::FunctionImport), 0);
    }

    #[test]
    fn test_use_kinds() {
        let code = "<?php\nuse A\\B;\nclass C {\n    use T;\n    function d() { return function () use ($x) {}; }\n}\n";
        let tokens = Tokens::from_code(code);
        let uses: Vec<TokenKind> = tokens
            .iter()
            .filter(|t| t.text() == "use")
            .map(|t| t.kind())
            .collect();
        assert_eq!(
            uses,
            vec![TokenKind::Use, TokenKind::UseTrait, TokenKind::UseLambda]
        );
    }

    #[test]
    fn test_namespace_operator_and_return_ref() {
        assert_eq!(kind_at("<?php namespace\\foo();", 1), TokenKind::NamespaceOperator);
        assert_eq!(kind_at("<?php namespace Foo;", 1), TokenKind::Namespace);
        assert_eq!(kind_at("<?php function &a() {}", 3), TokenKind::ReturnRef);
        assert_eq!(kind_at("<?php $a = $b & $c;", 7), TokenKind::Ampersand);
    }

    #[test]
    fn test_array_typehint() {
        let tokens = Tokens::from_code("<?php function a(array $b): array { return array(); }");
        let arrays: Vec<TokenKind> = tokens
            .iter()
            .filter(|t| t.text() == "array")
            .map(|t| t.kind())
            .collect();
        assert_eq!(
            arrays,
            vec![TokenKind::ArrayTypehint, TokenKind::ArrayTypehint, TokenKind::Array]
        );
    }
}
