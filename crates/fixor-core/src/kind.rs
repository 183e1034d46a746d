//! Token kinds
//!
//! Native kinds mirror what a PHP 8 lexer produces. Synthesized kinds are
//! never produced by the lexer; transformers assign them after lexing.

use std::fmt;

/// Kind tag of a [`Token`](crate::Token)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TokenKind {
    // Markup and trivia
    InlineHtml,
    OpenTag,
    OpenTagWithEcho,
    CloseTag,
    Whitespace,
    Comment,
    DocComment,

    // Literals and names
    LNumber,
    DNumber,
    ConstantEncapsedString,
    EncapsedAndWhitespace,
    Variable,
    Identifier,
    StringVarname,
    NumString,
    StartHeredoc,
    EndHeredoc,
    DollarOpenCurlyBraces,
    CurlyOpen,
    NsSeparator,
    Ellipsis,
    Attribute,
    MagicConstant,
    BadCharacter,

    // Keywords
    Abstract,
    Array,
    As,
    Break,
    Callable,
    Case,
    Catch,
    Class,
    Clone,
    Const,
    Continue,
    Declare,
    Default,
    Do,
    Echo,
    Else,
    ElseIf,
    Empty,
    EndDeclare,
    EndFor,
    EndForeach,
    EndIf,
    EndSwitch,
    EndWhile,
    Enum,
    Eval,
    Exit,
    Extends,
    Final,
    Finally,
    Fn,
    For,
    Foreach,
    Function,
    Global,
    Goto,
    HaltCompiler,
    If,
    Implements,
    Include,
    IncludeOnce,
    InstanceOf,
    InsteadOf,
    Interface,
    Isset,
    List,
    LogicalAnd,
    LogicalOr,
    LogicalXor,
    Match,
    Namespace,
    New,
    Print,
    Private,
    Protected,
    Public,
    Readonly,
    Require,
    RequireOnce,
    Return,
    Static,
    Switch,
    Throw,
    Trait,
    Try,
    Unset,
    Use,
    Var,
    While,
    Yield,
    YieldFrom,

    // Casts
    IntCast,
    DoubleCast,
    StringCast,
    ArrayCast,
    ObjectCast,
    BoolCast,
    UnsetCast,

    // Multi-character operators
    IsEqual,
    IsNotEqual,
    IsIdentical,
    IsNotIdentical,
    IsSmallerOrEqual,
    IsGreaterOrEqual,
    Spaceship,
    BooleanAnd,
    BooleanOr,
    Inc,
    Dec,
    PlusEqual,
    MinusEqual,
    MulEqual,
    DivEqual,
    ConcatEqual,
    ModEqual,
    AndEqual,
    OrEqual,
    XorEqual,
    Sl,
    Sr,
    SlEqual,
    SrEqual,
    Pow,
    PowEqual,
    Coalesce,
    CoalesceEqual,
    ObjectOperator,
    NullsafeObjectOperator,
    DoubleArrow,
    DoubleColon,

    // Single characters
    Semicolon,
    Colon,
    Comma,
    Dot,
    OpenParen,
    CloseParen,
    OpenBracket,
    CloseBracket,
    OpenCurly,
    CloseCurly,
    Equals,
    Plus,
    Minus,
    Asterisk,
    Slash,
    Percent,
    Ampersand,
    Pipe,
    Caret,
    Tilde,
    Exclamation,
    Question,
    LessThan,
    GreaterThan,
    At,
    Dollar,
    Backtick,
    DoubleQuote,

    // Synthesized by transformers
    ArrayIndexCurlyBraceOpen,
    ArrayIndexCurlyBraceClose,
    ArraySquareBraceOpen,
    ArraySquareBraceClose,
    ArrayTypehint,
    AttributeClose,
    BraceClassInstantiationOpen,
    BraceClassInstantiationClose,
    ClassConstant,
    ConstImport,
    CurlyClose,
    DestructuringSquareBraceOpen,
    DestructuringSquareBraceClose,
    DollarCloseCurlyBraces,
    DynamicPropBraceOpen,
    DynamicPropBraceClose,
    DynamicVarBraceOpen,
    DynamicVarBraceClose,
    FirstClassCallable,
    FunctionImport,
    GroupImportBraceOpen,
    GroupImportBraceClose,
    NamedArgumentColon,
    NamedArgumentName,
    NamespaceOperator,
    NullableType,
    ReturnRef,
    TypeAlternation,
    TypeColon,
    UseLambda,
    UseTrait,
}

impl TokenKind {
    /// Keywords whose text may be normalized by casing fixers.
    ///
    /// Casts and magic constants are not keywords. Synthesized kinds that
    /// retag a keyword (`::class`, `use function`, closure `use`...) are.
    pub fn is_keyword(self) -> bool {
        use TokenKind::*;
        matches!(
            self,
            Abstract
                | Array
                | As
                | Break
                | Callable
                | Case
                | Catch
                | Class
                | Clone
                | Const
                | Continue
                | Declare
                | Default
                | Do
                | Echo
                | Else
                | ElseIf
                | Empty
                | EndDeclare
                | EndFor
                | EndForeach
                | EndIf
                | EndSwitch
                | EndWhile
                | Enum
                | Eval
                | Exit
                | Extends
                | Final
                | Finally
                | Fn
                | For
                | Foreach
                | Function
                | Global
                | Goto
                | HaltCompiler
                | If
                | Implements
                | Include
                | IncludeOnce
                | InstanceOf
                | InsteadOf
                | Interface
                | Isset
                | List
                | LogicalAnd
                | LogicalOr
                | LogicalXor
                | Match
                | Namespace
                | New
                | Print
                | Private
                | Protected
                | Public
                | Readonly
                | Require
                | RequireOnce
                | Return
                | Static
                | Switch
                | Throw
                | Trait
                | Try
                | Unset
                | Use
                | Var
                | While
                | Yield
                | YieldFrom
                | ArrayTypehint
                | ClassConstant
                | ConstImport
                | FunctionImport
                | NamespaceOperator
                | UseLambda
                | UseTrait
        )
    }

    pub fn is_cast(self) -> bool {
        matches!(
            self,
            TokenKind::IntCast
                | TokenKind::DoubleCast
                | TokenKind::StringCast
                | TokenKind::ArrayCast
                | TokenKind::ObjectCast
                | TokenKind::BoolCast
                | TokenKind::UnsetCast
        )
    }

    pub fn is_comment(self) -> bool {
        matches!(self, TokenKind::Comment | TokenKind::DocComment)
    }

    /// `class`, `interface`, `trait` and `enum`
    pub fn is_classy(self) -> bool {
        matches!(
            self,
            TokenKind::Class | TokenKind::Interface | TokenKind::Trait | TokenKind::Enum
        )
    }

    /// True for kinds only transformers assign.
    pub fn is_synthesized(self) -> bool {
        self >= TokenKind::ArrayIndexCurlyBraceOpen
    }

    /// Fixed text of single-character and operator kinds.
    ///
    /// Returns `None` for kinds whose text varies (names, literals, trivia,
    /// keywords).
    pub fn fixed_text(self) -> Option<&'static str> {
        use TokenKind::*;
        let text = match self {
            Semicolon => ";",
            Colon | TypeColon | NamedArgumentColon => ":",
            Comma => ",",
            Dot => ".",
            OpenParen | BraceClassInstantiationOpen => "(",
            CloseParen | BraceClassInstantiationClose => ")",
            OpenBracket | ArraySquareBraceOpen | DestructuringSquareBraceOpen => "[",
            CloseBracket | ArraySquareBraceClose | DestructuringSquareBraceClose
            | AttributeClose => "]",
            OpenCurly | ArrayIndexCurlyBraceOpen | DynamicPropBraceOpen | DynamicVarBraceOpen
            | GroupImportBraceOpen => "{",
            CloseCurly | ArrayIndexCurlyBraceClose | DynamicPropBraceClose
            | DynamicVarBraceClose | GroupImportBraceClose | CurlyClose
            | DollarCloseCurlyBraces => "}",
            Equals => "=",
            Plus => "+",
            Minus => "-",
            Asterisk => "*",
            Slash => "/",
            Percent => "%",
            Ampersand | ReturnRef => "&",
            Pipe | TypeAlternation => "|",
            Caret => "^",
            Tilde => "~",
            Exclamation => "!",
            Question | NullableType => "?",
            LessThan => "<",
            GreaterThan => ">",
            At => "@",
            Dollar => "$",
            Backtick => "`",
            DoubleQuote => "\"",
            NsSeparator => "\\",
            Ellipsis | FirstClassCallable => "...",
            Attribute => "#[",
            CurlyOpen => "{",
            DollarOpenCurlyBraces => "${",
            IsEqual => "==",
            IsIdentical => "===",
            IsNotIdentical => "!==",
            IsSmallerOrEqual => "<=",
            IsGreaterOrEqual => ">=",
            Spaceship => "<=>",
            BooleanAnd => "&&",
            BooleanOr => "||",
            Inc => "++",
            Dec => "--",
            PlusEqual => "+=",
            MinusEqual => "-=",
            MulEqual => "*=",
            DivEqual => "/=",
            ConcatEqual => ".=",
            ModEqual => "%=",
            AndEqual => "&=",
            OrEqual => "|=",
            XorEqual => "^=",
            Sl => "<<",
            Sr => ">>",
            SlEqual => "<<=",
            SrEqual => ">>=",
            Pow => "**",
            PowEqual => "**=",
            Coalesce => "??",
            CoalesceEqual => "??=",
            ObjectOperator => "->",
            NullsafeObjectOperator => "?->",
            DoubleArrow => "=>",
            DoubleColon => "::",
            _ => return None,
        };
        Some(text)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Resolve a case-insensitive PHP keyword.
///
/// Context-dependent words (`enum`, `readonly`, `from`) are resolved by the
/// lexer, not here.
pub fn keyword(word: &str) -> Option<TokenKind> {
    use TokenKind::*;
    let lower = word.to_ascii_lowercase();
    let kind = match lower.as_str() {
        "abstract" => Abstract,
        "and" => LogicalAnd,
        "array" => Array,
        "as" => As,
        "break" => Break,
        "callable" => Callable,
        "case" => Case,
        "catch" => Catch,
        "class" => Class,
        "clone" => Clone,
        "const" => Const,
        "continue" => Continue,
        "declare" => Declare,
        "default" => Default,
        "die" | "exit" => Exit,
        "do" => Do,
        "echo" => Echo,
        "else" => Else,
        "elseif" => ElseIf,
        "empty" => Empty,
        "enddeclare" => EndDeclare,
        "endfor" => EndFor,
        "endforeach" => EndForeach,
        "endif" => EndIf,
        "endswitch" => EndSwitch,
        "endwhile" => EndWhile,
        "eval" => Eval,
        "extends" => Extends,
        "final" => Final,
        "finally" => Finally,
        "fn" => Fn,
        "for" => For,
        "foreach" => Foreach,
        "function" => Function,
        "global" => Global,
        "goto" => Goto,
        "__halt_compiler" => HaltCompiler,
        "if" => If,
        "implements" => Implements,
        "include" => Include,
        "include_once" => IncludeOnce,
        "instanceof" => InstanceOf,
        "insteadof" => InsteadOf,
        "interface" => Interface,
        "isset" => Isset,
        "list" => List,
        "match" => Match,
        "namespace" => Namespace,
        "new" => New,
        "or" => LogicalOr,
        "print" => Print,
        "private" => Private,
        "protected" => Protected,
        "public" => Public,
        "readonly" => Readonly,
        "require" => Require,
        "require_once" => RequireOnce,
        "return" => Return,
        "static" => Static,
        "switch" => Switch,
        "throw" => Throw,
        "trait" => Trait,
        "try" => Try,
        "unset" => Unset,
        "use" => Use,
        "var" => Var,
        "while" => While,
        "xor" => LogicalXor,
        "yield" => Yield,
        "__class__" | "__dir__" | "__file__" | "__function__" | "__line__" | "__method__"
        | "__namespace__" | "__trait__" => MagicConstant,
        _ => return None,
    };
    Some(kind)
}

/// Resolve the inner word of a cast such as `(int)`.
pub fn cast(word: &str) -> Option<TokenKind> {
    let kind = match word.to_ascii_lowercase().as_str() {
        "int" | "integer" => TokenKind::IntCast,
        "float" | "double" | "real" => TokenKind::DoubleCast,
        "string" | "binary" => TokenKind::StringCast,
        "array" => TokenKind::ArrayCast,
        "object" => TokenKind::ObjectCast,
        "bool" | "boolean" => TokenKind::BoolCast,
        "unset" => TokenKind::UnsetCast,
        _ => return None,
    };
    Some(kind)
}
