//! Syntax tree definitions for the Jack language.
use lexer::{TokenCategory, TokenKind};
use num_derive::{FromPrimitive, ToPrimitive};
use num_traits::{FromPrimitive, ToPrimitive};

/// The language definition for Jack.
/// Required for rowan.
#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub enum JackLanguage {}

impl rowan::Language for JackLanguage {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        Self::Kind::from_u16(raw.0).unwrap()
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        rowan::SyntaxKind(kind.to_u16().unwrap())
    }
}

/// The syntax kinds for Jack.
///
/// Non-terminal kinds correspond one to one with the grammar rules.
/// Terminal kinds are the five token categories of the language.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, FromPrimitive, ToPrimitive)]
pub enum SyntaxKind {
    // ---program structure---
    /// `class Ident { ClassVarDec* SubroutineDec* }`
    Class,
    /// `(static | field) Type Ident (, Ident)* ;`
    ClassVarDec,
    /// `(constructor | function | method) (void | Type) Ident ( ParameterList ) SubroutineBody`
    SubroutineDec,
    /// `((Type Ident) (, Type Ident)*)?`
    ParameterList,
    /// `{ VarDec* Statements }`
    SubroutineBody,
    /// `var Type Ident (, Ident)* ;`
    VarDec,

    // ---statements---
    /// `Statement*`
    Statements,
    /// `let Ident ([ Expression ])? = Expression ;`
    LetStatement,
    /// `if ( Expression ) { Statements } (else { Statements })?`
    IfStatement,
    /// `while ( Expression ) { Statements }`
    WhileStatement,
    /// `do SubroutineCall ;`
    DoStatement,
    /// `return Expression? ;`
    ReturnStatement,

    // ---expressions---
    /// `Term (Op Term)*`
    Expression,
    /// `IntegerConstant` | `StringConstant` | `KeywordConstant` | `Ident`
    /// | `Ident [ Expression ]` | `SubroutineCall` | `( Expression )` | `UnaryOp Term`
    Term,
    /// `(Expression (, Expression)*)?`
    ExpressionList,

    // ---terminals---
    /// `class`, `let`, `int`, `true`, ...
    Keyword,
    /// `{`, `(`, `+`, `~`, ...
    Symbol,
    /// `INTEGER_CONSTANT`, ex. 10
    IntegerConstant,
    /// `STRING_CONSTANT`, ex. "hello"
    StringConstant,
    /// `IDENT`
    Identifier,
}

impl SyntaxKind {
    /// Returns true if the kind is one of the token categories.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::Keyword
                | Self::Symbol
                | Self::IntegerConstant
                | Self::StringConstant
                | Self::Identifier
        )
    }

    /// The grammar name of the kind, as used by the course's comparer files.
    pub fn tag(self) -> &'static str {
        match self {
            Self::Class => "class",
            Self::ClassVarDec => "classVarDec",
            Self::SubroutineDec => "subroutineDec",
            Self::ParameterList => "parameterList",
            Self::SubroutineBody => "subroutineBody",
            Self::VarDec => "varDec",
            Self::Statements => "statements",
            Self::LetStatement => "letStatement",
            Self::IfStatement => "ifStatement",
            Self::WhileStatement => "whileStatement",
            Self::DoStatement => "doStatement",
            Self::ReturnStatement => "returnStatement",
            Self::Expression => "expression",
            Self::Term => "term",
            Self::ExpressionList => "expressionList",
            Self::Keyword => "keyword",
            Self::Symbol => "symbol",
            Self::IntegerConstant => "integerConstant",
            Self::StringConstant => "stringConstant",
            Self::Identifier => "identifier",
        }
    }
}

impl From<TokenCategory> for SyntaxKind {
    fn from(category: TokenCategory) -> Self {
        match category {
            TokenCategory::Keyword => Self::Keyword,
            TokenCategory::Symbol => Self::Symbol,
            TokenCategory::IntegerConstant => Self::IntegerConstant,
            TokenCategory::StringConstant => Self::StringConstant,
            TokenCategory::Identifier => Self::Identifier,
        }
    }
}

impl From<TokenKind> for SyntaxKind {
    fn from(token_kind: TokenKind) -> Self {
        match token_kind.category() {
            Some(category) => category.into(),
            // trivias and invalid tokens never reach the tree
            None => unreachable!("{token_kind} has no syntax kind"),
        }
    }
}

/// The syntax node type for Jack.
pub type SyntaxNode = rowan::SyntaxNode<JackLanguage>;
/// The syntax token type for Jack.
pub type SyntaxToken = rowan::SyntaxToken<JackLanguage>;
/// The syntax element type for Jack.
pub type SyntaxElement = rowan::SyntaxElement<JackLanguage>;
