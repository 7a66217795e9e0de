use std::fmt;

use logos::{Lexer, Logos};
use text_size::TextRange;

/// `/*` から `*/` までを読み進めます。
///
/// 閉じられていない場合は入力の末尾まで読み、`false`を返します。
fn lex_block_comment(lex: &mut Lexer<TokenKind>) -> Option<bool> {
    let remainder = lex.remainder();
    match remainder.find("*/") {
        Some(end) => {
            lex.bump(end + 2);
            Some(true)
        }
        None => {
            lex.bump(remainder.len());
            Some(false)
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Logos)]
pub enum TokenKind {
    // keywords
    #[token("class")]
    ClassKw,
    #[token("constructor")]
    ConstructorKw,
    #[token("function")]
    FunctionKw,
    #[token("method")]
    MethodKw,
    #[token("field")]
    FieldKw,
    #[token("static")]
    StaticKw,
    #[token("var")]
    VarKw,
    #[token("int")]
    IntKw,
    #[token("char")]
    CharKw,
    #[token("boolean")]
    BooleanKw,
    #[token("void")]
    VoidKw,
    #[token("true")]
    TrueKw,
    #[token("false")]
    FalseKw,
    #[token("null")]
    NullKw,
    #[token("this")]
    ThisKw,
    #[token("let")]
    LetKw,
    #[token("do")]
    DoKw,
    #[token("if")]
    IfKw,
    #[token("else")]
    ElseKw,
    #[token("while")]
    WhileKw,
    #[token("return")]
    ReturnKw,

    // identifier
    #[regex("[A-Za-z_][A-Za-z0-9_]*")]
    Ident,

    // literals
    #[regex("[0-9]+")]
    IntegerLiteral,
    #[regex(r#""[^"\n]*""#)]
    StringLiteral,
    #[regex(r#""[^"\n]*"#)]
    UnterminatedString,

    // symbols
    #[token("+")]
    Plus,
    #[token("-")]
    Minus,
    #[token("*")]
    Star,
    #[token("/")]
    Slash,
    #[token("&")]
    Amp,
    #[token("|")]
    Pipe,
    #[token("<")]
    LAngle,
    #[token(">")]
    RAngle,
    #[token("=")]
    Eq,
    #[token("~")]
    Tilde,

    // delimiters
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token(";")]
    Semicolon,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBrace,
    #[token("]")]
    RBrace,
    #[token("{")]
    LCurly,
    #[token("}")]
    RCurly,

    // trivias
    #[regex("[ \t\r\n\x0C]+")]
    Whitespace,
    #[regex("//[^\n]*")]
    CommentSingle,
    /// `/* ... */` と `/** ... */`。閉じられているかどうかを保持します。
    #[token("/*", lex_block_comment)]
    CommentBlock(bool),

    Error,
}

/// 言語仕様上のトークン分類
///
/// 構文木の終端記号はこの分類で表現されます。
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TokenCategory {
    Keyword,
    Symbol,
    IntegerConstant,
    StringConstant,
    Identifier,
}

impl fmt::Display for TokenCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Keyword => "keyword",
            Self::Symbol => "symbol",
            Self::IntegerConstant => "integerConstant",
            Self::StringConstant => "stringConstant",
            Self::Identifier => "identifier",
        })
    }
}

impl TokenKind {
    pub fn is_trivia(self) -> bool {
        matches!(
            self,
            Self::Whitespace | Self::CommentSingle | Self::CommentBlock(_)
        )
    }

    /// トークンの分類を返します。
    ///
    /// トリビアとエラーのトークンは分類を持たないため`None`を返します。
    pub fn category(self) -> Option<TokenCategory> {
        let category = match self {
            Self::ClassKw
            | Self::ConstructorKw
            | Self::FunctionKw
            | Self::MethodKw
            | Self::FieldKw
            | Self::StaticKw
            | Self::VarKw
            | Self::IntKw
            | Self::CharKw
            | Self::BooleanKw
            | Self::VoidKw
            | Self::TrueKw
            | Self::FalseKw
            | Self::NullKw
            | Self::ThisKw
            | Self::LetKw
            | Self::DoKw
            | Self::IfKw
            | Self::ElseKw
            | Self::WhileKw
            | Self::ReturnKw => TokenCategory::Keyword,

            Self::Ident => TokenCategory::Identifier,
            Self::IntegerLiteral => TokenCategory::IntegerConstant,
            Self::StringLiteral => TokenCategory::StringConstant,

            Self::Plus
            | Self::Minus
            | Self::Star
            | Self::Slash
            | Self::Amp
            | Self::Pipe
            | Self::LAngle
            | Self::RAngle
            | Self::Eq
            | Self::Tilde
            | Self::Comma
            | Self::Dot
            | Self::Semicolon
            | Self::LParen
            | Self::RParen
            | Self::LBrace
            | Self::RBrace
            | Self::LCurly
            | Self::RCurly => TokenCategory::Symbol,

            Self::UnterminatedString
            | Self::Whitespace
            | Self::CommentSingle
            | Self::CommentBlock(_)
            | Self::Error => return None,
        };

        Some(category)
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::ClassKw => "'class'",
            Self::ConstructorKw => "'constructor'",
            Self::FunctionKw => "'function'",
            Self::MethodKw => "'method'",
            Self::FieldKw => "'field'",
            Self::StaticKw => "'static'",
            Self::VarKw => "'var'",
            Self::IntKw => "'int'",
            Self::CharKw => "'char'",
            Self::BooleanKw => "'boolean'",
            Self::VoidKw => "'void'",
            Self::TrueKw => "'true'",
            Self::FalseKw => "'false'",
            Self::NullKw => "'null'",
            Self::ThisKw => "'this'",
            Self::LetKw => "'let'",
            Self::DoKw => "'do'",
            Self::IfKw => "'if'",
            Self::ElseKw => "'else'",
            Self::WhileKw => "'while'",
            Self::ReturnKw => "'return'",
            Self::Ident => "identifier",
            Self::IntegerLiteral => "integerConstant",
            Self::StringLiteral => "stringConstant",
            Self::UnterminatedString => "unterminated stringConstant",
            Self::Plus => "'+'",
            Self::Minus => "'-'",
            Self::Star => "'*'",
            Self::Slash => "'/'",
            Self::Amp => "'&'",
            Self::Pipe => "'|'",
            Self::LAngle => "'<'",
            Self::RAngle => "'>'",
            Self::Eq => "'='",
            Self::Tilde => "'~'",
            Self::Comma => "','",
            Self::Dot => "'.'",
            Self::Semicolon => "';'",
            Self::LParen => "'('",
            Self::RParen => "')'",
            Self::LBrace => "'['",
            Self::RBrace => "']'",
            Self::LCurly => "'{'",
            Self::RCurly => "'}'",
            Self::Whitespace => "whitespace",
            Self::CommentSingle | Self::CommentBlock(_) => "comment",
            Self::Error => "an unrecognized token",
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub range: TextRange,
}

impl<'a> Token<'a> {
    /// トークンの分類を返します。
    pub fn category(&self) -> Option<TokenCategory> {
        self.kind.category()
    }

    /// 正規化されたリテラル値を返します。
    ///
    /// 文字列定数は前後のダブルクォートを取り除いた内容を、それ以外は字句そのものを返します。
    pub fn value(&self) -> &'a str {
        if self.kind == TokenKind::StringLiteral {
            &self.text[1..self.text.len() - 1]
        } else {
            self.text
        }
    }

    /// 整数定数の値を返します。
    ///
    /// 整数定数でない場合、または値が`0..=32767`に収まらない場合は`None`を返します。
    pub fn integer_value(&self) -> Option<u16> {
        if self.kind != TokenKind::IntegerLiteral {
            return None;
        }

        self.text
            .parse::<u16>()
            .ok()
            .filter(|value| *value <= crate::MAX_INTEGER_CONSTANT)
    }
}
