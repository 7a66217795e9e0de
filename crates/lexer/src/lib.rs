//! 字句解析を行うためのクレートです。

#![warn(missing_docs)]

mod error;
mod token_kind;

use std::ops::Range as StdRange;

use logos::Logos;
use text_size::{TextRange, TextSize};

pub use error::LexError;
pub use token_kind::{Token, TokenCategory, TokenKind};

/// 整数定数として許される最大値
pub const MAX_INTEGER_CONSTANT: u16 = 32767;

/// 字句解析器
///
/// トリビア(空白、コメント)もトークンとして返します。
/// 認識できない文字列は[TokenKind::Error]のトークンになります。
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, TokenKind>,
}

impl<'a> Lexer<'a> {
    /// 新しい字句解析器を返します。
    ///
    /// # Parameters
    ///
    /// `input` - 字句解析する文字列を指定します。
    ///
    /// # Panics
    ///
    /// 位置は`u32`で表すため、4GiB以上の入力はトークンを返す時点でパニックします。
    /// 事前に長さを検証する場合は[tokenize]を使用してください。
    pub fn new(input: &'a str) -> Self {
        Self {
            inner: TokenKind::lexer(input),
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let kind = self.inner.next()?.unwrap_or(TokenKind::Error);
        let text = self.inner.slice();

        let range = {
            let StdRange { start, end } = self.inner.span();
            let start = TextSize::try_from(start).unwrap();
            let end = TextSize::try_from(end).unwrap();

            TextRange::new(start, end)
        };

        Some(Self::Item { kind, text, range })
    }
}

/// 入力全体を字句解析し、トークン列を検証して返します。
///
/// トリビアはトークン列に残ります。
/// 最初に見つかった不正なトークンを[LexError]として返します。
pub fn tokenize(input: &str) -> Result<Vec<Token<'_>>, LexError> {
    check_input_len(input.len())?;

    let tokens: Vec<_> = Lexer::new(input).collect();

    for token in &tokens {
        validate(token)?;
    }

    Ok(tokens)
}

fn check_input_len(len: usize) -> Result<(), LexError> {
    match TextSize::try_from(len) {
        Ok(_) => Ok(()),
        Err(_) => Err(LexError::InputTooLarge { len }),
    }
}

fn validate(token: &Token) -> Result<(), LexError> {
    match token.kind {
        TokenKind::IntegerLiteral if token.integer_value().is_none() => {
            Err(LexError::IntegerOutOfRange {
                text: token.text.to_string(),
                range: token.range,
            })
        }
        TokenKind::UnterminatedString => Err(LexError::UnterminatedString { range: token.range }),
        TokenKind::CommentBlock(false) => Err(LexError::UnterminatedComment { range: token.range }),
        TokenKind::Error => Err(LexError::UnrecognizedToken {
            text: token.text.to_string(),
            range: token.range,
        }),
        _ => Ok(()),
    }
}
