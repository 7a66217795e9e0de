use std::fmt;

use lexer::{TokenCategory, TokenKind};
use text_size::TextRange;
use thiserror::Error;

/// 構文木構築時のエラー
///
/// どちらのエラーもファイル全体のパースを中断します。
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// トークンが必要な位置で入力を読み切った
    #[error(
        "error at {}..{}: expected {}, but found end of file",
        u32::from(.range.start()),
        u32::from(.range.end()),
        ExpectedKinds(.expected)
    )]
    ExhaustedStream {
        /// 期待されるトークンの種類
        expected: Vec<TokenKind>,
        /// 入力の末尾を指す空の範囲
        range: TextRange,
    },

    /// 式か文の入れ子が[crate::MAX_NESTING_DEPTH]を超えた
    #[error(
        "error at {}..{}: nesting is deeper than {} levels",
        u32::from(.range.start()),
        u32::from(.range.end()),
        crate::MAX_NESTING_DEPTH
    )]
    NestingTooDeep {
        /// 入れ子を深くしようとした位置のトークンの範囲
        range: TextRange,
    },

    /// 文法上必須の位置に期待しないトークンがあった
    #[error(transparent)]
    UnexpectedToken(#[from] UnexpectedToken),
}

impl ParseError {
    /// 期待されるトークンの種類
    ///
    /// 入力の末尾が期待されている場合と、入れ子が深すぎる場合は空です。
    pub fn expected(&self) -> &[TokenKind] {
        match self {
            Self::ExhaustedStream { expected, .. } => expected,
            Self::NestingTooDeep { .. } => &[],
            Self::UnexpectedToken(e) => e.expected(),
        }
    }

    /// エラーが発生したトークンの範囲
    pub fn range(&self) -> TextRange {
        match self {
            Self::ExhaustedStream { range, .. } | Self::NestingTooDeep { range } => *range,
            Self::UnexpectedToken(e) => e.range(),
        }
    }
}

/// 期待しないトークン
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnexpectedToken {
    pub(crate) expected: Vec<TokenKind>,
    pub(crate) actual: TokenKind,
    pub(crate) text: String,
    pub(crate) range: TextRange,
}

impl UnexpectedToken {
    /// 期待されるトークンの種類
    pub fn expected(&self) -> &[TokenKind] {
        &self.expected
    }

    /// 実際に得られたトークンの種類
    pub fn actual(&self) -> TokenKind {
        self.actual
    }

    /// 実際に得られたトークンの分類
    pub fn actual_category(&self) -> Option<TokenCategory> {
        self.actual.category()
    }

    /// 実際に得られたトークンの字句
    pub fn text(&self) -> &str {
        &self.text
    }

    /// エラーが発生したトークンの範囲
    ///
    /// この範囲は、入力に対する位置です。
    pub fn range(&self) -> TextRange {
        self.range
    }
}

impl std::error::Error for UnexpectedToken {}

impl fmt::Display for UnexpectedToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "error at {}..{}: expected {}, but found {}",
            u32::from(self.range.start()),
            u32::from(self.range.end()),
            ExpectedKinds(&self.expected),
            self.actual,
        )?;

        // キーワードと記号は種別の表示に字句が含まれている
        if matches!(
            self.actual_category(),
            Some(TokenCategory::Identifier | TokenCategory::IntegerConstant | TokenCategory::StringConstant)
        ) {
            write!(f, " '{}'", self.text)?;
        }

        Ok(())
    }
}

/// 期待されるトークン種別の一覧を`a, b or c`の形式で表示します。
struct ExpectedKinds<'a>(&'a [TokenKind]);

impl fmt::Display for ExpectedKinds<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let num_expected = self.0.len();
        if num_expected == 0 {
            return f.write_str("end of file");
        }

        let is_first = |idx| idx == 0;
        let is_last = |idx| idx == num_expected - 1;

        for (idx, expected_kind) in self.0.iter().enumerate() {
            if is_first(idx) {
                write!(f, "{expected_kind}")?;
            } else if is_last(idx) {
                write!(f, " or {expected_kind}")?;
            } else {
                write!(f, ", {expected_kind}")?;
            }
        }

        Ok(())
    }
}
