use text_size::TextRange;
use thiserror::Error;

/// トークン自体のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    /// 言語に存在しない文字列
    #[error("error at {}..{}: unrecognized token '{text}'", u32::from(.range.start()), u32::from(.range.end()))]
    UnrecognizedToken {
        /// 認識できなかった文字列
        text: String,
        /// 入力に対する位置
        range: TextRange,
    },

    /// `0..=32767`に収まらない整数定数
    #[error("error at {}..{}: integer constant {text} is out of range 0..=32767", u32::from(.range.start()), u32::from(.range.end()))]
    IntegerOutOfRange {
        /// 整数定数の字句
        text: String,
        /// 入力に対する位置
        range: TextRange,
    },

    /// 行末までに閉じられていない文字列定数
    #[error("error at {}..{}: unterminated string constant", u32::from(.range.start()), u32::from(.range.end()))]
    UnterminatedString {
        /// 入力に対する位置
        range: TextRange,
    },

    /// 入力の末尾までに閉じられていないブロックコメント
    #[error("error at {}..{}: unterminated block comment", u32::from(.range.start()), u32::from(.range.end()))]
    UnterminatedComment {
        /// 入力に対する位置
        range: TextRange,
    },

    /// 位置を`u32`で表せない長さの入力
    #[error("error at 0..0: input of {len} bytes is too large to tokenize")]
    InputTooLarge {
        /// 入力のバイト数
        len: usize,
    },
}

impl LexError {
    /// エラーが発生したトークンの範囲
    pub fn range(&self) -> TextRange {
        match self {
            Self::UnrecognizedToken { range, .. }
            | Self::IntegerOutOfRange { range, .. }
            | Self::UnterminatedString { range }
            | Self::UnterminatedComment { range } => *range,
            Self::InputTooLarge { .. } => TextRange::default(),
        }
    }
}
