pub(crate) mod node_builder;
mod parse_error;

use lexer::TokenKind;
use rowan::GreenNode;

use crate::grammar;
use crate::source::Source;
use node_builder::NodeBuilder;
pub use parse_error::{ParseError, UnexpectedToken};

pub(crate) type ParseResult<T> = Result<T, ParseError>;

/// 式と文の入れ子の最大の深さ
///
/// 生成規則は再帰呼び出しで入れ子を辿るため、これを超える入力はスタックを使い切る前にエラーにします。
pub const MAX_NESTING_DEPTH: usize = 256;

pub(crate) struct Parser<'l, 'input> {
    source: Source<'l, 'input>,
    depth: usize,
}

impl<'l, 'input> Parser<'l, 'input> {
    pub(crate) fn new(source: Source<'l, 'input>) -> Self {
        Self { source, depth: 0 }
    }

    /// クラス宣言をパースし、入力を最後まで読み切ったことを確認します。
    pub(crate) fn parse(mut self) -> ParseResult<GreenNode> {
        let class = grammar::parse_class(&mut self)?;
        self.expect_end()?;

        Ok(class)
    }

    /// 入れ子を1段深くして`rule`を実行します。
    ///
    /// 深さが[MAX_NESTING_DEPTH]に達している場合は`rule`を実行せずにエラーを返します。
    pub(crate) fn nested<T>(
        &mut self,
        rule: impl FnOnce(&mut Self) -> ParseResult<T>,
    ) -> ParseResult<T> {
        if self.depth >= MAX_NESTING_DEPTH {
            let range = match self.source.peek_token() {
                Some(token) => token.range,
                None => self.source.end_range(),
            };
            return Err(ParseError::NestingTooDeep { range });
        }

        self.depth += 1;
        let result = rule(self);
        self.depth -= 1;

        result
    }

    pub(crate) fn start(&self) -> NodeBuilder {
        NodeBuilder::new()
    }

    /// 現在のトークンを`node`の子として追加し、次のトークンへ進めます。
    pub(crate) fn bump(&mut self, node: &mut NodeBuilder) -> ParseResult<()> {
        match self.source.next_token() {
            Some(token) => {
                node.token(token);
                Ok(())
            }
            None => Err(ParseError::ExhaustedStream {
                expected: vec![],
                range: self.source.end_range(),
            }),
        }
    }

    pub(crate) fn peek(&mut self) -> Option<TokenKind> {
        self.source.peek_kind()
    }

    /// 現在のトークンの次のトークン種別を返します。
    pub(crate) fn peek_next(&mut self) -> Option<TokenKind> {
        self.source.peek_next_kind()
    }

    pub(crate) fn at(&mut self, kind: TokenKind) -> bool {
        self.peek() == Some(kind)
    }

    pub(crate) fn at_set(&mut self, set: &[TokenKind]) -> bool {
        self.peek().map_or(false, |k| set.contains(&k))
    }

    pub(crate) fn at_end(&mut self) -> bool {
        !self.source.has_more()
    }

    pub(crate) fn expect(&mut self, node: &mut NodeBuilder, kind: TokenKind) -> ParseResult<()> {
        self.expect_one_of(node, &[kind])
    }

    /// 現在のトークンが`set`のいずれかであれば`node`に追加し、そうでなければエラーを返します。
    pub(crate) fn expect_one_of(
        &mut self,
        node: &mut NodeBuilder,
        set: &[TokenKind],
    ) -> ParseResult<()> {
        if self.at_set(set) {
            self.bump(node)
        } else {
            Err(self.error(set))
        }
    }

    /// 現在のトークンが期待した種別でないことを表すエラーを作成します。
    ///
    /// トークンを読み切っている場合は[ParseError::ExhaustedStream]になります。
    pub(crate) fn error(&mut self, expected: &[TokenKind]) -> ParseError {
        match self.source.peek_token() {
            Some(token) => ParseError::UnexpectedToken(UnexpectedToken {
                expected: expected.to_vec(),
                actual: token.kind,
                text: token.text.to_string(),
                range: token.range,
            }),
            None => ParseError::ExhaustedStream {
                expected: expected.to_vec(),
                range: self.source.end_range(),
            },
        }
    }

    fn expect_end(&mut self) -> ParseResult<()> {
        if self.at_end() {
            Ok(())
        } else {
            Err(self.error(&[]))
        }
    }
}
