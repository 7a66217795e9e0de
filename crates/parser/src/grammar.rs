mod expr;
mod stmt;
mod toplevel;

use lexer::TokenKind;
use rowan::GreenNode;

use crate::parser::{node_builder::NodeBuilder, ParseResult, Parser};

/// 組み込み型のキーワードと、クラス名としての識別子
const TYPE_FIRST: [TokenKind; 4] = [
    TokenKind::IntKw,
    TokenKind::CharKw,
    TokenKind::BooleanKw,
    TokenKind::Ident,
];

/// ルートのクラス宣言をパースします。
pub(crate) fn parse_class(parser: &mut Parser) -> ParseResult<GreenNode> {
    toplevel::parse_class(parser)
}

/// 型を1トークン読み、`node`に追加します。
///
/// どの型であっても1トークンなので、先読みも巻き戻しも必要ありません。
fn expect_type(parser: &mut Parser, node: &mut NodeBuilder) -> ParseResult<()> {
    parser.expect_one_of(node, &TYPE_FIRST)
}
