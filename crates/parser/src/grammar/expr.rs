use lexer::TokenKind;
use rowan::GreenNode;
use syntax::SyntaxKind;

use crate::parser::{node_builder::NodeBuilder, ParseResult, Parser};

/// 二項演算子
///
/// 優先順位はすべて同じで、左から順に適用されます。
const BINARY_OP: [TokenKind; 9] = [
    TokenKind::Plus,
    TokenKind::Minus,
    TokenKind::Star,
    TokenKind::Slash,
    TokenKind::Amp,
    TokenKind::Pipe,
    TokenKind::LAngle,
    TokenKind::RAngle,
    TokenKind::Eq,
];

const TERM_FIRST: [TokenKind; 10] = [
    TokenKind::IntegerLiteral,
    TokenKind::StringLiteral,
    TokenKind::TrueKw,
    TokenKind::FalseKw,
    TokenKind::NullKw,
    TokenKind::ThisKw,
    TokenKind::Ident,
    TokenKind::LParen,
    TokenKind::Minus,
    TokenKind::Tilde,
];

/// `Term (Op Term)*`
///
/// 演算子と項は同じ`Expression`ノードの子として平らに並びます。
pub(super) fn parse_expression(parser: &mut Parser) -> ParseResult<GreenNode> {
    parser.nested(|parser| {
        let mut node = parser.start();
        node.push(parse_term(parser)?);

        while parser.at_set(&BINARY_OP) {
            parser.bump(&mut node)?;
            node.push(parse_term(parser)?);
        }

        Ok(node.complete(SyntaxKind::Expression))
    })
}

/// 項をパースします。
///
/// 識別子で始まる場合は次のトークンを先読みし、
/// 変数、配列の要素、サブルーチン呼び出しのいずれかを決めます。
fn parse_term(parser: &mut Parser) -> ParseResult<GreenNode> {
    parser.nested(|parser| {
        let mut node = parser.start();

        match parser.peek() {
            Some(
                TokenKind::IntegerLiteral
                | TokenKind::StringLiteral
                | TokenKind::TrueKw
                | TokenKind::FalseKw
                | TokenKind::NullKw
                | TokenKind::ThisKw,
            ) => parser.bump(&mut node)?,
            Some(TokenKind::Ident) => match parser.peek_next() {
                Some(TokenKind::LBrace) => {
                    parser.bump(&mut node)?;
                    parser.bump(&mut node)?;
                    node.push(parse_expression(parser)?);
                    parser.expect(&mut node, TokenKind::RBrace)?;
                }
                Some(TokenKind::LParen | TokenKind::Dot) => {
                    parse_subroutine_call(parser, &mut node)?
                }
                _ => parser.bump(&mut node)?,
            },
            Some(TokenKind::LParen) => {
                parser.bump(&mut node)?;
                node.push(parse_expression(parser)?);
                parser.expect(&mut node, TokenKind::RParen)?;
            }
            Some(TokenKind::Minus | TokenKind::Tilde) => {
                parser.bump(&mut node)?;
                node.push(parse_term(parser)?);
            }
            _ => return Err(parser.error(&TERM_FIRST)),
        }

        Ok(node.complete(SyntaxKind::Term))
    })
}

/// `Ident ( ExpressionList )` | `Ident . Ident ( ExpressionList )`
///
/// 呼び出しはノードを作らず、要素を`node`に直接追加します。
pub(super) fn parse_subroutine_call(parser: &mut Parser, node: &mut NodeBuilder) -> ParseResult<()> {
    parser.expect(node, TokenKind::Ident)?;

    match parser.peek() {
        Some(TokenKind::LParen) => parser.bump(node)?,
        Some(TokenKind::Dot) => {
            parser.bump(node)?;
            parser.expect(node, TokenKind::Ident)?;
            parser.expect(node, TokenKind::LParen)?;
        }
        _ => return Err(parser.error(&[TokenKind::LParen, TokenKind::Dot])),
    }

    node.push(parse_expression_list(parser)?);
    parser.expect(node, TokenKind::RParen)
}

/// 実引数の一覧をパースします。
///
/// 現在のトークンが`)`であれば、子を持たないノードを返します。
fn parse_expression_list(parser: &mut Parser) -> ParseResult<GreenNode> {
    let mut node = parser.start();

    if !parser.at(TokenKind::RParen) {
        node.push(parse_expression(parser)?);

        while parser.at(TokenKind::Comma) {
            parser.bump(&mut node)?;
            node.push(parse_expression(parser)?);
        }
    }

    Ok(node.complete(SyntaxKind::ExpressionList))
}
