use lexer::TokenKind;
use rowan::GreenNode;
use syntax::SyntaxKind;

use super::expr;
use crate::parser::{node_builder::NodeBuilder, ParseResult, Parser};

type StatementRule = fn(&mut Parser) -> ParseResult<GreenNode>;

/// 文の先頭のキーワードから、その文の生成規則を引きます。
///
/// 文を始めないトークンでは`None`を返し、文の並びはそこで終わります。
fn statement_rule(kind: TokenKind) -> Option<StatementRule> {
    match kind {
        TokenKind::LetKw => Some(parse_let),
        TokenKind::IfKw => Some(parse_if),
        TokenKind::WhileKw => Some(parse_while),
        TokenKind::DoKw => Some(parse_do),
        TokenKind::ReturnKw => Some(parse_return),
        _ => None,
    }
}

/// 0個以上の文をパースします。
///
/// 文を始めないトークン(通常は`}`)は読まずに残します。
pub(super) fn parse_statements(parser: &mut Parser) -> ParseResult<GreenNode> {
    parser.nested(|parser| {
        let mut node = parser.start();

        while let Some(rule) = parser.peek().and_then(statement_rule) {
            node.push(rule(parser)?);
        }

        Ok(node.complete(SyntaxKind::Statements))
    })
}

/// `let Ident ([ Expression ])? = Expression ;`
fn parse_let(parser: &mut Parser) -> ParseResult<GreenNode> {
    assert!(parser.at(TokenKind::LetKw));

    let mut node = parser.start();
    parser.bump(&mut node)?;
    parser.expect(&mut node, TokenKind::Ident)?;

    if parser.at(TokenKind::LBrace) {
        parser.bump(&mut node)?;
        node.push(expr::parse_expression(parser)?);
        parser.expect(&mut node, TokenKind::RBrace)?;
    }

    parser.expect(&mut node, TokenKind::Eq)?;
    node.push(expr::parse_expression(parser)?);
    parser.expect(&mut node, TokenKind::Semicolon)?;

    Ok(node.complete(SyntaxKind::LetStatement))
}

/// `if ( Expression ) { Statements } (else { Statements })?`
fn parse_if(parser: &mut Parser) -> ParseResult<GreenNode> {
    assert!(parser.at(TokenKind::IfKw));

    let mut node = parser.start();
    parser.bump(&mut node)?;
    parse_condition(parser, &mut node)?;
    parse_block(parser, &mut node)?;

    if parser.at(TokenKind::ElseKw) {
        parser.bump(&mut node)?;
        parse_block(parser, &mut node)?;
    }

    Ok(node.complete(SyntaxKind::IfStatement))
}

/// `while ( Expression ) { Statements }`
fn parse_while(parser: &mut Parser) -> ParseResult<GreenNode> {
    assert!(parser.at(TokenKind::WhileKw));

    let mut node = parser.start();
    parser.bump(&mut node)?;
    parse_condition(parser, &mut node)?;
    parse_block(parser, &mut node)?;

    Ok(node.complete(SyntaxKind::WhileStatement))
}

/// `do SubroutineCall ;`
///
/// 呼び出しの要素は`Term`で包まずに、文の直接の子になります。
fn parse_do(parser: &mut Parser) -> ParseResult<GreenNode> {
    assert!(parser.at(TokenKind::DoKw));

    let mut node = parser.start();
    parser.bump(&mut node)?;
    expr::parse_subroutine_call(parser, &mut node)?;
    parser.expect(&mut node, TokenKind::Semicolon)?;

    Ok(node.complete(SyntaxKind::DoStatement))
}

/// `return Expression? ;`
fn parse_return(parser: &mut Parser) -> ParseResult<GreenNode> {
    assert!(parser.at(TokenKind::ReturnKw));

    let mut node = parser.start();
    parser.bump(&mut node)?;

    if !parser.at(TokenKind::Semicolon) {
        node.push(expr::parse_expression(parser)?);
    }

    parser.expect(&mut node, TokenKind::Semicolon)?;

    Ok(node.complete(SyntaxKind::ReturnStatement))
}

/// `( Expression )`
fn parse_condition(parser: &mut Parser, node: &mut NodeBuilder) -> ParseResult<()> {
    parser.expect(node, TokenKind::LParen)?;
    node.push(expr::parse_expression(parser)?);
    parser.expect(node, TokenKind::RParen)
}

/// `{ Statements }`
fn parse_block(parser: &mut Parser, node: &mut NodeBuilder) -> ParseResult<()> {
    parser.expect(node, TokenKind::LCurly)?;
    node.push(parse_statements(parser)?);
    parser.expect(node, TokenKind::RCurly)
}
