use lexer::TokenKind;
use rowan::GreenNode;
use syntax::SyntaxKind;

use super::{expect_type, stmt};
use crate::parser::{node_builder::NodeBuilder, ParseResult, Parser};

const CLASS_VAR_DEC_FIRST: [TokenKind; 2] = [TokenKind::StaticKw, TokenKind::FieldKw];

const SUBROUTINE_DEC_FIRST: [TokenKind; 3] = [
    TokenKind::ConstructorKw,
    TokenKind::FunctionKw,
    TokenKind::MethodKw,
];

const RETURN_TYPE_FIRST: [TokenKind; 5] = [
    TokenKind::VoidKw,
    TokenKind::IntKw,
    TokenKind::CharKw,
    TokenKind::BooleanKw,
    TokenKind::Ident,
];

/// クラス宣言をパースします。
///
/// `class Ident { ClassVarDec* SubroutineDec* }`
pub(super) fn parse_class(parser: &mut Parser) -> ParseResult<GreenNode> {
    tracing::trace!("parse class");

    let mut node = parser.start();
    parser.expect(&mut node, TokenKind::ClassKw)?;
    parser.expect(&mut node, TokenKind::Ident)?;
    parser.expect(&mut node, TokenKind::LCurly)?;

    while let Some(class_var_dec) = parse_class_var_dec(parser)? {
        node.push(class_var_dec);
    }
    while let Some(subroutine_dec) = parse_subroutine_dec(parser)? {
        node.push(subroutine_dec);
    }

    parser.expect(&mut node, TokenKind::RCurly)?;

    Ok(node.complete(SyntaxKind::Class))
}

/// クラス変数の宣言をパースします。
///
/// `static`か`field`で始まらない場合はトークンを読まずに`None`を返します。
fn parse_class_var_dec(parser: &mut Parser) -> ParseResult<Option<GreenNode>> {
    if !parser.at_set(&CLASS_VAR_DEC_FIRST) {
        return Ok(None);
    }

    let mut node = parser.start();
    parser.bump(&mut node)?;
    parse_typed_names(parser, &mut node)?;

    Ok(Some(node.complete(SyntaxKind::ClassVarDec)))
}

/// サブルーチンの宣言をパースします。
///
/// `constructor`、`function`、`method`のいずれかで始まらない場合はトークンを読まずに`None`を返します。
fn parse_subroutine_dec(parser: &mut Parser) -> ParseResult<Option<GreenNode>> {
    if !parser.at_set(&SUBROUTINE_DEC_FIRST) {
        return Ok(None);
    }

    let mut node = parser.start();
    parser.bump(&mut node)?;

    parser.expect_one_of(&mut node, &RETURN_TYPE_FIRST)?;
    parser.expect(&mut node, TokenKind::Ident)?;

    parser.expect(&mut node, TokenKind::LParen)?;
    node.push(parse_parameter_list(parser)?);
    parser.expect(&mut node, TokenKind::RParen)?;

    node.push(parse_subroutine_body(parser)?);

    Ok(Some(node.complete(SyntaxKind::SubroutineDec)))
}

/// 仮引数の一覧をパースします。
///
/// 仮引数がなくても空のノードを返します。
fn parse_parameter_list(parser: &mut Parser) -> ParseResult<GreenNode> {
    let mut node = parser.start();

    if !parser.at(TokenKind::RParen) {
        expect_type(parser, &mut node)?;
        parser.expect(&mut node, TokenKind::Ident)?;

        while parser.at(TokenKind::Comma) {
            parser.bump(&mut node)?;
            expect_type(parser, &mut node)?;
            parser.expect(&mut node, TokenKind::Ident)?;
        }
    }

    Ok(node.complete(SyntaxKind::ParameterList))
}

/// サブルーチンの本体をパースします。
///
/// `{ VarDec* Statements }`
fn parse_subroutine_body(parser: &mut Parser) -> ParseResult<GreenNode> {
    let mut node = parser.start();
    parser.expect(&mut node, TokenKind::LCurly)?;

    while let Some(var_dec) = parse_var_dec(parser)? {
        node.push(var_dec);
    }
    node.push(stmt::parse_statements(parser)?);

    parser.expect(&mut node, TokenKind::RCurly)?;

    Ok(node.complete(SyntaxKind::SubroutineBody))
}

/// ローカル変数の宣言をパースします。
///
/// `var`で始まらない場合はトークンを読まずに`None`を返します。
fn parse_var_dec(parser: &mut Parser) -> ParseResult<Option<GreenNode>> {
    if !parser.at(TokenKind::VarKw) {
        return Ok(None);
    }

    let mut node = parser.start();
    parser.bump(&mut node)?;
    parse_typed_names(parser, &mut node)?;

    Ok(Some(node.complete(SyntaxKind::VarDec)))
}

/// `Type Ident (, Ident)* ;`
///
/// クラス変数とローカル変数の宣言で共通です。
fn parse_typed_names(parser: &mut Parser, node: &mut NodeBuilder) -> ParseResult<()> {
    expect_type(parser, node)?;
    parser.expect(node, TokenKind::Ident)?;

    while parser.at(TokenKind::Comma) {
        parser.bump(node)?;
        parser.expect(node, TokenKind::Ident)?;
    }

    parser.expect(node, TokenKind::Semicolon)
}

#[cfg(test)]
mod tests {
    use expect_test::expect;

    use crate::{check, check_error};

    #[test]
    fn parse_empty_class() {
        check(
            "class Foo { }",
            expect![[r#"
                Class
                  Keyword "class"
                  Identifier "Foo"
                  Symbol "{"
                  Symbol "}"
            "#]],
        );
    }

    #[test]
    fn parse_class_var_decs() {
        check(
            "class Point { field int x, y; static Point origin; }",
            expect![[r#"
                Class
                  Keyword "class"
                  Identifier "Point"
                  Symbol "{"
                  ClassVarDec
                    Keyword "field"
                    Keyword "int"
                    Identifier "x"
                    Symbol ","
                    Identifier "y"
                    Symbol ";"
                  ClassVarDec
                    Keyword "static"
                    Identifier "Point"
                    Identifier "origin"
                    Symbol ";"
                  Symbol "}"
            "#]],
        );
    }

    #[test]
    fn parse_subroutine_without_parameters() {
        check(
            "class Main { function void main() { return; } }",
            expect![[r#"
                Class
                  Keyword "class"
                  Identifier "Main"
                  Symbol "{"
                  SubroutineDec
                    Keyword "function"
                    Keyword "void"
                    Identifier "main"
                    Symbol "("
                    ParameterList
                    Symbol ")"
                    SubroutineBody
                      Symbol "{"
                      Statements
                        ReturnStatement
                          Keyword "return"
                          Symbol ";"
                      Symbol "}"
                  Symbol "}"
            "#]],
        );
    }

    #[test]
    fn parse_subroutine_with_parameters_and_locals() {
        check(
            "class A { method Point f(int a, Point b) { var char c, d; var boolean e; } }",
            expect![[r#"
                Class
                  Keyword "class"
                  Identifier "A"
                  Symbol "{"
                  SubroutineDec
                    Keyword "method"
                    Identifier "Point"
                    Identifier "f"
                    Symbol "("
                    ParameterList
                      Keyword "int"
                      Identifier "a"
                      Symbol ","
                      Identifier "Point"
                      Identifier "b"
                    Symbol ")"
                    SubroutineBody
                      Symbol "{"
                      VarDec
                        Keyword "var"
                        Keyword "char"
                        Identifier "c"
                        Symbol ","
                        Identifier "d"
                        Symbol ";"
                      VarDec
                        Keyword "var"
                        Keyword "boolean"
                        Identifier "e"
                        Symbol ";"
                      Statements
                      Symbol "}"
                  Symbol "}"
            "#]],
        );
    }

    #[test]
    fn parse_class_var_decs_before_subroutines() {
        check(
            "class A { static int n; constructor A new() { return this; } function int get() { return n; } }",
            expect![[r#"
                Class
                  Keyword "class"
                  Identifier "A"
                  Symbol "{"
                  ClassVarDec
                    Keyword "static"
                    Keyword "int"
                    Identifier "n"
                    Symbol ";"
                  SubroutineDec
                    Keyword "constructor"
                    Identifier "A"
                    Identifier "new"
                    Symbol "("
                    ParameterList
                    Symbol ")"
                    SubroutineBody
                      Symbol "{"
                      Statements
                        ReturnStatement
                          Keyword "return"
                          Expression
                            Term
                              Keyword "this"
                          Symbol ";"
                      Symbol "}"
                  SubroutineDec
                    Keyword "function"
                    Keyword "int"
                    Identifier "get"
                    Symbol "("
                    ParameterList
                    Symbol ")"
                    SubroutineBody
                      Symbol "{"
                      Statements
                        ReturnStatement
                          Keyword "return"
                          Expression
                            Term
                              Identifier "n"
                          Symbol ";"
                      Symbol "}"
                  Symbol "}"
            "#]],
        );
    }

    #[test]
    fn parse_class_name_is_integer() {
        check_error(
            "class 123 {}",
            expect!["error at 6..9: expected identifier, but found integerConstant '123'"],
        );
    }

    #[test]
    fn parse_class_var_dec_after_subroutine() {
        check_error(
            "class A { function void f() {} field int x; }",
            expect!["error at 31..36: expected '}', but found 'field'"],
        );
    }

    #[test]
    fn parse_class_var_dec_missing_name() {
        check_error(
            "class A { field x; }",
            expect!["error at 17..18: expected identifier, but found ';'"],
        );
    }

    #[test]
    fn parse_subroutine_with_void_parameter() {
        check_error(
            "class A { function void f(void x) {} }",
            expect!["error at 26..30: expected 'int', 'char', 'boolean' or identifier, but found 'void'"],
        );
    }

    #[test]
    fn parse_subroutine_missing_return_type() {
        check_error(
            "class A { function f() {} }",
            expect!["error at 20..21: expected identifier, but found '('"],
        );
    }

    #[test]
    fn parse_var_dec_after_statement() {
        check_error(
            "class A { function void f() { return; var int x; } }",
            expect!["error at 38..41: expected '}', but found 'var'"],
        );
    }

    #[test]
    fn parse_unclosed_class() {
        check_error(
            "class A { field int x;",
            expect!["error at 22..22: expected '}', but found end of file"],
        );
    }

    #[test]
    fn parse_trailing_tokens() {
        check_error(
            "class A { } class B { }",
            expect!["error at 12..17: expected end of file, but found 'class'"],
        );
    }
}
