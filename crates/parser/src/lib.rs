//! Jack言語の構文解析を行うクレートです。
//!
//! トークン列を再帰下降でパースし、文法の生成規則ごとに1つのノードを持つ構文木を作成します。
//! 不正な入力に対しては最初のエラーを返し、部分的な構文木は返しません。

mod grammar;
mod parser;
mod source;

use std::fmt::{self, Write as _};

use lexer::{LexError, Token};
use rowan::{GreenNode, NodeOrToken};
use syntax::{SyntaxElement, SyntaxNode};
use text_size::TextRange;
use thiserror::Error;

use crate::parser::Parser;
pub use crate::parser::{ParseError, UnexpectedToken, MAX_NESTING_DEPTH};
use source::Source;

/// 文字列を字句解析してからパースします。
pub fn parse(input: &str) -> Result<Parse, SyntaxError> {
    let tokens = lexer::tokenize(input)?;
    Ok(parse_tokens(&tokens)?)
}

/// トークン列をパースし、`class`をルートとする構文木を返します。
///
/// トリビアのトークンは読み飛ばされます。
pub fn parse_tokens(tokens: &[Token]) -> Result<Parse, ParseError> {
    tracing::debug!(tokens = tokens.len(), "parse tokens");

    let source = Source::new(tokens);
    let parser = Parser::new(source);
    let green_node = parser.parse()?;

    Ok(Parse { green_node })
}

/// 字句解析か構文解析のエラー
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SyntaxError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl SyntaxError {
    /// エラーが発生した入力上の範囲
    pub fn range(&self) -> TextRange {
        match self {
            Self::Lex(e) => e.range(),
            Self::Parse(e) => e.range(),
        }
    }
}

/// パース結果の構文木
///
/// 不変の木で、比較はノードの深い比較になります。
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Parse {
    green_node: GreenNode,
}

impl fmt::Debug for Parse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.debug_tree())
    }
}

impl Parse {
    /// ノードと終端記号を1行ずつ、深さに応じて字下げして出力します。
    pub fn debug_tree(&self) -> String {
        let mut s = String::new();
        write_element(&mut s, self.syntax().into(), 0);

        s
    }

    pub fn syntax(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.green_node.clone())
    }

    pub fn green(&self) -> &GreenNode {
        &self.green_node
    }
}

fn write_element(s: &mut String, element: SyntaxElement, depth: usize) {
    let indent = "  ".repeat(depth);

    match element {
        NodeOrToken::Node(node) => {
            let _ = writeln!(s, "{indent}{:?}", node.kind());
            for child in node.children_with_tokens() {
                write_element(s, child, depth + 1);
            }
        }
        NodeOrToken::Token(token) => {
            let _ = writeln!(s, "{indent}{:?} {:?}", token.kind(), token.text());
        }
    }
}

#[cfg(test)]
fn check(input: &str, expected_tree: expect_test::Expect) {
    let parse = parse(input).unwrap();
    expected_tree.assert_eq(&parse.debug_tree());
}

#[cfg(test)]
fn check_error(input: &str, expected: expect_test::Expect) {
    let error = parse(input).unwrap_err();
    expected.assert_eq(&error.to_string());
}

/// 1つの生成規則だけでパースします。入力はすべて読み切る必要があります。
#[cfg(test)]
fn check_rule(
    input: &str,
    rule: fn(&mut Parser) -> parser::ParseResult<GreenNode>,
    expected_tree: expect_test::Expect,
) {
    let tokens = lexer::tokenize(input).unwrap();
    let mut parser = Parser::new(Source::new(&tokens));

    let green_node = rule(&mut parser).unwrap();
    assert!(parser.at_end(), "tokens remain after parsing {input:?}");

    let parse = Parse { green_node };
    expected_tree.assert_eq(&parse.debug_tree());
}

#[cfg(test)]
fn check_rule_error(
    input: &str,
    rule: fn(&mut Parser) -> parser::ParseResult<GreenNode>,
    expected: expect_test::Expect,
) {
    let tokens = lexer::tokenize(input).unwrap();
    let mut parser = Parser::new(Source::new(&tokens));

    let error = rule(&mut parser).unwrap_err();
    expected.assert_eq(&error.to_string());
}
