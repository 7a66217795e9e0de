//! 構文木とトークン列を、比較用の参照ファイルと同じXML形式で出力するクレートです。
//!
//! 非終端記号は開始タグ、子、終了タグをそれぞれ1行で出力します。
//! 終端記号は`<keyword> class </keyword>`のように1行で出力します。
//! 深さ1つにつき空白2つで字下げします。

use std::fmt::{self, Write};

use lexer::Token;
use rowan::NodeOrToken;
use syntax::{SyntaxElement, SyntaxKind, SyntaxNode};

const INDENT: &str = "  ";

/// `node`をルートとする木をXMLにします。
pub fn to_xml(node: &SyntaxNode) -> String {
    let mut out = String::new();
    // Stringへの書き込みは失敗しない
    let _ = write_xml(node, &mut out);

    out
}

/// `node`をルートとする木をXMLとして`out`に書き込みます。
pub fn write_xml(node: &SyntaxNode, out: &mut impl Write) -> fmt::Result {
    write_element(out, node.clone().into(), 0)
}

fn write_element(out: &mut impl Write, element: SyntaxElement, depth: usize) -> fmt::Result {
    let indent = INDENT.repeat(depth);

    match element {
        NodeOrToken::Node(node) => {
            let tag = node.kind().tag();
            writeln!(out, "{indent}<{tag}>")?;
            for child in node.children_with_tokens() {
                write_element(out, child, depth + 1)?;
            }
            writeln!(out, "{indent}</{tag}>")
        }
        NodeOrToken::Token(token) => {
            write_terminal(out, &indent, token.kind(), token.text())
        }
    }
}

/// トークン列を`<tokens>`要素の平らな一覧にします。
///
/// トリビアは出力しません。
pub fn tokens_to_xml(tokens: &[Token]) -> String {
    let mut out = String::new();
    let _ = write_tokens(tokens, &mut out);

    out
}

pub fn write_tokens(tokens: &[Token], out: &mut impl Write) -> fmt::Result {
    writeln!(out, "<tokens>")?;
    for token in tokens {
        if let Some(category) = token.category() {
            write_terminal(out, "", category.into(), token.text)?;
        }
    }
    writeln!(out, "</tokens>")
}

fn write_terminal(out: &mut impl Write, indent: &str, kind: SyntaxKind, text: &str) -> fmt::Result {
    debug_assert!(kind.is_terminal(), "{kind:?} is not a terminal");

    let tag = kind.tag();
    let text = if kind == SyntaxKind::StringConstant {
        unquote(text)
    } else {
        text
    };

    writeln!(out, "{indent}<{tag}> {} </{tag}>", Escaped(text))
}

fn unquote(text: &str) -> &str {
    text.strip_prefix('"')
        .and_then(|text| text.strip_suffix('"'))
        .unwrap_or(text)
}

/// XMLの予約文字をエスケープして表示します。
struct Escaped<'a>(&'a str);

impl fmt::Display for Escaped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in self.0.chars() {
            match c {
                '<' => f.write_str("&lt;")?,
                '>' => f.write_str("&gt;")?,
                '&' => f.write_str("&amp;")?,
                '"' => f.write_str("&quot;")?,
                c => f.write_char(c)?,
            }
        }

        Ok(())
    }
}
