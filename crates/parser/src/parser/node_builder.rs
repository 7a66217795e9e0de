//! 構文木のノードを組み立てるためのビルダー

use lexer::Token;
use rowan::{GreenNode, GreenToken, Language, NodeOrToken};
use syntax::{JackLanguage, SyntaxKind};

/// 1つのノードの子要素を文法の順に集めるビルダー
///
/// 生成規則ごとにローカルに作成し、[Self::complete]で不変のノードにします。
/// 途中でエラーが起きた場合はそのまま破棄されます。
#[derive(Debug, Default)]
pub(crate) struct NodeBuilder {
    children: Vec<NodeOrToken<GreenNode, GreenToken>>,
}

impl NodeBuilder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// 読み取ったトークンを終端記号として追加します。
    pub(crate) fn token(&mut self, token: &Token) {
        let kind = SyntaxKind::from(token.kind);
        self.children.push(NodeOrToken::Token(GreenToken::new(
            JackLanguage::kind_to_raw(kind),
            token.text,
        )));
    }

    /// 子の生成規則で作成したノードを追加します。
    pub(crate) fn push(&mut self, node: GreenNode) {
        self.children.push(NodeOrToken::Node(node));
    }

    /// 集めた子要素から`kind`のノードを作成します。
    pub(crate) fn complete(self, kind: SyntaxKind) -> GreenNode {
        tracing::trace!(?kind, children = self.children.len(), "complete node");

        GreenNode::new(JackLanguage::kind_to_raw(kind), self.children)
    }
}
