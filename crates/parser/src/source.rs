use lexer::{Token, TokenKind};
use text_size::{TextRange, TextSize};

/// パース元のトークン列を表す。
///
/// トリビアのトークンは読み飛ばされ、パーサーからは見えません。
pub(crate) struct Source<'l, 'input> {
    tokens: &'l [Token<'input>],
    cursor: usize,
}

impl<'l, 'input> Source<'l, 'input> {
    /// パース元のトークン列を表す[Source]を作成する。
    pub(crate) fn new(tokens: &'l [Token<'input>]) -> Self {
        Self { tokens, cursor: 0 }
    }

    /// トークンを返し、トークン位置を指すカーソルを次へ進めます。
    ///
    /// トリビアのトークンを飛ばすようにカーソルを進めてから返すトークンが決まります。
    pub(crate) fn next_token(&mut self) -> Option<&'l Token<'input>> {
        self.eat_trivia();

        let token = self.tokens.get(self.cursor)?;
        self.cursor += 1;

        Some(token)
    }

    /// まだ読んでいないトークンがあるかどうかを返します。
    pub(crate) fn has_more(&mut self) -> bool {
        self.peek_token().is_some()
    }

    /// トークン種別を返します。
    ///
    /// トリビアのトークンを飛ばすようにカーソルを進めてから返すトークンが決まります。
    pub(crate) fn peek_kind(&mut self) -> Option<TokenKind> {
        self.peek_token().map(|Token { kind, .. }| *kind)
    }

    /// トークンを返します。
    ///
    /// トリビアのトークンを飛ばすようにカーソルを進めてから返すトークンが決まります。
    pub(crate) fn peek_token(&mut self) -> Option<&'l Token<'input>> {
        self.eat_trivia();
        self.tokens.get(self.cursor)
    }

    /// 現在のトークンの次のトークン種別を返します。
    ///
    /// 現在のトークンと次のトークンの間のトリビアも読み飛ばします。
    /// カーソルは現在のトークンを指したままです。
    pub(crate) fn peek_next_kind(&mut self) -> Option<TokenKind> {
        self.eat_trivia();

        self.tokens
            .get(self.cursor + 1..)?
            .iter()
            .map(|Token { kind, .. }| *kind)
            .find(|kind| !kind.is_trivia())
    }

    /// 入力の末尾を指す空の範囲を返します。
    pub(crate) fn end_range(&self) -> TextRange {
        let end = self
            .tokens
            .last()
            .map_or(TextSize::from(0), |Token { range, .. }| range.end());

        TextRange::empty(end)
    }

    /// トリビアのトークンを飛ばすようにカーソルを進めます。
    fn eat_trivia(&mut self) {
        while self.at_trivia() {
            self.cursor += 1;
        }
    }

    /// カーソルがトリビアのトークンを指しているかどうかを返します。
    fn at_trivia(&self) -> bool {
        self.tokens
            .get(self.cursor)
            .map_or(false, |Token { kind, .. }| kind.is_trivia())
    }
}

#[cfg(test)]
mod tests {
    use lexer::tokenize;

    use super::*;

    #[test]
    fn next_token_skips_trivia() {
        let tokens = tokenize("  let /* c */ x").unwrap();
        let mut source = Source::new(&tokens);

        assert_eq!(source.next_token().map(|t| t.kind), Some(TokenKind::LetKw));
        assert_eq!(source.next_token().map(|t| t.text), Some("x"));
        assert_eq!(source.next_token(), None);
        assert!(!source.has_more());
    }

    #[test]
    fn peek_does_not_consume() {
        let tokens = tokenize("a . b").unwrap();
        let mut source = Source::new(&tokens);

        assert_eq!(source.peek_kind(), Some(TokenKind::Ident));
        assert_eq!(source.peek_kind(), Some(TokenKind::Ident));
        assert_eq!(source.peek_next_kind(), Some(TokenKind::Dot));
        assert_eq!(source.next_token().map(|t| t.text), Some("a"));
        assert_eq!(source.peek_kind(), Some(TokenKind::Dot));
        assert_eq!(source.peek_next_kind(), Some(TokenKind::Ident));
    }

    #[test]
    fn peek_next_at_last_token() {
        let tokens = tokenize("x // end").unwrap();
        let mut source = Source::new(&tokens);

        assert_eq!(source.peek_kind(), Some(TokenKind::Ident));
        assert_eq!(source.peek_next_kind(), None);
    }

    #[test]
    fn end_range_points_after_last_token() {
        let tokens = tokenize("ab  ").unwrap();
        let source = Source::new(&tokens);
        assert_eq!(source.end_range(), TextRange::empty(4.into()));

        let source = Source::new(&[]);
        assert_eq!(source.end_range(), TextRange::empty(0.into()));
    }
}
