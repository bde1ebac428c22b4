//! Builds the document tree from source characters.

use markup_core::{Node, Options};

use crate::tokenizer::Tokenizer;

/// Parses a whole document into a `body` container
pub struct Parser<'a> {
    content: &'a [char],
    options: &'a Options,
}

impl<'a> Parser<'a> {
    pub fn new(content: &'a [char], options: &'a Options) -> Self {
        Self { content, options }
    }

    /// Parse the content. Never fails: unmatched delimiters become text.
    pub fn parse(&self) -> Node {
        let mut body = Node::body();
        Tokenizer::new(self.content, self.options).scan_into(&mut body);

        tracing::debug!(
            chars = self.content.len(),
            blocks = body.children().len(),
            "Parsed markup document"
        );
        body
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_builds_body() {
        let content: Vec<char> = "# Title\nplain".chars().collect();
        let options = Options::default();
        let body = Parser::new(&content, &options).parse();

        assert_eq!(body.tag(), "body");
        let tags: Vec<&str> = body.children().iter().map(Node::tag).collect();
        assert_eq!(tags, vec!["h1", ":text"]);
    }

    #[test]
    fn test_parse_empty() {
        let options = Options::default();
        let body = Parser::new(&[], &options).parse();
        assert!(body.children().is_empty());
        assert!(body.is_leaf());
    }
}
