//! Markup node tree
//!
//! A parsed document is a single [`Container`] (the `body`) holding block-level
//! [`Element`]s in document order. Content found inside a construct's
//! delimiters hangs off the element as an owned nested chain.

use indexmap::IndexMap;

/// Tag of the document root
pub const BODY_TAG: &str = "body";

/// Tag of literal text nodes
pub const TEXT_TAG: &str = ":text";

/// Source provenance of a node, measured in characters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Span {
    pub offset: usize,
    pub len: usize,
}

impl Span {
    pub fn new(offset: usize, len: usize) -> Self {
        Self { offset, len }
    }

    /// Offset one past the last character
    pub fn end(&self) -> usize {
        self.offset + self.len
    }

    /// Check if `other` starts strictly after this span and does not run past it
    pub fn encloses(&self, other: &Span) -> bool {
        self.offset < other.offset && self.end() >= other.end()
    }
}

/// A node of the markup tree
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Node {
    /// Document root holding block-level children
    Container(Container),

    /// One recognized construct, or a run of literal text
    Element(Element),
}

/// The document root
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Container {
    pub children: Vec<Node>,
}

/// A recognized construct with its attributes and nested content chain
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Element {
    tag: String,
    attrs: IndexMap<String, String>,
    text: String,
    span: Span,
    nested: Option<Box<Node>>,
    #[cfg_attr(feature = "serde", serde(skip))]
    template: Option<String>,
}

impl Node {
    /// Create an empty document root
    pub fn body() -> Self {
        Node::Container(Container::default())
    }

    pub fn tag(&self) -> &str {
        match self {
            Node::Container(_) => BODY_TAG,
            Node::Element(element) => element.tag(),
        }
    }

    /// Raw captured source text (empty for the root)
    pub fn text(&self) -> &str {
        match self {
            Node::Container(_) => "",
            Node::Element(element) => element.text(),
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Node::Container(_) => Span::default(),
            Node::Element(element) => element.span(),
        }
    }

    pub fn offset(&self) -> usize {
        self.span().offset
    }

    pub fn len(&self) -> usize {
        self.span().len
    }

    /// Check if the node covers no source characters
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Rendering attributes; the root has none
    pub fn attrs(&self) -> Option<&IndexMap<String, String>> {
        match self {
            Node::Container(_) => None,
            Node::Element(element) => Some(element.attrs()),
        }
    }

    /// The nested content chain; containers never have one
    pub fn nested(&self) -> Option<&Node> {
        match self {
            Node::Container(_) => None,
            Node::Element(element) => element.nested(),
        }
    }

    /// Children of the root; elements hold nested content, never siblings
    pub fn children(&self) -> &[Node] {
        match self {
            Node::Container(container) => &container.children,
            Node::Element(_) => &[],
        }
    }

    /// Check if this node has no content below it
    pub fn is_leaf(&self) -> bool {
        match self {
            Node::Container(container) => container.children.is_empty(),
            Node::Element(element) => element.is_leaf(),
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Node::Element(element) if element.is_text())
    }

    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(element) => Some(element),
            Node::Container(_) => None,
        }
    }

    pub fn as_element_mut(&mut self) -> Option<&mut Element> {
        match self {
            Node::Element(element) => Some(element),
            Node::Container(_) => None,
        }
    }

    /// Count this node and everything reachable from it
    pub fn node_count(&self) -> usize {
        match self {
            Node::Container(container) => {
                1 + container.children.iter().map(Node::node_count).sum::<usize>()
            }
            Node::Element(element) => 1 + element.nested().map_or(0, Node::node_count),
        }
    }
}

impl From<Element> for Node {
    fn from(element: Element) -> Self {
        Node::Element(element)
    }
}

impl Element {
    /// Create an element without attributes or nested content
    pub fn new(tag: impl Into<String>, text: impl Into<String>, span: Span) -> Self {
        Self {
            tag: tag.into(),
            attrs: IndexMap::new(),
            text: text.into(),
            span,
            nested: None,
            template: None,
        }
    }

    /// Create a literal text node
    pub fn text_node(text: impl Into<String>, span: Span) -> Self {
        Self::new(TEXT_TAG, text, span)
    }

    /// Set an attribute, replacing any previous value for the same name
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attrs.insert(name.into(), value.into());
        self
    }

    /// Append `node` to the nested chain
    pub fn with_nested(mut self, node: impl Into<Node>) -> Self {
        self.append(node.into());
        self
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn attrs(&self) -> &IndexMap<String, String> {
        &self.attrs
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs.get(name).map(String::as_str)
    }

    pub fn span(&self) -> Span {
        self.span
    }

    pub fn nested(&self) -> Option<&Node> {
        self.nested.as_deref()
    }

    pub(crate) fn nested_mut(&mut self) -> Option<&mut Node> {
        self.nested.as_deref_mut()
    }

    pub fn is_leaf(&self) -> bool {
        self.nested.is_none()
    }

    pub fn is_text(&self) -> bool {
        self.tag == TEXT_TAG
    }

    /// The rendered template, unset until the render walk visits this node
    pub fn template(&self) -> Option<&str> {
        self.template.as_deref()
    }

    pub(crate) fn set_template(&mut self, template: String) {
        self.template = Some(template);
    }

    /// Attach `node` at the tail of the nested chain.
    ///
    /// A text node cannot carry nested content, so a node arriving at a text
    /// tail is folded into it as literal text.
    pub fn append(&mut self, node: Node) {
        self.append_after("", node);
    }

    /// Like [`Element::append`], with the source text that separated `node`
    /// from the chain. The gap is only kept when `node` is folded into a text
    /// tail; elsewhere the chain carries no literal between nodes.
    pub fn append_after(&mut self, gap: &str, node: Node) {
        if self.is_text() {
            self.fold_literal(gap, &node);
            return;
        }
        match self.nested.as_deref_mut() {
            None => self.nested = Some(Box::new(node)),
            Some(Node::Element(next)) => next.append_after(gap, node),
            Some(Node::Container(container)) => container.children.push(node),
        }
    }

    fn fold_literal(&mut self, gap: &str, node: &Node) {
        self.text.push_str(gap);
        self.text.push_str(node.text());
        let end = self.span.end().max(node.span().end());
        self.span.len = end - self.span.offset;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(value: &str, offset: usize) -> Element {
        Element::text_node(value, Span::new(offset, value.chars().count()))
    }

    #[test]
    fn test_body_is_empty_container() {
        let body = Node::body();
        assert_eq!(body.tag(), "body");
        assert!(body.is_leaf());
        assert!(body.children().is_empty());
        assert!(body.attrs().is_none());
        assert!(body.nested().is_none());
    }

    #[test]
    fn test_span_encloses() {
        let outer = Span::new(0, 10);
        assert!(outer.encloses(&Span::new(2, 3)));
        assert!(outer.encloses(&Span::new(5, 5)));
        assert!(!outer.encloses(&Span::new(0, 3)));
        assert!(!outer.encloses(&Span::new(8, 5)));
    }

    #[test]
    fn test_attributes_keep_insertion_order() {
        let element = Element::new("span", "*x*", Span::new(0, 3))
            .with_attr("style", "font-style: italic;")
            .with_attr("class", "a")
            .with_attr("style", "font-weight: bold;");

        let keys: Vec<&str> = element.attrs().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["style", "class"]);
        assert_eq!(element.attr("style"), Some("font-weight: bold;"));
    }

    #[test]
    fn test_append_follows_chain_to_tail() {
        let mut outer = Element::new("span", "**a**", Span::new(0, 5));
        outer.append(Element::new("span", "*a*", Span::new(1, 3)).into());
        outer.append(text("a", 2).into());

        let inner = outer.nested().and_then(Node::as_element).unwrap();
        assert_eq!(inner.tag(), "span");
        assert_eq!(inner.nested().map(Node::text), Some("a"));
        assert_eq!(Node::from(outer).node_count(), 3);
    }

    #[test]
    fn test_append_to_text_tail_folds_literal() {
        let mut strike = Element::new("span", "~~a~~", Span::new(0, 5)).with_nested(text("a", 2));
        strike.append(text("b", 6).into());

        let tail = strike.nested().unwrap();
        assert!(tail.is_text());
        assert!(tail.is_leaf());
        assert_eq!(tail.text(), "ab");
        assert_eq!(tail.span(), Span::new(2, 5));
    }

    #[test]
    fn test_append_after_keeps_gap_when_folding() {
        let mut strike = Element::new("span", "~~a~~", Span::new(0, 5)).with_nested(text("a", 2));
        strike.append_after(" \t", text("b", 8).into());

        let tail = strike.nested().unwrap();
        assert_eq!(tail.text(), "a \tb");
        assert_eq!(tail.span(), Span::new(2, 7));
    }

    #[test]
    fn test_append_after_ignores_gap_between_elements() {
        let mut outer = Element::new("span", "*x*", Span::new(0, 3));
        outer.append_after("  ", text("x", 1).into());
        assert_eq!(outer.nested().map(Node::text), Some("x"));
    }

    #[test]
    fn test_template_unset_until_rendered() {
        let element = text("hello", 0);
        assert!(element.template().is_none());
    }
}
