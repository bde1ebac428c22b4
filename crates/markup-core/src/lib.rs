//! markup-core - Node tree, traversal and HTML rendering
//!
//! This crate provides the data structures shared by the `markup` tokenizer
//! and the renderer that turns a parsed tree into HTML.
//!
//! # Architecture
//!
//! ```text
//!                ┌───────────┐   walk + render_node   ┌──────────────┐
//! Tokenizer ───▶ │ Node tree │ ─────────────────────▶ │ templated    │ ──compose──▶ String
//!                └───────────┘                        │ tree         │
//!                                                     └──────────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use markup_core::{render, Element, Node, Options, Span};
//!
//! let heading = Element::new("h1", "# Hello", Span::new(0, 7))
//!     .with_nested(Element::text_node("Hello", Span::new(2, 5)));
//!
//! let mut body = Node::body();
//! if let Node::Container(container) = &mut body {
//!     container.children.push(heading.into());
//! }
//!
//! let html = render(&mut body, &Options::default()).unwrap();
//! assert_eq!(html, "<h1>Hello</h1>");
//! ```

mod ast;
mod options;
mod render;
mod walk;

pub use ast::{Container, Element, Node, Span, BODY_TAG, TEXT_TAG};
pub use options::Options;
pub use render::{compose, render, render_node, PLACEHOLDER};
pub use walk::{walk, Visit};

/// Error type for rendering
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    #[error("node <{tag}> at offset {offset} was composed before it was rendered")]
    Unrendered { tag: String, offset: usize },
}
