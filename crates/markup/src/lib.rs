//! # markup
//!
//! Translate a small markdown dialect to HTML.
//!
//! ## Design
//!
//! A character-level tokenizer recognizes headings, emphasis, inline code,
//! fenced code and strikethrough, and links them into a tree of typed nodes.
//! The tree is rendered by `markup-core` with a generic depth-first walk.
//!
//! - **No parse errors**: an opening delimiter without a match is kept as literal text
//! - **Line oriented**: top-level results are joined with a newline
//! - **Escaped breaks**: the two characters `\n` count as a line break
//!
//! ## Example
//!
//! ```rust
//! use markup::MarkupService;
//!
//! let service = MarkupService::new();
//! let html = service.translate("# Hello\n**World**").unwrap();
//! assert_eq!(
//!     html,
//!     "<h1>Hello</h1>\n<span style=\"font-weight: bold;\">World</span>"
//! );
//! ```

mod parser;
mod service;
mod tokenizer;

use once_cell::sync::Lazy;

pub use markup_core::{
    compose, render, render_node, walk, Container, Element, Node, Options, RenderError, Span,
    Visit,
};
pub use parser::Parser;
pub use service::MarkupService;
pub use tokenizer::{Pair, Tokenizer};

static DEFAULT_SERVICE: Lazy<MarkupService> = Lazy::new(MarkupService::new);

/// Translate markdown to HTML with default options
pub fn translate(markdown: &str) -> Result<String> {
    DEFAULT_SERVICE.translate(markdown)
}

/// Error type for markup operations
#[derive(Debug, thiserror::Error)]
pub enum MarkupError {
    #[error("Render error: {0}")]
    Render(#[from] RenderError),
}

pub type Result<T> = std::result::Result<T, MarkupError>;
