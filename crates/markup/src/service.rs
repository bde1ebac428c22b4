//! MarkupService - the main entry point for markdown to HTML translation.

use markup_core::{render, Node, Options};

use crate::parser::Parser;
use crate::Result;

/// The main service for translating markdown to HTML
#[derive(Debug, Clone, Default)]
pub struct MarkupService {
    options: Options,
}

impl MarkupService {
    /// Create a new MarkupService with default options
    pub fn new() -> Self {
        Self {
            options: Options::default(),
        }
    }

    /// Create a MarkupService with custom options
    pub fn with_options(options: Options) -> Self {
        Self { options }
    }

    /// Translate markdown to HTML
    pub fn translate(&self, markdown: &str) -> Result<String> {
        let content: Vec<char> = markdown.chars().collect();
        self.translate_chars(&content)
    }

    /// Translate an already decoded character sequence to HTML
    pub fn translate_chars(&self, content: &[char]) -> Result<String> {
        let mut root = self.parse_chars(content);
        self.render(&mut root)
    }

    /// Parse markdown into a node tree without rendering it
    pub fn parse(&self, markdown: &str) -> Node {
        let content: Vec<char> = markdown.chars().collect();
        self.parse_chars(&content)
    }

    pub fn parse_chars(&self, content: &[char]) -> Node {
        Parser::new(content, &self.options).parse()
    }

    /// Render a parsed tree. Rendering the same tree again yields the same string.
    pub fn render(&self, root: &mut Node) -> Result<String> {
        Ok(render(root, &self.options)?)
    }

    /// Get the current options
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Get mutable access to options
    pub fn options_mut(&mut self) -> &mut Options {
        &mut self.options
    }
}
