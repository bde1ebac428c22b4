//! HTML rendering of the node tree
//!
//! Rendering happens in two passes. A [`walk`] with [`render_node`] gives
//! every element a template (`<tag attrs>{}</tag>`, or the literal text for
//! `:text` nodes), then [`compose`] builds the output bottom-up by filling
//! each placeholder with the composed nested chain.

use std::iter;

use crate::ast::Node;
use crate::options::Options;
use crate::walk::{walk, Visit};
use crate::RenderError;

/// Content placeholder inside an element template
pub const PLACEHOLDER: &str = "{}";

/// Render a tree to a string
pub fn render(root: &mut Node, options: &Options) -> Result<String, RenderError> {
    walk(iter::once(&mut *root), &mut render_node)?;
    let output = compose(root, options)?;

    tracing::debug!(
        nodes = root.node_count(),
        output_len = output.len(),
        "Rendered markup tree"
    );
    Ok(output)
}

/// Visit callback assigning a template to a node
pub fn render_node(node: &mut Node) -> Result<Visit, RenderError> {
    let Node::Element(element) = node else {
        return Ok(Visit::Descend);
    };

    if element.is_text() {
        let text = element.text().to_string();
        element.set_template(text);
        return Ok(Visit::Skip);
    }

    let mut template = String::with_capacity(2 * element.tag().len() + PLACEHOLDER.len() + 5);
    template.push('<');
    template.push_str(element.tag());
    for (name, value) in element.attrs() {
        template.push(' ');
        template.push_str(name);
        template.push_str("=\"");
        template.push_str(&escape_html_attr(value));
        template.push('"');
    }
    template.push('>');
    template.push_str(PLACEHOLDER);
    template.push_str("</");
    template.push_str(element.tag());
    template.push('>');
    element.set_template(template);

    Ok(if element.is_leaf() {
        Visit::Skip
    } else {
        Visit::Descend
    })
}

/// Compose the final string of a rendered node
pub fn compose(node: &Node, options: &Options) -> Result<String, RenderError> {
    let mut out = String::with_capacity(node.len().max(64));
    compose_into(node, options, &mut out)?;
    Ok(out)
}

fn compose_into(node: &Node, options: &Options, out: &mut String) -> Result<(), RenderError> {
    match node {
        Node::Container(container) => {
            for (i, child) in container.children.iter().enumerate() {
                if i > 0 {
                    out.push_str(&options.block_separator);
                }
                compose_into(child, options, out)?;
            }
        }

        Node::Element(element) => {
            let template = element.template().ok_or_else(|| RenderError::Unrendered {
                tag: element.tag().to_string(),
                offset: element.span().offset,
            })?;

            if element.is_text() {
                out.push_str(template);
                return Ok(());
            }

            match template.rsplit_once(PLACEHOLDER) {
                Some((open, close)) => {
                    out.push_str(open);
                    if let Some(nested) = element.nested() {
                        compose_into(nested, options, out)?;
                    }
                    out.push_str(close);
                }
                None => out.push_str(template),
            }
        }
    }
    Ok(())
}

/// Escape HTML attribute value
fn escape_html_attr(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
