//! Generic depth-first traversal over the node tree

use crate::ast::Node;

/// What the traversal does after a node has been visited
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Visit {
    /// Continue into the node's children or nested chain
    Descend,
    /// Leave the subtree below this node alone
    Skip,
}

/// Walk `nodes` depth-first, calling `visit` on every node reached.
///
/// A container descends into each child in order; an element descends into
/// its nested node and then on down that node's own chain. The first error
/// returned by `visit` aborts the whole walk and is handed back unchanged.
pub fn walk<'a, I, F, E>(nodes: I, visit: &mut F) -> Result<(), E>
where
    I: IntoIterator<Item = &'a mut Node>,
    F: FnMut(&mut Node) -> Result<Visit, E>,
{
    for node in nodes {
        if visit(&mut *node)? == Visit::Descend {
            walk_subtree(node, visit)?;
        }
    }
    Ok(())
}

fn walk_subtree<F, E>(node: &mut Node, visit: &mut F) -> Result<(), E>
where
    F: FnMut(&mut Node) -> Result<Visit, E>,
{
    match node {
        Node::Container(container) => walk(container.children.iter_mut(), visit),
        Node::Element(element) => walk(element.nested_mut(), visit),
    }
}
