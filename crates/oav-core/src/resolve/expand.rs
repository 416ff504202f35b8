use std::collections::HashSet;

use indexmap::IndexMap;

use super::node::RawNode;
use super::pointer::resolve_pointer;

/// Deep-expands `$ref` nodes in a subtree against a document root.
///
/// A reference is circular relative to the current expansion path, not
/// globally: the visiting set tracks only the pointers in flight on the
/// root-to-leaf chain of the recursion, and every entry is removed again
/// when its branch finishes. Two sibling branches can therefore expand the
/// same shared component without either being flagged.
pub struct Expander<'a> {
    root: &'a RawNode,
    visiting: HashSet<String>,
}

impl<'a> Expander<'a> {
    pub fn new(root: &'a RawNode) -> Self {
        Self {
            root,
            visiting: HashSet::new(),
        }
    }

    /// Produce a new tree with every reference replaced by its recursively
    /// expanded target. Never fails: unresolvable references degrade to
    /// [`RawNode::Unresolved`] and cycles to [`RawNode::Circular`], both
    /// terminal. The visiting set is empty again when this returns.
    pub fn expand(&mut self, node: &RawNode) -> RawNode {
        match node {
            RawNode::Null
            | RawNode::Bool(_)
            | RawNode::Number(_)
            | RawNode::String(_)
            | RawNode::Circular { .. }
            | RawNode::Unresolved { .. } => node.clone(),

            RawNode::Reference(pointer) => self.expand_reference(pointer),

            RawNode::Sequence(items) => {
                RawNode::Sequence(items.iter().map(|item| self.expand(item)).collect())
            }

            RawNode::Mapping(map) => RawNode::Mapping(
                map.iter()
                    .map(|(key, value)| (key.clone(), self.expand(value)))
                    .collect::<IndexMap<_, _>>(),
            ),
        }
    }

    fn expand_reference(&mut self, pointer: &str) -> RawNode {
        if self.visiting.contains(pointer) {
            return RawNode::Circular {
                pointer: pointer.to_string(),
            };
        }

        self.visiting.insert(pointer.to_string());
        let expanded = match resolve_pointer(pointer, self.root) {
            Ok(target) => self.expand(target),
            Err(err) => RawNode::Unresolved {
                pointer: pointer.to_string(),
                message: err.to_string(),
            },
        };
        // Backtrack: the pointer stays in the set only while this one
        // occurrence (and its descendants) is being expanded.
        self.visiting.remove(pointer);
        expanded
    }
}

/// Expand `node` against `root` with fresh cycle-tracking state.
pub fn expand(node: &RawNode, root: &RawNode) -> RawNode {
    Expander::new(root).expand(node)
}
