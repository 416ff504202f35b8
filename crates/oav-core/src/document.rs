use serde::Serialize;
use serde_json::Value;

use crate::error::ParseError;
use crate::parse::spec::OpenApiSpec;
use crate::resolve::{RawNode, expand};

/// A loaded OpenAPI document: the typed navigation view plus the raw tree
/// the resolution engine walks, both built from a single parse.
///
/// Immutable after load. Every resolution pass produces a new output tree,
/// so repeated expansion of the same subtree is side-effect-free.
#[derive(Debug, Clone)]
pub struct Document {
    spec: OpenApiSpec,
    root: RawNode,
}

impl Document {
    pub fn from_yaml(input: &str) -> Result<Self, ParseError> {
        let value: Value = serde_yaml_ng::from_str(input)?;
        Self::from_value(value)
    }

    pub fn from_json(input: &str) -> Result<Self, ParseError> {
        let value: Value = serde_json::from_str(input)?;
        Self::from_value(value)
    }

    fn from_value(value: Value) -> Result<Self, ParseError> {
        let root = RawNode::from_value(&value);
        let spec: OpenApiSpec = serde_json::from_value(value)?;
        if !spec.openapi.starts_with("3.") {
            return Err(ParseError::UnsupportedVersion(spec.openapi));
        }
        Ok(Self { spec, root })
    }

    pub fn spec(&self) -> &OpenApiSpec {
        &self.spec
    }

    pub fn root(&self) -> &RawNode {
        &self.root
    }

    /// Deep-expand an arbitrary subtree against this document.
    pub fn expand_node(&self, node: &RawNode) -> RawNode {
        expand(node, &self.root)
    }

    /// Deep-expand a serializable fragment of the typed spec model and
    /// return the dereferenced JSON, ready for a tree or JSON view.
    pub fn expand_to_value<T: Serialize>(&self, fragment: &T) -> Result<Value, ParseError> {
        let value = serde_json::to_value(fragment)?;
        Ok(self.expand_node(&RawNode::from_value(&value)).to_value())
    }

    /// Expand the component a `#/components/...` pointer names. Bad
    /// pointers yield a marker node, never an error.
    pub fn resolve_component(&self, pointer: &str) -> RawNode {
        self.expand_node(&RawNode::Reference(pointer.to_string()))
    }
}
