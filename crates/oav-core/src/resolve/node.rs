use indexmap::IndexMap;
use serde_json::{Value, json};

/// A JSON-like document tree with `$ref` nodes made explicit.
///
/// Reference detection happens once, at ingestion: any JSON mapping carrying
/// a string-valued `$ref` key becomes [`RawNode::Reference`]. The two marker
/// variants are produced only by expansion and are terminal; ingestion never
/// yields them.
#[derive(Debug, Clone, PartialEq)]
pub enum RawNode {
    Null,
    Bool(bool),
    Number(serde_json::Number),
    String(String),
    Sequence(Vec<RawNode>),
    Mapping(IndexMap<String, RawNode>),
    /// A `{"$ref": "#/components/..."}` node.
    Reference(String),
    /// Stands in for a reference that reappeared on its own expansion path.
    Circular { pointer: String },
    /// Stands in for a reference that could not be dereferenced.
    Unresolved { pointer: String, message: String },
}

impl RawNode {
    /// Ingest a parsed JSON/YAML value. Sibling keys of `$ref` are dropped,
    /// as the reference target replaces the whole mapping on expansion.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::Null => RawNode::Null,
            Value::Bool(b) => RawNode::Bool(*b),
            Value::Number(n) => RawNode::Number(n.clone()),
            Value::String(s) => RawNode::String(s.clone()),
            Value::Array(items) => {
                RawNode::Sequence(items.iter().map(Self::from_value).collect())
            }
            Value::Object(map) => {
                if let Some(Value::String(pointer)) = map.get("$ref") {
                    return RawNode::Reference(pointer.clone());
                }
                RawNode::Mapping(
                    map.iter()
                        .map(|(k, v)| (k.clone(), Self::from_value(v)))
                        .collect(),
                )
            }
        }
    }

    /// Render back to JSON for display. Markers keep the shape the tree and
    /// JSON viewers understand: a `$ref` plus a distinguishing field.
    pub fn to_value(&self) -> Value {
        match self {
            RawNode::Null => Value::Null,
            RawNode::Bool(b) => Value::Bool(*b),
            RawNode::Number(n) => Value::Number(n.clone()),
            RawNode::String(s) => Value::String(s.clone()),
            RawNode::Sequence(items) => {
                Value::Array(items.iter().map(RawNode::to_value).collect())
            }
            RawNode::Mapping(map) => Value::Object(
                map.iter()
                    .map(|(k, v)| (k.clone(), v.to_value()))
                    .collect(),
            ),
            RawNode::Reference(pointer) => json!({ "$ref": pointer }),
            RawNode::Circular { pointer } => json!({
                "$ref": pointer,
                "_circularResolved": true,
                "title": format!("Circular Reference to {pointer}"),
            }),
            RawNode::Unresolved { pointer, message } => json!({
                "$ref": pointer,
                "_error": message,
            }),
        }
    }

    /// Mapping lookup; `None` for every other variant.
    pub fn get(&self, key: &str) -> Option<&RawNode> {
        match self {
            RawNode::Mapping(map) => map.get(key),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ingest_tags_reference_nodes() {
        let value = json!({
            "type": "object",
            "properties": {
                "pet": { "$ref": "#/components/schemas/Pet", "description": "ignored" }
            }
        });
        let node = RawNode::from_value(&value);
        let pet = node.get("properties").and_then(|p| p.get("pet")).unwrap();
        assert_eq!(
            pet,
            &RawNode::Reference("#/components/schemas/Pet".to_string())
        );
    }

    #[test]
    fn scalars_round_trip() {
        let value = json!({ "name": "doggie", "id": 7, "tags": ["a", null, true] });
        let node = RawNode::from_value(&value);
        assert_eq!(node.to_value(), value);
    }

    #[test]
    fn markers_render_with_distinguishing_fields() {
        let circular = RawNode::Circular {
            pointer: "#/components/schemas/Node".to_string(),
        };
        let rendered = circular.to_value();
        assert_eq!(rendered["_circularResolved"], json!(true));
        assert_eq!(rendered["$ref"], json!("#/components/schemas/Node"));
        assert_eq!(
            rendered["title"],
            json!("Circular Reference to #/components/schemas/Node")
        );

        let unresolved = RawNode::Unresolved {
            pointer: "#/components/schemas/Gone".to_string(),
            message: "could not resolve segment 'Gone' in pointer '#/components/schemas/Gone'"
                .to_string(),
        };
        let rendered = unresolved.to_value();
        assert_eq!(rendered["$ref"], json!("#/components/schemas/Gone"));
        assert!(
            rendered["_error"]
                .as_str()
                .is_some_and(|m| m.contains("Gone"))
        );
    }
}
