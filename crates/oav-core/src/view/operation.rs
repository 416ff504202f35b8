use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;

use crate::document::Document;
use crate::error::ParseError;
use crate::parse::media_type::MediaType;
use crate::parse::operation::HttpMethod;
use crate::parse::parameter::{Parameter, ParameterLocation, ParameterOrRef};
use crate::parse::request_body::{RequestBody, RequestBodyOrRef};
use crate::parse::response::{Response, ResponseOrRef};
use crate::resolve::resolve_pointer;

/// Fully dereferenced view of one operation, ready for rendering: every
/// schema is deep-expanded, so no reference handling is needed downstream.
#[derive(Debug, Clone, Serialize)]
pub struct OperationView {
    pub path: String,
    pub method: HttpMethod,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    pub deprecated: bool,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub parameters: Vec<ParameterView>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_body: Option<RequestBodyView>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub responses: Vec<ResponseView>,

    /// Pointers that could not be resolved while assembling the view. The
    /// rest of the view is still usable.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub unresolved: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParameterView {
    pub name: String,

    #[serde(rename = "in")]
    pub location: ParameterLocation,

    pub required: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Short display hint like `string (date-time)`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub type_hint: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<Value>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RequestBodyView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub required: bool,

    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub content: IndexMap<String, MediaTypeView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ResponseView {
    pub status: String,
    pub description: String,

    #[serde(skip_serializing_if = "IndexMap::is_empty")]
    pub content: IndexMap<String, MediaTypeView>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MediaTypeView {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<Value>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub example: Option<Value>,
}

/// Assemble the dereferenced view of one operation, or `None` when the
/// path/method pair does not exist in the document.
pub fn operation_view(
    document: &Document,
    path: &str,
    method: HttpMethod,
) -> Result<Option<OperationView>, ParseError> {
    let Some(op) = document
        .spec()
        .paths
        .get(path)
        .and_then(|item| item.operation(method))
    else {
        return Ok(None);
    };

    let mut unresolved = Vec::new();

    let mut parameters = Vec::new();
    for param in &op.parameters {
        let resolved = match param {
            ParameterOrRef::Parameter(p) => Some(p.clone()),
            ParameterOrRef::Ref { ref_path } => {
                let p = deref_as::<Parameter>(document, ref_path);
                if p.is_none() {
                    unresolved.push(ref_path.clone());
                }
                p
            }
        };
        if let Some(p) = resolved {
            parameters.push(parameter_view(document, &p)?);
        }
    }

    let request_body = match &op.request_body {
        None => None,
        Some(RequestBodyOrRef::RequestBody(body)) => Some(request_body_view(document, body)?),
        Some(RequestBodyOrRef::Ref { ref_path }) => {
            match deref_as::<RequestBody>(document, ref_path) {
                Some(body) => Some(request_body_view(document, &body)?),
                None => {
                    unresolved.push(ref_path.clone());
                    None
                }
            }
        }
    };

    let mut responses = Vec::new();
    for (status, resp) in &op.responses {
        let resolved = match resp {
            ResponseOrRef::Response(r) => Some(r.clone()),
            ResponseOrRef::Ref { ref_path } => {
                let r = deref_as::<Response>(document, ref_path);
                if r.is_none() {
                    unresolved.push(ref_path.clone());
                }
                r
            }
        };
        if let Some(r) = resolved {
            responses.push(response_view(document, status, &r)?);
        }
    }

    Ok(Some(OperationView {
        path: path.to_string(),
        method,
        operation_id: op.operation_id.clone(),
        summary: op.summary.clone(),
        description: op.description.clone(),
        tags: op.tags.clone(),
        deprecated: op.deprecated.unwrap_or(false),
        parameters,
        request_body,
        responses,
        unresolved,
    }))
}

/// Single dereference of a component pointer into a typed object. `None`
/// covers both a dangling pointer and a target of the wrong shape.
fn deref_as<T: serde::de::DeserializeOwned>(document: &Document, pointer: &str) -> Option<T> {
    let node = resolve_pointer(pointer, document.root()).ok()?;
    serde_json::from_value(node.to_value()).ok()
}

fn parameter_view(document: &Document, param: &Parameter) -> Result<ParameterView, ParseError> {
    let schema = param
        .schema
        .as_ref()
        .map(|s| document.expand_to_value(s))
        .transpose()?;
    Ok(ParameterView {
        name: param.name.clone(),
        location: param.location,
        required: param.required,
        description: param.description.clone(),
        type_hint: schema.as_ref().and_then(type_hint),
        example: param.example.clone(),
        schema,
    })
}

fn request_body_view(
    document: &Document,
    body: &RequestBody,
) -> Result<RequestBodyView, ParseError> {
    Ok(RequestBodyView {
        description: body.description.clone(),
        required: body.required,
        content: expand_content(document, &body.content)?,
    })
}

fn response_view(
    document: &Document,
    status: &str,
    response: &Response,
) -> Result<ResponseView, ParseError> {
    Ok(ResponseView {
        status: status.to_string(),
        description: response.description.clone(),
        content: expand_content(document, &response.content)?,
    })
}

fn expand_content(
    document: &Document,
    content: &IndexMap<String, MediaType>,
) -> Result<IndexMap<String, MediaTypeView>, ParseError> {
    let mut out = IndexMap::new();
    for (media, mt) in content {
        let schema = mt
            .schema
            .as_ref()
            .map(|s| document.expand_to_value(s))
            .transpose()?;
        out.insert(
            media.clone(),
            MediaTypeView {
                schema,
                example: pick_example(mt),
            },
        );
    }
    Ok(out)
}

/// Example picking rule: an explicit `example` wins, else the `default`
/// entry of `examples`.
fn pick_example(mt: &MediaType) -> Option<Value> {
    if let Some(example) = &mt.example {
        return Some(example.clone());
    }
    mt.examples
        .get("default")
        .and_then(|ex| ex.get("value"))
        .cloned()
}

fn type_hint(schema: &Value) -> Option<String> {
    let ty = match schema.get("type")? {
        Value::String(single) => single.clone(),
        Value::Array(types) => types
            .iter()
            .filter_map(Value::as_str)
            .collect::<Vec<_>>()
            .join(" | "),
        _ => return None,
    };
    match schema.get("format").and_then(Value::as_str) {
        Some(format) => Some(format!("{ty} ({format})")),
        None => Some(ty),
    }
}
