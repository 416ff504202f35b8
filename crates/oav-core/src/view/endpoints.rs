use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::document::Document;
use crate::parse::operation::HttpMethod;

/// One operation row in the endpoint listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Endpoint {
    pub path: String,
    pub method: HttpMethod,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub operation_id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,

    pub deprecated: bool,
}

/// List every operation in document order.
pub fn endpoints(document: &Document) -> Vec<Endpoint> {
    let mut out = Vec::new();
    for (path, item) in &document.spec().paths {
        for (method, op) in item.operations() {
            out.push(Endpoint {
                path: path.clone(),
                method,
                operation_id: op.operation_id.clone(),
                summary: op.summary.clone(),
                tags: op.tags.clone(),
                deprecated: op.deprecated.unwrap_or(false),
            });
        }
    }
    out
}

/// Grouping axis for the endpoint listing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GroupBy {
    #[default]
    Path,
    Tag,
}

/// Name of the bucket operations without tags land in when grouping by tag.
pub const UNTAGGED_GROUP: &str = "untagged";

/// Group endpoints for display. An operation carrying several tags appears
/// in each of its tag groups.
pub fn group_endpoints(
    endpoints: &[Endpoint],
    group_by: GroupBy,
) -> IndexMap<String, Vec<Endpoint>> {
    let mut groups: IndexMap<String, Vec<Endpoint>> = IndexMap::new();
    for endpoint in endpoints {
        match group_by {
            GroupBy::Path => {
                groups
                    .entry(endpoint.path.clone())
                    .or_default()
                    .push(endpoint.clone());
            }
            GroupBy::Tag => {
                if endpoint.tags.is_empty() {
                    groups
                        .entry(UNTAGGED_GROUP.to_string())
                        .or_default()
                        .push(endpoint.clone());
                } else {
                    for tag in &endpoint.tags {
                        groups
                            .entry(tag.clone())
                            .or_default()
                            .push(endpoint.clone());
                    }
                }
            }
        }
    }
    groups
}
