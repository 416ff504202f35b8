use log::warn;

use super::node::RawNode;
use crate::error::PointerError;

/// Only same-document component pointers are supported; file-relative and
/// remote references are reported, never followed.
pub const COMPONENTS_PREFIX: &str = "#/components/";

/// Resolve a single `$ref` pointer against the document root.
///
/// Strips the `#/components/` prefix, splits the remainder on `/`, and walks
/// mapping keys from the root's `components` entry. Read-only: on success
/// the returned node is a borrow of the document, not a copy. Cycle handling
/// lives in the expander, not here.
pub fn resolve_pointer<'a>(
    pointer: &str,
    root: &'a RawNode,
) -> Result<&'a RawNode, PointerError> {
    let Some(rest) = pointer.strip_prefix(COMPONENTS_PREFIX) else {
        warn!("unsupported reference format: {pointer}");
        return Err(PointerError::UnsupportedFormat {
            pointer: pointer.to_string(),
        });
    };

    let mut current = root
        .get("components")
        .ok_or_else(|| missing_segment(pointer, "components"))?;
    for segment in rest.split('/') {
        current = current
            .get(segment)
            .ok_or_else(|| missing_segment(pointer, segment))?;
    }
    Ok(current)
}

fn missing_segment(pointer: &str, segment: &str) -> PointerError {
    warn!("could not resolve segment '{segment}' in pointer '{pointer}'");
    PointerError::MissingSegment {
        pointer: pointer.to_string(),
        segment: segment.to_string(),
    }
}
