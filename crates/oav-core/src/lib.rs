pub mod config;
pub mod document;
pub mod error;
pub mod parse;
pub mod resolve;
pub mod view;

pub use document::Document;
pub use resolve::{RawNode, expand, resolve_pointer};
