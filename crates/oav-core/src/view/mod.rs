pub mod endpoints;
pub mod operation;

pub use endpoints::{Endpoint, GroupBy, endpoints, group_endpoints};
pub use operation::{OperationView, operation_view};
