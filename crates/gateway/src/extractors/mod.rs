//! Request extractors that fail with the standard error envelope.

mod json_body;
mod query_params;

pub use json_body::JsonBody;
pub use query_params::QueryParams;
