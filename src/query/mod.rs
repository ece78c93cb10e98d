//! Query construction: validated placeholder templates and the request
//! builder that binds them to a concrete region and year.

mod request;
mod template;

pub use request::{QueryRequest, build_batch, build_request};
pub use template::QueryTemplate;
