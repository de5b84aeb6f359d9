//! QueryService: the joined, paginated reads behind every route.

mod queries;
pub use queries::{QueryService, DEFAULT_LIMIT, DEFAULT_PROTEIN_LIMIT};
