//! MGnify proteins API: read-only REST access to proteins, their metadata,
//! contigs, assemblies, studies and biomes.

pub mod accession;
pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod openapi;
pub mod routes;
pub mod schema;
pub mod service;
pub mod sql;
pub mod state;
pub mod store;

pub use accession::{AccessionError, ProteinAccession};
pub use config::DatabaseSettings;
pub use error::{AppError, ConfigError};
pub use routes::app;
pub use service::QueryService;
pub use state::AppState;
pub use store::ensure_schema;
