//! Request extractors that reject with the API error envelope.

mod db;
mod params;

pub use db::DbConn;
pub use params::{ApiPath, ApiQuery, Mgyp};
