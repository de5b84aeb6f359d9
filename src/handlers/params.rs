//! Query and path parameter shapes shared by the handlers.

use crate::sql::Page;
use serde::Deserialize;
use utoipa::IntoParams;

/// Pagination: `skip` rows are discarded, then at most `limit` rows returned.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageQuery {
    /// Rows to skip (default 0).
    pub skip: Option<u32>,
    /// Maximum rows to return.
    pub limit: Option<u32>,
}

impl PageQuery {
    pub fn page(&self, default_limit: u32) -> Page {
        Page::new(self.skip.unwrap_or(0), self.limit.unwrap_or(default_limit))
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct StudiesQuery {
    /// Accepted for compatibility; not applied as a filter.
    pub study: Option<String>,
    /// Rows to skip (default 0).
    pub skip: Option<u32>,
    /// Maximum rows to return (default 10).
    pub limit: Option<u32>,
}

impl StudiesQuery {
    pub fn page(&self, default_limit: u32) -> Page {
        Page::new(self.skip.unwrap_or(0), self.limit.unwrap_or(default_limit))
    }
}

#[derive(Debug, Deserialize)]
pub struct StudyPath {
    pub study_accession: String,
}

#[derive(Debug, Deserialize)]
pub struct AssemblyPath {
    pub assembly_accession: String,
}

#[derive(Debug, Deserialize)]
pub struct ContigPath {
    pub mgyc: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_defaults_per_route() {
        let q = PageQuery::default();
        assert_eq!(q.page(100), Page::new(0, 100));
        assert_eq!(q.page(10), Page::new(0, 10));
        let q = PageQuery { skip: Some(3), limit: Some(0) };
        assert_eq!(q.page(100), Page::new(3, 0));
    }
}
