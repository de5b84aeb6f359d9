//! Bound values and pagination for generated queries.

use sqlx::postgres::{PgArguments, Postgres};
use sqlx::query::QueryAs;

/// A value bound as a `$n` parameter.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BindValue {
    Int(i64),
    Text(String),
}

impl From<i64> for BindValue {
    fn from(n: i64) -> Self {
        BindValue::Int(n)
    }
}

impl From<&str> for BindValue {
    fn from(s: &str) -> Self {
        BindValue::Text(s.to_string())
    }
}

/// `skip` rows discarded from the ordered result, then at most `limit` rows returned.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Page {
    pub skip: u32,
    pub limit: u32,
}

impl Page {
    pub fn new(skip: u32, limit: u32) -> Self {
        Page { skip, limit }
    }
}

/// Bind params in placeholder order.
pub fn bind_params<'q, O>(
    mut query: QueryAs<'q, Postgres, O, PgArguments>,
    params: &'q [BindValue],
) -> QueryAs<'q, Postgres, O, PgArguments> {
    for p in params {
        query = match p {
            BindValue::Int(n) => query.bind(*n),
            BindValue::Text(s) => query.bind(s.as_str()),
        };
    }
    query
}
