//! Builds parameterized SELECTs over the static schema descriptors.

use crate::schema::{Column, Relation, Table};
use crate::sql::{BindValue, Page};

/// Quote identifier for PostgreSQL (safe: only from static schema).
fn quoted(s: &str) -> String {
    format!("\"{}\"", s.replace('"', "\"\""))
}

fn qualified(col: &Column) -> String {
    format!("{}.{}", col.table.alias, quoted(col.name))
}

#[derive(Debug)]
pub struct QueryBuf {
    pub sql: String,
    pub params: Vec<BindValue>,
}

impl QueryBuf {
    fn new() -> Self {
        QueryBuf {
            sql: String::new(),
            params: Vec::new(),
        }
    }

    fn push_param(&mut self, v: BindValue) -> usize {
        self.params.push(v);
        self.params.len()
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum JoinKind {
    Inner,
    Left,
}

#[derive(Debug)]
enum Filter {
    Eq(Column, BindValue),
    IsNotTrue(Column),
}

/// Target of an explicit cast in the projection, so rows decode the same
/// whichever integer width the store declares.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SqlType {
    BigInt,
    Integer,
}

impl SqlType {
    fn as_sql(&self) -> &'static str {
        match self {
            SqlType::BigInt => "BIGINT",
            SqlType::Integer => "INTEGER",
        }
    }
}

#[derive(Debug)]
struct Projected {
    col: Column,
    expr: String,
    alias: Option<String>,
}

impl Projected {
    fn render(&self) -> String {
        match &self.alias {
            Some(alias) => format!("{} AS {}", self.expr, quoted(alias)),
            None => self.expr.clone(),
        }
    }
}

/// SELECT over one root table plus joins along foreign key relations.
#[derive(Debug)]
pub struct Select {
    from: Table,
    distinct: bool,
    projection: Vec<Projected>,
    joined: Vec<Table>,
    joins: Vec<String>,
    filters: Vec<Filter>,
    order_by: Vec<Column>,
    page: Option<Page>,
}

impl Select {
    pub fn from(table: Table) -> Self {
        Select {
            from: table,
            distinct: false,
            projection: Vec::new(),
            joined: vec![table],
            joins: Vec::new(),
            filters: Vec::new(),
            order_by: Vec::new(),
            page: None,
        }
    }

    pub fn distinct(mut self) -> Self {
        self.distinct = true;
        self
    }

    fn project(mut self, col: Column, expr: String, alias: Option<&str>) -> Self {
        self.projection.push(Projected {
            col,
            expr,
            alias: alias.map(str::to_string),
        });
        self
    }

    pub fn column(self, col: Column) -> Self {
        self.project(col, qualified(&col), None)
    }

    pub fn columns(self, cols: &[Column]) -> Self {
        cols.iter().fold(self, |sel, col| sel.column(*col))
    }

    pub fn column_as(self, col: Column, alias: &str) -> Self {
        self.project(col, qualified(&col), Some(alias))
    }

    /// Cast column keeping its own name.
    pub fn cast(self, col: Column, ty: SqlType) -> Self {
        self.cast_as(col, ty, col.name)
    }

    pub fn cast_as(self, col: Column, ty: SqlType, alias: &str) -> Self {
        let expr = format!("CAST({} AS {})", qualified(&col), ty.as_sql());
        self.project(col, expr, Some(alias))
    }

    /// Boolean column with NULL read as false.
    pub fn flag_as(self, col: Column, alias: &str) -> Self {
        let expr = format!("COALESCE({}, FALSE)", qualified(&col));
        self.project(col, expr, Some(alias))
    }

    pub fn join(self, rel: Relation) -> Self {
        self.push_join(JoinKind::Inner, rel)
    }

    pub fn left_join(self, rel: Relation) -> Self {
        self.push_join(JoinKind::Left, rel)
    }

    fn push_join(mut self, kind: JoinKind, rel: Relation) -> Self {
        let target = self
            .joined
            .iter()
            .find_map(|t| rel.other_side(t).filter(|other| !self.joined.contains(other)));
        debug_assert!(
            target.is_some(),
            "join {}.{} -> {} does not extend the query",
            rel.child.name,
            rel.fk,
            rel.parent.name
        );
        let Some(target) = target else {
            tracing::error!(child = rel.child.name, parent = rel.parent.name, "join does not extend the query");
            return self;
        };
        let keyword = match kind {
            JoinKind::Inner => "JOIN",
            JoinKind::Left => "LEFT JOIN",
        };
        self.joins.push(format!(
            "{} {} {} ON {} = {}",
            keyword,
            quoted(target.name),
            target.alias,
            qualified(&rel.child.col(rel.fk)),
            qualified(&rel.parent.col(rel.pk)),
        ));
        self.joined.push(target);
        self
    }

    pub fn filter_eq(mut self, col: Column, value: impl Into<BindValue>) -> Self {
        self.filters.push(Filter::Eq(col, value.into()));
        self
    }

    pub fn filter_not_true(mut self, col: Column) -> Self {
        self.filters.push(Filter::IsNotTrue(col));
        self
    }

    pub fn order_by(mut self, col: Column) -> Self {
        self.order_by.push(col);
        self
    }

    pub fn paginate(mut self, page: Page) -> Self {
        self.page = Some(page);
        self
    }

    pub fn build(&self) -> QueryBuf {
        let mut q = QueryBuf::new();
        let mut sql = String::from("SELECT ");
        if self.distinct {
            sql.push_str("DISTINCT ");
        }
        let projection: Vec<String> = self.projection.iter().map(Projected::render).collect();
        sql.push_str(&projection.join(", "));
        sql.push_str(&format!(" FROM {} {}", quoted(self.from.name), self.from.alias));
        for join in &self.joins {
            sql.push(' ');
            sql.push_str(join);
        }

        let mut where_parts = Vec::with_capacity(self.filters.len());
        for filter in &self.filters {
            match filter {
                Filter::Eq(col, value) => {
                    let n = q.push_param(value.clone());
                    where_parts.push(format!("{} = ${}", qualified(col), n));
                }
                Filter::IsNotTrue(col) => where_parts.push(format!("{} IS NOT TRUE", qualified(col))),
            }
        }
        if !where_parts.is_empty() {
            sql.push_str(" WHERE ");
            sql.push_str(&where_parts.join(" AND "));
        }

        if !self.order_by.is_empty() {
            let order: Vec<String> = self.order_by.iter().map(|col| self.order_key(col)).collect();
            sql.push_str(" ORDER BY ");
            sql.push_str(&order.join(", "));
        }

        if let Some(page) = self.page {
            let offset = q.push_param(BindValue::Int(i64::from(page.skip)));
            let limit = q.push_param(BindValue::Int(i64::from(page.limit)));
            sql.push_str(&format!(" OFFSET ${} LIMIT ${}", offset, limit));
        }

        q.sql = sql;
        q
    }

    /// An aliased projection is ordered by its output name. Under DISTINCT the
    /// sort key must be a select-list item, and a cast is not the bare column.
    fn order_key(&self, col: &Column) -> String {
        self.projection
            .iter()
            .find(|p| p.col == *col && p.alias.is_some())
            .and_then(|p| p.alias.as_deref())
            .map(quoted)
            .unwrap_or_else(|| qualified(col))
    }
}
