//! Table DDL for the protein database. The ingestion pipeline owns the data;
//! this is for development databases and tests.

use crate::error::AppError;
use crate::schema::{Relation, RELATIONS};
use sqlx::PgPool;

const TABLES: &[&str] = &[
    r#"
    CREATE TABLE IF NOT EXISTS biomes (
        id BIGSERIAL PRIMARY KEY,
        lineage VARCHAR(255) NOT NULL
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS study (
        id BIGSERIAL PRIMARY KEY,
        accession TEXT NOT NULL,
        public BOOLEAN
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS assembly (
        id BIGSERIAL PRIMARY KEY,
        accession TEXT NOT NULL,
        study_id BIGINT REFERENCES study (id),
        biome_id BIGINT REFERENCES biomes (id),
        pipeline_version INTEGER
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS contig (
        id BIGSERIAL PRIMARY KEY,
        digest VARCHAR(255) UNIQUE,
        kmer_coverage INTEGER,
        length INTEGER,
        contig_name TEXT,
        assembly_id BIGINT REFERENCES assembly (id)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS protein (
        id BIGINT NOT NULL,
        digest TEXT NOT NULL,
        sequence TEXT NOT NULL,
        private BOOLEAN,
        PRIMARY KEY (id, digest)
    )
    "#,
    r#"
    CREATE TABLE IF NOT EXISTS protein_metadata (
        id BIGSERIAL PRIMARY KEY,
        mgyp_id BIGINT NOT NULL,
        mgyc_id BIGINT REFERENCES contig (id),
        assembly_id BIGINT REFERENCES assembly (id),
        partial TEXT,
        public TEXT,
        caller TEXT,
        start_protein INTEGER,
        end_protein INTEGER,
        strand TEXT
    )
    "#,
];

/// Lookup indexes on accession columns. Foreign-key indexes come from the relation graph.
const INDEXES: &[&str] = &[
    "CREATE INDEX IF NOT EXISTS assembly_accession_idx ON assembly (accession)",
    "CREATE INDEX IF NOT EXISTS study_accession_idx ON study (accession)",
];

fn fk_index(rel: &Relation) -> String {
    format!(
        "CREATE INDEX IF NOT EXISTS {child}_{fk}_idx ON {child} ({fk})",
        child = rel.child.name,
        fk = rel.fk
    )
}

/// Create every table and index if missing. Parents are created before children.
pub async fn ensure_schema(pool: &PgPool) -> Result<(), AppError> {
    for ddl in TABLES.iter().chain(INDEXES) {
        sqlx::query(ddl).execute(pool).await?;
    }
    for rel in RELATIONS {
        sqlx::query(&fk_index(rel)).execute(pool).await?;
    }
    tracing::info!(
        tables = TABLES.len(),
        indexes = INDEXES.len() + RELATIONS.len(),
        "schema ensured"
    );
    Ok(())
}
