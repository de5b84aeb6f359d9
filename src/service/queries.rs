//! Read queries behind every route. Each call runs on a connection the caller checked out.

use crate::accession::ProteinAccession;
use crate::error::AppError;
use crate::models::{Assembly, Biome, Contig, MetadataRow, Protein, ProteinMetadataRecord, Study, Visibility};
use crate::schema::{
    ASSEMBLY, ASSEMBLY_BIOME, ASSEMBLY_STUDY, BIOME, CONTIG, CONTIG_ASSEMBLY, METADATA_ASSEMBLY, METADATA_CONTIG,
    METADATA_PROTEIN, PROTEIN, PROTEIN_METADATA, STUDY,
};
use crate::sql::{bind_params, Page, QueryBuf, Select, SqlType};
use sqlx::postgres::PgRow;
use sqlx::{FromRow, PgConnection};

pub const DEFAULT_PROTEIN_LIMIT: u32 = 100;
pub const DEFAULT_LIMIT: u32 = 10;

fn protein_select() -> Select {
    Select::from(PROTEIN)
        .cast(PROTEIN.col("id"), SqlType::BigInt)
        .columns(&[PROTEIN.col("digest"), PROTEIN.col("sequence")])
        .flag_as(PROTEIN.col("private"), "private")
}

fn contig_select() -> Select {
    Select::from(CONTIG)
        .cast(CONTIG.col("id"), SqlType::BigInt)
        .cast(CONTIG.col("kmer_coverage"), SqlType::Integer)
        .cast(CONTIG.col("length"), SqlType::Integer)
        .column(CONTIG.col("contig_name"))
}

fn proteins_query(page: Page) -> QueryBuf {
    protein_select()
        .filter_not_true(PROTEIN.col("private"))
        .order_by(PROTEIN.col("id"))
        .paginate(page)
        .build()
}

fn protein_query(accession: ProteinAccession) -> QueryBuf {
    protein_select()
        .filter_eq(PROTEIN.col("id"), accession.id())
        .order_by(PROTEIN.col("id"))
        .paginate(Page::new(0, 1))
        .build()
}

fn metadata_query(accession: ProteinAccession, page: Page) -> QueryBuf {
    Select::from(PROTEIN_METADATA)
        .cast(PROTEIN_METADATA.col("id"), SqlType::BigInt)
        .columns(&[
            PROTEIN_METADATA.col("partial"),
            PROTEIN_METADATA.col("public"),
            PROTEIN_METADATA.col("caller"),
        ])
        .cast(PROTEIN_METADATA.col("start_protein"), SqlType::Integer)
        .cast(PROTEIN_METADATA.col("end_protein"), SqlType::Integer)
        .column(PROTEIN_METADATA.col("strand"))
        .cast_as(PROTEIN.col("id"), SqlType::BigInt, "protein_id")
        .column_as(PROTEIN.col("digest"), "protein_digest")
        .column_as(PROTEIN.col("sequence"), "protein_sequence")
        .flag_as(PROTEIN.col("private"), "protein_private")
        .cast_as(CONTIG.col("id"), SqlType::BigInt, "contig_id")
        .cast_as(CONTIG.col("kmer_coverage"), SqlType::Integer, "contig_kmer_coverage")
        .cast_as(CONTIG.col("length"), SqlType::Integer, "contig_length")
        .column_as(CONTIG.col("contig_name"), "contig_name")
        .cast_as(ASSEMBLY.col("id"), SqlType::BigInt, "assembly_id")
        .column_as(ASSEMBLY.col("accession"), "assembly_accession")
        .cast_as(ASSEMBLY.col("pipeline_version"), SqlType::Integer, "assembly_pipeline_version")
        .join(METADATA_PROTEIN)
        .left_join(METADATA_CONTIG)
        .left_join(METADATA_ASSEMBLY)
        .filter_eq(PROTEIN_METADATA.col("mgyp_id"), accession.id())
        .order_by(PROTEIN_METADATA.col("id"))
        .paginate(page)
        .build()
}

fn biomes_query(accession: ProteinAccession, page: Page) -> QueryBuf {
    Select::from(BIOME)
        .distinct()
        .columns(&[BIOME.col("id"), BIOME.col("lineage")])
        .join(ASSEMBLY_BIOME)
        .join(METADATA_ASSEMBLY)
        .filter_eq(PROTEIN_METADATA.col("mgyp_id"), accession.id())
        .order_by(BIOME.col("id"))
        .paginate(page)
        .build()
}

fn studies_query(accession: ProteinAccession, page: Page) -> QueryBuf {
    Select::from(STUDY)
        .distinct()
        .cast(STUDY.col("id"), SqlType::BigInt)
        .column(STUDY.col("accession"))
        .join(ASSEMBLY_STUDY)
        .join(METADATA_ASSEMBLY)
        .filter_eq(PROTEIN_METADATA.col("mgyp_id"), accession.id())
        .order_by(STUDY.col("id"))
        .paginate(page)
        .build()
}

fn assemblies_query(accession: ProteinAccession, study_accession: &str, page: Page) -> QueryBuf {
    Select::from(ASSEMBLY)
        .distinct()
        .cast(ASSEMBLY.col("id"), SqlType::BigInt)
        .column(ASSEMBLY.col("accession"))
        .cast(ASSEMBLY.col("pipeline_version"), SqlType::Integer)
        .join(ASSEMBLY_STUDY)
        .join(METADATA_ASSEMBLY)
        .filter_eq(PROTEIN_METADATA.col("public"), Visibility::Public.as_str())
        .filter_eq(PROTEIN_METADATA.col("mgyp_id"), accession.id())
        .filter_eq(STUDY.col("accession"), study_accession)
        .order_by(ASSEMBLY.col("id"))
        .paginate(page)
        .build()
}

fn assembly_contigs_query(assembly_accession: &str, page: Page) -> QueryBuf {
    contig_select()
        .join(CONTIG_ASSEMBLY)
        .filter_eq(ASSEMBLY.col("accession"), assembly_accession)
        .order_by(CONTIG.col("id"))
        .paginate(page)
        .build()
}

fn contig_query(id: i64) -> QueryBuf {
    contig_select()
        .filter_eq(CONTIG.col("id"), id)
        .paginate(Page::new(0, 1))
        .build()
}

pub struct QueryService;

impl QueryService {
    /// Public proteins only; a NULL flag counts as public.
    pub async fn list_proteins(conn: &mut PgConnection, page: Page) -> Result<Vec<Protein>, AppError> {
        Self::query_many(conn, &proteins_query(page)).await
    }

    pub async fn get_protein(
        conn: &mut PgConnection,
        accession: ProteinAccession,
    ) -> Result<Option<Protein>, AppError> {
        Self::query_optional(conn, &protein_query(accession)).await
    }

    /// All metadata rows for the protein. Rows are not filtered on `public`.
    pub async fn list_protein_metadata(
        conn: &mut PgConnection,
        accession: ProteinAccession,
        page: Page,
    ) -> Result<Vec<ProteinMetadataRecord>, AppError> {
        let rows: Vec<MetadataRow> = Self::query_many(conn, &metadata_query(accession, page)).await?;
        rows.into_iter().map(ProteinMetadataRecord::try_from).collect()
    }

    /// Distinct biomes of the assemblies the protein was found in.
    pub async fn list_protein_biomes(
        conn: &mut PgConnection,
        accession: ProteinAccession,
        page: Page,
    ) -> Result<Vec<Biome>, AppError> {
        Self::query_many(conn, &biomes_query(accession, page)).await
    }

    /// Distinct studies of the assemblies the protein was found in.
    pub async fn list_protein_studies(
        conn: &mut PgConnection,
        accession: ProteinAccession,
        page: Page,
    ) -> Result<Vec<Study>, AppError> {
        Self::query_many(conn, &studies_query(accession, page)).await
    }

    /// Distinct assemblies of one study holding a public metadata row for the protein.
    pub async fn list_protein_assemblies(
        conn: &mut PgConnection,
        accession: ProteinAccession,
        study_accession: &str,
        page: Page,
    ) -> Result<Vec<Assembly>, AppError> {
        Self::query_many(conn, &assemblies_query(accession, study_accession, page)).await
    }

    pub async fn list_assembly_contigs(
        conn: &mut PgConnection,
        assembly_accession: &str,
        page: Page,
    ) -> Result<Vec<Contig>, AppError> {
        Self::query_many(conn, &assembly_contigs_query(assembly_accession, page)).await
    }

    pub async fn get_contig(conn: &mut PgConnection, id: i64) -> Result<Option<Contig>, AppError> {
        Self::query_optional(conn, &contig_query(id)).await
    }

    async fn query_many<O>(conn: &mut PgConnection, q: &QueryBuf) -> Result<Vec<O>, AppError>
    where
        O: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let rows = bind_params(sqlx::query_as::<_, O>(&q.sql), &q.params)
            .fetch_all(&mut *conn)
            .await?;
        Ok(rows)
    }

    async fn query_optional<O>(conn: &mut PgConnection, q: &QueryBuf) -> Result<Option<O>, AppError>
    where
        O: for<'r> FromRow<'r, PgRow> + Send + Unpin,
    {
        tracing::debug!(sql = %q.sql, params = ?q.params, "query");
        let row = bind_params(sqlx::query_as::<_, O>(&q.sql), &q.params)
            .fetch_optional(&mut *conn)
            .await?;
        Ok(row)
    }
}
