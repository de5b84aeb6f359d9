//! Protein handlers: list, fetch by accession, and the relationship traversals.

use crate::error::{AppError, ErrorBody};
use crate::extractors::{ApiPath, ApiQuery, DbConn, Mgyp};
use crate::handlers::params::{PageQuery, StudiesQuery, StudyPath};
use crate::models::{Assembly, Biome, Protein, ProteinMetadataRecord, Study};
use crate::service::{QueryService, DEFAULT_LIMIT, DEFAULT_PROTEIN_LIMIT};
use axum::Json;

#[utoipa::path(
    get,
    path = "/proteins/",
    params(PageQuery),
    responses(
        (status = 200, description = "Public proteins.", body = [Protein]),
        (status = 400, description = "Bad pagination parameters.", body = ErrorBody)
    )
)]
pub async fn list_proteins(
    ApiQuery(query): ApiQuery<PageQuery>,
    mut conn: DbConn,
) -> Result<Json<Vec<Protein>>, AppError> {
    let proteins = QueryService::list_proteins(&mut conn, query.page(DEFAULT_PROTEIN_LIMIT)).await?;
    Ok(Json(proteins))
}

/// Fetch a protein by accession. An unknown accession yields `null`.
#[utoipa::path(
    get,
    path = "/proteins/{mgyp}",
    params(("mgyp" = String, Path, description = "Protein accession, e.g. MGYP42")),
    responses(
        (status = 200, description = "The protein, or null when no row matches.", body = Protein),
        (status = 400, description = "Malformed accession.", body = ErrorBody)
    )
)]
pub async fn get_protein(Mgyp(accession): Mgyp, mut conn: DbConn) -> Result<Json<Option<Protein>>, AppError> {
    let protein = QueryService::get_protein(&mut conn, accession).await?;
    if protein.is_none() {
        tracing::debug!(%accession, "protein not found");
    }
    Ok(Json(protein))
}

#[utoipa::path(
    get,
    path = "/proteins/{mgyp}/metadata",
    params(("mgyp" = String, Path, description = "Protein accession"), PageQuery),
    responses(
        (status = 200, description = "Metadata rows with nested protein, contig and assembly.", body = [ProteinMetadataRecord]),
        (status = 400, description = "Malformed accession.", body = ErrorBody)
    )
)]
pub async fn list_protein_metadata(
    Mgyp(accession): Mgyp,
    ApiQuery(query): ApiQuery<PageQuery>,
    mut conn: DbConn,
) -> Result<Json<Vec<ProteinMetadataRecord>>, AppError> {
    let rows = QueryService::list_protein_metadata(&mut conn, accession, query.page(DEFAULT_LIMIT)).await?;
    Ok(Json(rows))
}

#[utoipa::path(
    get,
    path = "/proteins/{mgyp}/biomes",
    params(("mgyp" = String, Path, description = "Protein accession"), PageQuery),
    responses(
        (status = 200, description = "Distinct biomes the protein was found in.", body = [Biome]),
        (status = 400, description = "Malformed accession.", body = ErrorBody)
    )
)]
pub async fn list_protein_biomes(
    Mgyp(accession): Mgyp,
    ApiQuery(query): ApiQuery<PageQuery>,
    mut conn: DbConn,
) -> Result<Json<Vec<Biome>>, AppError> {
    let biomes = QueryService::list_protein_biomes(&mut conn, accession, query.page(DEFAULT_LIMIT)).await?;
    Ok(Json(biomes))
}

#[utoipa::path(
    get,
    path = "/proteins/{mgyp}/studies",
    params(("mgyp" = String, Path, description = "Protein accession"), StudiesQuery),
    responses(
        (status = 200, description = "Distinct studies the protein was found in.", body = [Study]),
        (status = 400, description = "Malformed accession.", body = ErrorBody)
    )
)]
pub async fn list_protein_studies(
    Mgyp(accession): Mgyp,
    ApiQuery(query): ApiQuery<StudiesQuery>,
    mut conn: DbConn,
) -> Result<Json<Vec<Study>>, AppError> {
    if let Some(study) = query.study.as_deref().filter(|s| !s.is_empty()) {
        tracing::debug!(study, "study filter is not applied");
    }
    let studies = QueryService::list_protein_studies(&mut conn, accession, query.page(DEFAULT_LIMIT)).await?;
    Ok(Json(studies))
}

#[utoipa::path(
    get,
    path = "/proteins/{mgyp}/studies/{study_accession}/assemblies",
    params(
        ("mgyp" = String, Path, description = "Protein accession"),
        ("study_accession" = String, Path, description = "Study accession, e.g. ERP001"),
        PageQuery
    ),
    responses(
        (status = 200, description = "Distinct assemblies of the study with public metadata for the protein.", body = [Assembly]),
        (status = 400, description = "Malformed accession.", body = ErrorBody)
    )
)]
pub async fn list_protein_assemblies(
    Mgyp(accession): Mgyp,
    ApiPath(path): ApiPath<StudyPath>,
    ApiQuery(query): ApiQuery<PageQuery>,
    mut conn: DbConn,
) -> Result<Json<Vec<Assembly>>, AppError> {
    let assemblies = QueryService::list_protein_assemblies(
        &mut conn,
        accession,
        &path.study_accession,
        query.page(DEFAULT_LIMIT),
    )
    .await?;
    Ok(Json(assemblies))
}
