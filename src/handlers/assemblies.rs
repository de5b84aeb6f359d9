//! Assembly handlers.

use crate::error::{AppError, ErrorBody};
use crate::extractors::{ApiPath, ApiQuery, DbConn};
use crate::handlers::params::{AssemblyPath, PageQuery};
use crate::models::Contig;
use crate::service::{QueryService, DEFAULT_LIMIT};
use axum::Json;

#[utoipa::path(
    get,
    path = "/assemblies/{assembly_accession}/contigs",
    params(("assembly_accession" = String, Path, description = "Assembly accession, e.g. ERZ001"), PageQuery),
    responses(
        (status = 200, description = "Contigs of the assembly.", body = [Contig]),
        (status = 400, description = "Bad pagination parameters.", body = ErrorBody)
    )
)]
pub async fn list_assembly_contigs(
    ApiPath(path): ApiPath<AssemblyPath>,
    ApiQuery(query): ApiQuery<PageQuery>,
    mut conn: DbConn,
) -> Result<Json<Vec<Contig>>, AppError> {
    let contigs = QueryService::list_assembly_contigs(&mut conn, &path.assembly_accession, query.page(DEFAULT_LIMIT)).await?;
    Ok(Json(contigs))
}
