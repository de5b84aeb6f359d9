//! Contig handlers.

use crate::error::{AppError, ErrorBody};
use crate::extractors::{ApiPath, DbConn};
use crate::handlers::params::ContigPath;
use crate::models::Contig;
use crate::service::QueryService;
use axum::Json;

/// Fetch a contig by numeric id. An unknown id yields `null`.
#[utoipa::path(
    get,
    path = "/contigs/{mgyc}",
    params(("mgyc" = i64, Path, description = "Contig id")),
    responses(
        (status = 200, description = "The contig, or null when no row matches.", body = Contig),
        (status = 400, description = "Non-numeric contig id.", body = ErrorBody)
    )
)]
pub async fn get_contig(ApiPath(path): ApiPath<ContigPath>, mut conn: DbConn) -> Result<Json<Option<Contig>>, AppError> {
    let contig = QueryService::get_contig(&mut conn, path.mgyc).await?;
    Ok(Json(contig))
}
