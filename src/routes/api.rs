//! Data routes: proteins, their relationships, assemblies and contigs.

use crate::handlers::{assemblies, contigs, proteins};
use crate::state::AppState;
use axum::{routing::get, Router};

pub fn protein_routes(state: AppState) -> Router {
    Router::new()
        .route("/proteins", get(proteins::list_proteins))
        .route("/proteins/", get(proteins::list_proteins))
        .route("/proteins/:mgyp", get(proteins::get_protein))
        .route("/proteins/:mgyp/metadata", get(proteins::list_protein_metadata))
        .route("/proteins/:mgyp/biomes", get(proteins::list_protein_biomes))
        .route("/proteins/:mgyp/studies", get(proteins::list_protein_studies))
        .route(
            "/proteins/:mgyp/studies/:study_accession/assemblies",
            get(proteins::list_protein_assemblies),
        )
        .with_state(state)
}

pub fn assembly_routes(state: AppState) -> Router {
    Router::new()
        .route("/assemblies/:assembly_accession/contigs", get(assemblies::list_assembly_contigs))
        .route("/contigs/:mgyc", get(contigs::get_contig))
        .with_state(state)
}
