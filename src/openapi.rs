//! OpenAPI documentation of the data routes.

use crate::error::{ErrorBody, ErrorDetail};
use crate::handlers::{assemblies, contigs, proteins};
use crate::models::{Assembly, Biome, Caller, Contig, Protein, ProteinMetadataRecord, Strand, Study};

/// Utoipa-based `OpenAPI` generation helper.
#[derive(utoipa::OpenApi)]
#[openapi(
    info(title = "MGnify proteins API", description = "Read-only access to proteins and the assemblies, studies and biomes they were found in."),
    paths(
        proteins::list_proteins,
        proteins::get_protein,
        proteins::list_protein_metadata,
        proteins::list_protein_biomes,
        proteins::list_protein_studies,
        proteins::list_protein_assemblies,
        assemblies::list_assembly_contigs,
        contigs::get_contig,
    ),
    components(schemas(
        Protein,
        ProteinMetadataRecord,
        Caller,
        Strand,
        Contig,
        Assembly,
        Study,
        Biome,
        ErrorBody,
        ErrorDetail,
    ))
)]
pub struct ApiDoc;
