//! Entities and response records for the protein database.
//!
//! Free-text columns with a closed value set (`partial`, `public`, `caller`,
//! `strand`) are parsed into enums when a row leaves the store; an unknown
//! value fails the request instead of reaching the client.

use crate::error::AppError;
use serde::Serialize;
use std::str::FromStr;
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, sqlx::FromRow, ToSchema)]
pub struct Protein {
    pub id: i64,
    pub digest: String,
    pub sequence: String,
    pub private: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, sqlx::FromRow, ToSchema)]
pub struct Contig {
    pub id: i64,
    pub kmer_coverage: Option<i32>,
    pub length: Option<i32>,
    pub contig_name: Option<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, sqlx::FromRow, ToSchema)]
pub struct Assembly {
    pub id: i64,
    pub accession: String,
    pub pipeline_version: Option<i32>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, sqlx::FromRow, ToSchema)]
pub struct Study {
    pub id: i64,
    pub accession: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, sqlx::FromRow, ToSchema)]
pub struct Biome {
    pub lineage: String,
}

/// Whether a predicted protein is complete or truncated at a contig edge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Partial {
    Partial,
    Full,
}

impl FromStr for Partial {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "partial" => Ok(Partial::Partial),
            "full" => Ok(Partial::Full),
            _ => Err(invalid("partial", s)),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Private,
}

impl Visibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Private => "private",
        }
    }
}

impl FromStr for Visibility {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "public" => Ok(Visibility::Public),
            "private" => Ok(Visibility::Private),
            _ => Err(invalid("public", s)),
        }
    }
}

/// Gene caller that predicted the protein.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, ToSchema)]
pub enum Caller {
    #[serde(rename = "Prodigal_2.6.3")]
    Prodigal263,
    #[serde(rename = "fgs_1.31")]
    Fgs131,
    #[serde(rename = "fgs_1.20")]
    Fgs120,
}

impl FromStr for Caller {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Prodigal_2.6.3" => Ok(Caller::Prodigal263),
            "fgs_1.31" => Ok(Caller::Fgs131),
            "fgs_1.20" => Ok(Caller::Fgs120),
            _ => Err(invalid("caller", s)),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, ToSchema)]
pub enum Strand {
    #[serde(rename = "+1")]
    Forward,
    #[serde(rename = "-1")]
    Reverse,
}

impl FromStr for Strand {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "1" | "+1" | "+" => Ok(Strand::Forward),
            "-1" | "-" => Ok(Strand::Reverse),
            _ => Err(invalid("strand", s)),
        }
    }
}

fn invalid(column: &'static str, value: &str) -> AppError {
    AppError::InvalidStoredValue {
        column,
        value: value.to_string(),
    }
}

fn required<T: FromStr<Err = AppError>>(column: &'static str, raw: Option<String>) -> Result<T, AppError> {
    raw.as_deref().ok_or_else(|| invalid(column, "NULL"))?.parse()
}

fn optional<T: FromStr<Err = AppError>>(raw: Option<String>) -> Result<Option<T>, AppError> {
    raw.as_deref().map(|s| s.parse::<T>()).transpose()
}

/// One metadata row joined with its protein, contig and assembly.
/// Contig and assembly columns are NULL when the foreign key is NULL.
#[derive(Clone, Debug, sqlx::FromRow)]
pub struct MetadataRow {
    pub id: i64,
    pub partial: Option<String>,
    pub public: Option<String>,
    pub caller: Option<String>,
    pub start_protein: Option<i32>,
    pub end_protein: Option<i32>,
    pub strand: Option<String>,
    pub protein_id: i64,
    pub protein_digest: String,
    pub protein_sequence: String,
    pub protein_private: bool,
    pub contig_id: Option<i64>,
    pub contig_kmer_coverage: Option<i32>,
    pub contig_length: Option<i32>,
    pub contig_name: Option<String>,
    pub assembly_id: Option<i64>,
    pub assembly_accession: Option<String>,
    pub assembly_pipeline_version: Option<i32>,
}

/// Metadata as served: nested records use the same shapes as their own endpoints.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ToSchema)]
pub struct ProteinMetadataRecord {
    pub id: i64,
    pub protein: Protein,
    pub caller: Caller,
    pub start_protein: Option<i32>,
    pub end_protein: Option<i32>,
    pub strand: Strand,
    pub contig: Option<Contig>,
    pub assembly: Option<Assembly>,
    #[serde(skip)]
    pub partial: Option<Partial>,
    #[serde(skip)]
    pub public: Option<Visibility>,
}

impl TryFrom<MetadataRow> for ProteinMetadataRecord {
    type Error = AppError;

    fn try_from(row: MetadataRow) -> Result<Self, Self::Error> {
        if let (Some(start), Some(end)) = (row.start_protein, row.end_protein) {
            if start > end {
                tracing::warn!(metadata_id = row.id, start, end, "protein coordinates are reversed");
            }
        }
        let contig = row.contig_id.map(|id| Contig {
            id,
            kmer_coverage: row.contig_kmer_coverage,
            length: row.contig_length,
            contig_name: row.contig_name,
        });
        let assembly = match (row.assembly_id, row.assembly_accession) {
            (Some(id), Some(accession)) => Some(Assembly {
                id,
                accession,
                pipeline_version: row.assembly_pipeline_version,
            }),
            _ => None,
        };
        Ok(ProteinMetadataRecord {
            id: row.id,
            protein: Protein {
                id: row.protein_id,
                digest: row.protein_digest,
                sequence: row.protein_sequence,
                private: row.protein_private,
            },
            caller: required("caller", row.caller)?,
            start_protein: row.start_protein,
            end_protein: row.end_protein,
            strand: required("strand", row.strand)?,
            contig,
            assembly,
            partial: optional(row.partial)?,
            public: optional(row.public)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn row() -> MetadataRow {
        MetadataRow {
            id: 1,
            partial: Some("full".into()),
            public: Some("public".into()),
            caller: Some("Prodigal_2.6.3".into()),
            start_protein: Some(10),
            end_protein: Some(300),
            strand: Some("-1".into()),
            protein_id: 42,
            protein_digest: "d41d8cd9".into(),
            protein_sequence: "MKV".into(),
            protein_private: false,
            contig_id: Some(7),
            contig_kmer_coverage: Some(12),
            contig_length: Some(1500),
            contig_name: Some("NODE_1".into()),
            assembly_id: Some(3),
            assembly_accession: Some("ERZ001".into()),
            assembly_pipeline_version: Some(5),
        }
    }

    #[rstest]
    #[case("1", Strand::Forward)]
    #[case("+1", Strand::Forward)]
    #[case("+", Strand::Forward)]
    #[case("-1", Strand::Reverse)]
    #[case("-", Strand::Reverse)]
    fn strand_accepts_stored_spellings(#[case] raw: &str, #[case] expected: Strand) {
        assert_eq!(raw.parse::<Strand>().unwrap(), expected);
    }

    #[rstest]
    #[case("Prodigal_2.6.3", Caller::Prodigal263)]
    #[case("fgs_1.31", Caller::Fgs131)]
    #[case("fgs_1.20", Caller::Fgs120)]
    fn caller_round_trips_through_json(#[case] raw: &str, #[case] expected: Caller) {
        let caller: Caller = raw.parse().unwrap();
        assert_eq!(caller, expected);
        assert_eq!(serde_json::to_value(caller).unwrap(), serde_json::json!(raw));
    }

    #[test]
    fn unknown_enum_text_is_a_data_error() {
        let err = "glimmer".parse::<Caller>().unwrap_err();
        assert!(matches!(err, AppError::InvalidStoredValue { column: "caller", .. }));
        assert!("both".parse::<Partial>().is_err());
        assert!("PUBLIC".parse::<Visibility>().is_err());
        assert!("0".parse::<Strand>().is_err());
    }

    #[test]
    fn metadata_row_nests_contig_and_assembly() {
        let record = ProteinMetadataRecord::try_from(row()).unwrap();
        assert_eq!(record.protein.id, 42);
        assert_eq!(record.caller, Caller::Prodigal263);
        assert_eq!(record.strand, Strand::Reverse);
        assert_eq!(record.partial, Some(Partial::Full));
        assert_eq!(record.public, Some(Visibility::Public));
        let contig = record.contig.clone().unwrap();
        assert_eq!((contig.id, contig.kmer_coverage, contig.length), (7, Some(12), Some(1500)));
        assert_eq!(record.assembly.clone().unwrap().accession, "ERZ001");

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["strand"], "-1");
        assert_eq!(json["contig"]["length"], 1500);
        assert_eq!(json["assembly"]["pipeline_version"], 5);
        assert!(json.get("partial").is_none());
        assert!(json.get("public").is_none());
    }

    #[test]
    fn null_foreign_keys_leave_nested_records_empty() {
        let mut r = row();
        r.contig_id = None;
        r.assembly_id = None;
        r.assembly_accession = None;
        let record = ProteinMetadataRecord::try_from(r).unwrap();
        assert!(record.contig.is_none());
        assert!(record.assembly.is_none());
    }

    #[test]
    fn missing_caller_is_rejected() {
        let mut r = row();
        r.caller = None;
        let err = ProteinMetadataRecord::try_from(r).unwrap_err();
        assert!(matches!(err, AppError::InvalidStoredValue { column: "caller", .. }));
    }

    #[test]
    fn reversed_coordinates_are_passed_through() {
        let mut r = row();
        r.start_protein = Some(500);
        r.end_protein = Some(100);
        let record = ProteinMetadataRecord::try_from(r).unwrap();
        assert_eq!((record.start_protein, record.end_protein), (Some(500), Some(100)));
    }
}
