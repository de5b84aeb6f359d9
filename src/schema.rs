//! Table and relation descriptors for the protein database.
//!
//! The join graph is a DAG of many-to-one edges, each owned by the child table:
//!
//! ```text
//! protein <- protein_metadata -> contig -> assembly -> study
//!                      \________________/         \-> biomes
//! ```

/// A table with the alias it carries in generated queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Table {
    pub name: &'static str,
    pub alias: &'static str,
}

impl Table {
    pub const fn col(&self, name: &'static str) -> Column {
        Column { table: *self, name }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Column {
    pub table: Table,
    pub name: &'static str,
}

/// Foreign key edge: `child.fk` references `parent.pk`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Relation {
    pub child: Table,
    pub fk: &'static str,
    pub parent: Table,
    pub pk: &'static str,
}

impl Relation {
    /// The side of the edge that is not `known`, or None if `known` is not on this edge.
    pub fn other_side(&self, known: &Table) -> Option<Table> {
        if *known == self.child {
            Some(self.parent)
        } else if *known == self.parent {
            Some(self.child)
        } else {
            None
        }
    }
}

pub const PROTEIN: Table = Table { name: "protein", alias: "p" };
pub const PROTEIN_METADATA: Table = Table { name: "protein_metadata", alias: "pm" };
pub const CONTIG: Table = Table { name: "contig", alias: "c" };
pub const ASSEMBLY: Table = Table { name: "assembly", alias: "a" };
pub const STUDY: Table = Table { name: "study", alias: "s" };
pub const BIOME: Table = Table { name: "biomes", alias: "b" };

pub const METADATA_PROTEIN: Relation = Relation {
    child: PROTEIN_METADATA,
    fk: "mgyp_id",
    parent: PROTEIN,
    pk: "id",
};
pub const METADATA_CONTIG: Relation = Relation {
    child: PROTEIN_METADATA,
    fk: "mgyc_id",
    parent: CONTIG,
    pk: "id",
};
pub const METADATA_ASSEMBLY: Relation = Relation {
    child: PROTEIN_METADATA,
    fk: "assembly_id",
    parent: ASSEMBLY,
    pk: "id",
};
pub const CONTIG_ASSEMBLY: Relation = Relation {
    child: CONTIG,
    fk: "assembly_id",
    parent: ASSEMBLY,
    pk: "id",
};
pub const ASSEMBLY_STUDY: Relation = Relation {
    child: ASSEMBLY,
    fk: "study_id",
    parent: STUDY,
    pk: "id",
};
pub const ASSEMBLY_BIOME: Relation = Relation {
    child: ASSEMBLY,
    fk: "biome_id",
    parent: BIOME,
    pk: "id",
};

pub const RELATIONS: &[Relation] = &[
    METADATA_PROTEIN,
    METADATA_CONTIG,
    METADATA_ASSEMBLY,
    CONTIG_ASSEMBLY,
    ASSEMBLY_STUDY,
    ASSEMBLY_BIOME,
];
