//src/types.rs

use std::fmt;

/// Status flag marking an unclassified hit row.
pub const UNCLASSIFIED: &str = "U";

/// Literal used by the classifier for an unassigned lineage level.
pub const LINEAGE_PLACEHOLDER: &str = "NA";

/// The fixed leading columns of every annotated hits row.
pub const HIT_COLUMNS: [&str; 8] = [
    "status",
    "sequence_id",
    "taxonomy_id",
    "length",
    "taxonomy_ids_lca",
    "sequence_ids_lca",
    "protein_sequence",
    "taxonomic_lineage",
];

/// Width of the fixed hit prefix in the annotated output.
pub const HIT_PREFIX_WIDTH: usize = HIT_COLUMNS.len();

/// How input paths are opened.
///
/// `Remote` inputs are staged compressed by the pipeline, so they always go
/// through gzip; `Local` inputs are only decompressed when the path ends in `.gz`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AccessMode {
    Local,
    #[default]
    Remote,
}

impl AccessMode {
    /// Whether a file at `path` should be read through a gzip decoder.
    pub fn is_gzip(&self, path: &str) -> bool {
        match self {
            AccessMode::Remote => true,
            AccessMode::Local => path.ends_with(".gz"),
        }
    }
}

/// A structured representation of one classifier hit row.
///
/// The older 7-column format has no lineage column; missing trailing fields
/// are kept as empty strings so every record renders to the full prefix width.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HitRecord {
    pub status: String,
    pub sequence_id: String,
    pub taxonomy_id: String,
    pub length: String,
    pub taxonomy_ids_lca: String,
    pub sequence_ids_lca: String,
    pub protein_sequence: String,
    pub taxonomic_lineage: String,
    /// Number of columns present in the input line.
    pub width: usize,
}

impl HitRecord {
    /// Parse a tab-separated hit line. Returns `None` if it has more columns
    /// than the fixed prefix.
    pub fn from_fields(fields: &[&str]) -> Option<Self> {
        if fields.len() > HIT_PREFIX_WIDTH {
            return None;
        }
        let get = |i: usize| fields.get(i).map(|s| s.to_string()).unwrap_or_default();
        Some(HitRecord {
            status: get(0),
            sequence_id: get(1),
            taxonomy_id: get(2),
            length: get(3),
            taxonomy_ids_lca: get(4),
            sequence_ids_lca: get(5),
            protein_sequence: get(6),
            taxonomic_lineage: get(7),
            width: fields.len(),
        })
    }

    pub fn is_unclassified(&self) -> bool {
        self.status == UNCLASSIFIED
    }

    /// The annotation key carried by this hit: the first id in the
    /// comma-separated `sequence_ids_lca` list.
    pub fn lookup_key(&self) -> &str {
        self.sequence_ids_lca
            .split(',')
            .next()
            .unwrap_or_default()
    }

    /// The fixed prefix fields in output order.
    pub fn prefix_fields(&self) -> [&str; HIT_PREFIX_WIDTH] {
        [
            &self.status,
            &self.sequence_id,
            &self.taxonomy_id,
            &self.length,
            &self.taxonomy_ids_lca,
            &self.sequence_ids_lca,
            &self.protein_sequence,
            &self.taxonomic_lineage,
        ]
    }
}

/// The fields of an annotated hit row that the summary reads.
#[derive(Debug, Clone, Default)]
pub struct AnnotatedHit<'a> {
    pub status: &'a str,
    pub taxonomic_lineage: &'a str,
    pub prokka_gene: &'a str,
    pub prokka_ec_number: &'a str,
    pub prokka_product: &'a str,
    pub swissprot_gene: &'a str,
    pub swissprot_ec_number: &'a str,
    pub swissprot_product: &'a str,
}

impl<'a> AnnotatedHit<'a> {
    pub fn is_unclassified(&self) -> bool {
        self.status == UNCLASSIFIED
    }

    pub fn function_fields(&self) -> [&'a str; 6] {
        [
            self.prokka_gene,
            self.prokka_ec_number,
            self.prokka_product,
            self.swissprot_gene,
            self.swissprot_ec_number,
            self.swissprot_product,
        ]
    }

    pub fn has_function(&self) -> bool {
        self.function_fields().iter().any(|f| !f.is_empty())
    }

    pub fn is_hypothetical(&self) -> bool {
        self.function_fields()
            .iter()
            .any(|f| f.contains("hypothetical"))
    }

    pub fn has_ec_number(&self) -> bool {
        !self.prokka_ec_number.is_empty() || !self.swissprot_ec_number.is_empty()
    }
}

/// Taxonomy levels in lineage order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TaxonomyLevel {
    Superkingdom,
    Phylum,
    Class,
    Order,
    Family,
    Genus,
    Species,
}

impl TaxonomyLevel {
    pub const ALL: [TaxonomyLevel; 7] = [
        TaxonomyLevel::Superkingdom,
        TaxonomyLevel::Phylum,
        TaxonomyLevel::Class,
        TaxonomyLevel::Order,
        TaxonomyLevel::Family,
        TaxonomyLevel::Genus,
        TaxonomyLevel::Species,
    ];
}

/// A summary counter category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Level(TaxonomyLevel),
    Function,
    NonHypothetical,
    Ec,
}

impl Category {
    pub const ALL: [Category; 10] = [
        Category::Level(TaxonomyLevel::Superkingdom),
        Category::Level(TaxonomyLevel::Phylum),
        Category::Level(TaxonomyLevel::Class),
        Category::Level(TaxonomyLevel::Order),
        Category::Level(TaxonomyLevel::Family),
        Category::Level(TaxonomyLevel::Genus),
        Category::Level(TaxonomyLevel::Species),
        Category::Function,
        Category::NonHypothetical,
        Category::Ec,
    ];

    /// Counter key, e.g. `superkingdom` or `nonhypothetical`.
    pub fn name(&self) -> &'static str {
        match self {
            Category::Level(TaxonomyLevel::Superkingdom) => "superkingdom",
            Category::Level(TaxonomyLevel::Phylum) => "phylum",
            Category::Level(TaxonomyLevel::Class) => "class",
            Category::Level(TaxonomyLevel::Order) => "order",
            Category::Level(TaxonomyLevel::Family) => "family",
            Category::Level(TaxonomyLevel::Genus) => "genus",
            Category::Level(TaxonomyLevel::Species) => "species",
            Category::Function => "function",
            Category::NonHypothetical => "nonhypothetical",
            Category::Ec => "ec",
        }
    }

    /// Label used in the text report.
    pub fn label(&self) -> &'static str {
        match self {
            Category::Level(TaxonomyLevel::Superkingdom) => "Superkingdom",
            Category::Level(TaxonomyLevel::Phylum) => "Phylum",
            Category::Level(TaxonomyLevel::Class) => "Class",
            Category::Level(TaxonomyLevel::Order) => "Order",
            Category::Level(TaxonomyLevel::Family) => "Family",
            Category::Level(TaxonomyLevel::Genus) => "Genus",
            Category::Level(TaxonomyLevel::Species) => "Species",
            Category::Function => "Function",
            Category::NonHypothetical => "Non-hypothetical",
            Category::Ec => "EC",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
