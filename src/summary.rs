//src/summary.rs

use ahash::AHashMap;
use std::fmt::Write as FmtWrite;
use std::io::BufRead;
use std::path::Path;

use crate::error::{HitAnnotError, Result};
use crate::fileio::read_tsv_line;
use crate::types::{AnnotatedHit, Category, TaxonomyLevel, LINEAGE_PLACEHOLDER};

/// Function-annotation columns a standard annotated hits file must carry.
pub const FUNCTION_COLUMNS: [&str; 6] = [
    "prokka_gene",
    "prokka_EC_number",
    "prokka_product",
    "swissprot_gene",
    "swissprot_EC_number",
    "swissprot_product",
];

/// Written in place of a report when the function columns are absent.
pub const CUSTOM_SCHEMA_MESSAGE: &str =
    "custom databases without the expected columns are not supported in the summary function";

/// Column positions resolved once from the header.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryColumns {
    pub status: usize,
    pub taxonomic_lineage: usize,
    /// In `FUNCTION_COLUMNS` order
    pub function: [usize; 6],
}

impl SummaryColumns {
    /// Borrow the fields of one data row. Missing trailing fields read as empty.
    pub fn record<'a>(&self, fields: &[&'a str]) -> AnnotatedHit<'a> {
        let get = |i: usize| fields.get(i).copied().unwrap_or("");
        AnnotatedHit {
            status: get(self.status),
            taxonomic_lineage: get(self.taxonomic_lineage),
            prokka_gene: get(self.function[0]),
            prokka_ec_number: get(self.function[1]),
            prokka_product: get(self.function[2]),
            swissprot_gene: get(self.function[3]),
            swissprot_ec_number: get(self.function[4]),
            swissprot_product: get(self.function[5]),
        }
    }
}

/// Result of checking an annotated hits header.
#[derive(Debug, Clone, PartialEq)]
pub enum SchemaCheck {
    Standard(SummaryColumns),
    /// Built from a custom database without the standard function columns
    Custom,
}

/// Resolve the summary columns from a header line.
pub fn check_schema(header: &[&str], path: &Path) -> Result<SchemaCheck> {
    let position = |name: &str| header.iter().position(|h| h.trim() == name);
    let required = |name: &str| {
        position(name).ok_or_else(|| HitAnnotError::MissingColumn {
            column: name.to_string(),
            path: path.to_path_buf(),
        })
    };

    let status = required("status")?;
    let taxonomic_lineage = required("taxonomic_lineage")?;

    let mut function = [0usize; 6];
    for (slot, name) in function.iter_mut().zip(FUNCTION_COLUMNS) {
        match position(name) {
            Some(idx) => *slot = idx,
            None => return Ok(SchemaCheck::Custom),
        }
    }

    Ok(SchemaCheck::Standard(SummaryColumns {
        status,
        taxonomic_lineage,
        function,
    }))
}

/// Counters keyed by category. Every category is present from the start.
#[derive(Debug, Clone)]
pub struct SummaryCounts {
    counts: AHashMap<Category, u64>,
}

impl Default for SummaryCounts {
    fn default() -> Self {
        Self {
            counts: Category::ALL.iter().map(|&c| (c, 0)).collect(),
        }
    }
}

impl PartialEq for SummaryCounts {
    fn eq(&self, other: &Self) -> bool {
        Category::ALL.iter().all(|&c| self.get(c) == other.get(c))
    }
}

impl SummaryCounts {
    pub fn get(&self, category: Category) -> u64 {
        self.counts.get(&category).copied().unwrap_or(0)
    }

    pub fn increment(&mut self, category: Category) {
        *self.counts.entry(category).or_insert(0) += 1;
    }

    /// Apply the counting rules for one row. Unclassified rows count nothing.
    pub fn observe(&mut self, hit: &AnnotatedHit<'_>) {
        if hit.is_unclassified() {
            return;
        }

        // 7-column hits carry no lineage at all
        if !hit.taxonomic_lineage.is_empty() {
            for (assignment, level) in hit.taxonomic_lineage.split(';').zip(TaxonomyLevel::ALL) {
                if assignment.trim() == LINEAGE_PLACEHOLDER {
                    continue;
                }
                self.increment(Category::Level(level));
            }
        }

        if hit.has_function() {
            self.increment(Category::Function);
            if !hit.is_hypothetical() {
                self.increment(Category::NonHypothetical);
            }
        }

        if hit.has_ec_number() {
            self.increment(Category::Ec);
        }
    }
}

/// Counts for one annotated hits file.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryReport {
    /// All data rows, unclassified included
    pub total_sequences: u64,
    pub counts: SummaryCounts,
}

impl SummaryReport {
    /// Percentage of all sequences in `category`.
    pub fn percent(&self, category: Category) -> f64 {
        100.0 * self.counts.get(category) as f64 / self.total_sequences as f64
    }

    /// Generate the text report on demand
    pub fn render(&self) -> String {
        let mut output = String::new();
        let _ = writeln!(output, "Sequences: {}", self.total_sequences);

        output.push_str("Taxonomy assignments\n");
        for level in TaxonomyLevel::ALL {
            self.render_line(&mut output, Category::Level(level));
        }

        output.push_str("Functional assignments\n");
        for category in [Category::Function, Category::NonHypothetical, Category::Ec] {
            self.render_line(&mut output, category);
        }
        output
    }

    fn render_line(&self, output: &mut String, category: Category) {
        let _ = writeln!(
            output,
            " {}: {} ({:.2}%)",
            category.label(),
            self.counts.get(category),
            self.percent(category)
        );
    }
}

/// What a summary run produced.
#[derive(Debug, Clone, PartialEq)]
pub enum SummaryOutcome {
    Standard(SummaryReport),
    /// Input came from a custom database; no counts were taken
    CustomSchema,
}

impl SummaryOutcome {
    /// Text written to the summary file.
    pub fn render(&self) -> String {
        match self {
            SummaryOutcome::Standard(report) => report.render(),
            SummaryOutcome::CustomSchema => format!("{CUSTOM_SCHEMA_MESSAGE}\n"),
        }
    }
}

/// Count categories over an annotated hits stream whose first line is the header.
/// `path` is only used in error messages.
pub fn summarize_stream(input: &mut dyn BufRead, path: &Path) -> Result<SummaryOutcome> {
    let mut line = String::new();
    if !read_tsv_line(input, &mut line)? {
        return Err(HitAnnotError::EmptyInput(path.to_path_buf()));
    }

    let header: Vec<&str> = line.split('\t').collect();
    let columns = match check_schema(&header, path)? {
        SchemaCheck::Standard(columns) => columns,
        SchemaCheck::Custom => {
            log::warn!(
                "{} lacks the standard function columns, skipping summary",
                path.display()
            );
            return Ok(SummaryOutcome::CustomSchema);
        }
    };

    let mut counts = SummaryCounts::default();
    let mut total_sequences = 0u64;

    while read_tsv_line(input, &mut line)? {
        if line.is_empty() {
            continue;
        }
        let fields: Vec<&str> = line.split('\t').collect();
        counts.observe(&columns.record(&fields));
        total_sequences += 1;
    }

    if total_sequences == 0 {
        return Err(HitAnnotError::EmptyInput(path.to_path_buf()));
    }

    log::info!("Summarized {} sequences from {}", total_sequences, path.display());
    Ok(SummaryOutcome::Standard(SummaryReport {
        total_sequences,
        counts,
    }))
}
