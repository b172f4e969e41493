//src/annotations.rs

use ahash::AHashMap;
use std::path::Path;

use crate::error::{HitAnnotError, Result};
use crate::fileio::{open_reader, read_tsv_line};
use crate::types::AccessMode;

/// Number of fixed metadata columns at the start of an annotation table.
/// Everything after them is passed through as custom columns.
pub const ANNOTATION_PREFIX_WIDTH: usize = 7;

/// Maps `contig_id;start;stop` -> custom column values.
pub type AnnotationMap = AHashMap<String, Vec<String>>;

/// An annotation lookup table loaded into memory.
#[derive(Debug, Clone, Default)]
pub struct AnnotationTable {
    /// Names of the columns beyond the fixed prefix, in file order
    pub custom_columns: Vec<String>,
    pub rows: AnnotationMap,
}

impl AnnotationTable {
    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.rows.get(key).map(|v| v.as_slice())
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Build the composite lookup key for one annotated region.
pub fn annotation_key(contig_id: &str, start: &str, stop: &str) -> String {
    format!("{contig_id};{start};{stop}")
}

/// Parses an annotation table in the format:
/// ```text
/// contig_id<TAB>start<TAB>stop<TAB>...4 more fixed...<TAB>custom_1<TAB>custom_2...
/// ```
/// The header must carry `contig_id`, `start` and `stop` and be at least
/// `ANNOTATION_PREFIX_WIDTH` columns wide. Duplicate keys keep the last row.
pub fn parse_annotations<P: AsRef<Path>>(path: P, mode: AccessMode) -> Result<AnnotationTable> {
    let path = path.as_ref();
    let mut reader = open_reader(path, mode)?;
    let mut line = String::new();

    let malformed = |reason: String| HitAnnotError::MalformedHeader {
        path: path.to_path_buf(),
        reason,
    };

    if !read_tsv_line(&mut *reader, &mut line)? {
        return Err(malformed("file is empty".to_string()));
    }
    let header: Vec<String> = line.split('\t').map(|s| s.trim().to_string()).collect();
    if header.len() < ANNOTATION_PREFIX_WIDTH {
        return Err(malformed(format!(
            "expected at least {} columns, found {}",
            ANNOTATION_PREFIX_WIDTH,
            header.len()
        )));
    }

    let column = |name: &str| {
        header
            .iter()
            .position(|h| h == name)
            .ok_or_else(|| malformed(format!("missing column '{name}'")))
    };
    let contig_idx = column("contig_id")?;
    let start_idx = column("start")?;
    let stop_idx = column("stop")?;

    let custom_columns = header[ANNOTATION_PREFIX_WIDTH..].to_vec();
    let mut rows: AnnotationMap = AHashMap::new();
    let mut duplicates = 0usize;

    while read_tsv_line(&mut *reader, &mut line)? {
        if line.is_empty() {
            continue;
        }
        let parts: Vec<&str> = line.split('\t').collect();
        let field = |i: usize| parts.get(i).copied().unwrap_or("");

        let key = annotation_key(field(contig_idx), field(start_idx), field(stop_idx));
        let values: Vec<String> = (ANNOTATION_PREFIX_WIDTH..header.len())
            .map(|i| field(i).to_string())
            .collect();

        if rows.insert(key, values).is_some() {
            duplicates += 1;
        }
    }

    if duplicates > 0 {
        log::debug!(
            "{} duplicate annotation keys in {}, last row kept",
            duplicates,
            path.display()
        );
    }
    log::info!(
        "Loaded {} annotations with {} custom columns from {}",
        rows.len(),
        custom_columns.len(),
        path.display()
    );

    Ok(AnnotationTable {
        custom_columns,
        rows,
    })
}
