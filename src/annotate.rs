//src/annotate.rs

use std::io::{BufRead, Write};

use crate::annotations::AnnotationTable;
use crate::error::{HitAnnotError, Result};
use crate::fileio::{read_tsv_line, write_tsv_row};
use crate::types::{HitRecord, HIT_COLUMNS, HIT_PREFIX_WIDTH};

/// Per-stream counts gathered while joining.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JoinStats {
    pub rows_written: u64,
    pub classified: u64,
    pub unclassified: u64,
}

/// Output header: the fixed hit columns followed by the custom annotation columns.
pub fn output_header(table: &AnnotationTable) -> Vec<&str> {
    let mut header: Vec<&str> = HIT_COLUMNS.to_vec();
    header.extend(table.custom_columns.iter().map(String::as_str));
    header
}

/// Join one hit with its annotation. Every returned row is exactly
/// `HIT_PREFIX_WIDTH + table.custom_columns.len()` fields wide.
pub fn annotate_hit<'a>(
    hit: &'a HitRecord,
    table: &'a AnnotationTable,
    line_no: usize,
) -> Result<Vec<&'a str>> {
    let width = HIT_PREFIX_WIDTH + table.custom_columns.len();
    let mut row: Vec<&str> = Vec::with_capacity(width);
    row.extend_from_slice(&hit.prefix_fields());

    if hit.is_unclassified() {
        row.resize(width, "");
        return Ok(row);
    }

    if hit.width <= 5 {
        return Err(HitAnnotError::MalformedHit {
            line: line_no,
            reason: format!("classified hit has {} columns, no sequence_ids_lca", hit.width),
        });
    }

    let key = hit.lookup_key();
    let values = table
        .get(key)
        .ok_or_else(|| HitAnnotError::MissingAnnotation {
            key: key.to_string(),
            line: line_no,
        })?;
    row.extend(values.iter().map(String::as_str));
    // rows in the table are padded to the header at load time
    row.resize(width, "");
    Ok(row)
}

/// Stream hits from `input`, writing one annotated row per hit to `out`.
///
/// Fails on the first classified hit without an annotation; rows already
/// written stay in `out`.
pub fn annotate_hits_stream<W: Write>(
    input: &mut dyn BufRead,
    table: &AnnotationTable,
    out: &mut W,
    write_header: bool,
) -> Result<JoinStats> {
    let mut stats = JoinStats::default();

    if write_header {
        write_tsv_row(out, &output_header(table))?;
    }

    let mut line = String::new();
    let mut line_no = 0usize;
    while read_tsv_line(input, &mut line)? {
        line_no += 1;
        if line.is_empty() {
            continue;
        }

        let fields: Vec<&str> = line.split('\t').collect();
        let hit = HitRecord::from_fields(&fields).ok_or_else(|| HitAnnotError::MalformedHit {
            line: line_no,
            reason: format!(
                "{} columns, at most {} expected",
                fields.len(),
                HIT_PREFIX_WIDTH
            ),
        })?;

        let row = annotate_hit(&hit, table, line_no)?;
        write_tsv_row(out, &row)?;

        if hit.is_unclassified() {
            stats.unclassified += 1;
        } else {
            stats.classified += 1;
        }
        stats.rows_written += 1;
    }

    Ok(stats)
}
