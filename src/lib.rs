// src/lib.rs
pub mod error;
pub mod mpa;
pub mod table;
pub mod types;

use std::io::Write;
use std::path::Path;

pub use crate::error::TaxfixError;
pub use crate::mpa::normalize_classification;
pub use crate::table::{NormalizeSummary, TableConfig};
pub use crate::types::{Lineage, Rank};

use crate::table::{normalize_records, open_table};

/// Normalize the MPA table at `path` (plain or `.gz`) and write it to `output`.
///
/// Every row's classification column is rewritten so that all seven ranks
/// are present; everything else is passed through in order.
pub fn normalize_file<P, W, F>(
    path: P,
    output: W,
    config: &TableConfig,
    on_row: F,
) -> Result<NormalizeSummary, TaxfixError>
where
    P: AsRef<Path>,
    W: Write,
    F: FnMut(u64),
{
    let path = path.as_ref();
    let reader = open_table(path)?;
    let summary = normalize_records(reader, output, config, on_row)?;

    log::info!(
        "{}: {} row(s), {} with missing ranks, {} placeholder(s) inserted, {} left unchanged",
        path.display(),
        summary.rows,
        summary.rows_with_gaps,
        summary.placeholders,
        summary.rows_skipped
    );
    Ok(summary)
}
