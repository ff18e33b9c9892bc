//src/table.rs

use std::fs::File;
use std::io::{BufReader, Read, Write};
use std::path::Path;

use csv::{ByteRecord, QuoteStyle, ReaderBuilder, Terminator, WriterBuilder};
use flate2::read::MultiGzDecoder;

use crate::error::TaxfixError;
use crate::mpa::{fill_missing_ranks, parse_classification, rebuild_classification};

/// Header of the classification column in a combined Kraken2 MPA table.
pub const DEFAULT_COLUMN: &str = "#Classification";

/// Where to find the classification string and how fields are separated.
#[derive(Debug, Clone)]
pub struct TableConfig {
    pub column: String,
    pub delimiter: u8,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            column: DEFAULT_COLUMN.to_string(),
            delimiter: b'\t',
        }
    }
}

/// Counters collected while rewriting a table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizeSummary {
    /// Data rows written (header excluded)
    pub rows: u64,
    /// Rows that needed at least one placeholder
    pub rows_with_gaps: u64,
    /// Placeholders inserted over all rows
    pub placeholders: u64,
    /// Rows copied unchanged because the classification was not UTF-8
    pub rows_skipped: u64,
}

/// Opens a table for reading; `.gz` files are decompressed on the fly.
pub fn open_table<P: AsRef<Path>>(path: P) -> Result<Box<dyn Read>, TaxfixError> {
    let path = path.as_ref();
    let f = File::open(path).map_err(|source| TaxfixError::Open {
        path: path.to_path_buf(),
        source,
    })?;

    let is_gz = path
        .extension()
        .map(|ext| ext == "gz")
        .unwrap_or(false);

    let reader: Box<dyn Read> = if is_gz {
        Box::new(MultiGzDecoder::new(BufReader::new(f)))
    } else {
        Box::new(BufReader::new(f))
    };
    Ok(reader)
}

/// Streams a delimited table from `input` to `output`, rewriting the
/// classification column of every data row into its seven-rank form.
///
/// The header row and every other field are copied byte-for-byte, in input
/// order. A row too short to reach the classification column is padded with
/// empty fields and gets the fully placeholder-filled lineage.
///
/// `on_row` is called with the running row count after each data row.
pub fn normalize_records<R, W, F>(
    input: R,
    output: W,
    config: &TableConfig,
    mut on_row: F,
) -> Result<NormalizeSummary, TaxfixError>
where
    R: Read,
    W: Write,
    F: FnMut(u64),
{
    let mut reader = ReaderBuilder::new()
        .delimiter(config.delimiter)
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .from_reader(input);
    let mut writer = WriterBuilder::new()
        .delimiter(config.delimiter)
        .has_headers(false)
        .flexible(true)
        .quote_style(QuoteStyle::Never)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(output);

    let mut records = reader.byte_records();
    let header = records.next().ok_or(TaxfixError::MissingHeader)??;
    let column = header
        .iter()
        .position(|field| field == config.column.as_bytes())
        .ok_or_else(|| TaxfixError::MissingColumn(config.column.clone()))?;
    writer.write_byte_record(&header)?;

    let mut summary = NormalizeSummary::default();
    let mut rewritten = ByteRecord::new();

    for record in records {
        let record = record?;
        let raw = match record.get(column).map(std::str::from_utf8).transpose() {
            Ok(raw) => raw,
            Err(err) => {
                log::warn!(
                    "row {}: classification is not valid UTF-8 ({err}), left unchanged",
                    summary.rows + 1
                );
                writer.write_byte_record(&record)?;
                summary.rows_skipped += 1;
                summary.rows += 1;
                on_row(summary.rows);
                continue;
            }
        };

        let mut lineage = parse_classification(raw);
        let filled = fill_missing_ranks(&mut lineage);
        let fixed = rebuild_classification(&lineage);

        if filled > 0 {
            summary.rows_with_gaps += 1;
            summary.placeholders += filled as u64;
            log::debug!(
                "row {}: filled {filled} rank(s) -> {fixed}",
                summary.rows + 1
            );
        }

        rewritten.clear();
        for (i, field) in record.iter().enumerate() {
            if i == column {
                rewritten.push_field(fixed.as_bytes());
            } else {
                rewritten.push_field(field);
            }
        }
        while rewritten.len() <= column {
            if rewritten.len() == column {
                rewritten.push_field(fixed.as_bytes());
            } else {
                rewritten.push_field(b"");
            }
        }
        writer.write_byte_record(&rewritten)?;

        summary.rows += 1;
        on_row(summary.rows);
    }

    writer.flush()?;
    Ok(summary)
}
