//src/mpa.rs

use crate::types::{Lineage, Rank};

/// Separates segments in an MPA classification string.
pub const SEGMENT_SEPARATOR: char = '|';

/// Separates the rank code from the taxon name inside a segment.
pub const CODE_SEPARATOR: &str = "__";

/// Prefix of synthesized names for ranks the classifier left empty.
pub const PLACEHOLDER_PREFIX: &str = "unclassified_";

/// Parses a classification string such as
/// ```text
/// k__Bacteria|p__Proteobacteria|s__Escherichia_coli
/// ```
/// into a `Lineage`. A `None` (null field) or empty string yields an empty lineage.
///
/// Segments without `__` or with an unknown rank code are skipped.
/// A repeated rank code keeps the last value.
pub fn parse_classification(raw: Option<&str>) -> Lineage {
    let mut lineage = Lineage::new();
    let raw = match raw {
        Some(s) if !s.is_empty() => s,
        _ => return lineage,
    };

    for segment in raw.split(SEGMENT_SEPARATOR) {
        let Some((code, name)) = segment.split_once(CODE_SEPARATOR) else {
            log::trace!("ignoring segment without rank code: {segment:?}");
            continue;
        };
        match Rank::from_code(code) {
            Some(rank) => lineage.set(rank, name),
            None => log::trace!("ignoring segment with unknown rank code: {segment:?}"),
        }
    }
    lineage
}

/// Gives every empty rank a placeholder, walking ranks from Kingdom down.
///
/// The placeholder is `unclassified_<name>` where `<name>` is the closest
/// real name above it. Before any real name has been seen it falls back to
/// the rank's own code (`unclassified_k`, `unclassified_p`, ...).
/// Placeholders are never used as the ancestor of a later placeholder.
///
/// Returns the number of placeholders inserted.
pub fn fill_missing_ranks(lineage: &mut Lineage) -> usize {
    let mut last_known: Option<String> = None;
    let mut filled = 0;

    for rank in Rank::ALL {
        let name = lineage.get(rank);
        if !name.is_empty() {
            last_known = Some(name.to_string());
            continue;
        }
        let anchor = last_known.as_deref().unwrap_or(rank.code());
        lineage.set(rank, format!("{PLACEHOLDER_PREFIX}{anchor}"));
        filled += 1;
    }
    filled
}

/// Serializes the non-empty ranks of `lineage` in canonical order.
pub fn rebuild_classification(lineage: &Lineage) -> String {
    let mut out = String::new();
    for (rank, name) in lineage.iter().filter(|(_, name)| !name.is_empty()) {
        if !out.is_empty() {
            out.push(SEGMENT_SEPARATOR);
        }
        out.push_str(rank.code());
        out.push_str(CODE_SEPARATOR);
        out.push_str(name);
    }
    out
}

/// Parse, fill and rebuild in one step.
pub fn normalize_classification(raw: Option<&str>) -> String {
    let mut lineage = parse_classification(raw);
    fill_missing_ranks(&mut lineage);
    rebuild_classification(&lineage)
}
