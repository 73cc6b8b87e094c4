//! Tab-separated corpus importer.
//!
//! One entry per line:
//!
//! ```text
//! text<TAB>romanization<TAB>frequency[<TAB>category]
//! ```
//!
//! Blank lines and lines starting with `#` are skipped. The category
//! defaults to `word`. Malformed lines are logged and counted, never fatal.

use crate::StoreWriter;
use libthai_core::{Category, CorpusEntry, StoreError};
use serde::Serialize;
use std::io::BufRead;

/// Outcome of an import run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    pub inserted: usize,
    /// Well-formed lines the store rejected (already present or no phonetic code)
    pub duplicates: usize,
    pub malformed: usize,
}

/// Parse one non-comment line.
pub fn parse_line(line: &str) -> Result<CorpusEntry, String> {
    let fields: Vec<&str> = line.split('\t').map(str::trim).collect();
    if !(3..=4).contains(&fields.len()) {
        return Err(format!("expected 3 or 4 fields, found {}", fields.len()));
    }
    let (text, romanization) = (fields[0], fields[1]);
    if text.is_empty() || romanization.is_empty() {
        return Err("empty text or romanization".to_string());
    }
    let frequency: u64 = fields[2]
        .parse()
        .map_err(|e| format!("bad frequency '{}': {}", fields[2], e))?;
    let category = match fields.get(3) {
        Some(raw) if !raw.is_empty() => raw.parse::<Category>()?,
        _ => Category::Word,
    };
    Ok(CorpusEntry::new(text, romanization, frequency, category))
}

/// Read every entry from `reader` into `store`.
///
/// Entries are parsed up front and handed to the store in one batch.
pub fn import_tsv<R: BufRead, W: StoreWriter + ?Sized>(
    reader: R,
    store: &mut W,
) -> Result<ImportReport, StoreError> {
    let mut report = ImportReport::default();
    let mut entries = Vec::new();
    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        match parse_line(&line) {
            Ok(entry) => entries.push(entry),
            Err(reason) => {
                tracing::warn!(line = lineno + 1, %reason, "skipping malformed import line");
                report.malformed += 1;
            }
        }
    }

    let parsed = entries.len();
    report.inserted = store.insert_entries(entries)?;
    report.duplicates = parsed - report.inserted;
    tracing::debug!(?report, "import finished");
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use libthai_core::MemoryStore;

    #[test]
    fn parses_optional_category() {
        let e = parse_line("ไทย\tthai\t900000\tcountry").unwrap();
        assert_eq!(e.category, Category::Country);
        let e = parse_line("คน\tkon\t5").unwrap();
        assert_eq!(e.category, Category::Word);
        assert_eq!(e.frequency, 5);
    }

    #[test]
    fn rejects_bad_lines() {
        assert!(parse_line("คน\tkon").is_err());
        assert!(parse_line("คน\tkon\tmany").is_err());
        assert!(parse_line("คน\tkon\t1\tplanet").is_err());
        assert!(parse_line("\tkon\t1").is_err());
        assert!(parse_line("a\tb\t1\tword\textra").is_err());
    }

    #[test]
    fn import_counts() {
        let tsv = "# comment\n\nคน\tkon\t10\nคน\tkon\t20\nbroken line\nรัก\trak\t7\tword\n";
        let mut store = MemoryStore::new();
        let report = import_tsv(tsv.as_bytes(), &mut store).unwrap();
        assert_eq!(
            report,
            ImportReport {
                inserted: 2,
                duplicates: 1,
                malformed: 1
            }
        );
        assert_eq!(store.len(), 2);
    }
}
