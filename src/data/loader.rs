use std::thread;

use csv::{ReaderBuilder, StringRecord};

use crate::config::SourceSpec;
use crate::error::{DirectoryError, Result};

// ---------------------------------------------------------------------------
// RawTable – one parsed CSV source, before normalization
// ---------------------------------------------------------------------------

/// A parsed CSV source: the header row and data rows padded or truncated to
/// the header's width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTable {
    pub source_name: String,
    pub header: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Read every source concurrently, one scoped worker per source, and wait for
/// all of them. Fails with the first error in source order; a partial set of
/// tables is never returned.
pub fn load_sources(sources: &[SourceSpec]) -> Result<Vec<RawTable>> {
    let results: Vec<Result<RawTable>> = thread::scope(|scope| {
        let handles: Vec<_> = sources
            .iter()
            .map(|src| (src, scope.spawn(move || load_source(src))))
            .collect();

        handles
            .into_iter()
            .map(|(src, handle)| {
                handle.join().unwrap_or_else(|_| {
                    Err(DirectoryError::load(src.display_name(), "loader thread panicked"))
                })
            })
            .collect()
    });

    let tables = results.into_iter().collect::<Result<Vec<_>>>().map_err(|e| {
        log::error!("Directory load failed: {e}");
        e
    })?;

    log::info!(
        "Loaded {} sources ({} rows total)",
        tables.len(),
        tables.iter().map(RawTable::len).sum::<usize>()
    );
    Ok(tables)
}

/// Read and parse a single CSV source from disk.
pub fn load_source(src: &SourceSpec) -> Result<RawTable> {
    let name = src.display_name();
    let bytes = std::fs::read(&src.location).map_err(|e| DirectoryError::load(&name, e))?;
    let table = parse_csv_bytes(&name, &bytes)?;
    log::debug!("{name}: {} columns, {} rows", table.header.len(), table.len());
    Ok(table)
}

/// Parse CSV text whose first row is the header.
pub fn parse_csv(source_name: &str, text: &str) -> Result<RawTable> {
    parse_csv_bytes(source_name, text.as_bytes())
}

// ---------------------------------------------------------------------------
// CSV parsing
// ---------------------------------------------------------------------------

fn parse_csv_bytes(source_name: &str, bytes: &[u8]) -> Result<RawTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(bytes);

    let header: Vec<String> = reader
        .headers()
        .map_err(|e| DirectoryError::parse(source_name, format!("reading header: {e}")))?
        .iter()
        .map(|h| h.to_string())
        .collect();

    if header.is_empty() {
        return Err(DirectoryError::parse(source_name, "missing header row"));
    }

    let mut rows = Vec::new();
    let mut record = StringRecord::new();
    let mut row_no = 0usize;

    loop {
        let more = reader
            .read_record(&mut record)
            .map_err(|e| DirectoryError::parse(source_name, format!("row {}: {e}", row_no + 1)))?;
        if !more {
            break;
        }
        row_no += 1;

        if record.len() > header.len() {
            log::warn!(
                "{source_name}: row {row_no} has {} cells, header has {}; extra cells dropped",
                record.len(),
                header.len()
            );
        }
        rows.push(fit_to_width(&record, header.len()));
    }

    Ok(RawTable {
        source_name: source_name.to_string(),
        header,
        rows,
    })
}

/// Pad short rows with empty cells and drop cells past the header.
fn fit_to_width(record: &StringRecord, width: usize) -> Vec<String> {
    let mut cells: Vec<String> = record.iter().take(width).map(str::to_string).collect();
    cells.resize(width, String::new());
    cells
}

#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn parses_header_and_rows() {
        let table = parse_csv("t", "A,B\n1,2\n3,4\n").unwrap();
        assert_eq!(table.header, vec!["A", "B"]);
        assert_eq!(table.rows, vec![vec!["1", "2"], vec!["3", "4"]]);
    }

    #[test]
    fn quoted_fields_keep_commas_and_newlines() {
        let text = "Name,Street Address\n\"Acme, Inc.\",\"12 Main St\nSuite 4\"\n";
        let table = parse_csv("t", text).unwrap();
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows[0][0], "Acme, Inc.");
        assert_eq!(table.rows[0][1], "12 Main St\nSuite 4");
    }

    #[test]
    fn escaped_quotes_are_unescaped() {
        let table = parse_csv("t", "A\n\"say \"\"hi\"\"\"\n").unwrap();
        assert_eq!(table.rows[0][0], "say \"hi\"");
    }

    #[test]
    fn short_rows_are_padded_and_long_rows_truncated() {
        let table = parse_csv("t", "A,B,C\n1\n1,2,3,4\n").unwrap();
        assert_eq!(table.rows[0], vec!["1", "", ""]);
        assert_eq!(table.rows[1], vec!["1", "2", "3"]);
    }

    #[test]
    fn blank_lines_are_skipped() {
        let table = parse_csv("t", "A,B\n1,2\n\n3,4\n").unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows[1], vec!["3", "4"]);

        let crlf = parse_csv("t", "A,B\r\n1,2\r\n\r\n3,4\r\n").unwrap();
        assert_eq!(crlf.rows, table.rows);
    }

    #[test]
    fn trailing_blank_lines_add_no_rows() {
        let table = parse_csv("t", "A,B\n1,2\n3,4\n\n\n").unwrap();
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn header_only_has_no_rows() {
        let table = parse_csv("t", "A,B\n").unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn empty_text_is_a_parse_error() {
        let err = parse_csv("empty.csv", "").unwrap_err();
        assert!(matches!(err, DirectoryError::Parse { .. }));
        assert!(err.to_string().contains("empty.csv"));
    }

    #[test]
    fn invalid_utf8_is_a_parse_error() {
        let err = parse_csv_bytes("bad.csv", b"A,B\n\xff\xfe,1\n").unwrap_err();
        assert!(matches!(err, DirectoryError::Parse { .. }));
    }

    #[test]
    fn missing_file_is_a_load_error() {
        let src = SourceSpec::new("/definitely/not/here.csv", "DSP");
        let err = load_source(&src).unwrap_err();
        assert!(matches!(err, DirectoryError::Load { .. }));
    }

    #[test]
    fn one_missing_source_fails_the_whole_load() {
        let dir = tempdir().unwrap();
        let good = dir.path().join("good.csv");
        std::fs::write(&good, "A\n1\n").unwrap();

        let sources = vec![
            SourceSpec::new(&good, "DSP"),
            SourceSpec::new(dir.path().join("missing.csv"), "FedEx"),
        ];
        let err = load_sources(&sources).unwrap_err();
        assert!(err.to_string().contains("missing.csv"));

        let ok = load_sources(&sources[..1]).unwrap();
        assert_eq!(ok.len(), 1);
        assert_eq!(ok[0].rows, vec![vec!["1"]]);
    }
}
