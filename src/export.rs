use std::io;

use crate::data::model::Record;
use crate::error::Result;
use crate::state::TableView;

/// Write `records` as CSV, projected onto `columns` in that order. Missing
/// cells are written empty.
pub fn write_csv<'a, W, I>(writer: W, columns: &[String], records: I) -> Result<()>
where
    W: io::Write,
    I: IntoIterator<Item = &'a Record>,
{
    let mut out = csv::Writer::from_writer(writer);
    out.write_record(columns).map_err(io::Error::from)?;

    let mut written = 0usize;
    for record in records {
        out.write_record(columns.iter().map(|c| record.value(c)))
            .map_err(io::Error::from)?;
        written += 1;
    }
    out.flush()?;

    log::debug!("Exported {written} rows, {} columns", columns.len());
    Ok(())
}

/// Write a page of the table as pretty-printed JSON.
pub fn write_json<W: io::Write>(writer: W, view: &TableView<'_>) -> Result<()> {
    serde_json::to_writer_pretty(writer, view).map_err(io::Error::from)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::Dataset;
    use crate::state::{Event, ViewState};

    fn dataset() -> Dataset {
        Dataset {
            records: vec![
                [("Company", "Acme, Inc."), ("Type", "DSP"), ("Email", "x@acme.test")]
                    .into_iter()
                    .collect(),
                [("Company", "Zeta"), ("Type", "FedEx")].into_iter().collect(),
            ],
            columns: vec!["Company".into(), "Type".into()],
        }
    }

    #[test]
    fn csv_projects_onto_columns_and_quotes() {
        let ds = dataset();
        let mut buf = Vec::new();
        write_csv(&mut buf, &ds.columns, &ds.records).unwrap();
        let text = String::from_utf8(buf).unwrap();
        assert_eq!(text, "Company,Type\n\"Acme, Inc.\",DSP\nZeta,FedEx\n");
    }

    #[test]
    fn json_contains_current_page() {
        let state = ViewState::default()
            .apply(Event::Loaded(dataset()))
            .apply(Event::SearchChanged("zeta".into()));
        let mut buf = Vec::new();
        write_json(&mut buf, &state.table()).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value["total_entries"], 1);
        assert_eq!(value["rows"][0]["Type"], "FedEx");
    }
}
