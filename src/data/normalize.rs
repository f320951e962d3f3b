use std::fmt;

use crate::config::DirectoryConfig;

use super::loader::RawTable;
use super::model::{Record, COMPANY_COLUMN, SOURCE_NAME_COLUMN, TYPE_COLUMN};

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Per-load switches for [`normalize_row`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizeOptions {
    /// Candidate name columns, tried in order and matched case-insensitively.
    /// The first one present in a source's header moves to `Company`.
    pub name_aliases: Vec<String>,
    pub collapse_whitespace: bool,
    pub fill_region: bool,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            name_aliases: vec![SOURCE_NAME_COLUMN.to_string()],
            collapse_whitespace: false,
            fill_region: false,
        }
    }
}

impl From<&DirectoryConfig> for NormalizeOptions {
    fn from(config: &DirectoryConfig) -> Self {
        Self {
            name_aliases: config.name_aliases.clone(),
            collapse_whitespace: config.collapse_whitespace,
            fill_region: config.fill_region,
        }
    }
}

// ---------------------------------------------------------------------------
// Row normalization
// ---------------------------------------------------------------------------

/// Build a [`Record`] from one raw row.
///
/// Cells are keyed by header in file order, `Type` is set to `label`, and the
/// name column (the first alias found in `header`) is moved to `Company`.
/// Resulting key order: header columns minus the name column, then `Type`,
/// then `Company`.
/// A header that already has a `Type` column keeps it in place, overwritten
/// by the label.
pub fn normalize_row(
    header: &[String],
    cells: &[String],
    label: &str,
    opts: &NormalizeOptions,
) -> Record {
    let mut record = Record::with_capacity(header.len() + 2);
    for (i, col) in header.iter().enumerate() {
        let raw = cells.get(i).map(String::as_str).unwrap_or("");
        let value = if opts.collapse_whitespace {
            clean_cell(raw)
        } else {
            raw.to_string()
        };
        record.set(col.as_str(), value);
    }
    record.set(TYPE_COLUMN, label);

    if let Some(name_col) = find_name_column(header, &opts.name_aliases) {
        if let Some(name) = record.remove(name_col) {
            record.set(COMPANY_COLUMN, name);
        }
    }

    if opts.fill_region && record.value("Region").is_empty() {
        if let Some(country) = record.get("Country").filter(|c| !c.is_empty()) {
            let region = infer_region(country);
            record.set("Region", region.as_str());
        }
    }

    record
}

/// Header column matching the earliest alias, ignoring ASCII case. `Type`
/// never counts as a name column.
pub fn find_name_column<'a>(header: &'a [String], aliases: &[String]) -> Option<&'a str> {
    aliases.iter().find_map(|alias| {
        header
            .iter()
            .filter(|h| h.as_str() != TYPE_COLUMN)
            .find(|h| h.eq_ignore_ascii_case(alias))
            .map(String::as_str)
    })
}

/// Normalize every row of a parsed source.
pub fn normalize_table(table: &RawTable, label: &str, opts: &NormalizeOptions) -> Vec<Record> {
    table
        .rows
        .iter()
        .map(|cells| normalize_row(&table.header, cells, label, opts))
        .collect()
}

/// Collapse every run of whitespace into a single space and trim the ends.
pub fn clean_cell(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

// ---------------------------------------------------------------------------
// Region inference
// ---------------------------------------------------------------------------

/// Coarse sales region derived from a country name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
    Usa,
    Canada,
    Uk,
    Eu,
    Other,
}

impl Region {
    pub fn as_str(self) -> &'static str {
        match self {
            Region::Usa => "USA",
            Region::Canada => "Canada",
            Region::Uk => "UK",
            Region::Eu => "EU",
            Region::Other => "Other",
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

const EU_COUNTRIES: &[&str] = &[
    "germany",
    "france",
    "spain",
    "italy",
    "netherlands",
    "belgium",
    "poland",
    "sweden",
    "denmark",
    "ireland",
    "austria",
    "czechia",
    "czech republic",
    "portugal",
    "finland",
    "greece",
    "hungary",
    "romania",
    "slovakia",
    "slovenia",
    "bulgaria",
    "croatia",
    "estonia",
    "latvia",
    "lithuania",
    "luxembourg",
    "malta",
];

/// Map a free-text country to its [`Region`]. Matching is case-insensitive
/// and ignores surrounding whitespace.
pub fn infer_region(country: &str) -> Region {
    let c = country.trim().to_lowercase();
    match c.as_str() {
        "usa" | "united states" | "u.s.a." | "us" => Region::Usa,
        "canada" => Region::Canada,
        "united kingdom" | "uk" => Region::Uk,
        other if EU_COUNTRIES.contains(&other) => Region::Eu,
        _ => Region::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn renames_name_field_and_tags_type() {
        let header = strings(&["DSP Name", "City", "Email"]);
        let cells = strings(&["Acme", "Austin", "a@acme.test"]);
        let r = normalize_row(&header, &cells, "DSP", &NormalizeOptions::default());

        assert!(!r.contains("DSP Name"));
        assert_eq!(r.get("Company"), Some("Acme"));
        assert_eq!(r.get("Type"), Some("DSP"));
        assert_eq!(r.keys().collect::<Vec<_>>(), vec!["City", "Email", "Type", "Company"]);
    }

    #[test]
    fn source_without_name_field_gets_no_company() {
        let header = strings(&["Name", "City"]);
        let cells = strings(&["Zeta", "Memphis"]);
        let r = normalize_row(&header, &cells, "FedEx", &NormalizeOptions::default());

        assert!(!r.contains("Company"));
        assert_eq!(r.get("Name"), Some("Zeta"));
        assert_eq!(r.get("Type"), Some("FedEx"));
    }

    #[test]
    fn name_aliases_match_case_insensitively() {
        let opts = NormalizeOptions {
            name_aliases: strings(&["DSP Name", "Name"]),
            ..Default::default()
        };
        let header = strings(&["NAME", "City"]);
        let r = normalize_row(&header, &strings(&["Zeta ISP", "Memphis"]), "FedEx", &opts);

        assert!(!r.contains("NAME"));
        assert_eq!(r.get("Company"), Some("Zeta ISP"));
        assert_eq!(r.keys().collect::<Vec<_>>(), vec!["City", "Type", "Company"]);
    }

    #[test]
    fn earlier_alias_wins_over_later_one() {
        let aliases = strings(&["DSP Name", "Name"]);
        let header = strings(&["Name", "dsp name"]);
        assert_eq!(find_name_column(&header, &aliases), Some("dsp name"));
        assert_eq!(find_name_column(&strings(&["City"]), &aliases), None);
        assert_eq!(find_name_column(&strings(&["Type"]), &strings(&["type"])), None);
    }

    #[test]
    fn type_column_in_header_is_overwritten_in_place() {
        let header = strings(&["Type", "City"]);
        let cells = strings(&["whatever", "Reno"]);
        let r = normalize_row(&header, &cells, "DSP", &NormalizeOptions::default());
        assert_eq!(r.keys().collect::<Vec<_>>(), vec!["Type", "City"]);
        assert_eq!(r.get("Type"), Some("DSP"));
    }

    #[test]
    fn normalizing_is_idempotent_over_company() {
        let header = strings(&["DSP Name"]);
        let opts = NormalizeOptions::default();
        let once = normalize_row(&header, &strings(&["Acme"]), "DSP", &opts);
        let header2: Vec<String> = once.keys().map(str::to_string).collect();
        let cells2: Vec<String> = once.iter().map(|(_, v)| v.to_string()).collect();
        let twice = normalize_row(&header2, &cells2, "DSP", &opts);
        assert_eq!(once, twice);
    }

    #[test]
    fn every_row_becomes_one_record() {
        let table = RawTable {
            source_name: "t".into(),
            header: strings(&["DSP Name"]),
            rows: vec![strings(&["A"]), strings(&["B"]), strings(&["C"])],
        };
        let records = normalize_table(&table, "DSP", &NormalizeOptions::default());
        assert_eq!(records.len(), 3);
        assert!(records.iter().all(|r| r.get("Type") == Some("DSP")));
    }

    #[test]
    fn collapse_whitespace_cleans_cells() {
        let opts = NormalizeOptions {
            collapse_whitespace: true,
            ..Default::default()
        };
        let r = normalize_row(&strings(&["City"]), &strings(&["  New \t York\n"]), "DSP", &opts);
        assert_eq!(r.get("City"), Some("New York"));
    }

    #[test]
    fn fill_region_only_touches_empty_regions() {
        let opts = NormalizeOptions {
            fill_region: true,
            ..Default::default()
        };
        let header = strings(&["Country", "Region"]);
        let filled = normalize_row(&header, &strings(&["Germany", ""]), "DSP", &opts);
        assert_eq!(filled.get("Region"), Some("EU"));

        let kept = normalize_row(&header, &strings(&["Germany", "DACH"]), "DSP", &opts);
        assert_eq!(kept.get("Region"), Some("DACH"));
    }

    #[test]
    fn clean_cell_collapses_runs() {
        assert_eq!(clean_cell("  test  "), "test");
        assert_eq!(clean_cell("\nnew\tline\t"), "new line");
        assert_eq!(clean_cell(""), "");
    }

    #[test]
    fn infer_region_matches_known_countries() {
        assert_eq!(infer_region("USA"), Region::Usa);
        assert_eq!(infer_region(" united states "), Region::Usa);
        assert_eq!(infer_region("Canada"), Region::Canada);
        assert_eq!(infer_region("UK"), Region::Uk);
        assert_eq!(infer_region("Germany"), Region::Eu);
        assert_eq!(infer_region("Czech Republic"), Region::Eu);
        assert_eq!(infer_region("Brazil"), Region::Other);
        assert_eq!(infer_region(""), Region::Other);
    }
}
