//! Tabular input: the record interface the layout engine consumes and a CSV
//! reader that produces it.
//!
//! Two CSV flavors exist in the wild: a semicolon-separated export without an
//! author column and a cleaned comma-separated one with `Autor_Jahr`. The
//! delimiter is sniffed from the header line and both spellings of the region
//! column are accepted.

use std::path::Path;

use crate::config::Variant;
use crate::errors::IngestError;
use crate::log;

/// Column holding the taxon name.
pub const NAME_COLUMN: &str = "taxon";
/// Region column, underscore spelling.
pub const REGION_COLUMN: &str = "biogeographische_region";
/// Region column, dot spelling used by the cleaned export.
pub const REGION_COLUMN_DOTTED: &str = "biogeographische.region";
/// Optional author/year column.
pub const AUTHOR_COLUMN: &str = "Autor_Jahr";

/// What the label builders need from one input row.
///
/// Missing values are reported as empty strings.
pub trait TaxonRecord {
    fn name(&self) -> &str;
    fn region(&self) -> &str;
    fn author(&self) -> &str;
}

/// One row of the input table with the three fields of interest.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CsvRecord {
    pub name: String,
    pub region: String,
    pub author: String,
}

impl CsvRecord {
    pub fn new(name: impl Into<String>, region: impl Into<String>, author: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            region: region.into(),
            author: author.into(),
        }
    }
}

impl TaxonRecord for CsvRecord {
    fn name(&self) -> &str {
        &self.name
    }

    fn region(&self) -> &str {
        &self.region
    }

    fn author(&self) -> &str {
        &self.author
    }
}

/// Pick the field delimiter from the header line.
///
/// Semicolon wins only when the header contains one and the text before the
/// first semicolon has no comma; everything else is read as comma-separated.
pub fn detect_delimiter(header: &str) -> u8 {
    match header.split_once(';') {
        Some((first, _)) if !first.contains(',') => b';',
        _ => b',',
    }
}

/// Column positions resolved from the header row.
struct Columns {
    name: usize,
    /// Region columns in lookup order.
    regions: [Option<usize>; 2],
    author: Option<usize>,
}

impl Columns {
    /// The tray export spells the region column with a dot and the etiquette
    /// export with an underscore; each sheet looks at its own spelling first.
    fn resolve(headers: &csv::StringRecord, variant: Variant) -> Result<Self, IngestError> {
        let find = |wanted: &str| headers.iter().position(|h| h.trim() == wanted);
        let name = find(NAME_COLUMN).ok_or_else(|| IngestError::MissingColumn {
            column: NAME_COLUMN,
            found: headers.iter().collect::<Vec<_>>().join(", "),
        })?;
        let underscore = find(REGION_COLUMN);
        let dotted = find(REGION_COLUMN_DOTTED);
        let regions = match variant {
            Variant::Etiquette => [underscore, dotted],
            Variant::Tray => [dotted, underscore],
        };
        Ok(Self {
            name,
            regions,
            author: find(AUTHOR_COLUMN),
        })
    }

    fn extract(&self, row: &csv::StringRecord) -> CsvRecord {
        let get = |idx: Option<usize>| idx.and_then(|i| row.get(i)).unwrap_or("");
        // An empty preferred column falls through to the other spelling.
        let region = self
            .regions
            .into_iter()
            .map(get)
            .find(|v| !v.trim().is_empty())
            .unwrap_or("");
        CsvRecord {
            name: get(Some(self.name)).to_string(),
            region: region.trim().to_string(),
            author: get(self.author).trim().to_string(),
        }
    }
}

/// Parse CSV text into records for the etiquette sheet.
///
/// A leading UTF-8 byte-order mark is ignored. Ragged rows are accepted;
/// missing cells read as empty. Input without any header yields no records.
pub fn parse_csv(text: &str) -> Result<Vec<CsvRecord>, IngestError> {
    parse_csv_for(text, Variant::Etiquette)
}

/// [`parse_csv`] with the region column preference of `variant`.
pub fn parse_csv_for(text: &str, variant: Variant) -> Result<Vec<CsvRecord>, IngestError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let Some(header) = text.lines().next() else {
        return Ok(Vec::new());
    };
    if header.trim().is_empty() {
        return Ok(Vec::new());
    }

    let delimiter = detect_delimiter(header);
    log::debug!(delimiter = %(delimiter as char), "sniffed CSV delimiter");

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .has_headers(true)
        .from_reader(text.as_bytes());

    let columns = Columns::resolve(reader.headers()?, variant)?;
    let mut records = Vec::new();
    for row in reader.records() {
        records.push(columns.extract(&row?));
    }

    log::info!(rows = records.len(), "loaded CSV rows");
    Ok(records)
}

/// Read and parse a CSV file for the etiquette sheet.
pub fn read_csv(path: &Path) -> Result<Vec<CsvRecord>, IngestError> {
    read_csv_for(path, Variant::Etiquette)
}

/// [`read_csv`] with the region column preference of `variant`.
pub fn read_csv_for(path: &Path, variant: Variant) -> Result<Vec<CsvRecord>, IngestError> {
    let bytes = std::fs::read(path).map_err(|source| IngestError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    let text = String::from_utf8(bytes).map_err(|source| IngestError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    parse_csv_for(&text, variant)
}

/// Records of a CSV file, or none when the file cannot be used.
///
/// A missing file, undecodable bytes, a header without the `taxon` column
/// and malformed rows are logged and read as an empty table, so callers
/// treat a broken source the same way as an empty one.
#[cfg_attr(not(feature = "tracing"), allow(unused_variables))]
pub fn load_records(path: &Path, variant: Variant) -> Vec<CsvRecord> {
    match read_csv_for(path, variant) {
        Ok(records) => records,
        Err(err) => {
            log::warn!(path = %path.display(), error = %err, "ignoring unusable input");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sniffs_semicolon_header() {
        assert_eq!(detect_delimiter("taxon;biogeographische_region"), b';');
    }

    #[test]
    fn comma_wins_when_it_comes_first() {
        assert_eq!(detect_delimiter("taxon,biogeographische_region;x"), b',');
        assert_eq!(detect_delimiter("taxon,biogeographische.region,Autor_Jahr"), b',');
        assert_eq!(detect_delimiter("taxon"), b',');
    }

    #[test]
    fn parses_semicolon_export_without_author() {
        let text = "taxon;biogeographische_region\nHomo sapiens ;PA\nGenus species sub;AF\n";
        let records = parse_csv(text).unwrap();
        assert_eq!(
            records,
            vec![
                CsvRecord::new("Homo sapiens ", "PA", ""),
                CsvRecord::new("Genus species sub", "AF", ""),
            ]
        );
    }

    #[test]
    fn parses_cleaned_export_with_dotted_region_and_bom() {
        let text = "\u{feff}taxon,biogeographische.region,Autor_Jahr\n\
                    Cassida viridis,PA,\"Linnaeus, 1758\"\n";
        let records = parse_csv(text).unwrap();
        assert_eq!(records, vec![CsvRecord::new("Cassida viridis", "PA", "Linnaeus, 1758")]);
    }

    #[test]
    fn each_sheet_prefers_its_own_region_spelling() {
        let text = "taxon,biogeographische_region,biogeographische.region\nHomo sapiens,AF,PA\n";
        assert_eq!(parse_csv_for(text, Variant::Etiquette).unwrap()[0].region, "AF");
        assert_eq!(parse_csv_for(text, Variant::Tray).unwrap()[0].region, "PA");

        let blank_dotted = "taxon,biogeographische_region,biogeographische.region\nHomo sapiens,AF,\n";
        assert_eq!(parse_csv_for(blank_dotted, Variant::Tray).unwrap()[0].region, "AF");
    }

    #[test]
    fn short_rows_read_as_empty_fields() {
        let text = "taxon,biogeographische_region,Autor_Jahr\nAspidimorpha\n";
        let records = parse_csv(text).unwrap();
        assert_eq!(records, vec![CsvRecord::new("Aspidimorpha", "", "")]);
    }

    #[test]
    fn missing_taxon_column_is_an_error() {
        let err = parse_csv("name,region\nHomo sapiens,PA\n").unwrap_err();
        assert!(matches!(err, IngestError::MissingColumn { column: "taxon", .. }));
    }

    #[test]
    fn empty_input_has_no_records() {
        assert!(parse_csv("").unwrap().is_empty());
        assert!(parse_csv("\u{feff}").unwrap().is_empty());
    }

    #[test]
    fn header_only_has_no_records() {
        assert!(parse_csv("taxon;biogeographische_region\n").unwrap().is_empty());
    }

    #[test]
    fn missing_file_reports_open_error() {
        let err = read_csv(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert!(matches!(err, IngestError::Open { .. }));
    }

    fn scratch_file(name: &str, contents: &[u8]) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("taxalabel-{}-{name}", std::process::id()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn undecodable_file_reports_decode_error() {
        let path = scratch_file("latin1.csv", b"taxon;biogeographische_region\nM\xfcller;PA\n");
        let err = read_csv(&path).unwrap_err();
        assert!(matches!(err, IngestError::Decode { .. }), "{err:?}");
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn unusable_sources_load_as_no_records() {
        assert!(load_records(Path::new("/definitely/not/here.csv"), Variant::Etiquette).is_empty());

        let latin1 = scratch_file("bad-bytes.csv", b"taxon\n\xff\xfe\n");
        assert!(load_records(&latin1, Variant::Etiquette).is_empty());
        std::fs::remove_file(&latin1).unwrap();

        let headless = scratch_file("no-taxon.csv", b"name,region\nHomo sapiens,PA\n");
        assert!(load_records(&headless, Variant::Tray).is_empty());
        std::fs::remove_file(&headless).unwrap();
    }

    #[test]
    fn usable_source_loads_its_rows() {
        let path = scratch_file("ok.csv", b"taxon;biogeographische_region\nHomo sapiens;PA\n");
        assert_eq!(load_records(&path, Variant::Etiquette), vec![CsvRecord::new("Homo sapiens", "PA", "")]);
        std::fs::remove_file(&path).unwrap();
    }
}
