// src/file/dataset.rs
use super::FileHandler;
use crate::config::record::{UNKNOWN_CODE, UNKNOWN_NAME, UNKNOWN_REGION};
use crate::config::{ColumnNames, GdpRecord, LoadSummary, RecordStore};
use crate::error::LoadError;
use csv::{ReaderBuilder, StringRecord};
use std::fs::File;
use std::io::{self, Read};
use std::path::Path;

#[derive(Debug)]
pub struct DatasetFileHandler {
    columns: ColumnNames,
}

// Column positions resolved once from the header row
#[derive(Debug, Default)]
struct ColumnLayout {
    country: Option<usize>,
    code: Option<usize>,
    region: Option<usize>,
    years: Vec<(usize, i32)>,
}

/// A header is a year column when it is exactly four digits, e.g. "1960".
pub fn parse_year_header(header: &str) -> Option<i32> {
    let header = header.trim();
    let is_year = header.len() == 4
        && header.bytes().all(|b| b.is_ascii_digit())
        && !header.starts_with('0');

    if is_year {
        header.parse().ok()
    } else {
        None
    }
}

impl DatasetFileHandler {
    pub fn new(columns: ColumnNames) -> Self {
        Self { columns }
    }

    /// Parse a dataset from any reader. `source` is only used in messages.
    pub fn read_store<R: Read>(&self, reader: R, source: &Path) -> Result<RecordStore, LoadError> {
        let unreadable = |reason: String| LoadError::Unreadable {
            path: source.to_path_buf(),
            reason,
        };

        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(reader);

        let headers = reader.headers()
            .map_err(|e| unreadable(format!("invalid header row: {}", e)))?
            .clone();

        if headers.iter().all(|h| h.trim().is_empty()) {
            return Err(unreadable("file is empty".to_string()));
        }

        let layout = self.resolve_layout(&headers);
        if layout.years.is_empty() {
            log::warn!("No year columns found in {}", source.display());
        }

        let mut summary = LoadSummary::default();
        let mut records = Vec::new();

        for (index, row) in reader.records().enumerate() {
            // Header is line 1
            let fallback_line = index as u64 + 2;

            let row = match row {
                Ok(row) => row,
                Err(e) => {
                    let line = e.position().map_or(fallback_line, |p| p.line());
                    log::warn!("Skipping line {} of {}: {}", line, source.display(), e);
                    summary.skipped_rows += 1;
                    continue;
                }
            };

            let line = row.position().map_or(fallback_line, |p| p.line());
            if row.len() < headers.len() {
                log::warn!(
                    "Skipping line {} of {}: expected {} fields, found {}",
                    line, source.display(), headers.len(), row.len()
                );
                summary.skipped_rows += 1;
                continue;
            }

            records.push(self.parse_row(&row, &layout, line, &mut summary));
        }

        let years = layout.years.iter().map(|(_, year)| *year).collect();

        Ok(RecordStore::new(records, years).with_source(source, summary))
    }

    fn resolve_layout(&self, headers: &StringRecord) -> ColumnLayout {
        let mut layout = ColumnLayout::default();

        for (idx, header) in headers.iter().enumerate() {
            let header = header.trim_start_matches('\u{feff}').trim();

            if let Some(year) = parse_year_header(header) {
                layout.years.push((idx, year));
            } else if header == self.columns.country {
                layout.country = Some(idx);
            } else if header == self.columns.code {
                layout.code = Some(idx);
            } else if header == self.columns.region {
                layout.region = Some(idx);
            }
        }

        for (name, found) in [
            (&self.columns.country, layout.country),
            (&self.columns.code, layout.code),
            (&self.columns.region, layout.region),
        ] {
            if found.is_none() {
                log::warn!("Column '{}' not found, using default values", name);
            }
        }

        layout
    }

    fn parse_row(
        &self,
        row: &StringRecord,
        layout: &ColumnLayout,
        line: u64,
        summary: &mut LoadSummary,
    ) -> GdpRecord {
        let text = |idx: Option<usize>, fallback: &str| {
            idx.and_then(|i| row.get(i))
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .unwrap_or(fallback)
                .to_string()
        };

        let mut record = GdpRecord::new(
            text(layout.country, UNKNOWN_NAME),
            text(layout.code, UNKNOWN_CODE),
            text(layout.region, UNKNOWN_REGION),
        );

        for &(idx, year) in &layout.years {
            let cell = row.get(idx).unwrap_or("").trim();
            if cell.is_empty() {
                continue;
            }

            // Non-numeric cells are kept as 0.0 rather than dropped
            let value = match cell.parse::<f64>() {
                Ok(value) if value.is_finite() => value,
                _ => {
                    log::warn!(
                        "Line {}: value '{}' for {} in {} is not a number, using 0.0",
                        line, cell, record.country, year
                    );
                    summary.coerced_cells += 1;
                    0.0
                }
            };
            record.gdp_by_year.insert(year, value);
        }

        record
    }
}

impl FileHandler<RecordStore> for DatasetFileHandler {
    type Error = LoadError;

    fn load(&self, path: &Path) -> Result<RecordStore, LoadError> {
        let file = File::open(path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => LoadError::NotFound { path: path.to_path_buf() },
            _ => LoadError::Unreadable {
                path: path.to_path_buf(),
                reason: e.to_string(),
            },
        })?;

        let store = self.read_store(file, path)?;
        let summary = store.summary();
        log::info!(
            "Loaded {} records with {} year columns from {} ({} rows skipped, {} cells coerced)",
            store.len(),
            store.year_columns().len(),
            path.display(),
            summary.skipped_rows,
            summary.coerced_cells
        );

        Ok(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = "\
Country Name,Country Code,Indicator,1960,1961,1962,Continent
Pakistan,PAK,GDP,3.7,4.1,,Asia
Japan,JPN,GDP,44.3,n/a,60.7,Asia
France,FRA,GDP,62.2,67.5,75.3,Europe
";

    fn handler() -> DatasetFileHandler {
        DatasetFileHandler::new(ColumnNames::default())
    }

    fn parse(text: &str) -> RecordStore {
        handler().read_store(text.as_bytes(), Path::new("test.csv")).unwrap()
    }

    #[test]
    fn test_year_header_detection() {
        assert_eq!(parse_year_header("1960"), Some(1960));
        assert_eq!(parse_year_header(" 2024 "), Some(2024));
        assert_eq!(parse_year_header("196"), None);
        assert_eq!(parse_year_header("19600"), None);
        assert_eq!(parse_year_header("Y196"), None);
        assert_eq!(parse_year_header("0123"), None);
        assert_eq!(parse_year_header("Continent"), None);
    }

    #[test]
    fn test_parses_metadata_and_years() {
        let store = parse(SAMPLE);
        assert_eq!(store.len(), 3);
        assert_eq!(store.year_columns(), &[1960, 1961, 1962]);

        let pakistan = &store.records()[0];
        assert_eq!(pakistan.country, "Pakistan");
        assert_eq!(pakistan.code, "PAK");
        assert_eq!(pakistan.region, "Asia");
        assert_eq!(pakistan.gdp(1960), Some(3.7));
        assert_eq!(pakistan.gdp(1961), Some(4.1));
    }

    #[test]
    fn test_blank_cells_are_omitted() {
        let store = parse(SAMPLE);
        let pakistan = &store.records()[0];
        assert_eq!(pakistan.gdp(1962), None);
        assert_eq!(pakistan.gdp_by_year.len(), 2);
    }

    #[test]
    fn test_unparsable_cells_become_zero() {
        let store = parse(SAMPLE);
        let japan = &store.records()[1];
        assert_eq!(japan.gdp(1961), Some(0.0));
        assert_eq!(japan.gdp(1962), Some(60.7));
        assert_eq!(store.summary().coerced_cells, 1);
    }

    #[test]
    fn test_non_finite_cells_become_zero() {
        let store = parse("Country Name,2000,2001\nNowhere,inf,NaN\n");
        let record = &store.records()[0];
        assert_eq!(record.gdp(2000), Some(0.0));
        assert_eq!(record.gdp(2001), Some(0.0));
    }

    #[test]
    fn test_missing_metadata_uses_sentinels() {
        // No code or region column at all, blank country cell
        let store = parse("Country Name,1990\n,12.5\n");
        let record = &store.records()[0];
        assert_eq!(record.country, "Unknown");
        assert_eq!(record.code, "N/A");
        assert_eq!(record.region, "Unknown");
        assert_eq!(record.gdp(1990), Some(12.5));
    }

    #[test]
    fn test_blank_metadata_cells_use_sentinels() {
        let store = parse("Country Name,Country Code,Continent,2000\nChile, ,,1.0\n");
        let record = &store.records()[0];
        assert_eq!(record.country, "Chile");
        assert_eq!(record.code, "N/A");
        assert_eq!(record.region, "Unknown");
    }

    #[test]
    fn test_short_rows_are_skipped() {
        let store = parse("Country Name,Continent,2000\nChile,South America,1.0\nBroken,Asia\nPeru,South America,2.0\n");
        let names: Vec<&str> = store.records().iter().map(|r| r.country.as_str()).collect();
        assert_eq!(names, vec!["Chile", "Peru"]);
        assert_eq!(store.summary().skipped_rows, 1);
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_custom_column_names() {
        let columns = ColumnNames {
            country: "Name".into(),
            code: "ISO".into(),
            region: "Region".into(),
        };
        let store = DatasetFileHandler::new(columns)
            .read_store("Name,ISO,Region,2010\nKenya,KEN,Africa,5\n".as_bytes(), Path::new("x.csv"))
            .unwrap();
        let record = &store.records()[0];
        assert_eq!((record.country.as_str(), record.code.as_str(), record.region.as_str()),
            ("Kenya", "KEN", "Africa"));
    }

    #[test]
    fn test_empty_input_is_unreadable() {
        let err = handler().read_store("".as_bytes(), Path::new("empty.csv")).unwrap_err();
        assert!(matches!(err, LoadError::Unreadable { .. }));
    }

    #[test]
    fn test_undecodable_rows_are_skipped() {
        let input: &[u8] = b"\xEF\xBB\xBFCountry Name,Country Code,Continent,2000\n\
Chile,CHL,South America,1.0\n\
Bad\xFF,BAD,Asia,2.0\n\
Peru,PER,South America,3.0\n";

        let store = handler().read_store(input, Path::new("test.csv")).unwrap();
        let names: Vec<&str> = store.records().iter().map(|r| r.country.as_str()).collect();
        assert_eq!(names, vec!["Chile", "Peru"]);
        assert_eq!(store.summary().skipped_rows, 1);
        assert_eq!(store.records()[1].gdp(2000), Some(3.0));
    }

    #[test]
    fn test_non_utf8_header_is_unreadable() {
        let input: &[u8] = b"Country Name,Contin\xFFent,2000\nChile,South America,1.0\n";
        let err = handler().read_store(input, Path::new("latin1.csv")).unwrap_err();
        assert!(matches!(err, LoadError::Unreadable { .. }));
        assert!(err.to_string().contains("latin1.csv"));
    }

    #[test]
    fn test_header_only_gives_empty_store() {
        let store = parse("Country Name,Country Code,Continent,2000\n");
        assert!(store.is_empty());
        assert_eq!(store.year_columns(), &[2000]);
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = handler().load(&dir.path().join("missing.csv")).unwrap_err();
        assert!(matches!(err, LoadError::NotFound { .. }));
        assert!(err.to_string().contains("missing.csv"));
    }

    #[test]
    fn test_load_from_disk_records_source() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(SAMPLE.as_bytes()).unwrap();

        let store = handler().load(file.path()).unwrap();
        assert_eq!(store.len(), 3);
        assert_eq!(store.source(), Some(file.path()));
    }
}
