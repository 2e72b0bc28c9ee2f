//! CSV file reading into an all-text Polars DataFrame.
//!
//! Every column is loaded as `String` so vendor values reach the mapper
//! untouched (`007` stays `007`). Empty fields become null.

use std::fs;
use std::path::Path;

use ::csv::ReaderBuilder;
use encoding_rs::{Encoding, UTF_8};
use polars::prelude::{Column, DataFrame, IntoColumn, NamedFrom, Series};
use tracing::{debug, info, warn};

use crate::error::{IngestError, Result};

use super::header::CsvHeaders;

/// Maximum file size for CSV loading (500 MB default).
pub const MAX_CSV_FILE_SIZE: u64 = 500 * 1024 * 1024;

/// How to read a vendor export.
#[derive(Debug, Clone, Copy)]
pub struct ReadOptions {
    /// Field separator byte.
    pub separator: u8,
    /// Source text encoding. A byte-order mark in the file takes precedence.
    pub encoding: &'static Encoding,
    /// Files larger than this are rejected.
    pub max_file_size: u64,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            separator: b',',
            encoding: UTF_8,
            max_file_size: MAX_CSV_FILE_SIZE,
        }
    }
}

impl ReadOptions {
    #[must_use]
    pub fn with_separator(mut self, separator: u8) -> Self {
        self.separator = separator;
        self
    }

    #[must_use]
    pub fn with_encoding(mut self, encoding: &'static Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    #[must_use]
    pub fn with_max_file_size(mut self, max_file_size: u64) -> Self {
        self.max_file_size = max_file_size;
        self
    }
}

/// Resolves a WHATWG encoding label such as `utf-8`, `windows-1250`, `cp1250`.
pub fn encoding_for_label(label: &str) -> Result<&'static Encoding> {
    Encoding::for_label(label.trim().as_bytes()).ok_or_else(|| IngestError::UnknownEncoding {
        label: label.to_string(),
    })
}

fn io_error(path: &Path, source: std::io::Error) -> IngestError {
    if source.kind() == std::io::ErrorKind::NotFound {
        IngestError::FileNotFound {
            path: path.to_path_buf(),
        }
    } else {
        IngestError::FileRead {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Check file size against a limit.
pub fn check_file_size_with_limit(path: &Path, max_size: u64) -> Result<()> {
    let metadata = fs::metadata(path).map_err(|e| io_error(path, e))?;

    if metadata.len() > max_size {
        return Err(IngestError::FileTooLarge {
            path: path.to_path_buf(),
            size: metadata.len(),
            max_size,
        });
    }

    Ok(())
}

/// Decodes raw bytes to UTF-8 text, honoring a byte-order mark if present.
pub fn decode_bytes(bytes: &[u8], encoding: &'static Encoding, path: &Path) -> String {
    let (text, used, had_errors) = encoding.decode(bytes);
    if used != encoding {
        debug!(
            path = %path.display(),
            requested = encoding.name(),
            detected = used.name(),
            "byte-order mark overrides requested encoding"
        );
    }
    if had_errors {
        warn!(
            path = %path.display(),
            encoding = used.name(),
            "input contains byte sequences invalid for the encoding; replaced with U+FFFD"
        );
    }
    text.into_owned()
}

/// Reads a CSV file into a DataFrame with one `String` column per header cell.
pub fn read_csv_table(path: &Path, options: &ReadOptions) -> Result<(DataFrame, CsvHeaders)> {
    check_file_size_with_limit(path, options.max_file_size)?;
    let bytes = fs::read(path).map_err(|e| io_error(path, e))?;
    let text = decode_bytes(&bytes, options.encoding, path);
    let (df, headers) = read_csv_text(&text, options.separator, path)?;
    info!(
        path = %path.display(),
        rows = df.height(),
        columns = df.width(),
        encoding = options.encoding.name(),
        "loaded input table"
    );
    Ok((df, headers))
}

/// Parses already-decoded CSV text. `path` is only used in errors and logs.
pub fn read_csv_text(text: &str, separator: u8, path: &Path) -> Result<(DataFrame, CsvHeaders)> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(separator)
        .from_reader(text.as_bytes());

    let mut records = reader.records();
    let header_record = match records.next() {
        Some(record) => record.map_err(|source| IngestError::CsvParse {
            path: path.to_path_buf(),
            source,
        })?,
        None => {
            return Err(IngestError::EmptyCsv {
                path: path.to_path_buf(),
            });
        }
    };
    let headers = CsvHeaders::from_raw(header_record.iter());
    for (raw, column) in headers.renamed() {
        warn!(path = %path.display(), header = raw, column, "renamed header cell");
    }

    let mut values: Vec<Vec<Option<String>>> = vec![Vec::new(); headers.len()];
    let mut overlong_rows = 0usize;
    for record in records {
        let record = record.map_err(|source| IngestError::CsvParse {
            path: path.to_path_buf(),
            source,
        })?;
        if record.len() > headers.len() {
            overlong_rows += 1;
        }
        for (idx, column) in values.iter_mut().enumerate() {
            let cell = record.get(idx).filter(|value| !value.is_empty());
            column.push(cell.map(str::to_string));
        }
    }
    if overlong_rows > 0 {
        warn!(
            path = %path.display(),
            rows = overlong_rows,
            "rows have more fields than the header; extra fields dropped"
        );
    }

    let columns: Vec<Column> = headers
        .columns
        .iter()
        .zip(values)
        .map(|(name, cells)| Series::new(name.as_str().into(), cells).into_column())
        .collect();
    let df = DataFrame::new(columns)?;
    Ok((df, headers))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_csv(content: &[u8]) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content).unwrap();
        file
    }

    #[test]
    fn test_read_csv_table_keeps_text() {
        let file = create_temp_csv(b"ID oferty,Cena PL\n007,10.50\n008,\n");
        let (df, headers) = read_csv_table(file.path(), &ReadOptions::default()).unwrap();

        assert_eq!(headers.columns, vec!["ID oferty", "Cena PL"]);
        assert_eq!(df.height(), 2);
        let ids = df.column("ID oferty").unwrap().str().unwrap();
        assert_eq!(ids.get(0), Some("007"));
        let prices = df.column("Cena PL").unwrap().str().unwrap();
        assert_eq!(prices.get(0), Some("10.50"));
        assert_eq!(prices.get(1), None);
    }

    #[test]
    fn test_read_csv_table_header_only() {
        let file = create_temp_csv(b"ID oferty,Cena PL,Marka\n");
        let (df, headers) = read_csv_table(file.path(), &ReadOptions::default()).unwrap();

        assert_eq!(headers.len(), 3);
        assert_eq!(df.height(), 0);
        assert_eq!(df.width(), 3);
    }

    #[test]
    fn test_read_csv_table_empty_file() {
        let file = create_temp_csv(b"");
        let result = read_csv_table(file.path(), &ReadOptions::default());

        assert!(matches!(result, Err(IngestError::EmptyCsv { .. })));
    }

    #[test]
    fn test_read_csv_table_missing_file() {
        let result = read_csv_table(
            Path::new("/nonexistent/morele/input.csv"),
            &ReadOptions::default(),
        );
        assert!(matches!(result, Err(IngestError::FileNotFound { .. })));
    }

    #[test]
    fn test_read_csv_table_with_bom_and_semicolons() {
        let file = create_temp_csv("\u{feff}ID oferty;Marka\nA1;X\n".as_bytes());
        let options = ReadOptions::default().with_separator(b';');
        let (df, headers) = read_csv_table(file.path(), &options).unwrap();

        assert_eq!(headers.columns, vec!["ID oferty", "Marka"]);
        assert_eq!(df.height(), 1);
    }

    #[test]
    fn test_read_csv_table_windows_1250() {
        // "Ilość" and "Łódź" encoded as windows-1250.
        let mut content = Vec::new();
        content.extend_from_slice(b"Ilo\x9c\xe6,Miasto\n5,\xa3\xf3d\x9f\n");
        let file = create_temp_csv(&content);
        let options = ReadOptions::default().with_encoding(encoding_for_label("cp1250").unwrap());
        let (df, headers) = read_csv_table(file.path(), &options).unwrap();

        assert_eq!(headers.columns, vec!["Ilość", "Miasto"]);
        let city = df.column("Miasto").unwrap().str().unwrap();
        assert_eq!(city.get(0), Some("Łódź"));
    }

    #[test]
    fn test_read_csv_table_size_limit() {
        let file = create_temp_csv(b"A\n1\n2\n3\n");
        let options = ReadOptions::default().with_max_file_size(4);
        let result = read_csv_table(file.path(), &options);

        assert!(matches!(result, Err(IngestError::FileTooLarge { .. })));
    }

    #[test]
    fn test_read_csv_text_ragged_rows() {
        let (df, _) = read_csv_text("A,B\n1\n2,3,4\n", b',', Path::new("ragged.csv")).unwrap();

        assert_eq!(df.height(), 2);
        let b = df.column("B").unwrap().str().unwrap();
        assert_eq!(b.get(0), None);
        assert_eq!(b.get(1), Some("3"));
    }

    #[test]
    fn test_unknown_encoding_label() {
        assert!(matches!(
            encoding_for_label("klingon"),
            Err(IngestError::UnknownEncoding { .. })
        ));
        assert_eq!(encoding_for_label("windows-1250").unwrap().name(), "windows-1250");
    }
}
