//! CSV header parsing and normalization.

use std::collections::BTreeSet;

/// Result of CSV header analysis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvHeaders {
    /// Column names as used in the loaded table (trimmed, unique, non-empty).
    pub columns: Vec<String>,
    /// Header cells as they appeared in the file.
    pub raw: Vec<String>,
}

impl CsvHeaders {
    /// Builds headers from raw header cells.
    ///
    /// Blank cells become `column_<n>` (1-based position) and repeated names
    /// get a `.1`, `.2`, ... suffix, so every column can be addressed by name.
    pub fn from_raw<I, S>(cells: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let raw: Vec<String> = cells
            .into_iter()
            .map(|cell| cell.as_ref().to_string())
            .collect();
        let mut seen = BTreeSet::new();
        let mut columns = Vec::with_capacity(raw.len());
        for (idx, cell) in raw.iter().enumerate() {
            let mut name = normalize_header(cell);
            if name.is_empty() {
                name = format!("column_{}", idx + 1);
            }
            let base = name.clone();
            let mut suffix = 1usize;
            while seen.contains(&name) {
                name = format!("{base}.{suffix}");
                suffix += 1;
            }
            seen.insert(name.clone());
            columns.push(name);
        }
        Self { columns, raw }
    }

    /// Returns the number of columns.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns true if there are no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Columns whose loaded name differs from the header cell.
    pub fn renamed(&self) -> Vec<(&str, &str)> {
        self.raw
            .iter()
            .zip(&self.columns)
            .filter(|(raw, column)| raw.as_str() != column.as_str())
            .filter(|(raw, column)| normalize_header(raw) != column.as_str())
            .map(|(raw, column)| (raw.as_str(), column.as_str()))
            .collect()
    }
}

/// Normalizes a header value: strips a stray BOM and trims the ends.
///
/// Internal whitespace is kept so that mappings can name the column exactly
/// as it appears in the file.
pub fn normalize_header(value: &str) -> String {
    value.trim_matches('\u{feff}').trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_header() {
        assert_eq!(normalize_header("  ID oferty  "), "ID oferty");
        assert_eq!(normalize_header("\u{feff}Cena PL"), "Cena PL");
        assert_eq!(normalize_header("Cena \t PL"), "Cena \t PL");
        assert_eq!(normalize_header(" ID  oferty "), "ID  oferty");
    }

    #[test]
    fn test_blank_headers_get_positional_names() {
        let headers = CsvHeaders::from_raw(["Marka", "", " "]);
        assert_eq!(headers.columns, vec!["Marka", "column_2", "column_3"]);
        assert_eq!(headers.renamed(), vec![("", "column_2"), (" ", "column_3")]);
    }

    #[test]
    fn test_duplicate_headers_are_suffixed() {
        let headers = CsvHeaders::from_raw(["Marka", "Marka", "Marka "]);
        assert_eq!(headers.columns, vec!["Marka", "Marka.1", "Marka.2"]);
        assert_eq!(headers.len(), 3);
    }

    #[test]
    fn test_trimmed_headers_are_not_reported_as_renamed() {
        let headers = CsvHeaders::from_raw([" EAN "]);
        assert!(headers.renamed().is_empty());
    }
}
