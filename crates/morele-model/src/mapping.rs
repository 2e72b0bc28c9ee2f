//! Field mapping and manual override types.
//!
//! A [`FieldMapping`] names, for each target field, the source column its
//! values are copied from. [`ManualOverrides`] holds one literal per target
//! field that replaces every row of that field. Both accept keys outside the
//! target schema; those keys are carried along and ignored by the mapper.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::schema::{TARGET_SCHEMA, is_target_field};

/// Target field → source column.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldMapping(BTreeMap<String, String>);

impl FieldMapping {
    pub fn new() -> Self {
        Self::default()
    }

    /// Maps every target field to the identically named source column, for
    /// the columns that are actually present.
    pub fn identity<S: AsRef<str>>(columns: &[S]) -> Self {
        let mut mapping = Self::new();
        for field in TARGET_SCHEMA {
            if columns.iter().any(|column| column.as_ref() == field) {
                mapping.insert(field, field);
            }
        }
        mapping
    }

    pub fn insert(&mut self, field: impl Into<String>, column: impl Into<String>) {
        self.0.insert(field.into(), column.into());
    }

    /// Source column for a target field.
    pub fn source_for(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Keys that are not target fields.
    pub fn unknown_fields(&self) -> Vec<&str> {
        self.0
            .keys()
            .map(String::as_str)
            .filter(|key| !is_target_field(key))
            .collect()
    }

    /// Entries from `other` replace entries with the same key.
    pub fn extend(&mut self, other: FieldMapping) {
        self.0.extend(other.0);
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for FieldMapping {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// A literal as written in a configuration file.
///
/// TOML and JSON let users write `vat = 23` as well as `vat = "23"`; both end
/// up as the text `23` in the output.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum OverrideLiteral {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
}

impl fmt::Display for OverrideLiteral {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(value) => f.write_str(value),
            Self::Integer(value) => write!(f, "{value}"),
            Self::Float(value) => f.write_str(&format_numeric(*value)),
            Self::Bool(value) => write!(f, "{value}"),
        }
    }
}

/// Formats a floating-point number without trailing zeros.
pub fn format_numeric(v: f64) -> String {
    let s = format!("{v}");
    if !s.contains('.') {
        return s;
    }
    let trimmed = s.trim_end_matches('0').trim_end_matches('.');
    if trimmed.is_empty() {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Target field → literal applied to every output row.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(
    from = "BTreeMap<String, OverrideLiteral>",
    into = "BTreeMap<String, String>"
)]
pub struct ManualOverrides(BTreeMap<String, String>);

impl ManualOverrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.0.insert(field.into(), value.into());
    }

    pub fn value_for(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Keys that are not target fields.
    pub fn unknown_fields(&self) -> Vec<&str> {
        self.0
            .keys()
            .map(String::as_str)
            .filter(|key| !is_target_field(key))
            .collect()
    }

    pub fn extend(&mut self, other: ManualOverrides) {
        self.0.extend(other.0);
    }
}

impl From<BTreeMap<String, OverrideLiteral>> for ManualOverrides {
    fn from(raw: BTreeMap<String, OverrideLiteral>) -> Self {
        Self(
            raw.into_iter()
                .map(|(field, literal)| (field, literal.to_string()))
                .collect(),
        )
    }
}

impl From<ManualOverrides> for BTreeMap<String, String> {
    fn from(overrides: ManualOverrides) -> Self {
        overrides.0
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for ManualOverrides {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

/// Parses a `FIELD=VALUE` assignment as given on the command line.
///
/// The field is trimmed; the value is kept verbatim so that literals with
/// leading spaces survive. An empty value is allowed.
pub fn parse_assignment(raw: &str) -> Result<(String, String)> {
    let Some((field, value)) = raw.split_once('=') else {
        return Err(ModelError::InvalidAssignment {
            raw: raw.to_string(),
        });
    };
    let field = field.trim();
    if field.is_empty() {
        return Err(ModelError::InvalidAssignment {
            raw: raw.to_string(),
        });
    }
    Ok((field.to_string(), value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_only_includes_present_columns() {
        let columns = vec!["vendorPartNumber".to_string(), "Cena".to_string()];
        let mapping = FieldMapping::identity(&columns);
        assert_eq!(mapping.len(), 1);
        assert_eq!(mapping.source_for("vendorPartNumber"), Some("vendorPartNumber"));
        assert_eq!(mapping.source_for("salePriceBrutto"), None);
    }

    #[test]
    fn unknown_fields_are_reported() {
        let mapping: FieldMapping = [("vat", "VAT"), ("sku", "ID")].into_iter().collect();
        assert_eq!(mapping.unknown_fields(), vec!["sku"]);
    }

    #[test]
    fn literal_display() {
        assert_eq!(OverrideLiteral::Integer(23).to_string(), "23");
        assert_eq!(OverrideLiteral::Float(23.0).to_string(), "23");
        assert_eq!(OverrideLiteral::Float(9.50).to_string(), "9.5");
        assert_eq!(OverrideLiteral::Bool(true).to_string(), "true");
        assert_eq!(OverrideLiteral::Text("PLN".into()).to_string(), "PLN");
    }

    #[test]
    fn format_numeric_keeps_integers() {
        assert_eq!(format_numeric(100.0), "100");
        assert_eq!(format_numeric(0.0), "0");
        assert_eq!(format_numeric(1.25), "1.25");
    }

    #[test]
    fn parse_assignment_splits_on_first_equals() {
        assert_eq!(
            parse_assignment("vendorDescription=a=b").unwrap(),
            ("vendorDescription".to_string(), "a=b".to_string())
        );
        assert_eq!(
            parse_assignment(" vat =23").unwrap(),
            ("vat".to_string(), "23".to_string())
        );
        assert_eq!(
            parse_assignment("images=").unwrap(),
            ("images".to_string(), String::new())
        );
        assert!(parse_assignment("vat").is_err());
        assert!(parse_assignment("=23").is_err());
    }
}
