//! Mapping configuration files.
//!
//! A configuration bundles the mapping mode, an explicit field mapping, and
//! manual overrides. It is stored as TOML or JSON, picked by file extension:
//!
//! ```toml
//! mode = "explicit"
//!
//! [mappings]
//! vendorPartNumber = "ID oferty"
//! salePriceBrutto = "Cena PL"
//!
//! [overrides]
//! vat = 23
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::mapping::{FieldMapping, ManualOverrides};

/// How target fields find their source columns.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MappingMode {
    /// Fields are taken from identically named input columns. Explicit
    /// mappings, when present, win for their fields.
    Auto,
    /// Only the explicit mappings are used.
    #[default]
    Explicit,
}

/// On-disk configuration format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigFormat {
    Toml,
    Json,
}

impl ConfigFormat {
    pub fn from_path(path: &Path) -> Result<Self> {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("toml") => Ok(Self::Toml),
            Some("json") => Ok(Self::Json),
            _ => Err(ModelError::UnsupportedFormat {
                path: path.to_path_buf(),
            }),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MappingConfig {
    pub mode: MappingMode,
    pub mappings: FieldMapping,
    pub overrides: ManualOverrides,
}

impl MappingConfig {
    /// Auto mode with no explicit mappings or overrides.
    pub fn auto() -> Self {
        Self {
            mode: MappingMode::Auto,
            ..Self::default()
        }
    }

    pub fn explicit(mappings: FieldMapping, overrides: ManualOverrides) -> Self {
        Self {
            mode: MappingMode::Explicit,
            mappings,
            overrides,
        }
    }

    #[must_use]
    pub fn with_mapping(mut self, field: impl Into<String>, column: impl Into<String>) -> Self {
        self.mappings.insert(field, column);
        self
    }

    #[must_use]
    pub fn with_override(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.overrides.insert(field, value);
        self
    }

    /// The concrete mapping for an input with the given columns.
    pub fn resolve_mapping<S: AsRef<str>>(&self, columns: &[S]) -> FieldMapping {
        match self.mode {
            MappingMode::Explicit => self.mappings.clone(),
            MappingMode::Auto => {
                let mut mapping = FieldMapping::identity(columns);
                mapping.extend(self.mappings.clone());
                mapping
            }
        }
    }

    /// Keys in mappings or overrides that are not target fields, deduplicated.
    pub fn unknown_fields(&self) -> Vec<String> {
        let mut unknown: Vec<String> = self
            .mappings
            .unknown_fields()
            .into_iter()
            .chain(self.overrides.unknown_fields())
            .map(str::to_string)
            .collect();
        unknown.sort();
        unknown.dedup();
        unknown
    }

    pub fn from_toml_str(text: &str, path: &Path) -> Result<Self> {
        toml::from_str(text).map_err(|source| ModelError::TomlParse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_json_str(text: &str, path: &Path) -> Result<Self> {
        serde_json::from_str(text).map_err(|source| ModelError::JsonParse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Loads a configuration, choosing the parser by file extension.
    pub fn load(path: &Path) -> Result<Self> {
        let format = ConfigFormat::from_path(path)?;
        let text = fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        match format {
            ConfigFormat::Toml => Self::from_toml_str(&text, path),
            ConfigFormat::Json => Self::from_json_str(&text, path),
        }
    }

    pub fn render(&self, format: ConfigFormat) -> Result<String> {
        match format {
            ConfigFormat::Toml => Ok(toml::to_string_pretty(self)?),
            ConfigFormat::Json => Ok(serde_json::to_string_pretty(self)?),
        }
    }

    /// Writes the configuration, choosing the format by file extension.
    pub fn save(&self, path: &Path) -> Result<()> {
        let text = self.render(ConfigFormat::from_path(path)?)?;
        fs::write(path, text).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn missing_mode_means_explicit() {
        let config =
            MappingConfig::from_toml_str("[mappings]\nvat = \"VAT\"\n", Path::new("a.toml"))
                .unwrap();
        assert_eq!(config.mode, MappingMode::Explicit);
        assert_eq!(config.mappings.source_for("vat"), Some("VAT"));
    }

    #[test]
    fn auto_mode_lets_explicit_entries_win() {
        let config = MappingConfig::auto().with_mapping("currency", "Waluta");
        let columns = ["currency", "Waluta", "vat"];
        let mapping = config.resolve_mapping(&columns);
        assert_eq!(mapping.source_for("currency"), Some("Waluta"));
        assert_eq!(mapping.source_for("vat"), Some("vat"));
    }

    #[test]
    fn explicit_mode_ignores_same_name_columns() {
        let config = MappingConfig::default().with_mapping("vat", "Stawka");
        let mapping = config.resolve_mapping(&["currency"]);
        assert_eq!(mapping.source_for("currency"), None);
        assert_eq!(mapping.source_for("vat"), Some("Stawka"));
    }

    #[test]
    fn format_is_picked_by_extension() {
        assert_eq!(
            ConfigFormat::from_path(&PathBuf::from("m.TOML")).unwrap(),
            ConfigFormat::Toml
        );
        assert_eq!(
            ConfigFormat::from_path(&PathBuf::from("m.json")).unwrap(),
            ConfigFormat::Json
        );
        assert!(matches!(
            ConfigFormat::from_path(&PathBuf::from("m.yaml")),
            Err(ModelError::UnsupportedFormat { .. })
        ));
    }

    #[test]
    fn unknown_fields_are_merged() {
        let config = MappingConfig::default()
            .with_mapping("sku", "ID")
            .with_override("sku", "x")
            .with_override("tax", "23")
            .with_override("vat", "23");
        assert_eq!(config.unknown_fields(), vec!["sku", "tax"]);
    }
}
