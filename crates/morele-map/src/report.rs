//! What the mapper did with each target field.

/// Where a target field's values came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldSource {
    /// Copied from a source column.
    Mapped { column: String },
    /// Every row set to a manual override literal.
    Override { value: String },
    /// Neither mapped nor overridden; filled with the field's fallback.
    Default { value: &'static str },
    /// Neither mapped nor overridden, and the field has no fallback.
    Empty,
}

impl FieldSource {
    /// Short label for tables and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Mapped { .. } => "mapped",
            Self::Override { .. } => "override",
            Self::Default { .. } => "default",
            Self::Empty => "empty",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldReport {
    pub field: &'static str,
    pub source: FieldSource,
    /// Cells replaced by the field's fallback literal.
    pub defaulted: usize,
}

/// Why a mapping entry did not contribute values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The input has no column with that name.
    MissingColumn,
    /// The column exists but its values cannot be rendered as text.
    NotText,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedMapping {
    pub field: &'static str,
    pub column: String,
    pub reason: SkipReason,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingReport {
    pub rows: usize,
    /// One entry per target field, in schema order.
    pub fields: Vec<FieldReport>,
    pub skipped: Vec<SkippedMapping>,
    /// Mapping or override keys that are not target fields.
    pub ignored_fields: Vec<String>,
}

impl MappingReport {
    pub fn field(&self, name: &str) -> Option<&FieldReport> {
        self.fields.iter().find(|report| report.field == name)
    }

    pub fn mapped_count(&self) -> usize {
        self.count_where(|source| matches!(source, FieldSource::Mapped { .. }))
    }

    pub fn override_count(&self) -> usize {
        self.count_where(|source| matches!(source, FieldSource::Override { .. }))
    }

    pub fn empty_count(&self) -> usize {
        self.count_where(|source| matches!(source, FieldSource::Empty))
    }

    /// Total cells filled with fallback literals.
    pub fn defaulted_cells(&self) -> usize {
        self.fields.iter().map(|report| report.defaulted).sum()
    }

    fn count_where(&self, predicate: impl Fn(&FieldSource) -> bool) -> usize {
        self.fields
            .iter()
            .filter(|report| predicate(&report.source))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_by_source() {
        let report = MappingReport {
            rows: 3,
            fields: vec![
                FieldReport {
                    field: "vendorPartNumber",
                    source: FieldSource::Mapped {
                        column: "ID".to_string(),
                    },
                    defaulted: 1,
                },
                FieldReport {
                    field: "currency",
                    source: FieldSource::Default { value: "PLN" },
                    defaulted: 3,
                },
                FieldReport {
                    field: "vat",
                    source: FieldSource::Override {
                        value: "23".to_string(),
                    },
                    defaulted: 0,
                },
                FieldReport {
                    field: "images",
                    source: FieldSource::Empty,
                    defaulted: 0,
                },
            ],
            skipped: Vec::new(),
            ignored_fields: Vec::new(),
        };

        assert_eq!(report.mapped_count(), 1);
        assert_eq!(report.override_count(), 1);
        assert_eq!(report.empty_count(), 1);
        assert_eq!(report.defaulted_cells(), 4);
        assert_eq!(report.field("vat").map(|f| f.source.kind()), Some("override"));
    }
}
