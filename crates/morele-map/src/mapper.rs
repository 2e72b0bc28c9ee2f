//! Schema mapper.
//!
//! Projects an input table onto the Morele schema. For every target field:
//!
//! 1. start with an all-null column as tall as the input;
//! 2. copy the mapped source column, if the mapping names one that exists;
//! 3. replace every row with the manual override, if one is set;
//! 4. fill missing cells of `vendorPartNumber`, `currency` and `availability`
//!    with their fallback literals.
//!
//! Mapping is best-effort: unknown target keys and absent source columns are
//! reported and skipped, never raised.

use polars::prelude::{Column, DataFrame, DataType, IntoColumn, NamedFrom, Series};
use tracing::{debug, info, info_span, warn};

use morele_model::{FieldMapping, ManualOverrides, MappingConfig, TARGET_SCHEMA, default_for};

use crate::error::Result;
use crate::report::{FieldReport, FieldSource, MappingReport, SkipReason, SkippedMapping};

/// Output of a mapping run.
#[derive(Debug, Clone)]
pub struct MappedTable {
    /// Exactly the 20 target columns, all `String`, as tall as the input.
    pub data: DataFrame,
    pub report: MappingReport,
}

/// A cell counts as missing when it is null or blank.
///
/// Whitespace-only cells are filled too, which is stricter than a null-only
/// fill: a `" "` part number becomes `MISSING_SKU` rather than being kept.
pub fn is_missing(cell: Option<&str>) -> bool {
    cell.is_none_or(|value| value.trim().is_empty())
}

/// Maps `input` onto the target schema.
pub fn map_to_schema(
    input: &DataFrame,
    mapping: &FieldMapping,
    overrides: &ManualOverrides,
) -> Result<MappedTable> {
    let height = input.height();
    let span = info_span!("map_to_schema", rows = height, input_columns = input.width());
    let _guard = span.enter();

    let mut report = MappingReport {
        rows: height,
        ..MappingReport::default()
    };
    for field in mapping.unknown_fields().into_iter().chain(overrides.unknown_fields()) {
        warn!(field, "ignoring key that is not a Morele field");
        if !report.ignored_fields.iter().any(|known| known == field) {
            report.ignored_fields.push(field.to_string());
        }
    }

    let mut columns: Vec<Column> = Vec::with_capacity(TARGET_SCHEMA.len());
    for field in TARGET_SCHEMA {
        let mut cells: Vec<Option<String>> = vec![None; height];
        let mut source = FieldSource::Empty;

        if let Some(column) = mapping.source_for(field) {
            match source_cells(input, column) {
                Ok(values) => {
                    cells = values;
                    source = FieldSource::Mapped {
                        column: column.to_string(),
                    };
                }
                Err(reason) => {
                    warn!(field, column, ?reason, "mapped column not usable; field left unfilled");
                    report.skipped.push(SkippedMapping {
                        field,
                        column: column.to_string(),
                        reason,
                    });
                }
            }
        }

        if let Some(value) = overrides.value_for(field) {
            cells = vec![Some(value.to_string()); height];
            source = FieldSource::Override {
                value: value.to_string(),
            };
        }

        let mut defaulted = 0usize;
        if let Some(fallback) = default_for(field) {
            for cell in &mut cells {
                if is_missing(cell.as_deref()) {
                    *cell = Some(fallback.to_string());
                    defaulted += 1;
                }
            }
            if source == FieldSource::Empty {
                source = FieldSource::Default { value: fallback };
            }
        }

        debug!(field, source = source.kind(), defaulted, "field resolved");
        columns.push(Series::new(field.into(), cells).into_column());
        report.fields.push(FieldReport {
            field,
            source,
            defaulted,
        });
    }

    let data = DataFrame::new(columns)?;
    info!(
        rows = height,
        mapped = report.mapped_count(),
        overridden = report.override_count(),
        defaulted_cells = report.defaulted_cells(),
        skipped = report.skipped.len(),
        "mapped input onto Morele schema"
    );
    Ok(MappedTable { data, report })
}

/// Values of a source column as text, positionally.
fn source_cells(input: &DataFrame, name: &str) -> std::result::Result<Vec<Option<String>>, SkipReason> {
    let Some(idx) = input.get_column_index(name) else {
        return Err(SkipReason::MissingColumn);
    };
    let column = &input.get_columns()[idx];
    let text = column
        .cast(&DataType::String)
        .map_err(|_| SkipReason::NotText)?;
    let values = text.str().map_err(|_| SkipReason::NotText)?;
    Ok(values
        .into_iter()
        .map(|value| value.map(str::to_string))
        .collect())
}

/// Stateless mapper bound to one configuration.
///
/// Resolves auto mode against each input's columns before mapping, so the
/// same mapper can be applied to many exports.
#[derive(Debug, Clone, Default)]
pub struct SchemaMapper {
    config: MappingConfig,
}

impl SchemaMapper {
    pub fn new(config: MappingConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &MappingConfig {
        &self.config
    }

    /// The mapping that would be used for `input`.
    pub fn resolve(&self, input: &DataFrame) -> FieldMapping {
        let columns: Vec<&str> = input
            .get_column_names()
            .into_iter()
            .map(|name| name.as_str())
            .collect();
        self.config.resolve_mapping(&columns)
    }

    pub fn map(&self, input: &DataFrame) -> Result<MappedTable> {
        let mapping = self.resolve(input);
        map_to_schema(input, &mapping, &self.config.overrides)
    }
}
