//! Load, map and write stages behind the `transform` and `suggest` commands.
//!
//! Configuration is layered: a config file (or auto mode when there is
//! neither a file nor `--map`), then `--auto`, then `--map` and `--set`
//! entries, which replace same-named keys.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use chrono::{DateTime, Local};
use polars::prelude::DataFrame;
use tracing::{debug, info, info_span};

use morele_ingest::{CsvHeaders, ReadOptions, encoding_for_label, read_csv_table};
use morele_map::{MappedTable, MappingEngine, SchemaMapper, SuggestionResult};
use morele_model::{MappingConfig, MappingMode, parse_assignment};
use morele_output::{output_path_in, write_csv};

use crate::logging::redact_value;

/// Configuration sources for one run, lowest precedence first.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConfigLayers<'a> {
    pub config_file: Option<&'a Path>,
    pub auto: bool,
    /// Raw `FIELD=COLUMN` assignments.
    pub maps: &'a [String],
    /// Raw `FIELD=VALUE` assignments.
    pub sets: &'a [String],
}

pub fn build_config(layers: &ConfigLayers<'_>) -> Result<MappingConfig> {
    let mut config = match layers.config_file {
        Some(path) => MappingConfig::load(path)
            .with_context(|| format!("load mapping config {}", path.display()))?,
        None if layers.maps.is_empty() => MappingConfig::auto(),
        None => MappingConfig::default(),
    };
    if layers.auto {
        config.mode = MappingMode::Auto;
    }
    for raw in layers.maps {
        let (field, column) = parse_assignment(raw).context("parse --map")?;
        config.mappings.insert(field, column);
    }
    for raw in layers.sets {
        let (field, value) = parse_assignment(raw).context("parse --set")?;
        config.overrides.insert(field, value);
    }
    Ok(config)
}

/// Parses a separator argument: one ASCII character, or `tab` / `\t`.
pub fn parse_separator(raw: &str) -> std::result::Result<u8, String> {
    match raw {
        "tab" | "\\t" | "\t" => Ok(b'\t'),
        _ => {
            let mut chars = raw.chars();
            match (chars.next(), chars.next()) {
                (Some(ch), None) if ch.is_ascii() => Ok(ch as u8),
                _ => Err(format!("separator must be a single ASCII character, got {raw:?}")),
            }
        }
    }
}

pub fn read_options(separator: u8, encoding: Option<&str>) -> Result<ReadOptions> {
    let mut options = ReadOptions::default().with_separator(separator);
    if let Some(label) = encoding {
        options = options.with_encoding(encoding_for_label(label)?);
    }
    Ok(options)
}

/// Where the mapped table goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputTarget {
    /// A timestamped file inside this directory.
    Directory(PathBuf),
    /// Exactly this path.
    File(PathBuf),
    /// Map only.
    DryRun,
}

impl OutputTarget {
    pub fn resolve(&self, now: DateTime<Local>) -> Option<PathBuf> {
        match self {
            Self::Directory(dir) => Some(output_path_in(dir, now)),
            Self::File(path) => Some(path.clone()),
            Self::DryRun => None,
        }
    }
}

#[derive(Debug)]
pub struct TransformRun {
    pub input: DataFrame,
    pub headers: CsvHeaders,
    pub config: MappingConfig,
    pub mapped: MappedTable,
    /// Written file; `None` on a dry run.
    pub output: Option<PathBuf>,
}

pub fn load_input(path: &Path, options: &ReadOptions) -> Result<(DataFrame, CsvHeaders)> {
    read_csv_table(path, options).with_context(|| format!("read {}", path.display()))
}

/// Reads `input`, maps it with `config` and writes the result to `target`.
pub fn run_transform(
    input: &Path,
    options: &ReadOptions,
    config: MappingConfig,
    target: &OutputTarget,
    now: DateTime<Local>,
) -> Result<TransformRun> {
    let span = info_span!("transform", input = %input.display());
    let _guard = span.enter();

    let (frame, headers) = load_input(input, options)?;
    for (field, value) in config.overrides.iter() {
        debug!(field, value = redact_value(value), "manual override");
    }

    let mapper = SchemaMapper::new(config);
    let mapped = mapper.map(&frame).context("map input onto schema")?;

    let output = target.resolve(now);
    if let Some(path) = &output {
        write_csv(&mapped.data, path).with_context(|| format!("write {}", path.display()))?;
    } else {
        info!("dry run; output not written");
    }

    Ok(TransformRun {
        input: frame,
        headers,
        config: mapper.config().clone(),
        mapped,
        output,
    })
}

/// Suggests a mapping for the columns of `input`.
pub fn run_suggest(
    input: &Path,
    options: &ReadOptions,
    min_confidence: f32,
) -> Result<(CsvHeaders, SuggestionResult)> {
    if !(0.0..=1.0).contains(&min_confidence) {
        bail!("--min-confidence must be between 0 and 1, got {min_confidence}");
    }
    let (_, headers) = load_input(input, options)?;
    let engine = MappingEngine::new(min_confidence);
    let result = engine.suggest(&headers.columns);
    info!(
        columns = headers.len(),
        min_confidence = engine.min_confidence(),
        suggested = result.suggestions.len(),
        "suggested mapping"
    );
    Ok((headers, result))
}
