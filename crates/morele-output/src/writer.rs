//! CSV writer for mapped tables.
//!
//! Header row is the Morele schema in order; null cells become empty fields.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use polars::prelude::{CsvWriter, DataFrame, SerWriter};
use tracing::info;

use morele_model::TARGET_SCHEMA;

use crate::error::{OutputError, Result};

/// Fails unless `df` has exactly the schema columns in schema order.
pub fn ensure_schema(df: &DataFrame) -> Result<()> {
    let found: Vec<String> = df
        .get_column_names()
        .into_iter()
        .map(|name| name.to_string())
        .collect();
    if found.iter().map(String::as_str).eq(TARGET_SCHEMA) {
        return Ok(());
    }
    Err(OutputError::SchemaMismatch {
        expected: TARGET_SCHEMA.iter().map(|f| (*f).to_string()).collect(),
        found,
    })
}

/// Writes `df` as comma-separated CSV with a header row.
pub fn write_csv_to<W: Write>(df: &DataFrame, writer: W) -> Result<()> {
    ensure_schema(df)?;
    let mut frame = df.clone();
    CsvWriter::new(writer)
        .include_header(true)
        .with_separator(b',')
        .finish(&mut frame)?;
    Ok(())
}

/// Renders `df` as CSV text.
pub fn render_csv(df: &DataFrame) -> Result<String> {
    let mut buffer = Vec::new();
    write_csv_to(df, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}

fn ensure_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|source| OutputError::Io {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    Ok(())
}

/// Writes `df` to `path`, creating parent directories.
pub fn write_csv(df: &DataFrame, path: &Path) -> Result<()> {
    ensure_schema(df)?;
    ensure_parent_dir(path)?;
    let io_error = |source| OutputError::Io {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(io_error)?;
    let mut writer = BufWriter::new(file);
    write_csv_to(df, &mut writer)?;
    writer.flush().map_err(io_error)?;
    info!(path = %path.display(), rows = df.height(), "wrote output CSV");
    Ok(())
}
