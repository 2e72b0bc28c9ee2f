//! Vendor export ingestion.
//!
//! Loads a product-export CSV into an all-text Polars DataFrame. The column
//! set is whatever the vendor put in the header row; nothing about the target
//! schema is assumed here.

pub mod csv;
pub mod error;

pub use crate::csv::{
    CsvHeaders, MAX_CSV_FILE_SIZE, ReadOptions, check_file_size_with_limit, decode_bytes,
    encoding_for_label, normalize_header, read_csv_table, read_csv_text,
};
pub use error::{IngestError, Result};
