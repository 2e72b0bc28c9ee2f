//! CSV reading utilities.

mod header;
mod reader;

pub use header::{CsvHeaders, normalize_header};
pub use reader::{
    MAX_CSV_FILE_SIZE, ReadOptions, check_file_size_with_limit, decode_bytes, encoding_for_label,
    read_csv_table, read_csv_text,
};
