//! Output side of the Morele pipeline: CSV rendering and file naming.

pub mod error;
pub mod naming;
pub mod writer;

pub use error::{OutputError, Result};
pub use naming::{OUTPUT_PREFIX, output_file_name, output_path_in, publish_hint, shell_quote};
pub use writer::{ensure_schema, render_csv, write_csv, write_csv_to};
