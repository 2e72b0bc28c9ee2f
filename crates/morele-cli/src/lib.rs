//! Library side of the `morele` command-line tool.

pub mod logging;
pub mod pipeline;
