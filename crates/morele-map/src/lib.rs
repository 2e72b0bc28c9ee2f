//! Schema mapping onto the Morele ingestion schema.
//!
//! [`map_to_schema`] is the core transform; [`SchemaMapper`] binds it to a
//! [`MappingConfig`](morele_model::MappingConfig). [`MappingEngine`] proposes
//! mappings for exports whose headers are not known in advance.

pub mod error;
pub mod mapper;
pub mod report;
pub mod suggest;
pub mod utils;

pub use error::{MapError, Result};
pub use mapper::{MappedTable, SchemaMapper, is_missing, map_to_schema};
pub use report::{FieldReport, FieldSource, MappingReport, SkipReason, SkippedMapping};
pub use suggest::{
    DEFAULT_MIN_CONFIDENCE, MappingEngine, MappingSuggestion, MatchKind, SuggestionResult,
};
