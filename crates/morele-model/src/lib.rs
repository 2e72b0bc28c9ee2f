//! Data model for the Morele export transformer.
//!
//! Holds the fixed target schema, the mapping and override types supplied by
//! callers, and the configuration file format that bundles them.

pub mod config;
pub mod error;
pub mod mapping;
pub mod schema;

pub use config::{ConfigFormat, MappingConfig, MappingMode};
pub use error::{ModelError, Result};
pub use mapping::{
    FieldMapping, ManualOverrides, OverrideLiteral, format_numeric, parse_assignment,
};
pub use schema::{
    DEFAULT_AVAILABILITY, DEFAULT_CURRENCY, DEFAULT_FILLS, MISSING_SKU, TARGET_SCHEMA,
    default_for, field_position, is_target_field,
};
