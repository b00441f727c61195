//! Attribute parsing for the `Persist` derive.
//!
//! - `types` - Enum definitions for attribute values
//! - `container` - Struct-level attributes and `ObjectMetadata`
//! - `field` - Field-level attributes and `FieldMetadata`
//! - `type_utils` - Type analysis utilities
//! - `parse` - `parse_nested_meta` entry points

mod container;
mod field;
mod parse;
mod type_utils;
mod types;

pub use container::{ObjectMetadata, DEFAULT_CRATE};
pub use field::FieldMetadata;
pub use parse::{parse_rename_strategy, ATTRIBUTE};
pub use type_utils::{collect_idents, is_option_type, path_idents, path_matches, type_arguments, type_idents, type_path};
pub use types::{CapabilityHint, EnumMode, Reach, RenameStrategy, SplitBehavior};
