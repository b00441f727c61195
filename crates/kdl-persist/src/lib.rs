//! Persist plain data structs to and from KDL documents.
//!
//! `#[derive(Persist)]` generates an inherent `load` method reading a
//! [`Node`] and a `save` method writing one, plus a [`PersistNode`] impl so
//! the struct can be nested inside other persisted structs.
//!
//! ```ignore
//! use kdl_persist::Persist;
//!
//! #[derive(Default, Persist)]
//! struct Settings {
//!     #[persist(required)]
//!     int_value: i32,
//!     label: Option<String>,
//! }
//!
//! let settings: Settings = kdl_persist::load_str("int_value \"5\"\nlabel \"x\"")?;
//! ```

pub mod loader;

pub use kdl_persist_derive::{Persist, PersistEnum};
pub use kdl_persist_runtime::*;

pub use loader::{load_file, save_file};
