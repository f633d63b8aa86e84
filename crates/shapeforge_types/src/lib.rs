//! Canonical types for Shapeforge.
//!
//! [`DataType`] is the single source of truth for the semantic type of a
//! schema property. [`Value`] is what a synthesized backing field holds.

pub mod data_type;
pub mod value;

pub use data_type::DataType;
pub use value::{Value, ValueParseError, ValueTypeError};
