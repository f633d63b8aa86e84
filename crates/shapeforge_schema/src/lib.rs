//! Schema input for runtime type synthesis.
//!
//! # Two failure tiers
//!
//! 1. **Construction**: a [`SchemaSpec`] needs a property mapping and a
//!    non-blank class name. Violations are caller bugs and always surface as
//!    [`SchemaError`], whatever the suppression policy says.
//! 2. **Synthesis**: failures while building the type are governed by
//!    [`SchemaSpec::suppress_failures`] and live in `shapeforge_core`.
//!
//! # Modules
//!
//! - [`schema_spec`]: the validated [`SchemaSpec`] and its ordered [`PropertyMap`]
//! - [`request`]: serde-facing [`SchemaRequest`] and file loading

pub mod request;
pub mod schema_spec;

pub use request::{PropertySpec, SchemaFileError, SchemaRequest};
pub use schema_spec::{PropertyMap, SchemaError, SchemaSpec};
pub use shapeforge_types::DataType;
