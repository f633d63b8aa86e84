//! CLI commands for Shapeforge
//!
//! Both commands load a JSON schema, synthesize it into the process-wide
//! module container, and then either describe the type (`inspect`) or drive
//! an instance of it (`set`).

pub mod error;
pub mod output;

pub mod inspect;
pub mod set;

use shapeforge_core::{GeneratedType, TypeSynthesizer};
use shapeforge_schema::{SchemaFileError, SchemaRequest, SchemaSpec};
use std::path::Path;

use error::HelpfulError;

/// Load a schema file, honoring `--propagate` over the file's own policy.
pub(crate) fn load_spec(path: &Path, propagate: bool) -> Result<SchemaSpec, HelpfulError> {
    let spec = SchemaRequest::load_spec(path).map_err(|err| match err {
        SchemaFileError::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound => {
            HelpfulError::file_not_found(path)
        }
        SchemaFileError::Io { source, .. } => {
            HelpfulError::cannot_read_file(path, &source.to_string())
        }
        SchemaFileError::Json(err) => HelpfulError::json_parse_error(path, &err.to_string()),
        SchemaFileError::Schema(err) => HelpfulError::invalid_schema(path, &err.to_string()),
    })?;

    Ok(if propagate {
        spec.with_suppress_failures(false)
    } else {
        spec
    })
}

/// Synthesize the schema at `path`. A suppressed failure is still an error
/// for the CLI, since there is no type to work with.
pub(crate) fn synthesize(path: &Path, propagate: bool) -> anyhow::Result<GeneratedType> {
    let spec = load_spec(path, propagate)?;
    let class_name = spec.class_name().to_string();

    match TypeSynthesizer::new(spec).create_class() {
        Ok(Some(ty)) => Ok(ty),
        Ok(None) => Err(HelpfulError::no_type_produced(&class_name).into()),
        Err(err) => Err(HelpfulError::synthesis_failed(&class_name, &err.to_string()).into()),
    }
}
