//! Raw schema requests as they arrive from files or other callers.
//!
//! ```json
//! {
//!   "class_name": "Person",
//!   "suppress_failures": false,
//!   "properties": [
//!     { "name": "Name", "type": "string" },
//!     { "name": "Age",  "type": "int64" }
//!   ]
//! }
//! ```

use serde::{Deserialize, Serialize};
use shapeforge_types::DataType;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::schema_spec::{PropertyMap, SchemaError, SchemaSpec};

/// Errors that can occur while loading a schema request.
#[derive(Debug, Error)]
pub enum SchemaFileError {
    #[error("Failed to read schema file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid schema JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Schema(#[from] SchemaError),
}

/// One property entry of a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertySpec {
    pub name: String,
    #[serde(rename = "type")]
    pub data_type: DataType,
}

impl PropertySpec {
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }
}

/// Unvalidated request; convert with [`SchemaSpec::try_from`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaRequest {
    pub class_name: String,

    /// `None` when the mapping was absent or `null`.
    #[serde(default)]
    pub properties: Option<Vec<PropertySpec>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suppress_failures: Option<bool>,
}

impl SchemaRequest {
    pub fn from_json_str(raw: &str) -> Result<Self, SchemaFileError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, SchemaFileError> {
        let raw = std::fs::read_to_string(path).map_err(|source| SchemaFileError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    /// Load and validate in one step.
    pub fn load_spec(path: &Path) -> Result<SchemaSpec, SchemaFileError> {
        Ok(SchemaSpec::try_from(Self::from_path(path)?)?)
    }
}

impl TryFrom<SchemaRequest> for SchemaSpec {
    type Error = SchemaError;

    fn try_from(request: SchemaRequest) -> Result<Self, Self::Error> {
        let properties = request.properties.map(|entries| {
            entries
                .into_iter()
                .map(|p| (p.name, p.data_type))
                .collect::<PropertyMap>()
        });
        SchemaSpec::from_parts(
            properties,
            request.class_name,
            request.suppress_failures.unwrap_or(true),
        )
    }
}
