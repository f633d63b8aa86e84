//! Validated synthesis input.
//!
//! A [`SchemaSpec`] can only be built from a present property mapping and a
//! non-blank class name. Those checks are caller misuse and fail eagerly,
//! independent of the failure-suppression policy carried by the spec itself.

use shapeforge_types::DataType;
use thiserror::Error;

/// Errors raised while constructing a [`SchemaSpec`]. Never suppressed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("Wrong parameters: property mapping is missing")]
    MissingProperties,

    #[error("Wrong parameters: class name is empty or whitespace")]
    BlankClassName,
}

/// Ordered mapping of property name to semantic type.
///
/// Iteration follows insertion order. Inserting an existing name replaces its
/// type in place, so names are unique by construction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PropertyMap {
    entries: Vec<(String, DataType)>,
}

impl PropertyMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a property. Returns the previous type, if any.
    pub fn insert(&mut self, name: impl Into<String>, data_type: DataType) -> Option<DataType> {
        let name = name.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == name) {
            Some((_, slot)) => Some(std::mem::replace(slot, data_type)),
            None => {
                self.entries.push((name, data_type));
                None
            }
        }
    }

    /// Builder form of [`insert`](Self::insert).
    pub fn with(mut self, name: impl Into<String>, data_type: DataType) -> Self {
        self.insert(name, data_type);
        self
    }

    pub fn get(&self, name: &str) -> Option<&DataType> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, ty)| ty)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DataType)> {
        self.entries.iter().map(|(name, ty)| (name.as_str(), ty))
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<N: Into<String>> FromIterator<(N, DataType)> for PropertyMap {
    fn from_iter<I: IntoIterator<Item = (N, DataType)>>(iter: I) -> Self {
        let mut map = PropertyMap::new();
        for (name, ty) in iter {
            map.insert(name, ty);
        }
        map
    }
}

/// Validated description of the class to synthesize.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaSpec {
    properties: PropertyMap,
    class_name: String,
    suppress_failures: bool,
}

impl SchemaSpec {
    /// Build a spec that suppresses synthesis failures (the default policy).
    pub fn new(properties: PropertyMap, class_name: impl Into<String>) -> Result<Self, SchemaError> {
        Self::from_parts(Some(properties), class_name, true)
    }

    /// Build a spec from possibly-missing parts.
    ///
    /// A `None` mapping or a blank class name fails regardless of
    /// `suppress_failures`.
    pub fn from_parts(
        properties: Option<PropertyMap>,
        class_name: impl Into<String>,
        suppress_failures: bool,
    ) -> Result<Self, SchemaError> {
        let properties = properties.ok_or(SchemaError::MissingProperties)?;
        let class_name = class_name.into();
        if class_name.trim().is_empty() {
            return Err(SchemaError::BlankClassName);
        }

        Ok(Self {
            properties,
            class_name,
            suppress_failures,
        })
    }

    /// Set the failure-suppression policy used during synthesis.
    pub fn with_suppress_failures(mut self, suppress: bool) -> Self {
        self.suppress_failures = suppress;
        self
    }

    pub fn properties(&self) -> &PropertyMap {
        &self.properties
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn suppress_failures(&self) -> bool {
        self.suppress_failures
    }
}
