//! The type-synthesis engine.
//!
//! `create_class` runs entirely under the module container's lock:
//!
//! 1. lock the container (the global one unless another was supplied)
//! 2. reserve the class name, failing on a duplicate
//! 3. resolve the Notify operation every setter calls
//! 4. emit a backing field and an accessor pair per property, in schema order
//! 5. finalize the descriptor and register it
//!
//! Emission happens in a private [`TypeBuilder`] that is only registered once
//! complete, so a failure at any step leaves no trace in the container.

use shapeforge_schema::SchemaSpec;
use shapeforge_types::DataType;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::contract::NotifyPropertyChanged;
use crate::error::SynthesisError;
use crate::generated::{
    AccessorPair, FieldDescriptor, GeneratedInstance, GeneratedType, NotifyFn,
    PropertyDescriptor, TypeDescriptor,
};
use crate::registry::ModuleContainer;

/// Synthesizes one class from a validated [`SchemaSpec`].
#[derive(Debug, Clone)]
pub struct TypeSynthesizer {
    spec: SchemaSpec,
    container: Arc<ModuleContainer>,
}

impl TypeSynthesizer {
    /// Synthesize into the process-wide container.
    pub fn new(spec: SchemaSpec) -> Self {
        Self::with_container(spec, ModuleContainer::global())
    }

    /// Synthesize into a specific container.
    pub fn with_container(spec: SchemaSpec, container: Arc<ModuleContainer>) -> Self {
        Self { spec, container }
    }

    pub fn spec(&self) -> &SchemaSpec {
        &self.spec
    }

    pub fn container(&self) -> &Arc<ModuleContainer> {
        &self.container
    }

    /// Create the class, applying the schema's failure-suppression policy.
    ///
    /// Returns `Ok(None)` for a suppressed failure and the untouched
    /// [`SynthesisError`] otherwise.
    pub fn create_class(&self) -> Result<Option<GeneratedType>, SynthesisError> {
        match self.try_create_class() {
            Ok(ty) => Ok(Some(ty)),
            Err(err) if self.spec.suppress_failures() => {
                warn!(
                    "Suppressed synthesis failure for '{}': {}",
                    self.spec.class_name(),
                    err
                );
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    /// Create the class, always reporting failures.
    pub fn try_create_class(&self) -> Result<GeneratedType, SynthesisError> {
        let mut module = self.container.lock()?;

        let mut builder = TypeBuilder::define(self.container.name(), self.spec.class_name());
        if module.contains_key(builder.class_name()) {
            return Err(SynthesisError::DuplicateClass {
                class_name: builder.class_name().to_string(),
                module: self.container.name().to_string(),
            });
        }

        let notify = resolve_notify();

        for (name, data_type) in self.spec.properties().iter() {
            builder.define_property(name, data_type, notify)?;
        }

        let ty = builder.finish();
        module.insert(ty.class_name().to_string(), ty.clone());

        info!(
            "Synthesized type '{}' with {} properties in module '{}'",
            ty.class_name(),
            ty.properties().len(),
            ty.module()
        );
        Ok(ty)
    }
}

/// Synthesize `spec` into the process-wide container.
pub fn create_class(spec: SchemaSpec) -> Result<Option<GeneratedType>, SynthesisError> {
    TypeSynthesizer::new(spec).create_class()
}

fn resolve_notify() -> NotifyFn {
    <GeneratedInstance as NotifyPropertyChanged>::notify
}

/// In-progress type definition. Not visible outside this module until
/// [`finish`](TypeBuilder::finish).
struct TypeBuilder {
    class_name: String,
    module: String,
    properties: Vec<PropertyDescriptor>,
    index: HashMap<String, usize>,
}

impl TypeBuilder {
    fn define(module: &str, class_name: &str) -> Self {
        Self {
            class_name: class_name.to_string(),
            module: module.to_string(),
            properties: Vec::new(),
            index: HashMap::new(),
        }
    }

    fn class_name(&self) -> &str {
        &self.class_name
    }

    fn define_property(
        &mut self,
        name: &str,
        data_type: &DataType,
        notify: NotifyFn,
    ) -> Result<(), SynthesisError> {
        if name.trim().is_empty() || self.index.contains_key(name) {
            return Err(SynthesisError::InvalidPropertyName {
                class_name: self.class_name.clone(),
                property: name.to_string(),
            });
        }
        if !data_type.is_field_representable() {
            return Err(SynthesisError::UnsupportedType {
                class_name: self.class_name.clone(),
                property: name.to_string(),
                data_type: data_type.clone(),
            });
        }

        let slot = self.properties.len();
        let field = FieldDescriptor {
            name: format!("_{}", name),
            data_type: data_type.clone(),
            slot,
        };
        let accessors = AccessorPair {
            getter: format!("get_{}", name),
            setter: format!("set_{}", name),
            property: name.to_string(),
            slot,
            notify,
        };

        debug!(
            "Defined {}.{}: {} (field {}, slot {})",
            self.class_name, name, data_type, field.name, slot
        );

        self.index.insert(name.to_string(), slot);
        self.properties.push(PropertyDescriptor {
            name: name.to_string(),
            data_type: data_type.clone(),
            field,
            accessors,
        });
        Ok(())
    }

    fn finish(self) -> GeneratedType {
        GeneratedType::from_descriptor(TypeDescriptor {
            class_name: self.class_name,
            module: self.module,
            properties: self.properties,
        })
    }
}
