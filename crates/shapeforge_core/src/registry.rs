//! The shared namespace synthesized types are registered in.
//!
//! One process-wide [`ModuleContainer`] is created lazily on first use and
//! lives until exit. All synthesis against it is serialized by a single
//! mutex, so two calls with the same class name always resolve to one success
//! and one `DuplicateClass` failure.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, OnceLock, PoisonError};

use crate::error::SynthesisError;
use crate::generated::GeneratedType;

/// Name of the process-wide container.
pub const DEFAULT_MODULE_NAME: &str = "shapeforge.dynamic";

static GLOBAL_MODULE: OnceLock<Arc<ModuleContainer>> = OnceLock::new();

/// Registry of synthesized types keyed by class name.
#[derive(Debug)]
pub struct ModuleContainer {
    name: String,
    types: Mutex<HashMap<String, GeneratedType>>,
}

impl ModuleContainer {
    /// Create a standalone container, isolated from the global one.
    pub fn new(name: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            name: name.into(),
            types: Mutex::new(HashMap::new()),
        })
    }

    /// The process-wide container, created on first call.
    pub fn global() -> Arc<Self> {
        Arc::clone(GLOBAL_MODULE.get_or_init(|| Self::new(DEFAULT_MODULE_NAME)))
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Exclusive access for the duration of one synthesis.
    pub(crate) fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, GeneratedType>>, SynthesisError> {
        self.types.lock().map_err(|_| SynthesisError::ContainerPoisoned {
            module: self.name.clone(),
        })
    }

    // Entries are only inserted once fully built, so a poisoned map is still
    // consistent for reads.
    fn read(&self) -> MutexGuard<'_, HashMap<String, GeneratedType>> {
        self.types.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Look up a previously synthesized type.
    pub fn get(&self, class_name: &str) -> Option<GeneratedType> {
        self.read().get(class_name).cloned()
    }

    pub fn contains(&self, class_name: &str) -> bool {
        self.read().contains_key(class_name)
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// Registered class names, sorted.
    pub fn class_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.read().keys().cloned().collect();
        names.sort();
        names
    }
}
