//! Runtime Type Synthesis
//!
//! Builds new property-bag types at runtime from a [`SchemaSpec`]. Every
//! synthesized type has one private backing field and one public accessor
//! pair per schema property, and every write broadcasts a change notification
//! naming the property.
//!
//! ```
//! use shapeforge_core::{NotifyPropertyChanged, TypeSynthesizer};
//! use shapeforge_schema::{DataType, PropertyMap, SchemaSpec};
//!
//! let spec = SchemaSpec::new(
//!     PropertyMap::new()
//!         .with("Name", DataType::String)
//!         .with("Age", DataType::Int64),
//!     "DocPerson",
//! )
//! .unwrap();
//!
//! let person = TypeSynthesizer::new(spec).create_class().unwrap().unwrap();
//! let mut alice = person.instantiate();
//! alice.subscribe(|_, event| println!("{} changed", event.property_name));
//! alice.set("Name", "Alice").unwrap();
//! assert_eq!(alice.get_as::<String>("Name").unwrap(), "Alice");
//! ```
//!
//! # Modules
//!
//! - [`contract`]: change notification and error-state capabilities
//! - [`registry`]: the shared [`ModuleContainer`] types are registered in
//! - [`synthesizer`]: [`TypeSynthesizer`], the engine
//! - [`generated`]: [`GeneratedType`] descriptors and their instances

pub mod contract;
pub mod error;
pub mod generated;
pub mod registry;
pub mod synthesizer;

pub use contract::{
    BaseContract, ChangeNotifier, DataErrorInfo, ErrorState, NotifyPropertyChanged,
    PropertyChanged, SubscriptionId,
};
pub use error::{AccessError, SynthesisError};
pub use generated::{
    AccessorPair, FieldDescriptor, GeneratedInstance, GeneratedType, PropertyDescriptor,
    PropertySummary, TypeSummary,
};
pub use registry::{ModuleContainer, DEFAULT_MODULE_NAME};
pub use synthesizer::{create_class, TypeSynthesizer};
