//! Synthesized types and their instances.
//!
//! A [`GeneratedType`] is a shared, immutable descriptor: one private backing
//! field and one public accessor pair per schema property, in schema order.
//! A [`GeneratedInstance`] owns a slot per backing field plus its own
//! [`BaseContract`], so instances never share storage or subscribers.
//!
//! Instances are single-owner. Writes and subscription changes take
//! `&mut self`; share an instance across threads behind a caller-owned lock.

use serde::Serialize;
use shapeforge_types::{DataType, Value, ValueTypeError};
use std::fmt;
use std::sync::Arc;

use crate::contract::{
    BaseContract, DataErrorInfo, NotifyPropertyChanged, PropertyChanged, SubscriptionId,
    BASE_CONTRACT,
};
use crate::error::AccessError;

/// The Notify operation a setter invokes after storing its value.
pub(crate) type NotifyFn = fn(&GeneratedInstance, &str);

/// Private storage behind one property.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub(crate) name: String,
    pub(crate) data_type: DataType,
    pub(crate) slot: usize,
}

impl FieldDescriptor {
    /// Conventional name, `_<property>`.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data_type(&self) -> &DataType {
        &self.data_type
    }

    pub fn slot(&self) -> usize {
        self.slot
    }
}

/// Public get/set pair bound to one backing field.
#[derive(Clone)]
pub struct AccessorPair {
    pub(crate) getter: String,
    pub(crate) setter: String,
    pub(crate) property: String,
    pub(crate) slot: usize,
    pub(crate) notify: NotifyFn,
}

impl AccessorPair {
    pub fn getter_name(&self) -> &str {
        &self.getter
    }

    pub fn setter_name(&self) -> &str {
        &self.setter
    }

    /// Current value of the backing field. No side effects.
    fn get<'a>(&self, instance: &'a GeneratedInstance) -> &'a Value {
        &instance.slots[self.slot]
    }

    /// Store into the backing field, then broadcast the property name.
    /// The value has already been type-checked against the field.
    fn set(&self, instance: &mut GeneratedInstance, value: Value) {
        instance.slots[self.slot] = value;
        (self.notify)(instance, &self.property);
    }
}

impl fmt::Debug for AccessorPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessorPair")
            .field("getter", &self.getter)
            .field("setter", &self.setter)
            .field("slot", &self.slot)
            .finish()
    }
}

/// One public property of a generated type.
#[derive(Debug, Clone)]
pub struct PropertyDescriptor {
    pub(crate) name: String,
    pub(crate) data_type: DataType,
    pub(crate) field: FieldDescriptor,
    pub(crate) accessors: AccessorPair,
}

impl PropertyDescriptor {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data_type(&self) -> &DataType {
        &self.data_type
    }

    pub fn field(&self) -> &FieldDescriptor {
        &self.field
    }

    pub fn accessors(&self) -> &AccessorPair {
        &self.accessors
    }
}

#[derive(Debug)]
pub(crate) struct TypeDescriptor {
    pub(crate) class_name: String,
    pub(crate) module: String,
    pub(crate) properties: Vec<PropertyDescriptor>,
}

/// Handle to a synthesized type. Cloning is cheap and yields the same type.
#[derive(Clone)]
pub struct GeneratedType {
    inner: Arc<TypeDescriptor>,
}

/// Serializable view of a generated type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TypeSummary {
    pub class_name: String,
    pub module: String,
    pub contracts: Vec<String>,
    pub properties: Vec<PropertySummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropertySummary {
    pub name: String,
    #[serde(rename = "type")]
    pub data_type: DataType,
    pub backing_field: String,
    pub getter: String,
    pub setter: String,
}

impl GeneratedType {
    pub(crate) fn from_descriptor(descriptor: TypeDescriptor) -> Self {
        Self {
            inner: Arc::new(descriptor),
        }
    }

    pub fn class_name(&self) -> &str {
        &self.inner.class_name
    }

    /// Name of the module container the type was registered in.
    pub fn module(&self) -> &str {
        &self.inner.module
    }

    /// Public properties in schema order.
    pub fn properties(&self) -> &[PropertyDescriptor] {
        &self.inner.properties
    }

    pub fn property(&self, name: &str) -> Option<&PropertyDescriptor> {
        self.inner.properties.iter().find(|p| p.name == name)
    }

    pub fn property_names(&self) -> Vec<&str> {
        self.inner.properties.iter().map(|p| p.name.as_str()).collect()
    }

    pub fn fields(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.inner.properties.iter().map(|p| &p.field)
    }

    /// Whether the type carries the named base capability.
    pub fn implements(&self, capability: &str) -> bool {
        BASE_CONTRACT.contains(&capability)
    }

    /// True when both handles refer to the same synthesized type.
    pub fn same_type(&self, other: &GeneratedType) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }

    /// Create an instance with every backing field at its type's zero value.
    pub fn instantiate(&self) -> GeneratedInstance {
        GeneratedInstance {
            ty: self.clone(),
            slots: self
                .fields()
                .map(|field| field.data_type.default_value())
                .collect(),
            contract: BaseContract::new(),
        }
    }

    pub fn summary(&self) -> TypeSummary {
        TypeSummary {
            class_name: self.inner.class_name.clone(),
            module: self.inner.module.clone(),
            contracts: BASE_CONTRACT.iter().map(|c| c.to_string()).collect(),
            properties: self
                .inner
                .properties
                .iter()
                .map(|p| PropertySummary {
                    name: p.name.clone(),
                    data_type: p.data_type.clone(),
                    backing_field: p.field.name.clone(),
                    getter: p.accessors.getter.clone(),
                    setter: p.accessors.setter.clone(),
                })
                .collect(),
        }
    }
}

impl PartialEq for GeneratedType {
    fn eq(&self, other: &Self) -> bool {
        self.same_type(other)
    }
}

impl fmt::Debug for GeneratedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneratedType")
            .field("class_name", &self.inner.class_name)
            .field("module", &self.inner.module)
            .field("properties", &self.property_names())
            .finish()
    }
}

/// An object of a synthesized type.
pub struct GeneratedInstance {
    ty: GeneratedType,
    slots: Vec<Value>,
    contract: BaseContract<GeneratedInstance>,
}

impl GeneratedInstance {
    pub fn generated_type(&self) -> &GeneratedType {
        &self.ty
    }

    fn unknown_property(&self, name: &str) -> AccessError {
        AccessError::UnknownProperty {
            class_name: self.ty.class_name().to_string(),
            property: name.to_string(),
        }
    }

    /// Read a property through its get accessor.
    pub fn get(&self, name: &str) -> Result<&Value, AccessError> {
        let property = self
            .ty
            .property(name)
            .ok_or_else(|| self.unknown_property(name))?;
        Ok(property.accessors.get(self))
    }

    /// Read a property and convert it to a Rust type.
    pub fn get_as<T>(&self, name: &str) -> Result<T, AccessError>
    where
        T: for<'a> TryFrom<&'a Value, Error = ValueTypeError>,
    {
        Ok(T::try_from(self.get(name)?)?)
    }

    /// Write a property through its set accessor.
    ///
    /// On success every current subscriber is notified exactly once with
    /// `name`. A rejected write stores nothing and notifies no one.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) -> Result<(), AccessError> {
        let value = value.into();
        let ty = self.ty.clone();
        let property = ty
            .property(name)
            .ok_or_else(|| self.unknown_property(name))?;
        if !property.data_type.accepts(&value) {
            return Err(AccessError::TypeMismatch {
                class_name: ty.class_name().to_string(),
                property: name.to_string(),
                expected: property.data_type.clone(),
                found: value.kind_name(),
            });
        }

        property.accessors.set(self, value);
        Ok(())
    }

    /// Current values in property order.
    pub fn values(&self) -> Vec<(&str, &Value)> {
        self.ty
            .properties()
            .iter()
            .map(|p| (p.name(), p.accessors.get(self)))
            .collect()
    }

    pub fn subscriber_count(&self) -> usize {
        self.contract.changes.subscriber_count()
    }
}

impl NotifyPropertyChanged for GeneratedInstance {
    fn subscribe<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: Fn(&Self, &PropertyChanged) + Send + Sync + 'static,
    {
        self.contract.changes.subscribe(handler)
    }

    fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.contract.changes.unsubscribe(id)
    }

    fn notify(&self, property_name: &str) {
        self.contract.changes.notify(self, property_name);
    }
}

impl DataErrorInfo for GeneratedInstance {
    fn has_errors(&self) -> bool {
        self.contract.errors.has_errors()
    }

    fn get_errors(&self, property_name: &str) -> Vec<String> {
        self.contract.errors.get_errors(property_name)
    }

    fn subscribe_errors_changed<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: Fn(&Self, &PropertyChanged) + Send + Sync + 'static,
    {
        self.contract.errors_changed.subscribe(handler)
    }

    fn unsubscribe_errors_changed(&mut self, id: SubscriptionId) -> bool {
        self.contract.errors_changed.unsubscribe(id)
    }
}

impl fmt::Debug for GeneratedInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = f.debug_struct(self.ty.class_name());
        for (name, value) in self.values() {
            out.field(name, value);
        }
        out.finish()
    }
}
