//! # Attribute Registry
//!
//! A [`Registry`] is the ordered list of attributes one record type exposes to mapping.
//! It is declared once through a [`RegistryBuilder`], frozen by
//! [`RegistryBuilder::build`], and then shared read-only (it is an `Arc` inside) by every
//! exporter and importer created from it.
//!
//! ```rust
//! use rowmap::prelude::*;
//! use std::sync::LazyLock;
//!
//! #[derive(Default, Record)]
//! struct User {
//!     name: String,
//!     location: String,
//! }
//!
//! static USERS: LazyLock<Registry<User>> = LazyLock::new(|| {
//!     let mut builder = Registry::builder();
//!     builder
//!         .register_labeled("name", "Full Name")
//!         .and_then(|b| b.register("location"))
//!         .expect("static declaration");
//!     builder.build()
//! });
//!
//! assert_eq!(USERS.labels().collect::<Vec<_>>(), ["Full Name", "location"]);
//! ```

use crate::convert::ConversionError;
use crate::error::MappingError;
use crate::record::{Accessor, Record};
use fxhash::FxHashMap;
use rowmap_domain::Value;
use std::borrow::Cow;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// One registered attribute: identifier, optional label and position in the sort order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeDefinition {
    identifier: Cow<'static, str>,
    label: Option<Cow<'static, str>>,
    order: usize,
}

impl AttributeDefinition {
    #[must_use]
    pub fn identifier(&self) -> &str {
        &self.identifier
    }

    #[must_use]
    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Sort key: the explicit order if one was given, otherwise the declaration index.
    #[must_use]
    pub const fn order(&self) -> usize {
        self.order
    }

    /// The label if set, else the identifier.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.identifier)
    }
}

/// Full registration form: label, explicit order and custom accessors.
///
/// A custom getter or setter replaces the record's own accessor for that half only.
pub struct AttributeSpec<T> {
    identifier: Cow<'static, str>,
    label: Option<Cow<'static, str>>,
    order: Option<usize>,
    accessor: Accessor<T>,
}

impl<T> fmt::Debug for AttributeSpec<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttributeSpec")
            .field("identifier", &self.identifier)
            .field("label", &self.label)
            .field("order", &self.order)
            .field("accessor", &self.accessor)
            .finish()
    }
}

impl<T> AttributeSpec<T> {
    fn display_name(&self) -> &str {
        self.label.as_deref().unwrap_or(&self.identifier)
    }
}

impl<T: 'static> AttributeSpec<T> {
    pub fn new(identifier: impl Into<Cow<'static, str>>) -> Self {
        Self { identifier: identifier.into(), label: None, order: None, accessor: Accessor::none() }
    }

    #[must_use]
    pub fn label(mut self, label: impl Into<Cow<'static, str>>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[must_use]
    pub const fn order(mut self, order: usize) -> Self {
        self.order = Some(order);
        self
    }

    /// Computed export column or custom formatting.
    #[must_use]
    pub fn getter(mut self, get: impl Fn(&T) -> Option<Value> + Send + Sync + 'static) -> Self {
        self.accessor = Accessor::read_only(get).or(self.accessor);
        self
    }

    /// Custom parsing on import.
    #[must_use]
    pub fn setter(
        mut self,
        set: impl Fn(&mut T, Value) -> Result<(), ConversionError> + Send + Sync + 'static,
    ) -> Self {
        self.accessor = Accessor::write_only(set).or(self.accessor);
        self
    }
}

/// Collects attribute declarations for a [`Registry`].
pub struct RegistryBuilder<T> {
    specs: Vec<AttributeSpec<T>>,
}

impl<T> fmt::Debug for RegistryBuilder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryBuilder").field("specs", &self.specs).finish()
    }
}

impl<T: Record> Default for RegistryBuilder<T> {
    fn default() -> Self {
        Self { specs: Vec::new() }
    }
}

impl<T: Record> RegistryBuilder<T> {
    /// Appends `identifier` without a label.
    ///
    /// # Errors
    /// Returns [`MappingError::DuplicateAttribute`] if the identifier is already registered.
    pub fn register(
        &mut self,
        identifier: impl Into<Cow<'static, str>>,
    ) -> Result<&mut Self, MappingError> {
        self.register_spec(AttributeSpec::new(identifier))
    }

    /// Appends `identifier` with a human-readable label.
    ///
    /// # Errors
    /// Returns [`MappingError::DuplicateAttribute`] if the identifier is already registered,
    /// whatever its label.
    pub fn register_labeled(
        &mut self,
        identifier: impl Into<Cow<'static, str>>,
        label: impl Into<Cow<'static, str>>,
    ) -> Result<&mut Self, MappingError> {
        self.register_spec(AttributeSpec::new(identifier).label(label))
    }

    /// # Errors
    /// Returns [`MappingError::DuplicateAttribute`] if the identifier is already registered,
    /// or if its display name is already the display name of another attribute.
    pub fn register_spec(&mut self, spec: AttributeSpec<T>) -> Result<&mut Self, MappingError> {
        if self.specs.iter().any(|s| s.identifier == spec.identifier) {
            return Err(MappingError::DuplicateAttribute {
                identifier: spec.identifier,
                context: None,
            });
        }
        if let Some(taken) = self.specs.iter().find(|s| s.display_name() == spec.display_name()) {
            return Err(MappingError::DuplicateAttribute {
                identifier: Cow::Owned(spec.display_name().to_owned()),
                context: Some(Cow::Owned(format!("display name of `{}`", taken.identifier))),
            });
        }
        self.specs.push(spec);
        Ok(self)
    }

    /// Sorts the declarations, resolves one accessor per attribute and freezes the result.
    ///
    /// Identifiers the record cannot resolve are kept; using them fails later with
    /// [`MappingError::MissingAccessor`].
    #[must_use]
    pub fn build(self) -> Registry<T> {
        let mut specs: Vec<(usize, AttributeSpec<T>)> = self.specs.into_iter().enumerate().collect();
        specs.sort_by_key(|(index, spec)| (spec.order.unwrap_or(*index), *index));

        let mut attributes = Vec::with_capacity(specs.len());
        let mut accessors = Vec::with_capacity(specs.len());
        let mut positions = FxHashMap::default();

        for (position, (index, spec)) in specs.into_iter().enumerate() {
            let accessor = match T::accessor(&spec.identifier) {
                Some(own) => spec.accessor.or(own),
                None => spec.accessor,
            };
            positions.insert(spec.identifier.clone(), position);
            attributes.push(AttributeDefinition {
                identifier: spec.identifier,
                label: spec.label,
                order: spec.order.unwrap_or(index),
            });
            accessors.push(accessor);
        }

        debug!(
            record = std::any::type_name::<T>(),
            attributes = attributes.len(),
            "Attribute registry built"
        );

        Registry { inner: Arc::new(RegistryInner { attributes, accessors, positions }) }
    }
}

struct RegistryInner<T> {
    attributes: Vec<AttributeDefinition>,
    accessors: Vec<Accessor<T>>,
    positions: FxHashMap<Cow<'static, str>, usize>,
}

/// The frozen, ordered attribute list of one record type.
///
/// Cloning is cheap; clones share the same declarations and accessors.
pub struct Registry<T> {
    inner: Arc<RegistryInner<T>>,
}

impl<T> Clone for Registry<T> {
    fn clone(&self) -> Self {
        Self { inner: Arc::clone(&self.inner) }
    }
}

impl<T> fmt::Debug for Registry<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry").field("attributes", &self.inner.attributes).finish()
    }
}

impl<T: Record> Registry<T> {
    #[must_use]
    pub fn builder() -> RegistryBuilder<T> {
        RegistryBuilder::default()
    }

    /// Registers every field the record exposes through [`Record::fields`], in
    /// declaration order and with the declared labels.
    ///
    /// # Errors
    /// Returns [`MappingError::DuplicateAttribute`] if the record lists an identifier twice.
    pub fn from_record() -> Result<Self, MappingError> {
        let mut builder = Self::builder();
        for field in T::fields() {
            let mut spec = AttributeSpec::new(field.identifier);
            if let Some(label) = field.label {
                spec = spec.label(label);
            }
            builder.register_spec(spec)?;
        }
        Ok(builder.build())
    }

    #[must_use]
    pub fn empty() -> Self {
        Self::builder().build()
    }
}

impl<T> Registry<T> {
    /// Definitions in registry order.
    #[must_use]
    pub fn attributes(&self) -> &[AttributeDefinition] {
        &self.inner.attributes
    }

    /// The label if set, else the identifier; `None` if `identifier` is not registered.
    #[must_use]
    pub fn label_for(&self, identifier: &str) -> Option<&str> {
        self.get(identifier).map(AttributeDefinition::display_name)
    }

    #[must_use]
    pub fn position(&self, identifier: &str) -> Option<usize> {
        self.inner.positions.get(identifier).copied()
    }

    #[must_use]
    pub fn get(&self, identifier: &str) -> Option<&AttributeDefinition> {
        self.position(identifier).map(|position| &self.inner.attributes[position])
    }

    #[must_use]
    pub fn contains(&self, identifier: &str) -> bool {
        self.inner.positions.contains_key(identifier)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.attributes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.attributes.is_empty()
    }

    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        self.inner.attributes.iter().map(AttributeDefinition::identifier)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.inner.attributes.iter().map(AttributeDefinition::display_name)
    }

    pub(crate) fn accessor(&self, position: usize) -> &Accessor<T> {
        &self.inner.accessors[position]
    }
}
