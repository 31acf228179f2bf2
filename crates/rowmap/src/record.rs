use crate::convert::{ConversionError, FromValue, ToValue};
use rowmap_domain::Value;
use std::fmt;
use std::sync::Arc;

/// Reads one attribute out of a record. `None` means the record lacks the field.
pub type Getter<T> = Arc<dyn Fn(&T) -> Option<Value> + Send + Sync>;

/// Writes one attribute into a record.
pub type Setter<T> = Arc<dyn Fn(&mut T, Value) -> Result<(), ConversionError> + Send + Sync>;

/// A typed getter/setter pair for one attribute identifier.
///
/// Accessors are resolved once, when a [`Registry`](crate::Registry) is built, so mapping
/// never looks fields up by name at call time. Either half may be absent: a computed
/// export column has only a getter, an import-only column only a setter.
pub struct Accessor<T> {
    getter: Option<Getter<T>>,
    setter: Option<Setter<T>>,
}

impl<T> Clone for Accessor<T> {
    fn clone(&self) -> Self {
        Self { getter: self.getter.clone(), setter: self.setter.clone() }
    }
}

impl<T> fmt::Debug for Accessor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Accessor")
            .field("readable", &self.getter.is_some())
            .field("writable", &self.setter.is_some())
            .finish()
    }
}

impl<T> Accessor<T> {
    /// An accessor with neither half; every use reports a missing accessor.
    #[must_use]
    pub const fn none() -> Self {
        Self { getter: None, setter: None }
    }

    #[must_use]
    pub fn getter(&self) -> Option<&Getter<T>> {
        self.getter.as_ref()
    }

    #[must_use]
    pub fn setter(&self) -> Option<&Setter<T>> {
        self.setter.as_ref()
    }

    /// Fills the halves this accessor lacks from `fallback`.
    #[must_use]
    pub fn or(self, fallback: Self) -> Self {
        Self { getter: self.getter.or(fallback.getter), setter: self.setter.or(fallback.setter) }
    }
}

impl<T: 'static> Accessor<T> {
    pub fn new(
        get: impl Fn(&T) -> Option<Value> + Send + Sync + 'static,
        set: impl Fn(&mut T, Value) -> Result<(), ConversionError> + Send + Sync + 'static,
    ) -> Self {
        Self { getter: Some(Arc::new(get)), setter: Some(Arc::new(set)) }
    }

    pub fn read_only(get: impl Fn(&T) -> Option<Value> + Send + Sync + 'static) -> Self {
        Self { getter: Some(Arc::new(get)), setter: None }
    }

    pub fn write_only(
        set: impl Fn(&mut T, Value) -> Result<(), ConversionError> + Send + Sync + 'static,
    ) -> Self {
        Self { getter: None, setter: Some(Arc::new(set)) }
    }

    /// Accessor over a plain struct field, converting through [`ToValue`]/[`FromValue`].
    ///
    /// This is what `#[derive(Record)]` emits for every mapped field.
    pub fn field<V>(get: fn(&T) -> &V, get_mut: fn(&mut T) -> &mut V) -> Self
    where
        V: ToValue + FromValue + 'static,
    {
        Self::new(
            move |record| Some(get(record).to_value()),
            move |record, value| {
                *get_mut(record) = V::from_value(value)?;
                Ok(())
            },
        )
    }
}

/// Static description of a field exposed by a record type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldInfo {
    pub identifier: &'static str,
    pub label: Option<&'static str>,
}

impl FieldInfo {
    #[must_use]
    pub const fn new(identifier: &'static str, label: Option<&'static str>) -> Self {
        Self { identifier, label }
    }
}

/// A domain object the engine can map.
///
/// Import constructs records through [`Default`] and then assigns covered attributes,
/// so every field not covered by an importer keeps its default value.
///
/// Usually derived:
///
/// ```rust
/// use rowmap::{Record, Registry};
///
/// #[derive(Default, Record)]
/// struct Planet {
///     name: String,
///     #[record(label = "Moons")]
///     moons: u32,
/// }
///
/// let registry = Registry::<Planet>::from_record().unwrap();
/// assert_eq!(registry.label_for("moons"), Some("Moons"));
/// ```
pub trait Record: Default + Sized + 'static {
    /// Resolves the accessor for `identifier`, or `None` if the record has no such field.
    fn accessor(identifier: &str) -> Option<Accessor<Self>>;

    /// Fields in declaration order, used by [`Registry::from_record`](crate::Registry::from_record).
    fn fields() -> &'static [FieldInfo] {
        &[]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, PartialEq)]
    struct Planet {
        name: String,
        moons: u32,
    }

    #[test]
    fn field_accessor_converts_both_ways() {
        let accessor = Accessor::<Planet>::field::<u32>(|p| &p.moons, |p| &mut p.moons);
        let mut planet = Planet { name: "Mars".to_owned(), moons: 2 };

        let get = accessor.getter().expect("getter");
        assert_eq!(get(&planet), Some(Value::Int(2)));

        let set = accessor.setter().expect("setter");
        set(&mut planet, Value::from("3")).expect("moons should parse");
        assert_eq!(planet.moons, 3);
        assert!(set(&mut planet, Value::from("many")).is_err());
    }

    #[test]
    fn or_fills_missing_halves() {
        let computed = Accessor::<Planet>::read_only(|p| Some(Value::from(p.name.to_uppercase())));
        let merged = computed.or(Accessor::field::<String>(|p| &p.name, |p| &mut p.name));

        let mut planet = Planet { name: "mars".to_owned(), moons: 0 };
        assert_eq!(merged.getter().map(|get| get(&planet)), Some(Some(Value::from("MARS"))));

        let set = merged.setter().expect("setter from fallback");
        set(&mut planet, Value::from("venus")).unwrap();
        assert_eq!(planet.name, "venus");
    }
}
