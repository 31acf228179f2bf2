//! # Importers
//!
//! Import follows a default-construct-then-assign model: the record is built through
//! [`Default`], then every attribute the importer covers is assigned from the row slot at
//! that attribute's registry position. Fields nobody covers keep their default value.
//!
//! [`Import`] is the seam shared by [`Importer`], [`EmptyImporter`] and
//! [`CombinedImporter`](crate::CombinedImporter), so combinators accept any of them,
//! including other combinators.

use crate::error::{MappingError, MappingErrorExt};
use crate::record::Record;
use crate::registry::Registry;
use rowmap_domain::{LabeledRow, Value};
use std::borrow::Cow;
use std::fmt;

/// An importer definition: which attributes it covers and how it writes them.
pub trait Import<T: Record>: Send + Sync {
    /// Identifiers this importer assigns, in registry order.
    fn covered(&self) -> Vec<&str>;

    /// Minimum number of values a positional row must hold.
    fn required_len(&self) -> usize;

    /// # Errors
    /// Returns [`MappingError::RowShape`] if `row` is shorter than [`required_len`](Self::required_len).
    fn check_shape(&self, row: &[Value]) -> Result<(), MappingError> {
        let expected = self.required_len();
        if row.len() < expected {
            return Err(MappingError::row_shape(expected, row.len()));
        }
        Ok(())
    }

    /// Writes the covered attributes of a positional row into `record`.
    ///
    /// Row length is not checked upfront; a short row can leave earlier attributes written.
    /// [`import_one`](Self::import_one) checks the shape once before calling this.
    ///
    /// # Errors
    /// Fails on a short row, a missing setter or a value the field cannot hold.
    fn assign(&self, row: &[Value], record: &mut T) -> Result<(), MappingError>;

    /// Writes the covered attributes of a label-keyed row into `record`.
    ///
    /// # Errors
    /// Fails on a missing key, a missing setter or a value the field cannot hold.
    fn assign_labeled(&self, row: &LabeledRow, record: &mut T) -> Result<(), MappingError>;

    /// # Errors
    /// See [`assign`](Self::assign).
    fn import_one(&self, row: &[Value]) -> Result<T, MappingError> {
        self.check_shape(row)?;
        let mut record = T::default();
        self.assign(row, &mut record)?;
        Ok(record)
    }

    /// # Errors
    /// See [`assign_labeled`](Self::assign_labeled).
    fn import_labeled(&self, row: &LabeledRow) -> Result<T, MappingError> {
        let mut record = T::default();
        self.assign_labeled(row, &mut record)?;
        Ok(record)
    }

    /// Lazily imports each row; one result per input, in input order.
    fn import_many<I, R>(&self, rows: I) -> impl Iterator<Item = Result<T, MappingError>>
    where
        Self: Sized,
        I: IntoIterator<Item = R>,
        R: AsRef<[Value]>,
    {
        rows.into_iter().map(move |row| self.import_one(row.as_ref()))
    }
}

/// Imports a fixed set of registry attributes: all of them, or a subset.
pub struct Importer<T> {
    registry: Registry<T>,
    positions: Vec<usize>,
}

impl<T> Clone for Importer<T> {
    fn clone(&self) -> Self {
        Self { registry: self.registry.clone(), positions: self.positions.clone() }
    }
}

impl<T> fmt::Debug for Importer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let covered: Vec<_> =
            self.positions.iter().map(|&p| self.registry.attributes()[p].identifier()).collect();
        f.debug_struct("Importer").field("covered", &covered).finish()
    }
}

impl<T: Record> Importer<T> {
    /// Covers every registered attribute.
    #[must_use]
    pub fn new(registry: &Registry<T>) -> Self {
        Self { registry: registry.clone(), positions: (0..registry.len()).collect() }
    }

    /// Covers only `identifiers`, still reading each from its registry position.
    ///
    /// # Errors
    /// Returns [`MappingError::UnknownAttribute`] if an identifier is not registered.
    pub fn subset<I, S>(registry: &Registry<T>, identifiers: I) -> Result<Self, MappingError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut positions = identifiers
            .into_iter()
            .map(|id| {
                let id = id.as_ref();
                registry.position(id).ok_or_else(|| MappingError::UnknownAttribute {
                    identifier: Cow::Owned(id.to_owned()),
                    context: None,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        positions.sort_unstable();
        positions.dedup();

        Ok(Self { registry: registry.clone(), positions })
    }

    #[must_use]
    pub const fn registry(&self) -> &Registry<T> {
        &self.registry
    }

    fn write(&self, position: usize, value: Value, record: &mut T) -> Result<(), MappingError> {
        let identifier = self.registry.attributes()[position].identifier();
        let set = self
            .registry
            .accessor(position)
            .setter()
            .ok_or_else(|| MappingError::missing_accessor(Cow::Owned(identifier.to_owned())))?;
        set(record, value).context(format!("attribute `{identifier}`"))
    }
}

impl<T: Record> Import<T> for Importer<T> {
    fn covered(&self) -> Vec<&str> {
        self.positions.iter().map(|&p| self.registry.attributes()[p].identifier()).collect()
    }

    fn required_len(&self) -> usize {
        self.positions.last().map_or(0, |&p| p + 1)
    }

    fn assign(&self, row: &[Value], record: &mut T) -> Result<(), MappingError> {
        for &position in &self.positions {
            let value = row
                .get(position)
                .ok_or_else(|| MappingError::row_shape(self.required_len(), row.len()))?;
            self.write(position, value.clone(), record)?;
        }
        Ok(())
    }

    fn assign_labeled(&self, row: &LabeledRow, record: &mut T) -> Result<(), MappingError> {
        for &position in &self.positions {
            let key = self.registry.attributes()[position].display_name();
            let value = row
                .get(key)
                .ok_or_else(|| MappingError::RowShape {
                    expected: self.positions.len(),
                    found: row.len(),
                    context: Some(Cow::Owned(format!("missing column `{key}`"))),
                })?
                .clone();
            self.write(position, value, record)?;
        }
        Ok(())
    }
}

/// Covers nothing: every row, of any length, imports as `T::default()`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmptyImporter;

impl<T: Record> Import<T> for EmptyImporter {
    fn covered(&self) -> Vec<&str> {
        Vec::new()
    }

    fn required_len(&self) -> usize {
        0
    }

    fn assign(&self, _row: &[Value], _record: &mut T) -> Result<(), MappingError> {
        Ok(())
    }

    fn assign_labeled(&self, _row: &LabeledRow, _record: &mut T) -> Result<(), MappingError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AttributeSpec, ConversionError, DynamicRecord};
    use rowmap_domain::Row;

    fn users() -> Registry<DynamicRecord> {
        let mut builder = Registry::builder();
        builder.register_labeled("name", "Full Name").and_then(|b| b.register("location")).unwrap();
        builder.build()
    }

    #[test]
    fn full_importer_reads_every_slot() {
        let importer = Importer::new(&users());
        let record = importer.import_one(&Row::from(["Rick", "Earth C-137", "ignored"])).unwrap();

        assert_eq!(record.get("name"), Some(&Value::from("Rick")));
        assert_eq!(record.get("location"), Some(&Value::from("Earth C-137")));
        assert_eq!(record.fields().len(), 2);
    }

    #[test]
    fn short_rows_fail_with_shape() {
        let importer = Importer::new(&users());
        let err = importer.import_one(&Row::from(["Rick"])).unwrap_err();
        assert!(matches!(err, MappingError::RowShape { expected: 2, found: 1, .. }));
    }

    #[test]
    fn subset_reads_registry_positions() {
        let importer = Importer::subset(&users(), ["location"]).unwrap();
        assert_eq!(importer.covered(), ["location"]);
        assert_eq!(importer.required_len(), 2);

        let record = importer.import_one(&Row::from(["Rick", "Earth C-137"])).unwrap();
        assert_eq!(record.get("name"), None);
        assert_eq!(record.get("location"), Some(&Value::from("Earth C-137")));

        let leading = Importer::subset(&users(), ["name"]).unwrap();
        assert_eq!(leading.required_len(), 1);
        assert!(leading.import_one(&Row::from(["Rick"])).is_ok());
    }

    #[test]
    fn subset_rejects_unknown_identifiers() {
        let err = Importer::subset(&users(), ["name", "age"]).unwrap_err();
        assert!(matches!(err, MappingError::UnknownAttribute { ref identifier, .. } if identifier == "age"));
    }

    #[test]
    fn labeled_import_uses_labels_and_reports_missing_keys() {
        let importer = Importer::new(&users());
        let row: LabeledRow = [("Full Name", "Rick"), ("location", "Earth C-137")].into_iter().collect();
        let record = importer.import_labeled(&row).unwrap();
        assert_eq!(record.get("name"), Some(&Value::from("Rick")));

        let partial: LabeledRow = [("name", "Rick")].into_iter().collect();
        assert!(matches!(importer.import_labeled(&partial), Err(MappingError::RowShape { .. })));
    }

    #[test]
    fn setter_failures_name_the_attribute() {
        let mut builder = Registry::<DynamicRecord>::builder();
        builder
            .register_spec(AttributeSpec::new("age").setter(|r: &mut DynamicRecord, v: Value| {
                let age = match v {
                    Value::Int(i) => i,
                    other => {
                        return Err(ConversionError::Mismatch {
                            expected: "int",
                            found: other.kind(),
                            context: None,
                        });
                    },
                };
                r.insert("age", age);
                Ok(())
            }))
            .unwrap();

        let err = Importer::new(&builder.build()).import_one(&Row::from(["seventy"])).unwrap_err();
        assert!(matches!(err, MappingError::InvalidValue { .. }));
        assert!(err.to_string().contains("attribute `age`"), "{err}");
    }

    #[test]
    fn direct_assign_reports_short_rows() {
        let importer = Importer::subset(&users(), ["location"]).unwrap();
        let mut record = DynamicRecord::new();

        let err = importer.assign(&Row::from(["Rick"]), &mut record).unwrap_err();
        assert!(matches!(err, MappingError::RowShape { expected: 2, found: 1, .. }));
        assert_eq!(record, DynamicRecord::new());
    }

    #[test]
    fn empty_importer_ignores_rows() {
        let importer = EmptyImporter;
        let record: DynamicRecord = importer.import_one(&[]).unwrap();
        assert_eq!(record, DynamicRecord::default());

        let record: DynamicRecord = importer.import_one(&Row::from(["a", "b", "c"])).unwrap();
        assert_eq!(record, DynamicRecord::default());
    }

    #[test]
    fn import_many_is_lazy_and_ordered() {
        let importer = Importer::new(&users());
        let rows = vec![Row::from(["Rick", "C-137"]), Row::from(["Morty"]), Row::from(["Beth", "C-137"])];

        let mut results = importer.import_many(&rows);
        assert_eq!(results.next().unwrap().unwrap().get("name"), Some(&Value::from("Rick")));
        assert!(results.next().unwrap().is_err());
        assert_eq!(results.next().unwrap().unwrap().get("name"), Some(&Value::from("Beth")));
        assert!(results.next().is_none());
    }
}
