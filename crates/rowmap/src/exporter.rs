use crate::error::MappingError;
use crate::record::Record;
use crate::registry::{AttributeDefinition, Registry};
use rowmap_domain::{LabeledRow, Row, Table, Value};
use std::borrow::Cow;
use std::fmt;

/// Which name a header column carries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum HeaderStyle {
    /// `label_for(identifier)`: the label if set, else the identifier.
    #[default]
    Labels,
    Identifiers,
}

/// Turns records into rows in registry order.
pub struct Exporter<T> {
    registry: Registry<T>,
}

impl<T> Clone for Exporter<T> {
    fn clone(&self) -> Self {
        Self { registry: self.registry.clone() }
    }
}

impl<T> fmt::Debug for Exporter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Exporter").field("registry", &self.registry).finish()
    }
}

impl<T: Record> Exporter<T> {
    #[must_use]
    pub fn new(registry: &Registry<T>) -> Self {
        Self { registry: registry.clone() }
    }

    #[must_use]
    pub const fn registry(&self) -> &Registry<T> {
        &self.registry
    }

    fn read(
        &self,
        position: usize,
        definition: &AttributeDefinition,
        record: &T,
    ) -> Result<Value, MappingError> {
        self.registry
            .accessor(position)
            .getter()
            .and_then(|get| get(record))
            .ok_or_else(|| {
                MappingError::missing_accessor(Cow::Owned(definition.identifier().to_owned()))
            })
    }

    /// Reads every registered attribute of `record`, in registry order.
    ///
    /// An empty registry yields an empty row.
    ///
    /// # Errors
    /// Returns [`MappingError::MissingAccessor`] if the record lacks a registered field.
    pub fn export_one(&self, record: &T) -> Result<Row, MappingError> {
        let attributes = self.registry.attributes();
        let mut row = Row::with_capacity(attributes.len());
        for (position, definition) in attributes.iter().enumerate() {
            row.push(self.read(position, definition, record)?);
        }
        Ok(row)
    }

    /// Lazily exports each record; one result per input, in input order.
    pub fn export_many<'a, I>(
        &'a self,
        records: I,
    ) -> impl Iterator<Item = Result<Row, MappingError>> + 'a
    where
        I: IntoIterator<Item = &'a T>,
        I::IntoIter: 'a,
    {
        records.into_iter().map(move |record| self.export_one(record))
    }

    /// Like [`export_one`](Self::export_one), keyed by `label_for(identifier)`.
    ///
    /// # Errors
    /// Returns [`MappingError::MissingAccessor`] if the record lacks a registered field.
    pub fn export_with_labels(&self, record: &T) -> Result<LabeledRow, MappingError> {
        let attributes = self.registry.attributes();
        let mut row = LabeledRow::with_capacity(attributes.len());
        for (position, definition) in attributes.iter().enumerate() {
            row.insert(definition.display_name(), self.read(position, definition, record)?);
        }
        Ok(row)
    }

    pub fn export_many_with_labels<'a, I>(
        &'a self,
        records: I,
    ) -> impl Iterator<Item = Result<LabeledRow, MappingError>> + 'a
    where
        I: IntoIterator<Item = &'a T>,
        I::IntoIter: 'a,
    {
        records.into_iter().map(move |record| self.export_with_labels(record))
    }

    #[must_use]
    pub fn header(&self, style: HeaderStyle) -> Vec<String> {
        match style {
            HeaderStyle::Labels => self.registry.labels().map(str::to_owned).collect(),
            HeaderStyle::Identifiers => self.registry.identifiers().map(str::to_owned).collect(),
        }
    }

    /// Header plus one row per record.
    ///
    /// # Errors
    /// Stops at the first record that fails to export.
    pub fn export_table<'a, I>(&self, records: I, style: HeaderStyle) -> Result<Table, MappingError>
    where
        I: IntoIterator<Item = &'a T>,
    {
        let mut table = Table::new(self.header(style));
        for record in records {
            table.rows.push(self.export_one(record)?);
        }
        Ok(table)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AttributeSpec, DynamicRecord};

    fn users() -> Registry<DynamicRecord> {
        let mut builder = Registry::builder();
        builder.register_labeled("name", "Full Name").and_then(|b| b.register("location")).unwrap();
        builder.build()
    }

    fn rick() -> DynamicRecord {
        [("name", "Rick"), ("location", "Earth C-137")].into_iter().collect()
    }

    #[test]
    fn exports_in_registry_order() {
        let exporter = Exporter::new(&users());
        let record: DynamicRecord = [("location", "Earth C-137"), ("name", "Rick")].into_iter().collect();

        assert_eq!(exporter.export_one(&record).unwrap(), Row::from(["Rick", "Earth C-137"]));
    }

    #[test]
    fn missing_field_is_reported_by_identifier() {
        let exporter = Exporter::new(&users());
        let record: DynamicRecord = [("name", "Rick")].into_iter().collect();

        let err = exporter.export_one(&record).unwrap_err();
        assert!(matches!(err, MappingError::MissingAccessor { ref identifier, .. } if identifier == "location"));
    }

    #[test]
    fn empty_registry_exports_empty_rows() {
        let exporter = Exporter::new(&Registry::<DynamicRecord>::empty());
        let rows: Vec<_> = exporter.export_many([&rick(), &rick()]).collect::<Result<_, _>>().unwrap();
        assert_eq!(rows, [Row::new(), Row::new()]);
    }

    #[test]
    fn labeled_rows_use_display_names() {
        let labeled = Exporter::new(&users()).export_with_labels(&rick()).unwrap();
        assert_eq!(labeled.keys().collect::<Vec<_>>(), ["Full Name", "location"]);
        assert_eq!(labeled.get("Full Name"), Some(&Value::from("Rick")));
    }

    #[test]
    fn header_styles() {
        let exporter = Exporter::new(&users());
        assert_eq!(exporter.header(HeaderStyle::Labels), ["Full Name", "location"]);
        assert_eq!(exporter.header(HeaderStyle::Identifiers), ["name", "location"]);
    }

    #[test]
    fn computed_getter_appears_in_export() {
        let mut builder = Registry::<DynamicRecord>::builder();
        builder
            .register("name")
            .and_then(|b| {
                b.register_spec(AttributeSpec::new("shout").getter(|r: &DynamicRecord| {
                    r.get("name").map(|v| Value::from(v.to_string().to_uppercase()))
                }))
            })
            .unwrap();

        let row = Exporter::new(&builder.build()).export_one(&rick()).unwrap();
        assert_eq!(row, Row::from(["Rick", "RICK"]));
    }

    #[test]
    fn table_stops_at_first_failure() {
        let exporter = Exporter::new(&users());
        let broken = DynamicRecord::new();

        let table = exporter.export_table([&rick()], HeaderStyle::Identifiers).unwrap();
        assert_eq!(table.width(), 2);
        assert_eq!(table.len(), 1);
        assert!(exporter.export_table([&rick(), &broken], HeaderStyle::Labels).is_err());
    }
}
