use crate::record::{Accessor, Record};
use rowmap_domain::{LabeledRow, Value};
use serde::{Deserialize, Serialize};

/// A record whose attributes are only known at runtime.
///
/// Every identifier resolves: reading an absent key yields `None` (reported as a missing
/// accessor by the exporter), writing inserts it. Profiles loaded from configuration map
/// onto this type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DynamicRecord {
    fields: LabeledRow,
}

impl DynamicRecord {
    #[must_use]
    pub const fn new() -> Self {
        Self { fields: LabeledRow::new() }
    }

    #[must_use]
    pub fn get(&self, identifier: &str) -> Option<&Value> {
        self.fields.get(identifier)
    }

    pub fn insert(&mut self, identifier: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(identifier, value)
    }

    #[must_use]
    pub const fn fields(&self) -> &LabeledRow {
        &self.fields
    }

    #[must_use]
    pub fn into_fields(self) -> LabeledRow {
        self.fields
    }
}

impl From<LabeledRow> for DynamicRecord {
    fn from(fields: LabeledRow) -> Self {
        Self { fields }
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for DynamicRecord {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self { fields: iter.into_iter().collect() }
    }
}

impl Record for DynamicRecord {
    fn accessor(identifier: &str) -> Option<Accessor<Self>> {
        let read_key = identifier.to_owned();
        let write_key = identifier.to_owned();
        Some(Accessor::new(
            move |record: &Self| record.fields.get(&read_key).cloned(),
            move |record: &mut Self, value| {
                record.fields.insert(write_key.clone(), value);
                Ok(())
            },
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accessor_reads_and_inserts_by_key() {
        let accessor = DynamicRecord::accessor("planet").expect("dynamic records resolve every key");
        let mut record = DynamicRecord::new();

        let get = accessor.getter().expect("getter");
        assert_eq!(get(&record), None);

        let set = accessor.setter().expect("setter");
        set(&mut record, Value::from("Earth C-137")).unwrap();
        assert_eq!(get(&record), Some(Value::from("Earth C-137")));
        assert_eq!(record.fields().len(), 1);
    }

    #[test]
    fn deserializes_from_a_flat_json_object() {
        let record: DynamicRecord =
            serde_json::from_str(r#"{"name":"Rick","age":70}"#).expect("valid record");
        assert_eq!(record.get("name"), Some(&Value::from("Rick")));
        assert_eq!(record.get("age"), Some(&Value::Int(70)));
    }
}
