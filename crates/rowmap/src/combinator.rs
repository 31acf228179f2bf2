use crate::error::MappingError;
use crate::importer::Import;
use crate::record::Record;
use rowmap_domain::{LabeledRow, Value};
use std::fmt;
use std::sync::Arc;

/// Runs several importers over the same row into one accumulating record.
///
/// Parts assign in combination order, so a later part overwrites what an earlier one wrote
/// for the same attribute and leaves everything else untouched. [`Import::import_one`]
/// checks the shapes of all parts before any assignment runs.
///
/// ```rust
/// use rowmap::prelude::*;
///
/// #[derive(Debug, Default, PartialEq, Record)]
/// struct User {
///     name: String,
///     location: String,
/// }
///
/// # fn main() -> Result<(), MappingError> {
/// let registry = Registry::<User>::from_record()?;
/// let combined = CombinedImporter::new()
///     .then(Importer::subset(&registry, ["name"])?)
///     .then(Importer::subset(&registry, ["location"])?);
///
/// let user = combined.import_one(&Row::from(["Rick", "Earth C-137"]))?;
/// assert_eq!(user, User { name: "Rick".into(), location: "Earth C-137".into() });
/// # Ok(())
/// # }
/// ```
pub struct CombinedImporter<T: Record> {
    parts: Vec<Arc<dyn Import<T>>>,
}

impl<T: Record> Clone for CombinedImporter<T> {
    fn clone(&self) -> Self {
        Self { parts: self.parts.clone() }
    }
}

impl<T: Record> fmt::Debug for CombinedImporter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CombinedImporter").field("parts", &self.parts.len()).finish()
    }
}

impl<T: Record> Default for CombinedImporter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Record> CombinedImporter<T> {
    /// No parts yet; imports behave like [`EmptyImporter`](crate::EmptyImporter).
    #[must_use]
    pub const fn new() -> Self {
        Self { parts: Vec::new() }
    }

    #[must_use]
    pub fn then(mut self, importer: impl Import<T> + 'static) -> Self {
        self.push(importer);
        self
    }

    pub fn push(&mut self, importer: impl Import<T> + 'static) {
        self.parts.push(Arc::new(importer));
    }

    /// Appends an importer already shared elsewhere.
    pub fn push_shared(&mut self, importer: Arc<dyn Import<T>>) {
        self.parts.push(importer);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.parts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }
}

impl<T: Record> FromIterator<Arc<dyn Import<T>>> for CombinedImporter<T> {
    fn from_iter<I: IntoIterator<Item = Arc<dyn Import<T>>>>(iter: I) -> Self {
        Self { parts: iter.into_iter().collect() }
    }
}

impl<T: Record> Import<T> for CombinedImporter<T> {
    /// Union of the parts' coverage, first appearance wins the position.
    fn covered(&self) -> Vec<&str> {
        let mut covered: Vec<&str> = Vec::new();
        for id in self.parts.iter().flat_map(|part| part.covered()) {
            if !covered.contains(&id) {
                covered.push(id);
            }
        }
        covered
    }

    fn required_len(&self) -> usize {
        self.parts.iter().map(|part| part.required_len()).max().unwrap_or(0)
    }

    fn check_shape(&self, row: &[Value]) -> Result<(), MappingError> {
        self.parts.iter().try_for_each(|part| part.check_shape(row))
    }

    fn assign(&self, row: &[Value], record: &mut T) -> Result<(), MappingError> {
        self.parts.iter().try_for_each(|part| part.assign(row, record))
    }

    fn assign_labeled(&self, row: &LabeledRow, record: &mut T) -> Result<(), MappingError> {
        self.parts.iter().try_for_each(|part| part.assign_labeled(row, record))
    }
}
