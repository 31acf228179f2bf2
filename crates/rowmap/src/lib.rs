//! Declarative mapping between domain objects and flat tabular rows.
//!
//! A [`Registry`] declares, once per record type, which attributes take part in mapping,
//! in which order, and under which human-readable label. [`Exporter`] turns records into
//! [`Row`]s (or label-keyed [`LabeledRow`]s), [`Importer`] turns rows back into records,
//! and [`CombinedImporter`] chains several importers over the same row with
//! last-write-wins semantics.
//!
//! Field access goes through accessor tables resolved once, when the registry is built:
//! `#[derive(Record)]` generates them for plain structs, [`DynamicRecord`] provides them
//! for schemas only known at runtime.
//!
//! The engine is synchronous and allocation-light. It never logs at use time, never
//! retries and never swallows errors: every failure is a [`MappingError`] returned to the
//! immediate caller, which decides whether to skip, report or abort.
//!
//! ## Example
//!
//! ```rust
//! use rowmap::prelude::*;
//!
//! #[derive(Debug, Default, PartialEq, Record)]
//! struct User {
//!     #[record(label = "Full Name")]
//!     name: String,
//!     location: String,
//! }
//!
//! # fn main() -> Result<(), MappingError> {
//! let registry = Registry::<User>::from_record()?;
//! let exporter = Exporter::new(&registry);
//! let importer = Importer::new(&registry);
//!
//! let rick = User { name: "Rick".into(), location: "Earth C-137".into() };
//!
//! let row = exporter.export_one(&rick)?;
//! assert_eq!(row, Row::from(["Rick", "Earth C-137"]));
//!
//! let labeled = exporter.export_with_labels(&rick)?;
//! assert_eq!(labeled.get("Full Name"), Some(&Value::from("Rick")));
//!
//! assert_eq!(importer.import_one(&row)?, rick);
//! # Ok(())
//! # }
//! ```

extern crate self as rowmap;

mod combinator;
mod convert;
mod dynamic;
mod error;
mod exporter;
mod importer;
mod record;
mod registry;

pub use combinator::CombinedImporter;
pub use convert::{ConversionError, ConversionErrorExt, FromValue, ToValue};
pub use dynamic::DynamicRecord;
pub use error::{MappingError, MappingErrorExt};
pub use exporter::{Exporter, HeaderStyle};
pub use importer::{EmptyImporter, Import, Importer};
pub use record::{Accessor, FieldInfo, Getter, Record, Setter};
pub use registry::{AttributeDefinition, AttributeSpec, Registry, RegistryBuilder};
pub use rowmap_derive::Record;
pub use rowmap_domain::{LabeledRow, Row, Table, Value};

pub mod prelude {
    pub use crate::combinator::CombinedImporter;
    pub use crate::convert::{FromValue, ToValue};
    pub use crate::dynamic::DynamicRecord;
    pub use crate::error::{MappingError, MappingErrorExt};
    pub use crate::exporter::{Exporter, HeaderStyle};
    pub use crate::importer::{EmptyImporter, Import, Importer};
    pub use crate::record::Record;
    pub use crate::registry::{AttributeSpec, Registry};
    pub use rowmap_derive::Record;
    pub use rowmap_domain::{LabeledRow, Row, Table, Value};
}
