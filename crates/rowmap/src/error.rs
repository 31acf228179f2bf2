//! # Mapping Errors
//!
//! This module defines the [`MappingError`] enum returned by registries, exporters,
//! importers and combinators. Every failure is synchronous and goes straight back to
//! the caller; nothing in the engine retries or recovers.

use crate::convert::ConversionError;
use std::borrow::Cow;

/// A specialized error enum for mapping failures.
#[rowmap_derive::rowmap_error]
pub enum MappingError {
    /// An identifier was registered twice in the same registry.
    ///
    /// Registry declarations are static; fix the declaration instead of recovering.
    #[error("Duplicate attribute{}: `{identifier}` is already registered", format_context(.context))]
    DuplicateAttribute { identifier: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// The record cannot read or write the field behind a registered identifier.
    #[error("Missing accessor{}: record has no field `{identifier}`", format_context(.context))]
    MissingAccessor { identifier: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// A row holds fewer values than the importer needs.
    #[error("Row shape error{}: expected at least {expected} values, found {found}", format_context(.context))]
    RowShape { expected: usize, found: usize, context: Option<Cow<'static, str>> },

    /// An importer subset names an identifier the registry does not declare.
    #[error("Unknown attribute{}: `{identifier}` is not registered", format_context(.context))]
    UnknownAttribute { identifier: Cow<'static, str>, context: Option<Cow<'static, str>> },

    /// A cell could not be converted into the field type.
    #[error("Invalid value{}: {source}", format_context(.context))]
    InvalidValue { source: ConversionError, context: Option<Cow<'static, str>> },

    /// Internal fallback for logic errors.
    #[error("Internal mapping error{}: {message}", format_context(.context))]
    Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
}

impl MappingError {
    pub(crate) const fn missing_accessor(identifier: Cow<'static, str>) -> Self {
        Self::MissingAccessor { identifier, context: None }
    }

    pub(crate) const fn row_shape(expected: usize, found: usize) -> Self {
        Self::RowShape { expected, found, context: None }
    }
}
