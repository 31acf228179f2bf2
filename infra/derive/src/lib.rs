#![allow(unreachable_pub)]
#![allow(clippy::needless_pass_by_value)]

//! # Macros
//!
//! Procedural macros for the mapping engine.
//! This crate provides the derive that turns a plain struct into a mappable record
//! and the attribute macro used by every crate in the workspace to declare its error enum.
//!
//! ## Usage
//! The `Record` derive is re-exported by the `rowmap` crate, so consumers only need:
//! ```toml
//! [dependencies]
//! rowmap = { path = "../crates/rowmap" }
//! ```
//!
//! See each macro’s docstring for examples; they are `ignore`d to avoid compiling in this crate,
//! but the same snippets are exercised by the `rowmap` integration tests.

mod macros;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Derive macro generating the accessor table of a mappable record.
///
/// Every named field becomes an attribute identifier with a typed getter/setter pair,
/// resolved once when a registry is built. Field types must implement
/// `rowmap::ToValue` and `rowmap::FromValue`.
///
/// # Field Options
///
/// * `#[record(label = "Full Name")]` - Human-readable column label.
/// * `#[record(rename = "full_name")]` - Identifier used instead of the field name.
/// * `#[record(skip)]` - Field takes no part in mapping and keeps its `Default` on import.
///
/// # Errors
/// Emits a compile-time error for enums, unions, tuple structs, unknown options,
/// or two fields resolving to the same identifier.
///
/// # Example
///
/// ```rust,ignore
/// use rowmap::Record;
///
/// #[derive(Debug, Default, Record)]
/// struct User {
///     #[record(label = "Full Name")]
///     name: String,
///     location: String,
///     #[record(skip)]
///     cache: Vec<u8>,
/// }
/// ```
#[proc_macro_derive(Record, attributes(record))]
pub fn derive_record(item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::record::expand_derive(input).into()
}

/// A high-level attribute macro for defining crate-level error enums.
///
/// This macro reduces boilerplate by transforming a standard enum into a fully-featured
/// error type with uniform context handling.
///
/// # Features
///
/// * **Automatic Derives**: Injects `#[derive(Debug, thiserror::Error)]`.
/// * **Context Support**: Generates a companion `...Ext` trait that adds `.context()`
///   to any `Result` that can be converted into this error type.
/// * **Standard Conversions**: Implements `From<T>` for variants made of exactly a source
///   field and a context field, enabling the use of the `?` operator for upstream errors.
/// * **Kind Introspection**: Adds `kind()` returning the variant name, for logs and exit reports.
/// * **Internal Fallback**: Provides specialized `From<&str>` and `From<String>` implementations
///   if an `Internal` variant is present.
///
/// # Requirements
///
/// 1. The macro must be applied to an **enum**.
/// 2. Variants that support context must include a `context: Option<Cow<'static, str>>` field.
/// 3. Variants wrapping external errors must include a `source: T` field or a field marked
///    with `#[source]`/`#[from]` (compatible with `thiserror`).
/// 4. Tuple or unit variants are rejected to keep error wiring explicit and reliable.
///
/// # Example
///
/// ```rust,ignore
/// use rowmap_derive::rowmap_error;
/// use std::borrow::Cow;
///
/// #[rowmap_error]
/// pub enum ConfigError {
///     #[error("Config error{}: {source}", format_context(.context))]
///     Config { source: config::ConfigError, context: Option<Cow<'static, str>> },
///
///     #[error("Internal fault{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn load() -> Result<Settings, ConfigError> {
///     builder.build().context("Reading profile")?  // Adds context to the upstream error
/// }
/// ```
#[proc_macro_attribute]
pub fn rowmap_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    macros::error::expand_derive(input).into()
}
