//! # Domain Models
//!
//! This crate contains the tabular value model with a single dependency (`serde`).
//! Keep it lean: no I/O, no parsing of file formats, no mapping logic. Just data and simple helpers.

pub mod config;
pub mod row;
pub mod value;

pub use row::{LabeledRow, Row, Table};
pub use value::Value;
