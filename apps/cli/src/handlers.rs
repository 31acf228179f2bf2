pub mod export;
pub mod header;
pub mod import;
