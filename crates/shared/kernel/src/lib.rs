//! Kernel utilities shared by the `rowmap` front ends.
//! Keep this crate lightweight; it loads layered configuration and turns mapping profiles into
//! registries and importers over [`DynamicRecord`](rowmap::DynamicRecord).
//!
//! ## Profiles
//! ```rust
//! use rowmap::prelude::*;
//! use rowmap_kernel::domain::config::{AttributeConfig, ImporterConfig, ProfileConfig};
//! use rowmap_kernel::profile::Profile;
//!
//! let mut config = ProfileConfig::default();
//! config.attributes = vec![
//!     AttributeConfig { identifier: "name".into(), label: Some("Full Name".into()), order: None },
//!     AttributeConfig { identifier: "location".into(), label: None, order: None },
//! ];
//! config.importers.insert("basic".into(), ImporterConfig { attributes: vec!["name".into()] });
//!
//! let profile = Profile::from_config(config).unwrap();
//! let user = profile.importer(&["basic"]).unwrap().import_one(&Row::from(["Rick", "C-137"])).unwrap();
//! assert_eq!(user.get("location"), None);
//! ```
//!
//! ## Config loading
//! ```rust,ignore
//! use rowmap_kernel::config::load_config;
//! let cfg: serde_json::Value = load_config::<serde_json::Value>(Some("users.toml")).unwrap();
//! ```
pub mod config;
pub mod profile;

pub use rowmap_domain as domain;
