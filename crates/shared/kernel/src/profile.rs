//! # Mapping Profiles
//!
//! A [`Profile`] is a [`ProfileConfig`] turned into working parts: a frozen
//! [`Registry<DynamicRecord>`] plus one validated [`Importer`] per named importer.
//! Validation happens once, when the profile is built, so a bad profile fails at startup
//! instead of on the first row.

use crate::config::{ConfigError, ConfigErrorExt, load_config};
use rowmap::{AttributeSpec, CombinedImporter, DynamicRecord, Exporter, Importer, Registry};
use rowmap_domain::config::{LoggingConfig, ProfileConfig};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info};

/// A loaded, validated mapping profile.
#[derive(Debug, Clone)]
pub struct Profile {
    name: String,
    registry: Registry<DynamicRecord>,
    importers: BTreeMap<String, Importer<DynamicRecord>>,
    logging: LoggingConfig,
}

impl Profile {
    /// Loads a profile file with `ROWMAP__` environment overrides and validates it.
    ///
    /// # Errors
    /// Returns [`ConfigError`] if the file cannot be read or the profile is invalid.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let config: ProfileConfig = load_config(Some(path))?;
        Self::from_config(config)
    }

    /// Builds the registry and importers described by `config`.
    ///
    /// # Errors
    /// * [`ConfigError::Mapping`] for duplicate attributes or importers naming unknown attributes.
    /// * [`ConfigError::Profile`] for importers without attributes.
    pub fn from_config(config: ProfileConfig) -> Result<Self, ConfigError> {
        let mut builder = Registry::<DynamicRecord>::builder();
        for attribute in config.attributes {
            let mut spec = AttributeSpec::new(attribute.identifier);
            if let Some(label) = attribute.label {
                spec = spec.label(label);
            }
            if let Some(order) = attribute.order {
                spec = spec.order(order);
            }
            builder.register_spec(spec).context("Invalid attribute list")?;
        }
        let registry = builder.build();

        let mut importers = BTreeMap::new();
        for (name, importer) in config.importers {
            if importer.attributes.is_empty() {
                return Err(ConfigError::profile(format!("importer `{name}` covers no attributes")));
            }
            let subset = Importer::subset(&registry, &importer.attributes)
                .context(format!("importer `{name}`"))?;
            debug!(importer = %name, attributes = importer.attributes.len(), "Importer declared");
            importers.insert(name, subset);
        }

        info!(
            profile = %config.name,
            attributes = registry.len(),
            importers = importers.len(),
            "Profile loaded"
        );

        Ok(Self { name: config.name, registry, importers, logging: config.logging })
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub const fn registry(&self) -> &Registry<DynamicRecord> {
        &self.registry
    }

    #[must_use]
    pub const fn logging(&self) -> &LoggingConfig {
        &self.logging
    }

    pub fn importer_names(&self) -> impl Iterator<Item = &str> {
        self.importers.keys().map(String::as_str)
    }

    #[must_use]
    pub fn exporter(&self) -> Exporter<DynamicRecord> {
        Exporter::new(&self.registry)
    }

    /// Combines the named importers left to right; no names means the full registry.
    ///
    /// # Errors
    /// Returns [`ConfigError::Profile`] for a name the profile does not declare.
    pub fn importer<S: AsRef<str>>(
        &self,
        names: &[S],
    ) -> Result<CombinedImporter<DynamicRecord>, ConfigError> {
        if names.is_empty() {
            return Ok(CombinedImporter::new().then(Importer::new(&self.registry)));
        }

        let mut combined = CombinedImporter::new();
        for name in names {
            let name = name.as_ref();
            let importer = self.importers.get(name).ok_or_else(|| {
                ConfigError::profile(format!("profile `{}` has no importer `{name}`", self.name))
            })?;
            combined.push(importer.clone());
        }
        Ok(combined)
    }
}
