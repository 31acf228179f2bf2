use rowmap_domain::config::{LoggingConfig, ProfileConfig};
use serde_json::json;

#[test]
fn profile_defaults_are_sane() {
    let profile = ProfileConfig::default();
    assert_eq!(profile.name, "default");
    assert!(profile.attributes.is_empty());
    assert!(profile.importers.is_empty());

    let logging = LoggingConfig::default();
    assert_eq!(logging.level, "warn");
    assert!(!logging.json);
}

#[test]
fn profile_deserializes() {
    let raw = json!({
        "name": "users",
        "attributes": [
            { "identifier": "name", "label": "Full Name" },
            { "identifier": "location", "order": 7 }
        ],
        "importers": {
            "basic": { "attributes": ["name"] }
        }
    });

    let cfg: ProfileConfig = serde_json::from_value(raw).expect("profile deserialize");
    assert_eq!(cfg.name, "users");
    assert_eq!(cfg.attributes.len(), 2);
    assert_eq!(cfg.attributes[0].label.as_deref(), Some("Full Name"));
    assert_eq!(cfg.attributes[1].label, None);
    assert_eq!(cfg.attributes[1].order, Some(7));
    assert_eq!(cfg.importers["basic"].attributes, ["name"]);
    assert_eq!(cfg.logging.level, "warn");
}
