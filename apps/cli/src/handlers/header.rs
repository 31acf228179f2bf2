use anyhow::Result;
use rowmap::HeaderStyle;
use rowmap_kernel::profile::Profile;
use std::io::Write;

/// Writes the profile's CSV header line.
///
/// # Errors
/// Returns an error if the output cannot be written.
pub fn print_header(profile: &Profile, identifiers: bool, out: impl Write) -> Result<()> {
    let style = if identifiers { HeaderStyle::Identifiers } else { HeaderStyle::Labels };

    let mut writer = csv::Writer::from_writer(out);
    writer.write_record(profile.exporter().header(style))?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rowmap_kernel::domain::config::{AttributeConfig, ProfileConfig};

    #[test]
    fn prints_labels_or_identifiers() {
        let mut config = ProfileConfig::default();
        config.attributes = vec![
            AttributeConfig { identifier: "name".into(), label: Some("Full Name".into()), order: None },
            AttributeConfig { identifier: "location".into(), label: None, order: None },
        ];
        let profile = Profile::from_config(config).unwrap();

        let mut out = Vec::new();
        print_header(&profile, false, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Full Name,location\n");

        let mut out = Vec::new();
        print_header(&profile, true, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "name,location\n");
    }
}
