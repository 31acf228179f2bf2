use crate::models::args::Format;
use anyhow::{Context, Result};
use rowmap::{DynamicRecord, Exporter, HeaderStyle};
use rowmap_kernel::profile::Profile;
use std::io::{BufRead, Write};
use tracing::{debug, info};

/// How exported rows are written.
#[derive(Debug, Clone, Copy)]
pub struct ExportOptions {
    /// CSV header style; `None` writes no header.
    pub header: Option<HeaderStyle>,
    pub format: Format,
}

/// Reads one JSON object per line and writes each as a row of the profile.
///
/// Blank lines are skipped. The first record that fails to parse or map aborts the export.
///
/// # Errors
/// Returns an error naming the input line on malformed JSON or a mapping failure.
pub fn export_records(
    profile: &Profile,
    input: impl BufRead,
    out: impl Write,
    options: ExportOptions,
) -> Result<usize> {
    let exporter = profile.exporter();
    let records = read_records(input);

    let count = match options.format {
        Format::Csv => write_csv(&exporter, records, out, options.header)?,
        Format::Jsonl => write_jsonl(&exporter, records, out)?,
    };

    info!(profile = profile.name(), records = count, "Export finished");
    Ok(count)
}

/// Parses JSON lines into records, keeping the 1-based line number for error reports.
fn read_records(input: impl BufRead) -> impl Iterator<Item = Result<(usize, DynamicRecord)>> {
    input.lines().enumerate().filter_map(|(index, line)| {
        let line_no = index + 1;
        let parsed = line.with_context(|| format!("Failed to read line {line_no}")).and_then(|line| {
            if line.trim().is_empty() {
                return Ok(None);
            }
            serde_json::from_str::<DynamicRecord>(&line)
                .map(Some)
                .with_context(|| format!("Line {line_no} is not a JSON object"))
        });
        parsed.transpose().map(|record| record.map(|record| (line_no, record)))
    })
}

fn write_csv(
    exporter: &Exporter<DynamicRecord>,
    records: impl Iterator<Item = Result<(usize, DynamicRecord)>>,
    out: impl Write,
    header: Option<HeaderStyle>,
) -> Result<usize> {
    let mut writer = csv::WriterBuilder::new().has_headers(false).from_writer(out);
    if let Some(style) = header {
        writer.write_record(exporter.header(style))?;
    }

    let mut count = 0;
    for record in records {
        let (line_no, record) = record?;
        let row = exporter.export_one(&record).with_context(|| format!("Line {line_no}"))?;
        writer.write_record(row.iter().map(ToString::to_string))?;
        debug!(line = line_no, "Record exported");
        count += 1;
    }

    writer.flush()?;
    Ok(count)
}

fn write_jsonl(
    exporter: &Exporter<DynamicRecord>,
    records: impl Iterator<Item = Result<(usize, DynamicRecord)>>,
    mut out: impl Write,
) -> Result<usize> {
    let mut count = 0;
    for record in records {
        let (line_no, record) = record?;
        let labeled =
            exporter.export_with_labels(&record).with_context(|| format!("Line {line_no}"))?;
        serde_json::to_writer(&mut out, &labeled)?;
        out.write_all(b"\n")?;
        debug!(line = line_no, "Record exported");
        count += 1;
    }

    out.flush()?;
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rowmap_kernel::domain::config::{AttributeConfig, ProfileConfig};

    fn users() -> Profile {
        let mut config = ProfileConfig::default();
        config.attributes = vec![
            AttributeConfig { identifier: "name".into(), label: Some("Full Name".into()), order: None },
            AttributeConfig { identifier: "location".into(), label: None, order: None },
        ];
        Profile::from_config(config).unwrap()
    }

    const INPUT: &str = concat!(
        r#"{"location":"Earth C-137","name":"Rick"}"#,
        "\n\n",
        r#"{"name":"Morty, Jr.","location":"Earth C-137","age":14}"#,
        "\n",
    );

    fn run(options: ExportOptions) -> (usize, String) {
        let mut out = Vec::new();
        let count = export_records(&users(), INPUT.as_bytes(), &mut out, options).unwrap();
        (count, String::from_utf8(out).unwrap())
    }

    #[test]
    fn writes_csv_in_registry_order() {
        let (count, csv) = run(ExportOptions { header: Some(HeaderStyle::Labels), format: Format::Csv });
        assert_eq!(count, 2);
        assert_eq!(csv, "Full Name,location\nRick,Earth C-137\n\"Morty, Jr.\",Earth C-137\n");
    }

    #[test]
    fn writes_labeled_json_lines() {
        let (_, jsonl) = run(ExportOptions { header: None, format: Format::Jsonl });
        let first = jsonl.lines().next().unwrap();
        assert_eq!(first, r#"{"Full Name":"Rick","location":"Earth C-137"}"#);
    }

    #[test]
    fn missing_attribute_names_the_line() {
        let mut out = Vec::new();
        let err = export_records(
            &users(),
            "{\"name\":\"Rick\"}\n".as_bytes(),
            &mut out,
            ExportOptions { header: None, format: Format::Csv },
        )
        .unwrap_err();

        assert!(format!("{err:#}").contains("Line 1"), "{err:#}");
        assert!(format!("{err:#}").contains("location"), "{err:#}");
    }
}
