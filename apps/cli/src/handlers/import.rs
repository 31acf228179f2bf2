use anyhow::{Context, Result};
use rowmap::{Import, Row};
use rowmap_kernel::profile::Profile;
use std::io::{Read, Write};
use tracing::{debug, info};

/// Reads CSV rows positionally and writes one JSON object per imported record.
///
/// `using` names profile importers combined left to right; empty means the full registry.
/// Records may have any number of fields; rows too short for the importer abort the import.
///
/// # Errors
/// Returns an error for unknown importer names, malformed CSV or a mapping failure, naming
/// the offending line.
pub fn import_rows(
    profile: &Profile,
    input: impl Read,
    mut out: impl Write,
    using: &[String],
    skip_header: bool,
) -> Result<usize> {
    let importer = profile.importer(using)?;
    debug!(covered = ?importer.covered(), required = importer.required_len(), "Importer ready");

    let mut reader =
        csv::ReaderBuilder::new().has_headers(skip_header).flexible(true).from_reader(input);

    let mut count = 0;
    for record in reader.records() {
        let record = record.context("Failed to read CSV record")?;
        let line = record.position().map_or(0, csv::Position::line);

        let row: Row = record.iter().collect();
        let imported = importer.import_one(&row).with_context(|| format!("Line {line}"))?;

        serde_json::to_writer(&mut out, &imported)?;
        out.write_all(b"\n")?;
        count += 1;
    }
    out.flush()?;

    info!(profile = profile.name(), records = count, "Import finished");
    Ok(count)
}
