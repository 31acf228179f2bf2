use anyhow::{Context, Result};
use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

/// Opens `path` for buffered reading; `None` or `-` reads stdin.
///
/// # Errors
/// Returns an error if the file cannot be opened.
pub fn open_input(path: Option<&Path>) -> Result<Box<dyn BufRead>> {
    match path {
        Some(path) if path != Path::new("-") => {
            let file = File::open(path)
                .with_context(|| format!("Failed to open input {}", path.display()))?;
            Ok(Box::new(BufReader::new(file)))
        },
        _ => Ok(Box::new(io::stdin().lock())),
    }
}

/// Buffered stdout; rows are data, logs never go here.
pub fn open_output() -> impl Write {
    BufWriter::new(io::stdout().lock())
}
