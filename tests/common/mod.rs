use std::io::{Error, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

pub fn catalog_fixture() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/catalog.json")
}

/// Writes an operations CSV with the given `type, product, amount` rows.
pub fn operations_file(rows: &[&str]) -> Result<NamedTempFile, Error> {
    let mut file = NamedTempFile::new()?;
    writeln!(file, "type, product, amount")?;
    for row in rows {
        writeln!(file, "{row}")?;
    }
    file.flush()?;
    Ok(file)
}
