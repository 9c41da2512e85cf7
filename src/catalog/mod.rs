// src/catalog/mod.rs
use std::fs;
use std::path::Path;

use crate::utils::error::CatalogError;

/// A pre-existing CSV catalog file, read verbatim for rendering.
#[derive(Debug, Clone)]
pub struct CatalogTable {
    pub name: String,
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

/// Reads a catalog CSV into a header row plus string records.
/// The file is rendered as-is; no typing or validation beyond CSV shape.
pub fn load_catalog(name: &str, path: &Path) -> Result<CatalogTable, CatalogError> {
    let mut reader = csv::Reader::from_path(path)?;

    let headers = reader.headers()?.iter().map(str::to_string).collect();

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result?;
        rows.push(record.iter().map(str::to_string).collect());
    }

    tracing::debug!("Loaded catalog {:?}: {} rows", name, rows.len());

    Ok(CatalogTable {
        name: name.to_string(),
        headers,
        rows,
    })
}

/// Raw bytes of a catalog file, for serving as a download.
pub fn read_raw(path: &Path) -> Result<Vec<u8>, CatalogError> {
    Ok(fs::read(path)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_headers_and_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pipettes.csv");
        fs::write(&path, "model,volume,price\nP20,20uL,305.00\nP200,200uL,310.50\n").unwrap();

        let table = load_catalog("pipettes", &path).unwrap();

        assert_eq!(table.name, "pipettes");
        assert_eq!(table.headers, vec!["model", "volume", "price"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[1], vec!["P200", "200uL", "310.50"]);
    }

    #[test]
    fn ragged_rows_are_malformed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.csv");
        fs::write(&path, "a,b\n1,2,3\n").unwrap();

        assert!(matches!(
            load_catalog("bad", &path),
            Err(CatalogError::Malformed(_))
        ));
    }
}
