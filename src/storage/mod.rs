// src/storage/mod.rs
use std::fs;
use std::path::{Path, PathBuf};

use crate::utils::error::{CatalogError, StorageError};

const BAR_CHART_FILE: &str = "bar_chart.svg";
const PIE_CHART_FILE: &str = "pie_chart.svg";

/// Owns the directories the server reads from and writes to: the static
/// directory generated charts land in, and the catalog directory holding
/// the pre-existing CSV files.
pub struct StorageManager {
    static_dir: PathBuf,
    catalog_dir: PathBuf,
}

impl StorageManager {
    /// Creates a new StorageManager. The static directory is created if it
    /// does not exist; the catalog directory is taken as-is.
    pub fn new<P: AsRef<Path>, Q: AsRef<Path>>(
        static_dir: P,
        catalog_dir: Q,
    ) -> Result<Self, StorageError> {
        let static_dir = static_dir.as_ref().to_path_buf();

        if !static_dir.exists() {
            fs::create_dir_all(&static_dir).map_err(StorageError::IoError)?;
            tracing::info!("Created static directory: {}", static_dir.display());
        }

        Ok(Self {
            static_dir,
            catalog_dir: catalog_dir.as_ref().to_path_buf(),
        })
    }

    pub fn static_dir(&self) -> &Path {
        &self.static_dir
    }

    /// Target file for the generated bar chart, overwritten on each render.
    pub fn bar_chart_path(&self) -> PathBuf {
        self.static_dir.join(BAR_CHART_FILE)
    }

    /// Target file for the generated pie chart, overwritten on each render.
    pub fn pie_chart_path(&self) -> PathBuf {
        self.static_dir.join(PIE_CHART_FILE)
    }

    /// Resolves a catalog name to its CSV file path.
    /// Names are bare file stems; anything that could escape the catalog
    /// directory is rejected before touching the filesystem.
    pub fn catalog_path(&self, name: &str) -> Result<PathBuf, CatalogError> {
        if name.is_empty()
            || !name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(CatalogError::InvalidName(name.to_string()));
        }

        let path = self.catalog_dir.join(format!("{}.csv", name));
        if !path.is_file() {
            return Err(CatalogError::NotFound(name.to_string()));
        }

        Ok(path)
    }

    /// Names of the CSV files present in the catalog directory, sorted.
    /// A missing catalog directory just means there is nothing to list.
    pub fn list_catalogs(&self) -> Vec<String> {
        let entries = match fs::read_dir(&self.catalog_dir) {
            Ok(entries) => entries,
            Err(_) => return Vec::new(),
        };

        let mut names: Vec<String> = entries
            .flatten()
            .filter_map(|entry| {
                let path = entry.path();
                if path.extension().and_then(|ext| ext.to_str()) == Some("csv") {
                    path.file_stem()
                        .and_then(|stem| stem.to_str())
                        .map(str::to_string)
                } else {
                    None
                }
            })
            .collect();

        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_name_validation_rejects_traversal() {
        let dir = tempfile::tempdir().unwrap();
        let storage = StorageManager::new(dir.path().join("static"), dir.path()).unwrap();

        assert!(matches!(
            storage.catalog_path("../secrets"),
            Err(CatalogError::InvalidName(_))
        ));
        assert!(matches!(
            storage.catalog_path("a/b"),
            Err(CatalogError::InvalidName(_))
        ));
        assert!(matches!(
            storage.catalog_path(""),
            Err(CatalogError::InvalidName(_))
        ));
    }

    #[test]
    fn catalog_path_resolves_existing_files_only() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("pipettes.csv"), "a,b\n1,2\n").unwrap();
        let storage = StorageManager::new(dir.path().join("static"), dir.path()).unwrap();

        assert!(storage.catalog_path("pipettes").is_ok());
        assert!(matches!(
            storage.catalog_path("missing"),
            Err(CatalogError::NotFound(_))
        ));
    }

    #[test]
    fn lists_catalogs_sorted_and_tolerates_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("zeta.csv"), "a\n").unwrap();
        std::fs::write(dir.path().join("alpha.csv"), "a\n").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "skip me\n").unwrap();

        let storage = StorageManager::new(dir.path().join("static"), dir.path()).unwrap();
        assert_eq!(storage.list_catalogs(), vec!["alpha", "zeta"]);

        let empty = StorageManager::new(dir.path().join("static"), dir.path().join("absent"))
            .unwrap();
        assert!(empty.list_catalogs().is_empty());
    }
}
