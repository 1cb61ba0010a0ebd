//! File-backed storage and catalog sources for running the core outside a browser.
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tripbudget_core::{Catalog, CatalogError, CatalogSource, KeyValueStorage, StorageError};

/// Catalog shipped with the web page.
pub const BUNDLED_CATALOG: &str = include_str!("../../../tripbudget-web/static/data.json");

/// `localStorage`-shaped slots kept in one JSON object on disk.
///
/// Every call reads the file again, so two handles on the same path behave like
/// two page loads sharing one browser profile.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_slots(&self) -> Result<BTreeMap<String, String>, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(text) if text.trim().is_empty() => Ok(BTreeMap::new()),
            Ok(text) => Ok(serde_json::from_str(&text)?),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(BTreeMap::new()),
            Err(err) => Err(backend(&self.path, &err)),
        }
    }

    fn write_slots(&self, slots: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let json = serde_json::to_string_pretty(slots)?;
        fs::write(&self.path, json).map_err(|err| backend(&self.path, &err))
    }
}

fn backend(path: &Path, err: &std::io::Error) -> StorageError {
    StorageError::Backend(format!("{}: {err}", path.display()))
}

impl KeyValueStorage for FileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_slots()?.remove(key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut slots = self.read_slots()?;
        slots.insert(key.to_string(), value.to_string());
        self.write_slots(&slots)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        let mut slots = self.read_slots()?;
        if slots.remove(key).is_some() {
            self.write_slots(&slots)?;
        }
        Ok(())
    }
}

/// Catalog read from a JSON file on every load.
#[derive(Debug, Clone)]
pub struct FileCatalog {
    path: PathBuf,
}

impl FileCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CatalogSource for FileCatalog {
    fn load_catalog(&self) -> Result<Catalog, CatalogError> {
        Catalog::from_json(&fs::read_to_string(&self.path)?)
    }
}

/// The catalog at `path`, or the bundled one.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_catalog(path: Option<&Path>) -> Result<Catalog, CatalogError> {
    match path {
        Some(path) => FileCatalog::new(path).load_catalog(),
        None => Catalog::from_json(BUNDLED_CATALOG),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_file(label: &str) -> PathBuf {
        std::env::temp_dir().join(format!(
            "tripbudget-fixture-{label}-{}",
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap_or_default()
                .as_nanos()
        ))
    }

    #[test]
    fn missing_file_reads_as_empty() {
        let storage = FileStorage::new(temp_file("missing"));
        assert!(storage.get_item("tripDetails").unwrap().is_none());
    }

    #[test]
    fn handles_on_one_path_share_slots() {
        let path = temp_file("shared");
        let first = FileStorage::new(&path);
        let second = FileStorage::new(&path);
        first.set_item("tripDetails", "{}").unwrap();
        assert_eq!(second.get_item("tripDetails").unwrap().as_deref(), Some("{}"));
        second.remove_item("tripDetails").unwrap();
        assert!(first.get_item("tripDetails").unwrap().is_none());
        let _ = fs::remove_file(path);
    }

    #[test]
    fn handle_rebuilt_from_path_sees_earlier_writes() {
        let path = temp_file("rebuilt");
        let original = FileStorage::new(&path);
        original.set_item("itineraryItems_Goa", "[]").unwrap();
        let rebuilt = FileStorage::new(original.path());
        assert_eq!(rebuilt.path(), path.as_path());
        assert_eq!(
            rebuilt.get_item("itineraryItems_Goa").unwrap().as_deref(),
            Some("[]")
        );
        let _ = fs::remove_file(path);
    }

    #[test]
    fn corrupt_file_is_a_serialization_error() {
        let path = temp_file("corrupt");
        fs::write(&path, "not json").unwrap();
        let err = FileStorage::new(&path).get_item("k").unwrap_err();
        assert!(matches!(err, StorageError::Serialization(_)));
        let _ = fs::remove_file(path);
    }

    #[test]
    fn bundled_catalog_loads() {
        let catalog = load_catalog(None).unwrap();
        assert!(!catalog.is_empty());
    }

    #[test]
    fn missing_catalog_file_is_io_error() {
        let path = temp_file("no-catalog");
        let err = load_catalog(Some(path.as_path())).unwrap_err();
        assert!(matches!(err, CatalogError::Io(_)));
    }
}
