//! File-backed storage for patient records.
//!
//! The whole mapping is kept in memory and rewritten to disk on every
//! change. Concurrent processes are not serialized: two writers racing on
//! the same file end with the last writer winning. The lock below only
//! serializes handlers within this server.

use std::{
    collections::HashMap,
    fs::{create_dir_all, File},
    io::{self, ErrorKind::NotFound},
    path::PathBuf,
    sync::RwLock,
};

use anyhow::{anyhow, Result};
use log::info;
use once_cell::sync::Lazy;

use crate::consts;
use crate::models::{PatientData, PatientId};

/// An open handle on the patient file, with the full mapping in memory.
///
/// The file holds a bare JSON object keyed by patient id; the id is not
/// repeated inside the stored value, and derived values are never written.
#[derive(Default)]
pub struct Database {
    path: Option<PathBuf>,
    patients: HashMap<PatientId, PatientData>,
}

impl Database {
    /// Opens the database file, creating an empty one if it does not exist.
    pub fn open(path: PathBuf) -> Result<Self, io::Error> {
        match File::open(&path) {
            // File successfully opened
            Ok(file) => {
                let patients = serde_json::from_reader(file)?;
                Ok(Self {
                    path: Some(path),
                    patients,
                })
            }

            // Missing file, create it
            Err(not_found) if not_found.kind() == NotFound => {
                info!("Patient file not found, creating new empty store");
                let db = Self {
                    path: Some(path),
                    patients: HashMap::new(),
                };

                // Save immediately so startup problems surface right away
                db.save()?;
                Ok(db)
            }

            // Any other IO error, give up
            Err(other) => Err(other),
        }
    }

    /// Writes the whole mapping back to the file, pretty-printed.
    pub fn save(&self) -> Result<(), io::Error> {
        if let Some(path) = &self.path {
            // Create the parent directory if it does not exist
            if let Some(parent_dir) = path.parent() {
                if !parent_dir.exists() {
                    create_dir_all(parent_dir)?;
                }
            }

            let file = File::create(path)?;
            serde_json::to_writer_pretty(file, &self.patients)?;
        }
        Ok(())
    }

    pub fn get(&self, id: &PatientId) -> Option<&PatientData> {
        self.patients.get(id)
    }

    pub fn patients(&self) -> &HashMap<PatientId, PatientData> {
        &self.patients
    }

    /// Files a new record under `id`. Returns false, leaving the store
    /// untouched, if the id is already taken.
    pub fn insert(&mut self, id: PatientId, data: PatientData) -> bool {
        if self.patients.contains_key(&id) {
            return false;
        }

        self.patients.insert(id, data);
        true
    }
}

static DB: Lazy<RwLock<Database>> = Lazy::new(Default::default);

/// Loads the patient file from the configured path into the global store.
pub fn load() -> Result<()> {
    let db = Database::open(PathBuf::from(consts::PATIENTS_DB_PATH))?;
    let mut global = DB.write().or(Err(anyhow!("DB poisoned")))?;
    *global = db;
    Ok(())
}

pub fn get(id: &PatientId) -> Option<PatientData> {
    DB.read().ok()?.get(id).cloned()
}

pub fn get_all() -> Result<HashMap<PatientId, PatientData>> {
    let db = DB.read().or(Err(anyhow!("DB poisoned")))?;
    Ok(db.patients().clone())
}

/// Stores a new record under `id` and persists the full mapping.
/// Returns Ok(false) if the id already exists.
pub fn create(id: PatientId, data: PatientData) -> Result<bool> {
    let mut db = DB.write().or(Err(anyhow!("DB poisoned")))?;

    if !db.insert(id, data) {
        return Ok(false);
    }

    db.save()?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::validation::record::validate_patient;
    use serde_json::{json, Value};
    use tempfile::TempDir;

    fn sample_record(city: &str) -> PatientData {
        validate_patient(&json!({
            "name": "Ananya Verma",
            "city": city,
            "age": 28,
            "gender": "female",
            "height": 1.65,
            "weight": 90.0,
            "email": "ananya@hdfc.com"
        }))
        .unwrap()
    }

    #[test]
    fn test_missing_file_creates_empty_store() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("patients.json");

        let db = Database::open(path.clone()).unwrap();
        assert!(db.patients().is_empty());
        assert!(path.exists(), "Opening should create the file on disk");
    }

    #[test]
    fn test_records_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("patients.json");
        let id = PatientId::try_from("P001").unwrap();

        let mut db = Database::open(path.clone()).unwrap();
        assert!(db.insert(id.clone(), sample_record("Guwahati")));
        db.save().unwrap();

        let reopened = Database::open(path).unwrap();
        assert_eq!(reopened.get(&id), Some(&sample_record("Guwahati")));
    }

    #[test]
    fn test_duplicate_id_leaves_store_unchanged() {
        let dir = TempDir::new().unwrap();
        let mut db = Database::open(dir.path().join("patients.json")).unwrap();
        let id = PatientId::try_from("P001").unwrap();

        assert!(db.insert(id.clone(), sample_record("Guwahati")));
        assert!(!db.insert(id.clone(), sample_record("Delhi")));

        assert_eq!(db.patients().len(), 1);
        assert_eq!(db.get(&id).unwrap().city.as_str(), "Guwahati");
    }

    #[test]
    fn test_file_is_a_bare_mapping() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("patients.json");
        let id = PatientId::try_from("P001").unwrap();

        let mut db = Database::open(path.clone()).unwrap();
        db.insert(id, sample_record("Guwahati"));
        db.save().unwrap();

        let raw: Value = serde_json::from_reader(File::open(path).unwrap()).unwrap();
        let stored = raw.as_object().unwrap().get("P001").unwrap();

        assert_eq!(stored["name"], json!("ANANYA VERMA"));
        // The key carries the id, and derived values are recomputed on
        // read, so none of them appear in the file
        assert!(stored.get("id").is_none());
        assert!(stored.get("bmi").is_none());
        assert!(stored.get("verdict").is_none());
    }

    #[test]
    fn test_save_without_path_is_a_noop() {
        let db = Database::default();
        assert!(db.save().is_ok());
    }
}
