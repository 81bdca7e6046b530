//! Read-only access to the per-user record files.
//!
//! Each record kind lives in its own directory under the data root, with one
//! JSON array file per user named `<user id>.json`. Other commands of the
//! wider bot create and mutate these files; this store only reads them, and
//! every load is a fresh read so writer updates are picked up immediately.

use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use thiserror::Error;

use super::types::{LicenseEntry, PoliceRecord, TicketRecord, VehicleRecord};

/// Errors that can occur while loading record files.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Failed to read record file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse record file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },
}

/// The four record kinds the profile command displays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordKind {
    Vehicles,
    PoliceRecords,
    Licenses,
    Tickets,
}

impl RecordKind {
    /// All record kinds, in display order.
    pub const ALL: [Self; 4] = [
        Self::Vehicles,
        Self::PoliceRecords,
        Self::Licenses,
        Self::Tickets,
    ];

    /// Directory name under the data root, as the writer commands lay it out.
    #[must_use]
    pub const fn dir_name(self) -> &'static str {
        match self {
            Self::Vehicles => "vehicleData",
            Self::PoliceRecords => "policeRecords",
            Self::Licenses => "licenses",
            Self::Tickets => "tickets",
        }
    }

    /// Parses a record file against this kind's element shape.
    ///
    /// Returns the number of records on success.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn parse_file(self, path: &Path) -> Result<usize, StoreError> {
        let content = std::fs::read_to_string(path).map_err(|source| StoreError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        match self {
            Self::Vehicles => parse_array::<VehicleRecord>(&content, path),
            Self::PoliceRecords => parse_array::<PoliceRecord>(&content, path),
            Self::Licenses => parse_array::<LicenseEntry>(&content, path),
            Self::Tickets => parse_array::<TicketRecord>(&content, path),
        }
    }
}

impl std::fmt::Display for RecordKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Vehicles => "vehicles",
            Self::PoliceRecords => "police records",
            Self::Licenses => "licenses",
            Self::Tickets => "tickets",
        };
        f.write_str(label)
    }
}

impl std::str::FromStr for RecordKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "vehicles" | "vehicle" | "vehicledata" => Ok(Self::Vehicles),
            "police-records" | "police_records" | "policerecords" | "arrests" => {
                Ok(Self::PoliceRecords)
            }
            "licenses" | "license" => Ok(Self::Licenses),
            "tickets" | "ticket" => Ok(Self::Tickets),
            other => Err(format!(
                "Unknown record kind: '{other}'. Expected one of: vehicles, police-records, licenses, tickets."
            )),
        }
    }
}

fn parse_array<T: DeserializeOwned>(content: &str, path: &Path) -> Result<usize, StoreError> {
    let records: Vec<T> =
        serde_json::from_str(content).map_err(|source| StoreError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    Ok(records.len())
}

/// Loads per-user record arrays from the data root.
///
/// Holds no cache; callers that want click-time freshness simply load again.
#[derive(Debug, Clone)]
pub struct RecordStore {
    /// Directory containing the kind-specific record directories.
    root: PathBuf,
}

impl RecordStore {
    /// Creates a store over the given data root directory.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Path of the record file for a user and kind.
    #[must_use]
    pub fn user_file(&self, kind: RecordKind, user_id: u64) -> PathBuf {
        self.root.join(kind.dir_name()).join(format!("{user_id}.json"))
    }

    /// Loads a user's registered vehicles.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn vehicles(&self, user_id: u64) -> Result<Vec<VehicleRecord>, StoreError> {
        self.load(RecordKind::Vehicles, user_id)
    }

    /// Loads a user's police records.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn police_records(&self, user_id: u64) -> Result<Vec<PoliceRecord>, StoreError> {
        self.load(RecordKind::PoliceRecords, user_id)
    }

    /// Loads a user's license history.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn licenses(&self, user_id: u64) -> Result<Vec<LicenseEntry>, StoreError> {
        self.load(RecordKind::Licenses, user_id)
    }

    /// Loads a user's tickets.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn tickets(&self, user_id: u64) -> Result<Vec<TicketRecord>, StoreError> {
        self.load(RecordKind::Tickets, user_id)
    }

    /// Reads and parses one record file. A missing file is an empty
    /// collection, not an error.
    fn load<T: DeserializeOwned>(
        &self,
        kind: RecordKind,
        user_id: u64,
    ) -> Result<Vec<T>, StoreError> {
        let path = self.user_file(kind, user_id);

        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Vec::new());
            }
            Err(source) => return Err(StoreError::Read { path, source }),
        };

        serde_json::from_str(&content).map_err(|source| StoreError::Parse { path, source })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn write_records(root: &Path, kind: RecordKind, user_id: u64, json: &str) {
        let dir = root.join(kind.dir_name());
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join(format!("{user_id}.json")), json).unwrap();
    }

    #[test]
    fn test_user_file_layout() {
        let store = RecordStore::new("data");
        assert_eq!(
            store.user_file(RecordKind::Vehicles, 99),
            PathBuf::from("data/vehicleData/99.json")
        );
        assert_eq!(
            store.user_file(RecordKind::PoliceRecords, 99),
            PathBuf::from("data/policeRecords/99.json")
        );
        assert_eq!(
            store.user_file(RecordKind::Licenses, 99),
            PathBuf::from("data/licenses/99.json")
        );
        assert_eq!(
            store.user_file(RecordKind::Tickets, 99),
            PathBuf::from("data/tickets/99.json")
        );
    }

    #[test]
    fn test_missing_files_load_as_empty() {
        let dir = tempdir().unwrap();
        let store = RecordStore::new(dir.path());

        assert!(store.vehicles(42).unwrap().is_empty());
        assert!(store.police_records(42).unwrap().is_empty());
        assert!(store.licenses(42).unwrap().is_empty());
        assert!(store.tickets(42).unwrap().is_empty());
    }

    #[test]
    fn test_load_vehicles_preserves_file_order() {
        let dir = tempdir().unwrap();
        write_records(
            dir.path(),
            RecordKind::Vehicles,
            42,
            r#"[
                {"year":2019,"make":"Bravado","model":"Buffalo","color":"Black","numberPlate":"SA-1234"},
                {"year":1998,"make":"Declasse","model":"Tulip","color":"Green","numberPlate":"SA-5678"}
            ]"#,
        );
        let store = RecordStore::new(dir.path());

        let vehicles = store.vehicles(42).unwrap();
        assert_eq!(vehicles.len(), 2);
        assert_eq!(vehicles[0].make, "Bravado");
        assert_eq!(vehicles[0].number_plate, "SA-1234");
        assert_eq!(vehicles[1].year, 1998);
    }

    #[test]
    fn test_malformed_file_is_parse_error_with_path() {
        let dir = tempdir().unwrap();
        write_records(dir.path(), RecordKind::Licenses, 42, "{ not json");
        let store = RecordStore::new(dir.path());

        match store.licenses(42) {
            Err(StoreError::Parse { path, .. }) => {
                assert!(path.ends_with("licenses/42.json"));
            }
            other => panic!("expected parse error, got {other:?}"),
        }
    }

    #[test]
    fn test_tickets_are_read_fresh_each_time() {
        let dir = tempdir().unwrap();
        write_records(
            dir.path(),
            RecordKind::Tickets,
            42,
            r#"[{"offense":"Speeding","price":250,"count":1,"date":0}]"#,
        );
        let store = RecordStore::new(dir.path());
        assert_eq!(store.tickets(42).unwrap().len(), 1);

        write_records(
            dir.path(),
            RecordKind::Tickets,
            42,
            r#"[
                {"offense":"Speeding","price":250,"count":1,"date":0},
                {"offense":"Illegal parking","price":80,"count":3,"date":0}
            ]"#,
        );

        let tickets = store.tickets(42).unwrap();
        assert_eq!(tickets.len(), 2);
        assert_eq!(tickets[1].offense, "Illegal parking");
    }

    #[test]
    fn test_parse_file_counts_records() {
        let dir = tempdir().unwrap();
        write_records(
            dir.path(),
            RecordKind::Licenses,
            7,
            r#"[{"status":"valid","date":0},{"status":"revoked","date":1}]"#,
        );
        let store = RecordStore::new(dir.path());
        let path = store.user_file(RecordKind::Licenses, 7);

        assert_eq!(RecordKind::Licenses.parse_file(&path).unwrap(), 2);
    }

    #[test]
    fn test_parse_file_rejects_wrong_shape() {
        let dir = tempdir().unwrap();
        // A license array is not a vehicle array.
        write_records(
            dir.path(),
            RecordKind::Vehicles,
            7,
            r#"[{"status":"valid","date":0}]"#,
        );
        let store = RecordStore::new(dir.path());
        let path = store.user_file(RecordKind::Vehicles, 7);

        assert!(matches!(
            RecordKind::Vehicles.parse_file(&path),
            Err(StoreError::Parse { .. })
        ));
    }

    #[test]
    fn test_record_kind_from_str() {
        assert_eq!("vehicles".parse::<RecordKind>(), Ok(RecordKind::Vehicles));
        assert_eq!(
            "vehicleData".parse::<RecordKind>(),
            Ok(RecordKind::Vehicles)
        );
        assert_eq!(
            "police-records".parse::<RecordKind>(),
            Ok(RecordKind::PoliceRecords)
        );
        assert_eq!("TICKETS".parse::<RecordKind>(), Ok(RecordKind::Tickets));
        assert!("bicycles".parse::<RecordKind>().is_err());
    }
}
