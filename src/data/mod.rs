use std::fs;
use std::io::Cursor;
use std::path::Path;

use bincode::ErrorKind;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::StarSystem;

/// Compression level used when encoding snapshot bundles.
///
/// Snapshots are written once and read many times, so the slow, tight
/// setting is the right trade.
const SNAPSHOT_COMPRESSION_LEVEL: i32 = 19;

#[derive(Debug, Error)]
pub enum DataError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialize(#[from] Box<ErrorKind>),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Compression error: {0}")]
    Compression(#[source] std::io::Error),
}

/// Everything the journal scanner reports in one go: the visited systems
/// and the name of the system the commander is in.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct SystemSnapshot {
    pub systems: Vec<StarSystem>,
    #[serde(default)]
    pub current_system: Option<String>,
}

impl SystemSnapshot {
    pub fn new(systems: Vec<StarSystem>, current_system: Option<String>) -> Self {
        SystemSnapshot {
            systems,
            current_system,
        }
    }
}

pub fn serialize_snapshot(snapshot: &SystemSnapshot) -> Result<Vec<u8>, DataError> {
    let encoded = bincode::serialize(snapshot)?;
    let mut cursor = Cursor::new(encoded);
    zstd::stream::encode_all(&mut cursor, SNAPSHOT_COMPRESSION_LEVEL)
        .map_err(DataError::Compression)
}

pub fn deserialize_snapshot(bytes: &[u8]) -> Result<SystemSnapshot, DataError> {
    let mut cursor = Cursor::new(bytes);
    let decoded = zstd::stream::decode_all(&mut cursor).map_err(DataError::Compression)?;
    Ok(bincode::deserialize(&decoded)?)
}

pub fn write_snapshot_to_file<P: AsRef<Path>>(
    snapshot: &SystemSnapshot,
    path: P,
) -> Result<(), DataError> {
    let bytes = serialize_snapshot(snapshot)?;
    fs::write(path, bytes)?;
    Ok(())
}

pub fn read_snapshot_from_file<P: AsRef<Path>>(path: P) -> Result<SystemSnapshot, DataError> {
    let bytes = fs::read(path)?;
    deserialize_snapshot(&bytes)
}

/// Reads the scanner's JSON interchange form.
pub fn read_snapshot_json<P: AsRef<Path>>(path: P) -> Result<SystemSnapshot, DataError> {
    let contents = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&contents)?)
}

/// `.json` files are read as JSON, anything else as a compressed bundle.
pub fn read_snapshot<P: AsRef<Path>>(path: P) -> Result<SystemSnapshot, DataError> {
    let path = path.as_ref();
    let is_json = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
    if is_json {
        read_snapshot_json(path)
    } else {
        read_snapshot_from_file(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot() -> SystemSnapshot {
        SystemSnapshot::new(
            vec![
                StarSystem::new("Sol", 0.0, 0.0, 0.0),
                StarSystem::new("Colonia", -9530.5, -910.28, 19808.125),
            ],
            Some("Colonia".into()),
        )
    }

    #[test]
    fn bundle_survives_file_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("snapshot.bin");
        write_snapshot_to_file(&snapshot(), &path).expect("write");
        assert_eq!(read_snapshot(&path).expect("read"), snapshot());
    }

    #[test]
    fn json_without_current_system() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("snapshot.JSON");
        fs::write(
            &path,
            r#"{ "systems": [ { "name": "Sol", "x": 0, "y": 0, "z": 0 } ] }"#,
        )
        .expect("write");
        let loaded = read_snapshot(&path).expect("read");
        assert_eq!(loaded.systems.len(), 1);
        assert_eq!(loaded.current_system, None);
    }

    #[test]
    fn garbage_bundle_is_a_compression_error() {
        let err = deserialize_snapshot(b"definitely not zstd").unwrap_err();
        assert!(matches!(err, DataError::Compression(_)));
    }
}
