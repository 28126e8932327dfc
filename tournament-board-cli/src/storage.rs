//! Key-value storage of snapshots, one JSON file per key.
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::Result;

#[derive(Clone, Debug)]
pub struct LocalStorage {
    dir: PathBuf,
}

impl LocalStorage {
    pub fn new<P>(dir: P) -> Self
    where
        P: Into<PathBuf>,
    {
        Self { dir: dir.into() }
    }

    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    /// Reads the value stored under `key`. Returns `None` if nothing is stored.
    pub fn get<T>(&self, key: &str) -> Result<Option<T>>
    where
        T: DeserializeOwned,
    {
        let buf = match fs::read(self.path(key)) {
            Ok(buf) => buf,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        Ok(Some(serde_json::from_slice(&buf)?))
    }

    /// Reads the value stored under `key`. A value that cannot be read is logged and treated
    /// as missing.
    pub fn load<T>(&self, key: &str) -> Option<T>
    where
        T: DeserializeOwned,
    {
        match self.get(key) {
            Ok(value) => value,
            Err(err) => {
                log::error!("Failed to load {}: {}", key, err);
                None
            }
        }
    }

    pub fn set<T>(&self, key: &str, value: &T) -> Result<()>
    where
        T: Serialize,
    {
        fs::create_dir_all(&self.dir)?;

        let buf = serde_json::to_vec_pretty(value)?;
        fs::write(self.path(key), buf)?;

        log::debug!("Stored {} in {:?}", key, self.dir);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::env;
    use std::fs;
    use std::path::PathBuf;
    use std::process;

    use tournament_board_core::snapshot::BracketSnapshot;
    use tournament_board_core::Bracket;

    use super::LocalStorage;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = env::temp_dir().join(format!("tournament-board-{}-{}", name, process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn test_storage_roundtrip() {
        let dir = temp_dir("roundtrip");
        let storage = LocalStorage::new(&dir);

        assert_eq!(storage.get::<BracketSnapshot>("bracket").unwrap(), None);

        let snapshot = Bracket::new(["X", "Y"]).snapshot();
        storage.set("bracket", &snapshot).unwrap();
        assert!(dir.join("bracket.json").is_file());

        assert_eq!(storage.get("bracket").unwrap(), Some(snapshot));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_storage_corrupt_value() {
        let dir = temp_dir("corrupt");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("bracket.json"), b"{ \"matches\": 3 }").unwrap();

        let storage = LocalStorage::new(&dir);
        assert!(storage.get::<BracketSnapshot>("bracket").is_err());
        assert_eq!(storage.load::<BracketSnapshot>("bracket"), None);

        fs::remove_dir_all(&dir).unwrap();
    }
}
