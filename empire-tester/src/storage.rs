//! `GameStorage` backends for headless runs.
use std::cell::RefCell;
use std::collections::HashMap;
use std::convert::Infallible;
use std::fs;
use std::io;
use std::path::PathBuf;
use std::rc::Rc;

use empire_game::{GameState, GameStorage};
use thiserror::Error;

/// Error from the file-backed storage.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("save file I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error("save record is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
}

/// JSON-file-per-slot storage rooted at a directory.
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn slot_path(&self, slot: &str) -> PathBuf {
        self.root.join(format!("{slot}.json"))
    }
}

impl GameStorage for FileStorage {
    type Error = StorageError;

    fn save(&self, slot: &str, state: &GameState) -> Result<(), Self::Error> {
        fs::create_dir_all(&self.root)?;
        let json = serde_json::to_string_pretty(state)?;
        fs::write(self.slot_path(slot), json)?;
        Ok(())
    }

    fn load(&self, slot: &str) -> Result<Option<GameState>, Self::Error> {
        let raw = match fs::read_to_string(self.slot_path(slot)) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };
        let state = serde_json::from_str(&raw)?;
        Ok(Some(state))
    }

    fn delete(&self, slot: &str) -> Result<(), Self::Error> {
        match fs::remove_file(self.slot_path(slot)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// Shared in-memory storage; clones see the same saves.
#[derive(Clone, Default)]
pub struct MemoryStorage {
    saves: Rc<RefCell<HashMap<String, GameState>>>,
}

impl GameStorage for MemoryStorage {
    type Error = Infallible;

    fn save(&self, slot: &str, state: &GameState) -> Result<(), Self::Error> {
        self.saves
            .borrow_mut()
            .insert(slot.to_string(), state.clone());
        Ok(())
    }

    fn load(&self, slot: &str) -> Result<Option<GameState>, Self::Error> {
        Ok(self.saves.borrow().get(slot).cloned())
    }

    fn delete(&self, slot: &str) -> Result<(), Self::Error> {
        self.saves.borrow_mut().remove(slot);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_storage_roundtrips_and_deletes() {
        let root = std::env::temp_dir().join("empire-tester-storage-test");
        let storage = FileStorage::new(&root);
        let slot = "unit-test-slot";
        storage.delete(slot).unwrap();

        assert!(storage.load(slot).unwrap().is_none());

        let mut state = GameState::default();
        state.money = 777;
        storage.save(slot, &state).unwrap();
        let loaded = storage.load(slot).unwrap().unwrap();
        assert_eq!(loaded.money, 777);

        storage.delete(slot).unwrap();
        assert!(storage.load(slot).unwrap().is_none());
    }

    #[test]
    fn corrupt_record_surfaces_as_an_error() {
        let root = std::env::temp_dir().join("empire-tester-corrupt-test");
        fs::create_dir_all(&root).unwrap();
        let storage = FileStorage::new(&root);
        fs::write(storage.slot_path("bad"), "{not json").unwrap();

        assert!(matches!(
            storage.load("bad"),
            Err(StorageError::Corrupt(_))
        ));
        storage.delete("bad").unwrap();
    }
}
