use cdr_store::{FileStore, KeyValueStore, MemoryStore, StoreError};

/// Storage backend picked at startup: files in the data directory, or
/// memory only with `--ephemeral`.
#[derive(Debug, Clone)]
pub enum AppStore {
    File(FileStore),
    Memory(MemoryStore),
}

impl AppStore {
    #[must_use]
    pub fn location(&self) -> String {
        match self {
            Self::File(store) => store.dir().display().to_string(),
            Self::Memory(_) => String::from("(mémoire)"),
        }
    }
}

impl KeyValueStore for AppStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match self {
            Self::File(store) => store.get(key),
            Self::Memory(store) => store.get(key),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        match self {
            Self::File(store) => store.set(key, value),
            Self::Memory(store) => store.set(key, value),
        }
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        match self {
            Self::File(store) => store.remove(key),
            Self::Memory(store) => store.remove(key),
        }
    }
}
