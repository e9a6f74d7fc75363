//! Catalogue adapter backed by an in-memory identifier set.
//!
//! The set is usually loaded once at start-up from a JSON file holding
//! either an array of item records or an object keyed by item identifier:
//!
//! ```json
//! [{ "id": 3, "name": "Lamp", "price": 1200 }, { "id": 7 }]
//! ```
//!
//! ```json
//! { "3": { "name": "Lamp" }, "7": {} }
//! ```
//!
//! Descriptive fields are accepted and ignored.

use std::collections::{HashMap, HashSet};
use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use serde_json::Value;

use crate::domain::ItemId;
use crate::domain::ports::Catalogue;

/// Errors raised while loading a catalogue file.
#[derive(Debug, thiserror::Error)]
pub enum CatalogueLoadError {
    #[error("failed to read catalogue {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("catalogue is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("catalogue item id {0:?} is not a positive integer")]
    InvalidId(String),
}

#[derive(Deserialize)]
struct ItemRecord {
    id: u64,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogueFile {
    Records(Vec<ItemRecord>),
    Keyed(HashMap<String, Value>),
}

/// Read-only catalogue answering existence queries from a set.
///
/// # Examples
/// ```
/// use purchase_recorder::domain::ItemId;
/// use purchase_recorder::domain::ports::Catalogue;
/// use purchase_recorder::outbound::catalogue::InMemoryCatalogue;
///
/// let catalogue = InMemoryCatalogue::from_ids([3, 7]);
/// assert!(catalogue.exists(ItemId::new(3)));
/// assert!(!catalogue.exists(ItemId::new(99)));
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryCatalogue {
    items: HashSet<ItemId>,
}

impl InMemoryCatalogue {
    /// Build a catalogue from raw identifiers.
    pub fn from_ids(ids: impl IntoIterator<Item = u64>) -> Self {
        Self {
            items: ids.into_iter().map(ItemId::new).collect(),
        }
    }

    /// Parse a catalogue document.
    pub fn from_json_str(raw: &str) -> Result<Self, CatalogueLoadError> {
        let ids = match serde_json::from_str::<CatalogueFile>(raw)? {
            CatalogueFile::Records(records) => records
                .into_iter()
                .map(|record| positive_id(record.id, || record.id.to_string()))
                .collect::<Result<HashSet<_>, _>>()?,
            CatalogueFile::Keyed(entries) => entries
                .into_keys()
                .map(|key| parse_key(&key))
                .collect::<Result<HashSet<_>, _>>()?,
        };
        Ok(Self { items: ids })
    }

    /// Read and parse a catalogue file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, CatalogueLoadError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| CatalogueLoadError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

fn positive_id(
    raw: u64,
    describe: impl FnOnce() -> String,
) -> Result<ItemId, CatalogueLoadError> {
    if raw == 0 {
        return Err(CatalogueLoadError::InvalidId(describe()));
    }
    Ok(ItemId::new(raw))
}

fn parse_key(key: &str) -> Result<ItemId, CatalogueLoadError> {
    if key.is_empty() || !key.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(CatalogueLoadError::InvalidId(key.to_owned()));
    }
    let raw = key
        .parse::<u64>()
        .map_err(|_| CatalogueLoadError::InvalidId(key.to_owned()))?;
    positive_id(raw, || key.to_owned())
}

impl Catalogue for InMemoryCatalogue {
    fn exists(&self, id: ItemId) -> bool {
        self.items.contains(&id)
    }
}
