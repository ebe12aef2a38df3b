//! Asset identification and the unique id → path mapping.

use std::collections::btree_map::{BTreeMap, Entry};
use std::path::{Path, PathBuf};

use crate::error::CacheError;
use crate::scanner::AssetKind;

/// One source asset found during a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetRecord {
    /// Filename stem, unique across the scanned tree
    pub id: String,
    /// Absolute path of the source file
    pub source_path: PathBuf,
    /// Image or mesh
    pub kind: AssetKind,
}

/// The asset id of a source path: its file name without the extension.
///
/// # Example
///
/// ```
/// use asset_cache::cache::asset_id_for_path;
/// use std::path::Path;
///
/// assert_eq!(asset_id_for_path(Path::new("/faces/a/subject_01.jpg")).as_deref(), Some("subject_01"));
/// ```
#[must_use]
pub fn asset_id_for_path(path: &Path) -> Option<String> {
    path.file_stem()
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .map(str::to_string)
}

/// Unique mapping from asset id to source path, ordered by id.
#[derive(Debug, Clone)]
pub struct AssetMapping {
    kind: AssetKind,
    paths: BTreeMap<String, PathBuf>,
}

impl AssetMapping {
    /// Asset kind of every record.
    #[must_use]
    pub fn kind(&self) -> AssetKind {
        self.kind
    }

    /// Number of distinct ids.
    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Whether no assets were found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Source path for an id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Path> {
        self.paths.get(id).map(PathBuf::as_path)
    }

    /// All ids in sorted order.
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.paths.keys().map(String::as_str)
    }

    /// All records in id order.
    pub fn records(&self) -> impl Iterator<Item = AssetRecord> + '_ {
        self.paths.iter().map(|(id, path)| AssetRecord {
            id: id.clone(),
            source_path: path.clone(),
            kind: self.kind,
        })
    }
}

/// Build the id mapping for enumerated paths.
///
/// Fails with [`CacheError::DuplicateAssetId`] as soon as a second path
/// produces an id that is already taken. Paths without a usable stem are
/// skipped.
pub fn build_asset_mapping<I>(kind: AssetKind, paths: I) -> Result<AssetMapping, CacheError>
where
    I: IntoIterator<Item = PathBuf>,
{
    let mut mapping: BTreeMap<String, PathBuf> = BTreeMap::new();
    for path in paths {
        let Some(id) = asset_id_for_path(&path) else {
            log::warn!("Cannot derive an asset id from {}, skipping", path.display());
            continue;
        };
        match mapping.entry(id) {
            Entry::Occupied(existing) => {
                return Err(CacheError::DuplicateAssetId {
                    id: existing.key().clone(),
                    first: existing.get().clone(),
                    second: path,
                });
            }
            Entry::Vacant(slot) => {
                slot.insert(path);
            }
        }
    }
    log::debug!("Mapped {} {} assets", mapping.len(), kind);
    Ok(AssetMapping {
        kind,
        paths: mapping,
    })
}
