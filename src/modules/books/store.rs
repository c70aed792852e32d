//! Read-only book records kept as one JSON array file per API version.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use folio_kernel::ApiVersion;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{} does not hold a JSON array of records: {source}", .path.display())]
    Malformed {
        path: PathBuf,
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{0}' is not a record position")]
pub struct InvalidRecordKey(pub String);

/// Identifier from the request path: a zero-based position in the record file.
///
/// Only canonical decimal spellings are accepted, so each position has exactly
/// one identifier: no sign, no leading zeros.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordKey(usize);

impl RecordKey {
    pub fn offset(self) -> usize {
        self.0
    }
}

impl FromStr for RecordKey {
    type Err = InvalidRecordKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let canonical = !s.is_empty()
            && s.bytes().all(|b| b.is_ascii_digit())
            && (s == "0" || !s.starts_with('0'));
        if !canonical {
            return Err(InvalidRecordKey(s.to_string()));
        }

        // digits only, so the remaining failure is overflow
        s.parse()
            .map(RecordKey)
            .map_err(|_| InvalidRecordKey(s.to_string()))
    }
}

/// File-backed record store. Nothing is cached: every lookup re-reads the file.
#[derive(Debug, Clone)]
pub struct BookStore {
    data_dir: PathBuf,
}

impl BookStore {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// File holding the records for `version`, e.g. `books_v1.json`.
    pub fn source(&self, version: ApiVersion) -> PathBuf {
        self.data_dir.join(format!("books_v{}.json", version))
    }

    /// Load every record stored for `version`, in file order.
    pub async fn load(&self, version: ApiVersion) -> Result<Vec<serde_json::Value>, StoreError> {
        let path = self.source(version);
        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|source| StoreError::Read {
                path: path.clone(),
                source,
            })?;

        serde_json::from_slice(&bytes).map_err(|source| StoreError::Malformed { path, source })
    }

    /// Fetch the record at `key`, or `None` when the position is out of range.
    pub async fn fetch(
        &self,
        version: ApiVersion,
        key: RecordKey,
    ) -> Result<Option<serde_json::Value>, StoreError> {
        let records = self.load(version).await?;
        Ok(records.into_iter().nth(key.offset()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn record_keys_are_non_negative_integers() {
        assert_eq!("0".parse::<RecordKey>().unwrap().offset(), 0);
        assert_eq!("12".parse::<RecordKey>().unwrap().offset(), 12);
        assert!("-1".parse::<RecordKey>().is_err());
        assert!("abc".parse::<RecordKey>().is_err());
        assert!("".parse::<RecordKey>().is_err());
    }

    #[test]
    fn record_keys_have_one_spelling() {
        for raw in ["+1", "01", "00", "007", " 1", "1 ", "1.0", "99999999999999999999999"] {
            assert_eq!(
                raw.parse::<RecordKey>(),
                Err(InvalidRecordKey(raw.to_string())),
                "{raw:?}"
            );
        }
        assert_eq!("10".parse::<RecordKey>().unwrap().offset(), 10);
    }

    #[test]
    fn source_is_named_after_version() {
        let store = BookStore::new("/srv/data");
        assert_eq!(
            store.source(ApiVersion::V1),
            PathBuf::from("/srv/data/books_v1.json")
        );
        assert_eq!(
            store.source(ApiVersion::V2),
            PathBuf::from("/srv/data/books_v2.json")
        );
    }

    #[tokio::test]
    async fn fetch_is_positional_and_bounds_checked() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("books_v1.json"),
            r#"[{"id": "a"}, {"id": "b"}]"#,
        )
        .unwrap();

        let store = BookStore::new(dir.path());
        let key = |raw: &str| raw.parse::<RecordKey>().unwrap();

        assert_eq!(
            store.fetch(ApiVersion::V1, key("1")).await.unwrap(),
            Some(json!({"id": "b"}))
        );
        assert_eq!(store.fetch(ApiVersion::V1, key("2")).await.unwrap(), None);
    }

    #[tokio::test]
    async fn load_reflects_file_changes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("books_v1.json");
        let store = BookStore::new(dir.path());

        std::fs::write(&path, "[]").unwrap();
        assert!(store.load(ApiVersion::V1).await.unwrap().is_empty());

        std::fs::write(&path, r#"[{"id": "1"}]"#).unwrap();
        assert_eq!(store.load(ApiVersion::V1).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn missing_file_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = BookStore::new(dir.path());

        let err = store.load(ApiVersion::V2).await.unwrap_err();
        assert!(matches!(err, StoreError::Read { .. }));
        assert!(err.to_string().contains("books_v2.json"));
    }

    #[tokio::test]
    async fn non_array_file_is_malformed() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("books_v1.json"), r#"{"id": "1"}"#).unwrap();

        let err = BookStore::new(dir.path())
            .load(ApiVersion::V1)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Malformed { .. }));
    }
}
