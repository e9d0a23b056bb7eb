//! Storage-facing types: list filters and sealed private keys.

use chrono::{DateTime, Utc};

use crate::cipher::Algorithm;
use crate::note::NoteRecord;

/// Filter for listing notes.
///
/// Results are always ordered newest first by creation time.
#[derive(Debug, Clone, Default)]
pub struct NoteFilter {
    /// Case-insensitive title substring
    pub search: Option<String>,

    /// Only notes encrypted with this algorithm
    pub algorithm: Option<Algorithm>,

    /// Maximum number of results
    pub limit: Option<usize>,
}

impl NoteFilter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, query: impl Into<String>) -> Self {
        self.search = Some(query.into());
        self
    }

    pub fn algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = Some(algorithm);
        self
    }

    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Whether a single record passes the search and algorithm conditions.
    pub fn matches(&self, record: &NoteRecord) -> bool {
        if let Some(algorithm) = self.algorithm {
            if record.algorithm != algorithm {
                return false;
            }
        }
        match self.search.as_deref() {
            Some(query) => record.title_matches(query),
            None => true,
        }
    }

    /// Filter, sort newest first, then truncate to `limit`.
    pub fn apply(&self, records: impl IntoIterator<Item = NoteRecord>) -> Vec<NoteRecord> {
        let mut records: Vec<NoteRecord> =
            records.into_iter().filter(|r| self.matches(r)).collect();
        records.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });
        if let Some(limit) = self.limit {
            records.truncate(limit);
        }
        records
    }
}

/// An asymmetric private key sealed under a note's derived key.
///
/// `sealed` is AES-GCM over the PKCS#8 DER of the private key, with the
/// note id as associated data.
#[derive(Clone, PartialEq, Eq)]
pub struct WrappedKey {
    pub note_id: String,
    pub algorithm: Algorithm,
    pub nonce: Vec<u8>,
    pub sealed: Vec<u8>,
    pub created_at: DateTime<Utc>,
}

impl std::fmt::Debug for WrappedKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WrappedKey")
            .field("note_id", &self.note_id)
            .field("algorithm", &self.algorithm)
            .field("sealed_len", &self.sealed.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cipher::EncryptedPayload;
    use crate::palette::ColorSequence;
    use chrono::{Duration, TimeZone};

    fn record(id: &str, title: &str, algorithm: Algorithm, minutes: i64) -> NoteRecord {
        let nonce = algorithm.uses_nonce().then(|| vec![0u8; 12]);
        let payload = EncryptedPayload::new(algorithm, vec![1, 2, 3], nonce).unwrap();
        let base = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        NoteRecord::assemble(
            id,
            title,
            ColorSequence::new(["#FF0000", "#00FF00", "#0000FF"]).unwrap(),
            &payload,
            base + Duration::minutes(minutes),
        )
    }

    #[test]
    fn test_note_filter_builder() {
        let filter = NoteFilter::new()
            .search("todo")
            .algorithm(Algorithm::Ecc)
            .limit(10);

        assert_eq!(filter.search, Some("todo".to_string()));
        assert_eq!(filter.algorithm, Some(Algorithm::Ecc));
        assert_eq!(filter.limit, Some(10));
    }

    #[test]
    fn test_apply_sorts_newest_first() {
        let notes = vec![
            record("a", "first", Algorithm::AesGcm, 0),
            record("b", "second", Algorithm::AesGcm, 5),
            record("c", "third", Algorithm::AesGcm, 2),
        ];
        let ids: Vec<String> = NoteFilter::new()
            .apply(notes)
            .into_iter()
            .map(|n| n.id)
            .collect();
        assert_eq!(ids, vec!["b", "c", "a"]);
    }

    #[test]
    fn test_apply_filters_then_limits() {
        let notes = vec![
            record("a", "Work plan", Algorithm::AesGcm, 0),
            record("b", "Groceries", Algorithm::RsaOaep, 1),
            record("c", "work log", Algorithm::Ecc, 2),
            record("d", "WORK trip", Algorithm::AesGcm, 3),
        ];

        let found = NoteFilter::new().search("work").limit(2).apply(notes.clone());
        let ids: Vec<&str> = found.iter().map(|n| n.id.as_str()).collect();
        assert_eq!(ids, vec!["d", "c"]);

        let rsa = NoteFilter::new().algorithm(Algorithm::RsaOaep).apply(notes);
        assert_eq!(rsa.len(), 1);
        assert_eq!(rsa[0].id, "b");
    }

    #[test]
    fn test_wrapped_key_debug_hides_material() {
        let key = WrappedKey {
            note_id: "n1".to_string(),
            algorithm: Algorithm::Ecc,
            nonce: vec![0xAB; 12],
            sealed: vec![0xCD; 40],
            created_at: Utc::now(),
        };
        let debug = format!("{:?}", key);
        assert!(debug.contains("sealed_len: 40"));
        assert!(!debug.contains("205"));
    }
}
