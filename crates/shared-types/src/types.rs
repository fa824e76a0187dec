use std::collections::{BTreeSet, HashSet};
use std::fmt;

/// URL of a published measures PDF. Equality is exact string equality.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct DocumentRef(String);

impl DocumentRef {
    pub fn new(url: impl Into<String>) -> Self {
        Self(url.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DocumentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DocumentRef {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for DocumentRef {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A document with at least one callsign found near the marker
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AlertRecord {
    pub document: DocumentRef,
    pub callsigns: BTreeSet<String>, // Never empty
}

impl AlertRecord {
    /// Returns `None` for an empty callsign set; empty records are never alerted.
    pub fn new(document: DocumentRef, callsigns: BTreeSet<String>) -> Option<Self> {
        if callsigns.is_empty() {
            None
        } else {
            Some(Self {
                document,
                callsigns,
            })
        }
    }
}

/// Documents already processed by earlier runs.
///
/// Only grows during a run. Serializes as a sorted JSON array of URLs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeenSet {
    docs: HashSet<DocumentRef>,
}

impl SeenSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, doc: &DocumentRef) -> bool {
        self.docs.contains(doc)
    }

    /// Returns true if the document was not already present.
    pub fn insert(&mut self, doc: DocumentRef) -> bool {
        self.docs.insert(doc)
    }

    pub fn len(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    /// Entries in ascending order, for stable on-disk diffs.
    pub fn sorted(&self) -> Vec<&DocumentRef> {
        let mut entries: Vec<_> = self.docs.iter().collect();
        entries.sort();
        entries
    }
}

impl FromIterator<DocumentRef> for SeenSet {
    fn from_iter<I: IntoIterator<Item = DocumentRef>>(iter: I) -> Self {
        Self {
            docs: iter.into_iter().collect(),
        }
    }
}

impl serde::Serialize for SeenSet {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.sorted())
    }
}

impl<'de> serde::Deserialize<'de> for SeenSet {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let docs = Vec::<DocumentRef>::deserialize(deserializer)?;
        Ok(docs.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_alert_record_rejects_empty_callsigns() {
        assert!(AlertRecord::new("a.pdf".into(), BTreeSet::new()).is_none());

        let record = AlertRecord::new("a.pdf".into(), BTreeSet::from(["DAL123".to_string()]));
        assert!(record.is_some());
    }

    #[test]
    fn test_seen_set_insert_is_idempotent() {
        let mut seen = SeenSet::new();
        assert!(seen.insert("https://x/a.pdf".into()));
        assert!(!seen.insert("https://x/a.pdf".into()));
        assert_eq!(seen.len(), 1);
    }

    #[test]
    fn test_seen_set_serializes_sorted() {
        let seen: SeenSet = ["c.pdf", "a.pdf", "b.pdf"]
            .into_iter()
            .map(DocumentRef::from)
            .collect();
        let json = serde_json::to_string(&seen).unwrap();
        assert_eq!(json, r#"["a.pdf","b.pdf","c.pdf"]"#);
    }

    #[test]
    fn test_seen_set_deserializes_with_duplicates() {
        let seen: SeenSet = serde_json::from_str(r#"["b.pdf","a.pdf","b.pdf"]"#).unwrap();
        assert_eq!(seen.len(), 2);
        assert!(seen.contains(&"a.pdf".into()));
    }

    #[test]
    fn test_document_ref_equality_is_exact() {
        assert_ne!(DocumentRef::from("A.pdf"), DocumentRef::from("a.pdf"));
        assert_ne!(DocumentRef::from("a.pdf "), DocumentRef::from("a.pdf"));
    }
}
