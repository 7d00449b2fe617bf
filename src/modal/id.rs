use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Identifier of one open modal instance
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModalId(String);

impl ModalId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ModalId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ModalId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl AsRef<str> for ModalId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for ModalId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

/// Generates `<prefix>-<unix millis>-<sequence>.<random>` identifiers.
///
/// The sequence is monotonic for the lifetime of the generator, so two ids
/// drawn in the same millisecond still differ; the random component keeps ids
/// from separate generators apart. Not a cryptographic guarantee.
#[derive(Debug)]
pub struct IdGenerator {
    prefix: String,
    sequence: u64,
}

impl IdGenerator {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            sequence: 0,
        }
    }

    pub fn next_id(&mut self) -> ModalId {
        self.sequence += 1;
        let millis = chrono::Utc::now().timestamp_millis().max(0);
        let salt: u32 = rand::random();
        ModalId(format!("{}-{}-{}.{}", self.prefix, millis, self.sequence, salt))
    }
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new("modal")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generated_ids_are_unique() {
        let mut generator = IdGenerator::default();
        let ids: HashSet<ModalId> = (0..1000).map(|_| generator.next_id()).collect();
        assert_eq!(ids.len(), 1000);
    }

    #[test]
    fn test_generated_id_shape() {
        let mut generator = IdGenerator::default();
        let pattern = regex::Regex::new(r"^modal-\d+-\d+\.\d+$").unwrap();
        for _ in 0..10 {
            let id = generator.next_id();
            assert!(pattern.is_match(id.as_str()), "unexpected id shape: {}", id);
        }
    }

    #[test]
    fn test_custom_prefix() {
        let mut generator = IdGenerator::new("dialog");
        assert!(generator.next_id().as_str().starts_with("dialog-"));
    }

    #[test]
    fn test_lookup_by_str() {
        let mut set = HashSet::new();
        set.insert(ModalId::from("abc"));
        assert!(set.contains("abc"));
    }
}
