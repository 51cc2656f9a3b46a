use std::collections::HashMap;
use std::sync::OnceLock;

use regex::Regex;

/// Normalize a raw header label into a field key.
///
/// Every character outside `[0-9a-zA-Z]` is dropped and the rest is
/// lowercased, so `"Test 111!"` becomes `"test111"`. The mapping is not
/// injective: `"A B"` and `"ab"` share a key.
pub fn sanitize(raw: &str) -> String {
    static NON_ALNUM_RE: OnceLock<Regex> = OnceLock::new();

    let re = NON_ALNUM_RE.get_or_init(|| Regex::new(r"[^0-9a-zA-Z]+").expect("valid regex"));
    re.replace_all(raw, "").to_ascii_lowercase()
}

/// How a key that matches no header is treated on write
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LookupPolicy {
    /// Writes to unknown keys are silently ignored
    #[default]
    Lenient,
    /// Writes to unknown keys fail with `BindError::LookupMiss`
    Strict,
}

/// Header labels of a fetched grid with their sanitized keys.
///
/// Built once per fetch and shared by every binding cut from that grid.
/// When two labels sanitize to the same key the first position wins and the
/// later column is only reachable by index.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderMap {
    labels: Vec<String>,
    keys: Vec<String>,
    positions: HashMap<String, usize>,
}

impl HeaderMap {
    pub fn new<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let labels: Vec<String> = labels.into_iter().map(Into::into).collect();
        let keys: Vec<String> = labels.iter().map(|l| sanitize(l)).collect();

        let mut positions = HashMap::with_capacity(keys.len());
        for (i, key) in keys.iter().enumerate() {
            positions.entry(key.clone()).or_insert(i);
        }

        Self {
            labels,
            keys,
            positions,
        }
    }

    /// Position of the first header whose key equals `key`
    pub fn position(&self, key: &str) -> Option<usize> {
        self.positions.get(key).copied()
    }

    /// Original labels in header order
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Sanitized keys in header order (duplicates included)
    pub fn keys(&self) -> &[String] {
        &self.keys
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}
