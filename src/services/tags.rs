//! `TagList` — ordered set of short labels (mentor domains and badges).
//!
//! DESIGN
//! ======
//! Business logic only ever sees a parsed list. The comma-joined form is a
//! storage/wire boundary: `from_csv` on the way in, `to_csv` on the way
//! out. Entries are trimmed, empty entries are dropped, and duplicates keep
//! their first position. Matching is exact and case-sensitive.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagList(Vec<String>);

impl TagList {
    pub const EMPTY: Self = Self(Vec::new());

    #[must_use]
    pub fn new() -> Self {
        Self(Vec::new())
    }

    /// Parse a comma-joined list (`"backend, devops"`).
    #[must_use]
    pub fn from_csv(raw: &str) -> Self {
        raw.split(',').collect()
    }

    /// Join back into the stored comma-separated form (no spaces).
    #[must_use]
    pub fn to_csv(&self) -> String {
        self.0.join(",")
    }

    /// Add a tag unless it is blank or already present.
    pub fn push(&mut self, tag: impl AsRef<str>) {
        let tag = tag.as_ref().trim();
        if tag.is_empty() || self.contains(tag) {
            return;
        }
        self.0.push(tag.to_owned());
    }

    /// Exact membership test.
    #[must_use]
    pub fn contains(&self, tag: &str) -> bool {
        self.0.iter().any(|t| t == tag)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for TagList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut tags = Self::new();
        for tag in iter {
            tags.push(tag);
        }
        tags
    }
}

impl fmt::Display for TagList {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_csv())
    }
}

impl Serialize for TagList {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

/// Clients may send either a JSON array or a comma-joined string.
#[derive(Deserialize)]
#[serde(untagged)]
enum TagListWire {
    List(Vec<String>),
    Csv(String),
}

impl<'de> Deserialize<'de> for TagList {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match TagListWire::deserialize(deserializer)? {
            TagListWire::List(items) => items.into_iter().collect(),
            TagListWire::Csv(raw) => Self::from_csv(&raw),
        })
    }
}

#[cfg(test)]
#[path = "tags_test.rs"]
mod tests;
