use serde::de::{MapAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Identifier of a character. The names endpoint serves numeric ids, but
/// string ids are accepted as well.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Identifier {
    Number(u64),
    Text(String),
}

impl fmt::Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identifier::Number(n) => write!(f, "{n}"),
            Identifier::Text(s) => f.write_str(s),
        }
    }
}

// Encoded on the wire as a two-element array: ["Display Name", id]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NameEntry {
    pub display: String,
    pub id: Identifier,
}

impl NameEntry {
    pub fn new(display: &str, id: Identifier) -> Self {
        NameEntry {
            display: display.to_string(),
            id,
        }
    }
}

/// Ordered mapping from a searchable name to its entry.
///
/// Keys keep the order of the source document. Several keys usually point at
/// the same identifier (kanji, kana, romanised and translated spellings).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameIndex {
    entries: Vec<(String, NameEntry)>,
    positions: HashMap<String, usize>,
}

impl NameIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }

    // a repeated key keeps its first position and takes the newest entry
    pub fn insert(&mut self, name: &str, entry: NameEntry) {
        if let Some(&pos) = self.positions.get(name) {
            self.entries[pos].1 = entry;
            return;
        }
        self.positions.insert(name.to_string(), self.entries.len());
        self.entries.push((name.to_string(), entry));
    }

    pub fn get(&self, name: &str) -> Option<&NameEntry> {
        self.positions.get(name).map(|&pos| &self.entries[pos].1)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &NameEntry)> {
        self.entries.iter().map(|(name, entry)| (name.as_str(), entry))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> FromIterator<(&'a str, NameEntry)> for NameIndex {
    fn from_iter<I: IntoIterator<Item = (&'a str, NameEntry)>>(iter: I) -> Self {
        let mut index = NameIndex::new();
        for (name, entry) in iter {
            index.insert(name, entry);
        }
        index
    }
}

struct NameIndexVisitor;

impl<'de> Visitor<'de> for NameIndexVisitor {
    type Value = NameIndex;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("an object mapping names to [display name, id] pairs")
    }

    fn visit_map<A>(self, mut access: A) -> Result<NameIndex, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut index = NameIndex::new();
        while let Some((name, entry)) = access.next_entry::<String, NameEntry>()? {
            index.insert(&name, entry);
        }
        Ok(index)
    }
}

impl<'de> Deserialize<'de> for NameIndex {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(NameIndexVisitor)
    }
}
