//! Language frequency aggregation over repositories.

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use super::RepoRecord;

/// Ordered language → count mapping.
///
/// Keeps first-seen order so the snapshot, the derived skills and the tests
/// all see the same sequence. Serialized as a JSON object in that order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LanguageCounts(Vec<(String, u64)>);

impl LanguageCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `amount` to `language`, appending it when first seen.
    pub fn add(&mut self, language: &str, amount: u64) {
        match self.0.iter_mut().find(|(name, _)| name == language) {
            Some((_, count)) => *count += amount,
            None => self.0.push((language.to_string(), amount)),
        }
    }

    pub fn get(&self, language: &str) -> Option<u64> {
        self.0
            .iter()
            .find(|(name, _)| name == language)
            .map(|(_, count)| *count)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> u64 {
        self.0.iter().map(|(_, count)| count).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.0.iter().map(|(name, count)| (name.as_str(), *count))
    }

    /// The `n` most frequent languages, highest count first.
    ///
    /// Equal counts keep their insertion order (stable sort).
    pub fn top(&self, n: usize) -> Vec<(String, u64)> {
        let mut sorted = self.0.clone();
        sorted.sort_by(|a, b| b.1.cmp(&a.1));
        sorted.truncate(n);
        sorted
    }
}

impl FromIterator<(String, u64)> for LanguageCounts {
    fn from_iter<I: IntoIterator<Item = (String, u64)>>(iter: I) -> Self {
        let mut counts = LanguageCounts::new();
        for (name, count) in iter {
            counts.add(&name, count);
        }
        counts
    }
}

impl Serialize for LanguageCounts {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (name, count) in &self.0 {
            map.serialize_entry(name, count)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for LanguageCounts {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CountsVisitor;

        impl<'de> Visitor<'de> for CountsVisitor {
            type Value = LanguageCounts;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of language names to non-negative integers")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut counts = LanguageCounts::new();
                while let Some((name, count)) = access.next_entry::<String, u64>()? {
                    counts.add(&name, count);
                }
                Ok(counts)
            }
        }

        deserializer.deserialize_map(CountsVisitor)
    }
}

/// Counts the primary language of each repository.
///
/// Repositories without a language are ignored; every other repository adds
/// exactly one to its language regardless of size.
pub fn aggregate_languages(repos: &[RepoRecord]) -> LanguageCounts {
    let mut counts = LanguageCounts::new();
    for language in repos.iter().filter_map(|repo| repo.language.as_deref()) {
        counts.add(language, 1);
    }
    counts
}
