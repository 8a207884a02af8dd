use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

use crate::storage::TitleMatch;

/// Lowest accepted rating
pub const MIN_RATING: f64 = 0.0;

/// Highest accepted rating
pub const MAX_RATING: f64 = 10.0;

/// Check that a rating lies in `[MIN_RATING, MAX_RATING]`
pub fn validate_rating(rating: f64) -> bool {
    (MIN_RATING..=MAX_RATING).contains(&rating)
}

/// The details stored for one title
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieRecord {
    /// Release year
    pub year: i32,

    /// Rating between 0 and 10
    pub rating: f64,

    /// Poster URL; written as an empty string when absent
    #[serde(
        default,
        serialize_with = "serialize_poster",
        deserialize_with = "deserialize_poster"
    )]
    pub poster: Option<String>,
}

impl MovieRecord {
    /// Create a record. An empty poster is stored as `None`.
    pub fn new(year: i32, rating: f64, poster: Option<&str>) -> Self {
        Self {
            year,
            rating,
            poster: normalize_poster(poster.map(str::to_string)),
        }
    }
}

pub(crate) fn normalize_poster(poster: Option<String>) -> Option<String> {
    poster.filter(|p| !p.is_empty())
}

fn serialize_poster<S: Serializer>(poster: &Option<String>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(poster.as_deref().unwrap_or(""))
}

fn deserialize_poster<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Option::<String>::deserialize(deserializer).map(normalize_poster)
}

/// An ordered mapping from title to [`MovieRecord`].
///
/// Titles are unique and compared case-sensitively. Iteration follows insertion
/// order, which after a load is the order of the file.
///
/// Lookups scan the entries linearly, so building a catalog of `n` titles is
/// quadratic. That is fine for a personal catalog of a few thousand movies but
/// not for a hot path.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    entries: Vec<(String, MovieRecord)>,
}

impl Catalog {
    /// Create an empty catalog
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of movies
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Exact, case-sensitive lookup
    pub fn get(&self, title: &str) -> Option<&MovieRecord> {
        self.position(title).map(|i| &self.entries[i].1)
    }

    pub fn contains(&self, title: &str) -> bool {
        self.position(title).is_some()
    }

    /// Insert a new title. Returns `false` and leaves the catalog untouched when
    /// the title is already present.
    pub fn insert(&mut self, title: impl Into<String>, record: MovieRecord) -> bool {
        let title = title.into();
        if self.contains(&title) {
            return false;
        }
        self.entries.push((title, record));
        true
    }

    /// Remove a title by exact match
    pub fn remove(&mut self, title: &str) -> Option<MovieRecord> {
        self.position(title).map(|i| self.entries.remove(i).1)
    }

    /// Mutable access by exact match
    pub fn get_mut(&mut self, title: &str) -> Option<&mut MovieRecord> {
        self.position(title).map(move |i| &mut self.entries[i].1)
    }

    /// Resolve a user-supplied title to the stored title under `policy`.
    ///
    /// With [`TitleMatch::CaseInsensitive`] an identical title is preferred, then
    /// the first stored title that is equal after lowercasing. Later titles with
    /// the same folded form are never chosen over an earlier one.
    pub fn resolve_title(&self, query: &str, policy: TitleMatch) -> Option<&str> {
        if let Some(i) = self.position(query) {
            return Some(&self.entries[i].0);
        }

        match policy {
            TitleMatch::CaseSensitive => None,
            TitleMatch::CaseInsensitive => {
                let folded = query.to_lowercase();
                self.entries
                    .iter()
                    .find(|(title, _)| title.to_lowercase() == folded)
                    .map(|(title, _)| title.as_str())
            }
        }
    }

    /// Titles in catalog order
    pub fn titles(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(title, _)| title.as_str())
    }

    /// Entries in catalog order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &MovieRecord)> {
        self.entries.iter().map(|(title, record)| (title.as_str(), record))
    }

    fn position(&self, title: &str) -> Option<usize> {
        self.entries.iter().position(|(t, _)| t == title)
    }
}

impl IntoIterator for Catalog {
    type Item = (String, MovieRecord);
    type IntoIter = std::vec::IntoIter<(String, MovieRecord)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl FromIterator<(String, MovieRecord)> for Catalog {
    /// Later duplicates of a title are ignored.
    fn from_iter<I: IntoIterator<Item = (String, MovieRecord)>>(iter: I) -> Self {
        let mut catalog = Catalog::new();
        for (title, record) in iter {
            catalog.insert(title, record);
        }
        catalog
    }
}

impl Serialize for Catalog {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (title, record) in &self.entries {
            map.serialize_entry(title, record)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Catalog {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct CatalogVisitor;

        impl<'de> Visitor<'de> for CatalogVisitor {
            type Value = Catalog;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an object mapping titles to movie records")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Catalog, A::Error> {
                let mut catalog = Catalog::new();
                while let Some((title, record)) = access.next_entry::<String, MovieRecord>()? {
                    // A repeated key keeps its first position but takes the last value
                    match catalog.get_mut(&title) {
                        Some(existing) => *existing = record,
                        None => {
                            catalog.entries.push((title, record));
                        }
                    }
                }
                Ok(catalog)
            }
        }

        deserializer.deserialize_map(CatalogVisitor)
    }
}
