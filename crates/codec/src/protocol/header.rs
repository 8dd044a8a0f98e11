//! Ordered header field storage.
//!
//! [`HeaderList`] keeps every field exactly as it arrived: original name casing, arrival
//! order and duplicates. Lookups compare names case-insensitively.

use std::slice;
use std::vec;

/// An ordered multimap of header fields.
///
/// Duplicate names are kept as separate entries in arrival order, never merged, so callers
/// can observe how many times a field was sent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderList {
    entries: Vec<(String, String)>,
}

impl HeaderList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of fields, counting duplicates.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Appends a field after all existing ones.
    pub fn append<N: Into<String>, V: Into<String>>(&mut self, name: N, value: V) {
        self.entries.push((name.into(), value.into()));
    }

    /// Returns the value of the first field named `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.entries.iter().find(|(n, _)| n.eq_ignore_ascii_case(name)).map(|(_, v)| v.as_str())
    }

    /// Returns every value of fields named `name`, in arrival order.
    pub fn get_all<'a, 'n>(&'a self, name: &'n str) -> impl Iterator<Item = &'a str> + use<'a, 'n> {
        self.entries.iter().filter(move |(n, _)| n.eq_ignore_ascii_case(name)).map(|(_, v)| v.as_str())
    }

    /// Counts the fields named `name`.
    pub fn count(&self, name: &str) -> usize {
        self.get_all(name).count()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Iterates `(name, value)` pairs in arrival order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub(crate) fn last_value_mut(&mut self) -> Option<&mut String> {
        self.entries.last_mut().map(|(_, v)| v)
    }
}

impl<N: Into<String>, V: Into<String>> FromIterator<(N, V)> for HeaderList {
    fn from_iter<T: IntoIterator<Item = (N, V)>>(iter: T) -> Self {
        Self { entries: iter.into_iter().map(|(n, v)| (n.into(), v.into())).collect() }
    }
}

impl IntoIterator for HeaderList {
    type Item = (String, String);
    type IntoIter = vec::IntoIter<(String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'a> IntoIterator for &'a HeaderList {
    type Item = &'a (String, String);
    type IntoIter = slice::Iter<'a, (String, String)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}
