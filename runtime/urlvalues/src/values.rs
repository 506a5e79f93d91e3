//! The source side of unmarshalling: a multimap from keys to lists of values.
use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use indexmap::IndexMap;

/// A read-only view over a multimap from keys to lists of values.
///
/// It's implemented for [`UrlValues`] and for the usual map types holding `Vec<String>`s.
pub trait Values {
    /// The values associated with `key`, if any.
    fn get(&self, key: &str) -> Option<&[String]>;
}

impl<V: Values + ?Sized> Values for &V {
    fn get(&self, key: &str) -> Option<&[String]> {
        V::get(*self, key)
    }
}

impl<S: BuildHasher> Values for HashMap<String, Vec<String>, S> {
    fn get(&self, key: &str) -> Option<&[String]> {
        HashMap::get(self, key).map(Vec::as_slice)
    }
}

impl Values for BTreeMap<String, Vec<String>> {
    fn get(&self, key: &str) -> Option<&[String]> {
        BTreeMap::get(self, key).map(Vec::as_slice)
    }
}

impl<S: BuildHasher> Values for IndexMap<String, Vec<String>, S> {
    fn get(&self, key: &str) -> Option<&[String]> {
        IndexMap::get(self, key).map(Vec::as_slice)
    }
}

/// URL values, e.g. the parsed query string of a request or a submitted form.
///
/// Keys are kept in insertion order, values in the order they were appended.
///
/// ```rust
/// use urlvalues::UrlValues;
///
/// let values = UrlValues::parse("?tag=a&tag=b&page=2");
/// assert_eq!(values.get("tag"), Some(&["a".to_string(), "b".to_string()][..]));
/// assert_eq!(values.get("missing"), None);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UrlValues(IndexMap<String, Vec<String>>);

impl UrlValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse an `application/x-www-form-urlencoded` string, such as a query string.
    ///
    /// A leading `?` is ignored.
    /// Percent-encoded sequences and `+` are decoded.
    pub fn parse(input: &str) -> Self {
        let input = input.strip_prefix('?').unwrap_or(input);
        form_urlencoded::parse(input.as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    /// Add `value` to the list of values associated with `key`.
    pub fn append(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.0.entry(key.into()).or_default().push(value.into());
    }

    /// The values associated with `key`, if any.
    pub fn get(&self, key: &str) -> Option<&[String]> {
        self.0.get(key).map(Vec::as_slice)
    }

    /// The number of distinct keys.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}

impl Values for UrlValues {
    fn get(&self, key: &str) -> Option<&[String]> {
        UrlValues::get(self, key)
    }
}

impl<K, V> FromIterator<(K, V)> for UrlValues
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut values = Self::new();
        for (key, value) in iter {
            values.append(key, value);
        }
        values
    }
}

impl From<IndexMap<String, Vec<String>>> for UrlValues {
    fn from(map: IndexMap<String, Vec<String>>) -> Self {
        Self(map)
    }
}
