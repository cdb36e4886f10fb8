//! Path templates and parameter substitution.
//!
//! A path template is a relative URL path with `{name}` placeholders, such as
//! `/widgets/{id}/parts/{part}`. Values substituted into a template are
//! percent-encoded so that every byte outside the RFC 3986 unreserved set
//! (`A-Z a-z 0-9 - . _ ~`) is escaped; a value can never introduce a `/`, `?`
//! or `#` into the resulting path.

use std::borrow::Cow;
use std::fmt;

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

/// Characters left as-is: RFC 3986 unreserved, nothing else.
const PATH_VALUE_ENCODE_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Ordered set of path parameters.
///
/// Iteration follows insertion order. Inserting a key that is already
/// present replaces its value without moving it.
///
/// ## Examples
///
/// ```rust
/// use fabraic::PathParams;
///
/// let params = PathParams::new().with("org", "acme").with("id", 42);
/// assert_eq!(params.get("id"), Some("42"));
///
/// let params: PathParams = [("id", "a b")].into_iter().collect();
/// assert_eq!(params.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathParams(Vec<(String, String)>);

impl PathParams {
    /// Creates an empty parameter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets `key` to the string form of `value`.
    pub fn insert(&mut self, key: impl Into<String>, value: impl fmt::Display) {
        let key = key.into();
        let value = value.to_string();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.0.push((key, value)),
        }
    }

    /// Builder-style [`insert`](Self::insert).
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl fmt::Display) -> Self {
        self.insert(key, value);
        self
    }

    /// Returns the value for `key`, if set.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Iterates over `(key, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: fmt::Display> FromIterator<(K, V)> for PathParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Self::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}

impl<K: Into<String>, V: fmt::Display, const N: usize> From<[(K, V); N]> for PathParams {
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

/// Prefixes `path` with `/` unless it already starts with one.
pub fn ensure_leading_slash(path: &str) -> Cow<'_, str> {
    if path.starts_with('/') {
        Cow::Borrowed(path)
    } else {
        Cow::Owned(format!("/{path}"))
    }
}

/// Percent-encodes a value for use inside a single path segment.
///
/// ```rust
/// use fabraic::path::encode_path_value;
///
/// assert_eq!(encode_path_value("a b"), "a%20b");
/// assert_eq!(encode_path_value("x/y?z"), "x%2Fy%3Fz");
/// assert_eq!(encode_path_value("v1.2-rc_3~"), "v1.2-rc_3~");
/// ```
pub fn encode_path_value(value: &str) -> String {
    utf8_percent_encode(value, PATH_VALUE_ENCODE_SET).to_string()
}

/// Replaces every `{key}` in `template` with the encoded value of `key`.
///
/// Keys with no matching placeholder are ignored. Placeholders with no
/// matching key are left untouched.
pub fn substitute_params(template: &str, params: &PathParams) -> String {
    let mut path = template.to_string();
    for (key, value) in params.iter() {
        path = path.replace(&format!("{{{key}}}"), &encode_path_value(value));
    }
    path
}

/// Extracts placeholder names from a template, in order of appearance.
///
/// A name appears once per occurrence. Unterminated or empty braces are not
/// placeholders.
pub fn placeholders(template: &str) -> Vec<&str> {
    let mut names = Vec::new();
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        let after = &rest[open + 1..];
        let Some(close) = after.find('}') else {
            break;
        };
        let name = &after[..close];
        // `{a{b}` is treated as the placeholder `b`
        match name.rfind('{') {
            Some(inner) => {
                rest = &after[inner..];
                continue;
            }
            None if !name.is_empty() => names.push(name),
            None => {}
        }
        rest = &after[close + 1..];
    }

    names
}
