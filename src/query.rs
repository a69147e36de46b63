//! Minimal URL handling: a path plus its ordered query parameters.

use std::fmt::{Display, Formatter};

/// Ordered query parameters; keys may repeat, lookups use the first match.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryParams(Vec<(String, String)>);

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decodes an `application/x-www-form-urlencoded` query string.
    /// Undecodable input yields no parameters.
    pub fn parse(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        match serde_html_form::from_str::<Vec<(String, String)>>(query) {
            Ok(pairs) => Self(pairs),
            Err(err) => {
                log::warn!("Ignoring malformed query string {query:?}: {err}");
                Self::default()
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// Replaces every value of `name` with a single `value`, keeping the
    /// position of the first occurrence.
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.0.iter().position(|(key, _)| key == name) {
            Some(index) => {
                self.0[index].1 = value;
                let mut seen = false;
                self.0.retain(|(key, _)| {
                    if key != name {
                        return true;
                    }
                    let keep = !seen;
                    seen = true;
                    keep
                });
            }
            None => self.0.push((name.to_string(), value)),
        }
    }

    pub fn remove(&mut self, name: &str) {
        self.0.retain(|(key, _)| key != name);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Encodes the parameters as a query string without the leading `?`.
    pub fn encode(&self) -> String {
        serde_html_form::to_string(&self.0).unwrap_or_else(|err| {
            log::warn!("Failed to encode query parameters: {err}");
            String::new()
        })
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for QueryParams {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

/// Path and query of a page URL, e.g. `/artists?page=2&search=nina`.
///
/// Absolute URLs are accepted; scheme, host and fragment are dropped.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PageUrl {
    path: String,
    query: QueryParams,
}

impl PageUrl {
    pub fn new(path: impl Into<String>, query: QueryParams) -> Self {
        Self {
            path: path.into(),
            query,
        }
    }

    pub fn parse(raw: &str) -> Self {
        let without_fragment = raw.split('#').next().unwrap_or_default();
        let relative = match without_fragment.find("://") {
            Some(scheme_end) => {
                let after_scheme = &without_fragment[scheme_end + 3..];
                after_scheme
                    .find(['/', '?'])
                    .map(|index| &after_scheme[index..])
                    .unwrap_or("")
            }
            None => without_fragment,
        };

        let (path, query) = match relative.split_once('?') {
            Some((path, query)) => (path, QueryParams::parse(query)),
            None => (relative, QueryParams::new()),
        };
        let path = if path.is_empty() { "/" } else { path };

        Self::new(path, query)
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn query(&self) -> &QueryParams {
        &self.query
    }

    /// First value of the query parameter `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.query.get(name)
    }
}

impl Display for PageUrl {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.query.is_empty() {
            write!(f, "{}", self.path)
        } else {
            write!(f, "{}?{}", self.path, self.query.encode())
        }
    }
}
