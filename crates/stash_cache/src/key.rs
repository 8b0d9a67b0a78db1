use std::fmt;

/// Literal request path + query string.
///
/// No normalization is applied: `/a?x=1&y=2` and `/a?y=2&x=1` are different
/// keys, and so are `/A` and `/a`.
#[derive(Clone, Hash, Eq, PartialEq, Debug)]
pub struct CacheKey {
    uri: String,
}

impl CacheKey {
    pub fn new(path_and_query: &str) -> Self {
        Self {
            uri: path_and_query.to_string(),
        }
    }

    /// Builds the key from a request path and its (optional) query.
    /// An empty query (`/a?`) is dropped, so `/a?` and `/a` share a key.
    pub fn from_parts(path: &str, query: Option<&str>) -> Self {
        match query {
            Some(q) if !q.is_empty() => Self {
                uri: format!("{path}?{q}"),
            },
            _ => Self::new(path),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.uri
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.uri)
    }
}

#[cfg(test)]
mod tests {
    use super::CacheKey;

    #[test]
    fn from_parts_appends_query() {
        let key = CacheKey::from_parts("/greet", Some("x=1"));
        assert_eq!(key.as_str(), "/greet?x=1");
    }

    #[test]
    fn from_parts_drops_empty_query() {
        assert_eq!(CacheKey::from_parts("/greet", Some("")), CacheKey::new("/greet"));
        assert_eq!(CacheKey::from_parts("/greet", None), CacheKey::new("/greet"));
    }

    #[test]
    fn keys_are_not_normalized() {
        assert_ne!(CacheKey::new("/a?x=1&y=2"), CacheKey::new("/a?y=2&x=1"));
        assert_ne!(CacheKey::new("/Greet"), CacheKey::new("/greet"));
    }
}
