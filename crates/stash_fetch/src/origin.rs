use std::fmt;

use http::Uri;
use stash_cache::CacheKey;

use crate::FetchError;

/// Base URL of the upstream server. Always absolute http(s), never ends in `/`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Origin {
    base: String,
}

impl Origin {
    pub fn parse(raw: &str) -> Result<Self, FetchError> {
        let trimmed = raw.trim();
        let uri: Uri = trimmed
            .parse()
            .map_err(|e| FetchError::InvalidUrl(format!("{trimmed}: {e}")))?;

        match uri.scheme_str() {
            Some("http") | Some("https") => {}
            _ => {
                return Err(FetchError::InvalidUrl(format!(
                    "{trimmed}: expected an absolute http or https URL"
                )));
            }
        }
        if uri.authority().is_none() {
            return Err(FetchError::InvalidUrl(format!("{trimmed}: missing host")));
        }

        Ok(Self {
            base: trimmed.trim_end_matches('/').to_string(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.base
    }

    /// `origin + key`, the URL fetched on a cache miss.
    pub fn join(&self, key: &CacheKey) -> Result<Uri, FetchError> {
        let joined = format!("{}{}", self.base, key.as_str());
        joined
            .parse()
            .map_err(|e| FetchError::InvalidUrl(format!("{joined}: {e}")))
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.base)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_appends_path_and_query() {
        let origin = Origin::parse("http://localhost:4000").expect("valid origin");
        let uri = origin.join(&CacheKey::new("/greet?x=1")).expect("valid uri");
        assert_eq!(uri.to_string(), "http://localhost:4000/greet?x=1");
    }

    #[test]
    fn trailing_slash_is_trimmed() {
        let origin = Origin::parse("https://dummyjson.com/").expect("valid origin");
        assert_eq!(origin.as_str(), "https://dummyjson.com");
        let uri = origin.join(&CacheKey::new("/products")).expect("valid uri");
        assert_eq!(uri.to_string(), "https://dummyjson.com/products");
    }

    #[test]
    fn base_path_is_kept() {
        let origin = Origin::parse("http://example.com/api").expect("valid origin");
        let uri = origin.join(&CacheKey::new("/users")).expect("valid uri");
        assert_eq!(uri.path(), "/api/users");
    }

    #[test]
    fn rejects_relative_and_non_http() {
        assert!(Origin::parse("/relative").is_err());
        assert!(Origin::parse("ftp://example.com").is_err());
        assert!(Origin::parse("").is_err());
    }
}
