//! Page-load context

use url::Url;

/// What the page was loaded with.
///
/// Only the query string matters: the login form redirects back with
/// `error=1` after a failed attempt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageContext {
    query: Vec<(String, String)>,
}

impl PageContext {
    /// A page loaded without query parameters
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a raw query string, with or without the leading `?`.
    pub fn from_query(query: &str) -> Self {
        let query = query.strip_prefix('?').unwrap_or(query);
        Self {
            query: url::form_urlencoded::parse(query.as_bytes())
                .into_owned()
                .collect(),
        }
    }

    /// Take the query string of a full page URL.
    pub fn from_url(url: &Url) -> Self {
        Self {
            query: url.query_pairs().into_owned().collect(),
        }
    }

    /// First value of a query parameter
    pub fn param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    /// True when the login form redirected here after bad credentials.
    pub fn login_failed(&self) -> bool {
        self.param("error") == Some("1")
    }
}
