//! Page Request Descriptor
//!
//! Builds the relative path and query string handed to the gate.

use std::fmt;

/// Sort order for a player's score listing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ScoreSort {
    /// Most recently set first
    #[default]
    Recent,

    /// Highest pp first
    Top,
}

impl ScoreSort {
    pub fn as_str(&self) -> &'static str {
        match self {
            ScoreSort::Recent => "recent",
            ScoreSort::Top => "top",
        }
    }
}

/// An endpoint path plus ordered query parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    path: String,
    query: Vec<(&'static str, String)>,
}

impl PageRequest {
    /// Start a request for a path relative to the API root
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: Vec::new(),
        }
    }

    /// Start a request from path segments, percent-encoding each one
    pub fn segments(segments: &[&str]) -> Self {
        let path = segments
            .iter()
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect::<Vec<_>>()
            .join("/");
        Self::new(path)
    }

    /// Append a query parameter
    pub fn param(mut self, key: &'static str, value: impl ToString) -> Self {
        self.query.push((key, value.to_string()));
        self
    }

    /// Append a query parameter when a value is present
    pub fn param_opt<V: ToString>(self, key: &'static str, value: Option<V>) -> Self {
        match value {
            Some(value) => self.param(key, value),
            None => self,
        }
    }

    /// Append the 1-indexed page number
    pub fn page(self, page: u64) -> Self {
        self.param("page", page)
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// Value of the first query parameter named `key`
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Path and query as sent to the service
    pub fn to_relative_path(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for PageRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)?;
        for (i, (key, value)) in self.query.iter().enumerate() {
            let sep = if i == 0 { '?' } else { '&' };
            write!(f, "{}{}={}", sep, key, urlencoding::encode(value))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_path() {
        assert_eq!(
            PageRequest::new("ranking/requests/top").to_relative_path(),
            "ranking/requests/top"
        );
    }

    #[test]
    fn test_query_order_is_preserved() {
        let request = PageRequest::new("player/1/scores")
            .param("limit", 100)
            .param("sort", ScoreSort::Recent.as_str())
            .page(3);
        assert_eq!(
            request.to_relative_path(),
            "player/1/scores?limit=100&sort=recent&page=3"
        );
        assert_eq!(request.query_value("page"), Some("3"));
    }

    #[test]
    fn test_optional_params() {
        let none: Option<&str> = None;
        let global = PageRequest::new("players").page(2).param_opt("countries", none);
        assert_eq!(global.to_relative_path(), "players?page=2");

        let country = PageRequest::new("players").page(2).param_opt("countries", Some("gb"));
        assert_eq!(country.to_relative_path(), "players?page=2&countries=gb");
    }

    #[test]
    fn test_star_bounds_format_like_numbers() {
        let request = PageRequest::new("leaderboards")
            .param("ranked", true)
            .param("minStar", 5.0)
            .param("maxStar", 7.25)
            .page(1);
        assert_eq!(
            request.to_relative_path(),
            "leaderboards?ranked=true&minStar=5&maxStar=7.25&page=1"
        );
    }

    #[test]
    fn test_values_and_segments_are_encoded() {
        let request = PageRequest::segments(&["player", "a b/c", "basic"]).param("countries", "gb,us");
        assert_eq!(request.path(), "player/a%20b%2Fc/basic");
        assert_eq!(
            request.to_relative_path(),
            "player/a%20b%2Fc/basic?countries=gb%2Cus"
        );
    }
}
