use ahash::AHashSet;

use crate::geo::GeoPoint;

/// Input of one proximity search.
///
/// ```rust
/// use rocket_search::{GeoPoint, SearchRequest};
///
/// let request = SearchRequest::new("L", 5)
///     .near(GeoPoint::new(39.7765868, -110.9905245)?)
///     .exclude("london");
/// assert_eq!(request.limit, 5);
/// # Ok::<(), rocket_search::geo::CoordinateError>(())
/// ```
#[derive(Debug, Clone)]
pub struct SearchRequest {
    /// Point distances are measured from; `None` for a text-only search
    pub reference_point: Option<GeoPoint>,
    /// Substring to look for; empty matches everything
    pub query_text: String,
    /// Ids that must never appear in the results
    pub exclude_ids: AHashSet<String>,
    /// Maximum number of results, at least 1
    pub limit: usize,
}

impl SearchRequest {
    pub fn new(query_text: impl Into<String>, limit: usize) -> Self {
        Self {
            reference_point: None,
            query_text: query_text.into(),
            exclude_ids: AHashSet::new(),
            limit,
        }
    }

    pub fn near(mut self, point: GeoPoint) -> Self {
        self.reference_point = Some(point);
        self
    }

    pub fn exclude(mut self, id: impl Into<String>) -> Self {
        self.exclude_ids.insert(id.into());
        self
    }

    pub fn exclude_all<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude_ids.extend(ids.into_iter().map(Into::into));
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }
}

/// One ranked hit, the same shape for every entity type.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchResult {
    pub id: String,
    pub display_name: String,
    /// Miles from the reference point, `None` when the request had none
    pub distance: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_accumulates_exclusions() {
        let request = SearchRequest::new("port", 3)
            .exclude("a")
            .exclude_all(["b", "c"])
            .exclude("a");
        assert_eq!(request.exclude_ids.len(), 3);
        assert!(request.reference_point.is_none());
        assert_eq!(request.with_limit(7).limit, 7);
    }
}
