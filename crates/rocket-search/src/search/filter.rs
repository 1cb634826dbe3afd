use rocket_search_data::{Row, RowQuery, RowSource, TextFilter};
use tracing::{debug, instrument};

use super::{Result, SearchResult, adapter::EntityAdapter, request::SearchRequest};
use crate::geo::{GeoPoint, great_circle_miles};

/// A row that passed text and exclusion filtering, with its distance from
/// the reference point when there is one.
#[derive(Debug, Clone, PartialEq)]
pub struct Candidate {
    pub row: Row,
    pub distance: Option<f64>,
}

impl Candidate {
    pub fn annotate(row: Row, reference: Option<&GeoPoint>) -> Self {
        let distance = reference.map(|reference| {
            great_circle_miles(
                reference,
                &GeoPoint::new_unchecked(row.latitude, row.longitude),
            )
        });
        Self { row, distance }
    }

    pub fn location(&self) -> GeoPoint {
        GeoPoint::new_unchecked(self.row.latitude, self.row.longitude)
    }

    pub fn into_result(self, adapter: &EntityAdapter) -> SearchResult {
        SearchResult {
            display_name: adapter.display.render(&self.row),
            id: self.row.id,
            distance: self.distance,
        }
    }
}

/// Reads the rows of `adapter.table` matching the request and annotates
/// each with its distance from the reference point.
///
/// Rows come back in storage order. Storage failures are returned as
/// errors, never as an empty candidate list.
#[instrument(
    name = "Select candidates",
    level = "debug",
    skip_all,
    fields(table = adapter.table, query = %request.query_text, excluded = request.exclude_ids.len())
)]
pub fn select_candidates<S>(
    store: &S,
    adapter: &EntityAdapter,
    request: &SearchRequest,
    case_sensitive: bool,
) -> Result<Vec<Candidate>>
where
    S: RowSource + ?Sized,
{
    let text = TextFilter::new(&request.query_text, adapter.text_fields).case_sensitive(case_sensitive);
    let query = RowQuery::new(adapter.table, text, &request.exclude_ids);
    let rows = store.query_rows(&query)?;
    let fetched = rows.len();

    // Exclusion holds even against a store that ignores it.
    let candidates: Vec<Candidate> = rows
        .into_iter()
        .filter(|row| !query.is_excluded(row))
        .map(|row| Candidate::annotate(row, request.reference_point.as_ref()))
        .collect();

    debug!(fetched, candidates = candidates.len(), "Candidates selected");
    Ok(candidates)
}

#[cfg(test)]
mod tests {
    use rocket_search_data::{DataError, MemoryStore, TextField};

    use super::*;
    use crate::search::{CITY, SearchError};

    fn store() -> MemoryStore {
        MemoryStore::new().with_table(
            "cities",
            vec![
                Row::new("slc", "Salt Lake City", 40.7765868, -111.9905245)
                    .with_country("United States"),
                Row::new("london", "London", 51.5282914, -0.3886621).with_country("United Kingdom"),
            ],
        )
    }

    /// Ignores the query entirely and returns every row it has.
    struct CarelessStore(Vec<Row>);

    impl RowSource for CarelessStore {
        fn query_rows(&self, _query: &RowQuery<'_>) -> rocket_search_data::Result<Vec<Row>> {
            Ok(self.0.clone())
        }
    }

    struct DownStore;

    impl RowSource for DownStore {
        fn query_rows(&self, _query: &RowQuery<'_>) -> rocket_search_data::Result<Vec<Row>> {
            Err(DataError::Unavailable("connection refused".into()))
        }
    }

    #[test]
    fn test_no_reference_point_means_no_distance() {
        let request = SearchRequest::new("L", 10);
        let candidates = select_candidates(&store(), &CITY, &request, false).unwrap();
        assert_eq!(candidates.len(), 2);
        assert!(candidates.iter().all(|c| c.distance.is_none()));
    }

    #[test]
    fn test_reference_point_annotates_distance() {
        let request =
            SearchRequest::new("", 10).near(GeoPoint::new_unchecked(40.7765868, -111.9905245));
        let candidates = select_candidates(&store(), &CITY, &request, false).unwrap();
        assert_eq!(candidates[0].distance, Some(0.0));
        assert!(candidates[1].distance.unwrap() > 4000.0);
        assert_eq!(candidates[0].location(), GeoPoint::new_unchecked(40.7765868, -111.9905245));
    }

    #[test]
    fn test_exclusion_is_enforced_on_store_output() {
        let careless = CarelessStore(store().table("cities").unwrap().to_vec());
        let request = SearchRequest::new("", 10).exclude("london");
        let candidates = select_candidates(&careless, &CITY, &request, false).unwrap();
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0].row.id, "slc");
    }

    #[test]
    fn test_storage_failure_propagates() {
        let request = SearchRequest::new("", 10);
        let err = select_candidates(&DownStore, &CITY, &request, false).unwrap_err();
        assert!(matches!(
            err,
            SearchError::Storage(DataError::Unavailable(_))
        ));
    }

    #[test]
    fn test_into_result_uses_adapter_display() {
        let row = Row::new("london", "London", 51.5282914, -0.3886621).with_country("United Kingdom");
        let result = Candidate::annotate(row, None).into_result(&CITY);
        assert_eq!(result.display_name, "London, United Kingdom");
        assert_eq!(result.id, "london");
        assert_eq!(result.distance, None);
        assert_eq!(CITY.text_fields[0], TextField::Name);
    }
}
