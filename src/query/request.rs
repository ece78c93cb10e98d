use crate::catalog::{self, RegionParam, Topic};
use crate::error::{ClimateQueryError, Result};

/// One executable query: a topic's template bound to a concrete region and
/// year. Created once per batch and immutable thereafter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryRequest {
    /// Logical name, unique within a batch. Equals the topic name.
    pub name: String,
    pub resolved_query: String,
    pub region_code: String,
    pub year: i32,
}

/// Bind one topic's template to a region and year.
///
/// The region is always given by display name; whether the template receives
/// the display name or the two-letter code is decided by the topic's
/// [`RegionParam`]. The year is deliberately not range-checked here: an
/// out-of-range year yields a query that returns no rows, not an error.
pub fn build_request(topic: Topic, region_display_name: &str, year: i32) -> Result<QueryRequest> {
    let region_code = catalog::code_for_name(region_display_name)
        .ok_or_else(|| ClimateQueryError::UnknownRegion(region_display_name.to_string()))?;

    let state_value = match topic.region_param() {
        RegionParam::Code => region_code.to_string(),
        RegionParam::DisplayName => region_display_name.to_string(),
    };

    let resolved_query = topic
        .template()
        .render(&[("state", state_value), ("year", year.to_string())])?;

    Ok(QueryRequest {
        name: topic.to_string(),
        resolved_query,
        region_code: region_code.to_string(),
        year,
    })
}

/// Build the full per-topic batch for one region/year selection.
pub fn build_batch(region_display_name: &str, year: i32) -> Result<Vec<QueryRequest>> {
    Topic::all()
        .map(|topic| build_request(topic, region_display_name, year))
        .collect()
}
