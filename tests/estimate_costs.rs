mod support;

use assert_matches::assert_matches;
use climate_query::{BYTES_PER_GIB, ClimateQueryError, build_batch, estimate_gigabytes};
use support::{
    MockQueryClient, POLLUTION_NEEDLE, PRECIPITATION_NEEDLE, TEMPERATURE_NEEDLE, table_with_rows,
};

#[tokio::test]
async fn estimate_sums_dry_run_bytes_in_gigabytes() {
    let client = MockQueryClient::new()
        .respond(TEMPERATURE_NEEDLE, 3 * (1 << 30), table_with_rows(0))
        .respond(POLLUTION_NEEDLE, 1 << 29, table_with_rows(0))
        .respond(PRECIPITATION_NEEDLE, 1 << 29, table_with_rows(0));

    let requests = build_batch("Colorado", 2012).unwrap();
    let gigabytes = estimate_gigabytes(&client, &requests).await.unwrap();

    assert!((gigabytes - 4.0).abs() < 1e-9);
    assert_eq!(client.dry_run_count(), 3);
    // A dry run never executes the costed query.
    assert_eq!(client.executed_count(), 0);
}

#[tokio::test]
async fn estimate_matches_manual_byte_sum() {
    let sizes: [u64; 3] = [123_456_789, 9_876_543_210, 42];
    let client = MockQueryClient::new()
        .respond(TEMPERATURE_NEEDLE, sizes[0], table_with_rows(0))
        .respond(POLLUTION_NEEDLE, sizes[1], table_with_rows(0))
        .respond(PRECIPITATION_NEEDLE, sizes[2], table_with_rows(0));

    let requests = build_batch("Vermont", 1995).unwrap();
    let gigabytes = estimate_gigabytes(&client, &requests).await.unwrap();

    let expected = sizes.iter().sum::<u64>() as f64 / BYTES_PER_GIB;
    assert!((gigabytes - expected).abs() < 1e-9);
}

#[tokio::test]
async fn one_failing_dry_run_fails_the_estimate_and_names_the_request() {
    let client = MockQueryClient::new()
        .respond(TEMPERATURE_NEEDLE, 1 << 30, table_with_rows(0))
        .respond(POLLUTION_NEEDLE, 1 << 30, table_with_rows(0))
        .fail(PRECIPITATION_NEEDLE, "backend unavailable");

    let requests = build_batch("Nevada", 2003).unwrap();
    let err = estimate_gigabytes(&client, &requests).await.unwrap_err();

    assert_matches!(
        err,
        ClimateQueryError::EstimationFailed { ref name, .. } if name == "precipitation"
    );
}

#[tokio::test]
async fn empty_request_list_costs_nothing() {
    let client = MockQueryClient::new();
    let gigabytes = estimate_gigabytes(&client, &[]).await.unwrap();
    assert_eq!(gigabytes, 0.0);
    assert_eq!(client.dry_run_count(), 0);
}
