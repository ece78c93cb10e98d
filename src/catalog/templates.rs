//! The three standard-SQL query templates, one per topic, over the BigQuery
//! public datasets. All are parametrized by `{state}` and `{year}`.
//!
//! Quoting is the template author's responsibility: `{state}` lands inside
//! single quotes where the schema stores text, and `{year}` is substituted
//! both into predicates and into year-sharded table names (`gsod{year}`,
//! `ghcnd_{year}`).

use crate::query::QueryTemplate;

const PLACEHOLDERS: &[&str] = &["state", "year"];

/// Monthly EPA air-quality averages (PM10, PM2.5, CO, SO2, lead). Filters on
/// the state's display name.
pub static POLLUTION: QueryTemplate = QueryTemplate::new(
    r#"
    SELECT
      pm10.year as year,
      pm10.month AS month,
      pm10.avg AS pm10,
      pm25_frm.avg AS pm25_frm,
      pm25_nonfrm.avg AS pm25_nonfrm,
      co.avg as co,
      so2.avg as so2,
      lead.avg AS lead
    FROM
      ( SELECT avg(arithmetic_mean) as avg, EXTRACT(MONTH FROM date_local) as month, EXTRACT(YEAR FROM date_local) as year
        FROM `bigquery-public-data.epa_historical_air_quality.pm10_daily_summary`
        WHERE state_name = '{state}' and EXTRACT(YEAR FROM date_local) = {year}
        GROUP BY year, month
      ) AS pm10
    JOIN
      ( SELECT avg(arithmetic_mean) as avg, EXTRACT(MONTH FROM date_local) as month, EXTRACT(YEAR FROM date_local) as year
        FROM `bigquery-public-data.epa_historical_air_quality.pm25_frm_daily_summary`
        WHERE state_name = '{state}' and EXTRACT(YEAR FROM date_local) = {year}
        GROUP BY year, month
      ) AS pm25_frm ON pm10.year = pm25_frm.year AND pm10.month = pm25_frm.month
    JOIN
      ( SELECT avg(arithmetic_mean) as avg, EXTRACT(MONTH FROM date_local) as month, EXTRACT(YEAR FROM date_local) as year
        FROM `bigquery-public-data.epa_historical_air_quality.pm25_nonfrm_daily_summary`
        WHERE state_name = '{state}' and EXTRACT(YEAR FROM date_local) = {year}
        GROUP BY year, month
      ) AS pm25_nonfrm ON pm10.year = pm25_nonfrm.year AND pm10.month = pm25_nonfrm.month
    JOIN
      ( SELECT avg(arithmetic_mean) * 100 as avg, EXTRACT(MONTH FROM date_local) as month, EXTRACT(YEAR FROM date_local) as year
        FROM `bigquery-public-data.epa_historical_air_quality.lead_daily_summary`
        WHERE state_name = '{state}' and EXTRACT(YEAR FROM date_local) = {year}
        GROUP BY year, month
      ) AS lead ON pm10.year = lead.year AND pm10.month = lead.month
    JOIN
      ( SELECT avg(arithmetic_mean) as avg, EXTRACT(MONTH FROM date_local) as month, EXTRACT(YEAR FROM date_local) as year
        FROM `bigquery-public-data.epa_historical_air_quality.voc_daily_summary`
        WHERE state_name = '{state}' and EXTRACT(YEAR FROM date_local) = {year}
        GROUP BY year, month
      ) AS co ON pm10.year = co.year AND pm10.month = co.month
    JOIN
      ( SELECT avg(arithmetic_mean) * 10 as avg, EXTRACT(MONTH FROM date_local) as month, EXTRACT(YEAR FROM date_local) as year
        FROM `bigquery-public-data.epa_historical_air_quality.so2_daily_summary`
        WHERE state_name = '{state}' and EXTRACT(YEAR FROM date_local) = {year}
        GROUP BY year, month
      ) AS so2 ON pm10.year = so2.year AND pm10.month = so2.month
    ORDER BY
      month
"#,
    PLACEHOLDERS,
);

/// Daily min/max/avg temperatures from the NOAA GSOD year-sharded tables.
/// Filters on the two-letter state code.
pub static TEMPERATURE: QueryTemplate = QueryTemplate::new(
    r#"
    SELECT
      year,
      mo as month,
      da as day,
      MAX(max) as max_temp,
      MIN(min) as min_temp,
      AVG(temp) as avg_temp,
      state
    FROM
      `bigquery-public-data.noaa_gsod.gsod{year}` a
    JOIN
      `bigquery-public-data.noaa_gsod.stations` b
    ON
      a.stn=b.usaf
      AND a.wban=b.wban
    WHERE
      state IS NOT NULL
      AND max < 1000
      AND country = 'US'
      AND state = '{state}'
    GROUP BY
      year, month, day, state
    ORDER BY
      year, month, day, state
"#,
    PLACEHOLDERS,
);

/// Daily average precipitation from the GHCN-D year-sharded tables. Filters
/// on the two-letter state code.
pub static PRECIPITATION: QueryTemplate = QueryTemplate::new(
    r#"
    SELECT
      EXTRACT(YEAR FROM date) as year,
      EXTRACT(MONTH FROM date) as month,
      EXTRACT(DAY FROM date) as day,
      AVG(prcp) AS prcp
    FROM (
      SELECT
        date AS date,
        IF (element = 'PRCP', value/10, NULL) AS prcp
      FROM
        `bigquery-public-data.ghcn_d.ghcnd_{year}` AS weather
      JOIN
        `bigquery-public-data.ghcn_d.ghcnd_stations` as stations
      ON
        weather.id = stations.id
      WHERE
        stations.state = '{state}'
    )
    GROUP BY
      year, month, day
    ORDER BY
      year, month, day
"#,
    PLACEHOLDERS,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_template_declares_exactly_state_and_year() {
        for template in [&POLLUTION, &TEMPERATURE, &PRECIPITATION] {
            assert_eq!(template.placeholders(), PLACEHOLDERS);
            assert!(template.text().contains("{state}"));
            assert!(template.text().contains("{year}"));
        }
    }

    #[test]
    fn sharded_tables_take_the_year_in_their_name() {
        assert!(TEMPERATURE.text().contains("noaa_gsod.gsod{year}"));
        assert!(PRECIPITATION.text().contains("ghcn_d.ghcnd_{year}"));
    }
}
