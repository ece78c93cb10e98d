//! Static query catalog: topics, SQL templates, the US region table and the
//! supported year range. Pure data, no behavior beyond lookups.

mod regions;
mod templates;

pub use regions::{ALL_REGIONS, code_for_name, name_for_code, region_names};
pub use templates::{POLLUTION, PRECIPITATION, TEMPERATURE};

use crate::query::QueryTemplate;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// Years the public datasets cover for all three topics at once.
pub const YEARS: RangeInclusive<i32> = 1990..=2018;

/// Which form of the region a topic's template expects.
///
/// The EPA air-quality tables filter on the state's display name while the
/// NOAA and GHCN tables filter on the two-letter code. This difference is
/// catalog data, authoritative per topic; do not unify it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegionParam {
    /// Two-letter code, e.g. `CA`.
    Code,
    /// Full display name, e.g. `California`.
    DisplayName,
}

/// The three analytical subjects the dashboard charts.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Topic {
    Temperature,
    Pollution,
    Precipitation,
}

impl Topic {
    /// Every topic, in the order the dashboard renders them.
    pub fn all() -> impl Iterator<Item = Topic> {
        Topic::iter()
    }

    pub fn template(self) -> &'static QueryTemplate {
        match self {
            Topic::Temperature => &TEMPERATURE,
            Topic::Pollution => &POLLUTION,
            Topic::Precipitation => &PRECIPITATION,
        }
    }

    pub fn region_param(self) -> RegionParam {
        match self {
            Topic::Pollution => RegionParam::DisplayName,
            Topic::Temperature | Topic::Precipitation => RegionParam::Code,
        }
    }
}
