use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::client::Executor;
use crate::context::Context;
use crate::decode::Json;
use crate::endpoint::Endpoint;
use crate::error::Result;
use crate::filter::{query_values, FieldMap, Filter};
use crate::types::DurationMin;

const ENDPOINT: Endpoint = Endpoint::new("estimate");

pub const FIELDS: &FieldMap = &[
    ("place_origin", "PlaceIdOrigin"),
    ("place_destiny", "PlaceIdDestiny"),
    ("lat_origin", "LatitudeOrigin"),
    ("lng_origin", "LongitudeOrigin"),
    ("lat_destiny", "LatitudeDestiny"),
    ("lng_destiny", "LongitudeDestiny"),
    ("employee", "EmployeeId"),
];

/// Fare and trip estimate for one sub category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Estimate {
    pub minimum: f64,
    pub maximum: f64,
    pub distance: f64,
    /// Travel time, sent in minutes.
    pub journey: DurationMin,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Icon {
    pub default: String,
    pub on_focus: String,
    pub pin: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SubCategory {
    pub id: i64,
    pub type_id: i64,
    pub default: bool,
    pub description: String,
    pub discount: f64,
    pub estimate: Estimate,
    pub observation: String,
    pub icon: Icon,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Category {
    pub id: i64,
    pub description: String,
    #[serde(rename = "subcategories")]
    pub sub_categories: Vec<SubCategory>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuoteResult {
    pub categories: Vec<Category>,
    #[serde(rename = "date")]
    pub estimated_at: Option<DateTime<FixedOffset>>,
}

pub struct QuoteService<'a> {
    executor: &'a Executor,
}

impl<'a> QuoteService<'a> {
    pub(crate) fn new(executor: &'a Executor) -> Self {
        Self { executor }
    }

    /// Quotes every available category between two points. The base
    /// endpoint is used directly, with no action segment.
    pub fn estimate(&self, ctx: &Context, filter: Option<&Filter>) -> Result<QuoteResult> {
        let endpoint = ENDPOINT.query(&query_values(filter, FIELDS));
        self.executor.get(ctx, &endpoint, Json)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn estimate_query_has_no_action() {
        let filter = Filter::new()
            .with("lat_origin", "-23.1")
            .with("employee", "4");
        let endpoint = ENDPOINT.query(&filter.values(FIELDS));
        assert_eq!(endpoint.render(), "api/estimate?EmployeeId=4&LatitudeOrigin=-23.1");
    }

    #[test]
    fn journey_is_minutes() {
        let raw = r#"{
            "categories": [{"id": 1, "description": "Taxi", "subcategories": [
                {"id": 3, "typeId": 1, "estimate": {"minimum": 10, "maximum": 14.5, "distance": 3.2, "journey": 12.7}}
            ]}],
            "date": "2019-08-23T19:00:13Z"
        }"#;
        let res: QuoteResult = serde_json::from_str(raw).unwrap();
        let estimate = res.categories[0].sub_categories[0].estimate;
        assert_eq!(estimate.journey.0, Duration::from_secs(12 * 60));
        assert_eq!(estimate.minimum, 10.0);
        assert!(res.estimated_at.is_some());
    }
}
