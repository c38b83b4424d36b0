use serde::{Deserialize, Serialize};

use crate::client::Executor;
use crate::context::Context;
use crate::decode::Json;
use crate::endpoint::{action, Endpoint};
use crate::envelope::BasicResponse;
use crate::error::Result;
use crate::filter::{query_values, FieldMap, Filter};

use super::ride::Location;

const ENDPOINT: Endpoint = Endpoint::new("driver");

pub const FIELDS: &FieldMap = &[
    ("lat", "Latitude"),
    ("lng", "Longitude"),
    ("type", "TypeIds"),
    ("employee", "EmployeeId"),
];

/// Position of an available driver.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct DriverLocation {
    #[serde(flatten)]
    pub location: Location,
    #[serde(default)]
    pub bearing: f64,
    #[serde(rename = "typeId", default)]
    pub type_id: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DriverResult {
    #[serde(flatten)]
    pub result: BasicResponse,
    #[serde(default)]
    pub drivers: Vec<DriverLocation>,
}

pub struct DriverService<'a> {
    executor: &'a Executor,
}

impl<'a> DriverService<'a> {
    pub(crate) fn new(executor: &'a Executor) -> Self {
        Self { executor }
    }

    /// Drivers close to `lat`/`lng`. `type` may be given several times.
    pub fn nearby(&self, ctx: &Context, filter: Option<&Filter>) -> Result<DriverResult> {
        let endpoint = ENDPOINT
            .action(action::NEARBY)
            .query(&query_values(filter, FIELDS));
        self.executor.get(ctx, &endpoint, Json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repeated_types_are_all_sent() {
        let mut filter = Filter::new().with("lat", "-23.5").with("lng", "-46.6");
        filter.insert("type", "1");
        filter.insert("type", "2");
        let endpoint = ENDPOINT.action(action::NEARBY).query(&filter.values(FIELDS));
        assert_eq!(
            endpoint.render(),
            "api/driver/nearby?Latitude=-23.5&Longitude=-46.6&TypeIds=1&TypeIds=2"
        );
    }

    #[test]
    fn decodes_flattened_location() {
        let raw = r#"{"success":true,"drivers":[{"latitude":-23.1,"longitude":-46.2,"bearing":90,"typeId":1}]}"#;
        let res: DriverResult = serde_json::from_str(raw).unwrap();
        assert!(res.result.success);
        assert_eq!(res.drivers[0].location.lat, -23.1);
        assert_eq!(res.drivers[0].type_id, 1);
    }
}
