use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};

use crate::client::Executor;
use crate::context::Context;
use crate::decode::Json;
use crate::endpoint::{action, Endpoint};
use crate::envelope::BasicResponse;
use crate::error::Result;
use crate::filter::{query_values, FieldMap, Filter, QueryValues};

use super::ride::{Address, Base, Driver, Passenger, INDEX_ENDPOINT};

const ENDPOINT: Endpoint = Endpoint::new("employee");

pub const LAST_RIDES_FIELDS: &FieldMap = &[
    ("ride", "RideId"),
    ("employee", "EmployeeId"),
    ("started_at", "InitialDate"),
    ("ended_at", "FinalDate"),
    ("external_id", "ExternalID"),
];

pub const FIELDS: &FieldMap = &[("id", "EmployeeID"), ("name", "Name"), ("email", "Email")];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Employee {
    #[serde(rename = "employeeId")]
    pub id: i64,
    pub email: String,
    pub ddd: String,
    pub phone: String,
    pub registration: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeResult {
    #[serde(default)]
    pub employees: Vec<Employee>,
}

/// Whether an employee is currently on a ride.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmployeeStatus {
    #[serde(rename = "rideId")]
    pub ride_id: i64,
    pub status: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoricalCategory {
    #[serde(flatten)]
    pub base: Base,
    #[serde(rename = "type")]
    pub kind: Base,
    #[serde(rename = "subcategory")]
    pub sub_category: Base,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoricalDriver {
    #[serde(flatten)]
    pub driver: Driver,
    pub category: HistoricalCategory,
    pub photo: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct HistoricalRideInfo {
    pub status: String,
    #[serde(rename = "rideDate")]
    pub started_at: Option<DateTime<FixedOffset>>,
    #[serde(rename = "finishDate")]
    pub ended_at: Option<DateTime<FixedOffset>>,
    #[serde(rename = "paymentDate")]
    pub paid_at: Option<DateTime<FixedOffset>>,
    #[serde(rename = "rideMapURL")]
    pub map_url: String,
    pub cancelled_by: String,
    pub cancelled_reason: String,
    #[serde(rename = "rideValue")]
    pub value: f64,
    #[serde(rename = "rideOriginalValue")]
    pub original_value: f64,
    #[serde(rename = "rideDiscount")]
    pub discount: f64,
    pub external_id: i64,
    pub duration_in_seconds: i64,
    pub distance: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RideHistory {
    #[serde(rename = "rideId")]
    pub id: i64,
    #[serde(rename = "companyId")]
    pub company_id: i64,
    pub passenger: Passenger,
    pub origin: Address,
    pub destiny: Address,
    pub driver: HistoricalDriver,
    #[serde(rename = "rideInfo")]
    pub info: HistoricalRideInfo,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmployeeLastRides {
    #[serde(flatten)]
    pub result: BasicResponse,
    #[serde(default)]
    pub history: Vec<RideHistory>,
}

pub struct EmployeeService<'a> {
    executor: &'a Executor,
}

impl<'a> EmployeeService<'a> {
    pub(crate) fn new(executor: &'a Executor) -> Self {
        Self { executor }
    }

    pub fn status(&self, ctx: &Context, id: i64) -> Result<EmployeeStatus> {
        let mut query = QueryValues::new();
        query.set("employeeId", id.to_string());
        self.executor
            .get(ctx, &ENDPOINT.action(action::STATUS).query(&query), Json)
    }

    pub fn last_rides(&self, ctx: &Context, filter: Option<&Filter>) -> Result<EmployeeLastRides> {
        let endpoint = ENDPOINT
            .action(action::LAST_RIDES)
            .query(&query_values(filter, LAST_RIDES_FIELDS));
        self.executor.get(ctx, &endpoint, Json)
    }

    /// Lists employees through the general index.
    pub fn read(&self, ctx: &Context, filter: Option<&Filter>) -> Result<EmployeeResult> {
        let endpoint = INDEX_ENDPOINT
            .action(action::EMPLOYEE)
            .query(&query_values(filter, FIELDS));
        self.executor.get(ctx, &endpoint, Json)
    }
}
