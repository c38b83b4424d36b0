//! Rides and the location/passenger/driver types other resources reuse.

use serde::{Deserialize, Serialize};

use crate::client::Executor;
use crate::context::Context;
use crate::decode::Json;
use crate::endpoint::{action, Endpoint};
use crate::envelope::BasicResponse;
use crate::error::Result;
use crate::filter::{query_values, FieldMap, Filter};
use crate::types::{DurationSec, HmsDuration};

pub(crate) const ENDPOINT: Endpoint = Endpoint::new("ride");

/// General listings (employees, cancellation reasons).
pub(crate) const INDEX_ENDPOINT: Endpoint = Endpoint::new("index");

pub const FIELDS: &FieldMap = &[("id", "rideId")];

pub const QR_CODE_FIELDS: &FieldMap = &[("employee", "EmployeeId")];

/// Values of [`RideInfo::status`].
pub mod status {
    pub const SEARCHING_FOR_DRIVER: &str = "searching-for-driver";
    pub const DRIVER_NOT_FOUND: &str = "driver-not-found";
    pub const CANCELLED: &str = "ride-cancelled";
    pub const DRIVER_FOUND: &str = "driver-found";
    pub const WAITING_FOR_DRIVER: &str = "waiting-for-driver";
    pub const IN_PROGRESS: &str = "on-ride";
    pub const PAID: &str = "ride-paid";
    pub const COMPLETED: &str = "ride-completed";
}

/// Values of [`RideInfo::cancelled_by`].
pub mod cancelled_by {
    pub const USER: &str = "1";
    pub const DRIVER: &str = "2";
    pub const SYSTEM: &str = "3";
}

/// A ride request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ride {
    pub employee_id: i64,
    pub taxi_type_id: i64,
    pub taxi_category_id: i64,
    pub latitude_origin: f64,
    pub longitude_origin: f64,
    pub latitude_destiny: f64,
    pub longitude_destiny: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub origin_reference: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passenger_phone_area_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passenger_phone_number: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Passenger {
    #[serde(rename = "employeeId", default)]
    pub id: i64,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub ddd: String,
    #[serde(default)]
    pub phone: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    #[serde(rename = "latitude", default)]
    pub lat: f64,
    #[serde(rename = "longitude", default)]
    pub lng: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Address {
    pub city: String,
    pub state: String,
    pub country: String,
    pub address: String,
    pub location: Location,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Vehicle {
    pub marker: String,
    pub model: String,
    pub plate: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Driver {
    pub name: String,
    pub ddd: String,
    pub phone: String,
    #[serde(rename = "Vehicle", alias = "vehicle")]
    pub vehicle: Vehicle,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TravelInfo {
    pub time: HmsDuration,
    pub time_sec: DurationSec,
    #[serde(rename = "distanceKm")]
    pub distance_km: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RideInfo {
    /// One of [`status`].
    pub status: String,
    pub driver_location: Location,
    pub to_origin: TravelInfo,
    pub to_destiny: TravelInfo,
    /// One of [`cancelled_by`].
    pub cancelled_by: String,
    pub cancelled_reason: String,
    pub ride_value: f64,
    /// Echo of [`Ride::external_id`].
    pub external_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RideResult {
    #[serde(flatten)]
    pub result: BasicResponse,
    #[serde(rename = "rideID", alias = "rideId", default)]
    pub id: i64,
    #[serde(default)]
    pub passenger: Passenger,
    #[serde(default)]
    pub origin: Address,
    #[serde(default)]
    pub destiny: Address,
    #[serde(default)]
    pub driver: Driver,
    #[serde(rename = "rideInfo", default)]
    pub info: RideInfo,
}

/// Generic id/description pair.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Base {
    pub id: i64,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancellationReasons {
    #[serde(default)]
    pub reasons: Vec<Base>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RideCancel {
    #[serde(rename = "rideId")]
    pub ride_id: i64,
    #[serde(rename = "reasonId")]
    pub reason_id: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RideRate {
    #[serde(rename = "rideId")]
    pub ride_id: i64,
    pub rating: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QrCodeResult {
    #[serde(flatten)]
    pub result: BasicResponse,
    /// Payload to render as a QR code for immediate boarding.
    #[serde(rename = "qrcode", default)]
    pub qr_code: String,
}

pub struct RideService<'a> {
    executor: &'a Executor,
}

impl<'a> RideService<'a> {
    pub(crate) fn new(executor: &'a Executor) -> Self {
        Self { executor }
    }

    pub fn read(&self, ctx: &Context, filter: Option<&Filter>) -> Result<RideResult> {
        let endpoint = ENDPOINT
            .action(action::STATUS)
            .query(&query_values(filter, FIELDS));
        self.executor.get(ctx, &endpoint, Json)
    }

    pub fn create(&self, ctx: &Context, ride: &Ride) -> Result<RideResult> {
        self.executor.post(ctx, &ENDPOINT, Some(ride), Json)
    }

    pub fn cancellation_reasons(&self, ctx: &Context) -> Result<CancellationReasons> {
        self.executor
            .get(ctx, &INDEX_ENDPOINT.action(action::CANCELLATION_REASON), Json)
    }

    pub fn cancel(&self, ctx: &Context, ride_id: i64, reason_id: i64) -> Result<BasicResponse> {
        let body = RideCancel { ride_id, reason_id };
        self.executor
            .post(ctx, &ENDPOINT.action(action::CANCEL), Some(&body), Json)
    }

    pub fn rate(&self, ctx: &Context, ride_id: i64, rating: i64) -> Result<BasicResponse> {
        let body = RideRate { ride_id, rating };
        self.executor
            .post(ctx, &ENDPOINT.action(action::RATE), Some(&body), Json)
    }

    pub fn qr_code(&self, ctx: &Context, filter: Option<&Filter>) -> Result<QrCodeResult> {
        let endpoint = ENDPOINT
            .action(action::QR_CODE)
            .query(&query_values(filter, QR_CODE_FIELDS));
        self.executor.get(ctx, &endpoint, Json)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[test]
    fn decodes_ride_result() {
        let raw = r#"{
            "success": true,
            "rideID": 42,
            "passenger": {"employeeId": 7, "name": "Ana"},
            "driver": {"name": "Jo", "Vehicle": {"plate": "ABC1234"}},
            "rideInfo": {
                "status": "on-ride",
                "toDestiny": {"time": "00:12:30", "timeSec": 750.9, "distanceKm": 4.2},
                "cancelledBy": "",
                "rideValue": 31.5
            }
        }"#;
        let res: RideResult = serde_json::from_str(raw).unwrap();
        assert!(res.result.success);
        assert_eq!(res.id, 42);
        assert_eq!(res.passenger.id, 7);
        assert_eq!(res.driver.vehicle.plate, "ABC1234");
        assert_eq!(res.info.status, status::IN_PROGRESS);
        assert_eq!(res.info.to_destiny.time.0, Duration::from_secs(750));
        assert_eq!(res.info.to_destiny.time_sec.0, Duration::from_secs(750));
        assert_eq!(res.info.to_origin, TravelInfo::default());
    }

    #[test]
    fn ride_request_omits_empty_optionals() {
        let ride = Ride {
            employee_id: 1,
            taxi_type_id: 2,
            taxi_category_id: 3,
            ..Ride::default()
        };
        let json = serde_json::to_value(&ride).unwrap();
        assert_eq!(json["employeeId"], 1);
        assert_eq!(json["latitudeOrigin"], 0.0);
        assert!(json.get("externalId").is_none());
    }

    #[test]
    fn cancel_body_shape() {
        let body = RideCancel {
            ride_id: 5,
            reason_id: 2,
        };
        assert_eq!(serde_json::to_string(&body).unwrap(), r#"{"rideId":5,"reasonId":2}"#);
    }
}
