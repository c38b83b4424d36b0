use serde::{Deserialize, Serialize};

use crate::client::{Executor, NO_BODY};
use crate::context::Context;
use crate::decode::Json;
use crate::endpoint::{action, Endpoint};
use crate::envelope::BasicResponse;
use crate::error::Result;
use crate::types::HmsDuration;

use super::ride::Location;

const ENDPOINT: Endpoint = Endpoint::new("webhook");

/// A registered ride-event listener.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Webhook {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub endpoint: String,
    #[serde(default)]
    pub auth_key: String,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub active: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookResult {
    #[serde(flatten)]
    pub result: BasicResponse,
    #[serde(default)]
    pub listeners: Vec<Webhook>,
}

/// Payload posted to a webhook when a ride changes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WebhookRide {
    pub code: i64,
    pub ride_id: i64,
    pub company_id: i64,
    pub employee_id: i64,
    pub status: String,
    pub taxi_location: Location,
    pub origin_location: Location,
    pub destiny_location: Location,
    pub time_to_origin_sec: i64,
    pub time_to_origin: HmsDuration,
    /// The API spells this key `destanceToOriginKm`.
    #[serde(rename = "destanceToOriginKm", alias = "distanceToOriginKm")]
    pub distance_to_origin_km: f64,
    pub time_to_destiny_sec: i64,
    pub time_to_destiny: HmsDuration,
    pub ride_value: f64,
    pub external_id: String,
}

pub struct WebhookService<'a> {
    executor: &'a Executor,
}

impl<'a> WebhookService<'a> {
    pub(crate) fn new(executor: &'a Executor) -> Self {
        Self { executor }
    }

    pub fn read(&self, ctx: &Context) -> Result<WebhookResult> {
        self.executor.get(ctx, &ENDPOINT, Json)
    }

    pub fn create(&self, ctx: &Context, webhook: &Webhook) -> Result<BasicResponse> {
        self.executor.post(ctx, &ENDPOINT, Some(webhook), Json)
    }

    pub fn update(&self, ctx: &Context, webhook: &Webhook) -> Result<BasicResponse> {
        self.executor
            .post(ctx, &ENDPOINT.action(action::UPDATE), Some(webhook), Json)
    }

    pub fn activate(&self, ctx: &Context) -> Result<BasicResponse> {
        self.executor
            .post(ctx, &ENDPOINT.action(action::ACTIVATE), NO_BODY, Json)
    }

    pub fn deactivate(&self, ctx: &Context) -> Result<BasicResponse> {
        self.executor
            .post(ctx, &ENDPOINT.action(action::DEACTIVATE), NO_BODY, Json)
    }
}
