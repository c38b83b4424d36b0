use serde::{Deserialize, Serialize};

use crate::client::Executor;
use crate::context::Context;
use crate::decode::Json;
use crate::endpoint::{action, Endpoint};
use crate::envelope::DefaultResponse;
use crate::error::Result;
use crate::filter::QueryValues;
use crate::types::loose_text;

const ENDPOINT: Endpoint = Endpoint::new("cargo");

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    #[serde(rename = "IdCargo", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Sent as text or number depending on the API version.
    #[serde(
        rename = "Descricao",
        default,
        deserialize_with = "loose_text",
        skip_serializing_if = "String::is_empty"
    )]
    pub description: String,
    #[serde(rename = "Filtro", default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleResponse {
    #[serde(flatten)]
    pub envelope: DefaultResponse,
    #[serde(rename = "Response", default)]
    pub roles: Vec<Role>,
}

pub struct RoleService<'a> {
    executor: &'a Executor,
}

impl<'a> RoleService<'a> {
    pub(crate) fn new(executor: &'a Executor) -> Self {
        Self { executor }
    }

    pub fn read(&self, ctx: &Context, id: &str, description: &str) -> Result<RoleResponse> {
        let mut query = QueryValues::new();
        query.set("idCargo", id);
        query.set("descricao", description);
        self.executor
            .get(ctx, &ENDPOINT.action(action::READ).query(&query), Json)
    }

    pub fn create(&self, ctx: &Context, role: &Role) -> Result<DefaultResponse> {
        self.executor
            .post(ctx, &ENDPOINT.action(action::CREATE), Some(role), Json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn description_accepts_numbers() {
        let role: Role = serde_json::from_str(r#"{"IdCargo":1,"Descricao":7}"#).unwrap();
        assert_eq!(role.description, "7");
    }
}
