use serde::{Deserialize, Serialize};

use crate::client::{Executor, NO_BODY};
use crate::context::Context;
use crate::decode::Json;
use crate::endpoint::{action, Endpoint};
use crate::envelope::DefaultResponse;
use crate::error::Result;
use crate::filter::{query_values, FieldMap, Filter, QueryValues};

const ENDPOINT: Endpoint = Endpoint::new("unidade");

pub const FIELDS: &FieldMap = &[("id", "idUnidade"), ("code", "codDescricao")];

/// A company unit (branch office).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Unit {
    #[serde(
        rename = "IdUnidade",
        alias = "IdUniddade",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub id: Option<i64>,
    #[serde(rename = "IdEmpresaCliente", default, skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<i64>,
    #[serde(rename = "Codigo", default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(rename = "Nome", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "Endereco", default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(rename = "Numero", default, skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    #[serde(rename = "Complemento", default, skip_serializing_if = "Option::is_none")]
    pub complement: Option<String>,
    #[serde(rename = "Bairro", default, skip_serializing_if = "Option::is_none")]
    pub neighborhood: Option<String>,
    #[serde(rename = "SiglaUf", default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(rename = "Cep", default, skip_serializing_if = "Option::is_none")]
    pub zip_code: Option<String>,
    #[serde(rename = "Ddd", default, skip_serializing_if = "Option::is_none")]
    pub area_code: Option<String>,
    #[serde(rename = "Telefone", default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(rename = "Ddd2", default, skip_serializing_if = "Option::is_none")]
    pub area_code2: Option<String>,
    #[serde(rename = "Telefone2", default, skip_serializing_if = "Option::is_none")]
    pub phone2: Option<String>,
    #[serde(rename = "IdCidade", default, skip_serializing_if = "Option::is_none")]
    pub city_id: Option<i64>,
    #[serde(rename = "Cidade", default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitResponse {
    #[serde(flatten)]
    pub envelope: DefaultResponse,
    #[serde(rename = "Response", default)]
    pub units: Vec<Unit>,
}

pub struct UnitService<'a> {
    executor: &'a Executor,
}

impl<'a> UnitService<'a> {
    pub(crate) fn new(executor: &'a Executor) -> Self {
        Self { executor }
    }

    pub fn read(&self, ctx: &Context, filter: Option<&Filter>) -> Result<UnitResponse> {
        let endpoint = ENDPOINT
            .action(action::READ)
            .query(&query_values(filter, FIELDS));
        self.executor.get(ctx, &endpoint, Json)
    }

    pub fn create(&self, ctx: &Context, unit: &Unit) -> Result<DefaultResponse> {
        self.executor
            .post(ctx, &ENDPOINT.action(action::CREATE), Some(unit), Json)
    }

    pub fn update(&self, ctx: &Context, unit: &Unit) -> Result<DefaultResponse> {
        self.executor
            .post(ctx, &ENDPOINT.action(action::UPDATE), Some(unit), Json)
    }

    /// The id goes in the query only; no body is sent.
    pub fn inactivate(&self, ctx: &Context, id: i64) -> Result<DefaultResponse> {
        let mut query = QueryValues::new();
        query.set("idUnidade", id.to_string());
        let endpoint = ENDPOINT.action(action::INACTIVATE).query(&query);
        self.executor.post(ctx, &endpoint, NO_BODY, Json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_misspelled_id_key() {
        let unit: Unit = serde_json::from_str(r#"{"IdUniddade":3,"Nome":"Centro"}"#).unwrap();
        assert_eq!(unit.id, Some(3));
        assert_eq!(serde_json::to_string(&unit).unwrap(), r#"{"IdUnidade":3,"Nome":"Centro"}"#);
    }
}
