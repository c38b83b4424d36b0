use serde::{Deserialize, Serialize};

use crate::client::Executor;
use crate::context::Context;
use crate::decode::Json;
use crate::endpoint::{action, Endpoint};
use crate::envelope::DefaultResponse;
use crate::error::Result;
use crate::filter::{query_values, FieldMap, Filter, QueryValues};

const ENDPOINT: Endpoint = Endpoint::new("centrocusto");

pub const FIELDS: &FieldMap = &[("id", "idCentroCusto"), ("description", "codDescricao")];

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostCenter {
    #[serde(rename = "IdCentroCusto", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(rename = "Nome", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "Codigo", default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(rename = "IdCentroCustoSuperior", default, skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<String>,
    #[serde(rename = "CodigoCCSuperior", default, skip_serializing_if = "Option::is_none")]
    pub parent_code: Option<String>,
    #[serde(rename = "NomeCCSuperior", default, skip_serializing_if = "Option::is_none")]
    pub parent_name: Option<String>,
    #[serde(rename = "CNJPEmpresaGrupo", default, skip_serializing_if = "Option::is_none")]
    pub group_cnpj: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CostCenterResponse {
    #[serde(flatten)]
    pub envelope: DefaultResponse,
    #[serde(rename = "Response", default)]
    pub cost_centers: Vec<CostCenter>,
}

pub struct CostCenterService<'a> {
    executor: &'a Executor,
}

impl<'a> CostCenterService<'a> {
    pub(crate) fn new(executor: &'a Executor) -> Self {
        Self { executor }
    }

    /// Reads by id and code/description. Both parameters are always sent.
    pub fn read(&self, ctx: &Context, id: &str, description: &str) -> Result<CostCenterResponse> {
        let mut query = QueryValues::new();
        query.set("idCentroCusto", id);
        query.set("codDescricao", description);
        self.executor
            .get(ctx, &ENDPOINT.action(action::READ).query(&query), Json)
    }

    /// Reads with only the filter keys the caller set.
    pub fn search(&self, ctx: &Context, filter: Option<&Filter>) -> Result<CostCenterResponse> {
        let endpoint = ENDPOINT
            .action(action::READ)
            .query(&query_values(filter, FIELDS));
        self.executor.get(ctx, &endpoint, Json)
    }

    pub fn create(&self, ctx: &Context, cost_center: &CostCenter) -> Result<DefaultResponse> {
        self.executor
            .post(ctx, &ENDPOINT.action(action::CREATE), Some(cost_center), Json)
    }

    pub fn update(&self, ctx: &Context, cost_center: &CostCenter) -> Result<DefaultResponse> {
        self.executor
            .post(ctx, &ENDPOINT.action(action::UPDATE), Some(cost_center), Json)
    }

    pub fn inactivate(&self, ctx: &Context, id: i64) -> Result<DefaultResponse> {
        let body = CostCenter {
            id: Some(id),
            ..CostCenter::default()
        };
        self.executor
            .post(ctx, &ENDPOINT.action(action::INACTIVATE), Some(&body), Json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_filter_maps_to_wire_name() {
        let values = Filter::new().with("id", "123").values(FIELDS);
        assert_eq!(values.get("idCentroCusto"), Some(&["123".to_string()][..]));
        assert_eq!(values.len(), 1);
    }

    #[test]
    fn inactivate_body_carries_only_the_id() {
        let body = CostCenter {
            id: Some(4),
            ..CostCenter::default()
        };
        assert_eq!(serde_json::to_string(&body).unwrap(), r#"{"IdCentroCusto":4}"#);
    }
}
