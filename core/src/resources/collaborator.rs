use serde::{Deserialize, Serialize};

use crate::client::Executor;
use crate::context::Context;
use crate::decode::{Json, OperationDecoder};
use crate::endpoint::{action, Endpoint};
use crate::envelope::{DefaultResponse, OperationResponse};
use crate::error::Result;
use crate::filter::{query_values, FieldMap, Filter, QueryValues};
use crate::types::Time;

const ENDPOINT: Endpoint = Endpoint::new("colaborador");

pub const FIELDS: &FieldMap = &[
    ("name", "nome"),
    ("enrollment", "matricula"),
    ("status", "status"),
    ("unit", "idUnidade"),
    ("cost_center", "idCentroCusto"),
    ("admin", "idAdministrador"),
    ("email", "email"),
    ("cpf", "cpf"),
];

/// A company collaborator allowed to request rides.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Collaborator {
    #[serde(rename = "IdColaborador", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[serde(rename = "Idempresa", default, skip_serializing_if = "Option::is_none")]
    pub company_id: Option<i64>,
    #[serde(rename = "IdAssociacao", default, skip_serializing_if = "Option::is_none")]
    pub association_id: Option<i64>,
    #[serde(rename = "IdCentroCusto", default, skip_serializing_if = "Option::is_none")]
    pub cost_center_id: Option<i64>,
    #[serde(rename = "IdUnidade", default, skip_serializing_if = "Option::is_none")]
    pub unit_id: Option<i64>,
    #[serde(rename = "IdCargo", default, skip_serializing_if = "Option::is_none")]
    pub role_id: Option<i64>,
    #[serde(rename = "Nome", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "Cpf", default, skip_serializing_if = "Option::is_none")]
    pub cpf: Option<String>,
    #[serde(rename = "Email", default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "Cargo", default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(rename = "Matricula", default, skip_serializing_if = "Option::is_none")]
    pub enrollment: Option<String>,
    #[serde(rename = "StatusAtivo", default, skip_serializing_if = "Option::is_none")]
    pub active: Option<bool>,
    #[serde(rename = "StatusBloqueado", default, skip_serializing_if = "Option::is_none")]
    pub blocked: Option<bool>,
    #[serde(rename = "ValorMensalTaxi", default, skip_serializing_if = "Option::is_none")]
    pub monthly_taxi_fare: Option<f64>,
    #[serde(rename = "LimiteMensal", default, skip_serializing_if = "Option::is_none")]
    pub monthly_limit: Option<String>,
    #[serde(rename = "FlgTaxiIlimitado", default, skip_serializing_if = "Option::is_none")]
    pub unlimited_taxi: Option<bool>,
    #[serde(rename = "ValorAcrescimoMensalTaxi", default, skip_serializing_if = "Option::is_none")]
    pub extra_monthly_taxi_fare: Option<f64>,
    #[serde(rename = "ValorAcumuladoTaxi", default, skip_serializing_if = "Option::is_none")]
    pub accumulated_taxi_fare: Option<f64>,
    #[serde(rename = "FlgFrotaAutorizado", default, skip_serializing_if = "Option::is_none")]
    pub authorized_fleet: Option<bool>,
    #[serde(rename = "FlgEnviarSmsDesbloqueio", default, skip_serializing_if = "Option::is_none")]
    pub send_unblock_sms: Option<bool>,
    #[serde(rename = "CodigoCentroCusto", default, skip_serializing_if = "Option::is_none")]
    pub cost_center_code: Option<String>,
    #[serde(rename = "NomeCentroCusto", default, skip_serializing_if = "Option::is_none")]
    pub cost_center_name: Option<String>,
    #[serde(rename = "CodigoUnidade", default, skip_serializing_if = "Option::is_none")]
    pub unit_code: Option<String>,
    #[serde(rename = "NomeUnidade", default, skip_serializing_if = "Option::is_none")]
    pub unit_name: Option<String>,
    #[serde(rename = "DataStatus", default, skip_serializing_if = "Time::is_zero")]
    pub status_changed_at: Time,
    #[serde(rename = "DataCadastro", default, skip_serializing_if = "Time::is_zero")]
    pub created_at: Time,
    #[serde(rename = "DataAtivacao", default, skip_serializing_if = "Time::is_zero")]
    pub activated_at: Time,
    #[serde(rename = "DataReativacao", default, skip_serializing_if = "Time::is_zero")]
    pub reactivated_at: Time,
    #[serde(rename = "DataDesativacao", default, skip_serializing_if = "Time::is_zero")]
    pub inactivated_at: Time,
    #[serde(rename = "DataBloqueio", default, skip_serializing_if = "Time::is_zero")]
    pub blocked_at: Time,
    #[serde(rename = "DataReenvioSenha", default, skip_serializing_if = "Time::is_zero")]
    pub password_resent_at: Time,
    #[serde(rename = "TipoColaborador", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<i64>,
    #[serde(rename = "Estrangeiro", default, skip_serializing_if = "Option::is_none")]
    pub foreign: Option<bool>,
    #[serde(rename = "ValidadeCartao", default, skip_serializing_if = "Option::is_none")]
    pub card_expiration: Option<String>,
    #[serde(rename = "FinalCartao", default, skip_serializing_if = "Option::is_none")]
    pub card_final_digits: Option<String>,
    #[serde(rename = "CodPaisNF", default, skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    #[serde(rename = "NomePaisNF", default, skip_serializing_if = "Option::is_none")]
    pub country_name: Option<String>,
    #[serde(rename = "QtdCorridasIlimitado", default, skip_serializing_if = "Option::is_none")]
    pub unlimited_rides: Option<bool>,
    #[serde(rename = "IdRespondePara", default, skip_serializing_if = "Option::is_none")]
    pub reports_to_id: Option<i64>,
    #[serde(rename = "NomeRespondePara", default, skip_serializing_if = "Option::is_none")]
    pub reports_to_name: Option<String>,
    #[serde(rename = "MatriculaRespondePara", default, skip_serializing_if = "Option::is_none")]
    pub reports_to_enrollment: Option<String>,
    #[serde(rename = "VersaoApp", default, skip_serializing_if = "Option::is_none")]
    pub app_version: Option<String>,
    #[serde(rename = "IdUsuario", default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    #[serde(rename = "Ddd", default, skip_serializing_if = "Option::is_none")]
    pub ddd: Option<String>,
    #[serde(rename = "Login", default, skip_serializing_if = "Option::is_none")]
    pub login: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CollaboratorResponse {
    #[serde(flatten)]
    pub envelope: DefaultResponse,
    #[serde(rename = "Response", default)]
    pub collaborators: Vec<Collaborator>,
}

pub struct CollaboratorService<'a> {
    executor: &'a Executor,
}

impl<'a> CollaboratorService<'a> {
    pub(crate) fn new(executor: &'a Executor) -> Self {
        Self { executor }
    }

    pub fn read(&self, ctx: &Context, filter: Option<&Filter>) -> Result<CollaboratorResponse> {
        let endpoint = ENDPOINT
            .action(action::READ)
            .query(&query_values(filter, FIELDS));
        self.executor.get(ctx, &endpoint, Json)
    }

    pub fn create(&self, ctx: &Context, collaborator: &Collaborator) -> Result<DefaultResponse> {
        self.executor
            .post(ctx, &ENDPOINT.action(action::CREATE), Some(collaborator), Json)
    }

    pub fn update(&self, ctx: &Context, collaborator: &Collaborator) -> Result<OperationResponse> {
        self.executor.post(
            ctx,
            &ENDPOINT.action(action::UPDATE),
            Some(collaborator),
            OperationDecoder,
        )
    }

    /// The id travels both as `idColaborador` and in the body.
    pub fn inactivate(&self, ctx: &Context, id: i64) -> Result<OperationResponse> {
        let mut query = QueryValues::new();
        query.set("idColaborador", id.to_string());
        let body = Collaborator {
            id: Some(id),
            ..Collaborator::default()
        };
        let endpoint = ENDPOINT.action(action::INACTIVATE).query(&query);
        self.executor.post(ctx, &endpoint, Some(&body), OperationDecoder)
    }
}
