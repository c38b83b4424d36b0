//! In-memory stand-in for the Wappa API, used by the client's integration
//! tests. Collaborators and webhooks are stateful; everything else answers
//! with fixed data shaped like the real service.

use std::{collections::BTreeMap, collections::HashMap, sync::Arc, time::Duration};

use axum::{
    extract::{Query, RawQuery, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::{net::TcpListener, sync::RwLock};
use url::form_urlencoded;

/// How long `/api/slow` waits before answering.
pub const SLOW_DELAY: Duration = Duration::from_secs(2);

#[derive(Debug, Default)]
pub struct Db {
    pub collaborators: BTreeMap<i64, Value>,
    next_collaborator: i64,
    pub listeners: Vec<Value>,
    pub listening: bool,
}

pub type SharedDb = Arc<RwLock<Db>>;

type Params = Query<HashMap<String, String>>;

pub fn app() -> Router {
    let db: SharedDb = Arc::new(RwLock::new(Db {
        next_collaborator: 1,
        ..Db::default()
    }));
    Router::new()
        .route("/api/status", get(status))
        .route("/api/colaborador/listar", get(list_collaborators))
        .route("/api/colaborador/cadastrar", post(create_collaborator))
        .route("/api/colaborador/update", post(update_collaborator))
        .route("/api/colaborador/inativar", post(inactivate_collaborator))
        .route("/api/centrocusto/listar", get(list_cost_centers))
        .route("/api/centrocusto/cadastrar", post(ok_envelope))
        .route("/api/centrocusto/update", post(ok_envelope))
        .route("/api/centrocusto/inativar", post(ok_envelope))
        .route("/api/cargo/listar", get(list_roles))
        .route("/api/cargo/cadastrar", post(ok_envelope))
        .route("/api/unidade/listar", get(list_units))
        .route("/api/unidade/cadastrar", post(ok_envelope))
        .route("/api/unidade/update", post(ok_envelope))
        .route("/api/unidade/inativar", post(inactivate_unit))
        .route("/api/driver/nearby", get(nearby_drivers))
        .route("/api/employee/status", get(employee_status))
        .route("/api/employee/last-rides", get(last_rides))
        .route("/api/index/employee", get(list_employees))
        .route("/api/index/cancellation-reason", get(cancellation_reasons))
        .route("/api/ride", post(create_ride))
        .route("/api/ride/status", get(ride_status))
        .route("/api/ride/cancel", post(cancel_ride))
        .route("/api/ride/rate", post(rate_ride))
        .route("/api/ride/qrcode", get(qr_code))
        .route("/api/estimate", get(estimate))
        .route("/api/webhook", get(list_webhooks).post(create_webhook))
        .route("/api/webhook/update", post(update_webhook))
        .route("/api/webhook/activate", post(activate_webhooks))
        .route("/api/webhook/deactivate", post(deactivate_webhooks))
        .route("/api/echo", post(echo))
        .route("/api/broken", get(broken))
        .route("/api/failure", get(failure))
        .route("/api/slow", get(slow))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn status() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn ok_envelope() -> Json<Value> {
    Json(json!({ "Success": true, "Message": "Operação realizada com sucesso" }))
}

// --- collaborators ---

async fn list_collaborators(State(db): State<SharedDb>, Query(params): Params) -> Json<Value> {
    let db = db.read().await;
    let name = params.get("nome").filter(|n| !n.is_empty());
    let found: Vec<&Value> = db
        .collaborators
        .values()
        .filter(|c| name.map_or(true, |n| c["Nome"].as_str() == Some(n.as_str())))
        .collect();
    Json(json!({ "Success": true, "Quantidade": found.len(), "Response": found }))
}

async fn create_collaborator(
    State(db): State<SharedDb>,
    Json(mut input): Json<Value>,
) -> (StatusCode, Json<Value>) {
    if input.get("Nome").and_then(Value::as_str).is_none() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({
                "Success": false,
                "Error": { "Code": 400, "Message": "Nome obrigatório" }
            })),
        );
    }
    let mut db = db.write().await;
    let id = db.next_collaborator;
    db.next_collaborator += 1;
    input["IdColaborador"] = json!(id);
    input["StatusAtivo"] = json!(true);
    input["DataCadastro"] = json!("2019-08-23T19:00:13");
    db.collaborators.insert(id, input);
    (
        StatusCode::OK,
        Json(json!({ "Success": true, "Response": format!("{id}") })),
    )
}

/// Answers in plain text on success, as the real service does.
async fn update_collaborator(State(db): State<SharedDb>, Json(input): Json<Value>) -> Response {
    let Some(id) = input.get("IdColaborador").and_then(Value::as_i64) else {
        return (StatusCode::BAD_REQUEST, "IdColaborador obrigatório").into_response();
    };
    let mut db = db.write().await;
    let Some(stored) = db.collaborators.get_mut(&id) else {
        return Json(json!({
            "Success": false,
            "Error": { "Code": 404, "Message": "Colaborador não encontrado" }
        }))
        .into_response();
    };
    if let (Value::Object(stored), Value::Object(changes)) = (stored, input) {
        stored.extend(changes);
    }
    "Colaborador alterado com sucesso".into_response()
}

async fn inactivate_collaborator(
    State(db): State<SharedDb>,
    Query(params): Params,
) -> Json<Value> {
    let id = params
        .get("idColaborador")
        .and_then(|id| id.parse::<i64>().ok())
        .unwrap_or_default();
    let mut db = db.write().await;
    match db.collaborators.get_mut(&id) {
        Some(stored) => {
            stored["StatusAtivo"] = json!(false);
            Json(json!({ "Success": true, "Response": "Colaborador inativado com sucesso" }))
        }
        None => Json(json!({
            "Success": false,
            "Error": { "Code": 404, "Message": "Colaborador não encontrado" }
        })),
    }
}

// --- cost centers, roles, units ---

async fn list_cost_centers(Query(params): Params) -> Json<Value> {
    let all = [
        json!({ "IdCentroCusto": 1, "Nome": "Financeiro", "Codigo": "FIN" }),
        json!({ "IdCentroCusto": 2, "Nome": "Comercial", "Codigo": "COM" }),
    ];
    let id = params.get("idCentroCusto").filter(|id| !id.is_empty());
    let found: Vec<&Value> = all
        .iter()
        .filter(|c| id.map_or(true, |id| c["IdCentroCusto"].to_string() == *id))
        .collect();
    Json(json!({ "Success": true, "Quantidade": found.len(), "Response": found }))
}

async fn list_roles() -> Json<Value> {
    Json(json!({
        "Success": true,
        "Response": [
            { "IdCargo": 1, "Descricao": "Analista" },
            { "IdCargo": 2, "Descricao": 3 }
        ]
    }))
}

async fn list_units() -> Json<Value> {
    Json(json!({
        "Success": true,
        "Response": [{ "IdUniddade": 10, "Nome": "Matriz", "Cidade": "São Paulo", "SiglaUf": "SP" }]
    }))
}

async fn inactivate_unit(Query(params): Params) -> Json<Value> {
    let known = params.get("idUnidade").map(String::as_str) == Some("10");
    if known {
        Json(json!({ "Success": true }))
    } else {
        Json(json!({ "Success": false, "Error": { "Code": "404", "Message": "Unidade não encontrada" } }))
    }
}

// --- drivers and employees ---

async fn nearby_drivers(RawQuery(query): RawQuery) -> Json<Value> {
    let query = query.unwrap_or_default();
    let drivers: Vec<Value> = form_urlencoded::parse(query.as_bytes())
        .filter(|(key, _)| key == "TypeIds")
        .filter_map(|(_, value)| value.parse::<i64>().ok())
        .map(|type_id| {
            json!({ "latitude": -23.55, "longitude": -46.63, "bearing": 90.0, "typeId": type_id })
        })
        .collect();
    Json(json!({ "success": true, "drivers": drivers }))
}

async fn employee_status(Query(params): Params) -> Result<Json<Value>, StatusCode> {
    let id = params.get("employeeId").ok_or(StatusCode::BAD_REQUEST)?;
    Ok(Json(json!({ "rideId": 900, "status": if id == "1" { "on-ride" } else { "" } })))
}

async fn last_rides(Query(params): Params) -> Json<Value> {
    let employee = params
        .get("EmployeeId")
        .and_then(|id| id.parse::<i64>().ok())
        .unwrap_or_default();
    Json(json!({
        "success": true,
        "history": [{
            "rideId": 900,
            "companyId": 5,
            "passenger": { "employeeId": employee, "name": "Ana" },
            "origin": { "city": "São Paulo", "location": { "latitude": -23.5, "longitude": -46.6 } },
            "driver": {
                "name": "João",
                "Vehicle": { "plate": "ABC1234" },
                "category": { "id": 1, "description": "Táxi", "type": { "id": 1, "description": "Comum" } },
                "photo": "https://example.com/p.png"
            },
            "rideInfo": {
                "status": "ride-completed",
                "rideDate": "2019-08-23T19:00:13-03:00",
                "finishDate": "2019-08-23T19:20:00-03:00",
                "paymentDate": null,
                "rideValue": 25.9,
                "durationInSeconds": 1187,
                "distance": 7
            }
        }]
    }))
}

/// The only route that checks credentials.
async fn list_employees(headers: HeaderMap, Query(params): Params) -> Response {
    let authorized = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("Bearer ") && v.len() > "Bearer ".len());
    if !authorized {
        return (StatusCode::UNAUTHORIZED, "Authorization has been denied for this request.")
            .into_response();
    }
    let all = [
        json!({ "employeeId": 1, "email": "ana@example.com", "registration": "001" }),
        json!({ "employeeId": 2, "email": "bia@example.com", "registration": "002" }),
    ];
    let email = params.get("Email");
    let found: Vec<&Value> = all
        .iter()
        .filter(|e| email.map_or(true, |m| e["email"].as_str() == Some(m.as_str())))
        .collect();
    Json(json!({ "employees": found })).into_response()
}

// --- rides ---

async fn cancellation_reasons() -> Json<Value> {
    Json(json!({
        "reasons": [
            { "id": 1, "description": "Motorista demorou" },
            { "id": 2, "description": "Desisti da corrida" }
        ]
    }))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct NewRide {
    employee_id: i64,
    #[serde(default)]
    external_id: Option<String>,
}

async fn create_ride(Json(ride): Json<NewRide>) -> Json<Value> {
    Json(json!({
        "success": true,
        "rideID": 1000 + ride.employee_id,
        "passenger": { "employeeId": ride.employee_id },
        "rideInfo": {
            "status": "searching-for-driver",
            "externalId": ride.external_id.unwrap_or_default()
        }
    }))
}

async fn ride_status(Query(params): Params) -> Json<Value> {
    let id = params
        .get("rideId")
        .and_then(|id| id.parse::<i64>().ok())
        .unwrap_or_default();
    Json(json!({
        "success": true,
        "rideID": id,
        "driver": { "name": "João", "Vehicle": { "marker": "Fiat", "model": "Siena", "plate": "ABC1234" } },
        "rideInfo": {
            "status": "waiting-for-driver",
            "driverLocation": { "latitude": -23.55, "longitude": -46.63 },
            "toOrigin": { "time": "00:04:30", "timeSec": 270.4, "distanceKm": 1.2 },
            "rideValue": 0
        }
    }))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CancelRide {
    ride_id: i64,
    reason_id: i64,
}

async fn cancel_ride(Json(cancel): Json<CancelRide>) -> Json<Value> {
    if cancel.ride_id > 0 && (1..=2).contains(&cancel.reason_id) {
        Json(json!({ "success": true }))
    } else {
        Json(json!({ "success": false, "message": "Motivo inválido", "errorCode": 12 }))
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RateRide {
    ride_id: i64,
    rating: i64,
}

async fn rate_ride(Json(rate): Json<RateRide>) -> Json<Value> {
    Json(json!({ "success": rate.ride_id > 0 && (1..=5).contains(&rate.rating) }))
}

async fn qr_code(Query(params): Params) -> Json<Value> {
    let employee = params.get("EmployeeId").cloned().unwrap_or_default();
    Json(json!({ "success": true, "qrcode": format!("wappa://board/{employee}") }))
}

async fn estimate(Query(params): Params) -> Result<Json<Value>, StatusCode> {
    if !params.contains_key("EmployeeId") {
        return Err(StatusCode::BAD_REQUEST);
    }
    Ok(Json(json!({
        "date": "2019-08-23T19:00:13-03:00",
        "categories": [{
            "id": 1,
            "description": "Táxi",
            "subcategories": [{
                "id": 3,
                "typeId": 1,
                "default": true,
                "description": "Comum",
                "estimate": { "minimum": 18.5, "maximum": 24.0, "distance": 6.1, "journey": 15.8 },
                "icon": { "default": "d.png", "onFocus": "f.png", "pin": "p.png" }
            }]
        }]
    })))
}

// --- webhooks ---

async fn list_webhooks(State(db): State<SharedDb>) -> Json<Value> {
    let db = db.read().await;
    let listeners: Vec<Value> = db
        .listeners
        .iter()
        .cloned()
        .map(|mut l| {
            l["active"] = json!(db.listening);
            l
        })
        .collect();
    Json(json!({ "success": true, "listeners": listeners }))
}

async fn create_webhook(State(db): State<SharedDb>, Json(input): Json<Value>) -> Json<Value> {
    db.write().await.listeners.push(input);
    Json(json!({ "success": true }))
}

async fn update_webhook(State(db): State<SharedDb>, Json(input): Json<Value>) -> Json<Value> {
    let mut db = db.write().await;
    let existing = db
        .listeners
        .iter_mut()
        .find(|l| l["endpoint"] == input["endpoint"]);
    match existing {
        Some(listener) => {
            *listener = input;
            Json(json!({ "success": true }))
        }
        None => Json(json!({ "success": false, "message": "Webhook não encontrado" })),
    }
}

async fn activate_webhooks(State(db): State<SharedDb>) -> Json<Value> {
    db.write().await.listening = true;
    Json(json!({ "success": true }))
}

async fn deactivate_webhooks(State(db): State<SharedDb>) -> Json<Value> {
    db.write().await.listening = false;
    Json(json!({ "success": true }))
}

// --- transport checks ---

async fn echo(body: String) -> Response {
    ([(header::CONTENT_TYPE, "application/json")], body).into_response()
}

async fn broken() -> (StatusCode, &'static str) {
    (StatusCode::INTERNAL_SERVER_ERROR, "internal error")
}

async fn failure() -> (StatusCode, Json<Value>) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "Success": false, "Error": { "Code": 500, "Message": "falha interna" } })),
    )
}

async fn slow() -> Json<Value> {
    tokio::time::sleep(SLOW_DELAY).await;
    Json(json!({ "status": "late" }))
}
