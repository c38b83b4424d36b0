//! Verify endpoint rendering, filter translation and response classification
//! against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file lists inputs and the expected wire form or outcome.
//! Expected results are compared as parsed values, not raw strings, where
//! field ordering could differ.

use serde_json::Value;
use wappa::resources::{collaborator, cost_center, driver, employee, quote, ride, unit};
use wappa::{
    Client, ClientConfig, DefaultResponse, Endpoint, FieldMap, Filter, HttpResponse, Json,
    OperationDecoder, QueryValues,
};

fn load(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap()
}

fn strings(value: &Value) -> Vec<String> {
    value
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v.as_str().unwrap().to_string())
        .collect()
}

/// Field table for a resource name used in the vectors.
fn fields(resource: &str) -> &'static FieldMap {
    match resource {
        "collaborator" => collaborator::FIELDS,
        "cost_center" => cost_center::FIELDS,
        "unit" => unit::FIELDS,
        "driver" => driver::FIELDS,
        "employee" => employee::FIELDS,
        "employee_last_rides" => employee::LAST_RIDES_FIELDS,
        "ride" => ride::FIELDS,
        "qr_code" => ride::QR_CODE_FIELDS,
        "quote" => quote::FIELDS,
        other => panic!("unknown resource: {other}"),
    }
}

// ---------------------------------------------------------------------------
// Endpoints
// ---------------------------------------------------------------------------

#[test]
fn endpoint_test_vectors() {
    let vectors = load(include_str!("../../test-vectors/endpoints.json"));
    let base_url = vectors["base_url"].as_str().unwrap();
    let client = Client::new(ClientConfig::new(base_url).unwrap());

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();

        let mut endpoint = Endpoint::from(case["endpoint"].as_str().unwrap().to_string());
        for action in strings(&case["actions"]) {
            endpoint = endpoint.action(&action);
        }
        let mut query = QueryValues::new();
        for (key, values) in case["query"].as_object().unwrap() {
            for value in strings(values) {
                query.append(key.as_str(), value);
            }
        }
        let endpoint = endpoint.query(&query);

        assert_eq!(endpoint.render(), case["expected_path"].as_str().unwrap(), "{name}: path");
        assert_eq!(
            client.executor().url(&endpoint).unwrap().as_str(),
            case["expected_url"].as_str().unwrap(),
            "{name}: url"
        );
    }
}

// ---------------------------------------------------------------------------
// Filters
// ---------------------------------------------------------------------------

#[test]
fn filter_test_vectors() {
    let vectors = load(include_str!("../../test-vectors/filters.json"));

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();

        let mut filter = Filter::new();
        for (key, values) in case["filter"].as_object().unwrap() {
            for value in strings(values) {
                filter.insert(key.as_str(), value);
            }
        }
        let encoded = filter.values(fields(case["resource"].as_str().unwrap())).encode();
        assert_eq!(encoded, case["expected_query"].as_str().unwrap(), "{name}");
    }
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

#[test]
fn response_test_vectors() {
    let vectors = load(include_str!("../../test-vectors/responses.json"));
    let client = Client::new(ClientConfig::new("http://localhost:3000").unwrap());
    let executor = client.executor();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let response = HttpResponse {
            status: case["status"].as_u64().unwrap() as u16,
            body: case["body"].as_str().unwrap().as_bytes().to_vec(),
        };

        let outcome: wappa::Result<DefaultResponse> = match case["decoder"].as_str().unwrap() {
            "json" => executor.parse_response(response, Json),
            "operation" => executor
                .parse_response(response, OperationDecoder)
                .map(|res| res.envelope),
            other => panic!("unknown decoder: {other}"),
        };

        if let Some(expected) = case.get("expected") {
            let res = outcome.unwrap_or_else(|err| panic!("{name}: unexpected error {err}"));
            assert_eq!(res.success, expected["success"].as_bool().unwrap(), "{name}: success");
            if let Some(text) = expected.get("response") {
                assert_eq!(res.response, text.as_str().unwrap(), "{name}: response");
            }
            if let Some(code) = expected.get("error_code") {
                assert_eq!(res.error.code, code.as_str().unwrap(), "{name}: error code");
            }
            if let Some(message) = expected.get("error_message") {
                assert_eq!(res.error.message, message.as_str().unwrap(), "{name}: error message");
            }
        } else {
            let expected = &case["expected_error"];
            let err = outcome.expect_err(name);
            let api = err.as_api().unwrap_or_else(|| panic!("{name}: not an api error: {err}"));
            assert_eq!(u64::from(api.status()), expected["status"].as_u64().unwrap(), "{name}: status");
            assert!(
                api.message().starts_with(expected["message_prefix"].as_str().unwrap()),
                "{name}: message {:?}",
                api.message()
            );
            assert_eq!(api.body(), case["body"].as_str().unwrap().as_bytes(), "{name}: body");
        }
    }
}
