//! End-to-end tests against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, then drives every resource
//! service over real HTTP through the default `ureq` transport. Validates
//! that endpoint rendering, body encoding and decoding line up with what the
//! server expects.

use std::io::{Read, Write};
use std::net::SocketAddr;
use std::thread;
use std::time::{Duration, Instant};

use serde_json::json;
use wappa::resources::{ride, Collaborator, CostCenter, Ride, Webhook};
use wappa::{
    auth, Client, ClientConfig, Context, DefaultResponse, Endpoint, Error, Filter, Json,
};

/// Starts a fresh mock server and returns its address.
fn start_server() -> SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            mock_server::run(listener).await
        })
        .unwrap();
    });

    addr
}

fn config(addr: SocketAddr) -> ClientConfig {
    ClientConfig::new(&format!("http://{addr}")).unwrap()
}

fn client() -> Client {
    Client::new(config(start_server()))
}

fn ctx() -> Context {
    Context::with_timeout(Duration::from_secs(5))
}

// ---------------------------------------------------------------------------
// Status probe
// ---------------------------------------------------------------------------

#[test]
fn status_probe() {
    assert!(client().status(&ctx()));

    // Nothing listens on a port we bound and dropped.
    let closed = std::net::TcpListener::bind("127.0.0.1:0")
        .unwrap()
        .local_addr()
        .unwrap();
    assert!(!Client::new(config(closed)).status(&ctx()));
}

// ---------------------------------------------------------------------------
// Collaborators, cost centers, roles, units
// ---------------------------------------------------------------------------

#[test]
fn collaborator_lifecycle() {
    let client = client();
    let service = client.collaborators();
    let ctx = ctx();

    let created = service
        .create(
            &ctx,
            &Collaborator {
                name: Some("Ana".to_string()),
                email: Some("ana@example.com".to_string()),
                ..Collaborator::default()
            },
        )
        .unwrap();
    assert!(created.success);
    let id: i64 = created.response.parse().unwrap();

    let by_name = Filter::new().with("name", "Ana");
    let found = service.read(&ctx, Some(&by_name)).unwrap();
    assert_eq!(found.envelope.quantity, Some(1));
    assert_eq!(found.collaborators[0].id, Some(id));
    assert!(!found.collaborators[0].created_at.is_zero());

    // The server answers updates with plain text.
    let updated = service
        .update(
            &ctx,
            &Collaborator {
                id: Some(id),
                enrollment: Some("M-001".to_string()),
                ..Collaborator::default()
            },
        )
        .unwrap();
    assert!(updated.success());

    let inactivated = service.inactivate(&ctx, id).unwrap();
    assert!(inactivated.success());

    let found = service.read(&ctx, Some(&by_name)).unwrap();
    assert_eq!(found.collaborators[0].enrollment.as_deref(), Some("M-001"));
    assert_eq!(found.collaborators[0].active, Some(false));

    let missing = service.inactivate(&ctx, id + 100).unwrap();
    assert!(!missing.success());
}

#[test]
fn cost_centers() {
    let client = client();
    let service = client.cost_centers();
    let ctx = ctx();

    let found = service.read(&ctx, "2", "").unwrap();
    assert_eq!(found.cost_centers.len(), 1);
    assert_eq!(found.cost_centers[0].code.as_deref(), Some("COM"));

    let all = service.search(&ctx, None).unwrap();
    assert_eq!(all.cost_centers.len(), 2);

    let created = service
        .create(
            &ctx,
            &CostCenter {
                name: Some("Jurídico".to_string()),
                ..CostCenter::default()
            },
        )
        .unwrap();
    assert!(created.success);
    assert!(service.inactivate(&ctx, 1).unwrap().success);
}

#[test]
fn roles_accept_numeric_descriptions() {
    let client = client();
    let roles = client.roles().read(&ctx(), "", "").unwrap();
    assert_eq!(roles.roles.len(), 2);
    assert_eq!(roles.roles[0].description, "Analista");
    assert_eq!(roles.roles[1].description, "3");
}

#[test]
fn units() {
    let client = client();
    let service = client.units();
    let ctx = ctx();

    let units = service.read(&ctx, None).unwrap();
    assert_eq!(units.units[0].id, Some(10));
    assert_eq!(units.units[0].state.as_deref(), Some("SP"));

    assert!(service.inactivate(&ctx, 10).unwrap().success);
    let missing = service.inactivate(&ctx, 11).unwrap();
    assert!(!missing.success);
    assert_eq!(missing.error.code, "404");
}

// ---------------------------------------------------------------------------
// Drivers, employees
// ---------------------------------------------------------------------------

#[test]
fn nearby_drivers_repeat_type_ids() {
    let client = client();
    let filter: Filter = [("lat", "-23.5"), ("lng", "-46.6"), ("type", "1"), ("type", "3")]
        .into_iter()
        .collect();
    let found = client.drivers().nearby(&ctx(), Some(&filter)).unwrap();
    assert!(found.result.success);
    let types: Vec<i64> = found.drivers.iter().map(|d| d.type_id).collect();
    assert_eq!(types, vec![1, 3]);
}

#[test]
fn employee_status_and_history() {
    let client = client();
    let service = client.employees();
    let ctx = ctx();

    let status = service.status(&ctx, 1).unwrap();
    assert_eq!(status.status, ride::status::IN_PROGRESS);

    let filter = Filter::new().with("employee", "7");
    let history = service.last_rides(&ctx, Some(&filter)).unwrap();
    assert_eq!(history.history.len(), 1);
    let last = &history.history[0];
    assert_eq!(last.passenger.id, 7);
    assert_eq!(last.driver.driver.vehicle.plate, "ABC1234");
    assert!(last.info.started_at.is_some());
    assert!(last.info.paid_at.is_none());
}

#[test]
fn employee_index_requires_a_token() {
    let addr = start_server();
    let filter = Filter::new().with("email", "bia@example.com");

    let anonymous = Client::new(config(addr));
    let err = anonymous.employees().read(&ctx(), Some(&filter)).unwrap_err();
    assert_eq!(err.as_api().map(|e| e.status()), Some(401));

    let agent = auth::bearer_agent("t0k3n").unwrap();
    let authorized = Client::with_agent(config(addr), agent);
    let found = authorized.employees().read(&ctx(), Some(&filter)).unwrap();
    assert_eq!(found.employees.len(), 1);
    assert_eq!(found.employees[0].id, 2);
}

// ---------------------------------------------------------------------------
// Rides, quotes
// ---------------------------------------------------------------------------

#[test]
fn ride_flow() {
    let client = client();
    let service = client.rides();
    let ctx = ctx();

    let created = service
        .create(
            &ctx,
            &Ride {
                employee_id: 7,
                taxi_type_id: 1,
                taxi_category_id: 3,
                external_id: Some("ext-1".to_string()),
                ..Ride::default()
            },
        )
        .unwrap();
    assert!(created.result.success);
    assert_eq!(created.id, 1007);
    assert_eq!(created.info.status, ride::status::SEARCHING_FOR_DRIVER);
    assert_eq!(created.info.external_id, "ext-1");

    let filter = Filter::new().with("id", created.id.to_string());
    let current = service.read(&ctx, Some(&filter)).unwrap();
    assert_eq!(current.id, 1007);
    assert_eq!(current.info.status, ride::status::WAITING_FOR_DRIVER);
    assert_eq!(current.info.to_origin.time_sec.units(), 270);
    assert_eq!(current.info.to_origin.time.to_string(), "00:04:30");
    assert_eq!(current.driver.vehicle.model, "Siena");

    let reasons = service.cancellation_reasons(&ctx).unwrap();
    assert_eq!(reasons.reasons.len(), 2);

    assert!(service.cancel(&ctx, created.id, 2).unwrap().success);
    let rejected = service.cancel(&ctx, created.id, 9).unwrap();
    assert!(!rejected.success);
    assert_eq!(rejected.error_code, "12");

    assert!(service.rate(&ctx, created.id, 5).unwrap().success);
    assert!(!service.rate(&ctx, created.id, 9).unwrap().success);

    let qr = service
        .qr_code(&ctx, Some(&Filter::new().with("employee", "7")))
        .unwrap();
    assert_eq!(qr.qr_code, "wappa://board/7");
}

#[test]
fn quote_estimate() {
    let client = client();
    let filter = Filter::new()
        .with("lat_origin", "-23.5")
        .with("lng_origin", "-46.6")
        .with("employee", "7");
    let quote = client.quotes().estimate(&ctx(), Some(&filter)).unwrap();
    let sub = &quote.categories[0].sub_categories[0];
    assert!(sub.default);
    assert_eq!(sub.estimate.journey.units(), 15);
    assert_eq!(sub.icon.on_focus, "f.png");
    assert!(quote.estimated_at.is_some());

    let err = client.quotes().estimate(&ctx(), None).unwrap_err();
    assert_eq!(err.as_api().map(|e| e.status()), Some(400));
}

// ---------------------------------------------------------------------------
// Webhooks
// ---------------------------------------------------------------------------

#[test]
fn webhook_lifecycle() {
    let client = client();
    let service = client.webhooks();
    let ctx = ctx();

    let hook = Webhook {
        url: "https://example.com".to_string(),
        endpoint: "/rides".to_string(),
        auth_key: "secret".to_string(),
        active: false,
    };
    assert!(service.create(&ctx, &hook).unwrap().success);
    assert!(service.activate(&ctx).unwrap().success);

    let listed = service.read(&ctx).unwrap();
    assert_eq!(listed.listeners.len(), 1);
    assert!(listed.listeners[0].active);

    let changed = Webhook {
        auth_key: "rotated".to_string(),
        ..hook.clone()
    };
    assert!(service.update(&ctx, &changed).unwrap().success);
    let missing = Webhook {
        endpoint: "/other".to_string(),
        ..hook
    };
    assert!(!service.update(&ctx, &missing).unwrap().success);

    assert!(service.deactivate(&ctx).unwrap().success);
    let listed = service.read(&ctx).unwrap();
    assert_eq!(listed.listeners[0].auth_key, "rotated");
    assert!(!listed.listeners[0].active);
}

// ---------------------------------------------------------------------------
// Executor behavior over the wire
// ---------------------------------------------------------------------------

#[test]
fn echo_round_trip() {
    let client = client();
    let sent = json!({ "nome": "José", "ids": [1, 2, 3], "ativo": true });
    let back: serde_json::Value = client
        .executor()
        .post(&ctx(), &Endpoint::new("echo"), Some(&sent), Json)
        .unwrap();
    assert_eq!(back, sent);
}

#[test]
fn undecodable_error_body_is_api_error() {
    let client = client();
    let err = client
        .executor()
        .get::<DefaultResponse, _>(&ctx(), &Endpoint::new("broken"), Json)
        .unwrap_err();
    let api = err.as_api().unwrap();
    assert_eq!(api.status(), 500);
    assert_eq!(api.body(), b"internal error");
}

#[test]
fn decodable_error_body_is_returned() {
    let client = client();
    let res: DefaultResponse = client
        .executor()
        .get(&ctx(), &Endpoint::new("failure"), Json)
        .unwrap();
    assert!(!res.success);
    assert_eq!(res.error.code, "500");
}

#[test]
fn deadline_bounds_slow_responses() {
    let client = client();
    let short = Context::with_timeout(Duration::from_millis(200));
    let started = Instant::now();
    let err = client
        .executor()
        .get::<serde_json::Value, _>(&short, &Endpoint::new("slow"), Json)
        .unwrap_err();
    assert!(err.is_transport(), "unexpected error: {err}");
    assert!(started.elapsed() < mock_server::SLOW_DELAY);
}

#[test]
fn cancelled_context_sends_nothing() {
    let client = client();
    let ctx = ctx();
    ctx.cancel_handle().cancel();
    let err = client.rides().cancellation_reasons(&ctx).unwrap_err();
    assert!(matches!(err, Error::Cancelled));
}

#[test]
fn cancel_stops_a_call_in_flight() {
    let client = client();
    let ctx = Context::background();
    let handle = ctx.cancel_handle();
    thread::spawn(move || {
        thread::sleep(Duration::from_millis(100));
        handle.cancel();
    });

    let started = Instant::now();
    let err = client
        .executor()
        .get::<serde_json::Value, _>(&ctx, &Endpoint::new("slow"), Json)
        .unwrap_err();
    assert!(matches!(err, Error::Cancelled), "unexpected error: {err}");
    assert!(err.is_transport());
    assert!(started.elapsed() < mock_server::SLOW_DELAY);
}

#[test]
fn large_bodies_are_read_in_full() {
    // Past ureq's default 10 MiB read limit.
    let text = "x".repeat(11 * 1024 * 1024);
    let body = serde_json::to_vec(&json!({ "Success": true, "Message": &text })).unwrap();

    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut head = [0; 4096];
        let _ = stream.read(&mut head).unwrap();
        write!(
            stream,
            "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n",
            body.len()
        )
        .unwrap();
        stream.write_all(&body).unwrap();
    });

    let client = Client::new(config(addr));
    let res: DefaultResponse = client
        .executor()
        .get(&ctx(), &Endpoint::new("large"), Json)
        .unwrap();
    assert!(res.success);
    assert_eq!(res.message.len(), text.len());
}
