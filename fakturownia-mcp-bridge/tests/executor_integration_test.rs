//! Integration tests for the request executor against a mock Fakturownia API.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "test code")]

use std::{
    sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    },
    time::{Duration, Instant},
};

use fakturownia_mcp_bridge::{
    BridgeError, ClientConfig, DecodedResponse, EndpointDescriptor, HttpMethod, Operation,
    RequestExecutor, RequestIntent, mcp::format::render_error,
};
use serde_json::{Value, json};
use wiremock::{
    Mock, MockServer, Request, Respond, ResponseTemplate,
    matchers::{method, path},
};

const TOKEN: &str = "integration-token";

fn fast_config(uri: &str, max_retries: u32) -> ClientConfig {
    let mut config = ClientConfig::new(TOKEN, "acme").with_base_url(uri);
    config.max_retries = max_retries;
    config.retry_base_delay_ms = 10;
    config.retry_max_jitter_ms = 0;
    config
}

fn executor_for(config: &ClientConfig) -> RequestExecutor {
    RequestExecutor::new(config).expect("valid test config")
}

fn query_value(request: &Request, key: &str) -> Option<String> {
    request.url.query_pairs().find(|(k, _)| k == key).map(|(_, v)| v.into_owned())
}

fn content_type(request: &Request) -> Option<String> {
    request.headers.get("content-type").and_then(|v| v.to_str().ok()).map(str::to_owned)
}

/// Replays a fixed list of responses and records when each request arrived.
struct Sequence {
    responses: Vec<ResponseTemplate>,
    calls: AtomicUsize,
    arrivals: Arc<Mutex<Vec<Instant>>>,
}

impl Sequence {
    fn new(responses: Vec<ResponseTemplate>) -> (Self, Arc<Mutex<Vec<Instant>>>) {
        let arrivals = Arc::new(Mutex::new(Vec::new()));
        let sequence = Self { responses, calls: AtomicUsize::new(0), arrivals: Arc::clone(&arrivals) };
        (sequence, arrivals)
    }
}

impl Respond for Sequence {
    fn respond(&self, _request: &Request) -> ResponseTemplate {
        self.arrivals.lock().unwrap().push(Instant::now());
        let index = self.calls.fetch_add(1, Ordering::SeqCst).min(self.responses.len() - 1);
        self.responses[index].clone()
    }
}

// Authentication placement

#[tokio::test]
async fn test_get_sends_token_in_query_without_content_type() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/invoices/7.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 7})))
        .expect(1)
        .mount(&server)
        .await;

    let executor = executor_for(&fast_config(&server.uri(), 3));
    let intent = RequestIntent::for_operation(Operation::GetInvoice, Some(7)).unwrap();
    executor.execute(&intent).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let request = &requests[0];
    assert_eq!(query_value(request, "api_token").as_deref(), Some(TOKEN));
    assert_eq!(content_type(request), None);
    assert_eq!(request.headers.get("accept").unwrap(), "application/json");
    assert!(request.body.is_empty());
}

#[tokio::test]
async fn test_delete_sends_token_in_query() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/banking/payments/3.json"))
        .respond_with(ResponseTemplate::new(200).set_body_string("OK"))
        .mount(&server)
        .await;

    let executor = executor_for(&fast_config(&server.uri(), 0));
    let intent = RequestIntent::for_operation(Operation::DeletePayment, Some(3)).unwrap();
    executor.execute(&intent).await.unwrap();

    let request = &server.received_requests().await.unwrap()[0];
    assert_eq!(query_value(request, "api_token").as_deref(), Some(TOKEN));
    assert_eq!(content_type(request), None);
}

#[tokio::test]
async fn test_body_verbs_send_token_in_body() {
    let server = MockServer::start().await;
    Mock::given(path("/invoices.json"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": 1})))
        .mount(&server)
        .await;
    Mock::given(path("/invoices/1.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1})))
        .mount(&server)
        .await;
    Mock::given(path("/banking/payments/1.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 1})))
        .mount(&server)
        .await;

    let executor = executor_for(&fast_config(&server.uri(), 0));
    let intents = [
        RequestIntent::for_operation(Operation::CreateInvoice, None)
            .unwrap()
            .with_payload(json!({"kind": "vat"}))
            .unwrap(),
        RequestIntent::for_operation(Operation::UpdateInvoice, Some(1))
            .unwrap()
            .with_payload(json!({"buyer_name": "ACME"}))
            .unwrap(),
        RequestIntent::for_operation(Operation::UpdatePayment, Some(1))
            .unwrap()
            .with_payload(json!({"paid": true}))
            .unwrap(),
    ];
    for intent in &intents {
        executor.execute(intent).await.unwrap();
    }

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 3);
    let verbs: Vec<&str> = requests.iter().map(|r| r.method.as_str()).collect();
    assert_eq!(verbs, ["POST", "PUT", "PATCH"]);

    for request in &requests {
        let body: Value = request.body_json().unwrap();
        assert_eq!(body["api_token"], TOKEN);
        assert_eq!(query_value(request, "api_token"), None);
        assert!(content_type(request).unwrap().starts_with("application/json"));
    }

    let created: Value = requests[0].body_json().unwrap();
    assert_eq!(created, json!({"invoice": {"kind": "vat"}, "api_token": TOKEN}));
}

#[tokio::test]
async fn test_empty_body_still_carries_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/invoices/5/send_by_email.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
        .mount(&server)
        .await;

    let executor = executor_for(&fast_config(&server.uri(), 0));
    let intent = RequestIntent::for_operation(Operation::SendInvoiceEmail, Some(5))
        .unwrap()
        .with_body(serde_json::Map::new())
        .unwrap();
    executor.execute(&intent).await.unwrap();

    let request = &server.received_requests().await.unwrap()[0];
    let body: Value = request.body_json().unwrap();
    assert_eq!(body, json!({"api_token": TOKEN}));
    assert!(content_type(request).unwrap().starts_with("application/json"));
}

#[tokio::test]
async fn test_caller_cannot_override_token() {
    let server = MockServer::start().await;
    Mock::given(path("/invoices.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let executor = executor_for(&fast_config(&server.uri(), 0));

    let listing = RequestIntent::for_operation(Operation::ListInvoices, None)
        .unwrap()
        .with_query([("api_token", "forged")])
        .unwrap();
    executor.execute(&listing).await.unwrap();

    let creation = RequestIntent::for_operation(Operation::CreateInvoice, None)
        .unwrap()
        .with_query([("api_token", "forged")])
        .unwrap()
        .with_body(json!({"api_token": "forged"}).as_object().unwrap().clone())
        .unwrap();
    executor.execute(&creation).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    let tokens: Vec<String> =
        requests[0].url.query_pairs().filter(|(k, _)| k == "api_token").map(|(_, v)| v.into_owned()).collect();
    assert_eq!(tokens, [TOKEN]);

    assert_eq!(query_value(&requests[1], "api_token"), None);
    let body: Value = requests[1].body_json().unwrap();
    assert_eq!(body["api_token"], TOKEN);
}

#[tokio::test]
async fn test_fixed_query_sent_and_overridable() {
    let server = MockServer::start().await;
    Mock::given(path("/invoices/9.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 9})))
        .mount(&server)
        .await;

    let executor = executor_for(&fast_config(&server.uri(), 0));
    let ksef = RequestIntent::for_operation(Operation::SendInvoiceToKsef, Some(9)).unwrap();
    executor.execute(&ksef).await.unwrap();

    let descriptor = EndpointDescriptor {
        method: HttpMethod::Get,
        path_template: "/invoices/{id}.json",
        body_key: None,
        accepts_query: true,
        fixed_query: &[("send_to_ksef", "yes"), ("lang", "pl")],
    };
    let overridden =
        RequestIntent::new(descriptor, Some(9)).unwrap().with_query([("lang", "en")]).unwrap();
    executor.execute(&overridden).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(query_value(&requests[0], "send_to_ksef").as_deref(), Some("yes"));
    assert_eq!(query_value(&requests[1], "send_to_ksef").as_deref(), Some("yes"));
    assert_eq!(query_value(&requests[1], "lang").as_deref(), Some("en"));
}

// Retry and backoff

#[tokio::test]
async fn test_retries_rate_limit_and_server_error_with_backoff() {
    let server = MockServer::start().await;
    let (sequence, arrivals) = Sequence::new(vec![
        ResponseTemplate::new(429).set_body_string("slow down"),
        ResponseTemplate::new(503).set_body_string("maintenance"),
        ResponseTemplate::new(200).set_body_json(json!({"id": 1, "name": "ACME"})),
    ]);
    Mock::given(method("GET")).and(path("/clients/1.json")).respond_with(sequence).mount(&server).await;

    // Default backoff: 1s base, up to 500ms jitter
    let mut config = ClientConfig::new(TOKEN, "acme").with_base_url(server.uri());
    config.max_retries = 2;
    let executor = executor_for(&config);

    let intent = RequestIntent::for_operation(Operation::GetClient, Some(1)).unwrap();
    let response = executor.execute(&intent).await.unwrap();
    assert_eq!(response, DecodedResponse::Json(json!({"id": 1, "name": "ACME"})));

    let arrivals = arrivals.lock().unwrap();
    assert_eq!(arrivals.len(), 3);
    // Upper bound allows for request round-trip on top of the jitter window
    let slack = Duration::from_millis(200);
    for (index, pair) in arrivals.windows(2).enumerate() {
        let gap = pair[1] - pair[0];
        let floor = Duration::from_secs(1 << index);
        assert!(gap >= floor, "gap {index} too short: {gap:?}");
        assert!(gap < floor + Duration::from_millis(500) + slack, "gap {index} too long: {gap:?}");
    }
}

#[tokio::test]
async fn test_exhausted_retries_report_last_response() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/invoices.json"))
        .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
        .expect(3)
        .mount(&server)
        .await;

    let executor = executor_for(&fast_config(&server.uri(), 2));
    let intent = RequestIntent::for_operation(Operation::ListInvoices, None).unwrap();
    let error = executor.execute(&intent).await.unwrap_err();

    match &error {
        BridgeError::RetriesExhausted { method, path, attempts, status, body } => {
            assert_eq!(*method, HttpMethod::Get);
            assert_eq!(path, "/invoices.json");
            assert_eq!(*attempts, 3);
            assert_eq!(*status, 503);
            assert_eq!(body, "Service Unavailable");
        }
        other => panic!("expected RetriesExhausted, got {other:?}"),
    }
    assert!(error.to_string().contains("Service Unavailable"));
}

#[tokio::test]
async fn test_client_errors_fail_immediately() {
    for status in [401u16, 404] {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/products/4.json"))
            .respond_with(ResponseTemplate::new(status).set_body_string("nope"))
            .expect(1)
            .mount(&server)
            .await;

        let executor = executor_for(&fast_config(&server.uri(), 5));
        let intent = RequestIntent::for_operation(Operation::GetProduct, Some(4)).unwrap();
        let error = executor.execute(&intent).await.unwrap_err();

        assert!(
            matches!(error, BridgeError::Api { status: got, .. } if got == status),
            "unexpected error for {status}: {error:?}"
        );
        assert_eq!(server.received_requests().await.unwrap().len(), 1);
    }
}

// Timeout

#[tokio::test]
async fn test_final_attempt_timeout_reports_bound_and_operation() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/account.json"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;

    let mut config = fast_config(&server.uri(), 1);
    config.timeout_ms = 150;
    let executor = executor_for(&config);

    let started = Instant::now();
    let intent = RequestIntent::for_operation(Operation::GetAccountInfo, None).unwrap();
    let error = executor.execute(&intent).await.unwrap_err();

    assert!(matches!(error, BridgeError::Timeout { .. }), "got {error:?}");
    let message = error.to_string();
    assert!(message.contains("150ms"), "{message}");
    assert!(message.contains("GET /account.json"), "{message}");
    assert!(started.elapsed() < Duration::from_secs(2));
    assert_eq!(server.received_requests().await.unwrap().len(), 2);
}

#[tokio::test]
async fn test_timeout_then_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/warehouses.json"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/warehouses.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 1}])))
        .mount(&server)
        .await;

    let mut config = fast_config(&server.uri(), 2);
    config.timeout_ms = 150;
    let executor = executor_for(&config);

    let intent = RequestIntent::for_operation(Operation::ListWarehouses, None).unwrap();
    let response = executor.execute(&intent).await.unwrap();
    assert_eq!(response, DecodedResponse::Json(json!([{"id": 1}])));
}

#[tokio::test]
async fn test_connection_refused_fails_once_without_leaking_token() {
    let port = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        listener.local_addr().unwrap().port()
    };

    let mut config = fast_config(&format!("http://127.0.0.1:{port}"), 3);
    config.retry_base_delay_ms = 1000;
    let executor = executor_for(&config);

    let started = Instant::now();
    let intent = RequestIntent::for_operation(Operation::GetAccountInfo, None).unwrap();
    let error = executor.execute(&intent).await.unwrap_err();

    assert!(matches!(error, BridgeError::HttpError(_)), "got {error:?}");
    // A single retry would already sleep for the 1s base delay
    assert!(started.elapsed() < Duration::from_millis(500), "took {:?}", started.elapsed());

    let rendered = render_error(&error);
    assert!(rendered.starts_with("Error: HTTP request failed"), "{rendered}");
    assert!(!rendered.contains(TOKEN), "{rendered}");
    assert!(!format!("{error:?}").contains(TOKEN));
}

// Decoding

#[tokio::test]
async fn test_decodes_by_content_type() {
    let server = MockServer::start().await;
    Mock::given(path("/categories.json"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_raw(r#"[{"id":1,"name":"Services"}]"#, "application/json; charset=utf-8"),
        )
        .mount(&server)
        .await;
    Mock::given(path("/departments.json"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("plain words\n", "text/plain"))
        .mount(&server)
        .await;

    let executor = executor_for(&fast_config(&server.uri(), 0));

    let categories = RequestIntent::for_operation(Operation::ListCategories, None).unwrap();
    assert_eq!(
        executor.execute(&categories).await.unwrap(),
        DecodedResponse::Json(json!([{"id": 1, "name": "Services"}]))
    );

    let departments = RequestIntent::for_operation(Operation::ListDepartments, None).unwrap();
    assert_eq!(
        executor.execute(&departments).await.unwrap(),
        DecodedResponse::Text("plain words\n".to_owned())
    );
}

#[tokio::test]
async fn test_malformed_json_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(path("/clients.json"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("{broken", "application/json"))
        .expect(1)
        .mount(&server)
        .await;

    let executor = executor_for(&fast_config(&server.uri(), 3));
    let intent = RequestIntent::for_operation(Operation::ListClients, None).unwrap();
    let error = executor.execute(&intent).await.unwrap_err();
    assert!(matches!(error, BridgeError::InvalidResponse { .. }), "got {error:?}");
}

// Concurrency

#[tokio::test]
async fn test_concurrent_calls_are_independent() {
    let server = MockServer::start().await;
    let (sequence, _arrivals) = Sequence::new(vec![
        ResponseTemplate::new(503),
        ResponseTemplate::new(503),
        ResponseTemplate::new(200).set_body_json(json!({"slow": true})),
    ]);
    Mock::given(path("/invoices.json")).respond_with(sequence).mount(&server).await;
    Mock::given(path("/clients.json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"fast": true})))
        .mount(&server)
        .await;

    let mut config = fast_config(&server.uri(), 3);
    config.retry_base_delay_ms = 300;
    let executor = executor_for(&config);

    let slow_intent = RequestIntent::for_operation(Operation::ListInvoices, None).unwrap();
    let fast_intent = RequestIntent::for_operation(Operation::ListClients, None).unwrap();

    let slow = async {
        let started = Instant::now();
        (executor.execute(&slow_intent).await, started.elapsed())
    };
    let fast_executor = executor.clone();
    let fast = async {
        let started = Instant::now();
        (fast_executor.execute(&fast_intent).await, started.elapsed())
    };

    let ((slow_result, slow_elapsed), (fast_result, fast_elapsed)) = tokio::join!(slow, fast);

    assert_eq!(slow_result.unwrap(), DecodedResponse::Json(json!({"slow": true})));
    assert_eq!(fast_result.unwrap(), DecodedResponse::Json(json!({"fast": true})));
    assert!(slow_elapsed >= Duration::from_millis(900), "slow call took {slow_elapsed:?}");
    assert!(fast_elapsed < Duration::from_millis(300), "fast call took {fast_elapsed:?}");
}

// Table lookups

#[tokio::test]
async fn test_unknown_operation_sends_nothing() {
    let server = MockServer::start().await;

    let error = "issue_refund".parse::<Operation>().unwrap_err();
    assert!(matches!(error, BridgeError::UnknownOperation(ref name) if name == "issue_refund"));
    assert!(server.received_requests().await.unwrap().is_empty());
}
