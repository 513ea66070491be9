//! Integration tests for the async call path.
//!
//! These tests use wiremock to mock the MediMate API and verify request
//! construction and response mapping end to end.

use std::sync::Arc;
use std::time::Duration;

use medimate::{
    ClientConfig, CulturalContext, HalalStatus, HalalValidationRequest, MalaysianState, MediMate,
    MediMateError, RequestError, SupportedLanguage, TranslationRequest,
};
use serde_json::{Value, json};
use tracing::Instrument;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const API_KEY: &str = "mk_test_0123456789";

fn client_for(server: &MockServer, cultural: CulturalContext) -> MediMate {
    let config = ClientConfig::builder(API_KEY)
        .base_url(format!("{}/v1", server.uri()))
        .cultural_context(cultural)
        .build()
        .unwrap();
    MediMate::with_config(config).unwrap()
}

fn ok(data: Value) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({"success": true, "data": data}))
}

#[tokio::test]
async fn test_success_returns_data_payload() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/health"))
        .respond_with(ok(json!({"x": 1})))
        .mount(&server)
        .await;

    let client = client_for(&server, CulturalContext::default());
    let data = client.health().send().await.unwrap();
    assert_eq!(data, json!({"x": 1}));
}

#[tokio::test]
async fn test_envelope_keeps_meta_and_request_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/context"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": true,
            "data": {"state": "KUL"},
            "meta": {"rate_limit_remaining": 99},
            "request_id": "req_abc"
        })))
        .mount(&server)
        .await;

    let client = client_for(&server, CulturalContext::default());
    let envelope = client.context().send_envelope().await.unwrap();
    assert!(envelope.success);
    assert_eq!(envelope.request_id.as_deref(), Some("req_abc"));
    assert_eq!(envelope.meta.unwrap()["rate_limit_remaining"], 99);
    assert_eq!(envelope.data.unwrap()["state"], "KUL");
}

#[tokio::test]
async fn test_rate_limit_with_retry_after() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/health"))
        .respond_with(ResponseTemplate::new(429).insert_header("Retry-After", "120"))
        .mount(&server)
        .await;

    let client = client_for(&server, CulturalContext::default());
    let err = client.health().send().await.unwrap_err();
    match &err {
        MediMateError::RateLimit(e) => assert_eq!(e.retry_after(), Duration::from_secs(120)),
        other => panic!("expected rate limit error, got {other:?}"),
    }
    assert_eq!(err.code(), "RATE_LIMIT_ERROR");
    assert_eq!(err.status_code(), Some(429));
}

#[tokio::test]
async fn test_rate_limit_defaults_to_sixty_seconds() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let client = client_for(&server, CulturalContext::default());
    let err = client.health().send().await.unwrap_err();
    assert_eq!(err.retry_after(), Some(Duration::from_secs(60)));
}

#[tokio::test]
async fn test_unauthorized_is_auth_error_regardless_of_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/health"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({"success": true, "data": {}})))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server, CulturalContext::default());
    let err = client.health().send().await.unwrap_err();
    assert!(matches!(err, MediMateError::Auth(_)));
    assert_eq!(err.status_code(), Some(401));
    assert!(!err.is_retryable());
}

#[tokio::test]
async fn test_server_error_wraps_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/health"))
        .respond_with(ResponseTemplate::new(500).set_body_string("database unavailable"))
        .mount(&server)
        .await;

    let client = client_for(&server, CulturalContext::default());
    let err = client.health().send().await.unwrap_err();
    match &err {
        MediMateError::Request(RequestError::HttpStatus { status, body, .. }) => {
            assert_eq!(*status, 500);
            assert_eq!(body, "database unavailable");
        }
        other => panic!("expected HTTP status error, got {other:?}"),
    }
    assert_eq!(err.code(), "REQUEST_ERROR");
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_error_envelope_on_not_found_keeps_cultural_message() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/patients/pat_404"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "success": false,
            "error": {
                "code": "PATIENT_NOT_FOUND",
                "message": "Patient not found",
                "cultural_message": {"ms": "Pesakit tidak dijumpai"}
            }
        })))
        .mount(&server)
        .await;

    let client = client_for(&server, CulturalContext::default());
    let err = client.patients().get("pat_404").send().await.unwrap_err();
    assert_eq!(err.code(), "PATIENT_NOT_FOUND");
    assert_eq!(err.status_code(), Some(404));
    assert_eq!(
        err.cultural_message().unwrap()["ms"],
        "Pesakit tidak dijumpai"
    );
}

#[tokio::test]
async fn test_unsuccessful_validation_envelope() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/cultural/translate"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "success": false,
            "error": {
                "code": "VALIDATION_ERROR",
                "message": "Unsupported medical domain",
                "details": {"context.medical_domain": "unknown"}
            }
        })))
        .mount(&server)
        .await;

    let client = client_for(&server, CulturalContext::default());
    let err = client
        .cultural()
        .translate(&TranslationRequest::new("Take with food", SupportedLanguage::Malay))
        .send()
        .await
        .unwrap_err();
    assert!(matches!(err, MediMateError::Validation(_)));
    assert_eq!(err.code(), "VALIDATION_ERROR");
    assert_eq!(err.details().unwrap()["context.medical_domain"], "unknown");
}

#[tokio::test]
async fn test_cultural_headers_present_and_halal_absent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/health"))
        .and(header("Authorization", "Bearer mk_test_0123456789"))
        .and(header("Content-Type", "application/json"))
        .and(header("X-SDK-Language", "rust"))
        .and(header("X-Cultural-Context", "Malaysian Healthcare"))
        .and(header("X-Malaysian-State", "KUL"))
        .and(header("X-Preferred-Language", "ms"))
        .and(header("X-Prayer-Time-Aware", "true"))
        .respond_with(ok(json!({"status": "healthy"})))
        .expect(2)
        .mount(&server)
        .await;

    let client = client_for(
        &server,
        CulturalContext::none()
            .state(MalaysianState::KualaLumpur)
            .language(SupportedLanguage::Malay)
            .prayer_time_aware(true),
    );
    client.health().send().await.unwrap();
    client.health().send().await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 2);
    for request in &requests {
        assert!(request.headers.get("x-halal-requirements").is_none());
        let agent = request.headers.get("user-agent").unwrap().to_str().unwrap();
        assert!(agent.starts_with("MediMate-Malaysia-SDK-Rust/"));
    }
}

#[tokio::test]
async fn test_repeated_get_is_idempotent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/cultural/prayer-times/KUL"))
        .and(query_param("date", "2024-03-15"))
        .respond_with(ok(json!({
            "state_code": "KUL",
            "state_name": "Kuala Lumpur",
            "date": "2024-03-15",
            "prayer_times": {"fajr": "05:58", "dhuhr": "13:15", "asr": "16:24", "maghrib": "19:22", "isha": "20:33"}
        })))
        .mount(&server)
        .await;

    let client = client_for(&server, CulturalContext::default());
    let date = chrono::NaiveDate::from_ymd_opt(2024, 3, 15);
    let first = client
        .cultural()
        .prayer_times(MalaysianState::KualaLumpur, date)
        .send()
        .await
        .unwrap();
    let second = client
        .cultural()
        .prayer_times(MalaysianState::KualaLumpur, date)
        .send()
        .await
        .unwrap();
    assert_eq!(first, second);
    assert_eq!(first.prayer_times["maghrib"], "19:22");
}

#[tokio::test]
async fn test_halal_validation_sends_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/cultural/halal/validate-medication"))
        .and(body_json(json!({
            "medication_name": "Paracetamol 500mg",
            "manufacturer": "Duopharma"
        })))
        .respond_with(ok(json!({
            "medication_name": "Paracetamol 500mg",
            "halal_status": "halal",
            "confidence": "high",
            "certification": {"certified": true, "authority": "JAKIM"}
        })))
        .mount(&server)
        .await;

    let client = client_for(&server, CulturalContext::default());
    let verdict = client
        .cultural()
        .validate_medication(&HalalValidationRequest::new("Paracetamol 500mg").manufacturer("Duopharma"))
        .send()
        .await
        .unwrap();
    assert_eq!(verdict.halal_status, HalalStatus::Halal);
    assert!(verdict.is_halal());
    assert_eq!(
        verdict.certification.unwrap().authority.as_deref(),
        Some("JAKIM")
    );
}

#[tokio::test]
async fn test_cultural_events_query() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/cultural/calendar/events"))
        .and(query_param("year", "2025"))
        .and(query_param("state", "PNG"))
        .respond_with(ok(json!([{"name": "Thaipusam"}, {"name": "Chinese New Year"}])))
        .mount(&server)
        .await;

    let client = client_for(&server, CulturalContext::default());
    let events = client
        .cultural()
        .cultural_events(2025, Some(MalaysianState::Penang), None)
        .send()
        .await
        .unwrap();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0]["name"], "Thaipusam");
}

#[tokio::test]
async fn test_local_validation_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ok(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let client = client_for(&server, CulturalContext::default());
    let err = client
        .cultural()
        .validate_medication(&HalalValidationRequest::new("  "))
        .send()
        .await
        .unwrap_err();
    assert!(matches!(err, MediMateError::Validation(_)));
    assert_eq!(err.details().unwrap()[0]["field"], "medication_name");
}

#[tokio::test]
async fn test_timeout_maps_to_timeout_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ok(json!({})).set_delay(Duration::from_millis(500)))
        .mount(&server)
        .await;

    let config = ClientConfig::builder(API_KEY)
        .base_url(server.uri())
        .timeout(Duration::from_millis(50))
        .build()
        .unwrap();
    let client = MediMate::with_config(config).unwrap();
    let err = client.health().send().await.unwrap_err();
    assert!(matches!(
        err,
        MediMateError::Request(RequestError::Timeout { duration_ms: 50 })
    ));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_async_transport_lifecycle() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ok(json!({})))
        .mount(&server)
        .await;

    let mut client = client_for(&server, CulturalContext::default());
    assert!(!client.has_async_transport());
    client.health().send().await.unwrap();
    assert!(client.has_async_transport());

    client.close_async();
    assert!(!client.has_async_transport());

    client.health().send().await.unwrap();
    assert!(client.has_async_transport());
    client.close();
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
#[tracing_test::traced_test]
async fn test_concurrent_first_use_creates_one_transport() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ok(json!({"ok": true})))
        .expect(16)
        .mount(&server)
        .await;

    let client = Arc::new(client_for(&server, CulturalContext::default()));
    let handles: Vec<_> = (0..16)
        .map(|_| {
            let client = Arc::clone(&client);
            tokio::spawn(async move { client.health().send().await }.in_current_span())
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.await.unwrap().unwrap(), json!({"ok": true}));
    }
    assert!(client.has_async_transport());

    logs_assert(|lines: &[&str]| {
        match lines
            .iter()
            .filter(|line| line.contains("Creating async transport"))
            .count()
        {
            1 => Ok(()),
            n => Err(format!("expected one async transport, created {n}")),
        }
    });
}

#[tokio::test]
async fn test_session_releases_transport_on_error_path() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    async fn check(client: &mut MediMate) -> medimate::Result<Value> {
        let session = client.session();
        let health = session.health().send().await?;
        Ok(health)
    }

    let mut client = client_for(&server, CulturalContext::default());
    let err = check(&mut client).await.unwrap_err();
    assert_eq!(err.status_code(), Some(503));
    assert!(!client.has_async_transport());
}

#[tokio::test]
#[tracing_test::traced_test]
async fn test_prayer_time_header_is_logged() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ok(json!({"status": "healthy"})).insert_header("X-Prayer-Time", "asr"))
        .mount(&server)
        .await;

    let client = client_for(&server, CulturalContext::default());
    let data = client.health().send().await.unwrap();
    assert_eq!(data["status"], "healthy");
    assert!(logs_contain("Current prayer time"));
    assert!(logs_contain("asr"));
}
