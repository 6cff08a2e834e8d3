// tests/health_endpoint_tests.rs
use anyhow::anyhow;
use async_trait::async_trait;
use health_report::health::{
    CheckOutcome, HealthCheckItem, HealthChecker, HealthService, HealthStatus, Messages,
};
use health_report::identity::{BuildInfo, ProcessInfo};
use health_report::server::{HealthRouter, JSON_CONTENT_TYPE};
use hyper::{header, Body, Method, Request, Response, StatusCode};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tower::ServiceExt;

struct StubChecker {
    name: &'static str,
    healthy: bool,
    error: Option<&'static str>,
    messages: Vec<&'static str>,
    calls: AtomicUsize,
}

impl StubChecker {
    fn new(name: &'static str, healthy: bool) -> Self {
        Self {
            name,
            healthy,
            error: None,
            messages: Vec::new(),
            calls: AtomicUsize::new(0),
        }
    }

    fn failing(name: &'static str, error: &'static str) -> Self {
        Self {
            error: Some(error),
            ..Self::new(name, false)
        }
    }

    fn with_messages(mut self, messages: Vec<&'static str>) -> Self {
        self.messages = messages;
        self
    }
}

#[async_trait]
impl HealthChecker for StubChecker {
    fn name(&self) -> &str {
        self.name
    }

    async fn check(&self) -> CheckOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let error = self.error.map(|e| anyhow!(e));
        let outcome = if self.healthy {
            CheckOutcome {
                error,
                ..CheckOutcome::healthy()
            }
        } else {
            CheckOutcome::unhealthy(error)
        };
        outcome.with_messages(self.messages.clone())
    }
}

struct FixedProcess {
    hostname: Option<&'static str>,
}

impl ProcessInfo for FixedProcess {
    fn hostname(&self) -> Option<String> {
        self.hostname.map(String::from)
    }

    fn active_tasks(&self) -> usize {
        7
    }
}

fn service(checkers: Vec<Arc<dyn HealthChecker>>) -> HealthService {
    HealthService::new(checkers, &BuildInfo::new("1.0", "checksum"))
        .with_process_info(Arc::new(FixedProcess { hostname: Some("test-host") }))
}

fn router(checkers: Vec<Arc<dyn HealthChecker>>) -> HealthRouter {
    service(checkers).into_router()
}

async fn send(router: HealthRouter, method: Method, path: &str) -> Response<Body> {
    let req = Request::builder()
        .method(method)
        .uri(path)
        .header(header::ORIGIN, "bar.com")
        .body(Body::empty())
        .unwrap();
    router.oneshot(req).await.unwrap()
}

async fn read_body(res: Response<Body>) -> Value {
    let bytes = hyper::body::to_bytes(res.into_body()).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn items(body: &Value) -> Vec<HealthCheckItem> {
    serde_json::from_value(body["items"].clone()).unwrap()
}

#[tokio::test]
async fn healthy_checker_returns_ok() {
    let checker = StubChecker::new("cache", true).with_messages(vec!["foo: bar"]);
    let res = send(router(vec![Arc::new(checker)]), Method::GET, "/health").await;

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()[header::CONTENT_TYPE], JSON_CONTENT_TYPE);

    let body = read_body(res).await;
    assert_eq!(body["overallHealth"], "Healthy");
    assert_eq!(body["version"], "1.0");
    assert_eq!(body["checksum"], "checksum");
    assert_eq!(body["hostname"], "test-host");
    assert_eq!(body["activeTaskCount"], 7);
    assert_eq!(body["items"][0]["messages"], json!(["foo: bar"]));
    assert_eq!(
        items(&body),
        vec![HealthCheckItem {
            name: "cache".to_string(),
            status: HealthStatus::Healthy,
            error: String::new(),
            messages: Messages::from(vec!["foo: bar"]),
        }]
    );
}

#[tokio::test]
async fn failing_checker_returns_internal_server_error() {
    let checker = StubChecker::failing("db", "I failed");
    let res = send(router(vec![Arc::new(checker)]), Method::GET, "/health").await;

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = read_body(res).await;
    assert_eq!(body["overallHealth"], "Unhealthy");
    assert_eq!(body["items"][0]["error"], "I failed");
    assert_eq!(
        items(&body),
        vec![HealthCheckItem {
            name: "db".to_string(),
            status: HealthStatus::Unhealthy,
            error: "I failed".to_string(),
            messages: Messages::new(),
        }]
    );
}

#[tokio::test]
async fn body_has_contract_fields_and_no_internal_flag() {
    let res = send(
        router(vec![Arc::new(StubChecker::new("a", true))]),
        Method::GET,
        "/health",
    )
    .await;
    let value = read_body(res).await;
    let object = value.as_object().unwrap();

    let mut keys: Vec<&str> = object.keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(
        keys,
        [
            "activeTaskCount",
            "checksum",
            "hostname",
            "items",
            "overallHealth",
            "version"
        ]
    );
}

#[tokio::test]
async fn errors_stay_with_their_own_checker() {
    let report = service(vec![
        Arc::new(StubChecker::failing("first", "first broke")),
        Arc::new(StubChecker::new("second", true)),
        Arc::new(StubChecker::new("third", false)),
        Arc::new(StubChecker::failing("fourth", "fourth broke")),
    ])
    .build_report()
    .await;

    let errors: Vec<&str> = report.items.iter().map(|i| i.error.as_str()).collect();
    assert_eq!(errors, ["first broke", "", "", "fourth broke"]);
    assert!(!report.is_healthy());
}

#[tokio::test]
async fn healthy_checker_may_still_carry_an_error() {
    let checker = StubChecker {
        error: Some("degraded"),
        ..StubChecker::new("warm", true)
    };
    let report = service(vec![Arc::new(checker)]).build_report().await;

    assert!(report.is_healthy());
    assert_eq!(report.items[0].error, "degraded");
}

#[tokio::test]
async fn checkers_run_lazily_once_per_request() {
    let checker = Arc::new(StubChecker::new("lazy", true));
    let router = router(vec![checker.clone()]);
    assert_eq!(checker.calls.load(Ordering::SeqCst), 0);

    send(router.clone(), Method::GET, "/health").await;
    send(router, Method::GET, "/health").await;
    assert_eq!(checker.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn repeated_requests_are_identical() {
    let router = router(vec![
        Arc::new(StubChecker::new("a", true).with_messages(vec!["x: 1"])),
        Arc::new(StubChecker::failing("b", "nope")),
    ]);

    let first = hyper::body::to_bytes(send(router.clone(), Method::GET, "/health").await.into_body())
        .await
        .unwrap();
    let second = hyper::body::to_bytes(send(router, Method::GET, "/health").await.into_body())
        .await
        .unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn unresolved_hostname_is_empty() {
    let service = HealthService::new(vec![], &BuildInfo::new("1.0", "checksum"))
        .with_process_info(Arc::new(FixedProcess { hostname: None }));
    let report = service.build_report().await;

    assert_eq!(report.hostname, "");
    assert!(report.is_healthy());
    assert!(report.items.is_empty());
}

#[tokio::test]
async fn preflight_allows_any_origin() {
    let res = send(router(vec![]), Method::OPTIONS, "/health").await;

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
    assert_eq!(res.headers()[header::ACCESS_CONTROL_ALLOW_METHODS], "GET");
}

#[tokio::test]
async fn preflight_does_not_run_checkers() {
    let checker = Arc::new(StubChecker::new("quiet", true));
    send(router(vec![checker.clone()]), Method::OPTIONS, "/health").await;
    assert_eq!(checker.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn cross_origin_get_carries_allow_origin() {
    let res = send(router(vec![]), Method::GET, "/health").await;

    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
}

#[tokio::test]
async fn head_returns_status_without_body() {
    let res = send(
        router(vec![Arc::new(StubChecker::new("down", false))]),
        Method::HEAD,
        "/health",
    )
    .await;

    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let bytes = hyper::body::to_bytes(res.into_body()).await.unwrap();
    assert!(bytes.is_empty());
}

#[tokio::test]
async fn other_methods_are_rejected() {
    let res = send(router(vec![]), Method::POST, "/health").await;

    assert_eq!(res.status(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(res.headers()[header::ALLOW], "GET, HEAD, OPTIONS");
}

#[tokio::test]
async fn only_health_route_is_served() {
    let res = send(router(vec![]), Method::GET, "/status").await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}
