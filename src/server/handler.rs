// src/server/handler.rs
use crate::health::HealthService;
use hyper::header::{HeaderValue, ALLOW, CONTENT_TYPE};
use hyper::{Body, Method, Request, Response, StatusCode};
use std::sync::Arc;
use tower::Service;
use tracing::Instrument;
use uuid::Uuid;

pub const JSON_CONTENT_TYPE: &str = "application/json; charset=UTF-8";

/// Errors that abort a health response at the transport level.
#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
    #[error("failed to encode health report: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to build response: {0}")]
    Response(#[from] hyper::http::Error),
}

/// Answers a health request with the current report.
#[derive(Clone)]
pub struct HealthHandler {
    service: Arc<HealthService>,
}

impl HealthHandler {
    pub fn new(service: Arc<HealthService>) -> Self {
        Self { service }
    }
}

impl Service<Request<Body>> for HealthHandler {
    type Response = Response<Body>;
    type Error = HandlerError;
    type Future = futures::future::BoxFuture<'static, Result<Self::Response, Self::Error>>;

    fn poll_ready(
        &mut self,
        _cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        std::task::Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let service = self.service.clone();
        let span = tracing::info_span!(
            "health_request",
            request_id = %Uuid::new_v4(),
            method = %req.method(),
        );

        Box::pin(
            async move {
                respond(&service, req.method()).await.map_err(|e| {
                    tracing::error!(%e, "health handler error");
                    e
                })
            }
            .instrument(span),
        )
    }
}

async fn respond(service: &HealthService, method: &Method) -> Result<Response<Body>, HandlerError> {
    if method != Method::GET && method != Method::HEAD {
        let res = Response::builder()
            .status(StatusCode::METHOD_NOT_ALLOWED)
            .header(ALLOW, "GET, HEAD, OPTIONS")
            .body(Body::empty())?;
        return Ok(res);
    }

    let report = service.build_report().await;
    let status = if report.is_healthy() {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };

    let body = serde_json::to_vec(&report)?;
    tracing::info!(
        status = status.as_u16(),
        items = report.items.len(),
        "health report served"
    );

    let body = if method == Method::HEAD {
        Body::empty()
    } else {
        Body::from(body)
    };

    let res = Response::builder()
        .status(status)
        .header(CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE))
        .body(body)?;
    Ok(res)
}
