// src/server/router.rs
use super::handler::{HandlerError, HealthHandler};
use crate::health::HealthService;
use hyper::{Body, Method, Request, Response, StatusCode};
use std::sync::Arc;
use tower::{Service, ServiceBuilder, ServiceExt};
use tower_http::cors::{Any, Cors, CorsLayer};

pub const HEALTH_PATH: &str = "/health";

/// Preflight policy for the health route: any origin may `GET` it.
pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET])
}

/// Routes `/health` to the CORS-wrapped handler; everything else is a 404.
#[derive(Clone)]
pub struct HealthRouter {
    health: Cors<HealthHandler>,
}

impl HealthRouter {
    pub fn new(service: Arc<HealthService>) -> Self {
        let health = ServiceBuilder::new()
            .layer(cors_layer())
            .service(HealthHandler::new(service));
        Self { health }
    }
}

impl Service<Request<Body>> for HealthRouter {
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
        if req.uri().path() == HEALTH_PATH {
            Box::pin(self.health.clone().oneshot(req))
        } else {
            tracing::debug!(path = %req.uri().path(), "no route");
            Box::pin(async {
                let res = Response::builder()
                    .status(StatusCode::NOT_FOUND)
                    .body(Body::from("Not Found"))?;
                Ok::<_, HandlerError>(res)
            })
        }
    }
}
