pub mod builder;
pub mod handler;
pub mod router;

pub use builder::ServerBuilder;
pub use handler::{HandlerError, HealthHandler, JSON_CONTENT_TYPE};
pub use router::{cors_layer, HealthRouter, HEALTH_PATH};
