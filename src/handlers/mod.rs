use axum::response::Response;
use serde::Serialize;

use crate::utils::response::success;

pub mod events;

pub use events::{add_review, get_all_events, get_event, save_event};

#[derive(Serialize)]
struct HealthPayload {
    status: &'static str,
    service: &'static str,
}

pub async fn health_check() -> Response {
    let payload = HealthPayload {
        status: "ok",
        service: "capstone-events",
    };

    success(payload, "Health check successful")
}
