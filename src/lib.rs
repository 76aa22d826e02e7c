use std::sync::Arc;

pub mod auth;
pub mod config;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;
pub mod utils;

use services::EventService;
use store::Stores;

/// Shared state handed to every request handler.
#[derive(Clone)]
pub struct AppState {
    pub events: Arc<EventService>,
}

impl AppState {
    pub fn new(stores: &Stores) -> Self {
        Self {
            events: Arc::new(EventService::from_stores(stores)),
        }
    }
}
