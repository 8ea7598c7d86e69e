//! Home-Care Leads Server Library
//!
//! This module exports the core types and functions for testing and reuse.

pub mod clients;
pub mod config;
pub mod constants;
pub mod db;
pub mod error;
pub mod geo;
pub mod models;
pub mod routes;
pub mod security;

pub use config::Config;
pub use error::{AppError, Result};

use std::sync::Arc;

use clients::{AuthProvider, CalendarClient, ChatAssistant, Geocoder};
use db::LeadStore;

/// Application state shared across all handlers.
///
/// Outbound services sit behind capability traits so the integration tests
/// can run the full router against mocks.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub store: Arc<dyn LeadStore>,
    pub geocoder: Arc<dyn Geocoder>,
    pub calendar: Arc<dyn CalendarClient>,
    pub auth: Arc<dyn AuthProvider>,
    pub assistant: Arc<dyn ChatAssistant>,
}
