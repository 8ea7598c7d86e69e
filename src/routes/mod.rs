pub mod admin;
pub mod applications;
pub mod chat;
pub mod health;
pub mod jobs;
pub mod schedule;
pub mod validation;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use crate::AppState;

pub use admin::{admin_dashboard, admin_gate, admin_login, admin_login_prompt, admin_logout};
pub use applications::{
    list_care_applications, list_job_applications, submit_care_application,
    submit_family_caregiver_application, submit_job_application,
};
pub use chat::chat;
pub use health::health_check;
pub use jobs::{create_job, search_jobs};
pub use schedule::{available_slots, schedule_consultation};

/// Assemble the application router. Shared with the integration tests so they
/// exercise the exact production routing and middleware.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/api/jobs", get(search_jobs).post(create_job))
        .route(
            "/api/applications/care",
            get(list_care_applications).post(submit_care_application),
        )
        .route(
            "/api/applications/jobs",
            get(list_job_applications).post(submit_job_application),
        )
        .route(
            "/api/applications/family-caregiver",
            post(submit_family_caregiver_application),
        )
        .route("/api/available-slots", post(available_slots))
        .route("/api/schedule-consultation", post(schedule_consultation))
        .route("/api/chat", post(chat))
        .route("/api/admin/login", post(admin_login))
        .route("/api/admin/logout", post(admin_logout))
        .route("/admin", get(admin_dashboard))
        .route("/admin/login", get(admin_login_prompt))
        .layer(middleware::from_fn_with_state(state.clone(), admin_gate))
        .with_state(state)
}
