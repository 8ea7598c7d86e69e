pub mod postgres;

use std::time::Duration;

use async_trait::async_trait;
use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::error::Result;
use crate::models::{
    CareApplication, JobApplication, JobPosting, NewCareApplication, NewFamilyCaregiverApplication,
    NewJobApplication, NewJobPosting, NewUser,
};

pub use postgres::PgStore;

/// Create a PostgreSQL connection pool
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    tracing::info!("Creating database connection pool...");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .idle_timeout(Duration::from_secs(600))
        .max_lifetime(Duration::from_secs(1800))
        .connect(database_url)
        .await?;

    tracing::info!("Database connection pool created successfully");

    Ok(pool)
}

/// Pending-lead counts shown on the admin dashboard
#[derive(Debug, Clone, Copy, serde::Serialize)]
pub struct PendingCounts {
    pub care: i64,
    pub jobs: i64,
    pub family_caregiver: i64,
}

/// Persistence operations the handlers depend on.
///
/// Kept narrow and object-safe so integration tests can drive the full router
/// against an in-memory implementation.
#[async_trait]
pub trait LeadStore: Send + Sync {
    /// Cheap connectivity probe for the health endpoint
    async fn health_check(&self) -> Result<()>;

    /// Insert a user, or return the existing row id for the email
    async fn upsert_user(&self, user: &NewUser) -> Result<i64>;

    async fn insert_job(&self, job: &NewJobPosting) -> Result<JobPosting>;
    async fn active_jobs(&self) -> Result<Vec<JobPosting>>;
    /// Exact-ZIP fallback when geocoding is unavailable
    async fn active_jobs_by_zip(&self, zipcode: &str) -> Result<Vec<JobPosting>>;

    async fn insert_care_application(&self, app: &NewCareApplication) -> Result<i64>;
    async fn insert_job_application(&self, app: &NewJobApplication) -> Result<i64>;
    async fn insert_family_caregiver_application(
        &self,
        app: &NewFamilyCaregiverApplication,
    ) -> Result<i64>;

    async fn list_care_applications(&self) -> Result<Vec<CareApplication>>;
    async fn list_job_applications(&self) -> Result<Vec<JobApplication>>;

    async fn pending_counts(&self) -> Result<PendingCounts>;
}
