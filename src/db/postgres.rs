use async_trait::async_trait;
use sqlx::PgPool;

use crate::db::{LeadStore, PendingCounts};
use crate::error::Result;
use crate::models::{
    CareApplication, JobApplication, JobPosting, NewCareApplication, NewFamilyCaregiverApplication,
    NewJobApplication, NewJobPosting, NewUser,
};

const JOB_COLUMNS: &str =
    "id, title, description, zipcode, city, state, latitude, longitude, active, created_at";

/// sqlx/Postgres implementation of [`LeadStore`]
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LeadStore for PgStore {
    async fn health_check(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    async fn upsert_user(&self, user: &NewUser) -> Result<i64> {
        // First submission creates the row; later submissions with the same
        // email refresh contact details and reuse the id
        let (id,): (i64,) = sqlx::query_as(
            "INSERT INTO users (email, name, phone, zipcode)
             VALUES ($1, $2, $3, $4)
             ON CONFLICT (email) DO UPDATE
                SET name = EXCLUDED.name,
                    phone = EXCLUDED.phone,
                    zipcode = EXCLUDED.zipcode
             RETURNING id",
        )
        .bind(&user.email)
        .bind(&user.name)
        .bind(&user.phone)
        .bind(&user.zipcode)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    async fn insert_job(&self, job: &NewJobPosting) -> Result<JobPosting> {
        let row = sqlx::query_as::<_, JobPosting>(&format!(
            "INSERT INTO job_postings (title, description, zipcode, city, state, latitude, longitude)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {JOB_COLUMNS}"
        ))
        .bind(&job.title)
        .bind(&job.description)
        .bind(&job.zipcode)
        .bind(&job.city)
        .bind(&job.state)
        .bind(job.latitude)
        .bind(job.longitude)
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    async fn active_jobs(&self) -> Result<Vec<JobPosting>> {
        let rows = sqlx::query_as::<_, JobPosting>(&format!(
            "SELECT {JOB_COLUMNS} FROM job_postings WHERE active ORDER BY created_at DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn active_jobs_by_zip(&self, zipcode: &str) -> Result<Vec<JobPosting>> {
        let rows = sqlx::query_as::<_, JobPosting>(&format!(
            "SELECT {JOB_COLUMNS} FROM job_postings
             WHERE active AND zipcode = $1
             ORDER BY created_at DESC"
        ))
        .bind(zipcode)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn insert_care_application(&self, app: &NewCareApplication) -> Result<i64> {
        let (id,): (i64,) = sqlx::query_as(
            "INSERT INTO care_applications (user_id, service_type, care_recipient, urgency, notes)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id",
        )
        .bind(app.user_id)
        .bind(&app.service_type)
        .bind(&app.care_recipient)
        .bind(&app.urgency)
        .bind(&app.notes)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    async fn insert_job_application(&self, app: &NewJobApplication) -> Result<i64> {
        let (id,): (i64,) = sqlx::query_as(
            "INSERT INTO job_applications (user_id, position, experience_years, certifications, availability)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id",
        )
        .bind(app.user_id)
        .bind(&app.position)
        .bind(&app.experience_years)
        .bind(&app.certifications)
        .bind(&app.availability)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    async fn insert_family_caregiver_application(
        &self,
        app: &NewFamilyCaregiverApplication,
    ) -> Result<i64> {
        let (id,): (i64,) = sqlx::query_as(
            "INSERT INTO family_caregiver_applications
                (user_id, relationship, recipient_medicaid, hours_per_week, notes)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id",
        )
        .bind(app.user_id)
        .bind(&app.relationship)
        .bind(app.recipient_medicaid)
        .bind(&app.hours_per_week)
        .bind(&app.notes)
        .fetch_one(&self.pool)
        .await?;

        Ok(id)
    }

    async fn list_care_applications(&self) -> Result<Vec<CareApplication>> {
        let rows = sqlx::query_as::<_, CareApplication>(
            "SELECT id, user_id, service_type, care_recipient, urgency, notes, status, created_at
             FROM care_applications ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn list_job_applications(&self) -> Result<Vec<JobApplication>> {
        let rows = sqlx::query_as::<_, JobApplication>(
            "SELECT id, user_id, position, experience_years, certifications, availability, status, created_at
             FROM job_applications ORDER BY created_at DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }

    async fn pending_counts(&self) -> Result<PendingCounts> {
        let (care, jobs, family_caregiver): (i64, i64, i64) = sqlx::query_as(
            "SELECT
                (SELECT COUNT(*) FROM care_applications WHERE status = 'pending'),
                (SELECT COUNT(*) FROM job_applications WHERE status = 'pending'),
                (SELECT COUNT(*) FROM family_caregiver_applications WHERE status = 'pending')",
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(PendingCounts {
            care,
            jobs,
            family_caregiver,
        })
    }
}
