use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{FromRow, Type};

/// Lead status, stored as text. The server only ever writes `Pending`;
/// later transitions are performed manually by staff.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Type)]
#[sqlx(type_name = "text", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ApplicationStatus {
    Pending,
    Contacted,
    Reviewed,
    Closed,
}

/// Care request submitted by a prospective client or their family
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct CareApplication {
    pub id: i64,
    pub user_id: i64,
    pub service_type: String,
    pub care_recipient: String,
    pub urgency: String,
    pub notes: String,
    pub status: ApplicationStatus,
    pub created_at: DateTime<Utc>,
}

/// Caregiver job application
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobApplication {
    pub id: i64,
    pub user_id: i64,
    pub position: String,
    pub experience_years: String,
    pub certifications: String,
    pub availability: String,
    pub status: ApplicationStatus,
    pub created_at: DateTime<Utc>,
}

/// Insert payloads built by the form handlers after validation
#[derive(Debug, Clone)]
pub struct NewCareApplication {
    pub user_id: i64,
    pub service_type: String,
    pub care_recipient: String,
    pub urgency: String,
    pub notes: String,
}

#[derive(Debug, Clone)]
pub struct NewJobApplication {
    pub user_id: i64,
    pub position: String,
    pub experience_years: String,
    pub certifications: String,
    pub availability: String,
}

#[derive(Debug, Clone)]
pub struct NewFamilyCaregiverApplication {
    pub user_id: i64,
    pub relationship: String,
    pub recipient_medicaid: bool,
    pub hours_per_week: String,
    pub notes: String,
}

/// Family-caregiver-program eligibility application
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct FamilyCaregiverApplication {
    pub id: i64,
    pub user_id: i64,
    pub relationship: String,
    pub recipient_medicaid: bool,
    pub hours_per_week: String,
    pub notes: String,
    pub status: ApplicationStatus,
    pub created_at: DateTime<Utc>,
}
