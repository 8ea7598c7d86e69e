use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Identity captured on first form submission. Later submissions with the same
/// email reuse the row; users are not deduplicated across lead tables.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub name: String,
    pub phone: String,
    pub zipcode: String,
    pub created_at: DateTime<Utc>,
}

/// Fields collected from any of the lead forms
#[derive(Debug, Clone)]
pub struct NewUser {
    pub email: String,
    pub name: String,
    pub phone: String,
    pub zipcode: String,
}
