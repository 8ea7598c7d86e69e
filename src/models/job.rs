use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::geo::Coordinates;

/// Admin-authored job listing, read by the public search
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct JobPosting {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub zipcode: String,
    pub city: String,
    pub state: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl JobPosting {
    pub fn coordinates(&self) -> Option<Coordinates> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lng)) => Some(Coordinates { lat, lng }),
            _ => None,
        }
    }
}

/// Payload for creating a posting via the admin POST
#[derive(Debug, Clone)]
pub struct NewJobPosting {
    pub title: String,
    pub description: String,
    pub zipcode: String,
    pub city: String,
    pub state: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}
