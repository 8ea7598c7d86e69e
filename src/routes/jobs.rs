use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::constants::{DEFAULT_SEARCH_RADIUS_MILES, ERR_MISSING_FIELDS};
use crate::error::{AppError, Result};
use crate::geo::{self, Coordinates};
use crate::models::NewJobPosting;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct JobSearchParams {
    pub zip: Option<String>,
    pub lat: Option<f64>,
    pub lng: Option<f64>,
    /// Search radius in miles
    pub radius: Option<f64>,
}

/// Search active job postings grouped by city
///
/// The search origin is an explicit lat/lng pair, or a ZIP code resolved
/// through the geocoder. Geocoding failure falls back to exact ZIP matching.
/// Groups are sorted ascending by straight-line distance from the origin;
/// groups without resolvable coordinates sort last.
pub async fn search_jobs(
    State(state): State<AppState>,
    Query(params): Query<JobSearchParams>,
) -> Result<Json<Value>> {
    let zip = params.zip.as_deref().map(str::trim).unwrap_or("");

    let origin = match (params.lat, params.lng) {
        (Some(lat), Some(lng)) => Some(Coordinates { lat, lng }),
        _ if !zip.is_empty() => match state.geocoder.zip_to_coordinates(zip).await {
            Ok(coords) => coords,
            Err(e) => {
                tracing::warn!("Geocoding failed for ZIP {}: {}, using exact match", zip, e);
                None
            }
        },
        _ => None,
    };

    // Without an origin a ZIP query degrades to exact matching
    let jobs = if origin.is_none() && !zip.is_empty() {
        state.store.active_jobs_by_zip(zip).await?
    } else {
        state.store.active_jobs().await?
    };

    let jobs = match origin {
        Some(origin) => {
            let radius_km =
                geo::miles_to_km(params.radius.unwrap_or(DEFAULT_SEARCH_RADIUS_MILES));
            // Postings without coordinates are kept; they surface in the
            // undefined-distance groups at the end
            jobs.into_iter()
                .filter(|job| match job.coordinates() {
                    Some(c) => geo::haversine_km(origin, c) <= radius_km,
                    None => true,
                })
                .collect()
        }
        None => jobs,
    };

    let groups = geo::group_by_city(jobs, origin);

    Ok(Json(json!({ "success": true, "groups": groups })))
}

#[derive(Debug, Deserialize)]
pub struct CreateJobRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub zipcode: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub state: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

/// Create a job posting (reached from the admin UI)
///
/// Missing required fields are a hard 400, unlike the lead forms which report
/// failures inline.
pub async fn create_job(
    State(state): State<AppState>,
    Json(payload): Json<CreateJobRequest>,
) -> Result<Json<Value>> {
    let required = [
        &payload.title,
        &payload.description,
        &payload.zipcode,
        &payload.city,
        &payload.state,
    ];
    if required.iter().any(|f| f.trim().is_empty()) {
        return Err(AppError::InvalidInput(ERR_MISSING_FIELDS.to_string()));
    }

    let job = state
        .store
        .insert_job(&NewJobPosting {
            title: payload.title.trim().to_string(),
            description: payload.description.trim().to_string(),
            zipcode: payload.zipcode.trim().to_string(),
            city: payload.city.trim().to_string(),
            state: payload.state.trim().to_uppercase(),
            latitude: payload.latitude,
            longitude: payload.longitude,
        })
        .await?;

    tracing::info!("Job posting {} created: {}", job.id, job.title);

    Ok(Json(json!({ "success": true, "job": job })))
}
