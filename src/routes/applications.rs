use axum::{extract::State, Json};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::Result;
use crate::models::{
    NewCareApplication, NewFamilyCaregiverApplication, NewJobApplication, NewUser,
};
use crate::routes::validation::{require_fields, validate_contact, SubmissionResult};
use crate::AppState;

// Every form shares the same pipeline: required-field checks, contact format
// checks, then user upsert followed by the lead insert. Validation failures
// come back as {success:false, message} with no database write. A repeated
// submission creates a duplicate lead row; there are no idempotency keys.

#[derive(Debug, Deserialize)]
pub struct CareFormRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub zipcode: String,
    #[serde(default)]
    pub service_type: String,
    #[serde(default)]
    pub care_recipient: String,
    #[serde(default)]
    pub urgency: String,
    #[serde(default)]
    pub notes: String,
}

/// Care request form
pub async fn submit_care_application(
    State(state): State<AppState>,
    Json(form): Json<CareFormRequest>,
) -> Result<Json<SubmissionResult>> {
    if let Some(fail) = require_fields(&[
        ("name", &form.name),
        ("email", &form.email),
        ("phone", &form.phone),
        ("service_type", &form.service_type),
    ]) {
        return Ok(Json(fail));
    }
    if let Some(fail) = validate_contact(&form.email, &form.phone) {
        return Ok(Json(fail));
    }

    let user_id = state
        .store
        .upsert_user(&NewUser {
            email: form.email.trim().to_lowercase(),
            name: form.name.trim().to_string(),
            phone: form.phone.trim().to_string(),
            zipcode: form.zipcode.trim().to_string(),
        })
        .await?;

    let id = state
        .store
        .insert_care_application(&NewCareApplication {
            user_id,
            service_type: form.service_type.trim().to_string(),
            care_recipient: form.care_recipient.trim().to_string(),
            urgency: form.urgency.trim().to_string(),
            notes: form.notes.trim().to_string(),
        })
        .await?;

    tracing::info!("Care application {} received", id);

    Ok(Json(SubmissionResult::ok(
        "Thank you! Our care team will contact you within one business day.",
    )))
}

#[derive(Debug, Deserialize)]
pub struct JobFormRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub zipcode: String,
    #[serde(default)]
    pub position: String,
    #[serde(default)]
    pub experience_years: String,
    #[serde(default)]
    pub certifications: String,
    #[serde(default)]
    pub availability: String,
}

/// Caregiver job application form
pub async fn submit_job_application(
    State(state): State<AppState>,
    Json(form): Json<JobFormRequest>,
) -> Result<Json<SubmissionResult>> {
    if let Some(fail) = require_fields(&[
        ("name", &form.name),
        ("email", &form.email),
        ("phone", &form.phone),
        ("position", &form.position),
    ]) {
        return Ok(Json(fail));
    }
    if let Some(fail) = validate_contact(&form.email, &form.phone) {
        return Ok(Json(fail));
    }

    let user_id = state
        .store
        .upsert_user(&NewUser {
            email: form.email.trim().to_lowercase(),
            name: form.name.trim().to_string(),
            phone: form.phone.trim().to_string(),
            zipcode: form.zipcode.trim().to_string(),
        })
        .await?;

    let id = state
        .store
        .insert_job_application(&NewJobApplication {
            user_id,
            position: form.position.trim().to_string(),
            experience_years: form.experience_years.trim().to_string(),
            certifications: form.certifications.trim().to_string(),
            availability: form.availability.trim().to_string(),
        })
        .await?;

    tracing::info!("Job application {} received", id);

    Ok(Json(SubmissionResult::ok(
        "Application received! Our hiring team will be in touch soon.",
    )))
}

#[derive(Debug, Deserialize)]
pub struct FamilyCaregiverFormRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub zipcode: String,
    #[serde(default)]
    pub relationship: String,
    #[serde(default)]
    pub recipient_medicaid: bool,
    #[serde(default)]
    pub hours_per_week: String,
    #[serde(default)]
    pub notes: String,
}

/// Family-caregiver-program eligibility form
pub async fn submit_family_caregiver_application(
    State(state): State<AppState>,
    Json(form): Json<FamilyCaregiverFormRequest>,
) -> Result<Json<SubmissionResult>> {
    if let Some(fail) = require_fields(&[
        ("name", &form.name),
        ("email", &form.email),
        ("phone", &form.phone),
        ("relationship", &form.relationship),
    ]) {
        return Ok(Json(fail));
    }
    if let Some(fail) = validate_contact(&form.email, &form.phone) {
        return Ok(Json(fail));
    }

    let user_id = state
        .store
        .upsert_user(&NewUser {
            email: form.email.trim().to_lowercase(),
            name: form.name.trim().to_string(),
            phone: form.phone.trim().to_string(),
            zipcode: form.zipcode.trim().to_string(),
        })
        .await?;

    let id = state
        .store
        .insert_family_caregiver_application(&NewFamilyCaregiverApplication {
            user_id,
            relationship: form.relationship.trim().to_string(),
            recipient_medicaid: form.recipient_medicaid,
            hours_per_week: form.hours_per_week.trim().to_string(),
            notes: form.notes.trim().to_string(),
        })
        .await?;

    tracing::info!("Family caregiver application {} received", id);

    Ok(Json(SubmissionResult::ok(
        "Eligibility request received! We'll review it and reach out shortly.",
    )))
}

/// Stored care applications, newest first
pub async fn list_care_applications(State(state): State<AppState>) -> Result<Json<Value>> {
    let applications = state.store.list_care_applications().await?;
    Ok(Json(
        json!({ "success": true, "applications": applications }),
    ))
}

/// Stored job applications, newest first
pub async fn list_job_applications(State(state): State<AppState>) -> Result<Json<Value>> {
    let applications = state.store.list_job_applications().await?;
    Ok(Json(
        json!({ "success": true, "applications": applications }),
    ))
}
