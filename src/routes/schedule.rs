use axum::{extract::State, Json};
use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
use chrono_tz::America::New_York;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::clients::ConsultationEvent;
use crate::constants::{
    BUSINESS_DAY_END_HOUR, BUSINESS_DAY_START_HOUR, CONSULTATION_DURATION_MINS, ERR_INVALID_TIME,
    SLOT_STEP_MINS,
};
use crate::error::{AppError, Result};
use crate::routes::validation::{require_fields, validate_contact, SubmissionResult};
use crate::AppState;

/// Parse a 12-hour time string like "2:30pm" into (hour, minute).
///
/// "12:00am" maps to hour 0 and "12:30pm" stays at hour 12.
pub fn parse_time_12h(input: &str) -> Option<(u32, u32)> {
    let s = input.trim().to_lowercase();

    let (time_part, pm) = if let Some(rest) = s.strip_suffix("pm") {
        (rest.trim(), true)
    } else if let Some(rest) = s.strip_suffix("am") {
        (rest.trim(), false)
    } else {
        return None;
    };

    let (hour_str, minute_str) = time_part.split_once(':')?;
    let hour: u32 = hour_str.trim().parse().ok()?;
    let minute: u32 = minute_str.trim().parse().ok()?;

    if !(1..=12).contains(&hour) || minute > 59 {
        return None;
    }

    let hour = match (hour, pm) {
        (12, false) => 0,
        (12, true) => 12,
        (h, true) => h + 12,
        (h, false) => h,
    };

    Some((hour, minute))
}

/// Format (hour, minute) back into the 12-hour strings the UI shows
pub fn format_time_12h(hour: u32, minute: u32) -> String {
    let suffix = if hour < 12 { "am" } else { "pm" };
    let display_hour = match hour % 12 {
        0 => 12,
        h => h,
    };
    format!("{}:{:02}{}", display_hour, minute, suffix)
}

#[derive(Debug, Deserialize)]
pub struct AvailableSlotsRequest {
    #[serde(default)]
    pub date: String,
}

/// Free consultation slots for a date
///
/// Candidate slots run every 15 minutes within business hours
/// (America/New_York); slots overlapping a calendar event are dropped.
pub async fn available_slots(
    State(state): State<AppState>,
    Json(payload): Json<AvailableSlotsRequest>,
) -> Result<Json<Value>> {
    let date = NaiveDate::parse_from_str(payload.date.trim(), "%Y-%m-%d")
        .map_err(|_| AppError::InvalidInput("Invalid date format, expected YYYY-MM-DD".into()))?;

    let day_start = local_to_utc(date, BUSINESS_DAY_START_HOUR, 0)?;
    let day_end = local_to_utc(date, BUSINESS_DAY_END_HOUR, 0)?;

    let busy = state.calendar.busy_windows(day_start, day_end).await?;

    let mut slots = Vec::new();
    let mut cursor = day_start;
    let duration = chrono::Duration::minutes(CONSULTATION_DURATION_MINS);
    let step = chrono::Duration::minutes(SLOT_STEP_MINS as i64);

    while cursor + duration <= day_end {
        let slot_end = cursor + duration;
        let taken = busy.iter().any(|w| cursor < w.end && w.start < slot_end);
        if !taken {
            let local = cursor.with_timezone(&New_York);
            slots.push(format_time_12h(
                chrono::Timelike::hour(&local),
                chrono::Timelike::minute(&local),
            ));
        }
        cursor += step;
    }

    Ok(Json(json!({ "success": true, "slots": slots })))
}

#[derive(Debug, Deserialize)]
pub struct ScheduleRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub notes: String,
}

/// Book a 15-minute consultation
///
/// Creates the calendar event with reminder overrides, then appends a
/// bookkeeping row; a ledger failure is logged but never fails the booking.
pub async fn schedule_consultation(
    State(state): State<AppState>,
    Json(form): Json<ScheduleRequest>,
) -> Result<Json<SubmissionResult>> {
    if let Some(fail) = require_fields(&[
        ("name", &form.name),
        ("email", &form.email),
        ("phone", &form.phone),
        ("date", &form.date),
        ("time", &form.time),
    ]) {
        return Ok(Json(fail));
    }
    if let Some(fail) = validate_contact(&form.email, &form.phone) {
        return Ok(Json(fail));
    }

    let date = match NaiveDate::parse_from_str(form.date.trim(), "%Y-%m-%d") {
        Ok(d) => d,
        Err(_) => {
            return Ok(Json(SubmissionResult::fail(
                "Invalid date format, expected YYYY-MM-DD",
            )))
        }
    };
    let (hour, minute) = match parse_time_12h(&form.time) {
        Some(hm) => hm,
        None => return Ok(Json(SubmissionResult::fail(ERR_INVALID_TIME))),
    };

    let start = local_to_utc(date, hour, minute)?;
    let end = start + chrono::Duration::minutes(CONSULTATION_DURATION_MINS);

    let event = ConsultationEvent {
        summary: format!("Care consultation: {}", form.name.trim()),
        description: format!(
            "Phone: {}\nEmail: {}\nNotes: {}",
            form.phone.trim(),
            form.email.trim(),
            form.notes.trim()
        ),
        attendee_email: form.email.trim().to_string(),
        start,
        end,
    };

    let event_id = state.calendar.create_event(&event).await?;
    tracing::info!("Consultation booked: event {}", event_id);

    // Bookkeeping only; the consultation is already on the calendar
    let row = vec![
        form.name.trim().to_string(),
        form.email.trim().to_string(),
        form.phone.trim().to_string(),
        form.date.trim().to_string(),
        form.time.trim().to_string(),
        form.notes.trim().to_string(),
        Utc::now().to_rfc3339(),
    ];
    if let Err(e) = state.calendar.append_booking_row(&row).await {
        tracing::warn!("Booking ledger append failed (ignored): {}", e);
    }

    Ok(Json(SubmissionResult::ok(
        "Your consultation is scheduled. A calendar invitation is on its way.",
    )))
}

/// Interpret a wall-clock time in the consultation time zone and convert to UTC
fn local_to_utc(
    date: NaiveDate,
    hour: u32,
    minute: u32,
) -> Result<chrono::DateTime<Utc>> {
    let naive = date
        .and_time(NaiveTime::from_hms_opt(hour, minute, 0).ok_or_else(invalid_time)?);
    let local = New_York
        .from_local_datetime(&naive)
        .single()
        .ok_or_else(invalid_time)?;
    Ok(local.with_timezone(&Utc))
}

fn invalid_time() -> AppError {
    AppError::InvalidInput(ERR_INVALID_TIME.to_string())
}
