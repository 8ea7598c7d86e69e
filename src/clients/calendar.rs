use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::{AppError, Result};

const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";
const SCOPES: &str =
    "https://www.googleapis.com/auth/calendar https://www.googleapis.com/auth/spreadsheets";

/// An occupied interval on the consultation calendar
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BusyWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// A consultation to be written to the calendar
#[derive(Debug, Clone)]
pub struct ConsultationEvent {
    pub summary: String,
    pub description: String,
    pub attendee_email: String,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Read/write access to the consultation calendar plus the bookkeeping ledger
#[async_trait]
pub trait CalendarClient: Send + Sync {
    /// Occupied intervals overlapping the given UTC day window
    async fn busy_windows(&self, from: DateTime<Utc>, to: DateTime<Utc>)
        -> Result<Vec<BusyWindow>>;

    /// Create the event and return its id
    async fn create_event(&self, event: &ConsultationEvent) -> Result<String>;

    /// Append a bookkeeping row; callers treat failure as non-fatal
    async fn append_booking_row(&self, row: &[String]) -> Result<()>;
}

/// Google Calendar + Sheets client authenticated with a service account
pub struct GoogleCalendarClient {
    http: reqwest::Client,
    service_account_email: String,
    private_key: String,
    calendar_id: String,
    sheet_id: String,
}

impl GoogleCalendarClient {
    pub fn new(
        http: reqwest::Client,
        service_account_email: String,
        private_key: String,
        calendar_id: String,
        sheet_id: String,
    ) -> Self {
        Self {
            http,
            service_account_email,
            private_key,
            calendar_id,
            sheet_id,
        }
    }

    /// Exchange a signed service-account assertion for an access token
    /// (JWT-bearer grant). Tokens are short-lived and not cached; each request
    /// performs its own exchange, matching the one-shot request model.
    async fn access_token(&self) -> Result<String> {
        if self.service_account_email.is_empty() || self.private_key.is_empty() {
            return Err(AppError::Calendar(
                "Google service account credentials are not configured".to_string(),
            ));
        }

        let now = Utc::now().timestamp();
        let claims = ServiceAccountClaims {
            iss: self.service_account_email.clone(),
            scope: SCOPES.to_string(),
            aud: TOKEN_URL.to_string(),
            iat: now,
            exp: now + 3600,
        };

        let key = EncodingKey::from_rsa_pem(self.private_key.as_bytes())
            .map_err(|e| AppError::Calendar(format!("invalid service account key: {}", e)))?;
        let assertion = encode(&Header::new(Algorithm::RS256), &claims, &key)
            .map_err(|e| AppError::Calendar(format!("failed to sign assertion: {}", e)))?;

        let response: TokenResponse = self
            .http
            .post(TOKEN_URL)
            .form(&[
                ("grant_type", "urn:ietf:params:oauth:grant-type:jwt-bearer"),
                ("assertion", assertion.as_str()),
            ])
            .send()
            .await?
            .error_for_status()
            .map_err(|e| AppError::Calendar(format!("token exchange failed: {}", e)))?
            .json()
            .await?;

        Ok(response.access_token)
    }
}

#[derive(Debug, Serialize)]
struct ServiceAccountClaims {
    iss: String,
    scope: String,
    aud: String,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct EventList {
    #[serde(default)]
    items: Vec<EventItem>,
}

#[derive(Debug, Deserialize)]
struct EventItem {
    start: Option<EventTime>,
    end: Option<EventTime>,
}

#[derive(Debug, Deserialize)]
struct EventTime {
    #[serde(rename = "dateTime")]
    date_time: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
struct CreatedEvent {
    id: String,
}

#[async_trait]
impl CalendarClient for GoogleCalendarClient {
    async fn busy_windows(
        &self,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<BusyWindow>> {
        let token = self.access_token().await?;

        let url = format!(
            "https://www.googleapis.com/calendar/v3/calendars/{}/events",
            self.calendar_id
        );
        let list: EventList = self
            .http
            .get(&url)
            .bearer_auth(&token)
            .query(&[
                ("timeMin", from.to_rfc3339()),
                ("timeMax", to.to_rfc3339()),
                ("singleEvents", "true".to_string()),
                ("orderBy", "startTime".to_string()),
            ])
            .send()
            .await?
            .error_for_status()
            .map_err(|e| AppError::Calendar(format!("event listing failed: {}", e)))?
            .json()
            .await?;

        // All-day events carry a date instead of a dateTime and are skipped
        let windows = list
            .items
            .into_iter()
            .filter_map(|item| {
                let start = item.start.and_then(|t| t.date_time)?;
                let end = item.end.and_then(|t| t.date_time)?;
                Some(BusyWindow { start, end })
            })
            .collect();

        Ok(windows)
    }

    async fn create_event(&self, event: &ConsultationEvent) -> Result<String> {
        let token = self.access_token().await?;

        let url = format!(
            "https://www.googleapis.com/calendar/v3/calendars/{}/events",
            self.calendar_id
        );
        let body = json!({
            "summary": event.summary,
            "description": event.description,
            "start": { "dateTime": event.start.to_rfc3339() },
            "end": { "dateTime": event.end.to_rfc3339() },
            "attendees": [{ "email": event.attendee_email }],
            "reminders": {
                "useDefault": false,
                "overrides": [
                    { "method": "email", "minutes": 60 },
                    { "method": "popup", "minutes": 30 }
                ]
            }
        });

        let created: CreatedEvent = self
            .http
            .post(&url)
            .bearer_auth(&token)
            .json(&body)
            .send()
            .await?
            .error_for_status()
            .map_err(|e| AppError::Calendar(format!("event creation failed: {}", e)))?
            .json()
            .await?;

        tracing::info!("Created consultation event {}", created.id);
        Ok(created.id)
    }

    async fn append_booking_row(&self, row: &[String]) -> Result<()> {
        if self.sheet_id.is_empty() {
            return Err(AppError::Calendar(
                "BOOKING_SHEET_ID is not configured".to_string(),
            ));
        }

        let token = self.access_token().await?;

        let url = format!(
            "https://sheets.googleapis.com/v4/spreadsheets/{}/values/A1:append?valueInputOption=USER_ENTERED",
            self.sheet_id
        );
        self.http
            .post(&url)
            .bearer_auth(&token)
            .json(&json!({ "values": [row] }))
            .send()
            .await?
            .error_for_status()
            .map_err(|e| AppError::Calendar(format!("ledger append failed: {}", e)))?;

        Ok(())
    }
}
