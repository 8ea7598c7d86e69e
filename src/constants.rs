/// Consultation length in minutes
pub const CONSULTATION_DURATION_MINS: i64 = 15;

/// Candidate consultation slots are generated on this interval
pub const SLOT_STEP_MINS: u32 = 15;

/// First bookable hour of the day (local, America/New_York)
pub const BUSINESS_DAY_START_HOUR: u32 = 9;

/// Slots must end by this hour (local, America/New_York)
pub const BUSINESS_DAY_END_HOUR: u32 = 17;

/// Default job search radius in miles
pub const DEFAULT_SEARCH_RADIUS_MILES: f64 = 25.0;

/// Name of the signed admin session cookie
pub const ADMIN_SESSION_COOKIE: &str = "hc_admin_session";

/// Admin login page the gate middleware redirects to
pub const ADMIN_LOGIN_PATH: &str = "/admin/login";

// =============================================================================
// Error Messages
// =============================================================================

/// Returned whenever a form is submitted with a required field absent or blank
pub const ERR_MISSING_FIELDS: &str = "Missing required fields";

/// Returned when the submitted email fails format validation
pub const ERR_INVALID_EMAIL: &str = "Please enter a valid email address";

/// Returned when the submitted phone number fails format validation
pub const ERR_INVALID_PHONE: &str = "Please enter a valid phone number";

/// Returned when a 12-hour time string cannot be parsed
pub const ERR_INVALID_TIME: &str = "Invalid time format";
