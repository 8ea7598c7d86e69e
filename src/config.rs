use std::env;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub server_host: String,
    pub server_port: u16,
    pub database_url: String,
    pub allowed_origins: Vec<String>,
    pub environment: String,
    /// Secret used to sign the admin session cookie
    pub admin_session_secret: String,
    pub admin_session_ttl_secs: i64,
    /// Managed auth provider (password-grant endpoint)
    pub auth_base_url: String,
    pub auth_api_key: String,
    /// Geocoding API key (ZIP -> coordinates)
    pub maps_api_key: String,
    /// Google service account for Calendar/Sheets
    pub google_service_account_email: String,
    pub google_private_key: String,
    pub google_calendar_id: String,
    pub booking_sheet_id: String,
    /// Chat assistant
    pub llm_api_key: String,
    pub llm_assistant_id: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, String> {
        // Load .env file if it exists (development)
        dotenvy::dotenv().ok();

        let server_host = env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let server_port = env::var("SERVER_PORT")
            .unwrap_or_else(|_| "8080".to_string())
            .parse()
            .map_err(|_| "Invalid SERVER_PORT")?;

        let database_url = env::var("DATABASE_URL").map_err(|_| "DATABASE_URL must be set")?;

        let allowed_origins = env::var("ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3000".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .collect();

        let environment = env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string());

        let admin_session_secret = env::var("ADMIN_SESSION_SECRET")
            .map_err(|_| "ADMIN_SESSION_SECRET must be set to sign admin sessions")?;

        let admin_session_ttl_secs = env::var("ADMIN_SESSION_TTL_SECS")
            .unwrap_or_else(|_| "28800".to_string())
            .parse()
            .map_err(|_| "Invalid ADMIN_SESSION_TTL_SECS")?;

        // Outbound service credentials. Missing values are tolerated at startup;
        // the affected endpoints fail with a descriptive 500 when called.
        let auth_base_url = env::var("AUTH_BASE_URL").unwrap_or_default();
        let auth_api_key = env::var("AUTH_API_KEY").unwrap_or_default();
        let maps_api_key = env::var("MAPS_API_KEY").unwrap_or_default();
        let google_service_account_email =
            env::var("GOOGLE_SERVICE_ACCOUNT_EMAIL").unwrap_or_default();
        // Private keys pasted into env files usually carry literal "\n" sequences
        let google_private_key = env::var("GOOGLE_PRIVATE_KEY")
            .unwrap_or_default()
            .replace("\\n", "\n");
        let google_calendar_id = env::var("GOOGLE_CALENDAR_ID").unwrap_or_default();
        let booking_sheet_id = env::var("BOOKING_SHEET_ID").unwrap_or_default();
        let llm_api_key = env::var("LLM_API_KEY").unwrap_or_default();
        let llm_assistant_id = env::var("LLM_ASSISTANT_ID").unwrap_or_default();

        Ok(Config {
            server_host,
            server_port,
            database_url,
            allowed_origins,
            environment,
            admin_session_secret,
            admin_session_ttl_secs,
            auth_base_url,
            auth_api_key,
            maps_api_key,
            google_service_account_email,
            google_private_key,
            google_calendar_id,
            booking_sheet_id,
            llm_api_key,
            llm_assistant_id,
        })
    }

    /// Get server address as string
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }
}
