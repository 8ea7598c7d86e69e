//! Narrow capability interfaces over the managed services the site depends on
//! (geocoding, calendar + booking ledger, auth provider, chat assistant), each
//! with a reqwest-backed implementation. Handlers only see the traits, so
//! tests can swap in mocks.

pub mod assistant;
pub mod auth;
pub mod calendar;
pub mod geocoder;

pub use assistant::{ChatAssistant, OpenAiAssistant};
pub use auth::{AuthProvider, AuthUser, SupabaseAuth};
pub use calendar::{BusyWindow, CalendarClient, ConsultationEvent, GoogleCalendarClient};
pub use geocoder::{Geocoder, MapsGeocoder};
