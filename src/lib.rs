pub mod config;
pub mod errors;
pub mod models;
pub mod services;
pub mod session;

pub use config::ClientConfig;
pub use errors::ApiError;
pub use models::{
    Booking, BookingRequest, BookingStatus, Guide, PaymentMethod, PaymentStatus, PaymentUpdate,
    Rating, SearchFilters,
};
pub use services::api::{BookingApi, HttpBookingClient};
pub use services::booking::{BookingError, BookingService};
pub use services::lifecycle::{BookingEvent, Decision, LifecycleError};
pub use services::poller::{BookingStatusPoller, StatusChange, DEFAULT_POLL_INTERVAL};
pub use session::{Role, SessionContext, StaticSession};
