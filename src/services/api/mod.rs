pub mod http;

use async_trait::async_trait;

use crate::errors::ApiError;
use crate::models::{
    Booking, BookingRequest, BookingStatus, PaymentMethod, PaymentUpdate, Rating, SearchFilters,
};
use crate::services::lifecycle::Decision;

pub use http::HttpBookingClient;

/// Backend operations for the booking lifecycle. Implementations are pure
/// I/O adapters: no state, every failure normalized to an [`ApiError`].
///
/// Mutating calls (`request_booking`, `respond`, `complete_tour`) change
/// remote state exactly once per call; the reads are idempotent.
#[async_trait]
pub trait BookingApi: Send + Sync {
    async fn request_booking(&self, details: &BookingRequest) -> Result<Booking, ApiError>;

    /// Most recent booking for the current actor. "No booking yet" is a
    /// normal outcome and maps to `Ok(None)`, never to an error.
    async fn latest_booking(&self) -> Result<Option<Booking>, ApiError>;

    async fn booking_status(&self, id: &str) -> Result<BookingStatus, ApiError>;

    async fn respond(&self, id: &str, decision: Decision) -> Result<Booking, ApiError>;

    async fn complete_tour(&self, id: &str) -> Result<Booking, ApiError>;

    async fn update_payment(&self, id: &str, update: &PaymentUpdate) -> Result<Booking, ApiError>;

    async fn update_payment_method(
        &self,
        id: &str,
        method: PaymentMethod,
    ) -> Result<Booking, ApiError>;

    /// Requester confirms the guide was paid and rates the experience.
    async fn confirm_user_payment(&self, id: &str, rating: Rating) -> Result<Booking, ApiError>;

    /// Requests assigned to the current guide.
    async fn guide_requests(&self) -> Result<Vec<Booking>, ApiError>;

    /// Every request, for the guide/admin dashboard view.
    async fn all_requests(&self) -> Result<Vec<Booking>, ApiError>;

    /// The current requester's own bookings, newest first.
    async fn user_bookings(&self) -> Result<Vec<Booking>, ApiError>;

    async fn search(&self, filters: &SearchFilters) -> Result<Vec<Booking>, ApiError>;
}
