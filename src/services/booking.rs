use std::sync::{Arc, Mutex};

use crate::errors::ApiError;
use crate::models::{Booking, BookingRequest, PaymentUpdate, Rating};
use crate::services::api::BookingApi;
use crate::services::lifecycle::{self, BookingEvent, Decision, LifecycleError};

#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Lifecycle(#[from] LifecycleError),

    #[error("an active booking already exists")]
    ActiveBookingExists,
}

/// Drives the booking lifecycle against the backend, catching lifecycle
/// violations locally before any network call goes out. Holds the current
/// actor's active booking as a cache; the backend stays the source of
/// truth and every successful call refreshes the cache with the backend's
/// authoritative copy.
pub struct BookingService {
    api: Arc<dyn BookingApi>,
    active: Mutex<Option<Booking>>,
}

impl BookingService {
    pub fn new(api: Arc<dyn BookingApi>) -> Self {
        Self {
            api,
            active: Mutex::new(None),
        }
    }

    /// Create a new booking request. Refused locally, without touching the
    /// network, while a pending or accepted booking is already cached.
    pub async fn request_booking(&self, details: &BookingRequest) -> Result<Booking, BookingError> {
        {
            let cached: Vec<Booking> = self.active.lock().unwrap().iter().cloned().collect();
            if !lifecycle::can_request_new(&cached) {
                return Err(BookingError::ActiveBookingExists);
            }
        }

        let booking = self.api.request_booking(details).await?;
        tracing::info!(
            booking_id = %booking.id,
            destination = %booking.destination,
            "booking requested"
        );
        *self.active.lock().unwrap() = Some(booking.clone());
        Ok(booking)
    }

    /// Guide accepts or declines a pending request.
    pub async fn respond_to_booking(
        &self,
        booking: &Booking,
        decision: Decision,
    ) -> Result<Booking, BookingError> {
        // Validate before the wire; an already-responded booking fails here
        lifecycle::apply_response(booking, decision)?;
        let updated = self.api.respond(&booking.id, decision).await?;
        tracing::info!(booking_id = %updated.id, decision = decision.as_str(), "booking response recorded");
        self.remember(&updated);
        Ok(updated)
    }

    /// Mark an accepted booking's trek as completed.
    pub async fn complete_tour(&self, booking: &Booking) -> Result<Booking, BookingError> {
        lifecycle::apply_completion(booking)?;
        let updated = self.api.complete_tour(&booking.id).await?;
        tracing::info!(booking_id = %updated.id, "tour completed");
        self.remember(&updated);
        Ok(updated)
    }

    /// Edit payment fields of an accepted booking.
    pub async fn update_payment(
        &self,
        booking: &Booking,
        update: &PaymentUpdate,
    ) -> Result<Booking, BookingError> {
        lifecycle::apply_payment_update(booking, update)?;
        let updated = self.api.update_payment(&booking.id, update).await?;
        self.remember(&updated);
        Ok(updated)
    }

    /// Requester confirms the guide was paid and rates the experience.
    pub async fn confirm_payment(
        &self,
        booking: &Booking,
        rating: Rating,
    ) -> Result<Booking, BookingError> {
        lifecycle::transition(booking.status, BookingEvent::UpdatePayment)?;
        let updated = self.api.confirm_user_payment(&booking.id, rating).await?;
        tracing::info!(booking_id = %updated.id, rating = rating.value(), "payment confirmed");
        self.remember(&updated);
        Ok(updated)
    }

    /// Re-fetch the requester's bookings and recompute the cached active
    /// booking. Returns the active booking, if any.
    pub async fn refresh(&self) -> Result<Option<Booking>, BookingError> {
        let bookings = self.api.user_bookings().await?;
        let active = bookings.iter().find(|b| b.status.is_active()).cloned();
        *self.active.lock().unwrap() = active.clone();
        Ok(active)
    }

    pub fn active_booking(&self) -> Option<Booking> {
        self.active.lock().unwrap().clone()
    }

    pub fn can_request_new(&self) -> bool {
        let cached: Vec<Booking> = self.active.lock().unwrap().iter().cloned().collect();
        lifecycle::can_request_new(&cached)
    }

    /// Keep the cache in step with a backend-returned booking: an active
    /// copy replaces the cache, a terminal copy of the cached booking
    /// clears it.
    fn remember(&self, booking: &Booking) {
        let mut active = self.active.lock().unwrap();
        if booking.status.is_active() {
            *active = Some(booking.clone());
        } else if active.as_ref().is_some_and(|b| b.id == booking.id) {
            *active = None;
        }
    }
}
