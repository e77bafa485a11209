use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::models::{Booking, BookingStatus, PaymentUpdate};

/// A guide's answer to a pending booking request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
    Accepted,
    Declined,
}

impl Decision {
    pub fn as_str(&self) -> &'static str {
        match self {
            Decision::Accepted => "accepted",
            Decision::Declined => "declined",
        }
    }
}

/// Actor actions that can move a booking through its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingEvent {
    Respond(Decision),
    Complete,
    UpdatePayment,
}

impl BookingEvent {
    fn describe(&self) -> &'static str {
        match self {
            BookingEvent::Respond(_) => "respond to",
            BookingEvent::Complete => "complete",
            BookingEvent::UpdatePayment => "update payment for",
        }
    }
}

#[derive(Debug, PartialEq)]
pub enum LifecycleError {
    InvalidTransition {
        from: BookingStatus,
        event: BookingEvent,
    },
    InvalidAmount {
        amount: f64,
    },
}

impl std::fmt::Display for LifecycleError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LifecycleError::InvalidTransition { from, event } => {
                write!(
                    f,
                    "cannot {} a booking that is {}",
                    event.describe(),
                    from.as_str()
                )
            }
            LifecycleError::InvalidAmount { amount } => {
                write!(f, "payment amount must not be negative (got {amount})")
            }
        }
    }
}

impl std::error::Error for LifecycleError {}

/// The single place that encodes transition legality. Anything not listed
/// here is invalid and leaves the booking untouched.
pub fn transition(
    current: BookingStatus,
    event: BookingEvent,
) -> Result<BookingStatus, LifecycleError> {
    match (current, event) {
        (BookingStatus::Pending, BookingEvent::Respond(Decision::Accepted)) => {
            Ok(BookingStatus::Accepted)
        }
        (BookingStatus::Pending, BookingEvent::Respond(Decision::Declined)) => {
            Ok(BookingStatus::Declined)
        }
        (BookingStatus::Accepted, BookingEvent::Complete) => Ok(BookingStatus::Completed),
        // Payment edits never change the status
        (BookingStatus::Accepted, BookingEvent::UpdatePayment) => Ok(BookingStatus::Accepted),
        (from, event) => Err(LifecycleError::InvalidTransition { from, event }),
    }
}

/// True iff no booking in the set blocks a new request. The backend is
/// still the authority; this guard only saves a doomed round trip.
pub fn can_request_new(existing: &[Booking]) -> bool {
    !existing.iter().any(|b| b.status.is_active())
}

pub fn apply_response(booking: &Booking, decision: Decision) -> Result<Booking, LifecycleError> {
    let status = transition(booking.status, BookingEvent::Respond(decision))?;
    Ok(with_status(booking, status))
}

pub fn apply_completion(booking: &Booking) -> Result<Booking, LifecycleError> {
    let status = transition(booking.status, BookingEvent::Complete)?;
    Ok(with_status(booking, status))
}

pub fn apply_payment_update(
    booking: &Booking,
    update: &PaymentUpdate,
) -> Result<Booking, LifecycleError> {
    transition(booking.status, BookingEvent::UpdatePayment)?;
    if let Some(amount) = update.amount {
        if amount < 0.0 {
            return Err(LifecycleError::InvalidAmount { amount });
        }
    }

    let mut updated = booking.clone();
    if let Some(method) = update.payment_method {
        updated.payment_method = method;
    }
    if let Some(status) = update.payment_status {
        updated.payment_status = status;
    }
    if update.amount.is_some() {
        updated.payment_amount = update.amount;
    }
    updated.updated_at = Utc::now();
    Ok(updated)
}

fn with_status(booking: &Booking, status: BookingStatus) -> Booking {
    let mut updated = booking.clone();
    updated.status = status;
    updated.updated_at = Utc::now();
    updated
}
