use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::Guide;

/// A single trek booking as the backend reports it. The backend owns this
/// record; clients hold a possibly-stale copy used only to drive polling
/// and UI decisions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub destination: String,
    pub date: NaiveDate,
    pub people_count: u32,
    #[serde(default)]
    pub guide: Option<Guide>,
    pub status: BookingStatus,
    #[serde(default)]
    pub payment_method: PaymentMethod,
    #[serde(default)]
    pub payment_status: PaymentStatus,
    #[serde(default)]
    pub payment_amount: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Accepted,
    Completed,
    Declined,
}

impl BookingStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Accepted => "accepted",
            BookingStatus::Completed => "completed",
            BookingStatus::Declined => "declined",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s {
            "accepted" => BookingStatus::Accepted,
            "completed" => BookingStatus::Completed,
            "declined" => BookingStatus::Declined,
            _ => BookingStatus::Pending,
        }
    }

    /// An active booking blocks the requester from opening a new one.
    pub fn is_active(&self) -> bool {
        matches!(self, BookingStatus::Pending | BookingStatus::Accepted)
    }

    /// Terminal states persist for history; no transition leaves them.
    pub fn is_terminal(&self) -> bool {
        matches!(self, BookingStatus::Completed | BookingStatus::Declined)
    }
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    #[default]
    Unset,
    Cash,
    Online,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    #[default]
    Unspecified,
    Unpaid,
    PartiallyPaid,
    Paid,
}

/// Payload for creating a booking. The backend assigns the id, the guide
/// and the initial `pending` status.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub destination: String,
    pub date: NaiveDate,
    pub people_count: u32,
}

/// Patch applied to an accepted booking's payment fields. Fields left as
/// `None` are untouched.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_method: Option<PaymentMethod>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment_status: Option<PaymentStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<f64>,
}

/// Guide rating submitted with the requester's payment confirmation.
/// Valid range is 0 to 5 inclusive; fractional values (half stars) are
/// accepted even though the reference UI only offers whole stars.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Rating(f32);

impl Rating {
    pub fn new(value: f32) -> Option<Self> {
        if value.is_finite() && (0.0..=5.0).contains(&value) {
            Some(Rating(value))
        } else {
            None
        }
    }

    pub fn value(&self) -> f32 {
        self.0
    }
}

/// Filters for the booking search endpoint. Unset fields are omitted from
/// the query string.
#[derive(Debug, Clone, Default)]
pub struct SearchFilters {
    pub destination: Option<String>,
    pub status: Option<BookingStatus>,
    pub guide_id: Option<String>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

impl SearchFilters {
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(ref destination) = self.destination {
            query.push(("destination", destination.clone()));
        }
        if let Some(status) = self.status {
            query.push(("status", status.as_str().to_string()));
        }
        if let Some(ref guide_id) = self.guide_id {
            query.push(("guideId", guide_id.clone()));
        }
        if let Some(from) = self.date_from {
            query.push(("dateFrom", from.to_string()));
        }
        if let Some(to) = self.date_to {
            query.push(("dateTo", to.to_string()));
        }
        query
    }
}
