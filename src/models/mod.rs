pub mod booking;
pub mod guide;

pub use booking::{
    Booking, BookingRequest, BookingStatus, PaymentMethod, PaymentStatus, PaymentUpdate, Rating,
    SearchFilters,
};
pub use guide::Guide;
