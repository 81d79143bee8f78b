pub mod booking;

pub use booking::{Booking, BookingRequest, Service};
