pub mod booking;
pub mod property;
pub mod review;
pub mod user;

pub use booking::{Booking, BookingStatus, NewBooking, PaymentMethod, PropertyRef, StayQuote};
pub use property::{Property, PropertyFilter};
pub use review::{AddReviewResponse, AuthorRef, NewReview, RatingSummary, Review, ReviewRef};
pub use user::User;
