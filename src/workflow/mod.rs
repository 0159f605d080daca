//! Booking and review workflows.
//!
//! Each form owns a small state container with synchronous transitions
//! (`begin`, then `complete` or `confirm`) so a UI can hold it in a signal
//! while the request is in flight; `submit` chains them around the API call.
pub mod booking;
pub mod eligibility;
pub mod review;

pub use booking::{BookingForm, SubmitPhase};
pub use eligibility::{can_review, qualifying_booking, review_eligibility};
pub use review::{
    refresh_after_review, send_review, Notice, PendingReview, Refreshed, ReviewPanel,
    NOTICE_DISPLAY,
};
