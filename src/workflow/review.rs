use std::time::Duration;

use leptos::logging::{error, log, warn};

use crate::api::ApiClient;
use crate::error::WorkflowError;
use crate::models::{Booking, NewReview, Review, User};
use crate::workflow::eligibility::review_eligibility;

/// How long the confirmation stays on screen.
pub const NOTICE_DISPLAY: Duration = Duration::from_secs(5);
pub const REVIEW_SUCCESS: &str = "Review submitted successfully!";
pub const REVIEW_FAILED: &str = "Failed to submit review. Please try again.";
pub const DEFAULT_RATING: u8 = 5;

/// Transient confirmation. `id` lets a timer clear exactly the notice it was
/// started for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub id: u64,
    pub text: String,
}

/// A review that passed the local checks and is ready to send.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingReview {
    pub booking_id: String,
    pub property_id: String,
    pub review: NewReview,
}

/// Data re-fetched after a successful review. `None` means that refresh
/// failed and the caller should keep what it has.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Refreshed {
    pub reviews: Option<Vec<Review>>,
    pub bookings: Option<Vec<Booking>>,
}

/// Review form on a property page.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewPanel {
    pub rating: u8,
    pub comment: String,
    open: bool,
    submitting: bool,
    error: Option<String>,
    notice: Option<Notice>,
    notices_shown: u64,
    just_reviewed: Option<String>,  // posted, but not yet in a fetched bookings list
}

impl Default for ReviewPanel {
    fn default() -> Self {
        Self {
            rating: DEFAULT_RATING,
            comment: String::new(),
            open: false,
            submitting: false,
            error: None,
            notice: None,
            notices_shown: 0,
            just_reviewed: None,
        }
    }
}

impl ReviewPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    pub fn open(&mut self) {
        self.open = true;
        self.error = None;
    }

    pub fn close(&mut self) {
        if self.submitting {
            return;
        }
        self.open = false;
        self.error = None;
    }

    /// Re-derives the booking being reviewed from `bookings` (the latest
    /// fetch) and validates the form. On success the panel is marked as
    /// submitting.
    pub fn begin(
        &mut self,
        user: Option<&User>,
        bookings: &[Booking],
        property_id: &str,
    ) -> Result<PendingReview, WorkflowError> {
        if self.submitting {
            return Err(WorkflowError::InFlight);
        }
        match self.check(user, bookings, property_id) {
            Ok(pending) => {
                log!(
                    "[REVIEW] Submitting review for booking {} ({} stars)",
                    pending.booking_id,
                    pending.review.rating
                );
                self.submitting = true;
                self.error = None;
                Ok(pending)
            }
            Err(err) => {
                warn!("[REVIEW] Review rejected before sending: {}", err);
                self.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    fn check(
        &self,
        user: Option<&User>,
        bookings: &[Booking],
        property_id: &str,
    ) -> Result<PendingReview, WorkflowError> {
        let booking = review_eligibility(user, bookings, property_id)?;
        if self.just_reviewed.as_deref() == Some(booking.id.as_str()) {
            return Err(WorkflowError::AlreadyReviewed);
        }
        if !(1..=5).contains(&self.rating) {
            return Err(WorkflowError::invalid("Rating must be between 1 and 5"));
        }
        let comment = self.comment.trim();
        if comment.is_empty() {
            return Err(WorkflowError::invalid("Please write a comment"));
        }

        Ok(PendingReview {
            booking_id: booking.id.clone(),
            property_id: property_id.to_string(),
            review: NewReview {
                rating: self.rating,
                comment: comment.to_string(),
            },
        })
    }

    /// Applies the outcome of [`send_review`]. On success the confirmation is
    /// shown right away and its id returned so the caller can start the
    /// display timer; the form stays open until [`finish`](Self::finish).
    /// On failure the error is shown and the form stays open for a retry.
    pub fn confirm(
        &mut self,
        pending: &PendingReview,
        result: Result<(), WorkflowError>,
    ) -> Result<u64, WorkflowError> {
        self.submitting = false;
        match result {
            Ok(()) => {
                self.notices_shown += 1;
                self.notice = Some(Notice {
                    id: self.notices_shown,
                    text: REVIEW_SUCCESS.to_string(),
                });
                self.rating = DEFAULT_RATING;
                self.comment.clear();
                self.error = None;
                self.just_reviewed = Some(pending.booking_id.clone());
                Ok(self.notices_shown)
            }
            Err(err) => {
                self.error = Some(err.to_string());
                Err(err)
            }
        }
    }

    /// Closes the form once the dependent views have been refreshed.
    pub fn finish(&mut self, refreshed: &Refreshed) {
        if refreshed.bookings.is_some() {
            self.just_reviewed = None;
        }
        self.open = false;
    }

    /// Hides the notice if it is still the one identified by `id`.
    pub fn clear_notice(&mut self, id: u64) -> bool {
        if self.notice.as_ref().is_some_and(|n| n.id == id) {
            self.notice = None;
            true
        } else {
            false
        }
    }

    pub async fn submit<C: ApiClient>(
        &mut self,
        api: &C,
        user: Option<&User>,
        bookings: &[Booking],
        property_id: &str,
    ) -> Result<Refreshed, WorkflowError> {
        let pending = self.begin(user, bookings, property_id)?;
        let posted = send_review(api, &pending).await;
        self.confirm(&pending, posted)?;
        let refreshed = refresh_after_review(api, &pending.property_id).await;
        self.finish(&refreshed);
        Ok(refreshed)
    }
}

/// Posts the review. `success: false` counts as a failure.
pub async fn send_review<C: ApiClient>(api: &C, pending: &PendingReview) -> Result<(), WorkflowError> {
    match api.add_review(&pending.booking_id, &pending.review).await {
        Ok(response) if response.success => {
            log!("[REVIEW] Review saved for booking {}", pending.booking_id);
            Ok(())
        }
        Ok(response) => {
            let message = response.message.unwrap_or_else(|| REVIEW_FAILED.to_string());
            warn!("[REVIEW] API refused review: {}", message);
            Err(WorkflowError::Api(message))
        }
        Err(err) => {
            error!("[REVIEW] Failed to submit review: {:?}", err);
            Err(WorkflowError::from_api(&err, REVIEW_FAILED))
        }
    }
}

/// Re-fetches the property's reviews and then the user's bookings. Only
/// called after a review was saved.
pub async fn refresh_after_review<C: ApiClient>(api: &C, property_id: &str) -> Refreshed {
    let reviews = match api.get_property_reviews(property_id).await {
        Ok(reviews) => Some(reviews),
        Err(err) => {
            warn!("[REVIEW] Could not refresh reviews: {:?}", err);
            None
        }
    };
    let bookings = match api.get_my_bookings().await {
        Ok(bookings) => Some(bookings),
        Err(err) => {
            warn!("[REVIEW] Could not refresh bookings: {:?}", err);
            None
        }
    };

    Refreshed { reviews, bookings }
}
