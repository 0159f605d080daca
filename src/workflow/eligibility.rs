//! Who may review a property.
//!
//! A guest may review a property once per completed stay. Eligibility is
//! always recomputed from the bookings list just fetched, never cached.
use crate::error::WorkflowError;
use crate::models::{Booking, BookingStatus, User};

/// First completed, unreviewed booking for `property_id`, in list order.
pub fn qualifying_booking<'a>(bookings: &'a [Booking], property_id: &str) -> Option<&'a Booking> {
    bookings.iter().find(|b| {
        b.is_for(property_id) && b.status == BookingStatus::Completed && !b.has_review()
    })
}

pub fn can_review(user: Option<&User>, bookings: &[Booking], property_id: &str) -> bool {
    user.is_some() && qualifying_booking(bookings, property_id).is_some()
}

/// Like [`can_review`], but explains a refusal.
pub fn review_eligibility<'a>(
    user: Option<&User>,
    bookings: &'a [Booking],
    property_id: &str,
) -> Result<&'a Booking, WorkflowError> {
    if user.is_none() {
        return Err(WorkflowError::AuthRequired);
    }
    if let Some(booking) = qualifying_booking(bookings, property_id) {
        return Ok(booking);
    }

    let reviewed_stay = bookings
        .iter()
        .any(|b| b.is_for(property_id) && b.status == BookingStatus::Completed && b.has_review());
    if reviewed_stay {
        Err(WorkflowError::AlreadyReviewed)
    } else {
        Err(WorkflowError::NotEligible)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::fixtures::{booking, reviewed, user};

    #[test]
    fn test_no_user_cannot_review() {
        let bookings = vec![booking("b1", "p1", BookingStatus::Completed)];
        assert!(!can_review(None, &bookings, "p1"));
        assert_eq!(review_eligibility(None, &bookings, "p1"), Err(WorkflowError::AuthRequired));
    }

    #[test]
    fn test_no_bookings_cannot_review() {
        let u = user();
        assert!(!can_review(Some(&u), &[], "p1"));
        assert_eq!(review_eligibility(Some(&u), &[], "p1"), Err(WorkflowError::NotEligible));
    }

    #[test]
    fn test_only_completed_stays_qualify() {
        let u = user();
        for status in [BookingStatus::Pending, BookingStatus::Confirmed, BookingStatus::Cancelled] {
            let bookings = vec![booking("b1", "p1", status)];
            assert!(!can_review(Some(&u), &bookings, "p1"), "{:?} must not qualify", status);
        }
    }

    #[test]
    fn test_one_completed_unreviewed_stay_qualifies() {
        let u = user();
        let bookings = vec![
            booking("b0", "p2", BookingStatus::Completed),
            booking("b1", "p1", BookingStatus::Completed),
        ];
        assert!(can_review(Some(&u), &bookings, "p1"));
        assert_eq!(qualifying_booking(&bookings, "p1").map(|b| b.id.as_str()), Some("b1"));
    }

    #[test]
    fn test_completed_stay_for_other_property_does_not_count() {
        let u = user();
        let bookings = vec![booking("b1", "p2", BookingStatus::Completed)];
        assert!(!can_review(Some(&u), &bookings, "p1"));
    }

    #[test]
    fn test_reviewed_booking_never_qualifies() {
        let u = user();
        let bookings = vec![reviewed(booking("b1", "p1", BookingStatus::Completed))];
        assert!(qualifying_booking(&bookings, "p1").is_none());
        assert!(!can_review(Some(&u), &bookings, "p1"));
        assert_eq!(
            review_eligibility(Some(&u), &bookings, "p1"),
            Err(WorkflowError::AlreadyReviewed)
        );
    }

    #[test]
    fn test_booking_for_deleted_property_is_skipped() {
        let u = user();
        let mut orphan = booking("b0", "gone", BookingStatus::Completed);
        orphan.property = None;
        let bookings = vec![orphan, booking("b1", "p1", BookingStatus::Completed)];

        assert_eq!(qualifying_booking(&bookings, "p1").map(|b| b.id.as_str()), Some("b1"));
        assert!(can_review(Some(&u), &bookings, "p1"));
    }

    #[test]
    fn test_first_unreviewed_stay_wins() {
        let u = user();
        let bookings = vec![
            reviewed(booking("b1", "p1", BookingStatus::Completed)),
            booking("b2", "p1", BookingStatus::Completed),
            booking("b3", "p1", BookingStatus::Completed),
        ];
        let found = review_eligibility(Some(&u), &bookings, "p1").unwrap();
        assert_eq!(found.id, "b2");
    }
}
