use chrono::NaiveDate;
use leptos::logging::{error, log};

use crate::api::ApiClient;
use crate::error::{ApiError, WorkflowError};
use crate::models::{Booking, NewBooking, PaymentMethod, Property, StayQuote};

pub const BOOKING_SUCCESS: &str = "Booking submitted successfully!";
pub const BOOKING_FAILED: &str = "Booking failed. Please try again.";
pub const DEFAULT_GUESTS: u32 = 1;

/// Where a form is in `Idle -> Submitting -> Succeeded | Failed`.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmitPhase {
    #[default]
    Idle,
    Submitting,
    Succeeded(String),
    Failed(String),
}

/// State of the booking form on a property page.
#[derive(Debug, Clone, PartialEq)]
pub struct BookingForm {
    pub property_id: String,
    pub max_guests: Option<u32>,
    pub check_in: String,        // yyyy-mm-dd as typed, empty until picked
    pub check_out: String,
    pub guests: u32,
    pub payment_method: PaymentMethod,
    phase: SubmitPhase,
}

impl BookingForm {
    pub fn new(property_id: impl Into<String>, max_guests: Option<u32>) -> Self {
        Self {
            property_id: property_id.into(),
            max_guests,
            check_in: String::new(),
            check_out: String::new(),
            guests: DEFAULT_GUESTS,
            payment_method: PaymentMethod::default(),
            phase: SubmitPhase::Idle,
        }
    }

    pub fn for_property(property: &Property) -> Self {
        Self::new(property.id.clone(), property.max_guests)
    }

    pub fn phase(&self) -> &SubmitPhase {
        &self.phase
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == SubmitPhase::Submitting
    }

    /// Confirmation or error text to show under the form.
    pub fn message(&self) -> Option<&str> {
        match &self.phase {
            SubmitPhase::Succeeded(text) | SubmitPhase::Failed(text) => Some(text),
            _ => None,
        }
    }

    /// Price for the dates entered so far, if they form a valid stay.
    pub fn quote(&self, price_per_night: f64) -> Option<StayQuote> {
        let check_in = parse_date(&self.check_in)?;
        let check_out = parse_date(&self.check_out)?;
        StayQuote::new(price_per_night, check_in, check_out)
    }

    /// Checks the form without changing it.
    pub fn validate(&self, authenticated: bool) -> Result<NewBooking, WorkflowError> {
        if !authenticated {
            return Err(WorkflowError::AuthRequired);
        }
        if self.check_in.trim().is_empty() || self.check_out.trim().is_empty() || self.guests == 0 {
            return Err(WorkflowError::invalid("Please fill in all booking details"));
        }

        let check_in = parse_date(&self.check_in)
            .ok_or_else(|| WorkflowError::invalid("Check-in date is not a valid date"))?;
        let check_out = parse_date(&self.check_out)
            .ok_or_else(|| WorkflowError::invalid("Check-out date is not a valid date"))?;
        if check_out <= check_in {
            return Err(WorkflowError::invalid("Check-out must be after check-in"));
        }
        if let Some(cap) = self.max_guests {
            if self.guests > cap {
                return Err(WorkflowError::invalid(format!(
                    "This property accommodates at most {} guests",
                    cap
                )));
            }
        }

        Ok(NewBooking {
            property_id: self.property_id.clone(),
            check_in,
            check_out,
            guests: self.guests,
            payment_method: self.payment_method,
        })
    }

    /// Validates and marks the form as submitting. Nothing is sent when this
    /// fails.
    pub fn begin(&mut self, authenticated: bool) -> Result<NewBooking, WorkflowError> {
        if self.is_submitting() {
            return Err(WorkflowError::InFlight);
        }
        match self.validate(authenticated) {
            Ok(request) => {
                log!(
                    "[BOOKING] Submitting booking for {} ({} to {}, {} guests)",
                    request.property_id,
                    request.check_in,
                    request.check_out,
                    request.guests
                );
                self.phase = SubmitPhase::Submitting;
                Ok(request)
            }
            Err(err) => {
                self.phase = SubmitPhase::Failed(err.to_string());
                Err(err)
            }
        }
    }

    /// Applies the API outcome of the request produced by [`begin`](Self::begin).
    pub fn complete(&mut self, result: Result<Booking, ApiError>) -> Result<Booking, WorkflowError> {
        match result {
            Ok(booking) => {
                log!("[BOOKING] Booking {} created", booking.id);
                self.clear_fields();
                self.phase = SubmitPhase::Succeeded(BOOKING_SUCCESS.to_string());
                Ok(booking)
            }
            Err(err) => {
                error!("[BOOKING] Booking failed: {:?}", err);
                let err = WorkflowError::from_api(&err, BOOKING_FAILED);
                self.phase = SubmitPhase::Failed(err.to_string());
                Err(err)
            }
        }
    }

    pub async fn submit<C: ApiClient>(&mut self, api: &C) -> Result<Booking, WorkflowError> {
        let request = self.begin(api.is_authenticated())?;
        let result = api.create_booking(&request).await;
        self.complete(result)
    }

    /// Back to an empty, idle form.
    pub fn reset(&mut self) {
        self.clear_fields();
        self.phase = SubmitPhase::Idle;
    }

    fn clear_fields(&mut self) {
        self.check_in.clear();
        self.check_out.clear();
        self.guests = DEFAULT_GUESTS;
    }
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::BookingStatus;
    use crate::workflow::fixtures::booking;

    fn filled() -> BookingForm {
        let mut form = BookingForm::new("p1", Some(4));
        form.check_in = "2025-06-01".to_string();
        form.check_out = "2025-06-03".to_string();
        form.guests = 2;
        form
    }

    #[test]
    fn test_new_form_defaults() {
        let form = BookingForm::new("p1", None);
        assert_eq!(form.check_in, "");
        assert_eq!(form.check_out, "");
        assert_eq!(form.guests, 1);
        assert_eq!(form.payment_method, PaymentMethod::CreditCard);
        assert_eq!(form.phase(), &SubmitPhase::Idle);
    }

    #[test]
    fn test_auth_checked_first() {
        let mut form = BookingForm::new("p1", None);
        assert_eq!(form.begin(false), Err(WorkflowError::AuthRequired));
        assert_eq!(form.message(), Some("Please log in to continue"));
    }

    #[test]
    fn test_missing_fields() {
        let mut form = filled();
        form.check_in.clear();
        assert!(matches!(form.begin(true), Err(WorkflowError::ValidationError(_))));
        assert!(!form.is_submitting());

        let mut form = filled();
        form.guests = 0;
        assert_eq!(
            form.validate(true),
            Err(WorkflowError::invalid("Please fill in all booking details"))
        );
    }

    #[test]
    fn test_date_checks() {
        let mut form = filled();
        form.check_out = "2025-06-01".to_string();
        assert_eq!(
            form.validate(true),
            Err(WorkflowError::invalid("Check-out must be after check-in"))
        );

        let mut form = filled();
        form.check_in = "06/01/2025".to_string();
        assert_eq!(
            form.validate(true),
            Err(WorkflowError::invalid("Check-in date is not a valid date"))
        );
    }

    #[test]
    fn test_guest_cap() {
        let mut form = filled();
        form.guests = 5;
        assert_eq!(
            form.validate(true),
            Err(WorkflowError::invalid("This property accommodates at most 4 guests"))
        );
    }

    #[test]
    fn test_begin_builds_request_and_blocks_reentry() {
        let mut form = filled();
        let request = form.begin(true).unwrap();
        assert_eq!(request.property_id, "p1");
        assert_eq!(request.guests, 2);
        assert!(form.is_submitting());

        assert_eq!(form.begin(true), Err(WorkflowError::InFlight));
        assert!(form.is_submitting());
    }

    #[test]
    fn test_success_resets_fields() {
        let mut form = filled();
        form.begin(true).unwrap();
        let created = form.complete(Ok(booking("b1", "p1", BookingStatus::Pending))).unwrap();

        assert_eq!(created.id, "b1");
        assert_eq!(form.message(), Some(BOOKING_SUCCESS));
        assert_eq!((form.check_in.as_str(), form.check_out.as_str(), form.guests), ("", "", 1));
    }

    #[test]
    fn test_failure_keeps_fields() {
        let mut form = filled();
        form.begin(true).unwrap();
        let err = form
            .complete(Err(ApiError::Status { status: 500, message: None }))
            .unwrap_err();

        assert_eq!(err, WorkflowError::Api(BOOKING_FAILED.to_string()));
        assert_eq!(form.phase(), &SubmitPhase::Failed(BOOKING_FAILED.to_string()));
        assert_eq!(form.check_in, "2025-06-01");
        assert!(!form.is_submitting());
    }

    #[test]
    fn test_reset_returns_to_idle() {
        let mut form = filled();
        form.begin(true).unwrap();
        form.complete(Ok(booking("b1", "p1", BookingStatus::Pending))).unwrap();
        form.reset();
        assert_eq!(form.phase(), &SubmitPhase::Idle);
        assert!(form.message().is_none());
    }

    #[test]
    fn test_quote() {
        let form = filled();
        let quote = form.quote(100.0).unwrap();
        assert_eq!(quote.nights, 2);
        assert_eq!(quote.total, 200.0);
        assert!(BookingForm::new("p1", None).quote(100.0).is_none());
    }
}
