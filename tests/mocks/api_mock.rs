use std::cell::{Cell, RefCell};

use staybook::api::ApiClient;
use staybook::error::ApiError;
use staybook::models::{
    AddReviewResponse, Booking, BookingStatus, NewBooking, NewReview, Property, PropertyRef,
    Review, ReviewRef, User,
};

/// In-memory stand-in for the booking API. Records every call in order and
/// serves scripted failures.
pub struct MockApi {
    pub authenticated: bool,
    pub user: Option<User>,
    pub properties: Vec<Property>,
    bookings: RefCell<Vec<Booking>>,
    reviews: RefCell<Vec<Review>>,
    calls: RefCell<Vec<String>>,
    pub booking_error: RefCell<Option<ApiError>>,
    pub review_error: RefCell<Option<ApiError>>,
    pub review_refusal: RefCell<Option<Option<String>>>,
    pub fail_review_refresh: Cell<bool>,
    pub fail_booking_refresh: Cell<bool>,
    pub stall_booking_refresh: Cell<bool>,
}

impl MockApi {
    pub fn signed_in(bookings: Vec<Booking>) -> Self {
        Self {
            authenticated: true,
            user: Some(guest()),
            properties: Vec::new(),
            bookings: RefCell::new(bookings),
            reviews: RefCell::new(Vec::new()),
            calls: RefCell::new(Vec::new()),
            booking_error: RefCell::new(None),
            review_error: RefCell::new(None),
            review_refusal: RefCell::new(None),
            fail_review_refresh: Cell::new(false),
            fail_booking_refresh: Cell::new(false),
            stall_booking_refresh: Cell::new(false),
        }
    }

    pub fn anonymous() -> Self {
        Self {
            authenticated: false,
            user: None,
            ..Self::signed_in(Vec::new())
        }
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    pub fn stored_bookings(&self) -> Vec<Booking> {
        self.bookings.borrow().clone()
    }

    /// Simulates the booking disappearing server side (e.g. cancelled by the host).
    pub fn remove_booking(&self, booking_id: &str) {
        self.bookings.borrow_mut().retain(|b| b.id != booking_id);
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.borrow_mut().push(call.into());
    }
}

pub fn guest() -> User {
    User {
        id: "u1".to_string(),
        name: "Ada".to_string(),
        email: "ada@example.com".to_string(),
    }
}

pub fn booking(id: &str, property_id: &str, status: BookingStatus) -> Booking {
    Booking {
        id: id.to_string(),
        property: Some(PropertyRef::Id(property_id.to_string())),
        status,
        review: None,
        check_in: None,
        check_out: None,
        guests: 2,
        total_price: 0.0,
    }
}

impl ApiClient for MockApi {
    async fn get_current_user(&self) -> Result<User, ApiError> {
        self.record("get_current_user");
        self.user.clone().ok_or(ApiError::Unauthorized)
    }

    async fn get_my_bookings(&self) -> Result<Vec<Booking>, ApiError> {
        self.record("get_my_bookings");
        if self.stall_booking_refresh.get() {
            std::future::pending::<()>().await;
        }
        if self.fail_booking_refresh.get() {
            return Err(ApiError::Transport("connection reset".to_string()));
        }
        Ok(self.stored_bookings())
    }

    async fn get_properties(&self) -> Result<Vec<Property>, ApiError> {
        self.record("get_properties");
        Ok(self.properties.clone())
    }

    async fn get_property(&self, property_id: &str) -> Result<Property, ApiError> {
        self.record(format!("get_property:{}", property_id));
        self.properties
            .iter()
            .find(|p| p.id == property_id)
            .cloned()
            .ok_or(ApiError::Status { status: 404, message: Some("Property not found".to_string()) })
    }

    async fn get_property_reviews(&self, property_id: &str) -> Result<Vec<Review>, ApiError> {
        self.record(format!("get_property_reviews:{}", property_id));
        if self.fail_review_refresh.get() {
            return Err(ApiError::Status { status: 500, message: None });
        }
        Ok(self.reviews.borrow().clone())
    }

    async fn create_booking(&self, request: &NewBooking) -> Result<Booking, ApiError> {
        self.record(format!("create_booking:{}", request.property_id));
        if let Some(err) = self.booking_error.borrow().clone() {
            return Err(err);
        }
        let mut created = booking(
            &format!("b{}", self.bookings.borrow().len() + 1),
            &request.property_id,
            BookingStatus::Pending,
        );
        created.guests = request.guests;
        self.bookings.borrow_mut().push(created.clone());
        Ok(created)
    }

    async fn add_review(
        &self,
        booking_id: &str,
        review: &NewReview,
    ) -> Result<AddReviewResponse, ApiError> {
        self.record(format!("add_review:{}", booking_id));
        if let Some(err) = self.review_error.borrow().clone() {
            return Err(err);
        }
        if let Some(message) = self.review_refusal.borrow().clone() {
            return Ok(AddReviewResponse { success: false, message });
        }

        let review_id = format!("r-{}", booking_id);
        for b in self.bookings.borrow_mut().iter_mut().filter(|b| b.id == booking_id) {
            b.review = Some(ReviewRef::Embedded {
                id: Some(review_id.clone()),
                rating: Some(review.rating),
                comment: Some(review.comment.clone()),
            });
        }
        self.reviews.borrow_mut().push(Review {
            id: review_id,
            rating: review.rating,
            comment: review.comment.clone(),
            user: None,
            created_at: None,
        });
        Ok(AddReviewResponse { success: true, message: None })
    }

    fn is_authenticated(&self) -> bool {
        self.authenticated
    }
}
