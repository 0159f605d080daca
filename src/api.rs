//! Client side of the booking REST API.
//!
//! Workflows only see the [`ApiClient`] trait; the browser build talks to the
//! Express backend through [`HttpApiClient`].
use gloo_net::http::{Request, RequestBuilder, Response};
use leptos::logging::{error, log};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::models::{AddReviewResponse, Booking, NewBooking, NewReview, Property, Review, User};

/// localStorage key holding the session token issued at login.
pub const TOKEN_KEY: &str = "token";

/// Operations the booking and review workflows need from the backend.
///
/// Futures are not `Send`: everything runs on the browser's UI thread.
#[allow(async_fn_in_trait)]
pub trait ApiClient {
    async fn get_current_user(&self) -> Result<User, ApiError>;

    async fn get_my_bookings(&self) -> Result<Vec<Booking>, ApiError>;

    async fn get_properties(&self) -> Result<Vec<Property>, ApiError>;

    async fn get_property(&self, property_id: &str) -> Result<Property, ApiError>;

    async fn get_property_reviews(&self, property_id: &str) -> Result<Vec<Review>, ApiError>;

    async fn create_booking(&self, booking: &NewBooking) -> Result<Booking, ApiError>;

    async fn add_review(
        &self,
        booking_id: &str,
        review: &NewReview,
    ) -> Result<AddReviewResponse, ApiError>;

    /// Local session check; never touches the network.
    fn is_authenticated(&self) -> bool;
}

#[derive(Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Clone)]
pub struct HttpApiClient {
    config: ApiConfig,
    token: Option<String>,
}

impl HttpApiClient {
    pub fn new(config: ApiConfig) -> Self {
        Self { config, token: None }
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.is_empty());
        self
    }

    /// Client carrying the token of the current browser session, if any.
    pub fn from_session(config: ApiConfig) -> Self {
        Self::new(config).with_token(stored_token())
    }

    fn url(&self, path: &str) -> String {
        self.config.endpoint(path)
    }

    fn authorize(&self, builder: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => builder.header("Authorization", &format!("Bearer {}", token)),
            None => builder,
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.url(path);
        log!("[API] GET {}", url);
        let response = self.authorize(Request::get(&url)).send().await?;
        read_response(&url, response).await
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let url = self.url(path);
        log!("[API] POST {}", url);
        let response = self.authorize(Request::post(&url)).json(body)?.send().await?;
        read_response(&url, response).await
    }
}

async fn read_response<T: DeserializeOwned>(url: &str, response: Response) -> Result<T, ApiError> {
    if response.ok() {
        return Ok(response.json::<T>().await?);
    }

    let status = response.status();
    if status == 401 {
        return Err(ApiError::Unauthorized);
    }
    let message = response
        .json::<ErrorBody>()
        .await
        .ok()
        .and_then(|body| body.message);
    error!("[API] {} failed with status {}: {:?}", url, status, message);
    Err(ApiError::Status { status, message })
}

fn property_path(property_id: &str) -> String {
    format!("/properties/{}", urlencoding::encode(property_id))
}

impl ApiClient for HttpApiClient {
    async fn get_current_user(&self) -> Result<User, ApiError> {
        self.get_json("/auth/me").await
    }

    async fn get_my_bookings(&self) -> Result<Vec<Booking>, ApiError> {
        self.get_json("/bookings/my-bookings").await
    }

    async fn get_properties(&self) -> Result<Vec<Property>, ApiError> {
        self.get_json("/properties").await
    }

    async fn get_property(&self, property_id: &str) -> Result<Property, ApiError> {
        self.get_json(&property_path(property_id)).await
    }

    async fn get_property_reviews(&self, property_id: &str) -> Result<Vec<Review>, ApiError> {
        self.get_json(&format!("{}/reviews", property_path(property_id))).await
    }

    async fn create_booking(&self, booking: &NewBooking) -> Result<Booking, ApiError> {
        self.post_json("/bookings", booking).await
    }

    async fn add_review(
        &self,
        booking_id: &str,
        review: &NewReview,
    ) -> Result<AddReviewResponse, ApiError> {
        let path = format!("/bookings/{}/review", urlencoding::encode(booking_id));
        self.post_json(&path, review).await
    }

    fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }
}

/// Session token saved by the login page.
#[cfg(target_arch = "wasm32")]
pub fn stored_token() -> Option<String> {
    gloo_utils::window()
        .local_storage()
        .ok()
        .flatten()?
        .get_item(TOKEN_KEY)
        .ok()
        .flatten()
}

/// There is no browser session during server rendering.
#[cfg(not(target_arch = "wasm32"))]
pub fn stored_token() -> Option<String> {
    None
}
