// src/models/review.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(rename = "_id", alias = "id", default)]
    pub id: String,
    pub rating: u8,                          // 1-5 stars
    #[serde(default)]
    pub comment: String,
    #[serde(default)]
    pub user: Option<AuthorRef>,             // Author, either an id or the populated user
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Review {
    /// Display name of the author, if the API populated it.
    pub fn author_name(&self) -> Option<&str> {
        match &self.user {
            Some(AuthorRef::Populated { name, .. }) => Some(name.as_str()),
            _ => None,
        }
    }
}

/// Author reference. Mongoose sends either the raw ObjectId or, when the
/// route populates it, a small user document.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum AuthorRef {
    Id(String),
    Populated {
        #[serde(rename = "_id", alias = "id")]
        id: String,
        #[serde(default)]
        name: String,
    },
}

impl AuthorRef {
    pub fn id(&self) -> &str {
        match self {
            AuthorRef::Id(id) => id,
            AuthorRef::Populated { id, .. } => id,
        }
    }
}

/// Review attached to a booking. Any non-null value means the booking has
/// already been reviewed, so partial documents such as `{"rating": 5}` are
/// accepted.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum ReviewRef {
    Id(String),
    Embedded {
        #[serde(rename = "_id", alias = "id", default)]
        id: Option<String>,
        #[serde(default)]
        rating: Option<u8>,
        #[serde(default)]
        comment: Option<String>,
    },
}

/// Body of `POST /bookings/{id}/review`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct NewReview {
    pub rating: u8,
    pub comment: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AddReviewResponse {
    pub success: bool,
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingSummary {
    pub count: usize,
    pub average: Option<f32>,
}

impl RatingSummary {
    pub fn from_reviews(reviews: &[Review]) -> Self {
        let count = reviews.len();
        let average = if count == 0 {
            None
        } else {
            let total: u32 = reviews.iter().map(|r| u32::from(r.rating)).sum();
            Some(total as f32 / count as f32)
        };
        Self { count, average }
    }
}
