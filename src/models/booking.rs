use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::models::review::ReviewRef;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

/// Property a booking points at: the raw id, or the populated listing.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum PropertyRef {
    Id(String),
    Populated {
        #[serde(rename = "_id", alias = "id")]
        id: String,
        #[serde(default)]
        title: String,
    },
}

impl PropertyRef {
    pub fn id(&self) -> &str {
        match self {
            PropertyRef::Id(id) => id,
            PropertyRef::Populated { id, .. } => id,
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub property: Option<PropertyRef>,  // null once the listing is deleted
    pub status: BookingStatus,
    #[serde(default)]
    pub review: Option<ReviewRef>,      // null until the guest reviews the stay
    #[serde(default)]
    pub check_in: Option<DateTime<Utc>>,
    #[serde(default)]
    pub check_out: Option<DateTime<Utc>>,
    #[serde(default)]
    pub guests: u32,
    #[serde(default)]
    pub total_price: f64,
}

impl Booking {
    pub fn is_for(&self, property_id: &str) -> bool {
        self.property.as_ref().is_some_and(|p| p.id() == property_id)
    }

    pub fn has_review(&self) -> bool {
        self.review.is_some()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[default]
    CreditCard,
    Paypal,
    BankTransfer,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 3] = [
        PaymentMethod::CreditCard,
        PaymentMethod::Paypal,
        PaymentMethod::BankTransfer,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PaymentMethod::CreditCard => "credit_card",
            PaymentMethod::Paypal => "paypal",
            PaymentMethod::BankTransfer => "bank_transfer",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PaymentMethod::CreditCard => "Credit card",
            PaymentMethod::Paypal => "PayPal",
            PaymentMethod::BankTransfer => "Bank transfer",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_str() == value)
    }
}

/// Body of `POST /bookings`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NewBooking {
    pub property_id: String,
    pub check_in: NaiveDate,
    pub check_out: NaiveDate,
    pub guests: u32,
    pub payment_method: PaymentMethod,
}

/// Price breakdown shown next to the booking form.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StayQuote {
    pub nights: u32,
    pub price_per_night: f64,
    pub total: f64,
}

impl StayQuote {
    /// `None` unless check-out falls after check-in.
    pub fn new(price_per_night: f64, check_in: NaiveDate, check_out: NaiveDate) -> Option<Self> {
        let nights = u32::try_from((check_out - check_in).num_days()).ok()?;
        if nights == 0 {
            return None;
        }
        Some(Self {
            nights,
            price_per_night,
            total: price_per_night * f64::from(nights),
        })
    }
}
