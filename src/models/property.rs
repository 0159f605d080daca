use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Property {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub location: String,
    #[serde(default)]
    pub price_per_night: f64,
    #[serde(default)]
    pub max_guests: Option<u32>,     // None when the listing does not cap guests
    #[serde(default)]
    pub images: Vec<String>,
    #[serde(default)]
    pub amenities: Vec<String>,
}

/// Search criteria for the property listing page. Empty fields match everything.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropertyFilter {
    pub location: String,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub guests: Option<u32>,
}

impl PropertyFilter {
    pub fn matches(&self, property: &Property) -> bool {
        let location = self.location.trim().to_lowercase();
        if !location.is_empty() && !property.location.to_lowercase().contains(&location) {
            return false;
        }
        if self.min_price.is_some_and(|min| property.price_per_night < min) {
            return false;
        }
        if self.max_price.is_some_and(|max| property.price_per_night > max) {
            return false;
        }
        match (self.guests, property.max_guests) {
            (Some(wanted), Some(cap)) => wanted <= cap,
            _ => true,
        }
    }

    /// Keeps the listing order of the properties that match.
    pub fn apply<'a>(&self, properties: &'a [Property]) -> Vec<&'a Property> {
        properties.iter().filter(|p| self.matches(p)).collect()
    }
}
