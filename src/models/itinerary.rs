use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The structured multi-day travel plan, wire-faithful to the JSON structure
/// the model is instructed to emit. Field names mirror that structure
/// (`Name`, `day_description`, ...) so a parsed document serializes back to
/// the same shape the audit log stores.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ItineraryDocument {
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Carried as emitted by the model; it may be a string ("$1000") or a
    /// number and is not validated by the core.
    #[serde(default)]
    pub budget: Value,
    #[serde(default)]
    pub data: Vec<DayPlan>,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct DayPlan {
    pub day: u32,
    #[serde(default)]
    pub day_description: String,
    #[serde(default)]
    pub places: Vec<PlaceEntry>,
}

/// One activity within a day. The first four fields come from the model;
/// everything optional is filled in by enrichment. `None` means the
/// directory did not provide the field, which is distinct from an empty
/// value it did provide.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PlaceEntry {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub budget: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub editorial_summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviews: Option<Vec<Review>>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub place_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(
        rename = "formatted_phone_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_level: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(rename = "user_ratings_total", skip_serializing_if = "Option::is_none")]
    pub rating_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
}

/// A user review as returned by the places directory.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Review {
    #[serde(default)]
    pub author_name: Option<String>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub relative_time_description: Option<String>,
}
