use std::fmt;

use crate::models::trip::RestaurantSummary;

#[derive(Debug)]
pub struct RestaurantLookupError(String);

impl RestaurantLookupError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

impl fmt::Display for RestaurantLookupError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "restaurant lookup failed: {}", self.0)
    }
}

impl std::error::Error for RestaurantLookupError {}

/// Upstream collaborator that resolves a destination to an ordered list of
/// restaurant candidates. The live implementation (a Yelp integration) is
/// supplied by the embedding application; the pipeline only consumes the
/// returned summaries as prompt context.
pub trait RestaurantSource {
    async fn lookup_restaurants(
        &self,
        destination: &str,
    ) -> Result<Vec<RestaurantSummary>, RestaurantLookupError>;
}
