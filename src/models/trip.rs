use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A restaurant candidate supplied by the external restaurant collaborator.
/// The core only renders these into the prompt; it never ranks or filters
/// them itself.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct RestaurantSummary {
    pub name: String,
    pub rating: Option<f32>,
    pub price_range: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, PartialEq, Eq)]
pub enum TripRequestError {
    DepartureBeforeArrival,
    EmptyDailyWindow,
}

impl fmt::Display for TripRequestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TripRequestError::DepartureBeforeArrival => {
                write!(f, "departure date is before arrival date")
            }
            TripRequestError::EmptyDailyWindow => {
                write!(f, "daily end time is not after daily start time")
            }
        }
    }
}

impl std::error::Error for TripRequestError {}

/// The trip parameters driving one generation. Immutable once constructed;
/// the validating constructor is the only way to build one.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct TripRequest {
    destination: String,
    budget: f64,
    arrival_date: NaiveDate,
    departure_date: NaiveDate,
    daily_start: NaiveTime,
    daily_end: NaiveTime,
    additional_info: Option<String>,
}

impl TripRequest {
    pub fn new(
        destination: impl Into<String>,
        budget: f64,
        arrival_date: NaiveDate,
        departure_date: NaiveDate,
        daily_start: NaiveTime,
        daily_end: NaiveTime,
        additional_info: Option<String>,
    ) -> Result<Self, TripRequestError> {
        if departure_date < arrival_date {
            return Err(TripRequestError::DepartureBeforeArrival);
        }
        if daily_end <= daily_start {
            return Err(TripRequestError::EmptyDailyWindow);
        }

        Ok(Self {
            destination: destination.into(),
            budget,
            arrival_date,
            departure_date,
            daily_start,
            daily_end,
            additional_info,
        })
    }

    pub fn destination(&self) -> &str {
        &self.destination
    }

    pub fn budget(&self) -> f64 {
        self.budget
    }

    pub fn arrival_date(&self) -> NaiveDate {
        self.arrival_date
    }

    pub fn departure_date(&self) -> NaiveDate {
        self.departure_date
    }

    pub fn daily_start(&self) -> NaiveTime {
        self.daily_start
    }

    pub fn daily_end(&self) -> NaiveTime {
        self.daily_end
    }

    pub fn additional_info(&self) -> Option<&str> {
        self.additional_info.as_deref()
    }
}
