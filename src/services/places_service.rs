//! Place enrichment against the Google Places API.
//!
//! Every itinerary entry is looked up by `"{name}, {destination}"`, resolved
//! to a place id, and filled in with the directory's address, coordinates,
//! reviews, ratings and photo. Enrichment is best-effort per place: a miss
//! or failure on one entry never touches the others.

use futures::stream::{self, StreamExt};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;
use std::time::Duration;

use crate::models::itinerary::{ItineraryDocument, PlaceEntry, Review};

const SEARCH_URL: &str = "https://maps.googleapis.com/maps/api/place/findplacefromtext/json";
const DETAILS_URL: &str = "https://maps.googleapis.com/maps/api/place/details/json";
const PHOTO_URL: &str = "https://maps.googleapis.com/maps/api/place/photo";

// Field mask for the details call; requesting only what the itinerary
// carries keeps the per-call billing tier down.
const DETAILS_FIELDS: &str = "name,editorial_summary,geometry,formatted_address,reviews,\
type,website,formatted_phone_number,price_level,rating,user_ratings_total,photo";

const DEFAULT_PHOTO_MAX_WIDTH: u32 = 400;
const DEFAULT_LOOKUP_CONCURRENCY: usize = 4;
const REQUEST_TIMEOUT_SECS: u64 = 10;

#[derive(Debug)]
pub enum PlacesError {
    EnvironmentError(String),
    HttpError(reqwest::Error),
    ResponseError(String),
}

impl fmt::Display for PlacesError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlacesError::EnvironmentError(msg) => write!(f, "Environment error: {}", msg),
            PlacesError::HttpError(err) => write!(f, "HTTP error: {}", err),
            PlacesError::ResponseError(msg) => write!(f, "Response error: {}", msg),
        }
    }
}

impl std::error::Error for PlacesError {}

impl From<reqwest::Error> for PlacesError {
    fn from(err: reqwest::Error) -> Self {
        PlacesError::HttpError(err)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PlaceCandidate {
    pub place_id: String,
}

#[derive(Debug, Deserialize)]
struct PlaceSearchResponse {
    status: String,
    #[serde(default)]
    candidates: Vec<PlaceCandidate>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct LatLng {
    pub lat: f64,
    pub lng: f64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Geometry {
    pub location: LatLng,
}

#[derive(Debug, Deserialize, Clone)]
pub struct EditorialSummary {
    pub overview: Option<String>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PhotoReference {
    pub photo_reference: String,
}

/// The directory's place record. Every field is optional: the API omits
/// whatever it has no data for, and a missing field must degrade to an
/// absent value rather than fail the document.
#[derive(Debug, Default, Deserialize, Clone)]
pub struct PlaceDetails {
    pub name: Option<String>,
    pub formatted_address: Option<String>,
    pub geometry: Option<Geometry>,
    pub editorial_summary: Option<EditorialSummary>,
    pub reviews: Option<Vec<Review>>,
    pub types: Option<Vec<String>>,
    pub website: Option<String>,
    pub formatted_phone_number: Option<String>,
    pub price_level: Option<u8>,
    pub rating: Option<f64>,
    pub user_ratings_total: Option<u32>,
    pub photos: Option<Vec<PhotoReference>>,
}

#[derive(Debug, Deserialize)]
struct PlaceDetailsResponse {
    status: String,
    result: Option<PlaceDetails>,
}

/// Read access to an external places directory: text search, details, and
/// photo-reference resolution.
pub trait PlaceDirectory {
    async fn search(&self, query: &str) -> Result<Vec<PlaceCandidate>, PlacesError>;

    async fn details(&self, place_id: &str) -> Result<PlaceDetails, PlacesError>;

    async fn photo_url(&self, photo_reference: &str, max_width: u32)
        -> Result<String, PlacesError>;
}

/// Live Google Places client.
pub struct GooglePlacesClient {
    http_client: Client,
    api_key: String,
}

impl GooglePlacesClient {
    pub fn from_env() -> Result<Self, PlacesError> {
        let api_key = env::var("GPLACES_API_KEY")
            .map_err(|_| PlacesError::EnvironmentError("GPLACES_API_KEY not set".to_string()))?;

        let http_client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            http_client,
            api_key,
        })
    }
}

impl PlaceDirectory for GooglePlacesClient {
    async fn search(&self, query: &str) -> Result<Vec<PlaceCandidate>, PlacesError> {
        let response = self
            .http_client
            .get(SEARCH_URL)
            .query(&[
                ("input", query),
                ("inputtype", "textquery"),
                ("fields", "place_id"),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let search: PlaceSearchResponse = response
            .json()
            .await
            .map_err(|e| PlacesError::ResponseError(format!("Failed to parse search: {}", e)))?;

        match search.status.as_str() {
            "OK" | "ZERO_RESULTS" => Ok(search.candidates),
            other => Err(PlacesError::ResponseError(format!(
                "Place search for '{}' failed with status {}",
                query, other
            ))),
        }
    }

    async fn details(&self, place_id: &str) -> Result<PlaceDetails, PlacesError> {
        let response = self
            .http_client
            .get(DETAILS_URL)
            .query(&[
                ("place_id", place_id),
                ("fields", DETAILS_FIELDS),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await?;

        let details: PlaceDetailsResponse = response
            .json()
            .await
            .map_err(|e| PlacesError::ResponseError(format!("Failed to parse details: {}", e)))?;

        if details.status != "OK" {
            return Err(PlacesError::ResponseError(format!(
                "Place details for '{}' failed with status {}",
                place_id, details.status
            )));
        }

        details.result.ok_or_else(|| {
            PlacesError::ResponseError(format!("Place details for '{}' had no result", place_id))
        })
    }

    async fn photo_url(
        &self,
        photo_reference: &str,
        max_width: u32,
    ) -> Result<String, PlacesError> {
        // The photo endpoint answers with a redirect; the renderable URL is
        // wherever the client lands after following it.
        let response = self
            .http_client
            .get(PHOTO_URL)
            .query(&[
                ("maxwidth", max_width.to_string().as_str()),
                ("photoreference", photo_reference),
                ("key", self.api_key.as_str()),
            ])
            .send()
            .await?;

        Ok(response.url().to_string())
    }
}

#[derive(Clone)]
pub struct PlaceEnrichmentConfig {
    pub photo_max_width: u32,
    pub lookup_concurrency: usize,
}

impl Default for PlaceEnrichmentConfig {
    fn default() -> Self {
        Self {
            photo_max_width: DEFAULT_PHOTO_MAX_WIDTH,
            lookup_concurrency: DEFAULT_LOOKUP_CONCURRENCY,
        }
    }
}

/// A lookup that failed outright (network or directory error) for one
/// place; the entry it belongs to is left as the model generated it.
#[derive(Debug)]
pub struct PlaceLookupFailure {
    pub day: u32,
    pub place_name: String,
    pub error: PlacesError,
}

struct ResolvedPlace {
    details: PlaceDetails,
    photo_url: Option<String>,
}

pub struct PlaceEnricher<P: PlaceDirectory> {
    directory: P,
    config: PlaceEnrichmentConfig,
}

impl<P: PlaceDirectory> PlaceEnricher<P> {
    pub fn new(directory: P) -> Self {
        Self {
            directory,
            config: PlaceEnrichmentConfig::default(),
        }
    }

    pub fn with_config(directory: P, config: PlaceEnrichmentConfig) -> Self {
        Self { directory, config }
    }

    /// Looks up every place in the document and fills in directory data.
    ///
    /// Lookups for distinct places run concurrently (bounded by the
    /// configured limit) and results are written back by day/place index,
    /// so the output order always matches the input order. Failed lookups
    /// are returned alongside the document instead of aborting it.
    pub async fn enrich(
        &self,
        mut document: ItineraryDocument,
        destination: &str,
    ) -> (ItineraryDocument, Vec<PlaceLookupFailure>) {
        let jobs: Vec<(usize, usize, String)> = document
            .data
            .iter()
            .enumerate()
            .flat_map(|(day_index, day)| {
                day.places
                    .iter()
                    .enumerate()
                    .map(move |(place_index, place)| (day_index, place_index, place.name.clone()))
            })
            .collect();

        let outcomes = stream::iter(jobs)
            .map(|(day_index, place_index, name)| async move {
                let outcome = self.lookup_place(&name, destination).await;
                (day_index, place_index, name, outcome)
            })
            .buffered(self.config.lookup_concurrency.max(1))
            .collect::<Vec<_>>()
            .await;

        let mut failures = Vec::new();
        for (day_index, place_index, name, outcome) in outcomes {
            match outcome {
                Ok(Some(resolved)) => {
                    apply_details(&mut document.data[day_index].places[place_index], resolved);
                }
                Ok(None) => {
                    log::info!(
                        "no directory match for '{}', keeping entry as generated",
                        name
                    );
                }
                Err(error) => {
                    log::warn!("lookup failed for '{}': {}", name, error);
                    failures.push(PlaceLookupFailure {
                        day: document.data[day_index].day,
                        place_name: name,
                        error,
                    });
                }
            }
        }

        (document, failures)
    }

    async fn lookup_place(
        &self,
        name: &str,
        destination: &str,
    ) -> Result<Option<ResolvedPlace>, PlacesError> {
        let query = format!("{}, {}", name, destination);
        let candidates = self.directory.search(&query).await?;

        let candidate = match candidates.into_iter().next() {
            Some(candidate) => candidate,
            None => return Ok(None),
        };

        let details = self.directory.details(&candidate.place_id).await?;

        let photo_url = match details.photos.as_ref().and_then(|photos| photos.first()) {
            Some(photo) => {
                match self
                    .directory
                    .photo_url(&photo.photo_reference, self.config.photo_max_width)
                    .await
                {
                    Ok(url) => Some(url),
                    Err(err) => {
                        // A broken photo is not worth dropping the rest of
                        // the details for.
                        log::warn!("photo resolution failed for '{}': {}", name, err);
                        None
                    }
                }
            }
            None => None,
        };

        Ok(Some(ResolvedPlace { details, photo_url }))
    }
}

fn apply_details(place: &mut PlaceEntry, resolved: ResolvedPlace) {
    let details = resolved.details;

    // The directory's canonical name replaces whatever the model called the
    // place; downstream consumers expect resolvable real-world names.
    if let Some(name) = details.name {
        place.name = name;
    }
    place.editorial_summary = details
        .editorial_summary
        .and_then(|summary| summary.overview);
    if let Some(overview) = &place.editorial_summary {
        place.description = overview.clone();
    }

    place.address = details.formatted_address;
    if let Some(geometry) = details.geometry {
        place.latitude = Some(geometry.location.lat);
        place.longitude = Some(geometry.location.lng);
    }
    place.reviews = details.reviews;
    place.place_type = details.types.and_then(|types| types.into_iter().next());
    place.website = details.website;
    place.phone = details.formatted_phone_number;
    place.price_level = details.price_level;
    place.rating = details.rating;
    place.rating_count = details.user_ratings_total;
    place.photo_url = resolved.photo_url;

    // `time` and `budget` stay untouched: the directory has no notion of
    // either, the model is the only source.
}
