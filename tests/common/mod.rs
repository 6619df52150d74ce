//! Shared stubs for pipeline tests: canned collaborators standing in for
//! the restaurant lookup, the LLM, the places directory, and blob storage.

use std::sync::{Arc, Mutex};

use chrono::{NaiveDate, NaiveTime};

use atlas_itinerary::models::trip::{RestaurantSummary, TripRequest};
use atlas_itinerary::services::audit_service::{AuditError, BlobStore};
use atlas_itinerary::services::llm_service::{ChatMessage, CompletionBackend, LlmError};
use atlas_itinerary::services::places_service::{
    EditorialSummary, Geometry, LatLng, PhotoReference, PlaceCandidate, PlaceDetails,
    PlaceDirectory, PlacesError,
};
use atlas_itinerary::services::restaurant_service::{RestaurantLookupError, RestaurantSource};

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

pub fn paris_request() -> TripRequest {
    TripRequest::new(
        "Paris",
        1000.0,
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
        NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
        NaiveTime::from_hms_opt(9, 0, 0).unwrap(),
        NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
        Some("museums".to_string()),
    )
    .unwrap()
}

/// A fixed two-day itinerary in the exact wire shape the model is told to
/// emit, wrapped in the kind of prose a chat model produces.
pub fn two_day_response() -> String {
    let json = r#"{"Name":"Weekend in Paris","description":"Two days of museums and strolls","budget":"1000","data":[{"day":1,"day_description":"Historical Exploration","places":[{"name":"Louvre Museum","description":"World's largest art museum","time":"20 minutes","budget":"17"},{"name":"Notre-Dame","description":"Gothic cathedral","time":"10 minutes","budget":"0"},{"name":"Sainte-Chapelle","description":"Royal chapel","time":"5 minutes","budget":"13"}]},{"day":2,"day_description":"Urban Exploration","places":[{"name":"Eiffel Tower","description":"Iron lattice tower","time":"25 minutes","budget":"28"},{"name":"Musee d'Orsay","description":"Impressionist museum","time":"15 minutes","budget":"16"}]}]}"#;
    format!("Here is your itinerary:\n{}\nEnjoy your trip!", json)
}

pub struct StubRestaurants;

impl RestaurantSource for StubRestaurants {
    async fn lookup_restaurants(
        &self,
        _destination: &str,
    ) -> Result<Vec<RestaurantSummary>, RestaurantLookupError> {
        Ok(vec![RestaurantSummary {
            name: "Le Comptoir".to_string(),
            rating: Some(4.5),
            price_range: Some("$$".to_string()),
            address: None,
        }])
    }
}

pub struct FailingRestaurants;

impl RestaurantSource for FailingRestaurants {
    async fn lookup_restaurants(
        &self,
        _destination: &str,
    ) -> Result<Vec<RestaurantSummary>, RestaurantLookupError> {
        Err(RestaurantLookupError::new("collaborator unreachable"))
    }
}

/// Completion backend that always answers with the same text.
pub struct FixedCompletion(pub String);

impl CompletionBackend for FixedCompletion {
    async fn complete(
        &self,
        _system_prompt: &str,
        _history: &[ChatMessage],
        _input: &str,
    ) -> Result<String, LlmError> {
        Ok(self.0.clone())
    }
}

fn canned_details(place_id: &str) -> PlaceDetails {
    PlaceDetails {
        name: Some(format!("Canonical {}", place_id)),
        formatted_address: Some("1 Rue de Rivoli, 75001 Paris, France".to_string()),
        geometry: Some(Geometry {
            location: LatLng {
                lat: 48.8606,
                lng: 2.3376,
            },
        }),
        editorial_summary: Some(EditorialSummary {
            overview: Some("A landmark every visitor knows.".to_string()),
        }),
        reviews: None,
        types: Some(vec!["tourist_attraction".to_string()]),
        website: Some("https://example.com".to_string()),
        formatted_phone_number: Some("+33 1 00 00 00 00".to_string()),
        price_level: Some(2),
        rating: Some(4.7),
        user_ratings_total: Some(12345),
        photos: Some(vec![PhotoReference {
            photo_reference: format!("photo-ref-{}", place_id),
        }]),
    }
}

/// Directory that resolves every query to exactly one candidate.
pub struct OneMatchDirectory;

impl PlaceDirectory for OneMatchDirectory {
    async fn search(&self, query: &str) -> Result<Vec<PlaceCandidate>, PlacesError> {
        let slug = query
            .split(',')
            .next()
            .unwrap_or(query)
            .to_lowercase()
            .replace(' ', "-");
        Ok(vec![PlaceCandidate {
            place_id: format!("place-{}", slug),
        }])
    }

    async fn details(&self, place_id: &str) -> Result<PlaceDetails, PlacesError> {
        Ok(canned_details(place_id))
    }

    async fn photo_url(
        &self,
        photo_reference: &str,
        max_width: u32,
    ) -> Result<String, PlacesError> {
        Ok(format!(
            "https://photos.example/{}?maxwidth={}",
            photo_reference, max_width
        ))
    }
}

/// Directory with no match for anything.
pub struct EmptyDirectory;

impl PlaceDirectory for EmptyDirectory {
    async fn search(&self, _query: &str) -> Result<Vec<PlaceCandidate>, PlacesError> {
        Ok(Vec::new())
    }

    async fn details(&self, place_id: &str) -> Result<PlaceDetails, PlacesError> {
        Err(PlacesError::ResponseError(format!(
            "unexpected details call for {}",
            place_id
        )))
    }

    async fn photo_url(
        &self,
        _photo_reference: &str,
        _max_width: u32,
    ) -> Result<String, PlacesError> {
        Err(PlacesError::ResponseError("unexpected photo call".to_string()))
    }
}

/// Directory whose search errors for queries containing a marker substring
/// and behaves like `OneMatchDirectory` otherwise.
pub struct FlakyDirectory {
    pub fail_on: String,
}

impl PlaceDirectory for FlakyDirectory {
    async fn search(&self, query: &str) -> Result<Vec<PlaceCandidate>, PlacesError> {
        if query.contains(&self.fail_on) {
            return Err(PlacesError::ResponseError(format!(
                "simulated outage for '{}'",
                query
            )));
        }
        OneMatchDirectory.search(query).await
    }

    async fn details(&self, place_id: &str) -> Result<PlaceDetails, PlacesError> {
        OneMatchDirectory.details(place_id).await
    }

    async fn photo_url(
        &self,
        photo_reference: &str,
        max_width: u32,
    ) -> Result<String, PlacesError> {
        OneMatchDirectory.photo_url(photo_reference, max_width).await
    }
}

/// Directory identical to `OneMatchDirectory` but with no photos on file.
pub struct NoPhotoDirectory;

impl PlaceDirectory for NoPhotoDirectory {
    async fn search(&self, query: &str) -> Result<Vec<PlaceCandidate>, PlacesError> {
        OneMatchDirectory.search(query).await
    }

    async fn details(&self, place_id: &str) -> Result<PlaceDetails, PlacesError> {
        Ok(PlaceDetails {
            photos: None,
            ..canned_details(place_id)
        })
    }

    async fn photo_url(
        &self,
        _photo_reference: &str,
        _max_width: u32,
    ) -> Result<String, PlacesError> {
        Err(PlacesError::ResponseError("unexpected photo call".to_string()))
    }
}

pub type RecordedWrites = Arc<Mutex<Vec<(String, String, Vec<u8>)>>>;

/// Blob store that records every write for later assertions.
#[derive(Clone)]
pub struct RecordingStore {
    pub writes: RecordedWrites,
}

impl RecordingStore {
    pub fn new() -> Self {
        Self {
            writes: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl BlobStore for RecordingStore {
    async fn put_object(
        &self,
        bucket: &str,
        object: &str,
        data: Vec<u8>,
    ) -> Result<(), AuditError> {
        self.writes
            .lock()
            .unwrap()
            .push((bucket.to_string(), object.to_string(), data));
        Ok(())
    }
}

/// Blob store whose backend is down.
pub struct UnavailableStore;

impl BlobStore for UnavailableStore {
    async fn put_object(
        &self,
        _bucket: &str,
        _object: &str,
        _data: Vec<u8>,
    ) -> Result<(), AuditError> {
        Err(AuditError::StorageUnavailable("bucket offline".to_string()))
    }
}
