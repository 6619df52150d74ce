use std::fmt;

use crate::models::events::{FeedbackEvent, GenerationEvent, GenerationHandle};
use crate::models::trip::TripRequest;
use crate::services::audit_service::{self, AuditError, AuditLogger, BlobStore, GcsBlobStore};
use crate::services::extraction_service::{self, MalformedResponse};
use crate::services::llm_service::{CompletionBackend, LlmBackend, LlmError, OpenAiClient};
use crate::services::places_service::{GooglePlacesClient, PlaceDirectory, PlaceEnricher};
use crate::services::prompt_service::{self, SYSTEM_PROMPT};
use crate::services::restaurant_service::RestaurantSource;

#[derive(Debug)]
pub enum GenerationError {
    /// The selector names no known backend. Misconfiguration surfaces here
    /// instead of quietly producing nothing.
    UnsupportedBackend(String),
    /// Restaurant lookup failed; it is a pipeline precondition, so the
    /// whole generation aborts.
    UpstreamLookupFailure(String),
    /// The model's text carried no parseable itinerary.
    MalformedResponse(MalformedResponse),
    /// The completion call itself failed.
    CompletionFailure(LlmError),
}

impl fmt::Display for GenerationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GenerationError::UnsupportedBackend(selector) => {
                write!(f, "Unsupported LLM backend: '{}'", selector)
            }
            GenerationError::UpstreamLookupFailure(msg) => {
                write!(f, "Upstream lookup failure: {}", msg)
            }
            GenerationError::MalformedResponse(err) => write!(f, "{}", err),
            GenerationError::CompletionFailure(err) => write!(f, "Completion failure: {}", err),
        }
    }
}

impl std::error::Error for GenerationError {}

impl From<MalformedResponse> for GenerationError {
    fn from(err: MalformedResponse) -> Self {
        GenerationError::MalformedResponse(err)
    }
}

/// Sequences one generation: restaurant lookup, prompt construction, the
/// LLM completion, extraction, enrichment, and the audit write.
///
/// All four collaborators sit behind traits so the pipeline can run against
/// stubs; production wiring comes from [`GenerationOrchestrator::from_env`].
pub struct GenerationOrchestrator<R, L, P, S>
where
    R: RestaurantSource,
    L: CompletionBackend,
    P: PlaceDirectory,
    S: BlobStore,
{
    restaurants: R,
    llm: L,
    enricher: PlaceEnricher<P>,
    audit: AuditLogger<S>,
}

impl<R> GenerationOrchestrator<R, OpenAiClient, GooglePlacesClient, GcsBlobStore>
where
    R: RestaurantSource,
{
    /// Builds the live pipeline from environment configuration. The
    /// restaurant collaborator has no in-crate implementation and must be
    /// supplied by the caller.
    pub async fn from_env(restaurants: R) -> Result<Self, Box<dyn std::error::Error>> {
        dotenv::dotenv().ok();

        Ok(Self {
            restaurants,
            llm: OpenAiClient::from_env(LlmBackend::AtlasV2)?,
            enricher: PlaceEnricher::new(GooglePlacesClient::from_env()?),
            audit: AuditLogger::from_env().await?,
        })
    }
}

impl<R, L, P, S> GenerationOrchestrator<R, L, P, S>
where
    R: RestaurantSource,
    L: CompletionBackend,
    P: PlaceDirectory,
    S: BlobStore,
{
    pub fn new(restaurants: R, llm: L, enricher: PlaceEnricher<P>, audit: AuditLogger<S>) -> Self {
        Self {
            restaurants,
            llm,
            enricher,
            audit,
        }
    }

    /// Runs one full generation and returns the handle a caller needs to
    /// file feedback later. The audit write is attempted exactly once; its
    /// failure is reported but never discards the computed itinerary.
    pub async fn generate(
        &self,
        llm_choice: &str,
        request: &TripRequest,
    ) -> Result<GenerationHandle, GenerationError> {
        let backend = LlmBackend::from_selector(llm_choice)
            .ok_or_else(|| GenerationError::UnsupportedBackend(llm_choice.to_string()))?;

        let restaurants = self
            .restaurants
            .lookup_restaurants(request.destination())
            .await
            .map_err(|err| GenerationError::UpstreamLookupFailure(err.to_string()))?;

        let built = prompt_service::build_user_instruction(request, &restaurants);
        log::debug!("generating itinerary for {}", request.destination());

        let raw_text = self
            .llm
            .complete(SYSTEM_PROMPT, &[], &built.instruction)
            .await
            .map_err(GenerationError::CompletionFailure)?;

        let document = extraction_service::extract(&raw_text)?;

        let (document, failures) = self.enricher.enrich(document, request.destination()).await;
        if !failures.is_empty() {
            log::warn!(
                "{} of the itinerary's places could not be enriched",
                failures.len()
            );
        }

        let event = GenerationEvent {
            id: audit_service::unique_event_id(),
            query: built.query,
            llm: backend.as_str().to_string(),
            itinerary: document,
        };

        if let Err(err) = self.audit.log_generation(&event).await {
            log::error!("failed to record generation {}: {}", event.id, err);
        }

        Ok(GenerationHandle {
            generation_id: event.id,
            llm: event.llm,
            query: event.query,
            itinerary: event.itinerary,
        })
    }

    /// Files user feedback against a prior generation. The handle carries
    /// the original exchange, so this is a separate durable record under a
    /// fresh id; a storage failure here does surface, since there is no
    /// itinerary to protect.
    pub async fn submit_feedback(
        &self,
        handle: &GenerationHandle,
        rating: u8,
        feedback: &str,
    ) -> Result<String, AuditError> {
        let event = FeedbackEvent {
            id: audit_service::unique_event_id(),
            user_query: handle.query.clone(),
            llm: handle.llm.clone(),
            itinerary: handle.itinerary.clone(),
            user_rating: rating,
            user_feedback: feedback.to_string(),
        };

        self.audit.log_feedback(&event).await?;

        Ok(event.id)
    }
}
