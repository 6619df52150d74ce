use serde::{Deserialize, Serialize};

use super::itinerary::ItineraryDocument;

/// One complete prompt -> completion -> extraction -> enrichment run,
/// written to the generation log exactly once. Field names match the blob
/// payload the audit log has always stored.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct GenerationEvent {
    pub id: String,
    pub query: String,
    pub llm: String,
    pub itinerary: ItineraryDocument,
}

/// A user rating attached after the fact to a prior generation. A separate
/// durable record under its own id; it never mutates the generation event.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct FeedbackEvent {
    pub id: String,
    pub user_query: String,
    #[serde(rename = "LLM")]
    pub llm: String,
    pub itinerary: ItineraryDocument,
    pub user_rating: u8,
    pub user_feedback: String,
}

/// Everything a caller must hold to file feedback against a generation.
/// Returned from `generate` so feedback is a pure function of the handle,
/// with no session state kept inside the pipeline.
#[derive(Debug, Clone)]
pub struct GenerationHandle {
    pub generation_id: String,
    pub llm: String,
    pub query: String,
    pub itinerary: ItineraryDocument,
}
