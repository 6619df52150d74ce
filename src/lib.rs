//! Itinerary generation core for the Atlas travel planner.
//!
//! The pipeline runs restaurant lookup, an LLM completion constrained to a
//! rigid JSON structure, extraction of that structure from the raw model
//! text, enrichment of each place against the Google Places directory, and
//! durable audit logging of the exchange. Delivery layers (API server, CLI)
//! live outside this crate and drive it through
//! [`services::generation_service::GenerationOrchestrator`].

pub mod models;
pub mod services;

pub use models::events::GenerationHandle;
pub use models::itinerary::ItineraryDocument;
pub use models::trip::TripRequest;
pub use services::generation_service::{GenerationError, GenerationOrchestrator};
