pub mod events;
pub mod itinerary;
pub mod trip;
