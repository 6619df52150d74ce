use crate::models::trip::{RestaurantSummary, TripRequest};

/// Fixed behavioral context for every conversation turn. Supplied verbatim
/// as the system prompt; it never varies by request.
pub const SYSTEM_PROMPT: &str = "\
You are an expert intelligent AI itinerary planner with extensive knowledge of places \
worldwide. Your goal is to plan an optimized itinerary for the user based on their \
specific interests and preferences, geographical proximity, and efficient routes to \
minimize travel time. To achieve this, follow these instructions:

1. Suggest at least 3 activities per day. Each activity should include the name of the \
place, a brief description, estimated cost, and time to reach the place.

2. Generate a well-structured itinerary including day-to-day activities, timings to \
visit each location, and estimated costs for the user's reference.

3. Take into account factors such as geographical proximity between destinations, \
transportation options, and other logistical considerations when planning the route.

By following these guidelines, you will create a comprehensive and optimized itinerary \
that meets the user's expectations while ensuring minimal travel time.";

// The exact structure the model must emit. Kept as a single example object
// rather than a formal schema; the extraction step only needs the model to
// stay inside one balanced JSON object.
const ITINERARY_FORMAT: &str = r#"{"Name":"name of the trip", "description":"description of the entire trip", "budget":"budget of the entire thing", "data": [{"day":1, "day_description":"Description based on the entire day's places, in a couple of words: `Historical Exploration`, `Spiritual Tour`, `Adventurous Journey`, `Dayout in a beach`, `Urban Exploration`, `Wildlife Safari`, `Relaxing Spa Day`, `Artistic Getaway`, `Romantic Getaway`, `Desert Safari`, `Island Hopping Adventure`", "places":[{"name":"Place Name", "description":"Place Description", "time": "time to reach this place", "budget":"cost"}, {"name":"Place Name 2", "description":"Place Description 2", "time": "time to reach this place", "budget":"cost"}]}, {"day":2, "day_description":"Description based on the entire day's places", "places":[{"name":"Place Name", "description":"Place Description", "time": "time to reach this place", "budget":"cost"}]}]}"#;

/// The two renditions of one request: `query` is the human-readable intent
/// kept for audit logs, `instruction` is what actually goes to the model.
/// Only `instruction` carries formatting directives.
#[derive(Debug, Clone)]
pub struct UserInstruction {
    pub query: String,
    pub instruction: String,
}

pub fn build_user_instruction(
    request: &TripRequest,
    restaurants: &[RestaurantSummary],
) -> UserInstruction {
    let additional = match request.additional_info() {
        Some(info) => format!(" Consider additional information regarding {}.", info),
        None => String::new(),
    };

    let query = format!(
        "I am planning a trip to {} from {} to {} with a budget of ${}. \
         Start the itinerary each day from {} to {}.{}",
        request.destination(),
        request.arrival_date(),
        request.departure_date(),
        request.budget(),
        request.daily_start().format("%H:%M"),
        request.daily_end().format("%H:%M"),
        additional,
    );

    let instruction = format!(
        "{}\nConsider budget, timings and requirements. Include estimated cost for each \
         activity.\nUse this restaurants list [{}] if needed or suggest by yourself.\n\
         Structure the itinerary as follows:\n{}\n\
         Note: Do not include any extra information outside this structure.",
        query,
        render_restaurants(restaurants),
        ITINERARY_FORMAT,
    );

    UserInstruction { query, instruction }
}

fn render_restaurants(restaurants: &[RestaurantSummary]) -> String {
    restaurants
        .iter()
        .map(|restaurant| match restaurant.rating {
            Some(rating) => format!("{} (rated {:.1})", restaurant.name, rating),
            None => restaurant.name.clone(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}
