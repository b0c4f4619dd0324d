use serde::{Deserialize, Serialize};

use crate::models::place::{Place, ScheduledPlace};

/// Minimum number of selected places before a plan can be generated.
pub const MIN_PLACES_FOR_PLAN: usize = 3;

/// One user's in-flight trip planning state. Created when planning starts,
/// passed explicitly into every operation that needs it, and cleared with
/// [`TripSession::reset`] when the trip is abandoned. Nothing here is
/// persisted until the itinerary is explicitly saved.
#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct TripSession {
    pub city: String,
    pub lat: f64,
    pub lng: f64,
    pub categories: Vec<String>,
    pub selected_places: Vec<Place>,
    pub generated: Vec<ScheduledPlace>,
}

impl TripSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_city(&mut self, city: impl Into<String>, lat: f64, lng: f64) {
        self.city = city.into();
        self.lat = lat;
        self.lng = lng;
    }

    pub fn set_categories(&mut self, categories: Vec<String>) {
        self.categories = categories;
    }

    /// Adds a place to the selection. Idempotent: a place already selected
    /// (same `place_id`) is not added twice. Selection keeps insertion order.
    pub fn add_place(&mut self, place: Place) {
        if !self
            .selected_places
            .iter()
            .any(|p| p.place_id == place.place_id)
        {
            self.selected_places.push(place);
        }
    }

    pub fn remove_place(&mut self, place_id: &str) {
        self.selected_places.retain(|p| p.place_id != place_id);
    }

    pub fn set_generated(&mut self, generated: Vec<ScheduledPlace>) {
        self.generated = generated;
    }

    pub fn ready_to_generate(&self) -> bool {
        self.selected_places.len() >= MIN_PLACES_FOR_PLAN
    }

    /// Clears everything back to the initial state.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}
