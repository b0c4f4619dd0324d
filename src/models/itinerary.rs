use chrono::{DateTime, NaiveDate, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

use crate::models::place::ScheduledPlace;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Itinerary {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub city: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    pub places: Vec<ScheduledPlace>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl Itinerary {
    /// Serve places grouped the way every consumer renders them:
    /// Morning, Afternoon, Evening, each section by order_index ascending.
    pub fn sort_places(&mut self) {
        self.places
            .sort_by_key(|p| (p.section as u8, p.order_index));
    }
}

/// Request body for creating an itinerary.
#[derive(Debug, Deserialize, Serialize)]
pub struct NewItinerary {
    pub name: String,
    pub city: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
    pub places: Vec<ScheduledPlace>,
}
