use futures::future::join_all;
use reqwest::Client;
use serde::Deserialize;
use std::env;
use std::error::Error;
use std::fmt;
use std::time::Duration;

use crate::models::place::Place;

const SEARCH_RADIUS_METERS: u32 = 5000;
const REQUEST_TIMEOUT_SECS: u64 = 10;
// Overall bound for the whole category fan-out.
const JOIN_TIMEOUT_SECS: u64 = 20;

#[derive(Debug, Deserialize)]
struct NearbySearchResponse {
    status: String,
    #[serde(default)]
    results: Vec<NearbyResult>,
}

#[derive(Debug, Deserialize)]
struct NearbyResult {
    place_id: String,
    name: String,
    #[serde(default)]
    vicinity: Option<String>,
    #[serde(default)]
    rating: Option<f64>,
    #[serde(default)]
    price_level: Option<u8>,
    #[serde(default)]
    photos: Vec<NearbyPhoto>,
    geometry: NearbyGeometry,
    #[serde(default)]
    opening_hours: Option<NearbyOpeningHours>,
}

#[derive(Debug, Deserialize)]
struct NearbyPhoto {
    photo_reference: String,
}

#[derive(Debug, Deserialize)]
struct NearbyGeometry {
    location: NearbyLocation,
}

#[derive(Debug, Deserialize)]
struct NearbyLocation {
    lat: f64,
    lng: f64,
}

#[derive(Debug, Deserialize)]
struct NearbyOpeningHours {
    #[serde(default)]
    open_now: Option<bool>,
}

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

impl Error for PlacesError {}

impl From<reqwest::Error> for PlacesError {
    fn from(err: reqwest::Error) -> Self {
        PlacesError::HttpError(err)
    }
}

/// Client for the Google Places Nearby Search API. One request per category,
/// issued concurrently and joined under a single timeout; a failed category
/// drops out of the merged result instead of failing the search.
#[derive(Clone)]
pub struct PlacesService {
    client: Client,
    api_key: String,
}

impl PlacesService {
    pub fn new() -> Result<Self, PlacesError> {
        let api_key = env::var("GOOGLE_MAPS_API_KEY").map_err(|_| {
            PlacesError::EnvironmentError("GOOGLE_MAPS_API_KEY not set".to_string())
        })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self { client, api_key })
    }

    /// Searches every category around (lat, lng), merges the results,
    /// deduplicates by `place_id` and sorts by rating descending (ties by
    /// name so the order is deterministic).
    pub async fn search_nearby(
        &self,
        lat: f64,
        lng: f64,
        categories: &[String],
    ) -> Result<Vec<Place>, PlacesError> {
        if categories.is_empty() {
            return Ok(Vec::new());
        }

        let searches = categories
            .iter()
            .map(|category| self.search_category(lat, lng, category));

        let joined = tokio::time::timeout(
            Duration::from_secs(JOIN_TIMEOUT_SECS),
            join_all(searches),
        )
        .await
        .map_err(|_| {
            PlacesError::ResponseError("Timed out waiting for category searches".to_string())
        })?;

        let mut merged: Vec<Place> = Vec::new();
        for (category, result) in categories.iter().zip(joined) {
            match result {
                Ok(places) => merged.extend(places),
                Err(err) => {
                    eprintln!("Nearby search failed for category '{}': {}", category, err);
                }
            }
        }

        dedupe_and_rank(&mut merged);
        Ok(merged)
    }

    async fn search_category(
        &self,
        lat: f64,
        lng: f64,
        category: &str,
    ) -> Result<Vec<Place>, PlacesError> {
        let url = "https://maps.googleapis.com/maps/api/place/nearbysearch/json";

        let response = self
            .client
            .get(url)
            .query(&[
                ("location", format!("{},{}", lat, lng)),
                ("radius", SEARCH_RADIUS_METERS.to_string()),
                ("type", category.to_string()),
                ("key", self.api_key.clone()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(PlacesError::ResponseError(format!(
                "Nearby search failed with status {}: {}",
                status, error_text
            )));
        }

        let body: NearbySearchResponse = response.json().await.map_err(|e| {
            PlacesError::ResponseError(format!("Failed to parse response: {}", e))
        })?;

        // ZERO_RESULTS is a valid empty answer, everything else is an error.
        if body.status != "OK" && body.status != "ZERO_RESULTS" {
            return Err(PlacesError::ResponseError(format!(
                "Nearby search returned status {}",
                body.status
            )));
        }

        let places = body
            .results
            .into_iter()
            .map(|r| self.to_place(r, category))
            .collect();
        Ok(places)
    }

    fn to_place(&self, result: NearbyResult, category: &str) -> Place {
        let photo_url = result.photos.first().map(|photo| {
            format!(
                "https://maps.googleapis.com/maps/api/place/photo?maxwidth=400&photo_reference={}&key={}",
                photo.photo_reference, self.api_key
            )
        });

        Place {
            place_id: result.place_id,
            name: result.name,
            address: result.vicinity.unwrap_or_default(),
            rating: result.rating,
            price_level: result.price_level,
            photo_url,
            category: Some(category.to_string()),
            lat: result.geometry.location.lat,
            lng: result.geometry.location.lng,
            open_now: result.opening_hours.and_then(|h| h.open_now),
        }
    }
}

/// First occurrence of a `place_id` wins; the merged list is then ordered by
/// rating descending, unrated places last, ties broken by name.
fn dedupe_and_rank(places: &mut Vec<Place>) {
    let mut seen = std::collections::HashSet::new();
    places.retain(|p| seen.insert(p.place_id.clone()));
    places.sort_by(|a, b| {
        let ra = a.rating.unwrap_or(0.0);
        let rb = b.rating.unwrap_or(0.0);
        rb.partial_cmp(&ra)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.name.cmp(&b.name))
    });
}
