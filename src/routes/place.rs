use actix_web::{web, HttpResponse, Responder};

use crate::services::places_service::{PlacesError, PlacesService};

#[derive(serde::Deserialize)]
pub struct QueryParams {
    lat: f64,
    lng: f64,
    /// Comma-separated provider categories, e.g. "museum,restaurant".
    categories: String,
}

/*
    GET /api/places/search
*/
pub async fn search(params: web::Query<QueryParams>) -> impl Responder {
    let categories: Vec<String> = params
        .categories
        .split(',')
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .collect();

    if categories.is_empty() {
        return HttpResponse::BadRequest().body("At least one category is required");
    }

    let service = match PlacesService::new() {
        Ok(service) => service,
        Err(err) => {
            eprintln!("Places service unavailable: {}", err);
            return HttpResponse::BadGateway().body("Failed to search places");
        }
    };

    match service
        .search_nearby(params.lat, params.lng, &categories)
        .await
    {
        Ok(places) => HttpResponse::Ok().json(places),
        Err(PlacesError::EnvironmentError(msg)) => {
            eprintln!("Places environment error: {}", msg);
            HttpResponse::BadGateway().body("Failed to search places")
        }
        Err(err) => {
            eprintln!("Places search failed: {}", err);
            HttpResponse::BadGateway().body("Failed to search places")
        }
    }
}
