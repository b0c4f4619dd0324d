use actix_web::{web, HttpResponse, Responder};
use serde::Deserialize;

use crate::models::place::Place;
use crate::services::generation_service::{GenerationError, GenerationService};
use crate::services::schedule_service::{reconcile, ReconcileMode, ScheduleError};

#[derive(Debug, Deserialize)]
pub struct GenerateRequest {
    pub city: String,
    #[serde(default)]
    pub categories: Vec<String>,
    pub places: Vec<Place>,
}

/*
    POST /api/generate-itinerary
*/
pub async fn generate_itinerary(input: web::Json<GenerateRequest>) -> impl Responder {
    let request = input.into_inner();

    if request.places.is_empty() {
        return HttpResponse::BadRequest().body("No places to schedule");
    }

    let service = match GenerationService::new() {
        Ok(service) => service,
        Err(err) => {
            eprintln!("Generation service unavailable: {}", err);
            return HttpResponse::BadGateway().body("Failed to generate itinerary");
        }
    };

    println!(
        "Generating itinerary for {} with {} places (categories: {:?})",
        request.city,
        request.places.len(),
        request.categories
    );

    let proposal = match service.generate_plan(&request.city, &request.places).await {
        Ok(proposal) => proposal,
        Err(GenerationError::EnvironmentError(msg)) => {
            eprintln!("Generation environment error: {}", msg);
            return HttpResponse::BadGateway().body("Failed to generate itinerary");
        }
        Err(err) => {
            eprintln!("Generation call failed: {}", err);
            return HttpResponse::BadGateway().body("Failed to generate itinerary");
        }
    };

    // Best-effort merge: hallucinated ids are dropped, the rest is served.
    match reconcile(&request.places, &proposal, ReconcileMode::BestEffort) {
        Ok(scheduled) => HttpResponse::Ok().json(scheduled),
        Err(ScheduleError::Validation(msg)) => {
            eprintln!("Generated plan failed validation: {}", msg);
            HttpResponse::BadGateway().body("Failed to generate itinerary")
        }
        Err(ScheduleError::NotFound(msg)) => {
            eprintln!("Generated plan referenced missing data: {}", msg);
            HttpResponse::BadGateway().body("Failed to generate itinerary")
        }
    }
}
