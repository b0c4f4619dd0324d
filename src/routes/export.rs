use actix_web::{web, HttpResponse, Responder};
use bson::doc;
use mongodb::{bson::oid::ObjectId, Client};
use std::sync::Arc;

use crate::routes::itinerary::collection;
use crate::services::export_service::{calendar_events, pdf_sections};
use crate::services::schedule_service::ScheduleError;
use crate::services::time_service::DurationPolicy;

#[derive(serde::Deserialize)]
pub struct CalendarParams {
    /// "fixed" (default, the 2-hour compatibility mode) or "range".
    duration: Option<String>,
}

/*
    GET /api/itineraries/{id}/calendar
*/
pub async fn calendar(
    path: web::Path<String>,
    params: web::Query<CalendarParams>,
    data: web::Data<Arc<Client>>,
) -> impl Responder {
    let policy = match params.duration.as_deref() {
        None | Some("fixed") => DurationPolicy::FixedDuration,
        Some("range") => DurationPolicy::FromRange,
        Some(other) => {
            return HttpResponse::BadRequest()
                .body(format!("Unknown duration mode '{}'", other));
        }
    };

    let itinerary = match load(&data, &path.into_inner()).await {
        Ok(itinerary) => itinerary,
        Err(response) => return response,
    };

    match calendar_events(&itinerary, policy) {
        Ok(events) => HttpResponse::Ok().json(events),
        Err(ScheduleError::Validation(msg)) => HttpResponse::BadRequest().body(msg),
        Err(ScheduleError::NotFound(msg)) => HttpResponse::NotFound().body(msg),
    }
}

/*
    GET /api/itineraries/{id}/export
*/
pub async fn export_tables(path: web::Path<String>, data: web::Data<Arc<Client>>) -> impl Responder {
    let itinerary = match load(&data, &path.into_inner()).await {
        Ok(itinerary) => itinerary,
        Err(response) => return response,
    };

    HttpResponse::Ok().json(pdf_sections(&itinerary))
}

async fn load(
    data: &web::Data<Arc<Client>>,
    id: &str,
) -> Result<crate::models::itinerary::Itinerary, HttpResponse> {
    let collection = collection(data);
    let id: ObjectId =
        ObjectId::parse_str(id).map_err(|_| HttpResponse::BadRequest().body("Invalid ID"))?;

    match collection.find_one(doc! { "_id": id }).await {
        Ok(Some(itinerary)) => Ok(itinerary),
        Ok(None) => Err(HttpResponse::NotFound().body("Itinerary not found")),
        Err(err) => {
            eprintln!("Failed to retrieve itinerary: {:?}", err);
            Err(HttpResponse::InternalServerError().body("Failed to retrieve itinerary"))
        }
    }
}
