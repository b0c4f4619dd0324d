use actix_web::{web, HttpResponse, Responder};
use bson::doc;
use chrono::Utc;
use futures::TryStreamExt;
use mongodb::{bson::oid::ObjectId, Client};
use serde::Deserialize;
use std::str::FromStr;
use std::sync::Arc;

use crate::models::itinerary::{Itinerary, NewItinerary};
use crate::services::schedule_service::{
    move_within_section, set_notes, MoveDirection, ScheduleError,
};

pub fn collection(client: &Client) -> mongodb::Collection<Itinerary> {
    client.database("DayPlanner").collection("Itineraries")
}

/*
    GET /api/itineraries
*/
pub async fn get_all(data: web::Data<Arc<Client>>) -> impl Responder {
    let client = data.into_inner();
    let collection = collection(&client);

    let sort_options = doc! { "created_at": -1 };
    let cursor = collection.find(doc! {}).sort(sort_options).limit(100).await;

    match cursor {
        Ok(cursor) => match cursor.try_collect::<Vec<Itinerary>>().await {
            Ok(itineraries) => HttpResponse::Ok().json(itineraries),
            Err(err) => {
                eprintln!("Failed to collect itineraries: {:?}", err);
                HttpResponse::InternalServerError().body("Failed to fetch itineraries")
            }
        },
        Err(err) => {
            eprintln!("Failed to retrieve itineraries: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to fetch itineraries")
        }
    }
}

/*
    GET /api/itineraries/{id}
*/
pub async fn get_by_id(path: web::Path<String>, data: web::Data<Arc<Client>>) -> impl Responder {
    let client = data.into_inner();
    let collection = collection(&client);
    let id: ObjectId = match ObjectId::parse_str(path.into_inner().as_str()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::BadRequest().body("Invalid ID"),
    };

    match collection.find_one(doc! { "_id": id }).await {
        Ok(Some(mut itinerary)) => {
            itinerary.sort_places();
            HttpResponse::Ok().json(itinerary)
        }
        Ok(None) => HttpResponse::NotFound().body("Itinerary not found"),
        Err(err) => {
            eprintln!("Failed to retrieve itinerary: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to retrieve itinerary")
        }
    }
}

/*
    POST /api/itineraries
*/
pub async fn create(
    data: web::Data<Arc<Client>>,
    input: web::Json<NewItinerary>,
) -> impl Responder {
    let client = data.into_inner();
    let collection = collection(&client);

    let curr_time = Utc::now();
    let submission = input.into_inner();
    let mut itinerary = Itinerary {
        id: None,
        name: submission.name,
        city: submission.city,
        date: submission.date,
        places: submission.places,
        created_at: Some(curr_time),
        updated_at: Some(curr_time),
    };

    match collection.insert_one(&itinerary).await {
        Ok(result) => {
            itinerary.id = result.inserted_id.as_object_id();
            HttpResponse::Created().json(itinerary)
        }
        Err(err) => {
            eprintln!("Failed to insert itinerary: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to create itinerary")
        }
    }
}

/*
    DELETE /api/itineraries/{id}
*/
pub async fn delete(path: web::Path<String>, data: web::Data<Arc<Client>>) -> impl Responder {
    let client = data.into_inner();
    let collection = collection(&client);
    let id: ObjectId = match ObjectId::parse_str(path.into_inner().as_str()) {
        Ok(id) => id,
        Err(_) => return HttpResponse::BadRequest().body("Invalid ID"),
    };

    // Deleting an id that is already gone still reports success.
    match collection.delete_one(doc! { "_id": id }).await {
        Ok(_) => HttpResponse::Ok().json(serde_json::json!({ "success": true })),
        Err(err) => {
            eprintln!("Failed to delete itinerary: {:?}", err);
            HttpResponse::InternalServerError().body("Failed to delete itinerary")
        }
    }
}

#[derive(Deserialize)]
pub struct NotesUpdate {
    pub notes: String,
}

/*
    PUT /api/itineraries/{id}/places/{place_id}/notes
*/
pub async fn update_notes(
    path: web::Path<(String, String)>,
    data: web::Data<Arc<Client>>,
    input: web::Json<NotesUpdate>,
) -> impl Responder {
    let (id, place_id) = path.into_inner();
    let client = data.into_inner();

    mutate_places(&client, &id, |places| {
        set_notes(places, &place_id, &input.notes).map(|_| true)
    })
    .await
}

#[derive(Deserialize)]
pub struct MoveRequest {
    pub direction: String,
}

/*
    PUT /api/itineraries/{id}/places/{place_id}/move
*/
pub async fn move_place(
    path: web::Path<(String, String)>,
    data: web::Data<Arc<Client>>,
    input: web::Json<MoveRequest>,
) -> impl Responder {
    let (id, place_id) = path.into_inner();
    let client = data.into_inner();

    let direction = match MoveDirection::from_str(&input.direction) {
        Ok(direction) => direction,
        Err(_) => return HttpResponse::BadRequest().body("Direction must be 'up' or 'down'"),
    };

    mutate_places(&client, &id, |places| {
        move_within_section(places, &place_id, direction)
    })
    .await
}

/// Load-mutate-store cycle shared by the notes and move handlers. The
/// mutation reports whether anything changed; unchanged schedules skip the
/// write. Last-write-wins between sessions, no versioning.
async fn mutate_places<F>(client: &Client, id: &str, mutation: F) -> HttpResponse
where
    F: FnOnce(&mut Vec<crate::models::place::ScheduledPlace>) -> Result<bool, ScheduleError>,
{
    let collection = collection(client);
    let id: ObjectId = match ObjectId::parse_str(id) {
        Ok(id) => id,
        Err(_) => return HttpResponse::BadRequest().body("Invalid ID"),
    };

    let mut itinerary = match collection.find_one(doc! { "_id": id }).await {
        Ok(Some(itinerary)) => itinerary,
        Ok(None) => return HttpResponse::NotFound().body("Itinerary not found"),
        Err(err) => {
            eprintln!("Failed to retrieve itinerary: {:?}", err);
            return HttpResponse::InternalServerError().body("Failed to retrieve itinerary");
        }
    };

    let changed = match mutation(&mut itinerary.places) {
        Ok(changed) => changed,
        Err(ScheduleError::NotFound(msg)) => return HttpResponse::NotFound().body(msg),
        Err(ScheduleError::Validation(msg)) => return HttpResponse::BadRequest().body(msg),
    };

    if changed {
        let places_bson = match bson::to_bson(&itinerary.places) {
            Ok(bson) => bson,
            Err(err) => {
                eprintln!("Failed to serialize places: {:?}", err);
                return HttpResponse::InternalServerError().body("Failed to update itinerary");
            }
        };
        let updated_at = bson::to_bson(&Utc::now()).unwrap_or(bson::Bson::Null);
        let update = doc! { "$set": { "places": places_bson, "updated_at": updated_at } };
        if let Err(err) = collection.update_one(doc! { "_id": id }, update).await {
            eprintln!("Failed to update itinerary: {:?}", err);
            return HttpResponse::InternalServerError().body("Failed to update itinerary");
        }
    }

    itinerary.sort_places();
    HttpResponse::Ok().json(itinerary)
}
