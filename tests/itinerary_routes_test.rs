mod common;

use actix_web::test;
use serde_json::json;
use serial_test::serial;

use common::TestApp;

#[actix_rt::test]
#[serial]
async fn test_get_itinerary_invalid_id() {
    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get()
        .uri("/api/itineraries/not-an-object-id")
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body = test::read_body(resp).await;
    assert_eq!(body, "Invalid ID");
}

#[actix_rt::test]
#[serial]
async fn test_delete_itinerary_invalid_id() {
    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::delete()
        .uri("/api/itineraries/xyz")
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}

#[actix_rt::test]
#[serial]
async fn test_create_itinerary_rejects_missing_fields() {
    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/itineraries")
        .set_json(&json!({
            "name": "Day in Barcelona"
            // Missing city and places
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}

#[actix_rt::test]
#[serial]
async fn test_create_itinerary_rejects_unknown_section() {
    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::post()
        .uri("/api/itineraries")
        .set_json(&json!({
            "name": "Day in Barcelona",
            "city": "Barcelona, Spain",
            "places": [{
                "place_id": "a",
                "name": "Museu Picasso",
                "address": "Carrer Montcada 15",
                "lat": 41.385,
                "lng": 2.181,
                "section": "Midnight",
                "order_index": 0,
                "time_estimate": "11:00 PM - 11:59 PM"
            }]
        }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}

#[actix_rt::test]
#[serial]
async fn test_move_place_rejects_bad_direction() {
    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::put()
        .uri("/api/itineraries/507f1f77bcf86cd799439011/places/a/move")
        .set_json(&json!({ "direction": "sideways" }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);

    let body = test::read_body(resp).await;
    assert_eq!(body, "Direction must be 'up' or 'down'");
}

#[actix_rt::test]
#[serial]
async fn test_move_place_invalid_itinerary_id() {
    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::put()
        .uri("/api/itineraries/bogus/places/a/move")
        .set_json(&json!({ "direction": "up" }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}

#[actix_rt::test]
#[serial]
async fn test_update_notes_invalid_itinerary_id() {
    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::put()
        .uri("/api/itineraries/bogus/places/a/notes")
        .set_json(&json!({ "notes": "Buy tickets online" }))
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}

#[actix_rt::test]
#[serial]
async fn test_calendar_rejects_unknown_duration_mode() {
    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get()
        .uri("/api/itineraries/507f1f77bcf86cd799439011/calendar?duration=forever")
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}

#[actix_rt::test]
#[serial]
async fn test_calendar_invalid_id() {
    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get()
        .uri("/api/itineraries/nope/calendar")
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}

#[actix_rt::test]
#[serial]
async fn test_export_invalid_id() {
    let test_app = TestApp::new().await;
    let app = test::init_service(test_app.create_app()).await;

    let req = test::TestRequest::get()
        .uri("/api/itineraries/nope/export")
        .to_request();

    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), 400);
}
