use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use env_logger::Env;

use dayplan_api::{db, routes};

const HOST: &str = "0.0.0.0";
const PORT: u16 = 8080;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    println!("Application starting...");

    env_logger::init_from_env(Env::default().default_filter_or("info"));
    println!("Logger initialized");

    if cfg!(debug_assertions) {
        dotenv::dotenv().ok();
    } else {
        println!("Release mode");
    }

    let host = std::env::var("HOST").unwrap_or_else(|_| HOST.to_string());
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| PORT.to_string())
        .parse()
        .unwrap_or(PORT);
    println!("Attempting to bind to {}:{}", host, port);

    let mongo_uri = std::env::var("MONGODB_URI").expect("MONGODB_URI must be set");
    println!("Got MongoDB URI, attempting connection...");
    let client = db::mongo::create_mongo_client(&mongo_uri).await;
    println!("MongoDB connection established");

    println!("Starting HTTP server...");

    HttpServer::new(move || {
        App::new()
            .wrap(Logger::default())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .app_data(web::Data::new(client.clone()))
            .route("/", web::get().to(|| async { "Dayplan API is running" }))
            .route("/health", web::get().to(routes::health::health_check))
            .service(
                web::scope("/api")
                    .route("/places/search", web::get().to(routes::place::search))
                    .route(
                        "/generate-itinerary",
                        web::post().to(routes::generate::generate_itinerary),
                    )
                    .service(
                        web::scope("/itineraries")
                            .route("", web::get().to(routes::itinerary::get_all))
                            .route("", web::post().to(routes::itinerary::create))
                            .route("/{id}", web::get().to(routes::itinerary::get_by_id))
                            .route("/{id}", web::delete().to(routes::itinerary::delete))
                            .route("/{id}/calendar", web::get().to(routes::export::calendar))
                            .route("/{id}/export", web::get().to(routes::export::export_tables))
                            .route(
                                "/{id}/places/{place_id}/notes",
                                web::put().to(routes::itinerary::update_notes),
                            )
                            .route(
                                "/{id}/places/{place_id}/move",
                                web::put().to(routes::itinerary::move_place),
                            ),
                    ),
            )
    })
    .bind((host, port))?
    .run()
    .await
}
