use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App};
use mongodb::options::ClientOptions;
use std::sync::Arc;
use std::time::Duration;

use dayplan_api::routes;

pub struct TestApp {
    pub client: Arc<mongodb::Client>,
}

impl TestApp {
    /// Builds the app over a lazily-connecting Mongo client with short
    /// timeouts. Tests stick to handler paths that reject before touching
    /// the database, so no server needs to be running.
    pub async fn new() -> Self {
        let mongo_uri = std::env::var("MONGODB_URI")
            .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());

        let mut options = ClientOptions::parse(&mongo_uri)
            .await
            .expect("Failed to parse MongoDB URI");
        options.connect_timeout = Some(Duration::from_secs(1));
        options.server_selection_timeout = Some(Duration::from_secs(1));

        let client =
            mongodb::Client::with_options(options).expect("Failed to create MongoDB client");

        Self {
            client: Arc::new(client),
        }
    }

    /// The real route tree, mirroring main.rs.
    pub fn create_app(
        &self,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        App::new()
            .wrap(Logger::default())
            .wrap(
                Cors::default()
                    .allow_any_origin()
                    .allow_any_method()
                    .allow_any_header()
                    .max_age(3600),
            )
            .app_data(web::Data::new(self.client.clone()))
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
    }
}
