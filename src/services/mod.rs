pub mod export_service;
pub mod generation_service;
pub mod places_service;
pub mod schedule_service;
pub mod time_service;
