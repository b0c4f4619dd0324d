use chrono::NaiveDateTime;
use serde::Serialize;

use crate::models::itinerary::Itinerary;
use crate::models::place::{ScheduledPlace, Section};
use crate::services::schedule_service::{section_ordered, ScheduleError};
use crate::services::time_service::{parse_time_estimate, DurationPolicy};

/// One calendar entry, ready for an iCal renderer.
#[derive(Debug, Serialize, PartialEq)]
pub struct CalendarEvent {
    pub title: String,
    pub description: String,
    pub location: String,
    pub start: NaiveDateTime,
    pub duration_minutes: i64,
    pub url: String,
}

/// One per-section table, ready for a PDF renderer. Rows are
/// [time_estimate, name, address, notes].
#[derive(Debug, Serialize, PartialEq)]
pub struct PdfSection {
    pub section: Section,
    pub rows: Vec<[String; 4]>,
}

/// Builds one calendar event per scheduled place, anchored on the itinerary
/// date. An itinerary without a date cannot be exported to a calendar.
pub fn calendar_events(
    itinerary: &Itinerary,
    policy: DurationPolicy,
) -> Result<Vec<CalendarEvent>, ScheduleError> {
    let date = itinerary.date.ok_or_else(|| {
        ScheduleError::Validation("Itinerary has no date to anchor calendar events".to_string())
    })?;

    let mut events = Vec::with_capacity(itinerary.places.len());
    for section in Section::ALL {
        for place in section_ordered(&itinerary.places, section) {
            let window = parse_time_estimate(&place.time_estimate, date, policy);
            let url = maps_link(place);

            let mut description = String::new();
            if let Some(notes) = &place.notes {
                description.push_str(notes);
                description.push_str("\n\n");
            }
            description.push_str(&format!("Address: {}\nLink: {}", place.place.address, url));

            events.push(CalendarEvent {
                title: place.place.name.clone(),
                description,
                location: place.place.address.clone(),
                start: window.start,
                duration_minutes: window.duration_minutes,
                url,
            });
        }
    }
    Ok(events)
}

/// Per-section tables in render order, skipping empty sections.
pub fn pdf_sections(itinerary: &Itinerary) -> Vec<PdfSection> {
    Section::ALL
        .iter()
        .filter_map(|&section| {
            let members = section_ordered(&itinerary.places, section);
            if members.is_empty() {
                return None;
            }
            let rows = members
                .iter()
                .map(|p| {
                    [
                        p.time_estimate.clone(),
                        p.place.name.clone(),
                        p.place.address.clone(),
                        p.notes.clone().unwrap_or_default(),
                    ]
                })
                .collect();
            Some(PdfSection { section, rows })
        })
        .collect()
}

fn maps_link(place: &ScheduledPlace) -> String {
    format!(
        "https://www.google.com/maps/search/?api=1&query={},{}&query_place_id={}",
        place.place.lat, place.place.lng, place.place.place_id
    )
}
