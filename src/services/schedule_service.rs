use std::collections::{HashMap, HashSet};
use std::error::Error;
use std::fmt;
use std::str::FromStr;

use crate::models::place::{Place, ProposalEntry, ScheduledPlace, Section};

#[derive(Debug, PartialEq, Eq)]
pub enum ScheduleError {
    Validation(String),
    NotFound(String),
}

impl fmt::Display for ScheduleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScheduleError::Validation(msg) => write!(f, "Validation error: {}", msg),
            ScheduleError::NotFound(msg) => write!(f, "Not found: {}", msg),
        }
    }
}

impl Error for ScheduleError {}

/// How to treat mismatches between the selection and the generated proposal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReconcileMode {
    /// Reference behavior: proposal entries with an unknown `place_id` are
    /// dropped (the generator hallucinated), and selected places the proposal
    /// never mentions are omitted from the output.
    #[default]
    BestEffort,
    /// Both of the above become validation errors instead.
    Strict,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDirection {
    Up,
    Down,
}

impl FromStr for MoveDirection {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "up" => Ok(MoveDirection::Up),
            "down" => Ok(MoveDirection::Down),
            _ => Err(()),
        }
    }
}

/// Merges the generation collaborator's proposal with the authoritative
/// selection and produces the schedule.
///
/// The proposal only carries identifiers and slot assignments; every other
/// field of the output comes from the matching [`Place`]. Sections are
/// validated against the enum before anything is constructed, and each
/// section's order indices are renumbered to a contiguous 0..n-1 (keeping
/// the proposed relative order) so the mutator invariant holds even when
/// dropped entries left gaps.
pub fn reconcile(
    selected: &[Place],
    proposal: &[ProposalEntry],
    mode: ReconcileMode,
) -> Result<Vec<ScheduledPlace>, ScheduleError> {
    // Validate shape before constructing anything.
    let mut seen: HashSet<&str> = HashSet::new();
    for entry in proposal {
        if Section::from_str(&entry.section).is_err() {
            return Err(ScheduleError::Validation(format!(
                "Unknown section '{}' for place '{}'",
                entry.section, entry.place_id
            )));
        }
        if !seen.insert(entry.place_id.as_str()) {
            return Err(ScheduleError::Validation(format!(
                "Place '{}' appears more than once in the proposal",
                entry.place_id
            )));
        }
    }

    let by_id: HashMap<&str, &Place> =
        selected.iter().map(|p| (p.place_id.as_str(), p)).collect();

    let mut merged: Vec<ScheduledPlace> = Vec::with_capacity(proposal.len());
    for entry in proposal {
        let section = Section::from_str(&entry.section).unwrap();
        match by_id.get(entry.place_id.as_str()) {
            Some(place) => merged.push(ScheduledPlace {
                place: (*place).clone(),
                section,
                order_index: entry.order_index,
                time_estimate: entry.time_estimate.clone(),
                notes: None,
            }),
            None if mode == ReconcileMode::Strict => {
                return Err(ScheduleError::Validation(format!(
                    "Proposal references unknown place '{}'",
                    entry.place_id
                )));
            }
            None => {
                println!(
                    "Dropping proposal entry for unknown place '{}'",
                    entry.place_id
                );
            }
        }
    }

    if mode == ReconcileMode::Strict {
        for place in selected {
            if !seen.contains(place.place_id.as_str()) {
                return Err(ScheduleError::Validation(format!(
                    "Selected place '{}' is missing from the proposal",
                    place.place_id
                )));
            }
        }
    }

    renumber_sections(&mut merged);
    Ok(merged)
}

/// Restores the per-section "permutation of 0..n-1" invariant, keeping the
/// existing relative order within each section.
fn renumber_sections(places: &mut [ScheduledPlace]) {
    for section in Section::ALL {
        let mut members: Vec<usize> = places
            .iter()
            .enumerate()
            .filter(|(_, p)| p.section == section)
            .map(|(i, _)| i)
            .collect();
        members.sort_by_key(|&i| places[i].order_index);
        for (local, idx) in members.into_iter().enumerate() {
            places[idx].order_index = local as u32;
        }
    }
}

/// Moves a place one step up or down within its section by swapping exactly
/// the two order indices of the place and its neighbor. Returns `Ok(false)`
/// when the place is already at the boundary (a no-op), `Ok(true)` when a
/// swap happened.
pub fn move_within_section(
    places: &mut [ScheduledPlace],
    place_id: &str,
    direction: MoveDirection,
) -> Result<bool, ScheduleError> {
    let target = places
        .iter()
        .position(|p| p.place.place_id == place_id)
        .ok_or_else(|| ScheduleError::NotFound(format!("Place '{}' not in schedule", place_id)))?;

    let section = places[target].section;
    let mut members: Vec<usize> = places
        .iter()
        .enumerate()
        .filter(|(_, p)| p.section == section)
        .map(|(i, _)| i)
        .collect();
    members.sort_by_key(|&i| places[i].order_index);

    let local = members
        .iter()
        .position(|&i| i == target)
        .expect("target is a member of its own section");

    let neighbor = match direction {
        MoveDirection::Up if local > 0 => members[local - 1],
        MoveDirection::Down if local + 1 < members.len() => members[local + 1],
        _ => return Ok(false),
    };

    let tmp = places[target].order_index;
    places[target].order_index = places[neighbor].order_index;
    places[neighbor].order_index = tmp;
    Ok(true)
}

/// Replaces the notes of exactly one scheduled place. Unknown ids are an
/// error, consistent with [`move_within_section`].
pub fn set_notes(
    places: &mut [ScheduledPlace],
    place_id: &str,
    text: &str,
) -> Result<(), ScheduleError> {
    let place = places
        .iter_mut()
        .find(|p| p.place.place_id == place_id)
        .ok_or_else(|| ScheduleError::NotFound(format!("Place '{}' not in schedule", place_id)))?;
    place.notes = if text.is_empty() {
        None
    } else {
        Some(text.to_string())
    };
    Ok(())
}

/// The section-local view in render order.
pub fn section_ordered(places: &[ScheduledPlace], section: Section) -> Vec<&ScheduledPlace> {
    let mut members: Vec<&ScheduledPlace> =
        places.iter().filter(|p| p.section == section).collect();
    members.sort_by_key(|p| p.order_index);
    members
}
