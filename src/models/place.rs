use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Coarse time-of-day bucket for a scheduled place.
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Section {
    Morning,
    Afternoon,
    Evening,
}

impl Section {
    pub const ALL: [Section; 3] = [Section::Morning, Section::Afternoon, Section::Evening];

    pub fn as_str(&self) -> &'static str {
        match self {
            Section::Morning => "Morning",
            Section::Afternoon => "Afternoon",
            Section::Evening => "Evening",
        }
    }
}

impl FromStr for Section {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Morning" => Ok(Section::Morning),
            "Afternoon" => Ok(Section::Afternoon),
            "Evening" => Ok(Section::Evening),
            _ => Err(()),
        }
    }
}

impl fmt::Display for Section {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A point of interest as returned by the places provider. Immutable once
/// fetched; `place_id` is the provider's stable identifier and the unique key
/// everywhere in this crate.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Place {
    pub place_id: String,
    pub name: String,
    pub address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_level: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub photo_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub lat: f64,
    pub lng: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open_now: Option<bool>,
}

/// A place slotted into the day plan: the provider fields plus the schedule
/// assignment. `order_index` is unique within a section, not globally.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ScheduledPlace {
    #[serde(flatten)]
    pub place: Place,
    pub section: Section,
    pub order_index: u32,
    pub time_estimate: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// One entry of the generation collaborator's response. `section` stays a
/// plain string here; the reconciler validates it against the enum instead of
/// letting serde reject the whole payload.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ProposalEntry {
    pub place_id: String,
    pub section: String,
    pub order_index: u32,
    pub time_estimate: String,
}
