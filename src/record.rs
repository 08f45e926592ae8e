use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The fixed tag vocabulary phototags are labelled with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tag {
    Trees,
    Potholes,
    Bench,
    Garden,
    Sidewalk,
    Transit,
    Art,
}

impl Tag {
    pub const ALL: [Tag; 7] = [
        Tag::Trees,
        Tag::Potholes,
        Tag::Bench,
        Tag::Garden,
        Tag::Sidewalk,
        Tag::Transit,
        Tag::Art,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Tag::Trees => "trees",
            Tag::Potholes => "potholes",
            Tag::Bench => "bench",
            Tag::Garden => "garden",
            Tag::Sidewalk => "sidewalk",
            Tag::Transit => "transit",
            Tag::Art => "art",
        }
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Error)]
#[error("unknown tag '{0}' (expected one of: trees, potholes, bench, garden, sidewalk, transit, art)")]
pub struct UnknownTag(String);

impl FromStr for Tag {
    type Err = UnknownTag;

    fn from_str(s: &str) -> Result<Tag, UnknownTag> {
        match s.to_ascii_lowercase().as_str() {
            "trees" => Ok(Tag::Trees),
            "potholes" => Ok(Tag::Potholes),
            "bench" => Ok(Tag::Bench),
            "garden" => Ok(Tag::Garden),
            "sidewalk" => Ok(Tag::Sidewalk),
            "transit" => Ok(Tag::Transit),
            "art" => Ok(Tag::Art),
            other => Err(UnknownTag(other.to_string())),
        }
    }
}

/// A latitude/longitude pair in floating-point degrees.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub fn new(latitude: f64, longitude: f64) -> Coordinate {
        Coordinate {
            latitude,
            longitude,
        }
    }
}

/// A geotagged, timestamped photo record as the store hands it over. Field
/// names follow the store documents (`locationLat`, `locationLong`). The
/// store owns these records; this crate never mutates them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Phototag {
    pub id: String,
    pub location_lat: f64,
    pub location_long: f64,
    pub description: String,
    pub timestamp: String,
    #[serde(default)]
    pub upvotes: i64,
    #[serde(default)]
    pub tags: Vec<Tag>,
}

impl Phototag {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.location_lat, self.location_long)
    }

    /// Creation time parsed from the stored string, or `None` when the
    /// string is not a date. Sorting treats `None` as "after everything".
    pub fn parsed_timestamp(&self) -> Option<NaiveDateTime> {
        parse_timestamp(&self.timestamp)
    }

    /// True when this phototag carries every one of `wanted`. An empty
    /// `wanted` restricts nothing.
    pub fn has_all_tags(&self, wanted: &[Tag]) -> bool {
        wanted.iter().all(|tag| self.tags.contains(tag))
    }
}

fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.naive_utc());
    }
    if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(parsed);
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}
