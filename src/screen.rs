//! Screen-local state for the phototag screen: the active view, the current
//! filter criteria, and the reference coordinate fed by the location
//! tracker. All of it lives here, behind named operations; nothing is
//! process-global.

use tracing::{debug, warn};

use crate::criteria::FilterCriteria;
use crate::record::{Coordinate, Phototag};
use crate::FeedAssembler;

/// Placeholder region until the first location update arrives; the tracker
/// replaces it almost immediately.
pub const DEFAULT_REGION: Coordinate = Coordinate {
    latitude: 20.750355960509054,
    longitude: -73.97669815393424,
};

/// Which of the two renderers is active. A single toggle flips between
/// them; there is nothing else to transition to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Map,
    List,
}

impl ViewMode {
    pub fn toggled(self) -> ViewMode {
        match self {
            ViewMode::Map => ViewMode::List,
            ViewMode::List => ViewMode::Map,
        }
    }
}

/// A payload from the location side channel: a fresh position, or a
/// failure to acquire one (permissions, timeout).
#[derive(Debug, Clone, PartialEq)]
pub enum LocationUpdate {
    Position(Coordinate),
    Error(String),
}

pub struct ScreenState {
    region: Coordinate,
    criteria: FilterCriteria,
    view: ViewMode,
    alert: Option<String>,
}

impl ScreenState {
    pub fn new() -> ScreenState {
        ScreenState {
            region: DEFAULT_REGION,
            criteria: FilterCriteria::default(),
            view: ViewMode::Map,
            alert: None,
        }
    }

    pub fn region(&self) -> Coordinate {
        self.region
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view
    }

    pub fn toggle_view(&mut self) {
        self.view = self.view.toggled();
        debug!(view = ?self.view, "toggled");
    }

    /// Replace the whole criteria object. There is deliberately no per-field
    /// setter: the filter panel always hands over a complete new value.
    pub fn replace_criteria(&mut self, criteria: FilterCriteria) {
        self.criteria = criteria;
    }

    /// Apply a location-channel payload. A position is stored only when it
    /// differs from the current region, and the last write wins. An error
    /// becomes the pending alert and leaves the region untouched, so the
    /// screen keeps working with the last-known coordinate.
    pub fn apply_location(&mut self, update: LocationUpdate) {
        match update {
            LocationUpdate::Position(position) => {
                if self.region != position {
                    debug!(
                        old_lat = self.region.latitude,
                        old_long = self.region.longitude,
                        new_lat = position.latitude,
                        new_long = position.longitude,
                        "moving reference region"
                    );
                    self.region = position;
                }
            }
            LocationUpdate::Error(message) => {
                warn!(%message, "location update failed");
                self.alert = Some(message);
            }
        }
    }

    /// Hand over the pending user-visible alert, if any.
    pub fn take_alert(&mut self) -> Option<String> {
        self.alert.take()
    }

    /// Assemble the feed for the current region and criteria. Both renderers
    /// consume the result of this one call, so the map and the list always
    /// agree on membership and order.
    pub fn feed(&self, records: &[Phototag]) -> Vec<Phototag> {
        let mut assembler = FeedAssembler::new(self.region, self.criteria.clone());
        if !self.criteria.selected_tags.is_empty() {
            let wanted = self.criteria.selected_tags.clone();
            assembler = assembler.with_predicate(move |record| record.has_all_tags(&wanted));
        }
        // TODO: favorites-only needs the viewer's saved phototags; the flag
        // is carried in the criteria but no predicate can be built from a
        // record alone.
        assembler.assemble(records)
    }
}

impl Default for ScreenState {
    fn default() -> ScreenState {
        ScreenState::new()
    }
}

/// Render the feed for one view. The map view prints one pin per phototag
/// (coordinates, then the callout text); the list view prints one row
/// (timestamp, votes, description). Same records, same order, either way.
pub fn render_feed(feed: &[Phototag], mode: ViewMode) -> String {
    let mut out = String::new();
    for record in feed {
        match mode {
            ViewMode::Map => out.push_str(&format!(
                "{:.6}\t{:.6}\t{} ({} votes)\n",
                record.location_lat, record.location_long, record.description, record.upvotes
            )),
            ViewMode::List => out.push_str(&format!(
                "{}\t{}\t{}\n",
                record.timestamp, record.upvotes, record.description
            )),
        }
    }
    out
}
