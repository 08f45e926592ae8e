use std::path::Path;

use anyhow::Context;
use geo::{Distance, Haversine, Point};
use tracing::{info, warn};

pub use criteria::{FilterCriteria, SortKey};
pub use record::{Coordinate, Phototag, Tag};
pub use screen::{LocationUpdate, ScreenState, ViewMode};
pub use sort::sort_records;
pub use store::{load_phototags, StoreError};

pub mod criteria;
pub mod record;
pub mod screen;
pub mod sort;
pub mod store;

/// Builds the feed both views render: phototags within range of a
/// reference coordinate, passed through an optional per-record predicate,
/// sorted by the active key, and capped.
pub struct FeedAssembler {
    reference: Coordinate,
    criteria: FilterCriteria,
    predicate: Option<Box<dyn Fn(&Phototag) -> bool>>,
}

impl FeedAssembler {
    pub fn new(reference: Coordinate, criteria: FilterCriteria) -> FeedAssembler {
        FeedAssembler {
            reference,
            criteria,
            predicate: None,
        }
    }

    /// Install an extra per-record filter. Nothing is installed by default;
    /// tag and favorites selection are wired in by the caller that owns
    /// that data.
    pub fn with_predicate(
        mut self,
        predicate: impl Fn(&Phototag) -> bool + 'static,
    ) -> FeedAssembler {
        self.predicate = Some(Box::new(predicate));
        self
    }

    /// Filter by distance, apply the predicate if one is installed, sort,
    /// then truncate to the result cap — in that order, so far-away records
    /// never consume cap slots. The input collection is left untouched; the
    /// feed owns clones.
    pub fn assemble(&self, records: &[Phototag]) -> Vec<Phototag> {
        let mut feed: Vec<Phototag> = records
            .iter()
            .filter(|record| {
                is_within_radius(self.criteria.radius_km, self.reference, record.coordinate())
            })
            .filter(|record| match &self.predicate {
                Some(predicate) => predicate(record),
                None => true,
            })
            .cloned()
            .collect();
        sort::sort_records(&mut feed, self.criteria.sort_key);
        feed.truncate(self.criteria.num_results);
        feed
    }
}

/// Great-circle distance between two coordinates in kilometers.
pub fn distance_km(a: Coordinate, b: Coordinate) -> f64 {
    let loc0 = Point::new(a.longitude, a.latitude);
    let loc1 = Point::new(b.longitude, b.latitude);
    Haversine::distance(loc0, loc1) / 1000.0
}

/// True when `b` lies within `radius_km` of `a`. Identical points are in
/// range whatever the radius, zero included. Coordinates are taken as
/// given — out-of-range degrees produce a distance that is exactly as
/// meaningful as the input.
pub fn is_within_radius(radius_km: f64, a: Coordinate, b: Coordinate) -> bool {
    distance_km(a, b) <= radius_km
}

/// Load the store, stand up the screen state, assemble the feed once and
/// print the active view's rendering of it.
pub fn run(
    reference: Coordinate,
    criteria: FilterCriteria,
    store_path: &Path,
    list_view: bool,
) -> anyhow::Result<()> {
    let records = store::load_phototags(store_path)
        .with_context(|| format!("loading phototag store {}", store_path.display()))?;

    let mut screen = ScreenState::new();
    screen.replace_criteria(criteria);
    screen.apply_location(LocationUpdate::Position(reference));
    if list_view {
        screen.toggle_view();
    }

    if screen.criteria().sort_key == SortKey::Unsorted {
        warn!("unrecognized sort key, leaving the feed in store order");
    }
    if screen.criteria().favorites_only {
        warn!("favorites-only filtering needs a signed-in profile; showing everything in range");
    }

    let feed = screen.feed(&records);
    info!(shown = feed.len(), total = records.len(), "assembled feed");
    print!("{}", screen::render_feed(&feed, screen.view_mode()));
    Ok(())
}
