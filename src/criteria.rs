use std::convert::Infallible;
use std::str::FromStr;

use crate::record::Tag;

/// Which ordering the feed uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Ascending by creation time, earliest first.
    #[default]
    Date,
    /// Currently also ascending by creation time; no popularity signal
    /// exists yet.
    Popular,
    /// Ascending by upvote count.
    Votes,
    /// Currently also ascending by upvote count; favorite counts are not
    /// part of the record yet.
    Favorites,
    /// Fallback for unrecognized key names: leaves the feed in store order.
    Unsorted,
}

impl FromStr for SortKey {
    type Err = Infallible;

    /// Every string parses; names outside the known set degrade to
    /// [`SortKey::Unsorted`] rather than failing, matching how the screen
    /// treats an unknown key.
    fn from_str(s: &str) -> Result<SortKey, Infallible> {
        Ok(match s.to_ascii_lowercase().as_str() {
            "date" => SortKey::Date,
            "popular" => SortKey::Popular,
            "votes" => SortKey::Votes,
            "favorites" => SortKey::Favorites,
            _ => SortKey::Unsorted,
        })
    }
}

/// Everything the filter panel controls, handed over as one value. There
/// are no per-field setters anywhere: a new panel selection replaces the
/// whole object.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCriteria {
    /// Keep phototags within this many kilometers of the reference.
    pub radius_km: f64,
    /// Keep at most this many phototags after sorting.
    pub num_results: usize,
    /// Keep only phototags carrying all of these; empty means no restriction.
    pub selected_tags: Vec<Tag>,
    /// Keep only the viewer's favorites. Carried for the panel's sake; no
    /// predicate can be built from a record alone.
    pub favorites_only: bool,
    pub sort_key: SortKey,
}

impl Default for FilterCriteria {
    fn default() -> FilterCriteria {
        FilterCriteria {
            radius_km: 2.0,
            num_results: 25,
            selected_tags: Vec::new(),
            favorites_only: false,
            sort_key: SortKey::Date,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_filter_panel() {
        let criteria = FilterCriteria::default();

        assert_eq!(criteria.radius_km, 2.0);
        assert_eq!(criteria.num_results, 25);
        assert!(criteria.selected_tags.is_empty());
        assert!(!criteria.favorites_only);
        assert_eq!(criteria.sort_key, SortKey::Date);
    }

    #[test]
    fn known_sort_keys_parse_case_insensitively() {
        assert_eq!("date".parse::<SortKey>().unwrap(), SortKey::Date);
        assert_eq!("Popular".parse::<SortKey>().unwrap(), SortKey::Popular);
        assert_eq!("VOTES".parse::<SortKey>().unwrap(), SortKey::Votes);
        assert_eq!("favorites".parse::<SortKey>().unwrap(), SortKey::Favorites);
    }

    #[test]
    fn unknown_sort_keys_degrade_to_unsorted() {
        assert_eq!("Bogus".parse::<SortKey>().unwrap(), SortKey::Unsorted);
        assert_eq!("".parse::<SortKey>().unwrap(), SortKey::Unsorted);
    }
}
