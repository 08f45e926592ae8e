//! Orders a feed by the active sort key. The sort is stable, so ties and
//! records with unparseable timestamps keep their store order.

use std::cmp::Ordering;

use crate::criteria::SortKey;
use crate::record::Phototag;

/// Sort `records` in place by `key`. Callers that need the original order
/// intact sort a copy; the feed assembler always works on its own clones.
pub fn sort_records(records: &mut [Phototag], key: SortKey) {
    match key {
        SortKey::Date => records.sort_by(by_creation_time),
        // TODO: rank by a real popularity signal once one lands; creation
        // order stands in until then.
        SortKey::Popular => records.sort_by(by_creation_time),
        SortKey::Votes => records.sort_by(by_upvotes),
        // TODO: favorite counts are not recorded on phototags yet; vote
        // order stands in until they are.
        SortKey::Favorites => records.sort_by(by_upvotes),
        SortKey::Unsorted => {}
    }
}

/// Earliest first. Records whose timestamp does not parse order after every
/// record whose timestamp does.
fn by_creation_time(a: &Phototag, b: &Phototag) -> Ordering {
    match (a.parsed_timestamp(), b.parsed_timestamp()) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn by_upvotes(a: &Phototag, b: &Phototag) -> Ordering {
    a.upvotes.cmp(&b.upvotes)
}
