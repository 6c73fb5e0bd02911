use chrono::{DateTime, Duration, Utc};

use super::groups::Group;

/// Slack added to the backward cursor so events with backfilled or skewed
/// timestamps near a page boundary still land on an adjacent page.
pub const PAGE_LOOKBACK_DAYS: i64 = 7;

/// Min/max timestamp across every event reachable from the forest. An empty
/// forest yields the inverted sentinels, which double as the "no more pages"
/// signal.
pub fn page_span(groups: &[Group]) -> (DateTime<Utc>, DateTime<Utc>) {
    let mut start = DateTime::<Utc>::MAX_UTC;
    let mut end = DateTime::<Utc>::MIN_UTC;
    for group in groups {
        walk(group, &mut start, &mut end);
    }
    (start, end)
}

fn walk(group: &Group, start: &mut DateTime<Utc>, end: &mut DateTime<Utc>) {
    for event in &group.events {
        *start = (*start).min(event.timestamp);
        *end = (*end).max(event.timestamp);
    }
    for child in &group.children {
        walk(child, start, end);
    }
}

/// Upper bound for the next backward page. The sentinel of an empty page is
/// propagated untouched so callers can detect exhaustion.
pub fn next_page_end(end: DateTime<Utc>) -> DateTime<Utc> {
    if end == DateTime::<Utc>::MIN_UTC {
        end
    } else {
        end - Duration::days(PAGE_LOOKBACK_DAYS)
    }
}
