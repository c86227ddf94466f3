//! Placement ranking with shared places for ties.

/// A ranked clan's place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Standing {
    pub tag: String,
    pub place: u32,
}

/// Rank clans by a metric, highest first.
///
/// Clans with equal values share a place and the next distinct value
/// skips past them (100, 100, 50 ranks 1, 1, 3). Clans scoring 0 are
/// unranked and left out of the result. The input slice is not reordered.
pub fn rank<T, N, M>(clans: &[T], tag_of: N, metric: M) -> Vec<Standing>
where
    N: Fn(&T) -> &str,
    M: Fn(&T) -> u32,
{
    let mut ordered: Vec<&T> = clans.iter().collect();
    ordered.sort_by(|a, b| metric(b).cmp(&metric(a)));

    let mut standings = Vec::with_capacity(ordered.len());
    let mut place = 0;
    let mut previous = None;

    for (i, clan) in ordered.into_iter().enumerate() {
        let value = metric(clan);
        if value == 0 {
            break;
        }
        if previous != Some(value) {
            place = i as u32 + 1;
            previous = Some(value);
        }
        standings.push(Standing {
            tag: tag_of(clan).to_string(),
            place,
        });
    }

    standings
}
