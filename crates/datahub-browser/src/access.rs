//! Aggregation of access levels over selections.

use datahub_core::types::AccessLevel;

/// Lowest level in `levels`, starting from `start`.
///
/// Iteration stops once the running minimum is at or below `Read`:
/// listed resources are never below `Read`, so nothing further can
/// change what the menu offers.
pub fn min_access_level_from<I>(start: AccessLevel, levels: I) -> AccessLevel
where
    I: IntoIterator<Item = AccessLevel>,
{
    let mut min = start;
    if min <= AccessLevel::Read {
        return min;
    }
    for level in levels {
        min = min.min(level);
        if min <= AccessLevel::Read {
            break;
        }
    }
    min
}

/// Lowest level in `levels`; `Admin` when empty.
pub fn min_access_level<I>(levels: I) -> AccessLevel
where
    I: IntoIterator<Item = AccessLevel>,
{
    min_access_level_from(AccessLevel::Admin, levels)
}
