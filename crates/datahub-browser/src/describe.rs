//! Human-readable descriptions of resource selections.

use datahub_entity::{ResourceKind, ResourceSet};

/// Describe per-kind counts, e.g. `"2 folders and 1 item"`.
///
/// Kinds with a zero count are skipped. No kinds gives `"nothing"`,
/// two are joined with `and`, longer lists are comma-separated with a
/// final `and`.
pub fn describe_counts(counts: &[(ResourceKind, usize)]) -> String {
    let parts: Vec<String> = counts
        .iter()
        .filter(|(_, count)| *count > 0)
        .map(|(kind, count)| {
            let plural = if *count == 1 { "" } else { "s" };
            format!("{count} {kind}{plural}")
        })
        .collect();

    match parts.as_slice() {
        [] => "nothing".to_string(),
        [only] => only.clone(),
        [first, second] => format!("{first} and {second}"),
        [init @ .., last] => format!("{}, and {last}", init.join(", ")),
    }
}

/// Describe the contents of a resource set.
pub fn describe_resources(resources: &ResourceSet) -> String {
    describe_counts(&resources.counts())
}
