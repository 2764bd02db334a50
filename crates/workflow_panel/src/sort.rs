//! Listing order: directories first, then the active key, ties by name ascending.

use std::cmp::Ordering;

use workflow_host::DirectoryEntry;

use crate::model::{SortKey, SortOrder};

fn compare_names(a: &DirectoryEntry, b: &DirectoryEntry) -> Ordering {
    a.name
        .to_lowercase()
        .cmp(&b.name.to_lowercase())
        .then_with(|| a.name.cmp(&b.name))
        .then_with(|| a.path.cmp(&b.path))
}

/// Total order used for every rendered listing.
///
/// The directory/document split ignores `order`; the tie-break on name is always ascending, so
/// flipping `order` reverses exactly the key-decided part of the order.
pub fn compare_entries(
    a: &DirectoryEntry,
    b: &DirectoryEntry,
    key: SortKey,
    order: SortOrder,
) -> Ordering {
    match (a.is_directory(), b.is_directory()) {
        (true, false) => return Ordering::Less,
        (false, true) => return Ordering::Greater,
        _ => {}
    }

    let primary = match key {
        SortKey::Name => compare_names(a, b),
        SortKey::Modified => a.modified.total_cmp(&b.modified),
        SortKey::Size => a.size.unwrap_or(0).cmp(&b.size.unwrap_or(0)),
    };
    let primary = match order {
        SortOrder::Asc => primary,
        SortOrder::Desc => primary.reverse(),
    };
    primary.then_with(|| compare_names(a, b))
}

/// Returns a sorted copy of `entries`.
pub fn sorted_entries(
    entries: &[DirectoryEntry],
    key: SortKey,
    order: SortOrder,
) -> Vec<DirectoryEntry> {
    let mut sorted = entries.to_vec();
    sorted.sort_by(|a, b| compare_entries(a, b, key, order));
    sorted
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn names(entries: &[DirectoryEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.name.as_str()).collect()
    }

    fn sample() -> Vec<DirectoryEntry> {
        vec![
            DirectoryEntry::document("b.json", 120, 1000.0),
            DirectoryEntry::document("c.json", 50, 1000.0),
            DirectoryEntry::directory("zeta", 0),
            DirectoryEntry::document("a.json", 120, 3000.0),
            DirectoryEntry::directory("alpha", 4),
            DirectoryEntry::document("d.json", 900, 500.0),
        ]
    }

    #[test]
    fn directories_lead_for_every_key_and_order() {
        for key in [SortKey::Name, SortKey::Modified, SortKey::Size] {
            for order in [SortOrder::Asc, SortOrder::Desc] {
                let sorted = sorted_entries(&sample(), key, order);
                assert!(sorted[0].is_directory() && sorted[1].is_directory());
                assert!(sorted[2..].iter().all(|e| !e.is_directory()));
            }
        }
    }

    #[test]
    fn ties_break_by_name_ascending_in_both_orders() {
        let asc = sorted_entries(&sample(), SortKey::Size, SortOrder::Asc);
        assert_eq!(
            names(&asc),
            vec!["alpha", "zeta", "c.json", "a.json", "b.json", "d.json"]
        );
        let desc = sorted_entries(&sample(), SortKey::Size, SortOrder::Desc);
        assert_eq!(
            names(&desc),
            vec!["alpha", "zeta", "d.json", "a.json", "b.json", "c.json"]
        );
    }

    #[test]
    fn reversing_order_reverses_untied_documents() {
        let docs: Vec<_> = sample().into_iter().filter(|e| !e.is_directory()).collect();
        let asc = sorted_entries(&docs, SortKey::Name, SortOrder::Asc);
        let mut desc = sorted_entries(&docs, SortKey::Name, SortOrder::Desc);
        desc.reverse();
        assert_eq!(asc, desc);

        let by_modified = sorted_entries(&docs, SortKey::Modified, SortOrder::Desc);
        assert_eq!(names(&by_modified), vec!["a.json", "b.json", "c.json", "d.json"]);
    }

    #[test]
    fn root_scenario_renders_directory_first() {
        let listing = vec![
            DirectoryEntry::directory("a", 2),
            DirectoryEntry::document("b.json", 120, 1000.0),
        ];
        let sorted = sorted_entries(&listing, SortKey::Name, SortOrder::Asc);
        assert_eq!(names(&sorted), vec!["a", "b.json"]);
        let sorted = sorted_entries(&listing, SortKey::Size, SortOrder::Desc);
        assert_eq!(names(&sorted), vec!["a", "b.json"]);
    }
}
