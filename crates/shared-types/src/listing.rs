//! Local list state for management pages: replace after edit, remove after
//! delete, group into fixed sections, filter by typed text.

use crate::common::normalize_text;

/// A record with a stable server id.
pub trait Identified {
    fn id(&self) -> &str;
}

/// A record that can be matched by the free-text filter.
pub trait Searchable {
    /// Text the filter is matched against.
    fn haystack(&self) -> String;
}

/// Replace the item whose id matches `updated` with the server-returned
/// record. Returns false (and leaves the list untouched) if no item matched.
pub fn replace_record<T: Identified>(items: &mut [T], updated: T) -> bool {
    match items.iter_mut().find(|item| item.id() == updated.id()) {
        Some(slot) => {
            *slot = updated;
            true
        }
        None => false,
    }
}

/// Remove every item with `id`, returning the first one removed.
pub fn remove_record<T: Identified>(items: &mut Vec<T>, id: &str) -> Option<T> {
    let pos = items.iter().position(|item| item.id() == id)?;
    let removed = items.remove(pos);
    items.retain(|item| item.id() != id);
    Some(removed)
}

/// Group items into sections following `order`; empty sections are omitted
/// and items whose key is not in `order` are dropped.
pub fn group_by_key<T, K, F>(items: &[T], order: &[K], key: F) -> Vec<(K, Vec<T>)>
where
    T: Clone,
    K: Copy + PartialEq,
    F: Fn(&T) -> K,
{
    order
        .iter()
        .filter_map(|section| {
            let members: Vec<T> = items
                .iter()
                .filter(|item| key(item) == *section)
                .cloned()
                .collect();
            (!members.is_empty()).then_some((*section, members))
        })
        .collect()
}

/// Items whose haystack contains every word of `query`, ignoring case and
/// accents. A blank query keeps everything.
pub fn filter_by_text<T: Searchable + Clone>(items: &[T], query: &str) -> Vec<T> {
    let words: Vec<String> = normalize_text(query)
        .split_whitespace()
        .map(str::to_string)
        .collect();
    if words.is_empty() {
        return items.to_vec();
    }
    items
        .iter()
        .filter(|item| {
            let haystack = normalize_text(&item.haystack());
            words.iter().all(|w| haystack.contains(w.as_str()))
        })
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[derive(Debug, Clone, PartialEq)]
    struct Row {
        id: String,
        group: u8,
        text: String,
    }

    impl Identified for Row {
        fn id(&self) -> &str {
            &self.id
        }
    }

    impl Searchable for Row {
        fn haystack(&self) -> String {
            self.text.clone()
        }
    }

    fn row(id: &str, group: u8, text: &str) -> Row {
        Row {
            id: id.to_string(),
            group,
            text: text.to_string(),
        }
    }

    #[test]
    fn replace_swaps_matching_record() {
        let mut rows = vec![row("1", 0, "a"), row("2", 0, "b")];
        assert!(replace_record(&mut rows, row("2", 1, "B editado")));
        assert_eq!(rows[1], row("2", 1, "B editado"));
        assert!(!replace_record(&mut rows, row("9", 0, "x")));
        assert_eq!(rows.len(), 2);
    }

    #[test]
    fn remove_drops_identifier() {
        let mut rows = vec![row("1", 0, "a"), row("2", 0, "b"), row("3", 0, "c")];
        let removed = remove_record(&mut rows, "2").unwrap();
        assert_eq!(removed.id, "2");
        assert!(rows.iter().all(|r| r.id != "2"));
        assert!(remove_record(&mut rows, "2").is_none());
    }

    #[test]
    fn grouping_follows_declared_order_and_skips_empty() {
        let rows = vec![row("1", 2, "a"), row("2", 0, "b"), row("3", 2, "c"), row("4", 7, "d")];
        let groups = group_by_key(&rows, &[0u8, 1, 2], |r| r.group);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].0, 0);
        assert_eq!(groups[1].0, 2);
        assert_eq!(groups[1].1.len(), 2);
    }

    #[test]
    fn text_filter_ignores_case_and_accents() {
        let rows = vec![row("1", 0, "Evidência Balística"), row("2", 0, "Foto do local")];
        assert_eq!(filter_by_text(&rows, "balistica").len(), 1);
        assert_eq!(filter_by_text(&rows, "EVIDENCIA bal").len(), 1);
        assert_eq!(filter_by_text(&rows, "  ").len(), 2);
        assert!(filter_by_text(&rows, "digital").is_empty());
    }
}
