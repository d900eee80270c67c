//! Filter/search/sort projection.

use crate::model::catalog::CatalogEntry;
use crate::view::collate;

/// Filter value that admits every category.
pub const FILTER_ALL: &str = "all";

/// Exact-match category filter.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryFilter {
    #[default]
    All,
    /// Case-sensitive match against the catalog-declared category.
    Category(String),
}

impl CategoryFilter {
    /// Parses a filter control value; `all` admits everything, anything else is a category.
    pub fn parse(value: &str) -> Self {
        if value == FILTER_ALL {
            Self::All
        } else {
            Self::Category(value.to_string())
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::All => FILTER_ALL,
            Self::Category(category) => category,
        }
    }

    fn admits(&self, category: Option<&str>) -> bool {
        match self {
            Self::All => true,
            Self::Category(wanted) => category == Some(wanted.as_str()),
        }
    }
}

/// Sort key for projected lists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    #[default]
    Name,
    Category,
}

/// Transient per-page query state. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryState {
    /// Latest text typed by the user.
    pub raw_input: String,
    /// Text the projection searches with; trails `raw_input` by the debounce interval.
    pub debounced_query: String,
    pub active_filter: CategoryFilter,
    /// `None` keeps catalog order.
    pub active_sort: Option<SortKey>,
}

impl QueryState {
    pub fn sorted_by(sort: SortKey) -> Self {
        Self {
            active_sort: Some(sort),
            ..Self::default()
        }
    }
}

/// Projects `items` through `state`.
///
/// Pure: identical inputs yield identical output, and ties keep catalog order.
pub fn project<'a, T: CatalogEntry>(items: &'a [T], state: &QueryState) -> Vec<&'a T> {
    let needle = state.debounced_query.to_lowercase();

    let mut projected = items
        .iter()
        .filter(|item| state.active_filter.admits(item.category()))
        .filter(|item| matches_text(*item, &needle))
        .collect::<Vec<_>>();

    if let Some(sort) = state.active_sort {
        // `sort_by` is stable, so equal keys retain catalog order.
        projected.sort_by(|left, right| match sort {
            SortKey::Name => collate::compare(left.title(), right.title()),
            SortKey::Category => collate::compare(
                left.category().unwrap_or(""),
                right.category().unwrap_or(""),
            ),
        });
    }

    projected
}

fn matches_text<T: CatalogEntry>(item: &T, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    item.title().to_lowercase().contains(needle)
        || item.description().to_lowercase().contains(needle)
        || item
            .tags()
            .iter()
            .any(|tag| tag.to_lowercase().contains(needle))
}

#[cfg(test)]
mod tests {
    use super::{project, CategoryFilter, QueryState, SortKey};
    use crate::model::catalog::Tool;

    fn tool(id: &str, name: &str, category: &str, tags: &[&str]) -> Tool {
        Tool {
            id: id.to_string(),
            name: name.to_string(),
            category: category.to_string(),
            description: String::new(),
            url: String::new(),
            tags: tags.iter().map(|t| (*t).to_string()).collect(),
        }
    }

    fn ids(items: &[&Tool]) -> Vec<String> {
        items.iter().map(|t| t.id.clone()).collect()
    }

    #[test]
    fn category_filter_is_case_sensitive() {
        let tools = vec![tool("a", "A", "SAST", &[]), tool("b", "B", "sast", &[])];
        let state = QueryState {
            active_filter: CategoryFilter::parse("SAST"),
            ..QueryState::default()
        };
        assert_eq!(ids(&project(&tools, &state)), vec!["a"]);
    }

    #[test]
    fn category_sort_is_stable_for_equal_categories() {
        let tools = vec![
            tool("t3", "Zeta", "Supply Chain", &[]),
            tool("t1", "Alpha", "Runtime", &[]),
            tool("t6", "Beta", "Supply Chain", &[]),
        ];
        let state = QueryState::sorted_by(SortKey::Category);
        assert_eq!(ids(&project(&tools, &state)), vec!["t1", "t3", "t6"]);
    }

    #[test]
    fn filter_value_all_round_trips() {
        assert_eq!(CategoryFilter::parse("all"), CategoryFilter::All);
        assert_eq!(CategoryFilter::All.as_str(), "all");
        assert_eq!(CategoryFilter::parse("Runtime").as_str(), "Runtime");
    }
}
