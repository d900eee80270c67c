use devhub_core::{project, Catalog, CatalogEntry, CategoryFilter, QueryState, SortKey, Tool};

const NOW_MS: i64 = 1_700_000_000_000;

fn ids<T: CatalogEntry>(items: &[&T]) -> Vec<String> {
    items.iter().map(|item| item.id().to_string()).collect()
}

fn tool(id: &str, name: &str, category: &str) -> Tool {
    Tool {
        id: id.to_string(),
        name: name.to_string(),
        category: category.to_string(),
        description: String::new(),
        url: String::new(),
        tags: Vec::new(),
    }
}

#[test]
fn category_filter_keeps_catalog_order() {
    let tools = vec![
        tool("a", "Zed", "SAST"),
        tool("b", "Alpha", "Runtime"),
        tool("c", "Mid", "SAST"),
    ];
    let state = QueryState {
        active_filter: CategoryFilter::parse("SAST"),
        ..QueryState::default()
    };

    assert_eq!(ids(&project(&tools, &state)), vec!["a", "c"]);
}

#[test]
fn builtin_sast_filter_returns_semgrep() {
    let catalog = Catalog::builtin(NOW_MS);
    let state = QueryState {
        active_filter: CategoryFilter::parse("SAST"),
        ..QueryState::sorted_by(SortKey::Name)
    };

    assert_eq!(ids(&project(catalog.tools(), &state)), vec!["t2"]);
}

#[test]
fn search_is_case_insensitive_and_covers_tags() {
    let catalog = Catalog::builtin(NOW_MS);
    let state = QueryState {
        debounced_query: "EBPF".to_string(),
        ..QueryState::default()
    };

    assert_eq!(ids(&project(catalog.tools(), &state)), vec!["t5"]);
    assert_eq!(ids(&project(catalog.articles(), &state)), vec!["b5"]);

    let tag_only = QueryState {
        debounced_query: "PROVENANCE".to_string(),
        ..QueryState::default()
    };
    assert_eq!(ids(&project(catalog.tools(), &tag_only)), vec!["t6"]);
}

#[test]
fn search_uses_debounced_query_not_raw_input() {
    let catalog = Catalog::builtin(NOW_MS);
    let state = QueryState {
        raw_input: "falco".to_string(),
        ..QueryState::default()
    };

    assert_eq!(project(catalog.tools(), &state).len(), catalog.tools().len());
}

#[test]
fn name_sort_ignores_case() {
    let catalog = Catalog::builtin(NOW_MS);
    let state = QueryState::sorted_by(SortKey::Name);

    assert_eq!(
        ids(&project(catalog.tools(), &state)),
        vec!["t5", "t6", "t4", "t2", "t3", "t1"]
    );
}

#[test]
fn category_sort_is_stable_for_equal_categories() {
    let catalog = Catalog::builtin(NOW_MS);
    let state = QueryState::sorted_by(SortKey::Category);

    assert_eq!(
        ids(&project(catalog.tools(), &state)),
        vec!["t4", "t5", "t2", "t1", "t3", "t6"]
    );
}

#[test]
fn projection_is_deterministic() {
    let catalog = Catalog::builtin(NOW_MS);
    let state = QueryState {
        debounced_query: "supply".to_string(),
        active_filter: CategoryFilter::All,
        active_sort: Some(SortKey::Name),
        ..QueryState::default()
    };

    let first = ids(&project(catalog.tools(), &state));
    let second = ids(&project(catalog.tools(), &state));
    assert_eq!(first, second);
    assert_eq!(first, vec!["t6", "t3"]);
}

#[test]
fn articles_have_no_category_so_specific_filters_exclude_them() {
    let catalog = Catalog::builtin(NOW_MS);
    let state = QueryState {
        active_filter: CategoryFilter::parse("SAST"),
        ..QueryState::default()
    };

    assert!(project(catalog.articles(), &state).is_empty());
    assert_eq!(
        project(catalog.articles(), &QueryState::default()).len(),
        catalog.articles().len()
    );
}

#[test]
fn unmatched_query_yields_empty_list() {
    let catalog = Catalog::builtin(NOW_MS);
    let state = QueryState {
        debounced_query: "no-such-thing".to_string(),
        ..QueryState::default()
    };

    assert!(project(catalog.tools(), &state).is_empty());
}

#[test]
fn name_sort_places_accented_names_with_their_base_letter() {
    let tools = vec![
        tool("z", "Zap", "DAST"),
        tool("e", "Élan", "SAST"),
        tool("f", "Falco", "Runtime"),
        tool("a", "anchore", "Scanning"),
    ];

    let sorted = project(&tools, &QueryState::sorted_by(SortKey::Name));
    assert_eq!(ids(&sorted), vec!["a", "e", "f", "z"]);
}
