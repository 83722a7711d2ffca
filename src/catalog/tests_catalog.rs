//! Tests for catalog queries

use super::*;
use crate::error::CatalogError;
use crate::recommend::RecommendationTable;

fn fixture() -> ResourceCatalog {
    let mut catalog = ResourceCatalog::new();
    catalog.add_table(ResourceTable::new("main").with_resources(vec![
        Resource::new(1, "One", "https://one.example", "A").with_rating(4.0),
        Resource::new(2, "Two", "https://two.example", "B").with_rating(4.8),
        Resource::new(3, "Three", "https://three.example", "A").with_rating(4.9),
    ]));
    catalog
}

fn ids(resources: &[&Resource]) -> Vec<u32> {
    resources.iter().map(|r| r.id).collect()
}

// ========================================================================
// Construction and validation
// ========================================================================

#[test]
fn test_catalog_new_is_empty() {
    let catalog = ResourceCatalog::new();
    assert!(catalog.is_empty());
    assert_eq!(catalog.len(), 0);
    assert!(catalog.all_resources().is_empty());
}

#[test]
fn test_standard_catalog_validates() {
    let catalog = ResourceCatalog::standard();
    assert!(catalog.len() >= 20, "got {}", catalog.len());
    assert_eq!(catalog.validate(), Ok(()));
    assert_eq!(
        catalog.sections(),
        vec!["tools", "learning", "visualization", "applications"]
    );
}

#[test]
fn test_validate_rejects_out_of_range_rating() {
    let mut catalog = ResourceCatalog::new();
    catalog.add_table(
        ResourceTable::new("bad")
            .with_resources(vec![Resource::new(9, "Nine", "u", "C").with_rating(5.5)]),
    );
    assert!(matches!(
        catalog.validate(),
        Err(CatalogError::RatingOutOfRange { id: 9, .. })
    ));
}

#[test]
fn test_validate_rejects_nan_rating() {
    let mut catalog = ResourceCatalog::new();
    catalog.add_table(
        ResourceTable::new("bad")
            .with_resources(vec![Resource::new(9, "Nine", "u", "C").with_rating(f64::NAN)]),
    );
    assert!(catalog.validate().is_err());
}

#[test]
fn test_validate_rejects_duplicate_within_table() {
    let mut catalog = ResourceCatalog::new();
    catalog.add_table(ResourceTable::new("dup").with_resources(vec![
        Resource::new(1, "One", "u", "C"),
        Resource::new(1, "Uno", "u", "C"),
    ]));
    assert_eq!(
        catalog.validate(),
        Err(CatalogError::DuplicateId {
            id: 1,
            section: "dup".into()
        })
    );
}

#[test]
fn test_validate_allows_duplicate_across_tables() {
    let mut catalog = fixture();
    catalog.add_table(
        ResourceTable::new("extra").with_resources(vec![Resource::new(1, "Again", "u", "A")]),
    );
    assert_eq!(catalog.validate(), Ok(()));
}

#[test]
fn test_validate_rejects_empty_name() {
    let mut catalog = ResourceCatalog::new();
    catalog.add_table(
        ResourceTable::new("bad").with_resources(vec![Resource::new(5, "  ", "u", "C")]),
    );
    assert_eq!(catalog.validate(), Err(CatalogError::EmptyName { id: 5 }));
}

#[test]
fn test_from_json_loads_tables() {
    let json = r#"[
        {"section": "s", "resources": [
            {"id": 1, "name": "N", "url": "u", "category": "C", "rating": 3.5}
        ]}
    ]"#;
    let catalog = ResourceCatalog::from_json(json).expect("valid catalog");
    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog.all_resources()[0].description, "");
}

#[test]
fn test_from_json_rejects_invalid_rating() {
    let json = r#"[{"section": "s", "resources": [
        {"id": 1, "name": "N", "url": "u", "category": "C", "rating": 7.0}
    ]}]"#;
    assert!(matches!(
        ResourceCatalog::from_json(json),
        Err(CatalogError::RatingOutOfRange { .. })
    ));
}

#[test]
fn test_from_json_rejects_malformed() {
    assert!(matches!(
        ResourceCatalog::from_json("{not json"),
        Err(CatalogError::Parse(_))
    ));
}

// ========================================================================
// Aggregation
// ========================================================================

#[test]
fn test_all_resources_concatenates_in_table_order() {
    let mut catalog = fixture();
    catalog.add_table(
        ResourceTable::new("second").with_resources(vec![Resource::new(10, "Ten", "u", "C")]),
    );
    assert_eq!(ids(&catalog.all_resources()), vec![1, 2, 3, 10]);
}

#[test]
fn test_all_resources_keeps_duplicates() {
    let mut catalog = fixture();
    catalog.add_table(
        ResourceTable::new("second").with_resources(vec![Resource::new(1, "Again", "u", "A")]),
    );
    assert_eq!(ids(&catalog.all_resources()), vec![1, 2, 3, 1]);
}

#[test]
fn test_categories_distinct_first_seen() {
    assert_eq!(fixture().categories(), vec!["A", "B"]);
}

#[test]
fn test_section_lookup() {
    let catalog = ResourceCatalog::standard();
    assert!(catalog.section("tools").is_some());
    assert!(catalog.section("Tools").is_none());
}

// ========================================================================
// Filters
// ========================================================================

#[test]
fn test_by_category_lowercase_substring() {
    let catalog = fixture();
    assert_eq!(ids(&catalog.by_category("a")), vec![1, 3]);
}

#[test]
fn test_by_category_partial_label() {
    let catalog = ResourceCatalog::standard();
    let results = catalog.by_category("graph");
    assert!(!results.is_empty());
    assert!(results.iter().all(|r| r.category == "Graphing"));
}

#[test]
fn test_by_category_no_match_is_empty() {
    assert!(fixture().by_category("zzz").is_empty());
}

#[test]
fn test_top_rated_preserves_order() {
    let catalog = fixture();
    assert_eq!(ids(&catalog.top_rated(4.5)), vec![2, 3]);
}

#[test]
fn test_top_rated_inclusive() {
    let catalog = fixture();
    assert_eq!(ids(&catalog.top_rated(4.8)), vec![2, 3]);
    assert_eq!(ids(&catalog.top_rated(4.9)), vec![3]);
}

#[test]
fn test_search_matches_any_field() {
    let catalog = ResourceCatalog::standard();
    // name
    assert!(catalog.search("desmos").iter().any(|r| r.id == 302));
    // description
    assert!(catalog.search("INTEGER SEQUENCES").iter().any(|r| r.id == 105));
    // category
    assert!(catalog.search("proof assistant").iter().any(|r| r.id == 404));
}

#[test]
fn test_search_no_match_is_empty() {
    assert!(ResourceCatalog::standard().search("xylophone").is_empty());
}

// ========================================================================
// Statistics
// ========================================================================

#[test]
fn test_stats_example_scenario() {
    let stats = fixture().stats();
    assert_eq!(stats.total_resources, 3);
    assert_eq!(stats.total_categories, 2);
    assert_eq!(stats.average_rating_display(), "4.57");
    assert_eq!(stats.category_stats[0].name, "A");
    assert_eq!(stats.category_stats[0].count, 2);
    assert_eq!(stats.category_stats[0].avg_rating, Some(4.45));
}

#[test]
fn test_stats_counts_sum_to_total() {
    let stats = ResourceCatalog::standard().stats();
    let sum: usize = stats.category_stats.iter().map(|c| c.count).sum();
    assert_eq!(sum, stats.total_resources);
}

#[test]
fn test_stats_empty_catalog() {
    let stats = ResourceCatalog::new().stats();
    assert_eq!(stats.average_rating, 0.0);
    assert!(stats.category_stats.is_empty());
}

// ========================================================================
// Recommendations
// ========================================================================

#[test]
fn test_recommended_sorted_and_capped() {
    let catalog = ResourceCatalog::standard();
    for level in Level::all() {
        let results = catalog.recommended(*level);
        assert!(results.len() <= DEFAULT_RECOMMENDED_LIMIT);
        assert!(results.windows(2).all(|w| w[0].rating >= w[1].rating));
    }
}

#[test]
fn test_recommended_only_keyword_matches() {
    let catalog = ResourceCatalog::standard();
    let table = catalog.recommendation_table().clone();
    for r in catalog.recommended(Level::Beginner) {
        assert!(table.matches(Level::Beginner, r), "{} should match", r.name);
    }
}

#[test]
fn test_recommended_with_custom_table() {
    let mut table = RecommendationTable::empty();
    table.set_terms(Level::Beginner, &["two"]);
    let catalog = fixture().with_recommendations(table);
    assert_eq!(ids(&catalog.recommended(Level::Beginner)), vec![2]);
    assert!(catalog.recommended(Level::Advanced).is_empty());
}

#[test]
fn test_recommended_limit_override() {
    let mut table = RecommendationTable::empty();
    table.set_terms(Level::Beginner, &["a"]);
    let catalog = fixture()
        .with_recommendations(table)
        .with_recommended_limit(1);
    assert_eq!(ids(&catalog.recommended(Level::Beginner)), vec![3]);
}

#[test]
fn test_level_parse() {
    assert_eq!("Advanced".parse::<Level>(), Ok(Level::Advanced));
    assert!(matches!(
        "expert".parse::<Level>(),
        Err(CatalogError::UnknownLevel(_))
    ));
}
