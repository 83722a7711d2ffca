//! Tests for the cached query service

use super::*;
use crate::catalog::{Level, Resource, ResourceCatalog, ResourceTable};
use crate::config::MathStarConfig;
use std::sync::Arc;

fn overlapping_catalog() -> ResourceCatalog {
    let mut catalog = ResourceCatalog::new();
    catalog.add_table(ResourceTable::new("first").with_resources(vec![
        Resource::new(1, "Old One", "https://old.example", "A").with_rating(3.0),
        Resource::new(2, "Two", "https://two.example", "B").with_rating(4.8),
    ]));
    catalog.add_table(ResourceTable::new("second").with_resources(vec![
        Resource::new(3, "Three", "https://three.example", "A").with_rating(4.9),
        Resource::new(1, "New One", "https://new.example", "A").with_rating(4.0),
    ]));
    catalog
}

fn service(catalog: ResourceCatalog) -> CatalogService {
    CatalogService::with_defaults(Arc::new(catalog))
}

// ========================================================================
// Deduplication
// ========================================================================

#[test]
fn test_all_resources_dedups_last_value_first_position() {
    let svc = service(overlapping_catalog());
    let all = svc.all_resources();
    let ids: Vec<u32> = all.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert_eq!(all[0].name, "New One");
    assert_eq!(all[0].url, "https://new.example");
    assert_eq!(all[0].rating, 4.0);
}

#[test]
fn test_all_resources_memoized() {
    let svc = service(overlapping_catalog());
    let a = svc.all_resources();
    let b = svc.all_resources();
    assert!(Arc::ptr_eq(&a, &b));
}

#[test]
fn test_basic_and_cached_views_diverge_on_duplicates() {
    let catalog = overlapping_catalog();
    assert_eq!(catalog.all_resources().len(), 4);
    assert_eq!(service(catalog).all_resources().len(), 3);
}

#[test]
fn test_standard_catalog_dedups_shared_entry() {
    let catalog = ResourceCatalog::standard();
    let raw = catalog.len();
    let svc = service(catalog);
    let all = svc.all_resources();
    assert_eq!(all.len(), raw - 1);
    let geogebra: Vec<_> = all.iter().filter(|r| r.id == 301).collect();
    assert_eq!(geogebra.len(), 1);
    assert_eq!(geogebra[0].url, "https://www.geogebra.org/download");
}

// ========================================================================
// Statistics
// ========================================================================

#[test]
fn test_stats_over_deduplicated_set() {
    let svc = service(overlapping_catalog());
    let stats = svc.stats();
    assert_eq!(stats.total_resources, 3);
    let sum: usize = stats.category_stats.iter().map(|c| c.count).sum();
    assert_eq!(sum, stats.total_resources);
    assert_eq!(stats.average_rating_display(), "4.57");
}

#[test]
fn test_stats_memoized_until_clear() {
    let svc = service(overlapping_catalog());
    let a = svc.stats();
    assert!(Arc::ptr_eq(&a, &svc.stats()));
    svc.clear_cache();
    let b = svc.stats();
    assert!(!Arc::ptr_eq(&a, &b));
    assert_eq!(*a, *b);
}

// ========================================================================
// Filtering
// ========================================================================

#[test]
fn test_filtered_sorted_by_rating_desc() {
    let svc = service(overlapping_catalog());
    let results = svc.filtered(&ResourceFilter::new());
    let ids: Vec<u32> = results.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![3, 2, 1]);
}

#[test]
fn test_filtered_repeat_served_from_cache() {
    let svc = service(overlapping_catalog());
    let filter = ResourceFilter::new().with_category("a").with_min_rating(4.0);
    let first = svc.filtered(&filter);
    let second = svc.filtered(&filter.clone());
    assert!(Arc::ptr_eq(&first, &second));

    let stats = svc.cache_stats();
    assert_eq!(stats.misses, 1);
    assert_eq!(stats.hits, 1);
    assert_eq!(stats.filtered_entries, 1);
}

#[test]
fn test_filtered_category_uses_substring_semantics() {
    let svc = service(overlapping_catalog());
    // Same semantics as ResourceCatalog::by_category
    let results = svc.filtered(&ResourceFilter::new().with_category("a"));
    let mut ids: Vec<u32> = results.iter().map(|r| r.id).collect();
    ids.sort_unstable();
    assert_eq!(ids, vec![1, 3]);

    let catalog = ResourceCatalog::standard();
    let basic = catalog.by_category("graph").len();
    let svc = service(catalog);
    assert_eq!(svc.filtered(&ResourceFilter::new().with_category("graph")).len(), basic - 1);
}

#[test]
fn test_filtered_min_rating_inclusive() {
    let svc = service(overlapping_catalog());
    let results = svc.filtered(&ResourceFilter::new().with_min_rating(4.8));
    let ids: Vec<u32> = results.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![3, 2]);
}

#[test]
fn test_filtered_section_restricts_first() {
    let svc = service(overlapping_catalog());
    let results = svc.filtered(&ResourceFilter::new().with_section("first"));
    let ids: Vec<u32> = results.iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![2, 1]);
    // Section view keeps that table's own record
    assert!(results.iter().any(|r| r.name == "Old One"));
}

#[test]
fn test_filtered_unknown_section_is_empty() {
    let svc = service(overlapping_catalog());
    assert!(svc.filtered(&ResourceFilter::new().with_section("nope")).is_empty());
}

#[test]
fn test_filtered_search_query() {
    let svc = service(ResourceCatalog::standard());
    let results = svc.filtered(&ResourceFilter::new().with_search("latex"));
    assert!(results.iter().any(|r| r.name == "Overleaf"));
    assert!(results.windows(2).all(|w| w[0].rating >= w[1].rating));
}

#[test]
fn test_filtered_no_match_is_empty_not_error() {
    let svc = service(overlapping_catalog());
    assert!(svc
        .filtered(&ResourceFilter::new().with_search("nothing here"))
        .is_empty());
}

#[test]
fn test_filter_cache_evicts_oldest_key() {
    let mut config = MathStarConfig::default();
    config.cache.capacity = 100;
    let svc = CatalogService::new(Arc::new(overlapping_catalog()), &config);

    for i in 0..101 {
        svc.filtered(&ResourceFilter::new().with_search(format!("q{}", i)));
    }
    assert_eq!(svc.cache_stats().filtered_entries, 100);
    assert_eq!(svc.cache_stats().misses, 101);

    // q1..q100 still cached, q0 recomputed
    svc.filtered(&ResourceFilter::new().with_search("q100"));
    assert_eq!(svc.cache_stats().hits, 1);
    svc.filtered(&ResourceFilter::new().with_search("q0"));
    assert_eq!(svc.cache_stats().misses, 102);
}

// ========================================================================
// Recommendations
// ========================================================================

#[test]
fn test_recommendations_union_of_terms_and_floor() {
    let svc = service(ResourceCatalog::standard());
    let results = svc.recommendations(Level::Beginner, 50);
    let table = svc.catalog().recommendation_table().clone();
    assert!(results
        .iter()
        .all(|r| table.matches(Level::Beginner, r) || r.rating >= 4.5));
    // Calculator Soup (4.1) qualifies by terms alone
    assert!(results.iter().any(|r| r.id == 106));
    // 3Blue1Brown qualifies by rating alone
    assert!(results.iter().any(|r| r.id == 303));
}

#[test]
fn test_recommendations_capped_and_sorted() {
    let svc = service(ResourceCatalog::standard());
    let results = svc.recommendations(Level::Advanced, 12);
    assert!(results.len() <= 12);
    assert!(results.windows(2).all(|w| w[0].rating >= w[1].rating));
    let three = svc.recommendations(Level::Advanced, 3);
    assert_eq!(three.len(), 3);
    assert_eq!(three.as_slice(), &results[..3]);
}

#[test]
fn test_recommendations_cached_by_level_and_limit() {
    let svc = service(ResourceCatalog::standard());
    let a = svc.recommendations(Level::Professional, 12);
    let b = svc.recommendations(Level::Professional, 12);
    assert!(Arc::ptr_eq(&a, &b));
    svc.recommendations(Level::Professional, 5);
    assert_eq!(svc.cache_stats().recommendation_entries, 2);
}

// ========================================================================
// Administration
// ========================================================================

#[test]
fn test_clear_cache_resets_everything() {
    let svc = service(overlapping_catalog());
    svc.filtered(&ResourceFilter::new());
    svc.recommendations(Level::Beginner, 12);
    svc.stats();
    let before = svc.cache_stats();
    assert!(before.all_resources_cached);
    assert!(before.stats_cached);

    svc.clear_cache();
    let after = svc.cache_stats();
    assert_eq!(after.filtered_entries, 0);
    assert_eq!(after.recommendation_entries, 0);
    assert!(!after.all_resources_cached);
    assert!(!after.stats_cached);
}

#[test]
fn test_cache_stats_reports_policy() {
    let mut config = MathStarConfig::default();
    config.cache.policy = EvictionPolicy::Lru;
    config.cache.capacity = 7;
    let svc = CatalogService::new(Arc::new(overlapping_catalog()), &config);
    let stats = svc.cache_stats();
    assert_eq!(stats.policy, EvictionPolicy::Lru);
    assert_eq!(stats.capacity, 7);
}

#[test]
fn test_non_finite_rating_filters_cached_separately() {
    let svc = service(overlapping_catalog());
    let unbounded = svc.filtered(&ResourceFilter::new().with_min_rating(f64::NAN));
    let none = svc.filtered(&ResourceFilter::new().with_min_rating(f64::INFINITY));
    let all = svc.filtered(&ResourceFilter::new().with_min_rating(f64::NEG_INFINITY));
    assert_eq!(unbounded.len(), 3);
    assert!(none.is_empty());
    assert_eq!(all.len(), 3);
    assert_eq!(svc.cache_stats().misses, 3);
}

#[test]
fn test_concurrent_callers_compute_once() {
    let svc = Arc::new(service(ResourceCatalog::standard()));
    let filter = ResourceFilter::new().with_min_rating(4.5);

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let svc = Arc::clone(&svc);
            let filter = filter.clone();
            std::thread::spawn(move || svc.filtered(&filter))
        })
        .collect();
    let results: Vec<_> = handles
        .into_iter()
        .map(|h| h.join().expect("thread panicked"))
        .collect();

    assert!(results.windows(2).all(|w| Arc::ptr_eq(&w[0], &w[1])));
    let stats = svc.cache_stats();
    assert_eq!(stats.misses, 1);
    assert_eq!(stats.hits, 7);
}

#[test]
fn test_stats_and_clear_interleave_without_deadlock() {
    let svc = Arc::new(service(overlapping_catalog()));

    let readers: Vec<_> = (0..4)
        .map(|_| {
            let svc = Arc::clone(&svc);
            std::thread::spawn(move || {
                for _ in 0..200 {
                    assert_eq!(svc.stats().total_resources, 3);
                    svc.cache_stats();
                }
            })
        })
        .collect();
    let clearer = {
        let svc = Arc::clone(&svc);
        std::thread::spawn(move || {
            for _ in 0..200 {
                svc.clear_cache();
            }
        })
    };
    for handle in readers {
        handle.join().expect("reader panicked");
    }
    clearer.join().expect("clearer panicked");

    svc.clear_cache();
    assert!(!svc.cache_stats().stats_cached);
    assert_eq!(svc.stats().total_resources, 3);
}
