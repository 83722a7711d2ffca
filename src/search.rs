//! Weighted multi-field search
//!
//! Each configured field is scored against the query:
//! - case-insensitive prefix: 1.0
//! - case-insensitive substring: 0.8
//! - skim-style subsequence match (only for `fuzzy` fields): up to 0.5,
//!   higher when the matched characters sit close together
//!
//! Field scores are multiplied by the field weight and summed. Items scoring
//! zero are dropped and the rest are ranked best first. An empty query is not
//! a filter: every item comes back in input order.

use fuzzy_matcher::skim::SkimMatcherV2;
use fuzzy_matcher::FuzzyMatcher;
use serde::Serialize;
use std::borrow::Cow;
use std::ops::Range;
use tracing::debug;

use crate::catalog::Resource;

const PREFIX_SCORE: f64 = 1.0;
const SUBSTRING_SCORE: f64 = 0.8;
const FUZZY_MAX_SCORE: f64 = 0.5;

/// Records that expose named text fields to the searcher
pub trait Searchable {
    /// Text of the field called `key`, `None` if the record has no such field
    fn field(&self, key: &str) -> Option<Cow<'_, str>>;
}

impl Searchable for Resource {
    fn field(&self, key: &str) -> Option<Cow<'_, str>> {
        match key {
            "name" => Some(Cow::Borrowed(&self.name)),
            "description" => Some(Cow::Borrowed(&self.description)),
            "category" => Some(Cow::Borrowed(&self.category)),
            "url" => Some(Cow::Borrowed(&self.url)),
            _ => None,
        }
    }
}

/// A field to score, with its weight
#[derive(Debug, Clone, PartialEq)]
pub struct SearchField {
    pub key: String,
    pub weight: f64,
    /// Allow typo-tolerant subsequence matches; otherwise substring only
    pub fuzzy: bool,
}

impl SearchField {
    /// Fuzzy field with the given weight
    pub fn new(key: impl Into<String>, weight: f64) -> Self {
        Self {
            key: key.into(),
            weight,
            fuzzy: true,
        }
    }

    /// Field that only scores on exact substring containment
    pub fn exact(key: impl Into<String>, weight: f64) -> Self {
        Self {
            fuzzy: false,
            ..Self::new(key, weight)
        }
    }
}

/// Default fields for resource search
pub fn resource_fields() -> Vec<SearchField> {
    vec![
        SearchField::new("name", 3.0),
        SearchField::exact("category", 2.0),
        SearchField::new("description", 1.0),
    ]
}

/// Character ranges that matched within one field
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldMatch {
    pub key: String,
    /// Half-open char-index ranges, ascending
    pub ranges: Vec<Range<usize>>,
}

/// A scored item
#[derive(Debug, Clone)]
pub struct SearchHit<'a, T> {
    pub item: &'a T,
    pub score: f64,
    pub matches: Vec<FieldMatch>,
}

/// Reusable searcher over a fixed set of fields
pub struct FuzzySearcher {
    fields: Vec<SearchField>,
    matcher: SkimMatcherV2,
}

impl std::fmt::Debug for FuzzySearcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FuzzySearcher")
            .field("fields", &self.fields)
            .finish_non_exhaustive()
    }
}

impl FuzzySearcher {
    pub fn new(fields: Vec<SearchField>) -> Self {
        Self {
            fields,
            matcher: SkimMatcherV2::default().ignore_case(),
        }
    }

    pub fn fields(&self) -> &[SearchField] {
        &self.fields
    }

    /// Rank `items` against `query`
    pub fn search<'a, T: Searchable>(&self, items: &'a [T], query: &str) -> Vec<SearchHit<'a, T>> {
        let query = query.trim();
        if query.is_empty() {
            return items
                .iter()
                .map(|item| SearchHit {
                    item,
                    score: 0.0,
                    matches: Vec::new(),
                })
                .collect();
        }

        let query_lower = query.to_lowercase();
        let mut hits: Vec<SearchHit<'a, T>> = items
            .iter()
            .filter_map(|item| self.score_item(item, &query_lower))
            .collect();
        hits.sort_by(|a, b| b.score.total_cmp(&a.score));
        debug!(query = query, hits = hits.len(), total = items.len(), "Fuzzy search completed");
        hits
    }

    fn score_item<'a, T: Searchable>(&self, item: &'a T, query_lower: &str) -> Option<SearchHit<'a, T>> {
        let mut score = 0.0;
        let mut matches = Vec::new();

        for field in &self.fields {
            let Some(text) = item.field(&field.key) else {
                continue;
            };
            if let Some((field_score, ranges)) = self.score_field(&text, query_lower, field.fuzzy) {
                score += field_score * field.weight;
                matches.push(FieldMatch {
                    key: field.key.clone(),
                    ranges,
                });
            }
        }

        (score > 0.0).then_some(SearchHit {
            item,
            score,
            matches,
        })
    }

    fn score_field(
        &self,
        text: &str,
        query_lower: &str,
        fuzzy: bool,
    ) -> Option<(f64, Vec<Range<usize>>)> {
        let (text_lower, origin) = fold_case(text);
        if let Some(byte_pos) = text_lower.find(query_lower) {
            let start = text_lower[..byte_pos].chars().count();
            let end = start + query_lower.chars().count();
            let score = if byte_pos == 0 {
                PREFIX_SCORE
            } else {
                SUBSTRING_SCORE
            };
            let range = match (origin.get(start), origin.get(end.saturating_sub(1))) {
                (Some(&first), Some(&last)) => first..last + 1,
                _ => 0..0,
            };
            return Some((score, vec![range]));
        }

        if !fuzzy {
            return None;
        }

        let (_, indices) = self.matcher.fuzzy_indices(text, query_lower)?;
        let (first, last) = (*indices.first()?, *indices.last()?);
        let compactness = indices.len() as f64 / (last - first + 1) as f64;
        Some((FUZZY_MAX_SCORE * compactness, to_ranges(&indices)))
    }
}

/// Rank `items` against `query` over `fields`
pub fn fuzzy_search<'a, T: Searchable>(
    items: &'a [T],
    fields: &[SearchField],
    query: &str,
) -> Vec<SearchHit<'a, T>> {
    FuzzySearcher::new(fields.to_vec()).search(items, query)
}

/// Lowercase `text`, recording for each lowercase char the index of the
/// original char it came from (some chars lowercase to several)
fn fold_case(text: &str) -> (String, Vec<usize>) {
    let mut folded = String::with_capacity(text.len());
    let mut origin = Vec::with_capacity(text.len());
    for (i, ch) in text.chars().enumerate() {
        for lower in ch.to_lowercase() {
            folded.push(lower);
            origin.push(i);
        }
    }
    (folded, origin)
}

/// Collapse sorted indices into half-open runs
fn to_ranges(indices: &[usize]) -> Vec<Range<usize>> {
    let mut ranges: Vec<Range<usize>> = Vec::new();
    for &i in indices {
        match ranges.last_mut() {
            Some(range) if range.end == i => range.end = i + 1,
            _ => ranges.push(i..i + 1),
        }
    }
    ranges
}
