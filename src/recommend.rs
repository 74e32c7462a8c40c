//! Recommendation assistant.
//!
//! Routes a free-text question ("best phone?") to a product category via a
//! fixed keyword table, then picks the best-rated product inside the
//! resolved candidate subset. An empty subset is reported as an explicit
//! no-match outcome rather than a panic.

use once_cell::sync::Lazy;

use crate::aggregate::ProductSummary;
use crate::filter::ALL_CATEGORIES;

/// One routing rule: if any keyword occurs in the lowercased query, the
/// query is about `category`.
pub struct CategoryRule {
    pub category: &'static str,
    pub keywords: &'static [&'static str],
}

/// Keyword table for the assistant, evaluated top-down; the first rule
/// with a hit wins.
pub static CATEGORY_RULES: Lazy<Vec<CategoryRule>> = Lazy::new(|| {
    vec![
        CategoryRule {
            category: "Electronics",
            keywords: &[
                "phone", "mobile", "laptop", "tablet", "headphone", "camera", "gadget",
                "electronic",
            ],
        },
        CategoryRule {
            category: "Books",
            keywords: &["book", "novel", "read", "author"],
        },
        CategoryRule {
            category: "Clothing",
            keywords: &["cloth", "shirt", "dress", "fashion", "jeans", "wear", "shoe"],
        },
    ]
});

/// Map a free-text question to an implied category. Matching is plain
/// substring containment, so "smartphones" hits the "phone" keyword.
pub fn route_query(query: &str) -> Option<&'static str> {
    let query = query.to_lowercase();
    for rule in CATEGORY_RULES.iter() {
        if rule.keywords.iter().any(|keyword| query.contains(keyword)) {
            return Some(rule.category);
        }
    }
    None
}

/// Resolve the category narrowing for a recommendation request: free-text
/// keywords take precedence over the explicit filter selection, and
/// "All"/absent means the whole catalog.
pub fn resolve_category(free_text: Option<&str>, selected: Option<&str>) -> Option<String> {
    if let Some(query) = free_text {
        if let Some(routed) = route_query(query) {
            return Some(routed.to_string());
        }
    }
    selected
        .map(str::trim)
        .filter(|c| !c.is_empty() && *c != ALL_CATEGORIES)
        .map(str::to_string)
}

/// Outcome of a recommendation request.
#[derive(Debug)]
pub enum RecommendOutcome<'a> {
    /// Best-rated product within the resolved candidate subset.
    Match {
        product: &'a ProductSummary,
        resolved_category: Option<String>,
    },
    /// The resolved subset had no products. The caller renders this as a
    /// "no recommendation available" state, never an error.
    NoCandidates { resolved_category: Option<String> },
}

/// Pick the best-rated product for a query/filter pair. Ties keep the
/// product encountered first in `summaries` order.
pub fn recommend<'a>(
    summaries: &'a [ProductSummary],
    selected_category: Option<&str>,
    free_text: Option<&str>,
) -> RecommendOutcome<'a> {
    let resolved = resolve_category(free_text, selected_category);

    let mut best: Option<&ProductSummary> = None;
    for summary in summaries {
        if let Some(category) = resolved.as_deref() {
            if summary.category != category {
                continue;
            }
        }
        // Strictly-greater comparison keeps the earliest candidate on ties.
        if best.map_or(true, |current| summary.average_rating > current.average_rating) {
            best = Some(summary);
        }
    }

    match best {
        Some(product) => RecommendOutcome::Match {
            product,
            resolved_category: resolved,
        },
        None => RecommendOutcome::NoCandidates {
            resolved_category: resolved,
        },
    }
}
