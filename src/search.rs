//! Typo-tolerant ranking of products by name.
//!
//! A name that contains the query scores 0. Any other name scores its edit
//! distance to the query. Both sides are lower-cased before comparison.

use std::mem;
use tracing::debug;

use crate::domain::Product;
use crate::error::CatalogError;

/// Most results a search returns.
pub const SEARCH_LIMIT: usize = 10;

/// Damerau–Levenshtein distance (optimal string alignment) between `a` and
/// `b`, counted in `char`s. Insertions, deletions, substitutions and swaps of
/// two adjacent characters each cost 1. No case folding or trimming.
pub fn edit_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let width = b.len() + 1;
    // Rows i-2, i-1 and i of the alignment table.
    let mut before = vec![0; width];
    let mut prev: Vec<usize> = (0..width).collect();
    let mut cur = vec![0; width];

    for i in 1..=a.len() {
        cur[0] = i;
        for j in 1..=b.len() {
            let cost = usize::from(a[i - 1] != b[j - 1]);
            let mut best = (prev[j] + 1).min(cur[j - 1] + 1).min(prev[j - 1] + cost);
            if i > 1 && j > 1 && a[i - 1] == b[j - 2] && a[i - 2] == b[j - 1] {
                best = best.min(before[j - 2] + 1);
            }
            cur[j] = best;
        }
        mem::swap(&mut before, &mut prev);
        mem::swap(&mut prev, &mut cur);
    }
    prev[b.len()]
}

/// [`edit_distance`] for operands that may be missing.
pub fn distance(a: Option<&str>, b: Option<&str>) -> Result<usize, CatalogError> {
    match (a, b) {
        (Some(a), Some(b)) => Ok(edit_distance(a, b)),
        _ => Err(CatalogError::invalid("Input strings cannot be null")),
    }
}

/// Relevance of `name` for an already lower-cased query. Lower is better.
pub fn score(normalized_query: &str, name: &str) -> Result<usize, CatalogError> {
    let name = name.to_lowercase();
    if name.contains(normalized_query) {
        return Ok(0);
    }
    distance(Some(normalized_query), Some(&name))
}

/// Orders `records` by relevance to `query` and keeps the best [`SEARCH_LIMIT`].
/// Equal scores keep their input order.
pub fn rank(query: Option<&str>, records: Vec<Product>) -> Result<Vec<Product>, CatalogError> {
    let query = match query {
        Some(q) if !q.trim().is_empty() => q.to_lowercase(),
        _ => return Err(CatalogError::invalid("Search query cannot be null or empty")),
    };

    let candidates = records.len();
    let mut scored = records
        .into_iter()
        .map(|product| Ok((score(&query, &product.name)?, product)))
        .collect::<Result<Vec<(usize, Product)>, CatalogError>>()?;
    scored.sort_by_key(|(score, _)| *score);

    let ranked: Vec<Product> = scored.into_iter().take(SEARCH_LIMIT).map(|(_, p)| p).collect();
    debug!(%query, candidates, returned = ranked.len(), "Ranked search candidates");
    Ok(ranked)
}
