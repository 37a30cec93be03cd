use anyhow::{Context, Result};
use tracing::debug;

use crate::taxonomy::types::Term;

/// Load a term list from a local JSON file or, for `http(s)` inputs, over
/// HTTP. The payload must be a JSON array of term objects.
pub fn load_terms(input: &str) -> Result<Vec<Term>> {
    let json = if input.starts_with("http://") || input.starts_with("https://") {
        fetch_terms(input)?
    } else {
        std::fs::read_to_string(input)
            .with_context(|| format!("Failed to read term list from {}", input))?
    };

    let terms: Vec<Term> = serde_json::from_str(&json)
        .with_context(|| format!("Invalid term list JSON in {}", input))?;
    debug!(count = terms.len(), "loaded terms");
    Ok(terms)
}

fn fetch_terms(url: &str) -> Result<String> {
    debug!(url, "fetching term list");
    let response = reqwest::blocking::get(url)
        .with_context(|| format!("Failed to fetch term list from {}", url))?;
    if !response.status().is_success() {
        anyhow::bail!("Term list not found at {} (HTTP {})", url, response.status());
    }
    response
        .text()
        .context("Failed to read term list response body")
}

/// Upstream filtering applied before the renderer sees the list: keep terms
/// belonging to the requested taxonomy (untagged terms always pass) and,
/// when `hide_empty`, drop terms known to have no attached objects.
pub fn filter_terms(terms: Vec<Term>, taxonomy: &str, hide_empty: bool) -> Vec<Term> {
    let before = terms.len();
    let filtered: Vec<Term> = terms
        .into_iter()
        .filter(|t| t.taxonomy.as_deref().map_or(true, |tax| tax == taxonomy))
        .filter(|t| !hide_empty || t.count != Some(0))
        .collect();
    if filtered.len() != before {
        debug!(
            kept = filtered.len(),
            dropped = before - filtered.len(),
            "filtered terms"
        );
    }
    filtered
}
