//! Dataset store with an explicit load / reuse / invalidate lifecycle.
//!
//! Holds at most one active snapshot: the immutable review table plus the
//! eagerly derived product summaries, keyed by the source path it was read
//! from. Request handlers take cheap `Arc` reads; reload and invalidation
//! swap the snapshot atomically under the write lock.

use anyhow::{Context, Result};
use std::fs;
use std::sync::{Arc, RwLock};

use crate::aggregate::{self, ProductSummary, Review};

/// One fully loaded dataset plus its derived product view.
pub struct DatasetSnapshot {
    /// Source identity the cache is keyed on.
    pub source: String,
    /// RFC 3339 timestamp of the load.
    pub loaded_at: String,
    pub reviews: Vec<Review>,
    pub summaries: Vec<ProductSummary>,
}

pub struct ReviewStore {
    snapshot: RwLock<Option<Arc<DatasetSnapshot>>>,
}

impl ReviewStore {
    pub fn new() -> Self {
        Self {
            snapshot: RwLock::new(None),
        }
    }

    /// Read, parse and aggregate `path`, then swap the new snapshot in.
    /// On a read or parse failure the previous snapshot stays active.
    pub fn load(&self, path: &str) -> Result<Arc<DatasetSnapshot>> {
        let reviews = read_reviews(path)?;
        let summaries = aggregate::aggregate(&reviews);
        println!(
            "📊 Loaded {} reviews across {} products from {}",
            reviews.len(),
            summaries.len(),
            path
        );

        let snapshot = Arc::new(DatasetSnapshot {
            source: path.to_string(),
            loaded_at: chrono::Utc::now().to_rfc3339(),
            reviews,
            summaries,
        });

        if let Ok(mut guard) = self.snapshot.write() {
            *guard = Some(snapshot.clone());
        }
        Ok(snapshot)
    }

    /// Cache keyed by source identity: reuse the active snapshot when the
    /// path matches, reload when it differs or nothing is loaded yet.
    pub fn ensure_loaded(&self, path: &str) -> Result<Arc<DatasetSnapshot>> {
        if let Some(current) = self.current() {
            if current.source == path {
                return Ok(current);
            }
        }
        self.load(path)
    }

    /// Drop the active snapshot. Readers see "no dataset" afterwards.
    pub fn invalidate(&self) {
        if let Ok(mut guard) = self.snapshot.write() {
            if guard.take().is_some() {
                println!("🗑️ Dataset cache invalidated");
            }
        }
    }

    /// Shared read of the active snapshot, if any.
    pub fn current(&self) -> Option<Arc<DatasetSnapshot>> {
        self.snapshot.read().ok().and_then(|guard| guard.clone())
    }
}

/// Parse the dataset file: a JSON array of review rows, or JSON Lines
/// when the file ends in `.jsonl`.
fn read_reviews(path: &str) -> Result<Vec<Review>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("Failed to read dataset file {}", path))?;
    if path.ends_with(".jsonl") {
        parse_review_lines(&raw)
    } else {
        serde_json::from_str(&raw).with_context(|| format!("Malformed dataset {}", path))
    }
}

fn parse_review_lines(raw: &str) -> Result<Vec<Review>> {
    let mut reviews = Vec::new();
    for (index, line) in raw.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let review: Review = serde_json::from_str(line)
            .with_context(|| format!("Malformed review on line {}", index + 1))?;
        reviews.push(review);
    }
    Ok(reviews)
}
