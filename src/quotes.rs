//! Quote rotation: per-category shuffled queues with no immediate repeats.
//!
//! Each category owns a pool (the catalog's variants), a queue of
//! not-yet-served variants for the current cycle, and the last value served.
//! `next` pops from the queue, reshuffling the whole pool once the queue
//! runs dry. If the popped value equals the last one served and another
//! value is waiting, the popped value is sent to the back and the next one
//! is served instead.
//!
//! A pool of one can only ever repeat. That is left as is: the fix belongs
//! in the content, not here.
//!
//! No I/O and no failure path: unknown or empty categories yield `""`.

use std::collections::{HashMap, VecDeque};

use rand::rngs::SmallRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::catalog::Catalog;

/// Rotation state for a single category.
#[derive(Debug, Clone)]
struct Rotation {
    /// Full variant list, never modified.
    pool: Vec<String>,
    /// Variants still to serve in the current cycle, front first.
    queue: VecDeque<String>,
    /// Most recently served variant.
    last_served: Option<String>,
}

impl Rotation {
    fn new<R: Rng + ?Sized>(pool: Vec<String>, rng: &mut R) -> Self {
        let queue = shuffled(&pool, rng);
        Rotation {
            pool,
            queue,
            last_served: None,
        }
    }
}

/// Serves quotes per category.
///
/// Owns its generator so tests (and `--seed`) can inject a deterministic one.
/// Built once by the caller and passed around by `&mut`; there is no
/// shared instance.
#[derive(Debug)]
pub struct QuoteManager<R = SmallRng> {
    rotations: HashMap<String, Rotation>,
    rng: R,
}

impl QuoteManager<SmallRng> {
    /// Manager seeded from OS entropy.
    pub fn new(catalog: &Catalog) -> Self {
        Self::with_rng(catalog, SmallRng::from_os_rng())
    }

    /// Manager with a reproducible sequence.
    pub fn seeded(catalog: &Catalog, seed: u64) -> Self {
        Self::with_rng(catalog, SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> QuoteManager<R> {
    /// Build one rotation per catalog category, each starting from a fresh shuffle.
    pub fn with_rng(catalog: &Catalog, mut rng: R) -> Self {
        let rotations = catalog
            .iter()
            .map(|(key, category)| {
                let rotation = Rotation::new(category.variants.clone(), &mut rng);
                (key.to_string(), rotation)
            })
            .collect();

        QuoteManager { rotations, rng }
    }

    /// Serve the next quote for `key`.
    ///
    /// Returns an empty string for unknown keys and empty pools.
    pub fn next(&mut self, key: &str) -> String {
        let Some(rotation) = self.rotations.get_mut(key) else {
            return String::new();
        };
        if rotation.pool.is_empty() {
            return String::new();
        }

        if rotation.queue.is_empty() {
            rotation.queue = shuffled(&rotation.pool, &mut self.rng);
            tracing::debug!("reshuffled {} quotes for '{}'", rotation.pool.len(), key);
        }

        let Some(mut candidate) = rotation.queue.pop_front() else {
            return String::new();
        };

        if rotation.last_served.as_ref() == Some(&candidate) {
            if let Some(replacement) = rotation.queue.pop_front() {
                rotation.queue.push_back(candidate);
                candidate = replacement;
            }
        }

        rotation.last_served = Some(candidate.clone());
        candidate
    }
}

impl<R> QuoteManager<R> {
    /// Number of variants left in the current cycle, or None for unknown keys.
    pub fn remaining(&self, key: &str) -> Option<usize> {
        self.rotations.get(key).map(|r| r.queue.len())
    }

    /// The last quote served for `key`, if any.
    pub fn last_served(&self, key: &str) -> Option<&str> {
        self.rotations.get(key)?.last_served.as_deref()
    }

    /// Size of the full pool for `key`.
    pub fn pool_size(&self, key: &str) -> Option<usize> {
        self.rotations.get(key).map(|r| r.pool.len())
    }
}

/// A uniformly random permutation of `pool` (Fisher-Yates).
fn shuffled<R: Rng + ?Sized>(pool: &[String], rng: &mut R) -> VecDeque<String> {
    let mut items = pool.to_vec();
    items.shuffle(rng);
    items.into()
}

// ============================================================================
// TESTS
// ============================================================================
