// crates/vc_spatial/src/cache.rs
//
// Injected result cache for grid computations.
//
// The key is a canonical config: candidate positions and the approval
// threshold rounded to integer thousandths, the method, the grid resolution
// and an optional caller-supplied population tag (voters are not hashed).
// Keys are digested as SHA-256 over canonical JSON, so field order and float
// noise below 1e-3 never split an entry.

use std::collections::btree_map::Entry;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::trace;

use vc_algo::Method;
use vc_core::{CandidateId, SpatialParams};
use vc_io::hasher::short_digest;
use vc_io::sha256_canonical;

use crate::model::{Point, SpatialCandidate};
use crate::yee::{compute_yee_grid, YeeGrid};
use crate::SpatialResult;

#[inline]
fn thousandths(v: f64) -> i64 {
    (v * 1000.0).round() as i64
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateKey {
    pub id: CandidateId,
    pub x: i64,
    pub y: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridCacheKey {
    pub candidates: Vec<CandidateKey>,
    pub method: Method,
    pub threshold: i64,
    pub resolution: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub population: Option<String>,
}

impl GridCacheKey {
    pub fn new(
        candidates: &[SpatialCandidate],
        method: Method,
        params: &SpatialParams,
        population: Option<&str>,
    ) -> Self {
        Self {
            candidates: candidates
                .iter()
                .map(|c| CandidateKey { id: c.id.clone(), x: thousandths(c.x), y: thousandths(c.y) })
                .collect(),
            method,
            threshold: thousandths(params.approval_threshold),
            resolution: params.grid_resolution,
            population: population.map(str::to_owned),
        }
    }

    /// Lowercase SHA-256 hex of the canonical key.
    pub fn digest(&self) -> SpatialResult<String> {
        Ok(sha256_canonical(self)?)
    }
}

/// Explicit cache object; callers own it and pass it by `&mut`.
#[derive(Debug)]
pub struct ResultCache<T = YeeGrid> {
    entries: BTreeMap<String, T>,
    hits: u64,
    misses: u64,
}

impl<T> Default for ResultCache<T> {
    fn default() -> Self {
        Self { entries: BTreeMap::new(), hits: 0, misses: 0 }
    }
}

impl<T> ResultCache<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> u64 {
        self.hits
    }

    pub fn misses(&self) -> u64 {
        self.misses
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Lookup without touching the hit/miss counters.
    pub fn get(&self, key: &GridCacheKey) -> SpatialResult<Option<&T>> {
        Ok(self.entries.get(&key.digest()?))
    }

    pub fn insert(&mut self, key: &GridCacheKey, value: T) -> SpatialResult<Option<T>> {
        Ok(self.entries.insert(key.digest()?, value))
    }

    /// Cached value for `key`, computing and storing it on a miss.
    /// A failed computation stores nothing.
    pub fn get_or_compute<F>(&mut self, key: &GridCacheKey, compute: F) -> SpatialResult<&T>
    where
        F: FnOnce() -> SpatialResult<T>,
    {
        let digest = key.digest()?;
        match self.entries.entry(digest) {
            Entry::Occupied(e) => {
                self.hits += 1;
                trace!(key = short_digest(e.key(), 12), "result cache hit");
                Ok(e.into_mut())
            }
            Entry::Vacant(e) => {
                self.misses += 1;
                let value = compute()?;
                trace!(key = short_digest(e.key(), 12), "result cache miss");
                Ok(e.insert(value))
            }
        }
    }
}

impl ResultCache<YeeGrid> {
    /// Yee grid through the cache. `population` names the electorate; reuse a
    /// tag only for the same voters.
    pub fn yee_grid(
        &mut self,
        population: Option<&str>,
        voters: &[Point],
        candidates: &[SpatialCandidate],
        method: Method,
        params: &SpatialParams,
    ) -> SpatialResult<&YeeGrid> {
        let key = GridCacheKey::new(candidates, method, params, population);
        self.get_or_compute(&key, || compute_yee_grid(voters, candidates, method, params))
    }
}
