//! # Proof Cache — Time-Bounded Store with Capacity Eviction
//!
//! Keyed by proof id. Reads check expiry, so an expired entry is absent
//! before the periodic sweep physically removes it. At capacity the
//! oldest entries are evicted first — an availability/audit concern
//! only: losing a cached proof invalidates nothing a holder already has
//! a copy of.
//!
//! ## Concurrency
//!
//! The cache is the only shared mutable state in the engine. A single
//! `RwLock` guards the map plus insertion order; the expiry sweep
//! snapshots candidate ids under a read lock, then removes them under
//! one short write lock — it never holds the cache for the duration of
//! per-entry scanning.

use std::collections::{HashMap, VecDeque};
use std::sync::RwLock;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use zkid_core::Timestamp;

use crate::error::CacheImportError;
use crate::proof::{ProofId, ZkProof};

/// Default capacity bound.
pub const DEFAULT_CACHE_CAPACITY: usize = 1000;

/// Aggregate statistics over the live cache contents.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheStats {
    /// Number of cached proofs (including not-yet-swept expired entries).
    pub total: usize,
    /// Counts keyed by security level wire name.
    pub by_security_level: BTreeMap<String, usize>,
    /// Fraction of cached proofs flagged quantum-resistant. Zero for
    /// everything this engine issues.
    pub quantum_resistant_ratio: f64,
    /// Mean age of cached proofs in seconds.
    pub mean_age_secs: f64,
}

/// A serializable snapshot of the cache for persistence handoff.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheExport {
    /// Snapshot format version.
    pub version: u32,
    /// When the snapshot was taken.
    pub exported_at: Timestamp,
    /// Cached proofs in insertion order, oldest first.
    pub proofs: Vec<ZkProof>,
}

/// Current export format version.
pub const CACHE_EXPORT_VERSION: u32 = 1;

struct CacheState {
    map: HashMap<ProofId, ZkProof>,
    // Insertion order for oldest-first eviction.
    order: VecDeque<ProofId>,
}

/// The proof cache.
pub struct ProofCache {
    capacity: RwLock<usize>,
    state: RwLock<CacheState>,
}

impl ProofCache {
    /// Create a cache bounded to `capacity` entries (minimum 1).
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: RwLock::new(capacity.max(1)),
            state: RwLock::new(CacheState {
                map: HashMap::new(),
                order: VecDeque::new(),
            }),
        }
    }

    /// Current capacity bound.
    pub fn capacity(&self) -> usize {
        *self.capacity.read().unwrap_or_else(|e| e.into_inner())
    }

    /// Change the capacity bound, evicting oldest entries if the live
    /// contents now overflow.
    pub fn set_capacity(&self, capacity: usize) {
        let capacity = capacity.max(1);
        *self.capacity.write().unwrap_or_else(|e| e.into_inner()) = capacity;
        let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
        while state.map.len() > capacity {
            evict_oldest(&mut state);
        }
    }

    /// Number of stored entries (including not-yet-swept expired ones).
    pub fn len(&self) -> usize {
        self.state.read().unwrap_or_else(|e| e.into_inner()).map.len()
    }

    /// Whether the cache is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Store a proof, evicting the oldest entries if at capacity.
    ///
    /// Re-putting an existing id replaces the entry and refreshes its
    /// insertion position.
    pub fn put(&self, proof: ZkProof) {
        let capacity = self.capacity();
        let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
        if state.map.contains_key(&proof.id) {
            state.order.retain(|id| id != &proof.id);
        }
        while state.map.len() >= capacity && !state.map.contains_key(&proof.id) {
            evict_oldest(&mut state);
        }
        state.order.push_back(proof.id.clone());
        state.map.insert(proof.id.clone(), proof);
    }

    /// Fetch a proof by id. An entry whose expiry has passed is treated
    /// as absent even before the sweep removes it.
    pub fn get(&self, id: &ProofId, now: Timestamp) -> Option<ZkProof> {
        let state = self.state.read().unwrap_or_else(|e| e.into_inner());
        state
            .map
            .get(id)
            .filter(|proof| !proof.is_expired(now))
            .cloned()
    }

    /// Remove a proof by id, returning it if present.
    pub fn remove(&self, id: &ProofId) -> Option<ZkProof> {
        let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
        let removed = state.map.remove(id);
        if removed.is_some() {
            state.order.retain(|stored| stored != id);
        }
        removed
    }

    /// Sweep expired entries, returning how many were removed.
    ///
    /// Snapshot-filter-swap: candidates are collected under a read lock,
    /// then removed under a short write lock with the expiry re-checked,
    /// so an in-flight `put`/`get` is never blocked behind a full scan.
    pub fn cleanup_expired(&self, now: Timestamp) -> usize {
        let expired: Vec<ProofId> = {
            let state = self.state.read().unwrap_or_else(|e| e.into_inner());
            state
                .map
                .values()
                .filter(|proof| proof.is_expired(now))
                .map(|proof| proof.id.clone())
                .collect()
        };
        if expired.is_empty() {
            return 0;
        }

        let mut state = self.state.write().unwrap_or_else(|e| e.into_inner());
        let mut removed = 0;
        for id in &expired {
            let still_expired = state
                .map
                .get(id)
                .map(|proof| proof.is_expired(now))
                .unwrap_or(false);
            if still_expired {
                state.map.remove(id);
                state.order.retain(|stored| stored != id);
                removed += 1;
            }
        }
        if removed > 0 {
            tracing::debug!(removed, "expired proofs swept from cache");
        }
        removed
    }

    /// Aggregate statistics at `now`.
    pub fn stats(&self, now: Timestamp) -> CacheStats {
        let state = self.state.read().unwrap_or_else(|e| e.into_inner());
        let total = state.map.len();
        let mut by_security_level: BTreeMap<String, usize> = BTreeMap::new();
        let mut quantum_resistant = 0usize;
        let mut age_sum = 0i64;
        for proof in state.map.values() {
            *by_security_level
                .entry(proof.security_level.as_str().to_string())
                .or_insert(0) += 1;
            if proof.quantum_resistant {
                quantum_resistant += 1;
            }
            age_sum += now.secs_since(&proof.timestamp).max(0);
        }
        CacheStats {
            total,
            by_security_level,
            quantum_resistant_ratio: if total == 0 {
                0.0
            } else {
                quantum_resistant as f64 / total as f64
            },
            mean_age_secs: if total == 0 {
                0.0
            } else {
                age_sum as f64 / total as f64
            },
        }
    }

    /// Snapshot the cache for persistence handoff, oldest first.
    pub fn export(&self) -> CacheExport {
        let state = self.state.read().unwrap_or_else(|e| e.into_inner());
        let proofs = state
            .order
            .iter()
            .filter_map(|id| state.map.get(id).cloned())
            .collect();
        CacheExport {
            version: CACHE_EXPORT_VERSION,
            exported_at: Timestamp::now(),
            proofs,
        }
    }

    /// Restore entries from a snapshot, returning how many were
    /// imported.
    ///
    /// The payload is validated in full before anything is inserted — a
    /// malformed payload leaves the existing cache untouched.
    pub fn import(&self, export: CacheExport) -> Result<usize, CacheImportError> {
        if export.version != CACHE_EXPORT_VERSION {
            return Err(CacheImportError::Malformed(format!(
                "unsupported export version {}",
                export.version
            )));
        }
        let mut seen = std::collections::HashSet::new();
        for proof in &export.proofs {
            if !seen.insert(proof.id.clone()) {
                return Err(CacheImportError::DuplicateId(proof.id.to_string()));
            }
            if proof.expires_at <= proof.timestamp {
                return Err(CacheImportError::InvalidExpiry(proof.id.to_string()));
            }
        }

        let imported = export.proofs.len();
        for proof in export.proofs {
            self.put(proof);
        }
        tracing::debug!(imported, "cache import applied");
        Ok(imported)
    }
}

fn evict_oldest(state: &mut CacheState) {
    while let Some(oldest) = state.order.pop_front() {
        if state.map.remove(&oldest).is_some() {
            tracing::debug!(id = %oldest, "cache at capacity, evicted oldest proof");
            break;
        }
    }
}
