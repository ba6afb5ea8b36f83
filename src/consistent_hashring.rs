use std::{
    collections::{
        BTreeMap,
        BTreeSet,
        HashMap,
    },
    fmt,
    sync::{
        Arc,
        PoisonError,
        RwLock,
        RwLockReadGuard,
    },
};

use serde::Serialize;
use thiserror::Error;
use tracing::{
    debug,
    trace,
};

use crate::{
    hasher::{
        Crc32,
        RingHasher,
    },
    metrics,
};

/// Virtual points generated per member unless configured otherwise.
pub const DEFAULT_REPLICAS: usize = 128;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RingError {
    #[error("Hash ring is empty, insert at least one member before resolving keys")]
    EmptyRing,
    #[error("Invalid replica count {0}, must be at least 1")]
    InvalidReplicas(usize),
}

/// Points and their owners. Only ever touched through the ring's lock.
#[derive(Default)]
struct Circle {
    /// Sorted ascending, duplicates allowed.
    points: Vec<u64>,
    /// Owner of each point. A colliding point belongs to whoever wrote it last.
    owners: HashMap<u64, String>,
}

impl Circle {
    /// Walk clockwise from `hkey` to the first point at or past it, wrapping
    /// to the first point when `hkey` is beyond the last one.
    fn owner_of(&self, hkey: u64) -> Option<&str> {
        let idx = self.points.partition_point(|point| *point < hkey);
        let point = self.points.get(idx).or_else(|| self.points.first())?;
        self.owners.get(point).map(String::as_str)
    }
}

/// A consistent hash ring.
///
/// Maps keys to members in a way that only moves a small fraction of keys
/// when members are added. Every member is placed on the ring `replicas`
/// times; the point for virtual node `i` of member `m` is the hash of `m`
/// followed by the decimal digits of `i`.
///
/// Inserts take the lock exclusively, lookups share it, so a `Ring` can sit
/// behind an `Arc` and be resolved from many threads at once.
pub struct Ring {
    replicas: usize,
    hasher: Arc<dyn RingHasher>,
    circle: RwLock<Circle>,
}

/// Point-in-time view of a ring's contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RingStats {
    pub replicas: usize,
    /// Total points, collisions included.
    pub points: usize,
    /// Points with distinct hash values.
    pub distinct_points: usize,
    /// Points owned by each member.
    pub members: BTreeMap<String, usize>,
}

#[derive(Clone)]
pub struct RingBuilder {
    replicas: usize,
    hasher: Arc<dyn RingHasher>,
}

impl Default for RingBuilder {
    fn default() -> Self {
        Self {
            replicas: DEFAULT_REPLICAS,
            hasher: Arc::new(Crc32),
        }
    }
}

impl RingBuilder {
    /// Override the number of virtual points per member.
    pub fn replicas(mut self, replicas: usize) -> Self {
        self.replicas = replicas;
        self
    }

    /// Override the hash function used for both members and keys.
    pub fn hasher<H>(mut self, hasher: H) -> Self
    where
        H: RingHasher + 'static,
    {
        self.hasher = Arc::new(hasher);
        self
    }

    pub fn build(self) -> Result<Ring, RingError> {
        if self.replicas == 0 {
            return Err(RingError::InvalidReplicas(self.replicas));
        }

        Ok(self.into_ring())
    }

    fn into_ring(self) -> Ring {
        Ring {
            replicas: self.replicas,
            hasher: self.hasher,
            circle: RwLock::new(Circle::default()),
        }
    }
}

impl Ring {
    /// Create an empty ring with [`DEFAULT_REPLICAS`] and the CRC-32 hasher.
    pub fn new() -> Self {
        RingBuilder::default().into_ring()
    }

    pub fn builder() -> RingBuilder {
        RingBuilder::default()
    }

    pub fn replicas(&self) -> usize {
        self.replicas
    }

    /// Add members to the ring.
    ///
    /// Adding a member that is already present places a second full set of
    /// its points. When two labels hash to the same point the later one wins,
    /// in input order and then by ascending virtual node index.
    ///
    /// Points are hashed before the lock is taken, so a panicking hasher
    /// leaves the ring exactly as it was and none of the batch is applied.
    pub fn insert<I, S>(&self, members: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut placed: Vec<(u64, String)> = Vec::new();
        let mut inserted = 0;

        for member in members {
            let member = member.as_ref();
            for i in 0..self.replicas {
                let point = self.hash(format!("{member}{i}").as_bytes());
                placed.push((point, member.to_string()));
            }
            inserted += 1;
        }

        let mut circle = self.circle.write().unwrap_or_else(PoisonError::into_inner);
        let added = placed.len();
        for (point, member) in placed {
            circle.points.push(point);
            circle.owners.insert(point, member);
        }
        circle.points.sort_unstable();

        let total = circle.points.len();
        debug!(members = inserted, added, total, "inserted members into hash ring");
        metrics::record_insert(inserted, total);
    }

    /// Get the member responsible for `key`.
    pub fn resolve<K>(&self, key: K) -> Result<String, RingError>
    where
        K: AsRef<[u8]>,
    {
        let hkey = self.hash(key.as_ref());
        let circle = self.read();

        if circle.points.is_empty() {
            metrics::record_resolve("empty_ring");
            return Err(RingError::EmptyRing);
        }

        let owner = circle.owner_of(hkey).ok_or(RingError::EmptyRing)?.to_string();
        trace!(hkey, owner = %owner, "resolved key");
        metrics::record_resolve("ok");
        Ok(owner)
    }

    /// Number of points on the ring, collisions included.
    pub fn len(&self) -> usize {
        self.read().points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().points.is_empty()
    }

    /// Distinct members that own at least one point.
    pub fn members(&self) -> BTreeSet<String> {
        self.read().owners.values().cloned().collect()
    }

    pub fn stats(&self) -> RingStats {
        let circle = self.read();

        let mut members = BTreeMap::new();
        for point in &circle.points {
            if let Some(owner) = circle.owners.get(point) {
                *members.entry(owner.clone()).or_insert(0) += 1;
            }
        }

        RingStats {
            replicas: self.replicas,
            points: circle.points.len(),
            distinct_points: circle.owners.len(),
            members,
        }
    }

    fn hash(&self, bytes: &[u8]) -> u64 {
        u64::from(self.hasher.hash(bytes))
    }

    fn read(&self) -> RwLockReadGuard<'_, Circle> {
        self.circle.read().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for Ring {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Ring {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ring")
            .field("replicas", &self.replicas)
            .field("points", &self.len())
            .finish_non_exhaustive()
    }
}
