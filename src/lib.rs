pub mod config;
mod consistent_hashring;
pub mod hasher;
pub mod metrics;
pub mod observability;

pub use consistent_hashring::{
    DEFAULT_REPLICAS,
    Ring,
    RingBuilder,
    RingError,
    RingStats,
};
pub use hasher::{
    Crc32,
    RingHasher,
};
