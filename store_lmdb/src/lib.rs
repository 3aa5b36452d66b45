//! LMDB storage backend for the Quorum governance engine.
//!
//! Implements the storage traits from `quorum-store` using the `heed` LMDB bindings.
//! Each logical store maps to one or more LMDB databases within a single environment.

pub mod environment;
pub mod error;
pub mod governance;

pub use environment::LmdbEnvironment;
pub use error::LmdbError;
pub use governance::LmdbGovernanceStore;
