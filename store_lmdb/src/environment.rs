//! LMDB environment setup.

use std::path::Path;
use std::sync::Arc;

use heed::types::Bytes;
use heed::{Database, Env, EnvOpenOptions};

use crate::governance::LmdbGovernanceStore;
use crate::LmdbError;

/// Wraps the LMDB environment and all database handles.
pub struct LmdbEnvironment {
    env: Arc<Env>,
    pub(crate) organization_db: Database<Bytes, Bytes>,
    pub(crate) policies_db: Database<Bytes, Bytes>,
    pub(crate) proposals_db: Database<Bytes, Bytes>,
    pub(crate) registry_db: Database<Bytes, Bytes>,
    pub(crate) proposer_index_db: Database<Bytes, Bytes>,
    pub(crate) meta_db: Database<Bytes, Bytes>,
}

impl LmdbEnvironment {
    /// Number of named databases this environment creates.
    pub const DATABASES: u32 = 6;

    /// Open or create an LMDB environment at the given path.
    ///
    /// The directory is created if it does not exist yet.
    pub fn open(path: &Path, max_dbs: u32, map_size: usize) -> Result<Self, LmdbError> {
        std::fs::create_dir_all(path)?;
        // SAFETY: the environment is opened at most once per path by this
        // process and the memory map is never accessed outside heed.
        let env = unsafe {
            EnvOpenOptions::new()
                .map_size(map_size)
                .max_dbs(max_dbs.max(Self::DATABASES))
                .open(path)?
        };

        let mut wtxn = env.write_txn()?;
        let organization_db: Database<Bytes, Bytes> =
            env.create_database(&mut wtxn, Some("organization"))?;
        let policies_db: Database<Bytes, Bytes> =
            env.create_database(&mut wtxn, Some("policies"))?;
        let proposals_db: Database<Bytes, Bytes> =
            env.create_database(&mut wtxn, Some("proposals"))?;
        let registry_db: Database<Bytes, Bytes> =
            env.create_database(&mut wtxn, Some("registry"))?;
        let proposer_index_db: Database<Bytes, Bytes> =
            env.create_database(&mut wtxn, Some("proposer_index"))?;
        let meta_db: Database<Bytes, Bytes> = env.create_database(&mut wtxn, Some("meta"))?;
        wtxn.commit()?;

        tracing::debug!(path = %path.display(), map_size, "opened LMDB environment");

        Ok(Self {
            env: Arc::new(env),
            organization_db,
            policies_db,
            proposals_db,
            registry_db,
            proposer_index_db,
            meta_db,
        })
    }

    /// The underlying heed environment.
    pub fn env(&self) -> &Env {
        &self.env
    }

    /// A governance store backed by this environment.
    pub fn governance_store(&self) -> LmdbGovernanceStore {
        LmdbGovernanceStore {
            env: Arc::clone(&self.env),
            organization_db: self.organization_db,
            policies_db: self.policies_db,
            proposals_db: self.proposals_db,
            registry_db: self.registry_db,
            proposer_index_db: self.proposer_index_db,
            meta_db: self.meta_db,
        }
    }
}
