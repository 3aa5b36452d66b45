//! LMDB implementation of GovernanceStore.
//!
//! Layout:
//! - `organization`: single key → organization record
//! - `policies`: policy name → policy record
//! - `proposals`: id (u64 BE) → proposal record
//! - `registry`: id (u64 BE) → proposer address
//! - `proposer_index`: proposer address → concatenated ids (u64 BE each)
//! - `meta`: `next_proposal_id` → u64 BE

use std::sync::Arc;

use heed::types::Bytes;
use heed::{Database, Env, RwTxn};

use quorum_store::governance::{GovernanceBatch, GovernanceStore, GovernanceWrite};
use quorum_store::StoreError;
use quorum_types::{AccountAddress, ProposalId};

use crate::LmdbError;

const ORGANIZATION_KEY: &[u8] = b"organization";
const NEXT_PROPOSAL_ID_KEY: &[u8] = b"next_proposal_id";

pub struct LmdbGovernanceStore {
    pub(crate) env: Arc<Env>,
    pub(crate) organization_db: Database<Bytes, Bytes>,
    pub(crate) policies_db: Database<Bytes, Bytes>,
    pub(crate) proposals_db: Database<Bytes, Bytes>,
    pub(crate) registry_db: Database<Bytes, Bytes>,
    pub(crate) proposer_index_db: Database<Bytes, Bytes>,
    pub(crate) meta_db: Database<Bytes, Bytes>,
}

fn decode_u64(bytes: &[u8], what: &str) -> Result<u64, LmdbError> {
    let arr: [u8; 8] = bytes
        .try_into()
        .map_err(|_| LmdbError::Serialization(format!("invalid {what} length")))?;
    Ok(u64::from_be_bytes(arr))
}

fn decode_ids(bytes: &[u8]) -> Result<Vec<ProposalId>, LmdbError> {
    if bytes.len() % 8 != 0 {
        return Err(LmdbError::Serialization(
            "proposer index entry is not a whole number of ids".into(),
        ));
    }
    bytes
        .chunks_exact(8)
        .map(|chunk| decode_u64(chunk, "proposal id"))
        .collect()
}

fn decode_address(bytes: &[u8]) -> Result<AccountAddress, LmdbError> {
    let s = std::str::from_utf8(bytes).map_err(|e| LmdbError::Serialization(e.to_string()))?;
    Ok(AccountAddress::new(s))
}

impl LmdbGovernanceStore {
    fn apply(&self, wtxn: &mut RwTxn<'_>, write: GovernanceWrite) -> Result<(), StoreError> {
        match write {
            GovernanceWrite::PutOrganization(data) => {
                self.organization_db
                    .put(wtxn, ORGANIZATION_KEY, data.as_slice())
                    .map_err(LmdbError::from)?;
            }
            GovernanceWrite::PutPolicy { name, data } => {
                self.policies_db
                    .put(wtxn, name.as_bytes(), data.as_slice())
                    .map_err(LmdbError::from)?;
            }
            GovernanceWrite::DeletePolicy(name) => {
                let existed = self
                    .policies_db
                    .delete(wtxn, name.as_bytes())
                    .map_err(LmdbError::from)?;
                if !existed {
                    return Err(StoreError::NotFound(format!("policy {name}")));
                }
            }
            GovernanceWrite::PutProposal { id, proposer, data } => {
                let key = id.to_be_bytes();
                let existing = self
                    .registry_db
                    .get(wtxn, &key)
                    .map_err(LmdbError::from)?
                    .map(decode_address)
                    .transpose()?;
                match existing {
                    Some(owner) if owner != proposer => {
                        return Err(StoreError::Corruption(format!(
                            "proposal {id} belongs to {owner}, not {proposer}"
                        )));
                    }
                    Some(_) => {}
                    None => {
                        self.registry_db
                            .put(wtxn, &key, proposer.as_str().as_bytes())
                            .map_err(LmdbError::from)?;
                        let mut ids = self
                            .proposer_index_db
                            .get(wtxn, proposer.as_str().as_bytes())
                            .map_err(LmdbError::from)?
                            .map(<[u8]>::to_vec)
                            .unwrap_or_default();
                        ids.extend_from_slice(&key);
                        self.proposer_index_db
                            .put(wtxn, proposer.as_str().as_bytes(), ids.as_slice())
                            .map_err(LmdbError::from)?;
                    }
                }
                self.proposals_db
                    .put(wtxn, &key, data.as_slice())
                    .map_err(LmdbError::from)?;
            }
            GovernanceWrite::SetNextProposalId(next) => {
                let current = self
                    .meta_db
                    .get(wtxn, NEXT_PROPOSAL_ID_KEY)
                    .map_err(LmdbError::from)?
                    .map(|b| decode_u64(b, "proposal counter"))
                    .transpose()?
                    .unwrap_or(0);
                if next < current {
                    return Err(StoreError::CounterRegression {
                        current,
                        proposed: next,
                    });
                }
                self.meta_db
                    .put(wtxn, NEXT_PROPOSAL_ID_KEY, &next.to_be_bytes())
                    .map_err(LmdbError::from)?;
            }
        }
        Ok(())
    }
}

impl GovernanceStore for LmdbGovernanceStore {
    fn get_organization(&self) -> Result<Option<Vec<u8>>, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let val = self
            .organization_db
            .get(&rtxn, ORGANIZATION_KEY)
            .map_err(LmdbError::from)?;
        Ok(val.map(<[u8]>::to_vec))
    }

    fn get_policy(&self, name: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let val = self
            .policies_db
            .get(&rtxn, name.as_bytes())
            .map_err(LmdbError::from)?;
        Ok(val.map(<[u8]>::to_vec))
    }

    fn list_policies(&self) -> Result<Vec<(String, Vec<u8>)>, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let mut policies = Vec::new();
        let iter = self.policies_db.iter(&rtxn).map_err(LmdbError::from)?;
        for result in iter {
            let (key, val) = result.map_err(LmdbError::from)?;
            let name = std::str::from_utf8(key)
                .map_err(|e| LmdbError::Serialization(e.to_string()))?;
            policies.push((name.to_string(), val.to_vec()));
        }
        Ok(policies)
    }

    fn policy_count(&self) -> Result<u64, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let count = self.policies_db.len(&rtxn).map_err(LmdbError::from)?;
        Ok(count)
    }

    fn get_proposal(&self, id: ProposalId) -> Result<Option<Vec<u8>>, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let val = self
            .proposals_db
            .get(&rtxn, &id.to_be_bytes())
            .map_err(LmdbError::from)?;
        Ok(val.map(<[u8]>::to_vec))
    }

    fn proposer_of(&self, id: ProposalId) -> Result<Option<AccountAddress>, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let val = self
            .registry_db
            .get(&rtxn, &id.to_be_bytes())
            .map_err(LmdbError::from)?;
        Ok(val.map(decode_address).transpose()?)
    }

    fn proposals_by(&self, proposer: &AccountAddress) -> Result<Vec<ProposalId>, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let val = self
            .proposer_index_db
            .get(&rtxn, proposer.as_str().as_bytes())
            .map_err(LmdbError::from)?;
        match val {
            Some(bytes) => Ok(decode_ids(bytes)?),
            None => Ok(Vec::new()),
        }
    }

    fn next_proposal_id(&self) -> Result<ProposalId, StoreError> {
        let rtxn = self.env.read_txn().map_err(LmdbError::from)?;
        let val = self
            .meta_db
            .get(&rtxn, NEXT_PROPOSAL_ID_KEY)
            .map_err(LmdbError::from)?;
        match val {
            Some(bytes) => Ok(decode_u64(bytes, "proposal counter")?),
            None => Ok(0),
        }
    }

    fn commit(&self, batch: GovernanceBatch) -> Result<(), StoreError> {
        // Dropping the transaction on any error aborts every write in the batch.
        let mut wtxn = self.env.write_txn().map_err(LmdbError::from)?;
        for write in batch.into_writes() {
            self.apply(&mut wtxn, write)?;
        }
        wtxn.commit().map_err(LmdbError::from)?;
        Ok(())
    }
}
