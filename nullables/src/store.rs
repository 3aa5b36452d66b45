//! Nullable store: thread-safe in-memory governance storage for testing.

use quorum_store::governance::{GovernanceBatch, GovernanceStore, GovernanceWrite};
use quorum_store::StoreError;
use quorum_types::{AccountAddress, ProposalId};
use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

#[derive(Clone, Default)]
struct GovernanceState {
    organization: Option<Vec<u8>>,
    policies: BTreeMap<String, Vec<u8>>,
    proposals: BTreeMap<ProposalId, Vec<u8>>,
    registry: BTreeMap<ProposalId, AccountAddress>,
    by_proposer: HashMap<AccountAddress, Vec<ProposalId>>,
    next_proposal_id: ProposalId,
}

impl GovernanceState {
    fn apply(&mut self, write: GovernanceWrite) -> Result<(), StoreError> {
        match write {
            GovernanceWrite::PutOrganization(data) => self.organization = Some(data),
            GovernanceWrite::PutPolicy { name, data } => {
                self.policies.insert(name, data);
            }
            GovernanceWrite::DeletePolicy(name) => {
                self.policies
                    .remove(&name)
                    .ok_or_else(|| StoreError::NotFound(format!("policy {name}")))?;
            }
            GovernanceWrite::PutProposal { id, proposer, data } => {
                match self.registry.get(&id) {
                    Some(existing) if *existing != proposer => {
                        return Err(StoreError::Corruption(format!(
                            "proposal {id} belongs to {existing}, not {proposer}"
                        )));
                    }
                    Some(_) => {}
                    None => {
                        self.registry.insert(id, proposer.clone());
                        self.by_proposer.entry(proposer).or_default().push(id);
                    }
                }
                self.proposals.insert(id, data);
            }
            GovernanceWrite::SetNextProposalId(next) => {
                if next < self.next_proposal_id {
                    return Err(StoreError::CounterRegression {
                        current: self.next_proposal_id,
                        proposed: next,
                    });
                }
                self.next_proposal_id = next;
            }
        }
        Ok(())
    }
}

/// An in-memory governance store for testing.
///
/// A batch is applied to a scratch copy of the state and only swapped in once
/// every write succeeded, so a failing batch leaves nothing behind.
pub struct NullGovernanceStore {
    state: Mutex<GovernanceState>,
}

impl NullGovernanceStore {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(GovernanceState::default()),
        }
    }
}

impl Default for NullGovernanceStore {
    fn default() -> Self {
        Self::new()
    }
}

impl GovernanceStore for NullGovernanceStore {
    fn get_organization(&self) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.state.lock().unwrap().organization.clone())
    }

    fn get_policy(&self, name: &str) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.state.lock().unwrap().policies.get(name).cloned())
    }

    fn list_policies(&self) -> Result<Vec<(String, Vec<u8>)>, StoreError> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .policies
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }

    fn policy_count(&self) -> Result<u64, StoreError> {
        Ok(self.state.lock().unwrap().policies.len() as u64)
    }

    fn get_proposal(&self, id: ProposalId) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self.state.lock().unwrap().proposals.get(&id).cloned())
    }

    fn proposer_of(&self, id: ProposalId) -> Result<Option<AccountAddress>, StoreError> {
        Ok(self.state.lock().unwrap().registry.get(&id).cloned())
    }

    fn proposals_by(&self, proposer: &AccountAddress) -> Result<Vec<ProposalId>, StoreError> {
        Ok(self
            .state
            .lock()
            .unwrap()
            .by_proposer
            .get(proposer)
            .cloned()
            .unwrap_or_default())
    }

    fn next_proposal_id(&self) -> Result<ProposalId, StoreError> {
        Ok(self.state.lock().unwrap().next_proposal_id)
    }

    fn commit(&self, batch: GovernanceBatch) -> Result<(), StoreError> {
        let mut state = self.state.lock().unwrap();
        let mut scratch = state.clone();
        for write in batch.into_writes() {
            scratch.apply(write)?;
        }
        *state = scratch;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> AccountAddress {
        AccountAddress::new("alice")
    }

    #[test]
    fn fresh_store_is_empty() {
        let store = NullGovernanceStore::new();
        assert_eq!(store.get_organization().unwrap(), None);
        assert_eq!(store.policy_count().unwrap(), 0);
        assert_eq!(store.next_proposal_id().unwrap(), 0);
    }

    #[test]
    fn proposal_put_records_registry_once() {
        let store = NullGovernanceStore::new();
        let mut batch = GovernanceBatch::new();
        batch
            .put_proposal(0, alice(), b"v1".to_vec())
            .set_next_proposal_id(1);
        store.commit(batch).unwrap();

        let mut batch = GovernanceBatch::new();
        batch.put_proposal(0, alice(), b"v2".to_vec());
        store.commit(batch).unwrap();

        assert_eq!(store.get_proposal(0).unwrap(), Some(b"v2".to_vec()));
        assert_eq!(store.proposer_of(0).unwrap(), Some(alice()));
        assert_eq!(store.proposals_by(&alice()).unwrap(), vec![0]);
    }

    #[test]
    fn failing_batch_leaves_no_trace() {
        let store = NullGovernanceStore::new();
        let mut batch = GovernanceBatch::new();
        batch.set_next_proposal_id(5);
        store.commit(batch).unwrap();

        let mut batch = GovernanceBatch::new();
        batch
            .put_policy("standard", vec![1])
            .set_next_proposal_id(4);
        let err = store.commit(batch).unwrap_err();

        assert!(matches!(
            err,
            StoreError::CounterRegression {
                current: 5,
                proposed: 4
            }
        ));
        assert_eq!(store.get_policy("standard").unwrap(), None);
        assert_eq!(store.next_proposal_id().unwrap(), 5);
    }

    #[test]
    fn proposer_cannot_change() {
        let store = NullGovernanceStore::new();
        let mut batch = GovernanceBatch::new();
        batch.put_proposal(3, alice(), vec![]);
        store.commit(batch).unwrap();

        let mut batch = GovernanceBatch::new();
        batch.put_proposal(3, AccountAddress::new("mallory"), vec![]);
        assert!(matches!(
            store.commit(batch),
            Err(StoreError::Corruption(_))
        ));
    }

    #[test]
    fn deleting_missing_policy_fails() {
        let store = NullGovernanceStore::new();
        let mut batch = GovernanceBatch::new();
        batch.delete_policy("ghost");
        assert!(matches!(store.commit(batch), Err(StoreError::NotFound(_))));
    }
}
