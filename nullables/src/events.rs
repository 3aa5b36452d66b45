//! Nullable event sink: record events instead of delivering them.

use quorum_types::{EventSink, GovernanceEvent, ProposalId};
use std::cell::RefCell;

/// An event sink that keeps every emitted event for later assertions.
pub struct NullEventSink {
    emitted: RefCell<Vec<GovernanceEvent>>,
}

impl NullEventSink {
    pub fn new() -> Self {
        Self {
            emitted: RefCell::new(Vec::new()),
        }
    }

    /// Get all emitted events (for assertions).
    pub fn emitted(&self) -> Vec<GovernanceEvent> {
        self.emitted.borrow().clone()
    }

    /// Events concerning a single proposal, in emission order.
    pub fn for_proposal(&self, id: ProposalId) -> Vec<GovernanceEvent> {
        self.emitted
            .borrow()
            .iter()
            .filter(|e| e.proposal() == Some(id))
            .cloned()
            .collect()
    }

    /// The most recently emitted event.
    pub fn last(&self) -> Option<GovernanceEvent> {
        self.emitted.borrow().last().cloned()
    }

    pub fn len(&self) -> usize {
        self.emitted.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.emitted.borrow().is_empty()
    }

    /// Clear all state.
    pub fn reset(&self) {
        self.emitted.borrow_mut().clear();
    }
}

impl Default for NullEventSink {
    fn default() -> Self {
        Self::new()
    }
}

impl EventSink for NullEventSink {
    fn emit(&self, event: GovernanceEvent) {
        self.emitted.borrow_mut().push(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_in_order_and_filters_by_proposal() {
        let sink = NullEventSink::new();
        sink.emit(GovernanceEvent::CharterUpdated { proposal: 1 });
        sink.emit(GovernanceEvent::CharterUpdated { proposal: 2 });
        sink.emit(GovernanceEvent::PolicyRemoved {
            proposal: 1,
            policy: "fast".into(),
        });

        assert_eq!(sink.len(), 3);
        assert_eq!(sink.for_proposal(1).len(), 2);
        assert!(matches!(
            sink.last(),
            Some(GovernanceEvent::PolicyRemoved { proposal: 1, .. })
        ));

        sink.reset();
        assert!(sink.is_empty());
    }
}
