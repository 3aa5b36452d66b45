//! Production event sink: every governance event becomes a structured log
//! line carrying the event as JSON.

use quorum_types::{EventSink, GovernanceEvent};

#[derive(Clone, Copy, Debug, Default)]
pub struct TracingEventSink;

impl EventSink for TracingEventSink {
    fn emit(&self, event: GovernanceEvent) {
        match serde_json::to_string(&event) {
            Ok(json) => tracing::info!(
                target: "quorum::events",
                proposal = ?event.proposal(),
                event = %json,
                "governance event"
            ),
            Err(e) => tracing::error!(
                target: "quorum::events",
                error = %e,
                ?event,
                "failed to encode governance event"
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quorum_types::ProposalId;

    #[test]
    fn emitting_without_a_subscriber_is_harmless() {
        let proposal: ProposalId = 3;
        TracingEventSink.emit(GovernanceEvent::CharterUpdated { proposal });
    }
}
