use crate::{FieldErrors, WireErrorPayload};

/// Result of a bulk save as seen by the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved,
    /// The backend refused the list and said why.
    Rejected(WireErrorPayload),
    /// Non-success status without a readable `messages` body.
    Inconclusive { status: u16 },
    /// The request never produced a response.
    TransportFailed,
}

impl SaveOutcome {
    /// Collapses to the "payload or nothing" form: only a rejection carries
    /// messages, every other outcome reads as `None`.
    pub fn into_payload(self) -> Option<WireErrorPayload> {
        match self {
            SaveOutcome::Rejected(payload) => Some(payload),
            SaveOutcome::Saved | SaveOutcome::Inconclusive { .. } | SaveOutcome::TransportFailed => {
                None
            }
        }
    }
}

/// Result of running one record's selectors on the backend.
#[derive(Debug, Clone, PartialEq)]
pub enum TestOutcome {
    /// Sample rows extracted by the backend.
    Sample(Vec<serde_json::Value>),
    /// Messages for the single tested record, unprefixed, possibly with `global`.
    ValidationFailure(FieldErrors),
    GenericFailure,
}
