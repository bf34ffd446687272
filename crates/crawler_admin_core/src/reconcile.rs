//! Decomposition of backend validation messages into per-record error maps.
//!
//! Save responses address errors with flat compound keys such as `"0.url"`
//! or `"[1].keywords"`, plus a reserved `"global"` key for the operation as a
//! whole. Keys are parsed once into [`ErrorKey`]; anything that does not
//! parse is dropped without trace.

use std::collections::BTreeMap;

use crate::FieldErrors;

/// Error messages as they come off the wire.
pub type WireErrorPayload = BTreeMap<String, String>;

pub const GLOBAL_KEY: &str = "global";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKey {
    Global,
    Field { index: usize, field: String },
}

impl ErrorKey {
    /// Parses a compound key. Brackets are stripped anywhere in the key, the
    /// rest must be exactly `<index>.<field>` with a non-negative integer
    /// index. The field name is kept verbatim.
    pub fn parse(raw: &str) -> Option<ErrorKey> {
        if raw == GLOBAL_KEY {
            return Some(ErrorKey::Global);
        }
        let stripped: String = raw.chars().filter(|c| !matches!(c, '[' | ']')).collect();
        let mut parts = stripped.split('.');
        let (Some(index), Some(field), None) = (parts.next(), parts.next(), parts.next()) else {
            return None;
        };
        let index = index.parse::<usize>().ok()?;
        Some(ErrorKey::Field {
            index,
            field: field.to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Reconciliation {
    /// Exactly one map per record of the list the payload was matched against.
    pub errors: Vec<FieldErrors>,
    /// The `global` message, never placed in any per-record map.
    pub headline: Option<String>,
}

/// Spreads a save payload over `len` records. Keys pointing past the end are
/// discarded like malformed ones.
pub fn reconcile(payload: &WireErrorPayload, len: usize) -> Reconciliation {
    let mut result = Reconciliation {
        errors: vec![FieldErrors::new(); len],
        headline: None,
    };
    for (raw, message) in payload {
        match ErrorKey::parse(raw) {
            Some(ErrorKey::Global) => result.headline = Some(message.clone()),
            Some(ErrorKey::Field { index, field }) => {
                if let Some(errors) = result.errors.get_mut(index) {
                    errors.insert(field, message.clone());
                }
            }
            None => {}
        }
    }
    result
}

/// Splits the messages of a single-record test response into the record's
/// field errors and the `global` headline. Keys are unprefixed here.
pub fn split_test_messages(messages: &FieldErrors) -> (FieldErrors, Option<String>) {
    let mut fields = messages.clone();
    let headline = fields.remove(GLOBAL_KEY);
    (fields, headline)
}
