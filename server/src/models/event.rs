use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of the parent event that owns a set of QR codes.
///
/// Events themselves live outside this service; only the id is known here,
/// taken from the route. A blank id never resolves; any other id is kept
/// exactly as given, surrounding whitespace included.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(String);

impl EventId {
    pub fn resolve(raw: Option<&str>) -> Option<Self> {
        let raw = raw?;
        if raw.trim().is_empty() {
            None
        } else {
            Some(Self(raw.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
