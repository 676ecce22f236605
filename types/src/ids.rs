use std::fmt;

/// Stable identity of a cell within a session.
///
/// Ids are allocated monotonically by the reducer and never reused, so a
/// completion for a deleted cell can never be confused with whichever cell
/// later occupies the same index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct CellId(u64);

impl CellId {
    #[must_use]
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    #[must_use]
    pub fn value(self) -> u64 {
        self.0
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
