use serde::{Deserialize, Serialize};
use std::fmt;

/// Position of the strategy relative to the spread.
///
/// Exactly one variant holds at any time; the invalid "short both legs"
/// combination cannot be constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SpreadPosition {
    /// No exposure, 100% cash
    #[default]
    Flat,
    /// Short leg A, long leg B (spread expected to narrow)
    ShortSpread,
    /// Long leg A, short leg B (spread expected to widen)
    LongSpread,
}

impl SpreadPosition {
    pub fn is_flat(&self) -> bool {
        *self == SpreadPosition::Flat
    }
}

impl fmt::Display for SpreadPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SpreadPosition::Flat => write!(f, "Flat"),
            SpreadPosition::ShortSpread => write!(f, "ShortSpread"),
            SpreadPosition::LongSpread => write!(f, "LongSpread"),
        }
    }
}
