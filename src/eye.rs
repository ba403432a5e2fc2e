#[cfg(feature = "serde-serialization")]
use serde_derive::{Deserialize, Serialize};

/// One of the two eyes of a stereo display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde-serialization", derive(Deserialize, Serialize))]
pub enum Eye {
    Left,
    Right,
}

impl Eye {
    /// Both eyes in render order.
    pub const BOTH: [Eye; 2] = [Eye::Left, Eye::Right];

    /// Index of this eye into per-eye arrays (left = 0, right = 1).
    pub fn index(self) -> usize {
        match self {
            Eye::Left => 0,
            Eye::Right => 1,
        }
    }
}
