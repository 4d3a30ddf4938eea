//! Shared types used across the morpho crates.

use serde::{Deserialize, Serialize};

/// Monotonic event-time tick.
pub type Tick = u64;

/// One slot of an observation vector. `None` means "not observed" and is
/// encoded as `-1` on the wire.
pub type EventValue = Option<i32>;

/// Cardinal facing of the observing agent.
///
/// A fingerprint captured while facing East is comparable to one captured
/// while facing North because the sector grid is read out in an
/// orientation-dependent order (see [`Orientation::scan_order`]): both
/// readouts describe the scene as if the agent faced the canonical
/// direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Orientation {
    North,
    East,
    South,
    West,
}

impl Orientation {
    /// Number of cardinal orientations.
    pub const COUNT: usize = 4;

    /// Wire index of this orientation.
    pub fn index(self) -> i32 {
        match self {
            Orientation::North => 0,
            Orientation::East => 1,
            Orientation::South => 2,
            Orientation::West => 3,
        }
    }

    /// Orientation for a wire index.
    pub fn from_index(index: i32) -> Option<Self> {
        match index {
            0 => Some(Orientation::North),
            1 => Some(Orientation::East),
            2 => Some(Orientation::South),
            3 => Some(Orientation::West),
            _ => None,
        }
    }

    /// Rectified traversal of an `n` x `n` sector grid: yields `(sx, sy)`
    /// pairs in the order that normalizes this facing to the canonical one.
    ///
    /// - North: rows ascending, columns ascending within each row.
    /// - South: rows descending, columns descending.
    /// - East: columns descending (rightmost first), rows ascending.
    /// - West: columns ascending, rows descending.
    ///
    /// The order defines which sector each flattened position refers to, so
    /// it must be stable across versions.
    pub fn scan_order(self, n: usize) -> impl Iterator<Item = (usize, usize)> {
        (0..n * n).map(move |i| {
            let (outer, inner) = (i / n, i % n);
            match self {
                Orientation::North => (inner, outer),
                Orientation::South => (n - 1 - inner, n - 1 - outer),
                Orientation::East => (n - 1 - outer, inner),
                Orientation::West => (outer, n - 1 - inner),
            }
        })
    }
}

impl Default for Orientation {
    fn default() -> Self {
        Orientation::North
    }
}
