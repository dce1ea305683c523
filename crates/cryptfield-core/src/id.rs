//! Strongly-typed identifiers.

use std::fmt;

/// Identifies an attractor or an agent within a world.
///
/// Ids are positive, unique across both entity kinds, and never reused
/// within a run. New ids are allocated as `max(existing) + 1`, so gaps
/// left by removed entities are tolerated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EntityId(pub u64);

impl EntityId {
    /// The id handed out when no entity exists yet.
    pub const FIRST: EntityId = EntityId(1);

    /// The id immediately following this one.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for EntityId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

/// Monotonically increasing tick counter.
///
/// Incremented once per `STEP_SIMULATION`. Tick 0 is the freshly
/// seeded world before any step has run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TickId(pub u64);

impl TickId {
    /// Whether this tick falls on a multiple of `period`.
    ///
    /// A zero period never matches.
    pub fn is_multiple_of(self, period: u64) -> bool {
        period != 0 && self.0 % period == 0
    }
}

impl fmt::Display for TickId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for TickId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}
