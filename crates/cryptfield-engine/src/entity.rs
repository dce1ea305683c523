//! The two entity kinds sharing the world's id space.
//!
//! Kind-specific data lives only on its variant: a path field and a
//! popularity exist only on an [`Attractor`], a destination only on an
//! [`Agent`]. An agent refers to its attractor by id and never owns a
//! copy of it.

use cryptfield_core::{EntityId, Vector};
use cryptfield_propagators::PathField;

/// A fixed point of interest agents walk toward.
#[derive(Clone, Debug, PartialEq)]
pub struct Attractor {
    /// Entity id.
    pub id: EntityId,
    /// Centre in fine-grid coordinates.
    pub position: Vector,
    /// Footprint radius in fine cells.
    pub radius: f64,
    /// Relative weight when spawned agents pick a destination.
    pub popularity: f64,
    /// Most recent cost field, or `None` until first recomputed.
    pub path_field: Option<PathField>,
}

impl Attractor {
    /// A new attractor with no path field yet.
    pub fn new(id: EntityId, position: Vector, radius: f64, popularity: f64) -> Self {
        Self {
            id,
            position,
            radius,
            popularity,
            path_field: None,
        }
    }
}

/// A mobile entity heading to one attractor.
#[derive(Clone, Debug, PartialEq)]
pub struct Agent {
    /// Entity id.
    pub id: EntityId,
    /// Current position in fine-grid coordinates.
    pub position: Vector,
    /// Harvest radius in fine cells.
    pub radius: f64,
    /// Id of the attractor this agent follows.
    pub destination: EntityId,
}

/// Discriminant of an [`Entity`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// An [`Attractor`].
    Attractor,
    /// An [`Agent`].
    Agent,
}

impl EntityKind {
    pub(crate) fn tag(self) -> u8 {
        match self {
            Self::Attractor => 0,
            Self::Agent => 1,
        }
    }
}

/// Any entity stored in the world.
#[derive(Clone, Debug, PartialEq)]
pub enum Entity {
    /// A fixed attractor.
    Attractor(Attractor),
    /// A moving agent.
    Agent(Agent),
}

impl Entity {
    /// Entity id.
    pub fn id(&self) -> EntityId {
        match self {
            Self::Attractor(a) => a.id,
            Self::Agent(a) => a.id,
        }
    }

    /// Fine-grid position.
    pub fn position(&self) -> Vector {
        match self {
            Self::Attractor(a) => a.position,
            Self::Agent(a) => a.position,
        }
    }

    /// Radius in fine cells.
    pub fn radius(&self) -> f64 {
        match self {
            Self::Attractor(a) => a.radius,
            Self::Agent(a) => a.radius,
        }
    }

    /// Which variant this is.
    pub fn kind(&self) -> EntityKind {
        match self {
            Self::Attractor(_) => EntityKind::Attractor,
            Self::Agent(_) => EntityKind::Agent,
        }
    }

    /// The attractor, if this is one.
    pub fn as_attractor(&self) -> Option<&Attractor> {
        match self {
            Self::Attractor(a) => Some(a),
            Self::Agent(_) => None,
        }
    }

    /// The agent, if this is one.
    pub fn as_agent(&self) -> Option<&Agent> {
        match self {
            Self::Agent(a) => Some(a),
            Self::Attractor(_) => None,
        }
    }

    pub(crate) fn as_attractor_mut(&mut self) -> Option<&mut Attractor> {
        match self {
            Self::Attractor(a) => Some(a),
            Self::Agent(_) => None,
        }
    }

    pub(crate) fn as_agent_mut(&mut self) -> Option<&mut Agent> {
        match self {
            Self::Agent(a) => Some(a),
            Self::Attractor(_) => None,
        }
    }
}

impl From<Attractor> for Entity {
    fn from(a: Attractor) -> Self {
        Self::Attractor(a)
    }
}

impl From<Agent> for Entity {
    fn from(a: Agent) -> Self {
        Self::Agent(a)
    }
}
