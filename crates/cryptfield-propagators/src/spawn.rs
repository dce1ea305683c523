//! Agent spawning: id assignment, spawn point, weighted destination.

use cryptfield_core::{EntityId, SpawnError, Vector};
use rand::distr::weighted::WeightedIndex;
use rand::distr::Distribution;
use rand::Rng;

/// Grid edge new agents appear on.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SpawnEdge {
    /// `y = height - margin`, `x` random.
    #[default]
    Bottom,
    /// `y = margin`, `x` random.
    Top,
    /// `x = margin`, `y` random.
    Left,
    /// `x = width - margin`, `y` random.
    Right,
}

/// Everything needed to insert one new agent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpawnPlan {
    /// Next unused entity id.
    pub id: EntityId,
    /// Fine-space spawn point.
    pub position: Vector,
    /// Harvest radius of the new agent.
    pub radius: f64,
    /// Attractor the agent will walk to.
    pub destination: EntityId,
}

/// Places new agents and assigns them a destination by popularity.
///
/// # Construction
///
/// ```
/// use cryptfield_propagators::{SpawnEdge, SpawnPolicy};
///
/// let policy = SpawnPolicy::builder()
///     .dimensions(500, 600)
///     .edge(SpawnEdge::Bottom)
///     .margin(5)
///     .agent_radius(5.0)
///     .build()
///     .unwrap();
/// assert_eq!(policy.edge(), SpawnEdge::Bottom);
/// ```
#[derive(Clone, Debug)]
pub struct SpawnPolicy {
    width: u32,
    height: u32,
    edge: SpawnEdge,
    margin: u32,
    agent_radius: f64,
}

/// Builder for [`SpawnPolicy`].
///
/// Defaults: 500x600 grid, bottom edge, margin 5, agent radius 5.
pub struct SpawnPolicyBuilder {
    width: u32,
    height: u32,
    edge: SpawnEdge,
    margin: u32,
    agent_radius: f64,
}

impl SpawnPolicy {
    /// Create a new builder.
    pub fn builder() -> SpawnPolicyBuilder {
        SpawnPolicyBuilder {
            width: 500,
            height: 600,
            edge: SpawnEdge::Bottom,
            margin: 5,
            agent_radius: 5.0,
        }
    }

    /// Spawn edge.
    pub fn edge(&self) -> SpawnEdge {
        self.edge
    }

    /// Distance in cells from the spawn edge and from the span's ends.
    pub fn margin(&self) -> u32 {
        self.margin
    }

    /// Radius given to new agents.
    pub fn agent_radius(&self) -> f64 {
        self.agent_radius
    }

    /// One more than the largest existing id, or [`EntityId::FIRST`].
    ///
    /// Gaps left by removed entities are not reused.
    pub fn next_id(existing: impl IntoIterator<Item = EntityId>) -> EntityId {
        existing
            .into_iter()
            .max()
            .map_or(EntityId::FIRST, EntityId::next)
    }

    /// Pick a destination with probability proportional to popularity.
    ///
    /// # Errors
    ///
    /// [`SpawnError::NoDestinations`] for an empty candidate list, and
    /// [`SpawnError::InvalidWeights`] if the weights are negative,
    /// non-finite, or all zero.
    pub fn choose_destination<R: Rng + ?Sized>(
        candidates: &[(EntityId, f64)],
        rng: &mut R,
    ) -> Result<EntityId, SpawnError> {
        if candidates.is_empty() {
            return Err(SpawnError::NoDestinations);
        }
        let index = WeightedIndex::new(candidates.iter().map(|&(_, w)| w)).map_err(|e| {
            SpawnError::InvalidWeights {
                reason: e.to_string(),
            }
        })?;
        Ok(candidates[index.sample(rng)].0)
    }

    /// A random point on the configured edge.
    pub fn spawn_position<R: Rng + ?Sized>(&self, rng: &mut R) -> Vector {
        let m = self.margin;
        let across_x = || (m, self.width - m);
        let across_y = || (m, self.height - m);
        let (x, y) = match self.edge {
            SpawnEdge::Bottom => {
                let (lo, hi) = across_x();
                (rng.random_range(lo..hi), self.height - m)
            }
            SpawnEdge::Top => {
                let (lo, hi) = across_x();
                (rng.random_range(lo..hi), m)
            }
            SpawnEdge::Left => {
                let (lo, hi) = across_y();
                (m, rng.random_range(lo..hi))
            }
            SpawnEdge::Right => {
                let (lo, hi) = across_y();
                (self.width - m, rng.random_range(lo..hi))
            }
        };
        Vector::new(f64::from(x), f64::from(y))
    }

    /// Assemble a spawn from the current ids and attractor weights.
    ///
    /// The destination is drawn before the position; nothing is drawn
    /// if there are no candidates.
    ///
    /// # Errors
    ///
    /// Propagates [`choose_destination`](Self::choose_destination) errors.
    pub fn plan<R: Rng + ?Sized>(
        &self,
        existing: impl IntoIterator<Item = EntityId>,
        candidates: &[(EntityId, f64)],
        rng: &mut R,
    ) -> Result<SpawnPlan, SpawnError> {
        let destination = Self::choose_destination(candidates, rng)?;
        Ok(SpawnPlan {
            id: Self::next_id(existing),
            position: self.spawn_position(rng),
            radius: self.agent_radius,
            destination,
        })
    }
}

impl SpawnPolicyBuilder {
    /// Fine grid dimensions.
    pub fn dimensions(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    /// Spawn edge (default: bottom).
    pub fn edge(mut self, edge: SpawnEdge) -> Self {
        self.edge = edge;
        self
    }

    /// Inset from the edges, in fine cells (default: 5).
    pub fn margin(mut self, margin: u32) -> Self {
        self.margin = margin;
        self
    }

    /// Radius of spawned agents (default: 5).
    pub fn agent_radius(mut self, radius: f64) -> Self {
        self.agent_radius = radius;
        self
    }

    /// Build the policy, validating all configuration.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the margin is zero, leaves no span on either
    /// axis, or the agent radius is not finite and positive.
    pub fn build(self) -> Result<SpawnPolicy, String> {
        if self.margin == 0 {
            return Err("spawn margin must be at least 1".into());
        }
        let twice = u64::from(self.margin) * 2;
        if twice >= u64::from(self.width) || twice >= u64::from(self.height) {
            return Err(format!(
                "spawn margin {} leaves no span on a {}x{} grid",
                self.margin, self.width, self.height
            ));
        }
        if !self.agent_radius.is_finite() || self.agent_radius <= 0.0 {
            return Err(format!(
                "agent_radius must be finite and > 0, got {}",
                self.agent_radius
            ));
        }
        Ok(SpawnPolicy {
            width: self.width,
            height: self.height,
            edge: self.edge,
            margin: self.margin,
            agent_radius: self.agent_radius,
        })
    }
}
