//! Simulation configuration, validation, and error types.
//!
//! [`SimConfig`] carries every tunable of a run. Its [`Default`] is the
//! reference setup (500x600 grid, seven attractors, a budget of 50).
//! [`validate()`](SimConfig::validate) checks it before a
//! [`Simulation`](crate::Simulation) is built.

use std::error::Error;
use std::fmt;

use cryptfield_core::EntityId;
use cryptfield_propagators::{HarvestMode, SpawnEdge};
use cryptfield_space::{Aggregator, SpaceError};

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected during [`SimConfig::validate()`].
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// Grid dimensions or aggregation cell size are unusable.
    Space(SpaceError),
    /// A scalar parameter is out of its allowed range.
    InvalidParameter {
        /// Config field name.
        name: &'static str,
        /// Description of the violated constraint.
        reason: String,
    },
    /// An inclusive `(min, max)` range is inverted, negative, or not
    /// finite.
    InvalidRange {
        /// Config field name.
        name: &'static str,
        /// Configured lower bound.
        min: f64,
        /// Configured upper bound.
        max: f64,
    },
    /// A tick period is zero.
    ZeroPeriod {
        /// Config field name.
        name: &'static str,
    },
    /// The largest attractor cannot be placed fully inside the grid.
    AttractorTooLarge {
        /// Largest configured attractor radius.
        radius: f64,
        /// Grid width.
        width: u32,
        /// Grid height.
        height: u32,
    },
    /// A supplied world's grid does not match the configured size.
    WorldMismatch {
        /// Configured `(width, height)`.
        expected: (u32, u32),
        /// The world grid's `(width, height)`.
        actual: (u32, u32),
    },
    /// A supplied world holds an attractor whose aggregate cell lies
    /// outside the aggregate grid.
    AttractorOffGrid {
        /// The attractor's id.
        id: EntityId,
        /// Aggregate cell x.
        x: i32,
        /// Aggregate cell y.
        y: i32,
    },
    /// A rule rejected its derived parameters.
    Rule {
        /// The rule's own message.
        reason: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Space(e) => write!(f, "space: {e}"),
            Self::InvalidParameter { name, reason } => write!(f, "{name}: {reason}"),
            Self::InvalidRange { name, min, max } => {
                write!(f, "{name}: range ({min}, {max}) must be finite, non-negative and ordered")
            }
            Self::ZeroPeriod { name } => write!(f, "{name} must be at least 1"),
            Self::AttractorTooLarge {
                radius,
                width,
                height,
            } => write!(f, "attractor radius {radius} does not fit a {width}x{height} grid"),
            Self::WorldMismatch { expected, actual } => write!(
                f,
                "world grid is {}x{} but config expects {}x{}",
                actual.0, actual.1, expected.0, expected.1
            ),
            Self::AttractorOffGrid { id, x, y } => {
                write!(f, "attractor {} sits in aggregate cell ({x}, {y}), off the grid", id.0)
            }
            Self::Rule { reason } => write!(f, "rule: {reason}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Space(e) => Some(e),
            _ => None,
        }
    }
}

impl From<SpaceError> for ConfigError {
    fn from(e: SpaceError) -> Self {
        Self::Space(e)
    }
}

// ── SimConfig ──────────────────────────────────────────────────────

/// Complete configuration for a simulation run.
#[derive(Clone, Debug, PartialEq)]
pub struct SimConfig {
    /// Fine grid width in cells. Default: 500.
    pub width: u32,
    /// Fine grid height in cells. Default: 600.
    pub height: u32,
    /// Resource cap per fine cell. Default: 1000.
    pub max_resource: f32,
    /// Probability that a fine cell starts lit. Default: 0.05.
    pub initial_density: f64,
    /// Upper bound (inclusive) of a lit cell's starting resource. Default: 5.
    pub initial_resource_max: u32,
    /// Diffusion runs on ticks divisible by this. Default: 10.
    pub diffusion_period: u64,
    /// Side of an aggregation block, in fine cells. Default: 10.
    pub agg_cell_size: u32,
    /// Attractors placed at seeding. Default: 7.
    pub attractor_count: u32,
    /// Inclusive attractor radius range. Default: (10, 40).
    pub attractor_radius: (f64, f64),
    /// Inclusive attractor popularity range. Default: (0, 100).
    pub attractor_popularity: (f64, f64),
    /// Aggregate resource divisor in the path cost. Default: 1000.
    pub cost_normalization: f64,
    /// Harvest radius of spawned agents. Default: 5.
    pub agent_radius: f64,
    /// What agents do to the resource under them. Default: halve it.
    pub harvest: HarvestMode,
    /// Exploration scale for movement, if any. Default: `None`.
    pub exploration: Option<f64>,
    /// Edge new agents appear on. Default: bottom.
    pub spawn_edge: SpawnEdge,
    /// Inset of spawn points from the grid edges. Default: 5.
    pub spawn_margin: u32,
    /// The tick driver spawns on ticks divisible by this. Default: 25.
    pub spawn_period: u64,
    /// Budget added per successful spawn. Default: 1.
    pub spawn_reward: i64,
    /// Budget at tick 0. Default: 50.
    pub starting_budget: i64,
    /// RNG seed. Default: 42.
    pub seed: u64,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            width: 500,
            height: 600,
            max_resource: 1000.0,
            initial_density: 0.05,
            initial_resource_max: 5,
            diffusion_period: 10,
            agg_cell_size: 10,
            attractor_count: 7,
            attractor_radius: (10.0, 40.0),
            attractor_popularity: (0.0, 100.0),
            cost_normalization: 1000.0,
            agent_radius: 5.0,
            harvest: HarvestMode::default(),
            exploration: None,
            spawn_edge: SpawnEdge::Bottom,
            spawn_margin: 5,
            spawn_period: 25,
            spawn_reward: 1,
            starting_budget: 50,
            seed: 42,
        }
    }
}

impl SimConfig {
    /// Validate all structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // 1. Grid and aggregation blocks.
        if self.width == 0 || self.height == 0 {
            return Err(SpaceError::EmptySpace.into());
        }
        Aggregator::new(self.agg_cell_size)?.coarse_dims(self.width, self.height)?;

        // 2. Resource.
        if !self.max_resource.is_finite() || self.max_resource <= 0.0 {
            return Err(ConfigError::InvalidParameter {
                name: "max_resource",
                reason: format!("must be finite and > 0, got {}", self.max_resource),
            });
        }
        if !(0.0..=1.0).contains(&self.initial_density) {
            return Err(ConfigError::InvalidParameter {
                name: "initial_density",
                reason: format!("must be in [0, 1], got {}", self.initial_density),
            });
        }

        // 3. Periods.
        if self.diffusion_period == 0 {
            return Err(ConfigError::ZeroPeriod {
                name: "diffusion_period",
            });
        }
        if self.spawn_period == 0 {
            return Err(ConfigError::ZeroPeriod {
                name: "spawn_period",
            });
        }

        // 4. Attractors.
        check_range("attractor_radius", self.attractor_radius)?;
        check_range("attractor_popularity", self.attractor_popularity)?;
        if self.attractor_radius.0 <= 0.0 {
            return Err(ConfigError::InvalidParameter {
                name: "attractor_radius",
                reason: format!("minimum must be > 0, got {}", self.attractor_radius.0),
            });
        }
        let widest = self.attractor_radius.1 * 2.0;
        if widest >= f64::from(self.width) || widest >= f64::from(self.height) {
            return Err(ConfigError::AttractorTooLarge {
                radius: self.attractor_radius.1,
                width: self.width,
                height: self.height,
            });
        }

        // 5. Rules.
        if !self.cost_normalization.is_finite() || self.cost_normalization <= 0.0 {
            return Err(ConfigError::InvalidParameter {
                name: "cost_normalization",
                reason: format!("must be finite and > 0, got {}", self.cost_normalization),
            });
        }
        if !self.agent_radius.is_finite() || self.agent_radius <= 0.0 {
            return Err(ConfigError::InvalidParameter {
                name: "agent_radius",
                reason: format!("must be finite and > 0, got {}", self.agent_radius),
            });
        }
        self.harvest
            .validate()
            .map_err(|reason| ConfigError::InvalidParameter {
                name: "harvest",
                reason,
            })?;
        if let Some(k) = self.exploration {
            if !k.is_finite() || k <= 0.0 {
                return Err(ConfigError::InvalidParameter {
                    name: "exploration",
                    reason: format!("scale must be finite and > 0, got {k}"),
                });
            }
        }

        // 6. Spawning.
        let twice = u64::from(self.spawn_margin) * 2;
        if self.spawn_margin == 0
            || twice >= u64::from(self.width)
            || twice >= u64::from(self.height)
        {
            return Err(ConfigError::InvalidParameter {
                name: "spawn_margin",
                reason: format!(
                    "{} leaves no spawnable span on a {}x{} grid",
                    self.spawn_margin, self.width, self.height
                ),
            });
        }

        Ok(())
    }
}

fn check_range(name: &'static str, (min, max): (f64, f64)) -> Result<(), ConfigError> {
    if !min.is_finite() || !max.is_finite() || min < 0.0 || min > max {
        return Err(ConfigError::InvalidRange { name, min, max });
    }
    Ok(())
}
