//! The owned simulation state.
//!
//! A [`World`] is a plain value: cloning it yields an independent
//! snapshot that shares nothing with the live simulation.

use std::collections::BTreeMap;

use cryptfield_core::{EntityId, TickId};
use cryptfield_space::Grid;

use crate::entity::{Agent, Attractor, Entity};

/// FNV-1a offset basis for 64-bit.
const FNV_OFFSET: u64 = 0xcbf29ce484222325;
/// FNV-1a prime for 64-bit.
const FNV_PRIME: u64 = 0x00000100000001B3;

#[inline]
fn fnv1a_byte(hash: u64, byte: u8) -> u64 {
    (hash ^ byte as u64).wrapping_mul(FNV_PRIME)
}

#[inline]
fn fnv1a_u32(mut hash: u64, v: u32) -> u64 {
    for &b in &v.to_le_bytes() {
        hash = fnv1a_byte(hash, b);
    }
    hash
}

#[inline]
fn fnv1a_u64(mut hash: u64, v: u64) -> u64 {
    for &b in &v.to_le_bytes() {
        hash = fnv1a_byte(hash, b);
    }
    hash
}

/// Simulation state: clock, budget, fine resource grid, and entities.
#[derive(Clone, Debug, PartialEq)]
pub struct World {
    /// Ticks processed so far.
    pub time: TickId,
    /// Whether the tick driver is currently holding ticks back.
    pub paused: bool,
    /// Spendable budget for `CLEAR_PATH`.
    pub budget: i64,
    /// Fine resource grid. Negative cells are attractor footprints.
    pub grid: Grid<f32>,
    entities: BTreeMap<EntityId, Entity>,
}

impl World {
    /// An empty world at tick 0, running.
    pub fn new(grid: Grid<f32>, budget: i64) -> Self {
        Self {
            time: TickId::default(),
            paused: false,
            budget,
            grid,
            entities: BTreeMap::new(),
        }
    }

    /// Insert an entity under its own id, returning any entity it
    /// replaced.
    pub fn insert(&mut self, entity: impl Into<Entity>) -> Option<Entity> {
        let entity = entity.into();
        self.entities.insert(entity.id(), entity)
    }

    /// Remove and return the entity with `id`.
    pub fn remove(&mut self, id: EntityId) -> Option<Entity> {
        self.entities.remove(&id)
    }

    /// Entity with `id`.
    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.get(&id)
    }

    pub(crate) fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.get_mut(&id)
    }

    /// All entities in ascending id order.
    pub fn entities(&self) -> impl Iterator<Item = &Entity> + '_ {
        self.entities.values()
    }

    /// All entity ids in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = EntityId> + '_ {
        self.entities.keys().copied()
    }

    /// Number of entities of both kinds.
    pub fn entity_count(&self) -> usize {
        self.entities.len()
    }

    /// Attractors in ascending id order.
    pub fn attractors(&self) -> impl Iterator<Item = &Attractor> + '_ {
        self.entities.values().filter_map(Entity::as_attractor)
    }

    /// Agents in ascending id order.
    pub fn agents(&self) -> impl Iterator<Item = &Agent> + '_ {
        self.entities.values().filter_map(Entity::as_agent)
    }

    /// Attractor with `id`, if `id` names one.
    pub fn attractor(&self, id: EntityId) -> Option<&Attractor> {
        self.entity(id).and_then(Entity::as_attractor)
    }

    /// Agent with `id`, if `id` names one.
    pub fn agent(&self, id: EntityId) -> Option<&Agent> {
        self.entity(id).and_then(Entity::as_agent)
    }

    /// Deterministic FNV-1a digest of the observable state.
    ///
    /// Covers time, budget, the paused flag, every fine cell's bits, and
    /// each entity's id, kind, and position bits in id order. Path
    /// fields are derived data and are left out.
    pub fn state_hash(&self) -> u64 {
        let mut hash = FNV_OFFSET;
        hash = fnv1a_u64(hash, self.time.0);
        hash = fnv1a_u64(hash, self.budget as u64);
        hash = fnv1a_byte(hash, u8::from(self.paused));
        hash = fnv1a_u32(hash, self.grid.width());
        hash = fnv1a_u32(hash, self.grid.height());
        for &v in self.grid.cells() {
            hash = fnv1a_u32(hash, v.to_bits());
        }
        for entity in self.entities.values() {
            hash = fnv1a_u64(hash, entity.id().0);
            hash = fnv1a_byte(hash, entity.kind().tag());
            let p = entity.position();
            hash = fnv1a_u64(hash, p.x.to_bits());
            hash = fnv1a_u64(hash, p.y.to_bits());
        }
        hash
    }
}
