//! Typed per-tick event ledger.
//!
//! Births, deaths, harvests, and controller decisions are recorded as
//! events at the moment they happen rather than inferred from population
//! deltas, so a birth and a death in the same tick never cancel out and a
//! harvested animal is never miscounted as a death.

use serde::{Deserialize, Serialize};

use crate::agent::EntityId;
use crate::species::Species;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeathCause {
    /// Hunger reached the species cap.
    Starvation,
    /// Age reached the individual's rolled maximum.
    OldAge,
    /// Health dropped to zero.
    Frailty,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event")]
pub enum SimEvent {
    Birth {
        tick: u64,
        id: EntityId,
        species: Species,
        parent_a: EntityId,
        parent_b: EntityId,
    },
    Death {
        tick: u64,
        id: EntityId,
        species: Species,
        age: u32,
        cause: DeathCause,
    },
    Harvest {
        tick: u64,
        id: EntityId,
        species: Species,
        harvester: EntityId,
        price: u32,
    },
    HarvesterSpawned {
        tick: u64,
        id: EntityId,
        target: Species,
        population: usize,
    },
    HarvesterDeparted {
        tick: u64,
        id: EntityId,
        collected: u32,
        earned: u32,
    },
    Extinction {
        tick: u64,
    },
}

/// Everything that happened during one [`crate::world::World::tick`] call.
#[derive(Debug, Clone, Default)]
pub struct TickReport {
    pub tick: u64,
    pub events: Vec<SimEvent>,
}

impl TickReport {
    pub fn births(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, SimEvent::Birth { .. }))
            .count()
    }

    pub fn deaths(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, SimEvent::Death { .. }))
            .count()
    }

    pub fn harvests(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, SimEvent::Harvest { .. }))
            .count()
    }
}
