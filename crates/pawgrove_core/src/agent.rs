//! Agent identity and the agent sum type.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::animal::Animal;
use crate::feeder::Feeder;
use crate::food::FoodMarker;
use crate::harvester::Harvester;
use crate::species::Species;
use crate::world::TickCtx;

/// World-allocated entity id. Strictly increasing, never reused, ordered
/// so the roster can iterate deterministically.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct EntityId(pub u64);

impl fmt::Display for EntityId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, Default)]
pub struct IdAllocator {
    next: u64,
}

impl IdAllocator {
    pub fn allocate(&mut self) -> EntityId {
        let id = EntityId(self.next);
        self.next += 1;
        id
    }
}

/// Display/count category of an agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentKind {
    Dog,
    Cat,
    Feeder,
    Food,
    Harvester,
}

/// State of one live agent. The roster owns exactly one of these per id;
/// during its activation the state is taken out, acted on, and reinserted
/// unless the agent removed itself.
#[derive(Debug, Clone)]
pub enum AgentState {
    Animal(Animal),
    Feeder(Feeder),
    Food(FoodMarker),
    Harvester(Harvester),
}

/// Whether an agent survived its own activation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Alive,
    Removed,
}

impl AgentState {
    pub fn kind(&self) -> AgentKind {
        match self {
            AgentState::Animal(a) => match a.species {
                Species::Dog => AgentKind::Dog,
                Species::Cat => AgentKind::Cat,
            },
            AgentState::Feeder(_) => AgentKind::Feeder,
            AgentState::Food(_) => AgentKind::Food,
            AgentState::Harvester(_) => AgentKind::Harvester,
        }
    }

    pub fn as_animal(&self) -> Option<&Animal> {
        match self {
            AgentState::Animal(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_animal_mut(&mut self) -> Option<&mut Animal> {
        match self {
            AgentState::Animal(a) => Some(a),
            _ => None,
        }
    }

    pub fn is_food(&self) -> bool {
        matches!(self, AgentState::Food(_))
    }

    /// Human-readable activity label for inspection views.
    pub fn activity(&self) -> String {
        match self {
            AgentState::Animal(a) => a.activity_label(),
            AgentState::Feeder(f) => f.activity_label(),
            AgentState::Food(_) => "decaying".to_string(),
            AgentState::Harvester(h) => h.activity_label(),
        }
    }

    /// Runs one activation. The agent has already been taken out of the
    /// roster; everything else it touches goes through `ctx`.
    pub fn act(&mut self, id: EntityId, ctx: &mut TickCtx<'_>) -> Outcome {
        match self {
            AgentState::Animal(a) => a.act(id, ctx),
            AgentState::Feeder(f) => f.act(id, ctx),
            AgentState::Food(f) => f.act(id, ctx),
            AgentState::Harvester(h) => h.act(id, ctx),
        }
    }
}
