//! The patrolling food dropper.

use rand::Rng;

use crate::agent::{AgentState, EntityId, Outcome};
use crate::food::FoodMarker;
use crate::world::TickCtx;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FeederPhase {
    Patrolling,
    /// Resting after a full drop cycle; carries the countdown value shown
    /// at the start of the activation.
    Cooling(u32),
}

/// Wanders one cell per tick and probabilistically drops food, pausing for
/// a fixed cooldown after every full drop cycle.
#[derive(Debug, Clone)]
pub struct Feeder {
    pub cooldown: u32,
    pub drops_this_cycle: u32,
    phase: FeederPhase,
}

impl Feeder {
    pub fn new() -> Self {
        Self {
            cooldown: 0,
            drops_this_cycle: 0,
            phase: FeederPhase::Patrolling,
        }
    }

    pub fn act(&mut self, id: EntityId, ctx: &mut TickCtx<'_>) -> Outcome {
        if ctx.grid.position(id).is_none() {
            return Outcome::Removed;
        }
        if self.cooldown > 0 {
            self.phase = FeederPhase::Cooling(self.cooldown);
            self.cooldown -= 1;
            return Outcome::Alive;
        }

        self.phase = FeederPhase::Patrolling;
        ctx.random_step(id);

        if ctx.rng.gen::<f32>() < ctx.config.feeder.drop_chance {
            self.drop_food(id, ctx);
        }
        Outcome::Alive
    }

    /// Drops a marker at the current cell unless one is already there.
    /// Only actual drops count toward the cycle.
    fn drop_food(&mut self, id: EntityId, ctx: &mut TickCtx<'_>) {
        let Some(here) = ctx.grid.position(id) else {
            return;
        };
        if ctx.food_at(here).is_some() {
            return;
        }
        let marker = ctx.ids.allocate();
        ctx.grid.place(marker, here);
        ctx.roster
            .add(marker, AgentState::Food(FoodMarker::new(ctx.config.food.shelf_life)));

        self.drops_this_cycle += 1;
        if self.drops_this_cycle >= ctx.config.feeder.drops_per_cycle {
            self.drops_this_cycle = 0;
            self.cooldown = ctx.config.feeder.rest_cooldown;
        }
    }

    pub fn activity_label(&self) -> String {
        match self.phase {
            FeederPhase::Patrolling => "patrolling".to_string(),
            FeederPhase::Cooling(left) => format!("cooldown ({left})"),
        }
    }
}

impl Default for Feeder {
    fn default() -> Self {
        Self::new()
    }
}
