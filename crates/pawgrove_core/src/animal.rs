//! Needs-driven animal behavior shared by both species.
//!
//! One `Animal` type covers dogs and cats; everything species-specific
//! comes from the [`SpeciesParams`] record. Each activation runs the same
//! procedure: terminal check first, then a priority ladder picks one
//! action, then the stochastic need drift and the common upkeep close the
//! turn. Perception is toroidal but pursuit math is planar (raw deltas),
//! so prey across the wrap seam reads as far away.

use rand::Rng;

use crate::agent::{AgentState, EntityId, Outcome};
use crate::events::{DeathCause, SimEvent};
use crate::grid::{self, Cell};
use crate::species::{Species, SpeciesParams};
use crate::world::TickCtx;

pub const MAX_HEALTH: u32 = 100;

/// Shared per-activation chance that hunger creeps up by one.
const HUNGER_DRIFT_CHANCE: f32 = 0.1;

/// What the animal is visibly doing, for inspection views.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activity {
    Idle,
    SeekingFood,
    Eating,
    Resting,
    SeekingMate,
    Roaming,
}

/// Output of the decision ladder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ActionChoice {
    SeekFood,
    Rest,
    SeekMate,
    Roam,
}

#[derive(Debug, Clone)]
pub struct Animal {
    pub species: Species,
    pub hunger: u32,
    /// Secondary need: energy for dogs, sleepiness for cats.
    pub need: u32,
    pub age: u32,
    /// Rolled once at birth from the species range.
    pub max_age: u32,
    pub health: u32,
    pub repro_cooldown: u32,
    pub activity: Activity,
}

/// First matching rung wins. The moderate-need rung only exists for
/// species that configure it (cats nap when moderately sleepy).
fn choose(params: &SpeciesParams, hunger: u32, need: u32, cooldown: u32, age: u32) -> ActionChoice {
    if hunger >= params.urgent_hunger {
        ActionChoice::SeekFood
    } else if params.need_is_urgent(need) {
        ActionChoice::Rest
    } else if hunger <= params.mate_hunger_max
        && params.need_is_ready(need)
        && cooldown == 0
        && age >= params.adult_age
    {
        ActionChoice::SeekMate
    } else if hunger >= params.hungry_hunger {
        ActionChoice::SeekFood
    } else if params.need_is_moderate(need) {
        ActionChoice::Rest
    } else {
        ActionChoice::Roam
    }
}

impl Animal {
    pub fn newborn<R: Rng>(species: Species, params: &SpeciesParams, rng: &mut R) -> Self {
        Self {
            species,
            hunger: params.initial_hunger,
            need: params.initial_need,
            age: 0,
            max_age: params.roll_max_age(rng),
            health: MAX_HEALTH,
            repro_cooldown: 0,
            activity: Activity::Idle,
        }
    }

    fn terminal_cause(&self, params: &SpeciesParams) -> Option<DeathCause> {
        if self.hunger >= params.max_hunger {
            Some(DeathCause::Starvation)
        } else if self.age >= self.max_age {
            Some(DeathCause::OldAge)
        } else if self.health == 0 {
            Some(DeathCause::Frailty)
        } else {
            None
        }
    }

    /// Readiness as seen by a prospecting partner: off cooldown, fed
    /// enough, need in its comfort zone, and grown up.
    pub fn mate_ready(&self, params: &SpeciesParams) -> bool {
        self.repro_cooldown == 0
            && self.hunger <= params.partner_hunger_max
            && params.need_is_ready(self.need)
            && self.age >= params.adult_age
    }

    pub fn act(&mut self, id: EntityId, ctx: &mut TickCtx<'_>) -> Outcome {
        if ctx.grid.position(id).is_none() {
            return Outcome::Removed;
        }
        let params = ctx.config.species(self.species);

        // Terminal conditions use the state accumulated by the previous
        // tick's upkeep, before any behavior runs.
        if let Some(cause) = self.terminal_cause(params) {
            ctx.grid.remove(id);
            ctx.events.push(SimEvent::Death {
                tick: ctx.tick,
                id,
                species: self.species,
                age: self.age,
                cause,
            });
            return Outcome::Removed;
        }

        match choose(params, self.hunger, self.need, self.repro_cooldown, self.age) {
            ActionChoice::SeekFood => {
                self.activity = Activity::SeekingFood;
                self.seek_food(id, ctx);
            }
            ActionChoice::Rest => {
                self.activity = Activity::Resting;
                self.rest(params);
            }
            ActionChoice::SeekMate => {
                self.activity = Activity::SeekingMate;
                self.seek_mate(id, ctx);
            }
            ActionChoice::Roam => {
                self.activity = Activity::Roaming;
                ctx.random_step(id);
            }
        }

        if ctx.rng.gen::<f32>() < params.need_drift_chance {
            self.need = params.degrade_need(self.need, 1);
        }
        self.age += 1;
        if self.repro_cooldown > 0 {
            self.repro_cooldown -= 1;
        }
        if ctx.rng.gen::<f32>() < HUNGER_DRIFT_CHANCE {
            self.hunger = (self.hunger + 1).min(params.max_hunger);
        }
        Outcome::Alive
    }

    /// Steps toward the nearest visible marker and eats when standing on
    /// it; wanders when nothing is in sight. Food on the animal's own cell
    /// is invisible (perception excludes the center).
    fn seek_food(&mut self, id: EntityId, ctx: &mut TickCtx<'_>) {
        let params = ctx.config.species(self.species);
        let Some(pos) = ctx.grid.position(id) else {
            return;
        };
        let Some(food_pos) = nearest_food(ctx, pos, params.food_radius) else {
            ctx.random_step(id);
            return;
        };
        let (x, y) = grid::step_toward(pos, food_pos);
        let dest = ctx.grid.wrap(x, y);
        ctx.grid.move_to(id, dest);
        if dest == food_pos {
            if let Some(marker) = ctx.food_at(dest) {
                ctx.grid.remove(marker);
                ctx.roster.remove(marker);
                self.enjoy_meal(params);
            }
        }
    }

    fn enjoy_meal(&mut self, params: &SpeciesParams) {
        self.hunger = self.hunger.saturating_sub(params.meal_relief);
        self.health = (self.health + params.meal_health).min(MAX_HEALTH);
        self.need = params.improve_need(self.need, params.meal_need);
        self.activity = Activity::Eating;
    }

    fn rest(&mut self, params: &SpeciesParams) {
        self.need = params.improve_need(self.need, params.rest_recovery);
        self.health = (self.health + params.rest_health).min(MAX_HEALTH);
    }

    /// Looks for the nearest ready conspecific; reproduces when adjacent,
    /// approaches otherwise. With nobody ready in range the animal falls
    /// back to food-seeking when peckish, or just roams.
    fn seek_mate(&mut self, id: EntityId, ctx: &mut TickCtx<'_>) {
        let params = ctx.config.species(self.species);
        let Some(pos) = ctx.grid.position(id) else {
            return;
        };

        let mut best: Option<(u32, EntityId, Cell)> = None;
        for other_id in ctx.grid.neighbors(pos, params.mate_radius, false) {
            if other_id == id {
                continue;
            }
            let Some(other) = ctx.roster.get(other_id).and_then(AgentState::as_animal) else {
                continue;
            };
            if other.species != self.species || !other.mate_ready(params) {
                continue;
            }
            let Some(other_pos) = ctx.grid.position(other_id) else {
                continue;
            };
            let dist = grid::chebyshev(pos, other_pos);
            if best.map_or(true, |(d, _, _)| dist < d) {
                best = Some((dist, other_id, other_pos));
            }
        }

        match best {
            Some((dist, partner, _)) if dist <= 1 => {
                self.try_reproduce_with(id, partner, ctx);
            }
            Some((_, _, partner_pos)) => {
                let (x, y) = grid::step_toward(pos, partner_pos);
                let dest = ctx.grid.wrap(x, y);
                ctx.grid.move_to(id, dest);
            }
            None => {
                if self.hunger >= params.fallback_hunger {
                    self.seek_food(id, ctx);
                } else {
                    ctx.random_step(id);
                }
            }
        }
    }

    /// One success roll gates the whole thing; a failed attempt costs
    /// nothing. On success the change is applied atomically: both parents
    /// take the cooldown and the birth cost, and exactly one offspring is
    /// placed and registered.
    fn try_reproduce_with(&mut self, id: EntityId, partner_id: EntityId, ctx: &mut TickCtx<'_>) {
        let params = ctx.config.species(self.species);
        if ctx.rng.gen::<f32>() >= params.repro_chance {
            return;
        }

        self.repro_cooldown = params.repro_cooldown;
        self.pay_birth_cost(params);
        if let Some(partner) = ctx.roster.get_mut(partner_id).and_then(AgentState::as_animal_mut) {
            partner.repro_cooldown = params.repro_cooldown;
            partner.pay_birth_cost(params);
        }

        let offspring = Animal::newborn(self.species, params, &mut *ctx.rng);
        let child = ctx.ids.allocate();
        let mut placed = false;
        if let Some(pos) = ctx.grid.position(id) {
            for cell in ctx.grid.neighborhood(pos, 1, true) {
                if ctx.grid.is_vacant(cell) {
                    ctx.grid.place(child, cell);
                    placed = true;
                    break;
                }
            }
        }
        if !placed {
            ctx.grid.place_on_open_cell(child, &mut *ctx.rng);
        }
        ctx.roster.add(child, AgentState::Animal(offspring));
        ctx.events.push(SimEvent::Birth {
            tick: ctx.tick,
            id: child,
            species: self.species,
            parent_a: id,
            parent_b: partner_id,
        });
    }

    fn pay_birth_cost(&mut self, params: &SpeciesParams) {
        self.hunger = (self.hunger + params.birth_hunger_cost).min(params.max_hunger - 1);
        self.need = params.degrade_need(self.need, params.birth_need_cost);
    }

    pub fn activity_label(&self) -> String {
        let label = match (self.activity, self.species) {
            (Activity::Idle, _) => "idle",
            (Activity::SeekingFood, _) => "seeking_food",
            (Activity::Eating, _) => "eating",
            (Activity::SeekingMate, _) => "seeking_mate",
            (Activity::Resting, Species::Dog) => "resting",
            (Activity::Resting, Species::Cat) => "sleeping",
            (Activity::Roaming, Species::Dog) => "playing",
            (Activity::Roaming, Species::Cat) => "wandering",
        };
        label.to_string()
    }
}

/// Nearest food marker in planar distance; scan order breaks ties, so the
/// first minimum in the neighborhood sweep wins.
fn nearest_food(ctx: &TickCtx<'_>, pos: Cell, radius: u32) -> Option<Cell> {
    let mut best: Option<(u32, Cell)> = None;
    for id in ctx.grid.neighbors(pos, radius, false) {
        let Some(state) = ctx.roster.get(id) else {
            continue;
        };
        if !state.is_food() {
            continue;
        }
        let Some(food_pos) = ctx.grid.position(id) else {
            continue;
        };
        let dist = grid::chebyshev(pos, food_pos);
        if best.map_or(true, |(d, _)| dist < d) {
            best = Some((dist, food_pos));
        }
    }
    best.map(|(_, cell)| cell)
}
