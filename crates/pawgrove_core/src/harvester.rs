//! Species-targeted population harvesters.
//!
//! Spawned by the controller when a species overpopulates, a harvester
//! lives for a handful of ticks: it walks toward the nearest animals of
//! its target species, captures up to a few per tick with a high success
//! roll, and departs on its own once its step budget or collection target
//! runs out. The step counter increments before the departure check, so a
//! harvester with a budget of five hunts on at most four activations.

use rand::Rng;

use crate::agent::{AgentState, EntityId, Outcome};
use crate::config::HarvesterConfig;
use crate::events::SimEvent;
use crate::grid;
use crate::species::Species;
use crate::world::TickCtx;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HuntPhase {
    Hunting,
    /// No targets in radius this activation.
    Searching,
    /// Landed this many captures this activation.
    Captured(u32),
    Leaving,
}

#[derive(Debug, Clone)]
pub struct Harvester {
    pub target: Species,
    pub collected: u32,
    pub earned: u32,
    pub steps_taken: u32,
    /// Sale prices, rolled once at spawn from the configured ranges.
    pub price_per_dog: u32,
    pub price_per_cat: u32,
    phase: HuntPhase,
}

impl Harvester {
    pub fn new<R: Rng>(target: Species, config: &HarvesterConfig, rng: &mut R) -> Self {
        let (dog_min, dog_max) = config.price_range(Species::Dog);
        let (cat_min, cat_max) = config.price_range(Species::Cat);
        Self {
            target,
            collected: 0,
            earned: 0,
            steps_taken: 0,
            price_per_dog: rng.gen_range(dog_min..=dog_max),
            price_per_cat: rng.gen_range(cat_min..=cat_max),
            phase: HuntPhase::Hunting,
        }
    }

    pub fn price_for(&self, species: Species) -> u32 {
        match species {
            Species::Dog => self.price_per_dog,
            Species::Cat => self.price_per_cat,
        }
    }

    pub fn act(&mut self, id: EntityId, ctx: &mut TickCtx<'_>) -> Outcome {
        if ctx.grid.position(id).is_none() {
            return Outcome::Removed;
        }
        let cfg = &ctx.config.harvester;

        self.steps_taken += 1;
        if self.steps_taken >= cfg.max_steps || self.collected >= cfg.collection_target {
            self.phase = HuntPhase::Leaving;
            ctx.grid.remove(id);
            ctx.events.push(SimEvent::HarvesterDeparted {
                tick: ctx.tick,
                id,
                collected: self.collected,
                earned: self.earned,
            });
            return Outcome::Removed;
        }

        self.hunt(id, ctx);
        Outcome::Alive
    }

    /// Processes candidates nearest-first, approaching each by one step and
    /// attempting a capture when adjacent. The harvester can move several
    /// cells in one activation, one toward each candidate it works.
    fn hunt(&mut self, id: EntityId, ctx: &mut TickCtx<'_>) {
        let cfg = &ctx.config.harvester;
        let Some(pos) = ctx.grid.position(id) else {
            return;
        };

        let mut candidates: Vec<(u32, EntityId)> = Vec::new();
        for other_id in ctx.grid.neighbors(pos, cfg.hunt_radius, false) {
            let Some(animal) = ctx.roster.get(other_id).and_then(AgentState::as_animal) else {
                continue;
            };
            if animal.species != self.target {
                continue;
            }
            let Some(animal_pos) = ctx.grid.position(other_id) else {
                continue;
            };
            candidates.push((grid::chebyshev(pos, animal_pos), other_id));
        }

        if candidates.is_empty() {
            self.phase = HuntPhase::Searching;
            ctx.random_step(id);
            return;
        }
        // Stable sort: scan order breaks distance ties.
        candidates.sort_by_key(|&(dist, _)| dist);

        let mut captured_now = 0;
        for (_, target_id) in candidates {
            if self.collected >= cfg.collection_target {
                break;
            }
            if captured_now >= cfg.captures_per_tick {
                break;
            }
            let Some(target_pos) = ctx.grid.position(target_id) else {
                continue;
            };
            let Some(my_pos) = ctx.grid.position(id) else {
                return;
            };
            // Distances are planar, so a candidate seen across the wrap
            // seam can measure farther than the hunt radius.
            if grid::chebyshev(my_pos, target_pos) > cfg.hunt_radius {
                continue;
            }
            if grid::chebyshev(my_pos, target_pos) > 1 {
                let (x, y) = grid::step_toward(my_pos, target_pos);
                let dest = ctx.grid.wrap(x, y);
                ctx.grid.move_to(id, dest);
            }
            let Some(my_pos) = ctx.grid.position(id) else {
                return;
            };
            if grid::chebyshev(my_pos, target_pos) <= 1
                && ctx.rng.gen::<f32>() < cfg.capture_chance
            {
                self.capture(id, target_id, ctx);
                captured_now += 1;
            }
        }

        self.phase = if captured_now == 0 {
            HuntPhase::Hunting
        } else {
            HuntPhase::Captured(captured_now)
        };
    }

    fn capture(&mut self, id: EntityId, target_id: EntityId, ctx: &mut TickCtx<'_>) {
        let Some(species) = ctx
            .roster
            .get(target_id)
            .and_then(AgentState::as_animal)
            .map(|a| a.species)
        else {
            return;
        };
        ctx.roster.remove(target_id);
        ctx.grid.remove(target_id);

        let price = self.price_for(species);
        self.collected += 1;
        self.earned += price;
        ctx.economy.harvested += 1;
        ctx.economy.earnings += u64::from(price);
        ctx.events.push(SimEvent::Harvest {
            tick: ctx.tick,
            id: target_id,
            species,
            harvester: id,
            price,
        });
    }

    pub fn activity_label(&self) -> String {
        let prey = self.target.name();
        match self.phase {
            HuntPhase::Hunting => format!("hunting {prey}s"),
            HuntPhase::Searching => format!("searching for {prey}s (no targets found)"),
            HuntPhase::Captured(n) => format!("captured {n} {prey}s this step"),
            HuntPhase::Leaving => {
                format!("leaving (${} earned, {} collected)", self.earned, self.collected)
            }
        }
    }
}
