//! World state and tick orchestration.
//!
//! A [`World`] owns the grid, the agent roster, the seeded RNG, and the
//! cumulative tallies. Each [`World::tick`] runs one activation pass in
//! a fresh shuffled order, recounts the populations, lets the controller
//! dispatch at most one harvester, and returns the tick's event ledger.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::Serialize;

use crate::agent::{AgentKind, AgentState, EntityId, IdAllocator, Outcome};
use crate::animal::Animal;
use crate::config::SimConfig;
use crate::controller;
use crate::events::{SimEvent, TickReport};
use crate::feeder::Feeder;
use crate::food::FoodMarker;
use crate::grid::{Cell, Grid};
use crate::harvester::Harvester;
use crate::scheduler::Scheduler;
use crate::snapshot::{self, AgentView};
use crate::species::Species;

/// Ticks between population reports on the log.
const PROGRESS_LOG_INTERVAL: u64 = 50;

/// Running totals of the harvesting economy. Updated at the moment of
/// capture, not reconstructed from the ledger afterwards.
#[derive(Debug, Clone, Copy, Default)]
pub struct Economy {
    pub harvested: u64,
    pub earnings: u64,
}

/// Live head counts per agent kind, refreshed by a full roster scan
/// after every activation pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PopulationCounts {
    pub dogs: usize,
    pub cats: usize,
    pub feeders: usize,
    pub food: usize,
    pub harvesters: usize,
}

impl PopulationCounts {
    pub fn animals(&self) -> usize {
        self.dogs + self.cats
    }

    pub fn of(&self, species: Species) -> usize {
        match species {
            Species::Dog => self.dogs,
            Species::Cat => self.cats,
        }
    }
}

/// Lifetime totals since world creation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct WorldStats {
    pub total_births: u64,
    pub total_deaths: u64,
    pub total_harvested: u64,
    pub total_earnings: u64,
}

/// Everything an agent may touch during its activation. The acting
/// agent's own state has been taken out of the roster, so roster
/// lookups never alias it.
pub struct TickCtx<'a> {
    pub grid: &'a mut Grid,
    pub roster: &'a mut Scheduler,
    pub rng: &'a mut ChaCha8Rng,
    pub ids: &'a mut IdAllocator,
    pub config: &'a SimConfig,
    pub events: &'a mut Vec<SimEvent>,
    pub economy: &'a mut Economy,
    pub tick: u64,
}

impl TickCtx<'_> {
    /// First food marker occupying `cell`, if any.
    pub fn food_at(&self, cell: Cell) -> Option<EntityId> {
        self.grid
            .cell_occupants(cell)
            .iter()
            .copied()
            .find(|&id| self.roster.get(id).map_or(false, AgentState::is_food))
    }

    /// Moves `id` to a uniformly drawn adjacent cell. On degenerate
    /// grids the wrapped neighborhood may collapse onto the agent's own
    /// cell, which counts as a step.
    pub fn random_step(&mut self, id: EntityId) {
        let Some(position) = self.grid.position(id) else {
            return;
        };
        let options = self.grid.neighborhood(position, 1, false);
        if options.is_empty() {
            return;
        }
        let destination = options[self.rng.gen_range(0..options.len())];
        self.grid.move_to(id, destination);
    }
}

pub struct World {
    pub config: SimConfig,
    pub grid: Grid,
    pub scheduler: Scheduler,
    pub rng: ChaCha8Rng,
    pub ids: IdAllocator,
    pub economy: Economy,
    pub counts: PopulationCounts,
    pub total_births: u64,
    pub total_deaths: u64,
    pub tick_count: u64,
    pub running: bool,
    pub seed: u64,
}

impl World {
    /// Builds a world from a validated configuration and places the
    /// starting dogs, cats, and feeders on open cells.
    pub fn new(config: SimConfig) -> anyhow::Result<Self> {
        config.validate()?;
        let seed = config.world.seed.unwrap_or_else(rand::random);
        let rng = ChaCha8Rng::seed_from_u64(seed);
        let grid = Grid::new(config.world.width, config.world.height);
        tracing::debug!(seed, fingerprint = %config.fingerprint(), "seeding world");

        let mut world = Self {
            config,
            grid,
            scheduler: Scheduler::new(),
            rng,
            ids: IdAllocator::default(),
            economy: Economy::default(),
            counts: PopulationCounts::default(),
            total_births: 0,
            total_deaths: 0,
            tick_count: 0,
            running: true,
            seed,
        };
        for _ in 0..world.config.world.initial_dogs {
            world.spawn_animal(Species::Dog);
        }
        for _ in 0..world.config.world.initial_cats {
            world.spawn_animal(Species::Cat);
        }
        for _ in 0..world.config.world.initial_feeders {
            world.spawn_feeder();
        }
        world.recount();
        Ok(world)
    }

    /// Advances the simulation by one tick and returns its event ledger.
    ///
    /// Runs even after the ecosystem has collapsed; callers decide when
    /// to stop by checking [`World::is_running`].
    pub fn tick(&mut self) -> TickReport {
        self.tick_count += 1;
        let mut events: Vec<SimEvent> = Vec::new();

        // Activation pass over a snapshot of the roster. Agents removed
        // mid-pass are skipped; agents born mid-pass wait a tick.
        let order = self.scheduler.draw_order(&mut self.rng);
        for id in order {
            let Some(mut state) = self.scheduler.remove(id) else {
                continue;
            };
            let mut ctx = TickCtx {
                grid: &mut self.grid,
                roster: &mut self.scheduler,
                rng: &mut self.rng,
                ids: &mut self.ids,
                config: &self.config,
                events: &mut events,
                economy: &mut self.economy,
                tick: self.tick_count,
            };
            if state.act(id, &mut ctx) == Outcome::Alive {
                self.scheduler.add(id, state);
            }
        }

        self.recount();

        if let Some(target) = controller::intervention(&self.config.control, &self.counts) {
            let population = self.counts.of(target);
            let id = self.spawn_harvester(target);
            events.push(SimEvent::HarvesterSpawned {
                tick: self.tick_count,
                id,
                target,
                population,
            });
            tracing::info!(
                tick = self.tick_count,
                %id,
                target = target.name(),
                population,
                "harvester dispatched"
            );
        }

        let mut report = TickReport {
            tick: self.tick_count,
            events,
        };
        self.total_births += report.births() as u64;
        self.total_deaths += report.deaths() as u64;

        if self.running && self.counts.animals() == 0 {
            self.running = false;
            report.events.push(SimEvent::Extinction {
                tick: self.tick_count,
            });
            tracing::info!(tick = self.tick_count, "both species extinct");
        }

        if self.tick_count % PROGRESS_LOG_INTERVAL == 0 {
            tracing::info!(
                tick = self.tick_count,
                dogs = self.counts.dogs,
                cats = self.counts.cats,
                food = self.counts.food,
                harvesters = self.counts.harvesters,
                births = self.total_births,
                deaths = self.total_deaths,
                harvested = self.economy.harvested,
                earnings = self.economy.earnings,
                "population report"
            );
        }

        report
    }

    /// False once both species have died out.
    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn stats(&self) -> WorldStats {
        WorldStats {
            total_births: self.total_births,
            total_deaths: self.total_deaths,
            total_harvested: self.economy.harvested,
            total_earnings: self.economy.earnings,
        }
    }

    /// Display rows for every placed agent, ordered by id.
    pub fn agent_views(&self) -> Vec<AgentView> {
        snapshot::collect(&self.config, &self.scheduler, &self.grid)
    }

    pub fn spawn_animal(&mut self, species: Species) -> EntityId {
        let animal = Animal::newborn(species, self.config.species(species), &mut self.rng);
        let id = self.ids.allocate();
        self.grid.place_on_open_cell(id, &mut self.rng);
        self.scheduler.add(id, AgentState::Animal(animal));
        id
    }

    pub fn spawn_feeder(&mut self) -> EntityId {
        let id = self.ids.allocate();
        self.grid.place_on_open_cell(id, &mut self.rng);
        self.scheduler.add(id, AgentState::Feeder(Feeder::new()));
        id
    }

    pub fn spawn_food_at(&mut self, cell: Cell) -> EntityId {
        let id = self.ids.allocate();
        self.grid.place(id, cell);
        self.scheduler
            .add(id, AgentState::Food(FoodMarker::new(self.config.food.shelf_life)));
        id
    }

    pub fn spawn_harvester(&mut self, target: Species) -> EntityId {
        let harvester = Harvester::new(target, &self.config.harvester, &mut self.rng);
        let id = self.ids.allocate();
        self.grid.place_on_open_cell(id, &mut self.rng);
        self.scheduler.add(id, AgentState::Harvester(harvester));
        // Counted immediately so a same-tick recount is not needed for
        // the controller's cap.
        self.counts.harvesters += 1;
        id
    }

    /// Recomputes the per-kind head counts by scanning the roster.
    pub fn recount(&mut self) {
        let mut counts = PopulationCounts::default();
        for (_, state) in self.scheduler.iter() {
            match state.kind() {
                AgentKind::Dog => counts.dogs += 1,
                AgentKind::Cat => counts.cats += 1,
                AgentKind::Feeder => counts.feeders += 1,
                AgentKind::Food => counts.food += 1,
                AgentKind::Harvester => counts.harvesters += 1,
            }
        }
        self.counts = counts;
    }
}
