pub mod macros;

use pawgrove_lib::model::agent::AgentState;
use pawgrove_lib::model::config::SimConfig;
use pawgrove_lib::model::grid::Cell;
use pawgrove_lib::model::species::Species;
use pawgrove_lib::model::world::World;

type WorldMod = Box<dyn FnOnce(&mut World)>;

/// Builds worlds with hand-placed agents. Starts from an empty grid so
/// each test controls exactly what is on it.
#[allow(dead_code)]
pub struct WorldBuilder {
    config: SimConfig,
    mods: Vec<WorldMod>,
}

#[allow(dead_code)]
impl WorldBuilder {
    pub fn new() -> Self {
        let mut config = SimConfig::default();
        config.world.initial_dogs = 0;
        config.world.initial_cats = 0;
        config.world.initial_feeders = 0;
        config.world.seed = Some(42);
        Self {
            config,
            mods: Vec::new(),
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.config.world.seed = Some(seed);
        self
    }

    pub fn with_config<F>(mut self, modifier: F) -> Self
    where
        F: FnOnce(&mut SimConfig),
    {
        modifier(&mut self.config);
        self
    }

    /// Places an animal at a fixed cell and lets the test adjust its
    /// vitals before the first tick.
    pub fn with_animal_at<F>(mut self, species: Species, x: u16, y: u16, tweak: F) -> Self
    where
        F: FnOnce(&mut pawgrove_lib::model::animal::Animal) + 'static,
    {
        self.mods.push(Box::new(move |world| {
            let id = world.spawn_animal(species);
            world.grid.place(id, Cell { x, y });
            if let Some(animal) = world
                .scheduler
                .get_mut(id)
                .and_then(AgentState::as_animal_mut)
            {
                tweak(animal);
            }
        }));
        self
    }

    pub fn with_feeder_at(mut self, x: u16, y: u16) -> Self {
        self.mods.push(Box::new(move |world| {
            let id = world.spawn_feeder();
            world.grid.place(id, Cell { x, y });
        }));
        self
    }

    pub fn with_food_at(mut self, x: u16, y: u16) -> Self {
        self.mods.push(Box::new(move |world| {
            world.spawn_food_at(Cell { x, y });
        }));
        self
    }

    pub fn with_harvester_at(mut self, target: Species, x: u16, y: u16) -> Self {
        self.mods.push(Box::new(move |world| {
            let id = world.spawn_harvester(target);
            world.grid.place(id, Cell { x, y });
        }));
        self
    }

    pub fn build(self) -> World {
        let mut world = World::new(self.config).expect("Failed to create world in test builder");
        for modifier in self.mods {
            modifier(&mut world);
        }
        world.recount();
        world
    }
}
