use serde::Serialize;

use crate::agent::{AgentKind, AgentState, EntityId};
use crate::config::SimConfig;
use crate::grid::{Cell, Grid};
use crate::scheduler::Scheduler;

/// One display row per live agent. Fields that do not apply to the
/// agent's kind stay `None`.
#[derive(Serialize, Clone, Debug, PartialEq, Eq)]
pub struct AgentView {
    pub id: EntityId,
    pub kind: AgentKind,
    pub position: Cell,
    pub activity: String,
    pub hunger: Option<u32>,
    pub need: Option<u32>,
    pub need_name: Option<&'static str>,
    pub age: Option<u32>,
    pub health: Option<u32>,
    pub collected: Option<u32>,
    pub earned: Option<u32>,
}

/// Collect a view row for every placed agent, ordered by id.
pub fn collect(config: &SimConfig, roster: &Scheduler, grid: &Grid) -> Vec<AgentView> {
    roster
        .iter()
        .filter_map(|(id, state)| {
            let position = grid.position(id)?;
            Some(view_of(config, id, state, position))
        })
        .collect()
}

fn view_of(config: &SimConfig, id: EntityId, state: &AgentState, position: Cell) -> AgentView {
    let mut view = AgentView {
        id,
        kind: state.kind(),
        position,
        activity: state.activity(),
        hunger: None,
        need: None,
        need_name: None,
        age: None,
        health: None,
        collected: None,
        earned: None,
    };
    match state {
        AgentState::Animal(animal) => {
            let params = config.species(animal.species);
            view.hunger = Some(animal.hunger);
            view.need = Some(animal.need);
            view.need_name = Some(params.need_polarity.need_name());
            view.age = Some(animal.age);
            view.health = Some(animal.health);
        }
        AgentState::Harvester(harvester) => {
            view.collected = Some(harvester.collected);
            view.earned = Some(harvester.earned);
        }
        AgentState::Feeder(_) | AgentState::Food(_) => {}
    }
    view
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::agent::IdAllocator;
    use crate::animal::Animal;
    use crate::species::Species;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_animal_view_carries_vitals() {
        let config = SimConfig::default();
        let mut roster = Scheduler::new();
        let mut grid = Grid::new(10, 10);
        let mut ids = IdAllocator::default();
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        let id = ids.allocate();
        let dog = Animal::newborn(Species::Dog, config.species(Species::Dog), &mut rng);
        grid.place(id, Cell { x: 3, y: 4 });
        roster.add(id, AgentState::Animal(dog));

        let views = collect(&config, &roster, &grid);
        assert_eq!(views.len(), 1);
        let view = &views[0];
        assert_eq!(view.kind, AgentKind::Dog);
        assert_eq!(view.position, Cell { x: 3, y: 4 });
        assert_eq!(view.need_name, Some("energy"));
        assert_eq!(view.hunger, Some(config.dog.initial_hunger));
        assert!(view.collected.is_none(), "animals have no collection tally");
    }

    #[test]
    fn test_unplaced_agents_are_skipped() {
        let config = SimConfig::default();
        let mut roster = Scheduler::new();
        let grid = Grid::new(10, 10);
        let mut ids = IdAllocator::default();
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        let id = ids.allocate();
        let cat = Animal::newborn(Species::Cat, config.species(Species::Cat), &mut rng);
        roster.add(id, AgentState::Animal(cat));

        assert!(collect(&config, &roster, &grid).is_empty());
    }
}
