//! Population feedback control.
//!
//! After every activation pass the world asks this module whether a
//! species has grown past its configured tolerance. At most one
//! harvester is dispatched per tick, dogs are evaluated before cats,
//! and the active harvester count is capped so interventions stay
//! proportional to the overshoot.

use crate::config::ControlConfig;
use crate::species::Species;
use crate::world::PopulationCounts;

/// Decide whether a harvester should be dispatched this tick.
///
/// Returns the species to target, or `None` when no population meets
/// its threshold or the harvester cap is already reached.
pub fn intervention(config: &ControlConfig, counts: &PopulationCounts) -> Option<Species> {
    if counts.harvesters >= config.max_harvesters {
        return None;
    }
    if counts.dogs >= config.dog_threshold {
        Some(Species::Dog)
    } else if counts.cats >= config.cat_threshold {
        Some(Species::Cat)
    } else {
        None
    }
}
