//! Species definitions and per-species tuning.
//!
//! Both animal species share one behavior procedure; everything that
//! differs between them lives in a [`SpeciesParams`] record. The secondary
//! need is polarity-abstracted: dogs track energy (a reserve that drains
//! toward zero), cats track sleepiness (a pressure that builds toward a
//! cap). All threshold comparisons go through the polarity helpers so the
//! behavior code never branches on the species directly.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Upper bound for the secondary need of either polarity.
pub const NEED_CAP: u32 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Species {
    Dog,
    Cat,
}

impl Species {
    pub fn name(self) -> &'static str {
        match self {
            Species::Dog => "dog",
            Species::Cat => "cat",
        }
    }
}

/// Direction in which the secondary need gets worse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NeedPolarity {
    /// A resource that drains: low is urgent, high is comfortable (energy).
    Reserve,
    /// A burden that accumulates: high is urgent, low is comfortable
    /// (sleepiness).
    Pressure,
}

impl NeedPolarity {
    pub fn need_name(self) -> &'static str {
        match self {
            NeedPolarity::Reserve => "energy",
            NeedPolarity::Pressure => "sleepiness",
        }
    }
}

/// Tuning record for one species. Defaults come from the two stock
/// species; any field can be overridden through the config file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpeciesParams {
    pub max_age_min: u32,
    pub max_age_max: u32,
    pub max_hunger: u32,
    pub initial_hunger: u32,
    pub initial_need: u32,
    pub need_polarity: NeedPolarity,
    /// Urgent bound for the need: Reserve at or below, Pressure at or above.
    pub need_urgent_at: u32,
    /// Comfort bound for mating: Reserve at or above, Pressure at or below.
    pub need_ready_at: u32,
    /// Extra rest rung between "hungry" and the roam fallback (cats nap
    /// when moderately sleepy; dogs have no equivalent).
    pub moderate_need_at: Option<u32>,
    pub urgent_hunger: u32,
    pub hungry_hunger: u32,
    pub adult_age: u32,
    /// Hunger bound for deciding to go looking for a mate.
    pub mate_hunger_max: u32,
    /// Hunger bound a prospective partner must satisfy (dogs accept
    /// slightly hungrier partners than they would tolerate in themselves).
    pub partner_hunger_max: u32,
    pub fallback_hunger: u32,
    pub repro_chance: f32,
    pub repro_cooldown: u32,
    /// Per-activation chance that the need degrades by one.
    pub need_drift_chance: f32,
    pub meal_relief: u32,
    pub meal_health: u32,
    /// Need restored by a meal (energy for dogs; zero for cats).
    pub meal_need: u32,
    pub rest_recovery: u32,
    pub rest_health: u32,
    /// Birth cost paid by each parent.
    pub birth_hunger_cost: u32,
    pub birth_need_cost: u32,
    pub food_radius: u32,
    pub mate_radius: u32,
}

impl SpeciesParams {
    pub fn dog() -> Self {
        Self {
            max_age_min: 200,
            max_age_max: 250,
            max_hunger: 30,
            initial_hunger: 3,
            initial_need: 8,
            need_polarity: NeedPolarity::Reserve,
            need_urgent_at: 1,
            need_ready_at: 3,
            moderate_need_at: None,
            urgent_hunger: 22,
            hungry_hunger: 12,
            adult_age: 25,
            mate_hunger_max: 18,
            partner_hunger_max: 20,
            fallback_hunger: 8,
            repro_chance: 0.4,
            repro_cooldown: 8,
            need_drift_chance: 0.5,
            meal_relief: 15,
            meal_health: 8,
            meal_need: 3,
            rest_recovery: 4,
            rest_health: 2,
            birth_hunger_cost: 2,
            birth_need_cost: 2,
            food_radius: 10,
            mate_radius: 12,
        }
    }

    pub fn cat() -> Self {
        Self {
            max_age_min: 190,
            max_age_max: 230,
            max_hunger: 32,
            initial_hunger: 2,
            initial_need: 4,
            need_polarity: NeedPolarity::Pressure,
            need_urgent_at: 9,
            need_ready_at: 5,
            moderate_need_at: Some(7),
            urgent_hunger: 24,
            hungry_hunger: 14,
            adult_age: 40,
            mate_hunger_max: 15,
            partner_hunger_max: 15,
            fallback_hunger: 10,
            repro_chance: 0.25,
            repro_cooldown: 20,
            need_drift_chance: 0.4,
            meal_relief: 18,
            meal_health: 5,
            meal_need: 0,
            rest_recovery: 5,
            rest_health: 3,
            birth_hunger_cost: 5,
            birth_need_cost: 3,
            food_radius: 10,
            mate_radius: 12,
        }
    }

    pub fn roll_max_age<R: Rng>(&self, rng: &mut R) -> u32 {
        rng.gen_range(self.max_age_min..=self.max_age_max)
    }

    pub fn need_is_urgent(&self, need: u32) -> bool {
        match self.need_polarity {
            NeedPolarity::Reserve => need <= self.need_urgent_at,
            NeedPolarity::Pressure => need >= self.need_urgent_at,
        }
    }

    pub fn need_is_ready(&self, need: u32) -> bool {
        match self.need_polarity {
            NeedPolarity::Reserve => need >= self.need_ready_at,
            NeedPolarity::Pressure => need <= self.need_ready_at,
        }
    }

    pub fn need_is_moderate(&self, need: u32) -> bool {
        match (self.moderate_need_at, self.need_polarity) {
            (Some(at), NeedPolarity::Pressure) => need >= at,
            (Some(at), NeedPolarity::Reserve) => need <= at,
            (None, _) => false,
        }
    }

    /// Moves the need toward comfort, clamped to its bounds.
    pub fn improve_need(&self, need: u32, amount: u32) -> u32 {
        match self.need_polarity {
            NeedPolarity::Reserve => (need + amount).min(NEED_CAP),
            NeedPolarity::Pressure => need.saturating_sub(amount),
        }
    }

    /// Moves the need toward urgency, clamped to its bounds.
    pub fn degrade_need(&self, need: u32, amount: u32) -> u32 {
        match self.need_polarity {
            NeedPolarity::Reserve => need.saturating_sub(amount),
            NeedPolarity::Pressure => (need + amount).min(NEED_CAP),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_reserve_polarity_thresholds() {
        let dog = SpeciesParams::dog();
        assert!(dog.need_is_urgent(0));
        assert!(dog.need_is_urgent(1));
        assert!(!dog.need_is_urgent(2));
        assert!(dog.need_is_ready(3));
        assert!(!dog.need_is_ready(2));
        assert!(!dog.need_is_moderate(5), "dogs have no moderate rung");
    }

    #[test]
    fn test_pressure_polarity_thresholds() {
        let cat = SpeciesParams::cat();
        assert!(cat.need_is_urgent(9));
        assert!(!cat.need_is_urgent(8));
        assert!(cat.need_is_ready(5));
        assert!(!cat.need_is_ready(6));
        assert!(cat.need_is_moderate(7));
        assert!(!cat.need_is_moderate(6));
    }

    #[test]
    fn test_need_adjustments_clamp() {
        let dog = SpeciesParams::dog();
        assert_eq!(dog.improve_need(9, 4), NEED_CAP);
        assert_eq!(dog.degrade_need(1, 2), 0);

        let cat = SpeciesParams::cat();
        assert_eq!(cat.improve_need(3, 5), 0);
        assert_eq!(cat.degrade_need(9, 3), NEED_CAP);
    }

    #[test]
    fn test_max_age_roll_stays_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let cat = SpeciesParams::cat();
        for _ in 0..100 {
            let age = cat.roll_max_age(&mut rng);
            assert!((cat.max_age_min..=cat.max_age_max).contains(&age));
        }
    }
}
