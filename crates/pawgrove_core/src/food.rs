//! Dropped food markers.

use crate::agent::{EntityId, Outcome};
use crate::world::TickCtx;

/// A passive token dropped by a feeder. Ages by one per activation and
/// spoils once it reaches its shelf life; animals may eat it first.
#[derive(Debug, Clone)]
pub struct FoodMarker {
    pub age: u32,
    pub shelf_life: u32,
}

impl FoodMarker {
    pub fn new(shelf_life: u32) -> Self {
        Self { age: 0, shelf_life }
    }

    pub fn act(&mut self, id: EntityId, ctx: &mut TickCtx<'_>) -> Outcome {
        self.age += 1;
        if self.age >= self.shelf_life {
            ctx.grid.remove(id);
            return Outcome::Removed;
        }
        Outcome::Alive
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_starts_fresh() {
        let marker = FoodMarker::new(75);
        assert_eq!(marker.age, 0);
        assert_eq!(marker.shelf_life, 75);
    }
}
