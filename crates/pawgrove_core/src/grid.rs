//! Toroidal multi-occupancy grid.
//!
//! The grid is the single authority on positions: an entity has a position
//! if and only if the grid tracks it. Cells hold any number of occupants.
//! Perception queries (neighborhoods) wrap around the edges; pursuit
//! geometry (distance, stepping toward a target) works on raw coordinate
//! deltas and only the final destination is wrapped.

use std::collections::{HashMap, HashSet};

use rand::Rng;

use crate::agent::EntityId;

/// Number of random draws before placement falls back to a full scan.
const OPEN_CELL_DRAWS: usize = 100;

/// A grid coordinate. Always in-bounds for the grid that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Cell {
    pub x: u16,
    pub y: u16,
}

impl Cell {
    pub fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}

/// Chebyshev distance on raw deltas. Deliberately ignores the torus:
/// two entities facing each other across the seam are "far".
#[inline]
pub fn chebyshev(a: Cell, b: Cell) -> u32 {
    let dx = (a.x as i64 - b.x as i64).abs();
    let dy = (a.y as i64 - b.y as i64).abs();
    dx.max(dy) as u32
}

/// One-cell step from `from` toward `to` using raw-delta signum.
/// Returns unwrapped coordinates; callers wrap via [`Grid::wrap`].
#[inline]
pub fn step_toward(from: Cell, to: Cell) -> (i64, i64) {
    let dx = (to.x as i64 - from.x as i64).signum();
    let dy = (to.y as i64 - from.y as i64).signum();
    (from.x as i64 + dx, from.y as i64 + dy)
}

#[derive(Debug, Clone)]
pub struct Grid {
    width: u16,
    height: u16,
    buckets: Vec<Vec<EntityId>>,
    index: HashMap<EntityId, Cell>,
}

impl Grid {
    pub fn new(width: u16, height: u16) -> Self {
        let cells = width as usize * height as usize;
        Self {
            width,
            height,
            buckets: vec![Vec::new(); cells],
            index: HashMap::new(),
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    #[inline]
    fn bucket_index(&self, cell: Cell) -> usize {
        cell.y as usize * self.width as usize + cell.x as usize
    }

    /// Wraps arbitrary signed coordinates onto the torus.
    #[inline]
    pub fn wrap(&self, x: i64, y: i64) -> Cell {
        Cell {
            x: x.rem_euclid(self.width as i64) as u16,
            y: y.rem_euclid(self.height as i64) as u16,
        }
    }

    /// Puts an entity at `cell`, relocating it if it was already placed.
    pub fn place(&mut self, id: EntityId, cell: Cell) {
        if let Some(prev) = self.index.insert(id, cell) {
            let idx = self.bucket_index(prev);
            self.buckets[idx].retain(|&other| other != id);
        }
        let idx = self.bucket_index(cell);
        self.buckets[idx].push(id);
    }

    /// Clears an entity's position. No-op for ids the grid does not track.
    pub fn remove(&mut self, id: EntityId) {
        if let Some(cell) = self.index.remove(&id) {
            let idx = self.bucket_index(cell);
            self.buckets[idx].retain(|&other| other != id);
        }
    }

    /// Moves a tracked entity to `cell`. Ignores ids without a position,
    /// so acting on an entity removed earlier in the tick is harmless.
    pub fn move_to(&mut self, id: EntityId, cell: Cell) {
        if self.index.contains_key(&id) {
            self.place(id, cell);
        }
    }

    pub fn position(&self, id: EntityId) -> Option<Cell> {
        self.index.get(&id).copied()
    }

    pub fn cell_occupants(&self, cell: Cell) -> &[EntityId] {
        let idx = self.bucket_index(cell);
        &self.buckets[idx]
    }

    pub fn occupancy(&self, cell: Cell) -> usize {
        self.cell_occupants(cell).len()
    }

    pub fn is_vacant(&self, cell: Cell) -> bool {
        self.occupancy(cell) == 0
    }

    /// Total number of placed entities.
    pub fn population(&self) -> usize {
        self.index.len()
    }

    /// Moore neighborhood of `center` under torus wrap. Scan order is
    /// row-major over offsets (dy outer, dx inner); cells reached twice by
    /// wrapping appear once, at their first scan position. `radius` may
    /// exceed the grid dimensions.
    pub fn neighborhood(&self, center: Cell, radius: u32, include_center: bool) -> Vec<Cell> {
        let r = radius as i64;
        let mut seen = HashSet::new();
        let mut cells = Vec::new();
        for dy in -r..=r {
            for dx in -r..=r {
                if dx == 0 && dy == 0 && !include_center {
                    continue;
                }
                let cell = self.wrap(center.x as i64 + dx, center.y as i64 + dy);
                if seen.insert(cell) {
                    cells.push(cell);
                }
            }
        }
        cells
    }

    /// Occupants of the Moore neighborhood, in neighborhood scan order and
    /// bucket order within each cell.
    pub fn neighbors(&self, center: Cell, radius: u32, include_center: bool) -> Vec<EntityId> {
        self.neighborhood(center, radius, include_center)
            .into_iter()
            .flat_map(|cell| self.cell_occupants(cell).iter().copied())
            .collect()
    }

    pub fn random_cell<R: Rng>(&self, rng: &mut R) -> Cell {
        let x = rng.gen_range(0..self.width);
        let y = rng.gen_range(0..self.height);
        Cell { x, y }
    }

    /// Places an entity on a random vacant cell, falling back to the least
    /// crowded cell (first in x-major scan order) when the random draws
    /// all land on occupied ground. Never fails.
    pub fn place_on_open_cell<R: Rng>(&mut self, id: EntityId, rng: &mut R) -> Cell {
        for _ in 0..OPEN_CELL_DRAWS {
            let cell = self.random_cell(rng);
            if self.is_vacant(cell) {
                self.place(id, cell);
                return cell;
            }
        }
        let mut best = Cell::new(0, 0);
        let mut best_load = usize::MAX;
        for x in 0..self.width {
            for y in 0..self.height {
                let cell = Cell::new(x, y);
                let load = self.occupancy(cell);
                if load < best_load {
                    best = cell;
                    best_load = load;
                }
            }
        }
        self.place(id, best);
        best
    }
}
