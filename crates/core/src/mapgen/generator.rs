//! High-level map generation orchestration: rooms, corridors, smoothing, staff rooms, repair.

use tracing::trace;

use crate::rng::SimRng;
use crate::tuning::MAP_SIZE;
use crate::types::TileKind;

use super::connectivity::repair_connectivity;
use super::grid::TileGrid;
use super::layout::{carve_corridors, carve_rooms, smooth_walls};
use super::model::GeneratedMap;
use super::staff_rooms::place_staff_rooms;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MapGenerator {
    width: usize,
    height: usize,
}

impl Default for MapGenerator {
    fn default() -> Self {
        Self::new(MAP_SIZE)
    }
}

impl MapGenerator {
    pub fn new(size: usize) -> Self {
        Self::with_dimensions(size, size)
    }

    pub fn with_dimensions(width: usize, height: usize) -> Self {
        Self { width, height }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn generate(&self, rng: &mut SimRng) -> GeneratedMap {
        let mut grid = TileGrid::filled(self.width, self.height, TileKind::Wall);

        let rooms = carve_rooms(&mut grid, rng);
        carve_corridors(&mut grid, rng);
        smooth_walls(&mut grid);
        let staff_rooms = place_staff_rooms(&mut grid, rng);
        let joined = repair_connectivity(&mut grid, &staff_rooms, rng);

        trace!(
            width = self.width,
            height = self.height,
            rooms,
            staff_rooms = staff_rooms.len(),
            joined,
            "generated map"
        );

        GeneratedMap { grid, staff_rooms }
    }
}
