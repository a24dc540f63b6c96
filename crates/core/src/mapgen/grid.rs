//! Tile grid storage and tile-space primitives shared by generation and queries.

use crate::types::{TileKind, TilePos};

/// Rectangular tile array. Immutable once a session starts.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TileGrid {
    width: usize,
    height: usize,
    tiles: Vec<TileKind>,
}

impl TileGrid {
    pub fn filled(width: usize, height: usize, tile: TileKind) -> Self {
        Self { width, height, tiles: vec![tile; width * height] }
    }

    /// Builds a grid from text rows: `#` wall, `s` staff room, anything else floor.
    pub fn from_rows(rows: &[&str]) -> Self {
        let height = rows.len();
        let width = rows.iter().map(|row| row.chars().count()).max().unwrap_or(0);
        let mut grid = Self::filled(width, height, TileKind::Wall);
        for (y, row) in rows.iter().enumerate() {
            for (x, glyph) in row.chars().enumerate() {
                let tile = match glyph {
                    '#' => TileKind::Wall,
                    's' => TileKind::StaffRoom,
                    _ => TileKind::Floor,
                };
                grid.set_tile(TilePos { y: y as i32, x: x as i32 }, tile);
            }
        }
        grid
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn tiles(&self) -> &[TileKind] {
        &self.tiles
    }

    pub fn in_bounds(&self, pos: TilePos) -> bool {
        pos.x >= 0 && pos.y >= 0 && (pos.x as usize) < self.width && (pos.y as usize) < self.height
    }

    /// Out-of-grid positions read as walls.
    pub fn tile_at(&self, pos: TilePos) -> TileKind {
        if !self.in_bounds(pos) {
            return TileKind::Wall;
        }
        self.tiles[self.index(pos)]
    }

    pub fn set_tile(&mut self, pos: TilePos, tile: TileKind) {
        if !self.in_bounds(pos) {
            return;
        }
        let idx = self.index(pos);
        self.tiles[idx] = tile;
    }

    pub fn is_walkable_tile(&self, pos: TilePos) -> bool {
        self.tile_at(pos).is_walkable()
    }

    /// Every tile position in row-major order.
    pub fn positions(&self) -> impl Iterator<Item = TilePos> + '_ {
        (0..self.height).flat_map(move |y| {
            (0..self.width).map(move |x| TilePos { y: y as i32, x: x as i32 })
        })
    }

    pub fn count(&self, tile: TileKind) -> usize {
        self.tiles.iter().filter(|&&candidate| candidate == tile).count()
    }

    pub fn walkable_count(&self) -> usize {
        self.tiles.iter().filter(|tile| tile.is_walkable()).count()
    }

    pub fn to_ascii(&self) -> String {
        let mut text = String::with_capacity((self.width + 1) * self.height);
        for y in 0..self.height {
            for x in 0..self.width {
                let glyph = match self.tile_at(TilePos { y: y as i32, x: x as i32 }) {
                    TileKind::Wall => '#',
                    TileKind::Floor => '.',
                    TileKind::StaffRoom => 's',
                };
                text.push(glyph);
            }
            text.push('\n');
        }
        text
    }

    pub(crate) fn index(&self, pos: TilePos) -> usize {
        (pos.y as usize) * self.width + (pos.x as usize)
    }

    pub(crate) fn tile_from_index(&self, index: usize) -> TilePos {
        TilePos { y: (index / self.width) as i32, x: (index % self.width) as i32 }
    }
}

pub(super) const CARDINALS: [(i32, i32); 4] = [(-1, 0), (0, 1), (1, 0), (0, -1)];

pub(super) fn floor_neighbors(grid: &TileGrid, pos: TilePos) -> usize {
    let mut count = 0;
    for dy in -1..=1 {
        for dx in -1..=1 {
            if dx == 0 && dy == 0 {
                continue;
            }
            let neighbor = TilePos { y: pos.y + dy, x: pos.x + dx };
            if grid.in_bounds(neighbor) && grid.tile_at(neighbor) == TileKind::Floor {
                count += 1;
            }
        }
    }
    count
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_bounds_reads_as_wall_and_writes_are_ignored() {
        let mut grid = TileGrid::filled(4, 3, TileKind::Floor);
        assert_eq!(grid.tile_at(TilePos { y: -1, x: 0 }), TileKind::Wall);
        assert_eq!(grid.tile_at(TilePos { y: 0, x: 4 }), TileKind::Wall);
        grid.set_tile(TilePos { y: 3, x: 0 }, TileKind::Wall);
        assert_eq!(grid.count(TileKind::Floor), 12);
    }

    #[test]
    fn rows_round_trip_through_ascii() {
        let rows = ["#####", "#..s#", "#####"];
        let grid = TileGrid::from_rows(&rows);
        assert_eq!(grid.to_ascii(), "#####\n#..s#\n#####\n");
        assert_eq!(grid.walkable_count(), 3);
    }

    #[test]
    fn neighbor_count_only_sees_floor() {
        let grid = TileGrid::from_rows(&["...", ".#s", "..."]);
        assert_eq!(floor_neighbors(&grid, TilePos { y: 1, x: 1 }), 7);
    }
}
