//! Encounter map snapshot: a rectangular tile grid with walkability and cover
//!
//! Tiles are stored row-major, indexed `tiles[y][x]`.

use serde::{Deserialize, Serialize};

use crate::core::types::GridPosition;

/// How much protection a tile offers its occupant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CoverLevel {
    #[default]
    None,
    Half,
    Full,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TileType {
    #[default]
    Floor,
    Wall,
    Cover,
}

/// A single map tile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapTile {
    pub tile_type: TileType,
    pub position: GridPosition,
    pub is_walkable: bool,
    pub cover: CoverLevel,
}

impl MapTile {
    pub fn floor(position: GridPosition) -> Self {
        Self {
            tile_type: TileType::Floor,
            position,
            is_walkable: true,
            cover: CoverLevel::None,
        }
    }

    pub fn wall(position: GridPosition) -> Self {
        Self {
            tile_type: TileType::Wall,
            position,
            is_walkable: false,
            cover: CoverLevel::None,
        }
    }

    pub fn provides_cover(&self) -> bool {
        self.cover != CoverLevel::None
    }

    /// Positional cover value in `0..=1`
    pub fn cover_value(&self) -> f32 {
        match self.cover {
            CoverLevel::Full => 1.0,
            CoverLevel::Half => 0.75,
            CoverLevel::None => 0.0,
        }
    }
}

/// Read-only map snapshot handed to the planner
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MapArea {
    pub name: String,
    pub width: i32,
    pub height: i32,
    pub tiles: Vec<Vec<MapTile>>,
}

impl MapArea {
    /// Open floor with no walls
    pub fn open(name: &str, width: i32, height: i32) -> Self {
        let tiles = (0..height)
            .map(|y| (0..width).map(|x| MapTile::floor(GridPosition::new(x, y))).collect())
            .collect();
        Self {
            name: name.to_string(),
            width,
            height,
            tiles,
        }
    }

    /// Open floor enclosed by a one-tile wall border
    pub fn walled(name: &str, width: i32, height: i32) -> Self {
        let mut map = Self::open(name, width, height);
        for y in 0..height {
            for x in 0..width {
                if x == 0 || y == 0 || x == width - 1 || y == height - 1 {
                    map.tiles[y as usize][x as usize] = MapTile::wall(GridPosition::new(x, y));
                }
            }
        }
        map
    }

    pub fn in_bounds(&self, pos: GridPosition) -> bool {
        pos.x >= 0 && pos.y >= 0 && pos.x < self.width && pos.y < self.height
    }

    pub fn tile(&self, pos: GridPosition) -> Option<&MapTile> {
        if !self.in_bounds(pos) {
            return None;
        }
        self.tiles.get(pos.y as usize)?.get(pos.x as usize)
    }

    pub fn tile_mut(&mut self, pos: GridPosition) -> Option<&mut MapTile> {
        if !self.in_bounds(pos) {
            return None;
        }
        self.tiles.get_mut(pos.y as usize)?.get_mut(pos.x as usize)
    }

    /// Place cover on a tile, keeping it walkable
    pub fn set_cover(&mut self, pos: GridPosition, cover: CoverLevel) {
        if let Some(tile) = self.tile_mut(pos) {
            tile.tile_type = if cover == CoverLevel::None {
                TileType::Floor
            } else {
                TileType::Cover
            };
            tile.cover = cover;
            tile.is_walkable = true;
        }
    }

    pub fn set_wall(&mut self, pos: GridPosition) {
        if let Some(tile) = self.tile_mut(pos) {
            *tile = MapTile::wall(pos);
        }
    }

    /// Cover value of the tile at `pos`; out-of-bounds tiles offer none
    pub fn cover_value(&self, pos: GridPosition) -> f32 {
        self.tile(pos).map(MapTile::cover_value).unwrap_or(0.0)
    }

    pub fn cover_level(&self, pos: GridPosition) -> CoverLevel {
        self.tile(pos).map(|t| t.cover).unwrap_or_default()
    }

    pub fn provides_cover(&self, pos: GridPosition) -> bool {
        self.tile(pos).is_some_and(MapTile::provides_cover)
    }
}
