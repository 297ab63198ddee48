//! ASCII station layouts.
//!
//! A compact text form of the station used by tests and the headless demo.
//! The first line is the top row of the map.
//!
//! | glyph | meaning                         |
//! |-------|---------------------------------|
//! | `#`   | collision tile                  |
//! | `.`   | floor                           |
//! | `P`   | player spawn                    |
//! | `M`   | medbay floor                    |
//! | `c`   | civilian spawn                  |
//! | `i`   | infiltrator spawn               |
//! | `f`   | flee point                      |
//! | `1`-`9` | teleporter pad; each digit marks a linked pair |

use glam::Vec2;
use log::debug;

use auber_core::enums::NpcKind;
use auber_core::types::Rect;

use crate::error::MapError;
use crate::grid::TileGrid;

/// Built-in station used by the demo binary.
pub const DEFAULT_STATION: &str = "\
########################
#MMM..........f......1.#
#MPM...c...............#
#MMM........####.......#
#...........#..#...i...#
#..f........#..#.......#
#.....i.....####...c...#
#1.....................#
#...c.........i.....f..#
########################";

/// One end of a linked teleporter pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TeleporterPad {
    /// Tile the player must stand on to use the pad.
    pub area: Rect,
    /// Bottom-left corner of the linked pad, where the player lands.
    pub destination: Vec2,
}

/// Parsed station: collision layer plus spawn information.
#[derive(Debug, Clone)]
pub struct StationLayout {
    pub grid: TileGrid,
    /// Bottom-left corner of the player spawn tile.
    pub player_spawn: Vec2,
    /// Area that heals the player; respawns land here.
    pub medbay: Rect,
    /// NPC spawns in reading order (top row first, left to right).
    pub npcs: Vec<(NpcKind, Vec2)>,
    /// Flee destinations offered to startled NPCs (tile centres).
    pub flee_points: Vec<Vec2>,
    /// Teleporter pads in reading order.
    pub teleporters: Vec<TeleporterPad>,
}

impl StationLayout {
    /// Parse an ASCII layout.
    pub fn parse(text: &str) -> Result<Self, MapError> {
        let rows: Vec<&str> = text
            .lines()
            .map(str::trim_end)
            .filter(|line| !line.is_empty())
            .collect();
        if rows.is_empty() {
            return Err(MapError::EmptyLayout);
        }

        let width = rows[0].chars().count();
        let height = rows.len();
        let mut grid = TileGrid::new(width as u32, height as u32);
        let tile = grid.tile_size();

        let mut player_spawn = None;
        let mut medbay_tiles: Vec<(u32, u32)> = Vec::new();
        let mut npcs = Vec::new();
        let mut flee_points = Vec::new();
        // Pad origins per digit, in reading order.
        let mut pad_tiles: Vec<(char, Vec2)> = Vec::new();

        for (row, line) in rows.iter().enumerate() {
            let found = line.chars().count();
            if found != width {
                return Err(MapError::RaggedRow {
                    row,
                    expected: width,
                    found,
                });
            }

            // Text row 0 is the top of the map.
            let tile_y = (height - 1 - row) as u32;
            for (col, glyph) in line.chars().enumerate() {
                let tile_x = col as u32;
                let origin = grid.tile_origin(tile_x, tile_y);
                match glyph {
                    '#' => grid.set_occupied(tile_x, tile_y, true),
                    '.' => {}
                    'P' => {
                        if player_spawn.replace(origin).is_some() {
                            return Err(MapError::DuplicateSpawn { row, col });
                        }
                        // The spawn tile is part of the medbay.
                        medbay_tiles.push((tile_x, tile_y));
                    }
                    'M' => medbay_tiles.push((tile_x, tile_y)),
                    'c' => npcs.push((NpcKind::Civilian, origin)),
                    'i' => npcs.push((NpcKind::Infiltrator, origin)),
                    'f' => flee_points.push(origin + tile * 0.5),
                    '1'..='9' => pad_tiles.push((glyph, origin)),
                    other => {
                        return Err(MapError::UnknownGlyph {
                            glyph: other,
                            row,
                            col,
                        })
                    }
                }
            }
        }

        let player_spawn = player_spawn.ok_or(MapError::MissingSpawn)?;
        let medbay = bounding_rect(&grid, &medbay_tiles);
        let teleporters = link_pads(&pad_tiles, tile)?;

        debug!(
            "parsed station {}x{}: {} walls, {} npcs, {} flee points, {} teleporter pads",
            width,
            height,
            grid.occupied_count(),
            npcs.len(),
            flee_points.len(),
            teleporters.len()
        );

        Ok(Self {
            grid,
            player_spawn,
            medbay,
            npcs,
            flee_points,
            teleporters,
        })
    }
}

/// Pair pads that share a digit. Every digit used must appear exactly twice.
fn link_pads(pads: &[(char, Vec2)], tile: Vec2) -> Result<Vec<TeleporterPad>, MapError> {
    pads.iter()
        .map(|&(glyph, origin)| {
            let mut partners = pads
                .iter()
                .filter(|(other, other_origin)| *other == glyph && *other_origin != origin);
            let count = pads.iter().filter(|(other, _)| *other == glyph).count();
            match (partners.next(), count) {
                (Some(&(_, destination)), 2) => Ok(TeleporterPad {
                    area: Rect::new(origin, tile),
                    destination,
                }),
                _ => Err(MapError::UnpairedTeleporter { pad: glyph, count }),
            }
        })
        .collect()
}

/// Smallest rectangle covering all listed tiles.
fn bounding_rect(grid: &TileGrid, tiles: &[(u32, u32)]) -> Rect {
    let tile = grid.tile_size();
    let (mut min_x, mut min_y) = (u32::MAX, u32::MAX);
    let (mut max_x, mut max_y) = (0u32, 0u32);
    for &(x, y) in tiles {
        min_x = min_x.min(x);
        min_y = min_y.min(y);
        max_x = max_x.max(x);
        max_y = max_y.max(y);
    }
    let min = grid.tile_origin(min_x, min_y);
    let size = Vec2::new((max_x - min_x + 1) as f32, (max_y - min_y + 1) as f32) * tile;
    Rect::new(min, size)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::CollisionMap;

    #[test]
    fn test_default_station_parses() {
        let layout = StationLayout::parse(DEFAULT_STATION).unwrap();
        assert_eq!(layout.grid.width(), 24);
        assert_eq!(layout.grid.height(), 10);
        assert_eq!(layout.flee_points.len(), 3);
        let infiltrators = layout
            .npcs
            .iter()
            .filter(|(kind, _)| *kind == NpcKind::Infiltrator)
            .count();
        assert_eq!(infiltrators, 3);
        assert_eq!(layout.npcs.len(), 6);
        assert_eq!(layout.teleporters.len(), 2);
    }

    #[test]
    fn test_teleporter_pads_link_in_pairs() {
        let layout = StationLayout::parse(
            "\
#####
#1P2#
#2.1#
#####",
        )
        .unwrap();
        // Reading order: '1' top, '2' top, '2' bottom, '1' bottom.
        assert_eq!(layout.teleporters.len(), 4);
        let top_one = layout.teleporters[0];
        assert_eq!(top_one.area, Rect::new(Vec2::new(32.0, 64.0), Vec2::splat(32.0)));
        assert_eq!(top_one.destination, Vec2::new(96.0, 32.0));
        assert_eq!(layout.teleporters[3].destination, Vec2::new(32.0, 64.0));
        assert_eq!(layout.teleporters[1].destination, Vec2::new(32.0, 32.0));
    }

    #[test]
    fn test_unpaired_teleporter_is_rejected() {
        assert_eq!(
            StationLayout::parse("#P3#").unwrap_err(),
            MapError::UnpairedTeleporter { pad: '3', count: 1 }
        );
        assert_eq!(
            StationLayout::parse("4P44").unwrap_err(),
            MapError::UnpairedTeleporter { pad: '4', count: 3 }
        );
    }

    #[test]
    fn test_rows_are_flipped_to_y_up() {
        let layout = StationLayout::parse(
            "\
###
#P#
#.#
###",
        )
        .unwrap();
        // "P" is on text row 1 of 4, so tile y = 2.
        assert_eq!(layout.player_spawn, Vec2::new(32.0, 64.0));
        assert!(layout.grid.is_occupied(0, 0));
        assert!(!layout.grid.is_occupied(1, 1));
    }

    #[test]
    fn test_medbay_covers_marked_tiles() {
        let layout = StationLayout::parse(DEFAULT_STATION).unwrap();
        // Medbay block is columns 1..=3, text rows 1..=3 (tile y 6..=8).
        assert_eq!(layout.medbay.min, Vec2::new(32.0, 192.0));
        assert_eq!(layout.medbay.size, Vec2::new(96.0, 96.0));
        assert!(layout.medbay.contains(layout.player_spawn));
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(StationLayout::parse(""), Err(MapError::EmptyLayout)));
        assert!(matches!(
            StationLayout::parse("###\n#.\n###"),
            Err(MapError::RaggedRow { row: 1, .. })
        ));
        assert!(matches!(
            StationLayout::parse("#P#\n#x#"),
            Err(MapError::UnknownGlyph { glyph: 'x', .. })
        ));
        assert!(matches!(
            StationLayout::parse("#.#"),
            Err(MapError::MissingSpawn)
        ));
        assert!(matches!(
            StationLayout::parse("PP"),
            Err(MapError::DuplicateSpawn { row: 0, col: 1 })
        ));
    }
}
