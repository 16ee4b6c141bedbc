//! Level catalog
//!
//! Static, ordered level layouts. Levels are plain data; the lifecycle code
//! turns them into bodies.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::consts::COLUMN_HEIGHT;

/// How a column stands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Orientation {
    #[default]
    Vertical,
    /// Lying on its side (rotated a quarter turn)
    Horizontal,
}

/// Placement of one column
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColumnSpec {
    pub x: f32,
    pub y: f32,
    #[serde(default)]
    pub orientation: Orientation,
}

impl ColumnSpec {
    pub const fn vertical(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            orientation: Orientation::Vertical,
        }
    }

    pub const fn horizontal(x: f32, y: f32) -> Self {
        Self {
            x,
            y,
            orientation: Orientation::Horizontal,
        }
    }
}

/// Placement of one pig
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PigSpec {
    pub x: f32,
    pub y: f32,
}

impl PigSpec {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// One level layout
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelDefinition {
    pub columns: Vec<ColumnSpec>,
    pub pigs: Vec<PigSpec>,
}

impl LevelDefinition {
    /// Total number of entities this level spawns
    pub fn entity_count(&self) -> usize {
        self.columns.len() + self.pigs.len()
    }
}

/// Ordered collection of levels
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelCatalog {
    levels: Vec<LevelDefinition>,
}

impl LevelCatalog {
    /// Build a catalog from custom levels
    ///
    /// # Panics
    /// If `levels` is empty or any level has no pigs (it would be complete on load).
    pub fn new(levels: Vec<LevelDefinition>) -> Self {
        assert!(!levels.is_empty(), "level catalog must not be empty");
        for (i, level) in levels.iter().enumerate() {
            assert!(!level.pigs.is_empty(), "level {i} has no pigs");
        }
        Self { levels }
    }

    /// The five stock levels
    pub fn builtin() -> Self {
        Self::new(builtin_levels())
    }

    pub fn level_count(&self) -> usize {
        self.levels.len()
    }

    /// Level layout by index
    ///
    /// # Panics
    /// If `index >= level_count()`; callers bound-check before loading.
    pub fn get_level(&self, index: usize) -> &LevelDefinition {
        assert!(
            index < self.levels.len(),
            "level index {index} out of range (have {})",
            self.levels.len()
        );
        &self.levels[index]
    }

    /// Whether `index` names a level in this catalog
    pub fn has_level(&self, index: usize) -> bool {
        index < self.levels.len()
    }
}

impl Default for LevelCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}

fn builtin_catalog() -> &'static LevelCatalog {
    static CATALOG: OnceLock<LevelCatalog> = OnceLock::new();
    CATALOG.get_or_init(LevelCatalog::builtin)
}

/// Number of stock levels
pub fn level_count() -> usize {
    builtin_catalog().level_count()
}

/// Stock level by index (panics when out of range)
pub fn get_level(index: usize) -> &'static LevelDefinition {
    builtin_catalog().get_level(index)
}

/// Three uprights under a pig and two planks over its shoulders
fn columns_around_pig(pig_x: f32, pig_y: f32) -> [ColumnSpec; 5] {
    [
        ColumnSpec::vertical(pig_x - 60.0, pig_y - 40.0),
        ColumnSpec::vertical(pig_x, pig_y - 40.0),
        ColumnSpec::vertical(pig_x + 60.0, pig_y - 40.0),
        ColumnSpec::horizontal(pig_x - 60.0, pig_y + 40.0),
        ColumnSpec::horizontal(pig_x + 60.0, pig_y + 40.0),
    ]
}

/// A vertical tower of `height` columns standing at `x`
fn tower(x: f32, height: usize) -> impl Iterator<Item = ColumnSpec> {
    (0..height).map(move |i| ColumnSpec::vertical(x, 50.0 + COLUMN_HEIGHT * i as f32))
}

fn fortified(pigs: &[(f32, f32)]) -> Vec<ColumnSpec> {
    pigs.iter()
        .flat_map(|&(x, y)| columns_around_pig(x, y))
        .collect()
}

fn pigs(at: &[(f32, f32)]) -> Vec<PigSpec> {
    at.iter().map(|&(x, y)| PigSpec::new(x, y)).collect()
}

fn builtin_levels() -> Vec<LevelDefinition> {
    let level_1 = [(920.0, 100.0), (1200.0, 100.0)];
    let level_2 = [(800.0, 100.0), (1200.0, 100.0)];
    let level_3 = [(700.0, 100.0), (1000.0, 100.0), (1300.0, 100.0)];
    let level_4 = [(600.0, 100.0), (950.0, 100.0), (1300.0, 100.0)];

    vec![
        LevelDefinition {
            columns: vec![
                ColumnSpec::vertical(900.0, 50.0),
                ColumnSpec::vertical(900.0, 130.0),
                ColumnSpec::vertical(1300.0, 50.0),
            ],
            pigs: pigs(&[(1100.0, 100.0)]),
        },
        LevelDefinition {
            columns: fortified(&level_1).into_iter().chain(tower(850.0, 2)).collect(),
            pigs: pigs(&level_1),
        },
        LevelDefinition {
            columns: fortified(&level_2),
            pigs: pigs(&level_2),
        },
        LevelDefinition {
            columns: fortified(&level_3).into_iter().chain(tower(850.0, 6)).collect(),
            pigs: pigs(&level_3),
        },
        LevelDefinition {
            columns: fortified(&level_4)
                .into_iter()
                .chain([
                    ColumnSpec::vertical(775.0, 50.0),
                    ColumnSpec::vertical(1125.0, 50.0),
                    ColumnSpec::vertical(1475.0, 50.0),
                ])
                .collect(),
            pigs: pigs(&level_4),
        },
    ]
}
