//! Level catalog
//!
//! A level layout is a grid of brick types: 0 is an empty cell, N > 0 is a
//! brick that takes N hits, and [`INDESTRUCTIBLE_BRICK`] never breaks.
//! The catalog is immutable input; the simulation only reads it.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::INDESTRUCTIBLE_BRICK;

/// Rows of brick types, top row first
pub type Layout = Vec<Vec<u32>>;

#[derive(Error, Debug)]
pub enum LevelError {
    #[error("Failed to read level catalog: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse level catalog: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Level catalog contains no levels")]
    Empty,

    #[error("Level {level} has no rows")]
    EmptyLayout { level: usize },

    #[error("Level {level}, row {row} has no cells")]
    EmptyRow { level: usize, row: usize },

    #[error("Level {level} has no breakable bricks")]
    NoClearableBricks { level: usize },
}

/// Ordered, validated sequence of level layouts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelCatalog {
    levels: Vec<Layout>,
}

impl LevelCatalog {
    /// The three stock levels
    pub fn builtin() -> Self {
        Self {
            levels: vec![
                vec![vec![1; 10]; 3],
                vec![
                    vec![0, 1, 1, 0, 0, 0, 0, 1, 1, 0],
                    vec![1, 2, 1, 1, 1, 1, 1, 1, 2, 1],
                    vec![0, 1, 0, 2, 2, 2, 2, 0, 1, 0],
                    vec![0, 0, 0, 1, 1, 1, 1, 0, 0, 0],
                ],
                vec![
                    vec![99, 99, 1, 1, 1, 1, 1, 1, 99, 99],
                    vec![99, 1, 1, 2, 2, 2, 2, 1, 1, 99],
                    vec![1, 1, 1, 1, 1, 1, 1, 1, 1, 1],
                    vec![1, 2, 1, 2, 1, 2, 1, 2, 1, 2],
                ],
            ],
        }
    }

    /// Validate a set of layouts
    pub fn from_layouts(levels: Vec<Layout>) -> Result<Self, LevelError> {
        if levels.is_empty() {
            return Err(LevelError::Empty);
        }
        for (level, layout) in levels.iter().enumerate() {
            if layout.is_empty() {
                return Err(LevelError::EmptyLayout { level });
            }
            if let Some(row) = layout.iter().position(|r| r.is_empty()) {
                return Err(LevelError::EmptyRow { level, row });
            }
            let clearable = layout
                .iter()
                .flatten()
                .any(|&cell| cell != 0 && cell != INDESTRUCTIBLE_BRICK);
            if !clearable {
                return Err(LevelError::NoClearableBricks { level });
            }
        }
        Ok(Self { levels })
    }

    /// Parse a catalog asset: `{"levels": [[[1, 1, 0], ...], ...]}`
    pub fn from_json(json: &str) -> Result<Self, LevelError> {
        let raw: LevelCatalog = serde_json::from_str(json)?;
        Self::from_layouts(raw.levels)
    }

    /// Read and parse a catalog asset from disk
    pub fn load(path: &Path) -> Result<Self, LevelError> {
        let json = std::fs::read_to_string(path)?;
        let catalog = Self::from_json(&json)?;
        log::info!("Loaded {} levels from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Layout> {
        self.levels.get(index)
    }
}

impl Default for LevelCatalog {
    fn default() -> Self {
        Self::builtin()
    }
}
