//! Level catalog - the level source
//!
//! Levels are described by a JSON document:
//!
//! ```json
//! { "levels": [ { "size": 3, "texture": "meadow", "icon": "meadow_icon" } ] }
//! ```
//!
//! The catalog validates at load time that every level has a playable board
//! size, so the core never sees a degenerate grid. `texture` and `icon` are
//! opaque ids; only presentation interprets them.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::types::MIN_BOARD_SIZE;

/// One level: grid dimension plus presentation ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelData {
    /// Grid dimension N (the board holds N² slots).
    pub size: usize,
    /// Opaque texture id, forwarded to presentation.
    pub texture: String,
    /// Icon id for the level list; purely UI metadata.
    #[serde(default)]
    pub icon: String,
}

/// Wire shape of the level list document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct LevelList {
    levels: Vec<LevelData>,
}

/// Validated, ordered list of levels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelCatalog {
    levels: Vec<LevelData>,
}

impl LevelCatalog {
    /// The catalog shipped with the game, used when no level file is given.
    /// `assets/levels.json` carries the same list for external editing.
    pub fn builtin() -> Self {
        let level = |size: usize, texture: &str, icon: &str| LevelData {
            size,
            texture: texture.to_string(),
            icon: icon.to_string(),
        };
        Self {
            levels: vec![
                level(3, "meadow", "meadow_icon"),
                level(3, "harbor", "harbor_icon"),
                level(4, "aurora", "aurora_icon"),
                level(4, "canyon", "canyon_icon"),
                level(5, "nebula", "nebula_icon"),
                level(6, "orchard", "orchard_icon"),
            ],
        }
    }

    /// Parse and validate a level list document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let list: LevelList = serde_json::from_str(json).context("invalid level list JSON")?;
        Self::from_levels(list.levels)
    }

    /// Validate an already-built level list.
    pub fn from_levels(levels: Vec<LevelData>) -> Result<Self> {
        if levels.is_empty() {
            bail!("level list is empty");
        }
        for (i, level) in levels.iter().enumerate() {
            if level.size < MIN_BOARD_SIZE {
                bail!(
                    "level {}: board size {} is below the minimum of {}",
                    i + 1,
                    level.size,
                    MIN_BOARD_SIZE
                );
            }
        }
        Ok(Self { levels })
    }

    /// Load a level list from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("reading level list {}", path.display()))?;
        Self::from_json_str(&json).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&LevelData> {
        self.levels.get(index)
    }

    pub fn levels(&self) -> &[LevelData] {
        &self.levels
    }
}
