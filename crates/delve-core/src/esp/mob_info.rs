use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};
use tracing::info;

use super::AggroType;
use crate::error::Result;

/// Per-monster data not available from the object table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MobInfo {
    /// Name id of the battle NPC
    pub id: u32,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub aggro_type: AggroType,
    #[serde(default)]
    pub patrol: bool,
    /// Overrides the default aggro radius
    #[serde(default)]
    pub aggro_distance: Option<f32>,
}

/// Mob data keyed by name id
#[derive(Debug, Clone, Default)]
pub struct MobInfoTable {
    entries: HashMap<u32, MobInfo>,
}

pub type SharedMobInfo = Arc<RwLock<MobInfoTable>>;

impl MobInfoTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a JSON array of mob entries. Later duplicates replace earlier ones.
    pub fn from_json(content: &str) -> Result<Self> {
        let mobs: Vec<MobInfo> = serde_json::from_str(content)?;
        let mut table = Self::new();
        for mob in mobs {
            table.insert(mob);
        }
        Ok(table)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let table = Self::from_json(&content)?;
        info!(
            "Loaded {} mob entries from {}",
            table.len(),
            path.as_ref().display()
        );
        Ok(table)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut mobs: Vec<&MobInfo> = self.entries.values().collect();
        mobs.sort_by_key(|mob| mob.id);
        fs::write(path, serde_json::to_string_pretty(&mobs)?)?;
        Ok(())
    }

    pub fn insert(&mut self, mob: MobInfo) {
        self.entries.insert(mob.id, mob);
    }

    pub fn get(&self, name_id: u32) -> Option<&MobInfo> {
        self.entries.get(&name_id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_shared(self) -> SharedMobInfo {
        Arc::new(RwLock::new(self))
    }
}
