use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::DungeonKind;
use crate::constants::rules::FLOORS_PER_SET;

/// Which chest colour a floor set uses as the mimic disguise
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MimicChests {
    #[default]
    None,
    Silver,
    Gold,
}

/// Static configuration of one floor set (one content id)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FloorSetInfo {
    pub content_id: u16,
    pub dungeon: DungeonKind,
    pub start_floor: u32,
    /// Seconds between monster respawns
    pub respawn_secs: u32,
    pub mimic_chests: MimicChests,
}

impl FloorSetInfo {
    /// Floors covered by this set, start inclusive
    pub fn floors(&self) -> std::ops::Range<u32> {
        self.start_floor..self.start_floor + FLOORS_PER_SET
    }
}

/// First content id of each dungeon's floor sets; ids are consecutive per set.
const PALACE_OF_THE_DEAD_FIRST_ID: u16 = 60001;
const PALACE_OF_THE_DEAD_SETS: u16 = 20;
const HEAVEN_ON_HIGH_FIRST_ID: u16 = 60021;
const HEAVEN_ON_HIGH_SETS: u16 = 10;
const EUREKA_ORTHOS_FIRST_ID: u16 = 60031;
const EUREKA_ORTHOS_SETS: u16 = 10;

const DEFAULT_RESPAWN_SECS: u32 = 60;

/// Lookup from duty content id to floor set configuration
#[derive(Debug, Clone, Default)]
pub struct ContentCatalog {
    sets: HashMap<u16, FloorSetInfo>,
}

impl ContentCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Catalog of every floor set of the three supported dungeons
    pub fn builtin() -> Self {
        let mut catalog = Self::new();

        for set in 0..PALACE_OF_THE_DEAD_SETS {
            catalog.insert(FloorSetInfo {
                content_id: PALACE_OF_THE_DEAD_FIRST_ID + set,
                dungeon: DungeonKind::PalaceOfTheDead,
                start_floor: 1 + u32::from(set) * FLOORS_PER_SET,
                respawn_secs: DEFAULT_RESPAWN_SECS,
                mimic_chests: MimicChests::None,
            });
        }

        // Later dungeons hide mimics in silver chests on the first three sets
        // and in gold chests afterwards.
        for (dungeon, first_id, sets) in [
            (
                DungeonKind::HeavenOnHigh,
                HEAVEN_ON_HIGH_FIRST_ID,
                HEAVEN_ON_HIGH_SETS,
            ),
            (
                DungeonKind::EurekaOrthos,
                EUREKA_ORTHOS_FIRST_ID,
                EUREKA_ORTHOS_SETS,
            ),
        ] {
            for set in 0..sets {
                catalog.insert(FloorSetInfo {
                    content_id: first_id + set,
                    dungeon,
                    start_floor: 1 + u32::from(set) * FLOORS_PER_SET,
                    respawn_secs: DEFAULT_RESPAWN_SECS,
                    mimic_chests: if set < 3 {
                        MimicChests::Silver
                    } else {
                        MimicChests::Gold
                    },
                });
            }
        }

        catalog
    }

    pub fn insert(&mut self, info: FloorSetInfo) {
        self.sets.insert(info.content_id, info);
    }

    pub fn get(&self, content_id: u16) -> Option<&FloorSetInfo> {
        self.sets.get(&content_id)
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}
