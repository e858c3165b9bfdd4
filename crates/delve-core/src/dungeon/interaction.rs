use std::collections::HashSet;

use crate::config::Config;
use crate::constants::rules::SILVER_CHEST_MIN_HP_RATIO;
use crate::content::MimicChests;
use crate::esp::{EspObject, EspType};
use crate::host::GameEntity;

/// Objects already interacted with on the current floor
#[derive(Debug, Clone, Default)]
pub struct InteractionMemory {
    object_ids: HashSet<u32>,
}

impl InteractionMemory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, object_id: u32) -> bool {
        self.object_ids.contains(&object_id)
    }

    /// Returns false if the object was already recorded
    pub fn record(&mut self, object_id: u32) -> bool {
        self.object_ids.insert(object_id)
    }

    pub fn clear(&mut self) {
        self.object_ids.clear();
    }

    pub fn len(&self) -> usize {
        self.object_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.object_ids.is_empty()
    }
}

/// Whether a chest may be opened under the floor set's mimic policy.
///
/// A chest is unsafe only when the policy names its colour; unsafe chests
/// are allowed only when the user opted in.
pub fn is_chest_open_safe(policy: MimicChests, kind: EspType, open_unsafe: bool) -> bool {
    let unsafe_chest = matches!(
        (policy, kind),
        (MimicChests::Silver, EspType::SilverChest) | (MimicChests::Gold, EspType::GoldChest)
    );
    !unsafe_chest || open_unsafe
}

/// Whether the chest category is enabled for automatic opening
pub(crate) fn auto_open_enabled(kind: EspType, config: &Config) -> bool {
    match kind {
        EspType::BronzeChest => config.open_bronze_coffers,
        EspType::SilverChest => config.open_silver_coffers,
        EspType::GoldChest => config.open_gold_coffers,
        EspType::AccursedHoardCoffer => config.open_hoards,
        _ => false,
    }
}

/// Silver chests can explode; only open them with enough HP to survive
pub(crate) fn has_health_for(kind: EspType, player: &GameEntity) -> bool {
    if kind != EspType::SilverChest {
        return true;
    }
    player.current_hp as f32 > player.max_hp as f32 * SILVER_CHEST_MIN_HP_RATIO
}

/// Whether the object is in reach of the player
pub(crate) fn in_interaction_range(obj: &EspObject) -> bool {
    obj.distance <= obj.interaction_distance()
}
