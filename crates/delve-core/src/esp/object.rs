use serde::{Deserialize, Serialize};
use strum::{Display, IntoStaticStr};

use super::MobInfo;
use crate::config::{Color, EspColors};
use crate::constants::range::{CHEST_INTERACTION, DEFAULT_AGGRO};
use crate::content::ids::{mobs, objects};
use crate::geometry::Vec3;
use crate::host::{GameEntity, ObjectKind};

/// Overlay category of a scanned entity
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, IntoStaticStr, Display,
)]
pub enum EspType {
    Player,
    Enemy,
    Mimic,
    FriendlyEnemy,
    BronzeChest,
    SilverChest,
    GoldChest,
    AccursedHoard,
    AccursedHoardCoffer,
    MimicChest,
    Trap,
    Return,
    Passage,
}

impl EspType {
    /// Objects that can be opened by interacting with them
    pub fn is_chest(&self) -> bool {
        matches!(
            self,
            Self::BronzeChest | Self::SilverChest | Self::GoldChest | Self::AccursedHoardCoffer
        )
    }

    pub fn is_mob(&self) -> bool {
        matches!(self, Self::Enemy | Self::Mimic | Self::FriendlyEnemy)
    }

    /// Overlay category for a non-player entity, or `None` when the overlay
    /// has nothing to show for it
    pub fn classify(entity: &GameEntity) -> Option<Self> {
        match entity.kind {
            ObjectKind::BattleNpc => classify_mob(entity),
            ObjectKind::Treasure | ObjectKind::EventObj => classify_object(entity.data_id),
            _ => None,
        }
    }
}

fn classify_mob(entity: &GameEntity) -> Option<EspType> {
    if entity.max_hp > 0 && entity.current_hp == 0 {
        return None;
    }
    if mobs::MIMICS.contains(&entity.name_id) {
        Some(EspType::Mimic)
    } else if mobs::FRIENDLY_LOOKALIKES.contains(&entity.name_id) {
        Some(EspType::FriendlyEnemy)
    } else {
        Some(EspType::Enemy)
    }
}

fn classify_object(data_id: u32) -> Option<EspType> {
    let kind = match data_id {
        id if objects::BRONZE_CHESTS.contains(&id) => EspType::BronzeChest,
        objects::SILVER_CHEST => EspType::SilverChest,
        objects::GOLD_CHEST => EspType::GoldChest,
        objects::ACCURSED_HOARD => EspType::AccursedHoard,
        objects::ACCURSED_HOARD_COFFER => EspType::AccursedHoardCoffer,
        id if objects::MIMIC_COFFERS.contains(&id) => EspType::MimicChest,
        id if objects::TRAPS.contains(&id) => EspType::Trap,
        id if objects::RETURN_POINTS.contains(&id) => EspType::Return,
        id if objects::PASSAGE_POINTS.contains(&id) => EspType::Passage,
        _ => return None,
    };
    Some(kind)
}

/// How a mob notices the player
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Default,
    Serialize,
    Deserialize,
    IntoStaticStr,
    Display,
)]
pub enum AggroType {
    Sight,
    Sound,
    #[default]
    Proximity,
    /// Value in the mob table that the overlay cannot draw
    #[serde(other)]
    Undetermined,
}

/// Classified entity as published in a snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EspObject {
    pub entity: GameEntity,
    pub kind: EspType,
    /// Distance to the local player at scan time
    pub distance: f32,
    pub mob: Option<MobInfo>,
}

impl EspObject {
    pub fn new(entity: GameEntity, kind: EspType, player_position: Vec3, mob: Option<MobInfo>) -> Self {
        let distance = entity.position.distance(player_position);
        Self {
            entity,
            kind,
            distance,
            mob,
        }
    }

    /// Entry for the local player itself
    pub fn player(entity: GameEntity) -> Self {
        Self {
            entity,
            kind: EspType::Player,
            distance: 0.0,
            mob: None,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.entity.position
    }

    pub fn in_combat(&self) -> bool {
        self.entity.in_combat
    }

    pub fn is_enemy_sub_kind(&self) -> bool {
        self.entity.sub_kind == mobs::ENEMY_SUB_KIND
    }

    /// Mobs missing from the mob table are assumed to aggro by proximity
    pub fn aggro_type(&self) -> AggroType {
        self.mob
            .as_ref()
            .map(|mob| mob.aggro_type)
            .unwrap_or_default()
    }

    pub fn is_patrol(&self) -> bool {
        self.mob.as_ref().is_some_and(|mob| mob.patrol)
    }

    pub fn aggro_distance(&self) -> f32 {
        self.mob
            .as_ref()
            .and_then(|mob| mob.aggro_distance)
            .unwrap_or(DEFAULT_AGGRO + self.entity.hitbox_radius)
    }

    pub fn interaction_distance(&self) -> f32 {
        if self.kind.is_chest() {
            CHEST_INTERACTION
        } else {
            0.0
        }
    }

    pub fn render_color(&self, colors: &EspColors) -> Color {
        match self.kind {
            EspType::Player => colors.player,
            EspType::Enemy => colors.enemy,
            EspType::Mimic => colors.mimic,
            EspType::FriendlyEnemy => colors.friendly_enemy,
            EspType::BronzeChest => colors.bronze_chest,
            EspType::SilverChest => colors.silver_chest,
            EspType::GoldChest | EspType::AccursedHoardCoffer => colors.gold_chest,
            EspType::AccursedHoard => colors.accursed_hoard,
            EspType::MimicChest => colors.mimic_chest,
            EspType::Trap => colors.trap,
            EspType::Return => colors.return_point,
            EspType::Passage => colors.passage,
        }
    }
}
