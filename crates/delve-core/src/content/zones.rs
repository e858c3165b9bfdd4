use serde::{Deserialize, Serialize};
use strum::{Display, IntoStaticStr};

/// Territory ids of Palace of the Dead floors
pub const PALACE_OF_THE_DEAD_ZONES: &[u16] = &[
    561, 562, 563, 564, 565, 593, 594, 595, 596, 597, 598, 599, 600, 601, 602, 603, 604, 605, 606,
    607,
];

/// Territory ids of Heaven-on-High floors
pub const HEAVEN_ON_HIGH_ZONES: &[u16] = &[770, 771, 772, 773, 774, 775, 782, 783, 784, 785];

/// Territory ids of Eureka Orthos floors
pub const EUREKA_ORTHOS_ZONES: &[u16] = &[
    1099, 1100, 1101, 1102, 1103, 1104, 1105, 1106, 1107, 1108,
];

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, IntoStaticStr, Display,
)]
pub enum DungeonKind {
    #[strum(serialize = "Palace of the Dead")]
    PalaceOfTheDead,
    #[strum(serialize = "Heaven-on-High")]
    HeavenOnHigh,
    #[strum(serialize = "Eureka Orthos")]
    EurekaOrthos,
}

impl DungeonKind {
    /// Dungeon variant a territory belongs to
    pub fn from_zone(zone: u16) -> Option<Self> {
        if PALACE_OF_THE_DEAD_ZONES.contains(&zone) {
            Some(Self::PalaceOfTheDead)
        } else if HEAVEN_ON_HIGH_ZONES.contains(&zone) {
            Some(Self::HeavenOnHigh)
        } else if EUREKA_ORTHOS_ZONES.contains(&zone) {
            Some(Self::EurekaOrthos)
        } else {
            None
        }
    }

    pub fn zones(&self) -> &'static [u16] {
        match self {
            Self::PalaceOfTheDead => PALACE_OF_THE_DEAD_ZONES,
            Self::HeavenOnHigh => HEAVEN_ON_HIGH_ZONES,
            Self::EurekaOrthos => EUREKA_ORTHOS_ZONES,
        }
    }

    pub fn name(&self) -> &'static str {
        self.into()
    }
}

/// True when the territory is a floor of any supported dungeon
pub fn in_deep_dungeon(zone: u16) -> bool {
    DungeonKind::from_zone(zone).is_some()
}
