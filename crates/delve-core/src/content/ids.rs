//! Data ids for network messages and map objects.

/// System log message ids
pub mod log {
    pub const POMANDER_USED: u32 = 7220;
    pub const DUTY_ENDED: u32 = 7248;
    pub const TRANSFERENCE_INITIATED: u32 = 7249;
}

/// ActorControlSelf categories and director update kinds
pub mod director {
    pub const DIRECTOR_UPDATE: u8 = 0x6D;
    pub const DUTY_COMMENCED: u8 = 0x01;
    pub const DUTY_RECOMMENCED: u8 = 0x06;
}

/// Event object data ids
pub mod objects {
    pub const BRONZE_CHESTS: &[u32] = &[
        782, 783, 784, 785, 786, 787, 788, 789, 790, 802, 803, 804, 805, 1036, 1037, 1038, 1039,
        1040, 1041, 1042, 1043, 1044, 1045, 1046, 1047, 1048, 1049,
    ];
    pub const SILVER_CHEST: u32 = 2007357;
    pub const GOLD_CHEST: u32 = 2007358;
    pub const ACCURSED_HOARD: u32 = 2007542;
    pub const ACCURSED_HOARD_COFFER: u32 = 2007543;

    /// Coffers revealed as mimics
    pub const MIMIC_COFFERS: &[u32] = &[2006020];

    pub const TRAPS: &[u32] = &[
        // Palace of the Dead
        2007182, 2007183, 2007184, 2007185, 2007186,
        // Heaven-on-High
        2009504,
        // Eureka Orthos
        2013284,
    ];

    pub const RETURN_POINTS: &[u32] = &[2007188, 2009506, 2013286];
    pub const PASSAGE_POINTS: &[u32] = &[2007187, 2009507, 2013287];
}

/// Battle NPC name ids
pub mod mobs {
    /// Mimics that have already sprung from their chest
    pub const MIMICS: &[u32] = &[2566, 7392, 7393, 7394, 12240, 12241, 12242];

    /// Non-hostile NPCs that share models with enemies
    pub const FRIENDLY_LOOKALIKES: &[u32] = &[5041, 7610, 12243];

    /// BattleNpc sub-kind of hostile mobs
    pub const ENEMY_SUB_KIND: u8 = 5;
}
