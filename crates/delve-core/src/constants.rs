//! Tuning constants for the tracker, scanner and renderer
//!
//! Centralised here so the timing and range values can be found in one place.
//! Constants are grouped by the concern that reads them.

/// Timing constants for the background workers
pub mod timing {
    use std::time::Duration;

    /// Period of the progress tracker's timer
    pub const TRACKER_TICK: Duration = Duration::from_secs(1);

    /// Period of the entity scan loop
    pub const SCAN_TICK: Duration = Duration::from_millis(250);

    /// Upper bound on how long `Lens::stop` waits for each worker
    pub const WORKER_JOIN_TIMEOUT: Duration = Duration::from_secs(2);
}

/// Distances in world units (yalms)
pub mod range {
    /// Chests, hoards, traps and mimics are highlighted within this distance
    pub const HIGHLIGHT: f32 = 35.0;

    /// Interaction rings are drawn for chests within this distance
    pub const INTERACTION_RING: f32 = 10.0;

    /// Aggro indicators are drawn for mobs within this distance
    pub const AGGRO_VIEW: f32 = 50.0;

    /// Distance at which a chest can be opened
    pub const CHEST_INTERACTION: f32 = 3.0;

    /// Aggro radius used when the mob table has no override (added to hitbox radius)
    pub const DEFAULT_AGGRO: f32 = 10.0;
}

/// Floor and chest rules
pub mod rules {
    /// Floors per floor set; every multiple of this is a boss floor
    pub const FLOORS_PER_SET: u32 = 10;

    /// Floor without respawns in Eureka Orthos besides the boss floors
    pub const ORTHOS_NO_RESPAWN_FLOOR: u32 = 99;

    /// Silver chests are only opened while HP is above this share of max HP
    pub const SILVER_CHEST_MIN_HP_RATIO: f32 = 0.77;

    /// Number of image parts on the map's return/passage progress icons
    pub const PROGRESS_ICON_PARTS: u16 = 11;

    /// Highest stored passage progress value
    pub const MAX_PASSAGE_PROGRESS: i8 = 10;
}

/// Drawing constants
pub mod draw {
    use std::f32::consts::FRAC_PI_2;

    /// Opacity applied to filled shapes
    pub const DEFAULT_FILLED_OPACITY: f32 = 0.4;

    /// Full opening angle of a sight-aggro cone
    pub const SIGHT_RADIAN: f32 = FRAC_PI_2;

    /// Segments used to approximate a ground circle
    pub const CIRCLE_SEGMENTS: usize = 48;

    /// Segments used to approximate the arc of a sight cone
    pub const CONE_SEGMENTS: usize = 24;

    /// Radius of the on-screen player dot in pixels
    pub const PLAYER_DOT_RADIUS: f32 = 3.0;

    pub const LINE_THICKNESS: f32 = 2.0;
}
