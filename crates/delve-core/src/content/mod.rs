//! Static content data for the supported dungeon variants.
//!
//! - **Zones**: territory ids that belong to each dungeon variant
//! - **Floor sets**: per-content start floor, respawn interval and mimic policy
//! - **Object ids**: data ids used to classify chests, traps and exits

mod floorset;
pub mod ids;
mod zones;

pub use floorset::*;
pub use zones::*;
