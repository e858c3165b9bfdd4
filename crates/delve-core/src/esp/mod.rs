//! Entity overlay: classification, mob data, the background scanner and the
//! per-frame renderer.

mod mob_info;
mod object;
mod render;
mod scanner;
mod snapshot;

pub use mob_info::{MobInfo, MobInfoTable, SharedMobInfo};
pub use object::{AggroType, EspObject, EspType};
pub use render::{Renderer, draw_snapshot, should_draw_name};
pub use scanner::{Scanner, should_draw};
pub use snapshot::{Snapshot, SnapshotBuffer};
