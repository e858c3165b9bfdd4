//! Dungeon run tracking: consumables, trap state, per-floor bookkeeping and
//! the progression state machine.

mod interaction;
mod pomander;
mod run;
mod tracker;
mod trap;

pub use interaction::{InteractionMemory, is_chest_open_safe};
pub use pomander::Pomander;
pub use run::{PendingFloorEffects, RunState, RunSummary};
pub use tracker::{ExitReason, ProgressTracker, RunEvent};
pub use trap::TrapStatus;
