//! # delve-core
//!
//! Core library for the Deep Dungeon progress tracker and entity overlay.
//!
//! This crate provides:
//! - Typed decoders for the two server messages the tracker listens to
//! - The floor-progression state machine (`ProgressTracker`)
//! - Entity classification, the background scanner and the overlay renderer
//! - Host-facing lifecycle (`Lens::start` / `Lens::stop`)
//!
//! The host runtime (network hooks, object table, UI widgets, drawing) is
//! consumed through the traits in [`host`] and [`map`]; nothing here reads
//! game memory directly.

pub mod config;
pub mod constants;
pub mod content;
pub mod dungeon;
pub mod error;
pub mod esp;
pub mod geometry;
pub mod host;
pub mod map;
pub mod protocol;
pub mod service;
pub mod shutdown;

#[cfg(test)]
pub mod mock;

pub use config::{Color, Config, EspColors, SharedConfig};
pub use content::{ContentCatalog, DungeonKind, FloorSetInfo, MimicChests, in_deep_dungeon};
pub use dungeon::{
    ExitReason, InteractionMemory, PendingFloorEffects, Pomander, ProgressTracker, RunEvent,
    RunState, RunSummary, TrapStatus, is_chest_open_safe,
};
pub use error::{Error, Result};
pub use esp::{
    AggroType, EspObject, EspType, MobInfo, MobInfoTable, Renderer, Scanner, SharedMobInfo,
    Snapshot, SnapshotBuffer, should_draw,
};
pub use geometry::{Vec2, Vec3};
pub use host::{
    Conditions, DrawList, EventSink, GameClient, GameEntity, HostEvents, ObjectKind, Projection,
    SubscriptionId, WindowControl,
};
pub use map::{AddonMapReader, AddonSource, DungeonMapReader, UiNode};
pub use protocol::{
    ActorControlSelf, Direction, DungeonSignal, NetworkMessage, OpcodeTable, SystemLogMessage,
    decode_signal, load_opcodes, save_opcodes,
};
pub use service::{Collaborators, Lens};
pub use shutdown::{ShutdownSignal, Worker};
