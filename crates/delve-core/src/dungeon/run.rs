use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Pomander, TrapStatus};
use crate::content::{DungeonKind, FloorSetInfo};

/// Effects queued by consumables that only apply from the next floor on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PendingFloorEffects {
    pub flight: bool,
    pub affluence: bool,
    pub alteration: bool,
    /// A transference has started; the next recommenced duty is a new floor
    pub transfer: bool,
}

impl PendingFloorEffects {
    /// Effects the next floor starts with, in application order
    pub fn carried_effects(&self) -> Vec<Pomander> {
        let mut effects = Vec::new();
        if self.flight {
            effects.push(Pomander::Flight);
        }
        if self.affluence {
            effects.push(Pomander::Affluence);
        }
        if self.alteration {
            effects.push(Pomander::Alteration);
        }
        effects
    }

    pub fn is_clear(&self) -> bool {
        *self == Self::default()
    }
}

/// State of the tracked dungeon run
#[derive(Debug, Clone)]
pub struct RunState {
    pub(crate) content_id: u16,
    pub(crate) floor_set: Option<FloorSetInfo>,
    pub(crate) current_floor: u32,
    pub(crate) floor_times: BTreeMap<u32, i64>,
    pub(crate) passage_progress: i8,
    pub(crate) trap_status: TrapStatus,
    pub(crate) floor_effects: Vec<Pomander>,
    pub(crate) pending: PendingFloorEffects,
    pub(crate) ready: bool,
    pub(crate) floor_verified: bool,
    pub(crate) floor_start: DateTime<Utc>,
    pub(crate) next_respawn: DateTime<Utc>,
}

impl Default for RunState {
    fn default() -> Self {
        Self {
            content_id: 0,
            floor_set: None,
            current_floor: 0,
            floor_times: BTreeMap::new(),
            passage_progress: -1,
            trap_status: TrapStatus::Active,
            floor_effects: Vec::new(),
            pending: PendingFloorEffects::default(),
            ready: false,
            floor_verified: false,
            floor_start: DateTime::<Utc>::MIN_UTC,
            next_respawn: DateTime::<Utc>::MIN_UTC,
        }
    }
}

impl RunState {
    /// Fresh run state for a floor set entered at `now`
    pub(crate) fn enter(info: FloorSetInfo, now: DateTime<Utc>) -> Self {
        let floor_times = info.floors().map(|floor| (floor, 0)).collect();
        Self {
            content_id: info.content_id,
            floor_set: Some(info),
            current_floor: info.start_floor,
            floor_times,
            passage_progress: -1,
            trap_status: TrapStatus::Active,
            floor_effects: Vec::new(),
            pending: PendingFloorEffects::default(),
            ready: true,
            floor_verified: false,
            floor_start: now,
            next_respawn: now + respawn_interval(&info),
        }
    }

    pub fn content_id(&self) -> u16 {
        self.content_id
    }

    pub fn floor_set(&self) -> Option<&FloorSetInfo> {
        self.floor_set.as_ref()
    }

    pub fn dungeon(&self) -> Option<DungeonKind> {
        self.floor_set.map(|info| info.dungeon)
    }

    pub fn current_floor(&self) -> u32 {
        self.current_floor
    }

    /// Elapsed seconds per floor
    pub fn floor_times(&self) -> &BTreeMap<u32, i64> {
        &self.floor_times
    }

    pub fn floor_time(&self, floor: u32) -> Option<i64> {
        self.floor_times.get(&floor).copied()
    }

    /// Progress toward the floor's exit (0-10), or -1 when unknown
    pub fn passage_progress(&self) -> i8 {
        self.passage_progress
    }

    pub fn trap_status(&self) -> TrapStatus {
        self.trap_status
    }

    pub fn floor_effects(&self) -> &[Pomander] {
        &self.floor_effects
    }

    pub fn pending(&self) -> PendingFloorEffects {
        self.pending
    }

    pub fn is_ready(&self) -> bool {
        self.ready
    }

    pub fn is_floor_verified(&self) -> bool {
        self.floor_verified
    }

    pub fn next_respawn(&self) -> DateTime<Utc> {
        self.next_respawn
    }

    /// Record the elapsed time of the current floor; never moves backwards
    pub(crate) fn update_floor_time(&mut self, now: DateTime<Utc>) -> i64 {
        let elapsed = (now - self.floor_start).num_seconds().max(0);
        let entry = self.floor_times.entry(self.current_floor).or_insert(0);
        *entry = (*entry).max(elapsed);
        *entry
    }

    pub fn summary(&self) -> RunSummary {
        RunSummary {
            content_id: self.content_id,
            dungeon: self.dungeon(),
            current_floor: self.current_floor,
            floor_times: self.floor_times.clone(),
            floor_effects: self.floor_effects.clone(),
            trap_status: self.trap_status,
            passage_progress: self.passage_progress,
            ready: self.ready,
        }
    }
}

pub(crate) fn respawn_interval(info: &FloorSetInfo) -> chrono::Duration {
    chrono::Duration::seconds(i64::from(info.respawn_secs))
}

/// Serializable view of a run, for display and export
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub content_id: u16,
    pub dungeon: Option<DungeonKind>,
    pub current_floor: u32,
    pub floor_times: BTreeMap<u32, i64>,
    pub floor_effects: Vec<Pomander>,
    pub trap_status: TrapStatus,
    pub passage_progress: i8,
    pub ready: bool,
}

impl RunSummary {
    /// Sum of all recorded floor times in seconds
    pub fn total_secs(&self) -> i64 {
        self.floor_times.values().sum()
    }
}
