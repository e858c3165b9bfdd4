//! Floor progression state machine.
//!
//! The tracker follows a run through three inputs:
//! - Idle -> InRun on a duty-commenced director update for a known content id
//! - floor transitions on duty-recommenced, once a transference is pending
//! - InRun -> Idle on duty-ended, or from the timer when the player is no
//!   longer standing in a dungeon zone
//!
//! Every operation returns the [`RunEvent`]s it caused so the caller can drive
//! windows and logging without the tracker knowing about the host.

use chrono::{DateTime, Utc};
use tracing::{debug, info};

use super::interaction::{
    InteractionMemory, auto_open_enabled, has_health_for, in_interaction_range, is_chest_open_safe,
};
use super::run::respawn_interval;
use super::{Pomander, RunState, RunSummary};
use crate::config::Config;
use crate::constants::rules::{FLOORS_PER_SET, MAX_PASSAGE_PROGRESS, ORTHOS_NO_RESPAWN_FLOOR};
use crate::content::{ContentCatalog, DungeonKind, MimicChests, in_deep_dungeon};
use crate::error::Result;
use crate::esp::EspObject;
use crate::host::{GameClient, GameEntity};
use crate::map::DungeonMapReader;
use crate::protocol::DungeonSignal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    /// The duty-ended log message arrived
    DutyEnded,
    /// Failsafe: the timer found the player outside every dungeon zone
    LeftDungeon,
}

#[derive(Debug, Clone, PartialEq)]
pub enum RunEvent {
    Entered {
        content_id: u16,
        dungeon: DungeonKind,
        floor: u32,
    },
    FloorAdvanced {
        from: u32,
        to: u32,
        elapsed_secs: i64,
    },
    FloorCorrected {
        tracked: u32,
        observed: u32,
    },
    /// Effect active on the current floor
    EffectApplied(Pomander),
    /// Effect that will apply from the next floor
    EffectQueued(Pomander),
    TransferPending,
    Exited {
        reason: ExitReason,
        summary: RunSummary,
    },
}

pub struct ProgressTracker {
    catalog: ContentCatalog,
    run: RunState,
    interactions: InteractionMemory,
}

impl ProgressTracker {
    pub fn new() -> Self {
        Self::with_catalog(ContentCatalog::builtin())
    }

    pub fn with_catalog(catalog: ContentCatalog) -> Self {
        Self {
            catalog,
            run: RunState::default(),
            interactions: InteractionMemory::new(),
        }
    }

    pub fn run(&self) -> &RunState {
        &self.run
    }

    pub fn is_ready(&self) -> bool {
        self.run.ready
    }

    pub fn current_floor(&self) -> u32 {
        self.run.current_floor
    }

    pub fn interactions(&self) -> &InteractionMemory {
        &self.interactions
    }

    pub fn summary(&self) -> RunSummary {
        self.run.summary()
    }

    /// Mimic policy of the tracked floor set
    pub fn mimic_policy(&self) -> MimicChests {
        self.run
            .floor_set
            .map(|info| info.mimic_chests)
            .unwrap_or_default()
    }

    /// Apply a decoded network signal.
    ///
    /// `zone` is the player's territory at delivery time; log-message signals
    /// are dropped outside dungeon zones.
    pub fn handle_signal(
        &mut self,
        signal: DungeonSignal,
        zone: u16,
        now: DateTime<Utc>,
    ) -> Vec<RunEvent> {
        if signal.is_system_log() && !in_deep_dungeon(zone) {
            return Vec::new();
        }

        match signal {
            DungeonSignal::DutyCommenced { content_id } => {
                if self.run.ready {
                    return Vec::new();
                }
                self.enter(content_id, now).into_iter().collect()
            }
            DungeonSignal::DutyRecommenced => {
                if !self.run.ready || !self.run.pending.transfer {
                    return Vec::new();
                }
                vec![self.next_floor(now)]
            }
            DungeonSignal::PomanderUsed { item_id } => {
                if !self.run.ready {
                    return Vec::new();
                }
                match Pomander::from_u8(item_id) {
                    Some(pomander) => self.use_pomander(pomander).into_iter().collect(),
                    None => {
                        debug!("Unknown pomander id: {}", item_id);
                        Vec::new()
                    }
                }
            }
            DungeonSignal::TransferenceInitiated => {
                if !self.run.ready {
                    return Vec::new();
                }
                self.run.pending.transfer = true;
                vec![RunEvent::TransferPending]
            }
            DungeonSignal::DutyEnded => {
                if !self.run.ready {
                    return Vec::new();
                }
                vec![self.exit(ExitReason::DutyEnded)]
            }
        }
    }

    fn enter(&mut self, content_id: u16, now: DateTime<Utc>) -> Option<RunEvent> {
        let info = *self.catalog.get(content_id)?;
        debug!(
            "Entering content {} - start floor {}",
            content_id, info.start_floor
        );

        self.run = RunState::enter(info, now);
        self.interactions.clear();

        Some(RunEvent::Entered {
            content_id,
            dungeon: info.dungeon,
            floor: info.start_floor,
        })
    }

    fn next_floor(&mut self, now: DateTime<Utc>) -> RunEvent {
        let from = self.run.current_floor;
        let elapsed_secs = self.run.update_floor_time(now);
        debug!("Content {} - next floor: {}", self.run.content_id, from + 1);

        self.interactions.clear();
        self.run.floor_effects = self.run.pending.carried_effects();
        self.run.pending = Default::default();

        self.run.current_floor = from + 1;
        self.run.floor_start = now;
        self.run.trap_status = Default::default();
        self.run.passage_progress = -1;
        if let Some(info) = &self.run.floor_set {
            self.run.next_respawn = now + respawn_interval(info);
        }

        RunEvent::FloorAdvanced {
            from,
            to: from + 1,
            elapsed_secs,
        }
    }

    fn use_pomander(&mut self, pomander: Pomander) -> Option<RunEvent> {
        debug!("Pomander used: {}", pomander);
        match pomander {
            Pomander::Safety | Pomander::SafetyProtomander => {
                self.run.floor_effects.push(pomander);
                self.run.trap_status = self.run.trap_status.disarm();
                Some(RunEvent::EffectApplied(pomander))
            }
            Pomander::Sight | Pomander::SightProtomander => {
                self.run.floor_effects.push(pomander);
                self.run.trap_status = self.run.trap_status.reveal();
                Some(RunEvent::EffectApplied(pomander))
            }
            Pomander::Affluence | Pomander::AffluenceProtomander => {
                self.run.pending.affluence = true;
                Some(RunEvent::EffectQueued(pomander))
            }
            Pomander::Flight | Pomander::FlightProtomander => {
                self.run.pending.flight = true;
                Some(RunEvent::EffectQueued(pomander))
            }
            Pomander::Alteration | Pomander::AlterationProtomander => {
                self.run.pending.alteration = true;
                Some(RunEvent::EffectQueued(pomander))
            }
            Pomander::Fortune | Pomander::FortuneProtomander => {
                self.run.floor_effects.push(pomander);
                Some(RunEvent::EffectApplied(pomander))
            }
            _ => None,
        }
    }

    fn exit(&mut self, reason: ExitReason) -> RunEvent {
        debug!("Content {} - exiting ({:?})", self.run.content_id, reason);
        let mut summary = self.run.summary();
        summary.ready = false;

        self.run = RunState::default();
        self.interactions.clear();

        RunEvent::Exited { reason, summary }
    }

    /// Periodic update; call once per second while the component runs.
    pub fn tick(
        &mut self,
        zone: u16,
        map: &dyn DungeonMapReader,
        now: DateTime<Utc>,
    ) -> Vec<RunEvent> {
        if !self.run.ready {
            return Vec::new();
        }

        if !in_deep_dungeon(zone) {
            debug!("Failsafe exit");
            return vec![self.exit(ExitReason::LeftDungeon)];
        }

        let mut events = Vec::new();

        // Covers loading mid-run and missed transitions
        if !self.run.floor_verified {
            events.extend(self.verify_floor(map));
        }

        self.run.update_floor_time(now);

        if now > self.run.next_respawn {
            if let Some(info) = &self.run.floor_set {
                self.run.next_respawn = now + respawn_interval(info);
            }
        }

        self.run.passage_progress = match map.passage_part() {
            Some(part) => i8::try_from(part)
                .unwrap_or(MAX_PASSAGE_PROGRESS)
                .min(MAX_PASSAGE_PROGRESS),
            None => -1,
        };

        events
    }

    fn verify_floor(&mut self, map: &dyn DungeonMapReader) -> Option<RunEvent> {
        let observed = map.floor_label()?;
        self.run.floor_verified = true;

        let tracked = self.run.current_floor;
        if tracked == observed {
            return None;
        }

        info!(
            "Floor number mismatch - adjusting {} -> {}",
            tracked, observed
        );
        self.run.current_floor = observed;
        Some(RunEvent::FloorCorrected { tracked, observed })
    }

    /// Seconds until the next monster respawn; negative when overdue.
    pub fn time_till_respawn(&self, now: DateTime<Utc>) -> i64 {
        if !self.run.ready {
            return 0;
        }
        (self.run.next_respawn - now).num_seconds()
    }

    /// Boss floors (every tenth floor, and floor 99 of Eureka Orthos) have no
    /// monster respawns.
    pub fn has_respawn(&self) -> bool {
        let floor = self.run.current_floor;
        let orthos_boss = self.run.dungeon() == Some(DungeonKind::EurekaOrthos)
            && floor == ORTHOS_NO_RESPAWN_FLOOR;
        !(floor % FLOORS_PER_SET == 0 || orthos_boss)
    }

    /// Whether the chest would be opened automatically right now
    pub fn should_auto_open(&self, obj: &EspObject, player: &GameEntity, config: &Config) -> bool {
        if player.in_combat || !config.open_chests || !obj.kind.is_chest() {
            return false;
        }

        auto_open_enabled(obj.kind, config)
            && has_health_for(obj.kind, player)
            && is_chest_open_safe(self.mimic_policy(), obj.kind, config.open_unsafe_chests)
            && in_interaction_range(obj)
            && !self.interactions.contains(obj.entity.object_id)
    }

    /// Open the chest if every auto-open rule allows it.
    ///
    /// Returns whether an interaction was requested. The object is remembered
    /// for the rest of the floor once the request goes through.
    pub fn try_interact(
        &mut self,
        obj: &EspObject,
        player: &GameEntity,
        config: &Config,
        game: &dyn GameClient,
    ) -> Result<bool> {
        if !self.should_auto_open(obj, player, config) {
            return Ok(false);
        }

        game.interact(obj.entity.object_id)?;
        self.interactions.record(obj.entity.object_id);
        Ok(true)
    }

    /// First chest in reach that the mimic policy allows opening. Ignores
    /// per-category toggles and interaction memory.
    pub fn nearest_openable<'a>(
        &self,
        objects: &'a [EspObject],
        open_unsafe: bool,
    ) -> Option<&'a EspObject> {
        let policy = self.mimic_policy();
        objects.iter().find(|obj| {
            obj.kind.is_chest()
                && is_chest_open_safe(policy, obj.kind, open_unsafe)
                && in_interaction_range(obj)
        })
    }
}

impl Default for ProgressTracker {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::FloorSetInfo;
    use crate::dungeon::TrapStatus;
    use crate::esp::EspType;
    use crate::geometry::Vec3;
    use crate::host::ObjectKind;
    use crate::mock::{FakeGame, FakeMap};
    use chrono::TimeZone;

    const POTD_ZONE: u16 = 561;
    const ORTHOS_ZONE: u16 = 1099;
    const TOWN_ZONE: u16 = 132;
    const TEST_CONTENT: u16 = 1;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + secs, 0).unwrap()
    }

    fn test_catalog() -> ContentCatalog {
        let mut catalog = ContentCatalog::builtin();
        catalog.insert(FloorSetInfo {
            content_id: TEST_CONTENT,
            dungeon: DungeonKind::PalaceOfTheDead,
            start_floor: 1,
            respawn_secs: 30,
            mimic_chests: MimicChests::Silver,
        });
        catalog
    }

    fn entered() -> ProgressTracker {
        let mut tracker = ProgressTracker::with_catalog(test_catalog());
        let events = tracker.handle_signal(
            DungeonSignal::DutyCommenced {
                content_id: TEST_CONTENT,
            },
            POTD_ZONE,
            at(0),
        );
        assert_eq!(events.len(), 1);
        tracker
    }

    fn pomander(tracker: &mut ProgressTracker, pomander: Pomander) -> Vec<RunEvent> {
        tracker.handle_signal(
            DungeonSignal::PomanderUsed {
                item_id: pomander as u8,
            },
            POTD_ZONE,
            at(1),
        )
    }

    fn advance(tracker: &mut ProgressTracker, now: DateTime<Utc>) -> Vec<RunEvent> {
        tracker.handle_signal(DungeonSignal::TransferenceInitiated, POTD_ZONE, now);
        tracker.handle_signal(DungeonSignal::DutyRecommenced, POTD_ZONE, now)
    }

    fn chest(kind: EspType, object_id: u32, distance: f32) -> EspObject {
        EspObject {
            entity: GameEntity {
                object_id,
                kind: ObjectKind::Treasure,
                position: Vec3::new(distance, 0.0, 0.0),
                ..GameEntity::default()
            },
            kind,
            distance,
            mob: None,
        }
    }

    fn healthy_player() -> GameEntity {
        GameEntity {
            object_id: 0x1000_0001,
            kind: ObjectKind::Player,
            current_hp: 10000,
            max_hp: 10000,
            ..GameEntity::default()
        }
    }

    #[test]
    fn test_enter_run() {
        let tracker = entered();
        let run = tracker.run();

        assert!(run.is_ready());
        assert_eq!(run.current_floor(), 1);
        assert_eq!(run.floor_times().len(), 10);
        assert!((1..=10).all(|floor| run.floor_time(floor) == Some(0)));
        assert_eq!(run.trap_status(), TrapStatus::Active);
        assert!(run.floor_effects().is_empty());
        assert!(run.pending().is_clear());
        assert_eq!(tracker.time_till_respawn(at(0)), 30);
    }

    #[test]
    fn test_unknown_content_is_ignored() {
        let mut tracker = ProgressTracker::new();
        let events = tracker.handle_signal(
            DungeonSignal::DutyCommenced { content_id: 4242 },
            POTD_ZONE,
            at(0),
        );
        assert!(events.is_empty());
        assert!(!tracker.is_ready());
    }

    #[test]
    fn test_commenced_while_in_run_is_ignored() {
        let mut tracker = entered();
        let events = tracker.handle_signal(
            DungeonSignal::DutyCommenced { content_id: 60005 },
            POTD_ZONE,
            at(5),
        );
        assert!(events.is_empty());
        assert_eq!(tracker.run().content_id(), TEST_CONTENT);
    }

    #[test]
    fn test_sight_then_transfer_scenario() {
        let mut tracker = entered();

        pomander(&mut tracker, Pomander::Sight);
        assert_eq!(tracker.run().trap_status(), TrapStatus::Visible);
        assert_eq!(tracker.run().floor_effects(), &[Pomander::Sight]);

        let events = advance(&mut tracker, at(95));
        assert_eq!(
            events,
            vec![RunEvent::FloorAdvanced {
                from: 1,
                to: 2,
                elapsed_secs: 95
            }]
        );

        let run = tracker.run();
        assert_eq!(run.current_floor(), 2);
        assert_eq!(run.floor_time(1), Some(95));
        assert_eq!(run.trap_status(), TrapStatus::Active);
        assert!(run.floor_effects().is_empty());
        assert_eq!(run.passage_progress(), -1);

        // Floor 1 stays frozen while floor 2 ticks
        let map = FakeMap::default();
        tracker.tick(POTD_ZONE, &map, at(120));
        assert_eq!(tracker.run().floor_time(1), Some(95));
        assert_eq!(tracker.run().floor_time(2), Some(25));
    }

    #[test]
    fn test_affluence_applies_to_next_floor_only() {
        let mut tracker = entered();
        advance(&mut tracker, at(10));
        advance(&mut tracker, at(20));
        assert_eq!(tracker.current_floor(), 3);

        let events = pomander(&mut tracker, Pomander::Affluence);
        assert_eq!(events, vec![RunEvent::EffectQueued(Pomander::Affluence)]);
        assert!(!tracker.run().floor_effects().contains(&Pomander::Affluence));
        assert!(tracker.run().pending().affluence);

        advance(&mut tracker, at(30));
        assert_eq!(tracker.current_floor(), 4);
        assert_eq!(tracker.run().floor_effects(), &[Pomander::Affluence]);
        assert!(tracker.run().pending().is_clear());
    }

    #[test]
    fn test_pending_flags_cleared_after_transition() {
        let mut tracker = entered();
        pomander(&mut tracker, Pomander::FlightProtomander);
        pomander(&mut tracker, Pomander::AlterationProtomander);
        pomander(&mut tracker, Pomander::Affluence);

        advance(&mut tracker, at(10));
        assert!(tracker.run().pending().is_clear());
        assert_eq!(
            tracker.run().floor_effects(),
            &[Pomander::Flight, Pomander::Affluence, Pomander::Alteration]
        );

        advance(&mut tracker, at(20));
        assert!(tracker.run().pending().is_clear());
        assert!(tracker.run().floor_effects().is_empty());
    }

    #[test]
    fn test_recommenced_without_transfer_changes_nothing() {
        let mut tracker = entered();
        for secs in 1..5 {
            let events = tracker.handle_signal(DungeonSignal::DutyRecommenced, POTD_ZONE, at(secs));
            assert!(events.is_empty());
        }
        assert_eq!(tracker.current_floor(), 1);

        for expected in 2..=6 {
            advance(&mut tracker, at(i64::from(expected) * 10));
            assert_eq!(tracker.current_floor(), expected);
            tracker.handle_signal(DungeonSignal::DutyRecommenced, POTD_ZONE, at(100));
            assert_eq!(tracker.current_floor(), expected);
        }
    }

    #[test]
    fn test_trap_status_is_monotonic_within_floor() {
        let mut tracker = entered();

        pomander(&mut tracker, Pomander::SafetyProtomander);
        assert_eq!(tracker.run().trap_status(), TrapStatus::Inactive);

        pomander(&mut tracker, Pomander::SightProtomander);
        assert_eq!(tracker.run().trap_status(), TrapStatus::Inactive);
        assert_eq!(
            tracker.run().floor_effects(),
            &[Pomander::SafetyProtomander, Pomander::SightProtomander]
        );

        advance(&mut tracker, at(10));
        assert_eq!(tracker.run().trap_status(), TrapStatus::Active);
    }

    #[test]
    fn test_fortune_and_other_pomanders() {
        let mut tracker = entered();
        assert_eq!(
            pomander(&mut tracker, Pomander::FortuneProtomander),
            vec![RunEvent::EffectApplied(Pomander::FortuneProtomander)]
        );
        assert_eq!(tracker.run().trap_status(), TrapStatus::Active);

        assert!(pomander(&mut tracker, Pomander::Strength).is_empty());
        assert_eq!(tracker.run().floor_effects(), &[Pomander::FortuneProtomander]);

        let events = tracker.handle_signal(
            DungeonSignal::PomanderUsed { item_id: 200 },
            POTD_ZONE,
            at(2),
        );
        assert!(events.is_empty());
    }

    #[test]
    fn test_log_signals_ignored_outside_dungeon() {
        let mut tracker = entered();
        tracker.handle_signal(
            DungeonSignal::PomanderUsed {
                item_id: Pomander::Safety as u8,
            },
            TOWN_ZONE,
            at(1),
        );
        assert_eq!(tracker.run().trap_status(), TrapStatus::Active);

        tracker.handle_signal(DungeonSignal::TransferenceInitiated, TOWN_ZONE, at(1));
        assert!(!tracker.run().pending().transfer);

        tracker.handle_signal(DungeonSignal::DutyEnded, TOWN_ZONE, at(1));
        assert!(tracker.is_ready());
    }

    #[test]
    fn test_duty_ended_exits() {
        let mut tracker = entered();
        advance(&mut tracker, at(40));

        let events = tracker.handle_signal(DungeonSignal::DutyEnded, POTD_ZONE, at(50));
        match events.as_slice() {
            [RunEvent::Exited { reason, summary }] => {
                assert_eq!(*reason, ExitReason::DutyEnded);
                assert_eq!(summary.current_floor, 2);
                assert_eq!(summary.floor_times.get(&1), Some(&40));
                assert!(!summary.ready);
            }
            other => panic!("unexpected events: {:?}", other),
        }

        assert!(!tracker.is_ready());
        assert!(tracker.run().floor_set().is_none());
        assert_eq!(tracker.run().passage_progress(), -1);
        assert!(tracker.run().pending().is_clear());
    }

    #[test]
    fn test_failsafe_exit_on_tick() {
        let mut tracker = entered();
        let map = FakeMap::default();

        let events = tracker.tick(TOWN_ZONE, &map, at(3));
        assert!(matches!(
            events.as_slice(),
            [RunEvent::Exited {
                reason: ExitReason::LeftDungeon,
                ..
            }]
        ));
        assert!(!tracker.is_ready());

        // Idle ticks are no-ops
        assert!(tracker.tick(TOWN_ZONE, &map, at(4)).is_empty());
    }

    #[test]
    fn test_tick_updates_floor_time() {
        let mut tracker = entered();
        let map = FakeMap::default();

        let mut last = 0;
        for secs in [1, 2, 5, 9] {
            tracker.tick(POTD_ZONE, &map, at(secs));
            let time = tracker.run().floor_time(1).unwrap();
            assert!(time >= last);
            last = time;
        }
        assert_eq!(last, 9);
    }

    #[test]
    fn test_floor_verification_corrects_once() {
        let mut tracker = entered();
        let map = FakeMap::default();

        // No label yet: verification is deferred
        assert!(tracker.tick(POTD_ZONE, &map, at(1)).is_empty());
        assert!(!tracker.run().is_floor_verified());

        map.set_floor_label(Some(7));
        let events = tracker.tick(POTD_ZONE, &map, at(2));
        assert_eq!(
            events,
            vec![RunEvent::FloorCorrected {
                tracked: 1,
                observed: 7
            }]
        );
        assert_eq!(tracker.current_floor(), 7);
        assert!(tracker.run().is_floor_verified());

        // Verified runs stop reading the label
        map.set_floor_label(Some(3));
        assert!(tracker.tick(POTD_ZONE, &map, at(3)).is_empty());
        assert_eq!(tracker.current_floor(), 7);
    }

    #[test]
    fn test_floor_verification_matching_label() {
        let mut tracker = entered();
        let map = FakeMap::default();
        map.set_floor_label(Some(1));

        assert!(tracker.tick(POTD_ZONE, &map, at(1)).is_empty());
        assert!(tracker.run().is_floor_verified());
        assert_eq!(tracker.current_floor(), 1);
    }

    #[test]
    fn test_passage_progress() {
        let mut tracker = entered();
        let map = FakeMap::default();

        tracker.tick(POTD_ZONE, &map, at(1));
        assert_eq!(tracker.run().passage_progress(), -1);

        map.set_passage_part(Some(4));
        tracker.tick(POTD_ZONE, &map, at(2));
        assert_eq!(tracker.run().passage_progress(), 4);

        map.set_passage_part(Some(10));
        tracker.tick(POTD_ZONE, &map, at(3));
        assert_eq!(tracker.run().passage_progress(), 10);

        map.set_passage_part(None);
        tracker.tick(POTD_ZONE, &map, at(4));
        assert_eq!(tracker.run().passage_progress(), -1);
    }

    #[test]
    fn test_respawn_deadline_rolls_forward() {
        let mut tracker = entered();
        let map = FakeMap::default();

        assert_eq!(tracker.time_till_respawn(at(10)), 20);
        assert_eq!(tracker.time_till_respawn(at(35)), -5);

        tracker.tick(POTD_ZONE, &map, at(35));
        assert_eq!(tracker.time_till_respawn(at(35)), 30);

        // Floor transition restarts the timer
        advance(&mut tracker, at(40));
        assert_eq!(tracker.time_till_respawn(at(40)), 30);
    }

    #[test]
    fn test_has_respawn() {
        let mut tracker = ProgressTracker::new();
        tracker.handle_signal(
            DungeonSignal::DutyCommenced { content_id: 60001 },
            POTD_ZONE,
            at(0),
        );
        for floor in 1..=10 {
            assert_eq!(tracker.has_respawn(), floor % 10 != 0, "floor {}", floor);
            advance(&mut tracker, at(i64::from(floor)));
        }

        let mut tracker = ProgressTracker::new();
        tracker.handle_signal(
            DungeonSignal::DutyCommenced { content_id: 60040 },
            ORTHOS_ZONE,
            at(0),
        );
        assert_eq!(tracker.current_floor(), 91);
        for floor in 91..=100 {
            let expected = !(floor == 99 || floor == 100);
            assert_eq!(tracker.has_respawn(), expected, "floor {}", floor);
            advance(&mut tracker, at(i64::from(floor)));
        }
    }

    #[test]
    fn test_floor_99_respawns_outside_orthos() {
        let mut tracker = ProgressTracker::new();
        tracker.handle_signal(
            DungeonSignal::DutyCommenced { content_id: 60010 },
            POTD_ZONE,
            at(0),
        );
        assert_eq!(tracker.current_floor(), 91);
        for secs in 0..8 {
            advance(&mut tracker, at(secs));
        }
        assert_eq!(tracker.current_floor(), 99);
        assert!(tracker.has_respawn());
    }

    #[test]
    fn test_auto_open_rules() {
        let tracker = entered();
        let player = healthy_player();
        let config = Config {
            open_chests: true,
            ..Config::default()
        };

        let bronze = chest(EspType::BronzeChest, 10, 1.0);
        assert!(tracker.should_auto_open(&bronze, &player, &config));

        // Silver is the mimic colour of the test floor set
        let silver = chest(EspType::SilverChest, 11, 1.0);
        assert!(!tracker.should_auto_open(&silver, &player, &config));
        let opt_in = Config {
            open_unsafe_chests: true,
            ..config.clone()
        };
        assert!(tracker.should_auto_open(&silver, &player, &opt_in));

        let far = chest(EspType::GoldChest, 12, 20.0);
        assert!(!tracker.should_auto_open(&far, &player, &config));

        let fighting = GameEntity {
            in_combat: true,
            ..player.clone()
        };
        assert!(!tracker.should_auto_open(&bronze, &fighting, &config));

        let disabled = Config {
            open_chests: false,
            ..config.clone()
        };
        assert!(!tracker.should_auto_open(&bronze, &player, &disabled));

        let trap = chest(EspType::Trap, 13, 1.0);
        assert!(!tracker.should_auto_open(&trap, &player, &config));
    }

    #[test]
    fn test_silver_chest_needs_health() {
        let tracker = entered();
        let config = Config {
            open_chests: true,
            open_unsafe_chests: true,
            ..Config::default()
        };
        let silver = chest(EspType::SilverChest, 11, 1.0);

        let hurt = GameEntity {
            current_hp: 5000,
            ..healthy_player()
        };
        assert!(!tracker.should_auto_open(&silver, &hurt, &config));
        assert!(tracker.should_auto_open(&silver, &healthy_player(), &config));
    }

    #[test]
    fn test_try_interact_remembers_per_floor() {
        let mut tracker = entered();
        let game = FakeGame::new(POTD_ZONE);
        let player = healthy_player();
        let config = Config {
            open_chests: true,
            ..Config::default()
        };
        let bronze = chest(EspType::BronzeChest, 10, 1.0);

        assert!(tracker.try_interact(&bronze, &player, &config, &game).unwrap());
        assert!(!tracker.try_interact(&bronze, &player, &config, &game).unwrap());
        assert_eq!(game.interactions(), vec![10]);

        advance(&mut tracker, at(10));
        assert!(tracker.interactions().is_empty());
        assert!(tracker.try_interact(&bronze, &player, &config, &game).unwrap());
        assert_eq!(game.interactions(), vec![10, 10]);
    }

    #[test]
    fn test_failed_interaction_is_not_remembered() {
        let mut tracker = entered();
        let game = FakeGame::new(POTD_ZONE);
        game.fail_interactions(true);
        let config = Config {
            open_chests: true,
            ..Config::default()
        };
        let bronze = chest(EspType::BronzeChest, 10, 1.0);

        assert!(
            tracker
                .try_interact(&bronze, &healthy_player(), &config, &game)
                .is_err()
        );
        assert!(!tracker.interactions().contains(10));
    }

    #[test]
    fn test_nearest_openable() {
        let tracker = entered();
        let objects = vec![
            chest(EspType::SilverChest, 1, 1.0),
            chest(EspType::GoldChest, 2, 15.0),
            chest(EspType::BronzeChest, 3, 2.0),
        ];

        let found = tracker.nearest_openable(&objects, false).unwrap();
        assert_eq!(found.entity.object_id, 3);

        let found = tracker.nearest_openable(&objects, true).unwrap();
        assert_eq!(found.entity.object_id, 1);

        assert!(tracker.nearest_openable(&objects[1..2], true).is_none());
    }
}
