use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Mutex, PoisonError};

use tracing::{debug, error, warn};

use super::{EspObject, EspType, SharedMobInfo, SnapshotBuffer};
use crate::config::{self, Config, SharedConfig};
use crate::constants::timing::SCAN_TICK;
use crate::content::in_deep_dungeon;
use crate::dungeon::ProgressTracker;
use crate::error::Result;
use crate::host::{GameClient, GameEntity, ObjectKind};
use crate::shutdown::ShutdownSignal;

/// Preconditions shared by the scan loop and the draw callback: overlay
/// enabled, no loading screen, inside a dungeon and logged in.
pub fn should_draw(config: &Config, game: &dyn GameClient) -> bool {
    config.enable_esp
        && !game.conditions().in_transition()
        && in_deep_dungeon(game.territory_type())
        && game.local_player().is_some()
        && game.local_content_id() > 0
}

/// Entities the overlay never shows
fn is_ignored(entity: &GameEntity) -> bool {
    !entity.is_valid()
        || matches!(
            entity.kind,
            ObjectKind::Player | ObjectKind::Companion | ObjectKind::EventNpc | ObjectKind::Other
        )
}

/// Background entity scanner.
///
/// Each pass classifies the object table into [`EspObject`]s, runs the chest
/// auto-open check, and publishes the result as a new snapshot.
pub struct Scanner {
    game: Arc<dyn GameClient>,
    config: SharedConfig,
    mob_info: SharedMobInfo,
    tracker: Arc<Mutex<ProgressTracker>>,
    snapshot: Arc<SnapshotBuffer>,
}

impl Scanner {
    pub fn new(
        game: Arc<dyn GameClient>,
        config: SharedConfig,
        mob_info: SharedMobInfo,
        tracker: Arc<Mutex<ProgressTracker>>,
        snapshot: Arc<SnapshotBuffer>,
    ) -> Self {
        Self {
            game,
            config,
            mob_info,
            tracker,
            snapshot,
        }
    }

    /// Run one scan. Returns the number of published objects, or `None` when
    /// the preconditions did not hold and the snapshot was left untouched.
    pub fn scan_once(&self) -> Result<Option<usize>> {
        let config = config::current(&self.config);
        if !should_draw(&config, self.game.as_ref()) {
            return Ok(None);
        }
        let Some(player) = self.game.local_player() else {
            return Ok(None);
        };

        let entities = self.game.object_table()?;
        if entities.is_empty() {
            return Ok(None);
        }

        let objects = self.classify_all(entities, &player, &config);
        let count = objects.len();
        self.snapshot.publish(objects);
        Ok(Some(count))
    }

    fn classify_all(
        &self,
        entities: Vec<GameEntity>,
        player: &GameEntity,
        config: &Config,
    ) -> Vec<EspObject> {
        let mob_info = self.mob_info.read().unwrap_or_else(PoisonError::into_inner);
        let mut objects = Vec::with_capacity(entities.len());

        for entity in entities {
            if entity.object_id == player.object_id {
                objects.push(EspObject::player(entity));
                continue;
            }
            if is_ignored(&entity) {
                continue;
            }
            let Some(kind) = EspType::classify(&entity) else {
                continue;
            };

            let mob = if kind.is_mob() {
                mob_info.get(entity.name_id).cloned()
            } else {
                None
            };
            let obj = EspObject::new(entity, kind, player.position, mob);

            if obj.kind.is_chest() {
                self.try_interact(&obj, player, config);
            }
            objects.push(obj);
        }
        objects
    }

    fn try_interact(&self, obj: &EspObject, player: &GameEntity, config: &Config) {
        let mut tracker = self.tracker.lock().unwrap_or_else(PoisonError::into_inner);
        match tracker.try_interact(obj, player, config, self.game.as_ref()) {
            Ok(true) => debug!("Opened {} ({:#x})", obj.kind, obj.entity.object_id),
            Ok(false) => {}
            Err(e) => warn!("Interaction with {:#x} failed: {}", obj.entity.object_id, e),
        }
    }

    /// Scan every `SCAN_TICK` until shutdown. Failed or panicking passes are
    /// logged and the loop continues.
    pub fn run(&self, shutdown: &ShutdownSignal) {
        debug!("Entity scan started");
        while !shutdown.is_shutdown() {
            match panic::catch_unwind(AssertUnwindSafe(|| self.scan_once())) {
                Ok(Ok(_)) => {}
                Ok(Err(e)) if e.is_transient() => warn!("Entity scan skipped: {}", e),
                Ok(Err(e)) => error!("Entity scan failed: {}", e),
                Err(payload) => error!("Entity scan panicked: {}", panic_message(&*payload)),
            }
            if shutdown.wait(SCAN_TICK) {
                break;
            }
        }
        debug!("Entity scan stopped");
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    payload
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| payload.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("unknown panic")
}
