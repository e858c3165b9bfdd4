//! Host-facing lifecycle.
//!
//! [`Lens::start`] wires the tracker, the scan loop and the renderer to the
//! host's event stream; [`Lens::stop`] tears everything down again with
//! bounded waits.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use tracing::{debug, info, warn};

use crate::config::{self, SharedConfig};
use crate::constants::timing::{TRACKER_TICK, WORKER_JOIN_TIMEOUT};
use crate::content::in_deep_dungeon;
use crate::dungeon::{ProgressTracker, RunEvent, RunSummary};
use crate::error::Result;
use crate::esp::{
    EspObject, EspType, MobInfoTable, Renderer, Scanner, SharedMobInfo, Snapshot, SnapshotBuffer,
};
use crate::host::{DrawList, EventSink, GameClient, HostEvents, SubscriptionId, WindowControl};
use crate::map::DungeonMapReader;
use crate::protocol::{NetworkMessage, OpcodeTable, decode_signal};
use crate::shutdown::{ShutdownSignal, Worker};

/// Everything the component needs from its host
pub struct Collaborators {
    pub game: Arc<dyn GameClient>,
    pub map: Arc<dyn DungeonMapReader>,
    pub windows: Arc<dyn WindowControl>,
    pub config: SharedConfig,
    pub mob_info: SharedMobInfo,
    pub opcodes: OpcodeTable,
}

/// State shared by the host callbacks and the workers
struct LensCore {
    active: AtomicBool,
    game: Arc<dyn GameClient>,
    map: Arc<dyn DungeonMapReader>,
    windows: Arc<dyn WindowControl>,
    config: SharedConfig,
    mob_info: SharedMobInfo,
    opcodes: OpcodeTable,
    tracker: Arc<Mutex<ProgressTracker>>,
    snapshot: Arc<SnapshotBuffer>,
    renderer: Renderer,
}

impl LensCore {
    fn tracker(&self) -> MutexGuard<'_, ProgressTracker> {
        self.tracker.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn handle_message(&self, msg: &NetworkMessage<'_>) {
        let signal = match decode_signal(msg, &self.opcodes) {
            Ok(Some(signal)) => signal,
            Ok(None) => return,
            Err(e) => {
                debug!("Dropping malformed message: {}", e);
                return;
            }
        };

        debug!("Signal: {:?}", signal);
        let zone = self.game.territory_type();
        let events = self.tracker().handle_signal(signal, zone, Utc::now());
        self.dispatch(events);
    }

    fn tick(&self) {
        let zone = self.game.territory_type();
        let events = self.tracker().tick(zone, self.map.as_ref(), Utc::now());
        self.dispatch(events);
    }

    /// React to run events outside the tracker lock
    fn dispatch(&self, events: Vec<RunEvent>) {
        for event in events {
            match event {
                RunEvent::Entered {
                    content_id,
                    dungeon,
                    floor,
                } => {
                    info!(
                        "Entered {} (content {}) on floor {}",
                        dungeon, content_id, floor
                    );
                    self.reload_mob_info_if_empty();
                    if config::current(&self.config).auto_open_on_enter {
                        self.windows.show_main_window();
                    }
                }
                RunEvent::FloorAdvanced {
                    from,
                    to,
                    elapsed_secs,
                } => {
                    info!("Floor {} cleared in {}s, now on floor {}", from, elapsed_secs, to);
                }
                RunEvent::Exited { reason, summary } => {
                    info!(
                        "Left dungeon ({:?}) on floor {} after {}s",
                        reason,
                        summary.current_floor,
                        summary.total_secs()
                    );
                    self.windows.close_main_window();
                }
                other => debug!("Run event: {:?}", other),
            }
        }
    }

    fn reload_mob_info_if_empty(&self) {
        let Some(path) = config::current(&self.config).mob_info_path else {
            return;
        };
        if !self
            .mob_info
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_empty()
        {
            return;
        }

        match MobInfoTable::load(&path) {
            Ok(table) => {
                *self.mob_info.write().unwrap_or_else(PoisonError::into_inner) = table;
            }
            Err(e) => warn!("Failed to load mob info from {}: {}", path.display(), e),
        }
    }
}

impl EventSink for LensCore {
    fn on_network_message(&self, msg: &NetworkMessage<'_>) {
        if self.active.load(Ordering::SeqCst) {
            self.handle_message(msg);
        }
    }

    fn on_frame(&self, draw: &mut dyn DrawList) {
        if self.active.load(Ordering::SeqCst) {
            self.renderer.draw_frame(draw);
        }
    }

    fn on_zone_changed(&self, zone: u16) {
        debug!("Zone changed to {}", zone);
        self.snapshot.clear();
    }
}

/// Running tracker and overlay, registered with the host
pub struct Lens {
    core: Arc<LensCore>,
    subscription: SubscriptionId,
    shutdown: Arc<ShutdownSignal>,
    workers: Vec<Worker>,
}

impl Lens {
    /// Subscribe to the host and start the timer and scan workers
    pub fn start(host: &dyn HostEvents, collaborators: Collaborators) -> Result<Self> {
        let Collaborators {
            game,
            map,
            windows,
            config,
            mob_info,
            opcodes,
        } = collaborators;

        let tracker = Arc::new(Mutex::new(ProgressTracker::new()));
        let snapshot = Arc::new(SnapshotBuffer::new());
        let renderer = Renderer::new(game.clone(), config.clone(), snapshot.clone());
        let scanner = Scanner::new(
            game.clone(),
            config.clone(),
            mob_info.clone(),
            tracker.clone(),
            snapshot.clone(),
        );

        let core = Arc::new(LensCore {
            active: AtomicBool::new(true),
            game,
            map,
            windows,
            config,
            mob_info,
            opcodes,
            tracker,
            snapshot,
            renderer,
        });

        let subscription = host.subscribe(core.clone());
        let shutdown = Arc::new(ShutdownSignal::new());

        let workers = match Self::spawn_workers(&core, scanner, &shutdown) {
            Ok(workers) => workers,
            Err(e) => {
                host.unsubscribe(subscription);
                core.active.store(false, Ordering::SeqCst);
                shutdown.trigger();
                return Err(e);
            }
        };

        info!("Tracker started (opcodes {})", core.opcodes.version);
        Ok(Self {
            core,
            subscription,
            shutdown,
            workers,
        })
    }

    fn spawn_workers(
        core: &Arc<LensCore>,
        scanner: Scanner,
        shutdown: &Arc<ShutdownSignal>,
    ) -> Result<Vec<Worker>> {
        let mut workers = Vec::with_capacity(2);

        let timer_core = Arc::clone(core);
        let timer_shutdown = Arc::clone(shutdown);
        workers.push(Worker::spawn("delve-timer", move || {
            while !timer_shutdown.wait(TRACKER_TICK) {
                timer_core.tick();
            }
        })?);

        let scan_shutdown = Arc::clone(shutdown);
        match Worker::spawn("delve-scanner", move || scanner.run(&scan_shutdown)) {
            Ok(worker) => workers.push(worker),
            Err(e) => {
                shutdown.trigger();
                for worker in workers {
                    let _ = worker.join(WORKER_JOIN_TIMEOUT);
                }
                return Err(e);
            }
        }

        Ok(workers)
    }

    /// Unsubscribe, signal the workers and wait for them with a deadline.
    ///
    /// Every worker is given its chance to stop; the first join failure is
    /// returned.
    pub fn stop(self, host: &dyn HostEvents) -> Result<()> {
        host.unsubscribe(self.subscription);
        self.core.active.store(false, Ordering::SeqCst);
        self.shutdown.trigger();

        let mut result = Ok(());
        for worker in self.workers {
            if let Err(e) = worker.join(WORKER_JOIN_TIMEOUT) {
                if result.is_ok() {
                    result = Err(e);
                }
            }
        }

        self.core.snapshot.clear();
        info!("Tracker stopped");
        result
    }

    pub fn in_deep_dungeon(&self) -> bool {
        in_deep_dungeon(self.core.game.territory_type())
    }

    pub fn has_respawn(&self) -> bool {
        self.core.tracker().has_respawn()
    }

    /// Signed seconds until the next respawn
    pub fn time_till_respawn(&self) -> i64 {
        self.core.tracker().time_till_respawn(Utc::now())
    }

    pub fn is_ready(&self) -> bool {
        self.core.tracker().is_ready()
    }

    pub fn summary(&self) -> RunSummary {
        self.core.tracker().summary()
    }

    pub fn snapshot(&self) -> Snapshot {
        self.core.snapshot.read()
    }

    /// Interact with the first safe chest in reach. Returns whether one was
    /// found.
    pub fn open_nearest_chest(&self) -> Result<bool> {
        let Some(player) = self.core.game.local_player() else {
            return Ok(false);
        };
        let config = config::current(&self.core.config);

        let chests: Vec<EspObject> = self
            .core
            .game
            .object_table()?
            .into_iter()
            .filter(|entity| entity.is_valid())
            .filter_map(|entity| {
                let kind = EspType::classify(&entity).filter(EspType::is_chest)?;
                Some(EspObject::new(entity, kind, player.position, None))
            })
            .collect();

        let target = self
            .core
            .tracker()
            .nearest_openable(&chests, config.open_unsafe_chests)
            .map(|obj| obj.entity.object_id);

        match target {
            Some(object_id) => {
                self.core.game.interact(object_id)?;
                debug!("Opened nearest chest {:#x}", object_id);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
