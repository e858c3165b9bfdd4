//! Test doubles for the host interfaces.

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use crate::config::Color;
use crate::content::ids::{director, mobs, objects};
use crate::error::{Error, Result};
use crate::geometry::{Vec2, Vec3};
use crate::host::{
    Conditions, DrawList, EventSink, GameClient, GameEntity, HostEvents, ObjectKind, Projection,
    SubscriptionId, WindowControl,
};
use crate::map::DungeonMapReader;
use crate::protocol::{Direction, NetworkMessage};

pub const LOCAL_PLAYER_ID: u32 = 0x1000_0001;

pub fn local_player() -> GameEntity {
    GameEntity {
        object_id: LOCAL_PLAYER_ID,
        name: "Adventurer".to_string(),
        kind: ObjectKind::Player,
        hitbox_radius: 0.5,
        current_hp: 10000,
        max_hp: 10000,
        ..GameEntity::default()
    }
}

pub fn enemy(object_id: u32, name_id: u32, position: Vec3) -> GameEntity {
    GameEntity {
        object_id,
        name_id,
        name: "Palace Hornet".to_string(),
        kind: ObjectKind::BattleNpc,
        sub_kind: mobs::ENEMY_SUB_KIND,
        position,
        hitbox_radius: 1.0,
        current_hp: 100,
        max_hp: 100,
        ..GameEntity::default()
    }
}

pub fn bronze_chest(object_id: u32, position: Vec3) -> GameEntity {
    GameEntity {
        object_id,
        data_id: objects::BRONZE_CHESTS[0],
        name: "Treasure Coffer".to_string(),
        kind: ObjectKind::Treasure,
        position,
        ..GameEntity::default()
    }
}

pub fn system_log_payload(log_id: u32, item_id: u8) -> Vec<u8> {
    let mut payload = vec![0u8; 32];
    payload[4..8].copy_from_slice(&log_id.to_le_bytes());
    payload[16] = item_id;
    payload
}

pub fn director_payload(kind: u8, content_id: u16) -> Vec<u8> {
    let mut payload = vec![0u8; 32];
    payload[0] = director::DIRECTOR_UPDATE;
    payload[4..6].copy_from_slice(&content_id.to_le_bytes());
    payload[8] = kind;
    payload
}

pub fn server_message(opcode: u16, payload: &[u8]) -> NetworkMessage<'_> {
    NetworkMessage {
        payload,
        opcode,
        source_actor: LOCAL_PLAYER_ID,
        target_actor: LOCAL_PLAYER_ID,
        direction: Direction::ZoneDown,
    }
}

struct GameState {
    zone: u16,
    conditions: Conditions,
    content_id: u64,
    player: Option<GameEntity>,
    objects: Vec<GameEntity>,
    fail_table: bool,
    panics_left: u32,
    fail_interact: bool,
    off_screen: bool,
    interactions: Vec<u32>,
}

/// In-memory game client
pub struct FakeGame {
    state: Mutex<GameState>,
}

impl FakeGame {
    pub fn new(zone: u16) -> Self {
        Self {
            state: Mutex::new(GameState {
                zone,
                conditions: Conditions::default(),
                content_id: 0x0040_0000_0000_0001,
                player: Some(local_player()),
                objects: Vec::new(),
                fail_table: false,
                panics_left: 0,
                fail_interact: false,
                off_screen: false,
                interactions: Vec::new(),
            }),
        }
    }

    pub fn set_zone(&self, zone: u16) {
        self.state.lock().unwrap().zone = zone;
    }

    pub fn set_between_areas(&self, value: bool) {
        self.state.lock().unwrap().conditions.between_areas = value;
    }

    pub fn set_local_content_id(&self, content_id: u64) {
        self.state.lock().unwrap().content_id = content_id;
    }

    pub fn set_player(&self, player: Option<GameEntity>) {
        self.state.lock().unwrap().player = player;
    }

    pub fn set_objects(&self, objects: Vec<GameEntity>) {
        self.state.lock().unwrap().objects = objects;
    }

    pub fn fail_object_table(&self, fail: bool) {
        self.state.lock().unwrap().fail_table = fail;
    }

    /// Make the next `times` object table reads panic
    pub fn panic_object_table(&self, times: u32) {
        self.state.lock().unwrap().panics_left = times;
    }

    pub fn fail_interactions(&self, fail: bool) {
        self.state.lock().unwrap().fail_interact = fail;
    }

    pub fn set_all_off_screen(&self, off_screen: bool) {
        self.state.lock().unwrap().off_screen = off_screen;
    }

    /// Object ids passed to `interact`, in call order
    pub fn interactions(&self) -> Vec<u32> {
        self.state.lock().unwrap().interactions.clone()
    }
}

impl GameClient for FakeGame {
    fn territory_type(&self) -> u16 {
        self.state.lock().unwrap().zone
    }

    fn conditions(&self) -> Conditions {
        self.state.lock().unwrap().conditions
    }

    fn local_content_id(&self) -> u64 {
        self.state.lock().unwrap().content_id
    }

    fn local_player(&self) -> Option<GameEntity> {
        self.state.lock().unwrap().player.clone()
    }

    fn object_table(&self) -> Result<Vec<GameEntity>> {
        let mut state = self.state.lock().unwrap();
        if state.panics_left > 0 {
            state.panics_left -= 1;
            drop(state);
            panic!("object table torn down");
        }
        if state.fail_table {
            return Err(Error::ObjectTableRead("table is being rebuilt".to_string()));
        }
        Ok(state.objects.clone())
    }

    fn world_to_screen(&self, world: Vec3) -> Projection {
        Projection {
            screen: Vec2::new(960.0 + world.x * 10.0, 540.0 + world.z * 10.0),
            on_screen: !self.state.lock().unwrap().off_screen,
        }
    }

    fn interact(&self, object_id: u32) -> Result<()> {
        let mut state = self.state.lock().unwrap();
        if state.fail_interact {
            return Err(Error::InteractionFailed {
                object_id,
                message: "target out of reach".to_string(),
            });
        }
        state.interactions.push(object_id);
        Ok(())
    }
}

/// Map widget with settable readings
#[derive(Default)]
pub struct FakeMap {
    floor_label: Mutex<Option<u32>>,
    passage_part: Mutex<Option<u16>>,
}

impl FakeMap {
    pub fn set_floor_label(&self, floor: Option<u32>) {
        *self.floor_label.lock().unwrap() = floor;
    }

    pub fn set_passage_part(&self, part: Option<u16>) {
        *self.passage_part.lock().unwrap() = part;
    }
}

impl DungeonMapReader for FakeMap {
    fn floor_label(&self) -> Option<u32> {
        *self.floor_label.lock().unwrap()
    }

    fn passage_part(&self) -> Option<u16> {
        *self.passage_part.lock().unwrap()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Text {
        pos: Vec2,
        color: Color,
        text: String,
    },
    CircleFilled {
        center: Vec2,
        radius: f32,
        color: Color,
    },
    Line {
        from: Vec2,
        to: Vec2,
        color: Color,
    },
    Polyline {
        points: Vec<Vec2>,
        color: Color,
        closed: bool,
    },
    PolyFilled {
        points: Vec<Vec2>,
        color: Color,
    },
}

/// Draw list that records every primitive
#[derive(Debug, Default)]
pub struct RecordingDrawList {
    pub calls: Vec<DrawCall>,
}

impl RecordingDrawList {
    pub fn count(&self, pred: impl Fn(&DrawCall) -> bool) -> usize {
        self.calls.iter().filter(|call| pred(call)).count()
    }
}

impl DrawList for RecordingDrawList {
    fn add_text(&mut self, pos: Vec2, color: Color, text: &str) {
        self.calls.push(DrawCall::Text {
            pos,
            color,
            text: text.to_string(),
        });
    }

    fn add_circle_filled(&mut self, center: Vec2, radius: f32, color: Color) {
        self.calls.push(DrawCall::CircleFilled {
            center,
            radius,
            color,
        });
    }

    fn add_line(&mut self, from: Vec2, to: Vec2, color: Color, _thickness: f32) {
        self.calls.push(DrawCall::Line { from, to, color });
    }

    fn add_polyline(&mut self, points: &[Vec2], color: Color, _thickness: f32, closed: bool) {
        self.calls.push(DrawCall::Polyline {
            points: points.to_vec(),
            color,
            closed,
        });
    }

    fn add_convex_poly_filled(&mut self, points: &[Vec2], color: Color) {
        self.calls.push(DrawCall::PolyFilled {
            points: points.to_vec(),
            color,
        });
    }
}

/// Counts window requests
#[derive(Default)]
pub struct FakeWindows {
    shown: AtomicUsize,
    closed: AtomicUsize,
}

impl FakeWindows {
    pub fn shown(&self) -> usize {
        self.shown.load(Ordering::SeqCst)
    }

    pub fn closed(&self) -> usize {
        self.closed.load(Ordering::SeqCst)
    }
}

impl WindowControl for FakeWindows {
    fn show_main_window(&self) {
        self.shown.fetch_add(1, Ordering::SeqCst);
    }

    fn close_main_window(&self) {
        self.closed.fetch_add(1, Ordering::SeqCst);
    }
}

/// Host that delivers events synchronously to its subscribers
#[derive(Default)]
pub struct FakeHost {
    next_id: AtomicU64,
    sinks: Mutex<Vec<(SubscriptionId, Arc<dyn EventSink>)>>,
}

impl FakeHost {
    fn sinks(&self) -> Vec<Arc<dyn EventSink>> {
        let sinks = self.sinks.lock().unwrap();
        sinks.iter().map(|(_, sink)| Arc::clone(sink)).collect()
    }

    pub fn subscriber_count(&self) -> usize {
        self.sinks.lock().unwrap().len()
    }

    pub fn deliver_message(&self, msg: &NetworkMessage<'_>) {
        for sink in self.sinks() {
            sink.on_network_message(msg);
        }
    }

    pub fn deliver_frame(&self, draw: &mut dyn DrawList) {
        for sink in self.sinks() {
            sink.on_frame(draw);
        }
    }

    pub fn deliver_zone_change(&self, zone: u16) {
        for sink in self.sinks() {
            sink.on_zone_changed(zone);
        }
    }
}

impl HostEvents for FakeHost {
    fn subscribe(&self, sink: Arc<dyn EventSink>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::SeqCst));
        self.sinks.lock().unwrap().push((id, sink));
        id
    }

    fn unsubscribe(&self, id: SubscriptionId) {
        self.sinks.lock().unwrap().retain(|(sink_id, _)| *sink_id != id);
    }
}
