//! Interfaces to the host plugin runtime.
//!
//! The core never touches game memory or the renderer itself. Everything it
//! needs from the running client comes through these traits, which the host
//! binding implements (and the tests fake).

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::Color;
use crate::error::Result;
use crate::geometry::{Vec2, Vec3};
use crate::protocol::NetworkMessage;

/// Object id of empty object-table slots
pub const INVALID_OBJECT_ID: u32 = 0xE000_0000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ObjectKind {
    #[default]
    None,
    Player,
    BattleNpc,
    EventNpc,
    Treasure,
    EventObj,
    Companion,
    Other,
}

/// One entry of the client's object table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameEntity {
    pub object_id: u32,
    /// Row id in the object's data sheet (event object / treasure id)
    pub data_id: u32,
    /// Stable monster type id for battle NPCs
    pub name_id: u32,
    pub name: String,
    pub kind: ObjectKind,
    pub sub_kind: u8,
    pub position: Vec3,
    /// Facing in radians, 0 = +Z
    pub rotation: f32,
    pub hitbox_radius: f32,
    pub in_combat: bool,
    pub targetable: bool,
    pub current_hp: u32,
    pub max_hp: u32,
}

impl Default for GameEntity {
    fn default() -> Self {
        Self {
            object_id: INVALID_OBJECT_ID,
            data_id: 0,
            name_id: 0,
            name: String::new(),
            kind: ObjectKind::None,
            sub_kind: 0,
            position: Vec3::default(),
            rotation: 0.0,
            hitbox_radius: 0.0,
            in_combat: false,
            targetable: true,
            current_hp: 0,
            max_hp: 0,
        }
    }
}

impl GameEntity {
    pub fn is_valid(&self) -> bool {
        self.object_id != INVALID_OBJECT_ID && self.kind != ObjectKind::None
    }
}

/// Client condition flags relevant to drawing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Conditions {
    pub logging_out: bool,
    pub between_areas: bool,
    pub between_areas51: bool,
}

impl Conditions {
    /// Loading screens, zone transitions and logout
    pub fn in_transition(&self) -> bool {
        self.logging_out || self.between_areas || self.between_areas51
    }
}

/// Result of projecting a world position onto the screen
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Projection {
    pub screen: Vec2,
    pub on_screen: bool,
}

/// Read access to the running game client plus the one action the core uses
pub trait GameClient: Send + Sync {
    /// Current territory id
    fn territory_type(&self) -> u16;

    fn conditions(&self) -> Conditions;

    /// Content id of the logged-in character, 0 when not logged in
    fn local_content_id(&self) -> u64;

    fn local_player(&self) -> Option<GameEntity>;

    /// Snapshot of the object table. May fail transiently while the client
    /// is rebuilding it.
    fn object_table(&self) -> Result<Vec<GameEntity>>;

    fn world_to_screen(&self, world: Vec3) -> Projection;

    /// Ask the client to interact with an object (open a chest)
    fn interact(&self, object_id: u32) -> Result<()>;
}

/// Host window management
pub trait WindowControl: Send + Sync {
    fn show_main_window(&self);
    fn close_main_window(&self);
}

/// Immediate-mode drawing primitives in screen space
pub trait DrawList {
    fn add_text(&mut self, pos: Vec2, color: Color, text: &str);
    fn add_circle_filled(&mut self, center: Vec2, radius: f32, color: Color);
    fn add_line(&mut self, from: Vec2, to: Vec2, color: Color, thickness: f32);
    fn add_polyline(&mut self, points: &[Vec2], color: Color, thickness: f32, closed: bool);
    fn add_convex_poly_filled(&mut self, points: &[Vec2], color: Color);
}

/// Callbacks the host delivers to a subscribed component
pub trait EventSink: Send + Sync {
    fn on_network_message(&self, msg: &NetworkMessage<'_>);
    fn on_frame(&self, draw: &mut dyn DrawList);
    fn on_zone_changed(&self, zone: u16);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(pub u64);

/// Host event registration. After `unsubscribe` returns, the host must not
/// invoke the sink again.
pub trait HostEvents {
    fn subscribe(&self, sink: Arc<dyn EventSink>) -> SubscriptionId;
    fn unsubscribe(&self, id: SubscriptionId);
}
